//! End-to-end tests: parse GeoJSON, reduce, write annotated output

use serde_json::{json, Value};
use std::fs;
use viswal_io::*;
use viswal_simplification::{batch_reduce, BatchStatus};

fn sample_collection() -> String {
    json!({
        "type": "FeatureCollection",
        "features": [
            {
                "type": "Feature",
                "geometry": {
                    "type": "Polygon",
                    "coordinates": [
                        [[0, 0], [0, 1], [1, 1], [1, 0], [0, 0]],
                        [[0.2, 0.2], [0.2, 0.4], [0.4, 0.4], [0.2, 0.2]]
                    ]
                },
                "properties": {"name": "Block 1"}
            },
            {
                "type": "Feature",
                "geometry": {
                    "type": "GeometryCollection",
                    "geometries": [
                        {"type": "Point", "coordinates": [3, 3]},
                        {"type": "LineString", "coordinates": [[0, 0], [5, 5], [10, 0]]}
                    ]
                },
                "properties": {"name": "Mixed"}
            },
            {
                "type": "Feature",
                "geometry": {"type": "LineString", "coordinates": [[4, 2]]},
                "properties": {"name": "Stub"}
            }
        ]
    })
    .to_string()
}

#[test]
fn test_annotated_output() {
    let collection = parse_feature_collection(sample_collection().as_bytes()).unwrap();
    let result = batch_reduce(collection).unwrap();
    assert_eq!(result.report.status(), BatchStatus::PartiallySucceeded);
    assert_eq!(result.report.succeeded(), 2);

    let bytes = encode_feature_collection(&result.collection, true).unwrap();
    let document: Value = serde_json::from_slice(&bytes).unwrap();
    let features = document["features"].as_array().unwrap();
    assert_eq!(features.len(), 3);

    let block = features[0]["properties"]["Order"].as_array().unwrap();
    assert_eq!(block.len(), 2);
    assert_eq!(block[0].as_array().unwrap().len(), 5);
    assert_eq!(block[1].as_array().unwrap().len(), 4);

    assert_eq!(
        features[1]["properties"]["Order"],
        json!([[], [[0.0, 1.0, 0.0]]])
    );
    assert!(features[2]["properties"].get("Order").is_none());
    assert_eq!(features[2]["properties"]["name"], json!("Stub"));
}

#[test]
fn test_file_round_trip_and_split() {
    let temp = tempfile::tempdir().unwrap();
    let dir = temp.path();

    let input = dir.join("input.geojson");
    fs::write(&input, sample_collection()).unwrap();

    let collection = read_features(&input).unwrap();
    let result = batch_reduce(collection).unwrap();

    let output = dir.join("output.geojson");
    write_features(&result.collection, &output).unwrap();
    let reread = read_features(&output).unwrap();
    assert_eq!(reread, result.collection);

    let paths = write_split(&result.collection, dir.join("split")).unwrap();
    assert_eq!(paths.len(), 3);
    assert!(paths[0].ends_with("00000-Block_1.geojson"));
    let single: Value = serde_json::from_slice(&fs::read(&paths[1]).unwrap()).unwrap();
    assert_eq!(single["type"], json!("Feature"));
    assert_eq!(single["properties"]["name"], json!("Mixed"));
}
