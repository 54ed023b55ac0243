//! Batch orchestration: reduce every feature of a collection concurrently
//!
//! Each feature is an independent unit of work on a bounded worker pool.
//! Failures are collected per feature, so one malformed geometry never
//! prevents the other features from being annotated.

use crate::dispatch::VisvalingamReducer;
use crate::parallel::{BatchConfig, CancellationToken};
use rayon::prelude::*;
use rayon::ThreadPool;
use viswal_core::{
    Error, Feature, FeatureCollection, GeometryOrder, GeometryReducer, Result, ORDER_PROPERTY,
};

/// Outcome of reducing a single feature
#[derive(Debug)]
pub enum FeatureOutcome {
    /// The feature was annotated; `rings` counts the ring orders produced
    Reduced { rings: usize },
    /// The feature was left unannotated because its reduction failed
    Failed(Error),
    /// The batch was cancelled before this feature started
    Cancelled,
}

/// Overall status of a batch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchStatus {
    Succeeded,
    PartiallySucceeded,
    Failed,
}

/// Per-feature outcomes of a batch, aligned with the input order
#[derive(Debug, Default)]
pub struct BatchReport {
    pub outcomes: Vec<FeatureOutcome>,
}

/// Annotated features together with the report describing them
#[derive(Debug)]
pub struct BatchResult {
    pub collection: FeatureCollection,
    pub report: BatchReport,
}

impl FeatureOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, FeatureOutcome::Reduced { .. })
    }
}

impl BatchReport {
    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_success()).count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, FeatureOutcome::Failed(_)))
            .count()
    }

    pub fn cancelled(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, FeatureOutcome::Cancelled))
            .count()
    }

    /// Failed features as `(index, error)`
    pub fn errors(&self) -> impl Iterator<Item = (usize, &Error)> {
        self.outcomes.iter().enumerate().filter_map(|(i, o)| match o {
            FeatureOutcome::Failed(e) => Some((i, e)),
            _ => None,
        })
    }

    /// An empty batch counts as succeeded
    pub fn status(&self) -> BatchStatus {
        let succeeded = self.succeeded();
        if succeeded == self.outcomes.len() {
            BatchStatus::Succeeded
        } else if succeeded == 0 {
            BatchStatus::Failed
        } else {
            BatchStatus::PartiallySucceeded
        }
    }
}

/// Runs a [`GeometryReducer`] over every feature of a collection
pub struct BatchReducer<R = VisvalingamReducer> {
    reducer: R,
    pool: Option<ThreadPool>,
}

impl BatchReducer<VisvalingamReducer> {
    /// Batch reducer with the default Visvalingam-Whyatt reducer
    pub fn with_config(config: &BatchConfig) -> Result<Self> {
        Self::new(VisvalingamReducer::new(), config)
    }
}

impl<R: GeometryReducer + Sync> BatchReducer<R> {
    pub fn new(reducer: R, config: &BatchConfig) -> Result<Self> {
        let pool = if config.enabled {
            Some(config.build_pool()?)
        } else {
            None
        };
        Ok(Self { reducer, pool })
    }

    /// Reduce every feature and attach its order under [`ORDER_PROPERTY`].
    ///
    /// Features whose reduction fails, or that had not started when
    /// `cancel` was raised, are returned unchanged.
    #[tracing::instrument(name = "batch_reduce", skip_all, fields(features = collection.len()))]
    pub fn reduce(&self, mut collection: FeatureCollection, cancel: &CancellationToken) -> BatchResult {
        let orders: Vec<Option<Result<GeometryOrder>>> = match &self.pool {
            Some(pool) => pool.install(|| {
                collection
                    .features
                    .par_iter()
                    .enumerate()
                    .map(|(i, feature)| self.reduce_feature(i, feature, cancel))
                    .collect()
            }),
            None => collection
                .features
                .iter()
                .enumerate()
                .map(|(i, feature)| self.reduce_feature(i, feature, cancel))
                .collect(),
        };

        let outcomes = collection
            .features
            .iter_mut()
            .zip(orders)
            .enumerate()
            .map(|(i, (feature, order))| match order {
                None => FeatureOutcome::Cancelled,
                Some(Ok(order)) => annotate(feature, &order),
                Some(Err(e)) => {
                    tracing::warn!(feature = i, name = feature.name(), error = %e, "feature reduction failed");
                    FeatureOutcome::Failed(e)
                }
            })
            .collect();

        let report = BatchReport { outcomes };
        tracing::info!(
            succeeded = report.succeeded(),
            failed = report.failed(),
            cancelled = report.cancelled(),
            status = ?report.status(),
            "batch reduced"
        );
        BatchResult { collection, report }
    }

    /// `None` when the batch was cancelled before this feature started
    fn reduce_feature(
        &self,
        index: usize,
        feature: &Feature,
        cancel: &CancellationToken,
    ) -> Option<Result<GeometryOrder>> {
        if cancel.is_cancelled() {
            return None;
        }
        let order = match &feature.geometry {
            Some(geometry) => {
                tracing::debug!(feature = index, kind = %geometry.kind(), coords = geometry.coord_count(), "reducing feature");
                self.reducer.reduce(geometry)
            }
            None => Ok(GeometryOrder::Empty),
        };
        Some(order)
    }
}

fn annotate(feature: &mut Feature, order: &GeometryOrder) -> FeatureOutcome {
    match serde_json::to_value(order) {
        Ok(value) => {
            feature.properties.insert(ORDER_PROPERTY.to_string(), value);
            FeatureOutcome::Reduced {
                rings: order.ring_count(),
            }
        }
        Err(e) => FeatureOutcome::Failed(Error::InvalidData(format!(
            "Failed to encode order: {}",
            e
        ))),
    }
}

/// Reduce every feature on a pool sized to the available parallelism
pub fn batch_reduce(collection: FeatureCollection) -> Result<BatchResult> {
    let reducer = BatchReducer::with_config(&BatchConfig::default())?;
    Ok(reducer.reduce(collection, &CancellationToken::new()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use viswal_core::{coords_from_pairs, Coord, Geometry};

    fn triangle_feature(name: &str) -> Feature {
        Feature::new(Geometry::line_string(&[(0.0, 0.0), (5.0, 5.0), (10.0, 0.0)]))
            .with_property("name", json!(name))
    }

    fn malformed_feature() -> Feature {
        Feature::new(Geometry::Polygon(vec![coords_from_pairs(&[(1.0, 1.0)])]))
            .with_property("name", json!("broken"))
    }

    #[test]
    fn test_all_succeed() {
        let collection = FeatureCollection::from_features(vec![
            triangle_feature("a"),
            triangle_feature("b"),
        ]);
        let result = batch_reduce(collection).unwrap();
        assert_eq!(result.report.status(), BatchStatus::Succeeded);
        for feature in &result.collection.features {
            assert_eq!(feature.order(), Some(&json!([[0.0, 1.0, 0.0]])));
            assert!(feature.name().is_some());
        }
    }

    #[test]
    fn test_partial_failure_is_isolated() {
        let collection = FeatureCollection::from_features(vec![
            triangle_feature("a"),
            malformed_feature(),
            triangle_feature("c"),
        ]);
        let result = batch_reduce(collection).unwrap();
        let report = &result.report;
        assert_eq!(report.succeeded(), 2);
        assert_eq!(report.failed(), 1);
        assert_eq!(report.status(), BatchStatus::PartiallySucceeded);

        let errors: Vec<_> = report.errors().collect();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].0, 1);
        assert!(matches!(errors[0].1, Error::MalformedRing { ring: 0, len: 1 }));

        assert!(result.collection.features[0].order().is_some());
        assert!(result.collection.features[1].order().is_none());
        assert!(result.collection.features[2].order().is_some());
    }

    #[test]
    fn test_all_fail() {
        let collection = FeatureCollection::from_features(vec![malformed_feature(), malformed_feature()]);
        let result = batch_reduce(collection).unwrap();
        assert_eq!(result.report.status(), BatchStatus::Failed);
    }

    #[test]
    fn test_cancelled_before_start() {
        let reducer = BatchReducer::with_config(&BatchConfig::new().with_threads(2)).unwrap();
        let token = CancellationToken::new();
        token.cancel();
        let collection = FeatureCollection::from_features(vec![triangle_feature("a"), triangle_feature("b")]);
        let result = reducer.reduce(collection, &token);
        assert_eq!(result.report.cancelled(), 2);
        assert_eq!(result.report.status(), BatchStatus::Failed);
        assert!(result.collection.features.iter().all(|f| f.order().is_none()));
    }

    /// Raises the token while reducing, as a caller cancelling mid-batch would
    struct CancelDuringReduce {
        inner: VisvalingamReducer,
        token: CancellationToken,
    }

    impl GeometryReducer for CancelDuringReduce {
        fn reduce(&self, geometry: &Geometry) -> Result<GeometryOrder> {
            self.token.cancel();
            self.inner.reduce(geometry)
        }
    }

    #[test]
    fn test_cancelled_mid_batch() {
        let token = CancellationToken::new();
        let reducer = CancelDuringReduce {
            inner: VisvalingamReducer::new(),
            token: token.clone(),
        };
        let batch = BatchReducer::new(reducer, &BatchConfig::new().with_enabled(false)).unwrap();
        let collection = FeatureCollection::from_features(vec![
            triangle_feature("a"),
            triangle_feature("b"),
            triangle_feature("c"),
        ]);
        let result = batch.reduce(collection, &token);

        let report = &result.report;
        assert!(matches!(report.outcomes[0], FeatureOutcome::Reduced { rings: 1 }));
        assert!(matches!(report.outcomes[1], FeatureOutcome::Cancelled));
        assert!(matches!(report.outcomes[2], FeatureOutcome::Cancelled));
        assert_eq!(report.succeeded(), 1);
        assert_eq!(report.cancelled(), 2);
        assert_eq!(report.status(), BatchStatus::PartiallySucceeded);

        // The started feature finished and kept its order
        assert_eq!(result.collection.features[0].order(), Some(&json!([[0.0, 1.0, 0.0]])));
        assert!(result.collection.features[1].order().is_none());
        assert!(result.collection.features[2].order().is_none());
    }

    #[test]
    fn test_sequential_matches_parallel() {
        let features: Vec<Feature> = (0..20)
            .map(|k| {
                let coords: Vec<Coord> = (0..30)
                    .map(|i| {
                        let t = i as f64 * 0.2 + k as f64;
                        Coord::new(t, (t * 1.3).sin())
                    })
                    .collect();
                Feature::new(Geometry::LineString(coords))
            })
            .collect();
        let collection = FeatureCollection::from_features(features);

        let parallel = BatchReducer::with_config(&BatchConfig::new().with_threads(4))
            .unwrap()
            .reduce(collection.clone(), &CancellationToken::new());
        let sequential = BatchReducer::with_config(&BatchConfig::new().with_enabled(false))
            .unwrap()
            .reduce(collection, &CancellationToken::new());
        assert_eq!(parallel.collection, sequential.collection);
    }

    #[test]
    fn test_missing_geometry_and_points() {
        let collection = FeatureCollection::from_features(vec![
            Feature::default(),
            Feature::new(Geometry::Point(Coord::new(1.0, 1.0))),
        ]);
        let result = batch_reduce(collection).unwrap();
        assert_eq!(result.report.status(), BatchStatus::Succeeded);
        for feature in &result.collection.features {
            assert_eq!(feature.order(), Some(&json!([])));
        }
    }

    #[test]
    fn test_empty_batch() {
        let result = batch_reduce(FeatureCollection::new()).unwrap();
        assert!(result.report.is_empty());
        assert_eq!(result.report.status(), BatchStatus::Succeeded);
    }
}
