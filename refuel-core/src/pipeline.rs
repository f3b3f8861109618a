//! Dispatch of named views onto re-bucketing and filtering.

use std::sync::Arc;

use refuel_types::{BandSet, RefuelConfig, RefuelError, View};

use crate::filter::overlap_filter;
use crate::observer::{NoopObserver, RebucketObserver, ViewDispatch};
use crate::rebucket::Rebucketer;
use crate::resolve::OverlapResolver;

/// Applies a [`View`] to a band set.
///
/// | view              | transform                                |
/// |-------------------|------------------------------------------|
/// | `raw`             | identity                                 |
/// | `normalized@0.10` | re-bucket at 0.10                        |
/// | `normalized@0.02` | re-bucket at 0.02                        |
/// | `complete@0.01`   | re-bucket at 0.01                        |
/// | `overlap`         | overlap filter                           |
/// | `comparable`      | re-bucket at 0.05, then overlap filter   |
///
/// The view alone determines the transform; the pipeline keeps no state between calls.
#[derive(Clone)]
pub struct ViewPipeline {
    resolver: OverlapResolver,
    decimals: u32,
    min_overlap_curves: usize,
    observer: Arc<dyn RebucketObserver>,
}

impl Default for ViewPipeline {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ViewPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ViewPipeline")
            .field("resolver", &self.resolver)
            .field("decimals", &self.decimals)
            .field("min_overlap_curves", &self.min_overlap_curves)
            .finish_non_exhaustive()
    }
}

impl ViewPipeline {
    /// Pipeline with default tolerance, precision and overlap threshold, and no telemetry.
    #[must_use]
    pub fn new() -> Self {
        Self::from_config(&RefuelConfig::default())
    }

    /// Pipeline configured from the engine settings in `cfg`.
    #[must_use]
    pub fn from_config(cfg: &RefuelConfig) -> Self {
        Self {
            resolver: OverlapResolver::new(cfg.tie_tolerance),
            decimals: cfg.decimals,
            min_overlap_curves: cfg.min_overlap_curves,
            observer: Arc::new(NoopObserver),
        }
    }

    /// Attach a telemetry observer.
    #[must_use]
    pub fn with_observer(mut self, observer: Arc<dyn RebucketObserver>) -> Self {
        self.observer = observer;
        self
    }

    /// Rebucketer used for a given step width.
    #[must_use]
    pub fn rebucketer(&self, step: f64) -> Rebucketer {
        Rebucketer::new(step)
            .decimals(self.decimals)
            .resolver(self.resolver)
    }

    /// Apply `view` to `bands`, producing a new band set.
    ///
    /// # Errors
    /// Returns `RefuelError::InvalidStep` only if the configured precision is
    /// too coarse for the view's step width.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "refuel_core::pipeline::apply",
            skip(self, bands),
            fields(view = %view, input_bands = bands.len()),
        )
    )]
    pub fn apply(&self, view: View, bands: &BandSet) -> Result<BandSet, RefuelError> {
        let stepped = match view.step_width() {
            Some(step) => self
                .rebucketer(step)
                .rebucket_observed(bands, self.observer.as_ref())?,
            None => bands.clone(),
        };
        let out = if view.filters_overlap() {
            overlap_filter(&stepped, self.min_overlap_curves)
        } else {
            stepped
        };
        self.observer.on_view_dispatched(&ViewDispatch {
            view,
            input_bands: bands.len(),
            output_bands: out.len(),
        });
        Ok(out)
    }

    /// Apply a view by name; unrecognized names behave like `raw`.
    ///
    /// # Errors
    /// See [`ViewPipeline::apply`].
    pub fn apply_named(&self, name: &str, bands: &BandSet) -> Result<BandSet, RefuelError> {
        self.apply(View::from_name(name), bands)
    }
}
