//! Telemetry hooks invoked at well-defined points of the engine.
//!
//! The engine never logs on its own. Callers that want visibility pass an
//! observer: [`NoopObserver`] is the default, [`RecordingObserver`] keeps events
//! in memory, and `TracingObserver` (feature `tracing`) forwards them to `tracing`.

use std::sync::{Mutex, PoisonError};

use refuel_types::{CurveKey, View};

/// Outcome of resolving one curve over one target grid cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellResolution<'a> {
    /// Curve being resolved.
    pub curve: &'a CurveKey,
    /// Target cell `[start, end)`.
    pub cell: (f64, f64),
    /// Interval of the winning source band, if any overlapped.
    pub source: Option<(f64, f64)>,
    /// Overlap length of the winner (0 when there is none).
    pub overlap: f64,
}

/// One application of a view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewDispatch {
    /// View applied.
    pub view: View,
    /// Input band count.
    pub input_bands: usize,
    /// Output band count.
    pub output_bands: usize,
}

/// One display-unit conversion pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConversionEvent<'a> {
    /// Curves converted in this pass.
    pub curves: &'a [CurveKey],
    /// Factor applied.
    pub factor: f64,
    /// Bands rescaled as a whole.
    pub converted: usize,
    /// Bands split because they also carried unconverted curves.
    pub split: usize,
    /// Converted bands dropped because rounding made their interval empty.
    pub collapsed: usize,
}

/// Receiver for engine telemetry. Every method defaults to a no-op.
pub trait RebucketObserver: Send + Sync {
    /// Called once per (grid cell, curve) during re-bucketing.
    fn on_cell_resolved(&self, _event: &CellResolution<'_>) {}

    /// Called once per view application.
    fn on_view_dispatched(&self, _event: &ViewDispatch) {}

    /// Called once per conversion pass.
    fn on_conversion(&self, _event: &ConversionEvent<'_>) {}
}

/// Observer that ignores every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl RebucketObserver for NoopObserver {}

/// Owned copy of an observed event.
#[derive(Debug, Clone, PartialEq)]
pub enum ObservedEvent {
    /// See [`CellResolution`].
    Cell {
        /// Curve resolved.
        curve: CurveKey,
        /// Target cell.
        cell: (f64, f64),
        /// Winning source interval.
        source: Option<(f64, f64)>,
        /// Winning overlap.
        overlap: f64,
    },
    /// See [`ViewDispatch`].
    View(ViewDispatch),
    /// See [`ConversionEvent`].
    Conversion {
        /// Curves converted.
        curves: Vec<CurveKey>,
        /// Factor applied.
        factor: f64,
        /// Bands rescaled whole.
        converted: usize,
        /// Bands split.
        split: usize,
        /// Bands collapsed.
        collapsed: usize,
    },
}

/// Observer that records every event, for tests and diagnostics.
#[derive(Debug, Default)]
pub struct RecordingObserver {
    events: Mutex<Vec<ObservedEvent>>,
}

impl RecordingObserver {
    /// Empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of recorded events in arrival order.
    #[must_use]
    pub fn events(&self) -> Vec<ObservedEvent> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Drop all recorded events.
    pub fn clear(&self) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    fn push(&self, e: ObservedEvent) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(e);
    }
}

impl RebucketObserver for RecordingObserver {
    fn on_cell_resolved(&self, event: &CellResolution<'_>) {
        self.push(ObservedEvent::Cell {
            curve: event.curve.clone(),
            cell: event.cell,
            source: event.source,
            overlap: event.overlap,
        });
    }

    fn on_view_dispatched(&self, event: &ViewDispatch) {
        self.push(ObservedEvent::View(*event));
    }

    fn on_conversion(&self, event: &ConversionEvent<'_>) {
        self.push(ObservedEvent::Conversion {
            curves: event.curves.to_vec(),
            factor: event.factor,
            converted: event.converted,
            split: event.split,
            collapsed: event.collapsed,
        });
    }
}

/// Observer that forwards events to `tracing`.
#[cfg(feature = "tracing")]
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

#[cfg(feature = "tracing")]
impl RebucketObserver for TracingObserver {
    fn on_cell_resolved(&self, event: &CellResolution<'_>) {
        tracing::trace!(
            target: "refuel_core::resolve",
            curve = %event.curve,
            start = event.cell.0,
            end = event.cell.1,
            source = ?event.source,
            overlap = event.overlap,
            "cell resolved"
        );
    }

    fn on_view_dispatched(&self, event: &ViewDispatch) {
        tracing::debug!(
            target: "refuel_core::pipeline",
            view = %event.view,
            input_bands = event.input_bands,
            output_bands = event.output_bands,
            "view dispatched"
        );
    }

    fn on_conversion(&self, event: &ConversionEvent<'_>) {
        tracing::debug!(
            target: "refuel_core::units",
            curves = event.curves.len(),
            factor = event.factor,
            converted = event.converted,
            split = event.split,
            collapsed = event.collapsed,
            "curves converted"
        );
    }
}
