//! ReFuel compares carrier fuel surcharge tables like for like.
//!
//! Overview
//! - Carriers publish surcharges as step functions of the fuel price, each on its
//!   own band boundaries and sometimes in its own units.
//! - `Refuel` applies a named [`View`] (raw, re-bucketed grids, overlap filter)
//!   and then converts curves to their display units, in that order.
//! - The heavy lifting lives in `refuel_core`; this crate owns configuration and
//!   produces report envelopes (`Comparison`, `CarrierFocus`).
//!
//! Key behaviors and trade-offs
//! - Re-bucketing copies one source value per grid cell (maximum coverage wins);
//!   nothing is interpolated, so a grid finer than the source repeats values and
//!   a coarser one drops narrow bands.
//! - Unit conversion rounds boundaries and values to a fixed precision. It runs
//!   after the view because rounding can flip coverage ties.
//! - Bands mixing converted and unconverted curves are split, each part keeping
//!   boundaries in its own unit.
//!
//! Examples
//! ```rust,ignore
//! use refuel::{ComparisonContext, ConversionFactor, Refuel, UnitScope, View};
//!
//! let refuel = Refuel::builder()
//!     .unit_factor(
//!         UnitScope::new("DE", "DHL", "ground_domestic"),
//!         ConversionFactor::usd_per_gallon_to_eur_per_liter(),
//!     )
//!     .build()?;
//! let de = ComparisonContext::new("DE", "ground_domestic");
//! let report = refuel.compare(&bands, View::Comparable, &de)?;
//! for band in report.bands.iter() {
//!     println!("{}", band.range_label("€"));
//! }
//! ```
//!
//! See `refuel/examples/` for a runnable demonstration.
#![warn(missing_docs)]

pub(crate) mod core;

pub use core::{Refuel, RefuelBuilder};

pub use refuel_core::{competitive_ranges, merge_rows_by_priority};
pub use refuel_core::{
    CellResolution, ConversionEvent, NoopObserver, ObservedEvent, RebucketObserver,
    RecordingObserver, ViewDispatch,
};
#[cfg(feature = "tracing")]
pub use refuel_core::TracingObserver;

// Re-export core types for convenience
pub use refuel_types::{
    Band, BandSet, CarrierFocus, Comparison, ComparisonContext, ConversionFactor, CurveKey,
    CurvePoint, RefuelConfig, RefuelError, SurchargeRow, UnitScope, UnitTable, View,
};
