//! ReFuel data transfer objects and configuration primitives.
//!
//! - `curve`: curve identifiers (`CurveKey`) and per-curve readings (`CurvePoint`).
//! - `band`: half-open price intervals (`Band`), snapshots (`BandSet`) and long-format rows.
//! - `view`: the named display transforms understood by the view pipeline.
//! - `units`: conversion factors and the `(market, carrier, category)` unit table.
//! - `config`: engine configuration and request context.
#![warn(missing_docs)]

mod band;
mod config;
mod curve;
mod error;
mod reports;
mod units;
mod view;

pub use band::{Band, BandSet, SurchargeRow};
pub use config::{ComparisonContext, RefuelConfig};
pub use curve::{CurveKey, CurvePoint};
pub use error::RefuelError;
pub use reports::{CarrierFocus, Comparison};
pub use units::{ConversionFactor, UnitScope, UnitTable};
pub use view::View;
