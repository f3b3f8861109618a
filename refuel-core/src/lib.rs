//! refuel-core
//!
//! Band normalization engine for piecewise-constant surcharge curves.
//!
//! - `registry`: discover the curve columns present in a band set.
//! - `resolve`: pick the best source band for a target interval (max coverage,
//!   deterministic tie-break).
//! - `rebucket`: rebuild a band set on a uniform grid.
//! - `filter` / `pipeline`: the overlap filter and named view dispatch.
//! - `units`: display-unit conversion, applied after a view.
//! - `merge`: merge measured and extrapolated rows by priority.
//! - `focus`: price ranges where one curve is the cheapest.
//! - `observer`: telemetry hooks; the engine is silent by default.
//!
//! Every transform is a pure, synchronous function of its inputs: the same band
//! set and view always produce identical output, so calls can run in parallel
//! without locking.
#![warn(missing_docs)]

pub mod filter;
pub mod focus;
pub mod merge;
pub mod numeric;
pub mod observer;
pub mod pipeline;
pub mod rebucket;
pub mod registry;
pub mod resolve;
pub mod units;

pub use filter::overlap_filter;
pub use focus::competitive_ranges;
pub use merge::merge_rows_by_priority;
pub use numeric::round_dp;
pub use observer::{
    CellResolution, ConversionEvent, NoopObserver, ObservedEvent, RebucketObserver,
    RecordingObserver, ViewDispatch,
};
#[cfg(feature = "tracing")]
pub use observer::TracingObserver;
pub use pipeline::ViewPipeline;
pub use rebucket::{Rebucketer, grid_cells, rebucket};
pub use registry::CurveColumnRegistry;
pub use resolve::{OverlapResolver, Resolved};
pub use units::UnitConverter;

pub use refuel_types::*;
