//! German domestic ground surcharges.
//!
//! UPS publishes in EUR per liter. DHL still publishes in USD per gallon and
//! needs a unit conversion before the two are comparable.

use refuel_types::{CurveKey, SurchargeRow};

use super::{ladder, linear};

pub fn ups() -> Vec<SurchargeRow> {
    // 1.20 .. 1.80 EUR/l, 0.05 wide
    ladder(&CurveKey::carrier("UPS"), 120, 5, &linear(16.0, 0.25, 12), false)
}

pub fn dhl() -> Vec<SurchargeRow> {
    // 5.00 .. 7.00 USD/gal, 0.20 wide
    ladder(&CurveKey::carrier("DHL"), 500, 20, &linear(15.5, 0.3, 10), false)
}

pub fn measured() -> Vec<SurchargeRow> {
    let mut rows = ups();
    rows.extend(dhl());
    rows
}
