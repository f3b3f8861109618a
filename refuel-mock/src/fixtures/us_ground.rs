//! US ground surcharges, USD per gallon, as published by three carriers with
//! deliberately misaligned band widths.

use refuel_types::{CurveKey, SurchargeRow};

use super::{ladder, linear};

pub fn ups() -> Vec<SurchargeRow> {
    // $2.00 .. $4.00, 0.25 wide
    ladder(&CurveKey::carrier("UPS"), 200, 25, &linear(14.5, 0.5, 8), false)
}

pub fn fedex() -> Vec<SurchargeRow> {
    // $2.10 .. $3.90, 0.15 wide
    ladder(&CurveKey::carrier("FedEx"), 210, 15, &linear(14.25, 0.25, 12), false)
}

pub fn dhl() -> Vec<SurchargeRow> {
    // $2.00 .. $3.60, 0.20 wide
    ladder(&CurveKey::carrier("DHL"), 200, 20, &linear(15.0, 0.45, 8), false)
}

/// DHL tail derived from the measured slope; the first row overlaps the last
/// measured band and must lose to it.
pub fn dhl_extrapolated() -> Vec<SurchargeRow> {
    ladder(&CurveKey::carrier("DHL"), 340, 20, &linear(17.7, 0.45, 5), true)
}

pub fn measured() -> Vec<SurchargeRow> {
    let mut rows = ups();
    rows.extend(fedex());
    rows.extend(dhl());
    rows
}
