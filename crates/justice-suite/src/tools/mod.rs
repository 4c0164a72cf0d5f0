pub mod audit;
pub mod cases;
pub mod corrections;
pub mod investigator;
pub mod pretrial;
pub mod sentencing;

/// Round to `places` decimal places, sending exact halves to the even neighbour.
pub(crate) fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round_ties_even() / factor
}
