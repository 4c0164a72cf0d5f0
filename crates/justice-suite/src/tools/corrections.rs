use serde::{Deserialize, Serialize};

pub const LOCATION_VIOLATION: &str =
    "Location Violation: Offender is outside the designated safe zone.";
pub const CURFEW_VIOLATION: &str = "Curfew Violation: Monitored during curfew hours.";
pub const COMPLIANT: &str = "Status: Compliant";

/// Position report from an ankle monitor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GpsReading {
    pub current_x: f64,
    pub current_y: f64,
    pub current_hour: u32,
}

/// Geofence and curfew window for a supervised offender. The curfew wraps
/// midnight: hours at or after `curfew_start_hour` or before `curfew_end_hour`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SupervisionTerms {
    pub safe_zone_x: (f64, f64),
    pub safe_zone_y: (f64, f64),
    pub curfew_start_hour: u32,
    pub curfew_end_hour: u32,
}

impl Default for SupervisionTerms {
    fn default() -> Self {
        Self {
            safe_zone_x: (10.0, 90.0),
            safe_zone_y: (10.0, 90.0),
            curfew_start_hour: 22,
            curfew_end_hour: 6,
        }
    }
}

impl SupervisionTerms {
    pub fn inside_safe_zone(&self, reading: &GpsReading) -> bool {
        let (x_min, x_max) = self.safe_zone_x;
        let (y_min, y_max) = self.safe_zone_y;
        (x_min..=x_max).contains(&reading.current_x) && (y_min..=y_max).contains(&reading.current_y)
    }

    pub fn during_curfew(&self, hour: u32) -> bool {
        hour >= self.curfew_start_hour || hour < self.curfew_end_hour
    }

    /// Violation messages in a fixed order, or a single compliant marker.
    pub fn check(&self, reading: &GpsReading) -> Vec<String> {
        let mut violations = Vec::new();
        if !self.inside_safe_zone(reading) {
            violations.push(LOCATION_VIOLATION.to_string());
        }
        if self.during_curfew(reading.current_hour) {
            violations.push(CURFEW_VIOLATION.to_string());
        }
        if violations.is_empty() {
            violations.push(COMPLIANT.to_string());
        }
        violations
    }
}
