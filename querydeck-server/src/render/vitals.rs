//! Fixed clinical thresholds used for conditional styling.

use serde_json::Value;

use super::value;

/// Which vital sign a reading belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VitalKind {
    /// Systolic blood pressure, mmHg
    BloodPressure,
    /// Beats per minute
    HeartRate,
    /// Degrees Fahrenheit
    Temperature,
    /// SpO2 percent
    OxygenSaturation,
    /// Breaths per minute
    BreathingRate,
}

/// Risk tier of a single reading. `as_class` is the CSS class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VitalStatus {
    Critical,
    Warning,
    Normal,
}

impl VitalStatus {
    pub fn as_class(self) -> &'static str {
        match self {
            Self::Critical => "critical",
            Self::Warning => "warning",
            Self::Normal => "normal",
        }
    }
}

impl VitalKind {
    /// Classify a numeric reading.
    pub fn classify(self, v: f64) -> VitalStatus {
        use VitalStatus::*;
        match self {
            Self::BloodPressure if v > 140.0 => Critical,
            Self::BloodPressure if v > 120.0 => Warning,
            Self::HeartRate if v > 100.0 => Critical,
            Self::HeartRate if v < 60.0 => Warning,
            Self::Temperature if v > 99.5 => Critical,
            Self::Temperature if v < 97.0 => Warning,
            Self::OxygenSaturation if v < 95.0 => Critical,
            Self::OxygenSaturation if v < 97.0 => Warning,
            Self::BreathingRate if v > 20.0 => Critical,
            Self::BreathingRate if v < 12.0 => Warning,
            _ => Normal,
        }
    }
}

/// Classify a column value. Blood pressure written as `systolic/diastolic`
/// is judged on the systolic part; anything non-numeric is normal.
pub fn vital_status(kind: VitalKind, reading: Option<&Value>) -> VitalStatus {
    let numeric = match (kind, reading) {
        (VitalKind::BloodPressure, Some(Value::String(s))) => {
            let systolic = s.split('/').next().unwrap_or_default();
            systolic.trim().parse().ok()
        }
        _ => value::number(reading),
    };
    numeric.map_or(VitalStatus::Normal, |v| kind.classify(v))
}

/// Indicator class for a free-text vital signs summary.
pub fn summary_indicator(summary: Option<&Value>) -> &'static str {
    let text = value::display(summary);
    if text.contains("Critical") {
        "status-critical"
    } else if text.contains("High") {
        "status-warning"
    } else {
        "status-active"
    }
}
