//! Driver Action Classification
//!
//! Maps a sample to what the driver is doing at that point.

use serde::{Deserialize, Serialize};

use crate::telemetry::TelemetrySample;

/// Throttle position at or above which a sample counts as full throttle.
/// Values just below are treated as cornering to keep pedal noise out.
pub const FULL_THROTTLE_THRESHOLD: f64 = 99.0;

/// What a driver is doing at a sample
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionState {
    Braking,
    FullThrottle,
    Cornering,
    /// Sample lies outside the requested distance window
    None,
}

impl ActionState {
    /// Display color for action bands
    pub fn color(&self) -> Option<&'static str> {
        match self {
            ActionState::Braking => Some("#FBBF24"),
            ActionState::FullThrottle => Some("#34D399"),
            ActionState::Cornering => Some("#A1A1AA"),
            ActionState::None => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ActionState::Braking => "Braking",
            ActionState::FullThrottle => "Full Throttle",
            ActionState::Cornering => "Cornering",
            ActionState::None => "",
        }
    }
}

/// Classify a sample. Brake wins over any throttle reading.
///
/// Never returns [`ActionState::None`]; callers apply that to samples they
/// filter out of a distance window.
pub fn classify(sample: &TelemetrySample) -> ActionState {
    if sample.brake {
        ActionState::Braking
    } else if sample.throttle >= FULL_THROTTLE_THRESHOLD {
        ActionState::FullThrottle
    } else {
        ActionState::Cornering
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::telemetry::tests::sample;

    fn with_pedals(brake: bool, throttle: f64) -> TelemetrySample {
        TelemetrySample {
            brake,
            throttle,
            ..sample(0.0, 100.0)
        }
    }

    #[test]
    fn test_brake_takes_precedence() {
        assert_eq!(classify(&with_pedals(true, 100.0)), ActionState::Braking);
        assert_eq!(classify(&with_pedals(true, 0.0)), ActionState::Braking);
    }

    #[test]
    fn test_threshold_boundary() {
        assert_eq!(classify(&with_pedals(false, 99.0)), ActionState::FullThrottle);
        assert_eq!(classify(&with_pedals(false, 100.0)), ActionState::FullThrottle);
        assert_eq!(classify(&with_pedals(false, 98.999)), ActionState::Cornering);
    }

    #[test]
    fn test_lift_is_cornering() {
        assert_eq!(classify(&with_pedals(false, 0.0)), ActionState::Cornering);
        assert_eq!(classify(&with_pedals(false, 42.0)), ActionState::Cornering);
    }

    #[test]
    fn test_serialized_names() {
        assert_eq!(
            serde_json::to_string(&ActionState::FullThrottle).unwrap(),
            "\"full_throttle\""
        );
        assert_eq!(serde_json::to_string(&ActionState::None).unwrap(), "\"none\"");
    }

    #[test]
    fn test_none_has_no_band_color() {
        assert!(ActionState::None.color().is_none());
        assert_eq!(ActionState::Braking.color(), Some("#FBBF24"));
    }
}
