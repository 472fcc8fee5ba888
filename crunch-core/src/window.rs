//! Distance Windows
//!
//! Corner analysis looks at a short stretch of track, e.g. the braking zone
//! and exit of turn 1. A [`DistanceWindow`] selects that stretch and rebases
//! distances so the visible range starts at zero.
//!
//! Membership follows the walk used by the corner chart: samples are taken
//! once their distance reaches `from`, and the walk stops right after the
//! first sample beyond `to`. That one overshoot sample is kept so plotted
//! lines reach the window edge.

use serde::{Deserialize, Serialize};

use crate::action::{classify, ActionState};
use crate::error::InvalidInputError;
use crate::telemetry::{DriverTelemetry, TelemetrySample};

/// Vertical spacing between the action bands of consecutive drivers
pub const ACTION_BAND_SPACING: f64 = 40.0;

/// A `[from, to]` stretch of track distance
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DistanceWindow {
    pub from: f64,
    pub to: f64,
}

impl DistanceWindow {
    pub fn new(from: f64, to: f64) -> Result<Self, InvalidInputError> {
        let window = DistanceWindow { from, to };
        window.validate()?;
        Ok(window)
    }

    pub fn validate(&self) -> Result<(), InvalidInputError> {
        if !self.from.is_finite() || !self.to.is_finite() || self.from > self.to {
            return Err(InvalidInputError::InvalidWindow {
                from: self.from,
                to: self.to,
            });
        }
        Ok(())
    }

    /// Width of the rebased domain `[0, to - from]`
    pub fn length(&self) -> f64 {
        self.to - self.from
    }

    pub fn rebase(&self, distance: f64) -> f64 {
        distance - self.from
    }

    /// Per-sample membership flags for `samples`
    pub fn membership(&self, samples: &[TelemetrySample]) -> Vec<bool> {
        let mut past_end = false;
        samples
            .iter()
            .map(|sample| {
                let inside = !past_end && sample.distance >= self.from;
                if sample.distance > self.to {
                    past_end = true;
                }
                inside
            })
            .collect()
    }
}

/// One row of a windowed trace
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WindowRow {
    /// Distance relative to the window start
    pub distance: f64,
    pub speed: f64,
    pub brake: bool,
    pub throttle: f64,
    pub action: ActionState,
}

/// The samples of `driver` inside `window`, rebased and classified
pub fn window_trace(driver: &DriverTelemetry, window: &DistanceWindow) -> Vec<WindowRow> {
    driver
        .data
        .iter()
        .zip(window.membership(&driver.data))
        .filter(|(_, inside)| *inside)
        .map(|(sample, _)| WindowRow {
            distance: window.rebase(sample.distance),
            speed: sample.speed,
            brake: sample.brake,
            throttle: sample.throttle,
            action: classify(sample),
        })
        .collect()
}

/// Classification of every sample; [`ActionState::None`] outside the window
pub fn action_series(driver: &DriverTelemetry, window: Option<&DistanceWindow>) -> Vec<ActionState> {
    match window {
        None => driver.data.iter().map(classify).collect(),
        Some(window) => driver
            .data
            .iter()
            .zip(window.membership(&driver.data))
            .map(|(sample, inside)| if inside { classify(sample) } else { ActionState::None })
            .collect(),
    }
}

/// A point of a speed trace
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpeedPoint {
    pub distance: f64,
    pub speed: f64,
}

/// Speed against distance, for the whole lap or rebased to a window
pub fn speed_series(driver: &DriverTelemetry, window: Option<&DistanceWindow>) -> Vec<SpeedPoint> {
    match window {
        None => driver
            .data
            .iter()
            .map(|s| SpeedPoint {
                distance: s.distance,
                speed: s.speed,
            })
            .collect(),
        Some(window) => window_trace(driver, window)
            .into_iter()
            .map(|row| SpeedPoint {
                distance: row.distance,
                speed: row.speed,
            })
            .collect(),
    }
}

/// Baseline of a driver's action bands in the corner chart
pub fn action_band_offset(driver_index: usize) -> f64 {
    driver_index as f64 * ACTION_BAND_SPACING
}
