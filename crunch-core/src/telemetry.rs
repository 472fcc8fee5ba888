//! Telemetry Data Model
//!
//! A [`DriverTelemetry`] holds one driver's lap as an ordered sequence of
//! [`TelemetrySample`]s. The serialized field names follow the telemetry
//! export format (`X`, `Y`, `Speed`, `Distance`, `Brake`, `Throttle` for a
//! sample and `driverCode`, `driverColor`, `data` for a driver).

use serde::{Deserialize, Serialize};

use crate::error::InvalidInputError;

/// A single telemetry measurement
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TelemetrySample {
    /// Track position, X axis
    pub x: f64,
    /// Track position, Y axis (grows "north", opposite to screen rows)
    pub y: f64,
    /// Speed in km/h
    pub speed: f64,
    /// Distance from the start of the lap in meters
    pub distance: f64,
    /// Brake pedal pressed
    pub brake: bool,
    /// Throttle position, 0-100
    pub throttle: f64,
}

/// One driver's lap: identity, display color and ordered samples
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DriverTelemetry {
    /// Three letter driver code, e.g. "NOR"
    pub driver_code: String,
    /// CSS color used when drawing this driver
    pub driver_color: String,
    /// Samples ordered by non-decreasing distance
    pub data: Vec<TelemetrySample>,
}

impl DriverTelemetry {
    pub fn new(driver_code: &str, driver_color: &str, data: Vec<TelemetrySample>) -> Self {
        DriverTelemetry {
            driver_code: driver_code.to_string(),
            driver_color: driver_color.to_string(),
            data,
        }
    }

    /// Parse a driver's telemetry from its JSON export
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Check the ordering invariant
    ///
    /// Distances must be finite and non-decreasing. Repeated distances are
    /// accepted. An empty series is rejected since it can serve neither as a
    /// reference nor as a lookup target.
    pub fn validate(&self) -> Result<(), InvalidInputError> {
        if self.data.is_empty() {
            return Err(InvalidInputError::EmptyReferenceSeries {
                driver: self.driver_code.clone(),
            });
        }

        let mut previous = f64::NEG_INFINITY;
        for (index, sample) in self.data.iter().enumerate() {
            if !sample.distance.is_finite() {
                return Err(InvalidInputError::NonFiniteDistance {
                    driver: self.driver_code.clone(),
                    index,
                });
            }
            if sample.distance < previous {
                return Err(InvalidInputError::UnsortedSequence {
                    driver: self.driver_code.clone(),
                    index,
                    previous,
                    distance: sample.distance,
                });
            }
            previous = sample.distance;
        }

        log::trace!(
            "Validated {} samples for {} ({:.1}m .. {:.1}m)",
            self.data.len(),
            self.driver_code,
            self.data[0].distance,
            previous
        );
        Ok(())
    }
}
