//! Telemetry file loading
//!
//! A telemetry file holds one driver's lap as JSON:
//!
//! ```json
//! { "driverCode": "NOR", "driverColor": "#FF8000",
//!   "data": [ { "X": 1.0, "Y": 2.0, "Speed": 250, "Distance": 0,
//!               "Brake": false, "Throttle": 100 } ] }
//! ```
//!
//! Files are parsed only. Ordering and emptiness are checked when the two
//! laps are put into a [`crunch_core::Comparison`].

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use crunch_core::DriverTelemetry;
use log::debug;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Cannot open telemetry file {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Telemetry file {path} is not valid: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Read one driver's lap from a JSON file
pub fn load_driver(path: &Path) -> Result<DriverTelemetry, LoadError> {
    let file = File::open(path).map_err(|source| LoadError::Io {
        path: path.to_owned(),
        source,
    })?;
    let driver: DriverTelemetry =
        serde_json::from_reader(BufReader::new(file)).map_err(|source| LoadError::Parse {
            path: path.to_owned(),
            source,
        })?;

    debug!(
        "Loaded {} samples for {} from {}",
        driver.len(),
        driver.driver_code,
        path.display()
    );
    Ok(driver)
}

/// Read the reference lap and the other lap
pub fn load_pair(reference: &Path, other: &Path) -> Result<[DriverTelemetry; 2], LoadError> {
    Ok([load_driver(reference)?, load_driver(other)?])
}
