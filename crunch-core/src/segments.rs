//! Segment Extraction
//!
//! A line drawn through every sample attributed to a driver would connect
//! points that are separated by stretches where the other driver (or
//! nobody) was faster. Segments split the resolved series into maximal runs
//! so each run can be drawn as its own line.

use serde::Serialize;

use crate::resolver::FasterDriverSample;
use crate::telemetry::DriverTelemetry;

/// A maximal, non-empty run of samples attributed to one driver
pub type Segment<'a> = Vec<FasterDriverSample<'a>>;

/// Split `resolved` into the runs attributed to `driver_code`
///
/// Any sample attributed elsewhere (including `None`) closes the open run.
/// Consecutive gap samples never produce empty segments.
pub fn extract<'a>(resolved: &[FasterDriverSample<'a>], driver_code: &str) -> Vec<Segment<'a>> {
    let (mut segments, open) = resolved.iter().fold(
        (Vec::new(), None::<Segment<'a>>),
        |(mut closed, open), sample| match (sample.is_attributed_to(driver_code), open) {
            (true, Some(mut run)) => {
                run.push(*sample);
                (closed, Some(run))
            }
            (true, None) => (closed, Some(vec![*sample])),
            (false, Some(run)) => {
                closed.push(run);
                (closed, None)
            }
            (false, None) => (closed, None),
        },
    );
    segments.extend(open);
    segments
}

/// Segments of one driver, with what is needed to draw them
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DriverSegments<'a> {
    pub driver_code: &'a str,
    pub driver_color: &'a str,
    pub segments: Vec<Segment<'a>>,
}

impl DriverSegments<'_> {
    pub fn sample_count(&self) -> usize {
        self.segments.iter().map(Vec::len).sum()
    }
}

/// Run the extraction once per driver
pub fn extract_per_driver<'a>(
    resolved: &[FasterDriverSample<'a>],
    drivers: [&'a DriverTelemetry; 2],
) -> Vec<DriverSegments<'a>> {
    drivers
        .into_iter()
        .map(|driver| {
            let segments = extract(resolved, &driver.driver_code);
            log::trace!(
                "{} is faster over {} segments",
                driver.driver_code,
                segments.len()
            );
            DriverSegments {
                driver_code: &driver.driver_code,
                driver_color: &driver.driver_color,
                segments,
            }
        })
        .collect()
}
