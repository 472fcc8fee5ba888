//! Distance Lookup
//!
//! Finds the sample of a series that sits at (or just past) a target distance.
//! This is a nearest-following lookup: no interpolation or weighting is done,
//! the returned sample's distance may be larger than the target.
//!
//! The first sample of a series is only ever used as the scan anchor and is
//! never returned as a match. Segment boundaries downstream depend on this.

use crate::telemetry::TelemetrySample;

/// Index the scan starts at. Index 0 is never a match.
const FIRST_CANDIDATE: usize = 1;

/// Return the first sample at index >= 1 whose distance is >= `target`
///
/// Restarts from the beginning of `samples` on every call. Use
/// [`DistanceCursor`] when looking up many targets in increasing order.
pub fn find_at_distance(target: f64, samples: &[TelemetrySample]) -> Option<&TelemetrySample> {
    samples
        .iter()
        .skip(FIRST_CANDIDATE)
        .find(|sample| sample.distance >= target)
}

/// Monotonic lookup over one series
///
/// Gives the same answers as [`find_at_distance`] for any sequence of
/// targets. While targets are non-decreasing the cursor never moves backwards,
/// so a full pass costs O(n + m) instead of O(n * m). A target smaller than
/// the previous one rewinds the cursor to the anchor.
#[derive(Debug, Clone)]
pub struct DistanceCursor<'a> {
    samples: &'a [TelemetrySample],
    position: usize,
    last_target: f64,
}

impl<'a> DistanceCursor<'a> {
    pub fn new(samples: &'a [TelemetrySample]) -> Self {
        DistanceCursor {
            samples,
            position: FIRST_CANDIDATE,
            last_target: f64::NEG_INFINITY,
        }
    }

    /// Advance to the first sample at or beyond `target`
    pub fn seek(&mut self, target: f64) -> Option<&'a TelemetrySample> {
        // Comparisons are negated so NaN behaves exactly like the plain scan
        if !(target >= self.last_target) {
            self.position = FIRST_CANDIDATE;
        }
        self.last_target = target;

        while let Some(sample) = self.samples.get(self.position) {
            if sample.distance >= target {
                return Some(sample);
            }
            self.position += 1;
        }
        None
    }
}
