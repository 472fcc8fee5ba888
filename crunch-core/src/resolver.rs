//! Fastest-Driver Resolution
//!
//! Walks the reference driver's lap and decides, at every sample, which of
//! the two drivers is carrying more speed at that distance.
//!
//! The comparison is asymmetric: the first driver always provides the
//! distances and the second driver is looked up at them. Swapping the
//! arguments is not guaranteed to mirror the result.

use serde::Serialize;

use crate::lookup::DistanceCursor;
use crate::telemetry::{DriverTelemetry, TelemetrySample};

/// One point of the "who is faster" series
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FasterDriverSample<'a> {
    #[serde(rename = "X")]
    pub x: f64,
    #[serde(rename = "Y")]
    pub y: f64,
    pub distance: f64,
    /// `None` on equal speeds or when the other driver has no sample there
    #[serde(rename = "attributedDriverCode")]
    pub driver_code: Option<&'a str>,
}

impl<'a> FasterDriverSample<'a> {
    fn at(sample: &TelemetrySample, driver_code: Option<&'a str>) -> Self {
        FasterDriverSample {
            x: sample.x,
            y: sample.y,
            distance: sample.distance,
            driver_code,
        }
    }

    pub fn is_attributed_to(&self, driver_code: &str) -> bool {
        self.driver_code == Some(driver_code)
    }
}

/// Resolve the faster driver along `reference`'s lap
///
/// Output has one entry per reference sample, in the same order. When the
/// other driver is faster the entry carries the other driver's matched
/// sample (its own position on track), otherwise the reference sample's.
pub fn resolve<'a>(
    reference: &'a DriverTelemetry,
    other: &'a DriverTelemetry,
) -> Vec<FasterDriverSample<'a>> {
    let mut cursor = DistanceCursor::new(&other.data);
    resolve_with(reference, other, |distance| cursor.seek(distance))
}

pub(crate) fn resolve_with<'a, F>(
    reference: &'a DriverTelemetry,
    other: &'a DriverTelemetry,
    mut lookup: F,
) -> Vec<FasterDriverSample<'a>>
where
    F: FnMut(f64) -> Option<&'a TelemetrySample>,
{
    let resolved: Vec<FasterDriverSample<'a>> = reference
        .data
        .iter()
        .map(|sample| match lookup(sample.distance) {
            None => FasterDriverSample::at(sample, None),
            Some(matched) if sample.speed > matched.speed => {
                FasterDriverSample::at(sample, Some(reference.driver_code.as_str()))
            }
            Some(matched) if matched.speed > sample.speed => {
                FasterDriverSample::at(matched, Some(other.driver_code.as_str()))
            }
            Some(_) => FasterDriverSample::at(sample, None),
        })
        .collect();

    log::debug!(
        "Resolved {} samples of {} against {} ({} samples)",
        resolved.len(),
        reference.driver_code,
        other.driver_code,
        other.data.len()
    );
    resolved
}

/// How the resolved samples split between the two drivers
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttributionCounts {
    pub reference: usize,
    pub other: usize,
    pub neither: usize,
}

impl AttributionCounts {
    pub fn count(resolved: &[FasterDriverSample], reference: &str, other: &str) -> Self {
        resolved
            .iter()
            .fold(AttributionCounts::default(), |mut counts, sample| {
                match sample.driver_code {
                    Some(code) if code == reference => counts.reference += 1,
                    Some(code) if code == other => counts.other += 1,
                    _ => counts.neither += 1,
                }
                counts
            })
    }

    pub fn total(&self) -> usize {
        self.reference + self.other + self.neither
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lookup::find_at_distance;
    use crate::telemetry::tests::driver;
    use proptest::prelude::*;

    fn resolve_naive<'a>(
        reference: &'a DriverTelemetry,
        other: &'a DriverTelemetry,
    ) -> Vec<FasterDriverSample<'a>> {
        resolve_with(reference, other, |distance| find_at_distance(distance, &other.data))
    }

    #[test]
    fn test_documented_scenario() {
        let mut a = driver("A", &[(0.0, 200.0), (10.0, 210.0)]);
        let mut b = driver("B", &[(0.0, 190.0), (12.0, 220.0)]);
        a.data[0].y = 1.0;
        a.data[1].y = 2.0;
        b.data[1].x = 77.0;
        b.data[1].y = -3.0;

        let resolved = resolve(&a, &b);
        assert_eq!(resolved.len(), 2);
        for entry in &resolved {
            assert_eq!(entry.driver_code, Some("B"));
            assert_eq!(entry.x, 77.0);
            assert_eq!(entry.y, -3.0);
            assert_eq!(entry.distance, 12.0);
        }
    }

    #[test]
    fn test_reference_faster_keeps_reference_position() {
        let mut a = driver("A", &[(0.0, 100.0), (5.0, 300.0)]);
        a.data[1].y = 9.0;
        let b = driver("B", &[(0.0, 100.0), (6.0, 150.0)]);

        let resolved = resolve(&a, &b);
        assert_eq!(resolved[1].driver_code, Some("A"));
        assert_eq!(resolved[1].x, 5.0);
        assert_eq!(resolved[1].y, 9.0);
        assert_eq!(resolved[1].distance, 5.0);
    }

    #[test]
    fn test_equal_speed_is_unattributed() {
        let a = driver("A", &[(0.0, 150.0), (5.0, 150.0)]);
        let b = driver("B", &[(0.0, 150.0), (5.0, 150.0)]);

        let resolved = resolve(&a, &b);
        assert!(resolved.iter().all(|r| r.driver_code.is_none()));
        assert_eq!(resolved[1].x, 5.0);
    }

    #[test]
    fn test_short_other_series_leaves_trailing_gaps() {
        let a = driver("A", &[(0.0, 100.0), (10.0, 100.0), (20.0, 100.0), (30.0, 100.0)]);
        let b = driver("B", &[(0.0, 90.0), (15.0, 90.0)]);

        let resolved = resolve(&a, &b);
        assert_eq!(resolved.len(), 4);
        assert_eq!(resolved[0].driver_code, Some("A"));
        assert_eq!(resolved[1].driver_code, Some("A"));
        assert_eq!(resolved[2].driver_code, None);
        assert_eq!(resolved[3].driver_code, None);
        assert_eq!(resolved[3].distance, 30.0);
    }

    #[test]
    fn test_empty_reference() {
        let a = driver("A", &[]);
        let b = driver("B", &[(0.0, 90.0), (15.0, 90.0)]);
        assert!(resolve(&a, &b).is_empty());
    }

    #[test]
    fn test_single_sample_other_never_matches() {
        let a = driver("A", &[(0.0, 100.0), (1.0, 100.0)]);
        let b = driver("B", &[(0.0, 500.0)]);
        assert!(resolve(&a, &b).iter().all(|r| r.driver_code.is_none()));
    }

    #[test]
    fn test_deterministic() {
        let a = driver("A", &[(0.0, 100.0), (3.0, 120.0), (7.0, 90.0), (9.0, 95.0)]);
        let b = driver("B", &[(0.0, 110.0), (4.0, 100.0), (8.0, 100.0)]);
        assert_eq!(resolve(&a, &b), resolve(&a, &b));
    }

    #[test]
    fn test_attribution_counts() {
        let a = driver("A", &[(0.0, 100.0), (10.0, 100.0), (20.0, 100.0), (30.0, 100.0)]);
        let b = driver("B", &[(0.0, 90.0), (10.0, 120.0), (20.0, 100.0)]);

        let resolved = resolve(&a, &b);
        let counts = AttributionCounts::count(&resolved, "A", "B");
        assert_eq!(counts.reference, 0);
        assert_eq!(counts.other, 2);
        assert_eq!(counts.neither, 2);
        assert_eq!(counts.total(), a.len());
    }

    #[test]
    fn test_serialized_shape() {
        let a = driver("A", &[(0.0, 100.0), (10.0, 100.0)]);
        let b = driver("B", &[(0.0, 90.0)]);
        let resolved = resolve(&a, &b);
        let value = serde_json::to_value(&resolved[0]).unwrap();
        assert_eq!(value["X"], 0.0);
        assert_eq!(value["distance"], 0.0);
        assert!(value["attributedDriverCode"].is_null());
    }

    fn arb_lap(code: &'static str) -> impl Strategy<Value = DriverTelemetry> {
        prop::collection::vec((0u16..40, 80u16..90), 0..50).prop_map(move |steps| {
            let mut distance = 0.0;
            let points: Vec<(f64, f64)> = steps
                .into_iter()
                .map(|(step, speed)| {
                    distance += step as f64;
                    (distance, speed as f64)
                })
                .collect();
            driver(code, &points)
        })
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        #[test]
        fn prop_cursor_resolution_matches_naive(a in arb_lap("A"), b in arb_lap("B")) {
            let fast = resolve(&a, &b);
            prop_assert_eq!(fast.len(), a.len());
            prop_assert_eq!(fast, resolve_naive(&a, &b));
        }
    }
}
