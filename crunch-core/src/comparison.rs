//! Two-driver comparison
//!
//! [`Comparison`] is the validated entry point to the engine. It checks both
//! laps once, resolves the faster driver once, and then hands out the derived
//! series and layouts.

use serde::Serialize;

use crate::action::ActionState;
use crate::error::InvalidInputError;
use crate::layout::{corner_analysis, track_map, CornerAnalysisLayout, OverlayMode, TrackMapLayout};
use crate::resolver::{resolve, AttributionCounts, FasterDriverSample};
use crate::scale::Canvas;
use crate::segments::{extract_per_driver, DriverSegments};
use crate::telemetry::DriverTelemetry;
use crate::window::{action_series, speed_series, DistanceWindow, SpeedPoint};

/// A resolved comparison between a reference lap and another lap
#[derive(Debug, Clone)]
pub struct Comparison<'a> {
    reference: &'a DriverTelemetry,
    other: &'a DriverTelemetry,
    resolved: Vec<FasterDriverSample<'a>>,
}

impl<'a> Comparison<'a> {
    /// Validate both laps and resolve the faster driver along `reference`
    pub fn new(
        reference: &'a DriverTelemetry,
        other: &'a DriverTelemetry,
    ) -> Result<Self, InvalidInputError> {
        reference.validate()?;
        other.validate()?;
        if reference.driver_code == other.driver_code {
            return Err(InvalidInputError::DuplicateDriverCode(
                reference.driver_code.clone(),
            ));
        }

        let resolved = resolve(reference, other);
        Ok(Comparison {
            reference,
            other,
            resolved,
        })
    }

    pub fn drivers(&self) -> [&'a DriverTelemetry; 2] {
        [self.reference, self.other]
    }

    /// Per reference sample, who is faster
    pub fn fastest(&self) -> &[FasterDriverSample<'a>] {
        &self.resolved
    }

    pub fn attribution(&self) -> AttributionCounts {
        AttributionCounts::count(
            &self.resolved,
            &self.reference.driver_code,
            &self.other.driver_code,
        )
    }

    /// "Faster" segments for each driver, reference first
    pub fn segments(&self) -> Vec<DriverSegments<'a>> {
        extract_per_driver(&self.resolved, self.drivers())
    }

    pub fn speed_series(&self, window: Option<&DistanceWindow>) -> [Vec<SpeedPoint>; 2] {
        self.drivers().map(|driver| speed_series(driver, window))
    }

    pub fn action_series(&self, window: Option<&DistanceWindow>) -> [Vec<ActionState>; 2] {
        self.drivers().map(|driver| action_series(driver, window))
    }

    pub fn track_map(&self, canvas: &Canvas, mode: OverlayMode) -> TrackMapLayout {
        track_map(self.reference, self.other, &self.resolved, canvas, mode)
    }

    pub fn corner_analysis(&self, canvas: &Canvas, window: &DistanceWindow) -> CornerAnalysisLayout {
        corner_analysis(self.drivers(), window, canvas)
    }

    /// Bundle every derived series into one serializable report
    pub fn report(
        &self,
        window: Option<DistanceWindow>,
    ) -> Result<ComparisonReport<'a>, InvalidInputError> {
        if let Some(window) = &window {
            window.validate()?;
        }

        let counts = self.attribution();
        let total = counts.total().max(1) as f64;
        let shares = [counts.reference as f64 / total, counts.other as f64 / total];

        let [speeds_reference, speeds_other] = self.speed_series(window.as_ref());
        let [actions_reference, actions_other] = self.action_series(window.as_ref());
        let drivers = self
            .drivers()
            .into_iter()
            .zip([speeds_reference, speeds_other])
            .zip([actions_reference, actions_other])
            .zip(shares)
            .map(|(((driver, speed), actions), faster_share)| DriverReport {
                driver_code: &driver.driver_code,
                driver_color: &driver.driver_color,
                sample_count: driver.len(),
                faster_share,
                speed,
                actions,
            })
            .collect();

        log::debug!(
            "Report {} vs {}: {:?}",
            self.reference.driver_code,
            self.other.driver_code,
            counts
        );

        Ok(ComparisonReport {
            window,
            attribution: counts,
            drivers,
            fastest: self.resolved.clone(),
            segments: self.segments(),
        })
    }
}

/// Per-driver part of a [`ComparisonReport`]
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DriverReport<'a> {
    pub driver_code: &'a str,
    pub driver_color: &'a str,
    pub sample_count: usize,
    /// Share of reference samples where this driver is faster
    pub faster_share: f64,
    pub speed: Vec<SpeedPoint>,
    pub actions: Vec<ActionState>,
}

/// Everything the engine derives from a pair of laps
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonReport<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub window: Option<DistanceWindow>,
    pub attribution: AttributionCounts,
    pub drivers: Vec<DriverReport<'a>>,
    pub fastest: Vec<FasterDriverSample<'a>>,
    pub segments: Vec<DriverSegments<'a>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::telemetry::tests::driver;

    #[test]
    fn test_rejects_unsorted_other() {
        let a = driver("NOR", &[(0.0, 100.0), (10.0, 100.0)]);
        let b = driver("RIC", &[(0.0, 100.0), (10.0, 100.0), (5.0, 100.0)]);
        let err = Comparison::new(&a, &b).unwrap_err();
        assert_eq!(err.kind(), "unsorted-sequence");
    }

    #[test]
    fn test_rejects_empty_reference() {
        let a = driver("NOR", &[]);
        let b = driver("RIC", &[(0.0, 100.0)]);
        assert!(matches!(
            Comparison::new(&a, &b),
            Err(InvalidInputError::EmptyReferenceSeries { .. })
        ));
    }

    #[test]
    fn test_rejects_same_driver_twice() {
        let a = driver("NOR", &[(0.0, 100.0)]);
        assert_eq!(
            Comparison::new(&a, &a).unwrap_err(),
            InvalidInputError::DuplicateDriverCode("NOR".to_string())
        );
    }

    #[test]
    fn test_track_map_overlays_follow_fastest() {
        let a = driver("NOR", &[(0.0, 200.0), (10.0, 210.0), (20.0, 230.0), (30.0, 100.0)]);
        let b = driver("RIC", &[(0.0, 190.0), (12.0, 220.0), (22.0, 220.0)]);
        let comparison = Comparison::new(&a, &b).unwrap();

        let layout = comparison.track_map(&Canvas::default(), OverlayMode::Fastest);
        let drawn: usize = layout.overlays.iter().flat_map(|o| &o.segments).map(Vec::len).sum();
        let attributed = comparison
            .fastest()
            .iter()
            .filter(|s| s.driver_code.is_some())
            .count();
        assert_eq!(drawn, attributed);
        assert_eq!(layout.overlays[1].segments.len(), 1);
        assert_eq!(layout.overlays[1].segments[0].len(), 2);
    }

    #[test]
    fn test_report() {
        let a = driver("NOR", &[(0.0, 200.0), (10.0, 210.0), (20.0, 230.0), (30.0, 100.0)]);
        let b = driver("RIC", &[(0.0, 190.0), (12.0, 220.0), (22.0, 220.0)]);
        let comparison = Comparison::new(&a, &b).unwrap();

        let report = comparison.report(None).unwrap();
        assert_eq!(report.fastest.len(), 4);
        assert_eq!(report.attribution.other, 2);
        assert_eq!(report.attribution.reference, 1);
        assert_eq!(report.attribution.neither, 1);
        assert_eq!(report.drivers[0].driver_code, "NOR");
        assert_eq!(report.drivers[1].faster_share, 0.5);
        assert_eq!(report.drivers[0].speed.len(), 4);
        assert_eq!(report.segments[0].segments.len(), 1);

        let json = serde_json::to_value(&report).unwrap();
        assert!(json.get("window").is_none());
        assert_eq!(json["drivers"][1]["driverCode"], "RIC");
        assert_eq!(json["fastest"][0]["attributedDriverCode"], "RIC");
    }

    #[test]
    fn test_report_with_window() {
        let a = driver("NOR", &[(0.0, 200.0), (10.0, 210.0), (20.0, 230.0), (30.0, 100.0)]);
        let b = driver("RIC", &[(0.0, 190.0), (12.0, 220.0), (22.0, 220.0)]);
        let comparison = Comparison::new(&a, &b).unwrap();

        let report = comparison
            .report(Some(DistanceWindow { from: 10.0, to: 15.0 }))
            .unwrap();
        assert_eq!(report.drivers[0].speed.len(), 2);
        assert_eq!(report.drivers[0].actions[0], ActionState::None);
        assert_eq!(report.drivers[0].actions.len(), 4);

        assert!(comparison
            .report(Some(DistanceWindow { from: 20.0, to: 15.0 }))
            .is_err());
    }
}
