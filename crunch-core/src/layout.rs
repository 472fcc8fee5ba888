//! Plot Layouts
//!
//! Turns a two-driver comparison into polylines in canvas coordinates, ready
//! for a renderer. Two layouts exist:
//!
//! - **Track map**: the racing line, optionally overlaid with one line per
//!   stretch where a driver is faster.
//! - **Corner analysis**: speed against distance inside a window, with bands
//!   showing whether each driver is braking, at full throttle or cornering.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::action::ActionState;
use crate::resolver::FasterDriverSample;
use crate::scale::{Canvas, Extent, LinearScale, PlotFrame, Point};
use crate::segments::extract_per_driver;
use crate::telemetry::DriverTelemetry;
use crate::window::{action_band_offset, window_trace, DistanceWindow, WindowRow};

/// What is drawn on top of the track map
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OverlayMode {
    /// Racing line only
    #[default]
    None,
    /// Color the racing line by the faster driver
    Fastest,
}

impl FromStr for OverlayMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "none" => Ok(OverlayMode::None),
            "fastest" => Ok(OverlayMode::Fastest),
            other => Err(format!("Unknown overlay mode '{}', expected none or fastest", other)),
        }
    }
}

impl fmt::Display for OverlayMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OverlayMode::None => write!(f, "none"),
            OverlayMode::Fastest => write!(f, "fastest"),
        }
    }
}

/// The polylines drawn for one driver on the track map
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OverlayLine {
    pub driver_code: String,
    pub driver_color: String,
    pub segments: Vec<Vec<Point>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackMapLayout {
    pub canvas: Canvas,
    pub mode: OverlayMode,
    /// The reference driver's racing line
    pub track: Vec<Point>,
    pub overlays: Vec<OverlayLine>,
}

/// Lay out the track map
///
/// `resolved` is the faster-driver series of `reference` against `other`.
/// Both drivers' positions contribute to the frame extent, so every segment
/// shares one coordinate system with the racing line.
pub fn track_map(
    reference: &DriverTelemetry,
    other: &DriverTelemetry,
    resolved: &[FasterDriverSample],
    canvas: &Canvas,
    mode: OverlayMode,
) -> TrackMapLayout {
    let all_samples = || reference.data.iter().chain(other.data.iter());
    let frame = PlotFrame::new(
        Extent::of(all_samples().map(|s| s.x)),
        Extent::of(all_samples().map(|s| s.y)),
        canvas,
    );

    let track = reference
        .data
        .iter()
        .map(|s| frame.project(s.x, s.y))
        .collect();

    let overlays = match mode {
        OverlayMode::None => Vec::new(),
        OverlayMode::Fastest => {
            extract_per_driver(resolved, [reference, other])
                .into_iter()
                .map(|driver| OverlayLine {
                    driver_code: driver.driver_code.to_string(),
                    driver_color: driver.driver_color.to_string(),
                    segments: driver
                        .segments
                        .iter()
                        .map(|segment| segment.iter().map(|s| frame.project(s.x, s.y)).collect())
                        .collect(),
                })
                .collect()
        }
    };

    TrackMapLayout {
        canvas: *canvas,
        mode,
        track,
        overlays,
    }
}

/// A contiguous run of one action, drawn at the driver's band offset
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionBand {
    pub action: ActionState,
    pub color: String,
    pub points: Vec<Point>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DriverCornerTrace {
    pub driver_code: String,
    pub driver_color: String,
    pub speed_line: Vec<Point>,
    pub action_bands: Vec<ActionBand>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CornerAnalysisLayout {
    pub canvas: Canvas,
    pub window: DistanceWindow,
    /// Vertical domain: windowed speeds plus the band baselines
    pub speed_extent: Option<Extent>,
    pub drivers: Vec<DriverCornerTrace>,
}

/// Lay out the corner analysis chart for `window`
pub fn corner_analysis(
    drivers: [&DriverTelemetry; 2],
    window: &DistanceWindow,
    canvas: &Canvas,
) -> CornerAnalysisLayout {
    let traces: Vec<Vec<WindowRow>> = drivers.iter().map(|d| window_trace(d, window)).collect();

    let speed_extent = Extent::of(
        traces
            .iter()
            .flatten()
            .map(|row| row.speed)
            .chain((0..drivers.len()).map(action_band_offset)),
    );
    let x = LinearScale::horizontal(Some(Extent::new(0.0, window.length())), canvas);
    let y = LinearScale::vertical(speed_extent, canvas);
    let frame = PlotFrame { x, y };

    let drivers = drivers
        .iter()
        .zip(traces.iter())
        .enumerate()
        .map(|(index, (driver, rows))| DriverCornerTrace {
            driver_code: driver.driver_code.clone(),
            driver_color: driver.driver_color.clone(),
            speed_line: rows
                .iter()
                .map(|row| frame.project(row.distance, row.speed))
                .collect(),
            action_bands: action_bands(rows, action_band_offset(index), &frame),
        })
        .collect();

    CornerAnalysisLayout {
        canvas: *canvas,
        window: *window,
        speed_extent,
        drivers,
    }
}

/// Group consecutive rows with the same action into bands
fn action_bands(rows: &[WindowRow], offset: f64, frame: &PlotFrame) -> Vec<ActionBand> {
    let mut bands: Vec<ActionBand> = Vec::new();
    for row in rows {
        let Some(color) = row.action.color() else {
            continue;
        };
        let point = frame.project(row.distance, offset);
        match bands.last_mut() {
            Some(band) if band.action == row.action => band.points.push(point),
            _ => bands.push(ActionBand {
                action: row.action,
                color: color.to_string(),
                points: vec![point],
            }),
        }
    }
    bands
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::resolve;
    use crate::telemetry::tests::driver;

    fn canvas() -> Canvas {
        Canvas::new(100.0, 100.0).with_margins(0.0, 0.0)
    }

    #[test]
    fn test_overlay_mode_parse() {
        assert_eq!("fastest".parse::<OverlayMode>(), Ok(OverlayMode::Fastest));
        assert_eq!("None".parse::<OverlayMode>(), Ok(OverlayMode::None));
        assert!("slowest".parse::<OverlayMode>().is_err());
        assert_eq!(OverlayMode::Fastest.to_string(), "fastest");
    }

    #[test]
    fn test_track_map_without_overlay() {
        let a = driver("A", &[(0.0, 100.0), (50.0, 110.0), (100.0, 120.0)]);
        let b = driver("B", &[(0.0, 90.0), (100.0, 90.0)]);

        let layout = track_map(&a, &b, &resolve(&a, &b), &canvas(), OverlayMode::None);
        assert_eq!(layout.track.len(), 3);
        assert!(layout.overlays.is_empty());
        assert_eq!(layout.track[0].x, 0.0);
        assert_eq!(layout.track[2].x, 100.0);
        // All samples share Y = 0, so the vertical scale is degenerate
        assert!(layout.track.iter().all(|p| p.y == 50.0));
    }

    #[test]
    fn test_track_map_fastest_overlay() {
        let a = driver("A", &[(0.0, 100.0), (25.0, 200.0), (50.0, 100.0), (75.0, 200.0), (100.0, 100.0)]);
        let b = driver("B", &[(0.0, 150.0), (25.0, 150.0), (50.0, 150.0), (75.0, 150.0), (100.0, 150.0)]);

        let layout = track_map(&a, &b, &resolve(&a, &b), &canvas(), OverlayMode::Fastest);
        assert_eq!(layout.overlays.len(), 2);
        let a_line = &layout.overlays[0];
        let b_line = &layout.overlays[1];
        assert_eq!(a_line.driver_code, "A");
        assert_eq!(a_line.segments.len(), 2);
        assert_eq!(b_line.segments.len(), 3);
        assert_eq!(b_line.segments[0], vec![Point { x: 25.0, y: 50.0 }]);
    }

    #[test]
    fn test_corner_analysis_layout() {
        let mut a = driver("A", &[(0.0, 300.0), (100.0, 200.0), (200.0, 100.0), (300.0, 250.0)]);
        a.data[1].brake = true;
        a.data[2].brake = true;
        let b = driver("B", &[(0.0, 290.0), (150.0, 150.0), (250.0, 240.0)]);
        let window = DistanceWindow::new(100.0, 200.0).unwrap();

        let layout = corner_analysis([&a, &b], &window, &canvas());
        assert_eq!(layout.speed_extent, Some(Extent::new(0.0, 250.0)));

        let a_trace = &layout.drivers[0];
        assert_eq!(a_trace.speed_line.len(), 3);
        assert_eq!(a_trace.speed_line[0].x, 0.0);
        assert_eq!(a_trace.speed_line[1].x, 100.0);
        assert_eq!(a_trace.action_bands.len(), 2);
        assert_eq!(a_trace.action_bands[0].action, ActionState::Braking);
        assert_eq!(a_trace.action_bands[0].points.len(), 2);
        assert_eq!(a_trace.action_bands[1].action, ActionState::Cornering);

        let b_trace = &layout.drivers[1];
        assert_eq!(b_trace.speed_line.len(), 2);
        // Second driver's bands sit on the 40 km/h baseline
        let expected_y = 100.0 - 40.0 / 250.0 * 100.0;
        assert!((b_trace.action_bands[0].points[0].y - expected_y).abs() < 1e-9);
    }

    #[test]
    fn test_track_map_draws_given_resolution() {
        let a = driver("A", &[(0.0, 100.0), (50.0, 200.0), (100.0, 100.0)]);
        let b = driver("B", &[(0.0, 150.0), (50.0, 150.0), (100.0, 150.0)]);
        // Everything attributed to B, unlike what resolving these laps gives
        let resolved: Vec<FasterDriverSample> = a
            .data
            .iter()
            .map(|s| FasterDriverSample {
                x: s.x,
                y: s.y,
                distance: s.distance,
                driver_code: Some("B"),
            })
            .collect();

        let layout = track_map(&a, &b, &resolved, &canvas(), OverlayMode::Fastest);
        assert!(layout.overlays[0].segments.is_empty());
        assert_eq!(layout.overlays[1].segments.len(), 1);
        assert_eq!(layout.overlays[1].segments[0].len(), 3);
    }
}
