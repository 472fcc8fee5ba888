//! SVG rendering
//!
//! Draws the layouts computed by `crunch-core` through a plotters
//! [`SVGBackend`]. Layout points are already in canvas coordinates, so they
//! are drawn straight onto the root drawing area without a chart frame.

use std::fs;
use std::path::{Path, PathBuf};

use crunch_core::{
    ActionState, Canvas, Comparison, CornerAnalysisLayout, DistanceWindow, OverlayMode, Point,
    TrackMapLayout,
};
use log::info;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use plotters::style::{FontDesc, FontFamily, FontStyle};
use thiserror::Error;

use crate::config::RenderSettings;

pub const TRACK_MAP_FILE: &str = "track-map.svg";
pub const CORNER_ANALYSIS_FILE: &str = "corner-analysis.svg";

const LEGEND_FONT_SIZE: f64 = 12.0;
const LEGEND_LINE_HEIGHT: i32 = 16;

type SvgArea<'a> = DrawingArea<SVGBackend<'a>, Shift>;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Invalid color {0:?}, expected #RGB or #RRGGBB")]
    Color(String),
    #[error("Drawing failed: {0}")]
    Drawing(String),
    #[error("Cannot write chart {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl<E: std::error::Error + Send + Sync> From<DrawingAreaErrorKind<E>> for RenderError {
    fn from(e: DrawingAreaErrorKind<E>) -> Self {
        RenderError::Drawing(e.to_string())
    }
}

/// Parse a `#RRGGBB` or `#RGB` color
pub fn parse_color(text: &str) -> Result<RGBColor, RenderError> {
    let invalid = || RenderError::Color(text.to_string());
    let hex = text.trim().strip_prefix('#').ok_or_else(invalid)?;
    if !hex.is_ascii() {
        return Err(invalid());
    }
    let channel = |digits: &str| u8::from_str_radix(digits, 16).map_err(|_| invalid());
    match hex.len() {
        6 => Ok(RGBColor(
            channel(&hex[0..2])?,
            channel(&hex[2..4])?,
            channel(&hex[4..6])?,
        )),
        3 => {
            let short = |i: usize| channel(&hex[i..i + 1]).map(|v| v * 17);
            Ok(RGBColor(short(0)?, short(1)?, short(2)?))
        }
        _ => Err(invalid()),
    }
}

fn canvas_size(canvas: &Canvas) -> (u32, u32) {
    (canvas.width.round() as u32, canvas.height.round() as u32)
}

fn pixel(point: &Point) -> (i32, i32) {
    (point.x.round() as i32, point.y.round() as i32)
}

fn stroke_width(width: f64) -> u32 {
    width.round().max(1.0) as u32
}

/// Draw a polyline. A single point becomes a dot as wide as the line.
fn stroke(area: &SvgArea, points: &[Point], color: &RGBColor, width: f64) -> Result<(), RenderError> {
    let width = stroke_width(width);
    match points {
        [] => {}
        [single] => area.draw(&Circle::new(pixel(single), (width / 2).max(1), color.filled()))?,
        _ => area.draw(&PathElement::new(
            points.iter().map(pixel).collect::<Vec<_>>(),
            color.stroke_width(width),
        ))?,
    }
    Ok(())
}

fn legend_entry(
    area: &SvgArea,
    settings: &RenderSettings,
    (x, y): (i32, i32),
    color: &RGBColor,
    label: &str,
    h_pos: HPos,
) -> Result<(), RenderError> {
    let style = FontDesc::new(
        FontFamily::Name(&settings.font_family),
        LEGEND_FONT_SIZE,
        FontStyle::Normal,
    )
    .color(color)
    .pos(Pos::new(h_pos, VPos::Top));
    area.draw(&Text::new(label.to_string(), (x, y), style))?;
    Ok(())
}

/// Render the track map: racing line plus faster-driver overlays
pub fn track_map_svg(layout: &TrackMapLayout, settings: &RenderSettings) -> Result<String, RenderError> {
    let background = parse_color(&settings.background)?;
    let track = parse_color(&settings.track_color)?;
    let overlays = layout
        .overlays
        .iter()
        .map(|overlay| Ok((overlay, parse_color(&overlay.driver_color)?)))
        .collect::<Result<Vec<_>, RenderError>>()?;

    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, canvas_size(&layout.canvas)).into_drawing_area();
        root.fill(&background)?;

        stroke(&root, &layout.track, &track, settings.track_width)?;
        for (overlay, color) in &overlays {
            for segment in &overlay.segments {
                stroke(&root, segment, color, settings.overlay_width)?;
            }
        }

        if layout.mode == OverlayMode::Fastest {
            let x = layout.canvas.margin_x.round() as i32;
            let top = layout.canvas.margin_y.round() as i32;
            for (row, (overlay, color)) in overlays.iter().enumerate() {
                let label = format!("{} faster", overlay.driver_code);
                let y = top + LEGEND_LINE_HEIGHT * row as i32;
                legend_entry(&root, settings, (x, y), color, &label, HPos::Left)?;
            }
        }

        root.present()?;
    }
    Ok(svg)
}

/// Render the corner analysis chart: speed traces with action bands below
pub fn corner_analysis_svg(
    layout: &CornerAnalysisLayout,
    settings: &RenderSettings,
) -> Result<String, RenderError> {
    let background = parse_color(&settings.background)?;
    let drivers = layout
        .drivers
        .iter()
        .map(|trace| Ok((trace, parse_color(&trace.driver_color)?)))
        .collect::<Result<Vec<_>, RenderError>>()?;

    let mut legend: Vec<(RGBColor, &str)> = drivers
        .iter()
        .map(|(trace, color)| (*color, trace.driver_code.as_str()))
        .collect();
    for action in [ActionState::Braking, ActionState::FullThrottle, ActionState::Cornering] {
        if let Some(color) = action.color() {
            legend.push((parse_color(color)?, action.label()));
        }
    }

    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, canvas_size(&layout.canvas)).into_drawing_area();
        root.fill(&background)?;

        for (trace, color) in &drivers {
            stroke(&root, &trace.speed_line, color, settings.speed_width)?;
            for band in &trace.action_bands {
                stroke(&root, &band.points, &parse_color(&band.color)?, settings.band_width)?;
            }
        }

        let x = (layout.canvas.width - layout.canvas.margin_x).round() as i32;
        let top = layout.canvas.margin_y.round() as i32;
        for (row, (color, label)) in legend.iter().enumerate() {
            let y = top + LEGEND_LINE_HEIGHT * row as i32;
            legend_entry(&root, settings, (x, y), color, label, HPos::Right)?;
        }

        root.present()?;
    }
    Ok(svg)
}

/// Write the track map, and the corner analysis when a window is given, into `out_dir`
///
/// Returns the paths written.
pub fn write_charts(
    comparison: &Comparison,
    settings: &RenderSettings,
    window: Option<&DistanceWindow>,
    out_dir: &Path,
) -> Result<Vec<PathBuf>, RenderError> {
    fs::create_dir_all(out_dir).map_err(|source| RenderError::Io {
        path: out_dir.to_owned(),
        source,
    })?;

    let mut written = Vec::with_capacity(2);
    let layout = comparison.track_map(&settings.track_map, settings.overlay);
    written.push(write_svg(out_dir.join(TRACK_MAP_FILE), &track_map_svg(&layout, settings)?)?);

    if let Some(window) = window {
        let layout = comparison.corner_analysis(&settings.corner_analysis, window);
        written.push(write_svg(
            out_dir.join(CORNER_ANALYSIS_FILE),
            &corner_analysis_svg(&layout, settings)?,
        )?);
    }
    Ok(written)
}

fn write_svg(path: PathBuf, svg: &str) -> Result<PathBuf, RenderError> {
    fs::write(&path, svg).map_err(|source| RenderError::Io {
        path: path.clone(),
        source,
    })?;
    info!("Wrote {}", path.display());
    Ok(path)
}
