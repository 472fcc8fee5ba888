//! Coordinate Scaling
//!
//! Linear scales that map telemetry values (track X/Y, distance, speed) onto
//! a drawing canvas. Extents are taken from the data; the output range is the
//! canvas size minus a margin on each side.
//!
//! Screen rows grow downwards while track Y and speed grow upwards, so the
//! vertical scales run from `height - margin` down to `margin`.

use serde::{Deserialize, Serialize};

/// Closed value range `[min, max]` of a field across a data set
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Extent {
    pub min: f64,
    pub max: f64,
}

impl Extent {
    pub fn new(min: f64, max: f64) -> Self {
        Extent { min, max }
    }

    /// Extent of the finite values, `None` when there are none
    pub fn of<I>(values: I) -> Option<Extent>
    where
        I: IntoIterator<Item = f64>,
    {
        values
            .into_iter()
            .filter(|v| v.is_finite())
            .fold(None, |extent, v| match extent {
                None => Some(Extent::new(v, v)),
                Some(e) => Some(Extent::new(e.min.min(v), e.max.max(v))),
            })
    }

    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    /// True when the extent cannot be divided by (single point or broken)
    pub fn is_degenerate(&self) -> bool {
        let span = self.span();
        !span.is_finite() || span == 0.0
    }
}

/// Drawing surface size and the margins kept free on each side
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Canvas {
    pub width: f64,
    pub height: f64,
    pub margin_x: f64,
    pub margin_y: f64,
}

impl Default for Canvas {
    fn default() -> Self {
        Canvas {
            width: 540.0,
            height: 500.0,
            margin_x: 14.0,
            margin_y: 14.0,
        }
    }
}

impl Canvas {
    pub fn new(width: f64, height: f64) -> Self {
        Canvas {
            width,
            height,
            ..Default::default()
        }
    }

    pub fn with_margins(mut self, margin_x: f64, margin_y: f64) -> Self {
        self.margin_x = margin_x;
        self.margin_y = margin_y;
        self
    }

    /// Horizontal output range, left to right
    pub fn x_range(&self) -> (f64, f64) {
        (self.margin_x, self.width - self.margin_x)
    }

    /// Vertical output range, bottom row first
    pub fn y_range(&self) -> (f64, f64) {
        (self.height - self.margin_y, self.margin_y)
    }
}

/// Linear map from a data extent to an output range
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    domain: Extent,
    range: (f64, f64),
}

impl LinearScale {
    pub fn new(domain: Extent, range: (f64, f64)) -> Self {
        LinearScale { domain, range }
    }

    /// X-like scale: `[min, max]` onto `[margin, width - margin]`
    pub fn horizontal(domain: Option<Extent>, canvas: &Canvas) -> Self {
        LinearScale::new(domain.unwrap_or(Extent::new(0.0, 0.0)), canvas.x_range())
    }

    /// Y-like scale: `[min, max]` onto `[height - margin, margin]`
    pub fn vertical(domain: Option<Extent>, canvas: &Canvas) -> Self {
        LinearScale::new(domain.unwrap_or(Extent::new(0.0, 0.0)), canvas.y_range())
    }

    pub fn domain(&self) -> Extent {
        self.domain
    }

    pub fn range(&self) -> (f64, f64) {
        self.range
    }

    /// Map a value. A degenerate domain maps everything to the range midpoint.
    pub fn apply(&self, value: f64) -> f64 {
        let (start, end) = self.range;
        if self.domain.is_degenerate() {
            return (start + end) / 2.0;
        }
        let t = (value - self.domain.min) / self.domain.span();
        start + t * (end - start)
    }
}

/// A pair of scales sharing one coordinate frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotFrame {
    pub x: LinearScale,
    pub y: LinearScale,
}

impl PlotFrame {
    pub fn new(x_extent: Option<Extent>, y_extent: Option<Extent>, canvas: &Canvas) -> Self {
        PlotFrame {
            x: LinearScale::horizontal(x_extent, canvas),
            y: LinearScale::vertical(y_extent, canvas),
        }
    }

    pub fn project(&self, x: f64, y: f64) -> Point {
        Point {
            x: self.x.apply(x),
            y: self.y.apply(y),
        }
    }
}

/// A point in canvas coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}
