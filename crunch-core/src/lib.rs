//! # Crunch Core
//!
//! Platform-independent telemetry comparison engine for Formula Crunch.
//!
//! Given two drivers' laps (position, speed, brake and throttle samples
//! indexed by distance), the engine works out where on track each driver is
//! faster, what each driver is doing, and how to draw it.
//!
//! This crate holds pure logic with **no I/O dependencies**. Loading files,
//! rendering SVG and serving HTTP live in `crunch-server`.
//!
//! ```text
//! DriverTelemetry ──┬─► lookup (nearest following sample)
//!                   └─► action (braking / full throttle / cornering)
//!                              │
//!                              ▼
//!                   resolver (who is faster, per reference sample)
//!                              │
//!                              ▼
//!                   segments (maximal runs per driver)
//!                              │
//!                              ▼
//!                   scale + layout (canvas coordinates)
//! ```
//!
//! ## Key Modules
//!
//! - [`telemetry`] - Samples, laps and their ordering invariant
//! - [`lookup`] - Nearest-following-sample lookup, plain scan and cursor
//! - [`action`] - Per-sample action classification
//! - [`resolver`] - Faster-driver attribution
//! - [`segments`] - Run extraction for drawing
//! - [`scale`] - Linear scales onto a canvas
//! - [`window`] - Distance windows for corner analysis
//! - [`layout`] - Track map and corner analysis layouts
//! - [`comparison`] - Validated entry point
//!
//! ## Example
//!
//! ```rust
//! use crunch_core::{Canvas, Comparison, DriverTelemetry, OverlayMode, TelemetrySample};
//!
//! let sample = |distance: f64, speed: f64| TelemetrySample {
//!     x: distance,
//!     y: 0.0,
//!     speed,
//!     distance,
//!     brake: false,
//!     throttle: 100.0,
//! };
//! let nor = DriverTelemetry::new("NOR", "#1E88E5", vec![sample(0.0, 200.0), sample(10.0, 210.0)]);
//! let ric = DriverTelemetry::new("RIC", "#FFC107", vec![sample(0.0, 190.0), sample(12.0, 220.0)]);
//!
//! let comparison = Comparison::new(&nor, &ric).unwrap();
//! assert!(comparison.fastest().iter().all(|s| s.driver_code == Some("RIC")));
//!
//! let layout = comparison.track_map(&Canvas::default(), OverlayMode::Fastest);
//! assert_eq!(layout.overlays[1].segments.len(), 1);
//! ```

pub mod action;
pub mod comparison;
pub mod error;
pub mod layout;
pub mod lookup;
pub mod resolver;
pub mod scale;
pub mod segments;
pub mod telemetry;
pub mod window;

// Re-export commonly used types
pub use action::{classify, ActionState, FULL_THROTTLE_THRESHOLD};
pub use comparison::{Comparison, ComparisonReport, DriverReport};
pub use error::InvalidInputError;
pub use layout::{CornerAnalysisLayout, OverlayMode, TrackMapLayout};
pub use lookup::{find_at_distance, DistanceCursor};
pub use resolver::{resolve, AttributionCounts, FasterDriverSample};
pub use scale::{Canvas, Extent, LinearScale, PlotFrame, Point};
pub use segments::{extract, DriverSegments, Segment};
pub use telemetry::{DriverTelemetry, TelemetrySample};
pub use window::{DistanceWindow, SpeedPoint, WindowRow};
