//! # Drawing Primitives
//!
//! The boundary between layout and output. Layout decides *where* things go
//! and hands the surface a flat list of primitives per page: filled or
//! stroked rectangles, lines, and single-line text runs. The surface knows
//! nothing about cursors, margins or page breaks.
//!
//! Coordinates are millimetres from the top-left corner of the page.

use serde::Serialize;

use crate::error::FolioError;
use crate::model::Metadata;
use crate::style::Color;
use crate::text::{Measure, TextRun};

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Stroke {
    pub color: Color,
    pub width: f64,
}

/// A single paint operation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum DrawCommand {
    Rect {
        rect: Rect,
        fill: Option<Color>,
        stroke: Option<Stroke>,
    },
    Line {
        from: (f64, f64),
        to: (f64, f64),
        stroke: Stroke,
    },
    /// One line of text set in a box of `height` whose top is at `y`. The
    /// text is vertically centred in the box.
    Text {
        x: f64,
        y: f64,
        height: f64,
        run: TextRun,
        color: Color,
    },
}

impl DrawCommand {
    pub fn fill(rect: Rect, color: Color) -> Self {
        DrawCommand::Rect {
            rect,
            fill: Some(color),
            stroke: None,
        }
    }

    pub fn framed(rect: Rect, fill: Color, stroke: Stroke) -> Self {
        DrawCommand::Rect {
            rect,
            fill: Some(fill),
            stroke: Some(stroke),
        }
    }
}

/// The drawing primitive provider.
///
/// Measures text and paints primitives onto the current page. Every call may
/// fail (e.g. a font that cannot be resolved); failures abort the build.
pub trait Surface: Measure {
    /// Open a new page of the given size (mm). Subsequent draws go there.
    fn begin_page(&mut self, width: f64, height: f64) -> Result<(), FolioError>;

    /// Paint one primitive on the current page.
    fn draw(&mut self, command: DrawCommand) -> Result<(), FolioError>;

    /// Number of pages opened so far.
    fn page_count(&self) -> usize;

    /// Serialize everything painted into the finished document.
    fn finish(&mut self, metadata: &Metadata) -> Result<Vec<u8>, FolioError>;
}
