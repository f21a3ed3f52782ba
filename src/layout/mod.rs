//! # Page-Aware Layout
//!
//! The page is the unit of layout. Nothing is laid out on an endless strip
//! and sliced afterwards. The [`Canvas`] owns the current page and a draw
//! cursor; every element asks "does this fit?" before it paints, and moves
//! to a fresh page first when it does not.
//!
//! 1. Open a page with known dimensions and margins.
//! 2. Measure the next atomic element (card, code block, table row, line).
//! 3. If it fits, paint it and move the cursor down by its height.
//! 4. If it doesn't, start a new page (header and footer are painted by the
//!    canvas) and place it there.
//!
//! The canvas is passed explicitly into every builder. Builders state in their
//! signatures what they read and mutate; there is no ambient cursor.

pub mod elements;
pub mod page_break;

use serde::Serialize;

use crate::draw::{DrawCommand, Rect, Surface};
use crate::error::FolioError;
use crate::font::Font;
use crate::model::Metadata;
use crate::style::{palette, size, Color};
use crate::text::{self, TextRun};

/// Tolerance for float comparisons on the vertical axis, in mm.
pub(crate) const EPSILON: f64 = 1e-6;

/// Values for each edge (top, right, bottom, left), in mm.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Edges {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

/// The draw cursor: where the next primitive is painted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Cursor {
    pub x: f64,
    pub y: f64,
}

/// Page geometry plus the current page number and cursor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PageMetrics {
    pub width: f64,
    pub height: f64,
    pub margin: Edges,
    /// Height of the running header band below the top margin.
    pub header_height: f64,
    /// 1-based. Zero until the first page is opened.
    pub page_number: usize,
    pub cursor: Cursor,
}

impl PageMetrics {
    /// A4 portrait with the report's margins.
    pub fn a4() -> Self {
        let margin = Edges {
            top: 8.0,
            right: 18.0,
            bottom: 20.0,
            left: 18.0,
        };
        Self {
            width: 210.0,
            height: 297.0,
            margin,
            header_height: 10.0,
            page_number: 0,
            cursor: Cursor {
                x: margin.left,
                y: margin.top,
            },
        }
    }

    /// First y available to body content on a regular page.
    pub fn content_top(&self) -> f64 {
        self.margin.top + self.header_height
    }

    /// Lowest y any placement may reach.
    pub fn content_bottom(&self) -> f64 {
        self.height - self.margin.bottom
    }

    pub fn content_width(&self) -> f64 {
        self.width - self.margin.left - self.margin.right
    }

    /// Usable height of a fresh page.
    pub fn content_height(&self) -> f64 {
        self.content_bottom() - self.content_top()
    }

    pub fn remaining_height(&self) -> f64 {
        self.height - self.margin.bottom - self.cursor.y
    }
}

/// The fixed page furniture: a branding bar on every page but the cover, and
/// a footer on every page.
#[derive(Debug, Clone)]
pub struct PageChrome {
    pub header_text: String,
    pub footer_text: String,
}

impl PageChrome {
    /// The running header band. Not painted on the cover.
    pub fn header(&self, metrics: &PageMetrics) -> Vec<DrawCommand> {
        let band = Rect::new(0.0, 0.0, metrics.width, metrics.header_height);
        vec![
            DrawCommand::fill(band, palette::DARK),
            DrawCommand::Text {
                x: metrics.margin.left / 3.0,
                y: 1.5,
                height: 6.0,
                run: TextRun::new(self.header_text.clone(), Font::sans_bold(size::HEADER)),
                color: palette::WHITE,
            },
        ]
    }

    /// The footer, centred horizontally inside the bottom margin.
    pub fn footer<S: Surface>(
        &self,
        metrics: &PageMetrics,
        surface: &S,
    ) -> Result<Vec<DrawCommand>, FolioError> {
        let font = Font::sans(size::FOOTER);
        let width = surface.text_width(&self.footer_text, &font)?;
        let x = metrics.margin.left + (metrics.content_width() - width) / 2.0;
        Ok(vec![DrawCommand::Text {
            x,
            y: metrics.height - 14.0,
            height: 5.0,
            run: TextRun::new(self.footer_text.clone(), font),
            color: palette::MUTED,
        }])
    }
}

/// What kind of element a placement belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ElementKind {
    CoverBanner,
    SeverityTile,
    Heading,
    TextLine,
    KeyValueRow,
    TableHeader,
    TableRow,
    Badge,
    ScoreBar,
    CodeBlock,
    Card,
    Divider,
}

impl ElementKind {
    /// Elements whose painted extent must stay on one page.
    pub fn is_atomic(&self) -> bool {
        !matches!(self, ElementKind::CoverBanner)
    }
}

/// One placed element in the cursor trace.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Placement {
    pub kind: ElementKind,
    pub page: usize,
    pub y: f64,
    pub height: f64,
}

impl Placement {
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }
}

/// The mutable page/cursor state of one document build.
///
/// A canvas is owned by exactly one build; concurrent builds each create
/// their own.
pub struct Canvas<S: Surface> {
    surface: S,
    metrics: PageMetrics,
    chrome: PageChrome,
    trace: Vec<Placement>,
}

impl<S: Surface> Canvas<S> {
    pub fn new(surface: S, metrics: PageMetrics, chrome: PageChrome) -> Self {
        Self {
            surface,
            metrics,
            chrome,
            trace: Vec::new(),
        }
    }

    /// Open the first page. It gets the footer but no running header; the
    /// cover layout owns the top of page one.
    pub fn begin_document(&mut self) -> Result<(), FolioError> {
        self.open_page()?;
        Ok(())
    }

    /// Start a new page: reset the cursor below the header band and paint the
    /// page furniture.
    pub fn advance_page(&mut self) -> Result<(), FolioError> {
        self.open_page()?;
        for command in self.chrome.header(&self.metrics) {
            self.surface.draw(command)?;
        }
        log::debug!("advanced to page {}", self.metrics.page_number);
        Ok(())
    }

    fn open_page(&mut self) -> Result<(), FolioError> {
        self.surface
            .begin_page(self.metrics.width, self.metrics.height)?;
        self.metrics.page_number += 1;
        self.metrics.cursor = Cursor {
            x: self.metrics.margin.left,
            y: self.metrics.content_top(),
        };
        for command in self.chrome.footer(&self.metrics, &self.surface)? {
            self.surface.draw(command)?;
        }
        Ok(())
    }

    pub fn metrics(&self) -> &PageMetrics {
        &self.metrics
    }

    pub fn page_number(&self) -> usize {
        self.metrics.page_number
    }

    pub fn x(&self) -> f64 {
        self.metrics.cursor.x
    }

    pub fn y(&self) -> f64 {
        self.metrics.cursor.y
    }

    pub fn left(&self) -> f64 {
        self.metrics.margin.left
    }

    pub fn content_width(&self) -> f64 {
        self.metrics.content_width()
    }

    pub fn remaining_height(&self) -> f64 {
        self.metrics.remaining_height()
    }

    /// True when nothing has been placed below the header on this page.
    pub fn at_page_top(&self) -> bool {
        self.metrics.cursor.y <= self.metrics.content_top() + EPSILON
    }

    /// Paint without moving the cursor.
    pub fn paint(&mut self, command: DrawCommand) -> Result<(), FolioError> {
        self.surface.draw(command)
    }

    /// Paint, then move the cursor down by `height_consumed` and back to the
    /// left margin.
    pub fn place(&mut self, command: DrawCommand, height_consumed: f64) -> Result<(), FolioError> {
        self.paint(command)?;
        self.advance(height_consumed);
        Ok(())
    }

    /// Move the cursor down and back to the left margin.
    pub fn advance(&mut self, dy: f64) {
        self.metrics.cursor.y += dy;
        self.metrics.cursor.x = self.metrics.margin.left;
    }

    /// Continue a row: move the cursor right without changing y.
    pub fn advance_x(&mut self, dx: f64) {
        self.metrics.cursor.x += dx;
    }

    /// Absolute positioning, used by the cover layout.
    pub fn move_to(&mut self, x: f64, y: f64) {
        self.metrics.cursor = Cursor { x, y };
    }

    /// Record an element that occupies `[y, y + height)` on the current page.
    pub fn record(&mut self, kind: ElementKind, y: f64, height: f64) {
        self.trace.push(Placement {
            kind,
            page: self.metrics.page_number,
            y,
            height,
        });
    }

    pub fn trace(&self) -> &[Placement] {
        &self.trace
    }

    pub fn text_width(&self, text: &str, font: &Font) -> Result<f64, FolioError> {
        self.surface.text_width(text, font)
    }

    /// The shared wrap routine, measured with this canvas's surface.
    pub fn wrap(&self, text: &str, font: &Font, max_width: f64) -> Result<Vec<String>, FolioError> {
        text::wrap_lines(&self.surface, text, font, max_width)
    }

    /// Dry-run line count for `text` at `max_width`.
    pub fn measure(&self, text: &str, font: &Font, max_width: f64) -> Result<usize, FolioError> {
        text::measure(&self.surface, text, font, max_width)
    }

    pub fn fit_line(&self, text: &str, font: &Font, max_width: f64) -> Result<String, FolioError> {
        text::fit_line(&self.surface, text, font, max_width)
    }

    /// Paint one line of text in a box at (x, y).
    pub fn text(
        &mut self,
        x: f64,
        y: f64,
        height: f64,
        run: TextRun,
        color: Color,
    ) -> Result<(), FolioError> {
        self.paint(DrawCommand::Text {
            x,
            y,
            height,
            run,
            color,
        })
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Serialize the document. Returns the bytes, the page count and the
    /// surface for inspection.
    pub fn finish(mut self, metadata: &Metadata) -> Result<FinishedCanvas<S>, FolioError> {
        let bytes = self.surface.finish(metadata)?;
        Ok(FinishedCanvas {
            page_count: self.surface.page_count(),
            bytes,
            trace: self.trace,
            surface: self.surface,
        })
    }
}

/// The output of a completed canvas.
pub struct FinishedCanvas<S> {
    pub bytes: Vec<u8>,
    pub page_count: usize,
    pub trace: Vec<Placement>,
    pub surface: S,
}
