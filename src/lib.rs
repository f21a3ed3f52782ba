//! # Folio
//!
//! A page-native layout engine for penetration-test reports.
//!
//! Most report generators lay content out on an endless strip and slice it
//! into pages afterwards, which splits cards and tables across page breaks.
//! Folio does the opposite: **the page is the unit of layout.** Every element
//! is measured first, then placed on the current page if it fits or moved
//! whole to the next one.
//!
//! ## Architecture
//!
//! ```text
//! Input (two JSON records)
//!       ↓
//!   [model]  Typed, validated report records
//!       ↓
//!   [report]  Section state machine: which elements, in which order
//!       ↓
//!   [layout]  Canvas, page breaks, element builders
//!       ↓         (measure with [text], colours from [style])
//!   [draw]  Primitive commands on a Surface
//!       ↓
//!   [pdf]  Serialize to PDF bytes
//! ```

pub mod draw;
pub mod error;
pub mod font;
pub mod layout;
pub mod model;
pub mod pdf;
pub mod report;
pub mod style;
pub mod text;

pub use error::FolioError;
pub use model::ReportInput;
pub use report::{RenderedReport, ReportOptions};

/// Render a validated report to PDF.
///
/// This is the primary entry point.
pub fn render(input: &ReportInput, options: &ReportOptions) -> Result<RenderedReport, FolioError> {
    report::render(input, options)
}

/// Parse and validate the target metadata and narrative results documents,
/// then render them. Nothing is rendered if either document is invalid.
pub fn render_json(
    target_json: &str,
    narrative_json: &str,
    options: &ReportOptions,
) -> Result<RenderedReport, FolioError> {
    let input = ReportInput::from_json(target_json, narrative_json)?;
    render(&input, options)
}
