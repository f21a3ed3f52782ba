//! # Report Assembly
//!
//! Walks the report's sections in a fixed order and drives the element
//! builders. This is the only layer that sees input records; everything
//! below it receives strings, numbers and styles.
//!
//! ```text
//! Cover → Overview → Policy → ResultSummary → FindingsDetail
//!       → Suggestions → RemediationCode → AntiPatterns → Done
//! ```
//!
//! Every section after the cover starts on a new page. `Done` serializes
//! the document.

mod sections;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::draw::Surface;
use crate::error::FolioError;
use crate::layout::{Canvas, PageChrome, PageMetrics, Placement};
use crate::model::{Metadata, ReportInput};
use crate::pdf::PdfSurface;

pub const BRAND: &str = "AutoRed.AI";
pub const ENGINE: &str = "AutoRed.AI v1.0";
pub const REPORT_TITLE: &str = "Penetration Test Report";

/// The sections of a report, in the order they are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Section {
    Cover,
    Overview,
    Policy,
    ResultSummary,
    FindingsDetail,
    Suggestions,
    RemediationCode,
    AntiPatterns,
    Done,
}

impl Section {
    pub fn next(self) -> Self {
        match self {
            Section::Cover => Section::Overview,
            Section::Overview => Section::Policy,
            Section::Policy => Section::ResultSummary,
            Section::ResultSummary => Section::FindingsDetail,
            Section::FindingsDetail => Section::Suggestions,
            Section::Suggestions => Section::RemediationCode,
            Section::RemediationCode => Section::AntiPatterns,
            Section::AntiPatterns | Section::Done => Section::Done,
        }
    }

    /// The cover owns page one; every other content section opens a page.
    pub fn starts_new_page(self) -> bool {
        !matches!(self, Section::Cover | Section::Done)
    }
}

/// Runtime options of a build.
#[derive(Debug, Clone)]
pub struct ReportOptions {
    /// Printed in the footer of every page.
    pub generated_at: DateTime<Utc>,
}

impl ReportOptions {
    pub fn new(generated_at: DateTime<Utc>) -> Self {
        Self { generated_at }
    }
}

/// A finished report.
#[derive(Debug, Clone)]
pub struct RenderedReport {
    pub bytes: Vec<u8>,
    pub page_count: usize,
    pub file_name: String,
    /// Every placed element, in placement order.
    pub trace: Vec<Placement>,
}

/// `AutoRed_PentestReport_<first 8 chars of the session id>.pdf`
pub fn file_name(input: &ReportInput) -> String {
    format!("AutoRed_PentestReport_{}.pdf", input.short_session_id())
}

fn chrome(input: &ReportInput, options: &ReportOptions) -> PageChrome {
    PageChrome {
        header_text: format!(
            "{BRAND} \u{2014} {REPORT_TITLE}  |  {}  |  CONFIDENTIAL",
            input.target.target
        ),
        footer_text: format!(
            "{ENGINE}  |  Session {}  |  Generated {} UTC",
            input.short_session_id(),
            options.generated_at.format("%Y-%m-%d %H:%M")
        ),
    }
}

fn metadata(input: &ReportInput) -> Metadata {
    Metadata {
        title: Some(format!("{REPORT_TITLE}: {}", input.target.target)),
        author: Some(BRAND.to_string()),
        subject: Some(format!("Session {}", input.target.session_id)),
    }
}

/// Render a validated input to PDF.
pub fn render(input: &ReportInput, options: &ReportOptions) -> Result<RenderedReport, FolioError> {
    render_with(PdfSurface::new(), input, options).map(|(report, _)| report)
}

/// Render onto any surface. The surface is handed back for inspection.
pub fn render_with<S: Surface>(
    surface: S,
    input: &ReportInput,
    options: &ReportOptions,
) -> Result<(RenderedReport, S), FolioError> {
    let mut canvas = Canvas::new(surface, PageMetrics::a4(), chrome(input, options));
    canvas.begin_document()?;

    let mut section = Section::Cover;
    while section != Section::Done {
        if section.starts_new_page() {
            canvas.advance_page()?;
        }
        let first_page = canvas.page_number();
        render_section(&mut canvas, section, input)?;
        log::debug!(
            "{section:?} placed on pages {first_page}-{}",
            canvas.page_number()
        );
        section = section.next();
    }

    let finished = canvas.finish(&metadata(input))?;
    let report = RenderedReport {
        file_name: file_name(input),
        page_count: finished.page_count,
        bytes: finished.bytes,
        trace: finished.trace,
    };
    log::info!(
        "rendered {} ({} pages, {} bytes)",
        report.file_name,
        report.page_count,
        report.bytes.len()
    );
    Ok((report, finished.surface))
}

fn render_section<S: Surface>(
    canvas: &mut Canvas<S>,
    section: Section,
    input: &ReportInput,
) -> Result<(), FolioError> {
    match section {
        Section::Cover => sections::cover(canvas, input),
        Section::Overview => sections::overview(canvas, input),
        Section::Policy => sections::policy(canvas, input),
        Section::ResultSummary => sections::result_summary(canvas, input),
        Section::FindingsDetail => sections::findings_detail(canvas, input),
        Section::Suggestions => sections::suggestions(canvas, input),
        Section::RemediationCode => sections::remediation_code(canvas, input),
        Section::AntiPatterns => sections::anti_patterns(canvas, input),
        Section::Done => Ok(()),
    }
}
