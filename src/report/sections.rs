//! Section renderers. Each maps input records onto element builders.

use crate::draw::{DrawCommand, Rect, Surface};
use crate::error::FolioError;
use crate::font::Font;
use crate::layout::elements::{
    self, Align, Card, Cell, Column, ComplianceCard, HeadingLevel, Table, TextStyle, COVER_ROW,
    KV_ROW,
};
use crate::layout::{Canvas, ElementKind};
use crate::model::{AntiPattern, ReportInput, Severity, SeverityCounts};
use crate::style::{self, palette, size, BadgeStyle};
use crate::text::{TextRun, CELL_PADDING};

use super::{ENGINE, REPORT_TITLE};

const COVER_BANNER: f64 = 55.0;
const TILE_SPACING: f64 = 42.0;
const SEPARATOR: &str = " \u{00B7} ";
const INDENT: f64 = 2.0;
const COMPLIANCE_GAP: f64 = 2.0;

const TEST_METHOD: &str = "This penetration test uses an automated gray-box method. An agent \
    connected to an isolated attack environment discovers services, identifies \
    vulnerabilities and attempts exploitation without prior knowledge of the internal \
    architecture. Every step is recorded and reproduced in the findings below.";

const DISCLAIMER: &str = "This report was generated automatically. All findings should be \
    independently verified before remediation.";

const REMEDIATION_LEAD: &str = "The snippets below are ready-to-apply configuration and code \
    changes that address the findings of this report. Review them against your environment \
    before deploying.";

const PATTERNS_LEAD: &str = "Patterns learned during the engagement. Positive patterns are \
    controls that held against the attack; negative patterns are weaknesses that were \
    exploited or made exploitation easier.";

fn kv_rows<S: Surface>(canvas: &mut Canvas<S>, rows: &[(&str, &str)]) -> Result<(), FolioError> {
    for (i, (key, value)) in rows.iter().enumerate() {
        elements::kv_row(canvas, key, value, i % 2 == 0, KV_ROW)?;
    }
    Ok(())
}

fn plural(n: usize, one: &str, many: &str) -> String {
    if n == 1 {
        format!("{n} {one}")
    } else {
        format!("{n} {many}")
    }
}

pub(super) fn cover<S: Surface>(canvas: &mut Canvas<S>, input: &ReportInput) -> Result<(), FolioError> {
    let (left, width) = (canvas.left(), canvas.metrics().width);
    canvas.paint(DrawCommand::fill(
        Rect::new(0.0, 0.0, width, COVER_BANNER),
        palette::DARK,
    ))?;
    canvas.record(ElementKind::CoverBanner, 0.0, COVER_BANNER);

    canvas.text(
        left,
        12.0,
        10.0,
        TextRun::new(REPORT_TITLE, Font::sans_bold(size::COVER_TITLE)),
        palette::WHITE,
    )?;
    canvas.text(
        left,
        24.0,
        8.0,
        TextRun::new(
            format!("Automated Red Teaming  |  {ENGINE}"),
            Font::sans(size::COVER_SUBTITLE),
        ),
        palette::LIGHT,
    )?;
    canvas.paint(DrawCommand::fill(Rect::new(left, 34.0, 80.0, 1.5), palette::BLUE))?;
    let target_font = Font::sans_bold(size::COVER_TARGET);
    let target = canvas.fit_line(
        &format!("Target:  {}", input.target.target),
        &target_font,
        canvas.content_width(),
    )?;
    canvas.text(left, 37.0, 8.0, TextRun::new(target, target_font), palette::WHITE)?;

    canvas.move_to(left, COVER_BANNER + 9.0);
    let rows = [
        ("Target", input.target.target.as_str()),
        ("Session ID", input.target.session_id.as_str()),
        ("Completed", input.target.completed_at.as_str()),
        ("Engine", ENGINE),
        ("Classification", "CONFIDENTIAL"),
    ];
    for (i, (key, value)) in rows.iter().enumerate() {
        elements::kv_row(canvas, key, value, i % 2 == 1, COVER_ROW)?;
    }

    canvas.advance(8.0);
    let y = canvas.y();
    canvas.text(
        left,
        y,
        6.0,
        TextRun::new("Findings at a Glance", Font::sans_bold(size::H3)),
        palette::MID,
    )?;
    canvas.advance(8.0);

    let counts = input.narrative.severity_counts();
    let y = canvas.y();
    for (i, severity) in Severity::ALL.iter().enumerate() {
        let x = left + i as f64 * TILE_SPACING;
        elements::severity_tile(canvas, x, y, counts.get(severity), &style::severity_style(severity))?;
    }
    canvas.advance(26.0);

    if counts.unrecognized > 0 {
        elements::paragraph(
            canvas,
            &format!(
                "{} with an unrecognized severity {} not counted above.",
                plural(counts.unrecognized, "finding", "findings"),
                if counts.unrecognized == 1 { "is" } else { "are" }
            ),
            TextStyle::small(),
            0.0,
        )?;
    }

    let font = Font::sans(size::SMALL);
    let disclaimer = canvas.fit_line(DISCLAIMER, &font, canvas.content_width())?;
    let x = left + (canvas.content_width() - canvas.text_width(&disclaimer, &font)?) / 2.0;
    let y = canvas.y();
    canvas.text(x, y, 5.0, TextRun::new(disclaimer, font), palette::MUTED)?;
    canvas.advance(5.0);
    Ok(())
}

pub(super) fn overview<S: Surface>(canvas: &mut Canvas<S>, input: &ReportInput) -> Result<(), FolioError> {
    let narrative = &input.narrative;
    elements::heading(canvas, HeadingLevel::Section, "1.  Overview")?;

    elements::heading(canvas, HeadingLevel::Subsection, "1.1  Target Profile")?;
    let mut profile = vec![("Target", input.target.target.as_str())];
    profile.extend(
        narrative
            .target_profile
            .iter()
            .map(|row| (row.label.as_str(), row.value.as_str())),
    );
    kv_rows(canvas, &profile)?;

    elements::heading(canvas, HeadingLevel::Subsection, "1.2  Test Scope")?;
    let services = if narrative.services.is_empty() {
        "Not recorded".to_string()
    } else {
        narrative.services.join(SEPARATOR)
    };
    let findings = narrative.findings.len().to_string();
    let (positives, _) = narrative.partition_patterns();
    let defenses = positives.len().to_string();
    kv_rows(
        canvas,
        &[
            ("Target", input.target.target.as_str()),
            ("Services", services.as_str()),
            ("Findings", findings.as_str()),
            ("Defenses Held", defenses.as_str()),
        ],
    )?;

    elements::heading(canvas, HeadingLevel::Subsection, "1.3  Test Timeline")?;
    kv_rows(
        canvas,
        &[
            ("Completed At", input.target.completed_at.as_str()),
            ("Session ID", input.target.session_id.as_str()),
            ("Engine", ENGINE),
        ],
    )
}

pub(super) fn policy<S: Surface>(canvas: &mut Canvas<S>, input: &ReportInput) -> Result<(), FolioError> {
    elements::heading(canvas, HeadingLevel::Section, "2.  Test Policy")?;
    elements::heading(canvas, HeadingLevel::Subsection, "2.1  Test Method")?;
    elements::body(canvas, TEST_METHOD, 0.0)?;

    let tools = &input.narrative.tools;
    if !tools.is_empty() {
        elements::heading(canvas, HeadingLevel::Subsection, "2.2  Tools Used")?;
        let rows: Vec<(&str, &str)> = tools
            .iter()
            .map(|t| (t.label.as_str(), t.value.as_str()))
            .collect();
        kv_rows(canvas, &rows)?;
    }

    elements::heading(
        canvas,
        HeadingLevel::Subsection,
        "2.3  Vulnerability Level Definition",
    )?;
    let table = Table::new(vec![
        Column::new("CVSS Range", 40.0, Align::Left),
        Column::new("Severity", 30.0, Align::Left),
        Column::new("Remediation Priority", 0.0, Align::Left),
    ]);
    table.header(canvas)?;
    for (i, severity) in Severity::ALL.iter().enumerate() {
        if let Some((range, priority)) = style::severity_band(severity) {
            table.row(
                canvas,
                &[
                    Cell::Text(range.to_string()),
                    Cell::Styled(style::severity_style(severity)),
                    Cell::Text(priority.to_string()),
                ],
                i % 2 == 0,
            )?;
        }
    }
    Ok(())
}

/// "Summary: 2 Critical, 1 High, 1 Medium."
fn summary_sentence(counts: &SeverityCounts, defenses: usize) -> String {
    let mut parts: Vec<String> = Severity::ALL
        .iter()
        .filter(|s| counts.get(s) > 0)
        .map(|s| format!("{} {}", counts.get(s), style::severity_style(s).label))
        .collect();
    if counts.unrecognized > 0 {
        parts.push(format!("{} unclassified", counts.unrecognized));
    }
    let mut sentence = if parts.is_empty() {
        "Summary: no vulnerabilities were found.".to_string()
    } else {
        format!("Summary: {}.", parts.join(", "))
    };
    if defenses > 0 {
        sentence.push_str(&format!(" {} held.", plural(defenses, "defense", "defenses")));
    }
    sentence
}

pub(super) fn result_summary<S: Surface>(
    canvas: &mut Canvas<S>,
    input: &ReportInput,
) -> Result<(), FolioError> {
    let narrative = &input.narrative;
    elements::heading(canvas, HeadingLevel::Section, "3.  Test Result Summary")?;

    let scope = if narrative.services.is_empty() {
        String::new()
    } else {
        format!(" across {}", plural(narrative.services.len(), "service", "services"))
    };
    let count = narrative.findings.len();
    elements::body(
        canvas,
        &format!(
            "Penetration testing was executed against {}. {} {} discovered{scope}.",
            input.target.target,
            plural(count, "vulnerability", "vulnerabilities"),
            if count == 1 { "was" } else { "were" },
        ),
        0.0,
    )?;
    if !narrative.executive_summary.trim().is_empty() {
        elements::body(canvas, &narrative.executive_summary, 0.0)?;
    }

    canvas.advance(2.0);
    let table = Table::new(vec![
        Column::new("No.", 10.0, Align::Center),
        Column::new("Target:Port", 70.0, Align::Left),
        Column::new("Vulnerability", 68.0, Align::Left),
        Column::new("Severity", 14.0, Align::Left),
        Column::new("CVSS", 12.0, Align::Center),
    ]);
    table.header(canvas)?;
    for (i, finding) in narrative.findings.iter().enumerate() {
        table.row(
            canvas,
            &[
                Cell::Text((i + 1).to_string()),
                Cell::Text(finding.address.clone()),
                Cell::Text(finding.title.clone()),
                Cell::Styled(style::severity_style(&finding.severity)),
                Cell::Bold(format!("{:.1}", finding.cvss)),
            ],
            i % 2 == 0,
        )?;
    }

    canvas.advance(4.0);
    let (positives, _) = narrative.partition_patterns();
    elements::body(
        canvas,
        &summary_sentence(&narrative.severity_counts(), positives.len()),
        0.0,
    )
}

pub(super) fn findings_detail<S: Surface>(
    canvas: &mut Canvas<S>,
    input: &ReportInput,
) -> Result<(), FolioError> {
    elements::heading(canvas, HeadingLevel::Section, "4.  Test Result Description")?;
    let findings = &input.narrative.findings;
    if findings.is_empty() {
        return elements::body(canvas, "No vulnerabilities were recorded in this session.", 0.0);
    }

    for (i, finding) in findings.iter().enumerate() {
        let severity = style::severity_style(&finding.severity);
        let frame = BadgeStyle {
            fg: severity.fg,
            bg: palette::WHITE,
            label: severity.label.clone(),
        };
        elements::card(
            canvas,
            &Card {
                frame,
                badge: Some(severity),
                title: format!("4.{}  {}", i + 1, finding.title),
                title_color: palette::DARK,
                aside: Some(format!("CVSS {:.1}", finding.cvss)),
                body: finding.address.clone(),
            },
        )?;

        for (title, text) in [
            ("Test Procedure", &finding.procedure),
            ("Vulnerability Risk", &finding.risk),
            ("Vulnerability Fix Suggestion", &finding.fix),
        ] {
            if text.trim().is_empty() {
                continue;
            }
            elements::heading(canvas, HeadingLevel::Minor, title)?;
            elements::body(canvas, text, INDENT)?;
        }

        if i + 1 < findings.len() {
            elements::divider(canvas)?;
        }
    }
    Ok(())
}

pub(super) fn suggestions<S: Surface>(
    canvas: &mut Canvas<S>,
    input: &ReportInput,
) -> Result<(), FolioError> {
    let narrative = &input.narrative;
    elements::heading(canvas, HeadingLevel::Section, "5.  Security Suggestions")?;

    if !narrative.fix_strategy.trim().is_empty() {
        elements::heading(
            canvas,
            HeadingLevel::Subsection,
            "5.1  Vulnerability Fixing Suggestions",
        )?;
        elements::body(canvas, &narrative.fix_strategy, 0.0)?;
    }

    if !narrative.recommendations.is_empty() {
        elements::heading(
            canvas,
            HeadingLevel::Subsection,
            "5.2  Security Protection Recommendations",
        )?;
        for rec in &narrative.recommendations {
            elements::heading(canvas, HeadingLevel::Minor, &rec.title)?;
            elements::body(canvas, &rec.detail, 4.0)?;
        }
    }

    if !narrative.compliance_findings.is_empty() {
        let cards: Vec<ComplianceCard> = narrative
            .compliance_findings
            .iter()
            .map(|entry| ComplianceCard {
                regulation: entry.regulation.clone(),
                status: style::status_style(&entry.status),
                score: entry.score(),
                items: entry.items.clone(),
                references: entry.articles.clone(),
            })
            .collect();
        let next = match cards.first() {
            Some(first) => COMPLIANCE_GAP + elements::compliance_card_lead(canvas, first)?,
            None => elements::BODY_LINE,
        };
        elements::heading_with(
            canvas,
            HeadingLevel::Subsection,
            "5.3  Compliance & Audit Overview",
            next,
        )?;
        canvas.advance(COMPLIANCE_GAP);
        for card in &cards {
            elements::compliance_card(canvas, card)?;
        }
    }

    if narrative.fix_strategy.trim().is_empty()
        && narrative.recommendations.is_empty()
        && narrative.compliance_findings.is_empty()
    {
        elements::body(canvas, "No additional suggestions were provided.", 0.0)?;
    }
    Ok(())
}

pub(super) fn remediation_code<S: Surface>(
    canvas: &mut Canvas<S>,
    input: &ReportInput,
) -> Result<(), FolioError> {
    elements::heading(canvas, HeadingLevel::Section, "6.  Remediation as Code")?;
    let snippets = &input.narrative.remediation_snippets;
    if snippets.is_empty() {
        return elements::body(canvas, "No remediation snippets were produced.", 0.0);
    }
    elements::body(canvas, REMEDIATION_LEAD, 0.0)?;

    let description = TextStyle {
        font: Font::sans(size::CARD_BODY),
        ..TextStyle::body()
    };
    for snippet in snippets {
        let mut next = elements::code_block_lead(canvas, &snippet.code)?;
        if !snippet.description.trim().is_empty() {
            let width = canvas.content_width() - 2.0 * CELL_PADDING;
            let lines = canvas.measure(&snippet.description, &description.font, width)?;
            next += lines as f64 * description.line_height + 2.0;
        }
        elements::heading_with(canvas, HeadingLevel::Subsection, &snippet.label, next)?;
        if !snippet.description.trim().is_empty() {
            elements::paragraph(canvas, &snippet.description, description, 0.0)?;
            canvas.advance(2.0);
        }
        elements::code_block(canvas, &snippet.code, &snippet.language)?;
        canvas.advance(3.0);
    }
    Ok(())
}

fn pattern_card(pattern: &AntiPattern) -> Card {
    let style = style::pattern_style(pattern.kind);
    Card {
        title: format!("{}  {}", style.label, pattern.title),
        title_color: style.fg,
        frame: style,
        badge: None,
        aside: None,
        body: pattern.detail.clone(),
    }
}

pub(super) fn anti_patterns<S: Surface>(
    canvas: &mut Canvas<S>,
    input: &ReportInput,
) -> Result<(), FolioError> {
    elements::heading(canvas, HeadingLevel::Section, "7.  Learned Anti-Patterns")?;
    let (positives, negatives) = input.narrative.partition_patterns();
    if positives.is_empty() && negatives.is_empty() {
        return elements::body(canvas, "No patterns were learned in this session.", 0.0);
    }
    elements::body(canvas, PATTERNS_LEAD, 0.0)?;
    canvas.advance(2.0);

    if !positives.is_empty() {
        pattern_group(canvas, "Positive \u{2014} Security Controls That Held", &positives)?;
    }

    if !negatives.is_empty() {
        if !positives.is_empty() {
            canvas.advance(4.0);
        }
        pattern_group(canvas, "Negative \u{2014} Weaknesses Observed", &negatives)?;
    }
    Ok(())
}

/// A subsection heading kept with the first card of its group.
fn pattern_group<S: Surface>(
    canvas: &mut Canvas<S>,
    title: &str,
    patterns: &[&AntiPattern],
) -> Result<(), FolioError> {
    let cards: Vec<Card> = patterns.iter().map(|p| pattern_card(p)).collect();
    let next = match cards.first() {
        Some(first) => elements::card_lead(canvas, first)?,
        None => elements::BODY_LINE,
    };
    elements::heading_with(canvas, HeadingLevel::Subsection, title, next)?;
    for card in &cards {
        elements::card(canvas, card)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_lists_only_present_severities() {
        let counts = SeverityCounts {
            critical: 2,
            high: 1,
            medium: 1,
            low: 0,
            unrecognized: 0,
        };
        assert_eq!(
            summary_sentence(&counts, 1),
            "Summary: 2 Critical, 1 High, 1 Medium. 1 defense held."
        );
    }

    #[test]
    fn summary_of_nothing() {
        let counts = SeverityCounts::default();
        assert_eq!(
            summary_sentence(&counts, 0),
            "Summary: no vulnerabilities were found."
        );
    }

    #[test]
    fn summary_counts_unclassified() {
        let counts = SeverityCounts {
            low: 3,
            unrecognized: 1,
            ..SeverityCounts::default()
        };
        assert_eq!(
            summary_sentence(&counts, 2),
            "Summary: 3 Low, 1 unclassified. 2 defenses held."
        );
    }

    #[test]
    fn pattern_card_uses_marker_and_kind_style() {
        let pattern = AntiPattern {
            kind: crate::model::PatternKind::Negative,
            title: "Default credentials".into(),
            detail: "Tomcat manager accepted tomcat:tomcat.".into(),
        };
        let card = pattern_card(&pattern);
        assert_eq!(card.title, "\u{00D7}  Default credentials");
        assert_eq!(card.frame.fg, palette::RED);
        assert_eq!(card.frame.bg, palette::BADGE_RED);
    }
}
