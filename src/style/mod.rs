//! # Visual Identity
//!
//! Colours, type sizes and the lookup tables that turn a severity, a
//! compliance status or a pattern kind into badge colours. These are
//! compile-time constants: the report's look is fixed, not configured.
//!
//! Builders never use colour literals. Everything that is painted takes its
//! colour from the palette below or from one of the style tables.

use serde::Serialize;

use crate::model::{ComplianceStatus, PatternKind, Severity};

/// An opaque RGB colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Components in the 0.0 - 1.0 range PDF colour operators expect.
    pub fn unit(&self) -> (f64, f64, f64) {
        (
            self.r as f64 / 255.0,
            self.g as f64 / 255.0,
            self.b as f64 / 255.0,
        )
    }
}

pub mod palette {
    use super::Color;

    pub const DARK: Color = Color::rgb(15, 23, 42);
    pub const MID: Color = Color::rgb(51, 65, 85);
    pub const LIGHT: Color = Color::rgb(226, 232, 240);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const RED: Color = Color::rgb(220, 38, 38);
    pub const ORANGE: Color = Color::rgb(234, 88, 12);
    pub const YELLOW: Color = Color::rgb(202, 138, 4);
    pub const GREEN: Color = Color::rgb(22, 163, 74);
    pub const BLUE: Color = Color::rgb(37, 99, 235);
    pub const BLUE_DARK: Color = Color::rgb(30, 64, 175);
    pub const BLUE_LITE: Color = Color::rgb(219, 234, 254);
    pub const MUTED: Color = Color::rgb(148, 163, 184);
    pub const SLATE: Color = Color::rgb(100, 116, 139);
    pub const CODE_BG: Color = Color::rgb(30, 30, 30);
    pub const CODE_FG: Color = Color::rgb(212, 212, 212);

    pub const BADGE_RED: Color = Color::rgb(254, 226, 226);
    pub const BADGE_ORANGE: Color = Color::rgb(255, 237, 213);
    pub const BADGE_YELLOW: Color = Color::rgb(254, 249, 195);
    pub const BADGE_AMBER: Color = Color::rgb(254, 243, 199);
    pub const BADGE_GREEN: Color = Color::rgb(220, 252, 231);
}

/// Font sizes in points.
pub mod size {
    pub const COVER_TITLE: f64 = 22.0;
    pub const COVER_TARGET: f64 = 14.0;
    pub const COVER_SUBTITLE: f64 = 12.0;
    pub const TILE_COUNT: f64 = 18.0;
    pub const H1: f64 = 13.0;
    pub const H2: f64 = 11.0;
    pub const H3: f64 = 10.0;
    pub const BODY: f64 = 9.5;
    pub const CARD_BODY: f64 = 9.0;
    pub const KV: f64 = 9.0;
    pub const TABLE: f64 = 8.5;
    pub const TABLE_HEADER: f64 = 9.0;
    pub const BADGE: f64 = 8.0;
    pub const HEADER: f64 = 8.0;
    pub const CODE: f64 = 8.0;
    pub const SMALL: f64 = 8.0;
    pub const FOOTER: f64 = 7.5;
    pub const SCORE_LABEL: f64 = 7.5;
    pub const CODE_TAG: f64 = 7.0;
}

/// Foreground, background and display label for a badge or card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BadgeStyle {
    pub fg: Color,
    pub bg: Color,
    pub label: String,
}

impl BadgeStyle {
    fn new(fg: Color, bg: Color, label: impl Into<String>) -> Self {
        Self {
            fg,
            bg,
            label: label.into(),
        }
    }

    /// The style for any category the tables do not know.
    pub fn neutral(label: impl Into<String>) -> Self {
        Self::new(palette::MID, palette::LIGHT, label)
    }
}

/// Severity → badge style. Unrecognised severities take the neutral style.
pub fn severity_style(severity: &Severity) -> BadgeStyle {
    match severity {
        Severity::Critical => BadgeStyle::new(palette::RED, palette::BADGE_RED, "Critical"),
        Severity::High => BadgeStyle::new(palette::ORANGE, palette::BADGE_ORANGE, "High"),
        Severity::Medium => BadgeStyle::new(palette::YELLOW, palette::BADGE_YELLOW, "Medium"),
        Severity::Low => BadgeStyle::new(palette::GREEN, palette::BADGE_GREEN, "Low"),
        Severity::Unrecognized(raw) => {
            log::warn!("unrecognized severity {raw:?}, using neutral style");
            BadgeStyle::neutral(raw.as_str())
        }
    }
}

/// Compliance status → badge style. Unrecognised statuses take the neutral
/// style and show their raw text.
pub fn status_style(status: &ComplianceStatus) -> BadgeStyle {
    match status {
        ComplianceStatus::NonCompliant => {
            BadgeStyle::new(palette::RED, palette::BADGE_RED, "Non-Compliant")
        }
        ComplianceStatus::AtRisk => BadgeStyle::new(palette::ORANGE, palette::BADGE_AMBER, "At Risk"),
        ComplianceStatus::Compliant => {
            BadgeStyle::new(palette::GREEN, palette::BADGE_GREEN, "Compliant")
        }
        ComplianceStatus::Unrecognized(raw) => {
            log::warn!("unrecognized compliance status {raw:?}, using neutral style");
            BadgeStyle::neutral(raw.as_str())
        }
    }
}

/// Pattern kind → card style with the title marker as label.
pub fn pattern_style(kind: PatternKind) -> BadgeStyle {
    match kind {
        PatternKind::Positive => BadgeStyle::new(palette::GREEN, palette::BADGE_GREEN, "+"),
        PatternKind::Negative => BadgeStyle::new(palette::RED, palette::BADGE_RED, "\u{00D7}"),
    }
}

/// CVSS range and remediation priority for a severity level.
pub fn severity_band(severity: &Severity) -> Option<(&'static str, &'static str)> {
    match severity {
        Severity::Critical => Some(("9.0 \u{2013} 10.0", "Must fix immediately \u{2014} highest priority")),
        Severity::High => Some(("7.0 \u{2013} 8.9", "Must fix immediately")),
        Severity::Medium => Some(("4.0 \u{2013} 6.9", "Recommended fix \u{2014} medium priority")),
        Severity::Low => Some(("0.0 \u{2013} 3.9", "Address per risk appetite")),
        Severity::Unrecognized(_) => None,
    }
}

/// Fill colour of a score bar.
pub fn score_fill(score: f64) -> Color {
    if score < 50.0 {
        palette::RED
    } else if score < 70.0 {
        palette::YELLOW
    } else {
        palette::GREEN
    }
}

/// Score label colour, inverted over the dark low-score fill.
pub fn score_label(score: f64) -> Color {
    if score < 50.0 {
        palette::WHITE
    } else {
        palette::DARK
    }
}
