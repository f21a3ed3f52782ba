//! # Report Model
//!
//! The typed input of the report engine. Two JSON records feed a build: the
//! target metadata (who was tested, which session, when it finished) and the
//! narrative results (findings, compliance, remediation snippets and the
//! anti-patterns learned during the engagement).
//!
//! Records are parsed and validated up front. Once a [`ReportInput`] exists
//! it is read-only: layout derives geometry from it but never mutates it.
//!
//! Severity and compliance status are closed enums with one explicit
//! `Unrecognized` variant. Unknown labels are kept verbatim so the renderer
//! can show them with the neutral style instead of failing the build.

use serde::{Deserialize, Serialize};

use crate::error::FolioError;

/// Everything needed to render one report.
#[derive(Debug, Clone)]
pub struct ReportInput {
    pub target: TargetMetadata,
    pub narrative: NarrativeResults,
}

impl ReportInput {
    /// Parse both input documents and validate them.
    pub fn from_json(target_json: &str, narrative_json: &str) -> Result<Self, FolioError> {
        let target: TargetMetadata = serde_json::from_str(target_json)
            .map_err(|e| FolioError::parse("target metadata", e))?;
        let narrative: NarrativeResults = serde_json::from_str(narrative_json)
            .map_err(|e| FolioError::parse("narrative results", e))?;
        let input = ReportInput { target, narrative };
        input.validate()?;
        Ok(input)
    }

    /// Check the fields the renderer cannot do without.
    ///
    /// The first problem found is returned, named by its field path.
    pub fn validate(&self) -> Result<(), FolioError> {
        require("target", &self.target.target)?;
        require("session_id", &self.target.session_id)?;
        require("completed_at", &self.target.completed_at)?;

        for (i, finding) in self.narrative.findings.iter().enumerate() {
            require(&format!("findings[{i}].title"), &finding.title)?;
            require(&format!("findings[{i}].address"), &finding.address)?;
            if !(0.0..=10.0).contains(&finding.cvss) {
                return Err(FolioError::invalid(
                    format!("findings[{i}].cvss"),
                    format!("{} is outside 0.0-10.0", finding.cvss),
                ));
            }
        }
        for (i, snippet) in self.narrative.remediation_snippets.iter().enumerate() {
            require(&format!("remediation_snippets[{i}].label"), &snippet.label)?;
        }
        for (i, entry) in self.narrative.compliance_findings.iter().enumerate() {
            require(&format!("compliance_findings[{i}].regulation"), &entry.regulation)?;
        }
        for (i, pattern) in self.narrative.anti_patterns.iter().enumerate() {
            require(&format!("anti_patterns[{i}].title"), &pattern.title)?;
        }
        Ok(())
    }

    /// The session id prefix used in file names and footers.
    pub fn short_session_id(&self) -> &str {
        let id = &self.target.session_id;
        match id.char_indices().nth(8) {
            Some((idx, _)) => &id[..idx],
            None => id,
        }
    }
}

fn require(field: &str, value: &str) -> Result<(), FolioError> {
    if value.trim().is_empty() {
        return Err(FolioError::MissingField(field.to_string()));
    }
    Ok(())
}

/// Identifies the assessed system and the session that produced the results.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TargetMetadata {
    pub target: String,
    pub session_id: String,
    pub completed_at: String,
}

/// The free-text and structured results of an assessment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NarrativeResults {
    pub executive_summary: String,
    pub findings: Vec<Finding>,
    pub remediation_snippets: Vec<RemediationSnippet>,
    pub compliance_findings: Vec<ComplianceEntry>,
    pub anti_patterns: Vec<AntiPattern>,

    #[serde(default)]
    pub target_profile: Vec<LabeledValue>,
    #[serde(default)]
    pub services: Vec<String>,
    #[serde(default)]
    pub tools: Vec<LabeledValue>,
    #[serde(default)]
    pub fix_strategy: String,
    #[serde(default)]
    pub recommendations: Vec<Recommendation>,
}

impl NarrativeResults {
    /// Findings per severity, counted from the finding list itself.
    pub fn severity_counts(&self) -> SeverityCounts {
        let mut counts = SeverityCounts::default();
        for finding in &self.findings {
            match finding.severity {
                Severity::Critical => counts.critical += 1,
                Severity::High => counts.high += 1,
                Severity::Medium => counts.medium += 1,
                Severity::Low => counts.low += 1,
                Severity::Unrecognized(_) => counts.unrecognized += 1,
            }
        }
        counts
    }

    /// Split anti-patterns into (positive, negative), keeping input order
    /// within each group.
    pub fn partition_patterns(&self) -> (Vec<&AntiPattern>, Vec<&AntiPattern>) {
        self.anti_patterns
            .iter()
            .partition(|p| p.kind == PatternKind::Positive)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SeverityCounts {
    pub critical: usize,
    pub high: usize,
    pub medium: usize,
    pub low: usize,
    pub unrecognized: usize,
}

impl SeverityCounts {
    pub fn get(&self, severity: &Severity) -> usize {
        match severity {
            Severity::Critical => self.critical,
            Severity::High => self.high,
            Severity::Medium => self.medium,
            Severity::Low => self.low,
            Severity::Unrecognized(_) => self.unrecognized,
        }
    }
}

/// A single vulnerability finding.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Finding {
    pub title: String,
    pub severity: Severity,
    /// CVSS base score, 0.0 - 10.0.
    pub cvss: f64,
    pub address: String,
    pub procedure: String,
    pub risk: String,
    pub fix: String,
}

/// Finding severity. Unknown labels are preserved in `Unrecognized`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Severity {
    Critical,
    High,
    Medium,
    Low,
    Unrecognized(String),
}

impl Severity {
    /// The four recognised severities, most severe first.
    pub const ALL: [Severity; 4] = [
        Severity::Critical,
        Severity::High,
        Severity::Medium,
        Severity::Low,
    ];
}

impl From<String> for Severity {
    fn from(s: String) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "critical" => Severity::Critical,
            "high" => Severity::High,
            "medium" => Severity::Medium,
            "low" => Severity::Low,
            _ => Severity::Unrecognized(s),
        }
    }
}

impl From<Severity> for String {
    fn from(s: Severity) -> Self {
        match s {
            Severity::Critical => "Critical".to_string(),
            Severity::High => "High".to_string(),
            Severity::Medium => "Medium".to_string(),
            Severity::Low => "Low".to_string(),
            Severity::Unrecognized(raw) => raw,
        }
    }
}

/// The result of checking one regulation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComplianceEntry {
    pub regulation: String,
    pub status: ComplianceStatus,
    #[serde(default)]
    pub score: Option<f64>,
    /// Failing items, in input order.
    #[serde(default)]
    pub items: Vec<String>,
    /// Referenced articles, in input order.
    #[serde(default)]
    pub articles: Vec<String>,
}

impl ComplianceEntry {
    /// Score in 0 - 100. Absent scores count as 0.
    pub fn score(&self) -> f64 {
        let score = self.score.unwrap_or(0.0);
        if score.is_nan() {
            return 0.0;
        }
        score.clamp(0.0, 100.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ComplianceStatus {
    NonCompliant,
    AtRisk,
    Compliant,
    Unrecognized(String),
}

impl From<String> for ComplianceStatus {
    fn from(s: String) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "non_compliant" => ComplianceStatus::NonCompliant,
            "at_risk" => ComplianceStatus::AtRisk,
            "compliant" => ComplianceStatus::Compliant,
            _ => ComplianceStatus::Unrecognized(s),
        }
    }
}

impl From<ComplianceStatus> for String {
    fn from(s: ComplianceStatus) -> Self {
        match s {
            ComplianceStatus::NonCompliant => "non_compliant".to_string(),
            ComplianceStatus::AtRisk => "at_risk".to_string(),
            ComplianceStatus::Compliant => "compliant".to_string(),
            ComplianceStatus::Unrecognized(raw) => raw,
        }
    }
}

/// Infrastructure-as-code that fixes a finding.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemediationSnippet {
    pub label: String,
    #[serde(default)]
    pub description: String,
    /// Verbatim, newline-delimited code.
    pub code: String,
    /// Display-only language tag.
    #[serde(default)]
    pub language: String,
}

/// An observation learned during the engagement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AntiPattern {
    #[serde(rename = "type")]
    pub kind: PatternKind,
    pub title: String,
    pub detail: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PatternKind {
    /// A control that held.
    Positive,
    /// A weakness that was exploited or amplified.
    Negative,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LabeledValue {
    pub label: String,
    pub value: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recommendation {
    pub title: String,
    pub detail: String,
}

/// Document metadata embedded in the PDF.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Metadata {
    pub title: Option<String>,
    pub author: Option<String>,
    pub subject: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    const TARGET: &str = r#"{
        "target": "192.168.1.100",
        "session_id": "a1b2c3d4-e5f6-7890",
        "completed_at": "2026-02-24T18:00:00Z"
    }"#;

    fn narrative(findings: &str, patterns: &str) -> String {
        format!(
            r#"{{
                "executive_summary": "Summary.",
                "findings": {findings},
                "remediation_snippets": [],
                "compliance_findings": [
                    {{ "regulation": "PCI DSS", "status": "non_compliant", "score": null }}
                ],
                "anti_patterns": {patterns}
            }}"#
        )
    }

    fn finding(title: &str, severity: &str, cvss: f64) -> String {
        format!(
            r#"{{ "title": "{title}", "severity": "{severity}", "cvss": {cvss},
                 "address": "10.0.0.1:80", "procedure": "p", "risk": "r", "fix": "f" }}"#
        )
    }

    #[test]
    fn parses_valid_input() {
        let findings = format!("[{}]", finding("SQLi", "Critical", 9.8));
        let input = ReportInput::from_json(TARGET, &narrative(&findings, "[]")).unwrap();
        assert_eq!(input.narrative.findings.len(), 1);
        assert_eq!(input.narrative.findings[0].severity, Severity::Critical);
        assert_eq!(input.short_session_id(), "a1b2c3d4");
    }

    #[test]
    fn missing_required_field_fails_with_name() {
        let err = ReportInput::from_json(r#"{"target": "x", "completed_at": "y"}"#, "{}")
            .unwrap_err();
        assert!(err.to_string().contains("session_id"), "{err}");
    }

    #[test]
    fn empty_required_field_fails() {
        let target = r#"{"target": " ", "session_id": "s", "completed_at": "c"}"#;
        let err = ReportInput::from_json(target, &narrative("[]", "[]")).unwrap_err();
        assert!(matches!(err, FolioError::MissingField(ref f) if f == "target"));
    }

    #[test]
    fn out_of_range_cvss_is_invalid() {
        let findings = format!("[{}]", finding("X", "High", 11.0));
        let err = ReportInput::from_json(TARGET, &narrative(&findings, "[]")).unwrap_err();
        assert!(matches!(err, FolioError::InvalidField { ref field, .. } if field == "findings[0].cvss"));
    }

    #[test]
    fn unknown_severity_is_kept_verbatim() {
        let findings = format!("[{}]", finding("X", "Informational", 1.0));
        let input = ReportInput::from_json(TARGET, &narrative(&findings, "[]")).unwrap();
        assert_eq!(
            input.narrative.findings[0].severity,
            Severity::Unrecognized("Informational".to_string())
        );
        assert_eq!(input.narrative.severity_counts().unrecognized, 1);
    }

    #[test]
    fn status_parses_and_missing_score_is_zero() {
        let input = ReportInput::from_json(TARGET, &narrative("[]", "[]")).unwrap();
        let entry = &input.narrative.compliance_findings[0];
        assert_eq!(entry.status, ComplianceStatus::NonCompliant);
        assert_eq!(entry.score(), 0.0);
    }

    #[test]
    fn partition_keeps_relative_order() {
        let patterns = r#"[
            {"type": "negative", "title": "n1", "detail": "d"},
            {"type": "positive", "title": "p1", "detail": "d"},
            {"type": "negative", "title": "n2", "detail": "d"},
            {"type": "positive", "title": "p2", "detail": "d"}
        ]"#;
        let input = ReportInput::from_json(TARGET, &narrative("[]", patterns)).unwrap();
        let (pos, neg) = input.narrative.partition_patterns();
        let pos: Vec<_> = pos.iter().map(|p| p.title.as_str()).collect();
        let neg: Vec<_> = neg.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(pos, ["p1", "p2"]);
        assert_eq!(neg, ["n1", "n2"]);
    }

    #[test]
    fn unknown_pattern_kind_is_a_parse_error() {
        let patterns = r#"[{"type": "neutral", "title": "t", "detail": "d"}]"#;
        let err = ReportInput::from_json(TARGET, &narrative("[]", patterns)).unwrap_err();
        assert!(matches!(err, FolioError::Parse { document: "narrative results", .. }));
    }

    #[test]
    fn severity_counts_follow_input() {
        let findings = format!(
            "[{}, {}, {}]",
            finding("a", "Critical", 9.0),
            finding("b", "critical", 9.5),
            finding("c", "Low", 2.0)
        );
        let input = ReportInput::from_json(TARGET, &narrative(&findings, "[]")).unwrap();
        let counts = input.narrative.severity_counts();
        assert_eq!(counts.critical, 2);
        assert_eq!(counts.low, 1);
        assert_eq!(counts.high, 0);
    }

    #[test]
    fn short_session_id_keeps_short_ids() {
        let target = r#"{"target": "t", "session_id": "abc", "completed_at": "c"}"#;
        let input = ReportInput::from_json(target, &narrative("[]", "[]")).unwrap();
        assert_eq!(input.short_session_id(), "abc");
    }
}
