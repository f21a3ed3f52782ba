//! # Text Flow
//!
//! Word wrapping and text measurement.
//!
//! There is exactly one wrapping routine, [`wrap_lines`]. The dry-run
//! measurement ([`measure`]) counts its lines and the painting code iterates
//! its output, so a block's measured height and its painted height cannot
//! disagree. A height computed one way and painted another is how content
//! goes missing at page boundaries.
//!
//! Break opportunities come from UAX#14. Lines are filled greedily; a word
//! that is wider than the whole line on its own is broken between characters.

use serde::Serialize;
use unicode_linebreak::{linebreaks, BreakOpportunity};

use crate::error::FolioError;
use crate::font::Font;

/// Points to millimetres.
pub const PT_TO_MM: f64 = 25.4 / 72.0;

/// Horizontal padding inside a text cell, on each side, in mm.
pub const CELL_PADDING: f64 = 1.0;

const ELLIPSIS: &str = "...";

/// Anything that can tell how wide a string renders.
///
/// Widths are in millimetres.
pub trait Measure {
    fn text_width(&self, text: &str, font: &Font) -> Result<f64, FolioError>;
}

/// A string with the font it is set in.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextRun {
    pub text: String,
    pub font: Font,
}

impl TextRun {
    pub fn new(text: impl Into<String>, font: Font) -> Self {
        Self {
            text: text.into(),
            font,
        }
    }

    pub fn width<M: Measure + ?Sized>(&self, measure: &M) -> Result<f64, FolioError> {
        measure.text_width(&self.text, &self.font)
    }
}

fn is_newline(ch: char) -> bool {
    matches!(ch, '\n' | '\r' | '\u{2028}' | '\u{2029}')
}

/// Greedy line filler. Tracks the width of the current line including any
/// trailing whitespace; only visible text is checked against the limit.
struct LineFiller<'a, M: Measure + ?Sized> {
    measure: &'a M,
    font: &'a Font,
    max_width: f64,
    lines: Vec<String>,
    line: String,
    width: f64,
}

impl<'a, M: Measure + ?Sized> LineFiller<'a, M> {
    fn flush(&mut self) {
        let line = std::mem::take(&mut self.line);
        self.lines.push(line.trim_end().to_string());
        self.width = 0.0;
    }

    fn push_segment(&mut self, segment: &str) -> Result<(), FolioError> {
        if segment.is_empty() {
            return Ok(());
        }
        let visible = self.measure.text_width(segment.trim_end(), self.font)?;
        if !self.line.is_empty() && self.width + visible > self.max_width {
            self.flush();
        }
        if self.line.is_empty() && visible > self.max_width {
            return self.push_chars(segment);
        }
        self.width += self.measure.text_width(segment, self.font)?;
        self.line.push_str(segment);
        Ok(())
    }

    /// Break an over-wide segment between characters. Every line receives at
    /// least one character, so this always makes progress.
    fn push_chars(&mut self, segment: &str) -> Result<(), FolioError> {
        let mut buf = [0u8; 4];
        for ch in segment.chars() {
            let w = self.measure.text_width(ch.encode_utf8(&mut buf), self.font)?;
            if !ch.is_whitespace() && !self.line.is_empty() && self.width + w > self.max_width {
                self.flush();
            }
            self.line.push(ch);
            self.width += w;
        }
        Ok(())
    }
}

/// Wrap `text` into lines no wider than `max_width` (mm) in `font`.
///
/// Newlines always end a line and blank lines are kept. Empty text yields a
/// single empty line.
pub fn wrap_lines<M: Measure + ?Sized>(
    measure: &M,
    text: &str,
    font: &Font,
    max_width: f64,
) -> Result<Vec<String>, FolioError> {
    let mut filler = LineFiller {
        measure,
        font,
        max_width,
        lines: Vec::new(),
        line: String::new(),
        width: 0.0,
    };

    let mut start = 0;
    for (end, opportunity) in linebreaks(text) {
        let raw = &text[start..end];
        start = end;
        let hard = opportunity == BreakOpportunity::Mandatory && raw.ends_with(is_newline);
        filler.push_segment(raw.trim_end_matches(is_newline))?;
        if hard {
            filler.flush();
        }
    }

    if !filler.line.is_empty() || filler.lines.is_empty() {
        filler.flush();
    }
    Ok(filler.lines)
}

/// Dry run: how many lines `text` takes at `max_width`. Nothing is painted.
pub fn measure<M: Measure + ?Sized>(
    measure: &M,
    text: &str,
    font: &Font,
    max_width: f64,
) -> Result<usize, FolioError> {
    Ok(wrap_lines(measure, text, font, max_width)?.len())
}

/// Height of a block of `line_count` lines plus vertical padding.
pub fn block_height(line_count: usize, line_height: f64, vertical_padding: f64) -> f64 {
    line_count as f64 * line_height + vertical_padding
}

/// Shorten single-line text to fit `max_width`, marking the cut with an
/// ellipsis. Text that fits is returned unchanged.
pub fn fit_line<M: Measure + ?Sized>(
    measure: &M,
    text: &str,
    font: &Font,
    max_width: f64,
) -> Result<String, FolioError> {
    if measure.text_width(text, font)? <= max_width {
        return Ok(text.to_string());
    }
    let mut chars: Vec<char> = text.chars().collect();
    while !chars.is_empty() {
        chars.pop();
        let candidate: String = chars.iter().collect::<String>().trim_end().to_string() + ELLIPSIS;
        if measure.text_width(&candidate, font)? <= max_width {
            return Ok(candidate);
        }
    }
    Ok(String::new())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font::FontContext;

    fn ctx() -> FontContext {
        FontContext::new()
    }

    fn body() -> Font {
        Font::sans(9.5)
    }

    #[test]
    fn test_single_line() {
        let lines = wrap_lines(&ctx(), "Hello World", &body(), 100.0).unwrap();
        assert_eq!(lines, vec!["Hello World"]);
    }

    #[test]
    fn test_line_break_at_space() {
        let ctx = ctx();
        let width = ctx.text_width("World", &body()).unwrap() + 1.0;
        let lines = wrap_lines(&ctx, "Hello World", &body(), width).unwrap();
        assert_eq!(lines, vec!["Hello", "World"]);
    }

    #[test]
    fn test_explicit_newline_and_blank_line() {
        let lines = wrap_lines(&ctx(), "one\n\ntwo", &body(), 100.0).unwrap();
        assert_eq!(lines, vec!["one", "", "two"]);
    }

    #[test]
    fn test_empty_string_is_one_line() {
        let lines = wrap_lines(&ctx(), "", &body(), 100.0).unwrap();
        assert_eq!(lines, vec![""]);
        assert_eq!(measure(&ctx(), "", &body(), 100.0).unwrap(), 1);
    }

    #[test]
    fn test_long_word_is_broken() {
        let ctx = ctx();
        let font = Font::mono(10.0);
        // 10 Courier glyphs at 10pt are ~21.2mm wide
        let lines = wrap_lines(&ctx, "abcdefghij", &font, 10.0).unwrap();
        assert!(lines.len() > 1);
        assert_eq!(lines.concat(), "abcdefghij");
        for line in &lines {
            assert!(ctx.text_width(line, &font).unwrap() <= 10.0);
        }
    }

    #[test]
    fn test_no_line_exceeds_width() {
        let ctx = ctx();
        let text = "The login endpoint performs no input sanitization or parameterized \
                    queries. Successful exploitation exposes 2,847 user records.";
        for width in [20.0, 45.0, 80.0, 170.0] {
            for line in wrap_lines(&ctx, text, &body(), width).unwrap() {
                assert!(ctx.text_width(&line, &body()).unwrap() <= width, "{line:?} @ {width}");
            }
        }
    }

    #[test]
    fn test_measure_matches_wrap() {
        let ctx = ctx();
        let text = "Use parameterized queries or prepared statements in all database interactions.";
        let lines = wrap_lines(&ctx, text, &body(), 40.0).unwrap();
        assert_eq!(measure(&ctx, text, &body(), 40.0).unwrap(), lines.len());
        assert_eq!(block_height(lines.len(), 5.5, 4.0), lines.len() as f64 * 5.5 + 4.0);
    }

    #[test]
    fn test_fit_line_truncates() {
        let ctx = ctx();
        let font = Font::sans(8.5);
        let text = "192.168.1.100:8080/manager/html/very/long/path";
        let fitted = fit_line(&ctx, text, &font, 20.0).unwrap();
        assert!(fitted.ends_with("..."));
        assert!(ctx.text_width(&fitted, &font).unwrap() <= 20.0);
        assert_eq!(fit_line(&ctx, "short", &font, 20.0).unwrap(), "short");
    }
}
