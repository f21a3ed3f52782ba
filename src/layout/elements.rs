//! # Element Builders
//!
//! Each builder takes primitive values (text, a style, a number), measures
//! itself, asks the page for room and paints. None of them knows about
//! findings or compliance entries; the report assembler maps input records
//! onto these.
//!
//! Atomic builders (cards and code blocks that fit on a page, table rows,
//! badges, score bars) call [`ensure_space`] once with their full height and
//! then paint. Cards and code blocks taller than a page are split between
//! lines into framed chunks that each fit. Prose is gated line by line, so a
//! paragraph may continue on the next page but a single line never straddles
//! a break.

use crate::draw::{DrawCommand, Rect, Stroke, Surface};
use crate::error::FolioError;
use crate::font::Font;
use crate::layout::page_break::{decide_split, ensure_space, BreakDecision};
use crate::layout::{Canvas, ElementKind, EPSILON};
use crate::style::{self, palette, size, BadgeStyle, Color};
use crate::text::{block_height, TextRun, CELL_PADDING};

pub const BODY_LINE: f64 = 5.5;
const PARAGRAPH_GAP: f64 = 1.0;
const BULLET_INDENT: f64 = 5.0;
const BULLET: &str = "\u{2022}";

pub const BADGE_HEIGHT: f64 = 5.5;
const BADGE_PADDING: f64 = 3.0;

pub const CODE_LINE: f64 = 4.5;
pub const CODE_PADDING: f64 = 4.0;
const CODE_GAP_AFTER: f64 = 2.0;
const CODE_MIN_ORPHAN: usize = 3;
const CODE_MIN_WIDOW: usize = 3;
const TAB: &str = "    ";

const CARD_HEADER: f64 = 7.0;
const CARD_BOTTOM_PADDING: f64 = 4.0;
const CARD_BODY_INSET: f64 = 5.0;
const CARD_GAP: f64 = 3.0;
const CARD_CONTINUED_TOP: f64 = 3.0;
const CARD_MIN_ORPHAN: usize = 2;
const CARD_MIN_WIDOW: usize = 2;

const DIVIDER_BEFORE: f64 = 2.0;
const DIVIDER_AFTER: f64 = 3.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeadingLevel {
    /// Section title on a dark band.
    Section,
    /// Underlined subsection title.
    Subsection,
    Minor,
}

struct HeadingMetrics {
    gap_before: f64,
    height: f64,
    gap_after: f64,
    size: f64,
}

impl HeadingLevel {
    fn metrics(&self) -> HeadingMetrics {
        match self {
            HeadingLevel::Section => HeadingMetrics {
                gap_before: 4.0,
                height: 9.0,
                gap_after: 2.0,
                size: size::H1,
            },
            HeadingLevel::Subsection => HeadingMetrics {
                gap_before: 3.0,
                height: 7.0,
                gap_after: 1.0,
                size: size::H2,
            },
            HeadingLevel::Minor => HeadingMetrics {
                gap_before: 2.0,
                height: 6.0,
                gap_after: 0.0,
                size: size::H3,
            },
        }
    }
}

/// Font, leading and colour of a run of prose.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub font: Font,
    pub line_height: f64,
    pub color: Color,
}

impl TextStyle {
    pub fn body() -> Self {
        Self {
            font: Font::sans(size::BODY),
            line_height: BODY_LINE,
            color: palette::MID,
        }
    }

    pub fn small() -> Self {
        Self {
            font: Font::sans(size::SMALL),
            line_height: 4.5,
            color: palette::SLATE,
        }
    }
}

/// Geometry of a key/value row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KeyValueStyle {
    pub key_width: f64,
    pub height: f64,
    pub size: f64,
}

pub const KV_ROW: KeyValueStyle = KeyValueStyle {
    key_width: 48.0,
    height: 6.5,
    size: size::KV,
};

pub const COVER_ROW: KeyValueStyle = KeyValueStyle {
    key_width: 50.0,
    height: 7.0,
    size: 9.5,
};

fn centered_x<S: Surface>(
    canvas: &Canvas<S>,
    text: &str,
    font: &Font,
    x: f64,
    width: f64,
) -> Result<f64, FolioError> {
    Ok(x + (width - canvas.text_width(text, font)?) / 2.0)
}

/// A heading. Kept together with at least one line of what follows it.
pub fn heading<S: Surface>(
    canvas: &mut Canvas<S>,
    level: HeadingLevel,
    text: &str,
) -> Result<(), FolioError> {
    heading_with(canvas, level, text, BODY_LINE)
}

/// A heading kept together with the first `next` mm of what follows it,
/// typically the lead height of a card or code block.
pub fn heading_with<S: Surface>(
    canvas: &mut Canvas<S>,
    level: HeadingLevel,
    text: &str,
    next: f64,
) -> Result<(), FolioError> {
    let m = level.metrics();
    let own = m.gap_before + m.height + m.gap_after;
    // what cannot share a page with the heading anyway is not reserved
    let keep = next.min(canvas.metrics().content_height() - own).max(0.0);
    ensure_space(canvas, own + keep)?;
    if !canvas.at_page_top() {
        canvas.advance(m.gap_before);
    }

    let (x, y, w) = (canvas.left(), canvas.y(), canvas.content_width());
    let font = Font::sans_bold(m.size);
    match level {
        HeadingLevel::Section => {
            let label = canvas.fit_line(text, &font, w - 6.0)?;
            canvas.paint(DrawCommand::fill(Rect::new(x, y, w, m.height), palette::BLUE_DARK))?;
            canvas.text(x + 3.0, y, m.height, TextRun::new(label, font), palette::WHITE)?;
        }
        HeadingLevel::Subsection => {
            let label = canvas.fit_line(text, &font, w - 2.0 * CELL_PADDING)?;
            canvas.text(x + CELL_PADDING, y, m.height, TextRun::new(label, font), palette::BLUE)?;
            canvas.paint(DrawCommand::Line {
                from: (x, y + m.height),
                to: (x + w, y + m.height),
                stroke: Stroke {
                    color: palette::BLUE_LITE,
                    width: 0.4,
                },
            })?;
        }
        HeadingLevel::Minor => {
            let label = canvas.fit_line(text, &font, w - 2.0 * CELL_PADDING)?;
            canvas.text(x + CELL_PADDING, y, m.height, TextRun::new(label, font), palette::MID)?;
        }
    }
    canvas.record(ElementKind::Heading, y, m.height);
    canvas.advance(m.height + m.gap_after);
    Ok(())
}

/// Paint pre-wrapped lines at `x`, each gated through [`ensure_space`].
/// The marker, if any, is painted beside the first line.
fn text_lines<S: Surface>(
    canvas: &mut Canvas<S>,
    lines: &[String],
    style: TextStyle,
    x: f64,
    marker: Option<(f64, &str, Color)>,
) -> Result<(), FolioError> {
    for (i, line) in lines.iter().enumerate() {
        ensure_space(canvas, style.line_height)?;
        let y = canvas.y();
        if let (0, Some((mx, text, color))) = (i, marker) {
            canvas.text(mx, y, style.line_height, TextRun::new(text, style.font), color)?;
        }
        if !line.is_empty() {
            canvas.text(x, y, style.line_height, TextRun::new(line.as_str(), style.font), style.color)?;
        }
        canvas.record(ElementKind::TextLine, y, style.line_height);
        canvas.advance(style.line_height);
    }
    Ok(())
}

/// Wrapped prose starting `indent` mm from the left margin. Returns the
/// number of lines painted.
pub fn paragraph<S: Surface>(
    canvas: &mut Canvas<S>,
    text: &str,
    style: TextStyle,
    indent: f64,
) -> Result<usize, FolioError> {
    let width = canvas.content_width() - indent - 2.0 * CELL_PADDING;
    let lines = canvas.wrap(text, &style.font, width)?;
    let x = canvas.left() + indent + CELL_PADDING;
    text_lines(canvas, &lines, style, x, None)?;
    Ok(lines.len())
}

/// A body paragraph followed by a small gap.
pub fn body<S: Surface>(canvas: &mut Canvas<S>, text: &str, indent: f64) -> Result<(), FolioError> {
    paragraph(canvas, text, TextStyle::body(), indent)?;
    canvas.advance(PARAGRAPH_GAP);
    Ok(())
}

/// A bulleted item; continuation lines hang under the text, not the marker.
pub fn bullet<S: Surface>(canvas: &mut Canvas<S>, text: &str, indent: f64) -> Result<(), FolioError> {
    let style = TextStyle::body();
    let width = canvas.content_width() - indent - BULLET_INDENT - 2.0 * CELL_PADDING;
    let lines = canvas.wrap(text, &style.font, width)?;
    let marker_x = canvas.left() + indent;
    let x = marker_x + BULLET_INDENT + CELL_PADDING;
    text_lines(canvas, &lines, style, x, Some((marker_x, BULLET, palette::BLUE)))
}

/// A key/value row. Striping is decided by the caller.
pub fn kv_row<S: Surface>(
    canvas: &mut Canvas<S>,
    key: &str,
    value: &str,
    striped: bool,
    style: KeyValueStyle,
) -> Result<(), FolioError> {
    ensure_space(canvas, style.height)?;
    let (x, y, w) = (canvas.left(), canvas.y(), canvas.content_width());
    let bg = if striped { palette::LIGHT } else { palette::WHITE };
    canvas.paint(DrawCommand::fill(Rect::new(x, y, w, style.height), bg))?;

    let key_font = Font::sans_bold(style.size);
    let key = canvas.fit_line(key, &key_font, style.key_width - 2.0 * CELL_PADDING)?;
    canvas.text(x + CELL_PADDING, y, style.height, TextRun::new(key, key_font), palette::MID)?;

    let value_font = Font::sans(style.size);
    let value_width = w - style.key_width - 2.0 * CELL_PADDING;
    let value = canvas.fit_line(value, &value_font, value_width)?;
    canvas.text(
        x + style.key_width + CELL_PADDING,
        y,
        style.height,
        TextRun::new(value, value_font),
        palette::DARK,
    )?;

    canvas.record(ElementKind::KeyValueRow, y, style.height);
    canvas.advance(style.height);
    Ok(())
}

/// Width a badge with this label takes.
pub fn badge_width<S: Surface>(canvas: &Canvas<S>, style: &BadgeStyle) -> Result<f64, FolioError> {
    Ok(canvas.text_width(&style.label, &Font::sans_bold(size::BADGE))? + 2.0 * BADGE_PADDING)
}

/// A coloured label at (x, y). Inline: the cursor does not move. Returns the
/// badge width.
pub fn badge<S: Surface>(
    canvas: &mut Canvas<S>,
    x: f64,
    y: f64,
    style: &BadgeStyle,
) -> Result<f64, FolioError> {
    let width = badge_width(canvas, style)?;
    canvas.paint(DrawCommand::fill(Rect::new(x, y, width, BADGE_HEIGHT), style.bg))?;
    canvas.text(
        x + BADGE_PADDING,
        y,
        BADGE_HEIGHT,
        TextRun::new(style.label.as_str(), Font::sans_bold(size::BADGE)),
        style.fg,
    )?;
    canvas.record(ElementKind::Badge, y, BADGE_HEIGHT);
    Ok(width)
}

/// Filled width of a score bar. The score is clamped to 0..=100; NaN reads
/// as 0.
pub fn fill_width(score: f64, bar_width: f64) -> f64 {
    if score.is_nan() {
        return 0.0;
    }
    score.clamp(0.0, 100.0) * bar_width / 100.0
}

/// A horizontal bar filled in proportion to `score`, with the score printed
/// at the end of the fill. Inline: the cursor does not move.
pub fn score_bar<S: Surface>(
    canvas: &mut Canvas<S>,
    x: f64,
    y: f64,
    score: f64,
    width: f64,
    height: f64,
) -> Result<(), FolioError> {
    let score = if score.is_nan() { 0.0 } else { score.clamp(0.0, 100.0) };
    canvas.paint(DrawCommand::fill(Rect::new(x, y, width, height), palette::LIGHT))?;
    let filled = fill_width(score, width);
    if filled > 0.0 {
        canvas.paint(DrawCommand::fill(
            Rect::new(x, y, filled, height),
            style::score_fill(score),
        ))?;
    }

    let font = Font::sans_bold(size::SCORE_LABEL);
    let label = format!("{score:.0}/100");
    let label_width = canvas.text_width(&label, &font)?;
    let label_x = (x + filled - label_width - 1.5).max(x + 1.5);
    // a label that spills past the fill sits on the light track
    let color = if label_x + label_width <= x + filled {
        style::score_label(score)
    } else {
        palette::DARK
    };
    canvas.text(label_x, y, height, TextRun::new(label, font), color)?;
    canvas.record(ElementKind::ScoreBar, y, height);
    Ok(())
}

/// Display rows of a code block: source lines split on `\n` verbatim (a
/// trailing newline keeps its empty row), tabs expanded, with lines wider
/// than the block wrapped.
pub fn code_rows<S: Surface>(
    canvas: &Canvas<S>,
    code: &str,
    width: f64,
) -> Result<Vec<String>, FolioError> {
    let font = Font::mono(size::CODE);
    let mut rows = Vec::new();
    for line in code.split('\n') {
        let line = line.strip_suffix('\r').unwrap_or(line).replace('\t', TAB);
        if canvas.text_width(&line, &font)? <= width {
            rows.push(line);
        } else {
            rows.extend(canvas.wrap(&line, &font, width)?);
        }
    }
    Ok(rows)
}

/// Height the code block needs below a heading that is kept with it: the
/// whole block, or its smallest first chunk when it is split.
pub fn code_block_lead<S: Surface>(canvas: &Canvas<S>, code: &str) -> Result<f64, FolioError> {
    let rows = code_rows(canvas, code, canvas.content_width() - 2.0 * CODE_PADDING)?;
    let full = block_height(rows.len(), CODE_LINE, 2.0 * CODE_PADDING);
    if full <= canvas.metrics().content_height() + EPSILON {
        Ok(full)
    } else {
        Ok(block_height(CODE_MIN_ORPHAN, CODE_LINE, 2.0 * CODE_PADDING))
    }
}

/// A dark monospace block with an optional language tag.
///
/// A block that fits on one page is atomic. A longer one is split between
/// lines into page-sized chunks; only the first chunk carries the tag.
pub fn code_block<S: Surface>(
    canvas: &mut Canvas<S>,
    code: &str,
    language: &str,
) -> Result<(), FolioError> {
    let inner = canvas.content_width() - 2.0 * CODE_PADDING;
    let rows = code_rows(canvas, code, inner)?;
    let page_capacity = canvas.metrics().content_height();

    let mut rest: &[String] = &rows;
    let mut tag = Some(language).filter(|l| !l.is_empty());
    while !rest.is_empty() {
        let full = block_height(rest.len(), CODE_LINE, 2.0 * CODE_PADDING);
        let take = if full <= page_capacity + EPSILON {
            ensure_space(canvas, full)?;
            rest.len()
        } else {
            let heights = vec![CODE_LINE; rest.len()];
            let available = canvas.remaining_height() - 2.0 * CODE_PADDING;
            match decide_split(available, &heights, CODE_MIN_ORPHAN, CODE_MIN_WIDOW) {
                BreakDecision::MoveToNextPage if !canvas.at_page_top() => {
                    canvas.advance_page()?;
                    continue;
                }
                BreakDecision::Split {
                    items_on_current_page,
                } => items_on_current_page,
                _ => lines_per_page(page_capacity).min(rest.len()),
            }
        };
        let (chunk, remainder) = rest.split_at(take);
        paint_code_chunk(canvas, chunk, tag.take())?;
        rest = remainder;
    }
    canvas.advance(CODE_GAP_AFTER);
    Ok(())
}

fn lines_per_page(page_capacity: f64) -> usize {
    (((page_capacity - 2.0 * CODE_PADDING) / CODE_LINE).floor() as usize).max(1)
}

fn paint_code_chunk<S: Surface>(
    canvas: &mut Canvas<S>,
    rows: &[String],
    tag: Option<&str>,
) -> Result<(), FolioError> {
    let (x, y, w) = (canvas.left(), canvas.y(), canvas.content_width());
    let height = block_height(rows.len(), CODE_LINE, 2.0 * CODE_PADDING);
    canvas.paint(DrawCommand::fill(Rect::new(x, y, w, height), palette::CODE_BG))?;

    if let Some(tag) = tag {
        let font = Font::mono(size::CODE_TAG);
        let tag_width = canvas.text_width(tag, &font)?;
        canvas.text(
            x + w - CODE_PADDING - tag_width,
            y + 0.5,
            CODE_PADDING - 0.5,
            TextRun::new(tag, font),
            palette::SLATE,
        )?;
    }

    let font = Font::mono(size::CODE);
    for (i, row) in rows.iter().enumerate() {
        if row.is_empty() {
            continue;
        }
        canvas.text(
            x + CODE_PADDING,
            y + CODE_PADDING + i as f64 * CODE_LINE,
            CODE_LINE,
            TextRun::new(row.as_str(), font),
            palette::CODE_FG,
        )?;
    }
    canvas.record(ElementKind::CodeBlock, y, height);
    canvas.advance(height);
    Ok(())
}

/// A thin rule across the content width.
pub fn divider<S: Surface>(canvas: &mut Canvas<S>) -> Result<(), FolioError> {
    ensure_space(canvas, DIVIDER_BEFORE + DIVIDER_AFTER)?;
    canvas.advance(DIVIDER_BEFORE);
    let (x, y, w) = (canvas.left(), canvas.y(), canvas.content_width());
    canvas.paint(DrawCommand::Line {
        from: (x, y),
        to: (x + w, y),
        stroke: Stroke {
            color: palette::LIGHT,
            width: 0.3,
        },
    })?;
    canvas.record(ElementKind::Divider, y, 0.3);
    canvas.advance(DIVIDER_AFTER);
    Ok(())
}

/// A framed card: a header line (optional badge, title, optional right-hand
/// note) over a wrapped body.
#[derive(Debug, Clone)]
pub struct Card {
    /// `fg` strokes the frame, `bg` fills it.
    pub frame: BadgeStyle,
    pub badge: Option<BadgeStyle>,
    pub title: String,
    pub title_color: Color,
    pub aside: Option<String>,
    pub body: String,
}

/// One line of card content, positioned from the card's left edge.
struct CardLine {
    text: String,
    font: Font,
    color: Color,
    inset: f64,
    /// Space above the text, counted in `height`.
    lead: f64,
    height: f64,
    /// Bullet beside the line: inset and colour.
    marker: Option<(f64, Color)>,
}

impl CardLine {
    fn new(text: String, font: Font, color: Color, inset: f64, height: f64) -> Self {
        Self {
            text,
            font,
            color,
            inset,
            lead: 0.0,
            height,
            marker: None,
        }
    }
}

/// Frame colours and the fixed space above and below a card's lines.
struct CardFrame {
    fill: Color,
    stroke: Color,
    head: f64,
    bottom: f64,
}

impl CardFrame {
    fn top(&self, with_head: bool) -> f64 {
        if with_head {
            self.head
        } else {
            CARD_CONTINUED_TOP
        }
    }

    /// Height of the first piece the card places: the whole card when it
    /// fits on a page, otherwise the smallest chunk a split may leave.
    fn lead_height(&self, lines: &[CardLine], page_capacity: f64) -> f64 {
        let full = self.head + lines.iter().map(|l| l.height).sum::<f64>() + self.bottom;
        if full <= page_capacity + EPSILON {
            return full;
        }
        self.head
            + lines.iter().take(CARD_MIN_ORPHAN).map(|l| l.height).sum::<f64>()
            + self.bottom
    }
}

/// Place a card. One that fits on a page is atomic and moves whole. A taller
/// one is split between lines into framed chunks that each fit their page;
/// `paint_head` runs for the first chunk only.
fn place_card<S, F>(
    canvas: &mut Canvas<S>,
    frame: &CardFrame,
    lines: &[CardLine],
    paint_head: F,
) -> Result<(), FolioError>
where
    S: Surface,
    F: FnOnce(&mut Canvas<S>, Rect) -> Result<(), FolioError>,
{
    let page_capacity = canvas.metrics().content_height();
    let mut head = Some(paint_head);
    let mut rest = lines;
    loop {
        let top = frame.top(head.is_some());
        let heights: Vec<f64> = rest.iter().map(|l| l.height).collect();
        let needed = top + heights.iter().sum::<f64>() + frame.bottom;
        let take = if needed <= page_capacity + EPSILON {
            ensure_space(canvas, needed)?;
            rest.len()
        } else {
            let available = canvas.remaining_height() - top - frame.bottom;
            match decide_split(available, &heights, CARD_MIN_ORPHAN, CARD_MIN_WIDOW) {
                BreakDecision::MoveToNextPage if !canvas.at_page_top() => {
                    canvas.advance_page()?;
                    continue;
                }
                BreakDecision::Split {
                    items_on_current_page,
                } => items_on_current_page,
                _ => lines_fitting(&heights, page_capacity - top - frame.bottom),
            }
        };
        let (chunk, remainder) = rest.split_at(take);
        paint_card_chunk(canvas, frame, top, chunk, head.take())?;
        rest = remainder;
        if rest.is_empty() {
            break;
        }
        canvas.advance_page()?;
    }
    canvas.advance(CARD_GAP);
    Ok(())
}

fn lines_fitting(heights: &[f64], space: f64) -> usize {
    let mut used = 0.0;
    let mut count = 0;
    for &h in heights {
        if used + h > space + EPSILON {
            break;
        }
        used += h;
        count += 1;
    }
    count.max(1).min(heights.len())
}

fn paint_card_chunk<S, F>(
    canvas: &mut Canvas<S>,
    frame: &CardFrame,
    top: f64,
    lines: &[CardLine],
    paint_head: Option<F>,
) -> Result<(), FolioError>
where
    S: Surface,
    F: FnOnce(&mut Canvas<S>, Rect) -> Result<(), FolioError>,
{
    let (x, y, w) = (canvas.left(), canvas.y(), canvas.content_width());
    let height = top + lines.iter().map(|l| l.height).sum::<f64>() + frame.bottom;
    let rect = Rect::new(x, y, w, height);
    canvas.paint(DrawCommand::framed(
        rect,
        frame.fill,
        Stroke {
            color: frame.stroke,
            width: 0.5,
        },
    ))?;
    if let Some(paint_head) = paint_head {
        paint_head(canvas, rect)?;
    }

    let mut line_y = y + top;
    for line in lines {
        let text_y = line_y + line.lead;
        let text_height = line.height - line.lead;
        if let Some((inset, color)) = line.marker {
            canvas.text(x + inset, text_y, text_height, TextRun::new(BULLET, line.font), color)?;
        }
        if !line.text.is_empty() {
            canvas.text(
                x + line.inset,
                text_y,
                text_height,
                TextRun::new(line.text.as_str(), line.font),
                line.color,
            )?;
        }
        line_y += line.height;
    }

    canvas.record(ElementKind::Card, y, height);
    canvas.advance(height);
    Ok(())
}

fn card_frame(card: &Card) -> CardFrame {
    CardFrame {
        fill: card.frame.bg,
        stroke: card.frame.fg,
        head: CARD_HEADER,
        bottom: CARD_BOTTOM_PADDING,
    }
}

fn card_lines<S: Surface>(canvas: &Canvas<S>, card: &Card) -> Result<Vec<CardLine>, FolioError> {
    if card.body.is_empty() {
        return Ok(Vec::new());
    }
    let font = Font::sans(size::CARD_BODY);
    let width = canvas.content_width() - 2.0 * CARD_BODY_INSET - 2.0 * CELL_PADDING;
    Ok(canvas
        .wrap(&card.body, &font, width)?
        .into_iter()
        .map(|text| CardLine::new(text, font, palette::MID, CARD_BODY_INSET + CELL_PADDING, BODY_LINE))
        .collect())
}

/// Height the card needs below a heading that is kept with it.
pub fn card_lead<S: Surface>(canvas: &Canvas<S>, card: &Card) -> Result<f64, FolioError> {
    let lines = card_lines(canvas, card)?;
    Ok(card_frame(card).lead_height(&lines, canvas.metrics().content_height()))
}

/// Paint a card. The whole card moves to the next page if it does not fit;
/// a card taller than a page continues between body lines.
pub fn card<S: Surface>(canvas: &mut Canvas<S>, card: &Card) -> Result<(), FolioError> {
    let lines = card_lines(canvas, card)?;
    place_card(canvas, &card_frame(card), &lines, |canvas, rect| {
        card_header(canvas, card, rect)
    })
}

fn card_header<S: Surface>(canvas: &mut Canvas<S>, card: &Card, rect: Rect) -> Result<(), FolioError> {
    let (x, w) = (rect.x, rect.width);
    let header_y = rect.y + 1.5;
    let mut title_x = x + 3.0;
    if let Some(badge_style) = &card.badge {
        title_x += badge(canvas, title_x, header_y, badge_style)? + 2.0;
    }
    let mut title_right = x + w - 3.0;
    if let Some(aside) = &card.aside {
        let font = Font::sans_bold(size::KV);
        let aside_width = canvas.text_width(aside, &font)?;
        canvas.text(
            title_right - aside_width,
            header_y,
            BODY_LINE,
            TextRun::new(aside.as_str(), font),
            card.frame.fg,
        )?;
        title_right -= aside_width + 3.0;
    }
    let title_font = Font::sans_bold(size::BODY);
    let title = canvas.fit_line(&card.title, &title_font, title_right - title_x)?;
    canvas.text(title_x, header_y, BODY_LINE, TextRun::new(title, title_font), card.title_color)
}

/// A compliance card: regulation and status, a score bar, bulleted findings
/// and a references line.
#[derive(Debug, Clone)]
pub struct ComplianceCard {
    pub regulation: String,
    pub status: BadgeStyle,
    pub score: f64,
    pub items: Vec<String>,
    pub references: Vec<String>,
}

const COMPLIANCE_TOP: f64 = 1.5;
const COMPLIANCE_ROW: f64 = 7.0;
const COMPLIANCE_BOTTOM: f64 = 3.0;
const SCORE_BAR_WIDTH: f64 = 100.0;
const SCORE_BAR_HEIGHT: f64 = 4.5;

fn compliance_frame(card: &ComplianceCard) -> CardFrame {
    CardFrame {
        fill: palette::WHITE,
        stroke: card.status.fg,
        head: COMPLIANCE_TOP + 2.0 * COMPLIANCE_ROW,
        bottom: COMPLIANCE_BOTTOM,
    }
}

fn compliance_lines<S: Surface>(
    canvas: &Canvas<S>,
    card: &ComplianceCard,
) -> Result<Vec<CardLine>, FolioError> {
    let w = canvas.content_width();
    let mut lines = Vec::new();

    let item_font = Font::sans(size::CARD_BODY);
    let item_width = w - 10.0 - 3.0 - 2.0 * CELL_PADDING;
    for item in &card.items {
        for (i, text) in canvas.wrap(item, &item_font, item_width)?.into_iter().enumerate() {
            let mut line = CardLine::new(text, item_font, palette::MID, 10.0 + CELL_PADDING, BODY_LINE);
            if i == 0 {
                line.marker = Some((5.0, card.status.fg));
            }
            lines.push(line);
        }
    }

    if !card.references.is_empty() {
        let style = TextStyle::small();
        let text = format!("References: {}", card.references.join(" \u{00B7} "));
        let wrapped = canvas.wrap(&text, &style.font, w - 6.0 - 2.0 * CELL_PADDING)?;
        for (i, text) in wrapped.into_iter().enumerate() {
            let mut line = CardLine::new(text, style.font, style.color, 3.0 + CELL_PADDING, style.line_height);
            if i == 0 {
                line.lead = 1.0;
                line.height += 1.0;
            }
            lines.push(line);
        }
    }
    Ok(lines)
}

/// Height the compliance card needs below a heading that is kept with it.
pub fn compliance_card_lead<S: Surface>(
    canvas: &Canvas<S>,
    card: &ComplianceCard,
) -> Result<f64, FolioError> {
    let lines = compliance_lines(canvas, card)?;
    Ok(compliance_frame(card).lead_height(&lines, canvas.metrics().content_height()))
}

/// Paint a compliance card. Atomic like every card that fits on a page;
/// a longer one continues between its item and reference lines.
pub fn compliance_card<S: Surface>(
    canvas: &mut Canvas<S>,
    card: &ComplianceCard,
) -> Result<(), FolioError> {
    let lines = compliance_lines(canvas, card)?;
    place_card(canvas, &compliance_frame(card), &lines, |canvas, rect| {
        compliance_header(canvas, card, rect)
    })
}

fn compliance_header<S: Surface>(
    canvas: &mut Canvas<S>,
    card: &ComplianceCard,
    rect: Rect,
) -> Result<(), FolioError> {
    let (x, y, w) = (rect.x, rect.y, rect.width);
    canvas.paint(DrawCommand::fill(
        Rect::new(x, y, w, COMPLIANCE_TOP + COMPLIANCE_ROW),
        card.status.bg,
    ))?;

    // regulation left, status badge right
    let header_y = y + COMPLIANCE_TOP;
    let status_width = badge_width(canvas, &card.status)?;
    let title_font = Font::sans_bold(size::H3);
    let title = canvas.fit_line(&card.regulation, &title_font, w - status_width - 9.0)?;
    canvas.text(x + 3.0, header_y, COMPLIANCE_ROW, TextRun::new(title, title_font), card.status.fg)?;
    badge(
        canvas,
        x + w - 3.0 - status_width,
        header_y + (COMPLIANCE_ROW - BADGE_HEIGHT) / 2.0,
        &card.status,
    )?;

    let score_y = header_y + COMPLIANCE_ROW;
    canvas.text(
        x + 3.0,
        score_y,
        COMPLIANCE_ROW,
        TextRun::new("Compliance score", Font::sans(size::SMALL)),
        palette::SLATE,
    )?;
    score_bar(
        canvas,
        x + 40.0,
        score_y + (COMPLIANCE_ROW - SCORE_BAR_HEIGHT) / 2.0,
        card.score,
        SCORE_BAR_WIDTH,
        SCORE_BAR_HEIGHT,
    )
}

/// A cover tile: a big count over a label.
pub fn severity_tile<S: Surface>(
    canvas: &mut Canvas<S>,
    x: f64,
    y: f64,
    count: usize,
    style: &BadgeStyle,
) -> Result<(), FolioError> {
    const WIDTH: f64 = 38.0;
    const HEIGHT: f64 = 20.0;
    canvas.paint(DrawCommand::framed(
        Rect::new(x, y, WIDTH, HEIGHT),
        style.bg,
        Stroke {
            color: style.fg,
            width: 0.5,
        },
    ))?;
    let count_font = Font::sans_bold(size::TILE_COUNT);
    let count = count.to_string();
    let count_x = centered_x(canvas, &count, &count_font, x, WIDTH)?;
    canvas.text(count_x, y + 2.0, 10.0, TextRun::new(count, count_font), style.fg)?;

    let label_font = Font::sans_bold(size::BADGE);
    let label_x = centered_x(canvas, &style.label, &label_font, x, WIDTH)?;
    canvas.text(
        label_x,
        y + 12.0,
        6.0,
        TextRun::new(style.label.as_str(), label_font),
        style.fg,
    )?;
    canvas.record(ElementKind::SeverityTile, y, HEIGHT);
    Ok(())
}

/// Horizontal placement of text inside a table cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
}

#[derive(Debug, Clone)]
pub struct Column {
    pub title: String,
    /// Zero means "share whatever width the fixed columns leave".
    pub width: f64,
    pub align: Align,
}

impl Column {
    pub fn new(title: impl Into<String>, width: f64, align: Align) -> Self {
        Self {
            title: title.into(),
            width,
            align,
        }
    }
}

#[derive(Debug, Clone)]
pub enum Cell {
    Text(String),
    Bold(String),
    /// Label in the style's foreground over its background.
    Styled(BadgeStyle),
}

/// A table with a dark header row. Rows are atomic and gated one by one,
/// so a long table continues on the next page between rows. The header is
/// painted once and not repeated on continuation pages.
#[derive(Debug, Clone)]
pub struct Table {
    columns: Vec<Column>,
}

impl Table {
    pub const HEADER_HEIGHT: f64 = 7.0;
    pub const ROW_HEIGHT: f64 = 6.5;

    pub fn new(columns: Vec<Column>) -> Self {
        Self { columns }
    }

    fn widths(&self, total: f64) -> Vec<f64> {
        let fixed: f64 = self.columns.iter().map(|c| c.width).sum();
        let flexible = self.columns.iter().filter(|c| c.width <= 0.0).count();
        let share = if flexible > 0 {
            ((total - fixed) / flexible as f64).max(0.0)
        } else {
            0.0
        };
        self.columns
            .iter()
            .map(|c| if c.width <= 0.0 { share } else { c.width })
            .collect()
    }

    /// Paint the header row, keeping it with the first body row.
    pub fn header<S: Surface>(&self, canvas: &mut Canvas<S>) -> Result<(), FolioError> {
        ensure_space(canvas, Self::HEADER_HEIGHT + Self::ROW_HEIGHT)?;
        let (x, y, w) = (canvas.left(), canvas.y(), canvas.content_width());
        canvas.paint(DrawCommand::fill(
            Rect::new(x, y, w, Self::HEADER_HEIGHT),
            palette::DARK,
        ))?;
        let font = Font::sans_bold(size::TABLE_HEADER);
        let mut cell_x = x;
        for (column, width) in self.columns.iter().zip(self.widths(w)) {
            let title = canvas.fit_line(&column.title, &font, width - 2.0 * CELL_PADDING)?;
            let text_x = match column.align {
                Align::Left => cell_x + CELL_PADDING,
                Align::Center => centered_x(canvas, &title, &font, cell_x, width)?,
            };
            canvas.text(text_x, y, Self::HEADER_HEIGHT, TextRun::new(title, font), palette::WHITE)?;
            cell_x += width;
        }
        canvas.record(ElementKind::TableHeader, y, Self::HEADER_HEIGHT);
        canvas.advance(Self::HEADER_HEIGHT);
        Ok(())
    }

    /// Paint one body row. Text that does not fit its cell is truncated.
    pub fn row<S: Surface>(
        &self,
        canvas: &mut Canvas<S>,
        cells: &[Cell],
        striped: bool,
    ) -> Result<(), FolioError> {
        ensure_space(canvas, Self::ROW_HEIGHT)?;
        let (x, y, w) = (canvas.left(), canvas.y(), canvas.content_width());
        if striped {
            canvas.paint(DrawCommand::fill(
                Rect::new(x, y, w, Self::ROW_HEIGHT),
                palette::LIGHT,
            ))?;
        }

        let mut cell_x = x;
        for ((cell, column), width) in cells.iter().zip(&self.columns).zip(self.widths(w)) {
            let (text, font, color) = match cell {
                Cell::Text(text) => (text.as_str(), Font::sans(size::TABLE), palette::DARK),
                Cell::Bold(text) => (text.as_str(), Font::sans_bold(size::TABLE), palette::DARK),
                Cell::Styled(style) => {
                    canvas.paint(DrawCommand::fill(
                        Rect::new(cell_x, y, width, Self::ROW_HEIGHT),
                        style.bg,
                    ))?;
                    (style.label.as_str(), Font::sans_bold(size::TABLE), style.fg)
                }
            };
            let text = canvas.fit_line(text, &font, width - 2.0 * CELL_PADDING)?;
            let text_x = match column.align {
                Align::Left => cell_x + CELL_PADDING,
                Align::Center => centered_x(canvas, &text, &font, cell_x, width)?,
            };
            canvas.text(text_x, y, Self::ROW_HEIGHT, TextRun::new(text, font), color)?;
            cell_x += width;
        }
        canvas.record(ElementKind::TableRow, y, Self::ROW_HEIGHT);
        canvas.advance(Self::ROW_HEIGHT);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::tests::canvas;
    use crate::layout::Placement;
    use crate::model::Severity;
    use crate::pdf::PdfSurface;

    fn placements(canvas: &Canvas<PdfSurface>, kind: ElementKind) -> Vec<Placement> {
        canvas.trace().iter().filter(|p| p.kind == kind).copied().collect()
    }

    fn within_page(canvas: &Canvas<PdfSurface>, p: &Placement) -> bool {
        let m = canvas.metrics();
        p.y >= m.content_top() - EPSILON && p.bottom() <= m.content_bottom() + EPSILON
    }

    #[test]
    fn heading_records_and_advances() {
        let mut canvas = canvas();
        heading(&mut canvas, HeadingLevel::Section, "1. Overview").unwrap();
        let headings = placements(&canvas, ElementKind::Heading);
        assert_eq!(headings.len(), 1);
        // no leading gap at the top of a page
        assert_eq!(headings[0].y, 18.0);
        assert_eq!(canvas.y(), 18.0 + 9.0 + 2.0);
        let band = canvas.surface().pages()[0].commands.iter().any(|c| {
            matches!(c, DrawCommand::Rect { fill: Some(color), .. } if *color == palette::BLUE_DARK)
        });
        assert!(band);
    }

    #[test]
    fn heading_is_not_orphaned() {
        let mut canvas = canvas();
        canvas.advance(255.0);
        heading(&mut canvas, HeadingLevel::Subsection, "Findings").unwrap();
        assert_eq!(placements(&canvas, ElementKind::Heading)[0].page, 2);
    }

    #[test]
    fn paragraph_continues_across_pages_between_lines() {
        let mut canvas = canvas();
        canvas.advance(245.0);
        let text = "Weak credentials on the management interface. ".repeat(40);
        let lines = paragraph(&mut canvas, &text, TextStyle::body(), 0.0).unwrap();
        let placed = placements(&canvas, ElementKind::TextLine);
        assert_eq!(placed.len(), lines);
        assert!(placed.iter().any(|p| p.page == 1));
        assert!(placed.iter().any(|p| p.page == 2));
        assert!(placed.iter().all(|p| within_page(&canvas, p)));
    }

    #[test]
    fn bullet_marker_only_on_first_line() {
        let mut canvas = canvas();
        let text = "Enforce parameterized queries across every data access path. ".repeat(4);
        bullet(&mut canvas, &text, 0.0).unwrap();
        let markers = canvas.surface().pages()[0]
            .commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Text { run, .. } if run.text == BULLET))
            .count();
        assert_eq!(markers, 1);
        assert!(placements(&canvas, ElementKind::TextLine).len() > 1);
    }

    #[test]
    fn kv_row_striping_follows_caller() {
        let mut canvas = canvas();
        kv_row(&mut canvas, "Target", "10.0.0.1", true, KV_ROW).unwrap();
        kv_row(&mut canvas, "Session", "abcd1234", false, KV_ROW).unwrap();
        let fills: Vec<Color> = canvas.surface().pages()[0]
            .commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Rect { fill: Some(color), .. } => Some(*color),
                _ => None,
            })
            .collect();
        assert_eq!(fills, vec![palette::LIGHT, palette::WHITE]);
        assert_eq!(canvas.y(), 18.0 + 13.0);
    }

    #[test]
    fn badge_width_is_text_plus_padding() {
        let mut canvas = canvas();
        let style = style::severity_style(&Severity::Critical);
        let text = canvas.text_width("Critical", &Font::sans_bold(size::BADGE)).unwrap();
        let width = badge(&mut canvas, 18.0, 30.0, &style).unwrap();
        assert!((width - (text + 6.0)).abs() < 1e-9);
        // inline
        assert_eq!(canvas.y(), 18.0);
    }

    #[test]
    fn fill_width_is_clamped() {
        assert_eq!(fill_width(0.0, 100.0), 0.0);
        assert_eq!(fill_width(35.0, 100.0), 35.0);
        assert_eq!(fill_width(100.0, 100.0), 100.0);
        assert_eq!(fill_width(150.0, 100.0), 100.0);
        assert_eq!(fill_width(-5.0, 100.0), 0.0);
        assert_eq!(fill_width(f64::NAN, 100.0), 0.0);
        assert_eq!(fill_width(50.0, 80.0), 40.0);
    }

    #[test]
    fn score_bar_fill_colour_and_width() {
        let mut canvas = canvas();
        score_bar(&mut canvas, 40.0, 30.0, 35.0, 100.0, 4.5).unwrap();
        let fill = canvas.surface().pages()[0].commands.iter().find_map(|c| match c {
            DrawCommand::Rect {
                rect,
                fill: Some(color),
                ..
            } if *color == palette::RED => Some(rect.width),
            _ => None,
        });
        assert_eq!(fill, Some(35.0));
        assert_eq!(placements(&canvas, ElementKind::ScoreBar).len(), 1);
    }

    #[test]
    fn short_code_block_is_one_chunk() {
        let mut canvas = canvas();
        code_block(&mut canvas, "fn main() {\n    run();\n}", "rust").unwrap();
        let blocks = placements(&canvas, ElementKind::CodeBlock);
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].height, 3.0 * CODE_LINE + 2.0 * CODE_PADDING);
    }

    #[test]
    fn code_block_moves_whole_when_it_fits_a_page() {
        let mut canvas = canvas();
        canvas.advance(230.0);
        let code = "SELECT 1;\n".repeat(20);
        code_block(&mut canvas, &code, "sql").unwrap();
        let blocks = placements(&canvas, ElementKind::CodeBlock);
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].page, 2);
    }

    #[test]
    fn oversized_code_block_is_chunked() {
        let mut canvas = canvas();
        canvas.advance(100.0);
        let code: String = (0..200).map(|i| format!("line {i}\n")).collect();
        code_block(&mut canvas, &code, "python").unwrap();

        let blocks = placements(&canvas, ElementKind::CodeBlock);
        assert!(blocks.len() > 1);
        assert!(blocks.iter().all(|p| within_page(&canvas, p)));
        let rows: f64 = blocks
            .iter()
            .map(|p| (p.height - 2.0 * CODE_PADDING) / CODE_LINE)
            .sum();
        // the trailing newline keeps its empty row
        assert!((rows - 201.0).abs() < 1e-6);

        let tags: usize = canvas
            .surface()
            .pages()
            .iter()
            .flat_map(|p| &p.commands)
            .filter(|c| matches!(c, DrawCommand::Text { run, .. } if run.text == "python"))
            .count();
        assert_eq!(tags, 1);
    }

    #[test]
    fn code_rows_split_on_newlines_only() {
        let canvas = canvas();
        let rows = code_rows(&canvas, "a = 1\r\nb = 2\n\tc = 3\n", 100.0).unwrap();
        assert_eq!(rows, vec!["a = 1", "b = 2", "    c = 3", ""]);
        assert_eq!(code_rows(&canvas, "", 100.0).unwrap(), vec![""]);
    }

    #[test]
    fn code_block_lead_is_first_chunk_when_oversized() {
        let canvas = canvas();
        let short = code_block_lead(&canvas, "a\nb").unwrap();
        assert_eq!(short, 2.0 * CODE_LINE + 2.0 * CODE_PADDING);
        let long: String = (0..200).map(|i| format!("line {i}\n")).collect();
        let lead = code_block_lead(&canvas, &long).unwrap();
        assert_eq!(lead, CODE_MIN_ORPHAN as f64 * CODE_LINE + 2.0 * CODE_PADDING);
    }

    fn pattern_card(body: String) -> Card {
        let pattern = style::pattern_style(crate::model::PatternKind::Negative);
        Card {
            frame: pattern.clone(),
            badge: None,
            title: format!("{}  Plaintext credentials", pattern.label),
            title_color: pattern.fg,
            aside: None,
            body,
        }
    }

    fn all_texts(canvas: &Canvas<PdfSurface>) -> Vec<TextRun> {
        canvas
            .surface()
            .pages()
            .iter()
            .flat_map(|p| &p.commands)
            .filter_map(|c| match c {
                DrawCommand::Text { run, .. } => Some(run.clone()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn heading_stays_with_the_card_below_it() {
        let mut canvas = canvas();
        canvas.advance(235.0);
        let c = pattern_card("Credentials were found in a world-readable configuration file. ".repeat(3));
        let lead = card_lead(&canvas, &c).unwrap();
        heading_with(&mut canvas, HeadingLevel::Subsection, "Negative", lead).unwrap();
        card(&mut canvas, &c).unwrap();

        let heading = placements(&canvas, ElementKind::Heading)[0];
        let placed = placements(&canvas, ElementKind::Card)[0];
        assert_eq!(heading.page, 2);
        assert_eq!(placed.page, 2);
        assert_eq!(heading.y, 18.0);
    }

    #[test]
    fn heading_reserve_is_capped_at_a_page() {
        let mut canvas = canvas();
        heading_with(&mut canvas, HeadingLevel::Subsection, "Rules", 1000.0).unwrap();
        assert_eq!(placements(&canvas, ElementKind::Heading)[0].page, 1);
    }

    #[test]
    fn oversized_card_continues_between_lines() {
        let mut canvas = canvas();
        canvas.advance(100.0);
        let c = pattern_card("Credentials were found in a world-readable configuration file. ".repeat(120));
        let body_width = canvas.content_width() - 2.0 * CARD_BODY_INSET - 2.0 * CELL_PADDING;
        let body_font = Font::sans(size::CARD_BODY);
        let expected = canvas.wrap(&c.body, &body_font, body_width).unwrap().len();
        card(&mut canvas, &c).unwrap();

        let cards = placements(&canvas, ElementKind::Card);
        assert!(cards.len() >= 2);
        assert!(cards.iter().all(|p| within_page(&canvas, p)));
        assert_eq!(cards[0].page, 1);

        let texts = all_texts(&canvas);
        let titles = texts.iter().filter(|r| r.text.ends_with("Plaintext credentials")).count();
        assert_eq!(titles, 1);
        let body_lines = texts.iter().filter(|r| r.font == body_font).count();
        assert_eq!(body_lines, expected);
    }

    #[test]
    fn oversized_compliance_card_continues_between_items() {
        let mut canvas = canvas();
        let entry = ComplianceCard {
            regulation: "PCI DSS".into(),
            status: style::status_style(&crate::model::ComplianceStatus::AtRisk),
            score: 55.0,
            items: (0..70).map(|i| format!("Requirement {i} is not met")).collect(),
            references: vec!["Req. 6".into(), "Req. 8".into()],
        };
        compliance_card(&mut canvas, &entry).unwrap();

        let cards = placements(&canvas, ElementKind::Card);
        assert!(cards.len() >= 2);
        assert!(cards.iter().all(|p| within_page(&canvas, p)));
        assert_eq!(placements(&canvas, ElementKind::Badge).len(), 1);
        assert_eq!(placements(&canvas, ElementKind::ScoreBar).len(), 1);

        let texts = all_texts(&canvas);
        assert_eq!(texts.iter().filter(|r| r.text == BULLET).count(), 70);
        assert_eq!(texts.iter().filter(|r| r.text.starts_with("References:")).count(), 1);
    }

    #[test]
    fn card_moves_whole_to_next_page() {
        let mut canvas = canvas();
        canvas.advance(250.0);
        let pattern = style::pattern_style(crate::model::PatternKind::Negative);
        let c = Card {
            frame: pattern.clone(),
            badge: None,
            title: format!("{}  Plaintext credentials", pattern.label),
            title_color: pattern.fg,
            aside: None,
            body: "Credentials were found in a world-readable configuration file. ".repeat(3),
        };
        card(&mut canvas, &c).unwrap();
        let cards = placements(&canvas, ElementKind::Card);
        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].page, 2);
        assert_eq!(cards[0].y, 18.0);
    }

    #[test]
    fn compliance_card_is_atomic() {
        let mut canvas = canvas();
        canvas.advance(220.0);
        let entry = ComplianceCard {
            regulation: "GDPR".into(),
            status: style::status_style(&crate::model::ComplianceStatus::NonCompliant),
            score: 35.0,
            items: vec![
                "Personal data exposed through SQL injection".into(),
                "No breach notification procedure".into(),
                "Passwords stored with a weak hash".into(),
            ],
            references: vec!["Art. 5".into(), "Art. 32".into(), "Art. 33".into()],
        };
        compliance_card(&mut canvas, &entry).unwrap();
        let cards = placements(&canvas, ElementKind::Card);
        assert_eq!(cards.len(), 1);
        assert!(within_page(&canvas, &cards[0]));
        // nested badge and bar land on the same page as the card
        for kind in [ElementKind::Badge, ElementKind::ScoreBar] {
            assert_eq!(placements(&canvas, kind)[0].page, cards[0].page);
        }
    }

    #[test]
    fn table_continues_between_rows_without_repeating_header() {
        let mut canvas = canvas();
        let table = Table::new(vec![
            Column::new("#", 10.0, Align::Center),
            Column::new("Title", 0.0, Align::Left),
        ]);
        table.header(&mut canvas).unwrap();
        for i in 0..60 {
            table
                .row(&mut canvas, &[Cell::Text(i.to_string()), Cell::Text("Row".into())], i % 2 == 1)
                .unwrap();
        }
        assert_eq!(placements(&canvas, ElementKind::TableHeader).len(), 1);
        let rows = placements(&canvas, ElementKind::TableRow);
        assert_eq!(rows.len(), 60);
        assert!(rows.iter().all(|p| within_page(&canvas, p)));
        assert!(rows.last().map(|p| p.page).unwrap_or(0) >= 2);
    }

    #[test]
    fn flexible_column_takes_the_rest() {
        let table = Table::new(vec![
            Column::new("Severity", 40.0, Align::Left),
            Column::new("CVSS", 30.0, Align::Left),
            Column::new("Priority", 0.0, Align::Left),
        ]);
        assert_eq!(table.widths(174.0), vec![40.0, 30.0, 104.0]);
    }
}
