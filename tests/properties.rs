//! Property tests for the layout invariants.

use proptest::prelude::*;

use folio::font::{Font, FontContext};
use folio::layout::elements::{self, Card, TextStyle};
use folio::layout::{Canvas, ElementKind, PageChrome, PageMetrics};
use folio::model::PatternKind;
use folio::pdf::PdfSurface;
use folio::style;
use folio::text::{self, Measure};

fn canvas() -> Canvas<PdfSurface> {
    let chrome = PageChrome {
        header_text: "header".to_string(),
        footer_text: "footer".to_string(),
    };
    let mut canvas = Canvas::new(PdfSurface::new(), PageMetrics::a4(), chrome);
    canvas.begin_document().unwrap();
    canvas
}

fn prose() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 ,.:/()\n-]{0,400}"
}

proptest! {
    /// Property: measuring and wrapping agree, and no line is wider than the limit
    #[test]
    fn wrap_and_measure_agree(text in prose(), width in 5.0f64..180.0) {
        let ctx = FontContext::new();
        let font = Font::sans(9.5);
        let lines = text::wrap_lines(&ctx, &text, &font, width).unwrap();
        prop_assert_eq!(text::measure(&ctx, &text, &font, width).unwrap(), lines.len());
        for line in &lines {
            prop_assert!(ctx.text_width(line, &font).unwrap() <= width + 1e-9);
        }
    }

    /// Property: a painted paragraph occupies exactly its measured height
    #[test]
    fn painted_height_matches_measure(text in prose(), indent in 0.0f64..40.0) {
        let mut canvas = canvas();
        let style = TextStyle::body();
        let width = canvas.content_width() - indent - 2.0 * text::CELL_PADDING;
        let measured = canvas.measure(&text, &style.font, width).unwrap();

        let painted = elements::paragraph(&mut canvas, &text, style, indent).unwrap();
        let extent: f64 = canvas
            .trace()
            .iter()
            .filter(|p| p.kind == ElementKind::TextLine)
            .map(|p| p.height)
            .sum();

        prop_assert_eq!(painted, measured);
        prop_assert!((extent - measured as f64 * style.line_height).abs() < 1e-9);
    }

    /// Property: score bar fill grows with the score and spans [0, width]
    #[test]
    fn score_bar_is_monotonic(a in 0.0f64..=100.0, b in 0.0f64..=100.0, width in 1.0f64..300.0) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(elements::fill_width(lo, width) <= elements::fill_width(hi, width));
        prop_assert_eq!(elements::fill_width(0.0, width), 0.0);
        prop_assert!((elements::fill_width(100.0, width) - width).abs() < 1e-9);
    }

    /// Property: no card chunk straddles the bottom margin, wherever the card
    /// starts and however long its body is
    #[test]
    fn cards_never_straddle(offset in 0.0f64..255.0, repeats in 0usize..120) {
        let mut canvas = canvas();
        canvas.advance(offset);
        let pattern = style::pattern_style(PatternKind::Positive);
        let card = Card {
            frame: pattern.clone(),
            badge: None,
            title: format!("{}  Rate limiting held", pattern.label),
            title_color: pattern.fg,
            aside: None,
            body: "Repeated login attempts were throttled after five tries. ".repeat(repeats),
        };
        elements::card(&mut canvas, &card).unwrap();

        let bottom = canvas.metrics().content_bottom();
        let cards: Vec<_> = canvas
            .trace()
            .iter()
            .filter(|p| p.kind == ElementKind::Card)
            .copied()
            .collect();
        prop_assert!(!cards.is_empty());
        for placed in cards {
            prop_assert!(placed.bottom() <= bottom + 1e-6);
        }
    }
}
