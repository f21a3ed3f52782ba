//! # Page Break Decisions
//!
//! Logic for deciding when and how to break content across pages.
//!
//! Two kinds of content exist. Atomic elements (cards, table rows, code
//! blocks that fit on a page, single text lines) either fit where the cursor
//! is or move whole to the next page. Divisible content (a code block taller
//! than a page) is split between lines, with orphan and widow control.

use crate::draw::Surface;
use crate::error::FolioError;
use crate::layout::{Canvas, EPSILON};

/// What to do with the next element.
#[derive(Debug, Clone, PartialEq)]
pub enum BreakDecision {
    /// Place the element on the current page (it fits).
    Place,
    /// Start a new page and place the element at its top.
    MoveToNextPage,
    /// Place some lines here and continue with the rest.
    Split {
        /// How many lines fit on the current page.
        items_on_current_page: usize,
    },
}

/// Decide whether an atomic element of height `required` can be placed.
///
/// An element that does not fit moves to the next page, unless the cursor is
/// already at the top of a page: breaking there would only produce another
/// page just as short, so the element is placed and overflows.
pub fn decide_break(remaining_height: f64, required: f64, at_page_top: bool) -> BreakDecision {
    if required <= remaining_height + EPSILON || at_page_top {
        BreakDecision::Place
    } else {
        BreakDecision::MoveToNextPage
    }
}

/// Given the remaining space on a page and a list of line heights, decide
/// how to break divisible content.
pub fn decide_split(
    remaining_height: f64,
    line_heights: &[f64],
    min_orphan_lines: usize,
    min_widow_lines: usize,
) -> BreakDecision {
    let total: f64 = line_heights.iter().sum();
    if total <= remaining_height + EPSILON {
        return BreakDecision::Place;
    }

    let mut running = 0.0;
    let mut fit_count = 0;
    for &h in line_heights {
        if running + h > remaining_height + EPSILON {
            break;
        }
        running += h;
        fit_count += 1;
    }

    let total_items = line_heights.len();

    // too few lines would be left behind on this page
    if fit_count < min_orphan_lines && fit_count < total_items {
        return BreakDecision::MoveToNextPage;
    }

    // too few lines would carry over; pull some back
    let remaining_items = total_items - fit_count;
    if remaining_items < min_widow_lines && remaining_items > 0 {
        let adjusted = fit_count.saturating_sub(min_widow_lines - remaining_items);
        if adjusted == 0 {
            return BreakDecision::MoveToNextPage;
        }
        return BreakDecision::Split {
            items_on_current_page: adjusted,
        };
    }

    if fit_count == 0 {
        return BreakDecision::MoveToNextPage;
    }

    BreakDecision::Split {
        items_on_current_page: fit_count,
    }
}

/// Make room for an atomic element of height `required`, advancing to a
/// fresh page when it does not fit. Returns the decision that was applied.
pub fn ensure_space<S: Surface>(
    canvas: &mut Canvas<S>,
    required: f64,
) -> Result<BreakDecision, FolioError> {
    let decision = decide_break(canvas.remaining_height(), required, canvas.at_page_top());
    if decision == BreakDecision::MoveToNextPage {
        canvas.advance_page()?;
    }
    if required > canvas.remaining_height() + EPSILON {
        log::warn!(
            "element of {required:.1}mm exceeds the {:.1}mm available on page {}; placing it anyway",
            canvas.remaining_height(),
            canvas.page_number()
        );
    }
    Ok(decision)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::tests::canvas;

    #[test]
    fn fits_is_placed() {
        assert_eq!(decide_break(100.0, 40.0, false), BreakDecision::Place);
        assert_eq!(decide_break(40.0, 40.0, false), BreakDecision::Place);
    }

    #[test]
    fn unfit_moves() {
        assert_eq!(decide_break(30.0, 40.0, false), BreakDecision::MoveToNextPage);
    }

    #[test]
    fn never_breaks_at_page_top() {
        assert_eq!(decide_break(259.0, 400.0, true), BreakDecision::Place);
    }

    #[test]
    fn everything_fits() {
        let decision = decide_split(100.0, &[20.0, 30.0, 40.0], 2, 2);
        assert_eq!(decision, BreakDecision::Place);
    }

    #[test]
    fn split_at_right_point() {
        let decision = decide_split(55.0, &[20.0, 30.0, 40.0], 1, 1);
        assert_eq!(
            decision,
            BreakDecision::Split {
                items_on_current_page: 2,
            }
        );
    }

    #[test]
    fn orphan_control() {
        // only 1 line would fit, but min_orphan is 2
        let decision = decide_split(25.0, &[20.0, 30.0, 40.0], 2, 2);
        assert_eq!(decision, BreakDecision::MoveToNextPage);
    }

    #[test]
    fn widow_control() {
        // 3 of 4 fit, leaving 1 widow (min=2)
        let decision = decide_split(70.0, &[20.0, 20.0, 20.0, 20.0], 2, 2);
        assert_eq!(
            decision,
            BreakDecision::Split {
                items_on_current_page: 2,
            }
        );
    }

    #[test]
    fn ensure_space_advances_when_needed() {
        let mut canvas = canvas();
        canvas.advance(250.0);
        let decision = ensure_space(&mut canvas, 20.0).unwrap();
        assert_eq!(decision, BreakDecision::MoveToNextPage);
        assert_eq!(canvas.page_number(), 2);
        assert!(canvas.at_page_top());
    }

    #[test]
    fn ensure_space_keeps_page_when_it_fits() {
        let mut canvas = canvas();
        canvas.advance(200.0);
        let decision = ensure_space(&mut canvas, 20.0).unwrap();
        assert_eq!(decision, BreakDecision::Place);
        assert_eq!(canvas.page_number(), 1);
    }

    #[test]
    fn oversize_element_does_not_loop() {
        let mut canvas = canvas();
        canvas.advance(10.0);
        ensure_space(&mut canvas, 500.0).unwrap();
        assert_eq!(canvas.page_number(), 2);
        // at the top now: a second request places rather than breaking again
        let decision = ensure_space(&mut canvas, 500.0).unwrap();
        assert_eq!(decision, BreakDecision::Place);
        assert_eq!(canvas.page_number(), 2);
    }
}
