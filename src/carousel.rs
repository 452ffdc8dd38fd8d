//! Slider and pager index management.
//!
//! This module contains the two index controllers used by the portfolio sections:
//! - [`Carousel`] drives image sliders. Its index is clamped, never wrapped, and it
//!   reports which navigation affordances should be disabled.
//! - [`Pager`] drives text carousels and paged quotes. Its index wraps in both directions.

/// Navigation direction for a slider button press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// The "previous" button (-1)
    Prev,
    /// The "next" button (+1)
    Next,
}

impl Direction {
    /// Returns the signed step for this direction.
    pub fn step(self) -> isize {
        match self {
            Direction::Prev => -1,
            Direction::Next => 1,
        }
    }
}

/// Result of recomputing a carousel's presentation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CarouselView {
    /// Index of the visible slide
    pub index: usize,
    /// Track translation as a percentage of the viewport width (`-index * 100`).
    /// `None` when there are no slides to position.
    pub offset_percent: Option<f32>,
    /// Whether the "previous" affordance is disabled
    pub prev_disabled: bool,
    /// Whether the "next" affordance is disabled
    pub next_disabled: bool,
}

/// Clamped slider over a fixed collection of slides.
///
/// The collection is fixed at mount; [`Carousel::remount`] swaps it for a new one.
/// Every mutation re-clamps the index into `[0, count - 1]`.
#[derive(Debug, Clone, Default)]
pub struct Carousel {
    /// Image references, in display order
    slides: Vec<String>,
    /// Index of the visible slide
    index: usize,
}

impl Carousel {
    /// Mounts a carousel over the given slides, showing the first one.
    pub fn new(slides: Vec<String>) -> Self {
        Self { slides, index: 0 }
    }

    // ===== Queries =====

    /// Returns the number of slides.
    pub fn count(&self) -> usize {
        self.slides.len()
    }

    /// Returns the index of the visible slide.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Returns all slides in display order.
    pub fn slides(&self) -> &[String] {
        &self.slides
    }

    /// Returns the visible slide, if any.
    pub fn current(&self) -> Option<&str> {
        self.slides.get(self.index).map(String::as_str)
    }

    /// Returns the track translation in pixels for the given viewport width.
    pub fn track_offset(&self, viewport_width: f32) -> f32 {
        -(self.index as f32) * viewport_width
    }

    // ===== Mutations =====

    /// Moves one slide in `direction`, then clamps and recomputes the view.
    ///
    /// On an empty carousel the index stays at 0 but the view is still recomputed.
    pub fn advance(&mut self, direction: Direction) -> CarouselView {
        if !self.slides.is_empty() {
            self.index = self.index.saturating_add_signed(direction.step());
        }
        self.refresh()
    }

    /// Re-clamps the index against the current slide count and recomputes the view.
    ///
    /// Also the resize handler: the index itself never moves here unless the
    /// slide count shrank underneath it.
    pub fn refresh(&mut self) -> CarouselView {
        let count = self.slides.len();
        if count == 0 {
            self.index = 0;
            return CarouselView {
                index: 0,
                offset_percent: None,
                prev_disabled: true,
                next_disabled: true,
            };
        }

        self.index = self.index.min(count - 1);
        CarouselView {
            index: self.index,
            offset_percent: Some(-(self.index as f32) * 100.0),
            prev_disabled: self.index == 0,
            next_disabled: self.index == count - 1,
        }
    }

    /// Replaces the slide collection, keeping the index where it is if still valid.
    pub fn remount(&mut self, slides: Vec<String>) -> CarouselView {
        self.slides = slides;
        self.refresh()
    }
}

/// Wrapping index over a fixed number of pages.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Pager {
    index: usize,
    total: usize,
}

impl Pager {
    /// Creates a pager over `total` pages positioned on the first page.
    pub fn new(total: usize) -> Self {
        Self { index: 0, total }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn is_first(&self) -> bool {
        self.index == 0
    }

    pub fn is_last(&self) -> bool {
        self.total > 0 && self.index == self.total - 1
    }

    /// Moves forward one page, wrapping from the last page to the first.
    pub fn next(&mut self) {
        if self.total > 0 {
            self.index = (self.index + 1) % self.total;
        }
    }

    /// Moves back one page, wrapping from the first page to the last.
    pub fn prev(&mut self) {
        if self.total > 0 {
            self.index = (self.index + self.total - 1) % self.total;
        }
    }

    /// Resets to the first page of a new page count.
    pub fn reset(&mut self, total: usize) {
        self.index = 0;
        self.total = total;
    }

    /// One-based position label, e.g. `"2 / 5"`.
    pub fn position_label(&self) -> String {
        if self.total == 0 {
            return "0 / 0".to_string();
        }
        format!("{} / {}", self.index + 1, self.total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slides(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("assets/slide_{i}.jpg")).collect()
    }

    #[test]
    fn test_prev_at_start_is_clamped() {
        let mut carousel = Carousel::new(slides(3));
        let view = carousel.advance(Direction::Prev);
        assert_eq!(view.index, 0);
        assert!(view.prev_disabled);
        assert!(!view.next_disabled);
    }

    #[test]
    fn test_next_at_end_is_clamped() {
        let mut carousel = Carousel::new(slides(3));
        carousel.advance(Direction::Next);
        carousel.advance(Direction::Next);
        let view = carousel.advance(Direction::Next);
        assert_eq!(view.index, 2);
        assert!(view.next_disabled);
        assert!(!view.prev_disabled);
        assert_eq!(view.offset_percent, Some(-200.0));
    }

    #[test]
    fn test_single_slide_disables_both() {
        let mut carousel = Carousel::new(slides(1));
        for direction in [Direction::Next, Direction::Prev, Direction::Next] {
            let view = carousel.advance(direction);
            assert_eq!(view.index, 0);
            assert!(view.prev_disabled && view.next_disabled);
        }
    }

    #[test]
    fn test_empty_carousel_has_no_positioning() {
        let mut carousel = Carousel::new(Vec::new());
        let view = carousel.advance(Direction::Next);
        assert_eq!(view.offset_percent, None);
        assert_eq!(carousel.index(), 0);
        assert!(view.prev_disabled && view.next_disabled);
        assert_eq!(carousel.current(), None);
    }

    #[test]
    fn test_index_stays_in_bounds_for_any_sequence() {
        for n in 0..6 {
            let mut carousel = Carousel::new(slides(n));
            let moves = [
                Direction::Next, Direction::Next, Direction::Prev, Direction::Next,
                Direction::Next, Direction::Next, Direction::Next, Direction::Prev,
                Direction::Prev, Direction::Prev, Direction::Prev, Direction::Next,
            ];
            for direction in moves {
                let view = carousel.advance(direction);
                assert!(view.index <= n.saturating_sub(1));
                assert_eq!(view.prev_disabled, view.index == 0);
                assert_eq!(view.next_disabled, n == 0 || view.index == n - 1);
            }
        }
    }

    #[test]
    fn test_remount_with_fewer_slides_clamps() {
        let mut carousel = Carousel::new(slides(5));
        for _ in 0..4 {
            carousel.advance(Direction::Next);
        }
        assert_eq!(carousel.index(), 4);

        let view = carousel.remount(slides(2));
        assert_eq!(view.index, 1);
        assert!(view.next_disabled);
    }

    #[test]
    fn test_refresh_does_not_move_index() {
        let mut carousel = Carousel::new(slides(4));
        carousel.advance(Direction::Next);
        let view = carousel.refresh();
        assert_eq!(view.index, 1);
        assert_eq!(carousel.track_offset(640.0), -640.0);
    }

    #[test]
    fn test_pager_wraps_both_ways() {
        let mut pager = Pager::new(3);
        pager.prev();
        assert_eq!(pager.index(), 2);
        assert!(pager.is_last());
        pager.next();
        assert_eq!(pager.index(), 0);
        assert!(pager.is_first());
        assert_eq!(pager.position_label(), "1 / 3");
    }

    #[test]
    fn test_empty_pager_is_inert() {
        let mut pager = Pager::new(0);
        pager.next();
        pager.prev();
        assert_eq!(pager.index(), 0);
        assert!(!pager.is_last());
        assert_eq!(pager.position_label(), "0 / 0");
    }
}
