//! Gallery section state: one carousel per gallery plus the toy text carousel.

use folio::{CardGrid, Carousel, CarouselView, Direction, Gallery, Pager};

/// One image slider and its last rendered view.
#[derive(Debug, Clone)]
pub struct SliderState {
    title: String,
    carousel: Carousel,
    view: CarouselView,
    /// Viewport width at the last refresh
    last_width: Option<f32>,
}

impl SliderState {
    pub fn new(gallery: &Gallery) -> Self {
        let mut carousel = Carousel::new(gallery.slides.clone());
        let view = carousel.refresh();
        Self {
            title: gallery.title.clone(),
            carousel,
            view,
            last_width: None,
        }
    }

    // ===== Queries =====

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn carousel(&self) -> &Carousel {
        &self.carousel
    }

    pub fn view(&self) -> &CarouselView {
        &self.view
    }

    // ===== Mutations =====

    pub fn advance(&mut self, direction: Direction) {
        self.view = self.carousel.advance(direction);
    }

    /// Refreshes the view when the viewport width changed since the last frame.
    ///
    /// Returns `true` if a refresh happened.
    pub fn on_resize(&mut self, width: f32) -> bool {
        if self.last_width == Some(width) {
            return false;
        }
        self.last_width = Some(width);
        self.view = self.carousel.refresh();
        true
    }

    /// Swaps in the slides of `gallery`, keeping the position where it still fits.
    pub fn remount(&mut self, gallery: &Gallery) {
        self.title = gallery.title.clone();
        self.view = self.carousel.remount(gallery.slides.clone());
    }
}

/// Everything the gallery section shows.
#[derive(Debug, Clone)]
pub struct GalleryState {
    sliders: Vec<SliderState>,
    card_grids: Vec<CardGrid>,
    toy_paragraphs: Vec<String>,
    toy_pager: Pager,
}

impl GalleryState {
    pub fn new(galleries: &[Gallery], card_grids: &[CardGrid], toy_paragraphs: &[String]) -> Self {
        Self {
            sliders: galleries.iter().map(SliderState::new).collect(),
            card_grids: card_grids.to_vec(),
            toy_paragraphs: toy_paragraphs.to_vec(),
            toy_pager: Pager::new(toy_paragraphs.len()),
        }
    }

    // ===== Queries =====

    pub fn sliders(&self) -> &[SliderState] {
        &self.sliders
    }

    pub fn card_grids(&self) -> &[CardGrid] {
        &self.card_grids
    }

    /// Current toy paragraph, if there are any.
    pub fn toy_paragraph(&self) -> Option<&str> {
        self.toy_paragraphs.get(self.toy_pager.index()).map(String::as_str)
    }

    pub fn toy_pager(&self) -> &Pager {
        &self.toy_pager
    }

    // ===== Mutations =====

    pub fn slider_mut(&mut self, index: usize) -> Option<&mut SliderState> {
        self.sliders.get_mut(index)
    }

    pub fn next_toy_paragraph(&mut self) {
        self.toy_pager.next();
    }

    pub fn prev_toy_paragraph(&mut self) {
        self.toy_pager.prev();
    }

    /// Applies freshly loaded content. Existing sliders are remounted in place;
    /// extra galleries get new sliders and missing ones are dropped.
    pub fn reload(&mut self, galleries: &[Gallery], card_grids: &[CardGrid], toy_paragraphs: &[String]) {
        self.sliders.truncate(galleries.len());
        for (index, gallery) in galleries.iter().enumerate() {
            match self.sliders.get_mut(index) {
                Some(slider) => slider.remount(gallery),
                None => self.sliders.push(SliderState::new(gallery)),
            }
        }

        self.card_grids = card_grids.to_vec();
        if toy_paragraphs != self.toy_paragraphs.as_slice() {
            self.toy_paragraphs = toy_paragraphs.to_vec();
            self.toy_pager = Pager::new(toy_paragraphs.len());
        }
    }
}
