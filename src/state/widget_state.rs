//! State of the floating widgets (weather, news, quote, APOD, Pokémon).

use folio::widgets::apod::ApodCard;
use folio::widgets::news::{Headline, Ticker};
use folio::widgets::pokemon::{Pokemon, INITIAL_QUERY};
use folio::widgets::quote::{Quote, QuoteStrip};
use folio::widgets::weather::WeatherReport;
use folio::WidgetError;

/// Last outcome of one widget's fetch.
#[derive(Debug, Clone)]
pub struct Slot<T> {
    value: Option<T>,
    error: Option<WidgetError>,
}

impl<T> Default for Slot<T> {
    fn default() -> Self {
        Self {
            value: None,
            error: None,
        }
    }
}

impl<T> Slot<T> {
    pub fn value(&self) -> Option<&T> {
        self.value.as_ref()
    }

    pub fn value_mut(&mut self) -> Option<&mut T> {
        self.value.as_mut()
    }

    pub fn error(&self) -> Option<&WidgetError> {
        self.error.as_ref()
    }

    /// Stores a fetch result. A failure replaces whatever was shown before.
    pub fn apply(&mut self, result: Result<T, WidgetError>) {
        match result {
            Ok(value) => {
                self.value = Some(value);
                self.error = None;
            }
            Err(e) => {
                log::warn!("widget error: {} ({:?})", e.message, e.detail);
                self.value = None;
                self.error = Some(e);
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct WidgetsState {
    pub weather: Slot<WeatherReport>,
    pub news: Slot<Vec<Headline>>,
    pub ticker: Ticker,
    pub quote: Slot<QuoteStrip>,
    pub apod: Slot<ApodCard>,
    /// Whether the APOD explanation is shown in full
    pub apod_expanded: bool,
    pub pokemon: Slot<Pokemon>,
    /// Text in the Pokémon search box
    pub pokemon_query: String,
}

impl Default for WidgetsState {
    fn default() -> Self {
        Self::new()
    }
}

impl WidgetsState {
    pub fn new() -> Self {
        Self {
            weather: Slot::default(),
            news: Slot::default(),
            ticker: Ticker::default(),
            quote: Slot::default(),
            apod: Slot::default(),
            apod_expanded: false,
            pokemon: Slot::default(),
            pokemon_query: INITIAL_QUERY.to_string(),
        }
    }

    pub fn apply_quote(&mut self, result: Result<Quote, WidgetError>) {
        self.quote.apply(result.map(|q| QuoteStrip::new(&q)));
    }

    pub fn apply_apod(&mut self, result: Result<ApodCard, WidgetError>) {
        self.apod_expanded = false;
        self.apod.apply(result);
    }

    /// Stores a looked-up Pokémon and mirrors its id into the search box.
    pub fn apply_pokemon(&mut self, result: Result<Pokemon, WidgetError>) {
        if let Ok(pokemon) = &result {
            self.pokemon_query = pokemon.name.clone();
        }
        self.pokemon.apply(result);
    }
}
