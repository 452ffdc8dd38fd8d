//! Pokémon lookup card (PokéAPI).

use rand::Rng;
use serde::Deserialize;

use super::WidgetError;
use crate::http::{FetchError, HttpClient};

pub const POKEAPI_URL: &str = "https://pokeapi.co/api/v2/pokemon";

/// Highest id the random button draws from.
pub const MAX_RANDOM_ID: u32 = 898;

/// Base stat that fills a stat bar completely.
pub const STAT_BAR_FULL: f32 = 150.0;

/// Shown when the card first opens.
pub const INITIAL_QUERY: &str = "pikachu";

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NamedResource {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TypeSlot {
    pub slot: u32,
    #[serde(rename = "type")]
    pub kind: NamedResource,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct StatEntry {
    pub base_stat: u32,
    pub stat: NamedResource,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Sprites {
    #[serde(default)]
    pub front_default: Option<String>,
    #[serde(default)]
    pub other: Option<OtherSprites>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct OtherSprites {
    #[serde(rename = "official-artwork", default)]
    pub official_artwork: Option<Artwork>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Artwork {
    #[serde(default)]
    pub front_default: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Pokemon {
    pub id: u32,
    pub name: String,
    /// Decimetres
    pub height: u32,
    /// Hectograms
    pub weight: u32,
    #[serde(default)]
    pub types: Vec<TypeSlot>,
    #[serde(default)]
    pub stats: Vec<StatEntry>,
    #[serde(default)]
    pub sprites: Sprites,
}

impl Pokemon {
    /// Official artwork if available, else the default sprite.
    pub fn artwork(&self) -> Option<&str> {
        self.sprites
            .other
            .as_ref()
            .and_then(|o| o.official_artwork.as_ref())
            .and_then(|a| a.front_default.as_deref())
            .or(self.sprites.front_default.as_deref())
    }

    /// `"#25 · PIKACHU"`
    pub fn title(&self) -> String {
        format!("#{} · {}", self.id, self.name.to_uppercase())
    }

    pub fn height_m(&self) -> f32 {
        self.height as f32 / 10.0
    }

    pub fn weight_kg(&self) -> f32 {
        self.weight as f32 / 10.0
    }

    pub fn type_names(&self) -> Vec<&str> {
        let mut slots: Vec<&TypeSlot> = self.types.iter().collect();
        slots.sort_by_key(|t| t.slot);
        slots.into_iter().map(|t| t.kind.name.as_str()).collect()
    }
}

/// Fill fraction of a stat bar, capped at 1.
pub fn stat_fraction(base_stat: u32) -> f32 {
    (base_stat as f32 / STAT_BAR_FULL).min(1.0)
}

/// Trims and lowercases a search; `None` when nothing is left to search for.
pub fn normalize_query(query: &str) -> Option<String> {
    let trimmed = query.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_lowercase())
    }
}

/// Uniform id in `1..=MAX_RANDOM_ID` for the random button.
pub fn random_id<R: Rng + ?Sized>(rng: &mut R) -> u32 {
    rng.gen_range(1..=MAX_RANDOM_ID)
}

fn to_widget_error(err: FetchError) -> WidgetError {
    match &err {
        FetchError::Status { status: 404, .. } => {
            WidgetError::new("No such Pokémon, try another name or number!")
        }
        FetchError::Status { status, .. } => {
            WidgetError::new(format!("Failed to fetch data (HTTP {status})"))
        }
        _ => WidgetError::new("Something went wrong fetching Pokémon data").with_detail(err.to_string()),
    }
}

/// Looks up a Pokémon by name or id.
pub fn fetch_pokemon(client: &dyn HttpClient, query: &str) -> Result<Pokemon, WidgetError> {
    let Some(query) = normalize_query(query) else {
        return Err(WidgetError::new("Enter a name or number, e.g. pikachu or 25"));
    };

    let url = format!("{}/{}", POKEAPI_URL, query);
    let response = client
        .get(&url)
        .and_then(|r| r.error_for_status())
        .map_err(to_widget_error)?;
    response.json().map_err(to_widget_error)
}
