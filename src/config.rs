//! Portfolio configuration.
//!
//! Loaded from `<config_dir>/folio/config.json` when present, otherwise built-in
//! defaults. API keys and the weather location can be overridden from the environment:
//!
//! | Variable | Field |
//! |---|---|
//! | `FOLIO_OPENWEATHER_KEY` | `weather.api_key` |
//! | `FOLIO_LATITUDE` / `FOLIO_LONGITUDE` | `weather.latitude` / `weather.longitude` |
//! | `FOLIO_GNEWS_KEY` | `news.api_key` |
//! | `FOLIO_NASA_KEY` | `apod.api_key` |
//! | `FOLIO_GEMINI_KEY` | `chat.api_key` |

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to determine config directory")]
    ConfigDirNotFound,
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// A titled image slider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Gallery {
    pub title: String,
    pub slides: Vec<String>,
}

/// A titled grid of image cards (no navigation).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardGrid {
    pub title: String,
    pub images: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactConfig {
    /// Recipient of the contact form
    pub email: String,
}

impl Default for ContactConfig {
    fn default() -> Self {
        Self {
            email: "hello@example.com".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeatherConfig {
    pub api_key: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    pub lang: String,
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            latitude: 25.0330,
            longitude: 121.5654,
            lang: "en".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NewsConfig {
    pub api_key: Option<String>,
    pub country: String,
    pub lang: String,
    pub max: u32,
}

impl Default for NewsConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            country: "tw".to_string(),
            lang: "en".to_string(),
            max: 10,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApodConfig {
    pub api_key: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatConfig {
    pub api_key: Option<String>,
    pub default_model: String,
    /// Prefilled into the composer of the first conversation
    pub starter: String,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            default_model: crate::widgets::chat::DEFAULT_MODEL.to_string(),
            starter: "Any restaurant recommendations near campus?".to_string(),
        }
    }
}

/// Complete portfolio configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FolioConfig {
    pub hero_image: String,
    pub galleries: Vec<Gallery>,
    pub card_grids: Vec<CardGrid>,
    pub wheel_items: Vec<String>,
    pub toy_paragraphs: Vec<String>,
    pub contact: ContactConfig,
    pub weather: WeatherConfig,
    pub news: NewsConfig,
    pub apod: ApodConfig,
    pub chat: ChatConfig,
}

fn paths(dir: &str, files: &[&str]) -> Vec<String> {
    files.iter().map(|f| format!("assets/{dir}/{f}")).collect()
}

impl Default for FolioConfig {
    fn default() -> Self {
        Self {
            hero_image: "assets/home/sea.jpg".to_string(),
            galleries: vec![
                Gallery {
                    title: "About me".to_string(),
                    slides: paths("about_me", &["mirror.jpg", "IMG_5258.jpg", "IMG_5726.jpg"]),
                },
                Gallery {
                    title: "Dance".to_string(),
                    slides: paths(
                        "dance",
                        &[
                            "IMG_2378.JPG",
                            "IMG_2379.JPG",
                            "DSC00808.JPEG",
                            "DSC06483.JPEG",
                            "DSC06329_Original.JPG",
                            "IMG_4634.JPG",
                        ],
                    ),
                },
                Gallery {
                    title: "Family".to_string(),
                    slides: paths(
                        "family",
                        &["IMG_8594.JPG", "IMG_3703.jpg", "IMG_2799.jpg", "IMG_2768.jpg", "IMG_1496.JPG"],
                    ),
                },
                Gallery {
                    title: "Friends".to_string(),
                    slides: paths(
                        "friends",
                        &["IMG_7249.JPG", "IMG_8044.JPG", "IMG_5107.PNG", "IMG_0658.jpg", "IMG_6130.jpg"],
                    ),
                },
                Gallery {
                    title: "Japan".to_string(),
                    slides: paths(
                        "japan",
                        &[
                            "IMG_6576.JPG",
                            "IMG_2256.jpg",
                            "IMG_2902.jpg",
                            "IMG_3247.jpg",
                            "IMG_6157.JPG",
                            "IMG_6167.JPG",
                            "IMG_6272.JPG",
                            "IMG_6563.JPG",
                        ],
                    ),
                },
            ],
            card_grids: vec![
                CardGrid {
                    title: "Design sketching".to_string(),
                    images: paths(
                        "design_sketching",
                        &["project1.JPG", "project2.JPG", "project3.JPG", "project4.JPG", "project5.JPG", "project6.JPG"],
                    ),
                },
                CardGrid {
                    title: "Basic design".to_string(),
                    images: paths("basic_design", &["IMG_7343.JPG", "Wood Handmade Craft Presentation.jpg"]),
                },
            ],
            wheel_items: [
                "Ramen",
                "Spaghetti",
                "Sushi",
                "Sandwich",
                "Steak",
                "Teppanyaki",
                "Udon",
                "Convenience store",
                "Scallion pancake",
                "Hot pot",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            toy_paragraphs: vec![
                "A wooden pull-along toy, sketched from a childhood favourite.".to_string(),
                "Rounded edges and a single axle keep it safe for small hands.".to_string(),
                "Finished with food-safe oil so the grain shows through.".to_string(),
            ],
            contact: ContactConfig::default(),
            weather: WeatherConfig::default(),
            news: NewsConfig::default(),
            apod: ApodConfig::default(),
            chat: ChatConfig::default(),
        }
    }
}

impl FolioConfig {
    /// Default location: `<config_dir>/folio/config.json`.
    pub fn default_path() -> Result<PathBuf, ConfigError> {
        let dir = dirs::config_dir().ok_or(ConfigError::ConfigDirNotFound)?;
        Ok(dir.join("folio").join("config.json"))
    }

    /// Reads a config file. Missing fields take their defaults.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Loads the config from the default location with environment overrides applied.
    ///
    /// A missing file yields the defaults; an unreadable one is an error.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::default_path()?;
        let mut config = if path.exists() {
            log::info!("loading config from {}", path.display());
            Self::load_from(&path)?
        } else {
            log::info!("no config at {}, using defaults", path.display());
            Self::default()
        };
        config.apply_overrides(|name| std::env::var(name).ok());
        Ok(config)
    }

    /// Like [`FolioConfig::load`], but falls back to defaults on any error.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_else(|e| {
            log::warn!("{}; using default config", e);
            let mut config = Self::default();
            config.apply_overrides(|name| std::env::var(name).ok());
            config
        })
    }

    /// Applies overrides from a variable lookup (normally the process environment).
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        if let Some(key) = non_empty("FOLIO_OPENWEATHER_KEY") {
            self.weather.api_key = Some(key);
        }
        if let Some(key) = non_empty("FOLIO_GNEWS_KEY") {
            self.news.api_key = Some(key);
        }
        if let Some(key) = non_empty("FOLIO_NASA_KEY") {
            self.apod.api_key = Some(key);
        }
        if let Some(key) = non_empty("FOLIO_GEMINI_KEY") {
            self.chat.api_key = Some(key);
        }
        if let Some(lat) = non_empty("FOLIO_LATITUDE").and_then(|v| v.trim().parse().ok()) {
            self.weather.latitude = lat;
        }
        if let Some(lon) = non_empty("FOLIO_LONGITUDE").and_then(|v| v.trim().parse().ok()) {
            self.weather.longitude = lon;
        }
    }
}
