//! TOML configuration for the page.
//!
//! Every field has a default, so an absent file or a partial one is fine:
//!
//! ```toml
//! [slideshow]
//! fade_ms = 150
//! auto_advance_ms = 4000
//! initial_index = 8
//! alt_prefix = "Portfolio"
//!
//! [persona]
//! auto_advance_ms = 6000
//!
//! [[persona.cards]]
//! title = "Engineer"
//! body = "Builds things"
//!
//! [[projects]]
//! title = "Parser"
//! tags = ["Rust", "Compilers"]
//!
//! [about]
//! bio = "Photographer and programmer."
//! skills = ["Rust", "Lighting"]
//! contacts = ["mail@example.org"]
//!
//! [[about.timeline]]
//! period = "2021"
//! title = "First exhibition"
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::*;
use crate::error::CarouselError;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SlideshowConfig {
    pub fade_ms: u64,
    pub auto_advance_ms: u64,
    pub initial_index: usize,
    pub alt_prefix: String,
}

impl Default for SlideshowConfig {
    fn default() -> Self {
        Self {
            fade_ms: FADE_DELAY_MS,
            auto_advance_ms: AUTO_ADVANCE_MS,
            initial_index: IMAGE_INITIAL_INDEX,
            alt_prefix: "Portfolio".to_string(),
        }
    }
}

impl SlideshowConfig {
    pub fn validate(&self, image_count: usize) -> Result<(), CarouselError> {
        if image_count == 0 {
            return Err(CarouselError::EmptySequence);
        }
        if self.initial_index >= image_count {
            return Err(CarouselError::IndexOutOfRange {
                index: self.initial_index,
                len: image_count,
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonaCard {
    pub title: String,
    #[serde(default)]
    pub body: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PersonaConfig {
    /// Auto-advance period; `None` leaves the cards on manual navigation.
    pub auto_advance_ms: Option<u64>,
    pub cards: Vec<PersonaCard>,
}

impl Default for PersonaConfig {
    fn default() -> Self {
        let card = |title: &str, body: &str| PersonaCard {
            title: title.to_string(),
            body: body.to_string(),
        };
        Self {
            auto_advance_ms: None,
            cards: vec![
                card("Developer", "Writes the code"),
                card("Designer", "Draws the screens"),
                card("Student", "Reads the papers"),
                card("Explorer", "Takes the photos"),
            ],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectConfig {
    pub title: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineEntry {
    pub period: String,
    pub title: String,
}

/// Content of the about section whose blocks reveal on scroll.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AboutConfig {
    pub bio: String,
    pub timeline: Vec<TimelineEntry>,
    pub skills: Vec<String>,
    pub contacts: Vec<String>,
}

impl Default for AboutConfig {
    fn default() -> Self {
        let entry = |period: &str, title: &str| TimelineEntry {
            period: period.to_string(),
            title: title.to_string(),
        };
        Self {
            bio: "Builds software, takes photos, keeps notes.".to_string(),
            timeline: vec![
                entry("2019", "Started programming"),
                entry("2021", "First embedded project"),
                entry("2023", "Portfolio launched"),
            ],
            skills: vec!["Rust".to_string(), "Photography".to_string(), "Design".to_string()],
            contacts: vec!["Email".to_string(), "GitHub".to_string()],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CarouselConfig {
    pub slideshow: SlideshowConfig,
    pub persona: PersonaConfig,
    pub projects: Vec<ProjectConfig>,
    pub about: AboutConfig,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        let project = |title: &str, tags: &[&str]| ProjectConfig {
            title: title.to_string(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
        };
        Self {
            slideshow: SlideshowConfig::default(),
            persona: PersonaConfig::default(),
            projects: vec![
                project("Portfolio Site", &["Web", "Design"]),
                project("Sensor Logger", &["Embedded", "Rust"]),
                project("Photo Wall", &["Rust", "Graphics"]),
                project("Course Notes", &["Writing"]),
            ],
            about: AboutConfig::default(),
        }
    }
}

impl CarouselConfig {
    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&text)
    }
}
