//! Optional `reachcheck.toml` overriding the search engines' defaults.

use std::path::Path;

use rc_engine::{ExhaustiveBudget, SearchBudget};
use serde::Deserialize;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("reading {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("parsing {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RandomSection {
    episodes: Option<u32>,
    steps_per_episode: Option<u32>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ExhaustiveSection {
    buckets: Option<usize>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawConfig {
    random: RandomSection,
    exhaustive: ExhaustiveSection,
}

/// Resolved budgets after folding in whatever the config file
/// overrode; absent fields keep the hard-coded defaults.
pub struct Config {
    pub search: SearchBudget,
    pub exhaustive: ExhaustiveBudget,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            search: SearchBudget::default(),
            exhaustive: ExhaustiveBudget::default(),
        }
    }
}

pub fn load(path: &Path) -> Result<Config, ConfigError> {
    let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.display().to_string(),
        source,
    })?;
    let raw: RawConfig = toml::from_str(&text).map_err(|source| ConfigError::Parse {
        path: path.display().to_string(),
        source,
    })?;

    let defaults = SearchBudget::default();
    let search = SearchBudget {
        episodes: raw.random.episodes.unwrap_or(defaults.episodes),
        steps_per_episode: raw
            .random
            .steps_per_episode
            .unwrap_or(defaults.steps_per_episode),
    };
    let exhaustive = ExhaustiveBudget {
        buckets: raw
            .exhaustive
            .buckets
            .unwrap_or(ExhaustiveBudget::default().buckets),
    };

    Ok(Config { search, exhaustive })
}
