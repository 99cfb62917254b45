use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::scoring::{ScoringConfig, ScoringConfigUpdate};

#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Overrides merged over the default scoring configuration
    #[serde(default)]
    pub scoring: Option<ScoringConfigUpdate>,

    /// Checklist store file (defaults to ~/.config/checkscore/checklists.json)
    #[serde(default)]
    pub store_path: Option<PathBuf>,
}

impl Config {
    /// Effective scoring configuration: defaults with the file's overrides applied.
    pub fn scoring_config(&self) -> ScoringConfig {
        let mut config = ScoringConfig::default();
        if let Some(ref update) = self.scoring {
            config.apply(update);
        }
        config
    }
}
