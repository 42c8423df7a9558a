use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use kaboom_core::{Difficulty, GameConfig};
use serde::Deserialize;

/// Named board configurations: the built-in presets plus any loaded from a file.
///
/// ```toml
/// [modes.tiny]
/// rows = 4
/// cols = 4
/// mines = 2
/// ```
#[derive(Debug, Default, Deserialize)]
pub struct ModeTable {
    #[serde(default)]
    modes: BTreeMap<String, GameConfig>,
}

impl ModeTable {
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Could not read modes file {}", path.display()))?;
        let table = Self::parse(&text)
            .with_context(|| format!("Invalid modes file {}", path.display()))?;
        log::debug!("Loaded {} modes from {}", table.modes.len(), path.display());
        Ok(table)
    }

    pub fn parse(text: &str) -> Result<Self> {
        let table: Self = toml::from_str(text)?;
        if let Some(name) = table.modes.keys().find(|name| name.parse::<Difficulty>().is_ok()) {
            bail!("mode {name:?} shadows a built-in difficulty");
        }
        Ok(table)
    }

    pub fn resolve(&self, name: &str) -> Result<GameConfig> {
        if let Ok(difficulty) = name.parse::<Difficulty>() {
            return Ok(difficulty.config());
        }
        match self.modes.get(name) {
            Some(config) => Ok(*config),
            None => bail!("unknown mode {name:?}"),
        }
    }

    /// Built-in presets first, then file modes in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, GameConfig)> {
        Difficulty::ALL
            .into_iter()
            .map(|difficulty| (difficulty.name(), difficulty.config()))
            .chain(self.modes.iter().map(|(name, config)| (name.as_str(), *config)))
    }
}
