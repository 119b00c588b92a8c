use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::calendar::CalendarDate;
use crate::campaign::Campaign;
use crate::error::Result;
use crate::moon::{self, MoonOracle, Reckoning};
use crate::session::Session;

const CONFIG_PATH_ENV_VAR: &str = "BAROVIA_CONFIG_FILE";

pub fn find_configfile_locations() -> Vec<PathBuf> {
    let mut locations = Vec::new();

    if let Ok(path) = env::var(CONFIG_PATH_ENV_VAR) {
        locations.push(PathBuf::from(path));
    }

    if let Some(dir) = dirs::config_dir() {
        locations.push(dir.join("barovia").join("config.toml"));
    }

    if let Some(home) = dirs::home_dir() {
        locations.push(home.join(".barovia.toml"));
    }

    locations
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct MoonConfig {
    pub reference: CalendarDate,
    pub reckoning: Reckoning,
}

impl Default for MoonConfig {
    fn default() -> Self {
        MoonConfig {
            reference: moon::default_reference(),
            reckoning: Reckoning::default(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub campaign: Option<PathBuf>,
    pub start: Option<CalendarDate>,
    pub moon: MoonConfig,
}

impl Config {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config = Config::from_toml_str(&content).map_err(|e| {
            let detail = e.message.clone().unwrap_or_default();
            e.with_msg(&format!("{}: {}", path.display(), detail))
        })?;

        log::info!("Using configuration from {}", path.display());
        Ok(config)
    }

    pub fn oracle(&self) -> MoonOracle {
        MoonOracle::new(self.moon.reference, self.moon.reckoning)
    }

    /// Loads the configured campaign, or the built-in one if none is set.
    pub fn campaign(&self) -> Result<Campaign> {
        match &self.campaign {
            Some(path) => Campaign::from_file(path),
            None => Campaign::barovia(),
        }
    }

    pub fn session(&self) -> Result<Session> {
        let mut session = Session::new(self.campaign()?).with_oracle(self.oracle());
        if let Some(start) = self.start {
            session = session.starting_at(start);
        }
        Ok(session)
    }
}

/// Loads `path` if given. Otherwise the first existing file of
/// `find_configfile_locations` is used, falling back to defaults.
pub fn load_suitable_config(path: Option<&Path>) -> Result<Config> {
    if let Some(path) = path {
        return Config::load(path);
    }

    match find_configfile_locations().iter().find(|p| p.is_file()) {
        Some(found) => Config::load(found),
        None => {
            log::debug!("No configuration file found, using defaults");
            Ok(Config::default())
        }
    }
}
