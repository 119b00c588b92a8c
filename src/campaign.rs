use derive_more::Display;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::calendar::CalendarDate;
use crate::error::{Error, ErrorKind, Result};

const BAROVIA: &str = include_str!("../data/barovia.toml");

#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    #[display(fmt = "introduction")]
    Introduction,
    #[display(fmt = "event")]
    Event,
    #[display(fmt = "deadline")]
    Deadline,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptedEvent {
    pub date: CalendarDate,
    pub title: String,
    pub description: String,
    pub category: Category,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestSeed {
    pub title: String,
    pub description: String,
    pub start: CalendarDate,
    pub end: CalendarDate,
}

/// Everything a session starts from: the scripted timeline, the initial
/// quests and the date the clock opens on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Campaign {
    pub name: String,
    pub start: CalendarDate,
    #[serde(default)]
    pub events: Vec<ScriptedEvent>,
    #[serde(default)]
    pub quests: Vec<QuestSeed>,
}

impl Campaign {
    /// The Curse of Strahd timeline shipped with the crate.
    pub fn barovia() -> Result<Self> {
        Campaign::from_toml_str(BAROVIA)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let campaign: Campaign = toml::from_str(content).map_err(|e| {
            Error::new(ErrorKind::CampaignParse, &e.to_string())
        })?;
        campaign.validate()?;
        Ok(campaign)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let campaign = Campaign::from_toml_str(&content).map_err(|e| {
            let detail = e.message.clone().unwrap_or_default();
            e.with_msg(&format!("{}: {}", path.display(), detail))
        })?;

        log::info!(
            "Loaded campaign '{}' from {} ({} events, {} quests)",
            campaign.name,
            path.display(),
            campaign.events.len(),
            campaign.quests.len()
        );

        Ok(campaign)
    }

    fn validate(&self) -> Result<()> {
        if let Some(seed) = self.quests.iter().find(|q| q.end < q.start) {
            return Err(Error::new(
                ErrorKind::InvalidRange,
                &format!(
                    "quest '{}' ends ({}) before it starts ({})",
                    seed.title, seed.end, seed.start
                ),
            ));
        }
        Ok(())
    }

    pub fn events_on(&self, date: CalendarDate) -> impl Iterator<Item = &ScriptedEvent> {
        self.events.iter().filter(move |event| event.date == date)
    }
}
