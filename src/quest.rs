use derive_more::Display;
use uuid::Uuid;

use crate::calendar::CalendarDate;
use crate::campaign::QuestSeed;

#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash)]
pub struct QuestId(Uuid);

impl QuestId {
    fn generate() -> Self {
        QuestId(Uuid::new_v4())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quest {
    id: QuestId,
    pub title: String,
    pub description: String,
    pub start: CalendarDate,
    pub end: CalendarDate,
    pub active: bool,
}

impl Quest {
    pub fn id(&self) -> QuestId {
        self.id
    }

    /// Whether `date` lies within the quest's inclusive date range.
    pub fn spans(&self, date: &CalendarDate) -> bool {
        (self.start..=self.end).contains(date)
    }

    pub fn is_active_on(&self, date: &CalendarDate) -> bool {
        self.active && self.spans(date)
    }
}

impl From<&QuestSeed> for Quest {
    fn from(seed: &QuestSeed) -> Self {
        Quest {
            id: QuestId::generate(),
            title: seed.title.clone(),
            description: seed.description.clone(),
            start: seed.start,
            end: seed.end,
            active: true,
        }
    }
}

/// The quests of a session, in the order they were added.
///
/// Titles are not unique. Lookups by title resolve to the first quest
/// carrying it; use the `QuestId` to address a specific one.
#[derive(Debug, Clone, Default)]
pub struct QuestRegistry {
    quests: Vec<Quest>,
}

impl QuestRegistry {
    pub fn from_seeds(seeds: &[QuestSeed]) -> Self {
        QuestRegistry {
            quests: seeds.iter().map(Quest::from).collect(),
        }
    }

    /// Appends an active quest. Returns `None` without touching the
    /// registry if the title or description is blank or `end` precedes
    /// `start`.
    pub fn add(
        &mut self,
        title: &str,
        description: &str,
        start: CalendarDate,
        end: CalendarDate,
    ) -> Option<QuestId> {
        if title.trim().is_empty() || description.trim().is_empty() || end < start {
            return None;
        }

        let quest = Quest {
            id: QuestId::generate(),
            title: title.to_owned(),
            description: description.to_owned(),
            start,
            end,
            active: true,
        };
        let id = quest.id;
        log::debug!("Added quest '{}' ({} to {})", quest.title, start, end);
        self.quests.push(quest);
        Some(id)
    }

    /// Flips `active` on the first quest titled exactly `title`. Returns
    /// whether a quest matched.
    pub fn toggle_active(&mut self, title: &str) -> bool {
        match self.quests.iter_mut().find(|q| q.title == title) {
            Some(quest) => {
                quest.active = !quest.active;
                log::debug!("Quest '{}' is now active: {}", quest.title, quest.active);
                true
            }
            None => false,
        }
    }

    pub fn toggle_by_id(&mut self, id: QuestId) -> bool {
        match self.quests.iter_mut().find(|q| q.id == id) {
            Some(quest) => {
                quest.active = !quest.active;
                true
            }
            None => false,
        }
    }

    pub fn get(&self, id: QuestId) -> Option<&Quest> {
        self.quests.iter().find(|q| q.id == id)
    }

    pub fn find_by_title(&self, title: &str) -> Option<&Quest> {
        self.quests.iter().find(|q| q.title == title)
    }

    pub fn active_on(&self, date: CalendarDate) -> impl Iterator<Item = &Quest> {
        self.quests.iter().filter(move |q| q.is_active_on(&date))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Quest> {
        self.quests.iter()
    }

    pub fn len(&self) -> usize {
        self.quests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quests.is_empty()
    }
}
