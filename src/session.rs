use crate::calendar::CalendarDate;
use crate::campaign::{Campaign, ScriptedEvent};
use crate::clock::Clock;
use crate::error::Result;
use crate::moon::{MoonOracle, MoonPhase};
use crate::notes::Annotations;
use crate::quest::{Quest, QuestId, QuestRegistry};

/// What the month grid shows for a single day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DaySummary {
    pub date: CalendarDate,
    pub events: usize,
    pub active_quests: usize,
    pub has_notes: bool,
    pub phase: MoonPhase,
    pub is_current: bool,
    pub highlighted: bool,
}

/// State of one calendar view. The campaign is fixed at construction;
/// quests, notes, highlight and selection change through user intents.
#[derive(Debug)]
pub struct Session {
    campaign: Campaign,
    clock: Clock,
    oracle: MoonOracle,
    quests: QuestRegistry,
    notes: Annotations,
    highlight: Option<String>,
    selection: Option<CalendarDate>,
}

impl Session {
    pub fn new(campaign: Campaign) -> Self {
        Session {
            clock: Clock::new(campaign.start),
            quests: QuestRegistry::from_seeds(&campaign.quests),
            oracle: MoonOracle::default(),
            notes: Annotations::new(),
            highlight: None,
            selection: None,
            campaign,
        }
    }

    pub fn with_oracle(mut self, oracle: MoonOracle) -> Self {
        self.oracle = oracle;
        self
    }

    pub fn starting_at(mut self, date: CalendarDate) -> Self {
        self.clock = Clock::new(date);
        self
    }

    pub fn campaign(&self) -> &Campaign {
        &self.campaign
    }

    pub fn oracle(&self) -> &MoonOracle {
        &self.oracle
    }

    pub fn current_date(&self) -> CalendarDate {
        self.clock.current()
    }

    pub fn advance(&mut self, days: i64) -> CalendarDate {
        self.clock.advance(days)
    }

    pub fn retreat(&mut self, days: i64) -> CalendarDate {
        self.clock.retreat(days)
    }

    /// Moves to `day` of the displayed month. If that day carries scripted
    /// events they become the selection; otherwise the selection is kept.
    pub fn jump_to_day(&mut self, day: u32) -> Result<CalendarDate> {
        let date = self.clock.jump_to_day(day)?;
        if self.campaign.events_on(date).next().is_some() {
            self.selection = Some(date);
        }
        Ok(date)
    }

    /// Events on `day` of the displayed month.
    pub fn events_on_day(&self, day: u32) -> Vec<&ScriptedEvent> {
        let current = self.current_date();
        self.campaign
            .events
            .iter()
            .filter(|event| {
                event.date.year() == current.year()
                    && event.date.month() == current.month()
                    && event.date.day() == day
            })
            .collect()
    }

    pub fn events_on(&self, date: CalendarDate) -> impl Iterator<Item = &ScriptedEvent> {
        self.campaign.events_on(date)
    }

    pub fn selected_events(&self) -> Vec<&ScriptedEvent> {
        self.selection
            .map(|date| self.campaign.events_on(date).collect())
            .unwrap_or_default()
    }

    pub fn selection(&self) -> Option<CalendarDate> {
        self.selection
    }

    pub fn quests(&self) -> &QuestRegistry {
        &self.quests
    }

    pub fn active_quests_on(&self, date: CalendarDate) -> Vec<&Quest> {
        self.quests.active_on(date).collect()
    }

    /// Adds a quest covering the current date only.
    pub fn add_quest(&mut self, title: &str, description: &str) -> Option<QuestId> {
        let today = self.current_date();
        self.quests.add(title, description, today, today)
    }

    pub fn add_quest_between(
        &mut self,
        title: &str,
        description: &str,
        start: CalendarDate,
        end: CalendarDate,
    ) -> Option<QuestId> {
        self.quests.add(title, description, start, end)
    }

    pub fn toggle_active(&mut self, title: &str) -> bool {
        self.quests.toggle_active(title)
    }

    pub fn notes(&self) -> &Annotations {
        &self.notes
    }

    /// Attaches a note to the current date.
    pub fn add_note(&mut self, text: &str) -> bool {
        let today = self.current_date();
        self.notes.add(today, text)
    }

    pub fn add_note_on(&mut self, date: CalendarDate, text: &str) -> bool {
        self.notes.add(date, text)
    }

    pub fn notes_on(&self, date: &CalendarDate) -> &[String] {
        self.notes.notes_on(date)
    }

    pub fn highlight(&self) -> Option<&str> {
        self.highlight.as_deref()
    }

    pub fn set_highlight(&mut self, title: Option<String>) {
        self.highlight = title;
    }

    /// Highlights `title`, or clears the highlight if `title` already is.
    pub fn toggle_highlight(&mut self, title: &str) {
        if self.highlight.as_deref() == Some(title) {
            self.highlight = None;
        } else {
            self.highlight = Some(title.to_owned());
        }
    }

    /// Whether a quest active on `date` carries the highlighted title.
    pub fn is_highlighted(&self, date: CalendarDate) -> bool {
        match &self.highlight {
            Some(title) => self.quests.active_on(date).any(|q| &q.title == title),
            None => false,
        }
    }

    pub fn moon_phase(&self, date: &CalendarDate) -> MoonPhase {
        self.oracle.phase(date)
    }

    pub fn day_summary(&self, date: CalendarDate) -> DaySummary {
        DaySummary {
            date,
            events: self.campaign.events_on(date).count(),
            active_quests: self.quests.active_on(date).count(),
            has_notes: self.notes.has_notes(&date),
            phase: self.oracle.phase(&date),
            is_current: date == self.current_date(),
            highlighted: self.is_highlighted(date),
        }
    }

    /// Summaries of every day in the displayed month.
    pub fn month_summary(&self) -> Vec<DaySummary> {
        self.current_date()
            .days_of_month()
            .map(|date| self.day_summary(date))
            .collect()
    }
}
