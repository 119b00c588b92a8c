//! Plain-text rendering of a session: header, month grid and side panels.

use chrono::Datelike;
use itertools::Itertools;
use std::iter;

use crate::calendar::CalendarDate;
use crate::moon::MoonPhase;
use crate::session::{DaySummary, Session};

const WEEKDAYS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];
const CELL_WIDTH: usize = 8;

pub const LEGEND: &str = "[n] today  * event  + notes  ! quest  o full moon  # highlighted quest";

/// Blank cells before day 1: the Gregorian weekday of the month's first
/// day, counted from Sunday.
pub fn leading_blanks(date: CalendarDate) -> usize {
    date.first_of_month()
        .to_gregorian()
        .map_or(0, |d| d.weekday().num_days_from_sunday() as usize)
}

fn day_cell(day: &DaySummary) -> String {
    let mut cell = if day.is_current {
        format!("[{:>2}]", day.date.day())
    } else {
        format!(" {:>2} ", day.date.day())
    };

    if day.events > 0 {
        cell.push('*');
    }
    if day.has_notes {
        cell.push('+');
    }
    if day.active_quests > 0 {
        cell.push('!');
    }
    if day.phase == MoonPhase::FullMoon {
        cell.push('o');
    }
    if day.highlighted {
        cell.push('#');
    }

    cell
}

fn pad(cell: impl AsRef<str>) -> String {
    format!("{:<width$}", cell.as_ref(), width = CELL_WIDTH)
}

pub fn header(session: &Session) -> String {
    let today = session.current_date();
    format!(
        "{} B.C.\nMoon Phase: {}",
        today,
        session.moon_phase(&today)
    )
}

pub fn month_grid(session: &Session) -> String {
    let blanks = leading_blanks(session.current_date());
    let days = session.month_summary();
    let cells = iter::repeat(String::new())
        .take(blanks)
        .chain(days.iter().map(day_cell));

    let weekdays = WEEKDAYS.iter().map(pad).join("");
    let chunks = cells.chunks(WEEKDAYS.len());
    let rows = (&chunks)
        .into_iter()
        .map(|row| row.map(pad).join("").trim_end().to_owned())
        .join("\n");

    format!("{}\n{}", weekdays.trim_end(), rows)
}

pub fn quest_panel(session: &Session) -> String {
    let today = session.current_date();
    let quests = session.active_quests_on(today);

    let mut panel = String::from("Active Quests");
    if quests.is_empty() {
        panel.push_str("\n  (none)");
    }
    for quest in quests {
        let marker = if session.highlight() == Some(quest.title.as_str()) {
            '>'
        } else {
            '-'
        };
        panel.push_str(&format!(
            "\n  {} {}: {}",
            marker, quest.title, quest.description
        ));
    }
    panel
}

pub fn notes_panel(session: &Session) -> String {
    let today = session.current_date();
    let mut panel = format!("Notes for {} {}", today.month(), today.day());
    for note in session.notes_on(&today) {
        panel.push_str(&format!("\n  - {}", note));
    }
    panel
}

pub fn events_panel(session: &Session) -> Option<String> {
    let date = session.selection()?;
    let mut panel = format!("Events for {} {}", date.month(), date.day());
    for event in session.selected_events() {
        panel.push_str(&format!(
            "\n  {} ({})\n    {}",
            event.title, event.category, event.description
        ));
    }
    Some(panel)
}

pub fn render(session: &Session) -> String {
    let mut sections = vec![
        header(session),
        month_grid(session),
        LEGEND.to_owned(),
        quest_panel(session),
        notes_panel(session),
    ];
    sections.extend(events_panel(session));
    sections.join("\n\n")
}
