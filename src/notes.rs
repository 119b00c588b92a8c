use std::collections::BTreeMap;

use crate::calendar::CalendarDate;

/// Free-text notes attached to calendar days. Append-only.
#[derive(Debug, Clone, Default)]
pub struct Annotations {
    notes: BTreeMap<CalendarDate, Vec<String>>,
}

impl Annotations {
    pub fn new() -> Self {
        Annotations::default()
    }

    /// Appends `text` to the notes of `date` unless it is blank. The text is
    /// kept as entered. Returns whether the note was stored.
    pub fn add(&mut self, date: CalendarDate, text: &str) -> bool {
        if text.trim().is_empty() {
            return false;
        }

        self.notes.entry(date).or_default().push(text.to_owned());
        log::debug!("Added note to {}", date);
        true
    }

    pub fn notes_on(&self, date: &CalendarDate) -> &[String] {
        self.notes.get(date).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn has_notes(&self, date: &CalendarDate) -> bool {
        !self.notes_on(date).is_empty()
    }

    /// Annotated days in calendar order.
    pub fn dates(&self) -> impl Iterator<Item = &CalendarDate> {
        self.notes.keys()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::Month;

    fn day(month: Month, day: u32) -> CalendarDate {
        CalendarDate::new(735, month, day).unwrap()
    }

    #[test]
    fn blank_notes_are_ignored() {
        let mut notes = Annotations::new();
        let date = day(Month::Neyavr, 3);

        assert!(!notes.add(date, ""));
        assert!(!notes.add(date, "   "));
        assert!(!notes.add(date, "\n\t"));
        assert!(notes.notes_on(&date).is_empty());
        assert!(!notes.has_notes(&date));
    }

    #[test]
    fn notes_keep_insertion_order() {
        let mut notes = Annotations::new();
        let date = day(Month::Neyavr, 3);

        notes.add(date, "Met Izek at the gate");
        notes.add(date, "  ");
        notes.add(date, "Found a clue");

        assert_eq!(notes.notes_on(&date), ["Met Izek at the gate", "Found a clue"]);
    }

    #[test]
    fn text_is_stored_as_entered() {
        let mut notes = Annotations::new();
        let date = day(Month::Mart, 1);
        notes.add(date, "  padded  ");
        assert_eq!(notes.notes_on(&date), ["  padded  "]);
    }

    #[test]
    fn days_are_kept_apart() {
        let mut notes = Annotations::new();
        notes.add(day(Month::Neyavr, 1), "reading");
        notes.add(day(Month::Octyavr, 1), "earlier");
        notes.add(CalendarDate::new(736, Month::Neyavr, 1).unwrap(), "next year");

        assert_eq!(notes.notes_on(&day(Month::Neyavr, 1)), ["reading"]);
        assert!(notes.notes_on(&day(Month::Neyavr, 2)).is_empty());

        let dates: Vec<_> = notes.dates().map(|d| d.to_string()).collect();
        assert_eq!(
            dates,
            vec!["Octyavr 1, 735", "Neyavr 1, 735", "Neyavr 1, 736"]
        );
    }
}
