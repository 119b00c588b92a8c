use derive_more::Display;
use serde::{Deserialize, Serialize};

use crate::calendar::{CalendarDate, Month, CAMPAIGN_YEAR};

const HALF_CYCLE: i64 = 14;
const NEW_MOON_OFFSET: i64 = 7;

#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoonPhase {
    #[display(fmt = "Full Moon")]
    FullMoon,
    #[display(fmt = "New Moon")]
    NewMoon,
    Waxing,
    Waning,
}

/// How days between a date and the reference full moon are counted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Reckoning {
    /// Reads both dates as Gregorian days. Month lengths of 30 or 31 days
    /// shift the phases against the 28-day grid from one month to the next.
    Gregorian,
    /// Counts days on the 28-day calendar itself.
    Fixed,
}

impl Default for Reckoning {
    fn default() -> Self {
        Reckoning::Gregorian
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoonOracle {
    reference: CalendarDate,
    reckoning: Reckoning,
}

impl Default for MoonOracle {
    fn default() -> Self {
        MoonOracle::new(default_reference(), Reckoning::default())
    }
}

/// Neyavr 1, 735: the full moon of the Tarokka reading.
pub fn default_reference() -> CalendarDate {
    CalendarDate::first_of(CAMPAIGN_YEAR, Month::Neyavr)
}

impl MoonOracle {
    pub fn new(reference: CalendarDate, reckoning: Reckoning) -> Self {
        MoonOracle {
            reference,
            reckoning,
        }
    }

    pub fn reference(&self) -> CalendarDate {
        self.reference
    }

    pub fn reckoning(&self) -> Reckoning {
        self.reckoning
    }

    pub fn days_since_reference(&self, date: &CalendarDate) -> i64 {
        let fixed = date.days_since(&self.reference);
        match self.reckoning {
            Reckoning::Fixed => fixed,
            Reckoning::Gregorian => match (date.to_gregorian(), self.reference.to_gregorian()) {
                (Some(day), Some(reference)) => day.signed_duration_since(reference).num_days(),
                _ => {
                    log::warn!(
                        "{} has no Gregorian reading, counting on the 28-day calendar",
                        date
                    );
                    fixed
                }
            },
        }
    }

    pub fn phase(&self, date: &CalendarDate) -> MoonPhase {
        // Truncating remainder: dates before the reference keep a negative
        // offset and therefore read as waning.
        match self.days_since_reference(date) % HALF_CYCLE {
            0 => MoonPhase::FullMoon,
            NEW_MOON_OFFSET => MoonPhase::NewMoon,
            offset if offset < NEW_MOON_OFFSET => MoonPhase::Waning,
            _ => MoonPhase::Waxing,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference() -> CalendarDate {
        CalendarDate::new(735, Month::Neyavr, 1).unwrap()
    }

    #[test]
    fn default_reference_is_first_of_neyavr() {
        assert_eq!(default_reference(), reference());
        assert_eq!(MoonOracle::default().reckoning(), Reckoning::Gregorian);
    }

    #[test]
    fn phases_within_first_month() {
        let oracle = MoonOracle::default();
        let phase_after = |days: i64| oracle.phase(&reference().advance(days));

        assert_eq!(phase_after(0), MoonPhase::FullMoon);
        assert_eq!(phase_after(3), MoonPhase::Waning);
        assert_eq!(phase_after(7), MoonPhase::NewMoon);
        assert_eq!(phase_after(13), MoonPhase::Waxing);
        assert_eq!(phase_after(14), MoonPhase::FullMoon);
        assert_eq!(phase_after(21), MoonPhase::NewMoon);
    }

    #[test]
    fn dates_before_reference_wane() {
        let oracle = MoonOracle::default();
        let death_house = CalendarDate::new(735, Month::Octyavr, 27).unwrap();
        // Oct 27 to Nov 1 is five real days.
        assert_eq!(oracle.days_since_reference(&death_house), -5);
        assert_eq!(oracle.phase(&death_house), MoonPhase::Waning);
        assert_eq!(
            oracle.phase(&reference().retreat(7)),
            MoonPhase::Waning
        );
    }

    #[test]
    fn gregorian_reckoning_drifts_across_months() {
        let oracle = MoonOracle::new(reference(), Reckoning::Gregorian);
        let first_of_dekavr = CalendarDate::new(735, Month::Dekavr, 1).unwrap();
        // November has 30 real days, so 1 Dekavr is 30 days out.
        assert_eq!(oracle.days_since_reference(&first_of_dekavr), 30);
        assert_eq!(oracle.phase(&first_of_dekavr), MoonPhase::Waning);
    }

    #[test]
    fn fixed_reckoning_follows_grid() {
        let oracle = MoonOracle::new(reference(), Reckoning::Fixed);
        let first_of_dekavr = CalendarDate::new(735, Month::Dekavr, 1).unwrap();
        assert_eq!(oracle.days_since_reference(&first_of_dekavr), 28);
        assert_eq!(oracle.phase(&first_of_dekavr), MoonPhase::FullMoon);

        let death_house = CalendarDate::new(735, Month::Octyavr, 27).unwrap();
        assert_eq!(oracle.days_since_reference(&death_house), -2);
    }

    #[test]
    fn phase_labels() {
        assert_eq!(MoonPhase::FullMoon.to_string(), "Full Moon");
        assert_eq!(MoonPhase::NewMoon.to_string(), "New Moon");
        assert_eq!(MoonPhase::Waxing.to_string(), "Waxing");
    }

    #[test]
    fn reckoning_from_toml() {
        #[derive(Deserialize)]
        struct Holder {
            reckoning: Reckoning,
        }
        let holder: Holder = toml::from_str(r#"reckoning = "fixed""#).unwrap();
        assert_eq!(holder.reckoning, Reckoning::Fixed);
    }
}
