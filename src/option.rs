use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use time::{Month, Weekday};

pub(crate) const DAYS_IN_WEEK: usize = 7;

/// The locales a calendar can be displayed in.
///
/// Each option fixes the month names, the weekday symbols, the first day of
/// the week, and the rule used to number weeks.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum CalendarOption {
    #[default]
    En,
    Ru,
    De,
    Fr,
}

/// How week-of-year numbers are assigned to the rows of a month
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum WeekNumbering {
    /// ISO 8601: weeks start on Monday, and week 1 is the week containing the
    /// year's first Thursday
    Iso,
    /// Weeks start on Sunday, and week 1 is the week containing January 1
    Us,
}

impl CalendarOption {
    pub const ALL: [CalendarOption; 4] = [
        CalendarOption::En,
        CalendarOption::Ru,
        CalendarOption::De,
        CalendarOption::Fr,
    ];

    pub fn code(self) -> &'static str {
        match self {
            CalendarOption::En => "en",
            CalendarOption::Ru => "ru",
            CalendarOption::De => "de",
            CalendarOption::Fr => "fr",
        }
    }

    pub fn first_weekday(self) -> Weekday {
        match self {
            CalendarOption::En => Weekday::Sunday,
            CalendarOption::Ru | CalendarOption::De | CalendarOption::Fr => Weekday::Monday,
        }
    }

    pub fn week_numbering(self) -> WeekNumbering {
        match self.first_weekday() {
            Weekday::Sunday => WeekNumbering::Us,
            _ => WeekNumbering::Iso,
        }
    }

    pub fn month_name(self, month: Month) -> &'static str {
        self.month_names()[usize::from(u8::from(month) - 1)]
    }

    /// Short weekday symbols in Sunday-first order, regardless of the first
    /// day of the week
    pub fn canonical_weekday_symbols(self) -> [&'static str; DAYS_IN_WEEK] {
        match self {
            CalendarOption::En => ["Su", "Mo", "Tu", "We", "Th", "Fr", "Sa"],
            CalendarOption::Ru => ["Вс", "Пн", "Вт", "Ср", "Чт", "Пт", "Сб"],
            CalendarOption::De => ["So", "Mo", "Di", "Mi", "Do", "Fr", "Sa"],
            CalendarOption::Fr => ["di", "lu", "ma", "me", "je", "ve", "sa"],
        }
    }

    /// Short weekday symbols starting at [`CalendarOption::first_weekday`]
    pub fn weekday_symbols(self) -> [&'static str; DAYS_IN_WEEK] {
        let canonical = self.canonical_weekday_symbols();
        let start = usize::from(self.first_weekday().number_days_from_sunday());
        std::array::from_fn(|i| canonical[(start + i) % DAYS_IN_WEEK])
    }

    /// Column (0-based) at which `wd` is displayed
    pub fn column_of(self, wd: Weekday) -> usize {
        let first = usize::from(self.first_weekday().number_days_from_sunday());
        let wd = usize::from(wd.number_days_from_sunday());
        (wd + DAYS_IN_WEEK - first) % DAYS_IN_WEEK
    }

    fn month_names(self) -> &'static [&'static str; 12] {
        match self {
            CalendarOption::En => &[
                "January",
                "February",
                "March",
                "April",
                "May",
                "June",
                "July",
                "August",
                "September",
                "October",
                "November",
                "December",
            ],
            CalendarOption::Ru => &[
                "Январь",
                "Февраль",
                "Март",
                "Апрель",
                "Май",
                "Июнь",
                "Июль",
                "Август",
                "Сентябрь",
                "Октябрь",
                "Ноябрь",
                "Декабрь",
            ],
            CalendarOption::De => &[
                "Januar",
                "Februar",
                "März",
                "April",
                "Mai",
                "Juni",
                "Juli",
                "August",
                "September",
                "Oktober",
                "November",
                "Dezember",
            ],
            CalendarOption::Fr => &[
                "janvier",
                "février",
                "mars",
                "avril",
                "mai",
                "juin",
                "juillet",
                "août",
                "septembre",
                "octobre",
                "novembre",
                "décembre",
            ],
        }
    }
}

impl fmt::Display for CalendarOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for CalendarOption {
    type Err = ParseCalendarOptionError;

    fn from_str(s: &str) -> Result<CalendarOption, ParseCalendarOptionError> {
        CalendarOption::ALL
            .into_iter()
            .find(|opt| opt.code().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParseCalendarOptionError(s.to_owned()))
    }
}

#[derive(Clone, Debug, Eq, Error, PartialEq)]
#[error("unknown calendar locale {0:?}; expected one of: en, ru, de, fr")]
pub struct ParseCalendarOptionError(pub String);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        assert_eq!("en".parse::<CalendarOption>(), Ok(CalendarOption::En));
        assert_eq!("RU".parse::<CalendarOption>(), Ok(CalendarOption::Ru));
        assert_eq!("De".parse::<CalendarOption>(), Ok(CalendarOption::De));
        assert_eq!(
            "xx".parse::<CalendarOption>(),
            Err(ParseCalendarOptionError(String::from("xx")))
        );
        assert!("".parse::<CalendarOption>().is_err());
    }

    #[test]
    fn test_display_roundtrip() {
        for opt in CalendarOption::ALL {
            assert_eq!(opt.to_string().parse::<CalendarOption>(), Ok(opt));
        }
    }

    #[test]
    fn test_weekday_symbols_are_rotation() {
        for opt in CalendarOption::ALL {
            let canonical = opt.canonical_weekday_symbols();
            let symbols = opt.weekday_symbols();
            let start = usize::from(opt.first_weekday().number_days_from_sunday());
            assert_eq!(symbols[0], canonical[start]);
            for (i, sym) in symbols.iter().enumerate() {
                assert_eq!(*sym, canonical[(start + i) % DAYS_IN_WEEK]);
            }
        }
    }

    #[test]
    fn test_en_symbols() {
        assert_eq!(
            CalendarOption::En.weekday_symbols(),
            ["Su", "Mo", "Tu", "We", "Th", "Fr", "Sa"]
        );
    }

    #[test]
    fn test_ru_symbols() {
        assert_eq!(
            CalendarOption::Ru.weekday_symbols(),
            ["Пн", "Вт", "Ср", "Чт", "Пт", "Сб", "Вс"]
        );
    }

    #[test]
    fn test_column_of() {
        assert_eq!(CalendarOption::En.column_of(Weekday::Sunday), 0);
        assert_eq!(CalendarOption::En.column_of(Weekday::Saturday), 6);
        assert_eq!(CalendarOption::Ru.column_of(Weekday::Monday), 0);
        assert_eq!(CalendarOption::Ru.column_of(Weekday::Sunday), 6);
    }

    #[test]
    fn test_week_numbering() {
        assert_eq!(CalendarOption::En.week_numbering(), WeekNumbering::Us);
        assert_eq!(CalendarOption::Fr.week_numbering(), WeekNumbering::Iso);
    }

    #[test]
    fn test_month_name() {
        assert_eq!(CalendarOption::En.month_name(Month::September), "September");
        assert_eq!(CalendarOption::Ru.month_name(Month::January), "Январь");
        assert_eq!(CalendarOption::Fr.month_name(Month::August), "août");
    }
}
