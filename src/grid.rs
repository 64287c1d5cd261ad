use crate::option::{CalendarOption, WeekNumbering, DAYS_IN_WEEK};
use std::iter::successors;
use time::{Date, Month};

/// One slot of a [`WeekRow`]
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum DayCell {
    /// Padding for a day belonging to the previous or next month
    #[default]
    Blank,
    /// A day of the displayed month
    Day(u8),
}

impl DayCell {
    pub fn number(self) -> Option<u8> {
        match self {
            DayCell::Blank => None,
            DayCell::Day(n) => Some(n),
        }
    }

    pub fn is_blank(self) -> bool {
        self == DayCell::Blank
    }
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct WeekRow {
    /// Week of the year, present only if week numbers were requested
    pub number: Option<u8>,
    pub days: [DayCell; DAYS_IN_WEEK],
}

impl WeekRow {
    fn empty() -> Self {
        WeekRow {
            number: None,
            days: [DayCell::Blank; DAYS_IN_WEEK],
        }
    }

    pub fn iter_days(&self) -> impl Iterator<Item = u8> + '_ {
        self.days.iter().filter_map(|c| c.number())
    }

    pub fn contains_day(&self, day: u8) -> bool {
        self.iter_days().any(|d| d == day)
    }
}

/// A month laid out as rows of weeks, ready to be displayed
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct MonthGrid {
    pub year: i32,
    pub month: Month,
    pub option: CalendarOption,
    /// Localized month name
    pub name: &'static str,
    /// Short weekday labels, starting at the option's first day of the week
    pub week_symbols: [&'static str; DAYS_IN_WEEK],
    pub weeks: Vec<WeekRow>,
}

impl MonthGrid {
    pub fn title(&self) -> String {
        format!("{} {}", self.name, self.year)
    }

    pub fn contains(&self, date: Date) -> bool {
        date.year() == self.year && date.month() == self.month
    }

    pub fn days_in_month(&self) -> u8 {
        self.weeks
            .iter()
            .flat_map(WeekRow::iter_days)
            .max()
            .unwrap_or_default()
    }
}

/// Lays out the month containing `reference_date`.
///
/// Only the year and month of `reference_date` are used.  The first row
/// starts on `option`'s first day of the week, with blank cells for any days
/// preceding the 1st; the last row is padded with blank cells after the last
/// day of the month.  If `show_week_number` is set, each row is numbered with
/// `option`'s [`WeekNumbering`].
pub fn build_month_grid(
    reference_date: Date,
    option: CalendarOption,
    show_week_number: bool,
) -> MonthGrid {
    let year = reference_date.year();
    let month = reference_date.month();
    let first = Date::from_calendar_date(year, month, 1).unwrap_or(reference_date);
    let mut weeks = Vec::with_capacity(6);
    let mut row = WeekRow::empty();
    for date in iter_month_days(first) {
        let col = option.column_of(date.weekday());
        if col == 0 && date != first {
            weeks.push(row);
            row = WeekRow::empty();
        }
        row.days[col] = DayCell::Day(date.day());
        if show_week_number && row.number.is_none() {
            row.number = Some(week_number(date, col, option.week_numbering()));
        }
    }
    weeks.push(row);
    log::debug!(
        "Built {option} grid for {year}-{:02} with {} weeks",
        u8::from(month),
        weeks.len()
    );
    MonthGrid {
        year,
        month,
        option,
        name: option.month_name(month),
        week_symbols: option.weekday_symbols(),
        weeks,
    }
}

// Returns every day of the month starting at `first`
fn iter_month_days(first: Date) -> impl Iterator<Item = Date> {
    let month = first.month();
    successors(Some(first), |&d| d.next_day()).take_while(move |d| d.month() == month)
}

// `col` is the column at which `date` is displayed, so that the other days of
// its row can be located without constructing dates that may lie past the end
// of the calendar
fn week_number(date: Date, col: usize, numbering: WeekNumbering) -> u8 {
    match numbering {
        WeekNumbering::Iso => date.iso_week(),
        WeekNumbering::Us => {
            let days_to_saturday = u16::try_from(DAYS_IN_WEEK - 1 - col).unwrap_or_default();
            let saturday = date.ordinal() + days_to_saturday;
            if Date::from_ordinal_date(date.year(), saturday).is_err() {
                // The row's Saturday is in the next year, so the row contains
                // the next January 1
                return 1;
            }
            let jan1_offset = Date::from_ordinal_date(date.year(), 1)
                .map_or(0, |jan1| u16::from(jan1.weekday().number_days_from_sunday()));
            u8::try_from((saturday + jan1_offset) / 7).unwrap_or(u8::MAX)
        }
    }
}

/// Builds [`MonthGrid`]s for a single, fixed [`CalendarOption`]
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct CalendarManager {
    option: CalendarOption,
}

impl CalendarManager {
    pub fn new(option: CalendarOption) -> CalendarManager {
        CalendarManager { option }
    }

    pub fn option(&self) -> CalendarOption {
        self.option
    }

    pub fn week_symbols(&self) -> [&'static str; DAYS_IN_WEEK] {
        self.option.weekday_symbols()
    }

    pub fn month(&self, reference_date: Date, show_week_number: bool) -> MonthGrid {
        build_month_grid(reference_date, self.option, show_week_number)
    }
}
