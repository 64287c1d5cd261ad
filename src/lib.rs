//! Month grids for photo calendars.
//!
//! [`build_month_grid`] lays out the month containing a reference date as
//! rows of seven [`DayCell`]s, together with the localized month name and
//! weekday symbols selected by a [`CalendarOption`].  The result is a plain
//! value that a host UI recomputes whenever its date or options change.
mod grid;
mod navigate;
mod option;
pub use crate::grid::{build_month_grid, CalendarManager, DayCell, MonthGrid, WeekRow};
pub use crate::navigate::{next_month, next_year, previous_month, previous_year, OutOfTimeError};
pub use crate::option::{CalendarOption, ParseCalendarOptionError, WeekNumbering};

/// Number of cells in every [`WeekRow`]
pub const DAYS_IN_WEEK: usize = option::DAYS_IN_WEEK;
