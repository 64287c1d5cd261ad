use thiserror::Error;
use time::{Date, Month};

/// Returns the first day of the month after the one containing `date`
pub fn next_month(date: Date) -> Result<Date, OutOfTimeError> {
    let (year, month) = match date.month() {
        Month::December => (date.year().checked_add(1).ok_or(OutOfTimeError)?, Month::January),
        m => (date.year(), m.next()),
    };
    first_of_month(year, month)
}

/// Returns the first day of the month before the one containing `date`
pub fn previous_month(date: Date) -> Result<Date, OutOfTimeError> {
    let (year, month) = match date.month() {
        Month::January => (date.year().checked_sub(1).ok_or(OutOfTimeError)?, Month::December),
        m => (date.year(), m.previous()),
    };
    first_of_month(year, month)
}

/// Returns the first day of the same month one year after `date`
pub fn next_year(date: Date) -> Result<Date, OutOfTimeError> {
    let year = date.year().checked_add(1).ok_or(OutOfTimeError)?;
    first_of_month(year, date.month())
}

/// Returns the first day of the same month one year before `date`
pub fn previous_year(date: Date) -> Result<Date, OutOfTimeError> {
    let year = date.year().checked_sub(1).ok_or(OutOfTimeError)?;
    first_of_month(year, date.month())
}

fn first_of_month(year: i32, month: Month) -> Result<Date, OutOfTimeError> {
    let r = Date::from_calendar_date(year, month, 1).map_err(|_| OutOfTimeError);
    log::trace!("Navigating to {year}-{:02}: {r:?}", u8::from(month));
    r
}

#[derive(Copy, Clone, Debug, Eq, Error, PartialEq)]
#[error("reached the end of time")]
pub struct OutOfTimeError;
