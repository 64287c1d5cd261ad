use crate::theme::{BASE_STYLE, TITLE_STYLE, TODAY_STYLE, WEEKDAY_STYLE, WEEK_NUMBER_STYLE};
use photocal::{DayCell, MonthGrid, WeekRow, DAYS_IN_WEEK};
use ratatui::{
    buffer::Buffer,
    layout::{Flex, Layout, Rect},
    style::Style,
    text::{Line, Span, Text},
    widgets::{Paragraph, Widget},
};
use time::Date;

/// Number of columns per day of week
const DAY_WIDTH: u16 = 4;

/// Number of columns taken up by the week number column, when shown
const WEEK_NUMBER_WIDTH: u16 = 4;

const BLANK_DAY: &str = "    ";

/// Renders a [`MonthGrid`] as a title line, a weekday header, and one line
/// per week, centered horizontally in the available area
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct MonthView<'a> {
    grid: &'a MonthGrid,
    today: Date,
}

impl<'a> MonthView<'a> {
    pub(crate) fn new(grid: &'a MonthGrid, today: Date) -> Self {
        MonthView { grid, today }
    }

    pub(crate) fn width(&self) -> u16 {
        let mut width = DAY_WIDTH * 7;
        if self.shows_week_numbers() {
            width += WEEK_NUMBER_WIDTH;
        }
        width
    }

    // Week numbers are either present on every row or on none
    fn shows_week_numbers(&self) -> bool {
        self.grid.weeks.iter().any(|w| w.number.is_some())
    }

    fn today_day(&self) -> Option<u8> {
        self.grid.contains(self.today).then(|| self.today.day())
    }

    pub(crate) fn title(&self) -> Line<'static> {
        Line::styled(self.grid.title(), TITLE_STYLE)
    }

    pub(crate) fn header(&self) -> Line<'static> {
        let mut spans = Vec::with_capacity(DAYS_IN_WEEK + 1);
        if self.shows_week_numbers() {
            spans.push(Span::styled(BLANK_DAY, BASE_STYLE));
        }
        spans.extend(
            self.grid
                .week_symbols
                .iter()
                .map(|sym| Span::styled(format!(" {sym:>2} "), WEEKDAY_STYLE)),
        );
        Line::from(spans)
    }

    pub(crate) fn week_line(&self, week: &WeekRow) -> Line<'static> {
        let today = self.today_day();
        let mut spans = Vec::with_capacity(DAYS_IN_WEEK + 1);
        if let Some(n) = week.number {
            spans.push(Span::styled(format!(" {n:>2} "), WEEK_NUMBER_STYLE));
        }
        spans.extend(week.days.iter().map(|&cell| show_day(cell, today)));
        Line::from(spans)
    }

    pub(crate) fn lines(&self) -> Vec<Line<'static>> {
        let mut lines = Vec::with_capacity(self.grid.weeks.len() + 2);
        lines.push(self.title().centered());
        lines.push(self.header());
        lines.extend(self.grid.weeks.iter().map(|w| self.week_line(w)));
        lines
    }
}

impl Widget for MonthView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let width = self.width().min(area.width);
        let [area] = Layout::horizontal([width]).flex(Flex::Center).areas(area);
        Paragraph::new(Text::from(self.lines())).render(area, buf);
    }
}

fn show_day(cell: DayCell, today: Option<u8>) -> Span<'static> {
    match cell {
        DayCell::Blank => Span::styled(BLANK_DAY, BASE_STYLE),
        DayCell::Day(n) if Some(n) == today => Span::styled(format!("[{n:2}]"), TODAY_STYLE),
        DayCell::Day(n) => Span::styled(format!(" {n:2} "), Style::new()),
    }
}

/// Renders the month as plain text, one line per row, with trailing
/// whitespace removed
pub(crate) fn plain_text(grid: &MonthGrid, today: Date) -> String {
    let view = MonthView::new(grid, today);
    let width = usize::from(view.width());
    let mut out = format!("{:^width$}", grid.title()).trim_end().to_owned();
    out.push('\n');
    for line in view.lines().into_iter().skip(1) {
        let s = line
            .spans
            .iter()
            .map(|span| span.content.as_ref())
            .collect::<String>();
        out.push_str(s.trim_end());
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use photocal::{build_month_grid, CalendarOption};
    use time::macros::date;

    #[test]
    fn test_plain_text() {
        let grid = build_month_grid(date!(2024 - 01 - 01), CalendarOption::En, false);
        let s = plain_text(&grid, date!(2024 - 01 - 22));
        assert_eq!(
            s,
            concat!(
                "        January 2024\n",
                " Su  Mo  Tu  We  Th  Fr  Sa\n",
                "      1   2   3   4   5   6\n",
                "  7   8   9  10  11  12  13\n",
                " 14  15  16  17  18  19  20\n",
                " 21 [22] 23  24  25  26  27\n",
                " 28  29  30  31\n",
            )
        );
    }

    #[test]
    fn test_plain_text_week_numbers() {
        let grid = build_month_grid(date!(2015 - 02 - 14), CalendarOption::Ru, true);
        let s = plain_text(&grid, date!(2024 - 01 - 22));
        assert_eq!(
            s,
            concat!(
                "          Февраль 2015\n",
                "     Пн  Вт  Ср  Чт  Пт  Сб  Вс\n",
                "  5                           1\n",
                "  6   2   3   4   5   6   7   8\n",
                "  7   9  10  11  12  13  14  15\n",
                "  8  16  17  18  19  20  21  22\n",
                "  9  23  24  25  26  27  28\n",
            )
        );
    }

    #[test]
    fn test_today_outside_month() {
        let grid = build_month_grid(date!(2024 - 02 - 01), CalendarOption::En, false);
        let view = MonthView::new(&grid, date!(2024 - 01 - 22));
        assert_eq!(view.today_day(), None);
        let s = plain_text(&grid, date!(2024 - 01 - 22));
        assert!(!s.contains('['));
    }

    #[test]
    fn test_width() {
        let grid = build_month_grid(date!(2024 - 02 - 01), CalendarOption::En, false);
        assert_eq!(MonthView::new(&grid, date!(2024 - 02 - 01)).width(), 28);
        let grid = build_month_grid(date!(2024 - 02 - 01), CalendarOption::En, true);
        assert_eq!(MonthView::new(&grid, date!(2024 - 02 - 01)).width(), 32);
    }
}
