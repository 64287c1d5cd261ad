use crate::editor::{DateEditor, DateEditorState, EditorInput, EditorOutput};
use crate::help::Help;
use crate::theme::BASE_STYLE;
use crate::view::MonthView;
use crossterm::event::{read, KeyCode, KeyEvent, KeyModifiers};
use photocal::{
    next_month, next_year, previous_month, previous_year, CalendarManager, MonthGrid,
    OutOfTimeError,
};
use ratatui::{
    backend::Backend,
    buffer::Buffer,
    layout::{Margin, Rect},
    widgets::Widget,
    Terminal,
};
use std::io::{self, Write};
use time::Date;

/// Interactive month viewer.  The displayed grid is rebuilt from the
/// manager every time the date or the week-number flag changes.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct App {
    manager: CalendarManager,
    today: Date,
    date: Date,
    show_week_number: bool,
    month: MonthGrid,
    state: AppState,
}

impl App {
    pub(crate) fn new(manager: CalendarManager, today: Date) -> App {
        App {
            manager,
            today,
            date: today,
            show_week_number: false,
            month: manager.month(today, false),
            state: AppState::Calendar,
        }
    }

    pub(crate) fn start_date(mut self, date: Date) -> App {
        self.date = date;
        self.update_month();
        self
    }

    pub(crate) fn show_week_number(mut self, flag: bool) -> App {
        self.show_week_number = flag;
        self.update_month();
        self
    }

    pub(crate) fn run<B: Backend>(mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        while !self.quitting() {
            terminal.draw(|frame| frame.render_widget(&self, frame.area()))?;
            self.handle_input()?;
        }
        Ok(())
    }

    fn handle_input(&mut self) -> io::Result<()> {
        let normal_modifiers = KeyModifiers::NONE | KeyModifiers::SHIFT;
        if let Some(KeyEvent {
            code, modifiers, ..
        }) = read()?.as_key_press_event()
        {
            if modifiers == KeyModifiers::CONTROL && code == KeyCode::Char('c') {
                self.state = AppState::Quitting;
            } else if !normal_modifiers.contains(modifiers) || !self.handle_key(code) {
                self.beep()?;
            }
        }
        // else: Redraw on resize, and we might as well redraw on other stuff
        // too
        Ok(())
    }

    // Returns `false` if the user pressed an invalid key
    fn handle_key(&mut self, key: KeyCode) -> bool {
        match &mut self.state {
            AppState::Calendar => match key {
                KeyCode::Char('j') | KeyCode::Down => self.step(next_month),
                KeyCode::Char('k') | KeyCode::Up => self.step(previous_month),
                KeyCode::Char('z') | KeyCode::PageDown => self.step(next_year),
                KeyCode::Char('w') | KeyCode::PageUp => self.step(previous_year),
                KeyCode::Char('0') | KeyCode::Home => {
                    self.set_date(self.today);
                    true
                }
                KeyCode::Char('#') => {
                    self.show_week_number = !self.show_week_number;
                    self.update_month();
                    true
                }
                KeyCode::Char('g') => {
                    self.state = AppState::Editing(DateEditorState::new(self.show_week_number));
                    true
                }
                KeyCode::Char('q') | KeyCode::Esc => {
                    self.state = AppState::Quitting;
                    true
                }
                KeyCode::Char('?') => {
                    self.state = AppState::Helping;
                    true
                }
                _ => false,
            },
            AppState::Helping => {
                self.state = AppState::Calendar;
                true
            }
            AppState::Editing(state) => {
                if matches!(key, KeyCode::Char('q' | 'g') | KeyCode::Esc) {
                    self.state = AppState::Calendar;
                    return true;
                }
                let output = match key {
                    KeyCode::Char('-') => state.handle_input(EditorInput::Negative),
                    KeyCode::Char('+') => state.handle_input(EditorInput::Positive),
                    KeyCode::Char(' ') => state.handle_input(EditorInput::ToggleWeekNumber),
                    KeyCode::Char(c) => match c.to_digit(10).and_then(|d| u8::try_from(d).ok()) {
                        Some(d) => state.handle_input(EditorInput::Digit(d)),
                        None => EditorOutput::Invalid,
                    },
                    KeyCode::Backspace | KeyCode::Delete => {
                        state.handle_input(EditorInput::Backspace)
                    }
                    KeyCode::Enter => state.handle_input(EditorInput::Enter),
                    _ => EditorOutput::Invalid,
                };
                match output {
                    EditorOutput::Ok => true,
                    EditorOutput::Invalid => false,
                    EditorOutput::Apply {
                        date,
                        show_week_number,
                    } => {
                        self.state = AppState::Calendar;
                        self.show_week_number = show_week_number;
                        self.set_date(date);
                        true
                    }
                }
            }
            AppState::Quitting => false,
        }
    }

    fn beep(&self) -> io::Result<()> {
        io::stdout().write_all(b"\x07")?;
        io::stdout().flush()
    }

    fn quitting(&self) -> bool {
        self.state == AppState::Quitting
    }

    fn step(&mut self, f: fn(Date) -> Result<Date, OutOfTimeError>) -> bool {
        match f(self.date) {
            Ok(date) => {
                self.set_date(date);
                true
            }
            Err(e) => {
                log::debug!("Cannot move from {}: {e}", self.date);
                false
            }
        }
    }

    fn set_date(&mut self, date: Date) {
        self.date = date;
        self.update_month();
    }

    fn update_month(&mut self) {
        self.month = self.manager.month(self.date, self.show_week_number);
    }
}

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        buf.set_style(area, BASE_STYLE);
        let cal_area = area.inner(Margin::new(0, 1));
        MonthView::new(&self.month, self.today).render(cal_area, buf);
        match self.state {
            AppState::Helping => Help.render(area, buf),
            AppState::Editing(ref state) => DateEditor(state).render(area, buf),
            AppState::Calendar | AppState::Quitting => (),
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum AppState {
    Calendar,
    Helping,
    Editing(DateEditorState),
    Quitting,
}

#[cfg(test)]
mod tests {
    use super::*;
    use photocal::CalendarOption;
    use time::macros::date;

    fn screen(app: &App, width: u16, height: u16) -> Vec<String> {
        let area = Rect::new(0, 0, width, height);
        let mut buffer = Buffer::empty(area);
        app.render(area, &mut buffer);
        buffer
            .content
            .chunks(usize::from(width))
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect()
    }

    fn app() -> App {
        App::new(
            CalendarManager::new(CalendarOption::En),
            date!(2024 - 01 - 22),
        )
    }

    #[test]
    fn test_render() {
        let app = app();
        assert_eq!(
            screen(&app, 40, 9),
            [
                "                                        ",
                "              January 2024              ",
                "       Su  Mo  Tu  We  Th  Fr  Sa       ",
                "            1   2   3   4   5   6       ",
                "        7   8   9  10  11  12  13       ",
                "       14  15  16  17  18  19  20       ",
                "       21 [22] 23  24  25  26  27       ",
                "       28  29  30  31                   ",
                "                                        ",
            ]
        );
    }

    #[test]
    fn test_render_week_numbers() {
        let mut app = app();
        assert!(app.handle_key(KeyCode::Char('#')));
        assert_eq!(
            screen(&app, 40, 9),
            [
                "                                        ",
                "              January 2024              ",
                "         Su  Mo  Tu  We  Th  Fr  Sa     ",
                "      1       1   2   3   4   5   6     ",
                "      2   7   8   9  10  11  12  13     ",
                "      3  14  15  16  17  18  19  20     ",
                "      4  21 [22] 23  24  25  26  27     ",
                "      5  28  29  30  31                 ",
                "                                        ",
            ]
        );
    }

    #[test]
    fn test_navigation() {
        let mut app = app();
        assert!(app.handle_key(KeyCode::Char('j')));
        assert_eq!(app.month.month, time::Month::February);
        assert!(app.handle_key(KeyCode::Up));
        assert!(app.handle_key(KeyCode::Up));
        assert_eq!((app.month.year, app.month.month), (2023, time::Month::December));
        assert!(app.handle_key(KeyCode::PageDown));
        assert_eq!((app.month.year, app.month.month), (2024, time::Month::December));
        assert!(app.handle_key(KeyCode::Char('w')));
        assert!(app.handle_key(KeyCode::Char('w')));
        assert_eq!((app.month.year, app.month.month), (2022, time::Month::December));
        assert!(app.handle_key(KeyCode::Home));
        assert_eq!(app.month, app.manager.month(date!(2024 - 01 - 22), false));
        assert!(!app.handle_key(KeyCode::Char('x')));
    }

    #[test]
    fn test_end_of_time() {
        let mut app = app().start_date(Date::MAX);
        assert!(!app.handle_key(KeyCode::Char('j')));
        assert!(!app.handle_key(KeyCode::Char('z')));
        assert!(app.handle_key(KeyCode::Char('k')));
    }

    #[test]
    fn test_editor() {
        let mut app = app();
        assert!(app.handle_key(KeyCode::Char('g')));
        for c in ['2', '0', '1', '5', '0', '2', ' '] {
            assert!(app.handle_key(KeyCode::Char(c)));
        }
        assert!(!app.handle_key(KeyCode::Char('x')));
        assert!(app.handle_key(KeyCode::Enter));
        assert_eq!(app.state, AppState::Calendar);
        assert!(app.show_week_number);
        assert_eq!(app.month, app.manager.month(date!(2015 - 02 - 01), true));
        assert_eq!(app.month.weeks.len(), 4);
    }

    #[test]
    fn test_render_editor() {
        let mut app = app();
        assert!(app.handle_key(KeyCode::Char('g')));
        assert!(app.handle_key(KeyCode::Char('1')));
        let lines = screen(&app, 40, 12);
        assert!(lines.iter().any(|l| l.contains(" Show Month ")));
        assert!(lines.iter().any(|l| l.contains("1YYY-MM")));
        assert!(lines.iter().any(|l| l.contains("[ ] Week numbers")));
        assert!(lines.iter().any(|l| l.contains("[ENTER]")));
    }

    #[test]
    fn test_editor_cancel() {
        let mut app = app();
        assert!(app.handle_key(KeyCode::Char('g')));
        assert!(app.handle_key(KeyCode::Char('1')));
        assert!(app.handle_key(KeyCode::Esc));
        assert_eq!(app.state, AppState::Calendar);
        assert_eq!(app.month.month, time::Month::January);
    }

    #[test]
    fn test_help() {
        let mut app = app();
        assert!(app.handle_key(KeyCode::Char('?')));
        assert_eq!(app.state, AppState::Helping);
        let lines = screen(&app, 60, 20);
        assert!(lines.iter().any(|l| l.contains(" Commands ")));
        assert!(lines.iter().any(|l| l.contains("Toggle week numbers")));
        assert!(app.handle_key(KeyCode::Char('x')));
        assert_eq!(app.state, AppState::Calendar);
    }

    #[test]
    fn test_quit() {
        let mut app = app();
        assert!(app.handle_key(KeyCode::Char('q')));
        assert!(app.quitting());
    }
}
