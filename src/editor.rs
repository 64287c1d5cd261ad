use crate::theme::{
    editor::{READY_ENTER_STYLE, UNFILLED_CELL_STYLE},
    BASE_STYLE,
};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Flex, Layout, Margin, Rect},
    text::{Line, Span, Text},
    widgets::{Block, Clear, Widget},
};
use time::{Date, Month};

const OUTER_WIDTH: u16 = 22;
const OUTER_HEIGHT: u16 = 10;
const ENTER_POS: usize = 6;

/// Popup for choosing the displayed month and toggling week numbers
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct DateEditor<'a>(pub(crate) &'a DateEditorState);

impl Widget for DateEditor<'_> {
    /*
     * ......................
     * .┌─── Show Month ───┐.
     * .│                  │.
     * .│     -YYYY-MM     │.
     * .│                  │.
     * .│ [x] Week numbers │.
     * .│                  │.
     * .│     [ENTER]      │.
     * .└──────────────────┘.
     * ......................
     */

    fn render(self, area: Rect, buf: &mut Buffer) {
        let [outer_area] = Layout::horizontal([OUTER_WIDTH])
            .flex(Flex::Center)
            .areas(area);
        let [outer_area] = Layout::vertical([OUTER_HEIGHT])
            .flex(Flex::Center)
            .areas(outer_area);
        Clear.render(outer_area, buf);
        Block::new().style(BASE_STYLE).render(outer_area, buf);
        let block_area = outer_area.inner(Margin::new(1, 1));
        Block::bordered()
            .title(" Show Month ")
            .title_alignment(Alignment::Center)
            .render(block_area, buf);
        let text_area = block_area.inner(Margin::new(1, 1));
        self.0.to_text().render(text_area, buf);
    }
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) struct DateEditorState {
    negative: bool,
    year: [Option<u8>; 4],
    month: [Option<u8>; 2],
    pos: usize,
    show_week_number: bool,
}

impl DateEditorState {
    pub(crate) fn new(show_week_number: bool) -> DateEditorState {
        DateEditorState {
            show_week_number,
            ..DateEditorState::default()
        }
    }

    fn to_text(self) -> Text<'static> {
        Text::from_iter([
            Line::styled("", BASE_STYLE),
            self.date_line(),
            Line::styled("", BASE_STYLE),
            Line::styled(
                if self.show_week_number {
                    "[x] Week numbers"
                } else {
                    "[ ] Week numbers"
                },
                BASE_STYLE,
            ),
            Line::styled("", BASE_STYLE),
            // Only the "[ENTER]" text, not its centering padding, is
            // underlined when ready
            Line::from(Span::styled(
                "[ENTER]",
                if self.pos == ENTER_POS {
                    READY_ENTER_STYLE
                } else {
                    BASE_STYLE
                },
            )),
        ])
        .centered()
    }

    fn date_line(self) -> Line<'static> {
        let mut spans = Vec::new();
        spans.push(Span::styled(
            if self.negative { "-" } else { " " },
            BASE_STYLE,
        ));
        for (i, (fallback, digits)) in [("Y", self.year.as_slice()), ("M", self.month.as_slice())]
            .into_iter()
            .enumerate()
        {
            if i > 0 {
                spans.push(Span::styled("-", BASE_STYLE));
            }
            for dg in digits {
                spans.push(match dg {
                    Some(d) => Span::styled(format!("{d}"), BASE_STYLE),
                    None => Span::styled(fallback, UNFILLED_CELL_STYLE),
                });
            }
        }
        Line::from_iter(spans)
    }

    pub(crate) fn handle_input(&mut self, input: EditorInput) -> EditorOutput {
        match (input, self.pos) {
            (EditorInput::Negative, 0) => {
                self.negative = !self.negative;
                EditorOutput::Ok
            }
            (EditorInput::Positive, 0) => {
                self.negative = false;
                EditorOutput::Ok
            }
            (EditorInput::ToggleWeekNumber, _) => {
                self.show_week_number = !self.show_week_number;
                EditorOutput::Ok
            }
            (EditorInput::Digit(d), 0..ENTER_POS) => {
                if let Some(slot) = self.slot_mut(self.pos) {
                    *slot = Some(d);
                }
                self.pos += 1;
                EditorOutput::Ok
            }
            (EditorInput::Backspace, 1..) => {
                self.pos -= 1;
                if let Some(slot) = self.slot_mut(self.pos) {
                    *slot = None;
                }
                EditorOutput::Ok
            }
            (EditorInput::Enter, ENTER_POS) => match self.to_date() {
                Some(date) => EditorOutput::Apply {
                    date,
                    show_week_number: self.show_week_number,
                },
                None => EditorOutput::Invalid,
            },
            _ => EditorOutput::Invalid,
        }
    }

    fn slot_mut(&mut self, pos: usize) -> Option<&mut Option<u8>> {
        match pos {
            0..4 => self.year.get_mut(pos),
            4..ENTER_POS => self.month.get_mut(pos - 4),
            _ => None,
        }
    }

    // Returns `None` if a digit is missing or the month is out of range
    fn to_date(self) -> Option<Date> {
        let mut year = 0i32;
        for d in self.year {
            year = year * 10 + i32::from(d?);
        }
        if self.negative {
            year = -year;
        }
        let mut month = 0u8;
        for d in self.month {
            month = month * 10 + d?;
        }
        let month = Month::try_from(month).ok()?;
        Date::from_calendar_date(year, month, 1).ok()
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum EditorInput {
    Negative,
    Positive,
    Digit(u8),
    Backspace,
    ToggleWeekNumber,
    Enter,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum EditorOutput {
    Ok,
    Invalid,
    Apply { date: Date, show_week_number: bool },
}
