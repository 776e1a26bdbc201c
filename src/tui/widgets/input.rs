//! Single-line command input

use crossterm::event::KeyEvent;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    widgets::{Block, Widget},
};
use tui_textarea::{Input, Key, TextArea};

use crate::tui::theme::Theme;

const PLACEHOLDER: &str = "Enter your trading command...";

/// Input form owning the draft command.
///
/// Enter hands the draft to the caller and resets the field. There is no
/// validation: an empty draft is submitted like any other.
pub struct CommandInput {
    textarea: TextArea<'static>,
    theme: Theme,
}

impl CommandInput {
    pub fn new(theme: &Theme) -> Self {
        Self {
            textarea: build_textarea(theme),
            theme: theme.clone(),
        }
    }

    /// Current draft text.
    pub fn draft(&self) -> String {
        self.textarea.lines().concat()
    }

    /// Take the draft and reset the field to empty.
    pub fn submit(&mut self) -> String {
        let text = self.draft();
        self.textarea = build_textarea(&self.theme);
        text
    }

    /// Feed a key press to the field. Returns the submitted text on Enter.
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<String> {
        match Input::from(key) {
            Input {
                key: Key::Enter, ..
            } => Some(self.submit()),
            // Ctrl+M / Ctrl+J would insert a line break
            Input {
                key: Key::Char('m' | 'j'),
                ctrl: true,
                ..
            } => None,
            input => {
                self.textarea.input(input);
                None
            }
        }
    }

    /// Insert pasted text at the cursor. Line breaks are dropped.
    pub fn paste(&mut self, text: &str) {
        let single_line: String = text.chars().filter(|c| !matches!(c, '\r' | '\n')).collect();
        self.textarea.insert_str(single_line);
    }

    pub fn set_block(&mut self, block: Block<'static>) {
        self.textarea.set_block(block);
    }
}

impl Widget for &CommandInput {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Widget::render(&self.textarea, area, buf);
    }
}

fn build_textarea(theme: &Theme) -> TextArea<'static> {
    let mut textarea = TextArea::default();
    textarea.set_cursor_line_style(Style::default());
    textarea.set_cursor_style(Style::default().add_modifier(Modifier::REVERSED));
    textarea.set_placeholder_text(PLACEHOLDER);
    textarea.set_placeholder_style(Style::default().fg(theme.text_muted));
    textarea.set_style(Style::default().fg(theme.text));
    textarea
}
