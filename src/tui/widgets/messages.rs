//! Message list widget

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::StatefulWidget,
};

use crate::chat::ChatMessage;
use crate::tui::theme::Theme;

/// State for the message list
#[derive(Debug)]
pub struct MessageListState {
    /// Current scroll offset (in lines)
    pub offset: usize,
    /// Total content height (in lines), as of the last render
    pub content_height: usize,
    /// Viewport height, as of the last render
    pub viewport_height: usize,
    /// Keep the newest line in view on the next render
    follow: bool,
}

impl Default for MessageListState {
    fn default() -> Self {
        Self {
            offset: 0,
            content_height: 0,
            viewport_height: 0,
            follow: true,
        }
    }
}

impl MessageListState {
    fn max_offset(&self) -> usize {
        self.content_height.saturating_sub(self.viewport_height)
    }

    pub fn scroll_up(&mut self, amount: usize) {
        self.offset = self.offset.min(self.max_offset()).saturating_sub(amount);
        self.follow = self.offset >= self.max_offset();
    }

    pub fn scroll_down(&mut self, amount: usize) {
        self.offset = (self.offset + amount).min(self.max_offset());
        self.follow = self.offset >= self.max_offset();
    }

    pub fn page_up(&mut self) {
        self.scroll_up(self.viewport_height.max(1));
    }

    pub fn page_down(&mut self) {
        self.scroll_down(self.viewport_height.max(1));
    }

    pub fn scroll_to_bottom(&mut self) {
        self.follow = true;
        self.offset = self.max_offset();
    }

    pub fn is_following(&self) -> bool {
        self.follow
    }
}

/// Widget for rendering the transcript, one block per message, in order.
pub struct MessageList<'a> {
    messages: &'a [ChatMessage],
    theme: &'a Theme,
}

impl<'a> MessageList<'a> {
    pub fn new(messages: &'a [ChatMessage], theme: &'a Theme) -> Self {
        Self { messages, theme }
    }

    /// Lay the messages out as lines for the given width.
    ///
    /// Each message is a role line, its wrapped content, then a blank spacer.
    pub fn lines(&self, width: usize) -> Vec<Line<'a>> {
        let width = width.max(1);
        let text_style = Style::default().fg(self.theme.text);
        let mut lines = Vec::new();

        for msg in self.messages {
            lines.push(Line::from(Span::styled(
                msg.role().label(),
                self.theme.role_style(msg.role()),
            )));

            for wrapped in textwrap::wrap(msg.content(), width) {
                lines.push(Line::from(Span::styled(wrapped, text_style)));
            }

            lines.push(Line::default());
        }

        lines
    }
}

impl StatefulWidget for MessageList<'_> {
    type State = MessageListState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        let lines = self.lines(area.width as usize);

        state.content_height = lines.len();
        state.viewport_height = area.height as usize;
        if state.follow {
            state.offset = state.max_offset();
        } else {
            state.offset = state.offset.min(state.max_offset());
        }

        for (row, line) in lines
            .iter()
            .skip(state.offset)
            .take(area.height as usize)
            .enumerate()
        {
            buf.set_line(area.x, area.y + row as u16, line, area.width);
        }
    }
}
