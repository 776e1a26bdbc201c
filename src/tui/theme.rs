//! TUI color theme

use ratatui::style::{Color, Modifier, Style};

use crate::chat::MessageRole;

/// TUI color theme
#[derive(Debug, Clone)]
pub struct Theme {
    pub text: Color,
    pub text_muted: Color,
    pub border: Color,
    pub accent: Color,
    pub success: Color,
    pub warning: Color,
    pub error: Color,
    pub user_label: Color,
    pub assistant_label: Color,
}

impl Theme {
    pub fn dark() -> Self {
        Self {
            text: Color::Rgb(212, 212, 212),
            text_muted: Color::Rgb(128, 128, 128),
            border: Color::Rgb(60, 60, 60),
            accent: Color::Rgb(0, 122, 204),
            success: Color::Rgb(72, 185, 100),
            warning: Color::Rgb(255, 193, 7),
            error: Color::Rgb(244, 67, 54),
            user_label: Color::Cyan,
            assistant_label: Color::Rgb(156, 220, 254),
        }
    }

    /// Style for the role line above each message.
    pub fn role_style(&self, role: MessageRole) -> Style {
        let color = match role {
            MessageRole::User => self.user_label,
            MessageRole::Assistant => self.assistant_label,
        };
        Style::default().fg(color).add_modifier(Modifier::BOLD)
    }
}
