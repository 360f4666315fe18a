//! Color theme and styling for session widgets.

use ratatui::style::{Color, Modifier, Style};

use crate::risk::RiskBand;

pub struct Theme {
    /// Accent for focused widgets and the title
    pub primary: Color,
    /// Inactive borders, hints, range labels
    pub muted: Color,
    pub text: Color,
    /// Request errors
    pub error: Color,
}

impl Theme {
    pub fn default_theme() -> Self {
        Self {
            primary: Color::Cyan,
            muted: Color::DarkGray,
            text: Color::White,
            error: Color::LightRed,
        }
    }

    pub fn title_style(&self) -> Style {
        Style::default()
            .fg(self.primary)
            .add_modifier(Modifier::BOLD)
    }

    /// Border style, brighter when the widget holds focus.
    pub fn border_style(&self, focused: bool) -> Style {
        if focused {
            Style::default().fg(self.primary)
        } else {
            Style::default().fg(self.muted)
        }
    }

    pub fn text_style(&self) -> Style {
        Style::default().fg(self.text)
    }

    pub fn hint_style(&self) -> Style {
        Style::default().fg(self.muted)
    }

    pub fn error_style(&self) -> Style {
        Style::default().fg(self.error).add_modifier(Modifier::BOLD)
    }

    /// Style for the selected slider row.
    pub fn selected_style(&self) -> Style {
        Style::default()
            .fg(self.primary)
            .add_modifier(Modifier::BOLD)
    }

    pub fn band_style(&self, band: RiskBand) -> Style {
        Style::default().fg(band.color())
    }

    pub fn heading_style(&self) -> Style {
        Style::default().fg(self.text).add_modifier(Modifier::BOLD)
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::default_theme()
    }
}
