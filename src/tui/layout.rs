//! Responsive layout for different terminal sizes.

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Layout mode based on terminal width
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutMode {
    /// Gauge and sliders side by side (>=100 cols)
    Wide,
    /// Everything stacked in one column
    Narrow,
}

impl LayoutMode {
    pub fn from_terminal_width(width: u16) -> Self {
        match width {
            0..=99 => Self::Narrow,
            _ => Self::Wide,
        }
    }
}

/// Top-level areas of the screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenAreas {
    pub header: Rect,
    pub input: Rect,
    pub body: Rect,
    pub footer: Rect,
}

pub fn calculate_layout(area: Rect) -> ScreenAreas {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(1), // Title
            Constraint::Length(3), // User ID input
            Constraint::Min(6),    // Results
            Constraint::Length(1), // Key hints
        ])
        .split(area);

    ScreenAreas {
        header: chunks[0],
        input: chunks[1],
        body: chunks[2],
        footer: chunks[3],
    }
}

/// Results areas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResultAreas {
    pub gauge: Rect,
    pub summary: Rect,
    pub sliders: Rect,
    pub advice: Rect,
}

pub fn split_results(body: Rect, mode: LayoutMode) -> ResultAreas {
    match mode {
        LayoutMode::Wide => {
            let columns = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
                .split(body);
            let left = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Min(8), Constraint::Length(1)])
                .split(columns[0]);
            let right = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Length(9), Constraint::Min(3)])
                .split(columns[1]);
            ResultAreas {
                gauge: left[0],
                summary: left[1],
                sliders: right[0],
                advice: right[1],
            }
        }
        LayoutMode::Narrow => {
            let rows = Layout::default()
                .direction(Direction::Vertical)
                .constraints([
                    Constraint::Length(10),
                    Constraint::Length(1),
                    Constraint::Length(9),
                    Constraint::Min(3),
                ])
                .split(body);
            ResultAreas {
                gauge: rows[0],
                summary: rows[1],
                sliders: rows[2],
                advice: rows[3],
            }
        }
    }
}
