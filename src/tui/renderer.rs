//! Core rendering logic for session widgets.
//!
//! Rendering is a pure function of [`App`]: it never triggers a request and
//! draws sliders and advice only when the last request was evaluated.

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{
        canvas::{Canvas, Line as CanvasLine, Points},
        Block, Borders, Paragraph, Wrap,
    },
    Frame,
};

use crate::advice::{AdviceEntry, Trait, TraitSliders, AGE_RANGE};
use crate::errors::PipelineError;
use crate::pipeline::{Evaluation, Outcome};
use crate::risk::GaugeSpec;

use super::actions::Focus;
use super::app::{App, AGE_ROW};
use super::layout::{calculate_layout, split_results, LayoutMode};
use super::theme::Theme;

const TITLE: &str = "PeerSense";
const SUBTITLE: &str = "substance use risk from your survey answers";
const TRAITS_HEADING: &str = "Your Psychological Traits";
const TIPS_HEADING: &str = "Personalized Tips to Handle Peer Pressure";
const LABEL_WIDTH: usize = 28;

/// Render the full interface
pub fn render_ui(frame: &mut Frame, app: &App) {
    let theme = Theme::default_theme();
    let area = frame.area();
    let areas = calculate_layout(area);

    render_header(frame, &theme, areas.header);
    render_input(frame, app, &theme, areas.input);

    match app.last_request().map(|request| &request.outcome) {
        None => render_placeholder(frame, &theme, areas.body),
        Some(Outcome::NoData(err)) => render_error(frame, err, &theme, areas.body),
        Some(Outcome::Evaluated(evaluation)) => {
            let mode = LayoutMode::from_terminal_width(area.width);
            render_results(frame, app, evaluation, &theme, areas.body, mode);
        }
    }

    render_footer(frame, app, &theme, areas.footer);
}

fn render_header(frame: &mut Frame, theme: &Theme, area: Rect) {
    let line = Line::from(vec![
        Span::styled(TITLE, theme.title_style()),
        Span::raw("  "),
        Span::styled(SUBTITLE, theme.hint_style()),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

fn render_input(frame: &mut Frame, app: &App, theme: &Theme, area: Rect) {
    let focused = app.focus() == Focus::Input;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border_style(focused))
        .title(" User ID ");
    let mut spans = vec![Span::styled(app.input().to_string(), theme.text_style())];
    if focused {
        spans.push(Span::styled("▏", theme.selected_style()));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
}

fn render_placeholder(frame: &mut Frame, theme: &Theme, area: Rect) {
    let text = Paragraph::new("Enter your user ID and press Enter to view results.")
        .style(theme.hint_style());
    frame.render_widget(text, area);
}

fn render_error(frame: &mut Frame, err: &PipelineError, theme: &Theme, area: Rect) {
    let mut lines = vec![Line::from(Span::styled(err.to_string(), theme.error_style()))];
    for issue in err.issues() {
        lines.push(Line::from(Span::styled(
            format!("  · {issue}"),
            theme.text_style(),
        )));
    }
    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), area);
}

fn render_results(
    frame: &mut Frame,
    app: &App,
    evaluation: &Evaluation,
    theme: &Theme,
    area: Rect,
    mode: LayoutMode,
) {
    let areas = split_results(area, mode);
    let gauge = evaluation.gauge();

    render_gauge(frame, &gauge, theme, areas.gauge);
    frame.render_widget(
        Paragraph::new(Span::styled(
            evaluation.summary(),
            theme.band_style(gauge.band()).add_modifier(Modifier::BOLD),
        )),
        areas.summary,
    );

    if let Some(sliders) = app.sliders() {
        render_sliders(frame, app, sliders, theme, areas.sliders);
    }
    if let Some(advice) = app.advice() {
        render_advice(frame, &advice, theme, areas.advice);
    }
}

/// Semicircle gauge: one arc per band, a needle at the threshold and the
/// percentage centered below the hub.
fn render_gauge(frame: &mut Frame, gauge: &GaugeSpec, theme: &Theme, area: Rect) {
    let label = gauge.label();
    let label_color = gauge.band().color();
    let angle = gauge.marker_angle();
    let bands = gauge.bands;
    // Canvas x units per terminal column, to center the label.
    let column = 2.4 / f64::from(area.width.saturating_sub(2).max(1));
    let label_x = -(label.chars().count() as f64) * column / 2.0;

    let canvas = Canvas::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.border_style(false))
                .title(" Risk "),
        )
        .marker(Marker::Braille)
        .x_bounds([-1.2, 1.2])
        .y_bounds([-0.35, 1.1])
        .paint(move |ctx| {
            for band in bands {
                for radius in [1.0, 0.94, 0.88] {
                    let coords = GaugeSpec::band_arc(band, radius, 48);
                    ctx.draw(&Points {
                        coords: &coords,
                        color: band.color(),
                    });
                }
            }
            ctx.draw(&CanvasLine::new(
                0.0,
                0.0,
                0.8 * angle.cos(),
                0.8 * angle.sin(),
                Color::White,
            ));
            ctx.print(
                label_x,
                -0.2,
                Span::styled(
                    label.clone(),
                    Style::default()
                        .fg(label_color)
                        .add_modifier(Modifier::BOLD),
                ),
            );
        });
    frame.render_widget(canvas, area);
}

fn render_sliders(
    frame: &mut Frame,
    app: &App,
    sliders: &TraitSliders,
    theme: &Theme,
    area: Rect,
) {
    let focused = app.focus() == Focus::Sliders;
    let bar_width = (area.width as usize).saturating_sub(LABEL_WIDTH + 14);

    let mut rows: Vec<(&str, u32, (u32, u32))> = sliders
        .sliders
        .iter()
        .map(|s| (s.trait_.label(), s.value, s.trait_.range()))
        .collect();
    rows.push(("Age", sliders.age, AGE_RANGE));

    let lines: Vec<Line> = rows
        .into_iter()
        .enumerate()
        .map(|(index, (label, value, range))| {
            let selected = focused && index == app.selected();
            slider_line(label, value, range, bar_width, selected, index == AGE_ROW, theme)
        })
        .collect();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border_style(focused))
        .title(format!(" {TRAITS_HEADING} "));
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn slider_line(
    label: &str,
    value: u32,
    (min, max): (u32, u32),
    bar_width: usize,
    selected: bool,
    numeric: bool,
    theme: &Theme,
) -> Line<'static> {
    let pointer = if selected { "▸ " } else { "  " };
    let label_style = if selected {
        theme.selected_style()
    } else {
        theme.text_style()
    };
    let fraction = if max > min {
        f64::from(value.saturating_sub(min)) / f64::from(max - min)
    } else {
        0.0
    };
    // Age is a number field, not a slider.
    let bar = if numeric {
        " ".repeat(bar_width)
    } else {
        render_slider_bar(fraction, bar_width)
    };

    Line::from(vec![
        Span::styled(pointer, theme.selected_style()),
        Span::styled(format!("{label:<LABEL_WIDTH$}"), label_style),
        Span::styled(bar, theme.border_style(selected)),
        Span::styled(format!(" {value:>3}"), label_style),
        Span::styled(format!(" /{max:<3}"), theme.hint_style()),
    ])
}

fn render_slider_bar(fraction: f64, width: usize) -> String {
    if width == 0 {
        return String::new();
    }
    let knob = ((fraction.clamp(0.0, 1.0) * (width - 1) as f64).round()) as usize;
    format!("{}●{}", "━".repeat(knob), "─".repeat(width - 1 - knob))
}

fn render_advice(frame: &mut Frame, advice: &[AdviceEntry], theme: &Theme, area: Rect) {
    let mut lines = vec![Line::from(Span::styled(TIPS_HEADING, theme.heading_style()))];
    for entry in advice {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!("{}:", trait_heading(entry.trait_)),
            theme.selected_style(),
        )));
        for tip in entry.tips {
            lines.push(Line::from(Span::styled(
                format!("  - {tip}"),
                theme.text_style(),
            )));
        }
    }
    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), area);
}

fn trait_heading(trait_: Trait) -> &'static str {
    trait_.field().display_name()
}

fn render_footer(frame: &mut Frame, app: &App, theme: &Theme, area: Rect) {
    let hints = match app.focus() {
        Focus::Input if app.sliders().is_some() => {
            "enter view results · tab adjust traits · esc quit"
        }
        Focus::Input => "enter view results · esc quit",
        Focus::Sliders => "↑↓ select · ←→ adjust (shift ×5) · tab back · q quit",
    };
    frame.render_widget(Paragraph::new(hints).style(theme.hint_style()), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::advice::AdvicePolicy;
    use crate::core::SurveyField;
    use crate::errors::FieldIssue;
    use crate::pipeline::RequestContext;
    use crate::tui::fixtures::evaluated;
    use ratatui::{backend::TestBackend, Terminal};

    fn draw(app: &App, width: u16, height: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|f| render_ui(f, app)).unwrap();
        let buffer = terminal.backend().buffer();
        buffer
            .content
            .chunks(buffer.area.width as usize)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_initial_screen_has_input_only() {
        let app = App::new(AdvicePolicy::default());
        let screen = draw(&app, 80, 30);
        assert!(screen.contains("PeerSense"));
        assert!(screen.contains("User ID"));
        assert!(!screen.contains(TRAITS_HEADING));
    }

    #[test]
    fn test_evaluated_screen_shows_gauge_and_sliders() {
        let mut app = App::new(AdvicePolicy::default());
        app.apply(evaluated(75, 80.0));
        let screen = draw(&app, 120, 40);

        assert!(screen.contains("Predicted Risk Level: High (75%)"));
        assert!(screen.contains("75%"));
        assert!(screen.contains(TRAITS_HEADING));
        assert!(screen.contains("Peer Pressure Score (%)"));
        assert!(screen.contains(TIPS_HEADING));
        assert!(screen.contains("Peer pressure score:"));
    }

    #[test]
    fn test_medium_risk_hides_tips() {
        let mut app = App::new(AdvicePolicy::default());
        app.apply(evaluated(50, 80.0));
        let screen = draw(&app, 120, 40);
        assert!(screen.contains(TRAITS_HEADING));
        assert!(!screen.contains(TIPS_HEADING));
    }

    #[test]
    fn test_no_data_skips_sliders_and_advice() {
        let mut app = App::new(AdvicePolicy::default());
        app.apply(RequestContext {
            user_id: "3".into(),
            outcome: Outcome::NoData(PipelineError::Validation {
                issues: vec![
                    FieldIssue::missing(SurveyField::Age),
                    FieldIssue::invalid(SurveyField::Confidence),
                ],
            }),
        });
        let screen = draw(&app, 120, 30);

        assert!(screen.contains("The following data is missing or invalid"));
        assert!(!screen.contains(TRAITS_HEADING));
        assert!(!screen.contains(TIPS_HEADING));
        assert!(!screen.contains("Predicted Risk Level"));
    }

    #[test]
    fn test_slider_bar_knob_position() {
        assert_eq!(render_slider_bar(0.0, 5), "●────");
        assert_eq!(render_slider_bar(1.0, 5), "━━━━●");
        assert_eq!(render_slider_bar(0.5, 0), "");
    }
}
