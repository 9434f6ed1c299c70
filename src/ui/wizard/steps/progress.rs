//! Outer frame shared by the editing steps: title, progress bar and markers

use crate::form::{schema, FormSession};
use crate::ui::centered_rect;
use crate::ui::wizard::WizardScreen;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Gauge, Paragraph},
    Frame,
};

/// Areas left for the step content after the frame is drawn
pub(crate) struct StepFrame {
    pub body: Rect,
    pub notice: Rect,
    pub footer: Rect,
}

impl WizardScreen {
    pub(crate) fn render_step_frame(&self, frame: &mut Frame, session: &FormSession) -> StepFrame {
        let area = centered_rect(80, 90, frame.area());
        frame.render_widget(Clear, area);

        let block = Block::default()
            .title(Line::from(vec![
                Span::raw(" "),
                Span::styled(
                    session.step_schema().title,
                    Style::default()
                        .fg(Color::LightRed)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw(format!(
                    " Paso {} de {} ",
                    session.current_step() + 1,
                    session.step_count()
                )),
            ]))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan));

        let inner = block.inner(area);
        frame.render_widget(block, area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints([
                Constraint::Length(1), // Progress bar
                Constraint::Length(1), // Step markers
                Constraint::Length(1), // Spacer
                Constraint::Min(3),    // Step content
                Constraint::Length(1), // Notice
                Constraint::Length(1), // Footer
            ])
            .split(inner);

        let gauge = Gauge::default()
            .gauge_style(Style::default().fg(Color::Green).bg(Color::DarkGray))
            .ratio(session.progress().clamp(0.0, 1.0))
            .label(format!("{:.0}%", session.progress() * 100.0));
        frame.render_widget(gauge, chunks[0]);

        frame.render_widget(
            Paragraph::new(marker_line(session)).alignment(Alignment::Center),
            chunks[1],
        );

        StepFrame {
            body: chunks[3],
            notice: chunks[4],
            footer: chunks[5],
        }
    }

    pub(crate) fn render_notice(&self, frame: &mut Frame, session: &FormSession, area: Rect) {
        if let Some(notice) = session.notice() {
            let line = Line::from(Span::styled(
                notice,
                Style::default()
                    .fg(Color::White)
                    .bg(Color::Red)
                    .add_modifier(Modifier::BOLD),
            ));
            frame.render_widget(Paragraph::new(line).alignment(Alignment::Center), area);
        }
    }
}

/// One numbered marker per step; reached steps are green, the current one
/// is bold and titled
fn marker_line(session: &FormSession) -> Line<'static> {
    let mut spans = Vec::new();
    for (i, marker) in session.markers().iter().enumerate() {
        if i > 0 {
            let connector_style = if marker.reached {
                Style::default().fg(Color::Green)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            spans.push(Span::styled(" ── ", connector_style));
        }
        let mut style = if marker.reached {
            Style::default().fg(Color::Green)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        if marker.current {
            style = style.add_modifier(Modifier::BOLD | Modifier::UNDERLINED);
        }
        let text = if marker.current {
            let title = schema::step(i).map_or("", |step| step.title);
            format!("{} {}", i + 1, title)
        } else {
            (i + 1).to_string()
        };
        spans.push(Span::styled(text, style));
    }
    Line::from(spans)
}
