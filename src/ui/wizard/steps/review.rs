//! Review step: the summary and the submit button

use crate::form::FormSession;
use crate::ui::wizard::WizardScreen;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

impl WizardScreen {
    pub(crate) fn render_review_step(&self, frame: &mut Frame, session: &FormSession) {
        let areas = self.render_step_frame(frame, session);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(3),    // Summary
                Constraint::Length(1), // Spacer
                Constraint::Length(1), // Submit button
            ])
            .split(areas.body);

        let mut lines = Vec::new();
        if let Some(summary) = session.summary() {
            for section in &summary.sections {
                lines.push(Line::from(Span::styled(
                    section.title,
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                )));
                for entry in &section.entries {
                    lines.push(Line::from(vec![
                        Span::styled(
                            format!("  {}: ", entry.label),
                            Style::default().fg(Color::Gray),
                        ),
                        Span::styled(entry.value.clone(), Style::default().fg(Color::White)),
                    ]));
                }
                lines.push(Line::from(""));
            }
        }
        frame.render_widget(Paragraph::new(lines), chunks[0]);

        let button_style = if session.is_submitting() {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Green)
                .add_modifier(Modifier::BOLD)
        };
        let button = Line::from(Span::styled(
            format!(" {} ", session.submit_button()),
            button_style,
        ));
        frame.render_widget(
            Paragraph::new(button).alignment(Alignment::Center),
            chunks[2],
        );

        self.render_notice(frame, session, areas.notice);

        let footer = Paragraph::new(Line::from(vec![
            Span::styled("Enter", Style::default().fg(Color::Yellow)),
            Span::raw(" enviar  "),
            Span::styled("Esc", Style::default().fg(Color::Yellow)),
            Span::raw(" anterior  "),
            Span::styled("Ctrl+Q", Style::default().fg(Color::Yellow)),
            Span::raw(" salir"),
        ]))
        .alignment(Alignment::Center);
        frame.render_widget(footer, areas.footer);
    }
}
