//! Confirmation shown after a successful submission

use crate::ui::centered_rect;
use crate::ui::wizard::WizardScreen;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

impl WizardScreen {
    pub(crate) fn render_success(&self, frame: &mut Frame, email: &str) {
        let area = centered_rect(60, 50, frame.area());
        frame.render_widget(Clear, area);

        let block = Block::default()
            .title(" Formulario enviado ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Green));

        let inner = block.inner(area);
        frame.render_widget(block, area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints([
                Constraint::Length(1), // Title
                Constraint::Length(1), // Spacer
                Constraint::Min(2),    // Message
                Constraint::Length(1), // Footer
            ])
            .split(inner);

        let title = Paragraph::new(Line::from(Span::styled(
            "¡Gracias!",
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        )))
        .alignment(Alignment::Center);
        frame.render_widget(title, chunks[0]);

        let message = Paragraph::new(vec![
            Line::from("Hemos recibido su información."),
            Line::from(vec![
                Span::raw("Enviaremos la confirmación a "),
                Span::styled(email.to_string(), Style::default().fg(Color::Cyan)),
            ]),
        ])
        .alignment(Alignment::Center);
        frame.render_widget(message, chunks[2]);

        let footer = Paragraph::new(Line::from(vec![
            Span::styled("Enter", Style::default().fg(Color::Yellow)),
            Span::raw(" nuevo formulario  "),
            Span::styled("Esc", Style::default().fg(Color::Yellow)),
            Span::raw(" salir"),
        ]))
        .alignment(Alignment::Center);
        frame.render_widget(footer, chunks[3]);
    }
}
