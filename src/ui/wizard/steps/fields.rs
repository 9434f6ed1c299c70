//! Data entry steps

use crate::form::FormSession;
use crate::ui::form_field::{field_lines, FieldView};
use crate::ui::wizard::WizardScreen;
use ratatui::{
    layout::Alignment,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

impl WizardScreen {
    pub(crate) fn render_fields_step(&self, frame: &mut Frame, session: &FormSession) {
        let areas = self.render_step_frame(frame, session);

        let mut lines: Vec<Line> = Vec::new();
        let mut focus_line = 0;
        for (i, field) in Self::focusable(session).into_iter().enumerate() {
            let focused = i == self.focus;
            if focused {
                focus_line = lines.len();
            }
            lines.extend(field_lines(
                field,
                FieldView {
                    value: session.value(field.name),
                    focused,
                    enabled: session.is_enabled(field.name),
                    error: session.error(field.name),
                    cursor: self.cursor,
                },
            ));
        }

        // Scroll so the focused field stays in view
        let height = usize::from(areas.body.height);
        let scroll = (focus_line + 2).saturating_sub(height);
        let scroll = u16::try_from(scroll).unwrap_or(u16::MAX);
        frame.render_widget(Paragraph::new(lines).scroll((scroll, 0)), areas.body);

        self.render_notice(frame, session, areas.notice);

        let mut footer = vec![
            Span::styled("Tab", Style::default().fg(Color::Yellow)),
            Span::raw(" campo  "),
            Span::styled("←/→", Style::default().fg(Color::Yellow)),
            Span::raw(" opción  "),
            Span::styled("Enter", Style::default().fg(Color::Yellow)),
            Span::raw(" siguiente  "),
        ];
        if session.current_step() > 0 {
            footer.push(Span::styled("Esc", Style::default().fg(Color::Yellow)));
            footer.push(Span::raw(" anterior  "));
        }
        footer.push(Span::styled("Ctrl+Q", Style::default().fg(Color::Yellow)));
        footer.push(Span::raw(" salir"));
        frame.render_widget(
            Paragraph::new(Line::from(footer)).alignment(Alignment::Center),
            areas.footer,
        );
    }
}
