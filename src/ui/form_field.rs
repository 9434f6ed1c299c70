//! Single-line field editing and rendering helpers.
//!
//! Values are edited by char index so accented input (`cumpleaños`,
//! `Pérez`) never splits a UTF-8 sequence.

use crossterm::event::KeyCode;
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};

use crate::form::schema::{FieldSchema, FieldType};
use crate::form::FieldError;

/// Shown for a select with nothing chosen
pub const SELECT_PLACEHOLDER: &str = "Seleccione...";

/// Characters a field kind accepts from the keyboard
fn accepts(field_type: FieldType, c: char) -> bool {
    match field_type {
        FieldType::Number => c.is_ascii_digit(),
        FieldType::Date => c.is_ascii_digit() || c == '-',
        FieldType::Select | FieldType::Radio => false,
        FieldType::Text | FieldType::Email | FieldType::Tel => !c.is_control(),
    }
}

fn byte_index(value: &str, char_index: usize) -> usize {
    value
        .char_indices()
        .nth(char_index)
        .map_or(value.len(), |(i, _)| i)
}

/// Apply an editing key to a text value.
///
/// Returns the new value when the key changed it; `cursor` is updated for
/// every key the field consumes.
pub fn edit_text(
    field_type: FieldType,
    value: &str,
    cursor: &mut usize,
    key: KeyCode,
) -> Option<String> {
    let len = value.chars().count();
    *cursor = (*cursor).min(len);

    match key {
        KeyCode::Char(c) if accepts(field_type, c) => {
            let mut new_value = value.to_string();
            new_value.insert(byte_index(value, *cursor), c);
            *cursor += 1;
            Some(new_value)
        }
        KeyCode::Backspace if *cursor > 0 => {
            let mut new_value = value.to_string();
            *cursor -= 1;
            new_value.remove(byte_index(value, *cursor));
            Some(new_value)
        }
        KeyCode::Delete if *cursor < len => {
            let mut new_value = value.to_string();
            new_value.remove(byte_index(value, *cursor));
            Some(new_value)
        }
        KeyCode::Left => {
            *cursor = cursor.saturating_sub(1);
            None
        }
        KeyCode::Right => {
            *cursor = (*cursor + 1).min(len);
            None
        }
        KeyCode::Home => {
            *cursor = 0;
            None
        }
        KeyCode::End => {
            *cursor = len;
            None
        }
        _ => None,
    }
}

/// Next (or previous) choice of an option field.
///
/// Selects cycle through an empty "not selected" state; radios only cycle
/// through their options once one is checked.
pub fn cycle_option(field: &FieldSchema, current: &str, forward: bool) -> &'static str {
    let options = field.options;
    if options.is_empty() {
        return "";
    }
    let position = options.iter().position(|option| *option == current);
    let last = options.len() - 1;

    if field.is_radio() {
        let next = match (position, forward) {
            (None, true) => 0,
            (None, false) => last,
            (Some(i), true) => (i + 1) % options.len(),
            (Some(0), false) => last,
            (Some(i), false) => i - 1,
        };
        return options[next];
    }

    match (position, forward) {
        (None, true) => options[0],
        (None, false) => options[last],
        (Some(i), true) if i == last => "",
        (Some(i), true) => options[i + 1],
        (Some(0), false) => "",
        (Some(i), false) => options[i - 1],
    }
}

/// Display state of one field row
#[derive(Debug, Clone, Copy)]
pub struct FieldView<'a> {
    pub value: &'a str,
    pub focused: bool,
    pub enabled: bool,
    pub error: Option<FieldError>,
    /// Cursor char index, drawn when the field is focused
    pub cursor: usize,
}

/// Render a field as one line plus an error line when it has one
pub fn field_lines(field: &FieldSchema, view: FieldView<'_>) -> Vec<Line<'static>> {
    let marker = if view.focused { "> " } else { "  " };
    let required = if field.required { "*" } else { "" };

    let label_style = match (view.enabled, view.error.is_some()) {
        (false, _) => Style::default().fg(Color::DarkGray),
        (true, true) => Style::default().fg(Color::Red),
        (true, false) if view.focused => Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
        (true, false) => Style::default().fg(Color::Gray),
    };

    let mut spans = vec![
        Span::styled(marker, Style::default().fg(Color::Yellow)),
        Span::styled(format!("{}{}: ", field.label, required), label_style),
    ];
    spans.extend(value_spans(field, view));
    // Fallback only: the selector hides every disabled medium input
    if !view.enabled {
        spans.push(Span::styled(
            " (deshabilitado)",
            Style::default().fg(Color::DarkGray),
        ));
    }

    let mut lines = vec![Line::from(spans)];
    if let Some(error) = view.error {
        lines.push(Line::from(Span::styled(
            format!("    {}", error),
            Style::default().fg(Color::Red),
        )));
    }
    lines
}

fn value_spans(field: &FieldSchema, view: FieldView<'_>) -> Vec<Span<'static>> {
    let value_style = if view.enabled {
        Style::default().fg(Color::White)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    if field.is_radio() {
        return field
            .options
            .iter()
            .flat_map(|option| {
                let checked = *option == view.value;
                let mark = if checked { "(•) " } else { "( ) " };
                let style = if checked {
                    Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
                } else {
                    value_style
                };
                [Span::styled(format!("{mark}{option}"), style), Span::raw("  ")]
            })
            .collect();
    }

    if field.has_options() {
        let shown = if view.value.is_empty() {
            SELECT_PLACEHOLDER
        } else {
            view.value
        };
        return vec![Span::styled(format!("< {} >", shown), value_style)];
    }

    if !view.focused {
        return vec![Span::styled(view.value.to_string(), value_style)];
    }

    // Block cursor over the char at `cursor` (or past the end)
    let split = byte_index(view.value, view.cursor);
    let (before, rest) = view.value.split_at(split);
    let mut rest_chars = rest.chars();
    let under = rest_chars.next().map_or(" ".to_string(), String::from);
    vec![
        Span::styled(before.to_string(), value_style),
        Span::styled(under, Style::default().fg(Color::Black).bg(Color::White)),
        Span::styled(rest_chars.as_str().to_string(), value_style),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::schema;

    fn field(name: &str) -> &'static FieldSchema {
        schema::field(name).unwrap()
    }

    #[test]
    fn test_edit_text_inserts_at_cursor() {
        let mut cursor = 1;
        let value = edit_text(FieldType::Text, "Pz", &mut cursor, KeyCode::Char('é')).unwrap();
        assert_eq!(value, "Péz");
        assert_eq!(cursor, 2);
    }

    #[test]
    fn test_edit_text_backspace_and_delete_are_char_aware() {
        let mut cursor = 2;
        let value = edit_text(FieldType::Text, "año", &mut cursor, KeyCode::Backspace).unwrap();
        assert_eq!(value, "ao");
        assert_eq!(cursor, 1);

        let value = edit_text(FieldType::Text, "año", &mut cursor, KeyCode::Delete).unwrap();
        assert_eq!(value, "ao");
        assert_eq!(cursor, 1);

        let mut cursor = 0;
        assert!(edit_text(FieldType::Text, "año", &mut cursor, KeyCode::Backspace).is_none());
    }

    #[test]
    fn test_edit_text_moves_cursor_without_changing_value() {
        let mut cursor = 3;
        assert!(edit_text(FieldType::Text, "abc", &mut cursor, KeyCode::Left).is_none());
        assert_eq!(cursor, 2);
        edit_text(FieldType::Text, "abc", &mut cursor, KeyCode::End);
        assert_eq!(cursor, 3);
        edit_text(FieldType::Text, "abc", &mut cursor, KeyCode::Right);
        assert_eq!(cursor, 3);
        edit_text(FieldType::Text, "abc", &mut cursor, KeyCode::Home);
        assert_eq!(cursor, 0);
    }

    #[test]
    fn test_number_and_date_fields_filter_characters() {
        let mut cursor = 0;
        assert!(edit_text(FieldType::Number, "", &mut cursor, KeyCode::Char('a')).is_none());
        assert_eq!(
            edit_text(FieldType::Number, "", &mut cursor, KeyCode::Char('4')).as_deref(),
            Some("4")
        );
        let mut cursor = 4;
        assert_eq!(
            edit_text(FieldType::Date, "1990", &mut cursor, KeyCode::Char('-')).as_deref(),
            Some("1990-")
        );
    }

    #[test]
    fn test_select_cycles_through_empty_state() {
        let experience = field("experience");
        assert_eq!(cycle_option(experience, "", true), "Menos de 1 año");
        assert_eq!(cycle_option(experience, "Más de 5 años", true), "");
        assert_eq!(cycle_option(experience, "", false), "Más de 5 años");
        assert_eq!(cycle_option(experience, "Menos de 1 año", false), "");
    }

    #[test]
    fn test_radio_wraps_without_unchecking() {
        let genero = field("genero");
        assert_eq!(cycle_option(genero, "", true), "Masculino");
        assert_eq!(cycle_option(genero, "Otro", true), "Masculino");
        assert_eq!(cycle_option(genero, "Masculino", false), "Otro");
    }

    #[test]
    fn test_field_lines_show_error_below_field() {
        let view = FieldView {
            value: "",
            focused: true,
            enabled: true,
            error: Some(FieldError::Required),
            cursor: 0,
        };
        let lines = field_lines(field("firstName"), view);
        assert_eq!(lines.len(), 2);
        assert!(lines[1].to_string().contains("Este campo es obligatorio"));
        assert!(lines[0].to_string().starts_with("> Nombre*: "));
    }

    #[test]
    fn test_disabled_field_is_marked() {
        let view = FieldView {
            value: "",
            focused: false,
            enabled: false,
            error: None,
            cursor: 0,
        };
        let lines = field_lines(field("quienInvito"), view);
        assert!(lines[0].to_string().ends_with("(deshabilitado)"));
    }
}
