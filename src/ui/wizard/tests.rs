//! Tests for the form screen

use super::{ScreenAction, WizardScreen};
use crate::form::{FormSession, FormView};
use crate::storage::MemorySlot;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{backend::TestBackend, Terminal};

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

fn type_text(screen: &mut WizardScreen, session: &mut FormSession, text: &str) {
    for c in text.chars() {
        screen.handle_key(session, key(KeyCode::Char(c)));
    }
}

fn new_session() -> FormSession {
    FormSession::new(Box::new(MemorySlot::new()))
}

/// Render into an in-memory buffer and return its text
fn render_to_string(screen: &WizardScreen, session: &FormSession) -> String {
    let backend = TestBackend::new(100, 40);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal.draw(|f| screen.render(f, session)).unwrap();

    let buffer = terminal.backend().buffer();
    let mut text = String::new();
    for y in 0..buffer.area.height {
        for x in 0..buffer.area.width {
            text.push_str(buffer[(x, y)].symbol());
        }
        text.push('\n');
    }
    text
}

#[test]
fn test_typing_goes_to_focused_field() {
    let mut session = new_session();
    let mut screen = WizardScreen::new();

    type_text(&mut screen, &mut session, "Ana");
    screen.handle_key(&mut session, key(KeyCode::Tab));
    type_text(&mut screen, &mut session, "Pérez");

    assert_eq!(session.value("firstName"), "Ana");
    assert_eq!(session.value("lastName"), "Pérez");
    assert_eq!(screen.cursor, 5);
}

#[test]
fn test_tab_blur_marks_required_field() {
    let mut session = new_session();
    let mut screen = WizardScreen::new();

    screen.handle_key(&mut session, key(KeyCode::Tab));

    assert!(session.error("firstName").is_some());
    assert_eq!(screen.focus, 1);
}

#[test]
fn test_enter_on_invalid_step_focuses_first_failing_field() {
    let mut session = new_session();
    let mut screen = WizardScreen::new();
    type_text(&mut screen, &mut session, "Ana");
    screen.handle_key(&mut session, key(KeyCode::Tab));
    screen.handle_key(&mut session, key(KeyCode::Tab));

    screen.handle_key(&mut session, key(KeyCode::Enter));

    assert_eq!(session.current_step(), 0);
    assert_eq!(screen.focus, 1);
}

#[test]
fn test_enter_and_esc_navigate_steps() {
    let mut session = new_session();
    let mut screen = WizardScreen::new();
    type_text(&mut screen, &mut session, "Ana");
    screen.handle_key(&mut session, key(KeyCode::Tab));
    type_text(&mut screen, &mut session, "Pérez");

    screen.handle_key(&mut session, key(KeyCode::Enter));
    assert_eq!(session.current_step(), 1);
    assert_eq!(screen.focus, 0);

    screen.handle_key(&mut session, key(KeyCode::Esc));
    assert_eq!(session.current_step(), 0);
    screen.handle_key(&mut session, key(KeyCode::Esc));
    assert_eq!(session.current_step(), 0);
}

#[test]
fn test_option_fields_cycle_with_arrows() {
    let mut session = new_session();
    let mut screen = WizardScreen::new();
    // firstName, lastName, cumpleaños, edad, genero
    for _ in 0..4 {
        screen.handle_key(&mut session, key(KeyCode::Tab));
    }

    screen.handle_key(&mut session, key(KeyCode::Right));
    assert_eq!(session.value("genero"), "Masculino");
    screen.handle_key(&mut session, key(KeyCode::Left));
    assert_eq!(session.value("genero"), "Otro");
}

#[test]
fn test_hidden_medium_sections_are_not_focusable() {
    let mut session = new_session();
    session.current = 1;
    let names: Vec<_> = WizardScreen::focusable(&session)
        .iter()
        .map(|f| f.name)
        .collect();
    assert_eq!(
        names,
        vec![
            "email",
            "phone",
            "address",
            "city",
            "medioPrincipal",
            "medioPrincipalVisual"
        ]
    );

    session.on_field_change("medioPrincipal", "Invitacion");
    let names: Vec<_> = WizardScreen::focusable(&session)
        .iter()
        .map(|f| f.name)
        .collect();
    assert!(names.contains(&"quienInvito"));
    assert!(!names.contains(&"nombreEvento"));
}

#[test]
fn test_enter_on_review_requests_submit() {
    let mut session = new_session();
    session.current = 3;
    let mut screen = WizardScreen::new();

    assert_eq!(
        screen.handle_key(&mut session, key(KeyCode::Enter)),
        ScreenAction::Submit
    );
}

#[test]
fn test_confirmation_view_starts_over_on_enter() {
    let mut session = new_session();
    session.view = FormView::Confirmed {
        email: "ana@example.com".to_string(),
    };
    let mut screen = WizardScreen::new();

    let text = render_to_string(&screen, &session);
    assert!(text.contains("ana@example.com"));

    assert_eq!(
        screen.handle_key(&mut session, key(KeyCode::Enter)),
        ScreenAction::None
    );
    assert_eq!(session.view(), &FormView::Editing);
    assert_eq!(
        screen.handle_key(&mut session, key(KeyCode::Esc)),
        ScreenAction::None
    );
}

#[test]
fn test_render_first_step_shows_labels_and_errors() {
    let mut session = new_session();
    session.on_next();
    let screen = WizardScreen::new();

    let text = render_to_string(&screen, &session);

    assert!(text.contains("Información personal"));
    assert!(text.contains("Paso 1 de 4"));
    assert!(text.contains("Nombre*"));
    assert!(text.contains("Este campo es obligatorio"));
}

#[test]
fn test_render_review_lists_summary_and_button() {
    let mut session = new_session();
    session.on_field_change("firstName", "Ana");
    session.on_field_change("lastName", "Pérez");
    session.on_next();
    session.on_field_change("email", "ana@example.com");
    session.on_field_change("phone", "1234567890");
    session.on_next();
    session.on_field_change("occupation", "Ingeniera");
    session.on_next();
    let screen = WizardScreen::new();

    let text = render_to_string(&screen, &session);

    assert!(text.contains("Resumen"));
    assert!(text.contains("Nombre: Ana"));
    assert!(text.contains("Correo electrónico: ana@example.com"));
    assert!(text.contains("Ocupación: Ingeniera"));
    assert!(text.contains("Enviar"));
}

#[test]
fn test_ctrl_c_quits_from_any_view() {
    let mut session = new_session();
    let mut screen = WizardScreen::new();
    assert_eq!(
        screen.handle_key(
            &mut session,
            KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)
        ),
        ScreenAction::Quit
    );
}

#[test]
fn test_space_on_mirror_row_drops_social_network() {
    let mut session = new_session();
    session.current = 1;
    session.on_field_change("medioPrincipal", "Redes");
    session.on_field_change("redSocial", "TikTok");
    let mut screen = WizardScreen::new();
    screen.focus_step = 1;
    screen.focus_on(&session, "medioPrincipalVisual");
    assert_eq!(screen.focused_field(&session).map(|f| f.name), Some("medioPrincipalVisual"));

    // Arrows leave the mirror alone
    screen.handle_key(&mut session, key(KeyCode::Right));
    assert_eq!(session.value("medioPrincipalVisual"), "Redes");
    assert_eq!(session.value("redSocial"), "TikTok");

    screen.handle_key(&mut session, key(KeyCode::Char(' ')));
    assert_eq!(session.value("redSocial"), "");
    assert_eq!(session.value("medioPrincipalVisual"), "");
    assert!(session.is_enabled("nombreEvento"));
}
