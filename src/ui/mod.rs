//! UI module for rendering the TUI

mod components;
mod forms;
mod home;
mod layout;

use crate::app::App;
use crate::state::View;
use components::render_error_dialog;
use ratatui::Frame;

/// Main draw function
pub fn draw(frame: &mut Frame, app: &App) {
    let (main_area, status_area) = layout::create_layout(frame.area());

    // Draw main content based on current view
    match (&app.state.current_view, app.form_kind()) {
        (View::Home, _) => home::draw(frame, main_area, app),
        (_, Some(kind)) => forms::draw(frame, main_area, app, kind),
        (_, None) => {}
    }

    layout::draw_status_bar(frame, status_area, app);

    // Error dialog on top of everything
    if let Some(error) = app.state.current_error() {
        render_error_dialog(frame, error);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::MockApiClientTrait;
    use crate::credentials::MockCredentialStore;
    use crate::session::Session;
    use crate::submission::{Navigator, SubmissionController};
    use ratatui::{backend::TestBackend, Terminal};
    use std::collections::BTreeMap;
    use std::sync::Arc;

    fn test_app() -> App {
        let mut store = MockCredentialStore::new();
        store.expect_get_token().returning(|| None);
        App::with_controller(
            SubmissionController::new(Arc::new(MockApiClientTrait::new()), Arc::new(store)),
            Session::default(),
        )
    }

    fn render(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(80, 40)).unwrap();
        terminal.draw(|frame| draw(frame, app)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_login_form_renders_fields() {
        let screen = render(&test_app());
        assert!(screen.contains("Email"));
        assert!(screen.contains("Senha"));
        assert!(screen.contains("LOGIN"));
        assert!(screen.contains("CRIAR CONTA"));
    }

    #[test]
    fn test_password_is_masked() {
        let mut app = test_app();
        app.form.set_field("password", "segredo").unwrap();
        let screen = render(&app);
        assert!(!screen.contains("segredo"));
        assert!(screen.contains("•••••••"));
    }

    #[test]
    fn test_errors_only_render_for_touched_fields() {
        let mut app = test_app();
        let mut errors = BTreeMap::new();
        errors.insert("email".to_string(), "Email obrigatório*".to_string());
        errors.insert("password".to_string(), "Senha obrigatória*".to_string());
        app.form.set_errors(errors);
        app.form.set_field_touched("password").unwrap();

        let screen = render(&app);
        assert!(!screen.contains("Email obrigatório*"));
        assert!(screen.contains("Senha obrigatória*"));
    }

    #[test]
    fn test_locked_form_shows_loading() {
        let mut app = test_app();
        app.form.begin_submission();
        assert!(render(&app).contains("Enviando..."));
    }

    #[test]
    fn test_error_dialog_on_top() {
        let mut app = test_app();
        app.state.push_error("Erro na chamada da API: timeout".to_string());
        let screen = render(&app);
        assert!(screen.contains("Erro na chamada da API"));
        assert!(screen.contains("para fechar"));
    }

    #[test]
    fn test_home_shows_user() {
        let mut app = test_app();
        app.session.login("ana@helplife.com.br");
        app.state.navigate_to(View::Home);
        assert!(render(&app).contains("ana@helplife.com.br"));
    }
}
