//! Application state and core logic

use crate::api::ApiClient;
use crate::config::AppConfig;
use crate::credentials::{CredentialStore, FileCredentialStore};
use crate::session::Session;
use crate::state::{AppState, FormKind, FormState, View};
use crate::submission::{Navigator, SubmissionController, SubmitFailure, SubmitOutcome};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::sync::Arc;

/// Main application struct
pub struct App {
    /// Current application state
    pub state: AppState,
    /// Authentication session
    pub session: Session,
    /// Form of the current view; empty on views without one
    pub form: FormState,
    form_kind: Option<FormKind>,
    controller: SubmissionController,
    /// A submit was requested and will run after the next draw
    pending_submit: bool,
    /// Whether the app should quit
    quit: bool,
}

impl App {
    /// Create a new App instance
    pub fn new(config: &AppConfig) -> Result<Self> {
        let api = ApiClient::new(config.api_base_url()?)?;
        tracing::info!("using API at {}", api.base_url());

        let store = match &config.storage_path {
            Some(path) => FileCredentialStore::new(path.clone()),
            None => FileCredentialStore::from_default_location(),
        };
        tracing::debug!("credential store at {}", store.path().display());
        let credentials: Arc<dyn CredentialStore> = Arc::new(store);
        let session = Session::start(credentials.as_ref());
        if !session.has_stored_token() {
            tracing::warn!("no stored token, requests will be sent without authorization");
        }

        Ok(Self::with_controller(
            SubmissionController::new(Arc::new(api), credentials),
            session,
        ))
    }

    pub(crate) fn with_controller(controller: SubmissionController, session: Session) -> Self {
        let mut app = Self {
            state: AppState::default(),
            session,
            form: FormState::default(),
            form_kind: None,
            controller,
            pending_submit: false,
            quit: false,
        };
        app.sync_form();
        app
    }

    /// Check if app should quit
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    pub fn form_kind(&self) -> Option<FormKind> {
        self.form_kind
    }

    /// Controls are disabled from the moment a submit is requested until
    /// its response has been handled
    pub fn is_busy(&self) -> bool {
        self.pending_submit || self.form.is_submitting()
    }

    pub fn has_pending_submit(&self) -> bool {
        self.pending_submit
    }

    /// Make `form` match the current view. A form is created fresh when its
    /// view is entered and dropped when the view is left. Home needs a
    /// session and falls back to Login without one.
    fn sync_form(&mut self) {
        if self.state.current_view == View::Home && !self.session.is_authenticated() {
            self.state.navigate_to(View::Login);
        }
        let kind = FormKind::for_view(self.state.current_view);
        if kind != self.form_kind {
            self.form = kind.map(|k| k.new_form()).unwrap_or_default();
            self.form_kind = kind;
        }
    }

    /// Navigate to a new view
    pub fn navigate(&mut self, view: View) {
        self.state.navigate(view);
        self.sync_form();
    }

    /// Go back to previous view, quitting when there is none
    pub fn go_back(&mut self) {
        if self.state.go_back() {
            self.sync_form();
        } else {
            self.quit = true;
        }
    }

    /// Handle a key event
    pub fn handle_key(&mut self, key: KeyEvent) {
        // Handle error dialog dismissal first (modal)
        if self.state.has_errors() {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
                self.state.dismiss_error();
            }
            return;
        }

        if self.state.current_view.is_form_view() {
            self.handle_form_key(key);
        } else {
            self.handle_home_key(key);
        }
    }

    /// Handle bracketed paste into the focused field
    pub fn handle_paste(&mut self, text: &str) {
        if self.state.has_errors() || !self.state.current_view.is_form_view() || self.is_busy() {
            return;
        }
        match self.form.paste(text) {
            Ok(()) => self.revalidate(),
            Err(err) => tracing::warn!("paste ignored: {err}"),
        }
    }

    /// Re-run the schema so errors follow the values being edited. Only
    /// touched fields show theirs.
    fn revalidate(&mut self) {
        if let Some(kind) = self.form_kind {
            let errors = kind.schema().validate(&self.form);
            self.form.set_errors(errors);
        }
    }

    /// Handle keys in form views
    fn handle_form_key(&mut self, key: KeyEvent) {
        // Every control is disabled while a submission is in flight
        if self.is_busy() {
            return;
        }

        // Clear any status messages on key press
        self.state.status_message = None;

        match key.code {
            KeyCode::Esc => self.go_back(),
            KeyCode::Enter => self.pending_submit = true,
            KeyCode::Char('s') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.pending_submit = true;
            }
            KeyCode::Char('n')
                if key.modifiers.contains(KeyModifiers::CONTROL)
                    && self.state.current_view == View::Login =>
            {
                self.navigate(FormKind::Address.view());
            }
            KeyCode::Tab | KeyCode::Down => {
                self.form.next_field();
                self.revalidate();
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.form.prev_field();
                self.revalidate();
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.form.input_char(c);
                self.revalidate();
            }
            KeyCode::Backspace => {
                self.form.backspace();
                self.revalidate();
            }
            _ => {}
        }
    }

    /// Handle keys in Home view
    fn handle_home_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('l') => {
                self.session.logout();
                self.state.navigate_to(View::Login);
                self.sync_form();
                self.state.status_message = Some("Sessão encerrada".to_string());
            }
            KeyCode::Char('q') | KeyCode::Esc => self.quit = true,
            _ => {}
        }
    }

    /// Run the submit requested by the last key press, if any
    pub async fn run_pending_submit(&mut self) -> Option<SubmitOutcome> {
        if !std::mem::take(&mut self.pending_submit) {
            return None;
        }
        let kind = self.form_kind?;
        let schema = kind.schema();

        let outcome = match kind.endpoint() {
            Some(endpoint) => {
                self.controller
                    .submit(
                        &mut self.form,
                        &schema,
                        endpoint,
                        &mut self.state,
                        kind.success_view(),
                    )
                    .await
            }
            None => self.login(kind),
        };

        self.report(kind, &outcome);
        self.sync_form();
        Some(outcome)
    }

    /// Hand a validated login form to the session
    fn login(&mut self, kind: FormKind) -> SubmitOutcome {
        if let Err(outcome) = self
            .controller
            .validate_for_submit(&mut self.form, &kind.schema())
        {
            return outcome;
        }
        let email = self.form.value("email").unwrap_or_default().trim().to_string();
        self.session.login(&email);
        self.state.navigate_to(kind.success_view());
        SubmitOutcome::Success
    }

    /// Surface the outcome of a submit to the user
    fn report(&mut self, kind: FormKind, outcome: &SubmitOutcome) {
        match outcome {
            SubmitOutcome::Success => {
                if kind == FormKind::Address {
                    self.state.status_message = Some("Cadastro realizado".to_string());
                }
            }
            SubmitOutcome::Invalid { message, .. } => {
                self.state.status_message = Some(message.clone());
            }
            SubmitOutcome::AlreadySubmitting => {}
            SubmitOutcome::Failure(SubmitFailure::Status(status)) => {
                self.state
                    .push_error(format!("Erro ao cadastrar: o servidor respondeu {status}"));
            }
            SubmitOutcome::Failure(SubmitFailure::Transport(err)) => {
                self.state.push_error(format!("Erro na chamada da API: {err}"));
            }
        }
    }
}
