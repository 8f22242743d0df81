//! Application state definitions

use crate::submission::Navigator;
use std::collections::VecDeque;

/// Current view in the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Login,
    /// Address registration ("cadastro")
    Address,
    /// Landing screen once a session is established
    Home,
}

impl View {
    /// Check if the view is a form view
    pub fn is_form_view(&self) -> bool {
        matches!(self, View::Login | View::Address)
    }

    /// Route name used for navigation logging
    pub fn route(&self) -> &'static str {
        match self {
            View::Login => "login",
            View::Address => "cadastro",
            View::Home => "home",
        }
    }
}

/// Main application state
#[derive(Debug, Default)]
pub struct AppState {
    // Navigation
    pub current_view: View,
    pub view_history: Vec<View>,

    // Feedback
    pub status_message: Option<String>,
    error_queue: VecDeque<String>,
}

impl AppState {
    /// Navigate to a new view, remembering the current one
    pub fn navigate(&mut self, view: View) {
        tracing::debug!("navigate {} -> {}", self.current_view.route(), view.route());
        self.view_history.push(self.current_view);
        self.current_view = view;
    }

    /// Return to the previous view. Returns false when there is none.
    pub fn go_back(&mut self) -> bool {
        match self.view_history.pop() {
            Some(view) => {
                self.current_view = view;
                true
            }
            None => false,
        }
    }

    /// Queue an error for the modal error dialog
    pub fn push_error(&mut self, message: String) {
        self.error_queue.push_back(message);
    }

    pub fn has_errors(&self) -> bool {
        !self.error_queue.is_empty()
    }

    pub fn current_error(&self) -> Option<&str> {
        self.error_queue.front().map(String::as_str)
    }

    pub fn dismiss_error(&mut self) {
        self.error_queue.pop_front();
    }
}

impl Navigator for AppState {
    fn navigate_to(&mut self, view: View) {
        // Arriving somewhere after a successful submit starts a fresh stack
        self.view_history.clear();
        self.current_view = view;
    }
}
