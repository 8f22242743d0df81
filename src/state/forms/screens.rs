//! Form definitions for each screen

use super::field::FormField;
use super::form_state::FormState;
use super::rules::{normalize_cep, EmailFormat, ExactDigitLength, Numeric, Required, CEP_DIGITS};
use super::schema::{FieldRules, ValidationSchema};
use crate::state::View;

/// Endpoint receiving address registrations
pub const ADDRESS_ENDPOINT: &str = "/api/endereco";

/// The forms the app knows how to render and submit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormKind {
    Login,
    Address,
}

impl FormKind {
    pub fn title(&self) -> &'static str {
        match self {
            Self::Login => "Login",
            Self::Address => "Complete seu cadastro",
        }
    }

    /// Label of the submit button
    pub fn submit_label(&self) -> &'static str {
        match self {
            Self::Login => "LOGIN",
            Self::Address => "Cadastrar",
        }
    }

    /// Remote endpoint the form is posted to. Login has none: it hands off
    /// to the session once validation passes.
    pub fn endpoint(&self) -> Option<&'static str> {
        match self {
            Self::Login => None,
            Self::Address => Some(ADDRESS_ENDPOINT),
        }
    }

    /// View the form is shown on
    pub fn view(&self) -> View {
        match self {
            Self::Login => View::Login,
            Self::Address => View::Address,
        }
    }

    /// Form shown on `view`, if the view holds one
    pub fn for_view(view: View) -> Option<Self> {
        match view {
            View::Login => Some(Self::Login),
            View::Address => Some(Self::Address),
            View::Home => None,
        }
    }

    /// Where a successful submission lands
    pub fn success_view(&self) -> View {
        match self {
            Self::Login => View::Home,
            Self::Address => View::Login,
        }
    }

    pub fn fields(&self) -> Vec<FormField> {
        match self {
            Self::Login => vec![
                FormField::text("email", "Email"),
                FormField::secret("password", "Senha"),
            ],
            Self::Address => vec![
                FormField::text("cep", "CEP"),
                FormField::text("estado", "Estado"),
                FormField::text("cidade", "Cidade"),
                FormField::text("logradouro", "Logradouro"),
                FormField::text("numero", "Número"),
            ],
        }
    }

    pub fn schema(&self) -> ValidationSchema {
        match self {
            Self::Login => ValidationSchema::new()
                .field(
                    FieldRules::new("email")
                        .rule(Required::new("Email obrigatório*"))
                        .rule(EmailFormat::new("Insira um email válido")),
                )
                .field(FieldRules::new("password").rule(Required::new("Senha obrigatória*"))),
            Self::Address => ValidationSchema::new()
                .field(
                    FieldRules::new("cep")
                        .rule(Required::new("CEP é obrigatório."))
                        .rule(Numeric::new("O CEP deve ser um número válido."))
                        .rule(ExactDigitLength::new(
                            CEP_DIGITS,
                            "CEP deve ter exatamente 8 dígitos.",
                        ))
                        .normalize_with(normalize_cep),
                )
                .field(FieldRules::new("estado").rule(Required::new("Estado obrigatório*")))
                .field(FieldRules::new("cidade").rule(Required::new("Cidade obrigatória*")))
                .field(
                    FieldRules::new("logradouro").rule(Required::new("Logradouro obrigatório*")),
                )
                .field(FieldRules::new("numero").rule(Required::new("Número obrigatório*"))),
        }
    }

    /// Fresh form instance with every field empty
    pub fn new_form(&self) -> FormState {
        FormState::new(self.fields())
    }
}
