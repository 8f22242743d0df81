//! Form submission workflow
//!
//! `SubmissionController::submit` gatekeeps a form through its schema, takes
//! the form's submission lock, posts the normalized payload and reacts to the
//! response. The lock is a guard object: it is released when the guard is
//! dropped, so every exit path (success, HTTP failure, transport failure,
//! panic, or the submit future being dropped) leaves the form unlocked.

use crate::api::{ApiClientTrait, ApiError, ApiResponse};
use crate::credentials::CredentialStore;
use crate::state::{FormState, SubmissionFlag, ValidationSchema, View};
use std::sync::Arc;

/// Screen navigation, fire-and-forget
pub trait Navigator {
    fn navigate_to(&mut self, view: View);
}

/// Why a submission that passed validation did not succeed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitFailure {
    /// The server answered with a non-2xx status
    Status(u16),
    /// No response was received
    Transport(String),
}

/// Result of a submit attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Success,
    /// Validation failed; `field` is the first invalid field in declared order
    Invalid { field: String, message: String },
    /// A submission for this form is already in flight
    AlreadySubmitting,
    Failure(SubmitFailure),
}

/// Holds a form's submission lock for as long as it lives
#[derive(Debug)]
pub struct SubmissionLock {
    flag: SubmissionFlag,
}

impl SubmissionLock {
    /// Take the lock, or `None` if a submission already holds it
    pub fn acquire(form: &mut FormState) -> Option<Self> {
        if form.is_submitting() {
            return None;
        }
        Some(Self {
            flag: form.begin_submission(),
        })
    }
}

impl Drop for SubmissionLock {
    fn drop(&mut self) {
        self.flag.end_submission();
    }
}

/// Runs validated forms against the remote API
#[derive(Clone)]
pub struct SubmissionController {
    api: Arc<dyn ApiClientTrait>,
    credentials: Arc<dyn CredentialStore>,
}

impl SubmissionController {
    pub fn new(api: Arc<dyn ApiClientTrait>, credentials: Arc<dyn CredentialStore>) -> Self {
        Self { api, credentials }
    }

    /// Pre-submit gate shared by every form.
    ///
    /// Marks every field touched and stores the validation errors on the
    /// form. Fails when a submission is in flight or a field is invalid; in
    /// both cases the lock is left as it was.
    pub fn validate_for_submit(
        &self,
        form: &mut FormState,
        schema: &ValidationSchema,
    ) -> Result<(), SubmitOutcome> {
        if form.is_submitting() {
            tracing::debug!("submit ignored: submission already in progress");
            return Err(SubmitOutcome::AlreadySubmitting);
        }

        form.touch_all();
        let first = schema.first_error(form);
        form.set_errors(schema.validate(form));

        match first {
            Some((field, message)) => {
                tracing::debug!(%field, %message, "submit blocked by validation");
                Err(SubmitOutcome::Invalid { field, message })
            }
            None => Ok(()),
        }
    }

    /// Validate `form` and, when clean, POST it to `endpoint`.
    ///
    /// On a 2xx response the navigator is sent to `on_success`. Any other
    /// outcome is logged and returned; field values are never modified.
    pub async fn submit(
        &self,
        form: &mut FormState,
        schema: &ValidationSchema,
        endpoint: &str,
        navigator: &mut dyn Navigator,
        on_success: View,
    ) -> SubmitOutcome {
        if let Err(outcome) = self.validate_for_submit(form, schema) {
            return outcome;
        }

        let Some(lock) = SubmissionLock::acquire(form) else {
            return SubmitOutcome::AlreadySubmitting;
        };

        let token = self.credentials.get_token();
        if token.is_none() {
            tracing::warn!("no stored token, posting to {endpoint} without authorization");
        }
        let payload = schema.payload(form);

        let result: Result<ApiResponse, ApiError> =
            self.api.post_json(endpoint, token, &payload).await;
        drop(lock);

        match result {
            Ok(response) if response.is_success() => {
                tracing::info!(endpoint, status = response.status, "submission accepted");
                navigator.navigate_to(on_success);
                SubmitOutcome::Success
            }
            Ok(response) => {
                tracing::error!(
                    endpoint,
                    status = response.status,
                    body = %response.body,
                    "submission rejected by server"
                );
                SubmitOutcome::Failure(SubmitFailure::Status(response.status))
            }
            Err(err) => {
                tracing::error!(endpoint, "submission failed: {err}");
                SubmitOutcome::Failure(SubmitFailure::Transport(err.to_string()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::MockApiClientTrait;
    use crate::credentials::MockCredentialStore;
    use crate::state::{FormKind, SubmissionPayload};
    use async_trait::async_trait;
    use mockall::predicate::eq;
    use std::time::Duration;

    const ADDRESS_ENDPOINT: &str = "/api/endereco";

    #[derive(Default)]
    struct RecordingNavigator {
        visited: Vec<View>,
    }

    impl Navigator for RecordingNavigator {
        fn navigate_to(&mut self, view: View) {
            self.visited.push(view);
        }
    }

    fn credentials(token: Option<&'static str>) -> Arc<dyn CredentialStore> {
        let mut store = MockCredentialStore::new();
        store
            .expect_get_token()
            .returning(move || token.map(String::from));
        Arc::new(store)
    }

    fn response(status: u16) -> Result<ApiResponse, ApiError> {
        Ok(ApiResponse {
            status,
            body: String::new(),
        })
    }

    fn valid_address() -> FormState {
        let mut form = FormKind::Address.new_form();
        form.set_field("cep", "01310100").unwrap();
        form.set_field("estado", "SP").unwrap();
        form.set_field("cidade", "São Paulo").unwrap();
        form.set_field("logradouro", "Av. Paulista").unwrap();
        form.set_field("numero", "100").unwrap();
        form
    }

    async fn submit_address(
        controller: &SubmissionController,
        form: &mut FormState,
        navigator: &mut RecordingNavigator,
    ) -> SubmitOutcome {
        controller
            .submit(
                form,
                &FormKind::Address.schema(),
                ADDRESS_ENDPOINT,
                navigator,
                View::Login,
            )
            .await
    }

    mod lock {
        use super::*;

        #[test]
        fn test_lock_held_while_guard_lives() {
            let mut form = valid_address();
            let lock = SubmissionLock::acquire(&mut form).unwrap();
            assert!(form.is_submitting());
            drop(lock);
            assert!(!form.is_submitting());
        }

        #[test]
        fn test_second_acquire_fails() {
            let mut form = valid_address();
            form.begin_submission();
            assert!(SubmissionLock::acquire(&mut form).is_none());
            assert!(form.is_submitting());
        }

        #[test]
        fn test_lock_released_on_panic() {
            let mut form = valid_address();
            let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
                let _lock = SubmissionLock::acquire(&mut form).unwrap();
                panic!("boom");
            }));
            assert!(result.is_err());
            assert!(!form.is_submitting());
        }
    }

    mod validation_gate {
        use super::*;
        use pretty_assertions::assert_eq;

        #[tokio::test]
        async fn test_missing_field_blocks_network_call() {
            let mut api = MockApiClientTrait::new();
            api.expect_post_json().times(0);
            let controller = SubmissionController::new(Arc::new(api), credentials(Some("t")));

            let mut form = valid_address();
            form.set_field("cidade", "").unwrap();
            let mut navigator = RecordingNavigator::default();

            let outcome = submit_address(&controller, &mut form, &mut navigator).await;

            assert_eq!(
                outcome,
                SubmitOutcome::Invalid {
                    field: "cidade".to_string(),
                    message: "Cidade obrigatória*".to_string(),
                }
            );
            assert!(!form.is_submitting());
            assert_eq!(form.visible_error("cidade"), Some("Cidade obrigatória*"));
            assert!(navigator.visited.is_empty());
        }

        #[tokio::test]
        async fn test_first_invalid_field_is_reported() {
            let mut api = MockApiClientTrait::new();
            api.expect_post_json().times(0);
            let controller = SubmissionController::new(Arc::new(api), credentials(None));

            let mut form = FormKind::Address.new_form();
            let mut navigator = RecordingNavigator::default();

            let outcome = submit_address(&controller, &mut form, &mut navigator).await;

            assert_eq!(
                outcome,
                SubmitOutcome::Invalid {
                    field: "cep".to_string(),
                    message: "CEP é obrigatório.".to_string(),
                }
            );
            assert_eq!(form.errors().len(), 5);
        }

        #[tokio::test]
        async fn test_submit_while_in_flight_is_rejected() {
            let mut api = MockApiClientTrait::new();
            api.expect_post_json().times(0);
            let controller = SubmissionController::new(Arc::new(api), credentials(None));

            let mut form = valid_address();
            form.begin_submission();
            let mut navigator = RecordingNavigator::default();

            let outcome = submit_address(&controller, &mut form, &mut navigator).await;

            assert_eq!(outcome, SubmitOutcome::AlreadySubmitting);
            // The in-flight submission still owns the lock
            assert!(form.is_submitting());
        }

        #[test]
        fn test_gate_passes_valid_login() {
            let controller = SubmissionController::new(
                Arc::new(MockApiClientTrait::new()),
                credentials(None),
            );
            let mut form = FormKind::Login.new_form();
            form.set_field("email", "ana@helplife.com.br").unwrap();
            form.set_field("password", "segredo").unwrap();

            assert!(controller
                .validate_for_submit(&mut form, &FormKind::Login.schema())
                .is_ok());
            assert!(form.errors().is_empty());
        }
    }

    mod outcomes {
        use super::*;
        use pretty_assertions::assert_eq;

        #[tokio::test]
        async fn test_success_posts_once_and_navigates() {
            let expected = FormKind::Address.schema().payload(&valid_address());
            let mut api = MockApiClientTrait::new();
            api.expect_post_json()
                .with(eq(ADDRESS_ENDPOINT), eq(Some("abc123".to_string())), eq(expected))
                .times(1)
                .returning(|_, _, _| response(201));
            let controller =
                SubmissionController::new(Arc::new(api), credentials(Some("abc123")));

            let mut form = valid_address();
            let mut navigator = RecordingNavigator::default();

            let outcome = submit_address(&controller, &mut form, &mut navigator).await;

            assert_eq!(outcome, SubmitOutcome::Success);
            assert_eq!(navigator.visited, vec![View::Login]);
            assert!(!form.is_submitting());
        }

        #[tokio::test]
        async fn test_missing_token_posts_without_one() {
            let mut api = MockApiClientTrait::new();
            api.expect_post_json()
                .withf(|_, token, _| token.is_none())
                .times(1)
                .returning(|_, _, _| response(200));
            let controller = SubmissionController::new(Arc::new(api), credentials(None));

            let mut form = valid_address();
            let mut navigator = RecordingNavigator::default();

            let outcome = submit_address(&controller, &mut form, &mut navigator).await;
            assert_eq!(outcome, SubmitOutcome::Success);
        }

        #[tokio::test]
        async fn test_payload_is_normalized() {
            let mut api = MockApiClientTrait::new();
            api.expect_post_json()
                .withf(|_, _, body| {
                    serde_json::to_value(body).is_ok_and(|json| {
                        json["cep"] == "01310100"
                            && json.as_object().is_some_and(|fields| fields.len() == 5)
                    })
                })
                .times(1)
                .returning(|_, _, _| response(200));
            let controller = SubmissionController::new(Arc::new(api), credentials(None));

            let mut form = valid_address();
            form.set_field("cep", "01310-100").unwrap();
            let mut navigator = RecordingNavigator::default();

            submit_address(&controller, &mut form, &mut navigator).await;
            // Raw value is left as typed
            assert_eq!(form.value("cep"), Some("01310-100"));
        }

        #[tokio::test]
        async fn test_server_error_unlocks_without_navigation() {
            for status in [400, 401, 404, 422, 500, 503] {
                let mut api = MockApiClientTrait::new();
                api.expect_post_json()
                    .times(1)
                    .returning(move |_, _, _| response(status));
                let controller = SubmissionController::new(Arc::new(api), credentials(Some("t")));

                let mut form = valid_address();
                let mut navigator = RecordingNavigator::default();

                let outcome = submit_address(&controller, &mut form, &mut navigator).await;

                assert_eq!(outcome, SubmitOutcome::Failure(SubmitFailure::Status(status)));
                assert!(!form.is_submitting());
                assert!(navigator.visited.is_empty());
                assert!(form.errors().is_empty());
                assert_eq!(form.value("cidade"), Some("São Paulo"));
            }
        }

        #[tokio::test]
        async fn test_transport_error_unlocks() {
            let mut api = MockApiClientTrait::new();
            api.expect_post_json()
                .times(1)
                .returning(|_, _, _| Err(ApiError::InvalidToken));
            let controller = SubmissionController::new(Arc::new(api), credentials(Some("t")));

            let mut form = valid_address();
            let mut navigator = RecordingNavigator::default();

            let outcome = submit_address(&controller, &mut form, &mut navigator).await;

            assert!(matches!(
                outcome,
                SubmitOutcome::Failure(SubmitFailure::Transport(_))
            ));
            assert!(!form.is_submitting());
            assert!(navigator.visited.is_empty());
        }

        #[tokio::test]
        async fn test_form_can_be_resubmitted_after_failure() {
            let mut api = MockApiClientTrait::new();
            let mut seq = mockall::Sequence::new();
            api.expect_post_json()
                .times(1)
                .in_sequence(&mut seq)
                .returning(|_, _, _| response(500));
            api.expect_post_json()
                .times(1)
                .in_sequence(&mut seq)
                .returning(|_, _, _| response(201));
            let controller = SubmissionController::new(Arc::new(api), credentials(Some("t")));

            let mut form = valid_address();
            let mut navigator = RecordingNavigator::default();

            assert_eq!(
                submit_address(&controller, &mut form, &mut navigator).await,
                SubmitOutcome::Failure(SubmitFailure::Status(500))
            );
            assert_eq!(
                submit_address(&controller, &mut form, &mut navigator).await,
                SubmitOutcome::Success
            );
        }

        #[test]
        fn test_submit_on_blocking_executor() {
            let mut api = MockApiClientTrait::new();
            api.expect_post_json()
                .times(1)
                .returning(|_, _, _| response(204));
            let controller = SubmissionController::new(Arc::new(api), credentials(None));

            let mut form = valid_address();
            let mut navigator = RecordingNavigator::default();

            let outcome =
                tokio_test::block_on(submit_address(&controller, &mut form, &mut navigator));
            assert_eq!(outcome, SubmitOutcome::Success);
        }
    }

    mod cancellation {
        use super::*;

        /// API whose requests never complete
        struct HangingApi;

        #[async_trait]
        impl ApiClientTrait for HangingApi {
            async fn post_json(
                &self,
                _path: &str,
                _token: Option<String>,
                _body: &SubmissionPayload,
            ) -> Result<ApiResponse, ApiError> {
                std::future::pending().await
            }
        }

        #[tokio::test]
        async fn test_dropped_submission_releases_lock() {
            let controller = SubmissionController::new(Arc::new(HangingApi), credentials(None));
            let mut form = valid_address();
            let mut navigator = RecordingNavigator::default();

            let result = tokio::time::timeout(
                Duration::from_millis(20),
                submit_address(&controller, &mut form, &mut navigator),
            )
            .await;

            assert!(result.is_err());
            assert!(!form.is_submitting());
            assert!(navigator.visited.is_empty());
        }
    }

    mod in_flight {
        use super::*;
        use tokio::sync::Notify;
        use tokio_test::{assert_pending, assert_ready, assert_ready_eq, task};

        /// API that parks each request until the test releases it
        struct GatedApi {
            release: Arc<Notify>,
        }

        #[async_trait]
        impl ApiClientTrait for GatedApi {
            async fn post_json(
                &self,
                _path: &str,
                _token: Option<String>,
                _body: &SubmissionPayload,
            ) -> Result<ApiResponse, ApiError> {
                self.release.notified().await;
                response(201)
            }
        }

        #[test]
        fn test_lock_held_until_response_arrives() {
            let release = Arc::new(Notify::new());
            let api = GatedApi {
                release: Arc::clone(&release),
            };
            let controller = SubmissionController::new(Arc::new(api), credentials(None));
            let mut form = valid_address();
            let lock_state = form.submission_flag();
            let mut navigator = RecordingNavigator::default();

            let mut submit = task::spawn(submit_address(&controller, &mut form, &mut navigator));

            assert_pending!(submit.poll());
            assert!(lock_state.is_set());
            assert_pending!(submit.poll());
            assert!(lock_state.is_set());

            release.notify_one();
            assert!(submit.is_woken());
            assert_ready_eq!(submit.poll(), SubmitOutcome::Success);
            assert!(!lock_state.is_set());

            drop(submit);
            assert_eq!(navigator.visited, vec![View::Login]);
        }

        #[test]
        fn test_lock_taken_only_after_validation() {
            let release = Arc::new(Notify::new());
            let api = GatedApi {
                release: Arc::clone(&release),
            };
            let controller = SubmissionController::new(Arc::new(api), credentials(None));
            let mut form = FormKind::Address.new_form();
            let lock_state = form.submission_flag();
            let mut navigator = RecordingNavigator::default();

            let mut submit = task::spawn(submit_address(&controller, &mut form, &mut navigator));

            assert!(matches!(
                assert_ready!(submit.poll()),
                SubmitOutcome::Invalid { .. }
            ));
            assert!(!lock_state.is_set());
        }
    }

    mod http {
        use super::*;
        use crate::api::ApiClient;
        use pretty_assertions::assert_eq;
        use wiremock::matchers::{body_json, header, method, path};
        use wiremock::{Mock, MockServer, ResponseTemplate};

        #[tokio::test]
        async fn test_address_submission_against_server() {
            let server = MockServer::start().await;
            Mock::given(method("POST"))
                .and(path("/api/endereco"))
                .and(header("authorization", "Bearer abc123"))
                .and(body_json(serde_json::json!({
                    "cep": "01310100",
                    "estado": "SP",
                    "cidade": "São Paulo",
                    "logradouro": "Av. Paulista",
                    "numero": "100",
                })))
                .respond_with(ResponseTemplate::new(201))
                .expect(1)
                .mount(&server)
                .await;

            let api = ApiClient::new(server.uri().parse().unwrap()).unwrap();
            let controller = SubmissionController::new(Arc::new(api), credentials(Some("abc123")));
            let mut form = valid_address();
            let mut navigator = RecordingNavigator::default();

            let outcome = submit_address(&controller, &mut form, &mut navigator).await;

            assert_eq!(outcome, SubmitOutcome::Success);
            assert_eq!(navigator.visited, vec![View::Login]);
        }

        #[tokio::test]
        async fn test_unreachable_server_is_transport_failure() {
            let api = ApiClient::new("http://127.0.0.1:9".parse().unwrap()).unwrap();
            let controller = SubmissionController::new(Arc::new(api), credentials(None));
            let mut form = valid_address();
            let mut navigator = RecordingNavigator::default();

            let outcome = submit_address(&controller, &mut form, &mut navigator).await;

            assert!(matches!(
                outcome,
                SubmitOutcome::Failure(SubmitFailure::Transport(_))
            ));
            assert!(!form.is_submitting());
        }
    }
}
