//! The request form: validates input, runs one request at a time and files
//! successful results into the session.

use crate::api::FortuneApi;
use crate::error::ClientError;
use crate::models::{FortuneRequest, BIRTH_DATE_REQUIRED};
use crate::session::{FortuneResult, SessionStore};
use tokio::sync::watch;
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormState {
    #[default]
    Idle,
    Generating,
}

/// Publishes `Generating` for the duration of one request and `Idle` on
/// every exit path, including a dropped future.
struct GeneratingGuard<'a> {
    state: &'a watch::Sender<FormState>,
}

impl<'a> GeneratingGuard<'a> {
    fn enter(state: &'a watch::Sender<FormState>) -> Self {
        state.send_replace(FormState::Generating);
        Self { state }
    }
}

impl Drop for GeneratingGuard<'_> {
    fn drop(&mut self) {
        self.state.send_replace(FormState::Idle);
    }
}

/// Submission is `&mut self`, so a single owner can never have two requests
/// in flight. Progress is observed through [`RequestForm::status`].
pub struct RequestForm<A> {
    api: A,
    session: SessionStore,
    state: watch::Sender<FormState>,
}

impl<A: FortuneApi> RequestForm<A> {
    pub fn new(api: A) -> Self {
        let (state, _) = watch::channel(FormState::Idle);
        Self {
            api,
            session: SessionStore::new(),
            state,
        }
    }

    /// Receiver that sees every state change, readable while a submission
    /// is running.
    pub fn status(&self) -> watch::Receiver<FormState> {
        self.state.subscribe()
    }

    pub fn state(&self) -> FormState {
        *self.state.borrow()
    }

    pub fn is_generating(&self) -> bool {
        self.state() == FormState::Generating
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    /// Switch tabs.
    pub fn select(&mut self, index: usize) -> Result<(), ClientError> {
        Ok(self.session.set_active(index)?)
    }

    /// Submit `input` and return the index of the new result, which becomes
    /// the active one.
    ///
    /// An empty birth date fails with [`ClientError::Validation`] before any
    /// request is made. Request failures leave the session untouched.
    pub async fn submit(&mut self, input: FortuneRequest) -> Result<usize, ClientError> {
        validate_input(&input)?;

        let outcome = {
            let _generating = GeneratingGuard::enter(&self.state);
            self.api.request_fortune(&input).await
        };

        let content = outcome.map_err(|e| {
            tracing::error!(error = %e, "Error fetching fortune");
            e
        })?;

        let id = self.session.next_id();
        let index = self.session.append(FortuneResult {
            id,
            fortune_type: input.fortune_type,
            content,
        })?;
        self.session.set_active(index)?;

        tracing::info!(id, index, "Fortune added to session");
        Ok(index)
    }
}

fn validate_input(input: &FortuneRequest) -> Result<(), ClientError> {
    input.validate().map_err(|errors| {
        let message = errors
            .field_errors()
            .values()
            .flat_map(|errs| errs.iter())
            .find_map(|e| e.message.as_ref().map(|m| m.to_string()))
            .unwrap_or_else(|| BIRTH_DATE_REQUIRED.to_string());

        tracing::warn!(%message, "Fortune request rejected");
        ClientError::Validation(message)
    })
}
