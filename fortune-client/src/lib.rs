//! fortune-client: submits fortune requests and keeps the session's results.

pub mod api;
pub mod error;
pub mod form;
pub mod models;
pub mod session;

pub use api::{FortuneApi, HttpFortuneApi};
pub use error::ClientError;
pub use form::{FormState, RequestForm};
pub use models::{FortuneRequest, FortuneResponse, BIRTH_DATE_REQUIRED};
pub use session::{FortuneResult, SessionError, SessionStore, EMPTY_STATE_MESSAGE};
