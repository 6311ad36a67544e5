//! Request and response bodies of `POST /api/fortune`, as the client sends
//! and reads them.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Warning shown when the birth date is missing.
pub const BIRTH_DATE_REQUIRED: &str = "생년월일을 입력해주세요.";

/// Form input. `gender` and `tone` are passed through as typed; the server
/// accepts both the English tokens and the Korean labels.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct FortuneRequest {
    #[validate(length(min = 1, message = "생년월일을 입력해주세요."))]
    pub birth_date: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub birth_time: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub birth_place: Option<String>,

    pub gender: String,

    pub fortune_type: String,

    pub tone: String,

    pub custom_question: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FortuneResponse {
    pub fortune: String,
}
