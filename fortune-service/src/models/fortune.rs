//! Wire models for the `/api/fortune` endpoint.

use serde::{Deserialize, Deserializer, Serialize};

/// Birth details and reading preferences submitted by the form.
///
/// The server builds a prompt from whatever it receives. Missing and `null`
/// fields read as empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FortuneRequest {
    #[serde(default, deserialize_with = "null_as_default")]
    pub birth_date: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birth_time: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birth_place: Option<String>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub gender: Gender,

    #[serde(default, deserialize_with = "null_as_default")]
    pub fortune_type: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub tone: Tone,

    #[serde(default, deserialize_with = "null_as_default")]
    pub custom_question: String,
}

impl FortuneRequest {
    /// Birth time, if one was entered.
    pub fn birth_time(&self) -> Option<&str> {
        non_empty(self.birth_time.as_deref())
    }

    /// Birth place, if one was entered.
    pub fn birth_place(&self) -> Option<&str> {
        non_empty(self.birth_place.as_deref())
    }

    /// The additional question, unless it is blank.
    pub fn custom_question(&self) -> Option<&str> {
        if self.custom_question.trim().is_empty() {
            None
        } else {
            Some(self.custom_question.as_str())
        }
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Successful response body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FortuneResponse {
    /// Markdown produced by the text model.
    pub fortune: String,
}

/// Gender as sent by the form.
///
/// Accepts the wire tokens and the Korean labels. Anything else, including a
/// missing value, is `Other`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Gender {
    Male,
    Female,
    #[default]
    Other,
}

impl Gender {
    /// Label used inside the prompt.
    pub fn label(self) -> &'static str {
        match self {
            Gender::Male => "남성",
            Gender::Female => "여성",
            Gender::Other => "기타",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
            Gender::Other => "other",
        }
    }
}

impl From<String> for Gender {
    fn from(value: String) -> Self {
        match value.trim() {
            "male" | "남성" => Gender::Male,
            "female" | "여성" => Gender::Female,
            _ => Gender::Other,
        }
    }
}

impl From<Gender> for String {
    fn from(value: Gender) -> Self {
        value.as_str().to_string()
    }
}

/// Emotional stance the reading should take.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Tone {
    #[default]
    Unset,
    Neutral,
    Optimistic,
    Pessimistic,
    /// Free-form tone text, used verbatim.
    Custom(String),
}

impl Tone {
    /// Label substituted into the tone directive, `None` when unset.
    pub fn label(&self) -> Option<&str> {
        match self {
            Tone::Unset => None,
            Tone::Neutral => Some("중립적"),
            Tone::Optimistic => Some("낙관적"),
            Tone::Pessimistic => Some("염세적"),
            Tone::Custom(text) => Some(text.as_str()),
        }
    }
}

impl From<String> for Tone {
    fn from(value: String) -> Self {
        if value.is_empty() {
            return Tone::Unset;
        }
        match value.trim() {
            "neutral" | "중립적" => Tone::Neutral,
            "optimistic" | "낙관적" => Tone::Optimistic,
            "pessimistic" | "염세적" => Tone::Pessimistic,
            _ => Tone::Custom(value),
        }
    }
}

impl From<Tone> for String {
    fn from(value: Tone) -> Self {
        value.label().unwrap_or_default().to_string()
    }
}
