//! Persona selection.
//!
//! The persona is chosen once per request. The source of randomness is a
//! trait object so tests can pin the choice.

use rand::seq::SliceRandom;

/// Personas used when none are configured.
pub const DEFAULT_PERSONAS: &[&str] = &[
    "신비로운 타로 마스터",
    "냉철한 서양 점성학자",
    "다정한 동네 점집 할머니",
    "유쾌한 사주 명리학자",
];

/// Picks one persona label from a set.
pub trait PersonaSource: Send + Sync {
    /// Returns `None` only when `personas` is empty.
    fn choose(&self, personas: &[String]) -> Option<String>;
}

/// Uniform choice using the thread-local RNG. Not seedable.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomPersona;

impl PersonaSource for RandomPersona {
    fn choose(&self, personas: &[String]) -> Option<String> {
        personas.choose(&mut rand::thread_rng()).cloned()
    }
}

/// Always returns the same label.
#[derive(Debug, Clone)]
pub struct FixedPersona(pub String);

impl PersonaSource for FixedPersona {
    fn choose(&self, personas: &[String]) -> Option<String> {
        if personas.is_empty() {
            None
        } else {
            Some(self.0.clone())
        }
    }
}

pub fn default_personas() -> Vec<String> {
    DEFAULT_PERSONAS.iter().map(|p| p.to_string()).collect()
}
