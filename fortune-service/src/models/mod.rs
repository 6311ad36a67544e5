//! Domain models for the fortune service.

pub mod fortune;

pub use fortune::{FortuneRequest, FortuneResponse, Gender, Tone};
