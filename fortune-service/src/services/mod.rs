pub mod fortune;
pub mod metrics;
pub mod persona;
pub mod prompt;
pub mod providers;

pub use fortune::{FortuneOptions, FortuneService};
pub use persona::{FixedPersona, PersonaSource, RandomPersona};
pub use prompt::{PromptBuilder, PromptOptions};
