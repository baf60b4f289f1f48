//! Ports - trait seams between the orchestration core and its collaborators.
//!
//! Adapters implement these traits; the application layer depends only on
//! the traits, never on concrete adapters.

mod intent;
mod model_provider;
mod tool;

pub use intent::{Intent, IntentExtractor, IntentResolution};
pub use model_provider::{
    GenerateRequest, HealthReport, HealthStatus, ModelError, ModelProvider,
};
pub use tool::{Tool, ToolFailure};
