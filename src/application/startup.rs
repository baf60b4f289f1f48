//! Startup validation - prove the manifest is registered before traffic.
//!
//! Runs once at boot, after tool registration and before the first
//! request. A manifest tool without a registered handler is a wiring
//! defect; failing the boot here is what makes request-time
//! `TOOL_NOT_FOUND` unreachable for manifest tools.

use thiserror::Error;
use tracing::{error, info};

use super::registry::ToolRegistry;
use crate::domain::ToolName;

/// Fatal startup failure.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("tools in manifest but not registered: {}", missing.join(", "))]
    MissingTools { missing: Vec<String> },
}

/// Checks that every manifest tool has a registered handler.
///
/// Returns the number of validated tools. Read-only and idempotent, so
/// it is safe to call again (e.g. from a readiness probe).
///
/// # Errors
///
/// Returns `StartupError::MissingTools` naming every manifest tool the
/// registry lacks.
pub fn validate_startup(
    registry: &ToolRegistry,
    manifest: &[ToolName],
) -> Result<usize, StartupError> {
    let missing: Vec<String> = manifest
        .iter()
        .filter(|name| !registry.has(name.as_str()))
        .map(|name| name.as_str().to_string())
        .collect();

    if !missing.is_empty() {
        error!(missing = ?missing, "startup validation failed");
        return Err(StartupError::MissingTools { missing });
    }

    info!(tools = manifest.len(), "startup validation passed");
    Ok(manifest.len())
}
