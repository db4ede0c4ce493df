//! Start command handler.

use anyhow::Result;

use sitectl_core::WorkerSupervisor;

use super::report;

/// Execute the start command.
///
/// Launches the site worker through the supervisor and reports the
/// outcome, including the PID on success.
pub async fn execute(supervisor: &impl WorkerSupervisor) -> Result<()> {
    report(supervisor.start_outcome().await)
}
