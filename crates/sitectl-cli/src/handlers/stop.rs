//! Stop command handler.

use anyhow::Result;

use sitectl_core::WorkerSupervisor;

use super::report;

/// Execute the stop command.
///
/// Terminates the site worker and cleans up its state files; stopping a
/// worker that is not running is reported as a failure.
pub async fn execute(supervisor: &impl WorkerSupervisor) -> Result<()> {
    report(supervisor.stop_outcome().await)
}
