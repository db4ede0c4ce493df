//! Status command handler.

use anyhow::Result;

use sitectl_core::WorkerSupervisor;

/// Execute the status command.
///
/// Prints the liveness report. A stopped worker exits non-zero so
/// scripts can branch on the result without parsing output.
pub async fn execute(supervisor: &impl WorkerSupervisor) -> Result<()> {
    let outcome = supervisor.status_outcome().await;
    println!("{}", outcome.message);
    if !outcome.success {
        std::process::exit(1);
    }
    Ok(())
}
