//! Command handlers - thin adapters from CLI dispatch to the
//! supervisor port.
//!
//! Handlers follow the canonical pattern:
//! - Signature: `pub async fn execute(supervisor: &impl WorkerSupervisor) -> Result<()>`
//! - Print the operation outcome for the terminal
//! - Map failed outcomes to the process exit status

pub mod paths;
pub mod start;
pub mod status;
pub mod stop;

use anyhow::Result;

use sitectl_core::Outcome;

/// Print a successful outcome; surface a failed one as the error that
/// sets the exit status.
pub(crate) fn report(outcome: Outcome) -> Result<()> {
    if outcome.success {
        println!("{}", outcome.message);
        Ok(())
    } else {
        anyhow::bail!(outcome.message)
    }
}
