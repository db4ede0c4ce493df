//! Supervisor port definition.
//!
//! The port expresses intent only; implementations own every process and
//! filesystem detail. The provided `*_outcome` methods are the boundary
//! where typed errors are folded into display pairs for the calling CLI,
//! shared by every implementation.

use async_trait::async_trait;

use crate::error::SupervisorError;
use crate::outcome::Outcome;
use crate::status::WorkerStatus;

/// Lifecycle operations for the supervised site worker.
#[async_trait]
pub trait WorkerSupervisor: Send + Sync {
    /// Launch the worker if no instance is running.
    ///
    /// Returns the PID of the launched worker.
    async fn start(&self) -> Result<u32, SupervisorError>;

    /// Terminate the running worker and clean up the lock and PID record.
    async fn stop(&self) -> Result<(), SupervisorError>;

    /// Report worker liveness, reconciling stale state on the way.
    async fn status(&self) -> WorkerStatus;

    /// Run `start` and fold the result into a display outcome.
    async fn start_outcome(&self) -> Outcome {
        match self.start().await {
            Ok(pid) => Outcome::success(format!("site worker started (pid {pid})")),
            Err(e) => Outcome::failure(e.to_string()),
        }
    }

    /// Run `stop` and fold the result into a display outcome.
    async fn stop_outcome(&self) -> Outcome {
        match self.stop().await {
            Ok(()) => Outcome::success("site worker stopped"),
            Err(e) => Outcome::failure(e.to_string()),
        }
    }

    /// Report status as a display outcome; `success` mirrors "running".
    async fn status_outcome(&self) -> Outcome {
        match self.status().await {
            status @ WorkerStatus::Running { .. } => Outcome::success(status.to_string()),
            status @ WorkerStatus::Stopped => Outcome::failure(status.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockall::mock;

    mock! {
        Sup {}

        #[async_trait]
        impl WorkerSupervisor for Sup {
            async fn start(&self) -> Result<u32, SupervisorError>;
            async fn stop(&self) -> Result<(), SupervisorError>;
            async fn status(&self) -> WorkerStatus;
        }
    }

    #[tokio::test]
    async fn start_outcome_reports_the_pid() {
        let mut sup = MockSup::new();
        sup.expect_start().returning(|| Ok(4242));

        let outcome = sup.start_outcome().await;
        assert!(outcome.success);
        assert!(outcome.message.contains("4242"));
    }

    #[tokio::test]
    async fn start_outcome_recovers_errors_into_messages() {
        let mut sup = MockSup::new();
        sup.expect_start()
            .returning(|| Err(SupervisorError::LockContention));

        let outcome = sup.start_outcome().await;
        assert!(!outcome.success);
        assert!(outcome.message.contains("instance lock"));
    }

    #[tokio::test]
    async fn stop_outcome_reports_termination_failures_as_messages() {
        let mut sup = MockSup::new();
        sup.expect_stop().returning(|| {
            Err(SupervisorError::Termination {
                pid: 99,
                reason: "permission denied".into(),
            })
        });

        let outcome = sup.stop_outcome().await;
        assert!(!outcome.success);
        assert!(outcome.message.contains("99"));
        assert!(outcome.message.contains("permission denied"));
    }

    #[tokio::test]
    async fn status_outcome_mirrors_liveness() {
        let mut sup = MockSup::new();
        sup.expect_status().returning(|| WorkerStatus::Running {
            pid: 7,
            recorded: true,
        });

        let outcome = sup.status_outcome().await;
        assert!(outcome.success);
        assert!(outcome.message.contains("pid 7"));

        let mut sup = MockSup::new();
        sup.expect_status().returning(|| WorkerStatus::Stopped);
        assert!(!sup.status_outcome().await.success);
    }
}
