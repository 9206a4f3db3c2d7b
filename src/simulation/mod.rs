//! A single simulated leadership term, driving a `CommitmentTracker` the way a leader would: one
//! replication task per follower reporting progress, and a leader loop that wakes up on commit
//! notifications and changes the voter set once along the way.

mod logging;
mod options;
mod worker;

pub use logging::create_root_logger_for_stdout;
pub use options::SimulationOptions;
pub use options::SimulationOptionsError;

use crate::commitment::{self, CommitmentConfig, CommitmentError, CommitmentTracker, Index, ServerId};
use options::SimulationOptionsValidated;
use std::convert::TryFrom;
use std::iter;

#[derive(Debug)]
pub struct SimulationReport {
    pub commit_index: Index,
    /// How many times the leader loop was woken up. At most the number of advances.
    pub wakeups: usize,
    pub reconfigured: bool,
    pub voters: Vec<ServerId>,
}

#[derive(Debug, thiserror::Error)]
pub enum SimulationError {
    #[error("Invalid simulation options: {0}")]
    InvalidOptions(#[from] SimulationOptionsError),
    #[error("Commitment tracker rejected input: {0}")]
    Commitment(#[from] CommitmentError),
    #[error("Replication task failed: {0}")]
    ReplicationTask(#[from] tokio::task::JoinError),
}

pub fn server_id(i: usize) -> ServerId {
    ServerId::new(format!("server-{}", i + 1))
}

pub async fn run_simulation(
    logger: slog::Logger,
    options: SimulationOptions,
) -> Result<SimulationReport, SimulationError> {
    let options = SimulationOptionsValidated::try_from(options)?;
    slog::info!(logger, "Starting simulation: {:?}", options);

    let last_index = Index::new(options.last_index);
    let leader = server_id(0);
    let voters: Vec<ServerId> = (0..options.num_voters).map(server_id).collect();
    // Replicated to from the start, but only becomes a voter at reconfiguration.
    let learner = server_id(options.num_voters);

    let (notifier, mut listener) = commitment::channel();
    let tracker = CommitmentTracker::new_shared(CommitmentConfig {
        logger: logger.clone(),
        notifier,
        voters: voters.clone(),
        start_index: Index::new(options.start_index),
    })?;

    // Leader has every entry in its own log already.
    tracker.match_index(&leader, last_index);

    let mut replication_tasks = Vec::with_capacity(voters.len());
    for follower in voters.iter().skip(1).chain(iter::once(&learner)) {
        let task_logger = logger.new(slog::o!("Follower" => follower.to_string()));
        replication_tasks.push(tokio::spawn(worker::replicate_to_follower(
            task_logger,
            tracker.clone(),
            follower.clone(),
            last_index,
            options.replication_tick,
        )));
    }

    let mut wakeups = 0;
    let mut reconfigured = false;
    let mut commit_index = tracker.commit_index();
    loop {
        if !reconfigured && voters.len() > 1 && commit_index.as_u64() >= options.reconfigure_at {
            let mut new_voters = voters.clone();
            let removed = new_voters.pop();
            new_voters.push(learner.clone());
            slog::info!(logger, "Replacing voter {:?} with {:?}", removed, learner);

            tracker.set_voters(new_voters)?;
            reconfigured = true;
        }

        if commit_index >= last_index || !listener.changed().await {
            break;
        }
        wakeups += 1;

        // The wakeup says nothing about how far we got. Always re-read.
        commit_index = tracker.commit_index();
        slog::info!(logger, "Commit index is now {:?}", commit_index);
    }

    for task in replication_tasks {
        task.await?;
    }

    let report = SimulationReport {
        commit_index: tracker.commit_index(),
        wakeups,
        reconfigured,
        voters: tracker.voters(),
    };
    slog::info!(logger, "Simulation finished: {:?}", report);

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::Duration;

    fn logger() -> slog::Logger {
        slog::Logger::root(slog::Discard, slog::o!())
    }

    #[tokio::test]
    async fn commits_everything_and_reconfigures() {
        let report = run_simulation(
            logger(),
            SimulationOptions {
                num_voters: Some(3),
                last_index: Some(20),
                start_index: Some(1),
                replication_tick: Some(Duration::from_millis(1)),
                reconfigure_at: Some(10),
            },
        )
        .await
        .unwrap();

        assert_eq!(report.commit_index, Index::new(20));
        assert!(report.reconfigured);
        assert!(report.wakeups >= 1);
        assert_eq!(report.voters, vec![server_id(0), server_id(1), server_id(3)]);
    }

    #[tokio::test]
    async fn single_voter_commits_without_waiting() {
        let report = run_simulation(
            logger(),
            SimulationOptions {
                num_voters: Some(1),
                last_index: Some(8),
                replication_tick: Some(Duration::from_millis(1)),
                ..SimulationOptions::default()
            },
        )
        .await
        .unwrap();

        assert_eq!(report.commit_index, Index::new(8));
        assert_eq!(report.wakeups, 0);
        assert!(!report.reconfigured);
        assert_eq!(report.voters, vec![server_id(0)]);
    }

    #[tokio::test]
    async fn invalid_options_fail_fast() {
        let result = run_simulation(
            logger(),
            SimulationOptions {
                num_voters: Some(0),
                ..SimulationOptions::default()
            },
        )
        .await;

        assert!(matches!(
            result,
            Err(SimulationError::InvalidOptions(SimulationOptionsError::NoVoters))
        ));
    }
}
