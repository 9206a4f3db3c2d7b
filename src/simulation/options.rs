use std::convert::TryFrom;
use tokio::time::Duration;

/// Knobs for a simulated leadership term. Anything left as None gets a default.
#[derive(Clone, Debug, Default)]
pub struct SimulationOptions {
    /// Voters at the start of the term, leader included.
    pub num_voters: Option<usize>,
    /// Index of the last entry the leader will replicate.
    pub last_index: Option<u64>,
    /// First index of the leader's term.
    pub start_index: Option<u64>,
    /// Base delay between two AppendEntries replies from the same follower.
    pub replication_tick: Option<Duration>,
    /// Once this much is committed, the leader swaps one voter for a caught-up learner.
    pub reconfigure_at: Option<u64>,
}

#[derive(Clone, Debug)]
pub(super) struct SimulationOptionsValidated {
    pub num_voters: usize,
    pub last_index: u64,
    pub start_index: u64,
    pub replication_tick: Duration,
    pub reconfigure_at: u64,
}

#[derive(Debug, Eq, PartialEq, thiserror::Error)]
pub enum SimulationOptionsError {
    #[error("A cluster needs at least one voter")]
    NoVoters,
    #[error("Start index {start_index} is beyond the last index {last_index}, nothing could ever commit")]
    StartIndexBeyondLog { start_index: u64, last_index: u64 },
    #[error("Reconfiguration point {reconfigure_at} is beyond the last index {last_index}")]
    ReconfigurationBeyondLog { reconfigure_at: u64, last_index: u64 },
    #[error("Replication tick must be non-zero")]
    ZeroReplicationTick,
}

impl SimulationOptionsValidated {
    fn validate(&self) -> Result<(), SimulationOptionsError> {
        if self.num_voters == 0 {
            return Err(SimulationOptionsError::NoVoters);
        }
        if self.start_index > self.last_index {
            return Err(SimulationOptionsError::StartIndexBeyondLog {
                start_index: self.start_index,
                last_index: self.last_index,
            });
        }
        if self.reconfigure_at > self.last_index {
            return Err(SimulationOptionsError::ReconfigurationBeyondLog {
                reconfigure_at: self.reconfigure_at,
                last_index: self.last_index,
            });
        }
        if self.replication_tick == Duration::from_millis(0) {
            return Err(SimulationOptionsError::ZeroReplicationTick);
        }

        Ok(())
    }
}

impl TryFrom<SimulationOptions> for SimulationOptionsValidated {
    type Error = SimulationOptionsError;

    fn try_from(options: SimulationOptions) -> Result<Self, Self::Error> {
        let last_index = options.last_index.unwrap_or(50);
        let values = SimulationOptionsValidated {
            num_voters: options.num_voters.unwrap_or(5),
            last_index,
            start_index: options.start_index.unwrap_or(1),
            replication_tick: options.replication_tick.unwrap_or(Duration::from_millis(5)),
            reconfigure_at: options.reconfigure_at.unwrap_or(last_index / 2),
        };

        values.validate()?;
        Ok(values)
    }
}
