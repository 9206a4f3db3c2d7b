//! Commit-index bookkeeping for a Raft leader: which log index a majority of voters has
//! replicated, kept correct while the voter set changes underneath it.

mod commitment;
mod simulation;

pub use commitment::channel as commit_channel;
pub use commitment::majority;
pub use commitment::quorum_match_index;
pub use commitment::CommitListener;
pub use commitment::CommitNotifier;
pub use commitment::CommitmentConfig;
pub use commitment::CommitmentError;
pub use commitment::CommitmentTracker;
pub use commitment::Index;
pub use commitment::ServerId;
pub use simulation::create_root_logger_for_stdout;
pub use simulation::run_simulation;
pub use simulation::server_id;
pub use simulation::SimulationError;
pub use simulation::SimulationOptions;
pub use simulation::SimulationOptionsError;
pub use simulation::SimulationReport;
