//! Leader-side bookkeeping that turns "server X has replicated up to index N" facts into a single
//! majority-safe commit index, across voter-set changes.

mod error;
mod index;
mod notify;
mod quorum;
mod server_id;
mod tracker;

pub use error::CommitmentError;
pub use index::Index;
pub use notify::channel;
pub use notify::CommitListener;
pub use notify::CommitNotifier;
pub use quorum::majority;
pub use quorum::quorum_match_index;
pub use server_id::ServerId;
pub use tracker::CommitmentConfig;
pub use tracker::CommitmentTracker;
