use crate::commitment::{quorum, CommitNotifier, CommitmentError, Index, ServerId};
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::mem;
use std::sync::{Arc, Mutex, MutexGuard};

pub struct CommitmentConfig {
    pub logger: slog::Logger,
    pub notifier: CommitNotifier,
    // Members that count towards quorum when the tracker is created.
    pub voters: Vec<ServerId>,
    // First index of the current leadership term. Nothing below it is ever reported as committed,
    // since those entries may belong to an earlier term.
    pub start_index: Index,
}

/// CommitmentTracker is owned by a leader for the duration of its term. Replication workers
/// report what each server has acknowledged, and the tracker turns that into the single commit
/// index the leader is allowed to apply.
///
/// All methods take `&self`, so share it between workers with an `Arc`.
pub struct CommitmentTracker {
    logger: slog::Logger,
    notifier: CommitNotifier,
    start_index: Index,
    state: Mutex<TrackerState>,
}

struct TrackerState {
    // > index of highest log entry known to be replicated on server
    // > (initialized to 0, increases monotonically)
    // Entries outlive voter-set changes, so a server that leaves and rejoins keeps its progress.
    match_indexes: HashMap<ServerId, Index>,
    // Not necessarily the same as the keys of `match_indexes`.
    voters: HashSet<ServerId>,
    commit_index: Index,
}

impl CommitmentTracker {
    pub fn new(config: CommitmentConfig) -> Result<Self, CommitmentError> {
        let voters = unique_voters(config.voters)?;
        let match_indexes = voters.iter().map(|voter| (voter.clone(), Index::ZERO)).collect();
        let logger = config.logger.new(slog::o!("Component" => "Commitment"));

        slog::debug!(
            logger,
            "Tracking commitment for {} voters from start index {:?}",
            voters.len(),
            config.start_index
        );

        Ok(CommitmentTracker {
            logger,
            notifier: config.notifier,
            start_index: config.start_index,
            state: Mutex::new(TrackerState {
                match_indexes,
                voters,
                commit_index: Index::ZERO,
            }),
        })
    }

    pub fn new_shared(config: CommitmentConfig) -> Result<Arc<Self>, CommitmentError> {
        Self::new(config).map(Arc::new)
    }

    /// `match_index()` records that `server` has replicated everything up to `index`.
    ///
    /// Reports that don't move the server forward are dropped, since AppendEntries replies can
    /// arrive out of order. `server` doesn't have to be a voter; a non-voter's progress is kept
    /// for when it joins the voter set.
    ///
    /// Returns true if the commit index advanced.
    pub fn match_index(&self, server: &ServerId, index: Index) -> bool {
        let mut state = self.lock_state();

        let recorded = state.match_indexes.get(server).copied().unwrap_or(Index::ZERO);
        if index <= recorded {
            slog::trace!(
                self.logger,
                "Dropping stale match index {:?} for {} (recorded {:?})",
                index,
                server,
                recorded
            );
            return false;
        }

        state.match_indexes.insert(server.clone(), index);
        self.recalculate(&mut state)
    }

    /// `set_voters()` replaces the set of servers that count towards quorum. Progress recorded for
    /// any server, voter or not, is never discarded. New voters start at 0.
    ///
    /// Returns true if the commit index advanced. Duplicate ids are rejected and leave the tracker
    /// untouched.
    pub fn set_voters(&self, voters: Vec<ServerId>) -> Result<bool, CommitmentError> {
        let voters = unique_voters(voters)?;
        let mut state = self.lock_state();

        for voter in voters.iter() {
            state.match_indexes.entry(voter.clone()).or_insert(Index::ZERO);
        }

        slog::info!(
            self.logger,
            "Voter set changed from {} to {} members",
            state.voters.len(),
            voters.len()
        );
        state.voters = voters;

        Ok(self.recalculate(&mut state))
    }

    pub fn commit_index(&self) -> Index {
        self.lock_state().commit_index
    }

    pub fn start_index(&self) -> Index {
        self.start_index
    }

    /// Current voters, sorted.
    pub fn voters(&self) -> Vec<ServerId> {
        let mut voters: Vec<ServerId> = self.lock_state().voters.iter().cloned().collect();
        voters.sort();
        voters
    }

    /// The highest index recorded for `server`, or None if the tracker has never heard of it.
    pub fn matched(&self, server: &ServerId) -> Option<Index> {
        self.lock_state().match_indexes.get(server).copied()
    }

    // Must be called with the state lock held, right after every mutation.
    fn recalculate(&self, state: &mut TrackerState) -> bool {
        let acked_indexes = state
            .voters
            .iter()
            .map(|voter| state.match_indexes.get(voter).copied().unwrap_or(Index::ZERO))
            .collect();

        let candidate = match quorum::quorum_match_index(acked_indexes) {
            Some(candidate) => candidate,
            None => return false,
        };

        // A shrinking quorum denominator can briefly produce a smaller candidate. Never regress.
        if candidate < self.start_index || candidate <= state.commit_index {
            return false;
        }

        let previous = mem::replace(&mut state.commit_index, candidate);
        slog::debug!(self.logger, "Commit index advanced from {:?} to {:?}", previous, candidate);
        self.notifier.notify_commit(&self.logger);

        true
    }

    fn lock_state(&self) -> MutexGuard<'_, TrackerState> {
        self.state.lock().expect("CommitmentTracker state mutex guard poison")
    }
}

impl fmt::Debug for CommitmentTracker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.lock_state();
        write!(
            f,
            "Commitment(Commit={:?}, Start={:?}, Voters={}, Tracked={})",
            state.commit_index,
            self.start_index,
            state.voters.len(),
            state.match_indexes.len()
        )
    }
}

fn unique_voters(voters: Vec<ServerId>) -> Result<HashSet<ServerId>, CommitmentError> {
    let mut unique = HashSet::with_capacity(voters.len());
    for voter in voters {
        if let Some(duplicate) = unique.replace(voter) {
            return Err(CommitmentError::DuplicateVoter(duplicate));
        }
    }

    Ok(unique)
}
