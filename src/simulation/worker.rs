use crate::commitment::{CommitmentTracker, Index, ServerId};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::cmp;
use std::sync::Arc;
use tokio::time::Duration;

const MAX_ENTRIES_PER_REPLY: u64 = 4;

/// Stands in for the task that sends AppendEntries to one follower. Instead of talking to a peer,
/// it makes up acknowledgements at a random pace until the follower holds `last_index`, and
/// feeds them to the tracker. Some replies are replayed late to mimic network reordering.
pub(super) async fn replicate_to_follower(
    logger: slog::Logger,
    tracker: Arc<CommitmentTracker>,
    follower: ServerId,
    last_index: Index,
    tick: Duration,
) {
    let mut rng = StdRng::from_entropy();
    let mut acked = Index::ZERO;

    while acked < last_index {
        let jitter: u32 = rng.gen_range(1..=3);
        tokio::time::sleep(tick * jitter).await;

        if !acked.is_zero() && rng.gen_bool(0.2) {
            let stale = acked.saturating_minus(rng.gen_range(1..=acked.as_u64()));
            slog::trace!(logger, "Replaying late reply for {:?}", stale);
            tracker.match_index(&follower, stale);
            continue;
        }

        let replicated = rng.gen_range(1..=MAX_ENTRIES_PER_REPLY);
        acked = cmp::min(acked.plus(replicated), last_index);
        if tracker.match_index(&follower, acked) {
            slog::debug!(logger, "Ack for {:?} advanced the commit index", acked);
        }
    }

    slog::debug!(logger, "Follower caught up to {:?}", last_index);
}
