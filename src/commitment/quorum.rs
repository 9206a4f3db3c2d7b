use crate::commitment::Index;

/// `majority()` returns how many of `num_voters` make a strict majority.
pub fn majority(num_voters: usize) -> usize {
    num_voters / 2 + 1
}

/// `quorum_match_index()` returns the highest index that a strict majority of voters have
/// acknowledged, given one acknowledged index per voter. Returns None when there are no voters,
/// since no quorum can exist.
pub fn quorum_match_index(mut acked_indexes: Vec<Index>) -> Option<Index> {
    if acked_indexes.is_empty() {
        return None;
    }

    // Descending, so the value at position `majority - 1` is held by at least `majority` voters.
    acked_indexes.sort_unstable_by(|a, b| b.cmp(a));
    let quorum_idx = majority(acked_indexes.len()) - 1;

    Some(acked_indexes[quorum_idx])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn indexes(values: &[u64]) -> Vec<Index> {
        values.iter().copied().map(Index::new).collect()
    }

    #[test]
    fn majority_of_cluster_sizes() {
        assert_eq!(majority(1), 1);
        assert_eq!(majority(2), 2);
        assert_eq!(majority(3), 2);
        assert_eq!(majority(4), 3);
        assert_eq!(majority(5), 3);
        assert_eq!(majority(7), 4);
    }

    #[test]
    fn no_voters_has_no_quorum() {
        assert_eq!(quorum_match_index(vec![]), None);
    }

    #[test]
    fn single_voter_is_its_own_quorum() {
        assert_eq!(quorum_match_index(indexes(&[10])), Some(Index::new(10)));
    }

    #[test]
    fn odd_cluster_takes_median() {
        assert_eq!(quorum_match_index(indexes(&[10, 20, 30])), Some(Index::new(20)));
        assert_eq!(quorum_match_index(indexes(&[30, 20, 0, 0, 0])), Some(Index::new(0)));
        assert_eq!(quorum_match_index(indexes(&[30, 20, 10, 0, 0])), Some(Index::new(10)));
        assert_eq!(quorum_match_index(indexes(&[30, 20, 10, 15, 0])), Some(Index::new(15)));
    }

    #[test]
    fn even_cluster_needs_more_than_half() {
        assert_eq!(quorum_match_index(indexes(&[30, 20])), Some(Index::new(20)));
        assert_eq!(quorum_match_index(indexes(&[30, 25, 10, 0])), Some(Index::new(10)));
        assert_eq!(quorum_match_index(indexes(&[30, 25, 10, 23])), Some(Index::new(23)));
    }

    #[test]
    fn input_order_does_not_matter() {
        assert_eq!(quorum_match_index(indexes(&[40, 0, 30])), Some(Index::new(30)));
        assert_eq!(quorum_match_index(indexes(&[0, 30, 40])), Some(Index::new(30)));
    }
}
