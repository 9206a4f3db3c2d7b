use std::fmt;

/// Index is the position of an entry in the replicated log.
///
/// No entry lives at index 0. As a commit index, 0 means "nothing committed yet", which is not
/// the same thing as "the entry at index 0 is committed".
#[derive(Copy, Clone, Default, PartialOrd, PartialEq, Ord, Eq, Hash)]
pub struct Index(u64);

impl Index {
    pub const ZERO: Index = Index(0);

    pub fn new(index: u64) -> Self {
        Index(index)
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub fn plus(&self, delta: u64) -> Index {
        Index(self.0 + delta)
    }

    pub fn saturating_minus(&self, delta: u64) -> Index {
        Index(self.0.saturating_sub(delta))
    }
}

impl From<u64> for Index {
    fn from(index: u64) -> Self {
        Index(index)
    }
}

impl fmt::Debug for Index {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for Index {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
