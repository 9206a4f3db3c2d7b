use crate::commitment::ServerId;

#[derive(Debug, Eq, PartialEq, thiserror::Error)]
pub enum CommitmentError {
    #[error("voter {0} appears more than once in the voter set")]
    DuplicateVoter(ServerId),
}
