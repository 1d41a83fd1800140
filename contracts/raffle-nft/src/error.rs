use cosmwasm_std::StdError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("unauthorized: {reason}")]
    Unauthorized { reason: String },

    #[error("entry {entry_id} not found")]
    EntryNotFound { entry_id: u64 },

    #[error("invalid owner: {owner:?}")]
    InvalidOwner { owner: String },

    #[error("cannot upvote your own entry {entry_id}")]
    SelfVote { entry_id: u64 },

    #[error("{voter} already upvoted entry {entry_id}")]
    DuplicateVote { entry_id: u64, voter: String },

    #[error("invalid token uri: {reason}")]
    InvalidTokenUri { reason: String },

    #[error("story is {len} bytes, maximum is {max}")]
    StoryTooLong { len: usize, max: usize },
}
