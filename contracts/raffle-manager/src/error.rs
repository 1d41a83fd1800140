use cosmwasm_std::StdError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("unauthorized: {reason}")]
    Unauthorized { reason: String },

    #[error("round {round_id} not found")]
    RoundNotFound { round_id: u64 },

    #[error("entry {entry_id} not found in registry")]
    EntryNotFound { entry_id: u64 },

    #[error("round {round_id} is still live")]
    RoundAlreadyActive { round_id: u64 },

    #[error("round {round_id} is not active")]
    RoundNotActive { round_id: u64 },

    #[error("round {round_id} cannot be closed before {end_time}")]
    TooEarly { round_id: u64, end_time: u64 },

    #[error("round {round_id} is {status}, operation not allowed")]
    InvalidState { round_id: u64, status: String },

    #[error("round {round_id} has no entries")]
    NoEntries { round_id: u64 },

    #[error("unknown randomness request {request_id}")]
    UnknownRequest { request_id: u64 },

    #[error("entry {entry_id} is already registered to round {round_id}")]
    EntryAlreadyRegistered { entry_id: u64, round_id: u64 },

    #[error("invalid round duration {duration}s (must be between 1 and {max})")]
    InvalidDuration { duration: u64, max: u64 },

    #[error("must send {denom} to fund the prize")]
    NoFundsSent { denom: String },

    #[error("prize must be paid in {expected}, got {denom}")]
    WrongDenom { expected: String, denom: String },

    #[error("round {round_id} has no prize to claim")]
    NoPrize { round_id: u64 },

    #[error("prize for round {round_id} already claimed")]
    PrizeAlreadyClaimed { round_id: u64 },
}
