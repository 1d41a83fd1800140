use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, Timestamp};

/// Lifecycle of a raffle round. Transitions only move forward:
/// Active -> Drawing -> Completed.
#[cw_serde]
pub enum RoundStatus {
    Active,
    Drawing,
    Completed,
}

impl RoundStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RoundStatus::Active => "active",
            RoundStatus::Drawing => "drawing",
            RoundStatus::Completed => "completed",
        }
    }

    /// A live round blocks opening another one.
    pub fn is_live(&self) -> bool {
        matches!(self, RoundStatus::Active | RoundStatus::Drawing)
    }
}

/// A single row of the weight snapshot captured when a round closes.
/// Also the row type the entry registry answers weight queries with.
#[cw_serde]
pub struct SnapshotEntry {
    pub entry_id: u64,
    pub owner: Addr,
    pub weight: u64,
}

/// The round currently holding the live slot, as reported by the raffle manager.
#[cw_serde]
pub struct LiveRoundResponse {
    pub round_id: u64,
    pub status: RoundStatus,
    pub end_time: Timestamp,
}

/// Per-creator aggregate kept by the entry registry.
#[cw_serde]
pub struct CreatorStatsResponse {
    pub address: String,
    pub entries_owned: u64,
    pub total_upvotes: u64,
}
