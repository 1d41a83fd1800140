use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Binary, Timestamp, Uint128};
use upvote_raffle_common::types::LiveRoundResponse;

use crate::state::{ManagerConfig, RaffleState, Round};

#[cw_serde]
pub struct InstantiateMsg {
    pub registry: String,
    pub oracle: String,
    pub prize_denom: String,
    pub max_round_duration_seconds: u64,
}

#[cw_serde]
pub enum ExecuteMsg {
    /// Open a new round lasting `duration_seconds`. Admin only.
    /// Any attached `prize_denom` funds go into the round's prize.
    OpenRound { duration_seconds: u64 },
    /// Register an entry with an Active round. Registry contract or entry owner.
    RegisterEntry { round_id: u64, entry_id: u64 },
    /// Close an Active round whose end time has passed. Anyone can call.
    CloseRound { round_id: u64 },
    /// Randomness callback. Oracle only.
    ReceiveRandomness { request_id: u64, randomness: Binary },
    /// Add `prize_denom` funds to a live round's prize.
    FundRound { round_id: u64 },
    /// Withdraw the prize of a completed round. Winner only.
    ClaimPrize { round_id: u64 },
    /// Update configuration. Admin only.
    UpdateConfig {
        admin: Option<String>,
        registry: Option<String>,
        oracle: Option<String>,
        max_round_duration_seconds: Option<u64>,
    },
}

/// Execute message understood by the randomness oracle.
#[cw_serde]
pub enum OracleExecuteMsg {
    RequestRandomness { request_id: u64 },
}

/// Query messages understood by the entry registry.
#[cw_serde]
pub enum RegistryQueryMsg {
    EntryWeights { entry_ids: Vec<u64> },
    CreatorStats { address: String },
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(ManagerConfig)]
    Config {},
    #[returns(RaffleState)]
    RaffleState {},
    #[returns(Round)]
    Round { round_id: u64 },
    /// The round holding the live slot, if any.
    #[returns(Option<LiveRoundResponse>)]
    LiveRound {},
    /// Full record of the most recent round.
    #[returns(Option<Round>)]
    CurrentRound {},
    #[returns(RoundHistoryResponse)]
    RoundHistory {
        start_after: Option<u64>,
        limit: Option<u32>,
    },
    #[returns(Vec<u64>)]
    RoundEntries {
        round_id: u64,
        start_after: Option<u64>,
        limit: Option<u32>,
    },
    #[returns(Option<u64>)]
    EntryRound { entry_id: u64 },
    /// Draws waiting on the oracle.
    #[returns(Vec<PendingDrawInfo>)]
    PendingDraws {
        start_after: Option<u64>,
        limit: Option<u32>,
    },
    /// Completed rounds with a winner, newest first.
    #[returns(Vec<Round>)]
    RecentWinners { limit: Option<u32> },
    #[returns(UserWinsResponse)]
    UserWins {
        address: String,
        start_after: Option<u64>,
        limit: Option<u32>,
    },
    #[returns(UserProfileResponse)]
    UserProfile { address: String },
}

#[cw_serde]
pub struct MigrateMsg {}

#[cw_serde]
pub struct RoundHistoryResponse {
    pub rounds: Vec<Round>,
}

#[cw_serde]
pub struct PendingDrawInfo {
    pub request_id: u64,
    pub round_id: u64,
    pub num_entries: u32,
    pub total_weight: Uint128,
    pub requested_at: Timestamp,
}

#[cw_serde]
pub struct UserWinsResponse {
    pub address: String,
    pub total_wins: u32,
    pub round_ids: Vec<u64>,
}

#[cw_serde]
pub struct UserProfileResponse {
    pub address: String,
    pub entries_owned: u64,
    pub total_upvotes: u64,
    pub rounds_won: u32,
}
