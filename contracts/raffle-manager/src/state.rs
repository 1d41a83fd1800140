use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, Binary, Timestamp, Uint128};
use cw_storage_plus::{Item, Map};
use upvote_raffle_common::types::{RoundStatus, SnapshotEntry};

pub const CONFIG: Item<ManagerConfig> = Item::new("config");
pub const RAFFLE_STATE: Item<RaffleState> = Item::new("raffle_state");
/// The single live-round slot. `Some(id)` while round `id` is Active or Drawing.
/// Opening requires `None`; finalizing requires `Some(round_id)`.
pub const LIVE_ROUND: Item<Option<u64>> = Item::new("live_round");
pub const ROUNDS: Map<u64, Round> = Map::new("rounds");
/// (round_id, entry_id) -> (). Iterates in entry-id order within a round.
pub const ROUND_ENTRIES: Map<(u64, u64), ()> = Map::new("round_entries");
/// entry_id -> round_id. An entry belongs to at most one round.
pub const ENTRY_ROUND: Map<u64, u64> = Map::new("entry_round");
/// request_id -> draw waiting on the oracle. Removed once fulfilled.
pub const PENDING_DRAWS: Map<u64, PendingDraw> = Map::new("pending_draws");
/// request_id -> round_id for every request already fulfilled.
pub const FULFILLED_REQUESTS: Map<u64, u64> = Map::new("fulfilled_requests");

/// Per-user win tracking
pub const USER_WINS: Map<(&Addr, u64), ()> = Map::new("user_wins");
pub const USER_WIN_COUNT: Map<&Addr, u32> = Map::new("user_win_count");

#[cw_serde]
pub struct ManagerConfig {
    pub admin: Addr,
    /// Entry registry (raffle-nft contract)
    pub registry: Addr,
    /// Randomness oracle
    pub oracle: Addr,
    /// Native denom prizes are paid in
    pub prize_denom: String,
    pub max_round_duration_seconds: u64,
}

#[cw_serde]
pub struct RaffleState {
    pub next_round_id: u64,
    pub next_request_id: u64,
    pub total_rounds_completed: u64,
    /// Prize of rounds that completed without a winner, paid into the next round.
    pub carryover_prize: Uint128,
}

#[cw_serde]
pub struct Round {
    pub id: u64,
    pub start_time: Timestamp,
    pub end_time: Timestamp,
    pub status: RoundStatus,
    pub total_entries: u64,
    pub winner: Option<Addr>,
    pub winning_entry: Option<u64>,
    pub randomness_request_id: Option<u64>,
    /// Oracle randomness the draw was taken with
    pub randomness: Option<Binary>,
    /// Sum of snapshot weights at close
    pub total_weight: Option<Uint128>,
    /// Hex sha256 of the snapshot
    pub snapshot_digest: Option<String>,
    pub closed_at: Option<Timestamp>,
    pub completed_at: Option<Timestamp>,
    pub prize: Uint128,
    pub prize_claimed: bool,
}

/// A draw waiting for randomness. The snapshot is written once at close and
/// only read back by the fulfillment of this request.
#[cw_serde]
pub struct PendingDraw {
    pub request_id: u64,
    pub round_id: u64,
    pub entries: Vec<SnapshotEntry>,
    pub requested_at: Timestamp,
}
