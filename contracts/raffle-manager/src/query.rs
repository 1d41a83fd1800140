use cosmwasm_std::{to_json_binary, Binary, Deps, Order, StdResult, Uint128};
use cw_storage_plus::Bound;
use upvote_raffle_common::types::{CreatorStatsResponse, LiveRoundResponse};
use upvote_raffle_common::total_weight;

use crate::msg::{
    PendingDrawInfo, RegistryQueryMsg, RoundHistoryResponse, UserProfileResponse,
    UserWinsResponse,
};
use crate::state::{
    Round, CONFIG, ENTRY_ROUND, LIVE_ROUND, PENDING_DRAWS, RAFFLE_STATE, ROUNDS, ROUND_ENTRIES,
    USER_WINS, USER_WIN_COUNT,
};

pub fn query_config(deps: Deps) -> StdResult<Binary> {
    let config = CONFIG.load(deps.storage)?;
    to_json_binary(&config)
}

pub fn query_raffle_state(deps: Deps) -> StdResult<Binary> {
    let state = RAFFLE_STATE.load(deps.storage)?;
    to_json_binary(&state)
}

pub fn query_round(deps: Deps, round_id: u64) -> StdResult<Binary> {
    let round = ROUNDS.load(deps.storage, round_id)?;
    to_json_binary(&round)
}

pub fn query_live_round(deps: Deps) -> StdResult<Binary> {
    let live = match LIVE_ROUND.load(deps.storage)? {
        Some(round_id) => {
            let round = ROUNDS.load(deps.storage, round_id)?;
            Some(LiveRoundResponse {
                round_id,
                status: round.status,
                end_time: round.end_time,
            })
        }
        None => None,
    };
    to_json_binary(&live)
}

pub fn query_current_round(deps: Deps) -> StdResult<Binary> {
    let latest: Option<Round> = ROUNDS
        .range(deps.storage, None, None, Order::Descending)
        .next()
        .transpose()?
        .map(|(_, round)| round);
    to_json_binary(&latest)
}

/// Rounds newest first. `start_after` pages backwards through round ids.
pub fn query_round_history(
    deps: Deps,
    start_after: Option<u64>,
    limit: Option<u32>,
) -> StdResult<Binary> {
    let limit = limit.unwrap_or(10).min(50) as usize;
    let end = start_after.map(Bound::exclusive);

    let rounds: Vec<Round> = ROUNDS
        .range(deps.storage, None, end, Order::Descending)
        .take(limit)
        .filter_map(|r| r.ok())
        .map(|(_, round)| round)
        .collect();

    to_json_binary(&RoundHistoryResponse { rounds })
}

pub fn query_round_entries(
    deps: Deps,
    round_id: u64,
    start_after: Option<u64>,
    limit: Option<u32>,
) -> StdResult<Binary> {
    let limit = limit.unwrap_or(50).min(200) as usize;
    let start = start_after.map(Bound::exclusive);

    let entry_ids: Vec<u64> = ROUND_ENTRIES
        .prefix(round_id)
        .keys(deps.storage, start, None, Order::Ascending)
        .take(limit)
        .filter_map(|r| r.ok())
        .collect();

    to_json_binary(&entry_ids)
}

pub fn query_entry_round(deps: Deps, entry_id: u64) -> StdResult<Binary> {
    to_json_binary(&ENTRY_ROUND.may_load(deps.storage, entry_id)?)
}

pub fn query_pending_draws(
    deps: Deps,
    start_after: Option<u64>,
    limit: Option<u32>,
) -> StdResult<Binary> {
    let limit = limit.unwrap_or(10).min(50) as usize;
    let start = start_after.map(Bound::exclusive);

    let draws: Vec<PendingDrawInfo> = PENDING_DRAWS
        .range(deps.storage, start, None, Order::Ascending)
        .take(limit)
        .filter_map(|r| r.ok())
        .map(|(_, draw)| PendingDrawInfo {
            request_id: draw.request_id,
            round_id: draw.round_id,
            num_entries: draw.entries.len() as u32,
            total_weight: Uint128::from(total_weight(&draw.entries)),
            requested_at: draw.requested_at,
        })
        .collect();

    to_json_binary(&draws)
}

/// Completed rounds that produced a winner, newest first.
pub fn query_recent_winners(deps: Deps, limit: Option<u32>) -> StdResult<Binary> {
    let limit = limit.unwrap_or(10).min(100) as usize;

    let rounds: Vec<Round> = ROUNDS
        .range(deps.storage, None, None, Order::Descending)
        .filter_map(|r| r.ok())
        .map(|(_, round)| round)
        .filter(|round| round.winner.is_some())
        .take(limit)
        .collect();

    to_json_binary(&rounds)
}

pub fn query_user_wins(
    deps: Deps,
    address: String,
    start_after: Option<u64>,
    limit: Option<u32>,
) -> StdResult<Binary> {
    let addr = deps.api.addr_validate(&address)?;
    let limit = limit.unwrap_or(30).min(100) as usize;
    let start = start_after.map(Bound::exclusive);

    let total_wins = USER_WIN_COUNT.may_load(deps.storage, &addr)?.unwrap_or(0);

    let round_ids: Vec<u64> = USER_WINS
        .prefix(&addr)
        .keys(deps.storage, start, None, Order::Ascending)
        .take(limit)
        .filter_map(|r| r.ok())
        .collect();

    to_json_binary(&UserWinsResponse {
        address: addr.to_string(),
        total_wins,
        round_ids,
    })
}

/// Creator stats from the registry combined with the win count kept here.
pub fn query_user_profile(deps: Deps, address: String) -> StdResult<Binary> {
    let addr = deps.api.addr_validate(&address)?;
    let config = CONFIG.load(deps.storage)?;

    let stats: CreatorStatsResponse = deps.querier.query_wasm_smart(
        config.registry.to_string(),
        &RegistryQueryMsg::CreatorStats {
            address: addr.to_string(),
        },
    )?;
    let rounds_won = USER_WIN_COUNT.may_load(deps.storage, &addr)?.unwrap_or(0);

    to_json_binary(&UserProfileResponse {
        address: addr.to_string(),
        entries_owned: stats.entries_owned,
        total_upvotes: stats.total_upvotes,
        rounds_won,
    })
}
