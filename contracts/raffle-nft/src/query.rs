use cosmwasm_std::{to_json_binary, Binary, Deps, Order, StdError, StdResult};
use cw_storage_plus::Bound;
use upvote_raffle_common::types::{CreatorStatsResponse, SnapshotEntry};

use crate::msg::{EntriesResponse, GallerySort};
use crate::state::{Entry, CONFIG, CREATOR_STATS, ENTRIES, NEXT_ENTRY_ID, UPVOTES};

/// Maximum number of ids accepted by a single `EntryWeights` query.
pub const MAX_WEIGHT_BATCH: usize = 500;

pub fn query_config(deps: Deps) -> StdResult<Binary> {
    let config = CONFIG.load(deps.storage)?;
    to_json_binary(&config)
}

pub fn query_entry(deps: Deps, entry_id: u64) -> StdResult<Binary> {
    let entry = ENTRIES.load(deps.storage, entry_id)?;
    to_json_binary(&entry)
}

pub fn query_weight_of(deps: Deps, entry_id: u64) -> StdResult<Binary> {
    let entry = ENTRIES.load(deps.storage, entry_id)?;
    to_json_binary(&entry.weight)
}

pub fn query_entry_weights(deps: Deps, entry_ids: Vec<u64>) -> StdResult<Binary> {
    if entry_ids.len() > MAX_WEIGHT_BATCH {
        return Err(StdError::generic_err(format!(
            "at most {} entry ids per query",
            MAX_WEIGHT_BATCH
        )));
    }

    let rows = entry_ids
        .into_iter()
        .map(|entry_id| {
            ENTRIES.load(deps.storage, entry_id).map(|entry| SnapshotEntry {
                entry_id,
                owner: entry.owner,
                weight: entry.weight,
            })
        })
        .collect::<StdResult<Vec<_>>>()?;

    to_json_binary(&rows)
}

pub fn query_has_upvoted(deps: Deps, entry_id: u64, voter: String) -> StdResult<Binary> {
    let voter = deps.api.addr_validate(&voter)?;
    to_json_binary(&UPVOTES.has(deps.storage, (entry_id, &voter)))
}

pub fn query_entries(
    deps: Deps,
    start_after: Option<u64>,
    limit: Option<u32>,
) -> StdResult<Binary> {
    let limit = limit.unwrap_or(20).min(100) as usize;
    let start = start_after.map(Bound::exclusive);

    let entries: Vec<_> = ENTRIES
        .range(deps.storage, start, None, Order::Ascending)
        .take(limit)
        .filter_map(|r| r.ok())
        .map(|(_, entry)| entry)
        .collect();

    to_json_binary(&EntriesResponse { entries })
}

/// Filtered, sorted view over all entries. Search is a case-insensitive substring
/// match on the story.
///
/// Reads every entry on each call; `limit` (max 100) only bounds the response.
pub fn query_gallery(
    deps: Deps,
    sort: GallerySort,
    search: Option<String>,
    limit: Option<u32>,
) -> StdResult<Binary> {
    let limit = limit.unwrap_or(20).min(100) as usize;
    let needle = search
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty());

    let mut entries: Vec<Entry> = ENTRIES
        .range(deps.storage, None, None, Order::Ascending)
        .filter_map(|r| r.ok())
        .map(|(_, entry)| entry)
        .filter(|entry| match &needle {
            Some(needle) => entry.story.to_lowercase().contains(needle.as_str()),
            None => true,
        })
        .collect();

    match sort {
        GallerySort::Popular => {
            entries.sort_by(|a, b| b.weight.cmp(&a.weight).then(a.id.cmp(&b.id)))
        }
        GallerySort::Recent => entries.sort_by(|a, b| b.id.cmp(&a.id)),
        // Storage order is already ascending by id
        GallerySort::Oldest => {}
    }
    entries.truncate(limit);

    to_json_binary(&EntriesResponse { entries })
}

pub fn query_creator_stats(deps: Deps, address: String) -> StdResult<Binary> {
    let addr = deps.api.addr_validate(&address)?;
    let stats = CREATOR_STATS
        .may_load(deps.storage, &addr)?
        .unwrap_or_default();

    to_json_binary(&CreatorStatsResponse {
        address,
        entries_owned: stats.entries_owned,
        total_upvotes: stats.total_upvotes,
    })
}

/// Leaderboard: most upvoted creators first, then most entries, then address.
/// Reads every creator's stats on each call; `limit` (max 100) only bounds the response.
pub fn query_top_creators(deps: Deps, limit: Option<u32>) -> StdResult<Binary> {
    let limit = limit.unwrap_or(10).min(100) as usize;

    let mut creators: Vec<CreatorStatsResponse> = CREATOR_STATS
        .range(deps.storage, None, None, Order::Ascending)
        .filter_map(|r| r.ok())
        .map(|(addr, stats)| CreatorStatsResponse {
            address: addr.to_string(),
            entries_owned: stats.entries_owned,
            total_upvotes: stats.total_upvotes,
        })
        .collect();

    creators.sort_by(|a, b| {
        b.total_upvotes
            .cmp(&a.total_upvotes)
            .then(b.entries_owned.cmp(&a.entries_owned))
            .then(a.address.cmp(&b.address))
    });
    creators.truncate(limit);

    to_json_binary(&creators)
}

pub fn query_total_entries(deps: Deps) -> StdResult<Binary> {
    let next_id = NEXT_ENTRY_ID.load(deps.storage)?;
    to_json_binary(&next_id.saturating_sub(1))
}
