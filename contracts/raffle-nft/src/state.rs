use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, Timestamp};
use cw_storage_plus::{Item, Map};

pub const CONFIG: Item<RegistryConfig> = Item::new("config");
pub const NEXT_ENTRY_ID: Item<u64> = Item::new("next_entry_id");
pub const ENTRIES: Map<u64, Entry> = Map::new("entries");
/// (entry_id, voter) -> (). Presence means the voter has upvoted the entry.
pub const UPVOTES: Map<(u64, &Addr), ()> = Map::new("upvotes");
/// Running per-creator totals, updated on mint and upvote.
pub const CREATOR_STATS: Map<&Addr, CreatorStats> = Map::new("creator_stats");

/// Upper bound on the story text stored with an entry, in bytes.
pub const MAX_STORY_LEN: usize = 1024;
/// Upper bound on the metadata pointer, in bytes.
pub const MAX_TOKEN_URI_LEN: usize = 512;

#[cw_serde]
pub struct RegistryConfig {
    pub admin: Addr,
    /// Raffle manager notified of every mint while one of its rounds is active.
    pub raffle_manager: Option<Addr>,
}

#[cw_serde]
pub struct Entry {
    pub id: u64,
    pub owner: Addr,
    pub story: String,
    /// Opaque pointer into the metadata store (e.g. an IPFS gateway URL)
    pub token_uri: String,
    /// Number of distinct upvoters
    pub weight: u64,
    pub created_at: Timestamp,
}

#[cw_serde]
#[derive(Default)]
pub struct CreatorStats {
    pub entries_owned: u64,
    pub total_upvotes: u64,
}
