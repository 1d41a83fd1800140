use cosmwasm_schema::{cw_serde, QueryResponses};
use upvote_raffle_common::types::{CreatorStatsResponse, SnapshotEntry};

use crate::state::{Entry, RegistryConfig};

#[cw_serde]
pub struct InstantiateMsg {
    /// Raffle manager to register new entries with. Can be set later via UpdateConfig.
    pub raffle_manager: Option<String>,
}

#[cw_serde]
pub enum ExecuteMsg {
    /// Mint a new entry. `owner` defaults to the sender; only the admin may mint for
    /// someone else.
    Mint {
        story: String,
        token_uri: String,
        owner: Option<String>,
    },
    /// Upvote an entry. One vote per address per entry, never on your own entry.
    Upvote { entry_id: u64 },
    /// Update configuration. Admin only.
    UpdateConfig {
        admin: Option<String>,
        raffle_manager: Option<String>,
    },
}

#[cw_serde]
pub enum GallerySort {
    /// Most upvoted first, ties broken by lowest id
    Popular,
    /// Newest first
    Recent,
    /// Oldest first
    Oldest,
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(RegistryConfig)]
    Config {},
    #[returns(Entry)]
    Entry { entry_id: u64 },
    #[returns(u64)]
    WeightOf { entry_id: u64 },
    /// Weight rows for the given ids, in the order requested.
    #[returns(Vec<SnapshotEntry>)]
    EntryWeights { entry_ids: Vec<u64> },
    #[returns(bool)]
    HasUpvoted { entry_id: u64, voter: String },
    #[returns(EntriesResponse)]
    Entries {
        start_after: Option<u64>,
        limit: Option<u32>,
    },
    #[returns(EntriesResponse)]
    Gallery {
        sort: GallerySort,
        search: Option<String>,
        limit: Option<u32>,
    },
    #[returns(CreatorStatsResponse)]
    CreatorStats { address: String },
    #[returns(Vec<CreatorStatsResponse>)]
    TopCreators { limit: Option<u32> },
    #[returns(u64)]
    TotalEntries {},
}

#[cw_serde]
pub struct MigrateMsg {}

#[cw_serde]
pub struct EntriesResponse {
    pub entries: Vec<Entry>,
}

/// Execute message understood by the raffle manager.
#[cw_serde]
pub enum ManagerExecuteMsg {
    RegisterEntry { round_id: u64, entry_id: u64 },
}

/// Query message understood by the raffle manager.
#[cw_serde]
pub enum ManagerQueryMsg {
    LiveRound {},
}
