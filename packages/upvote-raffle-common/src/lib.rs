pub mod selection;
pub mod types;

pub use selection::{
    randomness_to_u128, select_winner, snapshot_digest, snapshot_digest_hex, total_weight, Selection,
};
pub use types::{CreatorStatsResponse, LiveRoundResponse, RoundStatus, SnapshotEntry};
