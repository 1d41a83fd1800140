use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::Binary;

use crate::state::{OracleConfig, RandomnessRequest, StoredBeacon};

#[cw_serde]
pub struct InstantiateMsg {
    pub operators: Vec<String>,
    /// Hex-encoded quicknet public key (96 bytes = 192 hex chars)
    pub quicknet_pubkey_hex: String,
    pub chain_hash: String,
    pub genesis_time: u64,
    pub period_seconds: u64,
}

#[cw_serde]
pub enum ExecuteMsg {
    /// Submit a drand beacon for verification and storage. Operators only.
    /// Delivers randomness to every request waiting on this round.
    SubmitBeacon {
        round: u64,
        /// Hex-encoded BLS signature (48 bytes = 96 hex chars)
        signature_hex: String,
    },
    /// Request randomness. The sender is the consumer and receives
    /// `ConsumerExecuteMsg::ReceiveRandomness` once the bound beacon is in.
    RequestRandomness { request_id: u64 },
    /// Deliver an answered request again. Anyone can call.
    Redeliver { consumer: String, request_id: u64 },
    /// Update operator list. Admin only.
    UpdateOperators {
        add: Vec<String>,
        remove: Vec<String>,
    },
}

/// Callback sent to consumers.
#[cw_serde]
pub enum ConsumerExecuteMsg {
    ReceiveRandomness { request_id: u64, randomness: Binary },
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(OracleConfig)]
    Config {},

    #[returns(Option<StoredBeacon>)]
    Beacon { round: u64 },

    #[returns(u64)]
    LatestRound {},

    #[returns(Option<RandomnessRequest>)]
    Request { consumer: String, request_id: u64 },

    /// Requests still waiting on the beacon for `drand_round`.
    #[returns(Vec<RandomnessRequest>)]
    PendingRequests { drand_round: u64, limit: Option<u32> },
}

#[cw_serde]
pub struct MigrateMsg {}
