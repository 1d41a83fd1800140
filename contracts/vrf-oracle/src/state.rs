use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, Timestamp};
use cw_storage_plus::{Item, Map};

pub const CONFIG: Item<OracleConfig> = Item::new("config");
pub const BEACONS: Map<u64, StoredBeacon> = Map::new("beacons");
pub const LATEST_ROUND: Item<u64> = Item::new("latest_round");
/// (consumer, request_id) -> request
pub const REQUESTS: Map<(&Addr, u64), RandomnessRequest> = Map::new("requests");
/// (drand_round, consumer, request_id) -> (). Requests still waiting on their beacon.
pub const PENDING: Map<(u64, &Addr, u64), ()> = Map::new("pending");

/// Reply id for randomness deliveries. Only failures come back.
pub const DELIVERY_REPLY_ID: u64 = 1;

#[cw_serde]
pub struct OracleConfig {
    pub admin: Addr,
    pub operators: Vec<Addr>,
    /// Quicknet public key, 96 bytes (G2 point)
    pub quicknet_pubkey: Vec<u8>,
    /// Chain hash identifying the drand network
    pub chain_hash: String,
    /// Genesis time of the drand network (unix seconds)
    pub genesis_time: u64,
    /// Period between rounds in seconds (3 for quicknet)
    pub period_seconds: u64,
}

#[cw_serde]
pub struct StoredBeacon {
    pub round: u64,
    /// sha256(signature), 32 bytes
    pub randomness: Vec<u8>,
    /// BLS signature on G1, 48 bytes
    pub signature: Vec<u8>,
    pub submitted_at: Timestamp,
    pub submitted_by: Addr,
}

#[cw_serde]
pub struct RandomnessRequest {
    pub consumer: Addr,
    /// Consumer-chosen id, echoed back on delivery
    pub request_id: u64,
    /// Drand round whose beacon answers this request
    pub drand_round: u64,
    pub requested_at: Timestamp,
    /// Set when a delivery is dispatched, cleared again if the consumer rejects it
    pub delivered_at: Option<Timestamp>,
    pub deliveries: u32,
    pub last_error: Option<String>,
}

/// Identifies the request a failed delivery belonged to.
#[cw_serde]
pub struct DeliveryPayload {
    pub consumer: Addr,
    pub request_id: u64,
}
