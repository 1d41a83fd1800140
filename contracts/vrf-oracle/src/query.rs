use cosmwasm_std::{to_json_binary, Binary, Deps, Order, StdResult};

use crate::state::{RandomnessRequest, BEACONS, CONFIG, LATEST_ROUND, PENDING, REQUESTS};

pub fn query_config(deps: Deps) -> StdResult<Binary> {
    let config = CONFIG.load(deps.storage)?;
    to_json_binary(&config)
}

pub fn query_beacon(deps: Deps, round: u64) -> StdResult<Binary> {
    let beacon = BEACONS.may_load(deps.storage, round)?;
    to_json_binary(&beacon)
}

pub fn query_latest_round(deps: Deps) -> StdResult<Binary> {
    let round = LATEST_ROUND.may_load(deps.storage)?.unwrap_or(0);
    to_json_binary(&round)
}

pub fn query_request(deps: Deps, consumer: String, request_id: u64) -> StdResult<Binary> {
    let consumer = deps.api.addr_validate(&consumer)?;
    let request = REQUESTS.may_load(deps.storage, (&consumer, request_id))?;
    to_json_binary(&request)
}

pub fn query_pending_requests(
    deps: Deps,
    drand_round: u64,
    limit: Option<u32>,
) -> StdResult<Binary> {
    let limit = limit.unwrap_or(30).min(100) as usize;

    let requests = PENDING
        .sub_prefix(drand_round)
        .keys(deps.storage, None, None, Order::Ascending)
        .take(limit)
        .map(|key| {
            let (consumer, request_id) = key?;
            REQUESTS.load(deps.storage, (&consumer, request_id))
        })
        .collect::<StdResult<Vec<RandomnessRequest>>>()?;

    to_json_binary(&requests)
}
