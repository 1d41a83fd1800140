use cosmwasm_std::{
    from_json, to_json_binary, Addr, Binary, DepsMut, Env, Event, MessageInfo, Order, Reply,
    Response, StdResult, SubMsg, SubMsgResult, Timestamp, WasmMsg,
};

use crate::error::ContractError;
use crate::msg::ConsumerExecuteMsg;
use crate::state::{
    DeliveryPayload, OracleConfig, RandomnessRequest, StoredBeacon, BEACONS, CONFIG,
    DELIVERY_REPLY_ID, LATEST_ROUND, PENDING, REQUESTS,
};
use crate::verify::verify_quicknet_beacon;

/// First drand round published strictly after `now`.
///
/// Round `r` is published at `genesis + (r - 1) * period`, so the round current
/// at `now` is `(now - genesis) / period + 1` and the next one follows it.
pub fn next_drand_round(config: &OracleConfig, now: Timestamp) -> u64 {
    let now = now.seconds();
    if now < config.genesis_time {
        return 1;
    }
    (now - config.genesis_time) / config.period_seconds + 2
}

/// Build the callback for `request` and mark it as delivered.
///
/// A consumer error comes back through the reply entry point instead of
/// reverting the oracle transaction.
fn delivery_submsg(
    env: &Env,
    request: &mut RandomnessRequest,
    randomness: &[u8],
) -> Result<(SubMsg, Event), ContractError> {
    request.delivered_at = Some(env.block.time);
    request.deliveries += 1;
    request.last_error = None;

    let callback = WasmMsg::Execute {
        contract_addr: request.consumer.to_string(),
        msg: to_json_binary(&ConsumerExecuteMsg::ReceiveRandomness {
            request_id: request.request_id,
            randomness: Binary::from(randomness.to_vec()),
        })?,
        funds: vec![],
    };
    let payload = to_json_binary(&DeliveryPayload {
        consumer: request.consumer.clone(),
        request_id: request.request_id,
    })?;

    let event = Event::new("raffle_randomness_delivered")
        .add_attribute("consumer", request.consumer.to_string())
        .add_attribute("request_id", request.request_id.to_string())
        .add_attribute("drand_round", request.drand_round.to_string())
        .add_attribute("deliveries", request.deliveries.to_string());

    Ok((
        SubMsg::reply_on_error(callback, DELIVERY_REPLY_ID).with_payload(payload),
        event,
    ))
}

/// Submit a drand beacon. Only operators can call this.
/// Every request bound to `round` is answered in the same transaction.
pub fn submit_beacon(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    round: u64,
    signature_hex: String,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;

    if !config.operators.contains(&info.sender) {
        return Err(ContractError::Unauthorized {
            reason: "only operators can submit beacons".to_string(),
        });
    }

    if BEACONS.has(deps.storage, round) {
        return Err(ContractError::BeaconAlreadyExists { round });
    }

    let signature = hex::decode(&signature_hex).map_err(|_| ContractError::InvalidHex {
        field: "signature_hex".to_string(),
    })?;

    let randomness = verify_quicknet_beacon(&config.quicknet_pubkey, round, &signature)?;

    let beacon = StoredBeacon {
        round,
        randomness: randomness.to_vec(),
        signature,
        submitted_at: env.block.time,
        submitted_by: info.sender.clone(),
    };
    BEACONS.save(deps.storage, round, &beacon)?;

    let current_latest = LATEST_ROUND.may_load(deps.storage)?.unwrap_or(0);
    if round > current_latest {
        LATEST_ROUND.save(deps.storage, &round)?;
    }

    let waiting: Vec<(Addr, u64)> = PENDING
        .sub_prefix(round)
        .keys(deps.storage, None, None, Order::Ascending)
        .collect::<StdResult<Vec<_>>>()?;

    let mut response = Response::new()
        .add_attribute("action", "submit_beacon")
        .add_attribute("round", round.to_string())
        .add_attribute("submitted_by", info.sender.to_string())
        .add_attribute("delivered", waiting.len().to_string())
        .add_event(
            Event::new("raffle_beacon_submitted")
                .add_attribute("round", round.to_string())
                .add_attribute("randomness", hex::encode(randomness))
                .add_attribute("submitted_by", info.sender.to_string())
                .add_attribute("timestamp", env.block.time.seconds().to_string()),
        );

    for (consumer, request_id) in waiting {
        let mut request = REQUESTS.load(deps.storage, (&consumer, request_id))?;
        let (submsg, event) = delivery_submsg(&env, &mut request, &randomness)?;
        REQUESTS.save(deps.storage, (&consumer, request_id), &request)?;
        PENDING.remove(deps.storage, (round, &consumer, request_id));
        response = response.add_submessage(submsg).add_event(event);
    }

    Ok(response)
}

/// Register a randomness request from the calling contract.
///
/// The request is bound to the first drand round after the current block time,
/// so its randomness cannot be known when the request is made.
pub fn request_randomness(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    request_id: u64,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    let consumer = info.sender;

    if REQUESTS.has(deps.storage, (&consumer, request_id)) {
        return Err(ContractError::RequestAlreadyExists {
            consumer: consumer.to_string(),
            request_id,
        });
    }

    let drand_round = next_drand_round(&config, env.block.time);
    let mut request = RandomnessRequest {
        consumer: consumer.clone(),
        request_id,
        drand_round,
        requested_at: env.block.time,
        delivered_at: None,
        deliveries: 0,
        last_error: None,
    };

    let mut response = Response::new()
        .add_attribute("action", "request_randomness")
        .add_attribute("consumer", consumer.to_string())
        .add_attribute("request_id", request_id.to_string())
        .add_attribute("drand_round", drand_round.to_string())
        .add_event(
            Event::new("raffle_randomness_request_bound")
                .add_attribute("consumer", consumer.to_string())
                .add_attribute("request_id", request_id.to_string())
                .add_attribute("drand_round", drand_round.to_string())
                .add_attribute("timestamp", env.block.time.seconds().to_string()),
        );

    match BEACONS.may_load(deps.storage, drand_round)? {
        Some(beacon) => {
            let (submsg, event) = delivery_submsg(&env, &mut request, &beacon.randomness)?;
            response = response.add_submessage(submsg).add_event(event);
        }
        None => PENDING.save(deps.storage, (drand_round, &consumer, request_id), &())?,
    }

    REQUESTS.save(deps.storage, (&consumer, request_id), &request)?;

    Ok(response)
}

/// Send an answered request's randomness to its consumer again.
pub fn redeliver(
    deps: DepsMut,
    env: Env,
    _info: MessageInfo,
    consumer: String,
    request_id: u64,
) -> Result<Response, ContractError> {
    let consumer = deps.api.addr_validate(&consumer)?;
    let mut request = REQUESTS
        .may_load(deps.storage, (&consumer, request_id))?
        .ok_or_else(|| ContractError::RequestNotFound {
            consumer: consumer.to_string(),
            request_id,
        })?;

    let beacon = BEACONS
        .may_load(deps.storage, request.drand_round)?
        .ok_or(ContractError::BeaconNotFound {
            round: request.drand_round,
        })?;

    let (submsg, event) = delivery_submsg(&env, &mut request, &beacon.randomness)?;
    REQUESTS.save(deps.storage, (&consumer, request_id), &request)?;

    Ok(Response::new()
        .add_submessage(submsg)
        .add_attribute("action", "redeliver")
        .add_attribute("consumer", consumer.to_string())
        .add_attribute("request_id", request_id.to_string())
        .add_event(event))
}

/// A consumer rejected a delivery. Record the error and keep the oracle
/// transaction alive; the request can be redelivered later.
pub fn handle_delivery_reply(
    deps: DepsMut,
    env: Env,
    msg: Reply,
) -> Result<Response, ContractError> {
    let error = match msg.result {
        SubMsgResult::Err(error) => error,
        SubMsgResult::Ok(_) => return Ok(Response::new()),
    };
    let payload: DeliveryPayload = from_json(&msg.payload)?;

    let key = (&payload.consumer, payload.request_id);
    let mut request = REQUESTS
        .may_load(deps.storage, key)?
        .ok_or_else(|| ContractError::RequestNotFound {
            consumer: payload.consumer.to_string(),
            request_id: payload.request_id,
        })?;
    request.delivered_at = None;
    request.last_error = Some(error.clone());
    REQUESTS.save(deps.storage, key, &request)?;

    Ok(Response::new()
        .add_attribute("action", "delivery_failed")
        .add_attribute("consumer", payload.consumer.to_string())
        .add_attribute("request_id", payload.request_id.to_string())
        .add_event(
            Event::new("raffle_randomness_delivery_failed")
                .add_attribute("consumer", payload.consumer.to_string())
                .add_attribute("request_id", payload.request_id.to_string())
                .add_attribute("error", error)
                .add_attribute("timestamp", env.block.time.seconds().to_string()),
        ))
}

/// Update the operator list. Admin only.
pub fn update_operators(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    add: Vec<String>,
    remove: Vec<String>,
) -> Result<Response, ContractError> {
    let mut config = CONFIG.load(deps.storage)?;

    if info.sender != config.admin {
        return Err(ContractError::Unauthorized {
            reason: "only admin can update operators".to_string(),
        });
    }

    for addr_str in &remove {
        let addr = deps.api.addr_validate(addr_str)?;
        config.operators.retain(|a| a != &addr);
    }

    for addr_str in &add {
        let addr = deps.api.addr_validate(addr_str)?;
        if !config.operators.contains(&addr) {
            config.operators.push(addr);
        }
    }

    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new()
        .add_attribute("action", "update_operators")
        .add_attribute("added", add.join(","))
        .add_attribute("removed", remove.join(",")))
}
