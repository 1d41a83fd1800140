use cosmwasm_std::{
    entry_point, Binary, Deps, DepsMut, Env, MessageInfo, Reply, Response, StdResult,
};
use cw2::{get_contract_version, set_contract_version};

use crate::error::ContractError;
use crate::execute;
use crate::msg::{ExecuteMsg, InstantiateMsg, MigrateMsg, QueryMsg};
use crate::query;
use crate::state::{OracleConfig, CONFIG, DELIVERY_REPLY_ID, LATEST_ROUND};

const CONTRACT_NAME: &str = "crates.io:upvote-raffle-vrf-oracle";
const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

#[entry_point]
pub fn instantiate(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    let pubkey_bytes = hex::decode(&msg.quicknet_pubkey_hex).map_err(|_| {
        ContractError::InvalidHex {
            field: "quicknet_pubkey_hex".to_string(),
        }
    })?;
    if pubkey_bytes.len() != 96 {
        return Err(ContractError::InvalidPubkeyLength {
            got: pubkey_bytes.len(),
        });
    }

    if msg.period_seconds == 0 {
        return Err(ContractError::InvalidPeriod {});
    }

    let operators = msg
        .operators
        .iter()
        .map(|op| deps.api.addr_validate(op))
        .collect::<StdResult<Vec<_>>>()?;

    let config = OracleConfig {
        admin: info.sender.clone(),
        operators,
        quicknet_pubkey: pubkey_bytes,
        chain_hash: msg.chain_hash,
        genesis_time: msg.genesis_time,
        period_seconds: msg.period_seconds,
    };

    CONFIG.save(deps.storage, &config)?;
    LATEST_ROUND.save(deps.storage, &0u64)?;

    Ok(Response::new()
        .add_attribute("action", "instantiate")
        .add_attribute("contract", "vrf-oracle")
        .add_attribute("admin", info.sender.to_string()))
}

#[entry_point]
pub fn execute(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    match msg {
        ExecuteMsg::SubmitBeacon {
            round,
            signature_hex,
        } => execute::submit_beacon(deps, env, info, round, signature_hex),
        ExecuteMsg::RequestRandomness { request_id } => {
            execute::request_randomness(deps, env, info, request_id)
        }
        ExecuteMsg::Redeliver {
            consumer,
            request_id,
        } => execute::redeliver(deps, env, info, consumer, request_id),
        ExecuteMsg::UpdateOperators { add, remove } => {
            execute::update_operators(deps, env, info, add, remove)
        }
    }
}

#[entry_point]
pub fn reply(deps: DepsMut, env: Env, msg: Reply) -> Result<Response, ContractError> {
    match msg.id {
        DELIVERY_REPLY_ID => execute::handle_delivery_reply(deps, env, msg),
        id => Err(ContractError::UnknownReply { id }),
    }
}

#[entry_point]
pub fn query(deps: Deps, _env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::Config {} => query::query_config(deps),
        QueryMsg::Beacon { round } => query::query_beacon(deps, round),
        QueryMsg::LatestRound {} => query::query_latest_round(deps),
        QueryMsg::Request {
            consumer,
            request_id,
        } => query::query_request(deps, consumer, request_id),
        QueryMsg::PendingRequests { drand_round, limit } => {
            query::query_pending_requests(deps, drand_round, limit)
        }
    }
}

#[entry_point]
pub fn migrate(deps: DepsMut, _env: Env, _msg: MigrateMsg) -> Result<Response, ContractError> {
    let stored = get_contract_version(deps.storage)?;
    if stored.contract != CONTRACT_NAME {
        return Err(ContractError::Unauthorized {
            reason: "Cannot migrate from different contract type".to_string(),
        });
    }

    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    Ok(Response::new()
        .add_attribute("action", "migrate")
        .add_attribute("from_version", stored.version)
        .add_attribute("to_version", CONTRACT_VERSION))
}
