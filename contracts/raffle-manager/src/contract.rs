use cosmwasm_std::{
    entry_point, Binary, Deps, DepsMut, Env, MessageInfo, Response, StdResult, Uint128,
};
use cw2::{get_contract_version, set_contract_version};

use crate::draw;
use crate::error::ContractError;
use crate::msg::{ExecuteMsg, InstantiateMsg, MigrateMsg, QueryMsg};
use crate::query;
use crate::rounds;
use crate::state::{ManagerConfig, RaffleState, CONFIG, LIVE_ROUND, RAFFLE_STATE};

const CONTRACT_NAME: &str = "crates.io:upvote-raffle-manager";
const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

#[entry_point]
pub fn instantiate(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    if msg.max_round_duration_seconds == 0 {
        return Err(ContractError::InvalidDuration {
            duration: 0,
            max: msg.max_round_duration_seconds,
        });
    }

    let config = ManagerConfig {
        admin: info.sender.clone(),
        registry: deps.api.addr_validate(&msg.registry)?,
        oracle: deps.api.addr_validate(&msg.oracle)?,
        prize_denom: msg.prize_denom,
        max_round_duration_seconds: msg.max_round_duration_seconds,
    };
    CONFIG.save(deps.storage, &config)?;

    RAFFLE_STATE.save(
        deps.storage,
        &RaffleState {
            next_round_id: 1,
            next_request_id: 1,
            total_rounds_completed: 0,
            carryover_prize: Uint128::zero(),
        },
    )?;
    LIVE_ROUND.save(deps.storage, &None)?;

    Ok(Response::new()
        .add_attribute("action", "instantiate")
        .add_attribute("contract", "raffle-manager")
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
        ExecuteMsg::OpenRound { duration_seconds } => {
            rounds::open_round(deps, env, info, duration_seconds)
        }
        ExecuteMsg::RegisterEntry { round_id, entry_id } => {
            rounds::register_entry(deps, env, info, round_id, entry_id)
        }
        ExecuteMsg::CloseRound { round_id } => rounds::close_round(deps, env, info, round_id),
        ExecuteMsg::ReceiveRandomness {
            request_id,
            randomness,
        } => draw::receive_randomness(deps, env, info, request_id, randomness),
        ExecuteMsg::FundRound { round_id } => rounds::fund_round(deps, env, info, round_id),
        ExecuteMsg::ClaimPrize { round_id } => rounds::claim_prize(deps, env, info, round_id),
        ExecuteMsg::UpdateConfig {
            admin,
            registry,
            oracle,
            max_round_duration_seconds,
        } => rounds::update_config(
            deps,
            env,
            info,
            admin,
            registry,
            oracle,
            max_round_duration_seconds,
        ),
    }
}

#[entry_point]
pub fn query(deps: Deps, _env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::Config {} => query::query_config(deps),
        QueryMsg::RaffleState {} => query::query_raffle_state(deps),
        QueryMsg::Round { round_id } => query::query_round(deps, round_id),
        QueryMsg::LiveRound {} => query::query_live_round(deps),
        QueryMsg::CurrentRound {} => query::query_current_round(deps),
        QueryMsg::RoundHistory { start_after, limit } => {
            query::query_round_history(deps, start_after, limit)
        }
        QueryMsg::RoundEntries {
            round_id,
            start_after,
            limit,
        } => query::query_round_entries(deps, round_id, start_after, limit),
        QueryMsg::EntryRound { entry_id } => query::query_entry_round(deps, entry_id),
        QueryMsg::PendingDraws { start_after, limit } => {
            query::query_pending_draws(deps, start_after, limit)
        }
        QueryMsg::RecentWinners { limit } => query::query_recent_winners(deps, limit),
        QueryMsg::UserWins {
            address,
            start_after,
            limit,
        } => query::query_user_wins(deps, address, start_after, limit),
        QueryMsg::UserProfile { address } => query::query_user_profile(deps, address),
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
