use cosmwasm_std::{entry_point, Binary, Deps, DepsMut, Env, MessageInfo, Response, StdResult};
use cw2::{get_contract_version, set_contract_version};

use crate::error::ContractError;
use crate::execute;
use crate::msg::{ExecuteMsg, InstantiateMsg, MigrateMsg, QueryMsg};
use crate::query;
use crate::state::{RegistryConfig, CONFIG, NEXT_ENTRY_ID};

const CONTRACT_NAME: &str = "crates.io:upvote-raffle-nft";
const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

#[entry_point]
pub fn instantiate(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    let raffle_manager = msg
        .raffle_manager
        .map(|m| deps.api.addr_validate(&m))
        .transpose()?;

    let config = RegistryConfig {
        admin: info.sender.clone(),
        raffle_manager,
    };
    CONFIG.save(deps.storage, &config)?;
    NEXT_ENTRY_ID.save(deps.storage, &1u64)?;

    Ok(Response::new()
        .add_attribute("action", "instantiate")
        .add_attribute("contract", "raffle-nft")
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
        ExecuteMsg::Mint {
            story,
            token_uri,
            owner,
        } => execute::mint(deps, env, info, story, token_uri, owner),
        ExecuteMsg::Upvote { entry_id } => execute::upvote(deps, env, info, entry_id),
        ExecuteMsg::UpdateConfig {
            admin,
            raffle_manager,
        } => execute::update_config(deps, env, info, admin, raffle_manager),
    }
}

#[entry_point]
pub fn query(deps: Deps, _env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::Config {} => query::query_config(deps),
        QueryMsg::Entry { entry_id } => query::query_entry(deps, entry_id),
        QueryMsg::WeightOf { entry_id } => query::query_weight_of(deps, entry_id),
        QueryMsg::EntryWeights { entry_ids } => query::query_entry_weights(deps, entry_ids),
        QueryMsg::HasUpvoted { entry_id, voter } => {
            query::query_has_upvoted(deps, entry_id, voter)
        }
        QueryMsg::Entries { start_after, limit } => {
            query::query_entries(deps, start_after, limit)
        }
        QueryMsg::Gallery {
            sort,
            search,
            limit,
        } => query::query_gallery(deps, sort, search, limit),
        QueryMsg::CreatorStats { address } => query::query_creator_stats(deps, address),
        QueryMsg::TopCreators { limit } => query::query_top_creators(deps, limit),
        QueryMsg::TotalEntries {} => query::query_total_entries(deps),
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
