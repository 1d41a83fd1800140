use cosmwasm_std::{
    to_json_binary, Addr, Api, DepsMut, Env, Event, MessageInfo, Response, StdResult, WasmMsg,
};
use upvote_raffle_common::types::{LiveRoundResponse, RoundStatus};

use crate::error::ContractError;
use crate::msg::{ManagerExecuteMsg, ManagerQueryMsg};
use crate::state::{
    CreatorStats, Entry, CONFIG, CREATOR_STATS, ENTRIES, MAX_STORY_LEN, MAX_TOKEN_URI_LEN,
    NEXT_ENTRY_ID, UPVOTES,
};

/// Validate an owner identity. Empty or malformed addresses are rejected as `InvalidOwner`.
pub fn validate_owner(api: &dyn Api, owner: &str) -> Result<Addr, ContractError> {
    if owner.trim().is_empty() {
        return Err(ContractError::InvalidOwner {
            owner: owner.to_string(),
        });
    }
    api.addr_validate(owner)
        .map_err(|_| ContractError::InvalidOwner {
            owner: owner.to_string(),
        })
}

fn validate_token_uri(token_uri: &str) -> Result<(), ContractError> {
    if token_uri.trim().is_empty() {
        return Err(ContractError::InvalidTokenUri {
            reason: "must not be empty".to_string(),
        });
    }
    if token_uri.len() > MAX_TOKEN_URI_LEN {
        return Err(ContractError::InvalidTokenUri {
            reason: format!("longer than {} bytes", MAX_TOKEN_URI_LEN),
        });
    }
    Ok(())
}

/// Mint a new entry with weight 0.
///
/// If a raffle manager is configured and reports an Active round, a `RegisterEntry`
/// message is dispatched so the entry joins that round in the same transaction.
pub fn mint(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    story: String,
    token_uri: String,
    owner: Option<String>,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;

    let owner = match owner {
        Some(owner) => {
            let owner = validate_owner(deps.api, &owner)?;
            if owner != info.sender && info.sender != config.admin {
                return Err(ContractError::Unauthorized {
                    reason: "only admin can mint for another owner".to_string(),
                });
            }
            owner
        }
        None => info.sender.clone(),
    };

    validate_token_uri(&token_uri)?;
    if story.len() > MAX_STORY_LEN {
        return Err(ContractError::StoryTooLong {
            len: story.len(),
            max: MAX_STORY_LEN,
        });
    }

    let entry_id = NEXT_ENTRY_ID.load(deps.storage)?;
    NEXT_ENTRY_ID.save(deps.storage, &(entry_id + 1))?;

    let entry = Entry {
        id: entry_id,
        owner: owner.clone(),
        story: story.clone(),
        token_uri: token_uri.clone(),
        weight: 0,
        created_at: env.block.time,
    };
    ENTRIES.save(deps.storage, entry_id, &entry)?;

    CREATOR_STATS.update(deps.storage, &owner, |stats| -> StdResult<_> {
        let mut stats = stats.unwrap_or_default();
        stats.entries_owned += 1;
        Ok(stats)
    })?;

    let mut response = Response::new()
        .add_attribute("action", "mint")
        .add_attribute("entry_id", entry_id.to_string())
        .add_attribute("owner", owner.to_string())
        .add_event(
            Event::new("raffle_entry_minted")
                .add_attribute("entry_id", entry_id.to_string())
                .add_attribute("owner", owner.to_string())
                .add_attribute("story", story)
                .add_attribute("token_uri", token_uri)
                .add_attribute("timestamp", env.block.time.seconds().to_string()),
        );

    // Join the live round, if any
    if let Some(manager) = config.raffle_manager {
        let live: Option<LiveRoundResponse> = deps
            .querier
            .query_wasm_smart(manager.to_string(), &ManagerQueryMsg::LiveRound {})?;

        if let Some(round) = live.filter(|r| r.status == RoundStatus::Active) {
            response = response
                .add_message(WasmMsg::Execute {
                    contract_addr: manager.to_string(),
                    msg: to_json_binary(&ManagerExecuteMsg::RegisterEntry {
                        round_id: round.round_id,
                        entry_id,
                    })?,
                    funds: vec![],
                })
                .add_attribute("round_id", round.round_id.to_string());
        }
    }

    Ok(response)
}

/// Upvote an entry. Weight goes up by exactly one per distinct voter.
pub fn upvote(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    entry_id: u64,
) -> Result<Response, ContractError> {
    let mut entry = ENTRIES
        .may_load(deps.storage, entry_id)?
        .ok_or(ContractError::EntryNotFound { entry_id })?;

    if info.sender == entry.owner {
        return Err(ContractError::SelfVote { entry_id });
    }

    if UPVOTES.has(deps.storage, (entry_id, &info.sender)) {
        return Err(ContractError::DuplicateVote {
            entry_id,
            voter: info.sender.to_string(),
        });
    }

    UPVOTES.save(deps.storage, (entry_id, &info.sender), &())?;
    entry.weight += 1;
    ENTRIES.save(deps.storage, entry_id, &entry)?;

    CREATOR_STATS.update(deps.storage, &entry.owner, |stats| -> StdResult<_> {
        let mut stats: CreatorStats = stats.unwrap_or_default();
        stats.total_upvotes += 1;
        Ok(stats)
    })?;

    Ok(Response::new()
        .add_attribute("action", "upvote")
        .add_attribute("entry_id", entry_id.to_string())
        .add_attribute("weight", entry.weight.to_string())
        .add_event(
            Event::new("raffle_entry_upvoted")
                .add_attribute("entry_id", entry_id.to_string())
                .add_attribute("voter", info.sender.to_string())
                .add_attribute("total_upvotes", entry.weight.to_string())
                .add_attribute("timestamp", env.block.time.seconds().to_string()),
        ))
}

/// Update configuration. Admin only.
pub fn update_config(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    admin: Option<String>,
    raffle_manager: Option<String>,
) -> Result<Response, ContractError> {
    let mut config = CONFIG.load(deps.storage)?;

    if info.sender != config.admin {
        return Err(ContractError::Unauthorized {
            reason: "only admin can update config".to_string(),
        });
    }

    if let Some(admin) = admin {
        config.admin = deps.api.addr_validate(&admin)?;
    }
    if let Some(manager) = raffle_manager {
        config.raffle_manager = Some(deps.api.addr_validate(&manager)?);
    }

    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new().add_attribute("action", "update_config"))
}
