use cosmwasm_std::{
    coins, Addr, BankMsg, DepsMut, Env, Event, MessageInfo, Response, Storage, Uint128,
};
use upvote_raffle_common::types::{RoundStatus, SnapshotEntry};

use crate::draw;
use crate::error::ContractError;
use crate::msg::RegistryQueryMsg;
use crate::state::{
    Round, CONFIG, ENTRY_ROUND, LIVE_ROUND, RAFFLE_STATE, ROUNDS, ROUND_ENTRIES, USER_WINS,
    USER_WIN_COUNT,
};

/// Winning entry handed to [`finalize`] by the draw coordinator.
#[derive(Clone, Debug, PartialEq)]
pub struct Winner {
    pub entry_id: u64,
    pub owner: Addr,
}

fn invalid_state(round: &Round) -> ContractError {
    ContractError::InvalidState {
        round_id: round.id,
        status: round.status.as_str().to_string(),
    }
}

fn load_round(storage: &dyn Storage, round_id: u64) -> Result<Round, ContractError> {
    ROUNDS
        .may_load(storage, round_id)?
        .ok_or(ContractError::RoundNotFound { round_id })
}

/// Sum of attached prize funds. Any coin in another denom is rejected.
fn prize_funds(info: &MessageInfo, denom: &str) -> Result<Uint128, ContractError> {
    let mut total = Uint128::zero();
    for coin in &info.funds {
        if coin.denom != denom {
            return Err(ContractError::WrongDenom {
                expected: denom.to_string(),
                denom: coin.denom.clone(),
            });
        }
        total += coin.amount;
    }
    Ok(total)
}

/// Open a new round. Admin only.
///
/// Claims the live-round slot, which must be empty. Any prize carried over from
/// rounds that completed without a winner moves into this round.
pub fn open_round(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    duration_seconds: u64,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    if info.sender != config.admin {
        return Err(ContractError::Unauthorized {
            reason: "only admin can open rounds".to_string(),
        });
    }

    if duration_seconds == 0 || duration_seconds > config.max_round_duration_seconds {
        return Err(ContractError::InvalidDuration {
            duration: duration_seconds,
            max: config.max_round_duration_seconds,
        });
    }

    if let Some(live) = LIVE_ROUND.load(deps.storage)? {
        return Err(ContractError::RoundAlreadyActive { round_id: live });
    }

    let funded = prize_funds(&info, &config.prize_denom)?;

    let mut state = RAFFLE_STATE.load(deps.storage)?;
    let round_id = state.next_round_id;
    state.next_round_id += 1;
    let prize = state.carryover_prize + funded;
    state.carryover_prize = Uint128::zero();

    let round = Round {
        id: round_id,
        start_time: env.block.time,
        end_time: env.block.time.plus_seconds(duration_seconds),
        status: RoundStatus::Active,
        total_entries: 0,
        winner: None,
        winning_entry: None,
        randomness_request_id: None,
        randomness: None,
        total_weight: None,
        snapshot_digest: None,
        closed_at: None,
        completed_at: None,
        prize,
        prize_claimed: false,
    };

    ROUNDS.save(deps.storage, round_id, &round)?;
    RAFFLE_STATE.save(deps.storage, &state)?;
    LIVE_ROUND.save(deps.storage, &Some(round_id))?;

    Ok(Response::new()
        .add_attribute("action", "open_round")
        .add_attribute("round_id", round_id.to_string())
        .add_event(
            Event::new("raffle_round_opened")
                .add_attribute("round_id", round_id.to_string())
                .add_attribute("start_time", round.start_time.seconds().to_string())
                .add_attribute("end_time", round.end_time.seconds().to_string())
                .add_attribute("prize", prize.to_string()),
        ))
}

/// Register an entry with an Active round.
///
/// The registry contract registers freshly minted entries; an owner may register
/// one of their entries that never joined a round.
pub fn register_entry(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    round_id: u64,
    entry_id: u64,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    let mut round = load_round(deps.storage, round_id)?;

    if round.status != RoundStatus::Active {
        return Err(ContractError::RoundNotActive { round_id });
    }

    if let Some(existing) = ENTRY_ROUND.may_load(deps.storage, entry_id)? {
        return Err(ContractError::EntryAlreadyRegistered {
            entry_id,
            round_id: existing,
        });
    }

    if info.sender != config.registry {
        let rows: Vec<SnapshotEntry> = deps
            .querier
            .query_wasm_smart(
                config.registry.to_string(),
                &RegistryQueryMsg::EntryWeights {
                    entry_ids: vec![entry_id],
                },
            )
            .map_err(|_| ContractError::EntryNotFound { entry_id })?;
        let entry = rows
            .into_iter()
            .next()
            .ok_or(ContractError::EntryNotFound { entry_id })?;
        if entry.owner != info.sender {
            return Err(ContractError::Unauthorized {
                reason: "only the registry or the entry owner can register an entry".to_string(),
            });
        }
    }

    ROUND_ENTRIES.save(deps.storage, (round_id, entry_id), &())?;
    ENTRY_ROUND.save(deps.storage, entry_id, &round_id)?;
    round.total_entries += 1;
    ROUNDS.save(deps.storage, round_id, &round)?;

    Ok(Response::new()
        .add_attribute("action", "register_entry")
        .add_attribute("round_id", round_id.to_string())
        .add_attribute("entry_id", entry_id.to_string())
        .add_event(
            Event::new("raffle_entry_registered")
                .add_attribute("round_id", round_id.to_string())
                .add_attribute("entry_id", entry_id.to_string())
                .add_attribute("total_entries", round.total_entries.to_string()),
        ))
}

/// Close an Active round once its end time has passed. Anyone can call.
///
/// Moves the round to Drawing and hands the weight snapshot to the draw
/// coordinator. A round without entries completes immediately with no winner
/// and no randomness request.
pub fn close_round(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    round_id: u64,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    let mut round = load_round(deps.storage, round_id)?;

    // Every non-Active round has already been closed once
    if round.status != RoundStatus::Active {
        return Err(invalid_state(&round));
    }

    if env.block.time < round.end_time {
        return Err(ContractError::TooEarly {
            round_id,
            end_time: round.end_time.seconds(),
        });
    }

    let snapshot = draw::take_snapshot(deps.as_ref(), &config, round_id)?;

    round.status = RoundStatus::Drawing;
    round.closed_at = Some(env.block.time);

    let response = Response::new()
        .add_attribute("action", "close_round")
        .add_attribute("round_id", round_id.to_string())
        .add_event(
            Event::new("raffle_round_closed")
                .add_attribute("round_id", round_id.to_string())
                .add_attribute("num_entries", snapshot.len().to_string())
                .add_attribute("closed_by", info.sender.to_string())
                .add_attribute("timestamp", env.block.time.seconds().to_string()),
        );

    match draw::request_randomness(deps.storage, &env, &config, &mut round, snapshot) {
        Ok((request_msg, event)) => {
            ROUNDS.save(deps.storage, round_id, &round)?;
            Ok(response.add_message(request_msg).add_event(event))
        }
        Err(ContractError::NoEntries { .. }) => {
            let event = finalize(deps.storage, &env, round, None)?;
            Ok(response.add_attribute("winner", "none").add_event(event))
        }
        Err(err) => Err(err),
    }
}

/// Complete a Drawing round and release the live-round slot.
///
/// Reached only from the draw coordinator: the randomness callback, or a close
/// with no entries.
pub fn finalize(
    storage: &mut dyn Storage,
    env: &Env,
    mut round: Round,
    winner: Option<Winner>,
) -> Result<Event, ContractError> {
    if round.status != RoundStatus::Drawing {
        return Err(invalid_state(&round));
    }
    if LIVE_ROUND.load(storage)? != Some(round.id) {
        return Err(invalid_state(&round));
    }

    let mut state = RAFFLE_STATE.load(storage)?;
    state.total_rounds_completed += 1;

    round.status = RoundStatus::Completed;
    round.completed_at = Some(env.block.time);

    match &winner {
        Some(winner) => {
            round.winner = Some(winner.owner.clone());
            round.winning_entry = Some(winner.entry_id);

            USER_WINS.save(storage, (&winner.owner, round.id), &())?;
            let wins = USER_WIN_COUNT
                .may_load(storage, &winner.owner)?
                .unwrap_or(0);
            USER_WIN_COUNT.save(storage, &winner.owner, &(wins + 1))?;
        }
        None => {
            state.carryover_prize += round.prize;
            round.prize = Uint128::zero();
        }
    }

    ROUNDS.save(storage, round.id, &round)?;
    RAFFLE_STATE.save(storage, &state)?;
    LIVE_ROUND.save(storage, &None)?;

    let (winner_str, entry_str) = match winner {
        Some(w) => (w.owner.to_string(), w.entry_id.to_string()),
        None => ("none".to_string(), "none".to_string()),
    };

    Ok(Event::new("raffle_round_completed")
        .add_attribute("round_id", round.id.to_string())
        .add_attribute("winner", winner_str)
        .add_attribute("winning_entry", entry_str)
        .add_attribute("prize", round.prize.to_string())
        .add_attribute("timestamp", env.block.time.seconds().to_string()))
}

/// Add to the prize of a round that has not completed yet.
pub fn fund_round(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    round_id: u64,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    let mut round = load_round(deps.storage, round_id)?;

    if !round.status.is_live() {
        return Err(invalid_state(&round));
    }

    let amount = prize_funds(&info, &config.prize_denom)?;
    if amount.is_zero() {
        return Err(ContractError::NoFundsSent {
            denom: config.prize_denom,
        });
    }

    round.prize += amount;
    ROUNDS.save(deps.storage, round_id, &round)?;

    Ok(Response::new()
        .add_attribute("action", "fund_round")
        .add_attribute("round_id", round_id.to_string())
        .add_attribute("amount", amount.to_string())
        .add_event(
            Event::new("raffle_prize_funded")
                .add_attribute("round_id", round_id.to_string())
                .add_attribute("amount", amount.to_string())
                .add_attribute("new_prize", round.prize.to_string()),
        ))
}

/// Pay out the prize of a completed round to its winner. Once only.
pub fn claim_prize(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    round_id: u64,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    let mut round = load_round(deps.storage, round_id)?;

    if round.status != RoundStatus::Completed {
        return Err(invalid_state(&round));
    }
    if round.winner.as_ref() != Some(&info.sender) {
        return Err(ContractError::Unauthorized {
            reason: "only the round winner can claim the prize".to_string(),
        });
    }
    if round.prize_claimed {
        return Err(ContractError::PrizeAlreadyClaimed { round_id });
    }
    if round.prize.is_zero() {
        return Err(ContractError::NoPrize { round_id });
    }

    round.prize_claimed = true;
    ROUNDS.save(deps.storage, round_id, &round)?;

    let send_msg = BankMsg::Send {
        to_address: info.sender.to_string(),
        amount: coins(round.prize.u128(), &config.prize_denom),
    };

    Ok(Response::new()
        .add_message(send_msg)
        .add_attribute("action", "claim_prize")
        .add_attribute("round_id", round_id.to_string())
        .add_attribute("winner", info.sender.to_string())
        .add_event(
            Event::new("raffle_prize_claimed")
                .add_attribute("round_id", round_id.to_string())
                .add_attribute("winner", info.sender.to_string())
                .add_attribute("amount", round.prize.to_string())
                .add_attribute("denom", config.prize_denom)
                .add_attribute("timestamp", env.block.time.seconds().to_string()),
        ))
}

/// Update configuration. Admin only.
///
/// `registry` and `oracle` can only change while no round is live.
pub fn update_config(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    admin: Option<String>,
    registry: Option<String>,
    oracle: Option<String>,
    max_round_duration_seconds: Option<u64>,
) -> Result<Response, ContractError> {
    let mut config = CONFIG.load(deps.storage)?;

    if info.sender != config.admin {
        return Err(ContractError::Unauthorized {
            reason: "only admin can update config".to_string(),
        });
    }

    if registry.is_some() || oracle.is_some() {
        if let Some(live) = LIVE_ROUND.load(deps.storage)? {
            return Err(ContractError::RoundAlreadyActive { round_id: live });
        }
    }

    if let Some(admin) = admin {
        config.admin = deps.api.addr_validate(&admin)?;
    }
    if let Some(registry) = registry {
        config.registry = deps.api.addr_validate(&registry)?;
    }
    if let Some(oracle) = oracle {
        config.oracle = deps.api.addr_validate(&oracle)?;
    }
    if let Some(max) = max_round_duration_seconds {
        if max == 0 {
            return Err(ContractError::InvalidDuration { duration: 0, max });
        }
        config.max_round_duration_seconds = max;
    }

    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new().add_attribute("action", "update_config"))
}
