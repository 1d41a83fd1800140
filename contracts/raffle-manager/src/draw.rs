use cosmwasm_std::{
    to_json_binary, Binary, Deps, DepsMut, Env, Event, MessageInfo, Order, Response, StdResult,
    Storage, Uint128, WasmMsg,
};
use upvote_raffle_common::{
    randomness_to_u128, select_winner, snapshot_digest_hex, total_weight, SnapshotEntry,
};

use crate::error::ContractError;
use crate::msg::{OracleExecuteMsg, RegistryQueryMsg};
use crate::rounds::{finalize, Winner};
use crate::state::{
    ManagerConfig, PendingDraw, Round, CONFIG, FULFILLED_REQUESTS, PENDING_DRAWS, RAFFLE_STATE,
    ROUNDS, ROUND_ENTRIES,
};

/// Entry ids per registry weight query
const SNAPSHOT_CHUNK: usize = 250;

/// Read the current weight of every entry registered with `round_id`.
///
/// Rows come back ordered by entry id, which is the order the draw walks them in.
pub fn take_snapshot(
    deps: Deps,
    config: &ManagerConfig,
    round_id: u64,
) -> Result<Vec<SnapshotEntry>, ContractError> {
    let entry_ids: Vec<u64> = ROUND_ENTRIES
        .prefix(round_id)
        .keys(deps.storage, None, None, Order::Ascending)
        .collect::<StdResult<Vec<_>>>()?;

    let mut snapshot = Vec::with_capacity(entry_ids.len());
    for chunk in entry_ids.chunks(SNAPSHOT_CHUNK) {
        let rows: Vec<SnapshotEntry> = deps.querier.query_wasm_smart(
            config.registry.to_string(),
            &RegistryQueryMsg::EntryWeights {
                entry_ids: chunk.to_vec(),
            },
        )?;
        snapshot.extend(rows);
    }

    snapshot.sort_by_key(|row| row.entry_id);
    Ok(snapshot)
}

/// Park the snapshot under a fresh request id and build the oracle request.
///
/// Fails with `NoEntries` when the snapshot is empty; the caller completes the
/// round without a draw in that case.
pub fn request_randomness(
    storage: &mut dyn Storage,
    env: &Env,
    config: &ManagerConfig,
    round: &mut Round,
    snapshot: Vec<SnapshotEntry>,
) -> Result<(WasmMsg, Event), ContractError> {
    if snapshot.is_empty() {
        return Err(ContractError::NoEntries { round_id: round.id });
    }

    let mut state = RAFFLE_STATE.load(storage)?;
    let request_id = state.next_request_id;
    state.next_request_id += 1;
    RAFFLE_STATE.save(storage, &state)?;

    let total = Uint128::from(total_weight(&snapshot));
    let digest = snapshot_digest_hex(&snapshot);

    round.randomness_request_id = Some(request_id);
    round.total_weight = Some(total);
    round.snapshot_digest = Some(digest.clone());

    let num_entries = snapshot.len();
    PENDING_DRAWS.save(
        storage,
        request_id,
        &PendingDraw {
            request_id,
            round_id: round.id,
            entries: snapshot,
            requested_at: env.block.time,
        },
    )?;

    let msg = WasmMsg::Execute {
        contract_addr: config.oracle.to_string(),
        msg: to_json_binary(&OracleExecuteMsg::RequestRandomness { request_id })?,
        funds: vec![],
    };

    let event = Event::new("raffle_randomness_requested")
        .add_attribute("round_id", round.id.to_string())
        .add_attribute("request_id", request_id.to_string())
        .add_attribute("num_entries", num_entries.to_string())
        .add_attribute("total_weight", total.to_string())
        .add_attribute("snapshot_digest", digest);

    Ok((msg, event))
}

/// Oracle callback. Selects the winner from the parked snapshot and completes the round.
///
/// A request that was already fulfilled is acknowledged without changing anything,
/// so the oracle can redeliver safely.
pub fn receive_randomness(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    request_id: u64,
    randomness: Binary,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    if info.sender != config.oracle {
        return Err(ContractError::Unauthorized {
            reason: "only the oracle can deliver randomness".to_string(),
        });
    }

    if let Some(round_id) = FULFILLED_REQUESTS.may_load(deps.storage, request_id)? {
        return Ok(Response::new()
            .add_attribute("action", "receive_randomness")
            .add_attribute("request_id", request_id.to_string())
            .add_attribute("round_id", round_id.to_string())
            .add_attribute("duplicate", "true"));
    }

    let pending = PENDING_DRAWS
        .may_load(deps.storage, request_id)?
        .ok_or(ContractError::UnknownRequest { request_id })?;

    let mut round = ROUNDS
        .may_load(deps.storage, pending.round_id)?
        .ok_or(ContractError::RoundNotFound {
            round_id: pending.round_id,
        })?;

    let random = randomness_to_u128(randomness.as_slice());
    let selection = select_winner(&pending.entries, random).ok_or(ContractError::NoEntries {
        round_id: pending.round_id,
    })?;
    let picked = &pending.entries[selection.index];
    let winner = Winner {
        entry_id: picked.entry_id,
        owner: picked.owner.clone(),
    };

    round.randomness = Some(randomness.clone());

    PENDING_DRAWS.remove(deps.storage, request_id);
    FULFILLED_REQUESTS.save(deps.storage, request_id, &pending.round_id)?;

    let completed = finalize(deps.storage, &env, round, Some(winner.clone()))?;

    Ok(Response::new()
        .add_attribute("action", "receive_randomness")
        .add_attribute("request_id", request_id.to_string())
        .add_attribute("round_id", pending.round_id.to_string())
        .add_attribute("winner", winner.owner.to_string())
        .add_event(
            Event::new("raffle_winner_selected")
                .add_attribute("round_id", pending.round_id.to_string())
                .add_attribute("request_id", request_id.to_string())
                .add_attribute("winner", winner.owner.to_string())
                .add_attribute("entry_id", winner.entry_id.to_string())
                .add_attribute("randomness", hex::encode(randomness.as_slice()))
                .add_attribute("ticket", selection.ticket.to_string())
                .add_attribute("total_weight", selection.total.to_string())
                .add_attribute("uniform", selection.uniform.to_string()),
        )
        .add_event(completed))
}
