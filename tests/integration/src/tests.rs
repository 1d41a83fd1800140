//! Integration tests for the upvote raffle.
//!
//! The three contracts run side by side on separate mock dependencies. A small
//! router replays every `WasmMsg::Execute` a contract emits against the target
//! contract's entry point, and answers cross-contract queries from the other
//! contracts' current state. Failed sub-messages with `ReplyOn::Error` are fed
//! back through the sender's `reply` entry point. State written by a failed
//! callee is not rolled back.
//!
//! Run:
//! ```bash
//! cargo test -p upvote-raffle-integration-tests
//! ```

use cosmwasm_std::testing::{message_info, mock_dependencies, mock_env, MockApi, MockQuerier};
use cosmwasm_std::{
    coins, from_json, to_json_binary, Addr, BankMsg, Binary, Coin, ContractResult, CosmosMsg,
    Env, Event, MemoryStorage, OwnedDeps, Reply, ReplyOn, Response, SubMsgResult, SystemError,
    SystemResult, Timestamp, Uint128, WasmMsg, WasmQuery,
};
use serde::de::DeserializeOwned;
use serde::Serialize;
use upvote_raffle_common::{snapshot_digest_hex, CreatorStatsResponse, LiveRoundResponse};
use upvote_raffle_common::{RoundStatus, SnapshotEntry};

use upvote_raffle_manager::msg::{
    ExecuteMsg as ManagerExecuteMsg, InstantiateMsg as ManagerInstantiateMsg,
    QueryMsg as ManagerQueryMsg, RegistryQueryMsg, UserProfileResponse,
};
use upvote_raffle_manager::state::Round;
use upvote_raffle_nft::msg::{
    EntriesResponse, ExecuteMsg as RegistryExecuteMsg, InstantiateMsg as RegistryInstantiateMsg,
    QueryMsg as RegistryQueryMsgFull,
};
use upvote_raffle_vrf_oracle::msg::{
    ExecuteMsg as OracleExecuteMsg, InstantiateMsg as OracleInstantiateMsg,
    QueryMsg as OracleQueryMsg,
};
use upvote_raffle_vrf_oracle::state::RandomnessRequest;

type TestDeps = OwnedDeps<MemoryStorage, MockApi, MockQuerier>;

// ─── Constants ───

/// Real drand quicknet public key
const QUICKNET_PK_HEX: &str = "83cf0f2896adee7eb8b5f01fcad3912212c437e0073e911fb90022d3e760183c8c4b450b6a0a6c3ac6a5776a2d1064510d1fec758c921cc22b0e17e63aaf4bcb5ed66304de9cf809bd274ca73bab4af5a6e9c76a4bc09e76eae8991ef5ece45a";
const CHAIN_HASH: &str = "52db9ba70e0cc0f6eaf7803dd07447a1f5477735fd3f661792ba94600c84e971";
const GENESIS: u64 = 1692803367;

/// Real quicknet test vector: round 1000
const TEST_ROUND: u64 = 1000;
const TEST_SIG_HEX: &str = "b44679b9a59af2ec876b1a6b1ad52ea9b1615fc3982b19576350f93447cb1125e342b73a8dd2bacbe47e4b6b63ed5e39";
const TEST_RANDOMNESS_HEX: &str =
    "fe290beca10872ef2fb164d2aa4442de4566183ec51c56ff3cd603d930e54fdd";

const DENOM: &str = "uraffle";
const DURATION: u64 = 3600;
/// A randomness request made at this time binds to drand round 1000.
const CLOSE_AT: u64 = GENESIS + (TEST_ROUND - 2) * 3;
const OPEN_AT: u64 = CLOSE_AT - DURATION;

const TOKEN_URI: &str = "ipfs://bafybeigdyrzt5sfp7udm7hu76uh7y26nf3efuylqabf3oclgtqy55fbzdi";

// ─── Suite ───

struct Suite {
    api: MockApi,
    env: Env,
    registry: TestDeps,
    manager: TestDeps,
    oracle: TestDeps,
    registry_addr: Addr,
    manager_addr: Addr,
    oracle_addr: Addr,
}

impl Suite {
    fn new() -> Self {
        let api = MockApi::default();
        let registry_addr = api.addr_make("registry_contract");
        let manager_addr = api.addr_make("manager_contract");
        let oracle_addr = api.addr_make("oracle_contract");
        let admin = api.addr_make("admin");
        let operator = api.addr_make("operator");

        let mut suite = Suite {
            api,
            env: mock_env(),
            registry: mock_dependencies(),
            manager: mock_dependencies(),
            oracle: mock_dependencies(),
            registry_addr,
            manager_addr,
            oracle_addr,
        };

        let env = suite.env_for(&suite.oracle_addr.clone());
        upvote_raffle_vrf_oracle::contract::instantiate(
            suite.oracle.as_mut(),
            env,
            message_info(&admin, &[]),
            OracleInstantiateMsg {
                operators: vec![operator.to_string()],
                quicknet_pubkey_hex: QUICKNET_PK_HEX.to_string(),
                chain_hash: CHAIN_HASH.to_string(),
                genesis_time: GENESIS,
                period_seconds: 3,
            },
        )
        .unwrap();

        let env = suite.env_for(&suite.registry_addr.clone());
        upvote_raffle_nft::contract::instantiate(
            suite.registry.as_mut(),
            env,
            message_info(&admin, &[]),
            RegistryInstantiateMsg {
                raffle_manager: Some(suite.manager_addr.to_string()),
            },
        )
        .unwrap();

        let env = suite.env_for(&suite.manager_addr.clone());
        upvote_raffle_manager::contract::instantiate(
            suite.manager.as_mut(),
            env,
            message_info(&admin, &[]),
            ManagerInstantiateMsg {
                registry: suite.registry_addr.to_string(),
                oracle: suite.oracle_addr.to_string(),
                prize_denom: DENOM.to_string(),
                max_round_duration_seconds: 7 * 86400,
            },
        )
        .unwrap();

        suite
    }

    fn addr(&self, name: &str) -> Addr {
        self.api.addr_make(name)
    }

    fn set_time(&mut self, seconds: u64) {
        self.env.block.time = Timestamp::from_seconds(seconds);
    }

    fn env_for(&self, contract: &Addr) -> Env {
        let mut env = self.env.clone();
        env.contract.address = contract.clone();
        env
    }

    /// Every entry in the registry as a weight row.
    fn registry_rows(&self) -> Vec<SnapshotEntry> {
        let mut rows = Vec::new();
        let mut start_after = None;
        loop {
            let page: EntriesResponse = from_json(
                upvote_raffle_nft::contract::query(
                    self.registry.as_ref(),
                    self.env.clone(),
                    RegistryQueryMsgFull::Entries {
                        start_after,
                        limit: Some(100),
                    },
                )
                .unwrap(),
            )
            .unwrap();
            let Some(last) = page.entries.last() else {
                break;
            };
            start_after = Some(last.id);
            rows.extend(page.entries.into_iter().map(|e| SnapshotEntry {
                entry_id: e.id,
                owner: e.owner,
                weight: e.weight,
            }));
        }
        rows
    }

    /// Point each contract's querier at the current state of the others.
    fn refresh_queriers(&mut self) {
        let live: Option<LiveRoundResponse> = from_json(
            upvote_raffle_manager::contract::query(
                self.manager.as_ref(),
                self.env.clone(),
                ManagerQueryMsg::LiveRound {},
            )
            .unwrap(),
        )
        .unwrap();
        let live = to_json_binary(&live).unwrap();
        let manager_addr = self.manager_addr.to_string();
        self.registry.querier.update_wasm(move |query| match query {
            WasmQuery::Smart { contract_addr, .. } if *contract_addr == manager_addr => {
                SystemResult::Ok(ContractResult::Ok(live.clone()))
            }
            _ => unsupported(),
        });

        let rows = self.registry_rows();
        let registry_addr = self.registry_addr.to_string();
        self.manager.querier.update_wasm(move |query| match query {
            WasmQuery::Smart { contract_addr, msg } if *contract_addr == registry_addr => {
                match from_json::<RegistryQueryMsg>(msg) {
                    Ok(RegistryQueryMsg::EntryWeights { entry_ids }) => {
                        let found: Vec<SnapshotEntry> = entry_ids
                            .iter()
                            .filter_map(|id| rows.iter().find(|r| r.entry_id == *id).cloned())
                            .collect();
                        if found.len() != entry_ids.len() {
                            return SystemResult::Ok(ContractResult::Err(
                                "entry not found".to_string(),
                            ));
                        }
                        SystemResult::Ok(ContractResult::Ok(to_json_binary(&found).unwrap()))
                    }
                    Ok(RegistryQueryMsg::CreatorStats { address }) => {
                        let owned: Vec<&SnapshotEntry> =
                            rows.iter().filter(|r| r.owner.as_str() == address).collect();
                        let stats = CreatorStatsResponse {
                            address,
                            entries_owned: owned.len() as u64,
                            total_upvotes: owned.iter().map(|r| r.weight).sum(),
                        };
                        SystemResult::Ok(ContractResult::Ok(to_json_binary(&stats).unwrap()))
                    }
                    Err(e) => SystemResult::Ok(ContractResult::Err(e.to_string())),
                }
            }
            _ => unsupported(),
        });
    }

    fn exec_raw(
        &mut self,
        contract: &Addr,
        sender: &Addr,
        msg: &Binary,
        funds: &[Coin],
    ) -> Result<Response, String> {
        self.refresh_queriers();
        let env = self.env_for(contract);
        let info = message_info(sender, funds);

        if *contract == self.registry_addr {
            let msg: RegistryExecuteMsg = from_json(msg).map_err(|e| e.to_string())?;
            upvote_raffle_nft::contract::execute(self.registry.as_mut(), env, info, msg)
                .map_err(|e| e.to_string())
        } else if *contract == self.manager_addr {
            let msg: ManagerExecuteMsg = from_json(msg).map_err(|e| e.to_string())?;
            upvote_raffle_manager::contract::execute(self.manager.as_mut(), env, info, msg)
                .map_err(|e| e.to_string())
        } else if *contract == self.oracle_addr {
            let msg: OracleExecuteMsg = from_json(msg).map_err(|e| e.to_string())?;
            upvote_raffle_vrf_oracle::contract::execute(self.oracle.as_mut(), env, info, msg)
                .map_err(|e| e.to_string())
        } else {
            Err(format!("no contract at {contract}"))
        }
    }

    fn reply_raw(&mut self, contract: &Addr, reply: Reply) -> Result<Response, String> {
        let env = self.env_for(contract);
        if *contract == self.oracle_addr {
            upvote_raffle_vrf_oracle::contract::reply(self.oracle.as_mut(), env, reply)
                .map_err(|e| e.to_string())
        } else {
            Err(format!("{contract} has no reply entry point"))
        }
    }

    /// Execute `msg` and every wasm message it triggers, depth first.
    fn dispatch(
        &mut self,
        contract: Addr,
        sender: Addr,
        msg: Binary,
        funds: Vec<Coin>,
        log: &mut Vec<Response>,
    ) -> Result<(), String> {
        let res = self.exec_raw(&contract, &sender, &msg, &funds)?;
        let submsgs = res.messages.clone();
        log.push(res);

        for sub in submsgs {
            // Bank sends are checked on the response, not simulated
            let CosmosMsg::Wasm(WasmMsg::Execute {
                contract_addr,
                msg,
                funds,
            }) = sub.msg
            else {
                continue;
            };

            let target = Addr::unchecked(contract_addr);
            match self.dispatch(target, contract.clone(), msg, funds, log) {
                Ok(()) => {}
                Err(err) if matches!(sub.reply_on, ReplyOn::Error | ReplyOn::Always) => {
                    let reply = Reply {
                        id: sub.id,
                        payload: sub.payload.clone(),
                        gas_used: 0,
                        result: SubMsgResult::Err(err),
                    };
                    let res = self.reply_raw(&contract, reply)?;
                    log.push(res);
                }
                Err(err) => return Err(err),
            }
        }

        Ok(())
    }

    fn execute<M: Serialize>(
        &mut self,
        contract: &Addr,
        sender: &Addr,
        msg: &M,
        funds: &[Coin],
    ) -> Result<Vec<Response>, String> {
        let msg = to_json_binary(msg).map_err(|e| e.to_string())?;
        let mut log = Vec::new();
        self.dispatch(
            contract.clone(),
            sender.clone(),
            msg,
            funds.to_vec(),
            &mut log,
        )?;
        Ok(log)
    }

    // ─── Contract shortcuts ───

    fn registry_exec(
        &mut self,
        sender: &str,
        msg: RegistryExecuteMsg,
    ) -> Result<Vec<Response>, String> {
        let sender = self.addr(sender);
        let registry = self.registry_addr.clone();
        self.execute(&registry, &sender, &msg, &[])
    }

    fn manager_exec(
        &mut self,
        sender: &str,
        msg: ManagerExecuteMsg,
        funds: &[Coin],
    ) -> Result<Vec<Response>, String> {
        let sender = self.addr(sender);
        let manager = self.manager_addr.clone();
        self.execute(&manager, &sender, &msg, funds)
    }

    fn oracle_exec(
        &mut self,
        sender: &str,
        msg: OracleExecuteMsg,
    ) -> Result<Vec<Response>, String> {
        let sender = self.addr(sender);
        let oracle = self.oracle_addr.clone();
        self.execute(&oracle, &sender, &msg, &[])
    }

    fn query_registry<T: DeserializeOwned>(&self, msg: RegistryQueryMsgFull) -> T {
        from_json(
            upvote_raffle_nft::contract::query(self.registry.as_ref(), self.env.clone(), msg)
                .unwrap(),
        )
        .unwrap()
    }

    fn query_manager<T: DeserializeOwned>(&mut self, msg: ManagerQueryMsg) -> T {
        self.refresh_queriers();
        from_json(
            upvote_raffle_manager::contract::query(self.manager.as_ref(), self.env.clone(), msg)
                .unwrap(),
        )
        .unwrap()
    }

    fn query_oracle<T: DeserializeOwned>(&self, msg: OracleQueryMsg) -> T {
        from_json(
            upvote_raffle_vrf_oracle::contract::query(self.oracle.as_ref(), self.env.clone(), msg)
                .unwrap(),
        )
        .unwrap()
    }

    fn round(&mut self, round_id: u64) -> Round {
        self.query_manager(ManagerQueryMsg::Round { round_id })
    }

    fn mint(&mut self, owner: &str, story: &str) -> u64 {
        let log = self
            .registry_exec(
                owner,
                RegistryExecuteMsg::Mint {
                    story: story.to_string(),
                    token_uri: TOKEN_URI.to_string(),
                    owner: None,
                },
            )
            .unwrap();
        attr(&log[0], "entry_id").parse().unwrap()
    }

    fn upvote(&mut self, voter: &str, entry_id: u64) -> Result<Vec<Response>, String> {
        self.registry_exec(voter, RegistryExecuteMsg::Upvote { entry_id })
    }

    fn open_round(&mut self, funds: &[Coin]) -> u64 {
        let log = self
            .manager_exec(
                "admin",
                ManagerExecuteMsg::OpenRound {
                    duration_seconds: DURATION,
                },
                funds,
            )
            .unwrap();
        attr(&log[0], "round_id").parse().unwrap()
    }

    fn close_round(&mut self, round_id: u64) -> Result<Vec<Response>, String> {
        self.manager_exec("keeper", ManagerExecuteMsg::CloseRound { round_id }, &[])
    }

    fn submit_beacon(&mut self) -> Vec<Response> {
        self.oracle_exec(
            "operator",
            OracleExecuteMsg::SubmitBeacon {
                round: TEST_ROUND,
                signature_hex: TEST_SIG_HEX.to_string(),
            },
        )
        .unwrap()
    }
}

fn unsupported() -> cosmwasm_std::QuerierResult {
    SystemResult::Err(SystemError::InvalidRequest {
        error: "Only smart queries to known contracts supported".to_string(),
        request: Default::default(),
    })
}

fn attr(res: &Response, key: &str) -> String {
    res.attributes
        .iter()
        .find(|a| a.key == key)
        .unwrap_or_else(|| panic!("missing attribute {key}"))
        .value
        .clone()
}

fn events<'a>(log: &'a [Response], ty: &str) -> Vec<&'a Event> {
    log.iter()
        .flat_map(|res| res.events.iter())
        .filter(|e| e.ty == ty)
        .collect()
}

fn event_attr(event: &Event, key: &str) -> String {
    event
        .attributes
        .iter()
        .find(|a| a.key == key)
        .unwrap_or_else(|| panic!("missing event attribute {key}"))
        .value
        .clone()
}

/// Open a round, mint alice's entry (3 upvotes) and bob's (1 upvote) into it,
/// then close at the time that binds the draw to drand round 1000.
fn weighted_round(suite: &mut Suite) -> u64 {
    suite.set_time(OPEN_AT);
    let round_id = suite.open_round(&coins(1_000, DENOM));

    let a = suite.mint("alice", "a story about the sea");
    let b = suite.mint("bob", "a story about the mountains");
    assert_eq!((a, b), (1, 2));

    for voter in ["carol", "dave", "erin"] {
        suite.upvote(voter, a).unwrap();
    }
    suite.upvote("carol", b).unwrap();

    suite.set_time(CLOSE_AT);
    round_id
}

// ─── Tests ───

#[test]
fn test_full_draw_with_real_beacon() {
    let mut suite = Suite::new();
    let round_id = weighted_round(&mut suite);

    // Minting while the round is Active registered both entries
    let entries: Vec<u64> = suite.query_manager(ManagerQueryMsg::RoundEntries {
        round_id,
        start_after: None,
        limit: None,
    });
    assert_eq!(entries, vec![1, 2]);

    // Self votes and repeat votes never add weight
    assert!(suite.upvote("alice", 1).is_err());
    assert!(suite.upvote("carol", 1).is_err());

    let log = suite.close_round(round_id).unwrap();
    assert_eq!(log.len(), 2, "close should trigger exactly one oracle request");
    assert_eq!(attr(&log[1], "drand_round"), TEST_ROUND.to_string());
    assert_eq!(events(&log, "raffle_randomness_requested").len(), 1);

    let round = suite.round(round_id);
    assert_eq!(round.status, RoundStatus::Drawing);
    assert_eq!(round.total_weight, Some(Uint128::new(4)));
    let rows = suite.registry_rows();
    assert_eq!(round.snapshot_digest, Some(snapshot_digest_hex(&rows)));

    // Randomness is fixed by the beacon, not by anything the caller controls
    let log = suite.submit_beacon();
    let selected = events(&log, "raffle_winner_selected");
    assert_eq!(selected.len(), 1);
    assert_eq!(event_attr(selected[0], "randomness"), TEST_RANDOMNESS_HEX);
    // 0xfe290beca10872ef2fb164d2aa4442de % 4 == 2, inside alice's range [0, 3)
    assert_eq!(event_attr(selected[0], "ticket"), "2");

    let round = suite.round(round_id);
    assert_eq!(round.status, RoundStatus::Completed);
    assert_eq!(round.winner, Some(suite.addr("alice")));
    assert_eq!(round.winning_entry, Some(1));
    assert_eq!(
        round.randomness.map(|r| hex::encode(r.as_slice())),
        Some(TEST_RANDOMNESS_HEX.to_string())
    );

    let live: Option<LiveRoundResponse> = suite.query_manager(ManagerQueryMsg::LiveRound {});
    assert!(live.is_none());

    let request: Option<RandomnessRequest> = suite.query_oracle(OracleQueryMsg::Request {
        consumer: suite.manager_addr.to_string(),
        request_id: 1,
    });
    let request = request.unwrap();
    assert_eq!(request.drand_round, TEST_ROUND);
    assert_eq!(request.deliveries, 1);
    assert!(request.last_error.is_none());
}

#[test]
fn test_winner_claims_prize() {
    let mut suite = Suite::new();
    let round_id = weighted_round(&mut suite);
    suite.close_round(round_id).unwrap();
    suite.submit_beacon();

    let err = suite
        .manager_exec("bob", ManagerExecuteMsg::ClaimPrize { round_id }, &[])
        .unwrap_err();
    assert!(err.contains("unauthorized"));

    let log = suite
        .manager_exec("alice", ManagerExecuteMsg::ClaimPrize { round_id }, &[])
        .unwrap();
    match &log[0].messages[0].msg {
        CosmosMsg::Bank(BankMsg::Send { to_address, amount }) => {
            assert_eq!(to_address, suite.addr("alice").as_str());
            assert_eq!(amount, &coins(1_000, DENOM));
        }
        other => panic!("unexpected message: {other:?}"),
    }

    let err = suite
        .manager_exec("alice", ManagerExecuteMsg::ClaimPrize { round_id }, &[])
        .unwrap_err();
    assert!(err.contains("already claimed"));
}

#[test]
fn test_redelivery_is_noop() {
    let mut suite = Suite::new();
    let round_id = weighted_round(&mut suite);
    suite.close_round(round_id).unwrap();
    suite.submit_beacon();
    let before = suite.round(round_id);

    let manager = suite.manager_addr.to_string();
    let log = suite
        .oracle_exec(
            "anyone",
            OracleExecuteMsg::Redeliver {
                consumer: manager,
                request_id: 1,
            },
        )
        .unwrap();
    assert_eq!(log.len(), 2);
    assert_eq!(attr(&log[1], "duplicate"), "true");
    assert!(events(&log, "raffle_winner_selected").is_empty());

    let after = suite.round(round_id);
    assert_eq!(before, after);
}

#[test]
fn test_close_before_end_time() {
    let mut suite = Suite::new();
    suite.set_time(OPEN_AT);
    let round_id = suite.open_round(&[]);
    suite.mint("alice", "story");

    suite.set_time(CLOSE_AT - 1);
    let err = suite.close_round(round_id).unwrap_err();
    assert!(err.contains("cannot be closed before"));

    suite.set_time(CLOSE_AT);
    suite.close_round(round_id).unwrap();

    // Exactly once
    let err = suite.close_round(round_id).unwrap_err();
    assert!(err.contains("drawing"));
}

#[test]
fn test_only_one_live_round() {
    let mut suite = Suite::new();
    let round_id = weighted_round(&mut suite);

    let err = suite
        .manager_exec(
            "admin",
            ManagerExecuteMsg::OpenRound {
                duration_seconds: DURATION,
            },
            &[],
        )
        .unwrap_err();
    assert!(err.contains("still live"));

    // Still blocked while the draw is pending
    suite.close_round(round_id).unwrap();
    let err = suite
        .manager_exec(
            "admin",
            ManagerExecuteMsg::OpenRound {
                duration_seconds: DURATION,
            },
            &[],
        )
        .unwrap_err();
    assert!(err.contains("still live"));

    suite.submit_beacon();
    let next = suite.open_round(&[]);
    assert_eq!(next, round_id + 1);
}

#[test]
fn test_zero_entry_round() {
    let mut suite = Suite::new();
    suite.set_time(OPEN_AT);
    let round_id = suite.open_round(&coins(300, DENOM));

    suite.set_time(CLOSE_AT);
    let log = suite.close_round(round_id).unwrap();
    assert_eq!(log.len(), 1, "no oracle request for an empty round");
    assert!(log[0].messages.is_empty());

    let round = suite.round(round_id);
    assert_eq!(round.status, RoundStatus::Completed);
    assert!(round.winner.is_none());

    let request: Option<RandomnessRequest> = suite.query_oracle(OracleQueryMsg::Request {
        consumer: suite.manager_addr.to_string(),
        request_id: 1,
    });
    assert!(request.is_none());

    // Unclaimed prize moves into the next round
    let next = suite.open_round(&[]);
    assert_eq!(suite.round(next).prize, Uint128::new(300));
}

#[test]
fn test_owner_registers_entry_minted_between_rounds() {
    let mut suite = Suite::new();
    suite.set_time(OPEN_AT);

    let entry_id = suite.mint("alice", "minted with no round open");
    let registered: Option<u64> =
        suite.query_manager(ManagerQueryMsg::EntryRound { entry_id });
    assert!(registered.is_none());

    let round_id = suite.open_round(&[]);

    let err = suite
        .manager_exec(
            "bob",
            ManagerExecuteMsg::RegisterEntry { round_id, entry_id },
            &[],
        )
        .unwrap_err();
    assert!(err.contains("unauthorized"));

    suite
        .manager_exec(
            "alice",
            ManagerExecuteMsg::RegisterEntry { round_id, entry_id },
            &[],
        )
        .unwrap();
    let registered: Option<u64> =
        suite.query_manager(ManagerQueryMsg::EntryRound { entry_id });
    assert_eq!(registered, Some(round_id));
}

#[test]
fn test_rejected_delivery_is_recorded() {
    let mut suite = Suite::new();
    suite.set_time(CLOSE_AT);

    // A consumer the router has no contract for rejects every delivery
    suite
        .oracle_exec("stranger", OracleExecuteMsg::RequestRandomness { request_id: 5 })
        .unwrap();

    let log = suite.submit_beacon();
    assert_eq!(events(&log, "raffle_randomness_delivery_failed").len(), 1);

    let request: Option<RandomnessRequest> = suite.query_oracle(OracleQueryMsg::Request {
        consumer: suite.addr("stranger").to_string(),
        request_id: 5,
    });
    let request = request.unwrap();
    assert!(request.delivered_at.is_none());
    assert!(request.last_error.unwrap().contains("no contract"));

    let beacon_stored: Option<upvote_raffle_vrf_oracle::state::StoredBeacon> =
        suite.query_oracle(OracleQueryMsg::Beacon { round: TEST_ROUND });
    assert!(beacon_stored.is_some());
}

#[test]
fn test_profiles_and_leaderboard() {
    let mut suite = Suite::new();
    let round_id = weighted_round(&mut suite);
    suite.close_round(round_id).unwrap();
    suite.submit_beacon();

    let profile: UserProfileResponse = suite.query_manager(ManagerQueryMsg::UserProfile {
        address: suite.addr("alice").to_string(),
    });
    assert_eq!(profile.entries_owned, 1);
    assert_eq!(profile.total_upvotes, 3);
    assert_eq!(profile.rounds_won, 1);

    let top: Vec<CreatorStatsResponse> =
        suite.query_registry(RegistryQueryMsgFull::TopCreators { limit: Some(2) });
    assert_eq!(top[0].address, suite.addr("alice").to_string());
    assert_eq!(top[1].address, suite.addr("bob").to_string());

    let winners: Vec<Round> =
        suite.query_manager(ManagerQueryMsg::RecentWinners { limit: None });
    assert_eq!(winners.len(), 1);
    assert_eq!(winners[0].id, round_id);
}
