//! End-to-end exercises of the governance engine.

use mgd_core::Principal;
use mgd_dao::{
    DaoError, GovernanceConfig, InMemoryStore, MicrogridDao, ProposalPhase, StateStore,
    VoteChoice,
};

fn admin() -> Principal {
    Principal::from("STDAOADMIN")
}

fn alice() -> Principal {
    Principal::from("ST1ALICE")
}

fn bob() -> Principal {
    Principal::from("ST2BOB")
}

fn oracle() -> Principal {
    Principal::from("STORACLE")
}

#[test]
fn funding_lifecycle_from_deposit_to_execution() {
    let mut dao = MicrogridDao::new(admin());

    dao.deposit_treasury(&alice(), 10_000).unwrap();
    let grid = dao
        .register_microgrid(&alice(), 900, "Rural Village Alpha".to_string(), 100)
        .unwrap();
    assert_eq!(grid, 1);

    let proposal = dao
        .create_proposal(
            &alice(),
            1_000,
            grid,
            "Battery storage".to_string(),
            "Install a 40 kWh battery bank".to_string(),
            3_000,
        )
        .unwrap();
    assert_eq!(proposal, 1);
    assert_eq!(dao.proposal(proposal).unwrap().end_height, 3_880);

    dao.vote(&alice(), 1_000, proposal, VoteChoice::Yes, 8_000)
        .unwrap();
    assert_eq!(dao.proposal(proposal).unwrap().yes_votes, 8_000);
    assert_eq!(dao.proposal(proposal).unwrap().total_voted, 8_000);

    // Voting closed at 3880 but the execution delay runs until 4024.
    assert_eq!(
        dao.execute_proposal(&bob(), 3_900, proposal),
        Err(DaoError::VotingEnded)
    );
    assert_eq!(
        dao.proposal_phase(proposal, 3_900),
        Some(ProposalPhase::ClosedPending)
    );

    dao.execute_proposal(&bob(), 4_024, proposal).unwrap();
    assert!(dao.proposal(proposal).unwrap().executed);

    // Executed proposals vanish from the executable set.
    assert_eq!(
        dao.execute_proposal(&bob(), 5_000, proposal),
        Err(DaoError::NotFound)
    );
}

#[test]
fn execution_is_open_to_any_principal() {
    let mut dao = MicrogridDao::new(admin());
    dao.deposit_treasury(&alice(), 1_000).unwrap();
    dao.register_microgrid(&alice(), 1, "Lakeside Cooperative".to_string(), 25)
        .unwrap();
    let id = dao
        .create_proposal(&alice(), 10, 1, "Wiring".to_string(), String::new(), 500)
        .unwrap();
    dao.vote(&alice(), 20, id, VoteChoice::Yes, 1_000).unwrap();

    let stranger = Principal::from("ST9STRANGER");
    assert!(dao.execute_proposal(&stranger, 10 + 2_880 + 144, id).is_ok());
}

#[test]
fn one_escrow_balance_backs_many_open_positions() {
    let mut dao = MicrogridDao::new(admin());
    dao.deposit_treasury(&alice(), 5_000).unwrap();
    dao.register_microgrid(&alice(), 1, "Prairie Microgrid".to_string(), 60)
        .unwrap();

    // Two proposals, each individually covered by the same 5000.
    let first = dao
        .create_proposal(&alice(), 10, 1, "Panels".to_string(), String::new(), 4_000)
        .unwrap();
    let second = dao
        .create_proposal(&alice(), 10, 1, "Cabling".to_string(), String::new(), 4_500)
        .unwrap();

    // Full-weight ballots on both, backed by the same balance.
    dao.vote(&alice(), 20, first, VoteChoice::Yes, 5_000).unwrap();
    dao.vote(&alice(), 20, second, VoteChoice::No, 5_000).unwrap();

    assert_eq!(dao.treasury_balance(&alice()), 5_000);
    assert_eq!(dao.proposal(first).unwrap().yes_votes, 5_000);
    assert_eq!(dao.proposal(second).unwrap().no_votes, 5_000);
}

#[test]
fn failed_quorum_leaves_the_proposal_in_limbo() {
    let mut dao = MicrogridDao::new(admin());
    dao.deposit_treasury(&alice(), 10_000).unwrap();
    dao.deposit_treasury(&bob(), 10_000).unwrap();
    dao.register_microgrid(&alice(), 1, "Foothill Site".to_string(), 30)
        .unwrap();
    let id = dao
        .create_proposal(&alice(), 10, 1, "Diesel backup".to_string(), String::new(), 100)
        .unwrap();

    // 50% yes against a 66% quorum.
    dao.vote(&alice(), 20, id, VoteChoice::Yes, 3_000).unwrap();
    dao.vote(&bob(), 20, id, VoteChoice::No, 3_000).unwrap();

    let ready = 10 + 2_880 + 144;
    assert_eq!(
        dao.execute_proposal(&bob(), ready, id),
        Err(DaoError::QuorumNotMet {
            yes_percent: 50,
            quorum_percent: 66
        })
    );
    // No rejected state: later attempts keep failing the same way.
    assert_eq!(
        dao.execute_proposal(&bob(), ready + 100_000, id),
        Err(DaoError::QuorumNotMet {
            yes_percent: 50,
            quorum_percent: 66
        })
    );
    assert_eq!(
        dao.proposal_phase(id, ready + 100_000),
        Some(ProposalPhase::Executable)
    );
}

#[test]
fn oracle_feed_accepts_only_assigned_oracle() {
    let mut dao = MicrogridDao::new(admin());
    dao.register_microgrid(&alice(), 1, "Island Grid North".to_string(), 45)
        .unwrap();

    // No oracle yet: everyone is rejected, the admin included.
    assert_eq!(
        dao.submit_energy_reading(&admin(), 100, 1, 150, 300),
        Err(DaoError::Unauthorized)
    );

    dao.set_oracle(&admin(), oracle()).unwrap();
    dao.submit_energy_reading(&oracle(), 100, 1, 150, 300).unwrap();
    assert_eq!(dao.energy_reading(1, 150), Some(300));

    // Overwrite wins; history is not kept.
    dao.submit_energy_reading(&oracle(), 120, 1, 150, 275).unwrap();
    assert_eq!(dao.energy_reading(1, 150), Some(275));

    // Unregistered grids are accepted on trust.
    dao.submit_energy_reading(&oracle(), 120, 777, 130, 50).unwrap();
    assert_eq!(dao.energy_reading(777, 130), Some(50));
}

#[test]
fn failed_operations_leave_no_trace_in_checkpoints() {
    let mut dao = MicrogridDao::new(admin());
    let mut store = InMemoryStore::new();

    dao.deposit_treasury(&alice(), 500).unwrap();
    store.save(&dao);

    // A rejected proposal must not perturb the state at all.
    let before = store.load().unwrap();
    assert_eq!(
        dao.create_proposal(&alice(), 10, 1, "No grid".to_string(), String::new(), 100),
        Err(DaoError::NotFound)
    );
    assert_eq!(dao, before);

    // A successful operation, checkpointed, survives a "restart".
    dao.register_microgrid(&alice(), 11, "Canyon Cooperative".to_string(), 80)
        .unwrap();
    store.save(&dao);
    drop(dao);

    let restored = store.load().unwrap();
    assert!(restored.grid(1).is_some());
    assert_eq!(restored.treasury_balance(&alice()), 500);
}

#[test]
fn state_survives_a_serde_round_trip() {
    let mut dao = MicrogridDao::with_config(
        admin(),
        GovernanceConfig {
            quorum_percent: 70,
            voting_duration: 100,
            execution_delay: 10,
        },
    );
    dao.set_oracle(&admin(), oracle()).unwrap();
    dao.deposit_treasury(&alice(), 9_000).unwrap();
    dao.register_microgrid(&alice(), 5, "Valley Floor Array".to_string(), 120)
        .unwrap();
    let id = dao
        .create_proposal(&alice(), 10, 1, "Meters".to_string(), String::new(), 750)
        .unwrap();
    dao.vote(&alice(), 15, id, VoteChoice::Yes, 2_000).unwrap();
    dao.submit_energy_reading(&oracle(), 20, 1, 25, 610).unwrap();

    let json = serde_json::to_string(&dao).unwrap();
    let restored: MicrogridDao = serde_json::from_str(&json).unwrap();
    assert_eq!(restored, dao);
    assert_eq!(restored.vote_of(id, &alice()).map(|v| v.weight), Some(2_000));
}
