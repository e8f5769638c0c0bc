//! End-to-end governance scenarios: reputation seeding, proposal creation and
//! weighted voting against a caller-supplied block height.

use std::sync::Arc;

use rbg_governance::{GovernanceEngine, GovernanceError, ProposalStatus, SharedGovernance};
use rbg_nullables::{NullChain, NullProposalStore, NullReputationStore};
use rbg_store::ReputationStore;
use rbg_types::{BlockHeight, ProposalId, UserId};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn member(n: u8) -> UserId {
    UserId::new(format!("wallet_{n}"))
}

fn setup() -> (
    Arc<NullReputationStore>,
    GovernanceEngine<Arc<NullReputationStore>>,
    NullChain,
) {
    let store = Arc::new(NullReputationStore::new());
    let engine = GovernanceEngine::new(Arc::clone(&store));
    (store, engine, NullChain::new(5))
}

// ---------------------------------------------------------------------------
// Scenarios
// ---------------------------------------------------------------------------

#[test]
fn reputation_seed_create_and_vote() {
    let (store, mut engine, chain) = setup();
    let a = member(1);
    let b = member(2);

    store.initialize_reputation(&a).unwrap();
    assert_eq!(store.get_reputation(&a), 100);

    let id = engine.create_proposal(&a, "T", chain.height()).unwrap();
    assert_eq!(id, ProposalId::new(1));
    assert_eq!(engine.proposal(id).unwrap().end_block, BlockHeight::new(15));

    engine.vote(&a, id, true, chain.height()).unwrap();
    assert_eq!(engine.proposal(id).unwrap().votes_for, 100);

    let err = engine.vote(&b, id, true, chain.height()).unwrap_err();
    assert!(matches!(err, GovernanceError::NoReputation(_)));
    assert_eq!(engine.proposal(id).unwrap().votes_for, 100);
}

#[test]
fn deactivated_proposal_rejects_votes_before_end_block() {
    let (store, mut engine, chain) = setup();
    let a = member(1);
    store.initialize_reputation(&a).unwrap();
    let id = engine.create_proposal(&a, "T", chain.height()).unwrap();

    engine.deactivate_proposal(id).unwrap();
    chain.advance(1);
    assert!(chain.height() < engine.proposal(id).unwrap().end_block);

    let err = engine.vote(&a, id, true, chain.height()).unwrap_err();
    assert!(matches!(err, GovernanceError::ProposalNotActive(_)));
}

#[test]
fn expired_proposal_rejects_votes_while_still_active() {
    let (store, mut engine, chain) = setup();
    let a = member(1);
    store.initialize_reputation(&a).unwrap();
    let id = engine.create_proposal(&a, "T", chain.height()).unwrap();

    chain.advance(10);
    let err = engine.vote(&a, id, true, chain.height()).unwrap_err();
    assert!(matches!(err, GovernanceError::ProposalExpired { .. }));
    assert_eq!(engine.proposal(id).unwrap().status, ProposalStatus::Active);
}

#[test]
fn window_is_ten_blocks_from_creation() {
    let (store, mut engine, chain) = setup();
    let a = member(1);
    store.initialize_reputation(&a).unwrap();
    let id = engine.create_proposal(&a, "T", chain.height()).unwrap();

    for _ in 0..10 {
        engine.vote(&a, id, false, chain.height()).unwrap();
        chain.advance(1);
    }
    assert!(engine.vote(&a, id, false, chain.height()).is_err());
    assert_eq!(engine.proposal(id).unwrap().votes_against, 1_000);
}

#[test]
fn failed_operations_leave_state_untouched() {
    let (store, mut engine, chain) = setup();
    let a = member(1);
    store.initialize_reputation(&a).unwrap();
    let id = engine.create_proposal(&a, "T", chain.height()).unwrap();
    let before = engine.snapshot();

    let _ = engine.create_proposal(&member(9), "spam", chain.height());
    let _ = engine.vote(&member(9), id, true, chain.height());
    let _ = engine.vote(&a, ProposalId::new(99), true, chain.height());
    let _ = engine.vote(&a, id, true, BlockHeight::new(1_000));
    let _ = engine.deactivate_proposal(ProposalId::new(99));

    assert_eq!(engine.snapshot(), before);
}

#[test]
fn reputation_loss_blocks_creation_but_not_voting() {
    let (store, mut engine, chain) = setup();
    let a = member(1);
    store.initialize_reputation(&a).unwrap();
    let id = engine.create_proposal(&a, "T", chain.height()).unwrap();

    store.adjust_reputation(&a, -40).unwrap();
    assert!(matches!(
        engine.create_proposal(&a, "again", chain.height()),
        Err(GovernanceError::InsufficientReputation { have: 60, need: 100 })
    ));
    engine.vote(&a, id, true, chain.height()).unwrap();
    assert_eq!(engine.proposal(id).unwrap().votes_for, 60);

    store.initialize_reputation(&a).unwrap();
    assert!(engine.create_proposal(&a, "again", chain.height()).is_ok());
}

#[test]
fn shared_engine_survives_persist_and_restore() {
    let store = Arc::new(NullReputationStore::new());
    let a = member(1);
    store.initialize_reputation(&a).unwrap();
    let shared = SharedGovernance::new(GovernanceEngine::new(Arc::clone(&store)));
    let id = shared.create_proposal(&a, "T", BlockHeight::new(0)).unwrap();
    shared.vote(&a, id, true, BlockHeight::new(2)).unwrap();

    let proposals = NullProposalStore::new();
    shared
        .with_engine(|engine| engine.persist_to(&proposals))
        .unwrap();

    let mut restored = GovernanceEngine::restore_from(&proposals, Arc::clone(&store)).unwrap();
    assert_eq!(restored.proposal(id).unwrap().votes_for, 100);
    assert_eq!(
        restored.create_proposal(&a, "next", BlockHeight::new(3)).unwrap(),
        ProposalId::new(2)
    );
}
