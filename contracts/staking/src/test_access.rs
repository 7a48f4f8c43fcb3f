extern crate std;

use common::Role;
use soroban_sdk::testutils::Events;
use soroban_sdk::{
    symbol_short, testutils::Address as _, token::StellarAssetClient, Address, Env, IntoVal,
};

use crate::{ContractError, TieredStakingContract, TieredStakingContractClient};

// ── Test helpers ─────────────────────────────────────────────────────────────

fn setup() -> (Env, TieredStakingContractClient<'static>, Address) {
    let env = Env::default();
    env.mock_all_auths();

    let token = env.register_stellar_asset_contract_v2(Address::generate(&env));

    let contract_id = env.register(TieredStakingContract, ());
    let client = TieredStakingContractClient::new(&env, &contract_id);

    let admin = Address::generate(&env);
    client.initialize(&admin, &token.address(), &Address::generate(&env));

    StellarAssetClient::new(&env, &token.address()).mint(&contract_id, &1_000_000_000i128);

    (env, client, admin)
}

// ── Admin bootstrapped on initialize ─────────────────────────────────────────

#[test]
fn test_admin_holds_role_after_init() {
    let (env, client, admin) = setup();
    assert!(client.has_role(&Role::Admin, &admin));
    assert!(!client.has_role(&Role::Admin, &Address::generate(&env)));

    let members = client.get_role_members(&Role::Admin);
    assert_eq!(members.len(), 1);
    assert_eq!(members.get(0), Some(admin));
}

// ── Grant ────────────────────────────────────────────────────────────────────

#[test]
fn test_admin_grants_admin() {
    let (env, client, admin) = setup();
    let second = Address::generate(&env);

    client.grant_role(&admin, &Role::Admin, &second);

    assert!(client.has_role(&Role::Admin, &second));
    assert_eq!(client.get_role_members(&Role::Admin).len(), 2);

    // The new admin can use admin entry points.
    client.change_rate(&second, &0, &14_000);
    assert_eq!(client.get_reward_rates().get(0), Some(14_000));
}

#[test]
fn test_granting_twice_keeps_single_membership() {
    let (env, client, admin) = setup();
    let second = Address::generate(&env);

    client.grant_role(&admin, &Role::Admin, &second);
    client.grant_role(&admin, &Role::Admin, &second);

    assert_eq!(client.get_role_members(&Role::Admin).len(), 2);
}

#[test]
fn test_non_admin_cannot_grant() {
    let (env, client, _admin) = setup();
    let outsider = Address::generate(&env);

    let result = client.try_grant_role(&outsider, &Role::Admin, &outsider);
    match result {
        Err(Ok(e)) => assert_eq!(e, ContractError::Unauthorized),
        _ => unreachable!("Expected Unauthorized error"),
    }
    assert!(!client.has_role(&Role::Admin, &outsider));
}

// ── Revoke ───────────────────────────────────────────────────────────────────

#[test]
fn test_admin_revokes_admin() {
    let (env, client, admin) = setup();
    let second = Address::generate(&env);
    client.grant_role(&admin, &Role::Admin, &second);

    client.revoke_role(&admin, &Role::Admin, &second);

    assert!(!client.has_role(&Role::Admin, &second));
    let members = client.get_role_members(&Role::Admin);
    assert_eq!(members.len(), 1);
    assert_eq!(members.get(0), Some(admin));

    let result = client.try_change_rate(&second, &0, &14_000);
    match result {
        Err(Ok(e)) => assert_eq!(e, ContractError::Unauthorized),
        _ => unreachable!("Expected Unauthorized error"),
    }
}

#[test]
fn test_revoke_publishes_event_only_when_role_was_held() {
    let (env, client, admin) = setup();
    let second = Address::generate(&env);
    client.grant_role(&admin, &Role::Admin, &second);

    client.revoke_role(&admin, &Role::Admin, &second);
    let all = env.events().all();
    let events = all.events();
    assert!(!events.is_empty());
    let event = events.last().unwrap();
    let soroban_sdk::xdr::ContractEventBody::V0(body) = &event.body;
    let expected_topics: soroban_sdk::Vec<soroban_sdk::Val> =
        (symbol_short!("ROLE_RVK"), second.clone()).into_val(&env);
    let mut topics = soroban_sdk::Vec::<soroban_sdk::Val>::new(&env);
    for t in body.topics.iter() {
        topics.push_back(soroban_sdk::TryFromVal::try_from_val(&env, t).unwrap());
    }
    assert_eq!(topics, expected_topics);

    // Already gone: the call succeeds but nothing changed, so nothing is published.
    client.revoke_role(&admin, &Role::Admin, &second);
    assert!(env.events().all().events().is_empty());
    assert_eq!(client.get_role_members(&Role::Admin).len(), 1);
}

#[test]
fn test_non_admin_cannot_revoke() {
    let (env, client, admin) = setup();
    let outsider = Address::generate(&env);

    let result = client.try_revoke_role(&outsider, &Role::Admin, &admin);
    match result {
        Err(Ok(e)) => assert_eq!(e, ContractError::Unauthorized),
        _ => unreachable!("Expected Unauthorized error"),
    }
    assert!(client.has_role(&Role::Admin, &admin));
}

// ── Renounce ─────────────────────────────────────────────────────────────────

#[test]
fn test_admin_renounces_own_role() {
    let (env, client, admin) = setup();
    let second = Address::generate(&env);
    client.grant_role(&admin, &Role::Admin, &second);

    client.renounce_role(&admin, &Role::Admin);

    assert!(!client.has_role(&Role::Admin, &admin));
    assert!(client.has_role(&Role::Admin, &second));

    let result = client.try_transfer_all_tokens(&admin);
    match result {
        Err(Ok(e)) => assert_eq!(e, ContractError::Unauthorized),
        _ => unreachable!("Expected Unauthorized error"),
    }
}

#[test]
fn test_renounce_without_role_fails() {
    let (env, client, _admin) = setup();
    let outsider = Address::generate(&env);

    let result = client.try_renounce_role(&outsider, &Role::Admin);
    match result {
        Err(Ok(e)) => assert_eq!(e, ContractError::Unauthorized),
        _ => unreachable!("Expected Unauthorized error"),
    }
}

// ── Admin-only entry points ──────────────────────────────────────────────────

#[test]
fn test_non_admin_cannot_set_treasury() {
    let (env, client, _admin) = setup();
    let outsider = Address::generate(&env);

    let result = client.try_set_treasury(&outsider, &outsider);
    match result {
        Err(Ok(e)) => assert_eq!(e, ContractError::Unauthorized),
        _ => unreachable!("Expected Unauthorized error"),
    }
}

#[test]
fn test_rejected_admin_call_leaves_rates_untouched() {
    let (env, client, _admin) = setup();
    let before = client.get_reward_rates();

    let _ = client.try_change_rate(&Address::generate(&env), &2, &99_999);
    let _ = client.try_add_rank(&Address::generate(&env), &0, &i128::MAX, &1_000, &99_999);

    assert_eq!(client.get_reward_rates(), before);
    assert_eq!(client.get_new_reward_rates().len(), 0);
}
