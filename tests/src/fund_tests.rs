//! Contribution tests.

use fund_me_contracts::errors::FundMeError;
use fund_me_contracts::fund_me::{FundMe, FundMeInitArgs, Funded};
use fund_me_contracts::price_converter::{u256_to_u512, USD_SCALE};
use odra::casper_types::{U256, U512};
use odra::host::{Deployer, HostRef};
use odra::prelude::Addressable;
use pretty_assertions::assert_eq;

use crate::fixtures::*;

fn usd(whole: u64) -> U256 {
    U256::from(whole) * U256::from(USD_SCALE)
}

#[test]
fn test_constructor_sets_feed_and_owner() {
    let fixture = setup();

    assert_eq!(fixture.fund_me.get_price_feed(), fixture.feed.address().clone());
    assert_eq!(fixture.fund_me.get_owner(), fixture.owner);
    assert!(fixture.fund_me.is_owner(fixture.owner));
    assert!(!fixture.fund_me.is_owner(fixture.env.get_account(1)));
    assert_eq!(fixture.fund_me.get_minimum_usd(), usd(50));
    assert_eq!(fixture.fund_me.get_funders_count(), 0);
}

#[test]
fn test_fails_without_attached_value() {
    let mut fixture = setup();
    assert_eq!(
        fixture.fund_me.try_fund(),
        Err(FundMeError::InsufficientContribution.into())
    );
}

#[test]
fn test_one_cspr_accepted_one_thousandth_rejected() {
    let fixture = setup();
    let funder = fixture.env.get_account(1);

    // 1 CSPR at $2000 clears the $50 minimum
    fixture.fund_as(funder, cspr(1));
    assert_eq!(fixture.fund_me.get_address_to_amount_funded(funder), cspr_u256(1));

    // 0.001 CSPR is worth $2
    fixture.env.set_caller(funder);
    let result = fixture
        .fund_me
        .with_tokens(U512::from(ONE_CSPR / 1000))
        .try_fund();
    assert_eq!(result, Err(FundMeError::InsufficientContribution.into()));
    assert_eq!(fixture.fund_me.get_address_to_amount_funded(funder), cspr_u256(1));
}

#[test]
fn test_minimum_boundary() {
    let fixture = setup();
    let funder = fixture.env.get_account(1);

    // $50 / $2000 = 0.025 CSPR
    let exact_minimum = U512::from(ONE_CSPR / 40);
    fixture.env.set_caller(funder);
    let below = fixture
        .fund_me
        .with_tokens(exact_minimum - U512::one())
        .try_fund();
    assert_eq!(below, Err(FundMeError::InsufficientContribution.into()));

    fixture.fund_as(funder, exact_minimum);
    assert_eq!(fixture.fund_me.get_funders_count(), 1);
}

#[test]
fn test_updates_amount_funded() {
    let fixture = setup();
    fixture.fund_as(fixture.owner, cspr(1));

    assert_eq!(
        fixture.fund_me.get_address_to_amount_funded(fixture.owner),
        cspr_u256(1)
    );
    assert_eq!(fixture.fund_me.get_total_funded(), cspr_u256(1));

    assert!(fixture.env.emitted_event(
        &fixture.fund_me,
        Funded {
            funder: fixture.owner,
            amount: cspr_u256(1),
            usd_value: usd(2000),
        }
    ));
}

#[test]
fn test_adds_funder_to_list() {
    let fixture = setup();
    fixture.fund_as(fixture.owner, cspr(1));

    assert_eq!(fixture.fund_me.get_funder(0), fixture.owner);
    assert_eq!(fixture.fund_me.get_funders_count(), 1);
}

#[test]
fn test_repeat_funder_appended_per_contribution() {
    let fixture = setup();
    let funder = fixture.env.get_account(2);

    fixture.fund_as(funder, cspr(1));
    fixture.fund_as(funder, cspr(2));

    assert_eq!(fixture.fund_me.get_funders_count(), 2);
    assert_eq!(fixture.fund_me.get_funder(0), funder);
    assert_eq!(fixture.fund_me.get_funder(1), funder);
    assert_eq!(fixture.fund_me.get_address_to_amount_funded(funder), cspr_u256(3));
}

#[test]
fn test_rejected_contribution_changes_nothing() {
    let fixture = setup();
    let funder = fixture.env.get_account(1);
    fixture.fund_as(funder, cspr(1));

    let balance_before = fixture.contract_balance();
    let funder_balance_before = fixture.env.balance_of(&funder);

    fixture.env.set_caller(funder);
    let result = fixture.fund_me.with_tokens(U512::from(1_000u64)).try_fund();
    assert_eq!(result, Err(FundMeError::InsufficientContribution.into()));

    assert_eq!(fixture.contract_balance(), balance_before);
    assert_eq!(fixture.env.balance_of(&funder), funder_balance_before);
    assert_eq!(fixture.fund_me.get_funders_count(), 1);
    assert_eq!(fixture.fund_me.get_total_funded(), cspr_u256(1));
    assert_eq!(fixture.fund_me.get_address_to_amount_funded(funder), cspr_u256(1));
}

#[test]
fn test_balance_matches_ledger_sum() {
    let fixture = setup();
    let mut ledger_sum = U256::zero();

    for (i, whole) in (1..=4usize).zip([1u64, 3, 2, 5]) {
        let funder = fixture.env.get_account(i);
        fixture.fund_as(funder, cspr(whole));
        ledger_sum = ledger_sum + cspr_u256(whole);

        let summed: U256 = (1..=i)
            .map(|j| fixture.fund_me.get_address_to_amount_funded(fixture.env.get_account(j)))
            .fold(U256::zero(), |acc, amount| acc + amount);
        assert_eq!(summed, ledger_sum);
        assert_eq!(fixture.fund_me.get_total_funded(), ledger_sum);
        assert_eq!(fixture.contract_balance(), u256_to_u512(ledger_sum));
    }
}

#[test]
fn test_large_contribution_accepted() {
    let fixture = setup();
    let funder = fixture.env.get_account(3);

    fixture.fund_as(funder, cspr(9995));

    assert_eq!(fixture.fund_me.get_address_to_amount_funded(funder), cspr_u256(9995));
    assert_eq!(fixture.fund_me.get_conversion_rate(cspr_u256(9995)), usd(9995 * 2000));
}

#[test]
fn test_price_drop_raises_required_amount() {
    let mut fixture = setup();
    let funder = fixture.env.get_account(1);

    // $10 per CSPR
    fixture.feed.update_answer(U256::from(1_000_000_000u64));
    assert_eq!(fixture.fund_me.get_conversion_rate(cspr_u256(1)), usd(10));

    fixture.env.set_caller(funder);
    let result = fixture.fund_me.with_tokens(cspr(1)).try_fund();
    assert_eq!(result, Err(FundMeError::InsufficientContribution.into()));

    fixture.fund_as(funder, cspr(5));
    assert_eq!(fixture.fund_me.get_address_to_amount_funded(funder), cspr_u256(5));
}

#[test]
fn test_zero_price_rejects_contribution() {
    let mut fixture = setup();
    let funder = fixture.env.get_account(1);

    fixture.feed.update_answer(U256::zero());

    fixture.env.set_caller(funder);
    let result = fixture.fund_me.with_tokens(cspr(1)).try_fund();
    assert_eq!(result, Err(FundMeError::PriceUnavailable.into()));
    assert_eq!(fixture.fund_me.get_funders_count(), 0);
}

#[test]
fn test_unreachable_feed_rejects_contribution() {
    let env = odra_test::env();
    env.set_caller(env.get_account(0));

    // An account address has no feed entry points
    let fund_me = FundMe::deploy(
        &env,
        FundMeInitArgs {
            price_feed: env.get_account(5),
        },
    );
    let fund_me_address = fund_me.address().clone();

    let funder = env.get_account(1);
    let funder_balance_before = env.balance_of(&funder);

    env.set_caller(funder);
    let result = fund_me.with_tokens(cspr(1)).try_fund();
    assert!(result.is_err());

    assert_eq!(fund_me.get_funders_count(), 0);
    assert_eq!(fund_me.get_total_funded(), U256::zero());
    assert_eq!(fund_me.get_address_to_amount_funded(funder), U256::zero());
    assert_eq!(env.balance_of(&fund_me_address), U512::zero());
    assert_eq!(env.balance_of(&funder), funder_balance_before);
}
