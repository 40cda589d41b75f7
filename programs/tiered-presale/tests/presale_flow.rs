use std::collections::HashMap;

use anchor_lang::error::Error;
use anchor_lang::prelude::*;
use tiered_presale::claims::{self, FungibleLedger, StakeSink};
use tiered_presale::constants::WAD;
use tiered_presale::engine;
use tiered_presale::ledger::{self, OverallStats};
use tiered_presale::lifecycle;
use tiered_presale::pricing::{Payment, PriceSource};
use tiered_presale::state::{BuyerAccount, SaleState, StageParams, StageStatus};
use tiered_presale::PresaleError;

const NOW: i64 = 1_700_000_000;

#[derive(Default)]
struct Wallets(HashMap<Pubkey, u128>);

impl FungibleLedger for Wallets {
    fn credit(&mut self, beneficiary: Pubkey, amount: u128) -> Result<()> {
        *self.0.entry(beneficiary).or_default() += amount;
        Ok(())
    }
}

struct StakingPool {
    vault: Pubkey,
    stakes: HashMap<Pubkey, u128>,
}

impl StakingPool {
    fn new() -> Self {
        Self {
            vault: Pubkey::new_unique(),
            stakes: HashMap::new(),
        }
    }
}

impl StakeSink for StakingPool {
    fn destination(&self) -> Pubkey {
        self.vault
    }

    fn deposit(&mut self, beneficiary: Pubkey, amount: u128) -> Result<()> {
        *self.stakes.entry(beneficiary).or_default() += amount;
        Ok(())
    }
}

struct SolAt(u128);

impl PriceSource for SolAt {
    fn native_usd_price(&self) -> Result<u128> {
        Ok(self.0 * WAD)
    }
}

fn stage(milli_usd: u128, cap_whole: u128) -> StageParams {
    StageParams {
        usd_per_token: milli_usd * WAD / 1000,
        cap_tokens: cap_whole * WAD,
        max_usd_raise: 0,
        start_time: 0,
        end_time: 0,
        paused: false,
    }
}

fn new_sale(stages: &[StageParams]) -> SaleState {
    let mut sale = SaleState {
        admin: Pubkey::new_unique(),
        treasury: Pubkey::new_unique(),
        token_decimals: 9,
        stable_decimals: 6,
        min_purchase_usd: 50 * WAD,
        oracle_max_age_secs: 60,
        ..Default::default()
    };
    for params in stages {
        lifecycle::add_stage(&mut sale, *params).unwrap();
    }
    sale
}

fn new_buyer() -> BuyerAccount {
    BuyerAccount {
        owner: Pubkey::new_unique(),
        ..Default::default()
    }
}

fn usdt(dollars: u64) -> Payment {
    Payment::Stable(dollars * 1_000_000)
}

#[test]
fn split_purchase_reaches_next_open_stage() {
    let mut sale = new_sale(&[stage(1, 1_000_000), stage(2, 1_000_000)]);
    let mut buyer = new_buyer();

    let first = engine::buy(&mut sale, &mut buyer, usdt(900), false, None, NOW).unwrap();
    assert_eq!(first.tokens_total, 900_000 * WAD);
    assert_eq!(sale.stages[0].sold_tokens, 900_000 * WAD);
    assert_eq!(sale.stages[0].usd_raised, 900 * WAD);

    let second = engine::buy(&mut sale, &mut buyer, usdt(200), false, None, NOW).unwrap();
    assert_eq!(second.stage_indexes(), vec![0, 1]);
    assert_eq!(second.stage_tokens(), vec![100_000 * WAD, 50_000 * WAD]);
    assert_eq!(sale.stages[0].sold_tokens, sale.stages[0].cap_tokens);
    assert!(ledger::verify_conservation(&sale).is_ok());
}

#[test]
fn split_purchase_into_paused_stage_is_rejected_whole() {
    let mut sale = new_sale(&[stage(1, 1_000_000), stage(2, 1_000_000)]);
    let mut buyer = new_buyer();
    engine::buy(&mut sale, &mut buyer, usdt(900), false, None, NOW).unwrap();
    lifecycle::pause_stage(&mut sale, 1, true).unwrap();

    let err = engine::buy(&mut sale, &mut buyer, usdt(200), false, None, NOW).unwrap_err();

    assert_eq!(err, Error::from(PresaleError::StagePaused));
    assert_eq!(sale.stages[0].sold_tokens, 900_000 * WAD);
    assert_eq!(sale.stages[1].sold_tokens, 0);
    assert_eq!(sale.total_usd_raised, 900 * WAD);
    assert_eq!(buyer.purchased_unclaimed, 900_000 * WAD);
}

#[test]
fn claim_gate_and_missing_staking_manager_leave_balance() {
    let mut sale = new_sale(&[stage(1, 1_000_000)]);
    let mut buyer = new_buyer();
    engine::buy(&mut sale, &mut buyer, usdt(100), true, None, NOW).unwrap();
    let owed = buyer.purchased_unclaimed;
    let mut wallets = Wallets::default();

    assert_eq!(
        claims::claim(&mut sale, &mut buyer, false, &mut wallets, None).unwrap_err(),
        Error::from(PresaleError::ClaimDisabled)
    );
    assert_eq!(buyer.purchased_unclaimed, owed);

    lifecycle::toggle_claim(&mut sale, true);
    assert_eq!(
        claims::claim(&mut sale, &mut buyer, true, &mut wallets, None).unwrap_err(),
        Error::from(PresaleError::NoStakingManager)
    );
    assert_eq!(buyer.purchased_unclaimed, owed);
    assert!(wallets.0.is_empty());
}

#[test]
fn advance_and_rollover_guards() {
    let mut sale = new_sale(&[stage(1, 1_000_000), stage(2, 1_000_000)]);

    assert_eq!(
        lifecycle::manual_advance(&mut sale, 0, NOW).unwrap_err(),
        Error::from(PresaleError::SameStage)
    );
    assert_eq!(
        lifecycle::manual_advance(&mut sale, 1, NOW).unwrap_err(),
        Error::from(PresaleError::CurrentStageStillActive)
    );

    lifecycle::pause_stage(&mut sale, 0, true).unwrap();
    assert_eq!(
        lifecycle::early_end_and_rollover(&mut sale).unwrap_err(),
        Error::from(PresaleError::StagePaused)
    );

    lifecycle::pause_stage(&mut sale, 0, false).unwrap();
    let mut buyer = new_buyer();
    engine::buy(&mut sale, &mut buyer, usdt(1_000), false, None, NOW).unwrap();
    assert_eq!(
        lifecycle::early_end_and_rollover(&mut sale).unwrap_err(),
        Error::from(PresaleError::NothingToEnd)
    );

    // sold out, so a manual advance is now allowed
    assert_eq!(lifecycle::manual_advance(&mut sale, 1, NOW).unwrap(), 0);
    assert_eq!(sale.current_stage, 1);
}

#[test]
fn staking_requires_the_configured_vault() {
    let mut sale = new_sale(&[stage(1, 1_000_000)]);
    let mut buyer = new_buyer();
    engine::buy(&mut sale, &mut buyer, usdt(100), true, None, NOW).unwrap();
    lifecycle::toggle_claim(&mut sale, true);
    lifecycle::set_staking_manager(&mut sale, Some(Pubkey::new_unique()), Some(Pubkey::new_unique()))
        .unwrap();

    let mut pool = StakingPool::new();
    assert_eq!(
        claims::claim(&mut sale, &mut buyer, true, &mut Wallets::default(), Some(&mut pool))
            .unwrap_err(),
        Error::from(PresaleError::InvalidTokenAccount)
    );
    assert_eq!(buyer.purchased_unclaimed, 100_000 * WAD);
    assert!(pool.stakes.is_empty());
}

#[test]
fn token_mint_too_fine_for_stage_caps_is_refused() {
    let mut sale = new_sale(&[]);
    sale.token_decimals = 18;
    assert_eq!(
        lifecycle::add_stage(&mut sale, stage(1, 100)).unwrap_err(),
        Error::from(PresaleError::StageCapsExceedMintRange)
    );
    assert_eq!(sale.stages_count(), 0);
}

#[test]
fn pausing_twice_changes_nothing_else() {
    let mut sale = new_sale(&[stage(1, 1_000_000)]);
    lifecycle::pause_stage(&mut sale, 0, true).unwrap();
    let after_first = sale.stages.clone();
    lifecycle::pause_stage(&mut sale, 0, true).unwrap();
    assert_eq!(sale.stages, after_first);
    assert_eq!(sale.stages[0].status(NOW), StageStatus::Paused);
}

#[test]
fn full_sale_run() {
    let mut sale = new_sale(&[stage(1, 100_000), stage(2, 100_000), stage(5, 1_000_000)]);
    let manager = Pubkey::new_unique();
    let mut alice = new_buyer();
    let mut bob = new_buyer();

    // alice pays 1 SOL at $150 and fills stage 0 with $50 to spare
    let receipt = engine::buy(
        &mut sale,
        &mut alice,
        Payment::Native(1_000_000_000),
        false,
        Some(&SolAt(150)),
        NOW,
    )
    .unwrap();
    assert_eq!(receipt.stage_usd(), vec![100 * WAD, 50 * WAD]);
    assert_eq!(receipt.tokens_total, 125_000 * WAD);

    // stage 1 is cut short and bob lands in stage 2
    let rollover = lifecycle::cancel_current_stage_and_continue(&mut sale).unwrap();
    assert_eq!(rollover.sealed_stage, 0);
    assert_eq!(sale.current_stage, 1);
    let rollover = lifecycle::early_end_and_rollover(&mut sale).unwrap();
    assert_eq!(rollover.released_tokens, 75_000 * WAD);
    assert_eq!(sale.stages[1].cap_tokens, 25_000 * WAD);

    engine::buy(&mut sale, &mut bob, usdt(500), true, None, NOW).unwrap();
    assert_eq!(bob.purchased_unclaimed, 100_000 * WAD);
    assert!(bob.stake_preference);

    assert_eq!(
        ledger::overall_stats(&sale),
        OverallStats {
            total_tokens_sold: 225_000 * WAD,
            total_usd_raised: 650 * WAD,
            unique_buyers: 2,
        }
    );

    let mut wallets = Wallets::default();
    let mut pool = StakingPool::new();
    lifecycle::toggle_claim(&mut sale, true);
    lifecycle::set_staking_manager(&mut sale, Some(manager), Some(pool.vault)).unwrap();

    let direct = claims::claim(&mut sale, &mut alice, false, &mut wallets, None).unwrap();
    let staked = claims::claim(&mut sale, &mut bob, true, &mut wallets, Some(&mut pool)).unwrap();

    assert_eq!(wallets.0[&alice.owner], 125_000 * WAD);
    assert_eq!(pool.stakes[&bob.owner], 100_000 * WAD);
    assert_eq!(direct.units, 125_000_000_000_000);
    assert_eq!(staked.units, 100_000_000_000_000);
    assert_eq!(ledger::outstanding_liabilities(&sale).unwrap(), 0);
    assert!(ledger::verify_conservation(&sale).is_ok());

    // 300k tokens funded (9 decimals), everything sold has been claimed
    assert_eq!(
        ledger::rescuable_units(&sale, 300_000_000_000_000).unwrap(),
        300_000_000_000_000
    );
}
