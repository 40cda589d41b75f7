use anchor_lang::prelude::*;

use crate::engine::PurchaseReceipt;
use crate::events::{TokensBoughtAndStakedSplit, TokensBoughtSplit};
use crate::state::BuyerAccount;

/// Binds a freshly created buyer account to its owner. No-op afterwards.
pub fn open_buyer_account(account: &mut BuyerAccount, owner: Pubkey, bump: u8) {
    if account.owner == Pubkey::default() {
        account.owner = owner;
        account.bump = bump;
    }
}

/// Emits the split-purchase record for a committed purchase.
pub fn emit_purchase(
    buyer: Pubkey,
    payment_mint: Pubkey,
    payment_amount: u64,
    receipt: &PurchaseReceipt,
    want_stake: bool,
) {
    msg!(
        "Purchase: {} usd -> {} tokens over {} stage(s)",
        receipt.usd_total,
        receipt.tokens_total,
        receipt.fills.len()
    );
    if want_stake {
        emit!(TokensBoughtAndStakedSplit {
            buyer,
            payment_mint,
            payment_amount,
            usd_total: receipt.usd_total,
            tokens_total: receipt.tokens_total,
            stage_indexes: receipt.stage_indexes(),
            stage_usd: receipt.stage_usd(),
            stage_tokens: receipt.stage_tokens(),
        });
    } else {
        emit!(TokensBoughtSplit {
            buyer,
            payment_mint,
            payment_amount,
            usd_total: receipt.usd_total,
            tokens_total: receipt.tokens_total,
            stage_indexes: receipt.stage_indexes(),
            stage_usd: receipt.stage_usd(),
            stage_tokens: receipt.stage_tokens(),
        });
    }
}
