use anchor_lang::prelude::*;

use crate::errors::PresaleError;

/// One pricing/capacity tier of the sale.
///
/// All amounts are 18-decimal fixed point. A zero `start_time` or `end_time`
/// leaves that side of the window unbounded, and a zero `max_usd_raise`
/// means the stage has no USD ceiling.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Stage {
    /// USD price of one whole token
    pub usd_per_token: u128,
    /// Maximum tokens sellable in this stage
    pub cap_tokens: u128,
    /// Tokens sold so far, never above `cap_tokens`
    pub sold_tokens: u128,
    /// USD raised so far
    pub usd_raised: u128,
    /// Optional USD ceiling (0 = unlimited)
    pub max_usd_raise: u128,
    pub start_time: i64,
    pub end_time: i64,
    pub paused: bool,
}

impl Stage {
    // usd_per_token(16) + cap_tokens(16) + sold_tokens(16) + usd_raised(16)
    // + max_usd_raise(16) + start_time(8) + end_time(8) + paused(1)
    pub const LEN: usize = 16 + 16 + 16 + 16 + 16 + 8 + 8 + 1;

    pub fn remaining_tokens(&self) -> u128 {
        self.cap_tokens.saturating_sub(self.sold_tokens)
    }

    /// USD still accepted before the stage's USD ceiling, `None` when uncapped.
    pub fn remaining_usd_cap(&self) -> Option<u128> {
        if self.max_usd_raise == 0 {
            None
        } else {
            Some(self.max_usd_raise.saturating_sub(self.usd_raised))
        }
    }

    pub fn is_sold_out(&self) -> bool {
        self.sold_tokens >= self.cap_tokens
    }

    pub fn is_usd_capped(&self) -> bool {
        self.max_usd_raise != 0 && self.usd_raised >= self.max_usd_raise
    }

    pub fn has_started(&self, now: i64) -> bool {
        now >= self.start_time
    }

    pub fn is_expired(&self, now: i64) -> bool {
        self.end_time != 0 && now >= self.end_time
    }

    /// Capacity is exhausted by tokens or by the USD ceiling.
    pub fn is_exhausted(&self) -> bool {
        self.is_sold_out() || self.is_usd_capped()
    }

    /// A stage is still fillable until it sells out, expires or hits its USD cap.
    /// Pausing does not end a stage.
    pub fn is_fillable(&self, now: i64) -> bool {
        !(self.is_exhausted() || self.is_expired(now))
    }

    pub fn status(&self, now: i64) -> StageStatus {
        if self.paused {
            StageStatus::Paused
        } else if !self.has_started(now) {
            StageStatus::NotStarted
        } else if self.is_expired(now) {
            StageStatus::Expired
        } else if self.is_sold_out() {
            StageStatus::SoldOut
        } else if self.is_usd_capped() {
            StageStatus::UsdCapped
        } else {
            StageStatus::Active
        }
    }

    /// Rejects purchases against this stage with the reason it is blocked.
    pub fn ensure_open(&self, now: i64) -> Result<()> {
        match self.status(now) {
            StageStatus::Active => Ok(()),
            StageStatus::Paused => err!(PresaleError::StagePaused),
            StageStatus::NotStarted => err!(PresaleError::StageNotStarted),
            StageStatus::Expired => err!(PresaleError::StageExpired),
            StageStatus::SoldOut => err!(PresaleError::StageSoldOut),
            StageStatus::UsdCapped => err!(PresaleError::StageUsdCapped),
        }
    }

    /// Clamps the cap to what has been sold. Returns the capacity released.
    pub fn seal(&mut self) -> u128 {
        let released = self.remaining_tokens();
        self.cap_tokens = self.sold_tokens;
        released
    }
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum StageStatus {
    Active,
    Paused,
    NotStarted,
    Expired,
    SoldOut,
    UsdCapped,
}

/// Owner-supplied definition of a new stage.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct StageParams {
    pub usd_per_token: u128,
    pub cap_tokens: u128,
    pub max_usd_raise: u128,
    pub start_time: i64,
    pub end_time: i64,
    pub paused: bool,
}

impl StageParams {
    pub fn validate(&self) -> Result<()> {
        require!(self.usd_per_token > 0, PresaleError::InvalidStagePrice);
        require!(self.cap_tokens > 0, PresaleError::InvalidStageCap);
        require!(
            self.end_time == 0 || self.end_time > self.start_time,
            PresaleError::InvalidStageWindow
        );
        Ok(())
    }

    pub fn into_stage(self) -> Stage {
        Stage {
            usd_per_token: self.usd_per_token,
            cap_tokens: self.cap_tokens,
            sold_tokens: 0,
            usd_raised: 0,
            max_usd_raise: self.max_usd_raise,
            start_time: self.start_time,
            end_time: self.end_time,
            paused: self.paused,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::WAD;
    use anchor_lang::error::Error;

    fn stage() -> Stage {
        Stage {
            usd_per_token: WAD / 1000,
            cap_tokens: 1_000_000 * WAD,
            max_usd_raise: 0,
            start_time: 100,
            end_time: 200,
            ..Default::default()
        }
    }

    #[test]
    fn status_follows_label_precedence() {
        let mut s = stage();
        assert_eq!(s.status(150), StageStatus::Active);
        assert_eq!(s.status(99), StageStatus::NotStarted);
        assert_eq!(s.status(200), StageStatus::Expired);

        s.sold_tokens = s.cap_tokens;
        assert_eq!(s.status(150), StageStatus::SoldOut);

        s.paused = true;
        assert_eq!(s.status(150), StageStatus::Paused);
        assert_eq!(s.status(300), StageStatus::Paused);
    }

    #[test]
    fn zero_window_bounds_are_unbounded() {
        let s = Stage {
            start_time: 0,
            end_time: 0,
            ..stage()
        };
        assert_eq!(s.status(0), StageStatus::Active);
        assert_eq!(s.status(i64::MAX), StageStatus::Active);
    }

    #[test]
    fn usd_cap_blocks_only_when_set() {
        let mut s = stage();
        s.usd_raised = 10_000 * WAD;
        assert_eq!(s.remaining_usd_cap(), None);
        assert!(!s.is_usd_capped());

        s.max_usd_raise = 10_000 * WAD;
        assert_eq!(s.remaining_usd_cap(), Some(0));
        assert_eq!(s.status(150), StageStatus::UsdCapped);
        assert_eq!(
            s.ensure_open(150).unwrap_err(),
            Error::from(PresaleError::StageUsdCapped)
        );
    }

    #[test]
    fn seal_clamps_cap_to_sold() {
        let mut s = stage();
        s.sold_tokens = 400 * WAD;
        let released = s.seal();
        assert_eq!(released, (1_000_000 - 400) * WAD);
        assert_eq!(s.cap_tokens, 400 * WAD);
        assert!(s.is_sold_out());
        assert_eq!(s.remaining_tokens(), 0);
    }

    #[test]
    fn paused_stage_is_still_fillable() {
        let mut s = stage();
        s.paused = true;
        assert!(s.is_fillable(150));
        assert!(!s.is_fillable(250));
    }

    #[test]
    fn params_validation() {
        let ok = StageParams {
            usd_per_token: WAD,
            cap_tokens: WAD,
            max_usd_raise: 0,
            start_time: 10,
            end_time: 0,
            paused: false,
        };
        assert!(ok.validate().is_ok());

        let zero_price = StageParams { usd_per_token: 0, ..ok };
        assert_eq!(
            zero_price.validate().unwrap_err(),
            Error::from(PresaleError::InvalidStagePrice)
        );

        let zero_cap = StageParams { cap_tokens: 0, ..ok };
        assert_eq!(
            zero_cap.validate().unwrap_err(),
            Error::from(PresaleError::InvalidStageCap)
        );

        let inverted = StageParams { end_time: 10, ..ok };
        assert_eq!(
            inverted.validate().unwrap_err(),
            Error::from(PresaleError::InvalidStageWindow)
        );
    }
}
