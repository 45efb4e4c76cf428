use crate::errors::GameError;
use crate::player::ActionType as A;

/// Table-level betting state an action is validated against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BettingContext {
    /// Highest total bet on the current street.
    pub current_bet: u32,
    /// Last legal raise increment on this street.
    pub min_raise: u32,
    pub big_blind: u32,
}

impl BettingContext {
    /// Smallest increment a non-all-in raise must add on top of a call.
    pub fn min_increment(&self) -> u32 {
        self.min_raise.max(self.big_blind)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidatedAction {
    Fold,
    Check,
    /// Chips to move in; less than owed when the stack is short.
    Call(u32),
    /// `total` chips go in this action; `increment` is `total` minus the
    /// amount owed and is negative for an all-in short of a call.
    Raise { total: u32, increment: i64 },
}

/// Validates an action for a seat holding `chips` with `bet` already in
/// front of it this street.
///
/// For a raise, `amount` is the number of chips the player puts in with
/// this action (call part included). An amount at or above the stack is an
/// all-in and always legal; anything smaller must add at least
/// [`BettingContext::min_increment`] over the call.
///
/// # Errors
///
/// - [`GameError::CannotCheck`] when checking while chips are owed
/// - [`GameError::RaiseTooSmall`] for an under-minimum, non-all-in raise
///
/// # Examples
///
/// ```
/// use holdem_engine::player::ActionType;
/// use holdem_engine::rules::{validate_action, BettingContext, ValidatedAction};
///
/// let ctx = BettingContext { current_bet: 20, min_raise: 20, big_blind: 20 };
///
/// // Calling 20 from a 1000 stack
/// let v = validate_action(1000, 0, &ctx, ActionType::Call, 0);
/// assert_eq!(v, Ok(ValidatedAction::Call(20)));
///
/// // Raise to 60 total: 20 to call plus a 40 increment
/// let v = validate_action(1000, 0, &ctx, ActionType::Raise, 60);
/// assert_eq!(v, Ok(ValidatedAction::Raise { total: 60, increment: 40 }));
/// ```
///
/// ```
/// use holdem_engine::errors::GameError;
/// use holdem_engine::player::ActionType;
/// use holdem_engine::rules::{validate_action, BettingContext};
///
/// let ctx = BettingContext { current_bet: 20, min_raise: 20, big_blind: 20 };
///
/// // Check while owing 20
/// let v = validate_action(1000, 0, &ctx, ActionType::Check, 0);
/// assert!(matches!(v, Err(GameError::CannotCheck { to_call: 20 })));
///
/// // Increment of 10 is under the 20 minimum
/// let v = validate_action(1000, 0, &ctx, ActionType::Raise, 30);
/// assert!(matches!(v, Err(GameError::RaiseTooSmall { .. })));
/// ```
pub fn validate_action(
    chips: u32,
    bet: u32,
    ctx: &BettingContext,
    action: A,
    amount: u32,
) -> Result<ValidatedAction, GameError> {
    let to_call = ctx.current_bet.saturating_sub(bet);
    match action {
        A::Fold => Ok(ValidatedAction::Fold),
        A::Check => {
            if to_call == 0 {
                Ok(ValidatedAction::Check)
            } else {
                Err(GameError::CannotCheck { to_call })
            }
        }
        A::Call => Ok(ValidatedAction::Call(to_call.min(chips))),
        A::Raise => {
            let total = amount.min(chips);
            let increment = i64::from(total) - i64::from(to_call);
            let minimum = ctx.min_increment();
            if total < chips && increment < i64::from(minimum) {
                Err(GameError::RaiseTooSmall { increment, minimum })
            } else {
                Ok(ValidatedAction::Raise { total, increment })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CTX: BettingContext = BettingContext {
        current_bet: 100,
        min_raise: 60,
        big_blind: 20,
    };

    #[test]
    fn short_call_takes_whole_stack() {
        assert_eq!(
            validate_action(70, 0, &CTX, A::Call, 0),
            Ok(ValidatedAction::Call(70))
        );
    }

    #[test]
    fn check_is_legal_once_matched() {
        assert_eq!(
            validate_action(500, 100, &CTX, A::Check, 0),
            Ok(ValidatedAction::Check)
        );
    }

    #[test]
    fn min_raise_dominates_big_blind() {
        // owes 100, increment 50 < 60
        assert!(validate_action(1000, 0, &CTX, A::Raise, 150).is_err());
        assert_eq!(
            validate_action(1000, 0, &CTX, A::Raise, 160),
            Ok(ValidatedAction::Raise {
                total: 160,
                increment: 60
            })
        );
    }

    #[test]
    fn all_in_below_minimum_is_accepted() {
        assert_eq!(
            validate_action(80, 0, &CTX, A::Raise, 500),
            Ok(ValidatedAction::Raise {
                total: 80,
                increment: -20
            })
        );
    }
}
