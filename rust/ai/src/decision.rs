//! Rule-based action choice for AI seats.

use holdem_engine::logger::GameStage;
use holdem_engine::player::{ActionType, Player};
use holdem_engine::snapshot::TableView;
use rand::Rng;
use tracing::debug;

use crate::profile::Profile;
use crate::strength::evaluate_hand_strength;

/// Chooses an action for `player` from the public table state.
///
/// The amount is only meaningful for calls and raises: for a raise it is the
/// chips to put in, for a short call it is the whole stack. Folded or all-in
/// seats get `(Check, 0)` as a no-op.
///
/// # Example
///
/// ```rust
/// use holdem_ai::decide_action;
/// use holdem_engine::config::RoomConfig;
/// use holdem_engine::player::{ActionType, Personality};
/// use holdem_engine::room::GameRoom;
/// use rand::SeedableRng;
/// use rand::rngs::StdRng;
///
/// let mut room = GameRoom::new(RoomConfig { seed: Some(1), ..RoomConfig::default() });
/// room.add_ai_player("bot1", "Bot 1", Personality::Tight).unwrap();
/// room.add_ai_player("bot2", "Bot 2", Personality::Loose).unwrap();
/// room.start_game().unwrap();
///
/// let mut rng = StdRng::seed_from_u64(3);
/// let player = room.current_player().unwrap();
/// let (action, _amount) = decide_action(player, &room.table_view(), &mut rng);
/// assert_ne!(action, ActionType::Check); // the small blind owes chips
/// ```
pub fn decide_action<R: Rng + ?Sized>(
    player: &Player,
    view: &TableView<'_>,
    rng: &mut R,
) -> (ActionType, u32) {
    if player.is_folded() || player.is_all_in() {
        return (ActionType::Check, 0);
    }

    let profile = Profile::for_controller(player.controller());
    let strength = evaluate_hand_strength(player.hole_cards(), view.community);
    let chips = player.chips();
    let call_amount = view.current_bet.saturating_sub(player.bet());

    let decision = if call_amount == 0 {
        if should_raise(&profile, strength, view.stage, rng) {
            (
                ActionType::Raise,
                calculate_raise_amount(&profile, strength, view.pot, chips, view.stage),
            )
        } else {
            (ActionType::Check, 0)
        }
    } else if call_amount > chips {
        if strength >= profile.tightness * 0.5 {
            (ActionType::Call, chips)
        } else {
            (ActionType::Fold, 0)
        }
    } else {
        facing_bet(&profile, strength, call_amount, chips, view, rng)
    };

    debug!(
        player_id = %player.id(),
        strength,
        call_amount,
        action = %decision.0,
        amount = decision.1,
        "AI decision"
    );
    decision
}

fn facing_bet<R: Rng + ?Sized>(
    profile: &Profile,
    strength: f64,
    call_amount: u32,
    chips: u32,
    view: &TableView<'_>,
    rng: &mut R,
) -> (ActionType, u32) {
    let pot_odds = f64::from(call_amount) / (f64::from(view.pot) + f64::from(call_amount));
    let bluff = if rng.random_bool(profile.bluff_frequency) {
        0.2
    } else {
        0.0
    };
    let adjusted = strength + bluff;

    if adjusted < profile.tightness * 0.4 {
        return (ActionType::Fold, 0);
    }
    if adjusted < pot_odds {
        return if rng.random_bool(0.3) {
            (ActionType::Call, call_amount)
        } else {
            (ActionType::Fold, 0)
        };
    }
    if adjusted >= profile.tightness * 0.7 && should_raise(profile, adjusted, view.stage, rng) {
        return (
            ActionType::Raise,
            calculate_raise_amount(profile, adjusted, view.pot, chips, view.stage),
        );
    }
    (ActionType::Call, call_amount)
}

/// Stage threshold for raising, eased by aggression.
pub fn raise_threshold(profile: &Profile, stage: GameStage) -> f64 {
    let base = match stage {
        GameStage::Flop => 0.65,
        GameStage::River => 0.75,
        _ => 0.70,
    };
    base * (1.0 - profile.aggression * 0.3)
}

/// Raises only when strength clears the stage threshold and a draw with
/// probability `aggression` succeeds.
pub fn should_raise<R: Rng + ?Sized>(
    profile: &Profile,
    strength: f64,
    stage: GameStage,
    rng: &mut R,
) -> bool {
    strength >= raise_threshold(profile, stage) && rng.random_bool(profile.aggression)
}

/// `pot * (0.5 + strength)`, halved preflop, x1.2 on the river, scaled by
/// `0.5 + aggression`, then held to `[pot * 0.3, min(chips, pot * 2)]`.
pub fn calculate_raise_amount(
    profile: &Profile,
    strength: f64,
    pot: u32,
    chips: u32,
    stage: GameStage,
) -> u32 {
    let pot = f64::from(pot);
    let mut amount = pot * (0.5 + strength);
    match stage {
        GameStage::Preflop => amount *= 0.5,
        GameStage::River => amount *= 1.2,
        _ => {}
    }
    amount *= 0.5 + profile.aggression;

    let floor = pot * 0.3;
    let ceiling = f64::from(chips).min(pot * 2.0);
    amount.max(floor).min(ceiling) as u32
}
