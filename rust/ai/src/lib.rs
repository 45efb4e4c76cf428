//! # holdem-ai: Computer Opponents for holdem-engine
//!
//! Rule-based decision making for AI seats. Each seat's
//! [`Personality`](holdem_engine::player::Personality) maps to a [`Profile`]
//! of aggression, tightness and bluff frequency; decisions combine that
//! profile with a 0..=1 hand strength score and the public table state.
//!
//! ## Core Components
//!
//! - [`decide_action`] - Pick an action and amount for a seat
//! - [`evaluate_hand_strength`] - Score hole cards (plus board) on 0..=1
//! - [`act_for_current_seat`] - Decide for the seat on the clock and submit it
//!
//! Randomness is always passed in, so a seeded RNG replays the same choices.
//!
//! ## Quick Start
//!
//! ```rust
//! use holdem_ai::act_for_current_seat;
//! use holdem_engine::config::RoomConfig;
//! use holdem_engine::player::Personality;
//! use holdem_engine::room::GameRoom;
//! use rand::SeedableRng;
//! use rand::rngs::StdRng;
//!
//! let mut room = GameRoom::new(RoomConfig { seed: Some(42), ..RoomConfig::default() });
//! room.add_ai_player("bot1", "Bot 1", Personality::Balanced).unwrap();
//! room.add_ai_player("bot2", "Bot 2", Personality::Passive).unwrap();
//! room.start_game().unwrap();
//!
//! let mut rng = StdRng::seed_from_u64(7);
//! let outcome = act_for_current_seat(&mut room, &mut rng).expect("AI seat on the clock");
//! assert!(outcome.is_accepted());
//! ```

use holdem_engine::player::ActionType;
use holdem_engine::room::{ActionOutcome, GameRoom};
use rand::Rng;
use tracing::debug;

pub mod decision;
pub mod profile;
pub mod strength;

pub use decision::{calculate_raise_amount, decide_action, should_raise};
pub use profile::Profile;
pub use strength::evaluate_hand_strength;

/// Decides for the AI seat whose turn it is and submits the action.
///
/// A raise below the legal minimum is lifted to the minimum. If the room
/// still refuses the action, the seat calls when it owes chips and checks
/// otherwise. Returns `None` when no AI seat is on the clock.
pub fn act_for_current_seat<R: Rng + ?Sized>(
    room: &mut GameRoom,
    rng: &mut R,
) -> Option<ActionOutcome> {
    let player = room.current_player()?;
    if !player.is_ai() {
        return None;
    }
    let view = room.table_view();
    let (action, amount) = decide_action(player, &view, rng);

    let to_call = view.current_bet.saturating_sub(player.bet());
    let amount = match action {
        ActionType::Raise => amount.max(to_call + view.min_raise.max(view.big_blind)),
        _ => amount,
    };
    let player_id = player.id().to_string();

    let outcome = room.player_action(&player_id, action, amount);
    if outcome.is_accepted() {
        return Some(outcome);
    }

    let fallback = if to_call > 0 {
        ActionType::Call
    } else {
        ActionType::Check
    };
    debug!(
        player_id = %player_id,
        refused = %action,
        fallback = %fallback,
        "AI action refused, falling back"
    );
    Some(room.player_action(&player_id, fallback, 0))
}
