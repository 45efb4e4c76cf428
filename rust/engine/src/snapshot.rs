//! Read-only views of a room for the transport layer and AI seats.

use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::hand::HandValue;
use crate::logger::{GameStage, WinnerInfo};
use crate::player::{PlayerId, PlayerStats};

/// Hand name reported when everyone else folded and no cards were compared.
pub const OTHERS_FOLDED: &str = "Others folded";

/// Public table state an AI seat decides from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableView<'a> {
    pub stage: GameStage,
    pub pot: u32,
    pub current_bet: u32,
    pub min_raise: u32,
    pub big_blind: u32,
    pub community: &'a [Card],
}

/// A contender's cards as revealed at showdown.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct ShownHand {
    pub player_id: PlayerId,
    pub name: String,
    pub cards: Vec<Card>,
    pub value: HandValue,
    pub hand_name: String,
}

/// Settlement of the most recent hand.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct HandResult {
    pub hand_id: String,
    pub winners: Vec<WinnerInfo>,
    /// Winning hand category, or [`OTHERS_FOLDED`].
    pub hand_name: String,
    pub pot: u32,
    /// Chips each winner received: `pot / winners` rounded down.
    pub share: u32,
    /// Empty when the hand ended without a showdown.
    pub shown_hands: Vec<ShownHand>,
    pub community: Vec<Card>,
}

impl HandResult {
    pub fn is_split(&self) -> bool {
        self.winners.len() > 1
    }

    /// Chips that were in the pot but not paid out by the integer split.
    pub fn undistributed(&self) -> u32 {
        self.pot - self.share * self.winners.len() as u32
    }
}

/// One row of the final report produced by `end_game`.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct Ranking {
    /// 1-based place, ordered by `total_win` descending.
    pub position: usize,
    pub player_id: PlayerId,
    pub name: String,
    pub chips: u32,
    pub total_win: i64,
    pub games_played: u32,
    pub games_won: u32,
    pub rebuys: u32,
}

#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
pub struct PlayerView {
    pub id: PlayerId,
    pub name: String,
    pub chips: u32,
    pub bet: u32,
    pub folded: bool,
    pub all_in: bool,
    pub is_dealer: bool,
    pub is_ai: bool,
    pub is_current: bool,
    /// Hidden (`None`) unless the viewer owns the seat or the hand is at showdown.
    pub hand: Option<Vec<Card>>,
    pub stats: PlayerStats,
}

/// Everything a client needs to render the table for one viewer.
#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
pub struct GameSnapshot {
    pub game_stage: GameStage,
    pub pot: u32,
    pub current_bet: u32,
    pub min_raise: u32,
    /// Smallest total bet a non-all-in raise may reach.
    pub min_raise_to: u32,
    /// What the viewer owes to call; zero for spectators.
    pub call_amount: u32,
    /// Smallest increment over the call for a non-all-in raise.
    pub min_raise_increment: u32,
    pub community_cards: Vec<Card>,
    pub players: Vec<PlayerView>,
    pub current_player_id: Option<PlayerId>,
    pub dealer_index: usize,
    pub last_result: Option<HandResult>,
    pub room_owner_id: Option<PlayerId>,
    pub game_ended: bool,
    pub final_rankings: Option<Vec<Ranking>>,
    pub turn_timeout: u64,
    pub remaining_time: u64,
}

impl GameSnapshot {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
