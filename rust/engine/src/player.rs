use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::errors::GameError;

pub type PlayerId = String;

/// Playing style of a computer-controlled seat.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Personality {
    Tight,
    Loose,
    Passive,
    Balanced,
}

impl Personality {
    pub fn all() -> [Personality; 4] {
        [
            Personality::Tight,
            Personality::Loose,
            Personality::Passive,
            Personality::Balanced,
        ]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Personality::Tight => "tight",
            Personality::Loose => "loose",
            Personality::Passive => "passive",
            Personality::Balanced => "balanced",
        }
    }
}

impl FromStr for Personality {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "tight" => Ok(Personality::Tight),
            "loose" => Ok(Personality::Loose),
            "passive" => Ok(Personality::Passive),
            "balanced" => Ok(Personality::Balanced),
            other => Err(format!("unknown personality: {other}")),
        }
    }
}

/// Who decides for a seat.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "personality")]
pub enum Controller {
    Human,
    Ai(Personality),
}

/// A betting action as submitted by a player.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionType {
    Fold,
    Check,
    Call,
    Raise,
}

impl ActionType {
    pub fn as_str(self) -> &'static str {
        match self {
            ActionType::Fold => "fold",
            ActionType::Check => "check",
            ActionType::Call => "call",
            ActionType::Raise => "raise",
        }
    }
}

impl fmt::Display for ActionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActionType {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "fold" => Ok(ActionType::Fold),
            "check" => Ok(ActionType::Check),
            "call" => Ok(ActionType::Call),
            "raise" => Ok(ActionType::Raise),
            other => Err(GameError::UnknownAction(other.to_string())),
        }
    }
}

/// Lifetime counters that persist across hands within a room.
#[derive(Debug, Clone, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct PlayerStats {
    pub games_played: u32,
    pub games_won: u32,
    /// Net chips won across all hands, with rebuys counted as losses.
    pub total_win: i64,
    pub rebuys: u32,
    pub initial_chips: u32,
}

/// A seat at the table: chip stack, hole cards, per-hand flags and stats.
#[derive(Debug, Clone)]
pub struct Player {
    id: PlayerId,
    name: String,
    chips: u32,
    hole: Vec<Card>,
    bet: u32,
    folded: bool,
    all_in: bool,
    has_acted: bool,
    is_dealer: bool,
    controller: Controller,
    stats: PlayerStats,
}

impl Player {
    pub fn new(id: impl Into<PlayerId>, name: impl Into<String>, chips: u32) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            chips,
            hole: Vec::with_capacity(2),
            bet: 0,
            folded: false,
            all_in: false,
            has_acted: false,
            is_dealer: false,
            controller: Controller::Human,
            stats: PlayerStats {
                initial_chips: chips,
                ..PlayerStats::default()
            },
        }
    }

    pub fn with_controller(mut self, controller: Controller) -> Self {
        self.controller = controller;
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }
    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn chips(&self) -> u32 {
        self.chips
    }
    pub fn hole_cards(&self) -> &[Card] {
        &self.hole
    }
    pub fn bet(&self) -> u32 {
        self.bet
    }
    pub fn is_folded(&self) -> bool {
        self.folded
    }
    pub fn is_all_in(&self) -> bool {
        self.all_in
    }
    pub fn has_acted(&self) -> bool {
        self.has_acted
    }
    pub fn is_dealer(&self) -> bool {
        self.is_dealer
    }
    pub fn controller(&self) -> Controller {
        self.controller
    }
    pub fn is_ai(&self) -> bool {
        matches!(self.controller, Controller::Ai(_))
    }
    pub fn stats(&self) -> &PlayerStats {
        &self.stats
    }

    /// Neither folded nor all-in: still able to put chips in.
    pub fn can_act(&self) -> bool {
        !self.folded && !self.all_in
    }

    pub(crate) fn reset_for_hand(&mut self) {
        self.hole.clear();
        self.bet = 0;
        self.folded = false;
        self.all_in = false;
        self.has_acted = false;
        self.is_dealer = false;
    }

    pub(crate) fn reset_for_street(&mut self) {
        self.bet = 0;
        self.has_acted = false;
    }

    pub(crate) fn give_cards(&mut self, cards: &[Card]) {
        self.hole.extend_from_slice(cards);
    }

    #[cfg(test)]
    pub(crate) fn set_hole_cards(&mut self, cards: &[Card]) {
        self.hole = cards.to_vec();
    }

    /// Moves up to `amount` chips from the stack into the current bet and
    /// returns how much was actually paid. Emptying the stack marks all-in.
    pub(crate) fn pay(&mut self, amount: u32) -> u32 {
        let paid = amount.min(self.chips);
        self.chips -= paid;
        self.bet += paid;
        if self.chips == 0 {
            self.all_in = true;
        }
        paid
    }

    pub(crate) fn win(&mut self, amount: u32) {
        self.chips = self.chips.saturating_add(amount);
    }

    pub(crate) fn fold(&mut self) {
        self.folded = true;
    }

    pub(crate) fn set_has_acted(&mut self, acted: bool) {
        self.has_acted = acted;
    }

    pub(crate) fn set_dealer(&mut self, dealer: bool) {
        self.is_dealer = dealer;
    }

    pub(crate) fn stats_mut(&mut self) -> &mut PlayerStats {
        &mut self.stats
    }

    /// Tops the stack back up to the initial buy-in and books the difference
    /// as a loss. Returns the amount added.
    pub(crate) fn rebuy(&mut self) -> u32 {
        let amount = self.stats.initial_chips.saturating_sub(self.chips);
        self.chips = self.stats.initial_chips;
        self.stats.rebuys += 1;
        self.stats.total_win -= i64::from(amount);
        amount
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pay_caps_at_stack_and_marks_all_in() {
        let mut p = Player::new("p1", "Alice", 50);
        assert_eq!(p.pay(80), 50);
        assert_eq!(p.chips(), 0);
        assert_eq!(p.bet(), 50);
        assert!(p.is_all_in());
    }

    #[test]
    fn rebuy_books_a_loss() {
        let mut p = Player::new("p1", "Alice", 1000);
        p.pay(990);
        assert_eq!(p.rebuy(), 990);
        assert_eq!(p.chips(), 1000);
        assert_eq!(p.stats().rebuys, 1);
        assert_eq!(p.stats().total_win, -990);
    }

    #[test]
    fn parses_actions_and_personalities() {
        assert_eq!("raise".parse::<ActionType>(), Ok(ActionType::Raise));
        assert_eq!(
            "bet".parse::<ActionType>(),
            Err(GameError::UnknownAction("bet".to_string()))
        );
        assert_eq!("Tight".parse::<Personality>(), Ok(Personality::Tight));
        assert!("maniac".parse::<Personality>().is_err());
    }
}
