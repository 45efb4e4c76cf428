use std::collections::VecDeque;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::player::{ActionType, PlayerId};

/// Where a room is in the life of a hand.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameStage {
    /// No hand dealt yet
    Waiting,
    /// Hole cards dealt, blinds posted
    Preflop,
    /// 3 community cards
    Flop,
    /// 4th community card
    Turn,
    /// 5th community card
    River,
    /// Hand settled
    Showdown,
}

impl GameStage {
    /// True on the four betting streets.
    pub fn is_betting(self) -> bool {
        matches!(
            self,
            GameStage::Preflop | GameStage::Flop | GameStage::Turn | GameStage::River
        )
    }

    /// Community cards on the table at this stage.
    pub fn community_len(self) -> usize {
        match self {
            GameStage::Waiting | GameStage::Preflop => 0,
            GameStage::Flop => 3,
            GameStage::Turn => 4,
            GameStage::River | GameStage::Showdown => 5,
        }
    }
}

/// One accepted action in the current hand.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct ActionRecord {
    pub player_id: PlayerId,
    pub player_name: String,
    pub stage: GameStage,
    pub action: ActionType,
    /// Chips moved into the pot by this action.
    pub amount: u32,
    /// Set when the turn clock ran out and the engine acted for the seat.
    #[serde(default)]
    pub timed_out: bool,
}

/// A player who took chips from a settled pot.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct WinnerInfo {
    pub player_id: PlayerId,
    pub name: String,
    pub amount: u32,
}

/// One finished hand as kept in the room history.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct HandSummary {
    /// Format: YYYYMMDD-NNNNNN
    pub hand_id: String,
    /// RFC3339 settlement time
    pub ts: String,
    pub winners: Vec<WinnerInfo>,
    pub hand_name: String,
    pub pot: u32,
    pub board: Vec<Card>,
    pub actions: Vec<ActionRecord>,
}

pub fn format_hand_id(yyyymmdd: &str, seq: u32) -> String {
    format!("{}-{:06}", yyyymmdd, seq)
}

pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Bounded record of finished hands; the oldest entry drops once `limit`
/// is reached.
#[derive(Debug, Clone)]
pub struct HandHistory {
    entries: VecDeque<HandSummary>,
    limit: usize,
    seq: u32,
}

impl HandHistory {
    pub fn new(limit: usize) -> Self {
        Self {
            entries: VecDeque::new(),
            limit,
            seq: 0,
        }
    }

    /// Next hand id, dated from `at`.
    pub fn next_id(&mut self, at: DateTime<Utc>) -> String {
        self.seq += 1;
        format_hand_id(&at.format("%Y%m%d").to_string(), self.seq)
    }

    pub fn push(&mut self, summary: HandSummary) {
        if self.limit == 0 {
            return;
        }
        while self.entries.len() >= self.limit {
            self.entries.pop_front();
        }
        self.entries.push_back(summary);
    }

    /// The most recent `limit` hands, oldest first.
    pub fn recent(&self, limit: usize) -> Vec<&HandSummary> {
        let skip = self.entries.len().saturating_sub(limit);
        self.entries.iter().skip(skip).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(n: u32) -> HandSummary {
        HandSummary {
            hand_id: format_hand_id("20260101", n),
            ts: format_timestamp(DateTime::<Utc>::default()),
            winners: Vec::new(),
            hand_name: "High Card".into(),
            pot: n,
            board: Vec::new(),
            actions: Vec::new(),
        }
    }

    #[test]
    fn history_drops_oldest_past_limit() {
        let mut h = HandHistory::new(3);
        for n in 1..=5 {
            h.push(summary(n));
        }
        assert_eq!(h.len(), 3);
        let pots: Vec<u32> = h.recent(10).iter().map(|s| s.pot).collect();
        assert_eq!(pots, vec![3, 4, 5]);
        let pots: Vec<u32> = h.recent(2).iter().map(|s| s.pot).collect();
        assert_eq!(pots, vec![4, 5]);
    }

    #[test]
    fn huge_limit_does_not_preallocate() {
        let mut h = HandHistory::new(usize::MAX);
        h.push(summary(1));
        assert_eq!(h.len(), 1);
    }

    #[test]
    fn ids_and_timestamps_follow_the_given_time() {
        let at = DateTime::parse_from_rfc3339("2024-03-05T12:30:00Z")
            .unwrap()
            .with_timezone(&Utc);
        let mut h = HandHistory::new(5);
        assert_eq!(h.next_id(at), "20240305-000001");
        assert_eq!(h.next_id(at), "20240305-000002");
        assert_eq!(format_timestamp(at), "2024-03-05T12:30:00Z");
    }

    #[test]
    fn hand_id_is_zero_padded() {
        assert_eq!(format_hand_id("20251231", 42), "20251231-000042");
    }
}
