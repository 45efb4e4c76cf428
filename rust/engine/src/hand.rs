use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::cards::{Card, Suit};

/// Hand categories from weakest to strongest. The ordinal is the primary
/// comparison key.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum HandRank {
    HighCard = 1,
    OnePair = 2,
    TwoPair = 3,
    ThreeOfAKind = 4,
    Straight = 5,
    Flush = 6,
    FullHouse = 7,
    FourOfAKind = 8,
    StraightFlush = 9,
    RoyalFlush = 10,
}

impl HandRank {
    pub fn name(self) -> &'static str {
        match self {
            HandRank::HighCard => "High Card",
            HandRank::OnePair => "One Pair",
            HandRank::TwoPair => "Two Pair",
            HandRank::ThreeOfAKind => "Three of a Kind",
            HandRank::Straight => "Straight",
            HandRank::Flush => "Flush",
            HandRank::FullHouse => "Full House",
            HandRank::FourOfAKind => "Four of a Kind",
            HandRank::StraightFlush => "Straight Flush",
            HandRank::RoyalFlush => "Royal Flush",
        }
    }
}

/// Result of evaluating a hand: category plus tie-break ranks.
///
/// Field order matters: the derived `Ord` compares `rank` first and then the
/// tie-break vector lexicographically.
#[derive(Debug, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct HandValue {
    pub rank: HandRank,
    pub tiebreak: Vec<u8>,
}

impl HandValue {
    fn new(rank: HandRank, tiebreak: Vec<u8>) -> Self {
        Self { rank, tiebreak }
    }
}

const WHEEL: [u8; 5] = [14, 5, 4, 3, 2];

/// Best hand value over every 5-card subset of `cards`.
///
/// Fewer than five cards is "not yet evaluable" and yields
/// `HighCard` with an empty tie-break.
pub fn evaluate(cards: &[Card]) -> HandValue {
    if cards.len() < 5 {
        return HandValue::new(HandRank::HighCard, Vec::new());
    }

    let n = cards.len();
    let mut best: Option<HandValue> = None;
    for a in 0..n {
        for b in a + 1..n {
            for c in b + 1..n {
                for d in c + 1..n {
                    for e in d + 1..n {
                        let five = [cards[a], cards[b], cards[c], cards[d], cards[e]];
                        let value = evaluate_five(&five);
                        if best.as_ref().is_none_or(|cur| value > *cur) {
                            best = Some(value);
                        }
                    }
                }
            }
        }
    }
    best.unwrap_or_else(|| HandValue::new(HandRank::HighCard, Vec::new()))
}

pub fn compare_hands(a: &HandValue, b: &HandValue) -> Ordering {
    a.cmp(b)
}

/// Scores exactly five cards.
///
/// A wheel (A-2-3-4-5) is a straight but keeps the Ace's 14 in its
/// tie-break, so it reads as `[14, 5, 4, 3, 2]`.
pub fn evaluate_five(cards: &[Card; 5]) -> HandValue {
    let mut ranks: Vec<u8> = cards.iter().map(|c| c.rank.value()).collect();
    ranks.sort_unstable_by(|a, b| b.cmp(a));

    let flush = is_flush(cards);
    let straight = is_straight(&ranks);

    if flush && straight {
        // Any ace-high straight flush, the wheel included, is royal.
        if ranks[0] == 14 {
            return HandValue::new(HandRank::RoyalFlush, ranks);
        }
        return HandValue::new(HandRank::StraightFlush, ranks);
    }

    let groups = group_by_count(&ranks);

    if groups[0].1 == 4 {
        return HandValue::new(HandRank::FourOfAKind, vec![groups[0].0, groups[1].0]);
    }
    if groups[0].1 == 3 && groups[1].1 == 2 {
        return HandValue::new(HandRank::FullHouse, vec![groups[0].0, groups[1].0]);
    }
    if flush {
        return HandValue::new(HandRank::Flush, ranks);
    }
    if straight {
        return HandValue::new(HandRank::Straight, ranks);
    }
    if groups[0].1 == 3 {
        let mut k = vec![groups[0].0];
        k.extend(kickers(&ranks, &[groups[0].0]));
        return HandValue::new(HandRank::ThreeOfAKind, k);
    }
    if groups[0].1 == 2 && groups[1].1 == 2 {
        let (high, low) = (groups[0].0, groups[1].0);
        let mut k = vec![high, low];
        k.extend(kickers(&ranks, &[high, low]));
        return HandValue::new(HandRank::TwoPair, k);
    }
    if groups[0].1 == 2 {
        let mut k = vec![groups[0].0];
        k.extend(kickers(&ranks, &[groups[0].0]));
        return HandValue::new(HandRank::OnePair, k);
    }

    HandValue::new(HandRank::HighCard, ranks)
}

fn is_flush(cards: &[Card; 5]) -> bool {
    let suit: Suit = cards[0].suit;
    cards.iter().all(|c| c.suit == suit)
}

// `desc` must be sorted high -> low.
fn is_straight(desc: &[u8]) -> bool {
    if desc == WHEEL {
        return true;
    }
    desc.windows(2).all(|w| w[0] == w[1] + 1)
}

/// (rank, count) pairs ordered by count, then rank, both descending.
fn group_by_count(desc: &[u8]) -> Vec<(u8, u8)> {
    let mut counts = [0u8; 15];
    for &r in desc {
        counts[r as usize] += 1;
    }
    let mut groups: Vec<(u8, u8)> = (2..=14u8)
        .rev()
        .filter(|&r| counts[r as usize] > 0)
        .map(|r| (r, counts[r as usize]))
        .collect();
    groups.sort_by(|a, b| b.1.cmp(&a.1).then(b.0.cmp(&a.0)));
    groups
}

fn kickers(desc: &[u8], exclude: &[u8]) -> Vec<u8> {
    desc.iter()
        .copied()
        .filter(|r| !exclude.contains(r))
        .collect()
}
