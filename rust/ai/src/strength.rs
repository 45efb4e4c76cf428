//! Hand strength scoring on a 0..=1 scale.

use holdem_engine::cards::Card;
use holdem_engine::hand::{evaluate, HandRank};

/// Scores the hand a seat holds right now.
///
/// Before the flop only the two hole cards are rated; afterwards the best
/// made hand from hole plus board is scored by category, with up to 0.1
/// added for the height of its top tie-break card.
pub fn evaluate_hand_strength(hole: &[Card], community: &[Card]) -> f64 {
    if community.is_empty() {
        return match hole {
            [a, b] => preflop_strength(*a, *b),
            _ => 0.0,
        };
    }
    postflop_strength(hole, community)
}

/// Heuristic rating of two hole cards.
///
/// - base: up to 0.5 from the higher card
/// - pocket pairs: +0.45 (TT+), +0.30 (77-99), +0.20 (22-66)
/// - Ace-high: +0.10 plus up to 0.10 by kicker
/// - King-high: +0.05 plus up to 0.05 by kicker
/// - suited +0.10, one-gap connectors +0.05, two-gap +0.02
pub fn preflop_strength(a: Card, b: Card) -> f64 {
    let (r1, r2) = (a.rank.value(), b.rank.value());
    let (high, low) = if r1 >= r2 { (r1, r2) } else { (r2, r1) };
    let suited = a.suit == b.suit;

    let mut score = f64::from(high) / 14.0 * 0.5;

    if high == low {
        score += match high {
            10..=14 => 0.45,
            7..=9 => 0.30,
            _ => 0.20,
        };
        return score.min(1.0);
    }

    let kicker = f64::from(low) / 14.0;
    match high {
        14 => score += 0.10 + kicker * 0.10,
        13 => score += 0.05 + kicker * 0.05,
        _ => {}
    }
    if suited {
        score += 0.10;
    }
    match high - low {
        1 => score += 0.05,
        2 => score += 0.02,
        _ => {}
    }
    score.min(1.0)
}

fn postflop_strength(hole: &[Card], community: &[Card]) -> f64 {
    let mut cards = hole.to_vec();
    cards.extend_from_slice(community);
    let value = evaluate(&cards);

    let base = match value.rank {
        HandRank::HighCard => 0.1,
        HandRank::OnePair => 0.2,
        HandRank::TwoPair => 0.3,
        HandRank::ThreeOfAKind => 0.4,
        HandRank::Straight => 0.5,
        HandRank::Flush => 0.6,
        HandRank::FullHouse => 0.7,
        HandRank::FourOfAKind => 0.8,
        HandRank::StraightFlush => 0.9,
        HandRank::RoyalFlush => 1.0,
    };
    let top = value.tiebreak.first().copied().unwrap_or(0);
    (base + f64::from(top) / 14.0 * 0.1).min(1.0)
}
