use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

use crate::cards::{full_deck, Card};

/// A 52-card deck owned by exactly one room.
///
/// The shuffle RNG is seeded explicitly so a room can be replayed
/// deterministically under test.
#[derive(Debug)]
pub struct Deck {
    cards: Vec<Card>,
    rng: ChaCha20Rng,
}

impl Deck {
    pub fn new_with_seed(seed: u64) -> Self {
        Self::with_rng(ChaCha20Rng::seed_from_u64(seed))
    }

    pub fn with_rng(rng: ChaCha20Rng) -> Self {
        // Keep initial order until reset is called explicitly
        Self {
            cards: full_deck(),
            rng,
        }
    }

    /// Repopulate all 52 cards and shuffle them (Fisher-Yates).
    pub fn reset(&mut self) {
        self.cards = full_deck();
        self.cards.shuffle(&mut self.rng);
    }

    /// Remove up to `n` cards from the top (tail) of the deck.
    /// Returns fewer than `n` when the deck runs out.
    pub fn deal(&mut self, n: usize) -> Vec<Card> {
        let take = n.min(self.cards.len());
        let split = self.cards.len() - take;
        let mut dealt = self.cards.split_off(split);
        dealt.reverse();
        dealt
    }

    pub fn remaining(&self) -> usize {
        self.cards.len()
    }

    /// Puts `cards` on top so they are dealt in slice order.
    #[cfg(test)]
    pub(crate) fn stack_top(&mut self, cards: &[Card]) {
        self.cards.retain(|c| !cards.contains(c));
        self.cards.extend(cards.iter().rev());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deal_pops_from_the_tail() {
        let mut deck = Deck::new_with_seed(3);
        let last = *deck.cards.last().unwrap();
        let dealt = deck.deal(1);
        assert_eq!(dealt, vec![last]);
        assert_eq!(deck.remaining(), 51);
    }

    #[test]
    fn deal_returns_what_is_left_when_exhausted() {
        let mut deck = Deck::new_with_seed(9);
        deck.reset();
        assert_eq!(deck.deal(50).len(), 50);
        assert_eq!(deck.deal(5).len(), 2);
        assert!(deck.deal(1).is_empty());
    }
}
