use std::collections::HashSet;

use holdem_engine::cards::Card;
use holdem_engine::deck::Deck;

#[test]
fn deck_reset_has_52_unique_cards() {
    let mut deck = Deck::new_with_seed(42);
    deck.reset();
    assert_eq!(deck.remaining(), 52);
    let cards = deck.deal(52);
    let set: HashSet<Card> = cards.iter().copied().collect();
    assert_eq!(set.len(), 52);
    assert!(deck.deal(1).is_empty(), "after 52 cards, deck should be empty");
}

#[test]
fn reset_repopulates_a_partly_dealt_deck() {
    let mut deck = Deck::new_with_seed(5);
    deck.reset();
    deck.deal(20);
    deck.reset();
    assert_eq!(deck.remaining(), 52);
}

#[test]
fn shuffle_is_deterministic_with_same_seed() {
    let mut d1 = Deck::new_with_seed(12345);
    let mut d2 = Deck::new_with_seed(12345);
    d1.reset();
    d2.reset();
    assert_eq!(d1.deal(10), d2.deal(10), "same seed must yield identical order");
}

#[test]
fn shuffle_differs_with_different_seed() {
    let mut d1 = Deck::new_with_seed(1);
    let mut d2 = Deck::new_with_seed(2);
    d1.reset();
    d2.reset();
    assert_ne!(
        d1.deal(10),
        d2.deal(10),
        "different seeds should produce different orders (high probability)"
    );
}

#[test]
fn successive_resets_reshuffle() {
    let mut deck = Deck::new_with_seed(77);
    deck.reset();
    let first = deck.deal(52);
    deck.reset();
    let second = deck.deal(52);
    assert_ne!(first, second);
}
