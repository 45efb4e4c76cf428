//! # holdem-engine: Texas Hold'em Table Engine
//!
//! A turn-based no-limit hold'em table for 2 to 8 seats. Provides the card
//! model, a 5-to-7 card hand evaluator, the betting state machine that runs a
//! room from blinds to showdown, and a pollable turn clock.
//!
//! ## Core Modules
//!
//! - [`cards`] - Card representation (Suit, Rank, Card)
//! - [`deck`] - Seeded 52-card deck with tail dealing
//! - [`hand`] - Hand evaluation over every 5-card subset
//! - [`player`] - Seat state, controllers and lifetime stats
//! - [`rules`] - Check/call/raise legality and raise arithmetic
//! - [`room`] - The betting state machine ([`room::GameRoom`])
//! - [`clock`] - Injectable clocks and the turn clock
//! - [`snapshot`] - Read-only views for clients and AI seats
//! - [`logger`] - Stages, action records and bounded hand history
//! - [`config`] - Room configuration from TOML and environment
//! - [`logging`] - `tracing` subscriber setup and test capture
//! - [`errors`] - Error types for room operations
//!
//! ## Quick Start
//!
//! ```rust
//! use holdem_engine::cards::{Card, Rank, Suit};
//! use holdem_engine::hand::{evaluate, HandRank};
//!
//! let cards = [
//!     Card::new(Suit::Hearts, Rank::Ace),
//!     Card::new(Suit::Hearts, Rank::King),
//!     Card::new(Suit::Hearts, Rank::Queen),
//!     Card::new(Suit::Hearts, Rank::Jack),
//!     Card::new(Suit::Hearts, Rank::Ten),
//!     Card::new(Suit::Clubs, Rank::Two),
//!     Card::new(Suit::Diamonds, Rank::Three),
//! ];
//!
//! let value = evaluate(&cards);
//! assert_eq!(value.rank, HandRank::RoyalFlush);
//! ```
//!
//! ## Running a Room
//!
//! Invalid input never panics: seating and lifecycle calls return
//! `Result<_, GameError>` and actions return an [`room::ActionOutcome`].
//!
//! ```rust
//! use holdem_engine::config::RoomConfig;
//! use holdem_engine::room::GameRoom;
//!
//! let mut room = GameRoom::new(RoomConfig::default());
//! room.add_player("a", "Ann").unwrap();
//! assert!(room.start_game().is_err()); // one seat is not enough
//! room.add_player("b", "Ben").unwrap();
//! room.start_game().unwrap();
//! assert_eq!(room.pot(), 30);
//! ```

pub mod cards;
pub mod clock;
pub mod config;
pub mod deck;
pub mod errors;
pub mod hand;
pub mod logger;
pub mod logging;
pub mod player;
pub mod room;
pub mod rules;
pub mod snapshot;
