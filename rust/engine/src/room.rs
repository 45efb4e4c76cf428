use std::collections::HashMap;
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::cards::Card;
use crate::clock::{Clock, SystemClock, TurnClock};
use crate::config::{RoomConfig, MAX_HISTORY, MAX_SEATS, MIN_PLAYERS};
use crate::deck::Deck;
use crate::errors::GameError;
use crate::hand::{evaluate, HandValue};
use crate::logger::{
    format_timestamp, ActionRecord, GameStage, HandHistory, HandSummary, WinnerInfo,
};
use crate::player::{ActionType, Controller, Personality, Player, PlayerId};
use crate::rules::{validate_action, BettingContext, ValidatedAction};
use crate::snapshot::{
    GameSnapshot, HandResult, PlayerView, Ranking, ShownHand, TableView, OTHERS_FOLDED,
};

/// Result of submitting an action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionOutcome {
    Accepted {
        record: ActionRecord,
        /// Stage after the action, including any automatic advance.
        stage: GameStage,
    },
    Rejected {
        reason: GameError,
    },
}

impl ActionOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, ActionOutcome::Accepted { .. })
    }

    pub fn rejection(&self) -> Option<&GameError> {
        match self {
            ActionOutcome::Rejected { reason } => Some(reason),
            ActionOutcome::Accepted { .. } => None,
        }
    }
}

/// Result of polling the turn clock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimeoutCheck {
    /// No betting in progress; nothing is on the clock.
    Idle,
    Pending { remaining: Duration },
    /// An AI seat ran out of time. Nothing was changed; the host must ask
    /// the decision engine and submit its action.
    AiMustAct { player_id: PlayerId },
    /// A human seat ran out of time and was folded.
    AutoFolded { player_id: PlayerId, record: ActionRecord },
}

impl TimeoutCheck {
    pub fn timed_out(&self) -> bool {
        matches!(
            self,
            TimeoutCheck::AiMustAct { .. } | TimeoutCheck::AutoFolded { .. }
        )
    }

    /// The action the engine took on the seat's behalf, if any.
    pub fn auto_action(&self) -> Option<ActionType> {
        match self {
            TimeoutCheck::AutoFolded { .. } => Some(ActionType::Fold),
            _ => None,
        }
    }
}

/// One poker table: seats, deck, pot, betting state and hand history.
///
/// The room is plain sequential state. Hosts that share it between request
/// handlers must serialize access themselves (one mutex or actor per room).
///
/// # Examples
///
/// ```
/// use holdem_engine::config::RoomConfig;
/// use holdem_engine::logger::GameStage;
/// use holdem_engine::player::ActionType;
/// use holdem_engine::room::GameRoom;
///
/// let mut room = GameRoom::new(RoomConfig { seed: Some(7), ..RoomConfig::default() });
/// room.add_player("alice", "Alice").unwrap();
/// room.add_player("bob", "Bob").unwrap();
/// room.start_game().unwrap();
/// assert_eq!(room.stage(), GameStage::Preflop);
///
/// // Heads-up: the small blind acts first and calls, the big blind checks.
/// let first = room.current_player().unwrap().id().to_string();
/// assert!(room.player_action(&first, ActionType::Call, 0).is_accepted());
/// let second = room.current_player().unwrap().id().to_string();
/// assert!(room.player_action(&second, ActionType::Check, 0).is_accepted());
/// assert_eq!(room.stage(), GameStage::Flop);
/// assert_eq!(room.community_cards().len(), 3);
/// ```
#[derive(Debug)]
pub struct GameRoom {
    config: RoomConfig,
    players: Vec<Player>,
    deck: Deck,
    community: Vec<Card>,
    pot: u32,
    current_bet: u32,
    min_raise: u32,
    dealer_index: usize,
    current_player_index: usize,
    stage: GameStage,
    hand_id: Option<String>,
    hand_log: Vec<ActionRecord>,
    history: HandHistory,
    room_owner_id: Option<PlayerId>,
    turn_clock: TurnClock,
    clock: Box<dyn Clock>,
    pre_hand_chips: HashMap<PlayerId, u32>,
    last_result: Option<HandResult>,
    final_rankings: Option<Vec<Ranking>>,
}

impl GameRoom {
    pub fn new(config: RoomConfig) -> Self {
        Self::with_clock(config, Box::new(SystemClock::new()))
    }

    pub fn with_clock(mut config: RoomConfig, clock: Box<dyn Clock>) -> Self {
        config.max_players = config.max_players.clamp(MIN_PLAYERS, MAX_SEATS);
        config.history_limit = config.history_limit.min(MAX_HISTORY);
        let seed = config.seed.unwrap_or_else(rand::random);
        Self {
            deck: Deck::new_with_seed(seed),
            players: Vec::with_capacity(config.max_players),
            community: Vec::with_capacity(5),
            pot: 0,
            current_bet: 0,
            min_raise: config.big_blind,
            dealer_index: 0,
            current_player_index: 0,
            stage: GameStage::Waiting,
            hand_id: None,
            hand_log: Vec::new(),
            history: HandHistory::new(config.history_limit),
            room_owner_id: None,
            turn_clock: TurnClock::new(config.turn_timeout()),
            clock,
            pre_hand_chips: HashMap::new(),
            last_result: None,
            final_rankings: None,
            config,
        }
    }

    pub fn add_player(
        &mut self,
        id: impl Into<PlayerId>,
        name: impl Into<String>,
    ) -> Result<(), GameError> {
        let player = Player::new(id, name, self.config.starting_chips);
        self.seat_player(player)
    }

    pub fn add_ai_player(
        &mut self,
        id: impl Into<PlayerId>,
        name: impl Into<String>,
        personality: Personality,
    ) -> Result<(), GameError> {
        let player = Player::new(id, name, self.config.starting_chips)
            .with_controller(Controller::Ai(personality));
        self.seat_player(player)
    }

    /// Seats a pre-built player. The first seated player owns the room.
    /// A player joining mid-hand sits out (folded) until the next deal.
    pub fn seat_player(&mut self, mut player: Player) -> Result<(), GameError> {
        if self.players.len() >= self.config.max_players {
            return Err(GameError::RoomFull {
                max: self.config.max_players,
            });
        }
        if self.players.iter().any(|p| p.id() == player.id()) {
            return Err(GameError::DuplicatePlayer(player.id().to_string()));
        }
        if self.stage.is_betting() {
            player.fold();
        }
        if self.room_owner_id.is_none() {
            self.room_owner_id = Some(player.id().to_string());
        }
        info!(
            player_id = %player.id(),
            seats = self.players.len() + 1,
            ai = player.is_ai(),
            "player seated"
        );
        self.players.push(player);
        Ok(())
    }

    /// Removes a seat. Never fails; returns the removed player if present.
    pub fn remove_player(&mut self, id: &str) -> Option<Player> {
        let idx = self.seat_of(id)?;
        let removed = self.players.remove(idx);
        self.pre_hand_chips.remove(id);
        info!(player_id = %id, seats = self.players.len(), "player removed");

        if self.players.is_empty() {
            self.dealer_index = 0;
            self.current_player_index = 0;
            if self.stage.is_betting() {
                self.stage = GameStage::Waiting;
                self.turn_clock.disarm();
            }
            return Some(removed);
        }

        let n = self.players.len();
        if idx < self.dealer_index {
            self.dealer_index -= 1;
        }
        self.dealer_index %= n;
        let was_current = idx == self.current_player_index;
        if idx < self.current_player_index {
            self.current_player_index -= 1;
        }
        self.current_player_index %= n;

        if self.stage.is_betting() && self.final_rankings.is_none() {
            if self.non_folded_count() <= 1 {
                self.settle();
            } else if self.is_round_complete() {
                self.next_stage();
            } else if was_current || !self.players[self.current_player_index].can_act() {
                self.current_player_index = self.next_actable_from(self.current_player_index);
                self.arm_turn_clock();
            }
        }
        Some(removed)
    }

    /// Deals a new hand: fresh deck, hole cards, blinds, first turn.
    pub fn start_game(&mut self) -> Result<(), GameError> {
        if self.final_rankings.is_some() {
            return Err(GameError::GameEnded);
        }
        if self.stage.is_betting() {
            return Err(GameError::HandInProgress);
        }
        if self.players.len() < MIN_PLAYERS {
            return Err(GameError::NotEnoughPlayers {
                needed: MIN_PLAYERS,
                seated: self.players.len(),
            });
        }

        let n = self.players.len();
        self.pre_hand_chips = self
            .players
            .iter()
            .map(|p| (p.id().to_string(), p.chips()))
            .collect();

        self.deck.reset();
        self.community.clear();
        self.pot = 0;
        self.current_bet = 0;
        self.min_raise = self.config.big_blind;
        self.hand_log.clear();
        self.hand_id = Some(self.history.next_id(self.clock.utc_now()));

        self.dealer_index %= n;
        for p in &mut self.players {
            p.reset_for_hand();
        }
        self.players[self.dealer_index].set_dealer(true);

        for _ in 0..2 {
            for p in self.players.iter_mut().filter(|p| !p.is_folded()) {
                let card = self.deck.deal(1);
                p.give_cards(&card);
            }
        }

        let sb_index = (self.dealer_index + 1) % n;
        let bb_index = (self.dealer_index + 2) % n;
        let sb_paid = self.players[sb_index].pay(self.config.small_blind);
        let bb_paid = self.players[bb_index].pay(self.config.big_blind);
        self.pot = sb_paid + bb_paid;
        self.current_bet = bb_paid;

        self.stage = GameStage::Preflop;
        self.current_player_index = self.next_actable_from((self.dealer_index + 3) % n);
        self.arm_turn_clock();

        info!(
            hand_id = self.hand_id.as_deref().unwrap_or_default(),
            players = n,
            dealer = %self.players[self.dealer_index].id(),
            small_blind = sb_paid,
            big_blind = bb_paid,
            "hand started"
        );

        if self.is_round_complete() {
            self.next_stage();
        }
        Ok(())
    }

    /// Applies `action` for `player_id` if it is that seat's turn.
    ///
    /// For [`ActionType::Raise`], `amount` is the chips put in by this
    /// action, call included. `amount` is ignored otherwise.
    pub fn player_action(
        &mut self,
        player_id: &str,
        action: ActionType,
        amount: u32,
    ) -> ActionOutcome {
        if let Err(reason) = self.check_turn(player_id) {
            debug!(player_id, %reason, "action rejected");
            return ActionOutcome::Rejected { reason };
        }
        self.apply_action(self.current_player_index, action, amount, false)
    }

    /// [`GameRoom::player_action`] for a raw action string such as `"call"`.
    pub fn player_action_str(&mut self, player_id: &str, action: &str, amount: u32) -> ActionOutcome {
        match action.parse::<ActionType>() {
            Ok(action) => self.player_action(player_id, action, amount),
            Err(reason) => {
                debug!(player_id, %reason, "action rejected");
                ActionOutcome::Rejected { reason }
            }
        }
    }

    /// Polls the turn clock. A human seat past its allowance is folded; an
    /// AI seat is only reported.
    pub fn check_timeout(&mut self) -> TimeoutCheck {
        if self.final_rankings.is_some() || !self.stage.is_betting() {
            return TimeoutCheck::Idle;
        }
        let now = self.clock.now();
        if !self.turn_clock.is_expired(now) {
            return TimeoutCheck::Pending {
                remaining: self.turn_clock.remaining(now),
            };
        }

        let idx = self.current_player_index;
        let player_id = self.players[idx].id().to_string();
        if self.players[idx].is_ai() {
            debug!(player_id = %player_id, "AI seat on the clock must act");
            return TimeoutCheck::AiMustAct { player_id };
        }

        warn!(player_id = %player_id, stage = ?self.stage, "turn expired, folding");
        match self.apply_action(idx, ActionType::Fold, 0, true) {
            ActionOutcome::Accepted { record, .. } => TimeoutCheck::AutoFolded { player_id, record },
            ActionOutcome::Rejected { .. } => TimeoutCheck::Idle,
        }
    }

    /// Freezes the room and returns the final ranking by net winnings.
    /// Only the room owner may end the game.
    pub fn end_game(&mut self, owner_id: &str) -> Result<Vec<Ranking>, GameError> {
        if self.final_rankings.is_some() {
            return Err(GameError::GameEnded);
        }
        if self.room_owner_id.as_deref() != Some(owner_id) {
            return Err(GameError::NotOwner);
        }

        let mut order: Vec<&Player> = self.players.iter().collect();
        order.sort_by(|a, b| b.stats().total_win.cmp(&a.stats().total_win));
        let rankings: Vec<Ranking> = order
            .into_iter()
            .enumerate()
            .map(|(i, p)| Ranking {
                position: i + 1,
                player_id: p.id().to_string(),
                name: p.name().to_string(),
                chips: p.chips(),
                total_win: p.stats().total_win,
                games_played: p.stats().games_played,
                games_won: p.stats().games_won,
                rebuys: p.stats().rebuys,
            })
            .collect();

        self.turn_clock.disarm();
        info!(
            owner = owner_id,
            players = rankings.len(),
            leader = rankings.first().map(|r| r.player_id.as_str()).unwrap_or_default(),
            "game ended"
        );
        self.final_rankings = Some(rankings.clone());
        Ok(rankings)
    }

    pub fn set_turn_timeout(&mut self, seconds: u64) -> Result<(), GameError> {
        if seconds == 0 {
            return Err(GameError::InvalidTimeout);
        }
        self.config.turn_timeout_secs = seconds;
        self.turn_clock.set_timeout(Duration::from_secs(seconds));
        Ok(())
    }

    pub fn config(&self) -> &RoomConfig {
        &self.config
    }
    pub fn stage(&self) -> GameStage {
        self.stage
    }
    pub fn pot(&self) -> u32 {
        self.pot
    }
    pub fn current_bet(&self) -> u32 {
        self.current_bet
    }
    pub fn min_raise(&self) -> u32 {
        self.min_raise
    }
    pub fn community_cards(&self) -> &[Card] {
        &self.community
    }
    pub fn players(&self) -> &[Player] {
        &self.players
    }
    pub fn player(&self, id: &str) -> Option<&Player> {
        self.players.iter().find(|p| p.id() == id)
    }
    pub fn dealer_index(&self) -> usize {
        self.dealer_index
    }
    pub fn room_owner_id(&self) -> Option<&str> {
        self.room_owner_id.as_deref()
    }
    pub fn hand_log(&self) -> &[ActionRecord] {
        &self.hand_log
    }
    pub fn last_result(&self) -> Option<&HandResult> {
        self.last_result.as_ref()
    }
    pub fn final_rankings(&self) -> Option<&[Ranking]> {
        self.final_rankings.as_deref()
    }
    pub fn is_ended(&self) -> bool {
        self.final_rankings.is_some()
    }
    pub fn turn_timeout(&self) -> Duration {
        self.turn_clock.timeout()
    }

    /// Seat whose turn it is, while a betting street is open.
    pub fn current_player(&self) -> Option<&Player> {
        if self.stage.is_betting() && self.final_rankings.is_none() {
            self.players.get(self.current_player_index)
        } else {
            None
        }
    }

    pub fn table_view(&self) -> TableView<'_> {
        TableView {
            stage: self.stage,
            pot: self.pot,
            current_bet: self.current_bet,
            min_raise: self.min_raise,
            big_blind: self.config.big_blind,
            community: &self.community,
        }
    }

    /// Finished hands, most recent `limit`, oldest first.
    pub fn get_game_history(&self, limit: usize) -> Vec<&HandSummary> {
        self.history.recent(limit)
    }

    /// Table state as seen by `viewer_id`. Other seats' hole cards stay
    /// hidden until showdown.
    pub fn get_game_state(&self, viewer_id: Option<&str>) -> GameSnapshot {
        let reveal_all = self.stage == GameStage::Showdown;
        let current_id = self.current_player().map(|p| p.id().to_string());
        let ctx = self.betting_context();

        let players = self
            .players
            .iter()
            .map(|p| {
                let visible = reveal_all || viewer_id == Some(p.id());
                PlayerView {
                    id: p.id().to_string(),
                    name: p.name().to_string(),
                    chips: p.chips(),
                    bet: p.bet(),
                    folded: p.is_folded(),
                    all_in: p.is_all_in(),
                    is_dealer: p.is_dealer(),
                    is_ai: p.is_ai(),
                    is_current: current_id.as_deref() == Some(p.id()),
                    hand: visible.then(|| p.hole_cards().to_vec()),
                    stats: p.stats().clone(),
                }
            })
            .collect();

        let call_amount = viewer_id
            .and_then(|id| self.player(id))
            .map(|p| self.current_bet.saturating_sub(p.bet()).min(p.chips()))
            .unwrap_or(0);
        let remaining = if current_id.is_some() {
            self.turn_clock.remaining(self.clock.now())
        } else {
            self.turn_clock.timeout()
        };

        GameSnapshot {
            game_stage: self.stage,
            pot: self.pot,
            current_bet: self.current_bet,
            min_raise: self.min_raise,
            min_raise_to: self.current_bet + ctx.min_increment(),
            call_amount,
            min_raise_increment: ctx.min_increment(),
            community_cards: self.community.clone(),
            players,
            current_player_id: current_id,
            dealer_index: self.dealer_index,
            last_result: self.last_result.clone(),
            room_owner_id: self.room_owner_id.clone(),
            game_ended: self.final_rankings.is_some(),
            final_rankings: self.final_rankings.clone(),
            turn_timeout: self.turn_clock.timeout().as_secs(),
            remaining_time: remaining.as_secs(),
        }
    }

    fn seat_of(&self, id: &str) -> Option<usize> {
        self.players.iter().position(|p| p.id() == id)
    }

    fn betting_context(&self) -> BettingContext {
        BettingContext {
            current_bet: self.current_bet,
            min_raise: self.min_raise,
            big_blind: self.config.big_blind,
        }
    }

    fn check_turn(&self, player_id: &str) -> Result<(), GameError> {
        if self.final_rankings.is_some() {
            return Err(GameError::GameEnded);
        }
        if !self.stage.is_betting() {
            return Err(GameError::NoHandInProgress);
        }
        if self.seat_of(player_id).is_none() {
            return Err(GameError::PlayerNotFound(player_id.to_string()));
        }
        let expected = self.players[self.current_player_index].id();
        if expected != player_id {
            return Err(GameError::NotPlayersTurn {
                expected: expected.to_string(),
                actual: player_id.to_string(),
            });
        }
        Ok(())
    }

    fn apply_action(
        &mut self,
        idx: usize,
        action: ActionType,
        amount: u32,
        timed_out: bool,
    ) -> ActionOutcome {
        let ctx = self.betting_context();
        let validated = {
            let p = &self.players[idx];
            validate_action(p.chips(), p.bet(), &ctx, action, amount)
        };
        let validated = match validated {
            Ok(v) => v,
            Err(reason) => {
                debug!(player_id = %self.players[idx].id(), %reason, "action rejected");
                return ActionOutcome::Rejected { reason };
            }
        };

        let paid = match validated {
            ValidatedAction::Fold => {
                self.players[idx].fold();
                0
            }
            ValidatedAction::Check => 0,
            ValidatedAction::Call(owed) => self.players[idx].pay(owed),
            ValidatedAction::Raise { total, .. } => {
                let paid = self.players[idx].pay(total);
                let new_bet = self.players[idx].bet();
                // An all-in that does not top the table bet changes nothing
                // for the others: current_bet, min_raise and has_acted stay.
                if new_bet > self.current_bet {
                    self.min_raise = new_bet - self.current_bet;
                    self.current_bet = new_bet;
                    for (i, p) in self.players.iter_mut().enumerate() {
                        if i != idx && p.can_act() {
                            p.set_has_acted(false);
                        }
                    }
                }
                paid
            }
        };
        self.pot += paid;

        let record = ActionRecord {
            player_id: self.players[idx].id().to_string(),
            player_name: self.players[idx].name().to_string(),
            stage: self.stage,
            action,
            amount: paid,
            timed_out,
        };
        self.hand_log.push(record.clone());
        self.players[idx].set_has_acted(true);

        debug!(
            player_id = %record.player_id,
            action = %action,
            amount = paid,
            pot = self.pot,
            current_bet = self.current_bet,
            "action accepted"
        );

        if self.non_folded_count() <= 1 {
            self.settle();
        } else if self.is_round_complete() {
            self.next_stage();
        } else {
            self.current_player_index = self.next_actable_from(idx + 1);
            self.arm_turn_clock();
        }

        ActionOutcome::Accepted {
            record,
            stage: self.stage,
        }
    }

    fn non_folded_count(&self) -> usize {
        self.players.iter().filter(|p| !p.is_folded()).count()
    }

    /// A street is over when every seat that can still bet has acted and
    /// matched the high bet. With one such seat or none left, it is over
    /// as soon as nobody owes chips.
    fn is_round_complete(&self) -> bool {
        let active: Vec<&Player> = self.players.iter().filter(|p| p.can_act()).collect();
        if active.len() <= 1 {
            return active
                .iter()
                .all(|p| p.has_acted() || p.bet() >= self.current_bet);
        }
        active
            .iter()
            .all(|p| p.has_acted() && p.bet() == self.current_bet)
    }

    /// First seat at or after `start` that can still bet, falling back to
    /// the first unfolded seat when everyone left is all-in.
    fn next_actable_from(&self, start: usize) -> usize {
        let n = self.players.len();
        let seats = (0..n).map(|k| (start + k) % n);
        seats
            .clone()
            .find(|&i| self.players[i].can_act())
            .or_else(|| seats.clone().find(|&i| !self.players[i].is_folded()))
            .unwrap_or(start % n)
    }

    fn arm_turn_clock(&mut self) {
        self.turn_clock.arm(self.clock.now());
    }

    /// Closes the street and opens the next one. Streets nobody can bet on
    /// are dealt straight through to showdown.
    fn next_stage(&mut self) {
        loop {
            if self.non_folded_count() <= 1 {
                self.settle();
                return;
            }
            for p in &mut self.players {
                p.reset_for_street();
            }
            self.current_bet = 0;
            self.min_raise = self.config.big_blind;

            let (next, deal) = match self.stage {
                GameStage::Preflop => (GameStage::Flop, 3),
                GameStage::Flop => (GameStage::Turn, 1),
                GameStage::Turn => (GameStage::River, 1),
                GameStage::River => {
                    self.settle();
                    return;
                }
                GameStage::Waiting | GameStage::Showdown => return,
            };
            let cards = self.deck.deal(deal);
            self.community.extend(cards);
            self.stage = next;

            let n = self.players.len();
            self.current_player_index = self.next_actable_from((self.dealer_index + 1) % n);
            self.arm_turn_clock();
            debug!(
                stage = ?self.stage,
                board = %format_cards(&self.community),
                pot = self.pot,
                "stage advanced"
            );

            if !self.is_round_complete() {
                return;
            }
        }
    }

    /// Awards the pot, updates stats, rebuys short stacks, records history
    /// and moves the button.
    fn settle(&mut self) {
        self.stage = GameStage::Showdown;
        self.turn_clock.disarm();

        let contenders: Vec<usize> = (0..self.players.len())
            .filter(|&i| !self.players[i].is_folded())
            .collect();

        let (winners, hand_name, shown_hands) = if contenders.len() == 1 {
            (contenders, OTHERS_FOLDED.to_string(), Vec::new())
        } else {
            self.showdown_winners(&contenders)
        };

        // integer split: any remainder stays unawarded
        let share = match winners.len() {
            0 => 0,
            w => self.pot / w as u32,
        };
        for &w in &winners {
            self.players[w].win(share);
        }

        for p in &mut self.players {
            if let Some(&before) = self.pre_hand_chips.get(p.id()) {
                let delta = i64::from(p.chips()) - i64::from(before);
                let stats = p.stats_mut();
                stats.games_played += 1;
                stats.total_win += delta;
            }
        }
        for &w in &winners {
            self.players[w].stats_mut().games_won += 1;
        }

        let big_blind = self.config.big_blind;
        for p in self.players.iter_mut().filter(|p| p.chips() < big_blind) {
            let amount = p.rebuy();
            info!(player_id = %p.id(), amount, rebuys = p.stats().rebuys, "player rebought");
        }

        let winner_info: Vec<WinnerInfo> = winners
            .iter()
            .map(|&w| WinnerInfo {
                player_id: self.players[w].id().to_string(),
                name: self.players[w].name().to_string(),
                amount: share,
            })
            .collect();
        let hand_id = self.hand_id.clone().unwrap_or_default();

        info!(
            hand_id = %hand_id,
            pot = self.pot,
            share,
            winners = winner_info.len(),
            hand = %hand_name,
            "hand settled"
        );

        self.history.push(HandSummary {
            hand_id: hand_id.clone(),
            ts: format_timestamp(self.clock.utc_now()),
            winners: winner_info.clone(),
            hand_name: hand_name.clone(),
            pot: self.pot,
            board: self.community.clone(),
            actions: self.hand_log.clone(),
        });
        self.last_result = Some(HandResult {
            hand_id,
            winners: winner_info,
            hand_name,
            pot: self.pot,
            share,
            shown_hands,
            community: self.community.clone(),
        });

        if !self.players.is_empty() {
            self.dealer_index = (self.dealer_index + 1) % self.players.len();
        }
    }

    fn showdown_winners(&self, contenders: &[usize]) -> (Vec<usize>, String, Vec<ShownHand>) {
        let evaluated: Vec<(usize, HandValue)> = contenders
            .iter()
            .map(|&i| {
                let mut cards = self.players[i].hole_cards().to_vec();
                cards.extend_from_slice(&self.community);
                (i, evaluate(&cards))
            })
            .collect();

        let Some(best) = evaluated.iter().map(|(_, v)| v).max().cloned() else {
            return (Vec::new(), String::new(), Vec::new());
        };
        let winners = evaluated
            .iter()
            .filter(|(_, v)| *v == best)
            .map(|(i, _)| *i)
            .collect();
        let shown = evaluated
            .into_iter()
            .map(|(i, value)| ShownHand {
                player_id: self.players[i].id().to_string(),
                name: self.players[i].name().to_string(),
                cards: self.players[i].hole_cards().to_vec(),
                hand_name: value.rank.name().to_string(),
                value,
            })
            .collect();
        (winners, best.rank.name().to_string(), shown)
    }
}

fn format_cards(cards: &[Card]) -> String {
    cards
        .iter()
        .map(|c| c.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{Rank, Suit};
    use crate::clock::ManualClock;
    use crate::logging::TestLogSubscriber;
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::Registry;

    fn room_with(n: usize) -> GameRoom {
        let mut room = GameRoom::with_clock(
            RoomConfig {
                seed: Some(11),
                ..RoomConfig::default()
            },
            Box::new(ManualClock::new()),
        );
        for i in 0..n {
            room.add_player(format!("p{i}"), format!("Player {i}")).unwrap();
        }
        room
    }

    #[test]
    fn heads_up_dealer_posts_big_blind() {
        let mut room = room_with(2);
        room.start_game().unwrap();
        // dealer 0: sb = seat 1, bb = seat 0, first to act = seat 1
        assert_eq!(room.players()[1].bet(), 10);
        assert_eq!(room.players()[0].bet(), 20);
        assert_eq!(room.current_player().unwrap().id(), "p1");
    }

    #[test]
    fn big_blind_gets_the_option_preflop() {
        let mut room = room_with(3);
        room.start_game().unwrap();
        assert!(room.player_action("p0", ActionType::Call, 0).is_accepted());
        assert!(room.player_action("p1", ActionType::Call, 0).is_accepted());
        assert_eq!(room.stage(), GameStage::Preflop);
        assert_eq!(room.current_player().unwrap().id(), "p2");
        assert!(room.player_action("p2", ActionType::Check, 0).is_accepted());
        assert_eq!(room.stage(), GameStage::Flop);
    }

    #[test]
    fn showdown_winners_prefers_higher_tiebreak() {
        let mut room = room_with(2);
        room.start_game().unwrap();
        room.community = vec![
            Card::new(Suit::Hearts, Rank::Two),
            Card::new(Suit::Clubs, Rank::Seven),
            Card::new(Suit::Spades, Rank::Nine),
            Card::new(Suit::Diamonds, Rank::Jack),
            Card::new(Suit::Hearts, Rank::Four),
        ];
        room.players[0].set_hole_cards(&[
            Card::new(Suit::Spades, Rank::Ace),
            Card::new(Suit::Clubs, Rank::Ace),
        ]);
        room.players[1].set_hole_cards(&[
            Card::new(Suit::Spades, Rank::King),
            Card::new(Suit::Clubs, Rank::King),
        ]);
        let (winners, name, shown) = room.showdown_winners(&[0, 1]);
        assert_eq!(winners, vec![0]);
        assert_eq!(name, "One Pair");
        assert_eq!(shown.len(), 2);
    }

    #[test]
    fn split_pot_drops_the_odd_chip() {
        let mut room = GameRoom::with_clock(
            RoomConfig {
                small_blind: 5,
                big_blind: 10,
                seed: Some(2),
                ..RoomConfig::default()
            },
            Box::new(ManualClock::new()),
        );
        for i in 0..3 {
            room.add_player(format!("p{i}"), format!("Player {i}")).unwrap();
        }
        room.start_game().unwrap();
        assert!(room.player_action("p0", ActionType::Call, 0).is_accepted());
        assert!(room.player_action("p1", ActionType::Fold, 0).is_accepted());
        assert!(room.player_action("p2", ActionType::Check, 0).is_accepted());
        assert_eq!(room.pot(), 25);

        // both survivors play a royal flush on the board
        room.community = vec![
            Card::new(Suit::Hearts, Rank::Ace),
            Card::new(Suit::Hearts, Rank::King),
            Card::new(Suit::Hearts, Rank::Queen),
            Card::new(Suit::Hearts, Rank::Jack),
            Card::new(Suit::Hearts, Rank::Ten),
        ];
        room.players[0].set_hole_cards(&[
            Card::new(Suit::Clubs, Rank::Two),
            Card::new(Suit::Diamonds, Rank::Three),
        ]);
        room.players[2].set_hole_cards(&[
            Card::new(Suit::Spades, Rank::Four),
            Card::new(Suit::Clubs, Rank::Five),
        ]);
        room.settle();

        let result = room.last_result().unwrap();
        assert!(result.is_split());
        assert_eq!(result.hand_name, "Royal Flush");
        assert_eq!(result.share, 12);
        assert_eq!(result.undistributed(), 1);
        assert_eq!(room.players[0].chips(), 1002);
        assert_eq!(room.players[1].chips(), 995);
        assert_eq!(room.players[2].chips(), 1002);
        assert_eq!(room.players[0].stats().games_won, 1);
        assert_eq!(room.players[2].stats().games_won, 1);
    }

    #[test]
    fn short_all_in_winner_takes_the_whole_pot() {
        let mut room = room_with(1);
        room.seat_player(Player::new("short", "Shorty", 100)).unwrap();
        room.add_player("p2", "Player 2").unwrap();
        room.start_game().unwrap();

        room.players[0].set_hole_cards(&[
            Card::new(Suit::Spades, Rank::King),
            Card::new(Suit::Clubs, Rank::King),
        ]);
        room.players[1].set_hole_cards(&[
            Card::new(Suit::Spades, Rank::Ace),
            Card::new(Suit::Clubs, Rank::Ace),
        ]);
        room.players[2].set_hole_cards(&[
            Card::new(Suit::Diamonds, Rank::Two),
            Card::new(Suit::Clubs, Rank::Seven),
        ]);
        room.deck.stack_top(&[
            Card::new(Suit::Hearts, Rank::Two),
            Card::new(Suit::Diamonds, Rank::Five),
            Card::new(Suit::Clubs, Rank::Nine),
            Card::new(Suit::Diamonds, Rank::Jack),
            Card::new(Suit::Spades, Rank::Four),
        ]);

        assert!(room.player_action("p0", ActionType::Raise, 500).is_accepted());
        assert!(room.player_action("short", ActionType::Raise, 1000).is_accepted());
        // an all-in short of the bet leaves it unchanged
        assert_eq!(room.current_bet(), 500);
        assert!(room.player_action("p2", ActionType::Fold, 0).is_accepted());

        assert_eq!(room.stage(), GameStage::Showdown);
        assert_eq!(room.community_cards().len(), 5);
        let result = room.last_result().unwrap();
        assert_eq!(result.winners.len(), 1);
        assert_eq!(result.winners[0].player_id, "short");
        // single pot: no side pot caps what the short stack can win
        assert_eq!(result.share, 620);
        assert_eq!(room.players[1].chips(), 620);
        assert_eq!(room.players[0].chips(), 500);
    }

    #[test]
    fn settlement_is_logged() {
        let subscriber = TestLogSubscriber::new();
        let registry = Registry::default().with(subscriber.clone().into_layer::<Registry>());

        tracing::subscriber::with_default(registry, || {
            let mut room = room_with(2);
            room.start_game().unwrap();
            assert!(room.player_action("p1", ActionType::Fold, 0).is_accepted());
        });

        let entries = subscriber.entries();
        assert!(entries.iter().any(|e| e.message.contains("hand started")));
        let settled = entries
            .iter()
            .find(|e| e.message.contains("hand settled"))
            .expect("settlement event");
        assert_eq!(settled.field("pot"), Some("30"));
        assert_eq!(settled.field("hand"), Some(OTHERS_FOLDED));
    }
}
