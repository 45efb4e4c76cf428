use holdem_ai::{act_for_current_seat, decide_action};
use holdem_engine::clock::ManualClock;
use holdem_engine::config::RoomConfig;
use holdem_engine::logger::GameStage;
use holdem_engine::player::{ActionType, Controller, Personality, Player};
use holdem_engine::room::GameRoom;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

fn room(seed: u64) -> GameRoom {
    GameRoom::with_clock(
        RoomConfig {
            seed: Some(seed),
            ..RoomConfig::default()
        },
        Box::new(ManualClock::new()),
    )
}

fn bot_table(seed: u64) -> GameRoom {
    let mut room = room(seed);
    for (i, personality) in Personality::all().into_iter().enumerate() {
        room.add_ai_player(format!("bot{i}"), format!("Bot {i}"), personality)
            .unwrap();
    }
    room
}

/// Drives AI seats until the hand settles; returns the number of actions.
fn play_hand(room: &mut GameRoom, rng: &mut ChaCha20Rng) -> usize {
    room.start_game().unwrap();
    let mut steps = 0;
    while room.stage() != GameStage::Showdown {
        let outcome = act_for_current_seat(room, rng).expect("AI seat on the clock");
        assert!(outcome.is_accepted(), "AI action refused: {outcome:?}");
        steps += 1;
        assert!(steps < 1000, "hand did not finish");
    }
    steps
}

#[test]
fn ai_tables_play_hands_to_completion() {
    let mut room = bot_table(17);
    let mut rng = ChaCha20Rng::seed_from_u64(99);
    for _ in 0..30 {
        let steps = play_hand(&mut room, &mut rng);
        assert!(steps >= 1);
        assert!(room.last_result().is_some());
    }
    assert_eq!(room.get_game_history(100).len(), 20);
    assert!(room.players().iter().all(|p| p.stats().games_played == 30));
    // rebuys keep every stack at or above the big blind between hands
    assert!(room.players().iter().all(|p| p.chips() >= 20));
}

#[test]
fn seeded_games_replay_identically() {
    let run = || {
        let mut room = bot_table(4);
        let mut rng = ChaCha20Rng::seed_from_u64(8);
        for _ in 0..5 {
            play_hand(&mut room, &mut rng);
        }
        room.get_game_history(5)
            .into_iter()
            .map(|h| (h.winners.clone(), h.pot, h.board.clone(), h.actions.clone()))
            .collect::<Vec<_>>()
    };
    assert_eq!(run(), run());
}

#[test]
fn folded_seat_is_a_no_op() {
    let mut room = bot_table(2);
    room.start_game().unwrap();
    let id = room.current_player().unwrap().id().to_string();
    assert!(room.player_action(&id, ActionType::Fold, 0).is_accepted());

    let folded = room.player(&id).unwrap();
    let mut rng = ChaCha20Rng::seed_from_u64(1);
    assert_eq!(
        decide_action(folded, &room.table_view(), &mut rng),
        (ActionType::Check, 0)
    );
}

#[test]
fn short_stack_facing_a_big_bet_calls_all_in_or_folds() {
    let mut room = room(6);
    room.add_player("p0", "Human").unwrap();
    room.seat_player(
        Player::new("short", "Shorty", 50).with_controller(Controller::Ai(Personality::Tight)),
    )
    .unwrap();
    room.add_player("p2", "Other").unwrap();
    room.start_game().unwrap();
    assert!(room.player_action("p0", ActionType::Raise, 500).is_accepted());

    let short = room.current_player().unwrap();
    assert_eq!(short.id(), "short");
    for seed in 0..20 {
        let mut rng = ChaCha20Rng::seed_from_u64(seed);
        let decision = decide_action(short, &room.table_view(), &mut rng);
        assert!(
            decision == (ActionType::Call, 40) || decision == (ActionType::Fold, 0),
            "unexpected {decision:?}"
        );
    }
}

#[test]
fn decisions_are_only_made_for_ai_seats() {
    let mut room = room(3);
    room.add_player("p0", "Human").unwrap();
    room.add_ai_player("bot", "Bot", Personality::Loose).unwrap();
    let mut rng = ChaCha20Rng::seed_from_u64(5);

    // no hand in progress
    assert!(act_for_current_seat(&mut room, &mut rng).is_none());

    room.start_game().unwrap();
    // heads-up: the bot posts the small blind and acts first
    assert_eq!(room.current_player().unwrap().id(), "bot");
    assert!(act_for_current_seat(&mut room, &mut rng).is_some());

    if room.stage() != GameStage::Showdown {
        assert_eq!(room.current_player().unwrap().id(), "p0");
        assert!(act_for_current_seat(&mut room, &mut rng).is_none());
    }
}

#[test]
fn pot_is_blinds_plus_every_action() {
    let mut room = bot_table(23);
    let mut rng = ChaCha20Rng::seed_from_u64(31);
    for _ in 0..10 {
        play_hand(&mut room, &mut rng);
        let hand = room.get_game_history(1)[0];
        let moved: u32 = hand.actions.iter().map(|r| r.amount).sum();
        assert_eq!(hand.pot, 30 + moved);
    }
}
