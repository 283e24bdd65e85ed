//! Round engine integration tests.

#![allow(clippy::float_cmp)]

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use shoebox::{
    ActionError, BetError, Card, DealError, Decision, GameOptions, HiLoStrategy, ObservableState,
    Outcome, ParticipantId, ParticipantStatus, Rank, ReshuffleError, RoundEngine, RoundError,
    RoundPhase, RoundStartError, ShowdownError, Strategy, Suit,
};

const fn card(rank: Rank, suit: Suit) -> Card {
    Card::new(rank, suit)
}

/// Bets a fixed amount and hits below a fixed score.
struct Scripted {
    bet: usize,
    hit_below: u8,
}

impl Strategy for Scripted {
    fn decide(&mut self, state: &ObservableState<'_>) -> Decision {
        if state.score < self.hit_below {
            Decision::Hit
        } else {
            Decision::Stand
        }
    }

    fn autobet(&mut self, _state: &ObservableState<'_>) -> usize {
        self.bet
    }
}

const fn scripted(bet: usize, hit_below: u8) -> Scripted {
    Scripted { bet, hit_below }
}

fn table(bankroll: usize) -> RoundEngine {
    RoundEngine::new(
        GameOptions::default()
            .with_decks(1)
            .with_dealer_bankroll(bankroll),
        7,
    )
}

fn stack(engine: &mut RoundEngine, draws: &[Card]) {
    engine.shoe_mut().stack(draws).unwrap();
}

#[test]
fn join_assigns_sequential_ids() {
    let mut engine = table(10_000);
    assert_eq!(engine.join("Alice", 1_000, scripted(100, 17)), Some(0));
    assert_eq!(engine.join("Bob", 1_000, scripted(100, 17)), Some(1));
    assert_eq!(engine.active_players(), vec![0, 1]);
    assert_eq!(engine.participant(1).unwrap().name(), "Bob");
    assert!(engine.participant(2).is_none());
}

#[test]
fn dealer_draws_to_beat_a_standing_player() {
    let mut engine = table(10_000);
    engine.join("Alice", 1_000, scripted(100, 17));
    stack(
        &mut engine,
        &[
            card(Rank::Ten, Suit::Hearts),
            card(Rank::Six, Suit::Clubs),
            card(Rank::Seven, Suit::Spades),
            card(Rank::King, Suit::Diamonds),
            card(Rank::Five, Suit::Hearts),
        ],
    );

    let summary = engine.play_round().unwrap();

    assert_eq!(summary.round, 1);
    assert_eq!(summary.dealer_value, 21);
    assert!(!summary.dealer_bust);
    assert!(!summary.dealer_blackjack);
    assert_eq!(summary.dealer_net, 100);

    let result = summary.players[0];
    assert_eq!(result.player_id, 0);
    assert_eq!(result.outcome, Outcome::Lose);
    assert_eq!(result.bet, 100);
    assert_eq!(result.payout, 0);
    assert_eq!(result.net, -100);
    assert_eq!(result.score, 17);

    assert_eq!(engine.participant(0).unwrap().chips(), 900);
    assert_eq!(engine.dealer().participant().chips(), 10_100);
    assert_eq!(engine.phase(), RoundPhase::Idle);
    assert_eq!(engine.pot(), 0);

    let records = engine.log().records();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].participant, ParticipantId::Player(0));
    assert_eq!(records[1].participant, ParticipantId::Dealer);
    assert_eq!(records[1].outcome, Outcome::Win);
    assert_eq!(records[1].net, 100);

    // The hole card was turned over, so every card dealt is now counted.
    assert_eq!(engine.shoe().total_dealt(), 5);
    assert_eq!(engine.shoe().remaining(Rank::King), 3);
}

#[test]
fn natural_pays_three_times_the_bet() {
    let mut engine = table(10_000);
    engine.join("Alice", 1_000, scripted(100, 22));
    stack(
        &mut engine,
        &[
            card(Rank::Ace, Suit::Spades),
            card(Rank::Seven, Suit::Diamonds),
            card(Rank::King, Suit::Hearts),
            card(Rank::Nine, Suit::Clubs),
            card(Rank::Two, Suit::Clubs),
        ],
    );

    engine.start_betting().unwrap();
    assert_eq!(engine.collect_bets().unwrap(), 100);
    assert_eq!(engine.pot(), 100);
    assert!(!engine.deal().unwrap());

    let alice = engine.participant(0).unwrap();
    assert!(alice.is_blackjack());
    assert_eq!(alice.status(), ParticipantStatus::Waiting);

    // Always-hit policy, but a natural takes no more cards.
    engine.play_turns().unwrap();
    assert_eq!(engine.participant(0).unwrap().hand().len(), 2);

    let drawn = engine.dealer_play().unwrap();
    assert_eq!(drawn, vec![card(Rank::Two, Suit::Clubs)]);
    assert_eq!(engine.dealer().score(), 18);

    let summary = engine.showdown().unwrap();
    assert_eq!(summary.players[0].outcome, Outcome::Blackjack);
    assert_eq!(summary.players[0].payout, 300);
    assert_eq!(summary.players[0].net, 200);
    assert_eq!(summary.dealer_net, -200);
    assert_eq!(engine.participant(0).unwrap().chips(), 1_200);
    assert_eq!(engine.dealer().participant().chips(), 9_800);
}

#[test]
fn dealer_blackjack_on_peek_ends_the_round() {
    let mut engine = table(10_000);
    engine.join("Alice", 1_000, scripted(100, 17));
    engine.join("Bob", 1_000, scripted(100, 17));
    stack(
        &mut engine,
        &[
            card(Rank::Ten, Suit::Diamonds),
            card(Rank::Ace, Suit::Clubs),
            card(Rank::Ace, Suit::Hearts),
            card(Rank::Nine, Suit::Diamonds),
            card(Rank::Queen, Suit::Clubs),
            card(Rank::King, Suit::Spades),
        ],
    );

    engine.start_betting().unwrap();
    engine.collect_bets().unwrap();
    assert!(engine.deal().unwrap());

    assert_eq!(engine.phase(), RoundPhase::RoundOver);
    assert!(engine.dealer().is_revealed());
    assert_eq!(engine.shoe().dealt(Rank::King), 1);
    assert_eq!(engine.play_turns(), Err(ActionError::InvalidState));
    assert_eq!(engine.dealer_play(), Err(ShowdownError::InvalidState));

    let summary = engine.showdown().unwrap();
    assert!(summary.dealer_blackjack);
    assert_eq!(summary.players[0].outcome, Outcome::Lose);
    assert_eq!(summary.players[0].net, -100);
    assert_eq!(summary.players[1].outcome, Outcome::Push);
    assert_eq!(summary.players[1].net, 0);
    assert_eq!(summary.dealer_net, 100);

    assert_eq!(engine.participant(0).unwrap().chips(), 900);
    assert_eq!(engine.participant(1).unwrap().chips(), 1_000);
    assert_eq!(engine.dealer().participant().chips(), 10_100);
}

#[test]
fn bust_settles_immediately_and_dealer_skips_drawing() {
    let mut engine = table(10_000);
    engine.join("Alice", 1_000, scripted(100, 17));
    stack(
        &mut engine,
        &[
            card(Rank::Ten, Suit::Hearts),
            card(Rank::Nine, Suit::Diamonds),
            card(Rank::Six, Suit::Spades),
            card(Rank::Five, Suit::Clubs),
            card(Rank::King, Suit::Clubs),
        ],
    );

    engine.start_betting().unwrap();
    engine.collect_bets().unwrap();
    engine.deal().unwrap();
    engine.play_turns().unwrap();

    let alice = engine.participant(0).unwrap();
    assert!(alice.is_lost());
    assert_eq!(alice.status(), ParticipantStatus::Settled);
    assert_eq!(alice.outcome(), Some(Outcome::Lose));
    assert_eq!(alice.chips(), 900);

    assert!(engine.dealer_play().unwrap().is_empty());
    let summary = engine.showdown().unwrap();
    assert_eq!(summary.dealer_value, 14);
    assert_eq!(summary.players[0].outcome, Outcome::Lose);
    assert_eq!(summary.players[0].score, 26);
    assert_eq!(engine.dealer().participant().chips(), 10_100);
}

#[test]
fn dealer_bust_pays_standing_players() {
    let mut engine = table(10_000);
    engine.join("Alice", 1_000, scripted(100, 17));
    stack(
        &mut engine,
        &[
            card(Rank::Ten, Suit::Hearts),
            card(Rank::Six, Suit::Clubs),
            card(Rank::Eight, Suit::Spades),
            card(Rank::Ten, Suit::Diamonds),
            card(Rank::King, Suit::Clubs),
        ],
    );

    let summary = engine.play_round().unwrap();
    assert!(summary.dealer_bust);
    assert_eq!(summary.dealer_value, 26);
    assert_eq!(summary.players[0].outcome, Outcome::Win);
    assert_eq!(summary.players[0].payout, 200);
    assert_eq!(summary.players[0].net, 100);
    assert_eq!(summary.dealer_net, -100);
    assert_eq!(engine.participant(0).unwrap().chips(), 1_100);
    assert_eq!(engine.dealer().participant().chips(), 9_900);
    assert_eq!(engine.log().records()[1].outcome, Outcome::Lose);
}

#[test]
fn higher_total_beats_the_dealer() {
    let mut engine = table(10_000);
    engine.join("Alice", 1_000, scripted(100, 17));
    stack(
        &mut engine,
        &[
            card(Rank::Ten, Suit::Hearts),
            card(Rank::Ten, Suit::Clubs),
            card(Rank::Ten, Suit::Spades),
            card(Rank::Seven, Suit::Diamonds),
        ],
    );

    let summary = engine.play_round().unwrap();
    assert!(!summary.dealer_bust);
    assert_eq!(summary.dealer_value, 17);
    assert_eq!(summary.players[0].score, 20);
    assert_eq!(summary.players[0].outcome, Outcome::Win);
    assert_eq!(summary.players[0].net, 100);
    assert_eq!(engine.participant(0).unwrap().chips(), 1_100);
    assert_eq!(engine.log().win_rate(ParticipantId::Player(0)), Some(1.0));
}

#[test]
fn equal_totals_push() {
    let mut engine = table(10_000);
    engine.join("Alice", 1_000, scripted(100, 17));
    stack(
        &mut engine,
        &[
            card(Rank::Ten, Suit::Hearts),
            card(Rank::Ten, Suit::Clubs),
            card(Rank::Eight, Suit::Spades),
            card(Rank::Eight, Suit::Diamonds),
        ],
    );

    let summary = engine.play_round().unwrap();
    assert_eq!(summary.players[0].outcome, Outcome::Push);
    assert_eq!(summary.players[0].payout, 100);
    assert_eq!(summary.dealer_net, 0);
    assert_eq!(engine.participant(0).unwrap().chips(), 1_000);
    assert_eq!(engine.log().records()[1].outcome, Outcome::Push);
}

#[test]
fn dealer_21_pushes_only_against_21() {
    let mut engine = table(10_000);
    engine.join("Alice", 1_000, scripted(100, 22));
    stack(
        &mut engine,
        &[
            card(Rank::Seven, Suit::Hearts),
            card(Rank::Six, Suit::Clubs),
            card(Rank::Seven, Suit::Spades),
            card(Rank::Five, Suit::Clubs),
            card(Rank::Seven, Suit::Diamonds),
            card(Rank::King, Suit::Hearts),
        ],
    );

    engine.start_betting().unwrap();
    engine.collect_bets().unwrap();
    engine.deal().unwrap();
    engine.play_turns().unwrap();
    // Reaching 21 ends the turn even for an always-hit policy.
    assert_eq!(engine.participant(0).unwrap().hand().len(), 3);
    engine.dealer_play().unwrap();
    let summary = engine.showdown().unwrap();
    assert_eq!(summary.dealer_value, 21);
    assert_eq!(summary.players[0].outcome, Outcome::Push);

    let mut engine = table(10_000);
    engine.join("Bob", 1_000, scripted(100, 17));
    stack(
        &mut engine,
        &[
            card(Rank::King, Suit::Hearts),
            card(Rank::Six, Suit::Clubs),
            card(Rank::Queen, Suit::Spades),
            card(Rank::Five, Suit::Clubs),
            card(Rank::Ten, Suit::Diamonds),
        ],
    );

    let summary = engine.play_round().unwrap();
    assert_eq!(summary.dealer_value, 21);
    assert_eq!(summary.players[0].score, 20);
    assert_eq!(summary.players[0].outcome, Outcome::Lose);
}

#[test]
fn place_bet_validation() {
    let mut engine = table(300);
    engine.join("Alice", 120, scripted(0, 17));
    engine.join("Bob", 1_000, scripted(0, 17));

    assert_eq!(engine.place_bet(0, 50), Err(BetError::InvalidState));

    engine.start_betting().unwrap();
    assert_eq!(engine.place_bet(0, 0), Err(BetError::ZeroBet));
    assert_eq!(engine.place_bet(9, 50), Err(BetError::PlayerNotFound));
    assert_eq!(engine.place_bet(0, 200), Err(BetError::InsufficientFunds));
    assert_eq!(engine.place_bet(1, 200), Err(BetError::ExceedsCoverage));

    engine.place_bet(0, 100).unwrap();
    assert_eq!(engine.place_bet(0, 10), Err(BetError::AlreadyPlaced));
    assert_eq!(engine.participant(0).unwrap().chips(), 20);
    assert_eq!(engine.participant(0).unwrap().current_bet(), 100);

    // 300 chips cover 150 of stakes; 100 are taken.
    assert_eq!(engine.place_bet(1, 60), Err(BetError::ExceedsCoverage));
    engine.place_bet(1, 50).unwrap();
    assert_eq!(engine.pot(), 150);
}

#[test]
fn autobets_are_capped_to_coverage() {
    let mut engine = table(500);
    engine.join("Alice", 1_000, scripted(200, 17));
    engine.join("Bob", 1_000, scripted(200, 17));

    engine.start_betting().unwrap();
    assert_eq!(engine.collect_bets().unwrap(), 250);
    assert_eq!(engine.participant(0).unwrap().current_bet(), 200);
    assert_eq!(engine.participant(1).unwrap().current_bet(), 50);
    assert_eq!(engine.participant(1).unwrap().chips(), 950);
}

#[test]
fn zero_autobet_sits_the_round_out() {
    let mut engine = table(10_000);
    engine.join("Alice", 1_000, scripted(0, 17));
    engine.join("Bob", 1_000, scripted(100, 17));

    engine.start_betting().unwrap();
    assert_eq!(engine.collect_bets().unwrap(), 100);
    engine.deal().unwrap();

    assert_eq!(engine.bettors(), &[1]);
    assert!(engine.participant(0).unwrap().hand().is_empty());
    assert_eq!(engine.participant(1).unwrap().hand().len(), 2);
}

#[test]
fn round_without_bets_is_cancelled() {
    let mut engine = table(10_000);
    engine.join("Alice", 1_000, scripted(0, 17));

    assert_eq!(
        engine.play_round().unwrap_err(),
        RoundError::Deal(DealError::NoBets)
    );
    assert_eq!(engine.phase(), RoundPhase::Idle);
    assert_eq!(engine.round(), 0);
    assert_eq!(engine.run(3).unwrap(), 0);
    assert!(engine.log().is_empty());
}

#[test]
fn cancel_round_refunds_stakes() {
    let mut engine = table(10_000);
    engine.join("Alice", 1_000, scripted(0, 17));

    engine.start_betting().unwrap();
    engine.place_bet(0, 250).unwrap();
    engine.cancel_round().unwrap();

    assert_eq!(engine.participant(0).unwrap().chips(), 1_000);
    assert_eq!(engine.participant(0).unwrap().current_bet(), 0);
    assert_eq!(engine.phase(), RoundPhase::Idle);
    assert_eq!(engine.pot(), 0);
    assert_eq!(engine.cancel_round(), Err(BetError::InvalidState));
}

#[test]
fn phase_checks() {
    let mut engine = table(10_000);
    engine.join("Alice", 1_000, scripted(100, 17));

    assert_eq!(engine.deal(), Err(DealError::InvalidState));
    assert_eq!(engine.play_turns(), Err(ActionError::InvalidState));
    assert_eq!(engine.showdown().unwrap_err(), ShowdownError::InvalidState);

    engine.start_betting().unwrap();
    assert_eq!(engine.start_betting(), Err(RoundStartError::InvalidState));
    assert_eq!(engine.reshuffle(), Ok(()));

    engine.collect_bets().unwrap();
    if !engine.deal().unwrap() {
        assert_eq!(engine.reshuffle(), Err(ReshuffleError::InvalidState));
        assert_eq!(engine.collect_bets(), Err(BetError::InvalidState));
        assert_eq!(engine.showdown().unwrap_err(), ShowdownError::InvalidState);
    }
}

#[test]
fn broke_players_sit_out_but_stay_in_the_log() {
    let mut engine = table(10_000);
    engine.join("Alice", 100, scripted(100, 17));
    stack(
        &mut engine,
        &[
            card(Rank::Ten, Suit::Hearts),
            card(Rank::Six, Suit::Clubs),
            card(Rank::Seven, Suit::Spades),
            card(Rank::King, Suit::Diamonds),
            card(Rank::Five, Suit::Hearts),
        ],
    );

    engine.play_round().unwrap();

    let alice = engine.participant(0).unwrap();
    assert_eq!(alice.chips(), 0);
    assert!(!alice.is_eligible());
    assert_eq!(alice.status(), ParticipantStatus::Ineligible);
    assert!(engine.active_players().is_empty());
    assert_eq!(engine.players().count(), 1);

    assert_eq!(engine.run(5).unwrap(), 0);
    assert_eq!(
        engine
            .log()
            .for_participant(ParticipantId::Player(0))
            .count(),
        1
    );
    assert_eq!(engine.log().win_rate(ParticipantId::Player(0)), Some(0.0));

    engine.start_betting().unwrap();
    assert_eq!(engine.place_bet(0, 10), Err(BetError::Ineligible));
}

#[test]
fn bankrupt_dealer_closes_the_table() {
    let mut engine = table(1);
    engine.join("Alice", 1_000, scripted(100, 17));
    assert_eq!(engine.start_betting(), Err(RoundStartError::DealerBankrupt));
    assert_eq!(engine.run(3).unwrap(), 0);
    assert_eq!(engine.round(), 0);

    let mut engine = table(400);
    engine.join("Alice", 1_000, scripted(200, 17));
    stack(
        &mut engine,
        &[
            card(Rank::Ace, Suit::Spades),
            card(Rank::Seven, Suit::Diamonds),
            card(Rank::King, Suit::Hearts),
            card(Rank::Nine, Suit::Clubs),
            card(Rank::Two, Suit::Clubs),
        ],
    );

    assert_eq!(engine.run(5).unwrap(), 1);
    assert_eq!(engine.dealer().participant().chips(), 0);
    assert_eq!(engine.participant(0).unwrap().chips(), 1_400);
}

#[test]
fn strategies_never_see_the_hole_card() {
    struct Recorder {
        seen: Rc<RefCell<Vec<(Option<Card>, usize, usize)>>>,
    }

    impl Strategy for Recorder {
        fn decide(&mut self, state: &ObservableState<'_>) -> Decision {
            let kings = state.remaining.get(&Rank::King).copied().unwrap_or(0);
            let seen = state.dealt.values().sum();
            self.seen
                .borrow_mut()
                .push((state.dealer_up_card, kings, seen));
            Decision::Stand
        }
    }

    let seen = Rc::new(RefCell::new(Vec::new()));
    let mut engine = table(10_000);
    engine.join(
        "Alice",
        1_000,
        Recorder {
            seen: Rc::clone(&seen),
        },
    );
    stack(
        &mut engine,
        &[
            card(Rank::Ten, Suit::Hearts),
            card(Rank::Six, Suit::Clubs),
            card(Rank::Seven, Suit::Spades),
            card(Rank::King, Suit::Diamonds),
            card(Rank::Five, Suit::Hearts),
        ],
    );

    engine.play_round().unwrap();

    let seen = seen.borrow();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0], (Some(card(Rank::Six, Suit::Clubs)), 4, 3));
}

#[test]
fn penetration_triggers_reshuffle_between_rounds() {
    let mut engine = RoundEngine::new(
        GameOptions::default()
            .with_decks(1)
            .with_penetration(0.5),
        3,
    );
    engine.join("Alice", 1_000, scripted(100, 17));

    for _ in 0..26 {
        engine.shoe_mut().draw(shoebox::Facing::Up);
    }
    assert_eq!(engine.shoe().total_dealt(), 26);

    engine.start_betting().unwrap();
    assert_eq!(engine.shoe().cards_in_pool(), 52);
    assert_eq!(engine.shoe().total_dealt(), 0);
}

#[test]
fn session_is_zero_sum() {
    let mut engine = RoundEngine::new(GameOptions::default().with_penetration(0.75), 2024);
    for name in ["Alice", "Bob", "Carol"] {
        engine.join(name, 1_000, HiLoStrategy::new());
    }

    let played = engine.run(40).unwrap();
    assert!(played > 0);
    assert_eq!(engine.round() as usize, played);

    let chips: usize = engine.players().map(|(_, player)| player.chips()).sum::<usize>()
        + engine.dealer().participant().chips();
    assert_eq!(chips, 13_000);

    let mut per_round = BTreeMap::new();
    for record in engine.log().iter() {
        *per_round.entry(record.round).or_insert(0isize) += record.net;
    }
    assert_eq!(per_round.len(), played);
    assert!(per_round.values().all(|net| *net == 0));

    for id in 0..3 {
        let participant = ParticipantId::Player(id);
        let Some(rate) = engine.log().win_rate(participant) else {
            continue;
        };
        assert!((0.0..=1.0).contains(&rate));
        let series = engine.log().win_rate_series(participant);
        assert_eq!(series.last().map(|(_, rate)| *rate), Some(rate));
    }
    assert_eq!(
        engine.log().for_participant(ParticipantId::Dealer).count(),
        played
    );
}
