//! Simulated session: three card-counting players against the house.
//!
//! Run with `cargo run --example simulate -- [rounds] [seed]`. Set `RUST_LOG`
//! to `debug` or `trace` to follow every bet and draw.

use std::env;

use shoebox::{GameOptions, HiLoStrategy, ParticipantId, RoundEngine};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = env::args().skip(1);
    let rounds = args
        .next()
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(50);
    let seed = args
        .next()
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(42);

    let options = GameOptions::default().with_penetration(0.75);
    let mut engine = RoundEngine::new(options, seed);
    for name in ["Alice", "Bob", "Carol"] {
        engine.join(name, 1_000, HiLoStrategy::new());
    }

    let played = match engine.run(rounds) {
        Ok(played) => played,
        Err(err) => {
            eprintln!("session aborted: {err}");
            return;
        }
    };

    println!("Played {played} rounds.\n");
    for (id, player) in engine.players() {
        let rate = engine
            .log()
            .win_rate(ParticipantId::Player(id))
            .unwrap_or(0.0);
        println!(
            "{:<8} {:>6} chips  win rate {:>5.1}%{}",
            player.name(),
            player.chips(),
            rate * 100.0,
            if player.is_eligible() { "" } else { "  (out)" }
        );
    }

    let dealer = engine.dealer().participant();
    let rate = engine.log().win_rate(ParticipantId::Dealer).unwrap_or(0.0);
    println!(
        "{:<8} {:>6} chips  win rate {:>5.1}%",
        dealer.name(),
        dealer.chips(),
        rate * 100.0
    );

    let shoe = engine.shoe();
    println!(
        "\nShoe: {} of {} cards unseen, {} seen",
        shoe.total_remaining(),
        shoe.capacity(),
        shoe.total_dealt()
    );
}
