use broadside::{host, AttackOutcome, Event, GameConfig, GameSession, PlayerKind, Seat};
use rand::{rngs::SmallRng, SeedableRng};
use serde_json::json;

#[derive(Default)]
struct Tally {
    attacks: usize,
    hits: usize,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 || args.len() > 3 {
        eprintln!("Usage: {} <seed> [board_size]", args[0]);
        std::process::exit(1);
    }
    let seed: u64 = args[1].parse()?;
    let mut config = GameConfig::default().without_delays();
    if let Some(size) = args.get(2) {
        config.board_size = size.parse()?;
    }

    let rng = SmallRng::seed_from_u64(seed);
    let (mut session, report) = GameSession::new(
        config,
        [("player1", PlayerKind::Scripted), ("player2", PlayerKind::Scripted)],
        rng,
    )
    .map_err(|e| anyhow::anyhow!(e))?;
    let events = host::drive(&mut session, report)
        .await
        .map_err(|e| anyhow::anyhow!(e))?;

    let mut tallies = [Tally::default(), Tally::default()];
    for event in &events {
        if let Event::Attacked {
            attacker, outcome, ..
        } = event
        {
            let tally = &mut tallies[attacker.index()];
            tally.attacks += 1;
            if *outcome != AttackOutcome::Miss {
                tally.hits += 1;
            }
        }
    }

    let winner = session.winner();
    let status = |seat: Seat| match winner {
        Some(w) if w == seat => "Won",
        Some(_) => "Lost",
        None => "InProgress",
    };
    let seat_json = |seat: Seat| {
        let tally = &tallies[seat.index()];
        json!({
            "status": status(seat),
            "attacks": tally.attacks,
            "hits": tally.hits,
            "afloat": session.afloat(seat),
        })
    };

    let result = json!({
        "seed": seed,
        "player1": seat_json(Seat::First),
        "player2": seat_json(Seat::Second),
        "winner": winner.map(|w| session.player(w).name()),
    });

    println!("{}", serde_json::to_string(&result)?);
    Ok(())
}
