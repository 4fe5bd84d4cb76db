#[cfg(not(feature = "std"))]
fn main() {}

#[cfg(feature = "std")]
use broadside::{
    host, init_logging,
    render::{self, coord_label, parse_coord, LEGEND},
    AttackOutcome, Command, Event, GameConfig, GameSession, Grid, Orientation, Phase, PlayerKind,
    Report, Seat,
};

#[cfg(feature = "std")]
use clap::Parser;
#[cfg(feature = "std")]
use rand::rngs::SmallRng;
#[cfg(feature = "std")]
use rand::SeedableRng;
#[cfg(feature = "std")]
use std::path::PathBuf;
#[cfg(feature = "std")]
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[cfg(feature = "std")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Parser)]
#[cfg(feature = "std")]
enum Commands {
    /// Play an interactive game in the terminal.
    Play {
        /// Two humans sharing the terminal instead of playing the computer.
        #[arg(long)]
        pvp: bool,
        #[arg(long, help = "Fix RNG seed for reproducible games (e.g., --seed 12345)")]
        seed: Option<u64>,
        /// Board side length, overriding the configuration file.
        #[arg(long)]
        size: Option<usize>,
        /// Game configuration as JSON.
        #[arg(long)]
        config: Option<PathBuf>,
        #[arg(long, default_value = "Player 1")]
        name1: String,
        #[arg(long, default_value = "Player 2")]
        name2: String,
        /// Skip manual setup and arrange every human fleet at random.
        #[arg(long)]
        random_fleet: bool,
    },
    /// Print the default configuration as JSON.
    Config,
}

#[cfg(feature = "std")]
type Input = Lines<BufReader<Stdin>>;

#[cfg(feature = "std")]
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();

    match cli.command {
        Commands::Play {
            pvp,
            seed,
            size,
            config,
            name1,
            name2,
            random_fleet,
        } => {
            let mut config = match config {
                Some(path) => {
                    let text = std::fs::read_to_string(&path)?;
                    serde_json::from_str::<GameConfig>(&text)?
                }
                None => GameConfig::default(),
            };
            if let Some(size) = size {
                config.board_size = size;
            }
            if let Some(s) = seed {
                println!("Using fixed seed: {} (game will be reproducible)", s);
            }
            let rng = if let Some(s) = seed {
                SmallRng::seed_from_u64(s)
            } else {
                let mut seed_rng = rand::rng();
                SmallRng::from_rng(&mut seed_rng)
            };
            let second = if pvp {
                PlayerKind::Human
            } else {
                PlayerKind::Scripted
            };
            let (session, report) = GameSession::new(
                config,
                [(name1.as_str(), PlayerKind::Human), (name2.as_str(), second)],
                rng,
            )
            .map_err(|e| anyhow::anyhow!(e))?;
            run_game(session, report, random_fleet).await?;
        }
        Commands::Config => {
            println!("{}", serde_json::to_string_pretty(&GameConfig::default())?);
        }
    }
    Ok(())
}

#[cfg(feature = "std")]
async fn run_game(
    mut session: GameSession,
    report: Report,
    random_fleet: bool,
) -> anyhow::Result<()> {
    let mut input = BufReader::new(tokio::io::stdin()).lines();
    follow(&mut session, report).await?;

    loop {
        match session.phase() {
            Phase::Setup => {
                let Some(seat) = session.setup_seat() else {
                    break;
                };
                let report = if random_fleet {
                    session
                        .randomize_fleet(seat)
                        .map_err(|e| anyhow::anyhow!(e))?;
                    session
                        .confirm_fleet(seat)
                        .map_err(|e| anyhow::anyhow!(e))?
                } else {
                    match setup_step(&mut session, seat, &mut input).await? {
                        Some(report) => report,
                        None => return Ok(()),
                    }
                };
                follow(&mut session, report).await?;
            }
            Phase::Playing => {
                let Some(seat) = session.active_seat() else {
                    break;
                };
                print_boards(&session, seat);
                println!("{}, attack (e.g. B7) or 'quit':", session.player(seat).name());
                let Some(line) = input.next_line().await? else {
                    return Ok(());
                };
                let line = line.trim();
                if line.eq_ignore_ascii_case("quit") {
                    return Ok(());
                }
                let target = match parse_coord(line, session.config().board_size) {
                    Ok(target) => target,
                    Err(msg) => {
                        println!("{}", msg);
                        continue;
                    }
                };
                match session.submit(Command::Attack { seat, target }) {
                    Ok(report) => follow(&mut session, report).await?,
                    Err(e) => println!("{}", e),
                }
            }
            Phase::Finished => break,
        }
    }

    println!("\n=== GAME OVER ===\n");
    for seat in Seat::BOTH {
        println!("{}'s fleet:", session.player(seat).name());
        println!("{}", session.snapshot(seat, Grid::Own));
    }
    println!("{}", session.status());
    Ok(())
}

/// One setup command for `seat`. `None` when the player quits.
#[cfg(feature = "std")]
async fn setup_step(
    session: &mut GameSession,
    seat: Seat,
    input: &mut Input,
) -> anyhow::Result<Option<Report>> {
    let player = session.player(seat);
    println!("\n{}", session.status());
    println!("{}", session.snapshot(seat, Grid::Own));
    println!("{}", LEGEND);
    for (i, ship) in player.fleet().ships().iter().enumerate() {
        let at = match ship.anchor() {
            Some(anchor) => format!("at {} {:?}", coord_label(anchor), ship.orientation()),
            None => format!("unplaced ({:?})", ship.orientation()),
        };
        println!("  #{} length {} {}", i, ship.length(), at);
    }
    println!(
        "commands: place <#> <cell> [h|v], preview <#> <cell> [h|v], rotate <#>, remove <#>, clear, random, done, quit"
    );

    let Some(line) = input.next_line().await? else {
        return Ok(None);
    };
    let words: Vec<&str> = line.split_whitespace().collect();
    let size = session.config().board_size;
    let command = match words.as_slice() {
        ["quit"] => return Ok(None),
        ["done"] => Command::ConfirmFleet { seat },
        ["random"] => Command::RandomizeFleet { seat },
        ["clear"] => Command::ClearPreview { seat },
        ["rotate", ship] | ["remove", ship] => {
            let Ok(index) = ship.parse::<usize>() else {
                println!("invalid ship number '{}'", ship);
                return Ok(Some(Report::default()));
            };
            if words[0] == "rotate" {
                Command::ToggleOrientation { seat, ship: index }
            } else {
                Command::RemoveShip { seat, ship: index }
            }
        }
        [verb @ ("place" | "preview"), ship, cell, rest @ ..] => {
            let parsed = ship
                .parse::<usize>()
                .map_err(|_| format!("invalid ship number '{}'", ship))
                .and_then(|ship| Ok((ship, parse_coord(cell, size)?)));
            let (ship, anchor) = match parsed {
                Ok(parsed) => parsed,
                Err(msg) => {
                    println!("{}", msg);
                    return Ok(Some(Report::default()));
                }
            };
            let orientation = match rest.first() {
                Some(o) if o.eq_ignore_ascii_case("v") => Orientation::Vertical,
                Some(_) => Orientation::Horizontal,
                None => session.player(seat).fleet().ship(ship).map_or(
                    Orientation::Horizontal,
                    |s| s.orientation(),
                ),
            };
            if *verb == "place" {
                Command::PlaceShip {
                    seat,
                    ship,
                    anchor,
                    orientation,
                }
            } else {
                Command::PreviewShip {
                    seat,
                    ship,
                    anchor,
                    orientation,
                }
            }
        }
        _ => {
            println!("unrecognised command");
            return Ok(Some(Report::default()));
        }
    };
    match session.submit(command) {
        Ok(report) => Ok(Some(report)),
        Err(e) => {
            println!("{}", e);
            Ok(Some(Report::default()))
        }
    }
}

/// Print a report's events and wait out any delays it asks for.
#[cfg(feature = "std")]
async fn follow(session: &mut GameSession, report: Report) -> anyhow::Result<()> {
    host::drive_with(session, report, |session, event| {
        if let Some(line) = describe(session, event) {
            println!("{}", line);
        }
    })
    .await
    .map_err(|e| anyhow::anyhow!(e))
}

#[cfg(feature = "std")]
fn describe(session: &GameSession, event: &Event) -> Option<String> {
    let name = |seat: Seat| session.player(seat).name().to_string();
    match *event {
        Event::Previewed { ref placement, .. } => Some(if placement.accepted {
            "fits".to_string()
        } else {
            "does not fit".to_string()
        }),
        Event::ShipUnplaced { ship, .. } => Some(format!("ship #{} is unplaced", ship)),
        Event::FleetConfirmed { seat } => Some(format!("{} is ready", name(seat))),
        Event::PlayStarted { first } => Some(format!("{} plays", name(first))),
        Event::Attacked {
            attacker,
            target,
            outcome,
        } => {
            let result = match outcome {
                AttackOutcome::Miss => "miss".to_string(),
                AttackOutcome::Hit => "hit".to_string(),
                AttackOutcome::Sunk { length, .. } => format!("sunk a ship of length {}", length),
            };
            Some(format!("{} fires at {}: {}", name(attacker), coord_label(target), result))
        }
        Event::ShipSunk { owner, afloat, .. } => {
            Some(format!("{} has {} ship(s) left", name(owner), afloat))
        }
        Event::TurnPassed { to } => Some(format!("{} plays", name(to))),
        Event::GameOver { winner } => Some(format!("{} won", name(winner))),
        _ => None,
    }
}

#[cfg(feature = "std")]
fn print_boards(session: &GameSession, seat: Seat) {
    let own = session.snapshot(seat, Grid::Own);
    let enemy = session.snapshot(seat, Grid::Enemy);
    println!(
        "\n{}",
        render::render_pair("Your fleet", &own, "Enemy waters", &enemy)
    );
    println!(
        "Enemy ships left: {:?}",
        session.remaining_lengths(seat.other())
    );
}
