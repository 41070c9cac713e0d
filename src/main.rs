//! Duelyard - Entry Point
//!
//! Interactive driver for the duel simulation: sets up an AI-vs-AI
//! exhibition match and steps it from a small command loop. A graphical
//! host would instead feed real wall-clock frames and human input; this
//! binary exists to watch and debug the core.

use std::io::{self, Write};

use clap::{Parser, ValueEnum};

use duelyard::ai::AiTier;
use duelyard::clock::FrameClock;
use duelyard::core::config::TuningConfig;
use duelyard::core::error::Result;
use duelyard::core::types::Side;
use duelyard::world::World;

/// Simulation step used by the command loop (60 fps equivalent)
const STEP: f32 = 1.0 / 60.0;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum TierArg {
    Easy,
    Hard,
}

impl From<TierArg> for AiTier {
    fn from(tier: TierArg) -> Self {
        match tier {
            TierArg::Easy => AiTier::Lenient,
            TierArg::Hard => AiTier::Aggressive,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "duelyard", about = "Headless two-fighter duel simulation")]
struct Args {
    /// RNG seed for fighter A's controller
    #[arg(long, default_value_t = 42)]
    seed_a: u64,

    /// RNG seed for fighter B's controller
    #[arg(long, default_value_t = 1337)]
    seed_b: u64,

    /// Difficulty tier for fighter A
    #[arg(long, value_enum, default_value_t = TierArg::Hard)]
    tier_a: TierArg,

    /// Difficulty tier for fighter B
    #[arg(long, value_enum, default_value_t = TierArg::Easy)]
    tier_b: TierArg,

    /// Optional TOML tuning file; absent keys keep defaults
    #[arg(long)]
    config: Option<std::path::PathBuf>,

    /// Run this many ticks non-interactively and exit
    #[arg(long)]
    ticks: Option<u64>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "duelyard=info".into()),
        )
        .init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => TuningConfig::load(path)?,
        None => TuningConfig::default(),
    };

    let clock = FrameClock::new(config.physics.max_dt);
    let mut world = World::new(config)?;
    world.set_scripted(Side::A, args.tier_a.into(), args.seed_a);
    world.set_scripted(Side::B, args.tier_b.into(), args.seed_b);
    world.start();

    if let Some(ticks) = args.ticks {
        for _ in 0..ticks {
            world.step(clock.bound(STEP));
        }
        display_status(&world);
        return Ok(());
    }

    println!("\n=== DUELYARD ===");
    println!("Two-fighter arena duel simulation");
    println!();
    println!("Commands:");
    println!("  tick / t        - Advance simulation by one tick");
    println!("  run <n>         - Run n simulation ticks");
    println!("  status / s      - Show detailed status");
    println!("  pause / p       - Toggle pause");
    println!("  reset / r       - Reset the round");
    println!("  snapshot        - Dump the render snapshot as JSON");
    println!("  quit / q        - Exit");
    println!();

    loop {
        display_status(&world);

        print!("> ");
        io::stdout().flush()?;

        let mut input = String::new();
        io::stdin().read_line(&mut input)?;
        let input = input.trim();

        if input.is_empty() {
            continue;
        }

        if input == "quit" || input == "q" {
            break;
        }

        if input == "tick" || input == "t" {
            world.step(clock.bound(STEP));
            println!("Tick {} complete.", world.current_tick);
            continue;
        }

        if let Some(count) = input.strip_prefix("run ") {
            if let Ok(n) = count.parse::<u32>() {
                println!("Running {} ticks...", n);
                for _ in 0..n {
                    world.step(clock.bound(STEP));
                }
                println!("Completed. Now at tick {}.", world.current_tick);
            } else {
                println!("Usage: run <number>");
            }
            continue;
        }

        if input == "status" || input == "s" {
            display_detailed_status(&world);
            continue;
        }

        if input == "pause" || input == "p" {
            world.toggle_pause();
            continue;
        }

        if input == "reset" || input == "r" {
            world.reset();
            continue;
        }

        if input == "snapshot" {
            println!("{}", serde_json::to_string_pretty(&world.snapshot())?);
            continue;
        }

        println!("Unknown command. Available: tick, run <n>, status, pause, reset, snapshot, quit");
    }

    println!("\nGoodbye! {} ticks elapsed.", world.current_tick);
    Ok(())
}

/// One-line scoreboard shown before every prompt
fn display_status(world: &World) {
    let snap = world.snapshot();
    let banner = snap
        .round
        .banner
        .clone()
        .unwrap_or_else(|| if snap.round.paused { "PAUSED".into() } else { String::new() });
    println!(
        "[tick {:>5}] A {:>5.1}hp  B {:>5.1}hp  clock {:>5.1}s  {}",
        world.current_tick,
        snap.fighters[0].health,
        snap.fighters[1].health,
        snap.round.remaining,
        banner
    );
}

fn display_detailed_status(world: &World) {
    for side in [Side::A, Side::B] {
        let fighter = world.fighter(side);
        println!(
            "Fighter {}: {:?} at ({:.0}, {:.0}) v=({:.0}, {:.0}) hp={:.1} facing {:?}",
            side,
            fighter.state(),
            fighter.position.x,
            fighter.position.y,
            fighter.velocity.x,
            fighter.velocity.y,
            fighter.health,
            fighter.facing,
        );
        println!(
            "  cooldowns: melee {:.2} ranged {:.2} dash {:.2}",
            fighter.cooldowns.melee, fighter.cooldowns.ranged, fighter.cooldowns.dash
        );
        println!(
            "  stun {:.2} stop {:.2} invuln {:.2} combo {}x (window {:.2})",
            fighter.status.hit_stun,
            fighter.status.hit_stop,
            fighter.status.invulnerability,
            fighter.combo_hits,
            fighter.status.combo_window,
        );
    }
    println!("Live attacks: {}", world.attacks.len());
}
