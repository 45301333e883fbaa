mod simulation;

#[cfg(feature = "ui")]
mod ui;

use anyhow::ensure;
use clap::{Parser, ValueEnum};

use simulation::{Policy, SimWorld};

/// CLI-facing policy selection; kept separate so the simulation module
/// stays free of clap
#[derive(Debug, Clone, Copy, ValueEnum)]
enum PolicyArg {
    FixedTimer,
    Adaptive,
}

impl From<PolicyArg> for Policy {
    fn from(arg: PolicyArg) -> Self {
        match arg {
            PolicyArg::FixedTimer => Policy::FixedTimer,
            PolicyArg::Adaptive => Policy::Adaptive,
        }
    }
}

#[derive(Parser)]
#[command(name = "flux_sim")]
#[command(about = "Signalized intersection simulation with optional UI")]
struct Cli {
    /// Run with the Bevy game engine UI
    #[arg(long)]
    ui: bool,

    /// Number of simulation ticks to run in headless mode
    #[arg(long, default_value = "1000")]
    ticks: u32,

    /// Time delta per tick in seconds
    #[arg(long, default_value = "0.05")]
    delta: f32,

    /// Traffic light control policy
    #[arg(long, value_enum, default_value = "fixed-timer")]
    policy: PolicyArg,

    /// Time scale multiplier for simulated motion (e.g. 0.1 for slow-mo)
    #[arg(long, default_value = "1.0")]
    time_scale: f32,

    /// RNG seed for reproducible runs
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    ensure!(cli.time_scale > 0.0, "time scale must be positive");
    ensure!(cli.delta > 0.0, "tick delta must be positive");

    if cli.ui {
        #[cfg(feature = "ui")]
        {
            run_with_ui(&cli);
        }
        #[cfg(not(feature = "ui"))]
        {
            eprintln!("Error: UI feature is not enabled. Rebuild with --features ui");
            std::process::exit(1);
        }
    } else {
        run_headless(&cli);
    }

    Ok(())
}

/// Run the simulation in headless mode (no graphics)
fn run_headless(cli: &Cli) {
    env_logger::init();

    println!("Running intersection simulation in headless mode...");
    println!(
        "Ticks: {}, Delta: {}s, Policy: {:?}, Time scale: {}x",
        cli.ticks, cli.delta, cli.policy, cli.time_scale
    );

    // Summaries print once per second of wall-clock simulation time
    let ticks_per_second = (1.0 / cli.delta).ceil() as u32;
    println!("Running {} ticks per second (wall clock)", ticks_per_second);
    println!();

    let mut world = match cli.seed {
        Some(seed) => SimWorld::new_with_seed(seed),
        None => SimWorld::new(),
    };
    world.set_policy(cli.policy.into());
    world.set_time_scale(cli.time_scale);

    let mut tick = 0;
    while tick < cli.ticks {
        let ticks_to_run = ticks_per_second.min(cli.ticks - tick);

        for _ in 0..ticks_to_run {
            tick += 1;
            world.advance_tick(cli.delta);
        }

        println!(
            "--- After tick {} ({:.1}s wall clock) ---",
            tick,
            world.elapsed()
        );
        world.print_summary();
        world.draw_map();
        println!();
    }

    println!("=== Final State ===");
    world.print_summary();
}

#[cfg(feature = "ui")]
fn run_with_ui(cli: &Cli) {
    use bevy::log::LogPlugin;
    use bevy::prelude::*;

    println!("Starting Flux Sim UI...");
    println!();
    println!("Controls:");
    println!("  1           - Fixed-timer policy");
    println!("  2           - Adaptive policy");
    println!("  S           - Toggle slow motion");
    println!("  ESC         - Exit");
    println!();

    let mut world = SimWorld::new();
    world.set_policy(cli.policy.into());
    world.set_time_scale(cli.time_scale);

    App::new()
        .insert_resource(ui::SimWorldResource(world))
        .add_plugins(
            DefaultPlugins
                .set(LogPlugin {
                    filter: "warn,flux_sim=debug".to_string(),
                    level: bevy::log::Level::DEBUG,
                    ..default()
                })
                .set(WindowPlugin {
                    primary_window: Some(Window {
                        title: "Flux Sim - Intersection".into(),
                        resolution: (1280, 720).into(),
                        ..default()
                    }),
                    ..default()
                }),
        )
        .add_plugins(ui::FluxSimUIPlugin)
        .run();
}
