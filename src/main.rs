use clap::{CommandFactory, Parser};
use clap_complete::Shell;
use colored::Colorize;
use empire_simulation::{
    create_initial_state, database, resolve_turn,
    result::{open_stream_writer, write_turn_to_stream, RunMetadata, RunResult, TurnSummary},
    GameConfig, GamePreset, InvariantChecker, TurnRng,
};
use indicatif::{ProgressBar, ProgressStyle};
use log::{info, warn};
use std::str::FromStr;
use std::time::Instant;

#[derive(Parser)]
#[command(name = "empire-simulation")]
#[command(about = "Runs a headless space-empire turn simulation.")]
struct Args {
    /// Path to configuration file (YAML or TOML). CLI arguments override
    /// config file values.
    #[arg(short, long)]
    config: Option<String>,

    /// Use a preset configuration (e.g. 'small_galaxy', 'debt_spiral').
    /// Use --list-presets to see all available presets
    #[arg(long)]
    preset: Option<String>,

    /// List all available preset configurations and exit
    #[arg(long, default_value_t = false)]
    list_presets: bool,

    /// Number of turns to resolve
    #[arg(short, long, default_value_t = 50)]
    turns: u32,

    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Write the aggregated run result as JSON to this path
    #[arg(short, long)]
    output: Option<String>,

    /// Compress JSON output using gzip (.gz extension added automatically)
    #[arg(long, default_value_t = false)]
    compress: bool,

    /// Stream one JSON line per turn to this path (.gz for gzip)
    #[arg(long)]
    stream_output: Option<String>,

    /// Export turn history and events to a SQLite database at this path
    #[arg(long)]
    db_output: Option<String>,

    /// Check the standard invariants after every turn and abort on violation
    #[arg(long, default_value_t = false)]
    check_invariants: bool,

    /// Disable the progress bar during the run
    #[arg(long, default_value_t = false)]
    no_progress: bool,

    /// Set the log level (error, warn, info, debug, trace).
    /// Can also be set via RUST_LOG environment variable
    #[arg(long, default_value = "warn")]
    log_level: String,

    /// Disable colored terminal output
    #[arg(long, default_value_t = false)]
    no_color: bool,

    /// Generate shell completions for the given shell and exit
    #[arg(long, value_enum)]
    completions: Option<Shell>,
}

fn main() {
    let args = Args::parse();

    if let Some(shell) = args.completions {
        let mut command = Args::command();
        clap_complete::generate(shell, &mut command, "empire-simulation", &mut std::io::stdout());
        return;
    }

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(args.log_level.clone()),
    )
    .init();

    if args.no_color {
        colored::control::set_override(false);
    }

    if args.list_presets {
        println!("{}", "Available presets:".bold());
        for preset in GamePreset::all() {
            println!("  {:<14} {}", preset.as_str().cyan(), preset.description());
        }
        return;
    }

    let config = match load_config(&args) {
        Ok(config) => config,
        Err(message) => {
            eprintln!("{} {}", "error:".red().bold(), message);
            std::process::exit(1);
        }
    };

    let mut rng = TurnRng::seeded(args.seed);
    let mut state = match create_initial_state(&config, &mut rng) {
        Ok(state) => state,
        Err(e) => {
            eprintln!("{} {}", "error:".red().bold(), e);
            std::process::exit(1);
        }
    };

    let mut stream_writer = match &args.stream_output {
        Some(path) => match open_stream_writer(path) {
            Ok(writer) => Some(writer),
            Err(e) => {
                eprintln!("{} {}", "error:".red().bold(), e);
                std::process::exit(1);
            }
        },
        None => None,
    };

    let progress = if args.no_progress {
        ProgressBar::hidden()
    } else {
        let bar = ProgressBar::new(args.turns as u64);
        bar.set_style(
            ProgressStyle::with_template(
                "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] turn {pos}/{len}",
            )
            .expect("valid progress template")
            .progress_chars("#>-"),
        );
        bar
    };

    let checker = InvariantChecker::standard();
    let started = Instant::now();
    let mut summaries = Vec::with_capacity(args.turns as usize);

    for _ in 0..args.turns {
        let (next, events) = match resolve_turn(&state, &[], &mut rng) {
            Ok(resolved) => resolved,
            Err(e) => {
                // No orders are fed in headless mode, so this is unreachable
                // in practice; surface it cleanly anyway.
                eprintln!("{} order rejected: {}", "error:".red().bold(), e);
                std::process::exit(1);
            }
        };
        state = next;

        if args.check_invariants {
            let violations = checker.check_all(&state);
            if !violations.is_empty() {
                for violation in &violations {
                    eprintln!("{} {}", "invariant:".red().bold(), violation);
                }
                std::process::exit(2);
            }
        }

        let summary = TurnSummary::capture(&state, events.len());
        if let Some(writer) = stream_writer.as_mut() {
            if let Err(e) = write_turn_to_stream(writer.as_mut(), &summary) {
                warn!("stream output failed: {}", e);
            }
        }
        summaries.push(summary);
        progress.inc(1);
    }
    progress.finish_and_clear();
    state.updated_at = chrono::Utc::now();

    let elapsed = started.elapsed();
    info!("{} turns resolved in {:.2?}", args.turns, elapsed);

    let run = RunResult::from_summaries(
        RunMetadata {
            seed: args.seed,
            preset: args.preset.clone(),
            turns_requested: args.turns,
        },
        summaries,
    );

    print_summary(&run, &state, elapsed.as_secs_f64());

    if let Some(path) = &args.output {
        if let Err(e) = run.write_json(path, args.compress) {
            eprintln!("{} {}", "error:".red().bold(), e);
            std::process::exit(1);
        }
        println!("Run result written to {}", path.cyan());
    }
    if let Some(path) = &args.db_output {
        if let Err(e) = database::export_run(path, &run, &state) {
            eprintln!("{} {}", "error:".red().bold(), e);
            std::process::exit(1);
        }
        println!("Run history exported to {}", path.cyan());
    }
}

fn load_config(args: &Args) -> Result<GameConfig, String> {
    if let Some(path) = &args.config {
        return GameConfig::from_file(path).map_err(|e| e.to_string());
    }
    if let Some(name) = &args.preset {
        let preset = GamePreset::from_str(name)?;
        return Ok(preset.to_config());
    }
    Ok(GameConfig::default())
}

fn print_summary(run: &RunResult, state: &empire_simulation::GameState, seconds: f64) {
    println!();
    println!("{}", "=== Run Summary ===".bold());
    println!("Turns resolved:     {}", run.metadata.turns_requested);
    println!("Wall time:          {:.2}s", seconds);
    println!("Final treasury:     {} BP", format_bp(run.final_bp));
    println!("Debt tokens:        {}", run.final_debt_tokens);
    println!("Colonies:           {}", state.colonies.len());
    println!("Total population:   {}", run.total_population);
    println!("Known planets:      {}", state.planets.len());
    println!("Corporations:       {}", state.corporations.len());
    println!("Ships in service:   {}", state.ships.len());
    println!("Events emitted:     {}", run.total_events);
    println!(
        "Discoveries made:   {}",
        state.config.discoveries.len() - state.discovery_pool.len()
    );
}

fn format_bp(bp: i64) -> String {
    if bp < 0 {
        bp.to_string().red().to_string()
    } else {
        bp.to_string().green().to_string()
    }
}
