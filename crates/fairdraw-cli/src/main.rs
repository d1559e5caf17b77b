//! fairdraw CLI — `fairdraw` command.
//!
//! Manages a participant file, runs inverse-frequency draws over it, and
//! records winners. Also draws from plain `name → frequency` documents.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use clap::{Args, Parser, Subcommand};
use rand::rngs::StdRng;
use rand::SeedableRng;

use fairdraw::ledger::{self, ParticipantId, ParticipantRecord, WinUpdate};
use fairdraw::storage::{self, FrequencyStore};
use fairdraw::{apply_win, draw_participants, draw_weights, SuspenseConfig, SuspenseReveal};

/// Environment variable naming the participant file.
const FILE_ENV: &str = "FAIRDRAW_FILE";

// ── Configuration helpers ─────────────────────────────────────────────────────

/// Resolve the participant file: `--file`, then `$FAIRDRAW_FILE`, then
/// `frequencies.json` in the working directory.
fn store_path(flag: Option<PathBuf>) -> PathBuf {
    flag.or_else(|| std::env::var_os(FILE_ENV).map(PathBuf::from))
        .unwrap_or_else(FrequencyStore::default_path)
}

fn make_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_entropy(),
    }
}

/// Load for commands that write back: a malformed file is an error, so it
/// is never overwritten. Read-only commands use [`FrequencyStore::load`].
fn load_strict(store: &FrequencyStore) -> Result<Vec<ParticipantRecord>> {
    store
        .try_load()
        .with_context(|| format!("refusing to modify {}", store.path().display()))
}

fn warn_on_invalid(records: &[ParticipantRecord]) {
    if let Err(e) = ledger::validate_collection(records) {
        eprintln!("warning: {e}");
    }
}

// ── CLI structure ─────────────────────────────────────────────────────────────

/// fairdraw — weighted draws where whoever was picked least is most likely
/// to be picked next.
#[derive(Parser, Debug)]
#[command(
    name = "fairdraw",
    about = "Inverse-frequency weighted draws",
    version,
    long_about = "fairdraw — inverse-frequency weighted draws\n\nParticipants picked less often are more likely to be picked next.\nHistory lives in a JSON file (default: frequencies.json, or $FAIRDRAW_FILE)."
)]
struct Cli {
    /// Participant file (default: $FAIRDRAW_FILE or ./frequencies.json)
    #[arg(long, global = true)]
    file: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List participants and their frequencies
    List,

    /// Add a participant
    Add {
        /// Display name
        #[arg(long)]
        name: String,

        /// Optional secondary label
        #[arg(long)]
        alias: Option<String>,

        /// Balancing offset added to the win count
        #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
        offset: i64,
    },

    /// Run a draw over the participant file
    Draw {
        /// Seed for a reproducible draw
        #[arg(long)]
        seed: Option<u64>,

        /// Record today's win for the winner and write the file back
        #[arg(long)]
        save: bool,

        #[command(flatten)]
        suspense: SuspenseArgs,
    },

    /// Record a win for today without drawing
    Win {
        /// Participant id
        id: i64,
    },

    /// Set a participant's balancing offset
    Balance {
        /// Participant id
        id: i64,

        /// New offset (may be negative)
        #[arg(allow_negative_numbers = true)]
        offset: i64,
    },

    /// Draw from a plain JSON object of name to frequency
    Weights {
        /// Weight document, e.g. {"Aline": 2, "Passeto": 1}
        input: PathBuf,

        /// Seed for a reproducible draw
        #[arg(long)]
        seed: Option<u64>,

        /// Write the document with the winner incremented by one
        #[arg(long, short)]
        output: Option<PathBuf>,

        #[command(flatten)]
        suspense: SuspenseArgs,
    },
}

#[derive(Args, Debug)]
struct SuspenseArgs {
    /// Skip the suspense pauses
    #[arg(long)]
    no_suspense: bool,

    /// Pause between suspense dots, in milliseconds
    #[arg(long, default_value_t = 500)]
    delay_ms: u64,

    /// Number of suspense dots
    #[arg(long, default_value_t = 5)]
    steps: u32,
}

impl SuspenseArgs {
    fn config(&self) -> SuspenseConfig {
        if self.no_suspense {
            return SuspenseConfig {
                steps: self.steps,
                ..SuspenseConfig::instant()
            };
        }
        SuspenseConfig {
            step_delay: Duration::from_millis(self.delay_ms),
            steps: self.steps,
            ..SuspenseConfig::default()
        }
    }
}

// ── Main entry point ──────────────────────────────────────────────────────────

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let verbose = cli.verbose;
    let store = FrequencyStore::new(store_path(cli.file));
    log::debug!("participant file: {}", store.path().display());

    let result = match cli.command {
        Commands::List => cmd_list(&store, verbose),
        Commands::Add {
            name,
            alias,
            offset,
        } => cmd_add(&store, &name, alias.as_deref(), offset, verbose),
        Commands::Draw {
            seed,
            save,
            suspense,
        } => cmd_draw(&store, seed, save, &suspense, verbose),
        Commands::Win { id } => cmd_win(&store, id, verbose),
        Commands::Balance { id, offset } => cmd_balance(&store, id, offset, verbose),
        Commands::Weights {
            input,
            seed,
            output,
            suspense,
        } => cmd_weights(&input, seed, output.as_deref(), &suspense, verbose),
    };

    if let Err(e) = result {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}

// ── Command implementations ───────────────────────────────────────────────────

/// `fairdraw list`
fn cmd_list(store: &FrequencyStore, verbose: bool) -> Result<()> {
    let records = store.load();

    if records.is_empty() {
        println!("No participants found in {}", store.path().display());
        return Ok(());
    }
    warn_on_invalid(&records);

    println!(
        "{:<6} {:<32} {:>5} {:>7} {:>5}  LAST WIN",
        "ID", "NAME", "WINS", "OFFSET", "FREQ"
    );
    println!("{}", "-".repeat(72));

    for record in &records {
        println!(
            "{:<6} {:<32} {:>5} {:>7} {:>5}  {}",
            record.id.0,
            record.display_name(),
            record.win_dates.len(),
            record.balancing_offset,
            record.effective_frequency(),
            record.last_win().unwrap_or("-")
        );
        if verbose && !record.win_dates.is_empty() {
            println!("       dates: {}", record.win_dates.join(", "));
        }
    }

    if verbose {
        println!();
        println!("File: {}", store.path().display());
    }

    Ok(())
}

/// `fairdraw add --name NAME [--alias ALIAS] [--offset N]`
fn cmd_add(
    store: &FrequencyStore,
    name: &str,
    alias: Option<&str>,
    offset: i64,
    verbose: bool,
) -> Result<()> {
    let mut records = load_strict(store)?;

    let id = ledger::add_participant(&mut records, name, alias, offset)
        .context("failed to add participant")?;
    store.save(&records).context("failed to save participants")?;

    let record = ledger::lookup_by_id(id, &records)
        .ok_or_else(|| anyhow!("participant {id} missing after insert"))?;
    println!("Added '{}'", record.display_name());
    println!("  ID:        {id}");
    println!("  Frequency: {}", record.effective_frequency());

    if verbose {
        println!("  File:      {}", store.path().display());
    }

    Ok(())
}

/// `fairdraw draw [--seed N] [--save] [--no-suspense] [--delay-ms MS] [--steps N]`
fn cmd_draw(
    store: &FrequencyStore,
    seed: Option<u64>,
    save: bool,
    suspense: &SuspenseArgs,
    verbose: bool,
) -> Result<()> {
    let mut records = if save {
        load_strict(store)?
    } else {
        store.load()
    };
    warn_on_invalid(&records);

    if verbose {
        let view = ledger::to_frequency_mapping(&records);
        let total = view.weights().total();
        println!("Frequencies (total {total}):");
        for record in view.records() {
            let freq = record.effective_frequency();
            let direct = if total > 0.0 { freq as f64 / total } else { 0.0 };
            println!(
                "  {:<32} {:>5}  ({:.3} of past draws)",
                record.display_name(),
                freq,
                direct
            );
        }
    }

    let mut rng = make_rng(seed);
    let mut reveal = SuspenseReveal::new(std::io::stdout(), suspense.config());
    let outcome = draw_participants(&records, &mut rng, &mut reveal).context("draw failed")?;

    println!();
    println!(
        "Winner: {} (id {}, chance {:.1}%)",
        outcome.winner_name,
        outcome.winner,
        outcome.winner_probability() * 100.0
    );

    if verbose {
        println!(
            "{}",
            serde_json::to_string_pretty(&outcome.distribution)
                .context("failed to render distribution")?
        );
    }

    if !save {
        println!("Not saved (use --save to record the win).");
        return Ok(());
    }

    match apply_win(&mut records, outcome.winner, fairdraw::time::today())? {
        WinUpdate::Added => {
            store.save(&records).context("failed to save participants")?;
            println!(
                "Frequency of {} updated from {} to {}.",
                outcome.winner_name,
                outcome.frequency,
                outcome.frequency.saturating_add(1)
            );
        }
        WinUpdate::AlreadyRecorded => {
            println!(
                "{} already has a win recorded today; nothing to save.",
                outcome.winner_name
            );
        }
    }

    Ok(())
}

/// `fairdraw win ID`
fn cmd_win(store: &FrequencyStore, id: i64, verbose: bool) -> Result<()> {
    let mut records = load_strict(store)?;
    let id = ParticipantId(id);

    let record = ledger::lookup_by_id_mut(id, &mut records)
        .ok_or_else(|| anyhow!("participant {id} not found in {}", store.path().display()))?;
    let before = record.effective_frequency();
    let name = record.display_name();

    match ledger::record_win(record) {
        WinUpdate::Added => {
            let after = record.effective_frequency();
            store.save(&records).context("failed to save participants")?;
            println!("Recorded a win for {name}: frequency {before} -> {after}");
        }
        WinUpdate::AlreadyRecorded => {
            println!("{name} already has a win recorded today.");
        }
    }

    if verbose {
        println!("  File: {}", store.path().display());
    }

    Ok(())
}

/// `fairdraw balance ID OFFSET`
fn cmd_balance(store: &FrequencyStore, id: i64, offset: i64, verbose: bool) -> Result<()> {
    let mut records = load_strict(store)?;
    let id = ParticipantId(id);

    let previous = ledger::set_balancing_offset(&mut records, id, offset)
        .ok_or_else(|| anyhow!("participant {id} not found in {}", store.path().display()))?;
    store.save(&records).context("failed to save participants")?;

    println!("Balancing offset of participant {id}: {previous} -> {offset}");

    if let Some(record) = ledger::lookup_by_id(id, &records) {
        let freq = record.effective_frequency();
        println!("  Frequency: {freq}");
        if freq < 0 {
            eprintln!("warning: negative frequency; draws will be rejected until it is fixed");
        }
    }

    if verbose {
        println!("  File: {}", store.path().display());
    }

    Ok(())
}

/// `fairdraw weights INPUT [--seed N] [--output PATH]`
fn cmd_weights(
    input: &Path,
    seed: Option<u64>,
    output: Option<&Path>,
    suspense: &SuspenseArgs,
    verbose: bool,
) -> Result<()> {
    let weights = storage::read_weights_file(input)?;

    let mut rng = make_rng(seed);
    let mut reveal = SuspenseReveal::new(std::io::stdout(), suspense.config());
    let outcome = draw_weights(&weights, &mut rng, &mut reveal).context("draw failed")?;

    let before = weights.get(&outcome.winner).unwrap_or(0.0);
    let after = outcome.updated.get(&outcome.winner).unwrap_or(before);
    println!();
    println!(
        "The winner was {}. Their frequency goes from {before} to {after}.",
        outcome.winner
    );

    if verbose {
        println!(
            "{}",
            serde_json::to_string_pretty(&outcome.distribution)
                .context("failed to render distribution")?
        );
    }

    match output {
        Some(path) => {
            storage::write_weights_file(path, &outcome.updated)?;
            println!("Updated weights written to {}", path.display());
        }
        None if verbose => println!("{}", storage::render_weights(&outcome.updated)?),
        None => {}
    }

    Ok(())
}
