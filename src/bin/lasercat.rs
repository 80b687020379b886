use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing_subscriber::filter::LevelFilter;

#[derive(Parser, Debug)]
#[command(name = "lasercat", version)]
struct Cli {
    /// Log batch progress (repeat for per-record detail).
    #[arg(long, short, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render every record and write images, metadata and the rarity report.
    Generate(GenerateArgs),
    /// Assign traits and tiers only; print the rarity report as JSON.
    Tiers(TiersArgs),
}

#[derive(Parser, Debug)]
struct InputArgs {
    /// Genotype record feed (comma-delimited, one record per line).
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Sprite sheet JSON keyed by genotype.
    #[arg(long)]
    sprites: PathBuf,

    /// Batch config JSON; defaults apply when omitted.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Seed for the batch's random stream (overrides the config).
    #[arg(long)]
    seed: Option<u64>,

    /// Only process the first N records of the feed.
    #[arg(long)]
    limit: Option<usize>,
}

#[derive(Parser, Debug)]
struct GenerateArgs {
    #[command(flatten)]
    input: InputArgs,

    /// Output directory.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct TiersArgs {
    #[command(flatten)]
    input: InputArgs,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    match cli.cmd {
        Command::Generate(args) => cmd_generate(args),
        Command::Tiers(args) => cmd_tiers(args),
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        _ => LevelFilter::DEBUG,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

struct Inputs {
    records: Vec<lasercat::GenotypeRecord>,
    sprites: lasercat::SpriteSheet,
    config: lasercat::BatchConfig,
}

fn load_inputs(args: &InputArgs) -> anyhow::Result<Inputs> {
    let mut config = match &args.config {
        Some(path) => lasercat::BatchConfig::load(path)?,
        None => lasercat::BatchConfig::default(),
    };
    if let Some(seed) = args.seed {
        config.seed = seed;
    }

    let mut records = lasercat::read_records(&args.in_path)?;
    if let Some(limit) = args.limit {
        records.truncate(limit);
    }
    let sprites = lasercat::SpriteSheet::load(&args.sprites)?;
    Ok(Inputs {
        records,
        sprites,
        config,
    })
}

fn cmd_generate(args: GenerateArgs) -> anyhow::Result<()> {
    let inputs = load_inputs(&args.input)?;
    ensure_dir(&args.out)?;

    let mut rng = lasercat::SeededRandom::new(inputs.config.seed);
    let mut store = lasercat::FsArtifactStore::new(&args.out);
    let summary = lasercat::run_batch(
        &inputs.records,
        &inputs.sprites,
        &inputs.config,
        &mut rng,
        &mut store,
    )?;

    eprintln!(
        "wrote {} records ({} tiers) to {}",
        summary.metadata.len(),
        summary.tiers.tier_count(),
        args.out.display()
    );
    Ok(())
}

fn cmd_tiers(args: TiersArgs) -> anyhow::Result<()> {
    let inputs = load_inputs(&args.input)?;
    let mut rng = lasercat::SeededRandom::new(inputs.config.seed);
    let summary =
        lasercat::assess_batch(&inputs.records, &inputs.sprites, &inputs.config, &mut rng)?;

    let json = serde_json::to_string_pretty(&summary.report).context("serialize report")?;
    println!("{json}");
    Ok(())
}

fn ensure_dir(path: &Path) -> anyhow::Result<()> {
    std::fs::create_dir_all(path)
        .with_context(|| format!("create output dir '{}'", path.display()))
}
