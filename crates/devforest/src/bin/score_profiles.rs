//! Train quality and complexity forests on a profile export and score it.
//!
//! Usage:
//!   cargo run --bin score_profiles --release -- --input profiles.json \[options\]
//!
//! Options:
//!   --input PATH         JSON array of profile records (required)
//!   --out PATH           Output report file (default: stdout)
//!   --trees N            Trees per forest (default: 50)
//!   --depth D            Maximum tree depth (default: 5)
//!   --seed S             Random seed (default: 42)
//!   --threads T          Worker threads, 0 = all cores (default: 0)
//!   --save-models DIR    Write trained forests as DIR/<task>.json
//!   --load-models DIR    Score with forests from DIR/<task>.json instead of training
//!   --verbose            Log training progress
//!
//! Logging goes to stderr and honors `RUST_LOG`.

use std::error::Error as StdError;
use std::fs;
use std::path::{Path, PathBuf};

use devforest::persist::{from_json_str, to_json_string_pretty};
use devforest::{
    BatchScorer, ForestConfig, ProfileRecord, ScorerConfig, Task, TaskModel, TreeParams, Verbosity,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

type CliResult<T> = Result<T, Box<dyn StdError>>;

#[derive(Debug)]
struct Args {
    input: PathBuf,
    out: Option<PathBuf>,
    trees: usize,
    depth: usize,
    seed: u64,
    threads: usize,
    save_models: Option<PathBuf>,
    load_models: Option<PathBuf>,
    verbose: bool,
}

fn parse_args() -> CliResult<Args> {
    let mut input = None;
    let mut out = None;
    let mut trees = 50usize;
    let mut depth = 5usize;
    let mut seed = 42u64;
    let mut threads = 0usize;
    let mut save_models = None;
    let mut load_models = None;
    let mut verbose = false;

    let mut it = std::env::args().skip(1);
    while let Some(arg) = it.next() {
        let mut value = || it.next().ok_or_else(|| format!("{arg} needs a value"));
        match arg.as_str() {
            "--input" => input = Some(PathBuf::from(value()?)),
            "--out" => out = Some(PathBuf::from(value()?)),
            "--trees" => trees = value()?.parse()?,
            "--depth" => depth = value()?.parse()?,
            "--seed" => seed = value()?.parse()?,
            "--threads" => threads = value()?.parse()?,
            "--save-models" => save_models = Some(PathBuf::from(value()?)),
            "--load-models" => load_models = Some(PathBuf::from(value()?)),
            "--verbose" | "-v" => verbose = true,
            "--help" | "-h" => {
                eprintln!("usage: score_profiles --input PATH [--out PATH] [--trees N] [--depth D] [--seed S] [--threads T] [--save-models DIR] [--load-models DIR] [--verbose]");
                std::process::exit(0);
            }
            other => return Err(format!("unknown argument: {other}").into()),
        }
    }

    let input = input.ok_or("--input is required")?;
    Ok(Args { input, out, trees, depth, seed, threads, save_models, load_models, verbose })
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "info" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
}

fn model_path(dir: &Path, task: Task) -> PathBuf {
    dir.join(format!("{task}.json"))
}

fn load_models(dir: &Path) -> CliResult<Vec<TaskModel>> {
    Task::ALL
        .into_iter()
        .map(|task| -> CliResult<TaskModel> {
            let path = model_path(dir, task);
            let forest = from_json_str(&fs::read_to_string(&path)?)?;
            info!(%task, path = %path.display(), n_trees = forest.n_trees(), "model loaded");
            Ok(TaskModel::from_forest(task, forest)?)
        })
        .collect()
}

fn train_models(args: &Args, records: &[ProfileRecord]) -> CliResult<Vec<TaskModel>> {
    let config = ForestConfig::builder()
        .n_trees(args.trees)
        .tree(TreeParams::with_max_depth(args.depth))
        .seed(args.seed)
        .n_threads(args.threads)
        .verbosity(if args.verbose { Verbosity::Info } else { Verbosity::Warning })
        .build()?;

    let mut models = Vec::with_capacity(Task::ALL.len());
    for task in Task::ALL {
        info!(%task, "training model");
        let model = TaskModel::train(task, records, &config)?;
        if let Some(dir) = &args.save_models {
            fs::create_dir_all(dir)?;
            let path = model_path(dir, task);
            fs::write(&path, to_json_string_pretty(model.forest())?)?;
            info!(%task, path = %path.display(), "model saved");
        }
        models.push(model);
    }
    Ok(models)
}

fn run(args: Args) -> CliResult<()> {
    let records: Vec<ProfileRecord> = serde_json::from_str(&fs::read_to_string(&args.input)?)?;
    info!(n_records = records.len(), input = %args.input.display(), "records loaded");

    let models = match &args.load_models {
        Some(dir) => load_models(dir)?,
        None => train_models(&args, &records)?,
    };

    let scorer_config = ScorerConfig::builder().n_threads(args.threads).build();
    let scorer = models.into_iter().fold(BatchScorer::new(scorer_config), BatchScorer::with_model);
    let report = scorer.score(&records)?;
    info!(
        scored = report.scored,
        skipped = report.skipped,
        errored = report.errored,
        "scoring complete"
    );

    let json = serde_json::to_string_pretty(&report)?;
    match &args.out {
        Some(path) => fs::write(path, json)?,
        None => println!("{json}"),
    }
    Ok(())
}

fn main() {
    let args = match parse_args() {
        Ok(args) => args,
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(2);
        }
    };
    init_logging(args.verbose);

    if let Err(err) = run(args) {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
