//! ldst: anneal a low-diameter spanning tree for a cost-matrix instance.
//!
//! ```text
//! ldst instances/states.txt --stop-iteration 20000 --alpha 0.999 --seed 7 \
//!      --budget 9000 --output history.json
//! ```

use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use tracing::{info, Level};
use u_ldst::anneal::{AnnealConfig, AnnealRunner, Bookkeeping, BudgetPolicy};
use u_ldst::initial::InitialTree;
use u_ldst::instance::Instance;
use u_ldst::neighbor::Transition;
use u_ldst::report::HistoryRecord;
use u_ldst::{LdstError, LdstResult};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Kernel {
    CycleSwap,
    RandomSwap,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Start {
    RandomGreedy,
    RandomBfs,
    Bfs,
    Mst,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Books {
    Consistent,
    Legacy,
    Tracked,
}

#[derive(Debug, Parser)]
#[command(name = "ldst", version, about = "Low-diameter spanning trees by simulated annealing")]
struct Args {
    /// Instance file: node count followed by the cost matrix.
    instance: PathBuf,

    /// JSON file with an annealer configuration; flags override it.
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long)]
    temperature: Option<f64>,

    /// Geometric cooling factor.
    #[arg(long)]
    alpha: Option<f64>,

    #[arg(long)]
    stop_temperature: Option<f64>,

    #[arg(long)]
    stop_iteration: Option<usize>,

    /// Diameter penalty for candidates that do not lower the weight.
    #[arg(long)]
    penalty: Option<usize>,

    #[arg(long, value_enum)]
    kernel: Option<Kernel>,

    #[arg(long, value_enum)]
    start: Option<Start>,

    /// Root for `--start bfs`.
    #[arg(long, default_value_t = 0)]
    root: usize,

    /// Weight budget.
    #[arg(long)]
    budget: Option<f64>,

    /// Reject candidates heavier than the budget.
    #[arg(long, requires = "budget")]
    enforce_budget: bool,

    /// Weight and best-tree bookkeeping; `legacy` reproduces the
    /// historical rule exactly.
    #[arg(long, value_enum)]
    bookkeeping: Option<Books>,

    #[arg(long)]
    seed: Option<u64>,

    /// Write summary, histories and best tree as JSON.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// -v for debug, -vv for per-iteration trace.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Args {
    fn anneal_config(&self) -> LdstResult<AnnealConfig> {
        let mut config: AnnealConfig = match &self.config {
            Some(path) => serde_json::from_reader(File::open(path)?)
                .map_err(|e| LdstError::InvalidConfig(format!("{}: {e}", path.display())))?,
            None => AnnealConfig::default(),
        };

        if let Some(t) = self.temperature {
            config = config.with_initial_temperature(t);
        }
        if let Some(alpha) = self.alpha {
            config = config.with_alpha(alpha);
        }
        if let Some(t) = self.stop_temperature {
            config = config.with_stopping_temperature(t);
        }
        if let Some(n) = self.stop_iteration {
            config = config.with_stopping_iteration(n);
        }
        if let Some(p) = self.penalty {
            config = config.with_penalty(p);
        }
        if let Some(kernel) = self.kernel {
            config = config.with_transition(match kernel {
                Kernel::CycleSwap => Transition::CycleSwap,
                Kernel::RandomSwap => Transition::RandomSwap,
            });
        }
        if let Some(start) = self.start {
            config = config.with_initial(match start {
                Start::RandomGreedy => InitialTree::RandomGreedy,
                Start::RandomBfs => InitialTree::RandomBfs,
                Start::Bfs => InitialTree::Bfs { root: self.root },
                Start::Mst => InitialTree::MinimumWeight,
            });
        }
        if let Some(b) = self.budget {
            config = config.with_budget(if self.enforce_budget {
                BudgetPolicy::Enforce(b)
            } else {
                BudgetPolicy::Track(b)
            });
        }
        if let Some(books) = self.bookkeeping {
            config = config.with_bookkeeping(match books {
                Books::Consistent => Bookkeeping::Consistent,
                Books::Legacy => Bookkeeping::Legacy,
                Books::Tracked => Bookkeeping::Tracked,
            });
        }
        if let Some(seed) = self.seed {
            config = config.with_seed(seed);
        }

        config.validate()?;
        Ok(config)
    }
}

fn main() -> LdstResult<()> {
    let args = Args::parse();
    let level = match args.verbose {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    let config = args.anneal_config()?;
    let instance = Instance::read(&args.instance)?;
    let graph = instance.to_graph()?;
    info!(instance = %args.instance.display(), nodes = instance.n, "instance loaded");

    let result = AnnealRunner::run(&graph, &config)?;
    println!("{}", result.summary());

    if let Some(path) = &args.output {
        let record = HistoryRecord::from(&result);
        let writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(writer, &record)
            .map_err(|e| LdstError::Io(std::io::Error::other(e)))?;
        info!(path = %path.display(), "history written");
    }
    Ok(())
}
