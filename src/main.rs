use anyhow::Result;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use sclub_separator::cluster::{check_solution, Problem};
use sclub_separator::data::{self, AssignmentFile};
use sclub_separator::graph::Directedness;
use sclub_separator::storage::{self, RunResults};
use sclub_separator::{
    FormulationMode, Inequality, OracleConfig, SearchContext, SeparationOracle,
};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ModeArg {
    Labeling,
    Restricted,
    Centering,
    Subset,
}

#[derive(Parser, Debug)]
#[clap(
    name = "sclub-separator",
    about = "Run the s-club separation oracle on one candidate clustering"
)]
struct Cli {
    /// Graph file (.graph METIS adjacency, .txt edge list or .gml)
    #[clap(long)]
    graph: PathBuf,

    /// Candidate assignment JSON: {"clusters": [[...]], "centers": [...]}
    #[clap(long)]
    assignment: PathBuf,

    /// JSON oracle configuration; command-line flags override it
    #[clap(long)]
    config: Option<PathBuf>,

    /// Diameter bound s
    #[clap(long = "s", short = 's')]
    diameter_bound: Option<u32>,

    /// Formulation the cuts are phrased for
    #[clap(long, value_enum)]
    mode: Option<ModeArg>,

    /// Number of cluster labels (defaults to the number of candidate clusters)
    #[clap(long)]
    max_clusters: Option<usize>,

    /// Cluster labels to scan in subset mode
    #[clap(long, value_delimiter = ',')]
    labels: Vec<u32>,

    /// Reason over the symmetrized directed view (strong connectivity)
    #[clap(long)]
    symmetric: bool,

    /// Check the candidate as a cover instead of a partition
    #[clap(long)]
    covering: bool,

    /// Scan clusters in parallel
    #[clap(long)]
    parallel: bool,

    /// Output directory for results
    #[clap(long, default_value = "separation_results")]
    output_dir: String,

    /// Number of worker threads (0 = use all available cores)
    #[clap(long, default_value = "0")]
    threads: usize,

    /// Verbose logging
    #[clap(long, short)]
    verbose: bool,
}

fn resolve_config(args: &Cli, assignment: &AssignmentFile) -> Result<OracleConfig> {
    let mut config = match &args.config {
        Some(path) => OracleConfig::from_json_file(path)?,
        None => OracleConfig::default(),
    };

    if let Some(bound) = args.diameter_bound {
        config.diameter_bound = bound;
    }
    if args.symmetric {
        config.directedness = Directedness::Symmetric;
    }
    if args.parallel {
        config.parallel_scan = true;
    }

    let max_clusters = args.max_clusters.unwrap_or(assignment.clusters.len());
    if let Some(mode) = args.mode {
        config.mode = match mode {
            ModeArg::Labeling => FormulationMode::Labeling { max_clusters },
            ModeArg::Restricted => FormulationMode::RestrictedLabeling { clusters: max_clusters },
            ModeArg::Centering => FormulationMode::Centering,
            ModeArg::Subset => FormulationMode::Subset {
                labels: args.labels.clone(),
                max_clusters,
            },
        };
    } else if args.config.is_none() {
        config.mode = FormulationMode::Labeling { max_clusters };
    }

    Ok(config)
}

fn main() -> Result<()> {
    // Parse command line arguments
    let args = Cli::parse();

    // Configure logging
    let log_level = if args.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    env_logger::Builder::new()
        .filter_level(log_level)
        .format_timestamp_millis()
        .init();

    // Set number of threads
    let num_threads = if args.threads > 0 {
        args.threads
    } else {
        // If threads = 0, use all available cores
        num_cpus::get()
    };

    log::info!("Using {} worker threads", num_threads);
    rayon::ThreadPoolBuilder::new()
        .num_threads(num_threads)
        .build_global()?;

    // 1. Load inputs
    let graph = data::read_graph_file(&args.graph)?;
    log::info!("Graph memory usage: {} MB", graph.memory_usage() / (1024 * 1024));

    let pieces = data::preprocessing::split_components(&graph);
    for (i, piece) in pieces.iter().enumerate() {
        let first = piece.original.first().map(|&v| graph.label(v));
        log::debug!(
            "  component {}: {} vertices, {} edges, first vertex {:?}",
            i,
            piece.graph.node_count,
            piece.graph.edge_count(),
            first
        );
    }
    let components = pieces.len();

    let assignment = AssignmentFile::load(&args.assignment)?;
    let clusters = assignment.clusters();
    log::info!(
        "Candidate has {} clusters, largest with {} members",
        clusters.len(),
        clusters.iter().map(|cluster| cluster.size()).max().unwrap_or(0)
    );
    let config = resolve_config(&args, &assignment)?;
    log::info!(
        "Oracle: s = {}, mode = {}, {:?}",
        config.diameter_bound,
        config.mode.name(),
        config.directedness
    );

    // 2. Check the candidate as a finished solution
    let problem = if args.covering {
        Problem::Covering
    } else {
        Problem::Partitioning
    };
    let check = check_solution(&graph, config.diameter_bound, &clusters, problem);

    // 3. One oracle invocation
    let snapshot = assignment.snapshot(&config.mode)?;
    if snapshot.is_empty() {
        log::warn!("Candidate sets no variables; nothing to separate");
    } else {
        log::debug!("Candidate sets {} variables", snapshot.len());
    }
    let context = SearchContext::new(graph, &config)?;
    let oracle = SeparationOracle::new(&context).parallel(config.parallel_scan);

    let mut cuts: Vec<Inequality> = Vec::new();
    let report = oracle.separate(&snapshot, &mut cuts)?;

    log::info!(
        "Scanned {} clusters: {} violated, {} cuts",
        report.clusters_scanned,
        report.clusters_violated,
        report.cuts_emitted
    );
    for cut in &cuts {
        log::debug!("  {}", cut);
    }

    // 4. Save results
    storage::save_results(
        &RunResults {
            graph: &context.graph,
            config: &config,
            components,
            check: &check,
            report: &report,
            cuts: &cuts,
        },
        &args.output_dir,
    )?;

    log::info!("Done. Results saved to {}", args.output_dir);

    Ok(())
}
