use clap::Parser;
use std::path::PathBuf;

use crate::application::dto::OutputFormat;
use crate::traceability::domain::TraversalDirection;
use crate::traceability::services::BackEdgePolicy;

/// Materialize supply-chain traceability trees from a product catalog
#[derive(Parser, Debug)]
#[command(name = "supply-trace")]
#[command(version)]
#[command(
    about = "Materialize supply-chain traceability trees from a product catalog",
    long_about = None
)]
pub struct Args {
    /// JSON product catalog used to seed the build
    #[arg(short, long, value_name = "FILE")]
    pub catalog: PathBuf,

    /// Product id to build the tree from (defaults to the first root candidate)
    #[arg(short, long, value_name = "ID")]
    pub root: Option<String>,

    /// Walk direction: components (supplier view), consumers (brand view) or parents
    #[arg(short, long)]
    pub direction: Option<TraversalDirection>,

    /// Organization of the viewer; products owned by others are flagged external
    #[arg(long = "org", value_name = "ID")]
    pub organization_id: Option<String>,

    /// Seed only the organization's own products; resolve the rest lazily
    #[arg(long, requires = "organization_id")]
    pub seed_own_only: bool,

    /// Base URL of the product service used for products outside the seed
    #[arg(long, value_name = "URL")]
    pub api_url: Option<String>,

    /// Maximum number of tree nodes to create
    #[arg(long, value_name = "N")]
    pub max_nodes: Option<usize>,

    /// How to show edges back to a product already on the path: prune or leaf
    #[arg(long, value_name = "POLICY")]
    pub back_edges: Option<BackEdgePolicy>,

    /// Canvas width used for the layout hint
    #[arg(long)]
    pub width: Option<f64>,

    /// Canvas height used for the layout hint
    #[arg(long)]
    pub height: Option<f64>,

    /// Output format: text or json
    #[arg(short, long)]
    pub format: Option<OutputFormat>,

    /// Output file path (if not specified, outputs to stdout)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Config file (defaults to supply-trace.config.yml in the current directory)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Show debug logs
    #[arg(short, long, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only show warnings and errors
    #[arg(short, long)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,
}

impl Args {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
