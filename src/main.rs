use std::path::Path;
use std::process;

use supply_trace::adapters::outbound::console::StderrProgressReporter;
use supply_trace::adapters::outbound::filesystem::FileSystemReader;
use supply_trace::adapters::outbound::network::{CatalogProductFetcher, HttpProductFetcher};
use supply_trace::application::dto::{BuildTreeRequest, BuildTreeResponse, OutputFormat};
use supply_trace::application::factories::{FormatterFactory, PresenterFactory, PresenterType};
use supply_trace::application::use_cases::BuildTreeUseCase;
use supply_trace::cli::Args;
use supply_trace::config::{self, ConfigFile};
use supply_trace::logger;
use supply_trace::ports::outbound::{CatalogReader, ProductFetcher};
use supply_trace::shared::error::{ExitCode, TraceError};
use supply_trace::shared::Result;
use supply_trace::traceability::domain::{ProductNode, TraversalDirection, Viewport};
use supply_trace::traceability::services::MaterializeOptions;

#[tokio::main]
async fn main() {
    let args = Args::parse_args();
    logger::init_logger(args.verbose, args.quiet, args.no_color);

    if let Err(e) = run(args).await {
        eprintln!("\n❌ An error occurred:\n");
        eprintln!("{}", e);

        // Display error chain
        for cause in e.chain().skip(1) {
            eprintln!("\nCaused by: {}", cause);
        }

        eprintln!();
        process::exit(exit_code_for(&e).as_i32());
    }
}

fn exit_code_for(error: &anyhow::Error) -> ExitCode {
    match error.downcast_ref::<TraceError>() {
        Some(TraceError::Validation { .. }) => ExitCode::InvalidArguments,
        _ => ExitCode::ApplicationError,
    }
}

/// Build settings after merging the config file under the command line
#[derive(Debug, Clone, PartialEq)]
struct Settings {
    direction: TraversalDirection,
    organization_id: Option<String>,
    api_url: Option<String>,
    options: MaterializeOptions,
    viewport: Viewport,
    format: OutputFormat,
}

impl Settings {
    fn resolve(args: &Args, config: Option<&ConfigFile>) -> Result<Self> {
        let defaults = MaterializeOptions::default();
        let default_viewport = Viewport::default();

        let direction = match args.direction {
            Some(direction) => direction,
            None => config
                .map(ConfigFile::direction)
                .transpose()?
                .flatten()
                .unwrap_or(TraversalDirection::TowardComponents),
        };
        let back_edges = match args.back_edges {
            Some(policy) => policy,
            None => config
                .map(ConfigFile::back_edges)
                .transpose()?
                .flatten()
                .unwrap_or(defaults.back_edges),
        };
        let format = match args.format {
            Some(format) => format,
            None => config
                .map(ConfigFile::format)
                .transpose()?
                .flatten()
                .unwrap_or_default(),
        };

        Ok(Self {
            direction,
            organization_id: args
                .organization_id
                .clone()
                .or_else(|| config.and_then(|c| c.organization_id.clone())),
            api_url: args
                .api_url
                .clone()
                .or_else(|| config.and_then(|c| c.api_url.clone())),
            options: MaterializeOptions {
                max_nodes: args
                    .max_nodes
                    .or_else(|| config.and_then(|c| c.max_nodes))
                    .unwrap_or(defaults.max_nodes),
                back_edges,
            },
            viewport: Viewport::new(
                args.width
                    .or_else(|| config.and_then(ConfigFile::viewport_width))
                    .unwrap_or(default_viewport.width),
                args.height
                    .or_else(|| config.and_then(ConfigFile::viewport_height))
                    .unwrap_or(default_viewport.height),
            ),
            format,
        })
    }
}

fn load_config(explicit: Option<&Path>, quiet: bool) -> Result<Option<ConfigFile>> {
    match explicit {
        Some(path) => config::load_config_from_path(path).map(Some),
        None => {
            let cwd = std::env::current_dir()?;
            let discovered = config::discover_config(&cwd)?;
            if discovered.is_some() && !quiet {
                eprintln!(
                    "📄 Auto-discovered config file: {}",
                    cwd.join(config::CONFIG_FILENAME).display()
                );
            }
            Ok(discovered)
        }
    }
}

/// Products a build is seeded with
///
/// With `own_only`, only products owned by the organization are seeded and
/// everything else is left for the fetcher to resolve.
fn select_seed(
    catalog: &[ProductNode],
    organization_id: Option<&str>,
    own_only: bool,
) -> Vec<ProductNode> {
    match organization_id {
        Some(org) if own_only => catalog
            .iter()
            .filter(|product| product.owner_id == org)
            .cloned()
            .collect(),
        _ => catalog.to_vec(),
    }
}

async fn run(args: Args) -> Result<()> {
    let config = load_config(args.config.as_deref(), args.quiet)?;
    let settings = Settings::resolve(&args, config.as_ref())?;
    tracing::debug!(?settings, "Resolved build settings");

    // Create adapters (Dependency Injection)
    let catalog_reader = FileSystemReader::new();
    let progress_reporter = if args.quiet {
        StderrProgressReporter::quiet()
    } else {
        StderrProgressReporter::new()
    };

    let catalog = catalog_reader.read_catalog(&args.catalog)?;
    let seed = select_seed(
        &catalog,
        settings.organization_id.as_deref(),
        args.seed_own_only,
    );

    let request = BuildTreeRequest::builder()
        .maybe_root_id(args.root.clone())
        .direction(settings.direction)
        .seed_nodes(seed)
        .viewport(settings.viewport.width, settings.viewport.height)
        .maybe_caller_organization_id(settings.organization_id.clone())
        .options(settings.options)
        .build()?;

    let response = match settings.api_url.as_deref() {
        Some(url) => build(HttpProductFetcher::new(url)?, progress_reporter, request).await?,
        None => {
            build(
                CatalogProductFetcher::new(catalog),
                progress_reporter,
                request,
            )
            .await?
        }
    };

    if !args.quiet {
        eprintln!("{}", FormatterFactory::progress_message(settings.format));
    }
    let color = logger::stdout_colors(args.no_color);
    let formatter = FormatterFactory::create(settings.format, color);
    let formatted_output = formatter.format(&response)?;

    let presenter = PresenterFactory::create(PresenterType::from_output(args.output));
    presenter.present(&formatted_output)?;

    Ok(())
}

/// Runs one build, abandoning it on Ctrl-C
async fn build<F: ProductFetcher>(
    fetcher: F,
    progress_reporter: StderrProgressReporter,
    request: BuildTreeRequest,
) -> Result<BuildTreeResponse> {
    let use_case = BuildTreeUseCase::new(fetcher, progress_reporter);

    tokio::select! {
        result = use_case.execute(request) => result,
        _ = tokio::signal::ctrl_c() => {
            anyhow::bail!("Build cancelled: interrupted before the tree was complete")
        }
    }
}
