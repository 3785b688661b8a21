use clap::{Parser, Subcommand};
use routegraph::prelude::*;
use serde::de::DeserializeOwned;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Validate, compile and dry-run publish campaign routing graphs
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Optional engine configuration file (TOML, YAML or JSON)
    #[arg(short, long, env = "ROUTEGRAPH_CONFIG")]
    config: Option<PathBuf>,

    /// Emit logs as JSON lines
    #[arg(long)]
    json_logs: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the validation report for a graph
    Validate {
        /// Path to the editor graph document
        graph: PathBuf,
        /// Path to the validation context (landing pages, lead form)
        #[arg(long)]
        context: Option<PathBuf>,
    },
    /// Compile a graph into the router's runtime config
    Compile {
        /// Path to the editor graph document
        graph: PathBuf,
        /// Path to the campaign settings
        #[arg(long)]
        settings: Option<PathBuf>,
        /// Write the compiled config here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Run the whole publish pipeline against an in-memory store
    Publish {
        /// Path to the editor graph document
        graph: PathBuf,
        #[arg(long)]
        settings: Option<PathBuf>,
        #[arg(long)]
        context: Option<PathBuf>,
        /// Campaign id used for the preview target
        #[arg(long, default_value = "preview")]
        campaign_id: String,
        /// Production route as `workspace/project/slug`
        #[arg(long)]
        route: Option<String>,
        /// Custom domain hosts to publish to
        #[arg(long = "domain")]
        domains: Vec<String>,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.json_logs);

    let config = EngineConfig::load(cli.config.as_deref())
        .unwrap_or_else(|e| exit_with_error(&e.to_string()));

    match cli.command {
        Command::Validate { graph, context } => run_validate(&config, &graph, context.as_deref()),
        Command::Compile {
            graph,
            settings,
            output,
        } => run_compile(&graph, settings.as_deref(), output.as_deref()),
        Command::Publish {
            graph,
            settings,
            context,
            campaign_id,
            route,
            domains,
        } => {
            let targets = publish_targets(campaign_id, route, domains);
            run_publish(
                &config,
                &graph,
                settings.as_deref(),
                context.as_deref(),
                &targets,
            )
            .await
        }
    }
}

fn init_tracing(json: bool) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("routegraph=info"));
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if json {
        subscriber.json().init();
    } else {
        subscriber.init();
    }
}

fn run_validate(config: &EngineConfig, graph_path: &Path, context_path: Option<&Path>) {
    let graph = load_graph(graph_path);
    let context: ValidationContext = load_optional(context_path);

    let start = Instant::now();
    let report = Validator::new(config.validation.clone()).report(&graph, &context);
    info!(elapsed = ?start.elapsed(), can_publish = report.can_publish, "Validated graph");

    print_json(&report);
    if !report.can_publish {
        std::process::exit(2);
    }
}

fn run_compile(graph_path: &Path, settings_path: Option<&Path>, output: Option<&Path>) {
    let graph = load_graph(graph_path);
    let settings: CampaignSettings = load_optional(settings_path);

    let start = Instant::now();
    let compiled = compile(&graph, &settings)
        .unwrap_or_else(|e| exit_with_error(&format!("Compilation failed: {}", e)));
    info!(elapsed = ?start.elapsed(), "Compiled graph");

    let json = compiled
        .to_json_pretty()
        .unwrap_or_else(|e| exit_with_error(&e.to_string()));
    match output {
        Some(path) => fs::write(path, json).unwrap_or_else(|e| {
            exit_with_error(&format!(
                "Failed to write output '{}': {}",
                path.display(),
                e
            ))
        }),
        None => println!("{}", json),
    }
}

async fn run_publish(
    config: &EngineConfig,
    graph_path: &Path,
    settings_path: Option<&Path>,
    context_path: Option<&Path>,
    targets: &[PublishTarget],
) {
    let graph = load_graph(graph_path);
    let settings: CampaignSettings = load_optional(settings_path);
    let context: ValidationContext = load_optional(context_path);

    let store = Arc::new(MemoryStore::new());
    let pipeline = PublishPipeline::new(store.clone(), config);

    match pipeline.run(&graph, &settings, &context, targets).await {
        Ok(receipt) => {
            println!("Publish status: {:?}", receipt.outcome.status());
            for key in store.keys().await {
                println!("  -> wrote {}", key);
            }
            for failed in &receipt.outcome.failed {
                println!("  -> failed {}: {}", failed.key, failed.error);
            }
        }
        Err(PublishError::Blocked(report)) => {
            print_json(&report);
            exit_with_error("Publish blocked by validation");
        }
        Err(e) => exit_with_error(&e.to_string()),
    }
}

fn publish_targets(
    campaign_id: String,
    route: Option<String>,
    domains: Vec<String>,
) -> Vec<PublishTarget> {
    let mut targets = vec![PublishTarget::Preview { campaign_id }];
    if let Some(route) = route {
        let parts: Vec<&str> = route.split('/').collect();
        let [workspace, project, slug] = parts.as_slice() else {
            exit_with_error(&format!(
                "Route '{}' must look like workspace/project/slug",
                route
            ));
        };
        targets.push(PublishTarget::Production {
            workspace: workspace.to_string(),
            project: project.to_string(),
            slug: slug.to_string(),
        });
    }
    targets.extend(
        domains
            .into_iter()
            .map(|host| PublishTarget::CustomDomain { host }),
    );
    targets
}

fn load_graph(path: &Path) -> Graph {
    let json = read_file(path);
    Graph::from_json(&json).unwrap_or_else(|e| {
        exit_with_error(&format!("Invalid graph '{}': {}", path.display(), e))
    })
}

fn load_optional<T: DeserializeOwned + Default>(path: Option<&Path>) -> T {
    let Some(path) = path else {
        return T::default();
    };
    serde_json::from_str(&read_file(path)).unwrap_or_else(|e| {
        exit_with_error(&format!("Failed to parse '{}': {}", path.display(), e))
    })
}

fn read_file(path: &Path) -> String {
    fs::read_to_string(path).unwrap_or_else(|e| {
        exit_with_error(&format!("Failed to read '{}': {}", path.display(), e))
    })
}

fn print_json<T: serde::Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(e) => exit_with_error(&e.to_string()),
    }
}

fn exit_with_error(message: &str) -> ! {
    eprintln!("\nError: {}", message);
    std::process::exit(1);
}
