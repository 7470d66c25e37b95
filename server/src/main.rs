mod config;
mod graphql;
mod http;

use std::{path::PathBuf, sync::Arc};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use platform_obs::{ObsConfig, init_tracing};
use products_directory::{DirectoryService, Employee, default_seed, parse_seed};
use tracing::info;

use crate::{
    config::AppConfig,
    http::{AppState, ServeConfig},
};

#[derive(Parser, Debug)]
#[command(name = "directory-server", version, about = "Employee directory GraphQL service")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP + GraphQL server.
    Serve(ServeCommand),
    /// Print the GraphQL schema snapshot.
    #[command(name = "schema:print")]
    SchemaPrint {
        #[arg(long, value_name = "FILE", help = "Destination file path")]
        output: Option<PathBuf>,
    },
    /// Print the startup seed records as JSON.
    #[command(name = "seed:print")]
    SeedPrint {
        #[arg(long, value_name = "FILE", help = "Destination file path")]
        output: Option<PathBuf>,
    },
}

#[derive(Args, Debug)]
struct ServeCommand {
    #[arg(long, default_value = "0.0.0.0")]
    host: std::net::IpAddr,
    #[arg(long, default_value_t = 4000)]
    port: u16,
}

impl From<ServeCommand> for ServeConfig {
    fn from(value: ServeCommand) -> Self {
        ServeConfig::new(value.host, value.port)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    init_tracing(ObsConfig::default())?;
    let cli = Cli::parse();
    let app_config = Arc::new(AppConfig::load()?);
    match cli.command {
        Command::Serve(cmd) => run_server(cmd, app_config).await,
        Command::SchemaPrint { output } => schema_print(&app_config, output),
        Command::SeedPrint { output } => seed_print(&app_config, output),
    }
}

fn load_seed(config: &AppConfig) -> Result<Vec<Employee>> {
    let Some(path) = &config.seed_file else {
        return Ok(default_seed());
    };
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read seed file {}", path.display()))?;
    parse_seed(&raw).with_context(|| format!("failed to parse seed file {}", path.display()))
}

fn build_service(config: &AppConfig) -> Result<Arc<DirectoryService>> {
    let seed = load_seed(config)?;
    let records = seed.len();
    let service = DirectoryService::in_memory(seed, config.id_strategy)
        .context("invalid seed records")?
        .with_strict_validation(config.strict_validation);
    info!(
        records,
        id_strategy = %config.id_strategy,
        strict_validation = config.strict_validation,
        "employee directory initialised"
    );
    Ok(Arc::new(service))
}

fn write_output(path: Option<PathBuf>, contents: &str) -> Result<()> {
    match path {
        Some(target) => {
            std::fs::write(&target, contents)
                .with_context(|| format!("failed to write {}", target.display()))?;
            info!(path = %target.display(), "snapshot written");
        }
        None => println!("{contents}"),
    }
    Ok(())
}

fn schema_print(config: &AppConfig, output: Option<PathBuf>) -> Result<()> {
    let schema = graphql::build_schema(build_service(config)?);
    write_output(output, &schema.sdl())
}

fn seed_print(config: &AppConfig, output: Option<PathBuf>) -> Result<()> {
    let json = serde_json::to_string_pretty(&load_seed(config)?)?;
    write_output(output, &json)
}

async fn run_server(cmd: ServeCommand, config: Arc<AppConfig>) -> Result<()> {
    let service = build_service(&config)?;
    let schema = graphql::build_schema(service.clone());
    let state = AppState {
        schema,
        service,
        config,
    };
    http::serve(cmd.into(), state).await
}
