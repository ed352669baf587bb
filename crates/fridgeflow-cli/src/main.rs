mod config;
mod plan_cmd;
mod serve_cmd;
#[cfg(test)]
mod test_util;

use clap::{Parser, Subcommand};

use fridgeflow_core::{Mode, Planner, model::DEFAULT_TIME_LIMIT_MIN};

use config::{CliOverrides, FridgeflowConfig};

#[derive(Parser)]
#[command(name = "fridgeflow", about = "Turn fridge leftovers into a timed cooking plan")]
struct Cli {
    /// Language model to use in delegated mode (overrides FRIDGEFLOW_LLM_MODEL)
    #[arg(long, global = true)]
    model: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a fridgeflow config file with default settings
    Init {
        /// Overwrite existing config file
        #[arg(long)]
        force: bool,
    },
    /// Serve the planning API and web page
    Serve {
        /// Address to bind (overrides FRIDGEFLOW_BIND)
        #[arg(long)]
        bind: Option<String>,
        /// Port to listen on (overrides FRIDGEFLOW_PORT)
        #[arg(long)]
        port: Option<u16>,
    },
    /// Build a plan and print it
    Plan {
        /// Ingredients, comma or newline separated
        ingredients: String,
        /// Time budget in minutes
        #[arg(long, default_value_t = DEFAULT_TIME_LIMIT_MIN, allow_negative_numbers = true)]
        time: i64,
        /// Planning strategy: heuristic or delegated
        #[arg(long, default_value_t = Mode::Heuristic)]
        mode: Mode,
        /// Print the plan as JSON
        #[arg(long, conflicts_with = "follow")]
        json: bool,
        /// Run a live timeline after printing; press Enter when behind
        #[arg(long)]
        follow: bool,
    },
}

/// Execute the `fridgeflow init` command: write config file.
fn cmd_init(force: bool) -> anyhow::Result<()> {
    let path = config::config_path();

    if path.exists() && !force {
        anyhow::bail!(
            "config file already exists at {}\nUse --force to overwrite.",
            path.display()
        );
    }

    let cfg = config::ConfigFile::with_defaults();
    config::save_config_to(&path, &cfg)?;

    println!("Config written to {}", path.display());
    println!("  server = {}:{}", config::DEFAULT_BIND, config::DEFAULT_PORT);
    if let Some(model) = &cfg.llm.model {
        println!("  llm.model = {model}");
    }
    if let Some(key_env) = &cfg.llm.api_key_env {
        println!();
        println!("Delegated mode reads its API key from ${key_env}.");
    }

    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Init { force } => {
            cmd_init(force)?;
        }
        Commands::Serve { bind, port } => {
            let resolved = FridgeflowConfig::resolve(&CliOverrides {
                bind,
                port,
                model: cli.model,
            })?;
            let planner = Planner::from_settings(resolved.llm);
            serve_cmd::run_serve(planner, &resolved.bind, resolved.port).await?;
        }
        Commands::Plan {
            ingredients,
            time,
            mode,
            json,
            follow,
        } => {
            let resolved = FridgeflowConfig::resolve(&CliOverrides {
                model: cli.model,
                ..CliOverrides::default()
            })?;
            let planner = Planner::from_settings(resolved.llm);
            let output = plan_cmd::PlanOutput { json, follow };
            plan_cmd::run_plan(&planner, &ingredients, time, mode, output).await?;
        }
    }

    Ok(())
}
