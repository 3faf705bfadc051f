use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use pagestack::animation::AnimatorRegistry;
use pagestack::cli::{parse_script, stack_line, ScriptRunner};
use pagestack::config::Config;
use pagestack::logging::{init_tracing, LogSettings};
use pagestack::navigator::NavigatorBuilder;

#[derive(Parser)]
#[command(name = "pagestack", version)]
#[command(about = "Run page navigation scripts against configured templates", long_about = None)]
struct Cli {
    /// Config file (default: ~/.config/pagestack/config.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log navigator activity to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Execute a navigation script and print the stack after each step
    Run {
        script: PathBuf,

        /// Override the default animation
        #[arg(short, long)]
        animation: Option<String>,
    },
    /// List registered animation names
    Animations,
    /// Load and validate the config file
    CheckConfig,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&LogSettings::from_env(cli.verbose));

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    match cli.command {
        Commands::Run { script, animation } => run(&config, &script, animation).await,
        Commands::Animations => {
            for name in AnimatorRegistry::global().names() {
                println!("{}", name);
            }
            Ok(())
        }
        Commands::CheckConfig => {
            println!(
                "config ok: {} template(s), initial page {}",
                config.templates.len(),
                config.navigator.initial_page.as_deref().unwrap_or("<none>")
            );
            Ok(())
        }
    }
}

async fn run(config: &Config, script: &Path, animation: Option<String>) -> Result<()> {
    let source = std::fs::read_to_string(script)
        .with_context(|| format!("failed to read script '{}'", script.display()))?;
    let lines = parse_script(&source)?;

    let mut builder = NavigatorBuilder::from_config(config);
    if let Some(animation) = animation {
        builder = builder.default_animation(animation);
    }
    let navigator = builder.build();

    if let Some(page) = navigator.load_initial_page().await? {
        let label = format!("load {}", page.name().unwrap_or("<inline>"));
        println!("{:<24} {}", label, stack_line(&navigator.pages()));
    }

    let mut runner = ScriptRunner::new(navigator.clone());
    let transcript = runner.run(&lines).await?;
    for entry in transcript {
        println!("{}", entry);
    }

    drop(runner);
    navigator.destroy();
    Ok(())
}
