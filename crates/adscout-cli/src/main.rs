mod collect;
mod resolve;

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "adscout-cli")]
#[command(about = "TikTok trending-ads collector")]
struct Cli {
    /// Log filter used when `RUST_LOG` is unset.
    #[arg(long, global = true, env = "ADSCOUT_LOG_LEVEL", default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Collect trending ads for every configured industry and write the
    /// all-ads, top-ads and combined top-ads workbooks
    Collect {
        /// Run config YAML; overrides ADSCOUT_RUN_CONFIG_PATH
        #[arg(long)]
        run_config: Option<PathBuf>,
        /// Directory for the output workbooks; overrides ADSCOUT_OUTPUT_DIR
        #[arg(long)]
        out_dir: Option<PathBuf>,
        /// Print the plan without calling the API
        #[arg(long)]
        dry_run: bool,
    },
    /// Stack every sheet of a workbook into a single `Combined_Data` sheet
    Combine { input: PathBuf, output: PathBuf },
    /// Print the category name for each industry id
    Resolve {
        #[arg(required = true)]
        ids: Vec<String>,
        #[arg(
            long,
            env = "ADSCOUT_TAXONOMY_PATH",
            default_value = "./config/categories.json"
        )]
        taxonomy: PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(cli.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    match cli.command {
        Commands::Collect {
            run_config,
            out_dir,
            dry_run,
        } => {
            let config = adscout_core::load_app_config()?;
            collect::run_collect(&config, run_config.as_deref(), out_dir.as_deref(), dry_run)
                .await?;
        }
        Commands::Combine { input, output } => run_combine(&input, &output)?,
        Commands::Resolve { ids, taxonomy } => resolve::run_resolve(&taxonomy, &ids)?,
    }

    Ok(())
}

fn run_combine(input: &Path, output: &Path) -> anyhow::Result<()> {
    let combined = adscout_export::combine_workbook(input, output).map_err(|e| {
        anyhow::anyhow!("failed to combine {}: {e}", input.display())
    })?;
    println!(
        "Combined {} rows into {}",
        combined.rows.len(),
        output.display()
    );
    Ok(())
}
