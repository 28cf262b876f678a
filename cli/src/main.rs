use std::io::Write;
use std::path::PathBuf;

use casualty_cli::CliContext;
use casualty_cli::commands;
use casualty_cli::logging;
use casualty_cli::readline;
use casualty_core::context::{DashboardConfig, DashboardConfigExt};
use casualty_core::view::Page;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(version, about = "Casualty records dashboard")]
struct Args {
    /// Configuration file to use instead of the platform default
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), String> {
    let args = Args::parse();
    let _log_guard = logging::init();

    let config = match &args.config {
        Some(path) => DashboardConfig::load_from(path).map_err(|e| e.to_string())?,
        None => DashboardConfig::load(),
    };
    let ctx = CliContext::new(config);

    while let Some(line) = readline()? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match respond(line, &ctx).await {
            Ok(quit) => {
                if quit {
                    break;
                }
            }
            Err(err) => {
                writeln!(std::io::stdout(), "{err}").map_err(|e| e.to_string())?;
                std::io::stdout().flush().map_err(|e| e.to_string())?;
            }
        }
    }

    ctx.close().await;
    Ok(())
}

#[derive(Parser)]
#[command(about = "dashboard commands")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List the dashboard pages
    Pages,
    /// Mount a page and start loading its data
    Open { page: Page },
    /// Print the mounted page
    Show {
        /// Wait for the page's data instead of showing the loading state
        #[arg(short, long)]
        wait: bool,
    },
    /// Filter the mounted page; omitted dimensions match everything
    Filter {
        #[arg(short, long)]
        category: Option<String>,
        #[arg(short, long)]
        verdict: Option<String>,
    },
    /// List the filter values present in the loaded data
    Options,
    /// Write the mounted page as HTML
    Render {
        #[arg(short, long)]
        out: PathBuf,
    },
    /// Load and write every page as HTML
    Export {
        #[arg(short, long)]
        dir: Option<PathBuf>,
    },
    Config,
    Close,
    Exit,
}

async fn respond(line: &str, ctx: &CliContext) -> Result<bool, String> {
    let mut args = shlex::split(line).ok_or("error: Invalid quoting")?;
    args.insert(0, "casualty-dash".to_string());
    let cli = Cli::try_parse_from(args).map_err(|e| e.to_string())?;

    match cli.command {
        Some(Commands::Pages) => commands::list_pages(),
        Some(Commands::Open { page }) => commands::open(page, ctx).await,
        Some(Commands::Show { wait }) => commands::show(ctx, wait).await?,
        Some(Commands::Filter { category, verdict }) => {
            commands::set_filter(ctx, category, verdict).await?
        }
        Some(Commands::Options) => commands::show_options(ctx).await?,
        Some(Commands::Render { out }) => commands::render(ctx, &out).await?,
        Some(Commands::Export { dir }) => commands::export(ctx, dir).await?,
        Some(Commands::Config) => commands::show_settings(ctx).await,
        Some(Commands::Close) => commands::close(ctx).await,
        Some(Commands::Exit) => {
            commands::exit()?;
            return Ok(true);
        }
        None => {}
    }
    Ok(false)
}
