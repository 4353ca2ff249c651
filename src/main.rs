use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use docsift::index::build::build_index_file;
use docsift::index::stats::show_stats;
use docsift::index::{read_index, IndexFormat};
use docsift::output;
use docsift::query::SearchSession;
use docsift::tui::NavigationController;
use docsift::utils::{logging, query_from_link, AppConfig};
use std::io;
use std::path::PathBuf;
use std::process::Command;

const DEFAULT_INDEX: &str = "search-index.json";

#[derive(Parser)]
#[command(name = "docsift")]
#[command(about = "Offline fuzzy search for API documentation")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose logging (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile a corpus of documentable objects into a search index
    Build {
        /// JSON array of documentable objects
        corpus: PathBuf,

        /// Index file to write
        #[arg(short, long, default_value = DEFAULT_INDEX)]
        output: PathBuf,

        /// Output format (inferred from the output extension by default)
        #[arg(short, long, value_enum)]
        format: Option<IndexFormat>,

        /// Character budget of entry summaries
        #[arg(long)]
        summary_limit: Option<usize>,

        /// No progress output
        #[arg(short, long)]
        quiet: bool,
    },
    /// Search interactively
    Search {
        /// Initial query
        query: Option<String>,

        /// Index file
        #[arg(short, long, default_value = DEFAULT_INDEX)]
        index: PathBuf,

        /// Jump straight to the top result of this query
        #[arg(long, conflicts_with = "link")]
        lucky: Option<String>,

        /// Deep link carrying a `q` parameter; jumps to its top result
        #[arg(long)]
        link: Option<String>,

        /// Open the chosen result with the configured browser
        #[arg(long)]
        open: bool,
    },
    /// Print ranked results for a query
    Query {
        /// Query text
        #[arg(required = true)]
        query: Vec<String>,

        /// Index file
        #[arg(short, long, default_value = DEFAULT_INDEX)]
        index: PathBuf,

        /// Maximum number of results
        #[arg(short = 'n', long)]
        limit: Option<usize>,

        /// Print results as JSON
        #[arg(long)]
        json: bool,

        /// Disable colored output
        #[arg(long)]
        no_color: bool,
    },
    /// Show index statistics
    Stats {
        /// Index file
        #[arg(default_value = DEFAULT_INDEX)]
        index: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);
    let config = AppConfig::load()?;

    match cli.command {
        Commands::Build {
            corpus,
            output,
            format,
            summary_limit,
            quiet,
        } => {
            let mut index_config = config.index.clone();
            if let Some(limit) = summary_limit {
                index_config.summary_limit = limit;
            }
            let format = format.unwrap_or_else(|| IndexFormat::from_path(&output));
            build_index_file(&corpus, &output, format, &index_config, quiet)?;
        }
        Commands::Search {
            query,
            index,
            lucky,
            link,
            open,
        } => {
            let search_index = read_index(&index)?;
            let mut session = SearchSession::new(&search_index, config.max_results);

            let lucky = match link {
                Some(link) => Some(
                    query_from_link(&link)
                        .with_context(|| format!("No `q` parameter in {}", link))?,
                ),
                None => lucky,
            };

            let chosen = match lucky {
                Some(query) => {
                    let mut nav = NavigationController::new(|_| ());
                    let url = nav.feeling_lucky(&mut session, &query);
                    if url.is_none() {
                        eprintln!("No results for {:?}", query);
                    }
                    url
                }
                None => run_interactive(session, query)?,
            };

            if let Some(url) = chosen {
                if open {
                    open_url(&config, &url)?;
                } else {
                    println!("{}", url);
                }
            }
        }
        Commands::Query {
            query,
            index,
            limit,
            json,
            no_color,
        } => {
            let search_index = read_index(&index)?;
            let mut session =
                SearchSession::new(&search_index, limit.unwrap_or(config.max_results));
            let hits = session.search(&query.join(" "));

            if json {
                output::write_hits_json(&hits, io::stdout().lock())?;
                println!();
            } else {
                output::print_hits(&hits, !no_color)?;
            }
        }
        Commands::Stats { index } => {
            show_stats(&index)?;
        }
    }

    Ok(())
}

#[cfg(feature = "interactive")]
fn run_interactive(session: SearchSession<'_>, query: Option<String>) -> Result<Option<String>> {
    docsift::tui::run(session, query)
}

#[cfg(not(feature = "interactive"))]
fn run_interactive(_session: SearchSession<'_>, _query: Option<String>) -> Result<Option<String>> {
    bail!("docsift was built without the `interactive` feature; use `docsift query` or `--lucky`")
}

/// Open `url` with the configured browser command
fn open_url(config: &AppConfig, url: &str) -> Result<()> {
    let Some(command) = config.browser_command() else {
        bail!("No browser configured; set `browser` in the config file or $BROWSER");
    };
    let mut parts = command.split_whitespace();
    let program = parts.next().unwrap_or_default();

    Command::new(program)
        .args(parts)
        .arg(url)
        .spawn()
        .with_context(|| format!("Failed to launch browser {:?}", program))?;
    Ok(())
}
