//! PTT crawler CLI
//!
//! Input: board name and page indices (or article ID)
//! Output: BOARD_NAME-START_INDEX-END_INDEX.json (or BOARD_NAME-ID.json)
//!
//! `-v` turns on verbose logging; the version is printed with `-V`/`--version`.

use std::path::PathBuf;

use clap::{ArgGroup, Parser};
use ptt_crawler::{
    error::{AppError, Result},
    models::{Config, CrawlTarget},
    pipeline,
};

/// A crawler for the web version of PTT
#[derive(Parser, Debug)]
#[command(name = "ptt-crawler", version, about = "A crawler for the web version of PTT")]
#[command(group(ArgGroup::new("target").required(true).args(["index", "article"])))]
struct Cli {
    /// Board name
    #[arg(short = 'b', value_name = "BOARD_NAME")]
    board: String,

    /// Start and end index
    #[arg(short = 'i', num_args = 2, value_names = ["START_INDEX", "END_INDEX"])]
    index: Option<Vec<u32>>,

    /// Article ID
    #[arg(short = 'a', value_name = "ARTICLE_ID")]
    article: Option<String>,

    /// Path to the TOML configuration file
    #[arg(short, long, default_value = "ptt-crawler.toml")]
    config: PathBuf,

    /// Directory for the output file
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Skip TLS certificate verification
    #[arg(long)]
    insecure: bool,

    /// Write each article at most once per range run
    #[arg(long)]
    dedupe: bool,

    /// Article pages fetched concurrently per listing page
    #[arg(long)]
    concurrency: Option<usize>,

    /// Delay before each request in milliseconds
    #[arg(long)]
    delay_ms: Option<u64>,

    /// Enable verbose logging (`-V` prints the version)
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn target(&self) -> Result<CrawlTarget> {
        match (&self.index, &self.article) {
            (Some(range), _) => CrawlTarget::range(&self.board, range[0], range[1]),
            (None, Some(id)) => CrawlTarget::single(&self.board, id),
            (None, None) => Err(AppError::validation("either -i or -a is required")),
        }
    }

    /// Apply command-line overrides on top of the file configuration.
    fn apply(&self, config: &mut Config) {
        if self.insecure {
            config.crawler.verify_tls = false;
        }
        if self.dedupe {
            config.output.dedupe = true;
        }
        if let Some(n) = self.concurrency {
            config.crawler.max_concurrent = n;
        }
        if let Some(ms) = self.delay_ms {
            config.crawler.request_delay_ms = ms;
        }
        if let Some(dir) = &self.output_dir {
            config.output.dir = dir.display().to_string();
        }
    }
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .target(env_logger::Target::Stdout)
        .init();
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut config = if cli.config.exists() {
        Config::load_or_default(&cli.config)
    } else {
        Config::default()
    };
    cli.apply(&mut config);

    if let Err(e) = config.validate() {
        log::error!("Config validation failed: {}", e);
        return Err(e);
    }

    let target = cli.target()?;
    let output_dir = PathBuf::from(&config.output.dir);
    let path = pipeline::run_crawler(&config, &target, &output_dir).await?;

    log::info!("Output written to {}", path.display());
    Ok(())
}
