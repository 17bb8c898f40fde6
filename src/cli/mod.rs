//! dossier CLI - Personnel Archive Browsing
//!
//! Command-line interface over [`Archive`](crate::Archive).

use std::{
    path::{Path, PathBuf},
    process::ExitCode,
};

use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use crate::{Archive, ArchiveConfig, FileLoader, Result, TableCache, TableKey, ViewKind};

mod basic;
mod browse;
mod render;

/// dossier - Personnel Archive Browsing in Pure Rust
#[derive(Parser)]
#[command(name = "dossier")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Configuration file (TOML)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Sheet to read when SOURCE is a directory
    #[arg(long, global = true)]
    sheet: Option<String>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List indexed names
    Names {
        /// Archive file or sheet directory
        source: PathBuf,
        /// Only names containing this keyword
        #[arg(long)]
        search: Option<String>,
    },
    /// Show one person's record
    Show {
        /// Archive file or sheet directory
        source: PathBuf,
        /// Exact name to show
        name: String,
        /// View to render
        #[arg(long, value_enum, default_value = "all")]
        view: ViewArg,
        /// Output format
        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,
    },
    /// Display columns, the identity column and view coverage
    Columns {
        /// Archive file or sheet directory
        source: PathBuf,
    },
    /// Browse interactively, one command per line on stdin
    Browse {
        /// Archive file or sheet directory
        source: PathBuf,
    },
}

/// View selection for `show`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum ViewArg {
    Basic,
    Work,
    Full,
    All,
}

impl ViewArg {
    pub(crate) fn kinds(self) -> &'static [ViewKind] {
        match self {
            Self::Basic => &[ViewKind::Basic],
            Self::Work => &[ViewKind::Work],
            Self::Full => &[ViewKind::Full],
            Self::All => &ViewKind::ALL,
        }
    }
}

/// Output format for `show`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    Text,
    Json,
}

/// Everything needed to (re)open the archive a command works on.
pub(crate) struct Context {
    config: ArchiveConfig,
    cache: TableCache<FileLoader>,
    key: TableKey,
}

impl Context {
    fn new(config_path: Option<&Path>, sheet: Option<&str>, source: PathBuf) -> Result<Self> {
        let config = match config_path {
            Some(path) => ArchiveConfig::from_file(path)?,
            None => ArchiveConfig::default(),
        };
        let key = match sheet {
            Some(sheet) => TableKey::new(source).with_sheet(sheet),
            None => TableKey::new(source),
        };
        let cache = TableCache::new(FileLoader::new(config.csv.clone()));
        Ok(Self { config, cache, key })
    }

    /// Index the cached snapshot, loading it on first use.
    pub(crate) fn open(&self) -> Result<Archive> {
        let table = self.cache.get(&self.key)?;
        Archive::open(table, &self.config)
    }

    /// Re-read the source and index the fresh snapshot.
    pub(crate) fn reload(&self) -> Result<Archive> {
        let table = self.cache.reload(&self.key)?;
        Archive::open(table, &self.config)
    }
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    // Keep an already-installed subscriber.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Main entry point for the CLI.
pub fn run() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = cli.config.as_deref();
    let sheet = cli.sheet.as_deref();

    let result = match cli.command {
        Commands::Names { source, search } => Context::new(config, sheet, source)
            .and_then(|ctx| basic::cmd_names(&ctx, search.as_deref())),
        Commands::Show {
            source,
            name,
            view,
            format,
        } => Context::new(config, sheet, source)
            .and_then(|ctx| basic::cmd_show(&ctx, &name, view, format)),
        Commands::Columns { source } => {
            Context::new(config, sheet, source).and_then(|ctx| basic::cmd_columns(&ctx))
        }
        Commands::Browse { source } => Context::new(config, sheet, source).and_then(|ctx| {
            let mut out = std::io::stdout().lock();
            browse::run(&ctx, std::io::stdin().lock(), &mut out)
        }),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
