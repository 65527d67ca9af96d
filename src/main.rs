// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Context, Result, anyhow};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{Shell, generate};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError, info, warn};
use std::io::Write;
use std::path::{Path, PathBuf};

use leengua::app_config::{self, Config, TranslationProvider};
use leengua::app_controller::Controller;
use leengua::document::PageRange;
use leengua::language_detection::Detection;
use leengua::language_utils;

/// CLI Wrapper for TranslationProvider to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliTranslationProvider {
    Http,
    Echo,
}

impl From<CliTranslationProvider> for TranslationProvider {
    fn from(cli_provider: CliTranslationProvider) -> Self {
        match cli_provider {
            CliTranslationProvider::Http => TranslationProvider::Http,
            CliTranslationProvider::Echo => TranslationProvider::Echo,
        }
    }
}

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Translate a text document into a bilingual HTML document
    Translate(TranslateArgs),

    /// Guess the language of a text document
    Detect {
        /// Text file to inspect
        #[arg(value_name = "INPUT_FILE")]
        input_file: PathBuf,
    },

    /// Generate shell completions for leengua
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Parser, Debug)]
struct TranslateArgs {
    /// Input text file or directory to process
    #[arg(value_name = "INPUT_PATH")]
    input_path: PathBuf,

    /// Force overwrite of existing output files
    #[arg(short, long = "force")]
    force_overwrite: bool,

    /// Translation provider to use
    #[arg(short, long, value_enum)]
    provider: Option<CliTranslationProvider>,

    /// Translation endpoint URL for the http provider
    #[arg(long, env = "LEENGUA_ENDPOINT")]
    endpoint: Option<String>,

    /// Source language code (e.g., 'deu_Latn'), or 'auto' to detect it
    #[arg(short, long)]
    source_language: Option<String>,

    /// Target language code (e.g., 'spa_Latn')
    #[arg(short, long)]
    target_language: Option<String>,

    /// Add a phonetic line under each original sentence
    #[arg(long)]
    phonetics: bool,

    /// First page to translate (1-based)
    #[arg(long)]
    start_page: Option<usize>,

    /// Last page to translate (inclusive)
    #[arg(long)]
    end_page: Option<usize>,

    /// Directory for the generated document (defaults to the input's directory)
    #[arg(short, long = "output")]
    output_dir: Option<PathBuf>,

    /// Configuration file path
    #[arg(short, long = "config", default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

/// Leengua - bilingual reading documents
///
/// Splits a text into sentences, translates each one and interleaves
/// the originals with their translations in a standalone HTML page.
#[derive(Parser, Debug)]
#[command(name = "leengua")]
#[command(version)]
#[command(about = "Sentence-interleaved bilingual document translator")]
#[command(long_about = "Leengua translates a text sentence by sentence and writes an HTML page pairing each original sentence with its translation.

EXAMPLES:
    leengua translate story.txt                         # Translate using default config
    leengua translate -f story.txt                      # Force overwrite existing output
    leengua translate -s auto -t spa_Latn story.txt     # Detect the source language
    leengua translate --start-page 2 --end-page 3 book.txt
    leengua translate -p echo --phonetics story.txt     # Offline dry run
    leengua translate /books/                           # Process an entire directory
    leengua detect story.txt                            # Guess the language of a file
    leengua completions bash > leengua.bash             # Generate bash completions

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a different
    config file with --config. If the config file doesn't exist, a default one
    will be created automatically.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Commands,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @creates: New logger with specified level
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        log::set_boxed_logger(Box::new(CustomLogger::new(level)))?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: Emoji for log level
    fn get_emoji_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "❌",
            Level::Warn => "🚧",
            Level::Info => "📖",
            Level::Debug => "🔍",
            Level::Trace => "📋",
        }
    }

    // @returns: ANSI color for log level
    fn get_color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "\x1B[1;31m",
            Level::Warn => "\x1B[1;33m",
            Level::Info => "\x1B[1;32m",
            Level::Debug => "\x1B[1;36m",
            Level::Trace => "\x1B[1;35m",
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        // The global max level is adjusted after config load
        metadata.level() <= self.level.max(log::max_level())
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let _ = writeln!(
                std::io::stderr(),
                "{}{} {} {}\x1B[0m",
                Self::get_color_for_level(record.level()),
                now,
                Self::get_emoji_for_level(record.level()),
                record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Info by default; the level is updated once the config is loaded
    CustomLogger::init(LevelFilter::Info)?;

    let cli = CommandLineOptions::parse();

    match cli.command {
        Commands::Completions { shell } => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "leengua", &mut std::io::stdout());
            Ok(())
        }
        Commands::Detect { input_file } => run_detect(&input_file).await,
        Commands::Translate(args) => run_translate(args).await,
    }
}

async fn run_detect(input_file: &Path) -> Result<()> {
    let controller = Controller::with_config(Config::default())?.non_interactive();
    let report = controller.detect_file_language(input_file).await?;

    match &report.detection {
        Detection::Language(code) => println!(
            "{} ({})",
            code,
            language_utils::get_language_name(code).unwrap_or_else(|_| code.clone())
        ),
        Detection::Unknown if !report.tied.is_empty() => println!("unknown (tie between {})", report.tied.join(", ")),
        Detection::Unknown => println!("unknown"),
    }

    let mut scores = report.scores.clone();
    scores.sort_by(|a, b| b.raw.cmp(&a.raw));
    for score in scores.iter().filter(|s| s.raw > 0).take(5) {
        println!("  {:<10} {:>6} {:>6.3}", score.code, score.raw, score.score);
    }

    Ok(())
}

async fn run_translate(options: TranslateArgs) -> Result<()> {
    // Apply a CLI log level immediately so config loading is logged at that level
    if let Some(cmd_log_level) = &options.log_level {
        let level: app_config::LogLevel = cmd_log_level.clone().into();
        log::set_max_level(level.into());
    }

    let mut config = Config::load_or_create(Path::new(&options.config_path))?;

    // Override config with CLI options if provided
    if let Some(provider) = &options.provider {
        config.translation.provider = provider.clone().into();
    }
    if let Some(endpoint) = &options.endpoint {
        config.translation.endpoint = endpoint.clone();
    }
    if let Some(source_lang) = &options.source_language {
        config.source_language = source_lang.clone();
    }
    if let Some(target_lang) = &options.target_language {
        config.target_language = target_lang.clone();
    }
    if options.phonetics {
        config.document.include_phonetics = true;
    }
    if let Some(log_level) = &options.log_level {
        config.log_level = log_level.clone().into();
    }

    config.validate().context("Configuration validation failed")?;

    if options.log_level.is_none() {
        log::set_max_level(config.log_level.into());
    }

    let page_range = PageRange::from_bounds(options.start_page, options.end_page)?;
    if let Some(range) = &page_range {
        info!("Translating pages {}", range);
    }

    info!(
        "Using {} provider, {} -> {}",
        config.translation.provider, config.source_language, config.target_language
    );

    let controller = Controller::with_config(config)?.with_page_range(page_range);

    if options.input_path.is_file() {
        let output_dir = options
            .output_dir
            .clone()
            .unwrap_or_else(|| options.input_path.parent().unwrap_or(Path::new(".")).to_path_buf());
        if controller
            .run(options.input_path.clone(), output_dir, options.force_overwrite)
            .await?
            .is_none()
        {
            warn!("Nothing was written");
        }
    } else if options.input_path.is_dir() {
        if options.output_dir.is_some() {
            warn!("--output is ignored for directories, documents are written next to their inputs");
        }
        let summary = controller
            .run_folder(options.input_path.clone(), options.force_overwrite)
            .await?;
        if summary.failed > 0 {
            return Err(anyhow!("{} file(s) failed to translate", summary.failed));
        }
    } else {
        return Err(anyhow!("Input path does not exist: {:?}", options.input_path));
    }

    Ok(())
}
