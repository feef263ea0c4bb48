use anyhow::Context;
use astrum::config::AstrumConfig;
use astrum::logging::{self, LoggingOptions};
use astrum::{error, FileManager, TuiApplication};
use std::path::PathBuf;

const USAGE: &str = "usage: astrum [--config <file>] [--log-file <file>] [--show-hidden] [DIRECTORY]";

fn main() -> anyhow::Result<()> {
    error::setup_panic_handler();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let cli = match parse_args(&args) {
        Ok(CliCommand::Run(cli)) => cli,
        Ok(CliCommand::Help) => {
            println!("{}", USAGE);
            return Ok(());
        }
        Ok(CliCommand::Version) => {
            println!("astrum {}", env!("CARGO_PKG_VERSION"));
            return Ok(());
        }
        Err(message) => {
            eprintln!("{}\n{}", message, USAGE);
            std::process::exit(2);
        }
    };

    let config_path = cli.config.clone().or_else(AstrumConfig::default_path);
    let file_config = match &config_path {
        Some(path) => AstrumConfig::load(path)
            .with_context(|| format!("failed to load {}", path.display()))?,
        None => AstrumConfig::default(),
    };
    let config = file_config.merged_with(&cli.overrides());

    // 画面を壊さないよう stderr には出さない
    let mut log_options = LoggingOptions {
        output_stderr: false,
        ..config.logging_options()
    }
    .with_env_override();
    if log_options.output_file.is_none() {
        log_options.output_file = default_log_path();
    }
    logging::init(&log_options).context("failed to initialize logging")?;
    log::info!("astrum {} starting", env!("CARGO_PKG_VERSION"));

    let manager = FileManager::new(&config);
    let mut app = TuiApplication::new(manager);
    app.run().context("terminal session failed")?;

    log::info!("astrum exiting");
    Ok(())
}

#[derive(Debug, Default)]
struct CliOptions {
    config: Option<PathBuf>,
    log_file: Option<PathBuf>,
    show_hidden: bool,
    start_path: Option<PathBuf>,
}

impl CliOptions {
    fn overrides(&self) -> AstrumConfig {
        AstrumConfig {
            start_path: self.start_path.clone(),
            show_hidden: self.show_hidden,
            bookmarks: Vec::new(),
            log_level: None,
            log_file: self.log_file.clone(),
        }
    }
}

enum CliCommand {
    Run(CliOptions),
    Help,
    Version,
}

fn parse_args(args: &[String]) -> Result<CliCommand, String> {
    let mut options = CliOptions::default();

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "-h" | "--help" => return Ok(CliCommand::Help),
            "-V" | "--version" => return Ok(CliCommand::Version),
            "--show-hidden" => options.show_hidden = true,
            "--config" => {
                let value = iter.next().ok_or("--config needs a file")?;
                options.config = Some(PathBuf::from(value));
            }
            "--log-file" => {
                let value = iter.next().ok_or("--log-file needs a file")?;
                options.log_file = Some(PathBuf::from(value));
            }
            other if other.starts_with('-') => {
                return Err(format!("unknown option: {}", other));
            }
            other => {
                if options.start_path.is_some() {
                    return Err(format!("unexpected argument: {}", other));
                }
                options.start_path = Some(PathBuf::from(other));
            }
        }
    }

    Ok(CliCommand::Run(options))
}

fn default_log_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".astrum-log").join("astrum.log"))
}
