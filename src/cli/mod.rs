pub mod console;
pub mod menu;
pub mod record;
pub mod timeline;

use std::{future::Future, sync::Arc};

use anyhow::Result;
use clap::{Parser, Subcommand};
use console::Console;
use menu::Menu;
use record::start_logging;
use timeline::{print_available_logs, process_timeline_command};
use tokio_util::sync::CancellationToken;
use tracing::{debug, level_filters::LevelFilter};

use crate::{
    app::Application,
    capture::{GenericScreenCapturer, ScreenCapturer},
    config::{Config, ConfigArgs},
    recorder::shutdown::detect_shutdown,
    utils::{
        clock::{Clock, DefaultClock},
        dir::create_application_default_path,
        logging::{enable_logging, LOG_PREFIX},
    },
};

/// Describes what is on your screen and turns each day into a timeline
#[derive(Parser, Debug)]
#[command(name = "screenlog", version, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Option<Commands>,
    #[command(flatten)]
    config: ConfigArgs,
    /// Enable trace logging
    #[arg(long, global = true)]
    log: bool,
    /// Level of diagnostic logs, overrides RUST_LOG
    #[arg(long = "log-filter", global = true)]
    log_filter: Option<LevelFilter>,
    /// This option is for debugging purposes only.
    #[arg(long = "log-console", global = true)]
    log_console: bool,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
enum Commands {
    #[command(about = "Interactive menu. Used when no command is given")]
    Menu,
    #[command(about = "Start logging screen activity until interrupted")]
    Log {
        #[arg(long, help = "Stop after this many cycles")]
        cycles: Option<usize>,
    },
    #[command(about = "Generate a timeline for a day")]
    Timeline {
        /// Day to summarize. Examples are "2025-03-15", "yesterday", "15/03/2025"
        date: String,
        #[arg(long, help = "Save the generated timeline next to the log")]
        save: bool,
    },
    #[command(about = "List days that have an activity log")]
    List,
}

impl Args {
    /// Without a subcommand the interactive menu runs.
    fn command_or_menu(&self) -> Commands {
        self.command.clone().unwrap_or(Commands::Menu)
    }
}

pub async fn run_cli() -> Result<()> {
    let args = Args::parse();

    let logging_level = args
        .log_filter
        .or_else(|| args.log.then_some(LevelFilter::TRACE));
    enable_logging(
        LOG_PREFIX,
        &create_application_default_path()?,
        logging_level,
        args.log_console,
    )?;

    let command = args.command_or_menu();
    let config = Config::from_args(args.config)?;
    debug!("Starting with {config:?}");
    let app = Application::new(config)?;

    let shutdown = CancellationToken::new();
    tokio::spawn(detect_shutdown(shutdown.clone()));
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);

    let result = match command {
        Commands::Menu => {
            let mut console = Console::stdio(shutdown.clone());
            Menu::new(
                &app,
                &mut console,
                clock,
                shutdown.clone(),
                Box::new(default_capturer),
            )
            .run()
            .await
        }
        Commands::Log { cycles } => {
            start_logging(
                &app,
                default_capturer()?,
                clock,
                shutdown.clone(),
                &mut std::io::stdout(),
                cycles,
            )
            .await
        }
        Commands::Timeline { date, save } => {
            process_timeline_command(
                &app,
                &date,
                save,
                clock.as_ref(),
                &shutdown,
                &mut std::io::stdout(),
            )
            .await
        }
        Commands::List => print_available_logs(&app, &mut std::io::stdout()).await,
    };

    if shutdown.is_cancelled() {
        println!("\nExiting...");
    }
    // Stops the signal watcher.
    shutdown.cancel();
    result
}

fn default_capturer() -> Result<Box<dyn ScreenCapturer>> {
    Ok(Box::new(GenericScreenCapturer::new()?))
}

/// Resolves to [None] once shutdown is requested.
pub(crate) async fn until_shutdown<T>(
    shutdown: &CancellationToken,
    future: impl Future<Output = T>,
) -> Option<T> {
    tokio::select! {
        biased;
        _ = shutdown.cancelled() => None,
        value = future => Some(value),
    }
}
