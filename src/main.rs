mod bar;
mod cfg;
mod class_hint;
mod color;
mod config;
mod error;
mod ewmh;
mod paths;
mod plugin;
mod process;
mod rectangle;
mod x;

use bar::{Bar, PluginEvents, Signal};
use clap::Parser;
use config::Config;
use error::{fatal_error, LogError, OrFatal};
use plugin::PluginThread;
use std::{
    path::{Path, PathBuf},
    sync::Arc,
};
use x::Display;

pub type AnyResult<T> = Result<T, Box<dyn std::error::Error>>;

#[derive(Parser)]
#[command(version, about = "A status bar for X11 window managers")]
struct CommandLine {
    /// Configuration file to use instead of the default one
    #[arg(long)]
    config: Option<PathBuf>,

    /// File to write the log to
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Log everything, including debug and trace messages
    #[arg(long, short)]
    verbose: bool,

    /// X display to connect to, defaults to $DISPLAY
    #[arg(long)]
    display: Option<String>,
}

fn configure_logging(log_file: &Path, verbose: bool) -> AnyResult<()> {
    use log::LevelFilter;
    use log4rs::{
        append::file::FileAppender,
        config::{Appender, Config, Logger, Root},
        encode::pattern::PatternEncoder,
    };
    let log_file = FileAppender::builder()
        .encoder(Box::new(PatternEncoder::new("{l:<5}| {m}\n")))
        .append(false)
        .build(log_file)?;
    let level = if cfg!(debug_assertions) || verbose {
        LevelFilter::Trace
    } else {
        LevelFilter::Info
    };
    let log_config = Config::builder()
        .appender(Appender::builder().build("log_file", Box::new(log_file)))
        .logger(
            Logger::builder()
                .appender("log_file")
                .build("excalibar", level),
        )
        .build(Root::builder().build(LevelFilter::Off))?;
    log4rs::init_config(log_config)?;
    Ok(())
}

fn spawn_plugins(
    config: &Config,
    display: &Arc<Display>,
    events: &PluginEvents,
    signal: &Signal,
) -> Vec<PluginThread> {
    config
        .bar
        .plugins
        .iter()
        .enumerate()
        .filter_map(|(id, name)| {
            let plugin = plugin::create(name, config, display)?;
            PluginThread::spawn(id, plugin, events.clone(), signal.clone()).log_error()
        })
        .collect()
}

fn main() {
    let args = CommandLine::parse();
    let log_file = args
        .log_file
        .unwrap_or_else(|| PathBuf::from(paths::log_path()));
    if let Err(error) = configure_logging(&log_file, args.verbose) {
        eprintln!("excalibar: could not set up logging: {error}");
    }
    log::info!("Starting excalibar {}", env!("CARGO_PKG_VERSION"));

    let config_path = args
        .config
        .unwrap_or_else(|| PathBuf::from(paths::config_path()));
    let config = Config::load(&config_path).unwrap_or_else(|report| {
        eprint!("{report}");
        fatal_error(format!("invalid configuration: {}", config_path.display()))
    });

    log::trace!("Connecting to X server");
    let display = Arc::new(Display::connect(args.display.as_deref()).unwrap_or_fatal());
    let (width, height) = display.screen_size();
    log::info!("Screen size: {width}x{height}");

    let mut bar = Bar::create(display.clone(), &config.bar).unwrap_or_fatal();
    let events = PluginEvents::new();
    let signal = Signal::new(bar.window().clone());
    let mut plugins = spawn_plugins(&config, &display, &events, &signal);
    if plugins.is_empty() {
        log::warn!("No plugins are running");
    }

    log::trace!("Running");
    bar::run(&mut bar, &mut plugins, &events);

    log::trace!("Cleaning up");
    for plugin in plugins {
        plugin.stop();
    }
    bar.destroy();
}
