mod app;
mod artwork;
mod config;
mod counters;
mod error;
mod event;
mod layout;
mod load;
mod logging;
mod monitor;
mod render;
mod scale;
mod scheduler;
mod surface;
mod tui;
mod ui;

use std::time::Duration;

use clap::{ArgAction, Parser};
use config::{Config, DEFAULT_RATE_MS};

#[derive(Parser, Debug)]
#[command(
    name = "wmcpumon",
    about = "CPU system monitor dock tile",
    before_help = concat!(
        "wmcpumon CPU system monitor dockapp Version ",
        env!("CARGO_PKG_VERSION")
    ),
    disable_help_flag = true
)]
struct Cli {
    /// Display the aggregate numbers of all cores
    #[arg(short = 'a')]
    aggregate: bool,
    /// First cpu to use (to monitor more than 4 cores)
    #[arg(short = 'c', value_name = "N", default_value_t = 0)]
    cpu: usize,
    /// Use a logarithmic scale
    #[arg(short = 'l')]
    log_scale: bool,
    /// Refresh rate in milliseconds
    #[arg(
        short = 'r',
        value_name = "RATE",
        default_value_t = DEFAULT_RATE_MS,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    rate: u64,
    /// Sleep while the screen is idle (terminal loses focus)
    #[arg(short = 's')]
    sleep: bool,
    /// Start in window mode
    #[arg(short = 'w')]
    window: bool,
    /// Print usage
    #[arg(short = 'h', short_alias = '?', action = ArgAction::Help)]
    help: Option<bool>,
}

impl From<Cli> for Config {
    fn from(cli: Cli) -> Self {
        Config {
            aggregate: cli.aggregate,
            start_cpu: cli.cpu,
            log_scale: cli.log_scale,
            rate: Duration::from_millis(cli.rate),
            sleep_when_idle: cli.sleep,
            window_mode: cli.window,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let config = Config::from(Cli::parse());

    // Logging is best effort; the dock runs without it.
    if let Ok(Some(path)) = logging::init() {
        log::debug!("logging to {}", path.display());
    }
    log::info!("starting with {:?}", config);

    tui::install_panic_hook();
    app::App::run(config)
}
