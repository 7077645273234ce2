use anyhow::Context;
use log::{debug, info};
use tokio::sync::mpsc;

use crate::artwork;
use crate::config::Config;
use crate::event::{self, AppEvent};
use crate::load::{CounterSources, LoadModel};
use crate::monitor::Monitor;
use crate::scheduler::Scheduler;
use crate::surface::Surface;
use crate::tui::Tui;
use crate::ui;

pub struct App {
    pub should_quit: bool,
    pub config: Config,
    monitor: Monitor<Surface>,
    scheduler: Scheduler,
}

impl App {
    /// Build the dock and take the first sample. Fails when the counters
    /// cannot be read or parsed at all.
    pub fn new(config: Config, sources: CounterSources) -> anyhow::Result<Self> {
        let model = LoadModel::new(sources, config.start_cpu, config.aggregate);
        let surface = Surface::new(artwork::source_bitmap(), artwork::palette());
        let monitor = Monitor::start(model, surface, config.log_scale)
            .context("reading cpu counters")?;
        info!(
            "monitoring {} unit(s), rate {:?}, log scale {}, sleep when idle {}",
            monitor.model().unit_count(),
            config.rate,
            config.log_scale,
            config.sleep_when_idle
        );
        Ok(Self {
            should_quit: false,
            scheduler: Scheduler::new(config.rate),
            config,
            monitor,
        })
    }

    pub fn run(config: Config) -> anyhow::Result<()> {
        let app = Self::new(config, CounterSources::default())?;
        let rt = tokio::runtime::Runtime::new()?;
        rt.block_on(app.run_async())
    }

    async fn run_async(mut self) -> anyhow::Result<()> {
        let (event_tx, mut event_rx) = mpsc::unbounded_channel();
        event::start_event_loop(event_tx);

        let mut tui = Tui::new()?;
        tui.enter(self.config.sleep_when_idle)?;

        loop {
            if self.monitor.target_mut().take_damage().is_some() {
                let surface = self.monitor.target();
                let window_mode = self.config.window_mode;
                tui.draw(|frame| ui::render(surface, window_mode, frame))?;
            }

            let deadline = self.scheduler.deadline();
            tokio::select! {
                event = event_rx.recv() => match event {
                    Some(event) => self.handle_event(event),
                    None => self.should_quit = true,
                },
                _ = sleep_until(deadline) => {
                    self.scheduler.tick_delivered();
                    self.monitor.on_tick();
                }
            }

            if self.should_quit {
                break;
            }
        }

        info!("exiting");
        Ok(())
    }

    pub fn handle_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::Exposed => self.monitor.on_repaint_requested(),
            AppEvent::IdleStarted => {
                if self.config.sleep_when_idle {
                    self.scheduler.idle_started();
                    debug!(
                        "screen idle, sampling {:?}",
                        self.scheduler.interval()
                    );
                }
            }
            AppEvent::IdleEnded => {
                if self.scheduler.idle_ended() {
                    self.monitor.resume_from_idle();
                }
            }
            AppEvent::Quit => self.should_quit = true,
        }
    }
}

/// Sleep until `deadline`, or forever when there is none.
async fn sleep_until(deadline: Option<tokio::time::Instant>) {
    match deadline {
        Some(at) => tokio::time::sleep_until(at).await,
        None => std::future::pending().await,
    }
}
