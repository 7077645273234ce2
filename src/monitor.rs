use log::{debug, trace, warn};

use crate::error::SampleError;
use crate::layout::{Region, CPU_AREA_Y, GRAPH_HEIGHT, GRAPH_WIDTH, GRAPH_X};
use crate::load::LoadModel;
use crate::render::{DiffRenderer, RenderTarget};

/// Ticks folded into one history-graph column.
pub const HISTORY_WINDOW: u32 = 10;

/// Sampling and drawing state shared by every tick.
pub struct Monitor<T: RenderTarget> {
    model: LoadModel,
    renderer: DiffRenderer,
    target: T,
    ticks: u32,
}

impl<T: RenderTarget> Monitor<T> {
    /// Paint the background and take the first sample. Any error from the
    /// first CPU sample is returned; later ones only skip a tick.
    pub fn start(
        mut model: LoadModel,
        mut target: T,
        log_scale: bool,
    ) -> Result<Self, SampleError> {
        model.prime()?;
        let mut renderer = DiffRenderer::new(model.unit_count(), log_scale);
        renderer.draw_background(&mut target);
        renderer.draw_cpu_bars(&mut target, &model.instant_loads());
        // The first sample averages over the whole uptime; keep it out of
        // the history.
        model.take_averages(HISTORY_WINDOW);

        let mut monitor = Self {
            model,
            renderer,
            target,
            ticks: 0,
        };
        monitor.update_gauges();
        monitor.renderer.take_issued();
        monitor.target.request_repaint(Region::dock());
        Ok(monitor)
    }

    pub fn on_tick(&mut self) {
        if let Err(e) = self.model.refresh() {
            warn!("skipping sample: {}", e);
            return;
        }
        self.renderer
            .draw_cpu_bars(&mut self.target, &self.model.instant_loads());

        self.ticks += 1;
        if self.ticks == HISTORY_WINDOW {
            self.ticks = 0;
            let averages = self.model.take_averages(HISTORY_WINDOW);
            self.renderer.draw_history(&mut self.target, &averages);
            self.update_gauges();
        }

        let issued = self.renderer.take_issued();
        trace!("tick issued {} copies", issued);
        if issued > 0 {
            self.target.request_repaint(Region::dock());
        }
    }

    pub fn on_repaint_requested(&mut self) {
        self.target.request_repaint(Region::dock());
    }

    /// Restore the history graph after the screen was idle and mark where
    /// sampling stopped.
    pub fn resume_from_idle(&mut self) {
        debug!("resuming after idle");
        self.renderer.clear_history(&mut self.target);
        self.renderer.draw_idle_marker(&mut self.target);
        self.renderer.take_issued();
        self.target.request_repaint(self.renderer.cpu_area().union(&graph_area()));
    }

    fn update_gauges(&mut self) {
        if let Err(e) = self.model.refresh_memory() {
            warn!("skipping memory sample: {}", e);
            return;
        }
        trace!("memory {:?}", self.model.memory());
        self.renderer
            .draw_memory(&mut self.target, self.model.memory_percent());
        self.renderer
            .draw_swap(&mut self.target, self.model.swap_percent());
    }

    pub fn model(&self) -> &LoadModel {
        &self.model
    }

    pub fn target(&self) -> &T {
        &self.target
    }

    pub fn target_mut(&mut self) -> &mut T {
        &mut self.target
    }
}

fn graph_area() -> Region {
    Region::new(GRAPH_X, CPU_AREA_Y, GRAPH_WIDTH + 1, GRAPH_HEIGHT)
}
