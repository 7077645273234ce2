//! Minimal-diff drawing of the dock's bars, history graph and gauges.
//!
//! Every visual element remembers the extent it was last drawn with. A new
//! extent produces at most two copies from the pre-rendered source bitmap:
//! one covering the first `extent` pixels along the bar and one covering the
//! rest. An unchanged extent produces nothing.

use crate::layout::{
    self, Region, UnitStrip, CPU_AREA_Y, CPU_BAR_WIDTH, CPU_BAR_X, GAUGE_HEIGHT, GAUGE_LENGTH,
    GAUGE_Y, GRAPH_HEIGHT, GRAPH_NEW_COLUMN_X, GRAPH_WIDTH, GRAPH_X, MEMORY_GAUGE_X,
    SWAP_GAUGE_X,
};
use crate::artwork::{IDLE_MARKER, IDLE_MARKER_HEIGHT, IDLE_MARKER_WIDTH};
use crate::load::SwapUsage;
use crate::scale;

/// Source-bitmap column where the lit graph samples are kept.
const GRAPH_LIT_X: u32 = 64;
/// Lit gauge strip and "no swap" strip in the source bitmap.
const GAUGE_LIT: (u32, u32) = (64, 40);
const SWAP_ABSENT: (u32, u32) = (64, 48);
/// Where the idle marker lands inside the graph.
const IDLE_MARKER_AT: (u32, u32) = (35, 22);

/// Which bitmap a copy reads from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Plane {
    /// The pre-rendered artwork.
    Source,
    /// The visible dock surface itself.
    Surface,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CopyRegion {
    pub from: Plane,
    pub src_x: u32,
    pub src_y: u32,
    pub dst_x: u32,
    pub dst_y: u32,
    pub width: u32,
    pub height: u32,
}

impl CopyRegion {
    pub fn from_source(src: (u32, u32), dst: (u32, u32), width: u32, height: u32) -> Self {
        Self {
            from: Plane::Source,
            src_x: src.0,
            src_y: src.1,
            dst_x: dst.0,
            dst_y: dst.1,
            width,
            height,
        }
    }
}

/// Drawing capability of the presentation layer.
pub trait RenderTarget {
    fn copy_region(&mut self, op: CopyRegion);
    fn request_repaint(&mut self, area: Region);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Axis {
    /// Extent runs top to bottom.
    Vertical,
    /// Extent runs left to right.
    Horizontal,
}

/// How a source region lines up with the bar it paints.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Anchor {
    /// Source pixel `k` paints bar pixel `k`.
    Bar,
    /// The copy always starts at the source origin.
    Origin,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Source {
    x: u32,
    y: u32,
    anchor: Anchor,
}

impl Source {
    const fn bar(x: u32, y: u32) -> Self {
        Self {
            x,
            y,
            anchor: Anchor::Bar,
        }
    }

    const fn origin(x: u32, y: u32) -> Self {
        Self {
            x,
            y,
            anchor: Anchor::Origin,
        }
    }
}

/// Static description of one bar on the dock.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Bar {
    axis: Axis,
    x: u32,
    y: u32,
    length: u32,
    thickness: u32,
    /// Paints pixels `0..extent`.
    lead: Source,
    /// Paints pixels `extent..length`.
    tail: Source,
}

impl Bar {
    fn cpu(strip: &UnitStrip, units: usize) -> Self {
        let lit_x = 62 + CPU_BAR_WIDTH * units as u32;
        Bar {
            axis: Axis::Vertical,
            x: CPU_BAR_X,
            y: strip.y,
            length: strip.length,
            thickness: CPU_BAR_WIDTH,
            lead: Source::bar(CPU_BAR_X, strip.y),
            tail: Source::bar(lit_x, 0),
        }
    }

    fn graph_column(strip: &UnitStrip) -> Self {
        Bar {
            axis: Axis::Vertical,
            x: GRAPH_NEW_COLUMN_X,
            y: strip.y,
            length: strip.length,
            thickness: 1,
            lead: Source::bar(GRAPH_NEW_COLUMN_X, strip.y),
            tail: Source::origin(GRAPH_LIT_X, 0),
        }
    }

    fn gauge(x: u32) -> Self {
        Bar {
            axis: Axis::Horizontal,
            x,
            y: GAUGE_Y,
            length: GAUGE_LENGTH,
            thickness: GAUGE_HEIGHT,
            lead: Source::origin(GAUGE_LIT.0, GAUGE_LIT.1),
            tail: Source::bar(x, GAUGE_Y),
        }
    }

    /// The copy painting `offset..offset + len` along the bar from `source`.
    fn copy(&self, source: Source, offset: u32, len: u32) -> CopyRegion {
        let shift = match source.anchor {
            Anchor::Bar => offset,
            Anchor::Origin => 0,
        };
        match self.axis {
            Axis::Vertical => CopyRegion::from_source(
                (source.x, source.y + shift),
                (self.x, self.y + offset),
                self.thickness,
                len,
            ),
            Axis::Horizontal => CopyRegion::from_source(
                (source.x + shift, source.y),
                (self.x + offset, self.y),
                len,
                self.thickness,
            ),
        }
    }

    fn area(&self) -> Region {
        match self.axis {
            Axis::Vertical => Region::new(self.x, self.y, self.thickness, self.length),
            Axis::Horizontal => Region::new(self.x, self.y, self.length, self.thickness),
        }
    }
}

struct Element {
    bar: Bar,
    last: Option<u32>,
}

impl Element {
    fn new(bar: Bar) -> Self {
        Self { bar, last: None }
    }

    /// Draw the bar at `extent` unless it already shows it. Returns the
    /// number of copies issued.
    fn update<T: RenderTarget>(&mut self, target: &mut T, extent: u32) -> usize {
        let extent = extent.min(self.bar.length);
        if self.last == Some(extent) {
            return 0;
        }
        self.last = Some(extent);

        let mut issued = 0;
        if extent > 0 {
            target.copy_region(self.bar.copy(self.bar.lead, 0, extent));
            issued += 1;
        }
        if extent < self.bar.length {
            target.copy_region(self.bar.copy(self.bar.tail, extent, self.bar.length - extent));
            issued += 1;
        }
        issued
    }
}

pub struct DiffRenderer {
    log_scale: bool,
    bars: Vec<Element>,
    columns: Vec<Element>,
    memory: Element,
    swap: Element,
    /// The swap gauge shows the "no swap" strip.
    swap_absent: bool,
    issued: usize,
}

impl DiffRenderer {
    pub fn new(unit_count: usize, log_scale: bool) -> Self {
        let strips = layout::unit_strips(unit_count);
        Self {
            log_scale,
            bars: strips
                .iter()
                .map(|s| Element::new(Bar::cpu(s, unit_count)))
                .collect(),
            columns: strips
                .iter()
                .map(|s| Element::new(Bar::graph_column(s)))
                .collect(),
            memory: Element::new(Bar::gauge(MEMORY_GAUGE_X)),
            swap: Element::new(Bar::gauge(SWAP_GAUGE_X)),
            swap_absent: false,
            issued: 0,
        }
    }

    /// Copies issued since the last call.
    pub fn take_issued(&mut self) -> usize {
        std::mem::take(&mut self.issued)
    }

    /// Copy the whole dock background from the source bitmap and forget
    /// every drawn extent.
    pub fn draw_background<T: RenderTarget>(&mut self, target: &mut T) {
        let dock = Region::dock();
        target.copy_region(CopyRegion::from_source(
            (0, 0),
            (0, 0),
            dock.width,
            dock.height,
        ));
        self.issued += 1;
        for element in self.bars.iter_mut().chain(self.columns.iter_mut()) {
            element.last = None;
        }
        self.memory.last = None;
        self.swap.last = None;
        self.swap_absent = false;
    }

    /// Draw the instantaneous load bars, one load per unit.
    pub fn draw_cpu_bars<T: RenderTarget>(&mut self, target: &mut T, loads: &[u32]) {
        for (element, &load) in self.bars.iter_mut().zip(loads) {
            let extent = scale::to_extent(load, element.bar.length, self.log_scale);
            self.issued += element.update(target, extent);
        }
    }

    /// Scroll the history graph one column left and append one column per
    /// unit showing `averages`.
    pub fn draw_history<T: RenderTarget>(&mut self, target: &mut T, averages: &[u32]) {
        target.copy_region(CopyRegion {
            from: Plane::Surface,
            src_x: GRAPH_X + 1,
            src_y: CPU_AREA_Y,
            dst_x: GRAPH_X,
            dst_y: CPU_AREA_Y,
            width: GRAPH_WIDTH,
            height: GRAPH_HEIGHT,
        });
        self.issued += 1;

        for (element, &avg) in self.columns.iter_mut().zip(averages) {
            let extent = scale::to_extent(avg, element.bar.length, self.log_scale);
            self.issued += element.update(target, extent);
        }
    }

    /// Wipe the graph back to the background, e.g. after something else
    /// covered the dock.
    pub fn clear_history<T: RenderTarget>(&mut self, target: &mut T) {
        target.copy_region(CopyRegion::from_source(
            (GRAPH_X, CPU_AREA_Y),
            (GRAPH_X, CPU_AREA_Y),
            GRAPH_WIDTH + 1,
            GRAPH_HEIGHT,
        ));
        self.issued += 1;
        for element in &mut self.columns {
            element.last = None;
        }
    }

    /// Stamp the idle marker into the graph. It scrolls away with the
    /// history.
    pub fn draw_idle_marker<T: RenderTarget>(&mut self, target: &mut T) {
        target.copy_region(CopyRegion::from_source(
            IDLE_MARKER,
            IDLE_MARKER_AT,
            IDLE_MARKER_WIDTH,
            IDLE_MARKER_HEIGHT,
        ));
        self.issued += 1;
    }

    pub fn draw_memory<T: RenderTarget>(&mut self, target: &mut T, pct: u32) {
        let extent = scale::fill_extent(pct, GAUGE_LENGTH);
        self.issued += self.memory.update(target, extent);
    }

    pub fn draw_swap<T: RenderTarget>(&mut self, target: &mut T, usage: SwapUsage) {
        match usage {
            SwapUsage::Absent => {
                if self.swap_absent {
                    return;
                }
                self.swap_absent = true;
                self.swap.last = None;
                target.copy_region(CopyRegion::from_source(
                    SWAP_ABSENT,
                    (SWAP_GAUGE_X, GAUGE_Y),
                    GAUGE_LENGTH,
                    GAUGE_HEIGHT,
                ));
                self.issued += 1;
            }
            SwapUsage::Used(pct) => {
                let extent = scale::fill_extent(pct, GAUGE_LENGTH);
                self.swap_absent = false;
                self.issued += self.swap.update(target, extent);
            }
        }
    }

    /// Area covered by the CPU bars and graph.
    pub fn cpu_area(&self) -> Region {
        self.bars
            .iter()
            .chain(self.columns.iter())
            .fold(Region::new(0, 0, 0, 0), |acc, e| acc.union(&e.bar.area()))
    }
}
