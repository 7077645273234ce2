//! The dock artwork, drawn once at startup.
//!
//! The left 64×64 half is the background shown on the dock. The right half
//! holds the pieces the renderer copies over it: lit CPU bar columns for each
//! unit count, the lit graph column, the lit gauge strip, the strip shown
//! when there is no swap and the marker stamped into the graph after the
//! screen was idle.

use crate::layout::{
    partition, Region, CPU_AREA_HEIGHT, CPU_AREA_Y, CPU_BAR_WIDTH, CPU_BAR_X, DOCK_SIZE,
    GAUGE_HEIGHT, GAUGE_LENGTH, GAUGE_Y, GRAPH_HEIGHT, GRAPH_X, MEMORY_GAUGE_X, SWAP_GAUGE_X,
};
use crate::counters::MAX_UNITS;
use crate::surface::{Bitmap, Palette};

pub const SOURCE_WIDTH: u32 = 128;
pub const SOURCE_HEIGHT: u32 = 64;

pub const BLACK: u8 = 0;
pub const PANEL: u8 = 1;
pub const HIGHLIGHT: u8 = 2;
pub const SHADOW: u8 = 3;
pub const WELL: u8 = 4;
pub const GRID: u8 = 5;
pub const LED_OFF: u8 = 6;
pub const GRAPH: u8 = 7;
/// First of the bar gradient colors, cool to hot.
pub const HEAT: u8 = 8;
pub const HEAT_STEPS: u8 = 6;
pub const GAUGE_LIT: u8 = 14;
pub const GAUGE_DIM: u8 = 15;

/// Source origin and size of the idle marker.
pub const IDLE_MARKER: (u32, u32) = (65, 57);
pub const IDLE_MARKER_WIDTH: u32 = 21;
pub const IDLE_MARKER_HEIGHT: u32 = 7;

pub fn palette() -> Palette {
    vec![
        (0x00, 0x00, 0x00),
        (0xae, 0xaa, 0xae),
        (0xf7, 0xf3, 0xff),
        (0x51, 0x55, 0x51),
        (0x20, 0x20, 0x20),
        (0x00, 0x41, 0x41),
        (0x18, 0x45, 0x18),
        (0x20, 0xb2, 0xae),
        (0x00, 0xc7, 0x00),
        (0x5a, 0xd3, 0x00),
        (0xb6, 0xdf, 0x00),
        (0xef, 0xcb, 0x00),
        (0xf7, 0x82, 0x00),
        (0xff, 0x20, 0x00),
        (0x20, 0xe3, 0xff),
        (0x00, 0x55, 0x6b),
    ]
}

pub fn source_bitmap() -> Bitmap {
    let mut bmp = Bitmap::new(SOURCE_WIDTH, SOURCE_HEIGHT, BLACK);
    draw_background(&mut bmp);
    draw_lit_pieces(&mut bmp);
    bmp
}

fn draw_background(bmp: &mut Bitmap) {
    bmp.fill(Region::dock(), PANEL);
    bevel(bmp, Region::new(0, 0, DOCK_SIZE, DOCK_SIZE), HIGHLIGHT, SHADOW);

    // Graph and bar well.
    let well = Region::new(GRAPH_X, CPU_AREA_Y, CPU_BAR_X + CPU_BAR_WIDTH - GRAPH_X, CPU_AREA_HEIGHT);
    bmp.fill(well, WELL);
    bevel(bmp, grow(well), SHADOW, HIGHLIGHT);
    for y in (CPU_AREA_Y + 4..CPU_AREA_Y + GRAPH_HEIGHT).step_by(5) {
        bmp.fill(Region::new(GRAPH_X, y, CPU_BAR_X - GRAPH_X, 1), GRID);
    }
    bmp.fill(
        Region::new(CPU_BAR_X, CPU_AREA_Y, CPU_BAR_WIDTH, CPU_AREA_HEIGHT),
        LED_OFF,
    );

    for x in [MEMORY_GAUGE_X, SWAP_GAUGE_X] {
        let gauge = Region::new(x, GAUGE_Y, GAUGE_LENGTH, GAUGE_HEIGHT);
        gauge_cells(bmp, gauge, GAUGE_DIM);
        bevel(bmp, grow(gauge), SHADOW, HIGHLIGHT);
    }
}

fn draw_lit_pieces(bmp: &mut Bitmap) {
    // Graph samples.
    bmp.fill(Region::new(DOCK_SIZE, 0, 1, CPU_AREA_HEIGHT), GRAPH);

    // One bar column per unit count, graded over that count's bar length.
    for units in 1..=MAX_UNITS {
        let x = 62 + CPU_BAR_WIDTH * units as u32;
        let length = partition(CPU_AREA_HEIGHT, units)[0] - 1;
        for row in 0..length {
            let step = (length - 1 - row) * HEAT_STEPS as u32 / length;
            bmp.fill(Region::new(x, row, CPU_BAR_WIDTH, 1), HEAT + step as u8);
        }
    }

    gauge_cells(
        bmp,
        Region::new(DOCK_SIZE, 40, GAUGE_LENGTH, GAUGE_HEIGHT),
        GAUGE_LIT,
    );
    // No swap: same as an empty gauge.
    gauge_cells(
        bmp,
        Region::new(DOCK_SIZE, 48, GAUGE_LENGTH, GAUGE_HEIGHT),
        GAUGE_DIM,
    );

    draw_idle_marker(bmp);
}

/// Three "z" glyphs, 5×5 each, on the graph well.
fn draw_idle_marker(bmp: &mut Bitmap) {
    let (x0, y0) = IDLE_MARKER;
    bmp.fill(
        Region::new(x0, y0, IDLE_MARKER_WIDTH, IDLE_MARKER_HEIGHT),
        WELL,
    );
    for glyph in 0..3 {
        let gx = x0 + glyph * 8;
        let gy = y0 + 1;
        bmp.fill(Region::new(gx, gy, 5, 1), GRAPH);
        bmp.fill(Region::new(gx, gy + 4, 5, 1), GRAPH);
        for step in 1..4 {
            bmp.set(gx + 4 - step, gy + step, GRAPH);
        }
    }
}

/// Gauge cells: every other column `color`, framed by a dark row above and
/// below.
fn gauge_cells(bmp: &mut Bitmap, area: Region, color: u8) {
    bmp.fill(area, WELL);
    for dx in (0..area.width).step_by(2) {
        bmp.fill(Region::new(area.x + dx, area.y + 1, 1, area.height - 2), color);
    }
}

fn grow(area: Region) -> Region {
    Region::new(area.x - 1, area.y - 1, area.width + 2, area.height + 2)
}

/// One-pixel frame: `top_left` on the top and left edges, `bottom_right` on
/// the others.
fn bevel(bmp: &mut Bitmap, area: Region, top_left: u8, bottom_right: u8) {
    let right = area.x + area.width - 1;
    let bottom = area.y + area.height - 1;
    bmp.fill(Region::new(area.x, area.y, area.width, 1), top_left);
    bmp.fill(Region::new(area.x, area.y, 1, area.height), top_left);
    bmp.fill(Region::new(area.x, bottom, area.width, 1), bottom_right);
    bmp.fill(Region::new(right, area.y, 1, area.height), bottom_right);
}
