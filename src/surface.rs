use crate::layout::{Region, DOCK_SIZE};
use crate::render::{CopyRegion, Plane, RenderTarget};

/// Indexed-color pixel buffer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Bitmap {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl Bitmap {
    pub fn new(width: u32, height: u32, fill: u8) -> Self {
        Self {
            width,
            height,
            pixels: vec![fill; (width * height) as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn get(&self, x: u32, y: u32) -> Option<u8> {
        if x < self.width && y < self.height {
            Some(self.pixels[(y * self.width + x) as usize])
        } else {
            None
        }
    }

    pub fn set(&mut self, x: u32, y: u32, color: u8) {
        if x < self.width && y < self.height {
            self.pixels[(y * self.width + x) as usize] = color;
        }
    }

    pub fn fill(&mut self, area: Region, color: u8) {
        for y in area.y..area.y.saturating_add(area.height) {
            for x in area.x..area.x.saturating_add(area.width) {
                self.set(x, y, color);
            }
        }
    }

    fn row(&self, x: u32, y: u32, width: u32) -> &[u8] {
        let start = (y * self.width + x) as usize;
        &self.pixels[start..start + width as usize]
    }

    fn row_mut(&mut self, x: u32, y: u32, width: u32) -> &mut [u8] {
        let start = (y * self.width + x) as usize;
        &mut self.pixels[start..start + width as usize]
    }

    /// Copy a rectangle from `src` into `self`. The rectangle is clipped to
    /// both bitmaps.
    pub fn blit(&mut self, src: &Bitmap, op: &CopyRegion) {
        let Some((width, height)) = clip(op, src.width, src.height, self.width, self.height)
        else {
            return;
        };
        for row in 0..height {
            let line = src.row(op.src_x, op.src_y + row, width);
            self.row_mut(op.dst_x, op.dst_y + row, width)
                .copy_from_slice(line);
        }
    }

    /// Copy a rectangle within the bitmap. Overlapping rectangles are
    /// handled.
    pub fn copy_within(&mut self, op: &CopyRegion) {
        let Some((width, height)) = clip(op, self.width, self.height, self.width, self.height)
        else {
            return;
        };
        let rows: Vec<u32> = if op.dst_y > op.src_y {
            (0..height).rev().collect()
        } else {
            (0..height).collect()
        };
        for row in rows {
            let src = ((op.src_y + row) * self.width + op.src_x) as usize;
            let dst = ((op.dst_y + row) * self.width + op.dst_x) as usize;
            self.pixels
                .copy_within(src..src + width as usize, dst);
        }
    }
}

/// Width and height of `op` after clipping to the source and destination
/// bounds, or `None` when nothing is left.
fn clip(op: &CopyRegion, src_w: u32, src_h: u32, dst_w: u32, dst_h: u32) -> Option<(u32, u32)> {
    let width = op
        .width
        .min(src_w.saturating_sub(op.src_x))
        .min(dst_w.saturating_sub(op.dst_x));
    let height = op
        .height
        .min(src_h.saturating_sub(op.src_y))
        .min(dst_h.saturating_sub(op.dst_y));
    if width == 0 || height == 0 {
        None
    } else {
        Some((width, height))
    }
}

/// RGB colors for the indexed bitmaps.
pub type Palette = Vec<(u8, u8, u8)>;

/// The visible dock plus the artwork it is painted from.
pub struct Surface {
    source: Bitmap,
    visible: Bitmap,
    palette: Palette,
    damage: Option<Region>,
}

impl Surface {
    pub fn new(source: Bitmap, palette: Palette) -> Self {
        Self {
            source,
            visible: Bitmap::new(DOCK_SIZE, DOCK_SIZE, 0),
            palette,
            damage: None,
        }
    }

    pub fn visible(&self) -> &Bitmap {
        &self.visible
    }

    pub fn rgb(&self, index: u8) -> (u8, u8, u8) {
        self.palette.get(index as usize).copied().unwrap_or((0, 0, 0))
    }

    /// Area that needs to be shown again, cleared on read.
    pub fn take_damage(&mut self) -> Option<Region> {
        self.damage.take()
    }
}

impl RenderTarget for Surface {
    fn copy_region(&mut self, op: CopyRegion) {
        match op.from {
            Plane::Source => self.visible.blit(&self.source, &op),
            Plane::Surface => self.visible.copy_within(&op),
        }
    }

    fn request_repaint(&mut self, area: Region) {
        self.damage = Some(match self.damage {
            Some(prev) => prev.union(&area),
            None => area,
        });
    }
}
