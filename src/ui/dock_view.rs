use ratatui::{buffer::Buffer, layout::Rect, style::Color, widgets::Widget};

use crate::surface::Surface;

/// Shows the dock surface with half-block cells: each cell is one pixel
/// wide and two pixels tall.
pub struct DockView<'a> {
    surface: &'a Surface,
}

impl<'a> DockView<'a> {
    pub fn new(surface: &'a Surface) -> Self {
        Self { surface }
    }

    fn color(&self, index: u8) -> Color {
        let (r, g, b) = self.surface.rgb(index);
        Color::Rgb(r, g, b)
    }
}

impl Widget for DockView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let bmp = self.surface.visible();
        let cols = bmp.width().min(area.width as u32);
        let rows = bmp.height().div_ceil(2).min(area.height as u32);

        for row in 0..rows {
            for col in 0..cols {
                let top = bmp.get(col, row * 2).unwrap_or(0);
                let bottom = bmp.get(col, row * 2 + 1).unwrap_or(0);
                let pos = (area.x + col as u16, area.y + row as u16);
                if let Some(cell) = buf.cell_mut(pos) {
                    cell.set_char('▀')
                        .set_fg(self.color(top))
                        .set_bg(self.color(bottom));
                }
            }
        }
    }
}
