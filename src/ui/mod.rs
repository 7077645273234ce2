pub mod dock_view;

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    widgets::{Block, BorderType, Borders},
    Frame,
};

use crate::layout::DOCK_SIZE;
use crate::surface::Surface;

use dock_view::DockView;

/// Terminal cells taken by the dock.
pub const DOCK_COLS: u16 = DOCK_SIZE as u16;
pub const DOCK_ROWS: u16 = (DOCK_SIZE / 2) as u16;

pub fn render(surface: &Surface, window_mode: bool, frame: &mut Frame) {
    let area = frame.area();
    if window_mode {
        let outer = centered_rect(DOCK_COLS + 2, DOCK_ROWS + 2, area);
        let block = Block::default()
            .title(" wmcpumon ")
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::DarkGray));
        let inner = block.inner(outer);
        frame.render_widget(block, outer);
        frame.render_widget(DockView::new(surface), inner);
    } else {
        let tile = Rect::new(
            area.x,
            area.y,
            DOCK_COLS.min(area.width),
            DOCK_ROWS.min(area.height),
        );
        frame.render_widget(DockView::new(surface), tile);
    }
}

fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}
