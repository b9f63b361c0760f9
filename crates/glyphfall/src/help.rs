//! Key reference drawn over the rain while toggled on.

use glyphfall_core::{ColorRegistry, ColorSlot};
use ratatui::{
    Frame,
    layout::Rect,
    style::Style,
    text::Line,
    widgets::{Block, Borders, Clear, Paragraph},
};

const HELP_LINES: [&str; 8] = [
    "Help            m",
    "Quit            q / e / Esc",
    "Play / Pause    Space / p",
    "Speed           Up / Down  (+ / -)",
    "Color           Left / Right  (< / >)",
    "Length          a / d",
    "Density         w / s",
    "Color by name   g / b / r / y",
];

const WIDTH: u16 = 42;

/// Centre a `width` x `height` box in `area`, shrinking it to fit.
fn popup_area(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    let x = area.x + (area.width.saturating_sub(width) / 2);
    let y = area.y + (area.height.saturating_sub(height) / 2);
    Rect::new(x, y, width, height)
}

pub fn render_help(frame: &mut Frame, registry: &ColorRegistry) {
    let height = HELP_LINES.len() as u16 + 2;
    let area = popup_area(WIDTH, height, frame.area());

    let text_style = Style::default()
        .fg(registry.color(ColorSlot::White))
        .bg(registry.color(ColorSlot::Black));
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" glyphfall ")
        .border_style(text_style.fg(registry.color(ColorSlot::Highlight)))
        .style(text_style);
    let lines: Vec<Line> = HELP_LINES.iter().map(|line| Line::raw(*line)).collect();

    frame.render_widget(Clear, area);
    frame.render_widget(Paragraph::new(lines).block(block).style(text_style), area);
}
