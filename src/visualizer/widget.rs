use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Color,
    widgets::{Block, Widget},
};

/// Bar color at the bottom of the canvas.
const BOTTOM_RGB: (u8, u8, u8) = (0x00, 0xbf, 0xff);
/// Bar color at the top of the canvas.
const TOP_RGB: (u8, u8, u8) = (0xff, 0x00, 0xff);

const EIGHTHS: [&str; 8] = [" ", "▁", "▂", "▃", "▄", "▅", "▆", "▇"];

/// Bar height in cells for each bin: `bin / 255 * height`.
pub fn bar_heights(bins: &[u8], height: u16) -> Vec<f32> {
    bins.iter()
        .map(|b| *b as f32 / 255.0 * height as f32)
        .collect()
}

/// Gradient color of row `row` counted from the bottom of a canvas `height` rows tall.
pub fn gradient_color(row: u16, height: u16) -> Color {
    let t = if height <= 1 {
        0.0
    } else {
        row.min(height - 1) as f32 / (height - 1) as f32
    };
    let lerp = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * t).round() as u8;
    Color::Rgb(
        lerp(BOTTOM_RGB.0, TOP_RGB.0),
        lerp(BOTTOM_RGB.1, TOP_RGB.1),
        lerp(BOTTOM_RGB.2, TOP_RGB.2),
    )
}

/// Paints one bar per bin, left to right, as many as fit.
pub struct SpectrumWidget<'a> {
    bins: &'a [u8],
    block: Option<Block<'a>>,
}

impl<'a> SpectrumWidget<'a> {
    pub fn new(bins: &'a [u8]) -> Self {
        Self { bins, block: None }
    }

    pub fn block(mut self, block: Block<'a>) -> Self {
        self.block = Some(block);
        self
    }
}

impl Widget for SpectrumWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let inner = if let Some(block) = self.block {
            let inner = block.inner(area);
            block.render(area, buf);
            inner
        } else {
            area
        };

        if inner.width == 0 || inner.height == 0 {
            return;
        }

        // Clear the canvas before painting the frame.
        for y in inner.top()..inner.bottom() {
            for x in inner.left()..inner.right() {
                buf[(x, y)].set_symbol(" ").set_fg(Color::Reset);
            }
        }

        let bars = inner.width as usize;
        let heights = bar_heights(&self.bins[..self.bins.len().min(bars)], inner.height);

        for (i, h) in heights.iter().enumerate() {
            let x = inner.x + i as u16;
            let full = h.floor() as u16;
            let eighths = ((h - h.floor()) * 8.0) as usize;

            for row in 0..full.min(inner.height) {
                let y = inner.bottom() - 1 - row;
                buf[(x, y)]
                    .set_symbol("█")
                    .set_fg(gradient_color(row, inner.height));
            }
            if full < inner.height && eighths > 0 {
                let y = inner.bottom() - 1 - full;
                buf[(x, y)]
                    .set_symbol(EIGHTHS[eighths])
                    .set_fg(gradient_color(full, inner.height));
            }
        }
    }
}
