use std::ops::Range;

use ratatui::prelude::*;

const BLANK: Color = Color::Rgb(0, 0, 0);

/// A logical canvas (800x600 for both games) scaled onto terminal cells.
///
/// Every cell holds two square-ish pixels stacked vertically and drawn with
/// a half block, so the pixel grid is `cols` wide and `2 * rows` tall. Text
/// sits on a separate per-cell layer above the pixels.
pub struct Surface {
    cols: usize,
    rows: usize,
    /// Pixels per logical unit
    scale_x: f32,
    scale_y: f32,
    pixels: Vec<Color>,
    glyphs: Vec<Option<(char, Color)>>,
}

impl Surface {
    pub fn new(cols: u16, rows: u16, logical_width: f32, logical_height: f32) -> Self {
        let cols = cols as usize;
        let rows = rows as usize;
        let scale_x = if logical_width > 0.0 { cols as f32 / logical_width } else { 0.0 };
        let scale_y = if logical_height > 0.0 { (rows * 2) as f32 / logical_height } else { 0.0 };
        Self {
            cols,
            rows,
            scale_x,
            scale_y,
            pixels: vec![BLANK; cols * rows * 2],
            glyphs: vec![None; cols * rows],
        }
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    fn pixel_height(&self) -> usize {
        self.rows * 2
    }

    pub fn pixel(&self, px: usize, py: usize) -> Option<Color> {
        if px < self.cols && py < self.pixel_height() {
            Some(self.pixels[py * self.cols + px])
        } else {
            None
        }
    }

    pub fn glyph(&self, col: usize, row: usize) -> Option<(char, Color)> {
        if col < self.cols && row < self.rows {
            self.glyphs[row * self.cols + col]
        } else {
            None
        }
    }

    fn put(&mut self, px: usize, py: usize, color: Color) {
        if px < self.cols && py < self.pixel_height() {
            self.pixels[py * self.cols + px] = color;
        }
    }

    /// Pixels whose centres fall in `[start, end)` along one axis.
    fn span(start: f32, end: f32, scale: f32, limit: usize) -> Range<usize> {
        let lo = (start * scale - 0.5).ceil().max(0.0) as usize;
        let hi = ((end * scale - 0.5).ceil().max(0.0) as usize).min(limit);
        lo..hi.max(lo)
    }

    fn center_of(&self, px: usize, py: usize) -> (f32, f32) {
        ((px as f32 + 0.5) / self.scale_x, (py as f32 + 0.5) / self.scale_y)
    }

    pub fn fill(&mut self, color: Color) {
        self.pixels.iter_mut().for_each(|p| *p = color);
        self.glyphs.iter_mut().for_each(|g| *g = None);
    }

    pub fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Color) {
        let xs = Self::span(x, x + w, self.scale_x, self.cols);
        let ys = Self::span(y, y + h, self.scale_y, self.pixel_height());
        for py in ys {
            for px in xs.clone() {
                self.put(px, py, color);
            }
        }
    }

    /// Paints pixels whose centres lie within `radius` of `(cx, cy)`. A
    /// circle smaller than one pixel still paints the pixel under its centre.
    pub fn fill_circle(&mut self, cx: f32, cy: f32, radius: f32, color: Color) {
        let painted = self.paint_ring(cx, cy, 0.0, radius, color);
        if painted == 0 && cx >= 0.0 && cy >= 0.0 {
            let px = (cx * self.scale_x) as usize;
            let py = (cy * self.scale_y) as usize;
            self.put(px, py, color);
        }
    }

    /// Paints a ring `width` thick just inside `radius`, widened to at least
    /// one pixel so it survives coarse terminals.
    pub fn circle_outline(&mut self, cx: f32, cy: f32, radius: f32, width: f32, color: Color) {
        let pixel_extent = if self.scale_x > 0.0 && self.scale_y > 0.0 {
            (1.0 / self.scale_x).max(1.0 / self.scale_y)
        } else {
            0.0
        };
        let inner = (radius - width.max(pixel_extent)).max(0.0);
        self.paint_ring(cx, cy, inner, radius, color);
    }

    fn paint_ring(&mut self, cx: f32, cy: f32, inner: f32, outer: f32, color: Color) -> usize {
        let xs = Self::span(cx - outer, cx + outer, self.scale_x, self.cols);
        let ys = Self::span(cy - outer, cy + outer, self.scale_y, self.pixel_height());
        let mut painted = 0;
        for py in ys {
            for px in xs.clone() {
                let (lx, ly) = self.center_of(px, py);
                let d2 = (lx - cx).powi(2) + (ly - cy).powi(2);
                if d2 <= outer * outer && d2 >= inner * inner {
                    self.put(px, py, color);
                    painted += 1;
                }
            }
        }
        painted
    }

    /// Writes `text` starting at the cell containing `(x, y)`, clipped at the
    /// right edge.
    pub fn text(&mut self, x: f32, y: f32, text: &str, color: Color) {
        if x < 0.0 || y < 0.0 {
            return;
        }
        let col = (x * self.scale_x) as usize;
        let row = (y * self.scale_y / 2.0) as usize;
        if row >= self.rows {
            return;
        }
        for (i, ch) in text.chars().enumerate() {
            let c = col + i;
            if c >= self.cols {
                break;
            }
            self.glyphs[row * self.cols + c] = Some((ch, color));
        }
    }

    pub fn into_lines(self) -> Vec<Line<'static>> {
        (0..self.rows)
            .map(|row| {
                let spans: Vec<Span<'static>> = (0..self.cols)
                    .map(|col| {
                        let top = self.pixels[(row * 2) * self.cols + col];
                        let bottom = self.pixels[(row * 2 + 1) * self.cols + col];
                        match self.glyphs[row * self.cols + col] {
                            Some((ch, fg)) => Span::styled(
                                String::from(ch),
                                Style::default().fg(fg).bg(top).add_modifier(Modifier::BOLD),
                            ),
                            None if top == bottom => {
                                Span::styled(" ", Style::default().bg(top))
                            }
                            None => Span::styled("▀", Style::default().fg(top).bg(bottom)),
                        }
                    })
                    .collect();
                Line::from(spans)
            })
            .collect()
    }
}
