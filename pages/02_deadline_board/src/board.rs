//! Board geometry - headline panel and secondary tiles

use nannou::prelude::*;

/// Height reserved for the egui status bar
pub const STATUS_BAR_HEIGHT: f32 = 32.0;
/// Gap between secondary tiles
pub const TILE_GAP: f32 = 16.0;
/// Tiles never grow wider than this
const MAX_TILE_WIDTH: f32 = 260.0;

/// Screen regions for the board
#[derive(Debug, Clone, Copy)]
pub struct BoardLayout {
    /// Upper part: the main deadline
    pub headline: Rect,
    /// Lower strip holding the secondary tiles
    pub strip: Rect,
}

impl BoardLayout {
    pub fn calculate(window_rect: Rect) -> Self {
        let usable_h = window_rect.h() - STATUS_BAR_HEIGHT;
        let top = window_rect.top() - STATUS_BAR_HEIGHT;

        let headline_h = usable_h * 0.6;
        let headline = Rect::from_x_y_w_h(
            window_rect.x(),
            top - headline_h / 2.0,
            window_rect.w(),
            headline_h,
        );

        let strip_h = usable_h - headline_h;
        let strip = Rect::from_x_y_w_h(
            window_rect.x(),
            window_rect.bottom() + strip_h / 2.0,
            (window_rect.w() - TILE_GAP * 2.0).max(0.0),
            strip_h,
        );

        Self { headline, strip }
    }

    /// One tile per secondary deadline, centered as a row in the strip
    pub fn tiles(&self, count: usize) -> Vec<Rect> {
        if count == 0 {
            return Vec::new();
        }
        let n = count as f32;
        let tile_w = ((self.strip.w() - TILE_GAP * (n - 1.0)) / n).clamp(1.0, MAX_TILE_WIDTH);
        let tile_h = (self.strip.h() - TILE_GAP * 2.0).max(1.0);
        let row_w = tile_w * n + TILE_GAP * (n - 1.0);
        let left = self.strip.x() - row_w / 2.0;

        (0..count)
            .map(|i| {
                let x = left + tile_w / 2.0 + i as f32 * (tile_w + TILE_GAP);
                Rect::from_x_y_w_h(x, self.strip.y(), tile_w, tile_h)
            })
            .collect()
    }
}

/// Share of a 30-day window still left, for the urgency bar
pub fn urgency_fraction(total_seconds: u64) -> f32 {
    const WINDOW: f32 = 30.0 * 86_400.0;
    (total_seconds as f32 / WINDOW).clamp(0.0, 1.0)
}
