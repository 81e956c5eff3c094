//! Drawing module - hero panel, countdown cells, gallery grid and lightbox
//!
//! Renders the invitation's visual elements using nannou's Draw API.

use std::f32::consts::TAU;

use nannou::prelude::*;
use shared::{InvitationConfig, RemainingTime};

use crate::lightbox::{fit_size, grid_cells, GalleryView, LightboxLayout};

/// Pastel palette for the invitation
pub mod colors {
    use nannou::prelude::*;

    pub const BACKGROUND: Srgb<u8> = Srgb {
        red: 232,
        green: 244,
        blue: 248,
        standard: std::marker::PhantomData,
    };
    pub const TEXT_PRIMARY: Srgb<u8> = Srgb {
        red: 55,
        green: 65,
        blue: 81,
        standard: std::marker::PhantomData,
    };
    pub const TEXT_SECONDARY: Srgb<u8> = Srgb {
        red: 107,
        green: 114,
        blue: 128,
        standard: std::marker::PhantomData,
    };
    pub const ACCENT: Srgb<u8> = Srgb {
        red: 96,
        green: 165,
        blue: 250,
        standard: std::marker::PhantomData,
    };
    pub const CARD: Srgb<u8> = Srgb {
        red: 255,
        green: 255,
        blue: 255,
        standard: std::marker::PhantomData,
    };
    pub const PLACEHOLDER: Srgb<u8> = Srgb {
        red: 203,
        green: 213,
        blue: 225,
        standard: std::marker::PhantomData,
    };
    pub const WARNING: Srgb<u8> = Srgb {
        red: 217,
        green: 119,
        blue: 6,
        standard: std::marker::PhantomData,
    };
}

/// Height reserved for the egui navigation bar
pub const NAV_BAR_HEIGHT: f32 = 40.0;

/// Screen regions
pub struct Layout {
    /// Everything below the navigation bar
    pub content: Rect,
    /// Hero block (upper part of the home screen)
    pub hero: Rect,
    /// Countdown row under the hero text
    pub countdown: Rect,
}

impl Layout {
    pub fn calculate(window_rect: Rect) -> Self {
        let content = Rect::from_x_y_w_h(
            window_rect.x(),
            window_rect.y() - NAV_BAR_HEIGHT / 2.0,
            window_rect.w(),
            window_rect.h() - NAV_BAR_HEIGHT,
        );
        let hero = Rect::from_x_y_w_h(
            content.x(),
            content.top() - content.h() * 0.3,
            content.w(),
            content.h() * 0.6,
        );
        let countdown = Rect::from_x_y_w_h(
            content.x(),
            hero.bottom() - content.h() * 0.15,
            content.w().min(560.0),
            content.h() * 0.25,
        );
        Self {
            content,
            hero,
            countdown,
        }
    }

    /// Gallery grid area: content minus a title strip, centered and width-capped
    pub fn gallery_grid(&self) -> Rect {
        let width = (self.content.w() - 48.0).min(640.0);
        let height = self.content.h() - 96.0;
        Rect::from_x_y_w_h(
            self.content.x(),
            self.content.bottom() + height / 2.0 + 16.0,
            width,
            height,
        )
    }
}

/// Names, date and venue line
pub fn draw_hero(draw: &Draw, config: &InvitationConfig, rect: Rect) {
    let center = rect.xy();

    draw.text("WEDDING INVITATION")
        .xy(center + vec2(0.0, rect.h() * 0.3))
        .color(colors::ACCENT)
        .font_size(14)
        .w(rect.w());

    draw.text(&config.couple_names())
        .xy(center + vec2(0.0, rect.h() * 0.12))
        .color(colors::TEXT_PRIMARY)
        .font_size(40)
        .w(rect.w());

    draw.text(&config.wedding.display_date)
        .xy(center + vec2(0.0, -rect.h() * 0.05))
        .color(colors::TEXT_SECONDARY)
        .font_size(18)
        .w(rect.w());

    draw.text(&config.venue.full_name)
        .xy(center + vec2(0.0, -rect.h() * 0.15))
        .color(colors::TEXT_SECONDARY)
        .font_size(16)
        .w(rect.w());

    draw.text(&config.wedding.short_date)
        .xy(center + vec2(0.0, -rect.h() * 0.3))
        .color(colors::ACCENT)
        .font_size(14)
        .w(rect.w());
}

/// Four cards: days, hours, minutes, seconds
pub fn draw_countdown(draw: &Draw, remaining: &RemainingTime, rect: Rect, has_target: bool) {
    let cells = remaining.cells();
    let gap = 12.0;
    let cell_w = (rect.w() - gap * 3.0) / 4.0;
    let cell_h = cell_w.min(rect.h() * 0.8);

    for (i, (value, label)) in cells.iter().enumerate() {
        let x = rect.left() + cell_w / 2.0 + i as f32 * (cell_w + gap);
        let cell = Rect::from_x_y_w_h(x, rect.y(), cell_w, cell_h);

        draw.rect().xy(cell.xy()).wh(cell.wh()).color(colors::CARD);

        draw.text(&format!("{:02}", value))
            .xy(cell.xy() + vec2(0.0, cell_h * 0.1))
            .color(colors::TEXT_PRIMARY)
            .font_size(32)
            .w(cell_w);

        draw.text(label)
            .xy(cell.xy() + vec2(0.0, -cell_h * 0.28))
            .color(colors::TEXT_SECONDARY)
            .font_size(11)
            .w(cell_w);
    }

    let caption = if !has_target {
        "Wedding date unavailable".to_string()
    } else {
        remaining.accessible_description()
    };
    draw.text(&caption)
        .xy(pt2(rect.x(), rect.bottom() - 8.0))
        .color(if has_target {
            colors::TEXT_SECONDARY
        } else {
            colors::WARNING
        })
        .font_size(13)
        .w(rect.w());
}

/// Full-screen loading card shown until the gallery is ready.
/// `elapsed` counts from gallery mount; `progress` is (loaded, total).
pub fn draw_loading(draw: &Draw, window_rect: Rect, elapsed: f32, progress: (usize, usize)) {
    draw.rect()
        .xy(window_rect.xy())
        .wh(window_rect.wh())
        .color(colors::CARD);

    // Heartbeat pulse, one loop per 1.5s
    let phase = (elapsed / 1.5).fract();
    let scale = 1.0 + 0.15 * (phase * TAU).sin().max(0.0);
    draw.ellipse()
        .xy(window_rect.xy())
        .radius(14.0 * scale)
        .color(colors::ACCENT);

    let (loaded, total) = progress;
    let label = if total == 0 || loaded >= total {
        "Loading...".to_string()
    } else {
        format!("Loading... {} / {}", loaded, total)
    };
    draw.text(&label)
        .xy(window_rect.xy() + vec2(0.0, -40.0))
        .color(colors::TEXT_SECONDARY)
        .font_size(14)
        .w(window_rect.w());
}

/// Gallery title and thumbnail grid
pub fn draw_gallery(draw: &Draw, view: &GalleryView, layout: &Layout) {
    let content = layout.content;

    draw.text("GALLERY")
        .xy(pt2(content.x(), content.top() - 24.0))
        .color(colors::ACCENT)
        .font_size(12)
        .w(content.w());
    draw.text(&view.preset.title)
        .xy(pt2(content.x(), content.top() - 52.0))
        .color(colors::ACCENT)
        .font_size(22)
        .w(content.w());

    let grid = layout.gallery_grid();
    if view.media.is_empty() {
        draw.text("No images in this gallery")
            .xy(grid.xy())
            .color(colors::TEXT_SECONDARY)
            .font_size(16)
            .w(grid.w());
        return;
    }

    for (cell, texture) in grid_cells(view.len(), grid, view.scroll)
        .iter()
        .zip(view.textures.iter())
    {
        if cell.bottom() > grid.top() || cell.top() < grid.bottom() {
            continue;
        }
        match texture {
            Some(texture) => {
                let size = fit_size(texture.size(), cell.wh());
                draw.texture(texture).xy(cell.xy()).wh(size);
            }
            None => {
                draw.rect()
                    .xy(cell.xy())
                    .wh(cell.wh())
                    .color(colors::PLACEHOLDER);
            }
        }
    }
}

/// Dimmed overlay with the enlarged image, arrows and position counter
pub fn draw_lightbox(draw: &Draw, view: &GalleryView, window_rect: Rect) {
    if !view.cursor.is_open {
        return;
    }
    let layout = LightboxLayout::calculate(window_rect);
    let len = view.len();

    draw.rect()
        .xy(window_rect.xy())
        .wh(window_rect.wh())
        .color(srgba(0u8, 0u8, 0u8, 230u8));

    match view.current_texture() {
        Some(texture) => {
            let size = fit_size(texture.size(), layout.image_rect.wh());
            draw.texture(texture).xy(layout.image_rect.xy()).wh(size);
        }
        None => {
            draw.text("Image unavailable")
                .xy(layout.image_rect.xy())
                .color(WHITE)
                .font_size(16);
        }
    }

    draw_button(draw, layout.close_button, "×");
    if view.cursor.has_previous() {
        draw_button(draw, layout.prev_button, "‹");
    }
    if view.cursor.has_next(len) {
        draw_button(draw, layout.next_button, "›");
    }

    draw.rect()
        .xy(layout.counter.xy())
        .wh(layout.counter.wh())
        .color(srgba(0u8, 0u8, 0u8, 128u8));
    draw.text(&view.cursor.position_label(len))
        .xy(layout.counter.xy())
        .color(WHITE)
        .font_size(14)
        .w(layout.counter.w());
}

fn draw_button(draw: &Draw, rect: Rect, glyph: &str) {
    draw.ellipse()
        .xy(rect.xy())
        .wh(rect.wh())
        .color(srgba(0u8, 0u8, 0u8, 128u8));
    draw.text(glyph)
        .xy(rect.xy())
        .color(WHITE)
        .font_size(28)
        .w(rect.w());
}
