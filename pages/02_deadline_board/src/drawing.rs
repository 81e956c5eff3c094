//! Drawing module - headline countdown and secondary deadline tiles

use nannou::prelude::*;
use shared::BoardEntry;

use crate::board::{urgency_fraction, BoardLayout};

/// Dark board palette
pub mod colors {
    use nannou::prelude::*;

    pub const BACKGROUND: Srgb<u8> = Srgb {
        red: 18,
        green: 20,
        blue: 28,
        standard: std::marker::PhantomData,
    };
    pub const TILE: Srgb<u8> = Srgb {
        red: 32,
        green: 36,
        blue: 48,
        standard: std::marker::PhantomData,
    };
    pub const TEXT_PRIMARY: Srgb<u8> = Srgb {
        red: 236,
        green: 238,
        blue: 244,
        standard: std::marker::PhantomData,
    };
    pub const TEXT_SECONDARY: Srgb<u8> = Srgb {
        red: 150,
        green: 156,
        blue: 170,
        standard: std::marker::PhantomData,
    };
    pub const ACCENT: Srgb<u8> = Srgb {
        red: 255,
        green: 196,
        blue: 0,
        standard: std::marker::PhantomData,
    };
    pub const URGENT: Srgb<u8> = Srgb {
        red: 239,
        green: 68,
        blue: 68,
        standard: std::marker::PhantomData,
    };
    pub const DONE: Srgb<u8> = Srgb {
        red: 90,
        green: 96,
        blue: 110,
        standard: std::marker::PhantomData,
    };
}

/// Under a week left
const URGENT_SECONDS: u64 = 7 * 86_400;

fn status_color(entry: &BoardEntry) -> Srgb<u8> {
    let remaining = entry.remaining();
    if remaining.is_zero() {
        colors::DONE
    } else if remaining.total_seconds() < URGENT_SECONDS {
        colors::URGENT
    } else {
        colors::ACCENT
    }
}

/// The main deadline: name, big DD:HH:MM:SS and unit labels
pub fn draw_headline(draw: &Draw, entry: &BoardEntry, layout: &BoardLayout) {
    let rect = layout.headline;
    let remaining = entry.remaining();

    draw.text(&entry.name)
        .xy(rect.xy() + vec2(0.0, rect.h() * 0.28))
        .color(colors::TEXT_SECONDARY)
        .font_size(28)
        .w(rect.w());

    draw.text(&remaining.format_clock())
        .xy(rect.xy())
        .color(status_color(entry))
        .font_size(96)
        .w(rect.w());

    let cell_w = (rect.w() * 0.6) / 4.0;
    for (i, (_, label)) in remaining.cells().iter().enumerate() {
        let x = rect.x() - cell_w * 1.5 + i as f32 * cell_w;
        draw.text(label)
            .xy(pt2(x, rect.y() - rect.h() * 0.2))
            .color(colors::TEXT_SECONDARY)
            .font_size(12)
            .w(cell_w);
    }

    let caption = if entry.countdown.has_target() {
        remaining.accessible_description()
    } else {
        "Deadline could not be read".to_string()
    };
    draw.text(&caption)
        .xy(pt2(rect.x(), rect.bottom() + 24.0))
        .color(colors::TEXT_SECONDARY)
        .font_size(14)
        .w(rect.w());
}

/// One tile per secondary deadline, in the order given
pub fn draw_secondary(draw: &Draw, entries: &[&BoardEntry], layout: &BoardLayout) {
    for (entry, tile) in entries.iter().zip(layout.tiles(entries.len())) {
        let remaining = entry.remaining();
        let color = status_color(entry);

        draw.rect().xy(tile.xy()).wh(tile.wh()).color(colors::TILE);

        draw.text(&entry.name)
            .xy(tile.xy() + vec2(0.0, tile.h() * 0.28))
            .color(colors::TEXT_PRIMARY)
            .font_size(18)
            .w(tile.w());

        let days = if remaining.is_zero() {
            "closed".to_string()
        } else {
            format!("{}d", remaining.days)
        };
        draw.text(&days)
            .xy(tile.xy() + vec2(0.0, tile.h() * 0.02))
            .color(color)
            .font_size(34)
            .w(tile.w());

        draw.text(&format!(
            "{:02}:{:02}:{:02}",
            remaining.hours, remaining.minutes, remaining.seconds
        ))
        .xy(tile.xy() + vec2(0.0, -tile.h() * 0.2))
        .color(colors::TEXT_SECONDARY)
        .font_size(14)
        .w(tile.w());

        // Bar shrinks toward the deadline over the last 30 days
        let bar_w = (tile.w() - 24.0) * urgency_fraction(remaining.total_seconds());
        let bar_y = tile.bottom() + 12.0;
        let bar_left = tile.left() + 12.0;
        draw.rect()
            .x_y(bar_left + bar_w / 2.0, bar_y)
            .w_h(bar_w, 4.0)
            .color(color);
    }
}
