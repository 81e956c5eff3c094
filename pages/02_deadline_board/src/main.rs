//! Deadline Board
//!
//! One headline countdown with the remaining secondary deadlines underneath,
//! soonest first. Deadlines come from `deadline_board.toml`.

mod board;
mod drawing;
mod ui;

use std::time::Instant;

use chrono::Utc;
use nannou::prelude::*;
use nannou::winit::event::WindowEvent as WinitWindowEvent;
use nannou_egui::Egui;
use serde::{Deserialize, Serialize};
use shared::{DeadlineBoard, DeadlineBoardConfig, TickSchedule, DEADLINE_CONFIG_NAME};

use crate::board::BoardLayout;
use crate::drawing::{colors, draw_headline, draw_secondary};
use crate::ui::{draw_details, draw_status_bar};

const PAGE_NAME: &str = "deadline_board_page";

fn main() {
    shared::init_logging();
    nannou::app(model).update(update).exit(exit).run();
}

/// Persisted UI preferences
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct Config {
    show_details: bool,
}

struct Model {
    board: DeadlineBoard,
    schedule: TickSchedule,
    /// Shown in the status bar
    zone_label: String,
    show_details: bool,
    egui: Egui,
}

fn save_config(model: &Model) {
    let config = Config {
        show_details: model.show_details,
    };
    if let Err(e) = shared::save_config(PAGE_NAME, &config) {
        tracing::warn!(error = %e, "Failed to save page config");
    }
}

fn model(app: &App) -> Model {
    let window_id = app
        .new_window()
        .title("Deadline Board")
        .size(1200, 720)
        .min_size(640, 480)
        .view(view)
        .key_pressed(key_pressed)
        .raw_event(raw_window_event)
        .build()
        .unwrap();

    let window = app.window(window_id).unwrap();
    let egui = Egui::from_window(&window);

    let board_config: DeadlineBoardConfig = shared::load_or_default(DEADLINE_CONFIG_NAME);
    let config: Config = shared::load_or_default(PAGE_NAME);

    let mut board = DeadlineBoard::from_config(&board_config);
    board.refresh(Utc::now());
    tracing::info!(
        main = %board.main.name,
        secondary = board.secondary.len(),
        "Deadline board loaded"
    );

    Model {
        board,
        schedule: TickSchedule::default(),
        zone_label: board_config
            .timezone
            .unwrap_or_else(|| "local time".to_string()),
        show_details: config.show_details,
        egui,
    }
}

fn update(_app: &App, model: &mut Model, update: Update) {
    if model.schedule.due(Instant::now()) {
        model.board.refresh(Utc::now());
    }

    model.egui.set_elapsed_time(update.since_start);
    let ctx = model.egui.begin_frame();

    let mut show_details = model.show_details;
    let mut changed = draw_status_bar(&ctx, &model.zone_label, &mut show_details);
    if show_details {
        draw_details(&ctx, &model.board, &mut show_details);
    }
    drop(ctx);

    changed |= show_details != model.show_details;
    model.show_details = show_details;
    if changed {
        save_config(model);
    }
}

fn view(app: &App, model: &Model, frame: Frame) {
    let draw = app.draw();
    let layout = BoardLayout::calculate(app.window_rect());

    draw.background().color(colors::BACKGROUND);

    draw_headline(&draw, &model.board.main, &layout);
    draw_secondary(&draw, &model.board.secondary_by_urgency(), &layout);

    draw.to_frame(app, &frame).unwrap();

    model.egui.draw_to_frame(&frame).unwrap();
}

fn key_pressed(_app: &App, model: &mut Model, key: Key) {
    if key == Key::D {
        model.show_details = !model.show_details;
        save_config(model);
    }
}

fn raw_window_event(_app: &App, model: &mut Model, event: &WinitWindowEvent) {
    model.egui.handle_raw_event(event);
}

fn exit(_app: &App, mut model: Model) {
    model.schedule.cancel();
    save_config(&model);
}
