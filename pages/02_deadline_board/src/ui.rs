//! UI module - status bar and deadline details window

use nannou_egui::egui;
use shared::DeadlineBoard;

/// Top bar with the zone in use and a toggle for the details window
pub fn draw_status_bar(ctx: &egui::Context, zone_label: &str, show_details: &mut bool) -> bool {
    let mut changed = false;

    egui::TopBottomPanel::top("status_bar")
        .resizable(false)
        .show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(
                    egui::RichText::new(format!("Deadlines in {zone_label}"))
                        .size(12.0)
                        .color(egui::Color32::from_rgb(160, 165, 175)),
                );
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.toggle_value(show_details, "Details (D)").changed() {
                        changed = true;
                    }
                });
            });
        });

    changed
}

/// Every deadline with its resolved target instant
pub fn draw_details(ctx: &egui::Context, board: &DeadlineBoard, open: &mut bool) {
    egui::Window::new("Deadlines")
        .open(open)
        .collapsible(true)
        .resizable(false)
        .default_width(340.0)
        .anchor(egui::Align2::RIGHT_TOP, [-10.0, 44.0])
        .show(ctx, |ui| {
            egui::Grid::new("deadline_grid")
                .num_columns(3)
                .striped(true)
                .show(ui, |ui| {
                    for entry in std::iter::once(&board.main).chain(board.secondary.iter()) {
                        ui.strong(&entry.name);
                        match entry.countdown.target() {
                            Some(target) => {
                                ui.label(target.as_datetime().format("%Y-%m-%d %H:%M:%S %:z").to_string())
                            }
                            None => ui.label("invalid"),
                        };
                        ui.monospace(entry.remaining().format_clock());
                        ui.end_row();
                    }
                });
        });
}
