//! UI module - egui navigation bar and information panels
//!
//! Venue, accounts and guestbook are egui windows over the home screen.

use chrono::Utc;
use nannou::prelude::{Key, Point2};
use nannou_egui::egui;
use shared::{prepend, GuestbookEntry, GuestbookStore, InvitationConfig, NavKey};

/// Page-level keyboard actions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageKey {
    Nav(NavKey),
    Home,
    ToggleAccounts,
    ToggleGuestbook,
}

/// What egui claimed from this frame's input
#[derive(Debug, Clone, Copy, Default)]
pub struct EguiCapture {
    /// A text field has focus
    pub keyboard: bool,
    /// The pointer is over, or dragging, an egui panel
    pub pointer: bool,
}

impl EguiCapture {
    pub fn from_ctx(ctx: &egui::Context) -> Self {
        Self {
            keyboard: ctx.wants_keyboard_input(),
            pointer: ctx.wants_pointer_input(),
        }
    }

    /// Map a key press to a page action; nothing fires while egui has the keyboard
    pub fn page_key(&self, key: Key) -> Option<PageKey> {
        if self.keyboard {
            return None;
        }
        match key {
            Key::Left => Some(PageKey::Nav(NavKey::Previous)),
            Key::Right => Some(PageKey::Nav(NavKey::Next)),
            Key::Escape => Some(PageKey::Nav(NavKey::Close)),
            Key::H => Some(PageKey::Home),
            Key::A => Some(PageKey::ToggleAccounts),
            Key::G => Some(PageKey::ToggleGuestbook),
            _ => None,
        }
    }

    /// Pass a pointer position through to the page unless egui owns it
    pub fn page_pointer(&self, pos: Point2) -> Option<Point2> {
        (!self.pointer).then_some(pos)
    }
}

/// Where the navigation bar asked to go
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavRequest {
    Home,
    Gallery(usize),
}

/// Draw the top navigation bar; `current` is the open gallery, if any
pub fn draw_nav_bar(
    ctx: &egui::Context,
    config: &InvitationConfig,
    current: Option<usize>,
) -> Option<NavRequest> {
    let mut request = None;

    egui::TopBottomPanel::top("nav_bar")
        .resizable(false)
        .show(ctx, |ui| {
            ui.horizontal(|ui| {
                if ui.selectable_label(current.is_none(), "Home").clicked() {
                    request = Some(NavRequest::Home);
                }
                ui.separator();
                for (idx, preset) in config.galleries.iter().enumerate() {
                    let selected = current == Some(idx);
                    if ui
                        .selectable_label(selected, &preset.title)
                        .on_hover_text(format!("Sorted: {}", preset.sort.label()))
                        .clicked()
                    {
                        request = Some(NavRequest::Gallery(idx));
                    }
                }
            });
        });

    request
}

/// Venue details and external map links
pub fn draw_venue_panel(ctx: &egui::Context, config: &InvitationConfig, warning: Option<&str>) {
    let venue = &config.venue;

    egui::Window::new("Location")
        .collapsible(true)
        .resizable(false)
        .default_width(280.0)
        .anchor(egui::Align2::LEFT_BOTTOM, [10.0, -10.0])
        .show(ctx, |ui| {
            ui.heading(&venue.name);
            ui.label(&venue.hall);
            ui.label(&venue.address);
            ui.label(format!(
                "{:.6}, {:.6}",
                venue.coordinates.lat, venue.coordinates.lng
            ));
            if let Some(warning) = warning {
                ui.colored_label(egui::Color32::from_rgb(217, 119, 6), warning);
            }
            ui.separator();
            ui.horizontal(|ui| {
                ui.hyperlink_to("Kakao Map", &venue.kakao_map_url);
                ui.hyperlink_to("Naver Map", &venue.naver_map_url);
            });
            ui.separator();
            ui.label(format!("{} · {}", config.groom.name, config.groom.phone));
            ui.label(format!("{} · {}", config.bride.name, config.bride.phone));

            let audio = &config.audio;
            if audio.enabled {
                ui.separator();
                ui.small(format!(
                    "Music: {} (volume {:.0}%{})",
                    audio.src,
                    audio.effective_volume() * 100.0,
                    if audio.should_autoplay() { ", autoplay" } else { "" }
                ));
            }
        });
}

/// Bank accounts for both families, with copy buttons
pub fn draw_account_panel(ctx: &egui::Context, config: &InvitationConfig, open: &mut bool) {
    egui::Window::new("Accounts")
        .open(open)
        .collapsible(true)
        .resizable(false)
        .default_width(300.0)
        .anchor(egui::Align2::RIGHT_BOTTOM, [-10.0, -10.0])
        .show(ctx, |ui| {
            for (side, rows) in config.account_groups() {
                ui.collapsing(side.label(), |ui| {
                    for row in rows {
                        ui.horizontal(|ui| {
                            ui.label(format!("{} {}", row.relation, row.holder));
                            ui.label(row.account.display());
                            if ui.small_button("Copy").clicked() {
                                ui.output_mut(|o| o.copied_text = row.account.number.clone());
                                tracing::info!(holder = row.holder, "Account number copied");
                            }
                        });
                    }
                });
            }
        });
}

/// Guestbook form and entry list backed by local storage
pub struct GuestbookState {
    store: Option<GuestbookStore>,
    pub entries: Vec<GuestbookEntry>,
    name: String,
    message: String,
}

impl GuestbookState {
    pub fn load() -> Self {
        let store = match GuestbookStore::in_data_dir() {
            Ok(store) => Some(store),
            Err(e) => {
                tracing::warn!(error = %e, "Guestbook storage unavailable");
                None
            }
        };
        let entries = store
            .as_ref()
            .map(GuestbookStore::load_or_empty)
            .unwrap_or_default();
        Self {
            store,
            entries,
            name: String::new(),
            message: String::new(),
        }
    }

    fn submit(&mut self) {
        let Some(entry) = GuestbookEntry::new(&self.name, &self.message, Utc::now()) else {
            return;
        };
        prepend(&mut self.entries, entry);
        self.name.clear();
        self.message.clear();

        if let Some(store) = &self.store {
            if let Err(e) = store.save(&self.entries) {
                tracing::error!(error = %e, "Failed to save guestbook");
            }
        }
    }
}

pub fn draw_guestbook(ctx: &egui::Context, state: &mut GuestbookState, open: &mut bool) {
    let mut submit = false;

    egui::Window::new("Guestbook")
        .open(open)
        .collapsible(true)
        .resizable(true)
        .default_width(320.0)
        .anchor(egui::Align2::RIGHT_TOP, [-10.0, 50.0])
        .show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label("Name:");
                ui.text_edit_singleline(&mut state.name);
            });
            ui.label("Message:");
            ui.text_edit_multiline(&mut state.message);
            if ui.button("Leave a message").clicked() {
                submit = true;
            }

            ui.separator();

            if state.entries.is_empty() {
                ui.label("Be the first to leave a message.");
            }
            egui::ScrollArea::vertical()
                .max_height(240.0)
                .show(ui, |ui| {
                    for entry in &state.entries {
                        ui.strong(&entry.name);
                        ui.label(&entry.message);
                        ui.small(&entry.timestamp);
                        ui.separator();
                    }
                });
        });

    if submit {
        state.submit();
    }
}

/// Panel visibility toggles
pub fn draw_settings_panel(ctx: &egui::Context, show_accounts: &mut bool, show_guestbook: &mut bool) -> bool {
    let mut changed = false;

    egui::Window::new("Settings")
        .collapsible(true)
        .resizable(false)
        .default_width(180.0)
        .anchor(egui::Align2::LEFT_TOP, [10.0, 50.0])
        .show(ctx, |ui| {
            if ui.checkbox(show_accounts, "Show accounts").changed() {
                changed = true;
            }
            if ui.checkbox(show_guestbook, "Show guestbook").changed() {
                changed = true;
            }
            ui.separator();
            ui.label("A: accounts · G: guestbook");
        });

    changed
}

#[cfg(test)]
mod tests {
    use super::*;
    use nannou::prelude::pt2;

    #[test]
    fn test_hotkeys_map_when_page_has_focus() {
        let capture = EguiCapture::default();
        assert_eq!(capture.page_key(Key::G), Some(PageKey::ToggleGuestbook));
        assert_eq!(capture.page_key(Key::A), Some(PageKey::ToggleAccounts));
        assert_eq!(capture.page_key(Key::Right), Some(PageKey::Nav(NavKey::Next)));
        assert_eq!(capture.page_key(Key::Escape), Some(PageKey::Nav(NavKey::Close)));
        assert_eq!(capture.page_key(Key::Q), None);
    }

    #[test]
    fn test_typing_in_a_text_field_fires_no_hotkeys() {
        let capture = EguiCapture {
            keyboard: true,
            pointer: false,
        };
        for key in [Key::G, Key::R, Key::E, Key::M, Key::I, Key::N, Key::A, Key::H, Key::Left] {
            assert_eq!(capture.page_key(key), None);
        }
    }

    #[test]
    fn test_pointer_over_egui_is_not_forwarded() {
        let pos = pt2(10.0, 20.0);
        let over_panel = EguiCapture {
            keyboard: false,
            pointer: true,
        };
        assert_eq!(over_panel.page_pointer(pos), None);
        assert_eq!(EguiCapture::default().page_pointer(pos), Some(pos));
    }
}
