//! Wedding Invitation
//!
//! A single-window invitation: hero panel with a live countdown to the
//! ceremony, photo galleries with a swipeable lightbox, and venue, account
//! and guestbook panels. All deployment data comes from `invitation.toml`.

mod drawing;
mod lightbox;
mod ui;

use std::time::Instant;

use chrono::Utc;
use nannou::prelude::*;
use nannou::winit::event::{TouchPhase as WinitTouchPhase, WindowEvent as WinitWindowEvent};
use nannou_egui::Egui;
use serde::{Deserialize, Serialize};
use shared::{Countdown, InvitationConfig, NavKey, TickSchedule, INVITATION_CONFIG_NAME};

use crate::drawing::{colors, draw_countdown, draw_gallery, draw_hero, draw_lightbox, draw_loading, Layout};
use crate::lightbox::GalleryView;
use crate::ui::{
    draw_account_panel, draw_guestbook, draw_nav_bar, draw_settings_panel, draw_venue_panel,
    EguiCapture, GuestbookState, NavRequest, PageKey,
};

const PAGE_NAME: &str = "invitation_page";
const SCROLL_STEP: f32 = 60.0;

fn main() {
    shared::init_logging();
    nannou::app(model).update(update).exit(exit).run();
}

/// Persisted UI preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
struct Config {
    last_gallery: Option<String>,
    show_accounts: bool,
    show_guestbook: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            last_gallery: None,
            show_accounts: true,
            show_guestbook: false,
        }
    }
}

/// Home screen: owns the countdown and the schedule that refreshes it
struct HomeView {
    countdown: Countdown,
    schedule: TickSchedule,
}

impl HomeView {
    fn mount(config: &InvitationConfig) -> Self {
        Self {
            countdown: Countdown::new(config.countdown_target()),
            schedule: TickSchedule::default(),
        }
    }

    fn update(&mut self, now: Instant) {
        if self.schedule.due(now) {
            self.countdown.refresh(Utc::now());
        }
    }

    fn teardown(&mut self) {
        self.schedule.cancel();
    }
}

enum Screen {
    Home(HomeView),
    Gallery { index: usize, view: GalleryView },
}

/// Application state
struct Model {
    /// Deployment record, immutable after load
    invitation: InvitationConfig,
    screen: Screen,
    show_accounts: bool,
    show_guestbook: bool,
    guestbook: GuestbookState,
    /// Shown in the venue panel when coordinates are unusable
    venue_warning: Option<String>,
    egui: Egui,
}

impl Model {
    fn gallery_index(&self) -> Option<usize> {
        match &self.screen {
            Screen::Gallery { index, .. } => Some(*index),
            Screen::Home(_) => None,
        }
    }

    fn teardown_screen(&mut self) {
        match &mut self.screen {
            Screen::Home(home) => home.teardown(),
            Screen::Gallery { view, .. } => view.teardown(),
        }
    }

    fn show_home(&mut self) {
        self.teardown_screen();
        self.screen = Screen::Home(HomeView::mount(&self.invitation));
        save_config(self);
    }

    fn show_gallery(&mut self, index: usize) {
        let Some(preset) = self.invitation.galleries.get(index).cloned() else {
            return;
        };
        self.teardown_screen();
        let view = GalleryView::mount(&self.invitation, preset);
        self.screen = Screen::Gallery { index, view };
        save_config(self);
    }

    fn navigate(&mut self, request: NavRequest) {
        match request {
            NavRequest::Home => {
                if self.gallery_index().is_some() {
                    self.show_home();
                }
            }
            NavRequest::Gallery(index) => {
                if self.gallery_index() != Some(index) {
                    self.show_gallery(index);
                }
            }
        }
    }

    fn gallery_mut(&mut self) -> Option<&mut GalleryView> {
        match &mut self.screen {
            Screen::Gallery { view, .. } => Some(view),
            Screen::Home(_) => None,
        }
    }
}

fn save_config(model: &Model) {
    let config = Config {
        last_gallery: match &model.screen {
            Screen::Gallery { view, .. } => Some(view.preset.folder.clone()),
            Screen::Home(_) => None,
        },
        show_accounts: model.show_accounts,
        show_guestbook: model.show_guestbook,
    };
    if let Err(e) = shared::save_config(PAGE_NAME, &config) {
        tracing::warn!(error = %e, "Failed to save page config");
    }
}

fn model(app: &App) -> Model {
    app.set_exit_on_escape(false);

    let window_id = app
        .new_window()
        .title("Wedding Invitation")
        .size(900, 900)
        .min_size(480, 640)
        .view(view)
        .key_pressed(key_pressed)
        .mouse_pressed(mouse_pressed)
        .mouse_released(mouse_released)
        .mouse_moved(mouse_moved)
        .mouse_wheel(mouse_wheel)
        .raw_event(raw_window_event)
        .build()
        .unwrap();

    let window = app.window(window_id).unwrap();
    let egui = Egui::from_window(&window);

    let invitation: InvitationConfig = shared::load_or_default(INVITATION_CONFIG_NAME);
    let config: Config = shared::load_or_default(PAGE_NAME);

    let venue_warning = invitation.venue.validate().err();
    if let Some(warning) = &venue_warning {
        tracing::warn!(%warning, "Venue configuration issue");
    }

    let mut model = Model {
        screen: Screen::Home(HomeView::mount(&invitation)),
        invitation,
        show_accounts: config.show_accounts,
        show_guestbook: config.show_guestbook,
        guestbook: GuestbookState::load(),
        venue_warning,
        egui,
    };

    // Reopen the gallery that was showing last time
    if let Some(folder) = config.last_gallery {
        if let Some(index) = model.invitation.galleries.iter().position(|g| g.folder == folder) {
            model.show_gallery(index);
        }
    }

    model
}

fn update(app: &App, model: &mut Model, update: Update) {
    match &mut model.screen {
        Screen::Home(home) => home.update(Instant::now()),
        Screen::Gallery { view, .. } => view.load_pending(app),
    }

    let current_gallery = model.gallery_index();

    model.egui.set_elapsed_time(update.since_start);
    let ctx = model.egui.begin_frame();

    let nav_request = draw_nav_bar(&ctx, &model.invitation, current_gallery);

    let mut settings_changed = false;
    if current_gallery.is_none() {
        draw_venue_panel(&ctx, &model.invitation, model.venue_warning.as_deref());

        let mut show_accounts = model.show_accounts;
        let mut show_guestbook = model.show_guestbook;
        settings_changed = draw_settings_panel(&ctx, &mut show_accounts, &mut show_guestbook);

        if show_accounts {
            draw_account_panel(&ctx, &model.invitation, &mut show_accounts);
        }
        if show_guestbook {
            draw_guestbook(&ctx, &mut model.guestbook, &mut show_guestbook);
        }

        settings_changed |= show_accounts != model.show_accounts || show_guestbook != model.show_guestbook;
        model.show_accounts = show_accounts;
        model.show_guestbook = show_guestbook;
    }

    drop(ctx);

    if settings_changed {
        save_config(model);
    }
    if let Some(request) = nav_request {
        model.navigate(request);
    }
}

fn view(app: &App, model: &Model, frame: Frame) {
    let draw = app.draw();
    let window_rect = app.window_rect();

    draw.background().color(colors::BACKGROUND);

    let layout = Layout::calculate(window_rect);

    match &model.screen {
        Screen::Home(home) => {
            draw_hero(&draw, &model.invitation, layout.hero);
            draw_countdown(
                &draw,
                &home.countdown.remaining(),
                layout.countdown,
                home.countdown.has_target(),
            );
        }
        Screen::Gallery { view, .. } => {
            let now = Instant::now();
            if view.is_ready(now) {
                draw_gallery(&draw, view, &layout);
                draw_lightbox(&draw, view, window_rect);
            } else {
                draw_loading(&draw, window_rect, view.loading_elapsed(now), view.progress());
            }
        }
    }

    draw.to_frame(app, &frame).unwrap();

    model.egui.draw_to_frame(&frame).unwrap();
}

fn key_pressed(_app: &App, model: &mut Model, key: Key) {
    let capture = EguiCapture::from_ctx(model.egui.ctx());
    let Some(action) = capture.page_key(key) else {
        return;
    };

    match action {
        PageKey::Nav(nav_key) => {
            if let Some(view) = model.gallery_mut() {
                // Escape with the lightbox closed leaves the gallery
                if !view.apply_key(nav_key) && nav_key == NavKey::Close {
                    model.show_home();
                }
            }
        }
        PageKey::Home => model.navigate(NavRequest::Home),
        PageKey::ToggleAccounts => {
            model.show_accounts = !model.show_accounts;
            save_config(model);
        }
        PageKey::ToggleGuestbook => {
            model.show_guestbook = !model.show_guestbook;
            save_config(model);
        }
    }
}

fn mouse_pressed(app: &App, model: &mut Model, button: MouseButton) {
    if button != MouseButton::Left {
        return;
    }
    let capture = EguiCapture::from_ctx(model.egui.ctx());
    let Some(pos) = capture.page_pointer(app.mouse.position()) else {
        return;
    };
    if let Some(view) = model.gallery_mut() {
        view.pointer_down(pos);
    }
}

fn mouse_moved(_app: &App, model: &mut Model, pos: Point2) {
    if let Some(view) = model.gallery_mut() {
        view.pointer_moved(pos);
    }
}

fn mouse_released(app: &App, model: &mut Model, button: MouseButton) {
    if button != MouseButton::Left {
        return;
    }
    let capture = EguiCapture::from_ctx(model.egui.ctx());
    let window_rect = app.window_rect();
    let grid = Layout::calculate(window_rect).gallery_grid();
    let pos = capture.page_pointer(app.mouse.position());
    if let Some(view) = model.gallery_mut() {
        match pos {
            Some(pos) => view.pointer_up(pos, window_rect, grid),
            // Released over a panel: neither a swipe nor a lightbox click
            None => view.cancel_gesture(),
        }
    }
}

fn mouse_wheel(app: &App, model: &mut Model, delta: MouseScrollDelta, _phase: TouchPhase) {
    if EguiCapture::from_ctx(model.egui.ctx()).pointer {
        return;
    }
    let amount = match delta {
        MouseScrollDelta::LineDelta(_, y) => -y * SCROLL_STEP,
        MouseScrollDelta::PixelDelta(pos) => -pos.y as f32,
    };
    let grid = Layout::calculate(app.window_rect()).gallery_grid();
    if let Some(view) = model.gallery_mut() {
        if !view.cursor.is_open {
            view.scroll_by(amount, grid);
        }
    }
}

fn raw_window_event(app: &App, model: &mut Model, event: &WinitWindowEvent) {
    model.egui.handle_raw_event(event);

    if let WinitWindowEvent::Touch(touch) = event {
        let window_rect = app.window_rect();
        let capture = EguiCapture::from_ctx(model.egui.ctx());

        // Convert touch position to nannou coordinates
        let pos = capture.page_pointer(pt2(
            touch.location.x as f32 - window_rect.w() / 2.0,
            window_rect.h() / 2.0 - touch.location.y as f32,
        ));
        let grid = Layout::calculate(window_rect).gallery_grid();

        if let Some(view) = model.gallery_mut() {
            match (touch.phase, pos) {
                (WinitTouchPhase::Started, Some(pos)) => view.pointer_down(pos),
                (WinitTouchPhase::Moved, Some(pos)) => view.pointer_moved(pos),
                (WinitTouchPhase::Ended, Some(pos)) => view.pointer_up(pos, window_rect, grid),
                (WinitTouchPhase::Started | WinitTouchPhase::Moved, None) => {}
                (WinitTouchPhase::Ended | WinitTouchPhase::Cancelled, _) => view.cancel_gesture(),
            }
        }
    }
}

fn exit(_app: &App, mut model: Model) {
    model.teardown_screen();
    save_config(&model);
}
