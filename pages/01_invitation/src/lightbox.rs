//! Gallery screen state: thumbnail grid, lightbox cursor and pointer handling
//!
//! Geometry lives in free functions so hit testing can be checked without a
//! window or GPU textures.

use std::ops::Range;
use std::path::Path;
use std::time::Instant;

use nannou::prelude::*;
use shared::{
    discover, GalleryCursor, GalleryPreset, InvitationConfig, LoadingGate, MediaList, NavKey,
    SwipeTracker, MIN_LOADING_TIME,
};

/// Thumbnail columns in the grid
pub const GRID_COLUMNS: usize = 2;
/// Gap between thumbnails
pub const GRID_GAP: f32 = 8.0;
/// Lightbox button size
pub const BUTTON_SIZE: f32 = 48.0;
/// Margin around the enlarged image
const LIGHTBOX_MARGIN: f32 = 64.0;
/// Textures decoded per frame while a gallery loads
pub const TEXTURES_PER_FRAME: usize = 2;

/// Indexes to load this frame, given how many are already done
pub fn load_batch(loaded: usize, total: usize, budget: usize) -> Range<usize> {
    let start = loaded.min(total);
    start..start.saturating_add(budget).min(total)
}

/// Square cells for `count` thumbnails laid out top-down inside `rect`,
/// shifted up by `scroll`
pub fn grid_cells(count: usize, rect: Rect, scroll: f32) -> Vec<Rect> {
    let columns = GRID_COLUMNS as f32;
    let cell = ((rect.w() - GRID_GAP * (columns - 1.0)) / columns).max(1.0);

    (0..count)
        .map(|i| {
            let col = (i % GRID_COLUMNS) as f32;
            let row = (i / GRID_COLUMNS) as f32;
            let x = rect.left() + cell / 2.0 + col * (cell + GRID_GAP);
            let y = rect.top() - cell / 2.0 - row * (cell + GRID_GAP) + scroll;
            Rect::from_x_y_w_h(x, y, cell, cell)
        })
        .collect()
}

/// Total grid height for `count` thumbnails in `rect`
pub fn grid_height(count: usize, rect: Rect) -> f32 {
    let cells = grid_cells(count, rect, 0.0);
    match cells.last() {
        Some(last) => rect.top() - last.bottom(),
        None => 0.0,
    }
}

/// Scale `size` to fit inside `bounds`, preserving aspect ratio
pub fn fit_size(size: [u32; 2], bounds: Vec2) -> Vec2 {
    let w = size[0].max(1) as f32;
    let h = size[1].max(1) as f32;
    let scale = (bounds.x / w).min(bounds.y / h);
    vec2(w * scale, h * scale)
}

/// What a click on the open lightbox lands on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LightboxHit {
    Close,
    Previous,
    Next,
    Image,
    Backdrop,
}

/// Lightbox geometry for a window
#[derive(Debug, Clone, Copy)]
pub struct LightboxLayout {
    pub image_rect: Rect,
    pub prev_button: Rect,
    pub next_button: Rect,
    pub close_button: Rect,
    pub counter: Rect,
}

impl LightboxLayout {
    pub fn calculate(window_rect: Rect) -> Self {
        let image_rect = window_rect.pad(LIGHTBOX_MARGIN);
        let prev_button = Rect::from_x_y_w_h(
            image_rect.left() + BUTTON_SIZE / 2.0 + 16.0,
            image_rect.y(),
            BUTTON_SIZE,
            BUTTON_SIZE,
        );
        let next_button = Rect::from_x_y_w_h(
            image_rect.right() - BUTTON_SIZE / 2.0 - 16.0,
            image_rect.y(),
            BUTTON_SIZE,
            BUTTON_SIZE,
        );
        let close_button = Rect::from_x_y_w_h(
            image_rect.right() - BUTTON_SIZE / 2.0,
            image_rect.top() + BUTTON_SIZE / 2.0 + 8.0,
            BUTTON_SIZE,
            BUTTON_SIZE,
        );
        let counter = Rect::from_x_y_w_h(image_rect.x(), image_rect.bottom() + 24.0, 120.0, 28.0);

        Self {
            image_rect,
            prev_button,
            next_button,
            close_button,
            counter,
        }
    }

    /// Buttons win over the image; arrows only count when they are shown
    pub fn hit_test(&self, pos: Point2, cursor: &GalleryCursor, len: usize) -> LightboxHit {
        if self.close_button.contains(pos) {
            LightboxHit::Close
        } else if cursor.has_previous() && self.prev_button.contains(pos) {
            LightboxHit::Previous
        } else if cursor.has_next(len) && self.next_button.contains(pos) {
            LightboxHit::Next
        } else if self.image_rect.contains(pos) {
            LightboxHit::Image
        } else {
            LightboxHit::Backdrop
        }
    }
}

/// One mounted gallery
pub struct GalleryView {
    pub preset: GalleryPreset,
    pub media: MediaList,
    /// Parallel to `media`; `None` where the image failed to load
    pub textures: Vec<Option<wgpu::Texture>>,
    pub cursor: GalleryCursor,
    pub scroll: f32,
    swipe: SwipeTracker,
    gate: LoadingGate,
}

impl GalleryView {
    /// Discover a gallery's media. Textures are loaded later, a few per
    /// frame, by `load_pending`.
    pub fn mount(config: &InvitationConfig, preset: GalleryPreset) -> Self {
        let gate = LoadingGate::new(Instant::now(), MIN_LOADING_TIME);

        let media = match discover(Path::new(&config.assets_dir), &preset.folder, preset.sort) {
            Ok(media) => media,
            Err(e) => {
                tracing::warn!(folder = %preset.folder, error = %e, "Gallery discovery failed");
                MediaList::default()
            }
        };
        tracing::debug!(folder = %preset.folder, images = media.len(), "Gallery mounted");

        let mut view = Self {
            preset,
            textures: Vec::with_capacity(media.len()),
            media,
            cursor: GalleryCursor::default(),
            scroll: 0.0,
            swipe: SwipeTracker::default(),
            gate,
        };
        if view.media.is_empty() {
            view.gate.mark_loaded();
        }
        view
    }

    /// Load the next batch of textures. Failures are logged and leave a
    /// placeholder; the gate opens once every image has been tried.
    pub fn load_pending(&mut self, app: &App) {
        if self.gate.is_loaded() {
            return;
        }
        for index in load_batch(self.textures.len(), self.media.len(), TEXTURES_PER_FRAME) {
            let Some(path) = self.media.get(index) else {
                break;
            };
            let texture = match wgpu::Texture::from_path(app, path) {
                Ok(texture) => Some(texture),
                Err(e) => {
                    tracing::error!(path, error = %e, "Failed to load gallery image");
                    None
                }
            };
            self.textures.push(texture);
        }

        if self.textures.len() >= self.media.len() {
            let failed = self.textures.iter().filter(|t| t.is_none()).count();
            tracing::info!(
                folder = %self.preset.folder,
                images = self.media.len(),
                failed,
                "Gallery loaded"
            );
            self.gate.mark_loaded();
        }
    }

    /// Images loaded so far, for the loading screen
    pub fn progress(&self) -> (usize, usize) {
        (self.textures.len(), self.media.len())
    }

    /// Seconds since this gallery was mounted
    pub fn loading_elapsed(&self, now: Instant) -> f32 {
        self.gate.elapsed(now).as_secs_f32()
    }

    pub fn is_ready(&self, now: Instant) -> bool {
        self.gate.is_ready(now)
    }

    pub fn len(&self) -> usize {
        self.media.len()
    }

    pub fn current_texture(&self) -> Option<&wgpu::Texture> {
        if !self.cursor.is_open {
            return None;
        }
        self.textures
            .get(self.cursor.current_index)
            .and_then(Option::as_ref)
    }

    pub fn open(&mut self, index: usize) {
        if let Some(cursor) = self.media.open_at(index) {
            self.cursor = cursor;
        }
    }

    /// Keyboard navigation; only acts while the lightbox is open
    pub fn apply_key(&mut self, key: NavKey) -> bool {
        self.cursor.apply_key(key, self.media.len())
    }

    pub fn scroll_by(&mut self, amount: f32, content_rect: Rect) {
        let max_scroll = (grid_height(self.len(), content_rect) - content_rect.h()).max(0.0);
        self.scroll = (self.scroll + amount).clamp(0.0, max_scroll);
    }

    pub fn pointer_down(&mut self, pos: Point2) {
        if self.cursor.is_open {
            self.swipe.start(pos.x);
        }
    }

    pub fn pointer_moved(&mut self, pos: Point2) {
        self.swipe.moved(pos.x);
    }

    /// Finish a press: a swipe navigates, anything else is a click
    pub fn pointer_up(&mut self, pos: Point2, window_rect: Rect, content_rect: Rect) {
        let len = self.media.len();

        if self.cursor.is_open {
            if let Some(direction) = self.swipe.finish() {
                self.cursor.step(direction.delta(), len);
                return;
            }
            match LightboxLayout::calculate(window_rect).hit_test(pos, &self.cursor, len) {
                LightboxHit::Previous => {
                    self.cursor.step(-1, len);
                }
                LightboxHit::Next => {
                    self.cursor.step(1, len);
                }
                LightboxHit::Close | LightboxHit::Backdrop => self.cursor.close(),
                LightboxHit::Image => {}
            }
            return;
        }

        if !content_rect.contains(pos) {
            return;
        }
        let hit = grid_cells(len, content_rect, self.scroll)
            .iter()
            .position(|cell| cell.contains(pos));
        if let Some(index) = hit {
            self.open(index);
        }
    }

    /// Drop an in-flight press without navigating
    pub fn cancel_gesture(&mut self) {
        self.swipe.cancel();
    }

    pub fn teardown(&mut self) {
        self.cursor.close();
        self.cancel_gesture();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::open_at;

    fn window() -> Rect {
        Rect::from_x_y_w_h(0.0, 0.0, 800.0, 600.0)
    }

    #[test]
    fn test_grid_cells_two_columns() {
        let rect = Rect::from_x_y_w_h(0.0, 0.0, 408.0, 600.0);
        let cells = grid_cells(3, rect, 0.0);
        assert_eq!(cells.len(), 3);
        assert_eq!(cells[0].w(), 200.0);
        assert_eq!(cells[0].top(), rect.top());
        assert_eq!(cells[0].left(), rect.left());
        assert_eq!(cells[1].right(), rect.right());
        assert_eq!(cells[2].left(), rect.left());
        assert!(cells[2].top() < cells[0].bottom());
    }

    #[test]
    fn test_grid_scroll_moves_cells_up() {
        let rect = Rect::from_x_y_w_h(0.0, 0.0, 408.0, 600.0);
        let still = grid_cells(1, rect, 0.0);
        let scrolled = grid_cells(1, rect, 50.0);
        assert_eq!(scrolled[0].y(), still[0].y() + 50.0);
    }

    #[test]
    fn test_load_batch_walks_to_the_end() {
        assert_eq!(load_batch(0, 5, 2), 0..2);
        assert_eq!(load_batch(2, 5, 2), 2..4);
        assert_eq!(load_batch(4, 5, 2), 4..5);
        assert!(load_batch(5, 5, 2).is_empty());
        assert!(load_batch(0, 0, 2).is_empty());
    }

    #[test]
    fn test_fit_size_preserves_aspect() {
        let fitted = fit_size([400, 200], vec2(100.0, 100.0));
        assert_eq!(fitted, vec2(100.0, 50.0));
        let fitted = fit_size([200, 400], vec2(100.0, 100.0));
        assert_eq!(fitted, vec2(50.0, 100.0));
    }

    #[test]
    fn test_hit_test_arrows_follow_boundaries() {
        let layout = LightboxLayout::calculate(window());
        let first = open_at(0);
        let middle = open_at(1);

        // No previous arrow on the first image: the click lands on the image
        assert_eq!(
            layout.hit_test(layout.prev_button.xy(), &first, 3),
            LightboxHit::Image
        );
        assert_eq!(
            layout.hit_test(layout.prev_button.xy(), &middle, 3),
            LightboxHit::Previous
        );
        assert_eq!(
            layout.hit_test(layout.next_button.xy(), &open_at(2), 3),
            LightboxHit::Image
        );
    }

    #[test]
    fn test_hit_test_backdrop_and_close() {
        let layout = LightboxLayout::calculate(window());
        let cursor = open_at(0);
        assert_eq!(
            layout.hit_test(layout.close_button.xy(), &cursor, 3),
            LightboxHit::Close
        );
        assert_eq!(
            layout.hit_test(pt2(-395.0, 0.0), &cursor, 3),
            LightboxHit::Backdrop
        );
    }
}
