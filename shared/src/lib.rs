//! Shared logic for the invitation pages
//!
//! Everything here is independent of the windowing layer: countdown math,
//! gallery ordering and navigation, swipe detection, media discovery,
//! configuration and guestbook storage.

pub mod config;
pub mod countdown;
pub mod deadlines;
pub mod gallery;
pub mod guestbook;
pub mod invitation;
pub mod media;
pub mod swipe;

pub use config::{
    config_dir, config_path, data_dir, delete_config, load_config, load_config_from,
    load_or_default, save_config, save_config_to, ConfigError,
};
pub use countdown::{
    parse_offset, parse_timezone, tick, Countdown, CountdownError, RemainingTime, TargetInstant,
    TickSchedule, TICK_INTERVAL,
};
pub use deadlines::{BoardEntry, Deadline, DeadlineBoard, DeadlineBoardConfig, DEADLINE_CONFIG_NAME};
pub use gallery::{advance, natural_key, open_at, ordered, GalleryCursor, GalleryPreset, MediaList, NavKey, SortMode};
pub use guestbook::{prepend, GuestbookEntry, GuestbookError, GuestbookStore, LoadOutcome, GUESTBOOK_KEY};
pub use invitation::{
    Account, AccountRow, AudioSettings, Coordinates, InvitationConfig, Parent, Person, Side, Venue,
    WeddingTime, INVITATION_CONFIG_NAME,
};
pub use media::{discover, is_gallery_image, LoadingGate, MediaError, MIN_LOADING_TIME};
pub use swipe::{classify, SwipeDirection, SwipeTracker, SWIPE_THRESHOLD};

/// Install the tracing subscriber used by every page.
///
/// `RUST_LOG` overrides the default `info` level.
pub fn init_logging() {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .try_init();
}
