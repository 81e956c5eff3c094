//! Gallery navigation - media ordering and lightbox cursor
//!
//! The media list is ordered once when a gallery is mounted. After that the
//! lightbox only ever moves a bounded cursor through it; keyboard, swipe and
//! button navigation all go through `advance`.

use std::cmp::Ordering;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Ordering applied to a gallery's media when it is mounted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortMode {
    /// Byte-wise ascending by reference
    #[default]
    Lexicographic,
    /// By the first embedded `<a>-<b>` number pair, e.g. `3-12.jpg`
    NaturalNumeric,
}

impl SortMode {
    pub fn label(&self) -> &'static str {
        match self {
            SortMode::Lexicographic => "Lexicographic",
            SortMode::NaturalNumeric => "Natural",
        }
    }
}

static NUMBER_PAIR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([0-9]+)-([0-9]+)").expect("number pair regex should compile"));

/// Extract the first `<digits>-<digits>` pair in `reference`.
///
/// References without such a pair yield `(0, 0)`. Overlong digit runs
/// saturate at `u64::MAX`.
pub fn natural_key(reference: &str) -> (u64, u64) {
    match NUMBER_PAIR.captures(reference) {
        Some(caps) => (parse_digits(&caps[1]), parse_digits(&caps[2])),
        None => (0, 0),
    }
}

fn parse_digits(digits: &str) -> u64 {
    digits.parse().unwrap_or(u64::MAX)
}

fn compare(a: &str, b: &str, mode: SortMode) -> Ordering {
    match mode {
        SortMode::Lexicographic => a.cmp(b),
        SortMode::NaturalNumeric => natural_key(a).cmp(&natural_key(b)),
    }
}

/// Ordered, immutable list of media references
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MediaList {
    items: Vec<String>,
}

impl MediaList {
    pub fn items(&self) -> &[String] {
        &self.items
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.items.get(index).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Open the lightbox at `index`, refusing empty lists and bad indexes
    pub fn open_at(&self, index: usize) -> Option<GalleryCursor> {
        (index < self.items.len()).then(|| open_at(index))
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.items.iter().map(String::as_str)
    }

    /// Rewrite every reference, keeping the order
    pub fn map<F>(self, f: F) -> MediaList
    where
        F: FnMut(String) -> String,
    {
        MediaList {
            items: self.items.into_iter().map(f).collect(),
        }
    }
}

/// Sort `items` into a gallery's navigation order.
///
/// The sort is stable: references that compare equal (for natural order,
/// everything without a number pair) keep their discovery order.
pub fn ordered<I, S>(items: I, mode: SortMode) -> MediaList
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut items: Vec<String> = items.into_iter().map(Into::into).collect();
    items.sort_by(|a, b| compare(a, b, mode));
    MediaList { items }
}

/// Step `index` by `delta` within `[0, len - 1]` without wrapping.
///
/// An empty list has no valid index; callers must not open one, and this
/// returns 0 for it.
pub fn advance(index: usize, delta: i64, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    let last = (len - 1) as i64;
    let index = (index as i64).min(last);
    index.saturating_add(delta).clamp(0, last) as usize
}

/// Lightbox state: which item is shown and whether the lightbox is up
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GalleryCursor {
    pub current_index: usize,
    pub is_open: bool,
}

/// Cursor opened on `index`
pub fn open_at(index: usize) -> GalleryCursor {
    GalleryCursor {
        current_index: index,
        is_open: true,
    }
}

/// Navigation intents from the keyboard (arrow keys, Escape)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavKey {
    Previous,
    Next,
    Close,
}

impl NavKey {
    pub fn delta(&self) -> Option<i64> {
        match self {
            NavKey::Previous => Some(-1),
            NavKey::Next => Some(1),
            NavKey::Close => None,
        }
    }
}

impl GalleryCursor {
    pub fn close(&mut self) {
        self.is_open = false;
    }

    /// Move by `delta` if open; returns true when the index changed
    pub fn step(&mut self, delta: i64, len: usize) -> bool {
        if !self.is_open || len == 0 {
            return false;
        }
        let next = advance(self.current_index, delta, len);
        let changed = next != self.current_index;
        self.current_index = next;
        changed
    }

    /// Apply a keyboard intent; returns true when visible state changed
    pub fn apply_key(&mut self, key: NavKey, len: usize) -> bool {
        if !self.is_open {
            return false;
        }
        match key.delta() {
            Some(delta) => self.step(delta, len),
            None => {
                self.close();
                true
            }
        }
    }

    pub fn has_previous(&self) -> bool {
        self.is_open && self.current_index > 0
    }

    pub fn has_next(&self, len: usize) -> bool {
        self.is_open && self.current_index + 1 < len
    }

    /// One-based "current / total" label
    pub fn position_label(&self, len: usize) -> String {
        format!("{} / {}", self.current_index + 1, len)
    }
}

/// A gallery as configured per deployment: asset folder, heading and order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GalleryPreset {
    pub folder: String,
    pub title: String,
    #[serde(default)]
    pub sort: SortMode,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_natural_order_mixed_names() {
        let list = ordered(["2-10.jpg", "2-2.jpg", "1-5.jpg"], SortMode::NaturalNumeric);
        assert_eq!(list.items(), ["1-5.jpg", "2-2.jpg", "2-10.jpg"]);
    }

    #[test]
    fn test_unmatched_names_sort_first() {
        let list = ordered(
            ["2-2.jpg", "cover.jpg", "1-1.jpg"],
            SortMode::NaturalNumeric,
        );
        assert_eq!(list.items(), ["cover.jpg", "1-1.jpg", "2-2.jpg"]);
    }

    #[test]
    fn test_unmatched_names_keep_discovery_order() {
        // Everything without a pair shares key (0, 0); the stable sort
        // leaves them as discovered rather than alphabetised.
        let list = ordered(
            ["zeta.jpg", "1-1.jpg", "alpha.jpg", "0-0.jpg"],
            SortMode::NaturalNumeric,
        );
        assert_eq!(list.items(), ["zeta.jpg", "alpha.jpg", "0-0.jpg", "1-1.jpg"]);
    }

    #[test]
    fn test_lexicographic_order() {
        let list = ordered(["2-10.jpg", "2-2.jpg", "1-5.jpg", "B.jpg", "a.jpg"], SortMode::Lexicographic);
        assert_eq!(list.items(), ["1-5.jpg", "2-10.jpg", "2-2.jpg", "B.jpg", "a.jpg"]);
    }

    #[test]
    fn test_natural_key_uses_first_pair_in_path() {
        assert_eq!(natural_key("/assets/studio/3-12.jpg"), (3, 12));
        assert_eq!(natural_key("/assets/2024-outing/1-4.jpg"), (1, 4));
        assert_eq!(natural_key("img12-x-3-4.png"), (3, 4));
        assert_eq!(natural_key("photo-.jpg"), (0, 0));
        assert_eq!(natural_key("99999999999999999999999-1.jpg"), (u64::MAX, 1));
    }

    #[test]
    fn test_natural_key_ignores_non_ascii_digits() {
        assert_eq!(natural_key("사진-١-٢.jpg"), (0, 0));
        assert_eq!(natural_key("١-٢ then 5-6.jpg"), (5, 6));
    }

    #[test]
    fn test_advance_clamps_at_boundaries() {
        assert_eq!(advance(0, -1, 5), 0);
        assert_eq!(advance(4, 1, 5), 4);
        assert_eq!(advance(2, 1, 5), 3);
        assert_eq!(advance(2, -1, 5), 1);
    }

    #[test]
    fn test_advance_stays_in_range() {
        for len in 1..6usize {
            for index in 0..len {
                for delta in [-100i64, -3, -1, 0, 1, 3, 100, i64::MIN, i64::MAX] {
                    let next = advance(index, delta, len);
                    assert!(next < len, "advance({index}, {delta}, {len}) = {next}");
                }
            }
        }
    }

    #[test]
    fn test_advance_empty_list() {
        assert_eq!(advance(0, 1, 0), 0);
    }

    #[test]
    fn test_open_and_close() {
        let mut cursor = open_at(3);
        assert!(cursor.is_open);
        assert_eq!(cursor.current_index, 3);
        cursor.close();
        assert!(!cursor.is_open);
    }

    #[test]
    fn test_media_list_guards_open() {
        let empty = ordered(Vec::<String>::new(), SortMode::Lexicographic);
        assert_eq!(empty.open_at(0), None);

        let list = ordered(["a.jpg", "b.jpg"], SortMode::Lexicographic);
        assert_eq!(list.open_at(2), None);
        assert_eq!(list.open_at(1), Some(open_at(1)));
    }

    #[test]
    fn test_keys_navigate_and_close() {
        let mut cursor = open_at(0);
        assert!(!cursor.apply_key(NavKey::Previous, 3));
        assert!(cursor.apply_key(NavKey::Next, 3));
        assert!(cursor.apply_key(NavKey::Next, 3));
        assert!(!cursor.apply_key(NavKey::Next, 3));
        assert_eq!(cursor.current_index, 2);
        assert_eq!(cursor.position_label(3), "3 / 3");

        assert!(cursor.apply_key(NavKey::Close, 3));
        assert!(!cursor.is_open);
        assert!(!cursor.apply_key(NavKey::Previous, 3));
    }

    #[test]
    fn test_step_ignored_while_closed() {
        let mut cursor = GalleryCursor::default();
        assert!(!cursor.step(1, 4));
        assert_eq!(cursor.current_index, 0);
    }

    #[test]
    fn test_has_previous_and_next() {
        let cursor = open_at(0);
        assert!(!cursor.has_previous());
        assert!(cursor.has_next(2));
        let cursor = open_at(1);
        assert!(cursor.has_previous());
        assert!(!cursor.has_next(2));
    }

    #[test]
    fn test_sort_mode_toml_names() {
        let preset: GalleryPreset =
            toml::from_str("folder = \"studio\"\ntitle = \"Studio\"\nsort = \"natural-numeric\"").unwrap();
        assert_eq!(preset.sort, SortMode::NaturalNumeric);
        let preset: GalleryPreset = toml::from_str("folder = \"daily\"\ntitle = \"Daily\"").unwrap();
        assert_eq!(preset.sort, SortMode::Lexicographic);
    }
}
