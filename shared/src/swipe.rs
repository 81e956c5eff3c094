//! Horizontal swipe detection for the lightbox
//!
//! Only the x coordinate is tracked. A drag whose net horizontal travel
//! exceeds `SWIPE_THRESHOLD` becomes a navigation step.

use crate::gallery::NavKey;

/// Minimum horizontal travel (px) for a drag to count as a swipe
pub const SWIPE_THRESHOLD: f32 = 50.0;

/// Direction of a recognised swipe, expressed as the navigation it causes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwipeDirection {
    /// Finger/pointer moved left: show the next item
    Next,
    /// Finger/pointer moved right: show the previous item
    Previous,
}

impl SwipeDirection {
    /// Cursor step equivalent to this swipe
    pub fn delta(&self) -> i64 {
        match self {
            SwipeDirection::Next => 1,
            SwipeDirection::Previous => -1,
        }
    }

    /// The arrow key this swipe is equivalent to
    pub fn as_key(&self) -> NavKey {
        match self {
            SwipeDirection::Next => NavKey::Next,
            SwipeDirection::Previous => NavKey::Previous,
        }
    }
}

/// Classify a net horizontal displacement (`end_x - start_x`)
pub fn classify(displacement: f32, threshold: f32) -> Option<SwipeDirection> {
    if displacement < -threshold {
        Some(SwipeDirection::Next)
    } else if displacement > threshold {
        Some(SwipeDirection::Previous)
    } else {
        None
    }
}

/// Tracks one drag gesture from press to release
#[derive(Debug, Clone, Copy)]
pub struct SwipeTracker {
    threshold: f32,
    start_x: Option<f32>,
    end_x: Option<f32>,
}

impl SwipeTracker {
    pub fn new(threshold: f32) -> Self {
        Self {
            threshold: threshold.abs(),
            start_x: None,
            end_x: None,
        }
    }

    /// Pointer/touch went down at `x`; any previous gesture is discarded
    pub fn start(&mut self, x: f32) {
        self.start_x = Some(x);
        self.end_x = None;
    }

    /// Pointer/touch moved to `x` (ignored when no gesture is active)
    pub fn moved(&mut self, x: f32) {
        if self.start_x.is_some() {
            self.end_x = Some(x);
        }
    }

    pub fn is_active(&self) -> bool {
        self.start_x.is_some()
    }

    /// Pointer/touch released. A press without movement is not a swipe.
    pub fn finish(&mut self) -> Option<SwipeDirection> {
        let start = self.start_x.take()?;
        let end = self.end_x.take()?;
        classify(end - start, self.threshold)
    }

    pub fn cancel(&mut self) {
        self.start_x = None;
        self.end_x = None;
    }
}

impl Default for SwipeTracker {
    fn default() -> Self {
        Self::new(SWIPE_THRESHOLD)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gallery::{advance, open_at};

    fn drag(from: f32, to: f32) -> Option<SwipeDirection> {
        let mut tracker = SwipeTracker::default();
        tracker.start(from);
        tracker.moved((from + to) / 2.0);
        tracker.moved(to);
        tracker.finish()
    }

    #[test]
    fn test_left_drag_past_threshold_is_next() {
        assert_eq!(drag(300.0, 240.0), Some(SwipeDirection::Next));
    }

    #[test]
    fn test_right_drag_past_threshold_is_previous() {
        assert_eq!(drag(100.0, 160.0), Some(SwipeDirection::Previous));
    }

    #[test]
    fn test_short_drag_is_ignored() {
        assert_eq!(drag(300.0, 260.0), None);
        assert_eq!(drag(300.0, 350.0), None);
    }

    #[test]
    fn test_drag_of_exactly_threshold_is_ignored() {
        assert_eq!(drag(300.0, 300.0 - SWIPE_THRESHOLD), None);
        assert_eq!(drag(300.0, 300.0 + SWIPE_THRESHOLD), None);
        assert_eq!(classify(-SWIPE_THRESHOLD, SWIPE_THRESHOLD), None);
        assert_eq!(classify(SWIPE_THRESHOLD, SWIPE_THRESHOLD), None);
        assert_eq!(drag(300.0, 249.0), Some(SwipeDirection::Next));
    }

    #[test]
    fn test_press_without_move_is_ignored() {
        let mut tracker = SwipeTracker::default();
        tracker.start(200.0);
        assert_eq!(tracker.finish(), None);
        assert!(!tracker.is_active());
    }

    #[test]
    fn test_swipe_matches_next_key() {
        let len = 5;
        let mut by_key = open_at(2);
        by_key.apply_key(NavKey::Next, len);

        let mut by_swipe = open_at(2);
        let swipe = drag(500.0, 440.0).unwrap();
        by_swipe.apply_key(swipe.as_key(), len);

        assert_eq!(by_key, by_swipe);
        assert_eq!(advance(2, swipe.delta(), len), 3);
    }

    #[test]
    fn test_swipe_clamps_like_keys() {
        let swipe = drag(0.0, 80.0).unwrap();
        assert_eq!(advance(0, swipe.delta(), 3), 0);
    }

    #[test]
    fn test_move_before_start_is_ignored() {
        let mut tracker = SwipeTracker::default();
        tracker.moved(10.0);
        assert_eq!(tracker.finish(), None);
    }
}
