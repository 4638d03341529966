use crate::carousel::CarouselState;

/// Minimum horizontal travel, in pixels, for a drag to count as a swipe.
pub const MIN_SWIPE_DISTANCE: f32 = 50.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwipeOutcome {
    Advance,
    Retreat,
    Ignored,
}

impl SwipeOutcome {
    /// Applies the outcome; returns whether the carousel moved.
    pub fn apply(self, state: &mut CarouselState) -> bool {
        if state.is_empty() {
            return false;
        }
        match self {
            SwipeOutcome::Advance => state.advance(),
            SwipeOutcome::Retreat => state.retreat(),
            SwipeOutcome::Ignored => return false,
        }
        true
    }
}

/// Tracks one touch or mouse drag from press to release.
#[derive(Debug, Clone, Copy)]
pub struct SwipeTracker {
    start: Option<f32>,
    end: Option<f32>,
    min_distance: f32,
}

impl Default for SwipeTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl SwipeTracker {
    pub fn new() -> Self {
        Self::with_min_distance(MIN_SWIPE_DISTANCE)
    }

    pub fn with_min_distance(min_distance: f32) -> Self {
        Self {
            start: None,
            end: None,
            min_distance: min_distance.abs(),
        }
    }

    pub fn begin(&mut self, x: f32) {
        self.start = Some(x);
        self.end = None;
    }

    pub fn moved(&mut self, x: f32) {
        if self.start.is_some() {
            self.end = Some(x);
        }
    }

    pub fn is_active(&self) -> bool {
        self.start.is_some()
    }

    pub fn cancel(&mut self) {
        self.start = None;
        self.end = None;
    }

    /// Ends the gesture. A press without any movement is ignored.
    pub fn finish(&mut self) -> SwipeOutcome {
        let outcome = match (self.start, self.end) {
            (Some(start), Some(end)) => self.classify(start - end),
            _ => SwipeOutcome::Ignored,
        };
        self.cancel();
        outcome
    }

    /// Positive distance means the pointer travelled left, towards the next item.
    pub fn classify(&self, distance: f32) -> SwipeOutcome {
        if distance > self.min_distance {
            SwipeOutcome::Advance
        } else if distance < -self.min_distance {
            SwipeOutcome::Retreat
        } else {
            SwipeOutcome::Ignored
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn swipe(from: f32, to: f32, state: &mut CarouselState) -> SwipeOutcome {
        let mut tracker = SwipeTracker::new();
        tracker.begin(from);
        tracker.moved(to);
        let outcome = tracker.finish();
        outcome.apply(state);
        outcome
    }

    #[test]
    fn sub_threshold_drag_leaves_index_unchanged() {
        let mut state = CarouselState::new(5);
        state.jump_to(2).expect("jump");

        assert_eq!(swipe(200.0, 170.0, &mut state), SwipeOutcome::Ignored);
        assert_eq!(swipe(200.0, 250.0, &mut state), SwipeOutcome::Ignored);
        assert_eq!(state.current_index(), 2);
    }

    #[test]
    fn left_swipe_advances_and_right_swipe_retreats_by_one() {
        let mut state = CarouselState::new(5);

        assert_eq!(swipe(300.0, 100.0, &mut state), SwipeOutcome::Advance);
        assert_eq!(state.current_index(), 1);

        assert_eq!(swipe(100.0, 151.0, &mut state), SwipeOutcome::Retreat);
        assert_eq!(state.current_index(), 0);

        assert_eq!(swipe(100.0, 400.0, &mut state), SwipeOutcome::Retreat);
        assert_eq!(state.current_index(), 4);
    }

    #[test]
    fn release_without_move_or_press_is_ignored() {
        let mut tracker = SwipeTracker::new();
        assert_eq!(tracker.finish(), SwipeOutcome::Ignored);

        tracker.moved(10.0);
        assert!(!tracker.is_active());

        tracker.begin(0.0);
        assert!(tracker.is_active());
        assert_eq!(tracker.finish(), SwipeOutcome::Ignored);
        assert!(!tracker.is_active());
    }

    #[test]
    fn press_at_origin_still_counts() {
        let mut state = CarouselState::new(3);
        assert_eq!(swipe(0.0, -80.0, &mut state), SwipeOutcome::Advance);
        assert_eq!(state.current_index(), 1);
    }

    #[test]
    fn empty_carousel_swipe_is_harmless() {
        let mut state = CarouselState::new(0);
        assert!(!SwipeOutcome::Advance.apply(&mut state));
        assert_eq!(state.current(), None);
    }
}
