//! Carousel navigation state machine.
//!
//! Shows a fixed sequence of items one at a time with wraparound. Three
//! input channels drive it: keyboard arrows, pointer drags, and explicit
//! index picks. Every index change goes through one normalising step, so the
//! index is always valid for the item count and an empty carousel ignores
//! navigation.
//!
//! The state machine never touches a renderer. It exposes a [`Frame`] (pixel
//! offset plus optional transition) that the rendering layer reflects.
//! Transitions run only for programmatic moves and snap-backs; they are
//! dropped once the clock passes their settle instant so a following drag
//! tracks the pointer directly.

mod gesture;
mod platform;

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use mockable::Clock;

use super::gallery::GalleryItem;
use super::locale::Locale;

pub use gesture::{
    Axis, DEAD_ZONE_PX, Direction, Point, SWIPE_FLOOR_PX, SWIPE_VIEWPORT_FRACTION,
    swipe_threshold,
};
use gesture::Drag;
#[cfg(test)]
pub use platform::MockPlatformEventSource;
pub use platform::{
    EventKind, Key, ListenerId, MountedCarousel, PlatformEvent, PlatformEventSource,
    SyntheticEventSource,
};

/// Animation used for programmatic navigation.
pub const SLIDE_DURATION: Duration = Duration::from_millis(300);
/// Delay after which a slide transition is cleared.
pub const SLIDE_SETTLE: Duration = Duration::from_millis(320);
/// Animation used when a released drag returns to the current item.
pub const SNAP_BACK_DURATION: Duration = Duration::from_millis(200);
/// Delay after which a snap-back transition is cleared.
pub const SNAP_BACK_SETTLE: Duration = Duration::from_millis(220);

/// Why a transition is running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionKind {
    /// Move to a neighbouring item.
    Slide,
    /// Return to the current item after an aborted swipe.
    SnapBack,
}

/// An animated move the renderer should apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    /// Which animation is running.
    pub kind: TransitionKind,
    /// Length of the animation.
    pub duration: Duration,
    /// Instant after which the transition is over.
    pub settles_at: DateTime<Utc>,
}

/// Whether a pointer gesture is being tracked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GesturePhase {
    /// No pointer is down.
    Idle,
    /// A pointer is down and being followed.
    Dragging,
}

/// What the renderer should draw.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    /// Horizontal translation of the item track in px.
    pub offset_px: f64,
    /// Animation to apply while moving to `offset_px`, if any.
    pub transition: Option<Transition>,
}

/// Result of a pointer move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveOutcome {
    /// Locked axis, once the gesture has moved far enough to decide.
    pub axis: Option<Axis>,
    /// The host should cancel native scrolling for this move.
    pub suppress_scroll: bool,
}

/// Result of releasing a pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureOutcome {
    /// The release was a swipe and the index moved.
    Navigated(Direction),
    /// The track returned to the current item.
    SnappedBack,
    /// No gesture was in progress.
    Ignored,
}

/// Navigable, wraparound view over a fixed item sequence.
///
/// # Examples
/// ```
/// use std::sync::Arc;
/// use fracturism::domain::carousel::Carousel;
/// use mockable::DefaultClock;
///
/// let mut carousel = Carousel::new(vec!["a", "b", "c"], Arc::new(DefaultClock));
/// carousel.prev();
/// assert_eq!(carousel.index(), Some(2));
/// carousel.next();
/// assert_eq!(carousel.current(), Some(&"a"));
/// ```
pub struct Carousel<T> {
    items: Vec<T>,
    index: usize,
    viewport_width: f64,
    drag: Option<Drag>,
    transition: Option<Transition>,
    clock: Arc<dyn Clock>,
}

impl<T> Carousel<T> {
    /// Create a carousel showing the first item.
    pub fn new(items: Vec<T>, clock: Arc<dyn Clock>) -> Self {
        Self {
            items,
            index: 0,
            viewport_width: 0.0,
            drag: None,
            transition: None,
            clock,
        }
    }

    /// All items in display order.
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Number of items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// `true` when there is nothing to show.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Current position; `None` for an empty carousel.
    pub fn index(&self) -> Option<usize> {
        (!self.items.is_empty()).then_some(self.index)
    }

    /// Item at the current position.
    pub fn current(&self) -> Option<&T> {
        self.items.get(self.index)
    }

    /// Width of one item slot in px.
    pub fn viewport_width(&self) -> f64 {
        self.viewport_width
    }

    /// Whether a drag is in progress.
    pub fn phase(&self) -> GesturePhase {
        if self.drag.is_some() {
            GesturePhase::Dragging
        } else {
            GesturePhase::Idle
        }
    }

    /// Transition that has not settled yet.
    pub fn transition(&self) -> Option<Transition> {
        self.transition
    }

    /// Move to `target`, wrapping any integer into range.
    ///
    /// This is the only place the index changes.
    fn go(&mut self, target: i64) -> Option<usize> {
        let len = i64::try_from(self.items.len()).ok().filter(|len| *len > 0)?;
        let wrapped = usize::try_from(target.rem_euclid(len)).ok()?;
        self.index = wrapped;
        self.start_transition(TransitionKind::Slide);
        Some(wrapped)
    }

    fn current_position(&self) -> i64 {
        i64::try_from(self.index).unwrap_or_default()
    }

    /// Advance one item, wrapping from the last to the first.
    pub fn next(&mut self) -> Option<usize> {
        self.go(self.current_position() + 1)
    }

    /// Go back one item, wrapping from the first to the last.
    pub fn prev(&mut self) -> Option<usize> {
        self.go(self.current_position() - 1)
    }

    /// Jump to `index`, wrapping out-of-range and negative values.
    pub fn go_to(&mut self, index: i64) -> Option<usize> {
        self.go(index)
    }

    fn step(&mut self, direction: Direction) -> Option<usize> {
        match direction {
            Direction::Previous => self.prev(),
            Direction::Next => self.next(),
        }
    }

    /// Map arrow keys to navigation. Returns `true` when the key was used.
    ///
    /// Keys are ignored while a drag is in progress; the gesture decides the
    /// outcome when it ends.
    pub fn handle_key(&mut self, key: Key) -> bool {
        if self.drag.is_some() {
            return false;
        }
        match key {
            Key::ArrowLeft => self.prev().is_some(),
            Key::ArrowRight => self.next().is_some(),
            Key::Other => false,
        }
    }

    /// Begin tracking a pointer at `at`, dropping any running transition.
    pub fn gesture_start(&mut self, at: Point) {
        self.transition = None;
        self.drag = Some(Drag::start(at));
    }

    /// Track the pointer. Horizontal gestures follow the finger and ask the
    /// host to suppress scrolling; vertical ones leave the page alone.
    pub fn gesture_move(&mut self, at: Point) -> MoveOutcome {
        let axis = self.drag.as_mut().and_then(|drag| drag.track(at));
        MoveOutcome {
            axis,
            suppress_scroll: axis == Some(Axis::Horizontal),
        }
    }

    /// Release the pointer, navigating if the swipe passed the threshold.
    pub fn gesture_end(&mut self) -> GestureOutcome {
        let Some(drag) = self.drag.take() else {
            return GestureOutcome::Ignored;
        };
        if let Some(direction) = drag.release(self.viewport_width) {
            if self.step(direction).is_some() {
                return GestureOutcome::Navigated(direction);
            }
        }
        if !self.items.is_empty() {
            self.start_transition(TransitionKind::SnapBack);
        }
        GestureOutcome::SnappedBack
    }

    /// Record a new viewport width.
    ///
    /// The index is kept; only the pixel offset changes. A drag whose end
    /// event never arrived is abandoned.
    pub fn resize(&mut self, width: f64) {
        self.viewport_width = if width.is_finite() { width.max(0.0) } else { 0.0 };
        self.drag = None;
    }

    /// Clear the transition once its settle instant has passed.
    ///
    /// Returns `true` if a transition was cleared.
    pub fn settle(&mut self) -> bool {
        let now = self.clock.utc();
        match self.transition {
            Some(transition) if transition.settles_at <= now => {
                self.transition = None;
                true
            }
            _ => false,
        }
    }

    /// Offset and transition for the renderer.
    pub fn frame(&self) -> Frame {
        let position = f64::from(u32::try_from(self.index).unwrap_or(u32::MAX));
        let live = self.drag.as_ref().map_or(0.0, Drag::visual_offset);
        Frame {
            offset_px: -(position * self.viewport_width) + live,
            transition: self.transition,
        }
    }

    /// Index picker state: one entry per item, flagging the current one.
    pub fn indicators(&self) -> impl Iterator<Item = (usize, bool)> + '_ {
        (0..self.items.len()).map(|i| (i, i == self.index))
    }

    fn start_transition(&mut self, kind: TransitionKind) {
        let (duration, settle) = match kind {
            TransitionKind::Slide => (SLIDE_DURATION, SLIDE_SETTLE),
            TransitionKind::SnapBack => (SNAP_BACK_DURATION, SNAP_BACK_SETTLE),
        };
        let settle =
            chrono::Duration::from_std(settle).unwrap_or_else(|_| chrono::Duration::zero());
        self.transition = Some(Transition {
            kind,
            duration,
            settles_at: self.clock.utc() + settle,
        });
    }
}

impl Carousel<GalleryItem> {
    /// Detail-page link of the current work in `locale`.
    pub fn current_link(&self, locale: Locale) -> Option<String> {
        self.current().map(|item| item.href(locale))
    }
}
