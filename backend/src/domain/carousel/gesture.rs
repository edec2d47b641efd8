//! Pointer gesture maths: axis classification and swipe thresholds.

/// Movement (px) a pointer must exceed before the gesture gets an axis.
pub const DEAD_ZONE_PX: f64 = 8.0;

/// Share of the viewport width a release must travel to count as a swipe.
pub const SWIPE_VIEWPORT_FRACTION: f64 = 0.15;

/// Absolute swipe distance (px) that always suffices on wide viewports.
pub const SWIPE_FLOOR_PX: f64 = 60.0;

/// A pointer position in viewport pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    /// Horizontal coordinate.
    pub x: f64,
    /// Vertical coordinate.
    pub y: f64,
}

impl Point {
    /// Point at `(x, y)`.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Dominant axis of a gesture, fixed once the dead-zone is left.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    /// Mostly sideways; the carousel follows the pointer.
    Horizontal,
    /// Mostly up or down; the page scrolls.
    Vertical,
}

/// Navigation step requested by a swipe or key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Towards the lower index.
    Previous,
    /// Towards the higher index.
    Next,
}

/// Swipe distance a release must strictly exceed for `viewport_width`.
///
/// # Examples
/// ```
/// use fracturism::domain::carousel::swipe_threshold;
///
/// assert_eq!(swipe_threshold(1200.0), 60.0);
/// assert!(swipe_threshold(200.0) < 60.0);
/// ```
#[must_use]
pub fn swipe_threshold(viewport_width: f64) -> f64 {
    (viewport_width * SWIPE_VIEWPORT_FRACTION).min(SWIPE_FLOOR_PX)
}

/// An active pointer gesture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Drag {
    start: Point,
    dx: f64,
    dy: f64,
    axis: Option<Axis>,
}

impl Drag {
    pub(crate) const fn start(at: Point) -> Self {
        Self {
            start: at,
            dx: 0.0,
            dy: 0.0,
            axis: None,
        }
    }

    /// Record the pointer at `at` and return the axis, locking it the first
    /// time movement leaves the dead-zone. Ties lock as vertical so the page
    /// keeps scrolling.
    pub(crate) fn track(&mut self, at: Point) -> Option<Axis> {
        self.dx = at.x - self.start.x;
        self.dy = at.y - self.start.y;
        if self.axis.is_none() {
            let (horizontal, vertical) = (self.dx.abs(), self.dy.abs());
            if horizontal.max(vertical) > DEAD_ZONE_PX {
                self.axis = Some(if horizontal > vertical {
                    Axis::Horizontal
                } else {
                    Axis::Vertical
                });
            }
        }
        self.axis
    }

    pub(crate) const fn axis(&self) -> Option<Axis> {
        self.axis
    }

    /// Live visual offset: the horizontal delta for horizontal gestures,
    /// nothing otherwise.
    pub(crate) fn visual_offset(&self) -> f64 {
        match self.axis {
            Some(Axis::Horizontal) => self.dx,
            _ => 0.0,
        }
    }

    /// Navigation implied by releasing here, if any.
    ///
    /// Dragging right past the threshold reveals the previous item.
    pub(crate) fn release(&self, viewport_width: f64) -> Option<Direction> {
        if self.axis != Some(Axis::Horizontal) {
            return None;
        }
        let threshold = swipe_threshold(viewport_width);
        if self.dx > threshold {
            Some(Direction::Previous)
        } else if self.dx < -threshold {
            Some(Direction::Next)
        } else {
            None
        }
    }
}
