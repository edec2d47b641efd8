//! Window-level event capability consumed by a mounted carousel.
//!
//! A carousel listens for viewport resizes, orientation changes and key
//! presses for as long as it is mounted. The listeners belong to whatever
//! platform hosts it, so the carousel only sees them through
//! [`PlatformEventSource`]. [`MountedCarousel`] acquires them on mount and
//! releases them on drop.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use super::Carousel;

/// Window event categories the carousel subscribes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EventKind {
    /// Viewport size changes.
    Resize,
    /// Device rotation.
    OrientationChange,
    /// Key presses.
    KeyDown,
}

const MOUNT_SUBSCRIPTIONS: [EventKind; 3] = [
    EventKind::Resize,
    EventKind::OrientationChange,
    EventKind::KeyDown,
];

/// Keys relevant to carousel navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// Show the previous item.
    ArrowLeft,
    /// Show the next item.
    ArrowRight,
    /// Any key the carousel does not handle.
    Other,
}

/// A window event delivered to a mounted carousel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PlatformEvent {
    /// The viewport changed size; `width` is the new carousel width in px.
    Resize { width: f64 },
    /// The device rotated; `width` is the new carousel width in px.
    OrientationChange { width: f64 },
    /// A key went down anywhere in the window.
    KeyDown(Key),
}

impl PlatformEvent {
    /// Listener slot this event is delivered to.
    #[must_use]
    pub const fn kind(&self) -> EventKind {
        match self {
            Self::Resize { .. } => EventKind::Resize,
            Self::OrientationChange { .. } => EventKind::OrientationChange,
            Self::KeyDown(_) => EventKind::KeyDown,
        }
    }
}

/// Handle returned by [`PlatformEventSource::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(pub u64);

/// Capability to register window listeners and measure the viewport.
#[cfg_attr(test, mockall::automock)]
pub trait PlatformEventSource {
    /// Register interest in `kind` and return a handle for removal.
    fn subscribe(&self, kind: EventKind) -> ListenerId;

    /// Remove a listener previously returned by [`Self::subscribe`].
    fn unsubscribe(&self, id: ListenerId);

    /// Current width of the carousel viewport in px.
    fn viewport_width(&self) -> f64;
}

#[derive(Debug, Default)]
struct SyntheticState {
    next_id: u64,
    listeners: BTreeMap<ListenerId, EventKind>,
    viewport_width: f64,
}

/// In-memory platform binding for headless hosts and tests.
///
/// # Examples
/// ```
/// use fracturism::domain::carousel::{EventKind, PlatformEventSource, SyntheticEventSource};
///
/// let source = SyntheticEventSource::new(320.0);
/// let id = source.subscribe(EventKind::Resize);
/// assert_eq!(source.active_listeners(), 1);
/// source.unsubscribe(id);
/// assert_eq!(source.active_listeners(), 0);
/// ```
#[derive(Debug, Default)]
pub struct SyntheticEventSource {
    state: Mutex<SyntheticState>,
}

impl SyntheticEventSource {
    /// Create a source reporting `viewport_width`.
    #[must_use]
    pub fn new(viewport_width: f64) -> Self {
        Self {
            state: Mutex::new(SyntheticState {
                viewport_width,
                ..SyntheticState::default()
            }),
        }
    }

    fn state(&self) -> MutexGuard<'_, SyntheticState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Change the width reported to future measurements.
    pub fn set_viewport_width(&self, width: f64) {
        self.state().viewport_width = width;
    }

    /// Number of registered listeners.
    #[must_use]
    pub fn active_listeners(&self) -> usize {
        self.state().listeners.len()
    }

    /// Whether any listener for `kind` is registered.
    #[must_use]
    pub fn is_listening(&self, kind: EventKind) -> bool {
        self.state().listeners.values().any(|registered| *registered == kind)
    }
}

impl PlatformEventSource for SyntheticEventSource {
    fn subscribe(&self, kind: EventKind) -> ListenerId {
        let mut state = self.state();
        state.next_id += 1;
        let id = ListenerId(state.next_id);
        state.listeners.insert(id, kind);
        id
    }

    fn unsubscribe(&self, id: ListenerId) {
        self.state().listeners.remove(&id);
    }

    fn viewport_width(&self) -> f64 {
        self.state().viewport_width
    }
}

/// A carousel bound to a platform for its mounted lifetime.
///
/// Mounting measures the viewport and subscribes to resize, orientation and
/// key events; dropping the value removes every listener it added.
pub struct MountedCarousel<'p, T, P>
where
    P: PlatformEventSource + ?Sized,
{
    carousel: Carousel<T>,
    platform: &'p P,
    listeners: Vec<(EventKind, ListenerId)>,
}

impl<'p, T, P> MountedCarousel<'p, T, P>
where
    P: PlatformEventSource + ?Sized,
{
    /// Mount `carousel` on `platform`.
    pub fn mount(mut carousel: Carousel<T>, platform: &'p P) -> Self {
        carousel.resize(platform.viewport_width());
        let listeners = MOUNT_SUBSCRIPTIONS
            .into_iter()
            .map(|kind| (kind, platform.subscribe(kind)))
            .collect();
        Self {
            carousel,
            platform,
            listeners,
        }
    }

    /// Deliver a window event. Returns `false` when nothing listens for it.
    pub fn dispatch(&mut self, event: PlatformEvent) -> bool {
        let kind = event.kind();
        if !self.listeners.iter().any(|(registered, _)| *registered == kind) {
            return false;
        }
        match event {
            PlatformEvent::Resize { width } | PlatformEvent::OrientationChange { width } => {
                self.carousel.resize(width);
            }
            PlatformEvent::KeyDown(key) => {
                self.carousel.handle_key(key);
            }
        }
        true
    }

    /// The wrapped carousel.
    pub fn carousel(&self) -> &Carousel<T> {
        &self.carousel
    }

    /// Mutable access for the component's own pointer handlers.
    pub fn carousel_mut(&mut self) -> &mut Carousel<T> {
        &mut self.carousel
    }
}

impl<T, P> Drop for MountedCarousel<'_, T, P>
where
    P: PlatformEventSource + ?Sized,
{
    fn drop(&mut self) {
        for (_, id) in self.listeners.drain(..) {
            self.platform.unsubscribe(id);
        }
    }
}
