//! Pan and zoom state machine for an explored diagram.
//!
//! The [`Viewport`] turns pointer and wheel input into a clamped 2D
//! transform. It knows nothing about the diagram it is applied to and never
//! suspends; every operation completes synchronously and reports whether the
//! visible transform changed so the caller knows when to re-apply it.
//!
//! # Transform composition
//!
//! The transform translates by the pan offset in screen pixels and then
//! scales by the zoom factor around the element's top-left corner
//! ([`TRANSFORM_ORIGIN`]). Because the translation is applied outside the
//! scale, panning moves the diagram 1:1 with the pointer at every zoom level.
//! Zooming always scales from that fixed origin rather than towards the
//! pointer position.
//!
//! # Example
//!
//! ```
//! # use evml_core::viewport::{PointerId, Viewport};
//! let mut viewport = Viewport::new();
//!
//! viewport.zoom_in();
//! viewport.begin_pan(PointerId::new(1), 100.0, 100.0);
//! viewport.continue_pan(PointerId::new(1), 130.0, 90.0);
//! viewport.end_pan(PointerId::new(1));
//!
//! assert_eq!(
//!     viewport.transform().to_string(),
//!     "translate(30px, -10px) scale(1.1)"
//! );
//! ```

use std::fmt;

use log::trace;

use crate::geometry::Point;

/// Amount added to or removed from the zoom factor by one zoom step.
pub const ZOOM_STEP: f64 = 0.1;

/// Smallest allowed zoom factor.
pub const MIN_ZOOM: f64 = 0.25;

/// Largest allowed zoom factor.
pub const MAX_ZOOM: f64 = 3.0;

/// Zoom factor of a freshly created or reset viewport.
pub const DEFAULT_ZOOM: f64 = 1.0;

/// CSS `transform-origin` that must accompany [`ViewportTransform`].
pub const TRANSFORM_ORIGIN: &str = "0 0";

/// Identifier of a pointer as reported by the host's input events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PointerId(i32);

impl PointerId {
    /// Wraps a raw host pointer identifier.
    pub fn new(id: i32) -> Self {
        Self(id)
    }

    /// Returns the raw host pointer identifier.
    pub fn get(self) -> i32 {
        self.0
    }
}

impl fmt::Display for PointerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Snapshot taken when a pan gesture starts.
#[derive(Debug, Clone, Copy, PartialEq)]
struct PanGesture {
    pointer: PointerId,
    start_pan: Point,
    start_pointer: Point,
}

/// Current zoom, pan and in-progress gesture of a viewport.
///
/// A viewport is panning exactly when it has an active pointer; both are
/// derived from the same optional gesture so they cannot disagree.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportState {
    zoom: f64,
    pan: Point,
    gesture: Option<PanGesture>,
}

impl ViewportState {
    /// Returns the zoom factor, always within [`MIN_ZOOM`]..=[`MAX_ZOOM`].
    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    /// Returns the pan offset in screen pixels.
    pub fn pan(&self) -> Point {
        self.pan
    }

    /// Returns `true` while a pan gesture is in progress.
    pub fn is_panning(&self) -> bool {
        self.gesture.is_some()
    }

    /// Returns the pointer driving the current pan gesture, if any.
    pub fn active_pointer(&self) -> Option<PointerId> {
        self.gesture.map(|gesture| gesture.pointer)
    }

    /// Returns the transform realising this state.
    pub fn transform(&self) -> ViewportTransform {
        ViewportTransform {
            pan: self.pan,
            zoom: self.zoom,
        }
    }
}

impl Default for ViewportState {
    fn default() -> Self {
        Self {
            zoom: DEFAULT_ZOOM,
            pan: Point::default(),
            gesture: None,
        }
    }
}

/// Translate-then-scale transform applied to a mounted diagram root.
///
/// Formats as `translate(<x>px, <y>px) scale(<zoom>)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportTransform {
    pan: Point,
    zoom: f64,
}

impl ViewportTransform {
    /// Returns the translation component in screen pixels.
    pub fn pan(&self) -> Point {
        self.pan
    }

    /// Returns the scale component.
    pub fn zoom(&self) -> f64 {
        self.zoom
    }
}

impl fmt::Display for ViewportTransform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "translate({}px, {}px) scale({})",
            self.pan.x(),
            self.pan.y(),
            self.zoom
        )
    }
}

/// The viewport controller.
///
/// Every mutating method returns `true` when the transform has to be
/// recomputed and re-applied, and `false` when the call was ignored or left
/// the visible state untouched.
#[derive(Debug, Clone, Default)]
pub struct Viewport {
    state: ViewportState,
}

impl Viewport {
    /// Creates a viewport at the default zoom with no pan.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current state.
    pub fn state(&self) -> &ViewportState {
        &self.state
    }

    /// Returns the transform for the current state.
    pub fn transform(&self) -> ViewportTransform {
        self.state.transform()
    }

    /// Adds `delta` to the zoom factor, clamped to the allowed range.
    ///
    /// Returns `false` without touching the state if the clamped value equals
    /// the current zoom, e.g. when zooming in while already at [`MAX_ZOOM`].
    pub fn zoom_by(&mut self, delta: f64) -> bool {
        let next = (self.state.zoom + delta).clamp(MIN_ZOOM, MAX_ZOOM);
        if next == self.state.zoom {
            return false;
        }

        self.state.zoom = next;
        trace!(zoom = next; "Viewport zoom changed");
        true
    }

    /// Zooms in by one [`ZOOM_STEP`].
    pub fn zoom_in(&mut self) -> bool {
        self.zoom_by(ZOOM_STEP)
    }

    /// Zooms out by one [`ZOOM_STEP`].
    pub fn zoom_out(&mut self) -> bool {
        self.zoom_by(-ZOOM_STEP)
    }

    /// Zooms by one step in response to a wheel event.
    ///
    /// Scrolling down (positive `delta_y`) zooms out, anything else zooms in.
    pub fn zoom_for_wheel(&mut self, delta_y: f64) -> bool {
        if delta_y > 0.0 {
            self.zoom_out()
        } else {
            self.zoom_in()
        }
    }

    /// Restores the default zoom and pan.
    ///
    /// Always returns `true`. A gesture in progress is abandoned as well,
    /// since its start snapshot refers to the discarded pan offset.
    pub fn reset(&mut self) -> bool {
        self.state = ViewportState::default();
        trace!("Viewport reset");
        true
    }

    /// Starts a pan gesture driven by `pointer` at screen position `(x, y)`.
    ///
    /// Ignored if a gesture is already in progress; only one pointer drives
    /// panning at a time. Returns `true` if the gesture started.
    pub fn begin_pan(&mut self, pointer: PointerId, x: f64, y: f64) -> bool {
        if self.state.is_panning() {
            trace!(pointer = pointer.get(); "Ignoring pointer, pan already in progress");
            return false;
        }

        self.state.gesture = Some(PanGesture {
            pointer,
            start_pan: self.state.pan,
            start_pointer: Point::new(x, y),
        });
        trace!(pointer = pointer.get(); "Pan started");
        true
    }

    /// Moves the active pan gesture to screen position `(x, y)`.
    ///
    /// The pan offset becomes the offset at gesture start plus the pointer's
    /// displacement since then. Moves from any other pointer are ignored.
    pub fn continue_pan(&mut self, pointer: PointerId, x: f64, y: f64) -> bool {
        let Some(gesture) = self.active_gesture(pointer) else {
            return false;
        };

        let delta = Point::new(x, y).sub_point(gesture.start_pointer);
        self.state.pan = gesture.start_pan.add_point(delta);
        true
    }

    /// Ends the active pan gesture if `pointer` is the one driving it.
    ///
    /// Returns `true` if a gesture was ended. The pan offset itself is not
    /// changed by ending a gesture.
    pub fn end_pan(&mut self, pointer: PointerId) -> bool {
        if self.active_gesture(pointer).is_none() {
            return false;
        }

        self.state.gesture = None;
        trace!(pointer = pointer.get(), pan:% = self.state.pan; "Pan ended");
        true
    }

    /// Abandons any pan gesture, whichever pointer drives it.
    ///
    /// The pan offset reached so far is kept. Returns `true` if a gesture
    /// was in progress.
    pub fn cancel_pan(&mut self) -> bool {
        match self.state.gesture.take() {
            Some(gesture) => {
                trace!(pointer = gesture.pointer.get(); "Pan abandoned");
                true
            }
            None => false,
        }
    }

    fn active_gesture(&self, pointer: PointerId) -> Option<PanGesture> {
        self.state
            .gesture
            .filter(|gesture| gesture.pointer == pointer)
    }
}


#[cfg(test)]
mod proptest_tests {
    use float_cmp::approx_eq;
    use proptest::prelude::*;

    use super::*;

    #[derive(Debug, Clone)]
    enum Action {
        ZoomIn,
        ZoomOut,
        Zoom(f64),
        Reset,
        Begin(i32, f64, f64),
        Move(i32, f64, f64),
        End(i32),
    }

    fn action() -> impl Strategy<Value = Action> {
        prop_oneof![
            Just(Action::ZoomIn),
            Just(Action::ZoomOut),
            (-5.0..5.0f64).prop_map(Action::Zoom),
            Just(Action::Reset),
            (0..3i32, -1e4..1e4f64, -1e4..1e4f64).prop_map(|(p, x, y)| Action::Begin(p, x, y)),
            (0..3i32, -1e4..1e4f64, -1e4..1e4f64).prop_map(|(p, x, y)| Action::Move(p, x, y)),
            (0..3i32).prop_map(Action::End),
        ]
    }

    fn apply(viewport: &mut Viewport, action: &Action) {
        match *action {
            Action::ZoomIn => {
                viewport.zoom_in();
            }
            Action::ZoomOut => {
                viewport.zoom_out();
            }
            Action::Zoom(delta) => {
                viewport.zoom_by(delta);
            }
            Action::Reset => {
                viewport.reset();
            }
            Action::Begin(p, x, y) => {
                viewport.begin_pan(PointerId::new(p), x, y);
            }
            Action::Move(p, x, y) => {
                viewport.continue_pan(PointerId::new(p), x, y);
            }
            Action::End(p) => {
                viewport.end_pan(PointerId::new(p));
            }
        }
    }

    proptest! {
        #[test]
        fn zoom_stays_within_bounds(actions in prop::collection::vec(action(), 0..64)) {
            let mut viewport = Viewport::new();
            for action in &actions {
                apply(&mut viewport, action);
                let zoom = viewport.state().zoom();
                prop_assert!((MIN_ZOOM..=MAX_ZOOM).contains(&zoom));
                prop_assert_eq!(
                    viewport.state().is_panning(),
                    viewport.state().active_pointer().is_some()
                );
            }
        }

        #[test]
        fn zoom_in_steps_follow_grid(steps in 0usize..40) {
            let mut viewport = Viewport::new();
            for _ in 0..steps {
                viewport.zoom_in();
            }

            let expected = (DEFAULT_ZOOM + ZOOM_STEP * steps as f64).min(MAX_ZOOM);
            prop_assert!(approx_eq!(f64, viewport.state().zoom(), expected, epsilon = 1e-9));
        }

        #[test]
        fn reset_always_restores_defaults(actions in prop::collection::vec(action(), 0..32)) {
            let mut viewport = Viewport::new();
            for action in &actions {
                apply(&mut viewport, action);
            }

            viewport.reset();
            prop_assert_eq!(*viewport.state(), ViewportState::default());
        }

        #[test]
        fn pan_gesture_adds_pointer_delta(
            start in (-1e4..1e4f64, -1e4..1e4f64),
            end in (-1e4..1e4f64, -1e4..1e4f64),
            noise in (-1e4..1e4f64, -1e4..1e4f64),
        ) {
            let mut viewport = Viewport::new();
            viewport.begin_pan(PointerId::new(7), 1.0, 2.0);
            viewport.continue_pan(PointerId::new(7), 4.0, -2.0);
            viewport.end_pan(PointerId::new(7));
            let before = viewport.state().pan();

            viewport.begin_pan(PointerId::new(1), start.0, start.1);
            viewport.continue_pan(PointerId::new(2), noise.0, noise.1);
            viewport.continue_pan(PointerId::new(1), end.0, end.1);
            viewport.continue_pan(PointerId::new(2), noise.1, noise.0);
            viewport.end_pan(PointerId::new(1));

            let pan = viewport.state().pan();
            prop_assert!(approx_eq!(f64, pan.x(), before.x() + (end.0 - start.0), epsilon = 1e-6));
            prop_assert!(approx_eq!(f64, pan.y(), before.y() + (end.1 - start.1), epsilon = 1e-6));
        }
    }
}
