// Copyright 2025 the Viewstage Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The viewport engine: live transform, measured bounds, gesture sessions.

use kurbo::{Insets, Point, Rect, Vec2};
use smallvec::SmallVec;
use thiserror::Error;
use viewstage_geometry::{angle_between, degrees_to_radians, rotate_point, untransformed_rect};
use viewstage_wheel::{
    self as wheel, MOUSE_ZOOM_FACTOR, WheelEvent, WheelSource, cancel_notch_steps,
};

use crate::events::{GestureEvent, PointerButton, PointerEvent, TouchPoint};
use crate::log::debug;
use crate::projection::Projection;
use crate::transform::{RenderTransform, Transform, TransformOverrides};

/// Construction-time configuration for a [`Viewport`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewportConfig {
    /// Padding between the wrapper rect and its inner area.
    pub offset: Insets,
    /// Initial transform. The scale component is clamped into the limits.
    pub transform: Transform,
    /// Lower scale limit.
    pub min_scale: f64,
    /// Upper scale limit.
    pub max_scale: f64,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            offset: Insets::ZERO,
            transform: Transform::IDENTITY,
            min_scale: 0.1,
            max_scale: 10.0,
        }
    }
}

impl ViewportConfig {
    /// Validates the configuration.
    ///
    /// Scale limits must be positive, finite, and ordered. Misordered
    /// limits are a caller error surfaced here, never during gesture
    /// handling.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.min_scale.is_finite()
            || !self.max_scale.is_finite()
            || self.min_scale <= 0.0
            || self.max_scale <= 0.0
        {
            return Err(ConfigError::ScaleLimitsInvalid {
                min: self.min_scale,
                max: self.max_scale,
            });
        }
        if self.min_scale > self.max_scale {
            return Err(ConfigError::ScaleLimitsInverted {
                min: self.min_scale,
                max: self.max_scale,
            });
        }
        Ok(())
    }
}

/// Error raised by [`ViewportConfig::validate`].
#[derive(Clone, Copy, Debug, Error, PartialEq)]
pub enum ConfigError {
    /// A scale limit is non-positive or non-finite.
    #[error("scale limits must be positive and finite (got {min}..{max})")]
    ScaleLimitsInvalid {
        /// Configured lower limit.
        min: f64,
        /// Configured upper limit.
        max: f64,
    },
    /// The lower scale limit exceeds the upper one.
    #[error("minimum scale {min} exceeds maximum scale {max}")]
    ScaleLimitsInverted {
        /// Configured lower limit.
        min: f64,
        /// Configured upper limit.
        max: f64,
    },
}

/// A frozen touch point: where the finger went down, in client space and as
/// the canvas-relative point it covered at that instant.
#[derive(Clone, Copy, Debug, PartialEq)]
struct TouchStart {
    client: Point,
    canvas_rel: Point,
}

/// The active gesture session, if any.
///
/// Exactly one interaction drives the transform at a time. Session state is
/// created when a gesture starts and cleared when it ends; move handlers
/// no-op when their session is absent.
#[derive(Clone, Debug, PartialEq, Default)]
enum Session {
    #[default]
    Idle,
    Drag {
        start: Point,
        translate: Vec2,
    },
    Touch {
        starts: SmallVec<[TouchStart; 2]>,
        translate: Vec2,
    },
    Gesture {
        start_rotate: f64,
    },
}

/// The viewport engine.
///
/// Owns the live [`Transform`], the measured wrapper/canvas bounds, and the
/// in-flight gesture session. All input handlers and setters run
/// synchronously and mutate the one live transform; observers poll
/// [`Self::revision`] and re-read state.
///
/// The engine starts unmeasured: until both bounds have arrived (and are
/// non-degenerate), [`Self::projection`] is `None`, handlers that need
/// geometry no-op, and [`Self::is_initialized`] is `false`.
#[derive(Clone, Debug)]
pub struct Viewport {
    offset: Insets,
    transform: Transform,
    min_scale: f64,
    max_scale: f64,
    wrapper_bounds: Option<Rect>,
    canvas_bounds: Option<Rect>,
    session: Session,
    revision: u64,
    initialized: bool,
}

impl Viewport {
    /// Creates a viewport from a validated configuration.
    pub fn new(config: ViewportConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut transform = config.transform;
        transform.scale = transform.scale.clamp(config.min_scale, config.max_scale);
        Ok(Self {
            offset: config.offset,
            transform,
            min_scale: config.min_scale,
            max_scale: config.max_scale,
            wrapper_bounds: None,
            canvas_bounds: None,
            session: Session::Idle,
            revision: 0,
            initialized: false,
        })
    }

    // --- measurement ---

    /// Stores a freshly measured wrapper rect, in client coordinates.
    ///
    /// Bounds changes never alter the transform; they refresh derived
    /// values and bump the revision.
    pub fn set_wrapper_bounds(&mut self, rect: Rect) {
        self.wrapper_bounds = Some(rect);
        self.measured();
    }

    /// Stores the canvas's untransformed natural rect directly.
    pub fn set_canvas_bounds(&mut self, rect: Rect) {
        self.canvas_bounds = Some(rect);
        self.measured();
    }

    /// Ingests a measured canvas rect that may have the current transform
    /// baked in.
    ///
    /// Once the engine is measured, the observed rect is inverse-transformed
    /// against the current rendering transform to recover the natural size
    /// (resize observers report the transformed box). Before that, the rect
    /// is taken verbatim: the first measurement happens before any transform
    /// has been applied to the surface.
    pub fn set_canvas_measurement(&mut self, measured: Rect) {
        let natural = match self.projection() {
            Some(proj) => {
                let render = proj.render_transform();
                untransformed_rect(measured, render.translate, render.scale, render.rotate)
            }
            None => measured,
        };
        self.canvas_bounds = Some(natural);
        self.measured();
    }

    fn measured(&mut self) {
        if !self.initialized && self.projection().is_some() {
            self.initialized = true;
        }
        self.bump();
    }

    // --- state access ---

    /// A pure mapping snapshot, once both bounds are measured and
    /// non-degenerate.
    #[must_use]
    pub fn projection(&self) -> Option<Projection> {
        let wrapper = self.wrapper_bounds?;
        let canvas = self.canvas_bounds?;
        let proj = Projection {
            offset: self.offset,
            wrapper,
            canvas,
            transform: self.transform,
        };
        let inner = proj.inner_size();
        if inner.width <= 0.0 || inner.height <= 0.0 || canvas.width() <= 0.0 || canvas.height() <= 0.0
        {
            return None;
        }
        Some(proj)
    }

    /// The live transform.
    #[must_use]
    pub fn transform(&self) -> Transform {
        self.transform
    }

    /// The live translation, in wrapper pixels.
    #[must_use]
    pub fn translate(&self) -> Vec2 {
        self.transform.translate
    }

    /// The live scale factor.
    #[must_use]
    pub fn scale(&self) -> f64 {
        self.transform.scale
    }

    /// The live rotation, in radians.
    #[must_use]
    pub fn rotate(&self) -> f64 {
        self.transform.rotate
    }

    /// The configured offset insets.
    #[must_use]
    pub fn offset(&self) -> Insets {
        self.offset
    }

    /// The scale limits as `(min, max)`.
    #[must_use]
    pub fn scale_limits(&self) -> (f64, f64) {
        (self.min_scale, self.max_scale)
    }

    /// The last measured wrapper rect, if any.
    #[must_use]
    pub fn wrapper_bounds(&self) -> Option<Rect> {
        self.wrapper_bounds
    }

    /// The canvas natural rect, if measured.
    #[must_use]
    pub fn canvas_bounds(&self) -> Option<Rect> {
        self.canvas_bounds
    }

    /// The transform triple a renderer applies to the canvas, once measured.
    #[must_use]
    pub fn render_transform(&self) -> Option<RenderTransform> {
        Some(self.projection()?.render_transform())
    }

    /// Change counter, bumped after every committed mutation (transform or
    /// bounds). Observers poll this instead of subscribing to callbacks.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Whether both bounds have been measured at least once.
    ///
    /// Latches to `true` on the first complete, non-degenerate measurement
    /// and stays there.
    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    fn bump(&mut self) {
        self.revision += 1;
    }

    // --- setters ---

    /// Sets the translation directly.
    pub fn set_translate(&mut self, translate: Vec2) {
        if self.transform.translate == translate {
            return;
        }
        self.transform.translate = translate;
        self.bump();
    }

    /// Sets the scale directly, clamped into the limits.
    ///
    /// The translation is left untouched; use [`Self::apply_transform`] to
    /// zoom about an anchor.
    pub fn set_scale(&mut self, scale: f64) {
        let clamped = scale.clamp(self.min_scale, self.max_scale);
        if self.transform.scale == clamped {
            return;
        }
        self.transform.scale = clamped;
        self.bump();
    }

    /// Sets the rotation directly, in radians.
    pub fn set_rotate(&mut self, rotate: f64) {
        if self.transform.rotate == rotate {
            return;
        }
        self.transform.rotate = rotate;
        self.bump();
    }

    /// Sets the offset insets. Derived values change, so this bumps the
    /// revision.
    pub fn set_offset(&mut self, offset: Insets) {
        if self.offset == offset {
            return;
        }
        self.offset = offset;
        self.bump();
    }

    /// Sets the scale limits, normalized so that `min <= max`. The current
    /// scale is re-clamped into the new range.
    pub fn set_scale_limits(&mut self, min_scale: f64, max_scale: f64) {
        let (min_scale, max_scale) = if min_scale <= max_scale {
            (min_scale, max_scale)
        } else {
            (max_scale, min_scale)
        };
        self.min_scale = min_scale;
        self.max_scale = max_scale;
        self.set_scale(self.transform.scale);
    }

    // --- commands ---

    /// Sets `scale` and solves the translation that pins `canvas_anchor`
    /// (canvas-relative) to `wrapper_anchor` (wrapper-relative), ignoring
    /// any active gesture session.
    ///
    /// The solve treats the transform as scale-only; combine with
    /// [`Self::rotate_canvas`] for rotated layouts. No-op until measured.
    pub fn apply_transform(&mut self, scale: f64, wrapper_anchor: Point, canvas_anchor: Point) {
        let Some(proj) = self.projection() else {
            return;
        };
        let scale = scale.clamp(self.min_scale, self.max_scale);
        let translate = proj.projection_translate(scale, wrapper_anchor, canvas_anchor, Some(0.0));
        self.transform.scale = scale;
        self.transform.translate = translate;
        self.bump();
    }

    /// Rotates to `rotate` radians about `anchor_rel` (canvas-relative),
    /// keeping the anchor visually stationary.
    ///
    /// The translation is re-solved by comparing the anchor's composed
    /// position under the live transform with its position under a
    /// hypothetical transform of the target rotation and zero translation.
    pub fn rotate_canvas(&mut self, anchor_rel: Point, rotate: f64) {
        let Some(proj) = self.projection() else {
            return;
        };
        let hypothetical = proj.compose_rel_point(
            anchor_rel,
            TransformOverrides {
                translate: Some(Vec2::ZERO),
                rotate: Some(rotate),
                scale: None,
            },
        );
        let current = proj.compose_rel_point(anchor_rel, TransformOverrides::default());
        self.transform.translate = current - hypothetical;
        self.transform.rotate = rotate;
        self.bump();
    }

    /// Projects a canvas-absolute point into wrapper-local pixels under the
    /// live transform. `None` until measured.
    #[must_use]
    pub fn compose_point(&self, canvas_abs: Point) -> Option<Point> {
        Some(self.projection()?.compose_point(canvas_abs))
    }

    /// Converts client coordinates into canvas-absolute pixels. `None`
    /// until measured.
    #[must_use]
    pub fn normalize_client_coords(&self, client: Point) -> Option<Point> {
        Some(self.projection()?.canvas_abs_from_client(client))
    }

    /// Abandons any active gesture session (pointer cancel, focus loss).
    pub fn cancel_session(&mut self) {
        self.session = Session::Idle;
    }

    // --- pointer drag ---

    /// Primary-button press: starts a drag session.
    pub fn handle_pointer_down(&mut self, event: &PointerEvent) {
        if event.button != PointerButton::Primary {
            return;
        }
        self.session = Session::Drag {
            start: event.client,
            translate: self.transform.translate,
        };
    }

    /// Pointer move: pans 1:1 with the pointer while a drag is active.
    pub fn handle_pointer_move(&mut self, event: &PointerEvent) {
        let Session::Drag { start, translate } = &self.session else {
            return;
        };
        self.transform.translate = *translate + (event.client - *start);
        self.bump();
    }

    /// Pointer release: ends the drag session. No inertia is applied.
    pub fn handle_pointer_up(&mut self, _event: &PointerEvent) {
        if matches!(self.session, Session::Drag { .. }) {
            self.session = Session::Idle;
        }
    }

    // --- wheel ---

    /// Wheel input: zooms about the pointer with the zoom key held, pans
    /// otherwise.
    ///
    /// Mouse wheels get their classic notch magnitudes canceled first so a
    /// notch advances the gesture by a fixed speed factor rather than the
    /// raw hardware delta. Zooming scales by `-Δy/100` of the current scale
    /// (proportional steps), clamped into the limits, with the translation
    /// re-solved so the canvas point under the pointer stays put. Panning
    /// moves content opposite to the delta, matching natural scrolling.
    pub fn handle_wheel(&mut self, event: &WheelEvent) {
        let Some(proj) = self.projection() else {
            return;
        };
        let mut delta = wheel::pixel_delta(event);
        if wheel::classify(event) == WheelSource::Mouse {
            delta.x = cancel_notch_steps(delta.x, MOUSE_ZOOM_FACTOR);
            delta.y = cancel_notch_steps(delta.y, MOUSE_ZOOM_FACTOR);
        }
        if event.zoom_key {
            let current = self.transform.scale;
            let scale_delta = -delta.y / 100.0 * current;
            let new_scale = (current + scale_delta).clamp(self.min_scale, self.max_scale);
            let wrapper_rel = proj.relative_wrapper_from_client(event.client);
            let canvas_rel = proj.canvas_rel_from_client(event.client);
            let translate = proj.projection_translate(new_scale, wrapper_rel, canvas_rel, None);
            debug!(scale = new_scale, "wheel zoom");
            self.transform.translate = translate;
            self.transform.scale = new_scale;
        } else {
            self.transform.translate -= delta;
        }
        self.bump();
    }

    // --- touch ---

    /// Touch start: freezes per-finger snapshots and the current
    /// translation.
    pub fn handle_touch_start(&mut self, touches: &[TouchPoint]) {
        let Some(proj) = self.projection() else {
            return;
        };
        self.session = Session::Touch {
            starts: Self::freeze_touches(&proj, touches),
            translate: self.transform.translate,
        };
    }

    /// Touch move: two fingers pinch (scale + rotate about the first
    /// finger), one finger pans.
    pub fn handle_touch_move(&mut self, touches: &[TouchPoint]) {
        let Some(proj) = self.projection() else {
            return;
        };
        let (starts, start_translate) = match &self.session {
            Session::Touch { starts, translate } => (starts.clone(), *translate),
            _ => return,
        };
        if touches.is_empty() || starts.is_empty() {
            return;
        }
        if touches.len() >= 2 && starts.len() >= 2 {
            if !self.pinch(&proj, &starts, touches) {
                return;
            }
        } else {
            let delta = touches[0].client - starts[0].client;
            self.transform.translate = start_translate + delta;
        }
        self.bump();
    }

    /// Touch end: with fingers remaining, re-freezes the session from them
    /// (seamless continuation); with none, ends the session.
    pub fn handle_touch_end(&mut self, touches: &[TouchPoint]) {
        if touches.is_empty() {
            self.session = Session::Idle;
            return;
        }
        let Some(proj) = self.projection() else {
            return;
        };
        self.session = Session::Touch {
            starts: Self::freeze_touches(&proj, touches),
            translate: self.transform.translate,
        };
    }

    fn freeze_touches(proj: &Projection, touches: &[TouchPoint]) -> SmallVec<[TouchStart; 2]> {
        touches
            .iter()
            .map(|touch| TouchStart {
                client: touch.client,
                canvas_rel: proj.canvas_rel_from_client(touch.client),
            })
            .collect()
    }

    /// Two-finger pinch: scale from the finger-distance ratio, rotation
    /// from the finger-angle delta, both anchored at the first finger.
    ///
    /// Distances are compared in canvas-natural units: the frozen side from
    /// the fingers' canvas-relative positions scaled to the natural size,
    /// the current side from inner-wrapper positions divided by the natural
    /// scale. The committed rotation is the move's delta angle between the
    /// frozen finger axis and the current one; the frozen positions live in
    /// the already-rotated canvas frame, so any prior rotation rides along
    /// in the delta rather than being added explicitly.
    fn pinch(&mut self, proj: &Projection, starts: &[TouchStart], touches: &[TouchPoint]) -> bool {
        let first = proj.client_to_wrapper(touches[0].client);
        let second = proj.client_to_wrapper(touches[1].client);
        let canvas = proj.canvas.size();
        let first_start = Point::new(
            starts[0].canvas_rel.x * canvas.width,
            starts[0].canvas_rel.y * canvas.height,
        );
        let second_start = Point::new(
            starts[1].canvas_rel.x * canvas.width,
            starts[1].canvas_rel.y * canvas.height,
        );
        let start_distance = (second_start - first_start).hypot();
        if start_distance <= 0.0 {
            return false;
        }
        let natural = proj.natural_scale();
        let distance = (second - first).hypot() / natural;
        let future_scale = (distance / start_distance).clamp(self.min_scale, self.max_scale);

        let inner = proj.inner_size();
        let wrapper_rel = Point::new(first.x / inner.width, first.y / inner.height);
        let scale_translate =
            proj.projection_translate(future_scale, wrapper_rel, starts[0].canvas_rel, Some(0.0));

        let delta_angle = angle_between(first, second) - angle_between(first_start, second_start);

        // Project the canvas origin and the anchor under the new scale
        // (pre-rotation), then rotate the origin about the anchor; the
        // origin's displacement is the rotational share of the translation.
        let offset = self.offset;
        let scaled = natural * future_scale;
        let project = |rel: Point| {
            Point::new(
                offset.x0 + canvas.width * rel.x * scaled + scale_translate.x,
                offset.y0 + canvas.height * rel.y * scaled + scale_translate.y,
            )
        };
        let origin = project(Point::ZERO);
        let anchor = project(starts[0].canvas_rel);
        let rotation_translate = rotate_point(origin, anchor, delta_angle) - origin;

        debug!(scale = future_scale, rotate = delta_angle, "pinch");
        self.transform.scale = future_scale;
        self.transform.rotate = delta_angle;
        self.transform.translate = scale_translate + rotation_translate;
        true
    }

    // --- native rotate gesture ---

    /// Native gesture start: captures the rotation baseline.
    pub fn handle_gesture_start(&mut self, _event: &GestureEvent) {
        self.session = Session::Gesture {
            start_rotate: self.transform.rotate,
        };
    }

    /// Native gesture change: rotates about the gesture's focal point.
    ///
    /// Zero-rotation changes are ignored; platforms report `0` before real
    /// rotation begins, and re-anchoring on those would make the content
    /// jump.
    pub fn handle_gesture_change(&mut self, event: &GestureEvent) {
        let Session::Gesture { start_rotate } = &self.session else {
            return;
        };
        let start_rotate = *start_rotate;
        if event.rotation == 0.0 {
            return;
        }
        let Some(proj) = self.projection() else {
            return;
        };
        let anchor_rel = proj.canvas_rel_from_client(event.client);
        self.rotate_canvas(anchor_rel, start_rotate + degrees_to_radians(event.rotation));
    }

    /// Native gesture end: ends the session.
    pub fn handle_gesture_end(&mut self, _event: &GestureEvent) {
        if matches!(self.session, Session::Gesture { .. }) {
            self.session = Session::Idle;
        }
    }
}
