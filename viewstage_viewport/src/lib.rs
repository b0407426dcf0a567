// Copyright 2025 the Viewstage Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Viewstage Viewport: an anchor-preserving pan/zoom/rotate viewport engine.
//!
//! This crate is the headless core of an interactive 2D viewport: a "canvas"
//! of natural size is displayed inside a "wrapper" region, and a single
//! uniform transform (translate, scale, rotate) positions the canvas within
//! the wrapper. The engine consumes raw input events (wheel, pointer drag,
//! one- and two-finger touch, platform rotate gestures) and updates the
//! transform so that the point under the user's fingers stays visually
//! stationary while they zoom, pan, or rotate.
//!
//! It does **not** own any DOM, windowing, or rendering backend. Callers are
//! expected to:
//! - Measure the wrapper and canvas elements and feed the rects into
//!   [`Viewport::set_wrapper_bounds`] / [`Viewport::set_canvas_measurement`].
//! - Forward native input events into the `handle_*` methods.
//! - Poll [`Viewport::revision`] (or diff [`Viewport::render_transform`])
//!   and apply the resulting transform to their rendering surface.
//!
//! ## Coordinate spaces
//!
//! Four spaces appear throughout the API:
//!
//! - **client**: the host's pointer coordinate space (the space wrapper
//!   bounds are measured in).
//! - **wrapper-inner**: pixels relative to the wrapper's inner area, the
//!   wrapper rect shrunk by the configured [`kurbo::Insets`] offset.
//! - **canvas-relative**: 0..1 coordinates across the untransformed canvas.
//! - **canvas-absolute**: pixels in the canvas's natural size.
//!
//! [`Projection`] is an immutable snapshot that converts between all four;
//! the [`Viewport`] owns the live state and hands out snapshots once both
//! bounds have been measured.
//!
//! ## Minimal example
//!
//! ```
//! use kurbo::{Point, Rect, Vec2};
//! use viewstage_viewport::{ScrollUnit, Viewport, ViewportConfig, WheelEvent};
//!
//! let mut view = Viewport::new(ViewportConfig::default()).unwrap();
//!
//! // Measurement arrives asynchronously; the engine is inert until then.
//! view.set_wrapper_bounds(Rect::new(0.0, 0.0, 800.0, 600.0));
//! view.set_canvas_bounds(Rect::new(0.0, 0.0, 400.0, 300.0));
//! assert!(view.is_initialized());
//!
//! // Center the canvas at 1:1 scale.
//! view.apply_transform(1.0, Point::new(0.5, 0.5), Point::new(0.5, 0.5));
//! assert_eq!(view.translate(), Vec2::ZERO);
//!
//! // Zoom-modified wheel: scale doubles, anchored under the pointer.
//! let mut event = WheelEvent::new(
//!     Point::new(400.0, 300.0),
//!     Vec2::new(0.0, -100.0),
//!     ScrollUnit::Pixel,
//! );
//! event.zoom_key = true;
//! view.handle_wheel(&event);
//! assert!((view.scale() - 2.0).abs() < 1e-9);
//! ```
//!
//! ## Interaction model
//!
//! Exactly one gesture session is active at a time (drag, touch, or native
//! rotate gesture). Handlers are synchronous and infallible: a move event
//! with no matching session, or any event before measurement, is a silent
//! no-op. There is no inertia and no event queue; each handler call fully
//! consumes and produces the current transform.

mod events;
mod log;
mod projection;
mod transform;
mod viewport;

pub use events::{GestureEvent, PointerButton, PointerEvent, TouchPoint};
pub use projection::Projection;
pub use transform::{RenderTransform, Transform, TransformOverrides};
pub use viewport::{ConfigError, Viewport, ViewportConfig};

// Wheel input types are part of this crate's handler surface.
pub use viewstage_wheel::{ScrollUnit, WheelEvent, WheelSource};
