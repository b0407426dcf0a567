// Copyright 2025 the Viewstage Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Input event payloads forwarded by host adapters.
//!
//! These are deliberately thin mirrors of the raw platform payloads: host
//! adapters own listener attachment and event plumbing, the engine only
//! needs coordinates, the pressed button, and per-touch point lists.
//! Wheel payloads live in [`viewstage_wheel`].

use kurbo::Point;

/// Which button a pointer event reports.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum PointerButton {
    /// The primary button (usually left). Only this button starts a drag.
    #[default]
    Primary,
    /// The auxiliary button (usually the wheel or middle button).
    Auxiliary,
    /// The secondary button (usually right).
    Secondary,
}

/// A pointer down/move/up event in client coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerEvent {
    /// Pointer position in client coordinates.
    pub client: Point,
    /// Button associated with the event.
    pub button: PointerButton,
}

impl PointerEvent {
    /// Creates a primary-button pointer event.
    #[must_use]
    pub fn primary(client: Point) -> Self {
        Self {
            client,
            button: PointerButton::Primary,
        }
    }
}

/// One active touch point, in client coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TouchPoint {
    /// Touch position in client coordinates.
    pub client: Point,
}

impl TouchPoint {
    /// Creates a touch point.
    #[must_use]
    pub fn new(client: Point) -> Self {
        Self { client }
    }
}

/// A platform rotate-gesture event (trackpad two-finger rotation on hosts
/// that synthesize it).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GestureEvent {
    /// Gesture focal point in client coordinates.
    pub client: Point,
    /// Accumulated rotation reported by the platform, in degrees.
    pub rotation: f64,
}

impl GestureEvent {
    /// Creates a gesture event.
    #[must_use]
    pub fn new(client: Point, rotation: f64) -> Self {
        Self { client, rotation }
    }
}
