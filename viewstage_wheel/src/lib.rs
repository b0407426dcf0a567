// Copyright 2025 the Viewstage Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Viewstage Wheel: trackpad/mouse classification and delta normalization.
//!
//! Wheel hardware is not self-describing: mice report coarse notched steps
//! (often ±120 or ±100 per notch, or ±3 in line units), trackpads report a
//! dense stream of small pixel deltas, and hosts disagree on units. This
//! crate reproduces the device heuristics the Viewstage viewport engine
//! relies on:
//!
//! - [`classify`] decides whether a [`WheelEvent`] came from a trackpad or a
//!   notched mouse wheel.
//! - [`pixel_delta`] converts line/page units into pixel-equivalents.
//! - [`normalize`] additionally smooths mouse notch steps into a range
//!   comparable with trackpad input.
//! - [`cancel_notch_steps`] divides classic notch magnitudes by the device
//!   step so that a zoom gesture advances by a speed factor per notch
//!   instead of by the raw hardware delta.
//!
//! The heuristics are brittle by nature, not by negligence; they encode
//! observed per-OS and per-device quirks. Unknown shapes fall back to the
//! mouse-wheel path rather than failing.
//!
//! ## Example
//!
//! ```
//! use kurbo::{Point, Vec2};
//! use viewstage_wheel::{WheelEvent, WheelSource, ScrollUnit, classify};
//!
//! // A dense sub-notch pixel stream while zooming: trackpad.
//! let mut event = WheelEvent::new(Point::ZERO, Vec2::new(0.0, -4.0), ScrollUnit::Pixel);
//! event.zoom_key = true;
//! assert_eq!(classify(&event), WheelSource::Trackpad);
//! ```

use kurbo::{Point, Vec2};

/// Known per-notch step magnitudes reported by common mouse wheels.
pub const MOUSE_NOTCH_STEPS: [f64; 2] = [120.0, 100.0];

/// Zoom speed factor applied per mouse notch by [`cancel_notch_steps`]
/// callers.
pub const MOUSE_ZOOM_FACTOR: f64 = 2.0;

/// Unit of a wheel event's raw deltas, mirroring the host's delta mode.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ScrollUnit {
    /// Deltas are pixels.
    #[default]
    Pixel,
    /// Deltas are text lines.
    Line,
    /// Deltas are pages.
    Page,
}

impl ScrollUnit {
    /// Pixel-equivalent multiplier for this unit.
    #[must_use]
    pub fn pixel_multiplier(self) -> f64 {
        match self {
            Self::Pixel => 1.0,
            Self::Line => 40.0,
            Self::Page => 800.0,
        }
    }
}

/// Raw wheel input as delivered by the host platform.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WheelEvent {
    /// Pointer position in client coordinates at the time of the event.
    pub client: Point,
    /// Raw scroll deltas in `unit` units.
    pub delta: Vec2,
    /// Unit of `delta`.
    pub unit: ScrollUnit,
    /// Legacy high-resolution wheel delta for the Y axis, when the host
    /// exposes one. On hosts that do, trackpads report exactly `-3 ×
    /// delta.y` here.
    pub legacy_wheel_delta_y: Option<f64>,
    /// Whether the zoom modifier key is held.
    pub zoom_key: bool,
}

impl WheelEvent {
    /// Creates a wheel event with no legacy delta field and the zoom key up.
    #[must_use]
    pub fn new(client: Point, delta: Vec2, unit: ScrollUnit) -> Self {
        Self {
            client,
            delta,
            unit,
            legacy_wheel_delta_y: None,
            zoom_key: false,
        }
    }
}

/// Classified origin of a wheel event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WheelSource {
    /// A notched mouse wheel (or an unrecognized device treated as one).
    Mouse,
    /// A trackpad or other high-resolution scroll surface.
    Trackpad,
}

/// Classifies a wheel event as trackpad or mouse input.
///
/// With the zoom key up, the legacy wheel field is authoritative when
/// present (trackpads report `-3 × delta.y` there); otherwise pixel-unit
/// deltas are assumed to come from a trackpad.
///
/// With the zoom key held, the host synthesizes pixel deltas for pinch
/// zoom and the legacy field is unreliable, so magnitude banding takes
/// over: the classic notch magnitudes 120, 100, and 3 read as mouse
/// steps, fractional deltas imply a high-resolution device, and small
/// pixel deltas read as trackpad.
#[must_use]
pub fn classify(event: &WheelEvent) -> WheelSource {
    let dy = event.delta.y;
    if event.zoom_key {
        let magnitude = dy.abs();
        if magnitude == 120.0 || magnitude == 100.0 || magnitude == 3.0 {
            return WheelSource::Mouse;
        }
        if dy.fract() != 0.0 {
            return WheelSource::Trackpad;
        }
        if event.unit == ScrollUnit::Pixel && magnitude < 50.0 {
            return WheelSource::Trackpad;
        }
        return WheelSource::Mouse;
    }
    match event.legacy_wheel_delta_y {
        Some(legacy) => {
            if legacy == dy * -3.0 {
                WheelSource::Trackpad
            } else {
                WheelSource::Mouse
            }
        }
        None => {
            if event.unit == ScrollUnit::Pixel {
                WheelSource::Trackpad
            } else {
                WheelSource::Mouse
            }
        }
    }
}

/// Converts an event's raw deltas into pixel-equivalents.
#[must_use]
pub fn pixel_delta(event: &WheelEvent) -> Vec2 {
    event.delta * event.unit.pixel_multiplier()
}

/// Normalizes an event's deltas into a consistent pixel-scale range.
///
/// Trackpad deltas pass through with only unit conversion. Mouse deltas are
/// additionally amplitude-corrected per axis to pull disparate OS and device
/// step sizes into a comparable band: small steps (|Δ| < 10) are amplified
/// ×5 and large steps (|Δ| > 30) are attenuated ×0.5.
#[must_use]
pub fn normalize(event: &WheelEvent) -> Vec2 {
    let delta = pixel_delta(event);
    match classify(event) {
        WheelSource::Trackpad => delta,
        WheelSource::Mouse => Vec2::new(correct_amplitude(delta.x), correct_amplitude(delta.y)),
    }
}

fn correct_amplitude(delta: f64) -> f64 {
    let magnitude = delta.abs();
    if magnitude < 10.0 {
        delta * 5.0
    } else if magnitude > 30.0 {
        delta * 0.5
    } else {
        delta
    }
}

/// Quotient of `n` against the first step in `steps` that divides it evenly.
///
/// Returns `1.0` when no step divides `n`. As with the magnitude banding in
/// [`classify`], this is a heuristic over the raw value; `n = 0` yields `0`.
#[must_use]
pub fn notch_quotient(n: f64, steps: &[f64]) -> f64 {
    for &step in steps {
        if n % step == 0.0 {
            return n / step;
        }
    }
    1.0
}

/// Cancels device notch scaling on classic mouse wheel magnitudes.
///
/// Deltas with |Δ| of exactly 120 or 200 are divided by
/// `(100 / zoom_factor) × notch_quotient(Δ, MOUSE_NOTCH_STEPS)` with the
/// sign re-applied, turning one hardware notch into a delta of
/// `±1.2 × zoom_factor` (or `±zoom_factor` for 200-step devices). All other
/// magnitudes pass through unchanged.
#[must_use]
pub fn cancel_notch_steps(delta: f64, zoom_factor: f64) -> f64 {
    let magnitude = delta.abs();
    if magnitude == 120.0 || magnitude == 200.0 {
        (delta / ((100.0 / zoom_factor) * notch_quotient(delta, &MOUSE_NOTCH_STEPS)))
            * delta.signum()
    } else {
        delta
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pixel_event(dy: f64) -> WheelEvent {
        WheelEvent::new(Point::ZERO, Vec2::new(0.0, dy), ScrollUnit::Pixel)
    }

    #[test]
    fn legacy_field_detects_trackpad() {
        let mut event = pixel_event(-40.0);
        event.unit = ScrollUnit::Line;
        event.legacy_wheel_delta_y = Some(120.0);
        assert_eq!(classify(&event), WheelSource::Trackpad);

        // Same field with a mouse-shaped value is not a trackpad.
        event.legacy_wheel_delta_y = Some(240.0);
        assert_eq!(classify(&event), WheelSource::Mouse);
    }

    #[test]
    fn pixel_unit_without_legacy_field_is_trackpad() {
        assert_eq!(classify(&pixel_event(-7.0)), WheelSource::Trackpad);

        let mut line = pixel_event(-3.0);
        line.unit = ScrollUnit::Line;
        assert_eq!(classify(&line), WheelSource::Mouse);
    }

    #[test]
    fn zoom_key_banding_reads_notch_magnitudes_as_mouse() {
        for dy in [120.0, -120.0, 100.0, -100.0, 3.0, -3.0] {
            let mut event = pixel_event(dy);
            event.zoom_key = true;
            assert_eq!(classify(&event), WheelSource::Mouse, "dy = {dy}");
        }
    }

    #[test]
    fn zoom_key_fractional_delta_is_trackpad() {
        let mut event = pixel_event(-52.5);
        event.zoom_key = true;
        assert_eq!(classify(&event), WheelSource::Trackpad);
    }

    #[test]
    fn zoom_key_small_pixel_delta_is_trackpad() {
        let mut event = pixel_event(-42.0);
        event.zoom_key = true;
        assert_eq!(classify(&event), WheelSource::Trackpad);

        // At or above the threshold the integer-delta fallback is mouse.
        let mut event = pixel_event(-64.0);
        event.zoom_key = true;
        assert_eq!(classify(&event), WheelSource::Mouse);
    }

    #[test]
    fn zoom_key_integer_line_delta_is_mouse() {
        let mut event = pixel_event(-6.0);
        event.unit = ScrollUnit::Line;
        event.zoom_key = true;
        assert_eq!(classify(&event), WheelSource::Mouse);
    }

    #[test]
    fn pixel_delta_applies_unit_multipliers() {
        let mut event = WheelEvent::new(Point::ZERO, Vec2::new(1.0, -3.0), ScrollUnit::Line);
        assert_eq!(pixel_delta(&event), Vec2::new(40.0, -120.0));
        event.unit = ScrollUnit::Page;
        assert_eq!(pixel_delta(&event), Vec2::new(800.0, -2400.0));
        event.unit = ScrollUnit::Pixel;
        assert_eq!(pixel_delta(&event), Vec2::new(1.0, -3.0));
    }

    #[test]
    fn normalize_passes_trackpad_through() {
        let event = pixel_event(-7.25);
        assert_eq!(normalize(&event), Vec2::new(0.0, -7.25));
    }

    #[test]
    fn normalize_amplifies_small_mouse_deltas() {
        let mut event = pixel_event(-4.0);
        event.legacy_wheel_delta_y = Some(480.0);
        assert_eq!(classify(&event), WheelSource::Mouse);
        assert_eq!(normalize(&event), Vec2::new(0.0, -20.0));
    }

    #[test]
    fn normalize_attenuates_large_mouse_deltas() {
        let mut event = pixel_event(-44.0);
        event.legacy_wheel_delta_y = Some(11.0);
        assert_eq!(normalize(&event), Vec2::new(0.0, -22.0));
    }

    #[test]
    fn normalize_keeps_mid_band_mouse_deltas() {
        let mut event = pixel_event(16.0);
        event.legacy_wheel_delta_y = Some(1.0);
        assert_eq!(normalize(&event), Vec2::new(0.0, 16.0));
    }

    #[test]
    fn notch_quotient_finds_first_even_step() {
        assert_eq!(notch_quotient(240.0, &MOUSE_NOTCH_STEPS), 2.0);
        assert_eq!(notch_quotient(200.0, &MOUSE_NOTCH_STEPS), 2.0);
        assert_eq!(notch_quotient(-120.0, &MOUSE_NOTCH_STEPS), -1.0);
        assert_eq!(notch_quotient(77.0, &MOUSE_NOTCH_STEPS), 1.0);
    }

    #[test]
    fn cancel_notch_steps_divides_classic_magnitudes() {
        assert!((cancel_notch_steps(120.0, MOUSE_ZOOM_FACTOR) - 2.4).abs() < 1e-12);
        assert!((cancel_notch_steps(-120.0, MOUSE_ZOOM_FACTOR) + 2.4).abs() < 1e-12);
        assert!((cancel_notch_steps(200.0, MOUSE_ZOOM_FACTOR) - 2.0).abs() < 1e-12);
        assert!((cancel_notch_steps(-200.0, MOUSE_ZOOM_FACTOR) + 2.0).abs() < 1e-12);
    }

    #[test]
    fn cancel_notch_steps_ignores_other_magnitudes() {
        assert_eq!(cancel_notch_steps(-100.0, MOUSE_ZOOM_FACTOR), -100.0);
        assert_eq!(cancel_notch_steps(36.0, MOUSE_ZOOM_FACTOR), 36.0);
        assert_eq!(cancel_notch_steps(0.0, MOUSE_ZOOM_FACTOR), 0.0);
    }
}
