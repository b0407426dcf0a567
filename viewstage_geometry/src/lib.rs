// Copyright 2025 the Viewstage Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Viewstage Geometry: small, stateless geometry helpers.
//!
//! This crate collects the pure math used by the Viewstage viewport engine:
//! angle conversion, 2D rotation about a pivot, direction vectors,
//! fixed-decimal rounding, and recovery of an untransformed rectangle from a
//! measured translate-rotate-scale result.
//!
//! All functions are side-effect free and operate on [`kurbo`] types.
//!
//! ## Conventions
//!
//! - Angles are radians unless a function name says otherwise.
//! - Positive angles rotate counter-clockwise in the standard math
//!   convention. Callers working in a Y-down screen space own the sign
//!   convention; the formulas do not change.
//!
//! ## Minimal example
//!
//! ```
//! use kurbo::Point;
//! use viewstage_geometry::rotate_point;
//!
//! // Quarter turn about the origin.
//! let p = rotate_point(
//!     Point::new(1.0, 0.0),
//!     Point::ZERO,
//!     core::f64::consts::FRAC_PI_2,
//! );
//! assert!((p.x - 0.0).abs() < 1e-12);
//! assert!((p.y - 1.0).abs() < 1e-12);
//! ```

use kurbo::{Point, Rect, Vec2};

/// Decimal precision applied to [`untransformed_rect`] outputs.
///
/// Repeated measurement callbacks observe the same rectangle through float
/// transforms; rounding suppresses sub-pixel jitter between observations.
const RECT_DECIMALS: i32 = 4;

/// Converts degrees to radians.
#[must_use]
pub fn degrees_to_radians(degrees: f64) -> f64 {
    degrees * core::f64::consts::PI / 180.0
}

/// Converts radians to degrees.
#[must_use]
pub fn radians_to_degrees(radians: f64) -> f64 {
    radians * 180.0 / core::f64::consts::PI
}

/// Rotates `point` about `center` by `angle` radians.
#[must_use]
pub fn rotate_point(point: Point, center: Point, angle: f64) -> Point {
    let (sin, cos) = angle.sin_cos();
    let dx = point.x - center.x;
    let dy = point.y - center.y;
    Point::new(
        cos * dx - sin * dy + center.x,
        sin * dx + cos * dy + center.y,
    )
}

/// Returns the angle of the segment from `p1` to `p2`, via `atan2`.
#[must_use]
pub fn angle_between(p1: Point, p2: Point) -> f64 {
    (p2.y - p1.y).atan2(p2.x - p1.x)
}

/// Returns the unit direction vector for `angle`.
#[must_use]
pub fn unit_vector(angle: f64) -> Vec2 {
    let (sin, cos) = angle.sin_cos();
    Vec2::new(cos, sin)
}

/// Rotates a vector by `angle` radians about the origin.
#[must_use]
pub fn rotate_vector(v: Vec2, angle: f64) -> Vec2 {
    let (sin, cos) = angle.sin_cos();
    Vec2::new(v.x * cos - v.y * sin, v.x * sin + v.y * cos)
}

/// Walks `distance` along `direction` from `start`.
#[must_use]
pub fn move_along(start: Point, direction: Vec2, distance: f64) -> Point {
    start + direction * distance
}

/// Rounds `value` to `decimals` decimal places.
#[must_use]
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10.0_f64.powi(decimals);
    (value * factor).round() / factor
}

/// Recovers the untransformed rectangle behind a measured
/// translate → rotate → scale result.
///
/// `rect` is the measured rectangle produced by translating an unknown
/// axis-aligned natural rectangle by `translate`, rotating it by `rotate`,
/// and scaling it by `scale`. The inverse is applied in reverse order: the
/// translation is subtracted, the origin is rotated by `-rotate` about
/// (0, 0), and origin and size are divided by `scale`. Width and height are
/// not rotated; the result is only meaningful for inputs produced by a pure
/// translate-rotate-scale with no other distortion.
///
/// Outputs are rounded to four decimals so that repeated observations of the
/// same box through float transforms agree exactly.
#[must_use]
pub fn untransformed_rect(rect: Rect, translate: Vec2, scale: f64, rotate: f64) -> Rect {
    let origin = rotate_point(
        Point::new(rect.x0 - translate.x, rect.y0 - translate.y),
        Point::ZERO,
        -rotate,
    );
    let x = round_to(origin.x / scale, RECT_DECIMALS);
    let y = round_to(origin.y / scale, RECT_DECIMALS);
    let width = round_to(rect.width() / scale, RECT_DECIMALS);
    let height = round_to(rect.height() / scale, RECT_DECIMALS);
    Rect::new(x, y, x + width, y + height)
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::f64::consts::{FRAC_PI_2, PI};

    fn assert_close(a: f64, b: f64) {
        assert!((a - b).abs() < 1e-9, "{a} != {b}");
    }

    #[test]
    fn degree_radian_conversion_round_trips() {
        assert_close(degrees_to_radians(180.0), PI);
        assert_close(radians_to_degrees(PI), 180.0);
        assert_close(radians_to_degrees(degrees_to_radians(37.5)), 37.5);
    }

    #[test]
    fn rotate_point_quarter_turn_about_origin() {
        let p = rotate_point(Point::new(2.0, 0.0), Point::ZERO, FRAC_PI_2);
        assert_close(p.x, 0.0);
        assert_close(p.y, 2.0);
    }

    #[test]
    fn rotate_point_about_offset_center() {
        // Half turn about (1, 1) maps (2, 1) onto (0, 1).
        let p = rotate_point(Point::new(2.0, 1.0), Point::new(1.0, 1.0), PI);
        assert_close(p.x, 0.0);
        assert_close(p.y, 1.0);
    }

    #[test]
    fn rotate_point_zero_angle_is_identity() {
        let p = rotate_point(Point::new(3.25, -7.5), Point::new(1.0, 2.0), 0.0);
        assert_close(p.x, 3.25);
        assert_close(p.y, -7.5);
    }

    #[test]
    fn angle_between_follows_atan2() {
        assert_close(angle_between(Point::ZERO, Point::new(1.0, 0.0)), 0.0);
        assert_close(angle_between(Point::ZERO, Point::new(0.0, 1.0)), FRAC_PI_2);
        assert_close(
            angle_between(Point::new(1.0, 1.0), Point::new(0.0, 1.0)),
            PI,
        );
    }

    #[test]
    fn unit_vector_matches_angle() {
        let v = unit_vector(FRAC_PI_2);
        assert_close(v.x, 0.0);
        assert_close(v.y, 1.0);
        assert_close(unit_vector(0.0).x, 1.0);
    }

    #[test]
    fn rotate_vector_agrees_with_rotate_point_about_origin() {
        let v = Vec2::new(3.0, -2.0);
        let angle = 0.7;
        let rotated = rotate_vector(v, angle);
        let reference = rotate_point(v.to_point(), Point::ZERO, angle);
        assert_close(rotated.x, reference.x);
        assert_close(rotated.y, reference.y);
    }

    #[test]
    fn move_along_scales_direction() {
        let p = move_along(Point::new(1.0, 1.0), Vec2::new(0.0, 1.0), 2.5);
        assert_close(p.x, 1.0);
        assert_close(p.y, 3.5);
    }

    #[test]
    fn round_to_fixed_decimals() {
        assert_close(round_to(1.23456, 2), 1.23);
        assert_close(round_to(1.235, 2), 1.24);
        assert_close(round_to(-1.23456, 3), -1.235);
        assert_close(round_to(42.0, 4), 42.0);
    }

    /// Applies translate → rotate → scale to an axis-aligned rect the way a
    /// layout engine would report it: the origin goes through the full
    /// transform, width/height only through the scale.
    fn transform_rect(rect: Rect, translate: Vec2, scale: f64, rotate: f64) -> Rect {
        let origin = rotate_point((rect.origin().to_vec2() * scale).to_point(), Point::ZERO, rotate);
        let x = origin.x + translate.x;
        let y = origin.y + translate.y;
        Rect::new(x, y, x + rect.width() * scale, y + rect.height() * scale)
    }

    #[test]
    fn untransformed_rect_inverts_translate_rotate_scale() {
        let natural = Rect::new(10.0, 20.0, 410.0, 320.0);
        for &(tx, ty, scale, rotate) in &[
            (0.0, 0.0, 1.0, 0.0),
            (35.0, -12.0, 2.0, 0.0),
            (100.0, 50.0, 0.5, 0.3),
            (-7.25, 3.5, 1.75, -1.2),
        ] {
            let translate = Vec2::new(tx, ty);
            let measured = transform_rect(natural, translate, scale, rotate);
            let recovered = untransformed_rect(measured, translate, scale, rotate);
            assert!((recovered.x0 - natural.x0).abs() < 1e-3, "x0 for {rotate}");
            assert!((recovered.y0 - natural.y0).abs() < 1e-3, "y0 for {rotate}");
            assert!(
                (recovered.width() - natural.width()).abs() < 1e-3,
                "width for {scale}"
            );
            assert!(
                (recovered.height() - natural.height()).abs() < 1e-3,
                "height for {scale}"
            );
        }
    }

    #[test]
    fn untransformed_rect_rounds_jitter_away() {
        // Two observations of the same box differing by float noise below the
        // rounding precision must agree exactly.
        let translate = Vec2::new(12.0, 34.0);
        let a = untransformed_rect(
            Rect::new(112.000004, 134.000004, 912.000004, 734.000004),
            translate,
            2.0,
            0.0,
        );
        let b = untransformed_rect(
            Rect::new(111.999996, 133.999996, 911.999996, 733.999996),
            translate,
            2.0,
            0.0,
        );
        assert_eq!(a, b);
    }
}
