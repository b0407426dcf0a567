// Copyright 2025 the Viewstage Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The viewport transform and its override/derived forms.

use kurbo::Vec2;

/// The live viewport transform.
///
/// Maps canvas-natural pixel space into wrapper pixel space as
/// `Rotate(rotate) · Scale(scale · natural_scale) · p + (translate +
/// offset_origin)`, where `natural_scale` and the offset origin come from
/// the measured bounds (see [`crate::Projection`]). Only the current value
/// is kept; there is no history.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    /// Translation in wrapper pixels, applied after scale and rotation.
    pub translate: Vec2,
    /// Uniform scale factor on top of the fit-to-wrapper natural scale.
    pub scale: f64,
    /// Rotation about the wrapper-inner origin, in radians.
    pub rotate: f64,
}

impl Transform {
    /// The identity transform: no translation, scale 1, no rotation.
    pub const IDENTITY: Self = Self {
        translate: Vec2::ZERO,
        scale: 1.0,
        rotate: 0.0,
    };

    /// Creates a transform from its components.
    #[must_use]
    pub fn new(translate: Vec2, scale: f64, rotate: f64) -> Self {
        Self {
            translate,
            scale,
            rotate,
        }
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Optional per-component overrides of a live [`Transform`].
///
/// Used for "what-if" projections: pinch and rotate math composes points
/// under hypothetical transforms without mutating live state. A `None`
/// component falls back to the live value.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TransformOverrides {
    /// Override for [`Transform::translate`].
    pub translate: Option<Vec2>,
    /// Override for [`Transform::scale`].
    pub scale: Option<f64>,
    /// Override for [`Transform::rotate`].
    pub rotate: Option<f64>,
}

impl TransformOverrides {
    /// Resolves the overrides against a live transform.
    #[must_use]
    pub fn resolve(self, live: Transform) -> Transform {
        Transform {
            translate: self.translate.unwrap_or(live.translate),
            scale: self.scale.unwrap_or(live.scale),
            rotate: self.rotate.unwrap_or(live.rotate),
        }
    }
}

/// The transform triple a renderer applies to the canvas surface.
///
/// This folds the offset origin and natural scale into the values a
/// rendering adapter needs verbatim (for CSS, a `translate(..) scale(..)
/// rotate(..)` chain with a top-left transform origin).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RenderTransform {
    /// Total translation: offset origin plus the live translate.
    pub translate: Vec2,
    /// Total scale: natural scale times the live scale.
    pub scale: f64,
    /// Rotation in radians.
    pub rotate: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_is_default() {
        assert_eq!(Transform::default(), Transform::IDENTITY);
        assert_eq!(Transform::IDENTITY.scale, 1.0);
        assert_eq!(Transform::IDENTITY.translate, Vec2::ZERO);
    }

    #[test]
    fn overrides_fall_back_to_live_values() {
        let live = Transform::new(Vec2::new(3.0, 4.0), 2.0, 0.5);
        let resolved = TransformOverrides::default().resolve(live);
        assert_eq!(resolved, live);
    }

    #[test]
    fn overrides_replace_only_named_components() {
        let live = Transform::new(Vec2::new(3.0, 4.0), 2.0, 0.5);
        let resolved = TransformOverrides {
            translate: Some(Vec2::ZERO),
            rotate: Some(1.25),
            ..Default::default()
        }
        .resolve(live);
        assert_eq!(resolved.translate, Vec2::ZERO);
        assert_eq!(resolved.scale, 2.0);
        assert_eq!(resolved.rotate, 1.25);
    }
}
