// Copyright 2025 the Viewstage Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pure coordinate mapping over a measured viewport snapshot.

use kurbo::{Insets, Point, Rect, Size, Vec2};
use viewstage_geometry::rotate_point;

use crate::transform::{RenderTransform, Transform, TransformOverrides};

/// An immutable snapshot of measured bounds plus the live transform.
///
/// All conversions between the client, wrapper-inner, canvas-relative, and
/// canvas-absolute spaces are pure functions of this snapshot; nothing is
/// cached, so a snapshot can never go stale against the values it was built
/// from. Obtain one from [`crate::Viewport::projection`], or construct one
/// directly for what-if math.
///
/// Composed points ([`Self::compose_rel_point`], [`Self::compose_point`])
/// are expressed in wrapper-local pixels (origin at the wrapper rect's
/// top-left corner, offset included), the frame a renderer positions the
/// canvas in.
///
/// The wrapper-inner area and the canvas must both have positive size;
/// conversions divide by them.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Projection {
    /// Padding between the wrapper rect and its inner area.
    pub offset: Insets,
    /// Measured wrapper rect, in client coordinates.
    pub wrapper: Rect,
    /// Canvas rect at its untransformed natural size.
    pub canvas: Rect,
    /// The transform this snapshot was taken under.
    pub transform: Transform,
}

impl Projection {
    /// The wrapper's inner area: the wrapper rect shrunk by the offset.
    #[must_use]
    pub fn wrapper_inner(&self) -> Rect {
        Rect::new(
            self.wrapper.x0 + self.offset.x0,
            self.wrapper.y0 + self.offset.y0,
            self.wrapper.x1 - self.offset.x1,
            self.wrapper.y1 - self.offset.y1,
        )
    }

    /// Client-space origin of the wrapper's inner area.
    #[must_use]
    pub fn inner_origin(&self) -> Point {
        self.wrapper_inner().origin()
    }

    /// Size of the wrapper's inner area.
    #[must_use]
    pub fn inner_size(&self) -> Size {
        self.wrapper_inner().size()
    }

    /// Aspect ratio of the wrapper's inner area.
    #[must_use]
    pub fn wrapper_inner_ratio(&self) -> f64 {
        let size = self.inner_size();
        size.width / size.height
    }

    /// Aspect ratio of the canvas at natural size.
    #[must_use]
    pub fn canvas_natural_ratio(&self) -> f64 {
        self.canvas.width() / self.canvas.height()
    }

    /// The scale that fits the canvas into the inner area, preserving
    /// aspect ratio.
    ///
    /// Width-fit when the canvas is relatively wider than the inner area,
    /// height-fit otherwise; equal ratios resolve to the width branch.
    #[must_use]
    pub fn natural_scale(&self) -> f64 {
        if self.canvas_natural_ratio() >= self.wrapper_inner_ratio() {
            self.inner_size().width / self.canvas.width()
        } else {
            self.inner_size().height / self.canvas.height()
        }
    }

    /// The total scale applied to the canvas: `natural_scale × scale`.
    #[must_use]
    pub fn rendering_scale(&self) -> f64 {
        self.natural_scale() * self.transform.scale
    }

    /// The full transform triple a renderer applies to the canvas.
    #[must_use]
    pub fn render_transform(&self) -> RenderTransform {
        RenderTransform {
            translate: Vec2::new(self.offset.x0, self.offset.y0) + self.transform.translate,
            scale: self.rendering_scale(),
            rotate: self.transform.rotate,
        }
    }

    /// Converts client coordinates to wrapper-inner pixels.
    #[must_use]
    pub fn client_to_wrapper(&self, client: Point) -> Point {
        (client - self.inner_origin()).to_point()
    }

    /// Converts wrapper-inner pixels to 0..1 wrapper-relative coordinates.
    #[must_use]
    pub fn wrapper_to_relative(&self, point: Point) -> Point {
        let size = self.inner_size();
        Point::new(point.x / size.width, point.y / size.height)
    }

    /// Converts client coordinates to 0..1 wrapper-relative coordinates.
    #[must_use]
    pub fn relative_wrapper_from_client(&self, client: Point) -> Point {
        self.wrapper_to_relative(self.client_to_wrapper(client))
    }

    /// Converts wrapper-inner pixels to 0..1 canvas-relative coordinates,
    /// inverting the full transform.
    #[must_use]
    pub fn canvas_rel_from_wrapper(&self, point: Point) -> Point {
        let untranslated = point - self.transform.translate;
        let unrotated = rotate_point(untranslated, Point::ZERO, -self.transform.rotate);
        let scale = self.rendering_scale();
        Point::new(
            unrotated.x / scale / self.canvas.width(),
            unrotated.y / scale / self.canvas.height(),
        )
    }

    /// Converts client coordinates to 0..1 canvas-relative coordinates.
    #[must_use]
    pub fn canvas_rel_from_client(&self, client: Point) -> Point {
        self.canvas_rel_from_wrapper(self.client_to_wrapper(client))
    }

    /// Converts client coordinates to canvas-absolute pixels.
    #[must_use]
    pub fn canvas_abs_from_client(&self, client: Point) -> Point {
        let rel = self.canvas_rel_from_client(client);
        Point::new(rel.x * self.canvas.width(), rel.y * self.canvas.height())
    }

    /// Projects a 0..1 canvas-relative point into wrapper-local pixels.
    ///
    /// The forward transform: scale about the offset origin by
    /// `scale × natural_scale`, rotate about the offset origin, then
    /// translate. `overrides` substitutes hypothetical transform components
    /// without touching live state.
    #[must_use]
    pub fn compose_rel_point(&self, rel: Point, overrides: TransformOverrides) -> Point {
        let t = overrides.resolve(self.transform);
        let anchor = Point::new(self.offset.x0, self.offset.y0);
        let scale = t.scale * self.natural_scale();
        let scaled = Point::new(
            anchor.x + self.canvas.width() * scale * rel.x,
            anchor.y + self.canvas.height() * scale * rel.y,
        );
        rotate_point(scaled, anchor, t.rotate) + t.translate
    }

    /// Projects a canvas-absolute point into wrapper-local pixels under the
    /// live transform.
    #[must_use]
    pub fn compose_point(&self, canvas_abs: Point) -> Point {
        let rel = Point::new(
            canvas_abs.x / self.canvas.width(),
            canvas_abs.y / self.canvas.height(),
        );
        self.compose_rel_point(rel, TransformOverrides::default())
    }

    /// Solves the translate that pins a canvas anchor to a wrapper target
    /// under a hypothetical scale.
    ///
    /// Projects `canvas_rel` under `new_scale` (and `rotate`, defaulting to
    /// the live rotation) without any translation, and returns the delta
    /// that places it exactly at `wrapper_rel` in inner pixels. Every
    /// "zoom toward a point" operation reduces to this.
    #[must_use]
    pub fn projection_translate(
        &self,
        new_scale: f64,
        wrapper_rel: Point,
        canvas_rel: Point,
        rotate: Option<f64>,
    ) -> Vec2 {
        let natural = self.natural_scale();
        let projected = Point::new(
            canvas_rel.x * self.canvas.width() * natural * new_scale,
            canvas_rel.y * self.canvas.height() * natural * new_scale,
        );
        let rotated = rotate_point(
            projected,
            Point::ZERO,
            rotate.unwrap_or(self.transform.rotate),
        );
        let size = self.inner_size();
        Vec2::new(
            wrapper_rel.x * size.width - rotated.x,
            wrapper_rel.y * size.height - rotated.y,
        )
    }

    /// Displacement of a composed anchor from its centered projection under
    /// an arbitrary transform triple.
    ///
    /// Adapters deriving declarative offsets from an imperative transform
    /// use this to measure how far a transform has moved `anchor` away from
    /// its scale-only position.
    #[must_use]
    pub fn anchor_offset(&self, scale: f64, translate: Vec2, rotate: f64, anchor: Point) -> Vec2 {
        let centered = self.projection_translate(scale, anchor, anchor, Some(0.0));
        let k = scale * self.natural_scale();
        let normal = Point::new(
            self.offset.x0 + centered.x + self.canvas.width() * k * anchor.x,
            self.offset.y0 + centered.y + self.canvas.height() * k * anchor.y,
        );
        let composed = self.compose_rel_point(
            anchor,
            TransformOverrides {
                translate: Some(translate),
                scale: Some(scale),
                rotate: Some(rotate),
            },
        );
        composed - normal
    }
}
