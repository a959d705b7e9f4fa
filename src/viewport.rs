//! Pan/zoom viewport controller.
//!
//! Owns the live transform applied to the root component group. Every input
//! (drag, wheel, pinch, programmatic zoom) goes through one update path that
//! clamps the scale, constrains the translation and notifies listeners.

use log::trace;

use crate::config::RenderConfig;
use crate::geometry::{Point, Transform};

/// Callback invoked with the new transform after every change.
pub type ZoomListener = Box<dyn FnMut(&Transform)>;

/// Exponent applied per wheel delta unit (`k' = k * 2^(-delta * WHEEL_DELTA)`).
pub const WHEEL_DELTA: f64 = 0.002;

pub struct Viewport {
    transform: Transform,
    width: f64,
    height: f64,
    scale_extent: (f64, f64),
    translate_extent: Option<[[f64; 2]; 2]>,
    listeners: Vec<ZoomListener>,
}

impl Viewport {
    pub fn new(config: &RenderConfig) -> Self {
        Self {
            transform: Transform::IDENTITY,
            width: config.width,
            height: config.height,
            scale_extent: config.scale_extent,
            translate_extent: config.translate_extent,
            listeners: Vec::new(),
        }
    }

    pub fn transform(&self) -> Transform {
        self.transform
    }

    pub fn size(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    pub fn centre(&self) -> Point {
        Point::new(self.width / 2.0, self.height / 2.0)
    }

    /// Register a callback for every subsequent transform change.
    pub fn on_zoom(&mut self, listener: impl FnMut(&Transform) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    // ── Inputs ────────────────────────────────────────────────────────────

    pub fn drag(&mut self, dx: f64, dy: f64) {
        let t = self.transform.translate_by(dx, dy);
        self.update(t);
    }

    /// Wheel zoom anchored at `pointer` (screen coordinates).
    pub fn wheel(&mut self, delta: f64, pointer: Point) {
        let k = self.transform.k * 2f64.powf(-delta * WHEEL_DELTA);
        self.zoom_to(k, pointer);
    }

    /// Two-finger pinch: scale by `factor` about `centre`.
    pub fn pinch(&mut self, factor: f64, centre: Point) {
        let k = self.transform.k * factor;
        self.zoom_to(k, centre);
    }

    /// Zoom to scale `k` keeping the diagram point under `anchor` fixed.
    pub fn zoom_to(&mut self, k: f64, anchor: Point) {
        let t = self.transform.scale_about(self.clamp_scale(k), anchor);
        self.update(t);
    }

    pub fn set_transform(&mut self, t: Transform) {
        let t = Transform::new(t.x, t.y, self.clamp_scale(t.k));
        self.update(t);
    }

    pub fn reset(&mut self) {
        self.update(Transform::IDENTITY);
    }

    /// Re-send the current transform to every listener.
    pub fn notify(&mut self) {
        let t = self.transform;
        for listener in &mut self.listeners {
            listener(&t);
        }
    }

    // ── Internals ─────────────────────────────────────────────────────────

    fn clamp_scale(&self, k: f64) -> f64 {
        k.clamp(self.scale_extent.0, self.scale_extent.1)
    }

    fn update(&mut self, t: Transform) {
        self.transform = self.constrain(t);
        trace!("viewport transform -> {}", self.transform);
        self.notify();
    }

    /// Keep the translate extent covering the viewport; when the extent is
    /// smaller than the viewport on an axis, centre it on that axis.
    fn constrain(&self, t: Transform) -> Transform {
        let Some([[x0, y0], [x1, y1]]) = self.translate_extent else {
            return t;
        };
        let dx0 = (0.0 - t.x) / t.k - x0;
        let dx1 = (self.width - t.x) / t.k - x1;
        let dy0 = (0.0 - t.y) / t.k - y0;
        let dy1 = (self.height - t.y) / t.k - y1;
        let shift = |d0: f64, d1: f64| {
            if d1 > d0 {
                (d0 + d1) / 2.0
            } else if d0.min(0.0) != 0.0 {
                d0.min(0.0)
            } else {
                d1.max(0.0)
            }
        };
        let (sx, sy) = (shift(dx0, dx1), shift(dy0, dy1));
        t.translate_by(t.k * sx, t.k * sy)
    }
}

#[cfg(test)]
#[path = "../tests/rust/test_viewport.rs"]
mod tests;
