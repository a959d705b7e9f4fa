//! Geometry primitives: points, pan/zoom transforms, SVG path data.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;

// ─── Point ───────────────────────────────────────────────────────────────────

/// Point in diagram space (SVG user units).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn offset(self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

// ─── Size / Rect ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Axis-aligned rectangle (used for hit testing).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl Rect {
    pub fn new(origin: Point, size: Size) -> Self {
        Self {
            x: origin.x,
            y: origin.y,
            w: size.width,
            h: size.height,
        }
    }

    pub fn contains_point(&self, p: Point) -> bool {
        p.x >= self.x && p.x <= self.x + self.w && p.y >= self.y && p.y <= self.y + self.h
    }
}

// ─── Transform ───────────────────────────────────────────────────────────────

/// Uniform pan/zoom transform: `p' = k * p + (x, y)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub x: f64,
    pub y: f64,
    pub k: f64,
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    pub const IDENTITY: Transform = Transform {
        x: 0.0,
        y: 0.0,
        k: 1.0,
    };

    pub fn new(x: f64, y: f64, k: f64) -> Self {
        Self { x, y, k }
    }

    pub fn translation(x: f64, y: f64) -> Self {
        Self { x, y, k: 1.0 }
    }

    pub fn apply(&self, p: Point) -> Point {
        Point::new(p.x * self.k + self.x, p.y * self.k + self.y)
    }

    pub fn invert(&self, p: Point) -> Point {
        Point::new((p.x - self.x) / self.k, (p.y - self.y) / self.k)
    }

    pub fn translate_by(&self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy, self.k)
    }

    /// Rescale to `k` while keeping the diagram point under `anchor` fixed.
    pub fn scale_about(&self, k: f64, anchor: Point) -> Self {
        let world = self.invert(anchor);
        Self::new(anchor.x - world.x * k, anchor.y - world.y * k, k)
    }

    /// SVG attribute form, e.g. `translate(10 20) scale(2)`.
    pub fn to_svg(&self) -> String {
        if self.k == 1.0 {
            format!("translate({} {})", fmt_num(self.x), fmt_num(self.y))
        } else {
            format!(
                "translate({} {}) scale({})",
                fmt_num(self.x),
                fmt_num(self.y),
                fmt_num(self.k)
            )
        }
    }

    /// Extract translation and scale from an SVG transform attribute.
    ///
    /// Missing parts default to the identity. Accepts comma or space
    /// separated arguments; a single-argument `translate(x)` means `y = 0`.
    pub fn parse(attr: &str) -> Self {
        static TRANSLATE: OnceLock<Regex> = OnceLock::new();
        static SCALE: OnceLock<Regex> = OnceLock::new();
        let translate = TRANSLATE.get_or_init(|| {
            Regex::new(r"translate\(\s*(-?[\d.eE+-]+)(?:[\s,]+(-?[\d.eE+-]+))?\s*\)")
                .expect("translate pattern is valid")
        });
        let scale = SCALE.get_or_init(|| {
            Regex::new(r"scale\(\s*(-?[\d.eE+-]+)").expect("scale pattern is valid")
        });

        let mut t = Transform::IDENTITY;
        if let Some(caps) = translate.captures(attr) {
            t.x = caps.get(1).and_then(|m| m.as_str().parse().ok()).unwrap_or(0.0);
            t.y = caps.get(2).and_then(|m| m.as_str().parse().ok()).unwrap_or(0.0);
        }
        if let Some(caps) = scale.captures(attr) {
            t.k = caps.get(1).and_then(|m| m.as_str().parse().ok()).unwrap_or(1.0);
        }
        t
    }
}

impl fmt::Display for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_svg())
    }
}

// ─── Path data ───────────────────────────────────────────────────────────────

/// Format a coordinate without trailing zeros (`12`, `12.5`, `-0.25`).
pub fn fmt_num(v: f64) -> String {
    let rounded = (v * 1000.0).round() / 1000.0;
    if rounded == 0.0 {
        return "0".to_string();
    }
    let s = format!("{rounded:.3}");
    s.trim_end_matches('0').trim_end_matches('.').to_string()
}

/// Build SVG path data (`M x y L x y …`) from a point sequence.
pub fn path_data(points: &[Point]) -> String {
    points
        .iter()
        .enumerate()
        .map(|(i, p)| {
            let cmd = if i == 0 { "M" } else { "L" };
            format!("{cmd} {} {}", fmt_num(p.x), fmt_num(p.y))
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
#[path = "../tests/rust/test_geometry.rs"]
mod tests;
