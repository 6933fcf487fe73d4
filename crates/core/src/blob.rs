//! Deterministic organic-shape geometry.
//!
//! Builds a smooth closed contour from a string seed. Shape ids are used as
//! seeds, so independent re-renders of the same shape produce byte-identical
//! geometry instead of jittering between frames. The internal PRNG is the
//! mulberry32 mix construction, chosen for its tiny state and exact
//! reproducibility across platforms.

use serde::{Deserialize, Serialize};

/// A 2D point in canvas pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// One cubic Bézier segment of a closed contour.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurveSegment {
    pub c1: Point,
    pub c2: Point,
    pub end: Point,
}

/// A closed smooth contour: a start point plus cubic segments that wrap back
/// to the start.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClosedCurve {
    pub start: Point,
    pub segments: Vec<CurveSegment>,
}

impl ClosedCurve {
    /// Renders the contour as SVG path data (`M … C … Z`).
    ///
    /// The renderer consumes this string opaquely.
    pub fn to_svg_path(&self) -> String {
        let mut d = format!("M {} {}", self.start.x, self.start.y);
        for seg in &self.segments {
            d.push_str(&format!(
                " C {} {} {} {} {} {}",
                seg.c1.x, seg.c1.y, seg.c2.x, seg.c2.y, seg.end.x, seg.end.y
            ));
        }
        d.push_str(" Z");
        d
    }
}

/// Mulberry32: a 32-bit multiply-xor-shift mix PRNG.
///
/// Distinct from the engine-facing `RandomSource` on purpose: blob geometry
/// must be reproducible from a shape id alone, independent of whatever
/// random source drove generation.
struct Mulberry32 {
    state: u32,
}

impl Mulberry32 {
    fn new(seed: u32) -> Self {
        Self { state: seed }
    }

    fn next(&mut self) -> f64 {
        self.state = self.state.wrapping_add(0x6D2B_79F5);
        let mut t = self.state;
        t = (t ^ (t >> 15)).wrapping_mul(t | 1);
        t ^= t.wrapping_add((t ^ (t >> 7)).wrapping_mul(t | 61));
        f64::from(t ^ (t >> 14)) / 4_294_967_296.0
    }
}

/// Hashes a seed string by summing UTF-16 code units modulo a large prime.
fn hash_seed(seed: &str) -> u32 {
    let mut acc: u32 = 0;
    for unit in seed.encode_utf16() {
        acc = (acc + u32::from(unit)) % 2_147_483_647;
    }
    acc
}

/// Builds a closed blob contour inside a `width` × `height` box.
///
/// `complexity` is the vertex count (clamped to ≥ 3); `contrast` ∈ [0, 1]
/// (clamped) controls radius variance: each vertex radius is
/// `min(w,h)/2 · (1 − contrast + contrast·rand())`, so at least
/// `(1 − contrast)` of the nominal radius is always kept. Same seed and
/// complexity produce byte-identical output.
///
/// `contrast` near 1 can collapse vertices toward the center and produce
/// spiky or self-intersecting contours; that is an accepted artifact.
pub fn build(width: f64, height: f64, seed: &str, complexity: u32, contrast: f64) -> ClosedCurve {
    let complexity = complexity.max(3) as usize;
    let contrast = contrast.clamp(0.0, 1.0);

    let mut rng = Mulberry32::new(hash_seed(seed));

    let size = width.min(height) / 2.0;
    let center_x = width / 2.0;
    let center_y = height / 2.0;
    let angle_step = 360.0 / complexity as f64;

    let mut points = Vec::with_capacity(complexity);
    for i in 0..complexity {
        let angle = (i as f64 * angle_step).to_radians();
        let radius_variance = rng.next() * contrast;
        let r = size * (1.0 - contrast + radius_variance);
        points.push(Point {
            x: center_x + angle.cos() * r,
            y: center_y + angle.sin() * r,
        });
    }

    // Catmull-Rom to Bézier with wrap-around neighbors, so the start/end
    // join has no tangent discontinuity.
    let n = points.len();
    let mut segments = Vec::with_capacity(n);
    for i in 0..n {
        let p0 = points[if i == 0 { n - 1 } else { i - 1 }];
        let p1 = points[i];
        let p2 = points[(i + 1) % n];
        let p3 = points[(i + 2) % n];

        segments.push(CurveSegment {
            c1: Point {
                x: p1.x + (p2.x - p0.x) / 6.0,
                y: p1.y + (p2.y - p0.y) / 6.0,
            },
            c2: Point {
                x: p2.x - (p3.x - p1.x) / 6.0,
                y: p2.y - (p3.y - p1.y) / 6.0,
            },
            end: p2,
        });
    }

    ClosedCurve {
        start: points[0],
        segments,
    }
}
