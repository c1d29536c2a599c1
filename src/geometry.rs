//! Small plane-geometry helpers shared by every entity.

use rand::Rng;

/// Euclidean distance between two points.
pub fn distance(x1: f32, y1: f32, x2: f32, y2: f32) -> f32 {
    ((x2 - x1).powi(2) + (y2 - y1).powi(2)).sqrt()
}

/// Heading in radians from `(x1, y1)` towards `(x2, y2)`.
pub fn angle_to(x1: f32, y1: f32, x2: f32, y2: f32) -> f32 {
    (y2 - y1).atan2(x2 - x1)
}

/// Two circles overlap iff their centres are closer than the sum of radii.
pub fn circles_overlap(x1: f32, y1: f32, r1: f32, x2: f32, y2: f32, r2: f32) -> bool {
    distance(x1, y1, x2, y2) < r1 + r2
}

/// Uniform draw from `[min, max)`. Returns `min` for an empty range.
pub fn random_range(rng: &mut impl Rng, min: f32, max: f32) -> f32 {
    if max <= min {
        return min;
    }
    rng.gen_range(min..max)
}
