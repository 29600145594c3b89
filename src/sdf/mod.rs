use crate::math::{abs, dot, mix, sub, V3};

/// Below this blend radius a smooth union degenerates to a hard min.
const K_MIN: f64 = 1e-9;

/// Signed distance to an implicit surface: negative inside, zero on the
/// surface, positive outside. `Send + Sync` so a composed scene can be
/// evaluated from every render thread at once.
pub trait DistanceField: Send + Sync {
    fn sdf(&self, p: &V3) -> f64;
}

pub struct Sphere {
    pub center: V3,
    pub radius: f64,
}

pub struct Plane {
    normal: V3,
    offset: f64,
}

impl Plane {
    /// `normal` must be unit length; a scaled normal would scale every
    /// distance the plane reports and break the marcher's step guarantee.
    pub fn new(normal: V3, offset: f64) -> Self {
        assert!(
            (abs(&normal) - 1.0).abs() < 1e-9,
            "plane normal must be a unit vector"
        );
        Plane { normal, offset }
    }
}

impl DistanceField for Sphere {
    fn sdf(&self, p: &V3) -> f64 {
        abs(&sub(p, &self.center)) - self.radius
    }
}

impl DistanceField for Plane {
    fn sdf(&self, p: &V3) -> f64 {
        dot(p, &self.normal) - self.offset
    }
}

/// Polynomial smooth minimum of two distances with blend radius `k`.
pub fn smooth_union(d1: f64, d2: f64, k: f64) -> f64 {
    if k < K_MIN {
        return d1.min(d2);
    }
    let h = (0.5 + 0.5 * (d2 - d1) / k).clamp(0., 1.);
    mix(d2, d1, h) - k * h * (1. - h)
}

/// Two fields blended into one; chains of these build the whole scene.
pub struct SmoothUnion {
    a: Box<dyn DistanceField>,
    b: Box<dyn DistanceField>,
    k: f64,
}

impl SmoothUnion {
    pub fn new(a: Box<dyn DistanceField>, b: Box<dyn DistanceField>, k: f64) -> Self {
        SmoothUnion { a, b, k }
    }
}

impl DistanceField for SmoothUnion {
    fn sdf(&self, p: &V3) -> f64 {
        smooth_union(self.a.sdf(p), self.b.sdf(p), self.k)
    }
}
