use crate::math::{abs, add, mul, v, V3, B1, B2, B3};
use crate::sdf::DistanceField;

/// Surface hit threshold.
pub const EPS: f64 = 1e-3;
/// Rays that travel this far without a hit are background.
pub const MAX_DIST: f64 = 20.;
/// Step cap against grazing geometry where the SDF shrinks slowly.
pub const MAX_STEPS: u32 = 128;

/// Sphere-trace `field` from `origin` along unit-length `dir`. Returns the
/// travel distance to the surface, or `None` once travel exceeds
/// [`MAX_DIST`] or the step cap runs out. A miss is a background pixel,
/// not an error.
pub fn march(field: &dyn DistanceField, origin: &V3, dir: &V3) -> Option<f64> {
    assert!(
        (abs(dir) - 1.0).abs() < 1e-6,
        "march direction must be normalized"
    );
    let mut traveled = 0.;
    for _ in 0..MAX_STEPS {
        let p = add(origin, &mul(traveled, dir));
        let d = field.sdf(&p);
        if d < EPS {
            return Some(traveled);
        }
        // The SDF value never overshoots the nearest surface, so it is
        // always a safe step size.
        traveled += d;
        if traveled > MAX_DIST {
            return None;
        }
    }
    None
}

/// Outward surface normal at `p`, from the forward-difference gradient of
/// the distance field along each axis.
pub fn normal(field: &dyn DistanceField, p: &V3) -> V3 {
    let here = field.sdf(p);
    let dx = field.sdf(&add(p, &mul(EPS, &B1))) - here;
    let dy = field.sdf(&add(p, &mul(EPS, &B2))) - here;
    let dz = field.sdf(&add(p, &mul(EPS, &B3))) - here;
    crate::math::normalize(&v(dx, dy, dz))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::{dot, normalize, O};
    use crate::sdf::Sphere;
    use float_cmp::approx_eq;

    #[test]
    fn hit_distance_matches_analytic_sphere() {
        let s = Sphere {
            center: v(0., 0., 5.),
            radius: 1.,
        };
        let hit = march(&s, &O, &B3).expect("ray aimed at the sphere");
        // Front face is 4 units out; the marcher stops within EPS of it.
        assert!(approx_eq!(f64, hit, 4.0, epsilon = 2. * EPS));
    }

    #[test]
    fn miss_when_surface_is_beyond_max_travel() {
        let near = Sphere {
            center: v(0., 0., 15.),
            radius: 1.,
        };
        let far = Sphere {
            center: v(0., 0., 30.),
            radius: 1.,
        };
        assert!(march(&near, &O, &B3).is_some());
        assert!(march(&far, &O, &B3).is_none());
    }

    #[test]
    fn miss_when_ray_passes_outside() {
        let s = Sphere {
            center: v(0., 0., 5.),
            radius: 1.,
        };
        assert!(march(&s, &O, &B2).is_none());
        let grazing = normalize(&v(0., 3., 5.));
        assert!(march(&s, &O, &grazing).is_none());
    }

    #[test]
    #[should_panic(expected = "normalized")]
    fn march_rejects_unnormalized_direction() {
        let s = Sphere {
            center: v(0., 0., 5.),
            radius: 1.,
        };
        march(&s, &O, &v(0., 0., 2.));
    }

    #[test]
    fn normal_points_outward_on_sphere() {
        let s = Sphere {
            center: v(0., 0., 5.),
            radius: 1.,
        };
        for p in [v(0., 0., 4.), v(1., 0., 5.), v(0., -1., 5.)] {
            let n = normal(&s, &p);
            let outward = normalize(&(p - s.center));
            assert!(dot(&n, &outward) > 0.99, "normal off at {p:?}");
        }
    }
}
