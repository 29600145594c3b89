use crate::math::{v, V3};
use crate::sdf::{Plane, SmoothUnion, Sphere};
use std::f64::consts::PI;

// Every motion term below uses an angular frequency that is an integer
// multiple of PI, so each one is periodic in the 2-second loop and frame 0
// continues seamlessly from frame 59.

/// Depth of the scene's center in front of the camera.
const SCENE_Z: f64 = 3.6;

const MAIN_RADIUS: f64 = 0.9;
const MAIN_BOB: f64 = 0.55;

const ORBIT_RADIUS: f64 = 1.7;
const ORBITER_RADIUS: f64 = 0.45;
const ORBITER_BOB: f64 = 0.45;

const FLOATER_RADIUS: f64 = 0.35;
const FLOATER_SWING: f64 = 0.9;
const FLOATER_DEPTH_SWING: f64 = 0.6;
const FLOATER_HEIGHT: f64 = 0.95;

const GROUND_OFFSET: f64 = -1.1;

// Blend radii per pairing, applied in accumulation order.
const K_ORBITERS: f64 = 0.5;
const K_FLOATER: f64 = 0.7;
const K_GROUND: f64 = 0.4;

fn orbiter(t: f64, phase: f64) -> Sphere {
    Sphere {
        center: v(
            ORBIT_RADIUS * (PI * t + phase).cos(),
            ORBITER_BOB * (2. * PI * t + phase).sin(),
            SCENE_Z + ORBIT_RADIUS * (PI * t + phase).sin(),
        ),
        radius: ORBITER_RADIUS,
    }
}

/// Scene for one instant of animation time: a pulsing center sphere, two
/// phase-opposed orbiters, a drifting floater, and the ground plane, all
/// smooth-blended in left-to-right accumulation order. Order matters:
/// each operand blends against the accumulated result of the ones before.
pub fn at(t: f64) -> SmoothUnion {
    let main = Sphere {
        center: v(0., MAIN_BOB * (PI * t).sin(), SCENE_Z),
        radius: MAIN_RADIUS,
    };
    let floater = Sphere {
        center: v(
            FLOATER_SWING * (2. * PI * t).sin(),
            FLOATER_HEIGHT,
            SCENE_Z + FLOATER_DEPTH_SWING * (2. * PI * t).cos(),
        ),
        radius: FLOATER_RADIUS,
    };
    let ground = Plane::new(v(0., 1., 0.), GROUND_OFFSET);

    let acc = SmoothUnion::new(Box::new(main), Box::new(orbiter(t, 0.)), K_ORBITERS);
    let acc = SmoothUnion::new(Box::new(acc), Box::new(orbiter(t, PI)), K_ORBITERS);
    let acc = SmoothUnion::new(Box::new(acc), Box::new(floater), K_FLOATER);
    SmoothUnion::new(Box::new(acc), Box::new(ground), K_GROUND)
}

/// Key and fill light positions, each on its own orbit.
pub fn lights_at(t: f64) -> [V3; 2] {
    [
        v(
            3.2 * (PI * t).cos(),
            3.5,
            SCENE_Z + 3.2 * (PI * t).sin(),
        ),
        v(
            2.4 * (2. * PI * t).cos(),
            1.8,
            SCENE_Z - 2.4 * (2. * PI * t).sin(),
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::dist;
    use crate::sdf::DistanceField;
    use float_cmp::approx_eq;

    #[test]
    fn scene_wraps_at_loop_boundary() {
        let start = at(0.);
        let wrapped = at(2.);
        let samples = [
            v(0., 0., SCENE_Z),
            v(1.5, 0.5, 2.8),
            v(-2., -1., 5.),
            v(0.2, 1.1, 3.),
        ];
        for p in samples {
            assert!(
                approx_eq!(f64, start.sdf(&p), wrapped.sdf(&p), epsilon = 1e-9),
                "scene not periodic at {p:?}"
            );
        }
    }

    #[test]
    fn lights_wrap_at_loop_boundary() {
        let l0 = lights_at(0.);
        let l1 = lights_at(2.);
        assert!(dist(&l0[0], &l1[0]) < 1e-9);
        assert!(dist(&l0[1], &l1[1]) < 1e-9);
    }

    #[test]
    fn ground_is_part_of_the_scene() {
        // Far from every sphere the blended field reduces to plane height.
        let field = at(0.3);
        let p = v(40., 0., 40.);
        assert!(approx_eq!(
            f64,
            field.sdf(&p),
            -GROUND_OFFSET,
            epsilon = 1e-6
        ));
    }

    #[test]
    fn orbiters_stay_phase_opposed() {
        for t in [0., 0.25, 0.8, 1.4] {
            let a = orbiter(t, 0.);
            let b = orbiter(t, PI);
            // Opposite sides of the center axis at every instant.
            assert!(approx_eq!(f64, a.center.x, -b.center.x, epsilon = 1e-9));
            assert!(approx_eq!(
                f64,
                a.center.z - SCENE_Z,
                -(b.center.z - SCENE_Z),
                epsilon = 1e-9
            ));
        }
    }
}
