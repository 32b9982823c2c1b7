use core::f32;

use glam::Vec3;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::codec::MAX_SECTION_RECORDS;
use crate::scene::{Light, Plane, Scene, Sphere};

/// Names accepted by [`by_name`].
pub const SCENE_NAMES: [&str; 2] = ["spheres", "room"];

pub fn by_name(name: &str) -> Option<Scene> {
    match name {
        "spheres" => Some(spheres_scene()),
        "room" => Some(room_scene()),
        _ => None,
    }
}

/// Three spheres in a row standing on a ground plane, lit from above.
pub fn spheres_scene() -> Scene {
    let sphere_left = Sphere::new(Vec3::new(-1.0, 0.0, -1.0), 0.5, Vec3::new(1.0, 1.0, 1.0))
        .with_reflection(0.9);
    let sphere_center = Sphere::new(Vec3::new(0.0, 0.0, -1.0), 0.5, Vec3::new(0.1, 0.2, 0.5));
    let sphere_right = Sphere::new(Vec3::new(1.0, 0.0, -1.0), 0.5, Vec3::new(0.8, 0.6, 0.2))
        .with_reflection(0.5);

    let ground = Plane::new(Vec3::new(0.0, -0.5, 0.0), Vec3::Y, Vec3::new(0.05, 0.05, 0.05));

    let sun = Light::new(Vec3::new(0.0, 6.0, 5.0), Vec3::new(1.0, 0.95, 0.9), 1.0);

    Scene::new(
        vec![sphere_left, sphere_center, sphere_right],
        vec![ground],
        vec![sun],
    )
}

/// A closed box made of six planes with a couple of spheres and two lights.
pub fn room_scene() -> Scene {
    let wall = Vec3::new(0.73, 0.73, 0.73);
    let planes = vec![
        Plane::new(Vec3::new(0.0, -2.0, 0.0), Vec3::Y, wall),
        Plane::new(Vec3::new(0.0, 2.0, 0.0), Vec3::NEG_Y, wall),
        Plane::new(Vec3::new(-2.0, 0.0, 0.0), Vec3::X, Vec3::new(0.65, 0.05, 0.05)),
        Plane::new(Vec3::new(2.0, 0.0, 0.0), Vec3::NEG_X, Vec3::new(0.12, 0.45, 0.15)),
        Plane::new(Vec3::new(0.0, 0.0, -2.0), Vec3::Z, wall),
        Plane::new(Vec3::new(0.0, 0.0, 6.0), Vec3::NEG_Z, wall).with_reflection(0.2),
    ];

    let spheres = vec![
        Sphere::new(Vec3::new(-0.8, -1.4, -0.6), 0.6, Vec3::ONE).with_reflection(0.8),
        Sphere::new(Vec3::new(0.9, -1.5, 0.4), 0.5, Vec3::new(0.9, 0.4, 0.1)),
    ];

    let lights = vec![
        Light::new(Vec3::new(0.0, 1.9, 0.0), Vec3::ONE, 1.5),
        Light::new(Vec3::new(0.0, 0.0, 5.0), Vec3::new(0.6, 0.6, 1.0), 0.3),
    ];

    Scene::new(spheres, planes, lights)
}

/// Section sizes for [`random_scene`].
#[derive(Debug, Clone, Copy)]
pub struct RandomSceneParams {
    pub spheres: usize,
    pub planes: usize,
    pub lights: usize,
    pub seed: u64,
}

impl Default for RandomSceneParams {
    fn default() -> Self {
        Self {
            spheres: 16,
            planes: 1,
            lights: 2,
            seed: 0,
        }
    }
}

/// Deterministic random scene. Sizes are clamped to what a section can hold.
pub fn random_scene(params: RandomSceneParams) -> Scene {
    let mut rng = StdRng::seed_from_u64(params.seed);

    let random_color = |rng: &mut StdRng| {
        Vec3::new(
            rng.random_range(0f32..=1f32),
            rng.random_range(0f32..=1f32),
            rng.random_range(0f32..=1f32),
        )
    };

    // Spheres on a circle around the origin
    let sphere_count = params.spheres.min(MAX_SECTION_RECORDS);
    let mut spheres = Vec::with_capacity(sphere_count);
    for i in 0..sphere_count {
        let ang = (i as f32) * f32::consts::PI * 2.0 / (sphere_count as f32);
        let distance = rng.random_range(2.0..6.0);
        let radius = rng.random_range(0.2..0.8);
        let color = random_color(&mut rng);
        spheres.push(
            Sphere::new(
                Vec3::new(distance * ang.sin(), radius - 0.5, distance * ang.cos()),
                radius,
                color,
            )
            .with_reflection(rng.random_range(0.0..1.0)),
        );
    }

    let plane_count = params.planes.min(MAX_SECTION_RECORDS);
    let mut planes = Vec::with_capacity(plane_count);
    for i in 0..plane_count {
        // First plane is always the ground
        let normal = if i == 0 {
            Vec3::Y
        } else {
            random_unit_vector(&mut rng)
        };
        let color = random_color(&mut rng);
        planes.push(Plane::new(-normal * (0.5 + i as f32 * 10.0), normal, color));
    }

    let light_count = params.lights.min(MAX_SECTION_RECORDS);
    let mut lights = Vec::with_capacity(light_count);
    for _ in 0..light_count {
        let position = Vec3::new(
            rng.random_range(-10.0..10.0),
            rng.random_range(2.0..10.0),
            rng.random_range(-10.0..10.0),
        );
        let color = random_color(&mut rng);
        lights.push(Light::new(position, color, rng.random_range(0.1..2.0)));
    }

    Scene::new(spheres, planes, lights)
}

fn random_unit_vector(rng: &mut impl Rng) -> Vec3 {
    let polar = rng.random_range(0.0..f32::consts::PI);
    let azimuth = rng.random_range(0.0..(2.0 * f32::consts::PI));
    Vec3::new(
        polar.sin() * azimuth.cos(),
        polar.cos(),
        polar.sin() * azimuth.sin(),
    )
}
