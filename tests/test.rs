use std::fs;
use std::path::Path;

use glam::Vec3;
use robj::test_scenes::{self, RandomSceneParams};
use robj::{
    DecodeError, DecodeMode, EncodeError, Light, Plane, Record, Scene, SectionKind, Sphere, decode,
    decode_with, encode,
};

fn sphere(i: usize) -> Sphere {
    Sphere::new(
        Vec3::new(i as f32, -(i as f32), 0.5 * i as f32),
        1.0 + i as f32,
        Vec3::splat(i as f32 / 255.0),
    )
    .with_reflection(0.25)
}

fn plane(i: usize) -> Plane {
    Plane::new(Vec3::new(0.0, i as f32, 0.0), Vec3::Y, Vec3::X * i as f32)
}

fn light(i: usize) -> Light {
    Light::new(Vec3::new(0.0, 10.0, i as f32), Vec3::ONE, i as f32)
}

fn spheres(n: usize) -> Vec<Sphere> {
    (0..n).map(sphere).collect()
}

fn planes(n: usize) -> Vec<Plane> {
    (0..n).map(plane).collect()
}

fn lights(n: usize) -> Vec<Light> {
    (0..n).map(light).collect()
}

fn round_trip(scene: &Scene, path: &Path) -> Scene {
    scene.save(path).unwrap();
    decode_with(path, DecodeMode::Strict).unwrap().into_scene()
}

#[test]
fn round_trip_identity() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("scene.robj");

    let scene = Scene::new(spheres(3), planes(2), lights(4));
    assert_eq!(round_trip(&scene, &path), scene);

    // Each collection on its own.
    for scene in [
        Scene::new(spheres(5), vec![], vec![]),
        Scene::new(vec![], planes(5), vec![]),
        Scene::new(vec![], vec![], lights(5)),
    ] {
        assert_eq!(round_trip(&scene, &path), scene);
    }
}

#[test]
fn round_trip_built_in_scenes() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("scene.robj");

    let random = test_scenes::random_scene(RandomSceneParams {
        spheres: 200,
        planes: 10,
        lights: 30,
        seed: 7,
    });
    for scene in [
        test_scenes::spheres_scene(),
        test_scenes::room_scene(),
        random,
    ] {
        assert_eq!(round_trip(&scene, &path), scene);
    }
}

#[test]
fn count_fidelity() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("counts.robj");

    for n in [0, 1, 255] {
        encode(&path, &spheres(n), &planes(n), &lights(n)).unwrap();
        let decoded = decode(&path).unwrap();

        assert_eq!(decoded.spheres.declared, Some(n as u8));
        assert_eq!(decoded.spheres.len(), n);
        assert_eq!(decoded.planes.len(), n);
        assert_eq!(decoded.lights.len(), n);
        assert!(!decoded.is_truncated());
    }
}

#[test]
fn file_layout() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("layout.robj");

    encode(&path, &spheres(2), &planes(1), &lights(3)).unwrap();
    let bytes = fs::read(&path).unwrap();

    assert_eq!(
        bytes.len(),
        3 + 2 * Sphere::SIZE + Plane::SIZE + 3 * Light::SIZE
    );
    assert_eq!(bytes[0], 2);
    assert_eq!(bytes[1 + 2 * Sphere::SIZE], 1);
    assert_eq!(bytes[2 + 2 * Sphere::SIZE + Plane::SIZE], 3);
}

#[test]
fn order_is_preserved() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("order.robj");

    let a = Sphere::new(Vec3::splat(1.0), 1.0, Vec3::X);
    let b = Sphere::new(Vec3::splat(2.0), 2.0, Vec3::Y);
    let c = Sphere::new(Vec3::splat(3.0), 3.0, Vec3::Z);
    let lights = [light(30), light(10), light(20)];

    encode(&path, &[a, b, c], &[], &lights).unwrap();
    let decoded = decode(&path).unwrap();

    assert_eq!(decoded.spheres.records, vec![a, b, c]);
    assert_eq!(decoded.lights.records, lights.to_vec());
}

#[test]
fn kinds_are_independent() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("independent.robj");

    let planes = planes(4);
    let lights = lights(2);
    for n in [0, 1, 17, 255] {
        encode(&path, &spheres(n), &planes, &lights).unwrap();
        let decoded = decode(&path).unwrap();
        assert_eq!(decoded.planes.records, planes);
        assert_eq!(decoded.lights.records, lights);
    }

    let spheres = spheres(3);
    for n in [0, 9, 255] {
        encode(&path, &spheres, &self::planes(n), &[]).unwrap();
        let decoded = decode(&path).unwrap();
        assert_eq!(decoded.spheres.records, spheres);
        assert!(decoded.lights.is_empty());
    }
}

#[test]
fn encode_overwrites_existing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("overwrite.robj");

    encode(&path, &spheres(100), &planes(100), &lights(100)).unwrap();
    encode(&path, &spheres(1), &[], &[]).unwrap();

    let bytes = fs::read(&path).unwrap();
    assert_eq!(bytes.len(), 3 + Sphere::SIZE);
    assert_eq!(
        decode_with(&path, DecodeMode::Strict)
            .unwrap()
            .spheres
            .records,
        spheres(1)
    );
}

#[test]
fn encode_open_failure() {
    let dir = tempfile::tempdir().unwrap();

    // Parent directory does not exist.
    let missing_parent = dir.path().join("no_such_dir").join("scene.robj");
    let result = encode(&missing_parent, &spheres(1), &[], &[]);
    assert!(matches!(result, Err(EncodeError::Open { .. })));

    // Destination is a directory.
    let result = encode(dir.path(), &spheres(1), &[], &[]);
    assert!(matches!(result, Err(EncodeError::Open { .. })));
}

#[test]
fn decode_open_failure() {
    let dir = tempfile::tempdir().unwrap();
    let result = decode(dir.path().join("missing.robj"));
    match result {
        Err(DecodeError::Open { path, .. }) => assert!(path.ends_with("missing.robj")),
        other => panic!("expected open failure, got {other:?}"),
    }
}

#[test]
fn too_many_records_leaves_destination_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("existing.robj");
    fs::write(&path, b"keep").unwrap();

    let result = encode(&path, &[], &[], &lights(256));
    assert!(matches!(
        result,
        Err(EncodeError::TooManyRecords {
            kind: SectionKind::Light,
            count: 256
        })
    ));
    assert_eq!(fs::read(&path).unwrap(), b"keep");

    let fresh = dir.path().join("fresh.robj");
    assert!(encode(&fresh, &spheres(300), &[], &[]).is_err());
    assert!(!fresh.exists());
}

/// Sphere section claiming 5 records but holding only 2 before EOF.
fn write_short_sphere_section(path: &Path) {
    let mut full = Vec::new();
    robj::encode_to(&mut full, &spheres(5), &planes(1), &lights(1)).unwrap();
    fs::write(path, &full[..1 + 2 * Sphere::SIZE]).unwrap();
}

#[test]
fn short_section_is_tolerated() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("short.robj");
    write_short_sphere_section(&path);

    let decoded = decode(&path).unwrap();

    // The declared count is reported as read, records are what was there.
    assert_eq!(decoded.spheres.declared, Some(5));
    assert_eq!(decoded.spheres.records, spheres(2));
    assert!(decoded.spheres.is_short());

    // Decoding carried on into the following sections and hit EOF.
    assert_eq!(decoded.planes.declared, None);
    assert!(decoded.planes.is_empty());
    assert_eq!(decoded.lights.declared, None);
    assert!(decoded.lights.is_empty());
    assert!(decoded.is_truncated());

    assert_eq!(Scene::load(&path).unwrap().spheres, spheres(2));
}

#[test]
fn short_section_is_rejected_when_strict() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("short.robj");
    write_short_sphere_section(&path);

    let result = decode_with(&path, DecodeMode::Strict);
    assert!(matches!(
        result,
        Err(DecodeError::ShortSection {
            kind: SectionKind::Sphere,
            declared: 5,
            decoded: 2
        })
    ));
}

#[test]
fn short_final_section() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("short_lights.robj");

    let mut full = Vec::new();
    robj::encode_to(&mut full, &spheres(2), &planes(2), &lights(4)).unwrap();
    full.truncate(full.len() - Light::SIZE - 3);
    fs::write(&path, &full).unwrap();

    let decoded = decode(&path).unwrap();
    assert_eq!(decoded.spheres.records, spheres(2));
    assert_eq!(decoded.planes.records, planes(2));
    assert_eq!(decoded.lights.declared, Some(4));
    assert_eq!(decoded.lights.records, lights(2));
}

#[test]
fn truncated_file_shifts_sections() {
    // A count byte one too high makes the sphere section swallow the plane
    // and light count bytes plus the padding; the last two padding bytes are
    // then read as the plane and light counts. Nothing detects this.
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("shifted.robj");

    let mut bytes = Vec::new();
    robj::encode_to(&mut bytes, &spheres(1), &[], &[]).unwrap();
    bytes[0] = 2;
    bytes.extend(std::iter::repeat_n(0u8, Sphere::SIZE));
    fs::write(&path, &bytes).unwrap();

    let decoded = decode(&path).unwrap();
    assert_eq!(decoded.spheres.declared, Some(2));
    assert_eq!(decoded.spheres.len(), 2);
    assert_eq!(decoded.spheres.records[0], sphere(0));
    assert_eq!(decoded.planes.declared, Some(0));
    assert_eq!(decoded.lights.declared, Some(0));
    assert!(!decoded.is_truncated());
}
