//! Loads OBJ and MTL files from disk the way the application does at startup

use std::fs;
use std::path::Path;

use glam::Vec3;
use heart_pulse::actor::Actor;
use heart_pulse::error::HeartError;
use heart_pulse::mesh::{load_model, model_bounds, DEFAULT_COLOR};

const TETRA: &str = "\
mtllib heart.mtl
o heart
v 0 0 0
v 2 0 0
v 0 2 0
v 0 0 2
usemtl muscle
f 1 3 2
f 1 2 4
usemtl vessel
f 1 4 3
f 2 3 4
";

const MATERIALS: &str = "\
newmtl muscle
Kd 0.6 0.1 0.1
newmtl vessel
Kd 0.1 0.1 0.6
d 0.8
";

fn write(dir: &Path, name: &str, contents: &str) {
    fs::write(dir.join(name), contents).unwrap();
}

#[test]
fn test_loads_groups_with_materials() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "heart.obj", TETRA);
    write(dir.path(), "heart.mtl", MATERIALS);

    let meshes = load_model(&dir.path().join("heart.obj"), None).unwrap();
    assert_eq!(meshes.len(), 2);
    assert_eq!(meshes[0].material.as_deref(), Some("muscle"));
    assert_eq!(meshes[0].color, [0.6, 0.1, 0.1, 1.0]);
    assert_eq!(meshes[1].color, [0.1, 0.1, 0.6, 0.8]);
    assert_eq!(meshes.iter().map(|mesh| mesh.triangle_count()).sum::<usize>(), 4);
    for mesh in &meshes {
        for vertex in &mesh.vertices {
            assert!((Vec3::from(vertex.normal).length() - 1.0).abs() < 1e-5);
        }
    }

    let bounds = model_bounds(&meshes).unwrap();
    assert_eq!(bounds.center(), Vec3::splat(1.0));
    let actors = Actor::centered(meshes, &bounds, 10.0);
    let origin = actors[0].model_matrix().transform_point3(Vec3::splat(1.0));
    assert!(origin.length() < 1e-5);
}

#[test]
fn test_material_override() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "heart.obj", TETRA);
    write(dir.path(), "other.mtl", "newmtl muscle\nKd 0 1 0\n");

    let other = dir.path().join("other.mtl");
    let meshes = load_model(&dir.path().join("heart.obj"), Some(&other)).unwrap();
    assert_eq!(meshes[0].color, [0.0, 1.0, 0.0, 1.0]);
    assert_eq!(meshes[1].color, DEFAULT_COLOR);
}

#[test]
fn test_missing_material_library_uses_default_colors() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "heart.obj", TETRA);

    let meshes = load_model(&dir.path().join("heart.obj"), None).unwrap();
    assert!(meshes.iter().all(|mesh| mesh.color == DEFAULT_COLOR));
}

#[test]
fn test_missing_model_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    match load_model(&dir.path().join("absent.obj"), None) {
        Err(HeartError::Io { path, .. }) => assert!(path.ends_with("absent.obj")),
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn test_model_without_faces_has_no_actors() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "points.obj", "v 0 0 0\nv 1 1 1\n");
    assert!(matches!(
        load_model(&dir.path().join("points.obj"), None),
        Err(HeartError::NoActors { .. })
    ));
}
