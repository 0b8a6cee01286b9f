use glam::{Vec2, Vec3};

use planetsculpt::export::{
    export_instances_raw, export_mesh_obj, export_ramp_png, expected_file_size, RampOptions,
};
use planetsculpt::mesh::{cube_sphere, icosahedron, icosphere};
use planetsculpt::sculpt::erosion::sigmoid;
use planetsculpt::sculpt::placement_chance;
use planetsculpt::{
    ChaChaRandom, ConstantRandom, EditableMesh, IndexedMesh, PlanetConfig, PlanetSculptor, SequenceRandom,
};

#[test]
fn icosahedron_single_iteration_with_constant_source() {
    let config = PlanetConfig {
        iterations: 1,
        ..Default::default()
    };
    let source = icosahedron();
    assert_eq!(source.vertex_count(), 12);
    assert_eq!(source.face_count(), 20);

    let sculptor = PlanetSculptor::new(source.clone(), config.clone()).unwrap();
    let planet = sculptor.make_planet(&mut ConstantRandom::new(0.5));

    // d = (0, 0, 0) after the zero-length fallback, so s = sigmoid(0) - 0.5 = 0
    // for every vertex regardless of its normal.
    let s = sigmoid(0.0) - 0.5;
    assert_eq!(s, 0.0);
    for j in 0..source.vertex_count() {
        let expected = source.position(j) + source.normal(j) * s * config.displacement_step;
        assert_eq!(planet.mesh.position(j), expected);
    }
    assert_eq!(planet.stats.erosion.zero_directions, 1);
}

#[test]
fn sculpted_planet_invariants() {
    let config = PlanetConfig::default();
    let sculptor = PlanetSculptor::new(icosphere(4), config.clone()).unwrap();
    let planet = sculptor.make_planet(&mut ChaChaRandom::from_seed(2024));
    let mesh = &planet.mesh;

    // Per-iteration displacement is at most one step on unit normals.
    assert!(planet.stats.erosion.max_step <= config.displacement_step);
    let max_drift = config.displacement_step * config.iterations as f32;
    let (min_r, max_r) = planet.stats.radius_range;
    assert!(min_r >= 1.0 - max_drift && max_r <= 1.0 + max_drift);
    assert!(max_r > min_r);

    // UVs are the unclamped elevation ramp.
    for (p, uv) in mesh.positions().iter().zip(mesh.uvs()) {
        let expected = (p.length() - config.sea_level) / (config.mountain_level - config.sea_level);
        assert!((uv.x - expected).abs() < 1e-4);
        assert_eq!(uv.y, 0.0);
    }

    // Flat normals: unit length and no NaN.
    for n in mesh.normals() {
        assert!(!n.is_nan());
        assert!((n.length() - 1.0).abs() < 1e-4);
    }

    // Vegetation stays above the beach and stands on the vertex normal.
    for t in &planet.placements {
        let dist = t.position.length();
        assert!(dist > config.beach_level);
        let vertex = mesh
            .positions()
            .iter()
            .position(|p| *p == t.position)
            .expect("instance must sit on a vertex");
        assert!((t.up() - mesh.normal(vertex)).length() < 1e-5);
        let (lo, hi) = config.instance_scale_range();
        assert!(t.scale >= lo && t.scale < hi);
    }
}

#[test]
fn peak_vertex_is_always_accepted() {
    let config = PlanetConfig {
        iterations: 0,
        ..Default::default()
    };
    // Single vertex sitting exactly on the vegetation level.
    let source = IndexedMesh::new(
        vec![Vec3::Y * config.vegetation_level],
        vec![Vec3::Y],
        Vec::new(),
    )
    .unwrap();
    assert_eq!(placement_chance(config.vegetation_level, &config), 1.0);

    let sculptor = PlanetSculptor::new(source, config).unwrap();
    let planet = sculptor.make_planet(&mut SequenceRandom::new(vec![0.999999]));
    assert_eq!(planet.placements.len(), 1);
    let up = planet.placements[0].up();
    assert!(!up.is_nan());
    assert!((up - Vec3::Y).length() < 1e-6);
}

#[test]
fn empty_mesh_produces_empty_output() {
    let sculptor = PlanetSculptor::new(IndexedMesh::empty(), PlanetConfig::default()).unwrap();
    let planet = sculptor.make_planet(&mut ChaChaRandom::from_seed(1));
    assert!(planet.mesh.is_empty());
    assert!(planet.placements.is_empty());
    assert_eq!(planet.instance_batch(()).instance_count(), 0);
}

#[test]
fn cube_sphere_seams_stay_closed() {
    let sculptor = PlanetSculptor::new(cube_sphere(8), PlanetConfig::preview()).unwrap();
    let planet = sculptor.make_planet(&mut ChaChaRandom::from_seed(77));
    let source = sculptor.source();

    // Vertices that start coincident across face seams end coincident.
    let positions = source.positions();
    for i in 0..positions.len() {
        for j in (i + 1)..positions.len() {
            if (positions[i] - positions[j]).length() < 1e-6 && source.normal(i) == source.normal(j) {
                let a = planet.mesh.position(i);
                let b = planet.mesh.position(j);
                assert!((a - b).length() < 1e-5, "seam opened between {} and {}", i, j);
            }
        }
    }
}

#[test]
fn export_writes_all_files() {
    let dir = tempfile::tempdir().unwrap();
    let config = PlanetConfig::preview();
    let sculptor = PlanetSculptor::new(icosphere(3), config.clone()).unwrap();
    let planet = sculptor.make_planet(&mut ChaChaRandom::from_seed(5));

    let obj = dir.path().join("planet.obj");
    export_mesh_obj(&planet.mesh, &obj).unwrap();
    let text = std::fs::read_to_string(&obj).unwrap();
    assert_eq!(text.lines().filter(|l| l.starts_with("v ")).count(), 642);
    assert_eq!(text.lines().filter(|l| l.starts_with("f ")).count(), 1280);

    let raw = dir.path().join("planet_instances.raw");
    let batch = planet.instance_batch("tree");
    export_instances_raw(&batch, &raw).unwrap();
    let size = std::fs::metadata(&raw).unwrap().len();
    assert_eq!(size, expected_file_size(planet.placements.len()));

    let ramp = dir.path().join("planet_ramp.png");
    export_ramp_png(&ramp, &config, &RampOptions::default()).unwrap();
    let img = image::open(&ramp).unwrap();
    assert_eq!((img.width(), img.height()), (256, 8));
}

#[test]
fn uv_projection_is_pure() {
    let sculptor = PlanetSculptor::new(icosphere(2), PlanetConfig::preview()).unwrap();
    let planet = sculptor.make_planet(&mut ChaChaRandom::from_seed(12));
    let mut again = planet.mesh.clone();
    for i in 0..again.vertex_count() {
        again.set_uv(i, Vec2::ZERO);
    }
    planetsculpt::sculpt::project_elevation_uvs(&mut again, sculptor.config());
    assert_eq!(again.uvs(), planet.mesh.uvs());
}
