//! Shared mesh cache under concurrent use: rayon workers acquiring and
//! releasing meshes, shapes on many threads, and memory pressure while
//! shapes hold their meshes.

use primitive_mesh::cache::{BoxKey, CylinderKey, MeshManager, SphereKey};
use primitive_mesh::primitives::MeshKind;
use primitive_mesh::{BoxShape, CylinderShape, SphereShape};
use config::constants::CacheConfig;
use rayon::prelude::*;
use std::sync::Arc;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[test]
fn concurrent_acquire_release_leaves_caches_empty() {
    init_logging();
    let manager = MeshManager::new(CacheConfig::unbounded());

    (0..2_000u32).into_par_iter().for_each(|i| {
        let size = f64::from(i % 7 + 1);
        let divisions = 8 + (i % 3) * 4;
        match i % 3 {
            0 => {
                let key = BoxKey::new(size, size, size);
                let mesh = manager.get_box_mesh(size, size, size, &key);
                assert_eq!(mesh.vertex_count(), 8);
                manager.invalidate_box_mesh(&key);
            }
            1 => {
                let key = SphereKey::new(size, divisions);
                manager.get_sphere_mesh(size, divisions, &key);
                manager.invalidate_sphere_mesh(&key);
            }
            _ => {
                let key = CylinderKey::new(size, 1.0, divisions);
                manager.get_cylinder_mesh(size, 1.0, divisions, &key);
                manager.invalidate_cylinder_mesh(&key);
            }
        }
    });

    for kind in MeshKind::ALL {
        assert_eq!(manager.cache_len(kind), 0, "{kind} cache not empty");
    }
}

#[test]
fn concurrent_gets_share_one_instance() {
    init_logging();
    let manager = MeshManager::new(CacheConfig::unbounded());
    let key = SphereKey::new(1.5, 32);

    let meshes: Vec<_> = (0..256)
        .into_par_iter()
        .map(|_| manager.get_sphere_mesh(1.5, 32, &key))
        .collect();

    assert!(meshes.iter().all(|m| Arc::ptr_eq(m, &meshes[0])));
    assert_eq!(manager.sphere_ref_count(&key), Some(256));
    assert_eq!(manager.stats(MeshKind::Sphere).misses, 1);

    meshes.par_iter().for_each(|_| manager.invalidate_sphere_mesh(&key));
    assert_eq!(manager.cache_len(MeshKind::Sphere), 0);
}

#[test]
fn shapes_on_many_threads() {
    init_logging();
    let manager = MeshManager::shared(CacheConfig::default());

    (0..64u32).into_par_iter().for_each(|i| {
        let mut cube = BoxShape::with_size(manager.clone(), 1.0, 2.0, f64::from(i % 4));
        let mut sphere = SphereShape::with_divisions(manager.clone(), 1.0, i % 16);
        let mut cylinder = CylinderShape::with_divisions(manager.clone(), 2.0, 1.0, i % 16);
        assert!(cube.mesh().is_some());
        assert!(sphere.mesh().is_some());
        assert!(cylinder.mesh().is_some());
        cube.set_depth(9.0);
        assert!(cube.mesh().is_some());
    });

    for kind in MeshKind::ALL {
        assert_eq!(manager.cache_len(kind), 0);
    }
}

#[test]
fn pressure_during_use() {
    init_logging();
    let manager = MeshManager::shared(CacheConfig::unbounded());
    let mut held = CylinderShape::new(manager.clone());
    let held_mesh = held.mesh().unwrap();

    (0..32u32).into_par_iter().for_each(|i| {
        let key = SphereKey::new(f64::from(i), 16);
        let _ = manager.get_sphere_mesh(f64::from(i), 16, &key);
        if i % 8 == 0 {
            manager.relieve_memory_pressure();
        }
    });

    assert!(Arc::ptr_eq(&held_mesh, &held.mesh().unwrap()));
    assert_eq!(manager.cylinder_ref_count(&held.key()), Some(1));
}
