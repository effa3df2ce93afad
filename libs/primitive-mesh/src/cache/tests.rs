//! Manager-level behavior: sharing, reference counting, eviction and
//! soft reclamation.

use super::*;
use crate::primitives::MeshKind;
use config::constants::CacheConfig;
use std::sync::Arc;

fn unbounded() -> MeshManager {
    MeshManager::new(CacheConfig::unbounded())
}

#[test]
fn test_hit_reuses_instance_and_counts() {
    let manager = unbounded();
    let first = manager.get_box_mesh(1.0, 2.0, 3.0, &BoxKey::new(1.0, 2.0, 3.0));
    assert_eq!(manager.box_ref_count(&BoxKey::new(1.0, 2.0, 3.0)), Some(1));

    let second = manager.get_box_mesh(1.0, 2.0, 3.0, &BoxKey::new(1.0, 2.0, 3.0));
    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(manager.box_ref_count(&BoxKey::new(1.0, 2.0, 3.0)), Some(2));
    assert_eq!(manager.stats(MeshKind::Box).hits, 1);
    assert_eq!(manager.stats(MeshKind::Box).misses, 1);
}

#[test]
fn test_distinct_keys_distinct_meshes() {
    let manager = unbounded();
    let key_a = SphereKey::new(1.0, 64);
    let key_b = SphereKey::new(2.0, 64);
    let a = manager.get_sphere_mesh(1.0, 64, &key_a);
    let b = manager.get_sphere_mesh(2.0, 64, &key_b);
    assert!(!Arc::ptr_eq(&a, &b));
    assert_eq!(manager.cache_len(MeshKind::Sphere), 2);
    assert_eq!(manager.sphere_ref_count(&key_a), Some(1));
    assert_eq!(manager.sphere_ref_count(&key_b), Some(1));
}

#[test]
fn test_single_invalidate_evicts() {
    let manager = unbounded();
    let key = CylinderKey::new(2.0, 1.0, 16);
    let first = manager.get_cylinder_mesh(2.0, 1.0, 16, &key);
    manager.invalidate_cylinder_mesh(&key);
    assert_eq!(manager.cache_len(MeshKind::Cylinder), 0);

    let second = manager.get_cylinder_mesh(2.0, 1.0, 16, &key);
    assert!(!Arc::ptr_eq(&first, &second));
    assert_eq!(manager.stats(MeshKind::Cylinder).misses, 2);
    assert_eq!(manager.stats(MeshKind::Cylinder).hits, 0);
}

#[test]
fn test_double_invalidate_is_noop() {
    let manager = unbounded();
    let key = BoxKey::new(1.0, 1.0, 1.0);
    manager.invalidate_box_mesh(&key);

    manager.get_box_mesh(1.0, 1.0, 1.0, &key);
    manager.invalidate_box_mesh(&key);
    manager.invalidate_box_mesh(&key);
    assert_eq!(manager.cache_len(MeshKind::Box), 0);

    // Cache still usable afterwards
    manager.get_box_mesh(1.0, 1.0, 1.0, &key);
    assert_eq!(manager.box_ref_count(&key), Some(1));
}

#[test]
fn test_invalidate_before_any_get_on_kind() {
    let manager = unbounded();
    manager.invalidate_sphere_mesh(&SphereKey::new(1.0, 4));
    assert_eq!(manager.cache_len(MeshKind::Sphere), 0);
    assert_eq!(manager.stats(MeshKind::Sphere), CacheStats::default());
}

#[test]
fn test_kinds_are_independent() {
    let manager = unbounded();
    manager.get_box_mesh(1.0, 1.0, 1.0, &BoxKey::new(1.0, 1.0, 1.0));
    manager.get_sphere_mesh(1.0, 8, &SphereKey::new(1.0, 8));
    assert_eq!(manager.cache_len(MeshKind::Box), 1);
    assert_eq!(manager.cache_len(MeshKind::Sphere), 1);
    assert_eq!(manager.cache_len(MeshKind::Cylinder), 0);
}

#[test]
fn test_memory_pressure_keeps_held_meshes() {
    let manager = unbounded();
    let key = SphereKey::new(1.0, 16);
    let held = manager.get_sphere_mesh(1.0, 16, &key);

    assert_eq!(manager.relieve_memory_pressure(), 1);
    let again = manager.get_sphere_mesh(1.0, 16, &key);
    assert!(Arc::ptr_eq(&held, &again));
    assert_eq!(manager.sphere_ref_count(&key), Some(2));
}

#[test]
fn test_memory_pressure_reclaims_unheld_meshes() {
    let manager = unbounded();
    let key = CylinderKey::new(1.0, 1.0, 8);
    drop(manager.get_cylinder_mesh(1.0, 1.0, 8, &key));

    manager.relieve_memory_pressure();
    assert_eq!(manager.cylinder_ref_count(&key), None);

    // Reclaimed entry behaves as a miss with a fresh count of one
    manager.get_cylinder_mesh(1.0, 1.0, 8, &key);
    assert_eq!(manager.cylinder_ref_count(&key), Some(1));
    let stats = manager.stats(MeshKind::Cylinder);
    assert_eq!(stats.misses, 2);
    assert_eq!(stats.reclaimed, 1);
}

#[test]
fn test_invalidate_reclaimed_entry_purges() {
    let manager = unbounded();
    let key = BoxKey::new(3.0, 3.0, 3.0);
    drop(manager.get_box_mesh(3.0, 3.0, 3.0, &key));
    manager.relieve_memory_pressure();
    assert_eq!(manager.cache_len(MeshKind::Box), 1);

    manager.invalidate_box_mesh(&key);
    assert_eq!(manager.cache_len(MeshKind::Box), 0);
}

#[test]
fn test_soft_limit_softens_automatically() {
    // Two 64-division spheres exceed a 3000 vertex budget
    let manager = MeshManager::new(CacheConfig::new(Some(3000)).unwrap());
    let key_a = SphereKey::new(1.0, 64);
    let key_b = SphereKey::new(2.0, 64);

    drop(manager.get_sphere_mesh(1.0, 64, &key_a));
    assert_eq!(manager.sphere_ref_count(&key_a), Some(1));

    let held = manager.get_sphere_mesh(2.0, 64, &key_b);
    // Both demoted; the unheld one is gone, the held one survives
    assert_eq!(manager.sphere_ref_count(&key_a), None);
    assert_eq!(manager.sphere_ref_count(&key_b), Some(1));
    assert_eq!(held.vertex_count(), 64 * 31 + 2);
}

#[test]
fn test_clear_drops_everything() {
    let manager = unbounded();
    manager.get_box_mesh(1.0, 1.0, 1.0, &BoxKey::new(1.0, 1.0, 1.0));
    manager.get_sphere_mesh(1.0, 8, &SphereKey::new(1.0, 8));
    manager.get_cylinder_mesh(1.0, 1.0, 8, &CylinderKey::new(1.0, 1.0, 8));
    manager.clear();
    for kind in MeshKind::ALL {
        assert_eq!(manager.cache_len(kind), 0);
    }
}

#[test]
fn test_manager_is_send_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<MeshManager>();
}
