//! Unit tests for fl-spatial.

#[cfg(test)]
mod fixtures {
    use fl_core::{Bounds, Vec3};
    use rand::rngs::SmallRng;
    use rand::{Rng, SeedableRng};

    use crate::{GridSpec, SpatialGrid};

    pub fn unit_cube() -> Bounds {
        Bounds::cube(-0.5, 0.5)
    }

    pub fn grid(cell: f32) -> SpatialGrid {
        SpatialGrid::new(GridSpec::new(cell, unit_cube()).unwrap()).unwrap()
    }

    /// `n` points uniform in `[lo, hi]^3`.
    pub fn cloud(n: usize, lo: f32, hi: f32, seed: u64) -> Vec<Vec3> {
        let mut rng = SmallRng::seed_from_u64(seed);
        (0..n)
            .map(|_| Vec3::new(rng.gen_range(lo..=hi), rng.gen_range(lo..=hi), rng.gen_range(lo..=hi)))
            .collect()
    }
}

#[cfg(test)]
mod spec {
    use fl_core::{Bounds, Vec3};

    use crate::{GridSpec, SpatialError};

    #[test]
    fn rejects_bad_cell_size() {
        let b = Bounds::cube(0.0, 1.0);
        assert_eq!(GridSpec::new(0.0, b), Err(SpatialError::InvalidCellSize(0.0)));
        assert!(GridSpec::new(-1.0, b).is_err());
        assert!(GridSpec::new(f32::NAN, b).is_err());
    }

    #[test]
    fn rejects_bad_bounds() {
        let flat = Bounds::new(Vec3::ZERO, Vec3::new(1.0, 0.0, 1.0));
        assert!(matches!(GridSpec::new(0.1, flat), Err(SpatialError::InvalidBounds(_))));
    }

    #[test]
    fn rejects_huge_grid() {
        let b = Bounds::cube(0.0, 1.0);
        assert!(matches!(GridSpec::new(1e-4, b), Err(SpatialError::GridTooLarge { .. })));
    }

    #[test]
    fn dims_cover_extent() {
        let spec = GridSpec::new(0.25, Bounds::cube(0.0, 1.0)).unwrap();
        assert_eq!(spec.dims(), [4, 4, 4]);

        // Cell larger than the box still yields one cell per axis.
        let spec = GridSpec::new(5.0, Bounds::cube(0.0, 1.0)).unwrap();
        assert_eq!(spec.dims(), [1, 1, 1]);
    }
}

#[cfg(test)]
mod build {
    use fl_core::Vec3;

    use super::fixtures::{cloud, grid};

    #[test]
    fn buckets_partition_the_input() {
        let pts = cloud(5_000, -0.5, 0.5, 1);
        let mut g = grid(0.1);
        g.rebuild(&pts);

        let mut seen = vec![0u32; pts.len()];
        for cell in 0..g.cell_count() {
            for slot in g.bucket(cell) {
                let i = g.order()[slot] as usize;
                seen[i] += 1;
                assert_eq!(g.linear_index(g.cell_key(pts[i])), cell, "item {i} in wrong bucket");
            }
        }
        assert!(seen.iter().all(|&c| c == 1));
        assert_eq!(g.len(), pts.len());
    }

    #[test]
    fn buckets_keep_input_order() {
        let pts = cloud(2_000, -0.5, 0.5, 2);
        let mut g = grid(0.2);
        g.rebuild(&pts);
        for cell in 0..g.cell_count() {
            let idx: Vec<u32> = g.bucket(cell).map(|s| g.order()[s]).collect();
            assert!(idx.windows(2).all(|w| w[0] < w[1]));
        }
    }

    #[test]
    fn empty_input_has_no_occupied_cells() {
        let mut g = grid(0.1);
        g.rebuild::<Vec3>(&[]);
        assert_eq!(g.occupied_cells(), 0);
        assert!(g.is_empty());
        assert_eq!(g.query(Vec3::ZERO, 0.1).unwrap().count(), 0);
    }

    #[test]
    fn rebuild_replaces_previous_contents() {
        let mut g = grid(0.1);
        g.rebuild(&cloud(100, -0.5, 0.5, 3));
        g.rebuild(&[Vec3::ZERO]);
        assert_eq!(g.len(), 1);
        assert_eq!(g.occupied_cells(), 1);
    }

    #[test]
    fn rebuild_is_deterministic() {
        let pts = cloud(3_000, -0.6, 0.6, 4);
        let mut a = grid(0.1);
        let mut b = grid(0.1);
        a.rebuild(&pts);
        b.rebuild(&pts);
        assert_eq!(a.order(), b.order());
    }

    #[test]
    fn duplicate_positions_are_kept() {
        let pts = vec![Vec3::splat(0.1); 4];
        let mut g = grid(0.1);
        g.rebuild(&pts);
        assert_eq!(g.occupied_cells(), 1);
        assert_eq!(g.query(Vec3::splat(0.1), 0.1).unwrap().count(), 4);
    }
}

#[cfg(test)]
mod clamp {
    use fl_core::Vec3;

    use super::fixtures::grid;

    #[test]
    fn max_edge_maps_to_last_cell() {
        let g = grid(0.1);
        let [nx, ny, nz] = g.dims();
        assert_eq!(g.cell_key(Vec3::splat(0.5)), [nx - 1, ny - 1, nz - 1]);
        assert_eq!(g.cell_key(Vec3::splat(9.0)), [nx - 1, ny - 1, nz - 1]);
    }

    #[test]
    fn below_min_maps_to_first_cell() {
        let g = grid(0.1);
        assert_eq!(g.cell_key(Vec3::splat(-0.5)), [0, 0, 0]);
        assert_eq!(g.cell_key(Vec3::splat(-7.0)), [0, 0, 0]);
        assert_eq!(g.cell_key(Vec3::new(f32::NAN, -0.5, -0.5)), [0, 0, 0]);
    }

    #[test]
    fn out_of_bounds_items_are_still_found() {
        let outside = Vec3::new(0.52, 0.0, 0.0);
        let mut g = grid(0.1);
        g.rebuild(&[outside]);
        let hits: Vec<usize> = g.query_items(Vec3::new(0.49, 0.0, 0.0), 0.1).unwrap().collect();
        assert_eq!(hits, [0]);
    }
}

#[cfg(test)]
mod query {
    use fl_core::Vec3;

    use super::fixtures::{cloud, grid};
    use crate::SpatialError;

    #[test]
    fn radius_larger_than_cell_is_refused() {
        let g = grid(0.1);
        match g.query(Vec3::ZERO, 0.2) {
            Err(SpatialError::RadiusExceedsCellSize { radius, cell_size }) => {
                assert_eq!(radius, 0.2);
                assert_eq!(cell_size, 0.1);
            }
            _ => panic!("expected RadiusExceedsCellSize"),
        }
        assert!(g.query(Vec3::ZERO, f32::NAN).is_err());
        assert!(g.query(Vec3::ZERO, 0.1).is_ok());
    }

    #[test]
    fn no_false_negatives() {
        let pts = cloud(4_000, -0.55, 0.55, 5);
        let r = 0.1;
        let mut g = grid(r);
        g.rebuild(&pts);

        for q in cloud(200, -0.55, 0.55, 6) {
            let candidates: Vec<usize> = g.query_items(q, r).unwrap().collect();
            for (i, p) in pts.iter().enumerate() {
                if p.distance(q) <= r {
                    assert!(candidates.contains(&i), "missed item {i} near {q}");
                }
            }
        }
    }

    #[test]
    fn candidates_come_from_the_27_block_only() {
        let pts = cloud(4_000, -0.5, 0.5, 7);
        let mut g = grid(0.1);
        g.rebuild(&pts);

        let q = Vec3::new(0.01, -0.23, 0.31);
        let [cx, cy, cz] = g.cell_key(q).map(i64::from);
        for i in g.query_items(q, 0.1).unwrap() {
            let [x, y, z] = g.cell_key(pts[i]).map(i64::from);
            assert!((x - cx).abs() <= 1 && (y - cy).abs() <= 1 && (z - cz).abs() <= 1);
        }
    }

    #[test]
    fn corner_query_skips_out_of_grid_cells() {
        let g = {
            let mut g = grid(0.25);
            // One item per cell centre.
            let mut pts = Vec::new();
            for z in 0..4 {
                for y in 0..4 {
                    for x in 0..4 {
                        pts.push(Vec3::new(x as f32, y as f32, z as f32) * 0.25 - Vec3::splat(0.375));
                    }
                }
            }
            g.rebuild(&pts);
            g
        };
        // Corner cell: 2×2×2 in-grid block.
        assert_eq!(g.query(Vec3::splat(-0.5), 0.25).unwrap().count(), 8);
        // Interior cell: full 27 block.
        assert_eq!(g.query(Vec3::splat(-0.1), 0.25).unwrap().count(), 27);
    }

    #[test]
    fn early_abandonment_is_safe() {
        let pts = cloud(1_000, -0.5, 0.5, 8);
        let mut g = grid(0.2);
        g.rebuild(&pts);
        let mut it = g.query(Vec3::ZERO, 0.2).unwrap();
        let first = it.next();
        drop(it);
        assert!(first.is_some());
        // A fresh query starts over.
        assert_eq!(g.query(Vec3::ZERO, 0.2).unwrap().next(), first);
    }

    #[test]
    fn exhausted_iterator_stays_exhausted() {
        let mut g = grid(0.1);
        g.rebuild(&[Vec3::ZERO]);
        let mut it = g.query(Vec3::ZERO, 0.1).unwrap();
        assert_eq!(it.next(), Some(0));
        assert_eq!(it.next(), None);
        assert_eq!(it.next(), None);
    }
}
