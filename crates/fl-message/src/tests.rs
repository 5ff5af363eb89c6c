//! Unit tests for fl-message.

#[cfg(test)]
mod fixtures {
    use fl_core::{Located, Vec3};

    #[derive(Clone, Debug, PartialEq)]
    pub struct Ping {
        pub from: u32,
        pub at:   Vec3,
    }

    impl Located for Ping {
        fn position(&self) -> Vec3 {
            self.at
        }
    }

    pub fn ping(from: u32, x: f32) -> Ping {
        Ping { from, at: Vec3::new(x, 0.0, 0.0) }
    }
}

#[cfg(test)]
mod store {
    use super::fixtures::{ping, Ping};
    use crate::MessageStore;

    #[test]
    fn emits_are_invisible_until_publish() {
        let mut s = MessageStore::new();
        s.emit(ping(0, 0.0));
        s.extend([ping(1, 0.1), ping(2, 0.2)]);
        assert!(s.read().is_empty());
        assert_eq!(s.pending().len(), 3);

        s.publish();
        assert_eq!(s.len(), 3);
        assert!(s.pending().is_empty());
        let from: Vec<u32> = s.read().iter().map(|p| p.from).collect();
        assert_eq!(from, [0, 1, 2]);
    }

    #[test]
    fn clear_discards_unpublished() {
        let mut s = MessageStore::<Ping>::new();
        s.emit(ping(0, 0.0));
        s.clear_for_step();
        s.publish();
        assert!(s.is_empty());
    }

    #[test]
    fn publish_replaces_previous_snapshot() {
        let mut s = MessageStore::new();
        s.emit(ping(0, 0.0));
        s.publish();
        s.emit(ping(7, 0.0));
        s.publish();
        assert_eq!(s.read(), &[ping(7, 0.0)]);
    }

    #[test]
    fn permuted_publish_follows_order() {
        let mut s = MessageStore::new();
        s.extend([ping(0, 0.0), ping(1, 0.1), ping(2, 0.2)]);
        s.publish_permuted(&[2, 0, 1]);
        let from: Vec<u32> = s.read().iter().map(|p| p.from).collect();
        assert_eq!(from, [2, 0, 1]);
    }

    #[test]
    fn rollback_restores_last_committed_snapshot() {
        let mut s = MessageStore::new();
        s.emit(ping(0, 0.0));
        s.publish();
        s.commit();

        s.emit(ping(1, 0.0));
        s.publish();
        s.emit(ping(2, 0.0));
        s.publish_permuted(&[0]);
        s.emit(ping(3, 0.0));
        assert!(s.rollback());
        assert_eq!(s.read(), &[ping(0, 0.0)]);
        assert!(s.pending().is_empty());

        // Nothing published since: nothing to restore.
        assert!(!s.rollback());
        assert_eq!(s.len(), 1);
    }
}

#[cfg(test)]
mod spec {
    use fl_core::Bounds;
    use fl_spatial::SpatialError;

    use crate::MessageSpec;

    #[test]
    fn cell_size_defaults_to_radius() {
        let s = MessageSpec::new("location", 0.1, Bounds::cube(-0.5, 0.5));
        assert_eq!(s.cell_size(), 0.1);
        assert_eq!(s.grid_spec().unwrap().cell_size, 0.1);
    }

    #[test]
    fn radius_larger_than_cell_is_rejected() {
        let s = MessageSpec::new("location", 0.2, Bounds::cube(-0.5, 0.5)).with_cell_size(0.1);
        assert!(matches!(s.validate(), Err(SpatialError::RadiusExceedsCellSize { .. })));
    }

    #[test]
    fn bad_radius_is_rejected() {
        let b = Bounds::cube(-0.5, 0.5);
        assert_eq!(MessageSpec::new("m", 0.0, b).validate(), Err(SpatialError::InvalidRadius(0.0)));
        assert!(MessageSpec::new("m", f32::NAN, b).validate().is_err());
    }
}

#[cfg(test)]
mod list {
    use fl_core::{Bounds, Vec3};

    use super::fixtures::ping;
    use crate::{MessageList, MessageSpec};

    fn list() -> MessageList<super::fixtures::Ping> {
        MessageList::new(MessageSpec::new("location", 0.1, Bounds::cube(-0.5, 0.5))).unwrap()
    }

    #[test]
    fn read_is_in_cell_order() {
        let mut l = list();
        l.store_mut().extend([ping(0, 0.45), ping(1, -0.45), ping(2, 0.0)]);
        l.publish_and_index();

        let cells: Vec<usize> = l
            .read()
            .iter()
            .map(|p| l.grid().linear_index(l.grid().cell_key(p.at)))
            .collect();
        assert!(cells.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(l.len(), 3);
    }

    #[test]
    fn neighbors_include_everything_in_radius() {
        let mut l = list();
        l.store_mut().extend((0..100).map(|i| ping(i, -0.5 + i as f32 * 0.01)));
        l.publish_and_index();

        let q = Vec3::new(0.05, 0.0, 0.0);
        let found: Vec<u32> = l.neighbors(q).unwrap().map(|p| p.from).collect();
        for i in 0..100u32 {
            let x = -0.5 + i as f32 * 0.01;
            if (x - q.x).abs() <= 0.1 {
                assert!(found.contains(&i), "missed {i}");
            }
        }
    }

    #[test]
    fn rollback_restores_index() {
        let mut l = list();
        l.store_mut().extend([ping(0, 0.45), ping(1, -0.45), ping(2, 0.0)]);
        l.publish_and_index();
        l.commit();
        let committed = l.read().to_vec();

        l.store_mut().extend([ping(9, -0.05)]);
        l.publish_and_index();
        assert_eq!(l.len(), 1);

        l.rollback();
        assert_eq!(l.read(), &committed[..]);
        let near: Vec<u32> = l.neighbors(Vec3::new(0.44, 0.0, 0.0)).unwrap().map(|p| p.from).collect();
        assert_eq!(near, [0]);
        let near: Vec<u32> = l.neighbors(Vec3::ZERO).unwrap().map(|p| p.from).collect();
        assert_eq!(near, [2]);
    }

    #[test]
    fn empty_list_has_no_neighbors() {
        let mut l = list();
        l.publish_and_index();
        assert!(l.is_empty());
        assert_eq!(l.neighbors(Vec3::ZERO).unwrap().count(), 0);
    }
}
