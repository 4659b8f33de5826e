//! Unit tests for gw-core primitives.

#[cfg(test)]
mod ids {
    use crate::AgentId;

    #[test]
    fn index_roundtrip() {
        let id = AgentId(42);
        assert_eq!(id.index(), 42);
        assert_eq!(AgentId::try_from(42usize).unwrap(), id);
    }

    #[test]
    fn invalid_sentinel_is_max() {
        assert_eq!(AgentId::INVALID.0, u64::MAX);
        assert_eq!(AgentId::default(), AgentId::INVALID);
    }

    #[test]
    fn display() {
        assert_eq!(AgentId(7).to_string(), "AgentId(7)");
    }
}

#[cfg(test)]
mod geometry {
    use crate::{Direction, Position};

    #[test]
    fn chebyshev_distance() {
        let a = Position::new(0, 0);
        let b = Position::new(3, -7);
        assert_eq!(a.chebyshev_distance(b), 7);
    }

    #[test]
    fn step_moves_one_cell() {
        let p = Position::new(0, 0);
        assert_eq!(p.step(Direction::Up), Position::new(0, 1));
        assert_eq!(p.step(Direction::Down), Position::new(0, -1));
        assert_eq!(p.step(Direction::Left), Position::new(-1, 0));
        assert_eq!(p.step(Direction::Right), Position::new(1, 0));
    }

    #[test]
    fn turns_are_total_and_cyclic() {
        let mut d = Direction::Up;
        for _ in 0..4 {
            d = d.turn_left();
        }
        assert_eq!(d, Direction::Up);

        let mut d = Direction::Up;
        for _ in 0..4 {
            d = d.turn_right();
        }
        assert_eq!(d, Direction::Up);

        assert_eq!(Direction::Up.turn_left(), Direction::Left);
        assert_eq!(Direction::Up.turn_right(), Direction::Right);
    }

    #[test]
    fn patch_coords_floor_towards_negative_infinity() {
        let p = Position::new(-1, -1);
        assert_eq!(p.patch_coords(32), (-1, -1));
        assert_eq!(p.local_coords(32), (31, 31));

        let p = Position::new(31, 0);
        assert_eq!(p.patch_coords(32), (0, 0));
        let p = Position::new(32, 0);
        assert_eq!(p.patch_coords(32), (1, 0));
    }
}

#[cfg(test)]
mod time {
    use crate::Tick;

    #[test]
    fn tick_arithmetic() {
        let t = Tick(10);
        assert_eq!(t + 5, Tick(15));
        assert_eq!(t.offset(3), Tick(13));
        assert_eq!(Tick(15) - Tick(10), 5u64);
        assert_eq!(t.next(), Tick(11));
    }
}

#[cfg(test)]
mod rng {
    use crate::SimRng;

    #[test]
    fn deterministic_same_seed() {
        let mut r1 = SimRng::new(12345);
        let mut r2 = SimRng::new(12345);
        for _ in 0..100 {
            let a: f64 = r1.random();
            let b: f64 = r2.random();
            assert_eq!(a, b);
        }
    }

    #[test]
    fn children_diverge_by_salt() {
        let mut root = SimRng::new(1);
        let mut c0 = root.child(0);
        let mut c1 = root.child(1);
        let a: u64 = c0.random();
        let b: u64 = c1.random();
        assert_ne!(a, b);
    }

    #[test]
    fn categorical_picks_dominant_weight() {
        let mut rng = SimRng::new(7);
        // Overwhelming log-weight on index 2.
        let log_weights = [-100.0, -100.0, 0.0, -100.0];
        for _ in 0..20 {
            assert_eq!(rng.categorical_from_log_weights(&log_weights), 2);
        }
    }
}
