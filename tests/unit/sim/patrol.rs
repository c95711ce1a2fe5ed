use super::*;
use proptest::prelude::*;
use rand::SeedableRng;
use rand_pcg::Pcg32;

#[test]
fn direction_flips_only_after_crossing_the_range() {
    let mut e = PatrolEntity::new(Point::new(10.0, 100.0), Side::Left, 1, 3.0, 4.0);
    let mut ys = Vec::new();
    for _ in 0..8 {
        e.advance(1.0);
        ys.push(e.current.y);
    }
    // 103, 106 (> 104, flips next), 103, 100, 97, 94 (< 96, flips next), 97, 100
    assert_eq!(ys, vec![103.0, 106.0, 103.0, 100.0, 97.0, 94.0, 97.0, 100.0]);
    assert_eq!(e.current.x, 10.0);
}

#[test]
fn on_hit_changes_nothing() {
    let mut e = PatrolEntity::new(Point::new(1.0, 2.0), Side::Right, -1, 5.0, 2.0);
    let before = e.clone();
    e.on_hit();
    assert_eq!(e, before);
}

#[test]
fn make_patrol_spaces_entities_down_the_goal_line() {
    let mut rng = Pcg32::seed_from_u64(7);
    let cfg = PatrolConfig::default();
    let left = make_patrol(&cfg, Side::Left, 800, 600, &mut rng).unwrap();
    let right = make_patrol(&cfg, Side::Right, 800, 600, &mut rng).unwrap();

    assert_eq!(left.len(), 4);
    assert_eq!(right.len(), 4);
    for (i, e) in left.iter().enumerate() {
        assert_eq!(e.home, Point::new(181.0, 120.0 * (i as f64 + 1.0)));
        assert_eq!(e.current, e.home);
        assert!((2.0..=8.0).contains(&e.speed));
        assert!((2.0..=6.0).contains(&e.motion_range));
        assert!(e.direction == 1 || e.direction == -1);
        assert_eq!(e.side, Side::Left);
    }
    assert_eq!(right[0].home.x, 800.0 - 180.0 + 1.0);
}

#[test]
fn make_patrol_is_deterministic_for_a_seed() {
    let cfg = PatrolConfig::default();
    let a = make_patrol(&cfg, Side::Left, 640, 480, &mut Pcg32::seed_from_u64(42)).unwrap();
    let b = make_patrol(&cfg, Side::Left, 640, 480, &mut Pcg32::seed_from_u64(42)).unwrap();
    assert_eq!(a, b);
}

#[test]
fn inverted_bounds_are_rejected() {
    let cfg = PatrolConfig {
        min_speed: 9,
        ..PatrolConfig::default()
    };
    assert!(make_patrol(&cfg, Side::Left, 10, 10, &mut Pcg32::seed_from_u64(1)).is_err());
}

proptest! {
    #[test]
    fn position_stays_within_range_plus_one_step(
        home_y in -500.0f64..500.0,
        speed in 0.0f64..50.0,
        range in 0.0f64..20.0,
        delta_t in 0.001f64..0.5,
        up in any::<bool>(),
        ticks in 1usize..400,
    ) {
        let mut e = PatrolEntity::new(
            Point::new(3.0, home_y),
            Side::Left,
            if up { 1 } else { -1 },
            speed,
            range,
        );
        let step = speed * delta_t + 1e-9;
        for _ in 0..ticks {
            e.advance(delta_t);
            prop_assert!(e.current.y <= home_y + range + step);
            prop_assert!(e.current.y >= home_y - range - step);
            prop_assert_eq!(e.current.x, 3.0);
        }
    }
}
