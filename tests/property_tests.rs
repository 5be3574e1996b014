//! Property checks for angle wrapping, projection bounds and movement.

use std::f32::consts::TAU;

use gridcaster::{Config, Intents, Movement, Player, Projection, RayHit, wrap_angle};
use proptest::prelude::*;

proptest! {
    #[test]
    fn wrap_stays_in_range(a in -1.0e6f32..1.0e6f32) {
        let w = wrap_angle(a);
        prop_assert!((0.0..TAU).contains(&w), "wrap({}) = {}", a, w);
    }

    #[test]
    fn wrap_is_idempotent(a in any::<f32>()) {
        let w = wrap_angle(a);
        prop_assert_eq!(wrap_angle(w), w);
    }

    #[test]
    fn projection_height_is_finite(
        px in 0.0f32..2000.0,
        py in 0.0f32..2000.0,
        angle in 0.0f32..TAU,
        hx in 0.0f32..2000.0,
        hy in 0.0f32..2000.0,
    ) {
        let projection = Projection::from_config(&Config::default());
        let player = Player::new(px, py, angle);
        let projected = projection.project(&player, &RayHit { x: hx, y: hy, steps: 0 });

        prop_assert!(projected.distance >= projection.epsilon);
        prop_assert!(projected.height.is_finite());
        prop_assert!(projected.height >= 0.0);

        let slice = projection.slice(0, &projected, Config::default().wall_color);
        prop_assert!(slice.top + slice.height <= projection.screen_height);
    }

    #[test]
    fn movement_is_deterministic(
        angle in 0.0f32..TAU,
        bits in 0u8..64,
        dt in 0.0f32..0.2,
    ) {
        let intents = Intents {
            forward: bits & 1 != 0,
            backward: bits & 2 != 0,
            strafe_left: bits & 4 != 0,
            strafe_right: bits & 8 != 0,
            rotate_left: bits & 16 != 0,
            rotate_right: bits & 32 != 0,
            quit: false,
        };
        let movement = Movement::from_config(&Config::default());
        let player = Player::new(100.0, 100.0, angle);
        let a = movement.apply(&player, &intents, dt);
        let b = movement.apply(&player, &intents, dt);
        prop_assert_eq!(a, b);
        prop_assert!((0.0..TAU).contains(&a.angle));
    }
}

#[test]
fn forward_one_tick_at_zero() {
    let config = Config::default();
    let movement = Movement::from_config(&config);
    let player = Player::new(50.0, 60.0, 0.0);
    let next = movement.apply(
        &player,
        &Intents {
            forward: true,
            ..Default::default()
        },
        1.0 / config.tick_rate,
    );
    assert!((next.x() - (50.0 + config.move_speed)).abs() < 1e-4);
    assert!((next.y() - 60.0).abs() < 1e-4);
}
