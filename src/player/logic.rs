//! Player kinematics: gravity, flap impulse, rotation and world edges.

use super::types::Player;
use crate::core::config::GameConfig;

/// Semi-implicit Euler step: velocity first, then position with the new
/// velocity. Records the frame-start pose for swept collision.
pub fn integrate(player: &mut Player, config: &GameConfig, dt: f64) {
    player.previous_position = player.position;
    player.previous_rotation_deg = player.rotation_deg;

    if !player.gravity_enabled {
        return;
    }

    player.velocity_y += config.gravity * dt;
    if player.velocity_y > config.terminal_velocity {
        player.velocity_y = config.terminal_velocity;
    }
    player.position.y += player.velocity_y * dt;
}

/// Overrides vertical velocity; nothing accumulated survives a flap.
pub fn flap(player: &mut Player, flap_velocity: f64) {
    player.velocity_y = flap_velocity;
}

/// Turn toward the nose-down limit while falling and toward the nose-up limit
/// otherwise, clamped to the configured range.
pub fn update_rotation(player: &mut Player, config: &GameConfig, dt: f64) {
    let rate = if player.velocity_y > 0.0 {
        config.rotation_fall_rate
    } else {
        -config.rotation_rise_rate
    };
    player.rotation_deg = (player.rotation_deg + rate * dt)
        .clamp(config.rotation_min_deg, config.rotation_max_deg);
}

/// Keeps the sprite inside the top edge. Returns true if it was clamped.
pub fn clamp_to_ceiling(player: &mut Player) -> bool {
    let half = player.display_height() * 0.5;
    if player.position.y - half < 0.0 {
        player.position.y = half;
        if player.velocity_y < 0.0 {
            player.velocity_y = 0.0;
        }
        return true;
    }
    false
}

/// Sprite bottom at or below the world floor.
pub fn touches_floor(player: &Player, world_height: f64) -> bool {
    player.position.y + player.display_height() * 0.5 >= world_height
}

pub fn rest_on_floor(player: &mut Player, world_height: f64) {
    player.position.y = world_height - player.display_height() * 0.5;
    player.velocity_y = 0.0;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collision::PixelMask;
    use crate::core::geometry::Vec2;

    fn flying_player() -> Player {
        let mut p = Player::new(Vec2::new(160.0, 300.0), PixelMask::solid(10, 10).unwrap(), 1.0);
        p.gravity_enabled = true;
        p
    }

    #[test]
    fn test_euler_step_from_rest() {
        let config = GameConfig::default();
        let mut p = flying_player();
        integrate(&mut p, &config, 1.0 / 60.0);
        assert!((p.velocity_y - 15.0).abs() < 1e-9);
        assert!((p.position.y - 300.25).abs() < 1e-9);
        assert_eq!(p.previous_position, Vec2::new(160.0, 300.0));
    }

    #[test]
    fn test_gravity_off_while_idle() {
        let config = GameConfig::default();
        let mut p = flying_player();
        p.gravity_enabled = false;
        integrate(&mut p, &config, 0.5);
        assert_eq!(p.velocity_y, 0.0);
        assert_eq!(p.position.y, 300.0);
    }

    #[test]
    fn test_flap_overrides_velocity() {
        let mut p = flying_player();
        p.velocity_y = 600.0;
        flap(&mut p, -300.0);
        assert_eq!(p.velocity_y, -300.0);
    }

    #[test]
    fn test_terminal_velocity_cap() {
        let config = GameConfig::default();
        let mut p = flying_player();
        p.velocity_y = config.terminal_velocity;
        integrate(&mut p, &config, 0.1);
        assert_eq!(p.velocity_y, config.terminal_velocity);
    }

    #[test]
    fn test_rotation_clamped_both_ways() {
        let config = GameConfig::default();
        let mut p = flying_player();
        p.velocity_y = 100.0;
        for _ in 0..120 {
            update_rotation(&mut p, &config, 1.0 / 60.0);
        }
        assert_eq!(p.rotation_deg, config.rotation_max_deg);

        p.velocity_y = -100.0;
        for _ in 0..120 {
            update_rotation(&mut p, &config, 1.0 / 60.0);
        }
        assert_eq!(p.rotation_deg, config.rotation_min_deg);
    }

    #[test]
    fn test_rotation_per_frame_increments() {
        let config = GameConfig::default();
        let mut p = flying_player();
        p.velocity_y = 10.0;
        update_rotation(&mut p, &config, 1.0 / 60.0);
        assert!((p.rotation_deg - 2.0).abs() < 1e-9);
        p.velocity_y = -10.0;
        update_rotation(&mut p, &config, 1.0 / 60.0);
        assert!((p.rotation_deg - (-2.0)).abs() < 1e-9);
    }

    #[test]
    fn test_ceiling_clamp_zeroes_upward_velocity() {
        let mut p = flying_player();
        p.position.y = 2.0;
        p.velocity_y = -300.0;
        assert!(clamp_to_ceiling(&mut p));
        assert_eq!(p.position.y, 5.0);
        assert_eq!(p.velocity_y, 0.0);
    }

    #[test]
    fn test_floor_contact() {
        let mut p = flying_player();
        p.position.y = 594.0;
        assert!(!touches_floor(&p, 600.0));
        p.position.y = 595.0;
        assert!(touches_floor(&p, 600.0));
        rest_on_floor(&mut p, 600.0);
        assert_eq!(p.position.y, 595.0);
    }
}
