//! Collision detection and response
//!
//! Everything is an axis-aligned box here (the ball included), so detection
//! is a single [`intersects`] call. The interesting part is the response:
//! where the ball goes after touching the paddle or a brick.

use glam::Vec2;

use super::entity::{Ball, Brick, Paddle};
use super::shape::{Edges, intersects};
use crate::consts::{PADDLE_BOUNCE_Y, PADDLE_VELOCITY_INFLUENCE};

/// Reflect velocity off a surface
///
/// Standard reflection: v' = v - 2(v·n)n. `normal` must be unit length.
#[inline]
pub fn reflect_velocity(velocity: Vec2, normal: Vec2) -> Vec2 {
    velocity - normal * (2.0 * velocity.dot(normal))
}

/// Side of a brick the ball came in through
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImpactSide {
    Left,
    Right,
    Top,
    Bottom,
}

/// Bounce the ball off the paddle
///
/// The ball is lifted clear of the paddle, then its velocity is reflected
/// across a direction steered by where it landed on the paddle and by how
/// fast the paddle was moving. The ball always leaves upward. Returns true
/// on contact.
pub fn resolve_paddle_ball(paddle: &Paddle, ball: &mut Ball) -> bool {
    if !intersects(paddle, &*ball) {
        return false;
    }

    ball.shape.pos.y = paddle.top() - ball.radius() * 2.0;

    // -0.5 at the left end of the paddle, +0.5 at the right end
    let pos_factor = (ball.pos().x - paddle.pos().x) / paddle.width();
    let vel_factor = paddle.velocity.x * PADDLE_VELOCITY_INFLUENCE;

    // Non-zero by construction: the y component is a constant
    let direction = Vec2::new(pos_factor + vel_factor, PADDLE_BOUNCE_Y).normalize();
    let reflected = reflect_velocity(ball.velocity, direction);
    // A steep steer combined with a fast sideways ball can reflect downward
    ball.velocity = Vec2::new(reflected.x, -reflected.y.abs());
    true
}

/// Bounce the ball off a brick and wear the brick down
///
/// The bounce axis is the one with the shallower penetration; on a tie the
/// ball bounces vertically. Destroyed bricks are ignored. Returns the side
/// the ball hit, if any.
pub fn resolve_brick_ball(brick: &mut Brick, ball: &mut Ball) -> Option<ImpactSide> {
    if brick.destroyed || !intersects(&*brick, &*ball) {
        return None;
    }

    if brick.hit() {
        log::debug!("brick at ({}, {}) destroyed", brick.pos().x, brick.pos().y);
    }

    let overlap_left = ball.right() - brick.left();
    let overlap_right = brick.right() - ball.left();
    let overlap_top = ball.bottom() - brick.top();
    let overlap_bottom = brick.bottom() - ball.top();

    let from_left = overlap_left.abs() < overlap_right.abs();
    let from_top = overlap_top.abs() < overlap_bottom.abs();

    let min_overlap_x = if from_left { overlap_left } else { overlap_right };
    let min_overlap_y = if from_top { overlap_top } else { overlap_bottom };

    if min_overlap_x.abs() < min_overlap_y.abs() {
        let side = if from_left { ImpactSide::Left } else { ImpactSide::Right };
        ball.velocity.x = ball.velocity.x.abs() * if from_left { -1.0 } else { 1.0 };
        Some(side)
    } else {
        let side = if from_top { ImpactSide::Top } else { ImpactSide::Bottom };
        ball.velocity.y = ball.velocity.y.abs() * if from_top { -1.0 } else { 1.0 };
        Some(side)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::Tuning;
    use proptest::prelude::*;

    fn ball_at(x: f32, y: f32, vx: f32, vy: f32) -> Ball {
        let mut ball = Ball::new(Vec2::new(x, y), &Tuning::default());
        ball.velocity = Vec2::new(vx, vy);
        ball
    }

    fn brick_at(x: f32, y: f32, hits: i32) -> Brick {
        Brick::new(Vec2::new(x, y), &Tuning::default()).with_hits(hits)
    }

    #[test]
    fn test_reflect_velocity() {
        // Ball moving right, hits vertical wall (normal pointing left)
        let velocity = Vec2::new(100.0, 0.0);
        let normal = Vec2::new(-1.0, 0.0);

        let reflected = reflect_velocity(velocity, normal);
        assert!((reflected.x - (-100.0)).abs() < 0.001);
        assert!(reflected.y.abs() < 0.001);
    }

    #[test]
    fn test_paddle_miss_is_noop() {
        let paddle = Paddle::new(Vec2::new(400.0, 550.0), &Tuning::default());
        let mut ball = ball_at(100.0, 100.0, -8.0, 8.0);
        assert!(!resolve_paddle_ball(&paddle, &mut ball));
        assert_eq!(ball.pos(), Vec2::new(100.0, 100.0));
        assert_eq!(ball.velocity, Vec2::new(-8.0, 8.0));
    }

    #[test]
    fn test_paddle_center_hit_sends_ball_up() {
        let paddle = Paddle::new(Vec2::new(400.0, 550.0), &Tuning::default());
        let mut ball = ball_at(400.0, 535.0, 0.0, 8.0);
        assert!(resolve_paddle_ball(&paddle, &mut ball));

        // Lifted clear of the paddle top (540) with one radius to spare
        assert_eq!(ball.pos().y, 520.0);
        assert!(ball.bottom() < paddle.top());
        assert!(ball.velocity.y < 0.0);
        assert!(ball.velocity.x.abs() < 1e-4);
        assert!((ball.velocity.length() - 8.0).abs() < 1e-4);
    }

    #[test]
    fn test_paddle_offset_hit_steers_ball() {
        let paddle = Paddle::new(Vec2::new(400.0, 550.0), &Tuning::default());
        let mut right = ball_at(430.0, 535.0, 0.0, 8.0);
        let mut left = ball_at(370.0, 535.0, 0.0, 8.0);
        resolve_paddle_ball(&paddle, &mut right);
        resolve_paddle_ball(&paddle, &mut left);
        assert!(right.velocity.x > 0.0);
        assert!(left.velocity.x < 0.0);
        assert!(right.velocity.y < 0.0 && left.velocity.y < 0.0);
    }

    #[test]
    fn test_moving_paddle_adds_english() {
        let mut paddle = Paddle::new(Vec2::new(400.0, 550.0), &Tuning::default());
        paddle.velocity.x = 8.0;
        let mut ball = ball_at(400.0, 535.0, 0.0, 8.0);
        resolve_paddle_ball(&paddle, &mut ball);
        assert!(ball.velocity.x > 0.0);
    }

    #[test]
    fn test_paddle_bounce_flips_downward_reflection() {
        let mut paddle = Paddle::new(Vec2::new(400.0, 550.0), &Tuning::default());
        paddle.velocity.x = 8.0;
        // Rising ball clipping the paddle: the raw reflection points down
        let mut ball = ball_at(430.0, 535.0, 8.0, -8.0);
        let direction = Vec2::new(0.4 + 0.4, PADDLE_BOUNCE_Y).normalize();
        let raw = reflect_velocity(ball.velocity, direction);
        assert!(raw.y > 0.0);

        assert!(resolve_paddle_ball(&paddle, &mut ball));
        assert!((ball.velocity - Vec2::new(raw.x, -raw.y)).length() < 1e-4);
        assert!((ball.velocity - Vec2::new(0.2759, -11.3104)).length() < 1e-3);
    }

    #[test]
    fn test_brick_hit_from_below_flips_y() {
        let mut brick = brick_at(100.0, 100.0, 2);
        // Ball just under the brick, clipping its bottom edge
        let mut ball = ball_at(100.0, 118.0, 3.0, -8.0);
        assert_eq!(resolve_brick_ball(&mut brick, &mut ball), Some(ImpactSide::Bottom));
        assert_eq!(ball.velocity, Vec2::new(3.0, 8.0));
        assert_eq!(brick.required_hits, 1);
        assert!(!brick.destroyed);
    }

    #[test]
    fn test_brick_hit_from_above_flips_y() {
        let mut brick = brick_at(100.0, 100.0, 1);
        let mut ball = ball_at(95.0, 82.0, -3.0, 8.0);
        assert_eq!(resolve_brick_ball(&mut brick, &mut ball), Some(ImpactSide::Top));
        assert_eq!(ball.velocity, Vec2::new(-3.0, -8.0));
        assert!(brick.destroyed);
    }

    #[test]
    fn test_brick_side_hit_flips_x() {
        let mut brick = brick_at(100.0, 100.0, 1);
        // Ball clipping the left edge (70) at mid height
        let mut ball = ball_at(62.0, 100.0, 8.0, 2.0);
        assert_eq!(resolve_brick_ball(&mut brick, &mut ball), Some(ImpactSide::Left));
        assert_eq!(ball.velocity, Vec2::new(-8.0, 2.0));

        let mut brick = brick_at(100.0, 100.0, 1);
        let mut ball = ball_at(138.0, 100.0, -8.0, 2.0);
        assert_eq!(resolve_brick_ball(&mut brick, &mut ball), Some(ImpactSide::Right));
        assert_eq!(ball.velocity, Vec2::new(8.0, 2.0));
    }

    #[test]
    fn test_brick_tie_bounces_vertically() {
        // Equal horizontal and vertical penetration (2px each) at the corner
        let mut brick = brick_at(100.0, 100.0, 1);
        let mut ball = ball_at(62.0, 82.0, 8.0, 8.0);
        assert_eq!(resolve_brick_ball(&mut brick, &mut ball), Some(ImpactSide::Top));
        assert_eq!(ball.velocity, Vec2::new(8.0, -8.0));
    }

    #[test]
    fn test_brick_needs_required_hits_collisions() {
        let mut brick = brick_at(100.0, 100.0, 3);
        for hit in 1..=3 {
            let mut ball = ball_at(100.0, 118.0, 0.0, -8.0);
            assert!(resolve_brick_ball(&mut brick, &mut ball).is_some());
            assert_eq!(brick.destroyed, hit == 3);
        }
        // Destroyed bricks no longer take part
        let mut ball = ball_at(100.0, 118.0, 0.0, -8.0);
        assert!(resolve_brick_ball(&mut brick, &mut ball).is_none());
        assert_eq!(brick.required_hits, 0);
        assert_eq!(ball.velocity, Vec2::new(0.0, -8.0));
    }

    #[test]
    fn test_brick_never_destroys_ball() {
        let mut brick = brick_at(100.0, 100.0, 1);
        let mut ball = ball_at(100.0, 100.0, 0.0, -8.0);
        resolve_brick_ball(&mut brick, &mut ball);
        assert!(!ball.destroyed);
    }

    fn unit_vector() -> impl Strategy<Value = Vec2> {
        (0.0f32..std::f32::consts::TAU).prop_map(|a| Vec2::new(a.cos(), a.sin()))
    }

    proptest! {
        #[test]
        fn prop_reflect_twice_is_identity(
            vx in -100.0f32..100.0,
            vy in -100.0f32..100.0,
            n in unit_vector(),
        ) {
            let v = Vec2::new(vx, vy);
            let back = reflect_velocity(reflect_velocity(v, n), n);
            prop_assert!((back - v).length() < 1e-3);
        }

        #[test]
        fn prop_reflect_preserves_speed(
            vx in -100.0f32..100.0,
            vy in -100.0f32..100.0,
            n in unit_vector(),
        ) {
            let v = Vec2::new(vx, vy);
            prop_assert!((reflect_velocity(v, n).length() - v.length()).abs() < 1e-3);
        }

        #[test]
        fn prop_paddle_bounce_always_goes_up(
            offset in -47.0f32..47.0,
            vx in -8.0f32..8.0,
            paddle_vx in -8.0f32..8.0,
        ) {
            let mut paddle = Paddle::new(Vec2::new(400.0, 550.0), &Tuning::default());
            paddle.velocity.x = paddle_vx;
            let mut ball = ball_at(400.0 + offset, 535.0, vx, 8.0);
            prop_assert!(resolve_paddle_ball(&paddle, &mut ball));
            prop_assert!(ball.velocity.y < 0.0);
        }
    }
}
