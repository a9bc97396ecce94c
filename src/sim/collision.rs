//! Collision detection and response
//!
//! Walls are horizontal lines at y = 0 and y = height. Paddles are vertical
//! planes at their face x; a hit needs the ball's leading edge to cross that
//! plane during the tick while the ball's center is within the paddle's span.

use super::state::{Ball, Paddle};
use crate::input::PaddleId;

/// Reflect the ball off the top/bottom walls and pull it back inside.
///
/// Returns true if a wall was hit.
pub fn bounce_off_walls(ball: &mut Ball, playfield_height: f32) -> bool {
    if ball.pos.y - ball.radius < 0.0 {
        ball.pos.y = ball.radius;
        ball.vel.y = ball.vel.y.abs();
        true
    } else if ball.pos.y + ball.radius > playfield_height {
        ball.pos.y = playfield_height - ball.radius;
        ball.vel.y = -ball.vel.y.abs();
        true
    } else {
        false
    }
}

/// Reflect the ball off a paddle face.
///
/// `prev_x` is the ball center before this tick's integration. A ball that was
/// already behind the face at the start of the tick passes through; it is
/// headed for the goal. On a hit the ball is placed flush against the face.
pub fn bounce_off_paddle(ball: &mut Ball, prev_x: f32, paddle: &Paddle, side: PaddleId) -> bool {
    let crossed = match side {
        PaddleId::Left => {
            ball.vel.x < 0.0 && prev_x - ball.radius >= paddle.x && ball.left_edge() <= paddle.x
        }
        PaddleId::Right => {
            ball.vel.x > 0.0 && prev_x + ball.radius <= paddle.x && ball.right_edge() >= paddle.x
        }
    };
    if !crossed || !paddle.covers(ball.pos.y) {
        return false;
    }

    ball.vel.x = -ball.vel.x;
    ball.pos.x = match side {
        PaddleId::Left => paddle.x + ball.radius,
        PaddleId::Right => paddle.x - ball.radius,
    };
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    fn ball(pos: Vec2, vel: Vec2) -> Ball {
        Ball {
            pos,
            vel,
            radius: 5.0,
        }
    }

    fn left() -> Paddle {
        Paddle {
            x: 10.0,
            center_y: 200.0,
            half_height: 40.0,
        }
    }

    fn right() -> Paddle {
        Paddle {
            x: 590.0,
            center_y: 200.0,
            half_height: 40.0,
        }
    }

    #[test]
    fn test_wall_bounce_top() {
        let mut b = ball(Vec2::new(300.0, 2.0), Vec2::new(100.0, -150.0));
        assert!(bounce_off_walls(&mut b, 400.0));
        assert_eq!(b.pos.y, 5.0);
        assert_eq!(b.vel.y, 150.0);
        assert_eq!(b.vel.x, 100.0);
    }

    #[test]
    fn test_wall_bounce_bottom() {
        let mut b = ball(Vec2::new(300.0, 430.0), Vec2::new(100.0, 150.0));
        assert!(bounce_off_walls(&mut b, 400.0));
        assert_eq!(b.pos.y, 395.0);
        assert_eq!(b.vel.y, -150.0);
    }

    #[test]
    fn test_wall_touching_is_not_a_bounce() {
        let mut b = ball(Vec2::new(300.0, 5.0), Vec2::new(100.0, -150.0));
        assert!(!bounce_off_walls(&mut b, 400.0));
        assert_eq!(b.vel.y, -150.0);
    }

    #[test]
    fn test_left_paddle_hit() {
        // Started at x = 16 (leading edge 11), moved to x = 12 (leading edge 7)
        let mut b = ball(Vec2::new(12.0, 210.0), Vec2::new(-400.0, 0.0));
        assert!(bounce_off_paddle(&mut b, 16.0, &left(), PaddleId::Left));
        assert_eq!(b.vel.x, 400.0);
        assert_eq!(b.pos.x, 15.0);
    }

    #[test]
    fn test_right_paddle_hit() {
        let mut b = ball(Vec2::new(600.0, 190.0), Vec2::new(300.0, 20.0));
        assert!(bounce_off_paddle(&mut b, 580.0, &right(), PaddleId::Right));
        assert_eq!(b.vel.x, -300.0);
        assert_eq!(b.pos.x, 585.0);
    }

    #[test]
    fn test_paddle_edges_inclusive() {
        for y in [160.0, 240.0] {
            let mut b = ball(Vec2::new(12.0, y), Vec2::new(-400.0, 0.0));
            assert!(bounce_off_paddle(&mut b, 16.0, &left(), PaddleId::Left), "y = {}", y);
        }
        let mut b = ball(Vec2::new(12.0, 240.001), Vec2::new(-400.0, 0.0));
        assert!(!bounce_off_paddle(&mut b, 16.0, &left(), PaddleId::Left));
    }

    #[test]
    fn test_miss_passes_through() {
        let mut b = ball(Vec2::new(12.0, 300.0), Vec2::new(-400.0, 0.0));
        assert!(!bounce_off_paddle(&mut b, 16.0, &left(), PaddleId::Left));
        assert_eq!(b.vel.x, -400.0);
        assert_eq!(b.pos.x, 12.0);
    }

    #[test]
    fn test_ball_behind_face_not_pulled_back() {
        // Already past the face last tick; paddle slides under it now
        let mut b = ball(Vec2::new(4.0, 200.0), Vec2::new(-150.0, 0.0));
        assert!(!bounce_off_paddle(&mut b, 5.5, &left(), PaddleId::Left));
        assert_eq!(b.vel.x, -150.0);
    }

    #[test]
    fn test_moving_away_is_not_a_hit() {
        // Flush against the face after last tick's bounce
        let mut b = ball(Vec2::new(15.0, 200.0), Vec2::new(150.0, 0.0));
        assert!(!bounce_off_paddle(&mut b, 15.0, &left(), PaddleId::Left));
        assert_eq!(b.vel.x, 150.0);
    }
}
