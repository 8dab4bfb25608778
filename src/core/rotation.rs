//! Ring rotation gesture tracking
//!
//! The ring reports absolute angles while a finger is on it. A gesture fires
//! once the finger has moved at least `ROTATION_THRESHOLD_DEGREES` away from
//! where it started, after which tracking restarts from the next sample.
//!
//! | State         | Input                      | Effect                    | Next          |
//! |---------------|----------------------------|---------------------------|---------------|
//! | Idle          | angle `a`                  | remember `a`              | Tracking(a)   |
//! | Tracking(s)   | angle `a`, `|a - s| < 10`  | none                      | Tracking(s)   |
//! | Tracking(s)   | angle `a`, `|a - s| >= 10` | emit direction(s, a)      | Idle          |
//! | any           | ring released              | none                      | Idle          |
//!
//! The threshold compares raw angles, so a short turn across 0°/360° looks
//! like a large one and fires immediately.

use crate::core::types::RingDirection;

/// Minimum angular distance, in degrees, that makes a gesture.
pub const ROTATION_THRESHOLD_DEGREES: u32 = 10;

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum RotationState {
    #[default]
    Idle,
    Tracking { start_angle: u32 },
}

/// Stateful gesture detector for one ring
#[derive(Debug, Default)]
pub struct RotationTracker {
    state: RotationState,
}

impl RotationTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> RotationState {
        self.state
    }

    /// Feeds one angle sample; returns a direction when a gesture completes.
    pub fn feed(&mut self, angle_degrees: u32) -> Option<RingDirection> {
        match self.state {
            RotationState::Idle => {
                self.state = RotationState::Tracking {
                    start_angle: angle_degrees,
                };
                None
            }
            RotationState::Tracking { start_angle } => {
                if angle_degrees.abs_diff(start_angle) < ROTATION_THRESHOLD_DEGREES {
                    return None;
                }

                self.state = RotationState::Idle;
                Some(direction_between(start_angle, angle_degrees))
            }
        }
    }

    /// Drops any gesture in progress (finger lifted).
    pub fn reset(&mut self) {
        self.state = RotationState::Idle;
    }
}

/// Direction of travel from `start` to `end` (degrees).
///
/// Both angles become unit vectors `(sin θ, cos θ)`; the sign of the 2-D
/// cross product `end.x * start.y - end.y * start.x` picks the direction.
/// Positive is counter-clockwise, zero or negative is clockwise.
pub fn direction_between(start: u32, end: u32) -> RingDirection {
    let (start_x, start_y) = unit_vector(start);
    let (end_x, end_y) = unit_vector(end);

    let cross = end_x * start_y - end_y * start_x;
    if cross > 0.0 {
        RingDirection::CounterClockwise
    } else {
        RingDirection::Clockwise
    }
}

fn unit_vector(degrees: u32) -> (f64, f64) {
    let theta = f64::from(degrees).to_radians();
    (theta.sin(), theta.cos())
}
