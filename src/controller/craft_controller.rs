use glam::Vec2;

use crate::config::CraftTuning;
use crate::model::CraftState;
use super::input::FrameInput;
use super::orientation;

/// Turns keys and pointer offset into banking, thrust and steering
#[derive(Debug, Clone)]
pub struct CraftController {
    tuning: CraftTuning,
}

impl CraftController {
    pub fn new(tuning: CraftTuning) -> Self {
        Self { tuning }
    }

    /// Yaw and pitch for this frame from the pointer's offset to the screen
    /// centre. Not accumulated: a centred pointer means no turn.
    pub fn pointer_rates(&self, input: &FrameInput) -> Vec2 {
        (input.screen_center() - input.pointer) / self.tuning.pointer_divisor
    }

    /// Accumulate key input into roll rate and velocity, then apply drag.
    pub fn update_rates(&self, craft: &mut CraftState, input: &FrameInput) {
        let t = &self.tuning;

        if input.turn_left {
            craft.roll_rate -= t.roll_step;
        }
        if input.turn_right {
            craft.roll_rate += t.roll_step;
        }
        craft.roll_rate = self.limit(craft.roll_rate * t.drag, t.roll_limit);

        if input.forward {
            craft.velocity += t.thrust_step;
        }
        if input.back {
            craft.velocity -= t.thrust_step;
        }
        craft.velocity = self.limit(craft.velocity * t.drag, t.velocity_limit);
    }

    /// One frame of flight: rates, translation along the current nose, then rotation.
    pub fn update(&self, craft: &mut CraftState, input: &FrameInput, dt: f32) {
        self.update_rates(craft, input);

        craft.position += craft.forward() * (craft.velocity * dt);

        let turn = self.pointer_rates(input);
        craft.orientation =
            orientation::integrate(craft.orientation, turn.x, turn.y, craft.roll_rate * dt);
    }

    fn limit(&self, value: f32, limit: f32) -> f32 {
        if self.tuning.clamp_rates {
            value.clamp(-limit, limit)
        } else {
            value
        }
    }
}
