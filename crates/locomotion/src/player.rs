use glam::Vec3;
use serde::{Deserialize, Serialize};
use walkaround_common::WalkConfig;

/// The one movable thing in the room.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayerState {
    /// Eye position; `y` is the current height.
    pub position: Vec3,
    /// Height change applied on the next integration step.
    pub vertical_velocity: f32,
    pub jumping: bool,
    ground_level: f32,
}

impl PlayerState {
    /// Standing at the room centre.
    pub fn new(ground_level: f32) -> Self {
        Self::at(Vec3::new(0.0, ground_level, 0.0), ground_level)
    }

    /// Standing (or hanging, if `position.y` is above ground) at `position`.
    pub fn at(position: Vec3, ground_level: f32) -> Self {
        Self {
            position,
            vertical_velocity: 0.0,
            jumping: false,
            ground_level,
        }
    }

    pub fn ground_level(&self) -> f32 {
        self.ground_level
    }

    pub fn height(&self) -> f32 {
        self.position.y
    }

    /// Within `epsilon` of the floor.
    pub fn is_grounded(&self, epsilon: f32) -> bool {
        self.position.y <= self.ground_level + epsilon
    }

    /// In the air or moving vertically; the vertical integration only runs
    /// while this holds.
    pub fn is_airborne(&self) -> bool {
        self.jumping || self.position.y > self.ground_level
    }
}

/// Jump tunables, fixed at startup.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct JumpParams {
    pub jump_height: f32,
    /// Velocity lost per frame.
    pub gravity: f32,
    pub ground_epsilon: f32,
}

impl JumpParams {
    pub fn from_config(config: &WalkConfig) -> Self {
        Self {
            jump_height: config.player.jump_height,
            gravity: config.player.gravity,
            ground_epsilon: config.player.ground_epsilon,
        }
    }

    /// `sqrt(2 * gravity * jump_height)`: the launch speed whose apex sits
    /// `jump_height` above the floor.
    pub fn initial_velocity(&self) -> f32 {
        (2.0 * self.gravity * self.jump_height).sqrt()
    }
}

/// The four wall planes, as one symmetric limit on |x| and |z|.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoomBounds {
    pub limit: f32,
}

impl RoomBounds {
    pub fn new(limit: f32) -> Self {
        Self { limit }
    }

    pub fn from_config(config: &WalkConfig) -> Self {
        Self::new(config.boundary_limit())
    }

    /// Whether the horizontal part of `position` is inside the walls.
    /// Points exactly on the limit are inside.
    pub fn contains(&self, position: Vec3) -> bool {
        position.x >= -self.limit
            && position.x <= self.limit
            && position.z >= -self.limit
            && position.z <= self.limit
    }
}
