use crate::look::LookController;
use crate::player::{JumpParams, PlayerState, RoomBounds};
use glam::Vec3;
use serde::{Deserialize, Serialize};
use walkaround_common::WalkConfig;
use walkaround_input::{InputEvent, InputQueue, InputState, KeyBindings, MoveIntent};

/// A record of what one frame (or one input event) did to the player.
///
/// The log is append-only until drained; the HUD and the CLI read it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum LocomotionEvent {
    /// Horizontal step accepted.
    Moved { frame: u64, from: Vec3, to: Vec3 },
    /// Horizontal step left the room and was undone.
    MoveRejected { frame: u64, attempted: Vec3 },
    /// Jump triggered with the given launch velocity.
    JumpStarted { frame: u64, velocity: f32 },
    /// Touched down; height clamped to ground level.
    Landed { frame: u64 },
}

/// Apply held directional keys along the look axes, rejecting the whole step
/// if it leaves `bounds`. Returns the attempted position when rejected.
///
/// Opposite and perpendicular keys compose additively; diagonal steps are
/// not normalized.
pub fn step_horizontal(
    player: &mut PlayerState,
    intent: MoveIntent,
    look: &impl LookController,
    move_speed: f32,
    bounds: RoomBounds,
) -> Option<Vec3> {
    let (prev_x, prev_z) = (player.position.x, player.position.z);

    if intent.forward {
        look.move_forward(&mut player.position, move_speed);
    }
    if intent.backward {
        look.move_forward(&mut player.position, -move_speed);
    }
    if intent.left {
        look.move_right(&mut player.position, -move_speed);
    }
    if intent.right {
        look.move_right(&mut player.position, move_speed);
    }

    if bounds.contains(player.position) {
        return None;
    }
    let attempted = player.position;
    player.position.x = prev_x;
    player.position.z = prev_z;
    Some(attempted)
}

/// Start a jump if grounded and not already jumping. Returns whether it fired.
pub fn try_jump(player: &mut PlayerState, jump: JumpParams) -> bool {
    if player.jumping || !player.is_grounded(jump.ground_epsilon) {
        return false;
    }
    player.vertical_velocity = jump.initial_velocity();
    player.jumping = true;
    true
}

/// One vertical step: height first, then velocity. Returns `true` on the
/// frame the player lands.
pub fn integrate_vertical(player: &mut PlayerState, jump: JumpParams) -> bool {
    if !player.is_airborne() {
        return false;
    }
    player.position.y += player.vertical_velocity;
    player.vertical_velocity -= jump.gravity;

    if player.position.y <= player.ground_level() {
        player.position.y = player.ground_level();
        player.vertical_velocity = 0.0;
        player.jumping = false;
        return true;
    }
    false
}

/// Owns the player and its input state, and advances them one frame at a time.
#[derive(Debug, Clone)]
pub struct Locomotion {
    player: PlayerState,
    input: InputState,
    bindings: KeyBindings,
    bounds: RoomBounds,
    jump: JumpParams,
    move_speed: f32,
    frame: u64,
    event_log: Vec<LocomotionEvent>,
}

impl Locomotion {
    /// Player at the room centre, keys bound per `config.keys`.
    pub fn new(config: &WalkConfig) -> Self {
        Self::with_player(config, PlayerState::new(config.player.ground_level))
    }

    pub fn with_player(config: &WalkConfig, player: PlayerState) -> Self {
        Self {
            player,
            input: InputState::new(),
            bindings: config.keys.clone(),
            bounds: RoomBounds::from_config(config),
            jump: JumpParams::from_config(config),
            move_speed: config.player.move_speed,
            frame: 0,
            event_log: Vec::new(),
        }
    }

    pub fn player(&self) -> &PlayerState {
        &self.player
    }

    pub fn input(&self) -> &InputState {
        &self.input
    }

    pub fn bindings(&self) -> &KeyBindings {
        &self.bindings
    }

    pub fn bounds(&self) -> RoomBounds {
        self.bounds
    }

    pub fn jump_params(&self) -> JumpParams {
        self.jump
    }

    /// Frames integrated so far.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Read-only access to the event log.
    pub fn events(&self) -> &[LocomotionEvent] {
        &self.event_log
    }

    /// Drain and return the event log.
    pub fn drain_events(&mut self) -> Vec<LocomotionEvent> {
        std::mem::take(&mut self.event_log)
    }

    /// Feed one key event. A rising edge of a jump key attempts the jump
    /// immediately; holding the key does nothing further.
    pub fn apply_event(&mut self, event: &InputEvent) {
        let rising = self.input.apply(event);
        if rising && self.bindings.is_jump(event.key()) {
            self.trigger_jump();
        }
    }

    /// Attempt a jump now. No-op while airborne.
    pub fn trigger_jump(&mut self) -> bool {
        if !try_jump(&mut self.player, self.jump) {
            tracing::trace!(frame = self.frame, "jump ignored, not grounded");
            return false;
        }
        let velocity = self.player.vertical_velocity;
        tracing::debug!(frame = self.frame, velocity, "jump started");
        self.event_log.push(LocomotionEvent::JumpStarted {
            frame: self.frame,
            velocity,
        });
        true
    }

    /// Release all keys, e.g. on focus loss, so nothing keeps walking.
    pub fn release_keys(&mut self) {
        self.input.release_all();
    }

    /// Advance one frame using the current input state.
    pub fn update(&mut self, look: &impl LookController) {
        self.frame += 1;
        let frame = self.frame;

        let intent = self.bindings.intent(&self.input);
        if !intent.is_idle() {
            let from = self.player.position;
            match step_horizontal(&mut self.player, intent, look, self.move_speed, self.bounds) {
                None => {
                    self.event_log.push(LocomotionEvent::Moved {
                        frame,
                        from,
                        to: self.player.position,
                    });
                }
                Some(attempted) => {
                    tracing::debug!(frame, x = attempted.x, z = attempted.z, "step rejected at wall");
                    self.event_log
                        .push(LocomotionEvent::MoveRejected { frame, attempted });
                }
            }
        }

        if integrate_vertical(&mut self.player, self.jump) {
            tracing::debug!(frame, "landed");
            self.event_log.push(LocomotionEvent::Landed { frame });
        }
    }

    /// Drain buffered events in order, then advance one frame.
    pub fn tick(&mut self, queue: &mut InputQueue, look: &impl LookController) {
        for event in queue.drain() {
            self.apply_event(&event);
        }
        self.update(look);
    }
}
