//! Locomotion Controller
//!
//! The per-frame state machine. One call to `tick` per rendered frame:
//!
//! ```text
//! intake ─► roll? ──yes──► roll displacement, timer ─► done
//!              │
//!              no
//!              ▼
//! smooth input ─► camera-relative move ─► sprint/stamina cost
//!   ─► gravity (uses last tick's grounded) ─► move primitive
//!   ─► animation params ─► facing rotation ─► stamina regen
//! ```

use glam::{Vec2, Vec3};
use tracing::warn;

use crate::core::math::{exp_blend, facing_rotation, smooth_damp};
use crate::game::animation::{AnimationFrame, AnimationSink, StaminaDisplay, TRIGGER_ROLL};
use crate::game::camera::CameraBasis;
use crate::game::config::{ConfigError, LocomotionConfig};
use crate::game::events::LocomotionEvent;
use crate::game::input::InputFrame;
use crate::game::motor::MovementPrimitive;
use crate::game::roll::{try_jump, try_start_roll};
use crate::game::state::{CharacterState, RollState};

/// Fraction of a tick under which a remaining roll timer counts as spent.
const ROLL_END_TOLERANCE: f32 = 1e-3;

/// Result of a tick.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TickOutput {
    /// Controller tick this output belongs to
    pub tick: u32,
    /// Displacement requested from the movement primitive
    pub displacement: Vec3,
    /// Grounded flag reported by the movement primitive
    pub grounded: bool,
    /// Animation parameters; `None` while a roll owns the character
    pub animation: Option<AnimationFrame>,
    /// A roll started since the previous output
    pub roll_triggered: bool,
    /// Stamina after this tick
    pub stamina: f32,
    /// Stamina capacity
    pub max_stamina: f32,
    /// Events generated since the previous output
    pub events: Vec<LocomotionEvent>,
}

impl TickOutput {
    /// Forward this output to the animation and HUD collaborators.
    pub fn publish<A, D>(&self, animator: &mut A, display: &mut D)
    where
        A: AnimationSink + ?Sized,
        D: StaminaDisplay + ?Sized,
    {
        if let Some(animation) = &self.animation {
            animation.apply(animator);
        }
        if self.roll_triggered {
            animator.set_trigger(TRIGGER_ROLL);
        }
        display.show(self.stamina, self.max_stamina);
    }
}

/// Third-person locomotion controller for one character.
pub struct LocomotionController<M: MovementPrimitive> {
    config: LocomotionConfig,
    state: CharacterState,
    motor: M,
    roll_trigger_pending: bool,
    events: Vec<LocomotionEvent>,
}

impl<M: MovementPrimitive> LocomotionController<M> {
    /// Validate the configuration and place a character at the motor's position.
    pub fn new(config: LocomotionConfig, motor: M) -> Result<Self, ConfigError> {
        config.validate()?;
        let state = CharacterState::new(motor.position(), &config);
        Ok(Self {
            config,
            state,
            motor,
            roll_trigger_pending: false,
            events: Vec::new(),
        })
    }

    /// Character state.
    pub fn state(&self) -> &CharacterState {
        &self.state
    }

    /// Active configuration.
    pub fn config(&self) -> &LocomotionConfig {
        &self.config
    }

    /// Movement primitive.
    pub fn motor(&self) -> &M {
        &self.motor
    }

    // =========================================================================
    // Input events
    // =========================================================================

    /// Store a new stick sample. Ignored while rolling.
    pub fn set_move_input(&mut self, input: Vec2) {
        if !self.state.is_rolling() {
            self.state.raw_input = input;
        }
    }

    /// Update the held sprint modifier.
    pub fn set_sprint_held(&mut self, held: bool) {
        self.state.sprint_held = held;
    }

    /// Request a roll. Returns true if the roll started.
    pub fn request_roll(&mut self, camera: &CameraBasis) -> bool {
        match try_start_roll(&mut self.state, &self.config, camera) {
            Some(event) => {
                self.roll_trigger_pending = true;
                self.events.push(event);
                true
            }
            None => false,
        }
    }

    /// Request a jump. Returns true if the jump started.
    pub fn request_jump(&mut self) -> bool {
        match try_jump(&mut self.state, &self.config) {
            Some(event) => {
                self.events.push(event);
                true
            }
            None => false,
        }
    }

    /// Feed one frame of input into the event handlers.
    fn apply_input(&mut self, frame: &InputFrame, camera: &CameraBasis) {
        self.set_move_input(frame.move_axis());
        self.set_sprint_held(frame.sprint_held());

        if frame.roll_pressed() {
            self.request_roll(camera);
        }
        if frame.jump_pressed() {
            self.request_jump();
        }
    }

    // =========================================================================
    // Tick
    // =========================================================================

    /// Run one frame.
    ///
    /// `dt` must be finite and positive; anything else is ignored.
    pub fn tick(&mut self, frame: &InputFrame, camera: &CameraBasis, dt: f32) -> TickOutput {
        if !(dt.is_finite() && dt > 0.0) {
            warn!(dt, "ignoring tick with invalid delta time");
            return TickOutput {
                tick: self.state.tick,
                grounded: self.state.grounded,
                stamina: self.state.stamina.current(),
                max_stamina: self.state.stamina.max(),
                ..Default::default()
            };
        }

        self.state.tick += 1;
        self.state.elapsed += dt;

        self.apply_input(frame, camera);

        let (displacement, animation) = if self.state.is_rolling() {
            (self.step_roll(dt), None)
        } else {
            let (displacement, animation) = self.step_locomotion(camera, dt);
            (displacement, Some(animation))
        };

        #[cfg(feature = "debug-tracing")]
        tracing::trace!(
            tick = self.state.tick,
            position = ?self.state.position,
            vertical_velocity = self.state.vertical_velocity,
            stamina = self.state.stamina.current(),
            rolling = self.state.is_rolling(),
            "tick"
        );

        TickOutput {
            tick: self.state.tick,
            displacement,
            grounded: self.state.grounded,
            animation,
            roll_triggered: std::mem::take(&mut self.roll_trigger_pending),
            stamina: self.state.stamina.current(),
            max_stamina: self.state.stamina.max(),
            events: std::mem::take(&mut self.events),
        }
    }

    /// Roll override: fixed-speed displacement and timer countdown only.
    fn step_roll(&mut self, dt: f32) -> Vec3 {
        let RollState::Rolling { timer, direction } = self.state.roll else {
            return Vec3::ZERO;
        };

        let displacement = direction * self.config.roll_speed * dt;
        self.apply_move(displacement);

        // Absorb f32 drift so a roll lasts exactly ceil(duration / dt) ticks
        let timer = timer - dt;
        if timer <= dt * ROLL_END_TOLERANCE {
            self.state.roll = RollState::Idle;
            self.events.push(LocomotionEvent::roll_finished(self.state.tick));
        } else {
            self.state.roll = RollState::Rolling { timer, direction };
        }

        displacement
    }

    /// Normal locomotion: smoothing, sprint, gravity, move, facing, regen.
    fn step_locomotion(&mut self, camera: &CameraBasis, dt: f32) -> (Vec3, AnimationFrame) {
        let tick = self.state.tick;
        let smooth_time = self.config.input_smooth_time();
        let state = &mut self.state;

        // Input smoothing
        state.smooth_input = smooth_damp(
            state.smooth_input,
            state.raw_input,
            &mut state.smooth_velocity,
            smooth_time,
            dt,
        );

        // Camera-relative movement
        let world_move = camera.project(state.smooth_input);
        let moving = state.is_moving();

        // Sprint and its stamina cost
        let sprint = state.sprint_held && moving && state.stamina.has_any();
        let speed = if sprint {
            self.config.speed * self.config.sprint_multiplier
        } else {
            self.config.speed
        };
        if sprint {
            state.stamina.drain(self.config.movement_cost, dt);
        }
        if sprint != state.sprinting {
            let event = if sprint {
                LocomotionEvent::sprint_started(tick)
            } else {
                LocomotionEvent::sprint_stopped(tick, !state.stamina.has_any())
            };
            self.events.push(event);
            state.sprinting = sprint;
        }

        // Gravity, against last tick's contact
        if !state.grounded {
            state.vertical_velocity += self.config.gravity * dt;
        } else if state.vertical_velocity < 0.0 {
            state.vertical_velocity = 0.0;
        }

        let displacement = (world_move * speed + Vec3::Y * state.vertical_velocity) * dt;
        self.apply_move(displacement);

        let state = &mut self.state;

        // Animation parameters use the facing from before this tick's turn
        let animation = AnimationFrame::from_world_move(world_move, state.orientation, moving, sprint);

        // Face the movement direction
        if moving {
            if let Some(target) = facing_rotation(world_move) {
                let blend = exp_blend(self.config.turn_rate, dt);
                state.orientation = state.orientation.slerp(target, blend);
            }
        }

        // Regen while not sprinting
        if !sprint {
            let was_full = state.stamina.current() >= state.stamina.max();
            state.stamina.regen(self.config.regen_rate, dt);
            if !was_full && state.stamina.current() >= state.stamina.max() {
                self.events.push(LocomotionEvent::stamina_full(tick));
            }
        }

        (displacement, animation)
    }

    /// Hand a displacement to the movement primitive and sync position
    /// and contact.
    fn apply_move(&mut self, displacement: Vec3) {
        let was_grounded = self.state.grounded;
        let outcome = self.motor.move_and_collide(displacement);

        self.state.position = self.motor.position();
        self.state.grounded = outcome.grounded;

        if outcome.grounded && !was_grounded {
            self.events.push(LocomotionEvent::landed(
                self.state.tick,
                self.state.vertical_velocity,
            ));
        }
    }
}
