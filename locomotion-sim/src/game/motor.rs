//! Movement Primitive
//!
//! The controller never resolves collisions itself. It hands a desired
//! displacement to a `MovementPrimitive` and reads back where the body
//! ended up and whether it is standing on something.

use glam::Vec3;

/// Result of one collide-and-slide move.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct MoveOutcome {
    /// Body is in contact with a supporting surface after the move
    pub grounded: bool,
}

/// Opaque collision-aware translation.
pub trait MovementPrimitive {
    /// Translate the body by `displacement`, resolving collisions.
    fn move_and_collide(&mut self, displacement: Vec3) -> MoveOutcome;

    /// Current body position.
    fn position(&self) -> Vec3;
}

impl<M: MovementPrimitive + ?Sized> MovementPrimitive for &mut M {
    fn move_and_collide(&mut self, displacement: Vec3) -> MoveOutcome {
        (**self).move_and_collide(displacement)
    }

    fn position(&self) -> Vec3 {
        (**self).position()
    }
}

impl<M: MovementPrimitive + ?Sized> MovementPrimitive for Box<M> {
    fn move_and_collide(&mut self, displacement: Vec3) -> MoveOutcome {
        (**self).move_and_collide(displacement)
    }

    fn position(&self) -> Vec3 {
        (**self).position()
    }
}

/// Infinite horizontal floor at a fixed height.
///
/// Anything that would sink below the floor is snapped onto it and
/// reported grounded.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FlatGround {
    position: Vec3,
    floor_height: f32,
}

impl FlatGround {
    /// Body starts at `position`, floor at `floor_height`.
    pub fn new(position: Vec3, floor_height: f32) -> Self {
        Self {
            position: Vec3::new(position.x, position.y.max(floor_height), position.z),
            floor_height,
        }
    }

    /// Floor at y = 0 with the body standing on it at the origin.
    pub fn origin() -> Self {
        Self::new(Vec3::ZERO, 0.0)
    }

    /// Floor height.
    pub fn floor_height(&self) -> f32 {
        self.floor_height
    }
}

impl Default for FlatGround {
    fn default() -> Self {
        Self::origin()
    }
}

impl MovementPrimitive for FlatGround {
    fn move_and_collide(&mut self, displacement: Vec3) -> MoveOutcome {
        let mut next = self.position + displacement;
        let grounded = next.y <= self.floor_height;
        if grounded {
            next.y = self.floor_height;
        }
        self.position = next;
        MoveOutcome { grounded }
    }

    fn position(&self) -> Vec3 {
        self.position
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flat_ground_snaps_to_floor() {
        let mut ground = FlatGround::origin();
        let outcome = ground.move_and_collide(Vec3::new(1.0, -0.5, 0.0));
        assert!(outcome.grounded);
        assert_eq!(ground.position(), Vec3::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn test_flat_ground_airborne_above_floor() {
        let mut ground = FlatGround::origin();
        let outcome = ground.move_and_collide(Vec3::new(0.0, 0.3, 0.0));
        assert!(!outcome.grounded);
        assert_eq!(ground.position().y, 0.3);
    }

    #[test]
    fn test_flat_ground_spawn_clamped() {
        let ground = FlatGround::new(Vec3::new(0.0, -2.0, 0.0), 1.0);
        assert_eq!(ground.position().y, 1.0);
        assert_eq!(ground.floor_height(), 1.0);
    }

    #[test]
    fn test_mut_ref_forwards() {
        fn step<M: MovementPrimitive>(mut motor: M) -> MoveOutcome {
            motor.move_and_collide(Vec3::X)
        }

        let mut ground = FlatGround::origin();
        assert!(step(&mut ground).grounded);
        assert_eq!(ground.position(), Vec3::X);
    }
}
