//! Kinematic chain: joints, target, and forward kinematics

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// One joint of the chain: world-space position and orientation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Joint {
    pub position: Vec3,
    pub rotation: Quat,
}

/// An ordered joint chain reaching for a target.
///
/// Index 0 is the base; the last joint is the end effector and is never
/// rotated. The chain length is fixed for the life of the solver. Bone
/// offsets are captured at construction in each parent's local frame, and
/// the chain re-derives descendant positions itself after a rotation; there
/// is no scene graph to do it.
#[derive(Debug, Clone)]
pub struct KinematicChain {
    joints: Vec<Joint>,
    /// Bone vector from joint `i - 1` to joint `i`, in the parent's frame at
    /// capture time. Entry 0 is unused.
    offsets: Vec<Vec3>,
    /// World-space point the end effector reaches for. The host retargets
    /// this freely between ticks.
    pub target: Vec3,
    tolerance: f32,
}

impl KinematicChain {
    /// Build a chain from rest-pose joint positions; orientations start at
    /// identity.
    pub fn new(positions: &[Vec3], target: Vec3, tolerance: f32) -> Result<Self, ConfigError> {
        let joints = positions
            .iter()
            .map(|&position| Joint {
                position,
                rotation: Quat::IDENTITY,
            })
            .collect();
        Self::from_joints(joints, target, tolerance)
    }

    /// Build a chain from host-supplied joint transforms.
    pub fn from_joints(
        joints: Vec<Joint>,
        target: Vec3,
        tolerance: f32,
    ) -> Result<Self, ConfigError> {
        if joints.len() < 2 {
            return Err(ConfigError::ChainTooShort(joints.len()));
        }
        if !(tolerance > 0.0 && tolerance.is_finite()) {
            return Err(ConfigError::InvalidTolerance(tolerance));
        }
        let offsets = std::iter::once(Vec3::ZERO)
            .chain(
                joints
                    .windows(2)
                    .map(|pair| pair[0].rotation.inverse() * (pair[1].position - pair[0].position)),
            )
            .collect();
        Ok(Self {
            joints,
            offsets,
            target,
            tolerance,
        })
    }

    pub fn len(&self) -> usize {
        self.joints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.joints.is_empty()
    }

    pub fn joints(&self) -> &[Joint] {
        &self.joints
    }

    /// World position of the last joint.
    pub fn end_effector(&self) -> Vec3 {
        self.joints[self.joints.len() - 1].position
    }

    pub fn tolerance(&self) -> f32 {
        self.tolerance
    }

    /// Distance from the end effector to the target.
    pub fn distance_to_target(&self) -> f32 {
        self.end_effector().distance(self.target)
    }

    /// Pre-multiply a world-space rotation onto joint `index` and propagate
    /// it down the chain: every descendant orientation picks up the same
    /// rotation and descendant positions are re-derived from the stored
    /// bone offsets.
    pub(crate) fn rotate_joint(&mut self, index: usize, rotation: Quat) {
        for joint in &mut self.joints[index..] {
            joint.rotation = (rotation * joint.rotation).normalize();
        }
        for i in index + 1..self.joints.len() {
            self.joints[i].position =
                self.joints[i - 1].position + self.joints[i - 1].rotation * self.offsets[i];
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_short_chain() {
        assert!(matches!(
            KinematicChain::new(&[Vec3::ZERO], Vec3::ONE, 0.001),
            Err(ConfigError::ChainTooShort(1))
        ));
        assert!(matches!(
            KinematicChain::new(&[], Vec3::ONE, 0.001),
            Err(ConfigError::ChainTooShort(0))
        ));
    }

    #[test]
    fn test_rejects_bad_tolerance() {
        let positions = [Vec3::ZERO, Vec3::X];
        assert!(matches!(
            KinematicChain::new(&positions, Vec3::ONE, 0.0),
            Err(ConfigError::InvalidTolerance(_))
        ));
        assert!(matches!(
            KinematicChain::new(&positions, Vec3::ONE, f32::NAN),
            Err(ConfigError::InvalidTolerance(_))
        ));
    }

    #[test]
    fn test_rotate_base_moves_whole_chain() {
        let mut chain = KinematicChain::new(
            &[Vec3::ZERO, Vec3::X, Vec3::new(2.0, 0.0, 0.0)],
            Vec3::ONE,
            0.001,
        )
        .unwrap();

        // Quarter turn about +z at the base swings the chain onto +y.
        chain.rotate_joint(0, Quat::from_rotation_z(std::f32::consts::FRAC_PI_2));
        assert!(chain.joints()[1].position.abs_diff_eq(Vec3::Y, 1e-5));
        assert!(
            chain
                .end_effector()
                .abs_diff_eq(Vec3::new(0.0, 2.0, 0.0), 1e-5)
        );
        assert_eq!(chain.joints()[0].position, Vec3::ZERO);
    }

    #[test]
    fn test_rotate_mid_joint_leaves_parents_fixed() {
        let mut chain = KinematicChain::new(
            &[Vec3::ZERO, Vec3::X, Vec3::new(2.0, 0.0, 0.0)],
            Vec3::ONE,
            0.001,
        )
        .unwrap();

        chain.rotate_joint(1, Quat::from_rotation_z(std::f32::consts::FRAC_PI_2));
        assert_eq!(chain.joints()[0].position, Vec3::ZERO);
        assert_eq!(chain.joints()[1].position, Vec3::X);
        assert!(
            chain
                .end_effector()
                .abs_diff_eq(Vec3::new(1.0, 1.0, 0.0), 1e-5)
        );
    }
}
