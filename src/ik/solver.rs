//! Cyclic Coordinate Descent solver

use glam::{Quat, Vec3};

use super::chain::KinematicChain;

/// CCD solver over an owned chain.
///
/// `solve_full` runs whole passes in one call; `step` swings one joint per
/// call for interactive single-stepping. The cursor is the only state
/// carried between ticks.
#[derive(Debug, Clone)]
pub struct CcdSolver {
    chain: KinematicChain,
    /// Joint the next `step` call visits; runs from `len - 2` down to 0.
    cursor: usize,
}

impl CcdSolver {
    pub fn new(chain: KinematicChain) -> Self {
        let cursor = chain.len() - 2;
        Self { chain, cursor }
    }

    pub fn chain(&self) -> &KinematicChain {
        &self.chain
    }

    pub fn chain_mut(&mut self) -> &mut KinematicChain {
        &mut self.chain
    }

    /// Retarget without touching solver state.
    pub fn set_target(&mut self, target: Vec3) {
        self.chain.target = target;
    }

    /// Whether the end effector is within tolerance of the target. Pure
    /// query.
    pub fn converged(&self) -> bool {
        self.chain.distance_to_target() <= self.chain.tolerance()
    }

    /// Run up to `max_iterations` passes over the chain, returning as soon
    /// as it converges; convergence is re-checked after every joint, so a
    /// pass can end mid-chain. Returns whether the chain converged; `false`
    /// leaves it in its best-effort state rather than failing.
    pub fn solve_full(&mut self, max_iterations: u32) -> bool {
        if self.converged() {
            return true;
        }
        for _ in 0..max_iterations {
            for joint in (0..self.chain.len() - 1).rev() {
                self.swing_toward_target(joint);
                if self.converged() {
                    return true;
                }
            }
        }
        false
    }

    /// Swing exactly one joint. A call that finds the chain already
    /// converged resets the cursor to the effector's neighbor and rotates
    /// nothing; otherwise the cursor moves one joint toward the base,
    /// wrapping back so repeated calls cycle the chain endlessly.
    pub fn step(&mut self) {
        if self.converged() {
            self.cursor = self.chain.len() - 2;
            return;
        }
        self.swing_toward_target(self.cursor);
        self.cursor = if self.cursor == 0 {
            self.chain.len() - 2
        } else {
            self.cursor - 1
        };
    }

    /// Joint the next `step` call will visit.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Apply the shortest-arc rotation carrying (effector - joint) onto
    /// (target - joint), composed over the joint's existing world
    /// orientation.
    fn swing_toward_target(&mut self, joint: usize) {
        let position = self.chain.joints()[joint].position;
        let to_effector = (self.chain.end_effector() - position).normalize_or_zero();
        let to_target = (self.chain.target - position).normalize_or_zero();
        if to_effector == Vec3::ZERO || to_target == Vec3::ZERO {
            // Joint coincides with the effector or the target; there is no
            // swing plane, so leave the joint alone this pass.
            log::debug!("skipping degenerate swing at joint {joint}");
            return;
        }
        self.chain
            .rotate_joint(joint, Quat::from_rotation_arc(to_effector, to_target));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn chain(positions: &[Vec3], target: Vec3) -> KinematicChain {
        KinematicChain::new(positions, target, 0.001).unwrap()
    }

    #[test]
    fn test_converged_at_construction_rotates_nothing() {
        let effector = Vec3::new(2.0, 0.0, 0.0);
        let mut solver = CcdSolver::new(chain(&[Vec3::ZERO, Vec3::X, effector], effector));
        assert!(solver.converged());

        let before = solver.chain().joints().to_vec();
        assert!(solver.solve_full(50));
        solver.step();
        assert_eq!(solver.chain().joints(), &before[..]);
    }

    #[test]
    fn test_two_joint_chain_reaches_target() {
        let target = Vec3::new(0.0, 1.0, 0.0);
        let mut solver = CcdSolver::new(chain(&[Vec3::ZERO, Vec3::X], target));
        assert!(solver.solve_full(50));
        assert!(solver.chain().distance_to_target() <= 0.001);
    }

    #[test]
    fn test_three_joint_chain_reaches_target() {
        let mut solver = CcdSolver::new(chain(
            &[Vec3::ZERO, Vec3::X, Vec3::new(2.0, 0.0, 0.0)],
            Vec3::new(1.0, 1.0, 0.3),
        ));
        assert!(solver.solve_full(50));
        assert!(solver.chain().distance_to_target() <= 0.001);
    }

    #[test]
    fn test_unreachable_target_is_best_effort() {
        let target = Vec3::new(10.0, 0.0, 0.0);
        let mut solver = CcdSolver::new(chain(&[Vec3::ZERO, Vec3::X], target));
        assert!(!solver.solve_full(20));
        // Fully stretched toward the target is the best a 1-bone chain can do.
        assert!(
            solver
                .chain()
                .end_effector()
                .abs_diff_eq(Vec3::X, 1e-4)
        );
    }

    #[test]
    fn test_step_cursor_cycles_every_joint_once() {
        // Unreachable target keeps convergence from interrupting the cycle.
        let mut solver = CcdSolver::new(chain(
            &[
                Vec3::ZERO,
                Vec3::X,
                Vec3::new(2.0, 0.0, 0.0),
                Vec3::new(3.0, 0.0, 0.0),
                Vec3::new(4.0, 0.0, 0.0),
            ],
            Vec3::new(100.0, 0.0, 0.0),
        ));

        let count = solver.chain().len();
        let mut visited = Vec::new();
        for _ in 0..count - 1 {
            visited.push(solver.cursor());
            solver.step();
        }
        assert_eq!(visited, vec![3, 2, 1, 0]);
        assert_eq!(solver.cursor(), count - 2);
    }

    #[test]
    fn test_step_resets_cursor_on_convergence() {
        let target = Vec3::new(0.0, 1.5, 0.0);
        let mut solver =
            CcdSolver::new(chain(&[Vec3::ZERO, Vec3::X, Vec3::new(2.0, 0.0, 0.0)], target));

        // Step until converged, then one more call to observe the reset.
        for _ in 0..200 {
            solver.step();
            if solver.converged() {
                break;
            }
        }
        assert!(solver.converged());
        solver.step();
        assert_eq!(solver.cursor(), solver.chain().len() - 2);
    }

    #[test]
    fn test_degenerate_target_on_joint_is_skipped() {
        // Target sits exactly on the rotating joint: no swing plane exists,
        // the solver must not panic or produce NaN.
        let mut solver = CcdSolver::new(chain(&[Vec3::ZERO, Vec3::X], Vec3::ZERO));
        assert!(!solver.solve_full(5));
        assert!(solver.chain().end_effector().is_finite());
    }

    proptest! {
        #[test]
        fn two_joint_chain_reaches_any_unit_target(
            x in -1.0f32..1.0,
            y in -1.0f32..1.0,
            z in -1.0f32..1.0,
        ) {
            let direction = Vec3::new(x, y, z);
            prop_assume!(direction.length() > 0.01);
            let target = direction.normalize();

            let mut solver = CcdSolver::new(chain(&[Vec3::ZERO, Vec3::X], target));
            prop_assert!(solver.solve_full(50));
            prop_assert!(solver.chain().distance_to_target() <= 0.001);
        }
    }
}
