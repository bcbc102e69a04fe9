//! Cyclic Coordinate Descent (CCD) inverse kinematics
//!
//! The chain owns joint transforms plus the target; the solver swings joints
//! from the effector's neighbor back toward the base until the end effector
//! is within tolerance of the target, either in whole passes (`solve_full`)
//! or one joint per tick (`step`).

mod chain;
mod solver;

pub use chain::{Joint, KinematicChain};
pub use solver::CcdSolver;
