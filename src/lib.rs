//! Gridwalk - procedural level generation and inverse kinematics
//!
//! Core modules:
//! - `walk`: Grid-based random-walk level generator
//! - `ik`: Cyclic Coordinate Descent (CCD) chain solver
//! - `scheduler`: Round-robin registry for spreading costly updates
//! - `fade`: Tick-driven color fade state machine
//!
//! Both engines are single-threaded and synchronous: a host driver owns each
//! instance, calls it once (`generate`) or once per tick (`step`/`tick`), and
//! reads back the result. Nothing in here touches a renderer or a scene
//! graph.

pub mod error;
pub mod fade;
pub mod ik;
pub mod scheduler;
pub mod walk;

pub use error::ConfigError;
pub use fade::ColorFade;
pub use ik::{CcdSolver, Joint, KinematicChain};
pub use scheduler::RoundRobin;
pub use walk::{
    CellKind, GenerationResult, GeneratorConfig, LevelGenerator, Placement, WalkStrategy,
};

/// Default tuning values shared by the library and the demo binary
pub mod consts {
    /// Default number of floor-setting steps for a walk
    pub const DEFAULT_STEPS: u32 = 1000;
    /// Default chance to redraw a walker's heading each step
    pub const DEFAULT_TURN_CHANCE: f32 = 0.2;
    /// Default cap on concurrent walkers
    pub const DEFAULT_MAX_WALKERS: u32 = 10;
    /// Default chance to spawn a new walker after a step
    pub const DEFAULT_SPAWN_CHANCE: f32 = 0.2;
    /// Default chance to remove the current walker after a step
    pub const DEFAULT_REMOVE_CHANCE: f32 = 0.2;

    /// Default CCD distance tolerance
    pub const DEFAULT_IK_TOLERANCE: f32 = 0.001;
    /// Default CCD pass budget per tick
    pub const DEFAULT_IK_ITERATIONS: u32 = 10;
}
