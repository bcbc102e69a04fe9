//! Grid-based random-walk level generation
//!
//! A generator owns a bounded occupancy grid and a seeded RNG, runs one of
//! three walk strategies until the step budget is spent, then derives wall
//! placements from the 8-neighborhood of every floor cell. Generation must
//! be deterministic for any nonzero seed:
//! - Seeded RNG only
//! - Output emitted in a single row-major grid scan (stable order)
//! - No platform dependencies

mod generate;
mod grid;
mod strategy;

pub use generate::{CellKind, GenerationResult, GeneratorConfig, LevelGenerator, Placement};
pub use grid::{Extent, FloorGrid};
pub use strategy::{Direction, WalkStrategy};
