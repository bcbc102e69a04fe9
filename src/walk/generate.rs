//! Generator configuration, the generate pass, and placement output

use glam::{IVec2, Vec2};
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::grid::{Extent, FloorGrid};
use super::strategy::WalkStrategy;
use crate::consts::DEFAULT_STEPS;
use crate::error::ConfigError;

/// What a placement record stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellKind {
    Floor,
    Wall,
}

/// One cell of the finished level.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    /// Grid coordinates, `0..size` on both axes.
    pub cell: IVec2,
    /// Grid coordinates shifted so the used area is roughly centered on the
    /// origin, ready for host scenery placement.
    pub world: Vec2,
    pub kind: CellKind,
}

/// Host-facing generation parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Seed for reproducible output; 0 draws a fresh nondeterministic seed.
    pub seed: u64,
    /// Number of floor-setting steps the walk takes.
    pub steps: u32,
    pub strategy: WalkStrategy,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            steps: DEFAULT_STEPS,
            strategy: WalkStrategy::default(),
        }
    }
}

/// Finished level: placements in row-major scan order plus the used extent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationResult {
    /// The seed actually used (resolved when the config asked for a random
    /// one), for reproducing the run.
    pub seed: u64,
    pub placements: Vec<Placement>,
    pub extent: Extent,
}

impl GenerationResult {
    pub fn floors(&self) -> impl Iterator<Item = &Placement> {
        self.placements
            .iter()
            .filter(|p| p.kind == CellKind::Floor)
    }

    pub fn walls(&self) -> impl Iterator<Item = &Placement> {
        self.placements.iter().filter(|p| p.kind == CellKind::Wall)
    }
}

/// A single-use level generator.
///
/// Construction validates the config, allocates the grid, and seeds the RNG;
/// `generate` consumes the generator, so a configured instance runs exactly
/// once.
#[derive(Debug)]
pub struct LevelGenerator {
    grid: FloorGrid,
    rng: Pcg32,
    seed: u64,
    steps: u32,
    strategy: WalkStrategy,
}

impl LevelGenerator {
    pub fn new(config: GeneratorConfig) -> Result<Self, ConfigError> {
        config.strategy.validate()?;
        let seed = if config.seed == 0 {
            let drawn = rand::rng().random_range(1..u64::MAX);
            log::debug!("seed 0 requested, drew {drawn}");
            drawn
        } else {
            config.seed
        };
        Ok(Self {
            grid: FloorGrid::new(config.steps),
            rng: Pcg32::seed_from_u64(seed),
            seed,
            steps: config.steps,
            strategy: config.strategy,
        })
    }

    /// Run the walk, then derive walls and centered world coordinates.
    pub fn generate(mut self) -> GenerationResult {
        self.strategy
            .run(&mut self.grid, &mut self.rng, self.steps);

        let extent = self.grid.extent();
        let used = extent.size();
        let offset = extent.min.as_vec2() + used.as_vec2() / 2.0;

        // Mark walls in a mask first so shared neighbors collapse to one
        // record, then emit everything in one row-major scan.
        let size = self.grid.size();
        let mut walls = vec![false; (size * size) as usize];
        for x in 0..size {
            for y in 0..size {
                let cell = IVec2::new(x, y);
                if !self.grid.is_floor(cell) {
                    continue;
                }
                for neighbor in neighbors8(cell) {
                    if self.grid.in_bounds(neighbor) && !self.grid.is_floor(neighbor) {
                        walls[(neighbor.y * size + neighbor.x) as usize] = true;
                    }
                }
            }
        }

        let mut placements = Vec::new();
        for x in 0..size {
            for y in 0..size {
                let cell = IVec2::new(x, y);
                let kind = if self.grid.is_floor(cell) {
                    CellKind::Floor
                } else if walls[(y * size + x) as usize] {
                    CellKind::Wall
                } else {
                    continue;
                };
                placements.push(Placement {
                    cell,
                    world: cell.as_vec2() - offset,
                    kind,
                });
            }
        }

        log::debug!(
            "generated {} placements (seed {}, {} steps)",
            placements.len(),
            self.seed,
            self.steps
        );

        GenerationResult {
            seed: self.seed,
            placements,
            extent,
        }
    }
}

const NEIGHBOR_DELTAS: [IVec2; 8] = [
    IVec2::new(-1, -1),
    IVec2::new(-1, 0),
    IVec2::new(-1, 1),
    IVec2::new(1, -1),
    IVec2::new(1, 0),
    IVec2::new(1, 1),
    IVec2::new(0, -1),
    IVec2::new(0, 1),
];

fn neighbors8(cell: IVec2) -> impl Iterator<Item = IVec2> {
    NEIGHBOR_DELTAS.iter().map(move |delta| cell + *delta)
}
