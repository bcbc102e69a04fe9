//! Walk strategies and walker state

use glam::IVec2;
use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::grid::FloorGrid;
use crate::error::ConfigError;

/// One of the four cardinal headings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    North,
    South,
    East,
    West,
}

impl Direction {
    /// Map a draw in `0..4` onto a heading. The mapping (0 → +y, 1 → -y,
    /// 2 → +x, 3 → -x) is fixed; seeded runs depend on it.
    fn from_index(index: u32) -> Self {
        match index {
            3 => Direction::West,
            2 => Direction::East,
            1 => Direction::South,
            _ => Direction::North,
        }
    }

    fn random(rng: &mut Pcg32) -> Self {
        Self::from_index(rng.random_range(0..4))
    }

    /// Axis delta for one step.
    pub fn delta(self) -> IVec2 {
        match self {
            Direction::North => IVec2::new(0, 1),
            Direction::South => IVec2::new(0, -1),
            Direction::East => IVec2::new(1, 0),
            Direction::West => IVec2::new(-1, 0),
        }
    }
}

/// A live walker: grid position plus current heading.
#[derive(Debug, Clone, Copy)]
struct Walker {
    cell: IVec2,
    direction: Direction,
}

impl Walker {
    fn at_mid(grid: &FloorGrid, rng: &mut Pcg32) -> Self {
        Self {
            cell: IVec2::splat(grid.mid()),
            direction: Direction::random(rng),
        }
    }
}

/// How the walk advances and how its walker population evolves.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum WalkStrategy {
    /// A single walker drawing a fresh random heading every step.
    Simple,
    /// A single walker holding its heading, redrawn with `turn_chance` each
    /// step.
    Turning { turn_chance: f32 },
    /// Turning walk over a dynamic walker population, serviced round-robin.
    Multi {
        turn_chance: f32,
        max_walkers: u32,
        walker_spawn_chance: f32,
        walker_remove_chance: f32,
    },
}

impl Default for WalkStrategy {
    fn default() -> Self {
        WalkStrategy::Simple
    }
}

impl WalkStrategy {
    /// Fail fast on out-of-range parameters instead of clamping.
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        match *self {
            WalkStrategy::Simple => Ok(()),
            WalkStrategy::Turning { turn_chance } => probability("turn_chance", turn_chance),
            WalkStrategy::Multi {
                turn_chance,
                max_walkers,
                walker_spawn_chance,
                walker_remove_chance,
            } => {
                probability("turn_chance", turn_chance)?;
                probability("walker_spawn_chance", walker_spawn_chance)?;
                probability("walker_remove_chance", walker_remove_chance)?;
                if max_walkers < 1 {
                    return Err(ConfigError::NoWalkers);
                }
                Ok(())
            }
        }
    }

    /// Run the walk until `steps` floor-settings have been taken.
    pub(crate) fn run(&self, grid: &mut FloorGrid, rng: &mut Pcg32, steps: u32) {
        match *self {
            WalkStrategy::Simple => simple_walk(grid, rng, steps),
            WalkStrategy::Turning { turn_chance } => turning_walk(grid, rng, steps, turn_chance),
            WalkStrategy::Multi {
                turn_chance,
                max_walkers,
                walker_spawn_chance,
                walker_remove_chance,
            } => {
                let mut walk = MultiWalk::new(
                    grid,
                    rng,
                    steps,
                    turn_chance,
                    max_walkers,
                    walker_spawn_chance,
                    walker_remove_chance,
                );
                while !walk.done() {
                    walk.pass(grid, rng);
                }
            }
        }
    }
}

fn probability(name: &'static str, value: f32) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::ProbabilityOutOfRange { name, value })
    }
}

fn simple_walk(grid: &mut FloorGrid, rng: &mut Pcg32, steps: u32) {
    let mut cell = IVec2::splat(grid.mid());
    for _ in 0..steps {
        cell += Direction::random(rng).delta();
        grid.set_floor(cell);
    }
}

fn turning_walk(grid: &mut FloorGrid, rng: &mut Pcg32, steps: u32, turn_chance: f32) {
    let mut walker = Walker::at_mid(grid, rng);
    for _ in 0..steps {
        if rng.random::<f32>() <= turn_chance {
            walker.direction = Direction::random(rng);
        }
        walker.cell += walker.direction.delta();
        grid.set_floor(walker.cell);
    }
}

/// Multi-walker walk state, advanced one round-robin pass at a time.
struct MultiWalk {
    walkers: Vec<Walker>,
    taken: u32,
    budget: u32,
    turn_chance: f32,
    max_walkers: u32,
    spawn_chance: f32,
    remove_chance: f32,
}

impl MultiWalk {
    fn new(
        grid: &FloorGrid,
        rng: &mut Pcg32,
        budget: u32,
        turn_chance: f32,
        max_walkers: u32,
        spawn_chance: f32,
        remove_chance: f32,
    ) -> Self {
        Self {
            walkers: vec![Walker::at_mid(grid, rng)],
            taken: 0,
            budget,
            turn_chance,
            max_walkers,
            spawn_chance,
            remove_chance,
        }
    }

    fn done(&self) -> bool {
        self.taken >= self.budget
    }

    #[cfg(test)]
    fn population(&self) -> usize {
        self.walkers.len()
    }

    /// One pass over the live walker list.
    ///
    /// The list can grow and shrink mid-pass: walkers appended during the
    /// pass are still visited before it ends, and removing the current
    /// walker must not skip the element that slides into its slot. Hitting
    /// the step budget exits immediately, leaving the rest of the pass
    /// unvisited.
    fn pass(&mut self, grid: &mut FloorGrid, rng: &mut Pcg32) {
        let mut current = 0;
        while current < self.walkers.len() {
            if rng.random::<f32>() <= self.turn_chance {
                self.walkers[current].direction = Direction::random(rng);
            }

            let delta = self.walkers[current].direction.delta();
            self.walkers[current].cell += delta;
            grid.set_floor(self.walkers[current].cell);

            self.taken += 1;
            if self.done() {
                return;
            }

            if (self.walkers.len() as u32) < self.max_walkers
                && rng.random::<f32>() <= self.spawn_chance
            {
                let spawned = Walker {
                    cell: self.walkers[current].cell,
                    direction: Direction::random(rng),
                };
                self.walkers.push(spawned);
            }

            if self.walkers.len() > 1 && rng.random::<f32>() <= self.remove_chance {
                self.walkers.remove(current);
            } else {
                current += 1;
            }
        }
    }
}
