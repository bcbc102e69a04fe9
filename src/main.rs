//! Gridwalk demo driver
//!
//! Generates a level (optionally from a JSON config file given as the first
//! argument), prints it as ASCII, then runs a CCD chain to convergence.

use std::collections::HashMap;

use glam::{IVec2, Vec3};
use gridwalk::consts::*;
use gridwalk::{
    CcdSolver, CellKind, GenerationResult, GeneratorConfig, KinematicChain, LevelGenerator,
    WalkStrategy,
};

fn main() {
    env_logger::init();

    let config = match std::env::args().nth(1) {
        Some(path) => match load_config(&path) {
            Ok(config) => config,
            Err(err) => {
                eprintln!("failed to load config {path}: {err}");
                std::process::exit(1);
            }
        },
        None => GeneratorConfig {
            seed: 0,
            steps: 200,
            strategy: WalkStrategy::Multi {
                turn_chance: DEFAULT_TURN_CHANCE,
                max_walkers: DEFAULT_MAX_WALKERS,
                walker_spawn_chance: DEFAULT_SPAWN_CHANCE,
                walker_remove_chance: DEFAULT_REMOVE_CHANCE,
            },
        },
    };

    let generator = match LevelGenerator::new(config) {
        Ok(generator) => generator,
        Err(err) => {
            eprintln!("invalid config: {err}");
            std::process::exit(1);
        }
    };
    let result = generator.generate();
    log::info!(
        "generated {} floors / {} walls with seed {}",
        result.floors().count(),
        result.walls().count(),
        result.seed
    );
    print_level(&result);

    run_ik_demo();
}

fn load_config(path: &str) -> Result<GeneratorConfig, Box<dyn std::error::Error>> {
    let json = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&json)?)
}

/// Dump the level around its used extent; walls reach one cell past it.
fn print_level(result: &GenerationResult) {
    let cells: HashMap<(i32, i32), CellKind> = result
        .placements
        .iter()
        .map(|placement| ((placement.cell.x, placement.cell.y), placement.kind))
        .collect();

    let min = result.extent.min - IVec2::ONE;
    let max = result.extent.max + IVec2::ONE;
    for y in (min.y..=max.y).rev() {
        let mut line = String::with_capacity((max.x - min.x + 1) as usize);
        for x in min.x..=max.x {
            line.push(match cells.get(&(x, y)) {
                Some(CellKind::Floor) => '.',
                Some(CellKind::Wall) => '#',
                None => ' ',
            });
        }
        println!("{line}");
    }
}

fn run_ik_demo() {
    let chain = KinematicChain::new(
        &[
            Vec3::ZERO,
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(2.0, 0.0, 0.0),
            Vec3::new(3.0, 0.0, 0.0),
        ],
        Vec3::new(1.5, 1.5, 0.5),
        DEFAULT_IK_TOLERANCE,
    )
    .expect("demo chain parameters are valid");

    let mut solver = CcdSolver::new(chain);
    let converged = solver.solve_full(DEFAULT_IK_ITERATIONS);
    println!(
        "ik: converged={converged} residual={:.6}",
        solver.chain().distance_to_target()
    );
    for (index, joint) in solver.chain().joints().iter().enumerate() {
        println!(
            "  joint {index}: ({:.3}, {:.3}, {:.3})",
            joint.position.x, joint.position.y, joint.position.z
        );
    }
}
