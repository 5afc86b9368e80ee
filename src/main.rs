use clap::Parser;

use grid_pathfinder::config::Config;
use grid_pathfinder::visualizer;

fn main() {
    env_logger::init();
    let config = Config::parse();

    if !config.quiet {
        println!("Starting pathfinding visualizer...");
        match (&config.layout, config.random) {
            (Some(path), _) => println!("Layout: {}", path.display()),
            (None, true) => println!(
                "Random grid: {}x{}, walls: {}",
                config.rows,
                config.columns(),
                config.num_walls
            ),
            (None, false) => println!("Layout: showcase"),
        }
        println!(
            "Moves: {}",
            if config.diagonal {
                "cardinal + diagonal"
            } else {
                "cardinal"
            }
        );
        if config.animate {
            println!("Animation enabled with {}ms delay", config.delay_ms);
        }
        println!();
    }

    if let Err(e) = visualizer::run(&config) {
        eprintln!("Visualizer failed: {:#}", e);
        std::process::exit(1);
    }
}
