//! Terminal host for the search engine: loads a grid, runs one search and
//! redraws the grid at every animation pause.

use anyhow::{Context, Result};
use log::info;
use std::fs;
use std::thread;
use std::time::Duration;

use crate::algorithms::a_star::ReferenceAStar;
use crate::algorithms::best_first::{Exhaustion, SearchEngine, SearchOutcome, SearchReport};
use crate::config::Config;
use crate::grid::Grid;
use crate::pacing::Pacer;
use crate::statistics::RouteQuality;

const LEGEND: &str =
    "Legend: S=Origin, G=Destination, #=Wall, R=Recharger, o=Checked, x=Explored, *=Path, .=Empty";

/// Redraws the grid, then sleeps for the pause duration.
#[derive(Debug, Clone, Default)]
pub struct TerminalPacer {
    redraw: bool,
    frames: usize,
}

impl TerminalPacer {
    pub fn new(redraw: bool) -> Self {
        TerminalPacer { redraw, frames: 0 }
    }

    pub fn frames(&self) -> usize {
        self.frames
    }
}

impl Pacer<Grid> for TerminalPacer {
    fn pause(&mut self, grid: &Grid, duration: Duration) {
        self.frames += 1;
        if self.redraw {
            clear_screen();
            println!("=== PATHFINDING VISUALIZER ===");
            println!("Frame: {} | Delay: {:?}", self.frames, duration);
            println!("{}", LEGEND);
            print!("{}", grid.render_with_axes());
        }
        thread::sleep(duration);
    }
}

/// Picks the grid source: a layout file, a random grid, or the showcase.
pub fn load_grid(config: &Config) -> Result<Grid> {
    if let Some(path) = &config.layout {
        let layout = fs::read_to_string(path)
            .with_context(|| format!("failed to read layout {}", path.display()))?;
        return layout
            .parse()
            .with_context(|| format!("failed to parse layout {}", path.display()));
    }

    if config.random {
        return Grid::random(config.rows, config.columns(), config.num_walls, config.seed)
            .context("failed to generate random grid");
    }

    Ok(Grid::showcase())
}

/// Runs one search session and prints its results.
pub fn run(config: &Config) -> Result<SearchReport> {
    let search_config = config.search_config();
    search_config.validate()?;

    let grid = load_grid(config)?;
    let optimal_steps =
        ReferenceAStar::new(search_config.include_diagonal_directions).step_count(&grid);
    info!(
        "loaded {}x{} grid, reference optimum {:?}",
        grid.rows(),
        grid.columns(),
        optimal_steps
    );

    if !config.quiet {
        println!("{}", LEGEND);
        print!("{}", grid.render_with_axes());
        println!();
    }

    let mut engine = SearchEngine::new(grid).with_pacer(TerminalPacer::new(!config.quiet));
    let report = {
        let mut run = engine.start(&search_config)?;
        if let Some(timeout_ms) = config.timeout_ms {
            let token = run.cancellation_token();
            thread::spawn(move || {
                thread::sleep(Duration::from_millis(timeout_ms));
                token.cancel();
            });
        }
        loop {
            if let Some(report) = run.step() {
                break report;
            }
        }
    };
    let grid = engine.into_grid();

    if !config.quiet {
        if search_config.animate {
            clear_screen();
        }
        println!("=== SEARCH COMPLETE ===");
        print!("{}", grid.render_with_axes());
        println!();
    }
    print_summary(&report, optimal_steps);

    Ok(report)
}

fn print_summary(report: &SearchReport, optimal_steps: Option<u32>) {
    match &report.outcome {
        SearchOutcome::Succeeded(path) => {
            println!("SUCCESS: path of {} steps found", path.steps);
            let cells: Vec<String> = path.cells.iter().map(ToString::to_string).collect();
            println!("Path: {}", cells.join(" -> "));
            if let Some(optimal_steps) = optimal_steps {
                print!("{}", RouteQuality::new(path.steps, optimal_steps));
            }
        }
        SearchOutcome::Exhausted(reason) => {
            let reason = match reason {
                Exhaustion::MissingOrigin => "the grid has no origin cell",
                Exhaustion::MissingDestination => "the grid has no destination cell",
                Exhaustion::NoPath => "the destination cannot be reached",
            };
            println!("NO PATH: {}", reason);
        }
        SearchOutcome::Cancelled => println!("CANCELLED: search stopped before finishing"),
    }
    println!();
    println!("=== SEARCH STATISTICS ===");
    print!("{}", report.stats);
}

fn clear_screen() {
    print!("\x1B[2J\x1B[1;1H");
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn showcase_is_the_default_grid() {
        let config = Config::parse_from(["grid_pathfinder"]);
        assert_eq!(load_grid(&config).unwrap(), Grid::showcase());
    }

    #[test]
    fn random_flag_uses_seed() {
        let config = Config::parse_from([
            "grid_pathfinder",
            "--random",
            "--rows",
            "6",
            "--columns",
            "8",
            "--seed",
            "3",
        ]);
        assert_eq!(
            load_grid(&config).unwrap(),
            Grid::random(6, 8, 30, Some(3)).unwrap()
        );
    }

    #[test]
    fn missing_layout_file_is_reported() {
        let config = Config::parse_from([
            "grid_pathfinder",
            "--layout",
            "/nonexistent/grid_pathfinder/layout.txt",
        ]);
        let error = load_grid(&config).unwrap_err();
        assert!(error.to_string().contains("failed to read layout"));
    }

    #[test]
    fn quiet_session_finds_the_showcase_path() {
        let config = Config::parse_from(["grid_pathfinder", "--quiet"]);
        let report = run(&config).unwrap();
        assert!(report.outcome.path().is_some());
    }

    #[test]
    fn negative_delay_fails_before_searching() {
        let config = Config::parse_from(["grid_pathfinder", "--quiet", "--delay-ms", "-3"]);
        assert!(run(&config).is_err());
    }

    #[test]
    fn terminal_pacer_counts_frames() {
        let grid = Grid::new(1, 1).unwrap();
        let mut pacer = TerminalPacer::new(false);
        pacer.pause(&grid, Duration::ZERO);
        pacer.pause(&grid, Duration::ZERO);
        assert_eq!(pacer.frames(), 2);
    }
}
