use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// What happens when a cheaper route reaches a cell already on the frontier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CostUpdate {
    /// Only the total cost is lowered; parent and step count stay as first
    /// discovered, so the reconstructed path follows the original lineage.
    #[default]
    CostOnly,
    /// Cost, parent and step count all move to the cheaper route.
    CostAndLineage,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("animation duration must not be negative, got {0} ms")]
    NegativeAnimationDuration(i64),
}

/// Options for one `find_best_path` invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchConfig {
    pub include_diagonal_directions: bool,
    pub animate: bool,
    pub animation_duration_ms: i64,
    pub show_validated_cells: bool,
    pub show_explored_cells: bool,
    pub cost_update: CostUpdate,
}

impl SearchConfig {
    pub const DEFAULT_ANIMATION_DURATION_MS: i64 = 100;

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.animation_duration_ms < 0 {
            return Err(ConfigError::NegativeAnimationDuration(
                self.animation_duration_ms,
            ));
        }
        Ok(())
    }

    /// Negative durations are clamped to zero; `validate` rejects them first.
    pub fn animation_duration(&self) -> Duration {
        Duration::from_millis(u64::try_from(self.animation_duration_ms).unwrap_or(0))
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig {
            include_diagonal_directions: false,
            animate: false,
            animation_duration_ms: Self::DEFAULT_ANIMATION_DURATION_MS,
            show_validated_cells: false,
            show_explored_cells: false,
            cost_update: CostUpdate::CostOnly,
        }
    }
}

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Config {
    /// Text layout to load ('.' empty, '#' wall, 'S' origin, 'G' destination, 'R' recharger).
    #[arg(long)]
    pub layout: Option<PathBuf>,

    /// Generate a random grid instead of the built-in showcase layout.
    #[arg(long, default_value_t = false)]
    pub random: bool,

    #[arg(long, default_value_t = 10)]
    pub rows: usize,

    /// Defaults to a 16:9 ratio of `rows`.
    #[arg(long)]
    pub columns: Option<usize>,

    #[arg(long, default_value_t = 30)]
    pub num_walls: usize,

    #[arg(long)]
    pub seed: Option<u64>,

    #[arg(long, default_value_t = false)]
    pub diagonal: bool,

    #[arg(long, default_value_t = false)]
    pub animate: bool,

    #[arg(
        long,
        default_value_t = SearchConfig::DEFAULT_ANIMATION_DURATION_MS,
        allow_negative_numbers = true
    )]
    pub delay_ms: i64,

    #[arg(long, default_value_t = false)]
    pub show_validated: bool,

    #[arg(long, default_value_t = false)]
    pub show_explored: bool,

    /// Re-parent frontier cells when a cheaper route to them is found.
    #[arg(long, default_value_t = false)]
    pub update_lineage: bool,

    /// Cancel the search after this many milliseconds.
    #[arg(long)]
    pub timeout_ms: Option<u64>,

    #[arg(long, default_value_t = false)]
    pub quiet: bool,
}

impl Config {
    pub fn columns(&self) -> usize {
        self.columns.unwrap_or(self.rows * 16 / 9)
    }

    pub fn search_config(&self) -> SearchConfig {
        SearchConfig {
            include_diagonal_directions: self.diagonal,
            animate: self.animate,
            animation_duration_ms: self.delay_ms,
            show_validated_cells: self.show_validated,
            show_explored_cells: self.show_explored,
            cost_update: if self.update_lineage {
                CostUpdate::CostAndLineage
            } else {
                CostUpdate::CostOnly
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_visualizer() {
        let config = SearchConfig::default();
        assert!(!config.include_diagonal_directions);
        assert!(!config.animate);
        assert_eq!(config.animation_duration(), Duration::from_millis(100));
        assert!(!config.show_validated_cells);
        assert!(!config.show_explored_cells);
        assert_eq!(config.cost_update, CostUpdate::CostOnly);
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn negative_duration_is_rejected() {
        let config = SearchConfig {
            animation_duration_ms: -5,
            ..SearchConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::NegativeAnimationDuration(-5))
        );
    }

    #[test]
    fn cli_flags_map_onto_search_config() {
        let config = Config::parse_from([
            "grid_pathfinder",
            "--diagonal",
            "--animate",
            "--delay-ms",
            "25",
            "--show-explored",
            "--update-lineage",
        ]);
        let search = config.search_config();
        assert!(search.include_diagonal_directions);
        assert!(search.animate);
        assert_eq!(search.animation_duration_ms, 25);
        assert!(search.show_explored_cells);
        assert!(!search.show_validated_cells);
        assert_eq!(search.cost_update, CostUpdate::CostAndLineage);
        assert_eq!(config.columns(), 17);
    }

    #[test]
    fn cli_accepts_negative_delay_for_validation() {
        let config = Config::parse_from(["grid_pathfinder", "--delay-ms", "-1"]);
        assert!(config.search_config().validate().is_err());
    }
}
