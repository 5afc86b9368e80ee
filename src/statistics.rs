use std::fmt;
use std::time::Duration;

/// Counters gathered over one search run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchStats {
    /// Outer loop iterations, i.e. frontier selections.
    pub iterations: usize,
    /// Nodes moved to the visited set.
    pub expanded: usize,
    /// Candidate neighbours that passed the validity checks.
    pub validated: usize,
    pub frontier_peak: usize,
    pub explored_signals: usize,
    pub path_signals: usize,
    pub elapsed: Duration,
}

impl fmt::Display for SearchStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Iterations: {}", self.iterations)?;
        writeln!(f, "Expanded cells: {}", self.expanded)?;
        writeln!(f, "Validated candidates: {}", self.validated)?;
        writeln!(f, "Peak frontier size: {}", self.frontier_peak)?;
        writeln!(f, "Explored signals: {}", self.explored_signals)?;
        writeln!(f, "Path signals: {}", self.path_signals)?;
        writeln!(f, "Elapsed: {:.2?}", self.elapsed)?;
        Ok(())
    }
}

/// How the engine's route compares with a true shortest path.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RouteQuality {
    pub steps: u32,
    pub optimal_steps: u32,
    pub route_efficiency: f64,
}

impl RouteQuality {
    pub fn new(steps: u32, optimal_steps: u32) -> Self {
        let route_efficiency = if steps > 0 && optimal_steps > 0 {
            f64::from(steps) / f64::from(optimal_steps)
        } else {
            0.0
        };
        RouteQuality {
            steps,
            optimal_steps,
            route_efficiency,
        }
    }

    pub fn extra_steps(&self) -> u32 {
        self.steps.saturating_sub(self.optimal_steps)
    }
}

impl fmt::Display for RouteQuality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Path steps: {}", self.steps)?;
        writeln!(f, "Optimal steps (reference A*): {}", self.optimal_steps)?;
        writeln!(f, "Route efficiency: {:.3}", self.route_efficiency)?;
        if self.extra_steps() > 0 {
            writeln!(
                f,
                "Note: {} extra steps from the straight-line heuristic",
                self.extra_steps()
            )?;
        }
        Ok(())
    }
}
