//! Solver configuration (SPEC_FULL.md §4.10), in the style of the teacher's
//! `solver::config::Config` — a small `Copy` struct of tunables with a
//! `Default` reproducing the spec's constants, constructed once and handed
//! to `Solver::with_config`.

#[derive(Debug, Clone, Copy)]
pub struct Config {
    /// VSIDS decay factor applied to `var_inc` once per analyzed conflict
    /// (§4.5). Smaller values age out old activity faster.
    pub var_decay: f64,
    /// Activity ceiling that triggers a rescale of every activity and
    /// `var_inc` (§4.5).
    pub activity_rescale_threshold: f64,
    /// Whether `Solver::add_clause` validates literals (duplicate removal,
    /// tautology detection) before storing the clause. Off by default: the
    /// core algorithm is correct either way, and the cost is not free.
    pub validate_input: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            var_decay: 0.95,
            activity_rescale_threshold: 1e100,
            validate_input: false,
        }
    }
}
