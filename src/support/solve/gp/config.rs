/// Settings for the log-space barrier method.
#[derive(Debug, Clone, Copy)]
pub struct GpSolverConfig {
    /// Barrier weight at the start of each phase.
    pub initial_barrier: f64,

    /// Factor the barrier weight grows by between centering steps.
    pub barrier_growth: f64,

    /// Stop once the duality gap (in log-cost) falls below this.
    pub gap_tol: f64,

    /// Centering stops once half the squared Newton decrement falls below this.
    pub newton_tol: f64,

    /// Newton iteration limit per centering step.
    pub max_newton_iters: usize,

    /// Sufficient-decrease fraction of the backtracking line search.
    pub line_search_alpha: f64,

    /// Step shrink factor of the backtracking line search.
    pub line_search_beta: f64,

    /// Bound on `|ln x|` for every free variable.
    ///
    /// Variables ending up within `unbounded_margin` of it are reported as
    /// unbounded.
    pub log_bound: f64,

    pub unbounded_margin: f64,

    /// Phase I stops once every constraint holds with this log-margin.
    pub feasibility_margin: f64,
}

impl Default for GpSolverConfig {
    fn default() -> Self {
        Self {
            initial_barrier: 1.0,
            barrier_growth: 20.0,
            gap_tol: 1e-9,
            newton_tol: 1e-10,
            max_newton_iters: 100,
            line_search_alpha: 0.01,
            line_search_beta: 0.5,
            log_bound: 80.0,
            unbounded_margin: 10.0,
            feasibility_margin: 1e-2,
        }
    }
}
