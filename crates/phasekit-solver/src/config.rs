//! Solver configuration and its validating builder.

use phasekit_core::PhaseError;

/// Upper bound applied to the computed optimal relaxation factor.
pub const MAX_OPTIMAL_OMEGA: f64 = 1.99;

/// How the over-relaxation factor ω is chosen.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Relaxation {
    /// Use the optimum for a rectangular Dirichlet problem of the grid's
    /// size, computed from the Jacobi spectral radius
    /// `ρ = (cos(π/rows) + cos(π/cols)) / 2` as `ω = 2 / (1 + sqrt(1 − ρ²))`
    /// and clamped to `[1, MAX_OPTIMAL_OMEGA]`.
    Optimal,
    /// A fixed factor; must be finite and strictly inside (0, 2).
    Fixed(f64),
}

impl Relaxation {
    /// Resolve the factor for a `rows x cols` grid.
    pub fn omega(&self, rows: usize, cols: usize) -> f64 {
        match *self {
            Relaxation::Fixed(w) => w,
            Relaxation::Optimal => optimal_omega(rows, cols),
        }
    }
}

/// Order in which free pixels are visited within one sweep.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SweepOrder {
    /// Row-major order; each update sees neighbours already updated in the
    /// same sweep.
    #[default]
    Lexicographic,
    /// Checkerboard order: every pixel with even `row + col` first, then the
    /// odd ones.
    RedBlack,
}

/// Configuration for [`membrane_sor`](crate::membrane_sor) and
/// [`membrane_sor_in_place`](crate::membrane_sor_in_place).
///
/// Fields are public so a configuration can be written literally or
/// deserialized; the solver validates it on every call. Use
/// [`SorConfig::builder`] to get validation at construction time.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SorConfig {
    /// Stop once the largest change of any free pixel during one sweep falls
    /// below this value. Must be finite and `>= 0`.
    pub tolerance: f64,
    /// Sweep budget. Must be `>= 1`.
    pub max_iterations: usize,
    /// Relaxation factor policy.
    pub relaxation: Relaxation,
    /// Visiting order within a sweep.
    pub order: SweepOrder,
}

impl SorConfig {
    /// Default convergence tolerance on the per-sweep maximum change.
    pub const DEFAULT_TOLERANCE: f64 = 1e-8;
    /// Default sweep budget.
    pub const DEFAULT_MAX_ITERATIONS: usize = 10_000;

    /// Start a builder seeded with the defaults.
    ///
    /// ```
    /// use phasekit_solver::{Relaxation, SorConfig};
    ///
    /// let cfg = SorConfig::builder()
    ///     .tolerance(1e-10)
    ///     .max_iterations(500)
    ///     .relaxation(Relaxation::Fixed(1.8))
    ///     .build()
    ///     .unwrap();
    /// assert_eq!(cfg.max_iterations, 500);
    /// assert!(SorConfig::builder().relaxation(Relaxation::Fixed(2.0)).build().is_err());
    /// ```
    pub fn builder() -> SorConfigBuilder {
        SorConfigBuilder {
            config: SorConfig::default(),
        }
    }

    /// Check every field against its admissible range.
    ///
    /// # Errors
    ///
    /// [`PhaseError::InvalidConfiguration`] if:
    /// - `tolerance` is negative or not finite
    /// - `max_iterations` is zero
    /// - a fixed relaxation factor is not finite or not inside (0, 2)
    pub fn validate(&self) -> Result<(), PhaseError> {
        if !self.tolerance.is_finite() || self.tolerance < 0.0 {
            return Err(PhaseError::InvalidConfiguration {
                reason: format!("tolerance must be finite and >= 0, got {}", self.tolerance),
            });
        }
        if self.max_iterations == 0 {
            return Err(PhaseError::InvalidConfiguration {
                reason: "max_iterations must be >= 1".to_string(),
            });
        }
        if let Relaxation::Fixed(w) = self.relaxation {
            if !(w > 0.0 && w < 2.0) {
                return Err(PhaseError::InvalidConfiguration {
                    reason: format!("relaxation factor must lie in (0, 2), got {w}"),
                });
            }
        }
        Ok(())
    }
}

impl Default for SorConfig {
    fn default() -> Self {
        Self {
            tolerance: Self::DEFAULT_TOLERANCE,
            max_iterations: Self::DEFAULT_MAX_ITERATIONS,
            relaxation: Relaxation::Optimal,
            order: SweepOrder::Lexicographic,
        }
    }
}

/// Builder for [`SorConfig`].
///
/// Every setter is optional; unset fields keep the [`SorConfig::default`]
/// values.
#[derive(Clone, Debug)]
pub struct SorConfigBuilder {
    config: SorConfig,
}

impl SorConfigBuilder {
    /// Set the convergence tolerance (default `1e-8`). Must be finite and >= 0.
    pub fn tolerance(mut self, tolerance: f64) -> Self {
        self.config.tolerance = tolerance;
        self
    }

    /// Set the sweep budget (default `10_000`). Must be >= 1.
    pub fn max_iterations(mut self, max_iterations: usize) -> Self {
        self.config.max_iterations = max_iterations;
        self
    }

    /// Set the relaxation policy (default [`Relaxation::Optimal`]).
    pub fn relaxation(mut self, relaxation: Relaxation) -> Self {
        self.config.relaxation = relaxation;
        self
    }

    /// Shorthand for `relaxation(Relaxation::Fixed(omega))`.
    pub fn omega(self, omega: f64) -> Self {
        self.relaxation(Relaxation::Fixed(omega))
    }

    /// Set the sweep order (default [`SweepOrder::Lexicographic`]).
    pub fn order(mut self, order: SweepOrder) -> Self {
        self.config.order = order;
        self
    }

    /// Build the configuration, validating all fields.
    ///
    /// # Errors
    ///
    /// See [`SorConfig::validate`].
    pub fn build(self) -> Result<SorConfig, PhaseError> {
        self.config.validate()?;
        Ok(self.config)
    }
}

fn optimal_omega(rows: usize, cols: usize) -> f64 {
    let pi = std::f64::consts::PI;
    let rho = ((pi / rows.max(1) as f64).cos() + (pi / cols.max(1) as f64).cos()) / 2.0;
    let omega = 2.0 / (1.0 + (1.0 - rho * rho).max(0.0).sqrt());
    omega.clamp(1.0, MAX_OPTIMAL_OMEGA)
}
