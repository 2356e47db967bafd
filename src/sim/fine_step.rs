//! Sub-stepped integration of stiff first-order kinetics
//!
//! Several degradation and interconversion processes in the cell-cycle
//! model are far stiffer than the coarse step the driver uses. Instead of
//! solving them analytically, one coarse step is subdivided into `n` equal
//! explicit-Euler sub-steps of the *local* value, with every other input
//! frozen at its step-start value. The result is folded back into an
//! average rate over the coarse step, so the driver can treat the
//! transition like any other rate transition: multiply by the step and
//! apply through stoichiometry.

/// Fine-stepping scheme with a fixed sub-step count.
///
/// `n = 50` suffices for most of the model's stiff terms; the Cdh1
/// activation/inactivation pair needs `n = 500`.
#[derive(Debug, Clone, Copy)]
pub struct FineStepper {
    substeps: u32,
}

impl FineStepper {
    pub fn new(substeps: u32) -> Self {
        assert!(substeps > 0, "at least one sub-step is required");
        Self { substeps }
    }

    pub fn substeps(&self) -> u32 {
        self.substeps
    }

    /// Average rate of change of a value over one coarse step.
    ///
    /// `dvdt` gives the instantaneous derivative as a function of the local
    /// value alone; any dependence on other state must already be frozen
    /// inside the closure. Returns `(v_final - v0) / step`, a *rate* - not
    /// the new value.
    pub fn average_rate(&self, v0: f64, step: f64, dvdt: impl Fn(f64) -> f64) -> f64 {
        let fine = step / self.substeps as f64;
        let mut v = v0;
        for _ in 0..self.substeps {
            v += dvdt(v) * fine;
        }
        (v - v0) / step
    }

    /// Average degradation rate for first-order decay `dv/dt = -k v` with
    /// `k` frozen over the coarse step.
    ///
    /// Returns the positive magnitude `(v0 - v_final) / step`, intended to
    /// be paired with a `-1` stoichiometry coefficient. For `n = 1` this
    /// reduces to plain Euler (`k * v0`); as `n` grows it approaches the
    /// analytic `v0 (1 - e^(-k step)) / step`.
    pub fn decay_rate(&self, k: f64, v0: f64, step: f64) -> f64 {
        let fine = step / self.substeps as f64;
        let mut v = v0;
        for _ in 0..self.substeps {
            v -= k * v * fine;
        }
        (v0 - v) / step
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn single_substep_is_plain_euler() {
        let fs = FineStepper::new(1);
        let (k, v0, step) = (0.3, 2.0, 0.5);
        let rate = fs.decay_rate(k, v0, step);
        assert!((rate - k * v0).abs() < 1e-12);
    }

    #[test]
    fn decay_rate_converges_to_analytic() {
        let (k, v0, step): (f64, f64, f64) = (0.8, 3.0, 2.0);
        let analytic = v0 * (1.0 - (-k * step).exp()) / step;
        let coarse = FineStepper::new(50).decay_rate(k, v0, step);
        let fine = FineStepper::new(50_000).decay_rate(k, v0, step);
        assert!((fine - analytic).abs() < (coarse - analytic).abs());
        assert!((fine - analytic).abs() < 1e-4);
    }

    #[test]
    fn average_rate_matches_decay_rate_for_linear_decay() {
        let fs = FineStepper::new(50);
        let (k, v0, step) = (0.2, 1.5, 5.0);
        let from_decay = fs.decay_rate(k, v0, step);
        let from_generic = fs.average_rate(v0, step, |v| -k * v);
        assert!((from_decay + from_generic).abs() < 1e-12);
    }

    #[test]
    fn zero_rate_constant_means_no_flow() {
        let fs = FineStepper::new(50);
        assert_eq!(fs.decay_rate(0.0, 4.0, 5.0), 0.0);
    }

    #[test]
    fn two_term_kinetics_approach_steady_state() {
        // dv/dt = s - k v has fixed point s / k; sub-stepping from below
        // must move toward it without overshooting for a tame step.
        let fs = FineStepper::new(500);
        let (s, k, v0, step) = (1.0, 0.5, 0.0, 4.0);
        let rate = fs.average_rate(v0, step, |v| s - k * v);
        let v_final = v0 + rate * step;
        assert!(v_final > v0);
        assert!(v_final < s / k);
    }

    proptest! {
        #[test]
        fn decay_stays_bounded(
            k in 0.0f64..0.5,
            v0 in 0.0f64..10.0,
            step in 0.1f64..10.0,
        ) {
            // With k * fine < 1 the sub-stepped value cannot undershoot
            // zero, so the average rate is between 0 and the Euler rate.
            let rate = FineStepper::new(50).decay_rate(k, v0, step);
            prop_assert!(rate >= 0.0);
            prop_assert!(rate <= k * v0 + 1e-12);
        }

        #[test]
        fn more_substeps_never_hurt(
            // k * step below 1, where the Euler error shrinks monotonically
            // with the sub-step count
            k in 0.01f64..0.3,
            v0 in 0.1f64..10.0,
            step in 0.1f64..3.0,
        ) {
            let analytic = v0 * (1.0 - (-k * step).exp()) / step;
            let rough = FineStepper::new(2).decay_rate(k, v0, step);
            let refined = FineStepper::new(200).decay_rate(k, v0, step);
            prop_assert!((refined - analytic).abs() <= (rough - analytic).abs() + 1e-12);
        }
    }
}
