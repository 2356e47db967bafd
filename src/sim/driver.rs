//! Simulation driver: the pseudo-Euler stepping state machine
//!
//! One tick, given coarse step `S`:
//!
//! 1. every rate transition's function is evaluated against the unmodified
//!    pre-tick marking (simultaneous update: all reads precede any write),
//! 2. each rate is turned into per-place deltas (`coefficient * rate * S`)
//!    and the deltas are summed per place,
//! 3. the summed deltas are applied to the marking as one batch,
//! 4. every assignment transition is evaluated against the *post-delta*
//!    marking, in net insertion order, and
//! 5. each result overwrites its codomain immediately, so later assignments
//!    observe earlier ones within the same tick,
//! 6. time advances by `S`; crossed sampling boundaries emit a recording
//!    sample.
//!
//! No higher-order integration is defined. A non-finite rate, assignment
//! output or marking value poisons the simulation: the tick fails, no
//! partial state is rolled back, and further stepping is refused.

use std::collections::HashMap;

use crate::core::config::SimSettings;
use crate::core::error::{Result, SimError};
use crate::net::transition::Kind;
use crate::net::{AssignFn, Net, Place, ResolvedKind};
use crate::sim::marking::Marking;
use crate::sim::recording::Recording;

/// Lifecycle of a simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimState {
    /// Constructed, no tick taken yet
    Idle,
    /// Mid-run
    Running,
    /// Elapsed time reached the target
    Finished,
    /// Poisoned by a numeric failure; will not advance again
    Invalid,
}

/// A stateful run of a [`Net`].
///
/// The marking is copied out of the net's initial values at construction
/// (copy-on-run), so re-running a net never corrupts its canonical initial
/// marking, and independent simulations over one net are isolated.
pub struct Simulation {
    net: Net,
    settings: SimSettings,
    marking: Marking,
    ticks: u64,
    state: SimState,
    recording: Recording,
    next_sample_at: f64,
}

impl Simulation {
    /// Build a simulation from a finalized net, validated settings and
    /// optional per-place marking overrides.
    ///
    /// Derived places (no explicit initial value anywhere in their
    /// assignment transition's codomain) are initialized by firing their
    /// assignment transitions once, in net order; places that are neither
    /// initialized, overridden nor derived are an error.
    pub(crate) fn new(
        net: Net,
        settings: SimSettings,
        overrides: &[(&Place, f64)],
    ) -> Result<Self> {
        settings.validate()?;

        let mut override_values: Vec<Option<f64>> = vec![None; net.places().len()];
        for (place, value) in overrides {
            let index = net.place_index(place).ok_or_else(|| {
                SimError::Config(format!(
                    "marking override for '{}', which is not a member of net '{}'",
                    place.name(),
                    net.name()
                ))
            })?;
            override_values[index] = Some(*value);
        }

        // explicit = value known without firing anything
        let mut values = Vec::with_capacity(net.places().len());
        let mut explicit = Vec::with_capacity(net.places().len());
        for (place, override_value) in net.places().iter().zip(&override_values) {
            match override_value.or(place.initial()) {
                Some(v) => {
                    values.push(v);
                    explicit.push(true);
                }
                None => {
                    values.push(0.0);
                    explicit.push(false);
                }
            }
        }

        let mut marking = Marking::new(values);
        let mut defined = explicit.clone();
        for (transition, resolved) in net.transitions().iter().zip(net.resolved.iter()) {
            let ResolvedKind::Assignment { codomain } = &resolved.kind else {
                continue;
            };
            if codomain.iter().any(|&i| explicit[i]) {
                continue;
            }
            let Kind::Assignment { assign, .. } = transition.kind() else {
                continue;
            };
            fire_assignment(
                transition.name(),
                assign,
                &resolved.domain,
                codomain,
                &mut marking,
                settings.start_time,
            )?;
            for &i in codomain {
                defined[i] = true;
            }
        }

        if let Some(index) = defined.iter().position(|d| !d) {
            return Err(SimError::MarkingRequired(
                net.places()[index].name().to_string(),
            ));
        }

        let mut recording = Recording::new(
            net.places().iter().map(|p| p.name().to_string()).collect(),
        );
        recording.push(settings.start_time, marking.snapshot());

        Ok(Self {
            net,
            marking,
            ticks: 0,
            state: SimState::Idle,
            recording,
            next_sample_at: settings.start_time + settings.sampling,
            settings,
        })
    }

    /// Advance by one tick. Valid from `Idle` or `Running`.
    pub fn step(&mut self) -> Result<()> {
        match self.state {
            SimState::Invalid => return Err(SimError::Invalidated),
            SimState::Finished => return Err(SimError::Finished),
            SimState::Idle => self.state = SimState::Running,
            SimState::Running => {}
        }

        let time = self.elapsed_time();
        if let Err(err) = execute_tick(&self.net, &mut self.marking, self.settings.step, time) {
            self.state = SimState::Invalid;
            tracing::warn!(time, error = %err, "tick failed, simulation poisoned");
            return Err(err);
        }
        self.ticks += 1;

        let elapsed = self.elapsed_time();
        let eps = self.epsilon();
        if elapsed + eps >= self.next_sample_at {
            self.recording.push(elapsed, self.marking.snapshot());
            while self.next_sample_at <= elapsed + eps {
                self.next_sample_at += self.settings.sampling;
            }
            tracing::trace!(time = elapsed, samples = self.recording.len(), "sample recorded");
        }
        if elapsed + eps >= self.settings.target_time {
            self.state = SimState::Finished;
            tracing::debug!(ticks = self.ticks, time = elapsed, "simulation finished");
        }
        Ok(())
    }

    /// Step until elapsed time reaches `target` or the configured target
    /// time, whichever comes first. A target at or before the current
    /// elapsed time is an error and leaves the simulation unchanged.
    pub fn run_until(&mut self, target: f64) -> Result<()> {
        let eps = self.epsilon();
        if target <= self.elapsed_time() + eps {
            return Err(SimError::TimeNotAhead {
                target,
                current: self.elapsed_time(),
            });
        }
        while self.state != SimState::Finished && self.elapsed_time() + eps < target {
            self.step()?;
        }
        Ok(())
    }

    /// Step until the configured target time.
    pub fn run(&mut self) -> Result<()> {
        while self.state != SimState::Finished {
            self.step()?;
        }
        Ok(())
    }

    /// Elapsed simulated time, derived from the tick counter (not from
    /// floating-point accumulation, so an exactly dividing step lands on
    /// the target exactly).
    pub fn elapsed_time(&self) -> f64 {
        self.settings.start_time + self.ticks as f64 * self.settings.step
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn state(&self) -> SimState {
        self.state
    }

    pub fn settings(&self) -> &SimSettings {
        &self.settings
    }

    pub fn net(&self) -> &Net {
        &self.net
    }

    /// Current value of a member place.
    pub fn value(&self, place: &Place) -> Option<f64> {
        self.net.place_index(place).map(|i| self.marking.get(i))
    }

    /// Full current marking as a name-to-value map.
    pub fn current_marking(&self) -> HashMap<String, f64> {
        self.net
            .places()
            .iter()
            .enumerate()
            .map(|(i, p)| (p.name().to_string(), self.marking.get(i)))
            .collect()
    }

    pub fn recording(&self) -> &Recording {
        &self.recording
    }

    /// Recorded time series of a member place.
    pub fn series(&self, place: &Place) -> Option<Vec<(f64, f64)>> {
        self.net
            .place_index(place)
            .map(|i| self.recording.series(i))
    }

    /// Comparison slack for time boundaries, documented as 1e-9 of a step.
    fn epsilon(&self) -> f64 {
        self.settings.step * 1e-9
    }
}

/// One pseudo-Euler tick over `marking`. `time` is the pre-tick elapsed
/// time, used only in error reports.
fn execute_tick(net: &Net, marking: &mut Marking, step: f64, time: f64) -> Result<()> {
    let snapshot = marking.snapshot();
    let mut deltas = vec![0.0; snapshot.len()];
    let mut domain_values: Vec<f64> = Vec::new();

    for (transition, resolved) in net.transitions().iter().zip(net.resolved.iter()) {
        let ResolvedKind::Rate { stoichiometry } = &resolved.kind else {
            continue;
        };
        let Kind::Rate { rate, .. } = transition.kind() else {
            continue;
        };
        domain_values.clear();
        domain_values.extend(resolved.domain.iter().map(|&i| snapshot[i]));
        let flow = rate(&domain_values, step);
        if !flow.is_finite() {
            return Err(SimError::NonFinite {
                origin: transition.name().to_string(),
                time,
            });
        }
        for &(index, coeff) in stoichiometry {
            deltas[index] += f64::from(coeff) * flow * step;
        }
    }

    for (index, delta) in deltas.iter().enumerate() {
        marking.apply_delta(index, *delta);
    }

    for (transition, resolved) in net.transitions().iter().zip(net.resolved.iter()) {
        let ResolvedKind::Assignment { codomain } = &resolved.kind else {
            continue;
        };
        let Kind::Assignment { assign, .. } = transition.kind() else {
            continue;
        };
        fire_assignment(
            transition.name(),
            assign,
            &resolved.domain,
            codomain,
            marking,
            time,
        )?;
    }
    Ok(())
}

/// Evaluate one assignment transition against the live marking and apply
/// its result immediately.
fn fire_assignment(
    name: &str,
    assign: &AssignFn,
    domain: &[usize],
    codomain: &[usize],
    marking: &mut Marking,
    time: f64,
) -> Result<()> {
    let domain_values: Vec<f64> = domain.iter().map(|&i| marking.get(i)).collect();
    let out = assign(&domain_values);
    if out.len() != codomain.len() {
        return Err(SimError::ArityMismatch {
            transition: name.to_string(),
            expected: codomain.len(),
            got: out.len(),
        });
    }
    for (&index, value) in codomain.iter().zip(out) {
        if !value.is_finite() {
            return Err(SimError::NonFinite {
                origin: name.to_string(),
                time,
            });
        }
        marking.set(index, value);
    }
    Ok(())
}
