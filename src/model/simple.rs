//! A simplistic, timer-driven cell cycle
//!
//! One input (a Timer place driven by a unit-rate clock) and three outputs:
//! A_phase flags the window in which the cell-cycle enzyme machinery is
//! synthesized, S_phase the DNA synthesis window, and Cdc20A the window in
//! which the anaphase promoting complex degrades the machinery. Useful as a
//! cheap stand-in for the full mammalian net when only the phase timing
//! matters.

use crate::core::config::SimSettings;
use crate::core::error::Result;
use crate::core::units::{hours, minutes};
use crate::net::{Net, NetBuilder, Place, Transition};

// Phase boundaries, in seconds of cycle time.
const A_PHASE_START: f64 = hours(3.0);
const S_PHASE_START: f64 = hours(5.0);
const S_PHASE_END: f64 = hours(17.0);
const A_PHASE_END: f64 = S_PHASE_END;
const CDC20A_START: f64 = hours(22.0);
const CDC20A_END: f64 = hours(1.0);

/// The finalized simple net with its interface places.
pub struct SimpleCycle {
    pub net: Net,
    pub timer: Place,
    pub a_phase: Place,
    pub s_phase: Place,
    pub cdc20a: Place,
}

/// Build the simple timer-driven cycle.
pub fn simple_cycle() -> Result<SimpleCycle> {
    let mut builder = NetBuilder::new("simple cell cycle");

    let timer = builder.place("Timer", 0.0)?;
    builder.add_transition(&Transition::rate(
        "Clock",
        vec![],
        vec![(timer.clone(), 1)],
        |_, _| 1.0,
    ))?;

    let a_phase = builder.place("A_phase", 0.0)?;
    let s_phase = builder.place("S_phase", 0.0)?;
    let cdc20a = builder.place("Cdc20A", 1.0)?;

    builder.add_transition(&Transition::assignment(
        "A_phase_fn",
        vec![timer.clone()],
        vec![a_phase.clone()],
        |v| {
            vec![if v[0] > A_PHASE_START && v[0] < A_PHASE_END {
                1.0
            } else {
                0.0
            }]
        },
    ))?;
    builder.add_transition(&Transition::assignment(
        "S_phase_fn",
        vec![timer.clone()],
        vec![s_phase.clone()],
        |v| {
            vec![if v[0] > S_PHASE_START && v[0] < S_PHASE_END {
                1.0
            } else {
                0.0
            }]
        },
    ))?;
    builder.add_transition(&Transition::assignment(
        "Cdc20A_fn",
        vec![timer.clone()],
        vec![cdc20a.clone()],
        |v| {
            vec![if v[0] < CDC20A_END || v[0] > CDC20A_START {
                1.0
            } else {
                0.0
            }]
        },
    ))?;

    let net = builder.finalize()?;
    Ok(SimpleCycle {
        net,
        timer,
        a_phase,
        s_phase,
        cdc20a,
    })
}

/// The canonical run: 36 hours at a one-minute step, sampled every
/// 20 minutes.
pub fn default_settings() -> SimSettings {
    SimSettings::new(hours(36.0), minutes(1.0), minutes(20.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timer_tracks_elapsed_time() {
        let cycle = simple_cycle().unwrap();
        let mut sim = cycle.net.simulation(default_settings()).unwrap();
        sim.run_until(hours(2.0)).unwrap();
        let timer = sim.value(&cycle.timer).unwrap();
        assert!((timer - hours(2.0)).abs() < 1e-6);
    }

    #[test]
    fn phase_flags_follow_the_schedule() {
        let cycle = simple_cycle().unwrap();
        let mut sim = cycle.net.simulation(default_settings()).unwrap();
        let flags = |sim: &crate::sim::Simulation| {
            (
                sim.value(&cycle.a_phase).unwrap(),
                sim.value(&cycle.s_phase).unwrap(),
                sim.value(&cycle.cdc20a).unwrap(),
            )
        };

        // Cdc20A present at the start, both phases off
        assert_eq!(flags(&sim), (0.0, 0.0, 1.0));

        // 2 h: Cdc20A has switched off at the 1 h mark
        sim.run_until(hours(2.0)).unwrap();
        assert_eq!(flags(&sim), (0.0, 0.0, 0.0));

        // 4 h: A phase only
        sim.run_until(hours(4.0)).unwrap();
        assert_eq!(flags(&sim), (1.0, 0.0, 0.0));

        // 6 h: A and S phases overlap
        sim.run_until(hours(6.0)).unwrap();
        assert_eq!(flags(&sim), (1.0, 1.0, 0.0));

        // 18 h: both phases over
        sim.run_until(hours(18.0)).unwrap();
        assert_eq!(flags(&sim), (0.0, 0.0, 0.0));

        // 23 h: Cdc20A window opens
        sim.run_until(hours(23.0)).unwrap();
        assert_eq!(flags(&sim), (0.0, 0.0, 1.0));
    }

    #[test]
    fn default_run_records_every_twenty_minutes() {
        let cycle = simple_cycle().unwrap();
        let mut sim = cycle.net.simulation(default_settings()).unwrap();
        sim.run().unwrap();
        // 36 h / 20 min boundaries plus the initial sample
        assert_eq!(sim.recording().len(), 109);
        assert!((sim.elapsed_time() - hours(36.0)).abs() < 1e-6);
    }
}
