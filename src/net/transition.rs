//! Transitions: the transformation rules of a net
//!
//! Two kinds exist. *Rate* transitions produce a flow rate that the driver
//! integrates over the step and distributes through integer stoichiometry
//! coefficients. *Assignment* transitions produce exact new values that
//! overwrite their codomain places when they fire.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use uuid::Uuid;

use crate::net::place::Place;

/// Unique identifier for transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TransitionId(pub Uuid);

impl TransitionId {
    fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

/// Rate function: domain values (in declared order) and the coarse step
/// size, to a scalar rate.
///
/// Most rate functions ignore the step argument; fine-stepped kinetics use
/// it to subdivide the coarse step (see `sim::FineStepper`). Passing the
/// step explicitly keeps the functions pure - no reaching into the running
/// simulation for ambient state.
pub type RateFn = Box<dyn Fn(&[f64], f64) -> f64 + Send + Sync>;

/// Assignment function: domain values to new codomain values, one per
/// codomain place, in codomain order.
pub type AssignFn = Box<dyn Fn(&[f64]) -> Vec<f64> + Send + Sync>;

pub(crate) enum Kind {
    Rate {
        stoichiometry: Vec<(Place, i32)>,
        rate: RateFn,
    },
    Assignment {
        codomain: Vec<Place>,
        assign: AssignFn,
    },
}

struct TransitionInner {
    id: TransitionId,
    name: String,
    domain: Vec<Place>,
    kind: Kind,
}

/// Shared handle to a transition; clones refer to the same rule.
#[derive(Clone)]
pub struct Transition(Arc<TransitionInner>);

impl Transition {
    /// A rate transition with the given domain, stoichiometry and rate
    /// function. Its codomain is implicitly the stoichiometry key set.
    pub fn rate<F>(
        name: impl Into<String>,
        domain: Vec<Place>,
        stoichiometry: Vec<(Place, i32)>,
        rate: F,
    ) -> Self
    where
        F: Fn(&[f64], f64) -> f64 + Send + Sync + 'static,
    {
        Self(Arc::new(TransitionInner {
            id: TransitionId::new(),
            name: name.into(),
            domain,
            kind: Kind::Rate {
                stoichiometry,
                rate: Box::new(rate),
            },
        }))
    }

    /// An assignment transition with explicit domain and codomain. The
    /// function's output arity must match the codomain arity; this is
    /// checked at every fire.
    pub fn assignment<F>(
        name: impl Into<String>,
        domain: Vec<Place>,
        codomain: Vec<Place>,
        assign: F,
    ) -> Self
    where
        F: Fn(&[f64]) -> Vec<f64> + Send + Sync + 'static,
    {
        Self(Arc::new(TransitionInner {
            id: TransitionId::new(),
            name: name.into(),
            domain,
            kind: Kind::Assignment {
                codomain,
                assign: Box::new(assign),
            },
        }))
    }

    pub fn id(&self) -> TransitionId {
        self.0.id
    }

    pub fn name(&self) -> &str {
        &self.0.name
    }

    pub fn domain(&self) -> &[Place] {
        &self.0.domain
    }

    pub fn is_rate(&self) -> bool {
        matches!(self.0.kind, Kind::Rate { .. })
    }

    pub fn is_assignment(&self) -> bool {
        matches!(self.0.kind, Kind::Assignment { .. })
    }

    pub(crate) fn kind(&self) -> &Kind {
        &self.0.kind
    }

    /// Every place this transition reads or writes (domain, stoichiometry
    /// keys, codomain). Used by the net closure check.
    pub(crate) fn referenced_places(&self) -> impl Iterator<Item = &Place> {
        let written: &[Place] = match &self.0.kind {
            Kind::Rate { .. } => &[],
            Kind::Assignment { codomain, .. } => codomain,
        };
        let stoich = match &self.0.kind {
            Kind::Rate { stoichiometry, .. } => Some(stoichiometry.iter().map(|(p, _)| p)),
            Kind::Assignment { .. } => None,
        };
        self.0
            .domain
            .iter()
            .chain(written.iter())
            .chain(stoich.into_iter().flatten())
    }
}

impl PartialEq for Transition {
    fn eq(&self, other: &Self) -> bool {
        self.0.id == other.0.id
    }
}

impl Eq for Transition {}

impl fmt::Debug for Transition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = if self.is_rate() { "rate" } else { "assignment" };
        f.debug_struct("Transition")
            .field("name", &self.0.name)
            .field("kind", &kind)
            .finish()
    }
}
