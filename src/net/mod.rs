//! Net topology: ordered, deduplicated collections of places and transitions
//!
//! A [`NetBuilder`] accumulates members in insertion order, then
//! [`NetBuilder::finalize`] runs the closure check (every place a transition
//! touches must be a member) and resolves all place references into dense
//! indices, producing a frozen [`Net`]. Handles are shared: a sub-net built
//! from an existing net refers to the same place and transition objects, not
//! copies.

pub mod place;
pub mod transition;

pub use place::{Place, PlaceId};
pub use transition::{AssignFn, RateFn, Transition, TransitionId};

use ahash::{AHashMap, AHashSet};

use crate::core::config::SimSettings;
use crate::core::error::{Result, SimError};
use crate::net::transition::Kind;
use crate::sim::driver::Simulation;

/// Index-resolved view of one transition, computed at finalize so the
/// stepping loop never looks anything up by name or identity.
#[derive(Clone)]
pub(crate) struct ResolvedTransition {
    pub(crate) domain: Vec<usize>,
    pub(crate) kind: ResolvedKind,
}

#[derive(Clone)]
pub(crate) enum ResolvedKind {
    Rate { stoichiometry: Vec<(usize, i32)> },
    Assignment { codomain: Vec<usize> },
}

/// Incremental accumulator for net members.
///
/// Members are deduplicated by identity (re-adding the same handle is a
/// no-op) and names must be unique per member kind; a second, distinct
/// member under an existing name is rejected immediately.
pub struct NetBuilder {
    name: String,
    places: Vec<Place>,
    transitions: Vec<Transition>,
    place_ids: AHashMap<PlaceId, usize>,
    transition_ids: AHashSet<TransitionId>,
    place_names: AHashMap<String, PlaceId>,
    transition_names: AHashMap<String, TransitionId>,
    finalized: bool,
}

impl NetBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            places: Vec::new(),
            transitions: Vec::new(),
            place_ids: AHashMap::new(),
            transition_ids: AHashSet::new(),
            place_names: AHashMap::new(),
            transition_names: AHashMap::new(),
            finalized: false,
        }
    }

    /// Add an existing place handle.
    pub fn add_place(&mut self, place: &Place) -> Result<()> {
        if self.finalized {
            return Err(SimError::AlreadyFinalized(self.name.clone()));
        }
        if self.place_ids.contains_key(&place.id()) {
            return Ok(());
        }
        if let Some(&existing) = self.place_names.get(place.name()) {
            if existing != place.id() {
                return Err(SimError::DuplicateName(place.name().to_string()));
            }
        }
        self.place_names.insert(place.name().to_string(), place.id());
        self.place_ids.insert(place.id(), self.places.len());
        self.places.push(place.clone());
        Ok(())
    }

    /// Add an existing transition handle.
    pub fn add_transition(&mut self, transition: &Transition) -> Result<()> {
        if self.finalized {
            return Err(SimError::AlreadyFinalized(self.name.clone()));
        }
        if self.transition_ids.contains(&transition.id()) {
            return Ok(());
        }
        if let Some(&existing) = self.transition_names.get(transition.name()) {
            if existing != transition.id() {
                return Err(SimError::DuplicateName(transition.name().to_string()));
            }
        }
        self.transition_names
            .insert(transition.name().to_string(), transition.id());
        self.transition_ids.insert(transition.id());
        self.transitions.push(transition.clone());
        Ok(())
    }

    /// Create a place with an initial value and add it.
    pub fn place(&mut self, name: impl Into<String>, initial: f64) -> Result<Place> {
        let place = Place::with_initial(name, initial);
        self.add_place(&place)?;
        Ok(place)
    }

    /// Create a *derived* place: a place whose value is maintained by an
    /// assignment transition recomputing it from `domain` every tick.
    ///
    /// The transition is named `<name>_fn`. The domain places themselves
    /// are not added here; the closure check at finalize will insist on
    /// their membership.
    pub fn derived_place<F>(
        &mut self,
        name: impl Into<String>,
        domain: &[&Place],
        f: F,
    ) -> Result<Place>
    where
        F: Fn(&[f64]) -> f64 + Send + Sync + 'static,
    {
        let name = name.into();
        let place = Place::new(name.as_str());
        let transition = Transition::assignment(
            format!("{name}_fn"),
            domain.iter().map(|p| (*p).clone()).collect(),
            vec![place.clone()],
            move |values| vec![f(values)],
        );
        self.add_place(&place)?;
        self.add_transition(&transition)?;
        Ok(place)
    }

    /// Closure-check the accumulated members, resolve place references into
    /// dense indices and freeze the topology. A second call is rejected.
    pub fn finalize(&mut self) -> Result<Net> {
        if self.finalized {
            return Err(SimError::AlreadyFinalized(self.name.clone()));
        }
        self.finalized = true;

        let mut resolved = Vec::with_capacity(self.transitions.len());
        for transition in &self.transitions {
            for place in transition.referenced_places() {
                if !self.place_ids.contains_key(&place.id()) {
                    return Err(SimError::UndeclaredPlace {
                        net: self.name.clone(),
                        transition: transition.name().to_string(),
                        place: place.name().to_string(),
                    });
                }
            }
            let domain = transition
                .domain()
                .iter()
                .map(|p| self.place_ids[&p.id()])
                .collect();
            let kind = match transition.kind() {
                Kind::Rate { stoichiometry, .. } => ResolvedKind::Rate {
                    stoichiometry: stoichiometry
                        .iter()
                        .map(|(p, coeff)| (self.place_ids[&p.id()], *coeff))
                        .collect(),
                },
                Kind::Assignment { codomain, .. } => ResolvedKind::Assignment {
                    codomain: codomain.iter().map(|p| self.place_ids[&p.id()]).collect(),
                },
            };
            resolved.push(ResolvedTransition { domain, kind });
        }

        Ok(Net {
            name: self.name.clone(),
            places: self.places.clone(),
            transitions: self.transitions.clone(),
            place_index: self.place_ids.clone(),
            resolved,
        })
    }
}

/// A finalized net: frozen topology with index-resolved transitions, ready
/// to be simulated. Cloning a net is cheap (members are shared handles).
#[derive(Clone)]
pub struct Net {
    name: String,
    places: Vec<Place>,
    transitions: Vec<Transition>,
    place_index: AHashMap<PlaceId, usize>,
    pub(crate) resolved: Vec<ResolvedTransition>,
}

impl std::fmt::Debug for Net {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Net")
            .field("name", &self.name)
            .field("places", &self.places.len())
            .field("transitions", &self.transitions.len())
            .finish()
    }
}

impl Net {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Member places in insertion order.
    pub fn places(&self) -> &[Place] {
        &self.places
    }

    /// Member transitions in insertion order. Among assignment transitions
    /// this order is the firing order within a tick.
    pub fn transitions(&self) -> &[Transition] {
        &self.transitions
    }

    /// Dense index of a member place, if it is a member.
    pub fn place_index(&self, place: &Place) -> Option<usize> {
        self.place_index.get(&place.id()).copied()
    }

    /// Look a member place up by name.
    pub fn place_named(&self, name: &str) -> Option<&Place> {
        self.places.iter().find(|p| p.name() == name)
    }

    /// Look a member transition up by name.
    pub fn transition_named(&self, name: &str) -> Option<&Transition> {
        self.transitions.iter().find(|t| t.name() == name)
    }

    /// Build a named sub-net from a subset of members. The sub-net shares
    /// the given place and transition objects with this net; it is closure
    /// checked independently.
    pub fn subnet(
        &self,
        name: impl Into<String>,
        places: &[&Place],
        transitions: &[&Transition],
    ) -> Result<Net> {
        let mut builder = NetBuilder::new(name);
        for place in places {
            builder.add_place(place)?;
        }
        for transition in transitions {
            builder.add_transition(transition)?;
        }
        builder.finalize()
    }

    /// Set union of two nets, keyed by member identity. Fails loudly when
    /// the nets hold distinct members under the same name.
    pub fn merge(&self, other: &Net) -> Result<Net> {
        let mut builder = NetBuilder::new(self.name.clone());
        for place in self.places.iter().chain(other.places.iter()) {
            builder.add_place(place)?;
        }
        for transition in self.transitions.iter().chain(other.transitions.iter()) {
            builder.add_transition(transition)?;
        }
        builder.finalize()
    }

    /// Start a simulation of this net.
    pub fn simulation(&self, settings: SimSettings) -> Result<Simulation> {
        Simulation::new(self.clone(), settings, &[])
    }

    /// Start a simulation with explicit per-place marking overrides.
    pub fn simulation_with_marking(
        &self,
        settings: SimSettings,
        overrides: &[(&Place, f64)],
    ) -> Result<Simulation> {
        Simulation::new(self.clone(), settings, overrides)
    }
}
