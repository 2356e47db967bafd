//! Places: the named state variables of a net

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use uuid::Uuid;

/// Unique identifier for places
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlaceId(pub Uuid);

impl PlaceId {
    fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

#[derive(Debug)]
struct PlaceInner {
    id: PlaceId,
    name: String,
    initial: Option<f64>,
}

/// A named real-valued state variable (a species concentration, a timer, a
/// control flag).
///
/// `Place` is a cheaply clonable shared handle: clones refer to the same
/// underlying place, and nets deduplicate members by this identity. A place
/// created without an initial value is *marking required* - before a
/// simulation can start it must receive a value from a marking override, or
/// be the codomain of an assignment transition that derives it.
#[derive(Clone)]
pub struct Place(Arc<PlaceInner>);

impl Place {
    /// A place with no initial value (marking required).
    pub fn new(name: impl Into<String>) -> Self {
        Self(Arc::new(PlaceInner {
            id: PlaceId::new(),
            name: name.into(),
            initial: None,
        }))
    }

    /// A place with an initial value.
    pub fn with_initial(name: impl Into<String>, initial: f64) -> Self {
        Self(Arc::new(PlaceInner {
            id: PlaceId::new(),
            name: name.into(),
            initial: Some(initial),
        }))
    }

    pub fn id(&self) -> PlaceId {
        self.0.id
    }

    pub fn name(&self) -> &str {
        &self.0.name
    }

    pub fn initial(&self) -> Option<f64> {
        self.0.initial
    }
}

impl PartialEq for Place {
    fn eq(&self, other: &Self) -> bool {
        self.0.id == other.0.id
    }
}

impl Eq for Place {}

impl fmt::Debug for Place {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Place")
            .field("name", &self.0.name)
            .field("initial", &self.0.initial)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_identity() {
        let mass = Place::with_initial("Mass", 1.0);
        let alias = mass.clone();
        assert_eq!(mass, alias);
        assert_eq!(mass.id(), alias.id());
    }

    #[test]
    fn same_name_is_not_same_place() {
        let a = Place::with_initial("Mass", 1.0);
        let b = Place::with_initial("Mass", 1.0);
        assert_ne!(a, b);
    }

    #[test]
    fn marking_required_has_no_initial() {
        assert_eq!(Place::new("CycD").initial(), None);
        assert_eq!(Place::with_initial("Mass", 1.098).initial(), Some(1.098));
    }
}
