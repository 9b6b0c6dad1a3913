/// Tag for the shape of a resource's value. The scheduling core only reasons about
/// [`ResourceKind::Scalar`] resources (matching is name-set containment, see [`Resource`]);
/// the other variants exist so offers carrying them round-trip without the core having to
/// understand them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ResourceKind {
    Scalar,
    Ranges,
    Set,
}

/// A named resource carried by an offer or requested by a task.
///
/// Matching between an offer and a task descriptor is name-set containment: an offer
/// matches a descriptor iff, for every resource the descriptor requests, the offer carries
/// a resource of the same name. The core does not do quantitative arithmetic on `amount`;
/// that is left to a richer, offer-external matching strategy.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Resource {
    pub name: String,
    pub kind: ResourceKind,
    pub amount: f64,
}

impl Resource {
    pub fn scalar(name: impl Into<String>, amount: f64) -> Self {
        Self {
            name: name.into(),
            kind: ResourceKind::Scalar,
            amount,
        }
    }
}
