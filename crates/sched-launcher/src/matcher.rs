use std::collections::HashSet;

use sched_types::{Offer, OfferId, TaskDescriptor};

/// One descriptor bound to the offer that will carry it.
pub type Assignment = Vec<(Offer, TaskDescriptor)>;

/// Greedily binds each descriptor to the first not-yet-used offer that provides every
/// resource it requires. Returns `None` unless every descriptor can be bound; the caller
/// treats a partial match as no match at all (no offer hoarding across calls).
pub fn match_offers(descriptors: &[TaskDescriptor], offers: &[Offer]) -> Option<Assignment> {
    let mut used: HashSet<&OfferId> = HashSet::new();
    let mut assignment = Assignment::with_capacity(descriptors.len());

    for descriptor in descriptors {
        let offer = offers
            .iter()
            .find(|offer| !used.contains(&offer.offer_id) && offer.provides_all(descriptor.resource_names()))?;

        used.insert(&offer.offer_id);
        assignment.push((offer.clone(), descriptor.clone()));
    }

    Some(assignment)
}
