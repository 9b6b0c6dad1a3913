use std::collections::HashSet;

use sched_types::{Offer, TaskDescriptor};

/// A predicate over a proposed offer-to-descriptor assignment. Returning `false` rejects the
/// whole batch: every offer in it is declined and the launcher waits for the next batch.
pub trait OfferFilter: Send + Sync {
    fn accept(&self, assignment: &[(Offer, TaskDescriptor)]) -> bool;
}

impl<F> OfferFilter for F
where
    F: Fn(&[(Offer, TaskDescriptor)]) -> bool + Send + Sync,
{
    fn accept(&self, assignment: &[(Offer, TaskDescriptor)]) -> bool {
        self(assignment)
    }
}

/// Rejects an assignment that would place more than one task on the same slave.
pub fn distinct_slaves(assignment: &[(Offer, TaskDescriptor)]) -> bool {
    let mut seen = HashSet::new();
    assignment.iter().all(|(offer, _)| seen.insert(&offer.slave_id))
}
