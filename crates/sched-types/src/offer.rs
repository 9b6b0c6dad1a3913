use crate::ids::{ExecutorId, FrameworkId, OfferId, SlaveId};
use crate::resource::Resource;

/// A bundle of resources advertised by a slave via the master to a framework. Immutable once
/// received; valid until accepted (by a launch) or declined, after which its id must not be
/// reused.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Offer {
    pub offer_id: OfferId,
    pub framework_id: FrameworkId,
    pub slave_id: SlaveId,
    pub host: String,
    pub executor_id: Option<ExecutorId>,
    pub resources: Vec<Resource>,
}

impl Offer {
    /// True iff the offer carries a resource of every name in `names` (set containment; see
    /// [`Resource`]).
    pub fn provides_all(&self, names: impl IntoIterator<Item = impl AsRef<str>>) -> bool {
        names
            .into_iter()
            .all(|name| self.resources.iter().any(|r| r.name == name.as_ref()))
    }
}
