use crate::ids::MasterId;

/// Identifying information about the master a session has registered with.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MasterInfo {
    pub master_id: MasterId,
    pub host: String,
    pub port: u16,
}
