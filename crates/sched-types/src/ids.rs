use std::fmt;

macro_rules! opaque_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        pub struct $name(String);

        impl $name {
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_owned())
            }
        }
    };
}

opaque_id!(
    /// Identifies a registered framework (scheduler session) with the master.
    FrameworkId
);
opaque_id!(
    /// Identifies the master a session is connected to.
    MasterId
);
opaque_id!(
    /// Identifies a resource offer. Valid until accepted or declined; never reused after
    /// either.
    OfferId
);
opaque_id!(
    /// Identifies a slave (worker node) advertising resources.
    SlaveId
);
opaque_id!(
    /// Identifies a task launched on a slave inside an offer.
    TaskId
);
opaque_id!(
    /// Identifies an executor running on a slave.
    ExecutorId
);
