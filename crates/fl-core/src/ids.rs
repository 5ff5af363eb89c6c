//! Typed identifiers.
//!
//! `AgentId` is a stable identity, *not* a storage index: once agents die the
//! row holding a given id moves.  The other ids are dense indices assigned by
//! the model builder and never change during a run.

use std::fmt;

macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty);) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis struct $name(pub $inner);

        impl $name {
            /// `MAX` of the inner type; never assigned.
            pub const INVALID: $name = $name(<$inner>::MAX);

            #[inline]
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::INVALID
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}#{}", stringify!($name), self.0)
            }
        }

        impl TryFrom<usize> for $name {
            type Error = std::num::TryFromIntError;
            fn try_from(n: usize) -> Result<$name, Self::Error> {
                <$inner>::try_from(n).map($name)
            }
        }
    };
}

typed_id! {
    /// Stable agent identity.  Assigned from a monotonic counter at creation
    /// and never reused within a run, even after the agent dies.
    pub struct AgentId(u32);
}

typed_id! {
    /// Index of an agent type (population) in the model description.
    pub struct PopulationId(u16);
}

typed_id! {
    /// Index of an agent function in the model description.
    pub struct FunctionId(u16);
}

typed_id! {
    /// Index of a message list in the model description.
    pub struct MessageListId(u16);
}
