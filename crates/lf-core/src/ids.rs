use core::fmt;
use core::num::NonZeroU32;

/// Compact, stable identifier for an element of a pipeline chain.
///
/// - `u32` keeps snapshots small
/// - `NonZero` lets `Option<ElementId>` stay the same size
///
/// Ids are assigned once by the authoring layer and survive reordering of
/// the chain, so they are never derived from an element's current position.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ElementId(NonZeroU32);

impl ElementId {
    /// Create an id from a 0-based index by storing index+1.
    ///
    /// Saturates at `u32::MAX - 1` so the stored value is always nonzero.
    pub fn from_index(index: u32) -> Self {
        Self(NonZeroU32::MIN.saturating_add(index))
    }

    /// Recover the 0-based index.
    pub fn index(self) -> u32 {
        self.0.get() - 1
    }
}

impl fmt::Debug for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ElementId({})", self.index())
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.index())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id_round_trip_index() {
        for i in [0_u32, 1, 2, 42, 10_000] {
            let id = ElementId::from_index(i);
            assert_eq!(id.index(), i);
        }
    }

    #[test]
    fn option_id_is_small() {
        assert_eq!(
            core::mem::size_of::<ElementId>(),
            core::mem::size_of::<Option<ElementId>>()
        );
    }

    #[test]
    fn display_uses_hash_prefix() {
        assert_eq!(ElementId::from_index(7).to_string(), "#7");
    }
}
