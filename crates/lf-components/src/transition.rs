//! Concentric reducer/expander.

use crate::common::check_positive;
use crate::error::ComponentResult;
use crate::losses::AreaChange;

/// Catalogue subtype of a transition. The loss model follows the geometry
/// (`d_in` vs `d_out`), not this label.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum TransitionKind {
    Reducer,
    Expander,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TransitionSpec {
    pub kind: TransitionKind,
    pub d_in_mm: f64,
    pub d_out_mm: f64,
}

impl TransitionSpec {
    pub fn validate(&self) -> ComponentResult<()> {
        check_positive(self.d_in_mm, "transition inlet diameter")?;
        check_positive(self.d_out_mm, "transition outlet diameter")?;
        Ok(())
    }

    /// Area change implied by the geometry, `None` for equal bores.
    pub fn area_change(&self) -> Option<AreaChange> {
        if self.d_out_mm < self.d_in_mm {
            Some(AreaChange::Contraction)
        } else if self.d_out_mm > self.d_in_mm {
            Some(AreaChange::Expansion)
        } else {
            None
        }
    }

    /// True when the subtype label disagrees with the geometry.
    pub fn is_mislabelled(&self) -> bool {
        matches!(
            (self.kind, self.area_change()),
            (TransitionKind::Reducer, Some(AreaChange::Expansion))
                | (TransitionKind::Expander, Some(AreaChange::Contraction))
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn geometry_decides_area_change() {
        let t = TransitionSpec {
            kind: TransitionKind::Reducer,
            d_in_mm: 80.0,
            d_out_mm: 50.0,
        };
        assert_eq!(t.area_change(), Some(AreaChange::Contraction));
        assert!(!t.is_mislabelled());

        let t = TransitionSpec {
            kind: TransitionKind::Reducer,
            d_in_mm: 50.0,
            d_out_mm: 80.0,
        };
        assert_eq!(t.area_change(), Some(AreaChange::Expansion));
        assert!(t.is_mislabelled());
    }
}
