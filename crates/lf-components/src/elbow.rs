use crate::common::{check_non_negative, check_positive};
use crate::error::ComponentResult;

/// Bend with a fixed loss coefficient.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ElbowSpec {
    pub k: f64,
    pub diameter_mm: f64,
}

impl ElbowSpec {
    pub fn validate(&self) -> ComponentResult<()> {
        check_non_negative(self.k, "elbow K")?;
        check_positive(self.diameter_mm, "elbow diameter")?;
        Ok(())
    }
}
