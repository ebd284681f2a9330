//! Urgency tiers for inspection due dates

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UrgencyTier {
    /// Within 3 months of the reference month, or any later month
    Critical,
    /// 4 to 12 months before the reference month
    Warning,
    /// More than 12 months before the reference month
    Normal,
}

impl UrgencyTier {
    pub const ALL: [UrgencyTier; 3] = [UrgencyTier::Critical, UrgencyTier::Warning, UrgencyTier::Normal];

    pub fn label(&self) -> &'static str {
        match self {
            UrgencyTier::Critical => "critical",
            UrgencyTier::Warning => "warning",
            UrgencyTier::Normal => "normal",
        }
    }
}

impl std::fmt::Display for UrgencyTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
