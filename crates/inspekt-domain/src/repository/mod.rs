//! Source traits for remote capabilities
//!
//! Implementations live in the infrastructure layer; they are expected to
//! apply their own bounded retry and to report terminal failures as
//! `Error::Fetch`, `Error::Lookup` or `Error::Auth`.

use inspekt_types::Result;

use crate::model::VehicleRecord;

/// Bearer credential supplier
pub trait CredentialProvider {
    /// Current token, acquired on first use
    fn token(&self) -> Result<String>;

    /// Acquire a fresh token, replacing the current one
    fn refresh(&self) -> Result<String>;
}

/// Remote fleet dataset
pub trait FleetSource {
    /// Load all active vehicles
    fn active_vehicles(&self) -> Result<Vec<VehicleRecord>>;
}

/// Remote label color lookup
pub trait LabelColorSource {
    /// Color code of a label, empty when the label has none
    fn color_code(&self, label_id: &str) -> Result<String>;
}

impl<T: CredentialProvider + ?Sized> CredentialProvider for &T {
    fn token(&self) -> Result<String> {
        (**self).token()
    }

    fn refresh(&self) -> Result<String> {
        (**self).refresh()
    }
}

impl<T: FleetSource + ?Sized> FleetSource for &T {
    fn active_vehicles(&self) -> Result<Vec<VehicleRecord>> {
        (**self).active_vehicles()
    }
}

impl<T: LabelColorSource + ?Sized> LabelColorSource for &T {
    fn color_code(&self, label_id: &str) -> Result<String> {
        (**self).color_code(label_id)
    }
}
