//! Logging wrapper for named operations

use std::fmt::{Debug, Display};

use tracing::{debug, error, info};

/// Run `f` as the named operation, logging its arguments, its return value
/// and any error. The result is returned unchanged.
pub fn instrumented<T, E, A, F>(operation: &str, args: A, f: F) -> Result<T, E>
where
    T: Debug,
    E: Display,
    A: Debug,
    F: FnOnce() -> Result<T, E>,
{
    info!("{} with {:?}", operation, args);
    match f() {
        Ok(value) => {
            debug!("{} has return value = {:?}", operation, value);
            info!("{} finished", operation);
            Ok(value)
        }
        Err(e) => {
            error!("{} has error {}", operation, e);
            Err(e)
        }
    }
}
