#[cfg(test)]
use mockall::automock;

use crate::domain::value_objects::DateKey;

/// Source of the current UTC day
#[cfg_attr(test, automock)]
pub trait Clock: Send + Sync {
    fn today(&self) -> DateKey;
}
