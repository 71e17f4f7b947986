use chrono::Utc;

use crate::application::ports::Clock;
use crate::domain::value_objects::DateKey;

/// Wall clock, in UTC
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> DateKey {
        DateKey::from_datetime(Utc::now())
    }
}
