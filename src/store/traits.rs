use chrono::{DateTime, Utc};
use std::sync::{Mutex, PoisonError};
use uuid::Uuid;

/// Time source for audit timestamps
pub trait Clock: Send + Sync {
    /// Never returns a value earlier than a previous call
    fn now(&self) -> DateTime<Utc>;
}

/// Source of opaque, collision-resistant record ids
pub trait IdGenerator: Send + Sync {
    fn next_id(&self) -> String;
}

/// Wall clock clamped so readings never go backwards
pub struct SystemClock {
    last: Mutex<DateTime<Utc>>,
}

impl Default for SystemClock {
    fn default() -> Self {
        Self {
            last: Mutex::new(DateTime::<Utc>::MIN_UTC),
        }
    }
}

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        let mut last = self.last.lock().unwrap_or_else(PoisonError::into_inner);
        let now = Utc::now().max(*last);
        *last = now;
        now
    }
}

/// Random UUID v4 ids
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidGenerator;

impl IdGenerator for UuidGenerator {
    fn next_id(&self) -> String {
        Uuid::new_v4().to_string()
    }
}
