use chrono::{DateTime, Utc};

/// Source of "now" for every staleness decision.
pub trait TimeProvider: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

pub struct SystemTimeProvider;

impl TimeProvider for SystemTimeProvider {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Manually driven clock for tests.
#[cfg(test)]
pub struct FakeTimeProvider {
    current: std::sync::Mutex<DateTime<Utc>>,
}

#[cfg(test)]
impl FakeTimeProvider {
    pub fn new(initial: DateTime<Utc>) -> Self {
        Self {
            current: std::sync::Mutex::new(initial),
        }
    }

    pub fn set(&self, time: DateTime<Utc>) {
        *self.current.lock().unwrap() = time;
    }

    pub fn advance(&self, by: chrono::Duration) {
        let mut current = self.current.lock().unwrap();
        *current += by;
    }
}

#[cfg(test)]
impl TimeProvider for FakeTimeProvider {
    fn now(&self) -> DateTime<Utc> {
        *self.current.lock().unwrap()
    }
}
