use chrono::{DateTime, Utc};

///
/// An overridable clock - used for tests that need to travel past a token's
/// expiry without sleeping.
///
#[derive(Debug, Default)]
pub struct TimeProvider {
    fixed: Option<DateTime<Utc>>
}

impl TimeProvider {
    pub fn now(&self) -> DateTime<Utc> {
        match self.fixed {
            Some(fixed) => fixed,
            None => Utc::now()
        }
    }

    ///
    /// Fix the clock at the given instant, or None to resume the wall clock.
    ///
    pub fn fix(&mut self, fixed: Option<DateTime<Utc>>) {
        self.fixed = fixed;
    }
}
