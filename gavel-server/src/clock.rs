use time::OffsetDateTime;

/// Source of "now" for every time-based decision in the engine.
///
/// Injected so that tests and simulations can run against a controlled clock
/// instead of the host wall clock.
pub trait Clock: Send + Sync + 'static {
    fn now(&self) -> OffsetDateTime;
}

#[derive(Clone, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> OffsetDateTime {
        OffsetDateTime::now_utc()
    }
}
