use time::OffsetDateTime;

/// Source of "now" in the organization's local offset. Day and month
/// boundaries of the collection reports are taken from it.
pub trait Clock: 'static + Sync + Send {
    fn now(&self) -> OffsetDateTime;
}

pub trait DependOnClock: 'static + Sync + Send {
    type Clock: Clock;
    fn clock(&self) -> &Self::Clock;
}
