use enumset::enum_set;
use enumset::EnumSet;
use enumset::EnumSetType;

/// A description of the kinds of events that can happen on a domain.
#[derive(Debug, EnumSetType, Hash)]
pub(crate) enum DomainEvent {
    /// The domain collapsed to a single value.
    Assign,
    /// The lower bound was tightened.
    LowerBound,
    /// The upper bound was tightened.
    UpperBound,
    /// A value strictly between the bounds was removed.
    Removal,
}

/// The set of [`DomainEvent`]s a propagator subscribes to for one variable.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) struct DomainEvents {
    events: EnumSet<DomainEvent>,
}

impl DomainEvents {
    /// Lower and upper bound tightening; assignments always come with one of these.
    pub(crate) const BOUNDS: DomainEvents =
        DomainEvents::new(enum_set!(DomainEvent::LowerBound | DomainEvent::UpperBound));
    /// Every change to the domain.
    pub(crate) const ANY: DomainEvents = DomainEvents::new(enum_set!(
        DomainEvent::Assign
            | DomainEvent::LowerBound
            | DomainEvent::UpperBound
            | DomainEvent::Removal
    ));
    /// Only lower bound tightening.
    pub(crate) const LOWER_BOUND: DomainEvents =
        DomainEvents::new(enum_set!(DomainEvent::LowerBound));
    /// Only upper bound tightening.
    pub(crate) const UPPER_BOUND: DomainEvents =
        DomainEvents::new(enum_set!(DomainEvent::UpperBound));
    /// Only the domain becoming a singleton.
    pub(crate) const ASSIGN: DomainEvents = DomainEvents::new(enum_set!(DomainEvent::Assign));

    pub(crate) const fn new(events: EnumSet<DomainEvent>) -> DomainEvents {
        DomainEvents { events }
    }

    pub(crate) fn contains(&self, event: DomainEvent) -> bool {
        self.events.contains(event)
    }

    pub(crate) fn union(self, other: DomainEvents) -> DomainEvents {
        DomainEvents::new(self.events | other.events)
    }
}
