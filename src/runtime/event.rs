use crate::{runtime::Runtime, time::SimTime};
use std::{
    cmp,
    fmt::{Debug, Display},
    marker::PhantomData,
};

///
/// A trait that defines a runtime application
/// that depends on an event set to be processed by the
/// runtime.
///
pub trait Application: Sized {
    ///
    /// The set of events used in the simulation.
    ///
    type EventSet: EventSet<Self>;

    ///
    /// A function that is called only once at the start of the simulation.
    ///
    /// This is the place to schedule the initial events of a run.
    ///
    fn at_sim_start(_rt: &mut Runtime<Self>) {}

    ///
    /// A function that is called once the simulation reached its limit.
    ///
    fn at_sim_end(_rt: &mut Runtime<Self>) {}
}

///
/// A type that can be used as a wrapper around all events
/// handled by an application A.
///
/// Note that there is a cyclic dependecy between the event set
/// and the application. This is due to the fact that events allways define
/// those two parameters to be related, but this type information is willingly
/// elided to fit into the rust generics system.
///
pub trait EventSet<App>
where
    App: Application<EventSet = Self>,
{
    ///
    /// A function to handle an upcoming event represented as an instance
    /// of the event set.
    ///
    /// Usually this is just a match statement that calls the handle function
    /// on the given variant, as defined by the trait [`Event`].
    ///
    fn handle(self, rt: &mut Runtime<App>);
}

///
/// A type that can handle an event, specific to the given application
/// and associated event set.
///
/// Note that events in an event set dont need to implement this trait,
/// nonetheless it is advised to use it to better isolate different events
/// and their associated data.
///
pub trait Event<App>
where
    App: Application,
{
    ///
    /// A function to handle an upcoming event represented as a specific
    /// instance of an event type.
    ///
    fn handle(self, rt: &mut Runtime<App>);
}

///
/// A runtime unique identifier for an event.
///
/// Ids are handed out monotonically by the runtime, so they double as
/// insertion-order tie breakers for events scheduled at the same time.
///
pub(crate) type EventId = usize;

///
/// A bin-heap node of an event from the applications event set.
///
pub(crate) struct EventNode<A>
where
    A: Application,
{
    /// The deadline timestamp for the event.
    pub(crate) time: SimTime,
    /// A runtime-specific unique identifier.
    pub(crate) id: EventId,
    /// The actual event.
    pub(crate) event: A::EventSet,

    /// A marker to preserve the type information concerning the application,
    /// not only the event set.
    pub(crate) _phantom: PhantomData<A>,
}

impl<A> EventNode<A>
where
    A: Application,
{
    ///
    /// Delegation call to 'handle' on the event from the [`EventSet`].
    ///
    pub(crate) fn handle(self, rt: &mut Runtime<A>) {
        self.event.handle(rt);
    }
}

impl<A> cmp::PartialEq for EventNode<A>
where
    A: Application,
{
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl<A> cmp::Eq for EventNode<A> where A: Application {}

impl<A> cmp::PartialOrd for EventNode<A>
where
    A: Application,
{
    fn partial_cmp(&self, other: &Self) -> Option<cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl<A> cmp::Ord for EventNode<A>
where
    A: Application,
{
    fn cmp(&self, other: &Self) -> cmp::Ordering {
        // Inverted call should act as reverse, to make the binary heap a
        // min-heap. Equal times fall back to insertion order via the id.
        other
            .time
            .cmp(&self.time)
            .then_with(|| other.id.cmp(&self.id))
    }
}

impl<A> Debug for EventNode<A>
where
    A: Application,
    A::EventSet: Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "EventNode {{ id: {} time: {} event: {:?} }}",
            self.id, self.time, self.event
        )
    }
}

impl<A> Display for EventNode<A>
where
    A: Application,
    A::EventSet: Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "EventNode {{ id: {} time: {} event: {} }}",
            self.id, self.time, self.event
        )
    }
}
