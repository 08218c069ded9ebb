use crate::{
    runtime::{Application, Runtime},
    time::Duration,
};

///
/// A recurring timer with an explicit interval and payload.
///
/// Self-rescheduling closures are the usual way to express recurring
/// virtual-time work in an event simulator. This type makes the recurrence
/// explicit instead: the interval and the data threaded through every firing
/// are plain fields, and re-arming is an explicit call inside the owning
/// event handler.
///
/// A periodic task has no stop condition of its own. It keeps firing until
/// the runtime limit halts the whole event loop.
///
/// # Examples
///
/// ```
/// use simnet::prelude::*;
///
/// struct App {
///     firings: Vec<SimTime>,
/// }
///
/// impl Application for App {
///     type EventSet = Tick;
///     fn at_sim_start(rt: &mut Runtime<Self>) {
///         rt.add_event(Tick(PeriodicTask::new(Duration::from_secs(3), ())), SimTime::ZERO);
///     }
/// }
///
/// #[derive(Debug, Clone)]
/// struct Tick(PeriodicTask<()>);
///
/// impl From<PeriodicTask<()>> for Tick {
///     fn from(task: PeriodicTask<()>) -> Self {
///         Tick(task)
///     }
/// }
///
/// impl EventSet<App> for Tick {
///     fn handle(self, rt: &mut Runtime<App>) {
///         rt.app.firings.push(rt.sim_time());
///         self.0.rearm(rt);
///     }
/// }
///
/// let rt = Builder::new()
///     .quiet()
///     .max_time(SimTime::from(30.0))
///     .build(App { firings: Vec::new() });
/// let (app, ..) = rt.run().unwrap_premature_abort();
/// assert_eq!(app.firings.len(), 10);
/// ```
///
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PeriodicTask<P> {
    /// The fixed virtual-time offset between two firings.
    pub interval: Duration,
    /// The data threaded through every firing.
    pub payload: P,
}

impl<P> PeriodicTask<P> {
    ///
    /// Creates a new task firing every `interval` time units.
    ///
    pub const fn new(interval: Duration, payload: P) -> Self {
        Self { interval, payload }
    }
}

impl<P> PeriodicTask<P>
where
    P: Clone,
{
    ///
    /// Schedules the next firing of this task, `interval` time units
    /// after the current simulation time.
    ///
    pub fn rearm<A>(&self, rt: &mut Runtime<A>)
    where
        A: Application,
        PeriodicTask<P>: Into<A::EventSet>,
    {
        rt.add_event_in(self.clone(), self.interval);
    }
}
