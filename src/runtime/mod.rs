//!
//! Central primitives for running a discrete event simulation.
//!
//! The [`Runtime`] is an explicitly constructed, passed-by-reference object
//! with a build / run / finish lifecycle. All state of a run, including the
//! current simulation time and the random number generator, lives inside the
//! runtime instance.
//!

use crate::time::{Duration, SimTime};
use rand::{distributions::Standard, prelude::Distribution, rngs::StdRng, Rng};
use std::{
    any::type_name,
    fmt::{Debug, Display},
};

mod event;
pub use self::event::*;

mod fes;
use self::fes::FutureEventSet;

mod limit;
pub use self::limit::*;

mod builder;
pub use self::builder::*;

mod result;
pub use self::result::*;

mod timer;
pub use self::timer::*;

pub(crate) const FT_NET: bool = cfg!(feature = "net");

pub(crate) const SYM_CHECKMARK: char = '\u{2713}';
pub(crate) const SYM_CROSSMARK: char = '\u{02df}';

///
/// The central managment point for a generic
/// instance of a discrete event based simulation.
///
/// To create a simulation, provide an 'app' parameter with an associated
/// event set:
///
/// - Create an 'App' struct that implements the trait [`Application`].
///   This struct holds the systems state and defines the event set used in
///   the simulation.
/// - Create your events that handle the logic of your simulation. They should
///   implement [`Event`] with the generic parameter A, where A is your
///   'App' struct.
/// - To bind those two together create an enum that implements [`EventSet`]
///   and holds all your events.
///
/// Runtimes are created through the [`Builder`].
///
pub struct Runtime<A>
where
    A: Application,
{
    /// The contained runtime application, defining globals and the used event set.
    pub app: A,

    sim_time: SimTime,

    limit: RuntimeLimit,
    event_id: EventId,
    itr: usize,

    quiet: bool,
    rng: StdRng,

    future_event_set: FutureEventSet<A>,
}

impl<A> Runtime<A>
where
    A: Application,
{
    ///
    /// Returns the number of events that were scheduled on this [`Runtime`] instance.
    ///
    #[inline]
    #[must_use]
    pub fn num_events_scheduled(&self) -> usize {
        self.event_id
    }

    ///
    /// Returns the number of events that were received & handled on this
    /// [`Runtime`] instance.
    ///
    #[must_use]
    pub fn num_events_dispatched(&self) -> usize {
        self.itr
    }

    ///
    /// Returns the current simulation time.
    ///
    #[must_use]
    pub fn sim_time(&self) -> SimTime {
        self.sim_time
    }

    ///
    /// Returns the limit that terminates the event execution.
    ///
    #[must_use]
    pub fn limit(&self) -> &RuntimeLimit {
        &self.limit
    }

    ///
    /// Generates a random instance of type T with a Standard distribution,
    /// using the runtime-bound rng.
    ///
    pub fn random<T>(&mut self) -> T
    where
        Standard: Distribution<T>,
    {
        self.rng.gen()
    }

    ///
    /// Generates a random instance of type T with a distribution of type D,
    /// using the runtime-bound rng.
    ///
    pub fn rng_sample<T, D>(&mut self, distr: D) -> T
    where
        D: Distribution<T>,
    {
        self.rng.sample(distr)
    }

    pub(crate) fn new_with(builder: Builder, app: A) -> Self {
        Self {
            app,
            sim_time: builder.start_time,
            limit: builder.limit,
            event_id: 0,
            itr: 0,
            quiet: builder.quiet,
            rng: builder.rng,
            future_event_set: FutureEventSet::new(builder.start_time),
        }
    }

    ///
    /// Runs the application until all events are handled or a breaking
    /// condition is reached.
    ///
    /// # Examples
    ///
    /// ```
    /// use simnet::prelude::*;
    ///
    /// struct MyApp;
    /// impl Application for MyApp {
    ///     type EventSet = MyEventSet;
    ///     fn at_sim_start(rt: &mut Runtime<Self>) {
    ///         rt.add_event(MyEventSet::EventA, SimTime::from(1.0));
    ///         rt.add_event(MyEventSet::EventB, SimTime::from(2.0));
    ///         rt.add_event(MyEventSet::EventA, SimTime::from(3.0));
    ///     }
    /// }
    ///
    /// #[derive(Debug)]
    /// enum MyEventSet {
    ///     EventA,
    ///     EventB,
    /// }
    /// impl EventSet<MyApp> for MyEventSet {
    ///     fn handle(self, rt: &mut Runtime<MyApp>) {
    ///         println!("{:?} at {}", self, rt.sim_time());
    ///     }
    /// }
    ///
    /// let runtime = Builder::new().quiet().build(MyApp);
    /// match runtime.run() {
    ///     RuntimeResult::Finished { time, event_count, .. } => {
    ///         assert_eq!(time, SimTime::from(3.0));
    ///         assert_eq!(event_count, 3);
    ///     }
    ///     _ => panic!("expected a finished simulation"),
    /// }
    /// ```
    ///
    #[must_use]
    pub fn run(mut self) -> RuntimeResult<A> {
        self.start();
        while !self.dispatch_event() {}
        self.finish()
    }

    fn start(&mut self) {
        macro_rules! symbol {
            ($i:ident) => {
                if $i {
                    SYM_CHECKMARK
                } else {
                    SYM_CROSSMARK
                }
            };
        }

        if !self.quiet {
            println!("\u{23A1}");
            println!("\u{23A2} Simulation starting");
            println!("\u{23A2}  net [{}]", symbol!(FT_NET));
            println!("\u{23A2}  Event limit := {}", self.limit);
            println!("\u{23A3}");
        }

        A::at_sim_start(self);
    }

    fn finish(mut self) -> RuntimeResult<A> {
        A::at_sim_end(&mut self);

        if self.future_event_set.is_empty() && self.itr == 0 {
            if !self.quiet {
                println!("\u{23A1}");
                println!("\u{23A2} Empty simulation");
                println!("\u{23A2}  Ended at event #0 after 0s");
                println!("\u{23A3}");
            }

            return RuntimeResult::EmptySimulation { app: self.app };
        }

        let time = self.sim_time;

        if self.future_event_set.is_empty() {
            if !self.quiet {
                println!("\u{23A1}");
                println!("\u{23A2} Simulation ended");
                println!("\u{23A2}  Ended at event #{} after {}", self.itr, time);
                println!("\u{23A3}");
            }

            RuntimeResult::Finished {
                app: self.app,
                time,
                event_count: self.itr,
            }
        } else {
            if !self.quiet {
                println!("\u{23A1}");
                println!("\u{23A2} Simulation ended prematurly");
                println!(
                    "\u{23A2}  Ended at event #{} with {} active events after {}",
                    self.itr,
                    self.future_event_set.len(),
                    time
                );
                println!("\u{23A3}");
            }

            RuntimeResult::PrematureAbort {
                app: self.app,
                time,
                event_count: self.itr,
                active_events: self.future_event_set.len(),
            }
        }
    }

    ///
    /// Processes the next event in the future event set by calling its
    /// handler. Returns `true` if the simulation should stop.
    ///
    fn dispatch_event(&mut self) -> bool {
        if self.future_event_set.is_empty() {
            return true;
        }

        let node = self.future_event_set.fetch_next();

        if self.limit.applies(self.itr + 1, node.time) {
            // The limit is reached. Do not consume the event, so that the
            // result reflects the remaining workload.
            self.future_event_set.requeue(node);
            return true;
        }

        self.itr += 1;

        // Let this be the only position where the sim time is changed.
        self.sim_time = node.time;

        node.handle(self);
        false
    }

    ///
    /// Adds an event to the future event set, that will be handled in
    /// 'duration' time units.
    ///
    pub fn add_event_in(&mut self, event: impl Into<A::EventSet>, duration: impl Into<Duration>) {
        self.add_event(event, self.sim_time + duration.into());
    }

    ///
    /// Adds an event to the future event set that will be handled at the
    /// given time. Note that this time must not lie in the past, i.e. it must
    /// be greater or equal to `sim_time`, or this function will panic.
    ///
    pub fn add_event(&mut self, event: impl Into<A::EventSet>, time: SimTime) {
        self.event_id += 1;
        self.future_event_set
            .add(time, self.event_id, event.into());
    }
}

impl<A> Debug for Runtime<A>
where
    A: Application,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Runtime<{}> {{ sim_time: {} (itr {} / {}) scheduled: {} enqueued: {} }}",
            type_name::<A>(),
            self.sim_time(),
            self.num_events_dispatched(),
            self.limit,
            self.num_events_scheduled(),
            self.future_event_set.len()
        )
    }
}

impl<A> Display for Runtime<A>
where
    A: Application,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Debug::fmt(self, f)
    }
}
