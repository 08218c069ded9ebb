use crate::time::SimTime;

///
/// The product of a completed simulation run.
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuntimeResult<A> {
    /// The simulation ended without ever handling an event.
    EmptySimulation {
        /// The application in its initial state.
        app: A,
    },

    /// The simulation drained its event set completely.
    Finished {
        /// The application in its final state.
        app: A,
        /// The timestamp of the last handled event.
        time: SimTime,
        /// The total number of handled events.
        event_count: usize,
    },

    /// The simulation hit a runtime limit while events were still pending.
    PrematureAbort {
        /// The application in its final state.
        app: A,
        /// The timestamp of the last handled event.
        time: SimTime,
        /// The total number of handled events.
        event_count: usize,
        /// The number of unhandled events left in the event set.
        active_events: usize,
    },
}

impl<A> RuntimeResult<A> {
    ///
    /// Returns the contained application, whichever way the run ended.
    ///
    pub fn into_app(self) -> A {
        match self {
            Self::EmptySimulation { app }
            | Self::Finished { app, .. }
            | Self::PrematureAbort { app, .. } => app,
        }
    }

    ///
    /// Returns the timestamp of the last handled event,
    /// or `SimTime::ZERO` for an empty simulation.
    ///
    pub fn time(&self) -> SimTime {
        match self {
            Self::EmptySimulation { .. } => SimTime::ZERO,
            Self::Finished { time, .. } | Self::PrematureAbort { time, .. } => *time,
        }
    }

    ///
    /// Unwraps a [`RuntimeResult::Finished`] into its parts.
    ///
    /// # Panics
    ///
    /// Panics if the simulation did not finish by draining its event set.
    ///
    pub fn unwrap(self) -> (A, SimTime, usize) {
        match self {
            Self::Finished {
                app,
                time,
                event_count,
            } => (app, time, event_count),
            Self::EmptySimulation { .. } => panic!("runtime result: empty simulation"),
            Self::PrematureAbort {
                time,
                active_events,
                ..
            } => panic!(
                "runtime result: premature abort at {time} with {active_events} active events"
            ),
        }
    }

    ///
    /// Unwraps any terminated run into the application and final time,
    /// accepting premature aborts caused by runtime limits.
    ///
    /// # Panics
    ///
    /// Panics if the simulation was empty.
    ///
    pub fn unwrap_premature_abort(self) -> (A, SimTime, usize) {
        match self {
            Self::Finished {
                app,
                time,
                event_count,
            }
            | Self::PrematureAbort {
                app,
                time,
                event_count,
                ..
            } => (app, time, event_count),
            Self::EmptySimulation { .. } => panic!("runtime result: empty simulation"),
        }
    }
}
