use crate::{
    runtime::{Application, Runtime, RuntimeLimit},
    time::SimTime,
};
use rand::{rngs::StdRng, SeedableRng};
use std::fmt::Debug;

/// A builder for a runtime instance.
#[must_use]
pub struct Builder {
    pub(super) quiet: bool,
    pub(super) rng: StdRng,
    pub(super) limit: RuntimeLimit,
    pub(super) start_time: SimTime,
}

impl Builder {
    /// Creates a new unconfigured builder with an entropy-seeded RNG.
    pub fn new() -> Builder {
        Builder {
            quiet: false,
            rng: StdRng::from_entropy(),
            limit: RuntimeLimit::None,
            start_time: SimTime::MIN,
        }
    }

    /// Creates a `Builder` with a statically seeded RNG.
    pub fn seeded(seed: u64) -> Builder {
        Builder {
            rng: StdRng::seed_from_u64(seed),
            ..Builder::new()
        }
    }

    ///
    /// Suppresses runtime messages from the simulation framework.
    ///
    pub fn quiet(mut self) -> Self {
        self.quiet = true;
        self
    }

    ///
    /// Changes the start time of the runtime (default: `SimTime::MIN`).
    ///
    pub fn start_time(mut self, time: SimTime) -> Self {
        self.start_time = time;
        self
    }

    ///
    /// Adds a bound on the number of handled events.
    ///
    pub fn max_itr(mut self, max_itr: usize) -> Self {
        self.limit.add(RuntimeLimit::EventCount(max_itr));
        self
    }

    ///
    /// Adds an exclusive stop time to the runtime (default: inf).
    ///
    pub fn max_time(mut self, max_time: SimTime) -> Self {
        self.limit.add(RuntimeLimit::SimTime(max_time));
        self
    }

    ///
    /// Adds a custom limit to the end of the runtime, combined with
    /// all previously set `max_itr` and `max_time` options.
    ///
    pub fn limit(mut self, limit: RuntimeLimit) -> Self {
        self.limit.add(limit);
        self
    }

    ///
    /// Builds a new [`Runtime`] instance, using an application as core,
    /// and accepting events of the applications event set.
    ///
    /// # Examples
    ///
    /// ```
    /// use simnet::prelude::*;
    ///
    /// #[derive(Debug)]
    /// struct App(usize, String);
    /// # impl Application for App {
    /// #   type EventSet = Events;
    /// # }
    /// # #[derive(Debug)]
    /// # enum Events {}
    /// # impl EventSet<App> for Events {
    /// #   fn handle(self, rt: &mut Runtime<App>) {}
    /// # }
    ///
    /// let app = App(42, String::from("Hello there!"));
    /// let rt = Builder::new().build(app);
    /// ```
    pub fn build<A: Application>(self, app: A) -> Runtime<A> {
        Runtime::new_with(self, app)
    }
}

impl Default for Builder {
    fn default() -> Self {
        Builder::new()
    }
}

impl Debug for Builder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Builder")
            .field("limit", &self.limit)
            .field("start_time", &self.start_time)
            .finish()
    }
}
