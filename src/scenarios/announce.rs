//!
//! The repeating announcement timer.
//!
//! Given a name and an identifier string, print the current simulated time
//! alongside both strings, then re-arm after a fixed 3 second virtual-time
//! offset, indefinitely. The timer has no stop condition of its own; it
//! terminates because the runtime limit halts the whole event loop.
//!

use crate::{
    runtime::{Application, Builder, Event, EventSet, PeriodicTask, Runtime},
    time::{Duration, SimTime},
};

/// The fixed offset between two announcements.
pub const ANNOUNCE_INTERVAL: Duration = Duration::from_secs(3);

/// The default stop time of the scenario.
pub const DEFAULT_STOP: SimTime = SimTime::from_duration(Duration::from_secs(30));

///
/// The two opaque strings threaded through every firing.
///
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Announcement {
    /// A free-form name.
    pub name: String,
    /// A free-form identifier.
    pub number: String,
}

///
/// The application state: the armed task plus a log of all firings.
///
#[derive(Debug)]
pub struct AnnounceApp {
    task: PeriodicTask<Announcement>,
    /// The virtual times at which the announcement fired, in order.
    pub firings: Vec<SimTime>,
}

impl AnnounceApp {
    ///
    /// Creates the application with an armed 3 second announcement timer.
    ///
    #[must_use]
    pub fn new(name: impl Into<String>, number: impl Into<String>) -> Self {
        Self {
            task: PeriodicTask::new(
                ANNOUNCE_INTERVAL,
                Announcement {
                    name: name.into(),
                    number: number.into(),
                },
            ),
            firings: Vec::new(),
        }
    }
}

impl Application for AnnounceApp {
    type EventSet = AnnounceEvents;

    fn at_sim_start(rt: &mut Runtime<Self>) {
        // The first announcement fires immediately.
        let task = rt.app.task.clone();
        rt.add_event(task, SimTime::ZERO);
    }
}

///
/// All events of the announcement scenario.
///
#[derive(Debug, Clone)]
pub enum AnnounceEvents {
    /// A firing of the announcement timer.
    Announce(Announce),
}

impl EventSet<AnnounceApp> for AnnounceEvents {
    fn handle(self, rt: &mut Runtime<AnnounceApp>) {
        match self {
            Self::Announce(event) => event.handle(rt),
        }
    }
}

///
/// A single firing of the announcement timer.
///
#[derive(Debug, Clone)]
pub struct Announce {
    task: PeriodicTask<Announcement>,
}

impl Event<AnnounceApp> for Announce {
    fn handle(self, rt: &mut Runtime<AnnounceApp>) {
        let now = rt.sim_time();
        let Announcement { name, number } = &self.task.payload;

        println!("+{} {} {}", now, name, number);
        tracing::info!(target: "announce", "{} {} at {}", name, number, now);

        rt.app.firings.push(now);
        self.task.rearm(rt);
    }
}

impl From<PeriodicTask<Announcement>> for AnnounceEvents {
    fn from(task: PeriodicTask<Announcement>) -> Self {
        Self::Announce(Announce { task })
    }
}

///
/// Runs the scenario until the given stop time and returns the final
/// application state.
///
#[must_use]
pub fn run(name: impl Into<String>, number: impl Into<String>, stop: SimTime) -> AnnounceApp {
    let rt = Builder::seeded(0)
        .quiet()
        .max_time(stop)
        .build(AnnounceApp::new(name, number));

    // The timer re-arms forever, so the run always ends at the time limit.
    let (app, ..) = rt.run().unwrap_premature_abort();
    app
}
