use rand::{distributions::Standard, prelude::SliceRandom};
use simnet::prelude::*;

/// The event set
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
enum MyEventSet {
    RegisterToRtWithTime(RegisterToRtWithTime),
    RepeatWithDelay(RepeatWithDelay),
    SpawnAtNow(SpawnAtNow),
}

impl EventSet<App> for MyEventSet {
    fn handle(self, rt: &mut Runtime<App>) {
        match self {
            Self::RegisterToRtWithTime(a) => a.handle(rt),
            Self::RepeatWithDelay(rwd) => rwd.handle(rt),
            Self::SpawnAtNow(s) => s.handle(rt),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
struct RegisterToRtWithTime {
    id: usize,
}

impl Event<App> for RegisterToRtWithTime {
    fn handle(self, rt: &mut Runtime<App>) {
        let now = rt.sim_time();
        rt.app
            .event_list
            .push((now, MyEventSet::RegisterToRtWithTime(self)));
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
struct RepeatWithDelay {
    delay: Duration,
    repeat: usize,
    repeat_limit: usize,
}

impl Event<App> for RepeatWithDelay {
    fn handle(mut self, rt: &mut Runtime<App>) {
        if self.repeat <= self.repeat_limit {
            let delay = self.delay;
            self.repeat += 1;
            rt.add_event_in(MyEventSet::RepeatWithDelay(self), delay);
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
struct SpawnAtNow {
    spawned_id: usize,
}

impl Event<App> for SpawnAtNow {
    fn handle(self, rt: &mut Runtime<App>) {
        let now = rt.sim_time();
        rt.add_event(
            MyEventSet::RegisterToRtWithTime(RegisterToRtWithTime {
                id: self.spawned_id,
            }),
            now,
        );
    }
}

/// The application
struct App {
    event_list: Vec<(SimTime, MyEventSet)>,
}

impl App {
    fn new() -> App {
        App {
            event_list: Vec::new(),
        }
    }
}

impl Application for App {
    type EventSet = MyEventSet;
}

#[test]
fn zero_event_runtime() {
    let rt = Builder::new().quiet().build(App::new());

    let res = rt.run();
    assert!(matches!(res, RuntimeResult::EmptySimulation { .. }));
}

#[test]
fn one_event_runtime() {
    let mut rt = Builder::new().quiet().build(App::new());
    rt.add_event(
        MyEventSet::RepeatWithDelay(RepeatWithDelay {
            delay: Duration::new(1, 0),
            repeat: 0,
            repeat_limit: 15,
        }),
        SimTime::ZERO,
    );

    // repeat i = i secs
    // limit (<=) is at 15s thus time limit 16s
    // this means 17 events

    let res = rt.run();
    match res {
        RuntimeResult::Finished {
            time, event_count, ..
        } => {
            assert_eq!(time, SimTime::from_duration(Duration::new(16, 0)));
            assert_eq!(event_count, 17);
        }
        _ => panic!("Runtime should have finished"),
    }
}

#[test]
fn ensure_event_order() {
    use rand::{rngs::StdRng, Rng, SeedableRng};

    let mut id = 0;
    let mut events = Vec::with_capacity(128);
    let mut time = SimTime::ZERO;

    let mut rng = StdRng::seed_from_u64(123);

    for _i in 0..128 {
        time += rng.sample::<f64, Standard>(Standard);
        id += 1;

        events.push((
            MyEventSet::RegisterToRtWithTime(RegisterToRtWithTime { id }),
            time,
        ));
    }

    events.shuffle(&mut rng);

    let mut rt = Builder::seeded(123).quiet().build(App::new());
    for (event, time) in events {
        rt.add_event(event, time);
    }

    match rt.run() {
        RuntimeResult::Finished {
            app,
            time: rt_fin_time,
            event_count,
        } => {
            assert_eq!(rt_fin_time, time);
            assert_eq!(event_count, 128);

            let mut last_id = 0;
            for (_, event) in app.event_list {
                match event {
                    MyEventSet::RegisterToRtWithTime(a) => {
                        assert_eq!(last_id + 1, a.id);
                        last_id += 1;
                    }
                    _ => panic!("Unexpected event"),
                }
            }
        }
        _ => panic!("Expected runtime to finish after finite non-replicating event set"),
    }
}

#[test]
fn ensure_event_order_same_time() {
    let one = SimTime::from_duration(Duration::new(1, 0));
    let two = SimTime::from_duration(Duration::new(2, 0));

    let times = [SimTime::ZERO, one, one, one, two];

    let mut rt = Builder::seeded(123).quiet().build(App::new());
    for (i, time) in times.iter().enumerate() {
        rt.add_event(
            MyEventSet::RegisterToRtWithTime(RegisterToRtWithTime { id: i + 1 }),
            *time,
        );
    }

    match rt.run() {
        RuntimeResult::Finished {
            app,
            time: rt_fin_time,
            event_count,
        } => {
            assert_eq!(rt_fin_time, two);
            assert_eq!(event_count, 5);

            // Equal-time events are handled in insertion order.
            let mut last_id = 0;
            for (_, event) in app.event_list {
                match event {
                    MyEventSet::RegisterToRtWithTime(a) => {
                        assert_eq!(last_id + 1, a.id);
                        last_id += 1;
                    }
                    _ => panic!("Unexpected event"),
                }
            }
        }
        _ => panic!("Expected runtime to finish after finite non-replicating event set"),
    }
}

#[test]
fn equal_time_spawn_keeps_insertion_order() {
    let one = SimTime::from_duration(Duration::new(1, 0));

    let mut rt = Builder::seeded(123).quiet().build(App::new());
    rt.add_event(MyEventSet::SpawnAtNow(SpawnAtNow { spawned_id: 99 }), one);
    rt.add_event(
        MyEventSet::RegisterToRtWithTime(RegisterToRtWithTime { id: 1 }),
        one,
    );

    let (app, ..) = rt.run().unwrap();

    // The marker inserted before the run precedes the marker spawned at the
    // same time from inside a handler.
    let ids: Vec<usize> = app
        .event_list
        .iter()
        .filter_map(|(_, event)| match event {
            MyEventSet::RegisterToRtWithTime(a) => Some(a.id),
            _ => None,
        })
        .collect();
    assert_eq!(ids, vec![1, 99]);
}

#[test]
fn time_limit_is_exclusive() {
    let mut rt = Builder::new()
        .quiet()
        .max_time(SimTime::from(3.0))
        .build(App::new());

    for (id, secs) in [(1, 0), (2, 1), (3, 2), (4, 3), (5, 4)] {
        rt.add_event(
            MyEventSet::RegisterToRtWithTime(RegisterToRtWithTime { id }),
            SimTime::from_duration(Duration::new(secs, 0)),
        );
    }

    // The events at 3s and 4s stay in the event set.
    match rt.run() {
        RuntimeResult::PrematureAbort {
            app,
            time,
            event_count,
            active_events,
        } => {
            assert_eq!(time, SimTime::from(2.0));
            assert_eq!(event_count, 3);
            assert_eq!(active_events, 2);
            assert_eq!(app.event_list.len(), 3);
        }
        _ => panic!("Expected the time limit to cut the run short"),
    }
}

#[test]
fn event_count_limit() {
    let mut rt = Builder::new().quiet().max_itr(10).build(App::new());
    rt.add_event(
        MyEventSet::RepeatWithDelay(RepeatWithDelay {
            delay: Duration::new(1, 0),
            repeat: 0,
            repeat_limit: usize::MAX,
        }),
        SimTime::ZERO,
    );

    match rt.run() {
        RuntimeResult::PrematureAbort {
            time, event_count, ..
        } => {
            assert_eq!(event_count, 10);
            assert_eq!(time, SimTime::from(9.0));
        }
        _ => panic!("Expected the event count limit to cut the run short"),
    }
}

#[test]
fn seeded_runs_share_random_sequences() {
    let mut a = Builder::seeded(42).quiet().build(App::new());
    let mut b = Builder::seeded(42).quiet().build(App::new());

    let lhs: Vec<u64> = (0..32).map(|_| a.random::<u64>()).collect();
    let rhs: Vec<u64> = (0..32).map(|_| b.random::<u64>()).collect();
    assert_eq!(lhs, rhs);
}
