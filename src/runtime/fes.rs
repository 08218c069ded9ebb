use crate::{
    runtime::{Application, EventId, EventNode},
    time::SimTime,
};
use std::collections::{BinaryHeap, VecDeque};
use std::marker::PhantomData;

///
/// The set of all events that are scheduled but not yet handled.
///
/// Events scheduled for the current simulation time bypass the heap through
/// a fifo queue. Fetching compares the queue front against the heap top, so
/// equal-time events fire in insertion order (monotone event ids) even when
/// some of them were scheduled ahead of time.
///
pub(crate) struct FutureEventSet<A>
where
    A: Application,
{
    heap: BinaryHeap<EventNode<A>>,
    zero_queue: VecDeque<EventNode<A>>,

    last_event_simtime: SimTime,
}

impl<A> FutureEventSet<A>
where
    A: Application,
{
    pub(crate) fn new(start_time: SimTime) -> Self {
        Self {
            heap: BinaryHeap::with_capacity(64),
            zero_queue: VecDeque::with_capacity(32),

            last_event_simtime: start_time,
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.heap.len() + self.zero_queue.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.heap.is_empty() && self.zero_queue.is_empty()
    }

    pub(crate) fn fetch_next(&mut self) -> EventNode<A> {
        // The zero-time queue holds events at the current sim time, but the
        // heap may still carry earlier-inserted events at that same time.
        // The smaller id wins, preserving insertion order.
        let from_heap = match (self.zero_queue.front(), self.heap.peek()) {
            (Some(zero), Some(top)) => top.time == zero.time && top.id < zero.id,
            (Some(_), None) => false,
            (None, _) => true,
        };

        let event = if from_heap {
            self.heap.pop().expect("fetch_next on an empty event set")
        } else {
            self.zero_queue
                .pop_front()
                .expect("fetch_next on an empty event set")
        };

        self.last_event_simtime = event.time;
        event
    }

    /// Puts a fetched but unhandled node back, preserving its identity.
    pub(crate) fn requeue(&mut self, node: EventNode<A>) {
        if node.time == self.last_event_simtime {
            self.zero_queue.push_front(node);
        } else {
            self.heap.push(node);
        }
    }

    pub(crate) fn add(&mut self, time: SimTime, id: EventId, event: A::EventSet) {
        assert!(
            time >= self.last_event_simtime,
            "Sorry, we cannot timetravel yet"
        );

        let node = EventNode {
            time,
            id,
            event,
            _phantom: PhantomData,
        };

        if self.last_event_simtime == time {
            self.zero_queue.push_back(node);
        } else {
            self.heap.push(node);
        }
    }
}
