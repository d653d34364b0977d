//! Consumer state machines
//!
//! The Entry, Exit and Reset tasks share one shape: wait for their signal,
//! take exclusive access to the occupancy, apply a bounded transition, queue
//! the matching view, release, then dwell. [`Consumer`] captures that shape as
//! a two state machine so the firmware task is just a loop around it and the
//! transitions can be driven without a live scheduler:
//!
//! - [`Consumer::begin`] consumes one signal and enters [`Phase::Processing`]
//! - [`Consumer::finish`] applies the transition under the lock and returns to
//!   [`Phase::Idle`]
//!
//! Views are queued while the lock is held, so the display renders every view
//! in the same order the count changed. The reset banner in particular is
//! queued atomically with the reset itself and cannot be overtaken by an
//! entry or exit waiting on the lock. The panel transfer happens in the
//! display task.

use defmt::Format;
use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_time::Duration;

use crate::config::{ENTRY_DWELL, EXIT_DWELL, RESET_HOLD};
use crate::occupancy::{Admission, Departure, SharedOccupancy};
use crate::signal::{EventSignals, Input};
use crate::view::{View, ViewQueue};

/// Which consumer this is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Format)]
pub enum Role {
    Entry,
    Exit,
    /// Operator override
    Reset,
}

impl Role {
    /// Signal this role consumes
    pub const fn input(self) -> Input {
        match self {
            Role::Entry => Input::Entry,
            Role::Exit => Input::Exit,
            Role::Reset => Input::Reset,
        }
    }

    /// How long the queued view stays up before the next cycle
    pub const fn dwell(self) -> Duration {
        match self {
            Role::Entry => ENTRY_DWELL,
            Role::Exit => EXIT_DWELL,
            Role::Reset => RESET_HOLD,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Format)]
pub enum Phase {
    /// Waiting for a signal, holds nothing
    Idle,
    /// A signal was consumed and its transition has not been applied yet
    Processing,
}

/// What one processed event did to the occupancy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Format)]
pub enum Outcome {
    Entered(Admission),
    Exited(Departure),
    Reset { previous: u8 },
}

pub struct Consumer<'a, M: RawMutex> {
    role: Role,
    state: &'a SharedOccupancy<M>,
    views: &'a ViewQueue<M>,
    phase: Phase,
}

impl<'a, M: RawMutex> Consumer<'a, M> {
    pub fn new(role: Role, state: &'a SharedOccupancy<M>, views: &'a ViewQueue<M>) -> Self {
        Self {
            role,
            state,
            views,
            phase: Phase::Idle,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Idle to Processing: blocks on the role's signal without timeout and
    /// consumes exactly one event. A consumer already processing keeps its
    /// event and consumes nothing.
    pub async fn begin<S: RawMutex, const DEPTH: usize>(
        &mut self,
        signals: &EventSignals<S, DEPTH>,
    ) {
        if self.phase == Phase::Processing {
            return;
        }
        signals.wait(self.role.input()).await;
        self.phase = Phase::Processing;
    }

    /// Processing to Idle: applies the transition for the consumed event.
    /// Returns `None` and touches nothing when no event has been consumed.
    pub async fn finish(&mut self) -> Option<Outcome> {
        if self.phase != Phase::Processing {
            return None;
        }
        Some(self.apply().await)
    }

    /// One full cycle: [`begin`](Self::begin) then [`finish`](Self::finish)
    pub async fn next<S: RawMutex, const DEPTH: usize>(
        &mut self,
        signals: &EventSignals<S, DEPTH>,
    ) -> Outcome {
        self.begin(signals).await;
        self.apply().await
    }

    /// Handles one event consumed elsewhere
    pub async fn process(&mut self) -> Outcome {
        self.phase = Phase::Processing;
        self.apply().await
    }

    async fn apply(&mut self) -> Outcome {
        let mut state = self.state.lock().await;
        let (outcome, view) = match self.role {
            Role::Entry => {
                let admission = state.admit();
                let view = match admission {
                    Admission::Admitted { count, vacancies } => View::Admitted { count, vacancies },
                    Admission::Full { count } => View::Full {
                        count,
                        vacancies: state.vacancies(),
                    },
                };
                (Outcome::Entered(admission), view)
            }
            Role::Exit => {
                let departure = state.release();
                let view = match departure {
                    Departure::Removed { count, vacancies } => View::Removed { count, vacancies },
                    Departure::NothingToRemove => View::NothingToRemove {
                        count: state.count(),
                        vacancies: state.vacancies(),
                    },
                };
                (Outcome::Exited(departure), view)
            }
            Role::Reset => {
                let previous = state.reset();
                (Outcome::Reset { previous }, View::Reset)
            }
        };
        self.views.send(view).await;
        drop(state);

        self.phase = Phase::Idle;
        outcome
    }

    /// Post-dwell step. Reset re-acquires access to replace its banner with
    /// the idle view; the other roles have nothing to do.
    pub async fn settle(&mut self) {
        if self.role != Role::Reset {
            return;
        }
        let _state = self.state.lock().await;
        self.views.send(View::AwaitingUsers).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::occupancy::Occupancy;
    use embassy_futures::{block_on, poll_once};
    use embassy_sync::blocking_mutex::raw::NoopRawMutex;
    use embassy_sync::channel::Channel;
    use embassy_sync::mutex::Mutex;
    use pretty_assertions::assert_eq;

    fn room(capacity: u8, count: u8) -> SharedOccupancy<NoopRawMutex> {
        let mut state = Occupancy::new(capacity);
        for _ in 0..count {
            state.admit();
        }
        Mutex::new(state)
    }

    fn drain(views: &ViewQueue<NoopRawMutex>) -> Vec<View> {
        core::iter::from_fn(|| views.try_receive().ok()).collect()
    }

    #[test]
    fn entry_queues_admitted_view() {
        let state = room(10, 2);
        let views = Channel::new();
        let mut entry = Consumer::new(Role::Entry, &state, &views);

        let outcome = block_on(entry.process());
        assert_eq!(
            outcome,
            Outcome::Entered(Admission::Admitted {
                count: 3,
                vacancies: 7
            })
        );
        assert_eq!(
            drain(&views),
            vec![View::Admitted {
                count: 3,
                vacancies: 7
            }]
        );
        assert_eq!(entry.phase(), Phase::Idle);
    }

    #[test]
    fn entry_at_capacity_queues_full_and_sets_flag() {
        let state = room(2, 2);
        let views = Channel::new();
        let mut entry = Consumer::new(Role::Entry, &state, &views);

        block_on(entry.process());
        assert_eq!(
            drain(&views),
            vec![View::Full {
                count: 2,
                vacancies: 0
            }]
        );
        let state = state.try_lock().unwrap();
        assert_eq!(state.count(), 2);
        assert!(state.capacity_reached());
    }

    #[test]
    fn exit_at_zero_queues_nothing_to_remove_without_flags() {
        let state = room(10, 0);
        let views = Channel::new();
        let mut exit = Consumer::new(Role::Exit, &state, &views);

        assert_eq!(
            block_on(exit.process()),
            Outcome::Exited(Departure::NothingToRemove)
        );
        assert_eq!(
            drain(&views),
            vec![View::NothingToRemove {
                count: 0,
                vacancies: 10
            }]
        );
        assert_eq!(state.try_lock().unwrap().pending_alert(), None);
    }

    #[test]
    fn reset_banner_then_idle_view() {
        let state = room(10, 3);
        let views = Channel::new();
        let mut reset = Consumer::new(Role::Reset, &state, &views);

        assert_eq!(block_on(reset.process()), Outcome::Reset { previous: 3 });
        assert_eq!(Role::Reset.dwell(), Duration::from_millis(1500));

        block_on(reset.settle());
        assert_eq!(drain(&views), vec![View::Reset, View::AwaitingUsers]);
    }

    #[test]
    fn entry_right_after_reset_does_not_hide_the_banner() {
        let state = room(10, 3);
        let views = Channel::new();
        let mut reset = Consumer::new(Role::Reset, &state, &views);
        let mut entry = Consumer::new(Role::Entry, &state, &views);

        block_on(reset.process());
        block_on(entry.process());
        assert_eq!(
            drain(&views),
            vec![
                View::Reset,
                View::Admitted {
                    count: 1,
                    vacancies: 9
                }
            ]
        );
    }

    #[test]
    fn settle_is_a_no_op_for_entry_and_exit() {
        let state = room(10, 1);
        let views = Channel::new();
        for role in [Role::Entry, Role::Exit] {
            let mut consumer = Consumer::new(role, &state, &views);
            block_on(consumer.settle());
            assert!(views.is_empty());
        }
    }

    #[test]
    fn begin_enters_processing_and_finish_returns_to_idle() {
        let state = room(10, 0);
        let views = Channel::new();
        let signals = EventSignals::<NoopRawMutex, 4>::new();
        signals.post(Input::Entry).unwrap();

        let mut entry = Consumer::new(Role::Entry, &state, &views);
        assert_eq!(entry.phase(), Phase::Idle);

        block_on(entry.begin(&signals));
        assert_eq!(entry.phase(), Phase::Processing);
        assert_eq!(signals.pending(Input::Entry), 0);
        // consumed but not yet applied
        assert_eq!(state.try_lock().unwrap().count(), 0);
        assert!(views.is_empty());

        assert_eq!(
            block_on(entry.finish()),
            Some(Outcome::Entered(Admission::Admitted {
                count: 1,
                vacancies: 9
            }))
        );
        assert_eq!(entry.phase(), Phase::Idle);
        assert_eq!(state.try_lock().unwrap().count(), 1);
    }

    #[test]
    fn finish_without_a_consumed_event_does_nothing() {
        let state = room(10, 4);
        let views = Channel::new();
        let mut exit = Consumer::new(Role::Exit, &state, &views);

        assert_eq!(block_on(exit.finish()), None);
        assert_eq!(exit.phase(), Phase::Idle);
        assert_eq!(state.try_lock().unwrap().count(), 4);
        assert!(views.is_empty());
    }

    #[test]
    fn begin_while_processing_keeps_the_pending_events() {
        let state = room(10, 0);
        let views = Channel::new();
        let signals = EventSignals::<NoopRawMutex, 4>::new();
        signals.post(Input::Exit).unwrap();
        signals.post(Input::Exit).unwrap();

        let mut exit = Consumer::new(Role::Exit, &state, &views);
        block_on(exit.begin(&signals));
        block_on(exit.begin(&signals));
        assert_eq!(exit.phase(), Phase::Processing);
        assert_eq!(signals.pending(Input::Exit), 1);
    }

    #[test]
    fn finish_waits_for_the_lock_in_processing() {
        let state = room(10, 2);
        let views = Channel::new();
        let signals = EventSignals::<NoopRawMutex, 4>::new();
        signals.post(Input::Exit).unwrap();

        let mut exit = Consumer::new(Role::Exit, &state, &views);
        block_on(exit.begin(&signals));

        let held = state.try_lock().unwrap();
        assert!(poll_once(exit.finish()).is_pending());
        drop(held);
        assert_eq!(exit.phase(), Phase::Processing);

        assert_eq!(
            block_on(exit.finish()),
            Some(Outcome::Exited(Departure::Removed {
                count: 1,
                vacancies: 9
            }))
        );
        assert_eq!(exit.phase(), Phase::Idle);
    }

    #[test]
    fn next_consumes_exactly_one_signal() {
        let state = room(10, 0);
        let views = Channel::new();
        let signals = EventSignals::<NoopRawMutex, 4>::new();
        signals.post(Input::Entry).unwrap();
        signals.post(Input::Entry).unwrap();

        let mut entry = Consumer::new(Role::Entry, &state, &views);
        block_on(entry.next(&signals));
        assert_eq!(signals.pending(Input::Entry), 1);
        assert_eq!(state.try_lock().unwrap().count(), 1);
        assert_eq!(entry.phase(), Phase::Idle);
    }
}
