//! Frame scheduling and the double-frame reveal.
//!
//! Revealing an area in the same frame that detected the intersection would make that frame pay
//! for rendering the contents. Instead the reveal is pushed two frames out: the first scheduled
//! task only schedules the second one, so the reveal runs no earlier than the start of the second
//! paint cycle after the intersection.

use std::cell::Cell;
use std::rc::Rc;

/// Queues work on a later paint cycle, like `requestAnimationFrame`.
pub trait FrameScheduler {
    fn schedule_work(&self, work: Box<dyn FnOnce()>);
}

impl<S: FrameScheduler + ?Sized> FrameScheduler for Rc<S> {
    fn schedule_work(&self, work: Box<dyn FnOnce()>) {
        (**self).schedule_work(work)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RevealState {
    Pending,
    Done,
    Cancelled,
}

/// A handle to a reveal queued with [`defer_reveal`].
///
/// Clones share the same state.
#[derive(Debug, Clone)]
pub struct RevealHandle {
    state: Rc<Cell<RevealState>>,
}

impl RevealHandle {
    fn new() -> Self {
        Self {
            state: Rc::new(Cell::new(RevealState::Pending)),
        }
    }

    /// Stop the reveal from running. Has no effect once it ran.
    pub fn cancel(&self) {
        if self.state.get() == RevealState::Pending {
            self.state.set(RevealState::Cancelled);
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.state.get() == RevealState::Cancelled
    }

    /// Whether the reveal ran.
    pub fn is_done(&self) -> bool {
        self.state.get() == RevealState::Done
    }

    pub fn is_pending(&self) -> bool {
        self.state.get() == RevealState::Pending
    }

    fn finish(&self) {
        self.state.set(RevealState::Done);
    }
}

/// Run `reveal` two scheduler ticks from now.
///
/// The second task is scheduled from inside the first rather than next to it. Both tasks run once
/// they are queued; a cancelled handle only turns them into no-ops.
pub fn defer_reveal<S>(scheduler: Rc<S>, reveal: impl FnOnce() + 'static) -> RevealHandle
where
    S: FrameScheduler + ?Sized + 'static,
{
    let handle = RevealHandle::new();
    let state = handle.clone();
    let nested = scheduler.clone();

    scheduler.schedule_work(Box::new(move || {
        if state.is_cancelled() {
            return;
        }

        nested.schedule_work(Box::new(move || {
            if state.is_cancelled() {
                return;
            }

            state.finish();
            reveal();
        }));
    }));

    handle
}
