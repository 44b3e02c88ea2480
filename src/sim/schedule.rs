//! Frame and timer scheduling seam
//!
//! The simulation never talks to the display directly. It asks a
//! [`Scheduler`] for the next frame and for one-shot timers, keeps the
//! returned handles, and cancels them explicitly when a run stops. The shell
//! reports each wakeup back with the handle it was issued under, so a wakeup
//! for a cancelled or replaced request can be recognised and dropped.

use serde::{Deserialize, Serialize};

/// Pending frame request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FrameHandle(pub u32);

/// Pending one-shot timer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimerHandle(pub u32);

/// Something the scheduler woke up for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Wakeup {
    Frame(FrameHandle),
    Timeout(TimerHandle),
}

/// Source of frame ticks and wall-clock timers
pub trait Scheduler {
    /// Ask for one callback at the next display refresh
    fn request_frame(&mut self) -> FrameHandle;
    /// Drop a frame request; cancelling a fired request is harmless
    fn cancel_frame(&mut self, handle: FrameHandle);
    /// Ask for one callback after `delay_ms` of wall-clock time
    fn set_timeout(&mut self, delay_ms: u32) -> TimerHandle;
    /// Drop a timer; clearing a fired timer is harmless
    fn clear_timeout(&mut self, handle: TimerHandle);
}

/// In-memory scheduler with a virtual clock
///
/// Frames fire only when the owner says so; timers fire as virtual time is
/// advanced. Used for tests and the headless runner.
#[derive(Debug, Default)]
pub struct ManualScheduler {
    now_ms: u64,
    next_handle: u32,
    frame: Option<FrameHandle>,
    timers: Vec<(TimerHandle, u64)>,
    cancelled_frames: u32,
    cleared_timers: u32,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    fn next_handle(&mut self) -> u32 {
        let handle = self.next_handle;
        self.next_handle += 1;
        handle
    }

    /// Virtual time in milliseconds
    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Outstanding frame request, if any
    pub fn pending_frame(&self) -> Option<FrameHandle> {
        self.frame
    }

    /// Take the outstanding frame request, as a display refresh would
    pub fn fire_frame(&mut self) -> Option<FrameHandle> {
        self.frame.take()
    }

    /// Number of timers still waiting
    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    /// How many frame requests were cancelled while still pending
    pub fn cancelled_frames(&self) -> u32 {
        self.cancelled_frames
    }

    /// How many timers were cleared while still pending
    pub fn cleared_timers(&self) -> u32 {
        self.cleared_timers
    }

    /// Move the clock forward, returning timers that came due in order
    pub fn advance(&mut self, ms: u64) -> Vec<TimerHandle> {
        self.now_ms += ms;
        let now = self.now_ms;

        let mut due: Vec<(TimerHandle, u64)> = Vec::new();
        self.timers.retain(|&(handle, deadline)| {
            if deadline <= now {
                due.push((handle, deadline));
                false
            } else {
                true
            }
        });
        due.sort_by_key(|&(handle, deadline)| (deadline, handle.0));
        due.into_iter().map(|(handle, _)| handle).collect()
    }
}

impl Scheduler for ManualScheduler {
    fn request_frame(&mut self) -> FrameHandle {
        let handle = FrameHandle(self.next_handle());
        self.frame = Some(handle);
        handle
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        if self.frame == Some(handle) {
            self.frame = None;
            self.cancelled_frames += 1;
        }
    }

    fn set_timeout(&mut self, delay_ms: u32) -> TimerHandle {
        let handle = TimerHandle(self.next_handle());
        self.timers.push((handle, self.now_ms + delay_ms as u64));
        handle
    }

    fn clear_timeout(&mut self, handle: TimerHandle) {
        let before = self.timers.len();
        self.timers.retain(|&(h, _)| h != handle);
        if self.timers.len() != before {
            self.cleared_timers += 1;
        }
    }
}
