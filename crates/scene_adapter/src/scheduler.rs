//! Host scheduling primitives
//!
//! The diffing engine asks the host for idle-time and delayed callbacks. The
//! adapter forwards these requests to a [`HostScheduler`] unchanged.

use std::time::Duration;

/// Callback run when the host is idle
pub type IdleCallback = Box<dyn FnOnce(IdleDeadline)>;

/// Callback run after a delay
pub type TimeoutCallback = Box<dyn FnOnce()>;

/// Identifies a pending callback for cancellation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CallbackHandle(u64);

/// Time budget handed to an idle callback
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdleDeadline {
    remaining: Duration,
    did_timeout: bool,
}

impl IdleDeadline {
    /// Create a deadline with `remaining` time left in the idle period
    pub fn new(remaining: Duration, did_timeout: bool) -> Self {
        Self { remaining, did_timeout }
    }

    /// Time left in the idle period
    pub fn time_remaining(&self) -> Duration {
        self.remaining
    }

    /// Whether the callback runs because its timeout elapsed
    pub fn did_timeout(&self) -> bool {
        self.did_timeout
    }
}

/// Idle and delayed callback registration offered by the host
pub trait HostScheduler {
    /// Run `callback` during the next idle period
    ///
    /// With a `timeout`, the callback runs once that much time has passed even
    /// if the host never goes idle.
    fn request_idle_callback(
        &mut self,
        callback: IdleCallback,
        timeout: Option<Duration>,
    ) -> CallbackHandle;

    /// Drop a pending idle callback
    fn cancel_idle_callback(&mut self, handle: CallbackHandle);

    /// Run `callback` after `delay`
    fn set_timeout(&mut self, callback: TimeoutCallback, delay: Duration) -> CallbackHandle;

    /// Drop a pending delayed callback
    fn clear_timeout(&mut self, handle: CallbackHandle);
}

struct PendingIdle {
    handle: CallbackHandle,
    deadline: Option<Duration>,
    callback: IdleCallback,
}

struct PendingTimer {
    handle: CallbackHandle,
    due: Duration,
    callback: TimeoutCallback,
}

/// Scheduler driven explicitly by its owner
///
/// Nothing runs until the owner calls [`run_idle`](Self::run_idle) or
/// [`advance`](Self::advance), typically once per frame.
#[derive(Default)]
pub struct ManualScheduler {
    now: Duration,
    next_handle: u64,
    idle: Vec<PendingIdle>,
    timers: Vec<PendingTimer>,
}

impl ManualScheduler {
    /// Create an empty scheduler at time zero
    pub fn new() -> Self {
        Self::default()
    }

    /// Time elapsed through [`advance`](Self::advance)
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Number of callbacks waiting to run
    pub fn pending(&self) -> usize {
        self.idle.len() + self.timers.len()
    }

    /// Run every pending idle callback with `budget` as its deadline
    ///
    /// Returns the number of callbacks run.
    pub fn run_idle(&mut self, budget: Duration) -> usize {
        let pending = std::mem::take(&mut self.idle);
        let count = pending.len();
        for idle in pending {
            log::trace!("running idle callback {:?}", idle.handle);
            (idle.callback)(IdleDeadline::new(budget, false));
        }
        count
    }

    /// Move time forward and run everything that became due
    ///
    /// Timers run in due order, followed by idle callbacks whose timeout
    /// elapsed. Returns the number of callbacks run.
    pub fn advance(&mut self, by: Duration) -> usize {
        self.now += by;
        let now = self.now;

        let (mut due, waiting): (Vec<_>, Vec<_>) = std::mem::take(&mut self.timers)
            .into_iter()
            .partition(|timer| timer.due <= now);
        self.timers = waiting;
        due.sort_by_key(|timer| (timer.due, timer.handle));

        let (expired, idle): (Vec<_>, Vec<_>) = std::mem::take(&mut self.idle)
            .into_iter()
            .partition(|idle| idle.deadline.is_some_and(|deadline| deadline <= now));
        self.idle = idle;

        let count = due.len() + expired.len();
        for timer in due {
            log::trace!("running timer {:?}", timer.handle);
            (timer.callback)();
        }
        for idle in expired {
            log::trace!("idle callback {:?} timed out", idle.handle);
            (idle.callback)(IdleDeadline::new(Duration::ZERO, true));
        }
        count
    }

    fn allocate(&mut self) -> CallbackHandle {
        self.next_handle += 1;
        CallbackHandle(self.next_handle)
    }
}

impl HostScheduler for ManualScheduler {
    fn request_idle_callback(
        &mut self,
        callback: IdleCallback,
        timeout: Option<Duration>,
    ) -> CallbackHandle {
        let handle = self.allocate();
        self.idle.push(PendingIdle {
            handle,
            deadline: timeout.map(|timeout| self.now + timeout),
            callback,
        });
        handle
    }

    fn cancel_idle_callback(&mut self, handle: CallbackHandle) {
        self.idle.retain(|idle| idle.handle != handle);
    }

    fn set_timeout(&mut self, callback: TimeoutCallback, delay: Duration) -> CallbackHandle {
        let handle = self.allocate();
        self.timers.push(PendingTimer {
            handle,
            due: self.now + delay,
            callback,
        });
        handle
    }

    fn clear_timeout(&mut self, handle: CallbackHandle) {
        self.timers.retain(|timer| timer.handle != handle);
    }
}
