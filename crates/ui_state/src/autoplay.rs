//! Timer-driven carousel.
//!
//! A [`CarouselDriver`] owns one carousel and at most one autoplay task. The
//! task lives exactly as long as the driver (or until paused) and is aborted
//! on drop, so an unmounted component can never be advanced by a stale timer.

use std::{
    sync::{Arc, Mutex, MutexGuard, PoisonError},
    time::Duration,
};

use tokio::{
    runtime::Handle,
    task::JoinHandle,
    time::{interval_at, Instant, MissedTickBehavior},
};
use tracing::{debug, warn};

use crate::{
    carousel::{CarouselError, CarouselState},
    gesture::{SwipeOutcome, SwipeTracker},
};

pub const DEFAULT_AUTOPLAY_INTERVAL: Duration = Duration::from_millis(2500);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverPhase {
    Running,
    Paused,
}

struct AutoplayTask {
    handle: JoinHandle<()>,
}

impl AutoplayTask {
    fn spawn(state: Arc<Mutex<CarouselState>>, period: Duration) -> Option<Self> {
        let runtime = match Handle::try_current() {
            Ok(runtime) => runtime,
            Err(err) => {
                warn!(error = %err, "no async runtime; carousel autoplay disabled");
                return None;
            }
        };

        let start = Instant::now() + period;
        let handle = runtime.spawn(async move {
            let mut ticker = interval_at(start, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                let mut guard = state.lock().unwrap_or_else(PoisonError::into_inner);
                if guard.tick() {
                    debug!(index = guard.current_index(), "carousel autoplay tick");
                }
            }
        });
        Some(Self { handle })
    }
}

impl Drop for AutoplayTask {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

pub struct CarouselDriver {
    state: Arc<Mutex<CarouselState>>,
    interval: Duration,
    swipe: SwipeTracker,
    task: Option<AutoplayTask>,
}

impl CarouselDriver {
    /// Mounts a carousel over `len` items and starts autoplay when there is
    /// anything to rotate. Must be called inside a tokio runtime for the timer
    /// to run; outside one the carousel is still fully navigable by hand.
    pub fn mount(len: usize, interval: Duration) -> Self {
        let interval = if interval.is_zero() {
            DEFAULT_AUTOPLAY_INTERVAL
        } else {
            interval
        };
        let mut driver = Self {
            state: Arc::new(Mutex::new(CarouselState::new(len))),
            interval,
            swipe: SwipeTracker::new(),
            task: None,
        };
        driver.start_timer();
        driver
    }

    pub fn unmount(mut self) {
        self.stop_timer();
    }

    fn lock(&self) -> MutexGuard<'_, CarouselState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn start_timer(&mut self) {
        self.stop_timer();
        let runnable = {
            let state = self.lock();
            !state.is_empty() && !state.is_paused()
        };
        if runnable {
            self.task = AutoplayTask::spawn(Arc::clone(&self.state), self.interval);
        }
    }

    fn stop_timer(&mut self) {
        self.task = None;
    }

    fn restart_if_running(&mut self) {
        if self.task.is_some() {
            self.start_timer();
        }
    }

    pub fn pause(&mut self) {
        self.lock().pause();
        self.stop_timer();
    }

    /// Resuming always starts a fresh interval.
    pub fn resume(&mut self) {
        self.lock().resume();
        self.start_timer();
    }

    pub fn pointer_enter(&mut self) {
        self.pause();
    }

    pub fn pointer_leave(&mut self) {
        self.resume();
    }

    pub fn touch_start(&mut self, x: f32) {
        self.pause();
        self.swipe.begin(x);
    }

    pub fn touch_move(&mut self, x: f32) {
        self.swipe.moved(x);
    }

    pub fn touch_end(&mut self) -> SwipeOutcome {
        let outcome = self.swipe.finish();
        outcome.apply(&mut self.lock());
        self.resume();
        outcome
    }

    pub fn next(&mut self) {
        self.lock().advance();
        self.restart_if_running();
    }

    pub fn prev(&mut self) {
        self.lock().retreat();
        self.restart_if_running();
    }

    pub fn jump_to(&mut self, index: usize) -> Result<(), CarouselError> {
        self.lock().jump_to(index)?;
        self.restart_if_running();
        Ok(())
    }

    pub fn phase(&self) -> DriverPhase {
        if self.lock().is_paused() {
            DriverPhase::Paused
        } else {
            DriverPhase::Running
        }
    }

    pub fn has_timer(&self) -> bool {
        self.task.is_some()
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn snapshot(&self) -> CarouselState {
        self.lock().clone()
    }

    pub fn current_index(&self) -> usize {
        self.lock().current_index()
    }
}
