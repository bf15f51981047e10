/// Something that calls back into the session once per second while a countdown runs.
///
/// `run` identifies the countdown the ticks belong to, ticks of an older run
/// are discarded by [`Timer::tick_for`].
pub trait TickSource {
    fn start(&mut self, run: u64);
    fn stop(&mut self);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerState {
    Idle,
    Running,
    Expired,
    Stopped,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    Ignored,
    Running(u32),
    Expired,
}

/// Single-shot countdown. There is no pause, starting again always begins from the full duration.
#[derive(Debug)]
pub struct Timer<S: TickSource> {
    source: S,
    state: TimerState,
    time_remaining: u32,
    run: u64,
}

impl<S: TickSource> Timer<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            state: TimerState::Idle,
            time_remaining: 0,
            run: 0,
        }
    }

    pub fn state(&self) -> TimerState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == TimerState::Running
    }

    pub fn time_remaining(&self) -> u32 {
        self.time_remaining
    }

    pub fn run(&self) -> u64 {
        self.run
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn start(&mut self, duration_seconds: u32) {
        self.source.stop();
        self.run += 1;
        self.time_remaining = duration_seconds;
        self.state = TimerState::Running;
        self.source.start(self.run);
        log::debug!(
            "Timer started. Run: '{}', Seconds: '{duration_seconds}'.",
            self.run
        );
    }

    /// Reports [`TickOutcome::Expired`] exactly once per run, every later tick is ignored.
    pub fn tick(&mut self) -> TickOutcome {
        if self.state != TimerState::Running {
            return TickOutcome::Ignored;
        }

        self.time_remaining = self.time_remaining.saturating_sub(1);
        if self.time_remaining == 0 {
            self.state = TimerState::Expired;
            self.source.stop();
            log::debug!("Timer expired. Run: '{}'.", self.run);
            TickOutcome::Expired
        } else {
            TickOutcome::Running(self.time_remaining)
        }
    }

    pub fn tick_for(&mut self, run: u64) -> TickOutcome {
        if run != self.run {
            log::debug!(
                "Discarding stale tick. TickRun: '{run}', CurrentRun: '{}'.",
                self.run
            );
            return TickOutcome::Ignored;
        }
        self.tick()
    }

    pub fn stop(&mut self) {
        if self.state == TimerState::Running {
            self.state = TimerState::Stopped;
            self.source.stop();
            log::debug!(
                "Timer stopped. Run: '{}', TimeRemaining: '{}'.",
                self.run,
                self.time_remaining
            );
        }
    }

    pub fn reset(&mut self) {
        self.stop();
        self.state = TimerState::Idle;
        self.time_remaining = 0;
    }
}

/// Tick source driven by hand, ticks are delivered by calling the session's `tick` directly.
#[derive(Debug, Default)]
pub struct ManualTickSource {
    pub starts: usize,
    pub stops: usize,
    active_run: Option<u64>,
}

impl ManualTickSource {
    pub fn active_run(&self) -> Option<u64> {
        self.active_run
    }
}

impl TickSource for ManualTickSource {
    fn start(&mut self, run: u64) {
        self.starts += 1;
        self.active_run = Some(run);
    }

    fn stop(&mut self) {
        if self.active_run.take().is_some() {
            self.stops += 1;
        }
    }
}
