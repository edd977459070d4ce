use std::sync::mpsc::{self, Receiver, RecvError, RecvTimeoutError};
use std::time::{Duration, Instant};

use crossterm::event::{self, Event as CtEvent, KeyEvent};

/// UI refresh cadence while a session is running
pub const TICK_RATE: Duration = Duration::from_millis(100);

/// Unified event type consumed by the app loop
#[derive(Clone, Debug)]
pub enum AppEvent {
    Key(KeyEvent),
    Resize,
    Tick,
    /// The event source hung up; nothing more will arrive
    Closed,
}

/// Source of terminal events (keyboard, resize, etc.)
pub trait EventSource: Send + 'static {
    /// Block for up to `timeout` waiting for an event.
    fn recv_timeout(&self, timeout: Duration) -> Result<AppEvent, RecvTimeoutError>;

    /// Block until an event arrives.
    fn recv(&self) -> Result<AppEvent, RecvError>;
}

/// Production event source using crossterm
pub struct CrosstermEventSource {
    rx: Receiver<AppEvent>,
}

impl CrosstermEventSource {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();

        std::thread::spawn(move || loop {
            let forwarded = match event::read() {
                Ok(CtEvent::Key(key)) => tx.send(AppEvent::Key(key)),
                Ok(CtEvent::Resize(_, _)) => tx.send(AppEvent::Resize),
                Ok(_) => Ok(()),
                Err(err) => {
                    tracing::error!(%err, "terminal event read failed");
                    break;
                }
            };
            if forwarded.is_err() {
                break;
            }
        });

        Self { rx }
    }
}

impl Default for CrosstermEventSource {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSource for CrosstermEventSource {
    fn recv_timeout(&self, timeout: Duration) -> Result<AppEvent, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }

    fn recv(&self) -> Result<AppEvent, RecvError> {
        self.rx.recv()
    }
}

/// Event source fed by a channel, for tests
pub struct TestEventSource {
    rx: Receiver<AppEvent>,
}

impl TestEventSource {
    pub fn new(rx: Receiver<AppEvent>) -> Self {
        Self { rx }
    }
}

impl EventSource for TestEventSource {
    fn recv_timeout(&self, timeout: Duration) -> Result<AppEvent, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }

    fn recv(&self) -> Result<AppEvent, RecvError> {
        self.rx.recv()
    }
}

/// Cancellable repeating deadline.
///
/// A stopped timer has no deadline and never fires, so nothing keeps
/// ticking between sessions.
#[derive(Clone, Copy, Debug)]
pub struct RepeatingTimer {
    interval: Duration,
    next_due: Option<Instant>,
}

impl RepeatingTimer {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            next_due: None,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Start ticking. Starting a running timer keeps its schedule.
    pub fn start(&mut self, now: Instant) {
        if self.next_due.is_none() {
            self.next_due = Some(now + self.interval);
        }
    }

    pub fn stop(&mut self) {
        self.next_due = None;
    }

    pub fn is_running(&self) -> bool {
        self.next_due.is_some()
    }

    pub fn time_until_due(&self, now: Instant) -> Option<Duration> {
        self.next_due
            .map(|due| due.saturating_duration_since(now))
    }

    /// Returns true and schedules the next deadline if the timer is due
    pub fn fire(&mut self, now: Instant) -> bool {
        match self.next_due {
            Some(due) if now >= due => {
                self.next_due = Some(now + self.interval);
                true
            }
            _ => false,
        }
    }
}

/// Runner that yields the application's next event, one at a time
pub struct Runner<E: EventSource> {
    event_source: E,
    timer: RepeatingTimer,
}

impl<E: EventSource> Runner<E> {
    pub fn new(event_source: E, interval: Duration) -> Self {
        Self {
            event_source,
            timer: RepeatingTimer::new(interval),
        }
    }

    pub fn timer(&self) -> &RepeatingTimer {
        &self.timer
    }

    /// Start or stop ticking to match `should_tick`
    pub fn sync_ticker(&mut self, should_tick: bool, now: Instant) {
        match (should_tick, self.timer.is_running()) {
            (true, false) => {
                tracing::trace!("tick timer started");
                self.timer.start(now);
            }
            (false, true) => {
                tracing::trace!("tick timer stopped");
                self.timer.stop();
            }
            _ => {}
        }
    }

    pub fn stop_ticking(&mut self) {
        self.timer.stop();
    }

    /// Blocks until the next event. Yields Tick when a running timer comes due.
    pub fn step(&mut self) -> AppEvent {
        let now = Instant::now();
        match self.timer.time_until_due(now) {
            Some(timeout) => match self.event_source.recv_timeout(timeout) {
                Ok(ev) => ev,
                Err(RecvTimeoutError::Timeout) => {
                    self.timer.fire(Instant::now());
                    AppEvent::Tick
                }
                Err(RecvTimeoutError::Disconnected) => AppEvent::Closed,
            },
            None => self.event_source.recv().unwrap_or(AppEvent::Closed),
        }
    }
}
