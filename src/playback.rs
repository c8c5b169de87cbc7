//! Cursor over a step sequence with a cancellable auto-advance.
//!
//! The controller never reads the clock itself: callers pass `now`, and the
//! UI polls [`Playback::tick`] once per frame.

#[cfg(not(target_arch = "wasm32"))]
pub use std::time::{Duration, Instant};
#[cfg(target_arch = "wasm32")]
pub use web_time::{Duration, Instant};

use log::debug;

use crate::step::Step;

pub const MIN_DELAY_MS: u64 = 50;
pub const MAX_DELAY_MS: u64 = 1200;
pub const DEFAULT_DELAY_MS: u64 = 150;

/// A pending advance. Dropping it is the cancellation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Timer {
    due: Instant,
}

#[derive(Debug, Clone)]
pub struct Playback {
    steps: Vec<Step>,
    cursor: usize,
    delay: Duration,
    timer: Option<Timer>,
}

impl Default for Playback {
    fn default() -> Self {
        Self::new(Duration::from_millis(DEFAULT_DELAY_MS))
    }
}

impl Playback {
    pub fn new(delay: Duration) -> Self {
        Self {
            steps: Vec::new(),
            cursor: 0,
            delay,
            timer: None,
        }
    }

    /// Replace the sequence, rewind, and stop.
    pub fn load(&mut self, steps: Vec<Step>) {
        self.stop();
        debug!("playback: loaded {} steps", steps.len());
        self.steps = steps;
        self.cursor = 0;
    }

    /// Drop the sequence entirely (back to editing).
    pub fn reset(&mut self) {
        self.stop();
        self.steps.clear();
        self.cursor = 0;
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn current(&self) -> Option<&Step> {
        self.steps.get(self.cursor)
    }

    /// Zero-based cursor.
    pub fn position(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn at_start(&self) -> bool {
        self.cursor == 0
    }

    pub fn at_end(&self) -> bool {
        self.cursor + 1 >= self.steps.len()
    }

    pub fn is_playing(&self) -> bool {
        self.timer.is_some()
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn set_delay(&mut self, delay: Duration) {
        self.delay = delay.clamp(
            Duration::from_millis(MIN_DELAY_MS),
            Duration::from_millis(MAX_DELAY_MS),
        );
    }

    /// Cancel any pending advance.
    pub fn stop(&mut self) {
        if self.timer.take().is_some() {
            debug!("playback: stopped at {}", self.cursor);
        }
    }

    pub fn pause(&mut self) {
        self.stop();
    }

    /// Manual step forward. Cancels auto-play.
    pub fn next(&mut self) -> bool {
        self.stop();
        self.advance()
    }

    /// Manual step back. Cancels auto-play.
    pub fn back(&mut self) -> bool {
        self.stop();
        if self.cursor == 0 {
            return false;
        }
        self.cursor -= 1;
        true
    }

    /// Start auto-play: advance one step now, then one per `delay`.
    /// Does nothing at the last step.
    pub fn play(&mut self, now: Instant) {
        if self.at_end() {
            self.stop();
            return;
        }
        self.advance();
        self.rearm(now);
    }

    pub fn toggle(&mut self, now: Instant) {
        if self.is_playing() {
            self.pause();
        } else {
            self.play(now);
        }
    }

    /// Fire the pending advance if it is due. Returns whether the cursor moved.
    pub fn tick(&mut self, now: Instant) -> bool {
        match self.timer {
            Some(timer) if now >= timer.due => {
                let moved = self.advance();
                self.rearm(now);
                moved
            }
            _ => false,
        }
    }

    /// Time until the pending advance, for scheduling a repaint.
    pub fn until_due(&self, now: Instant) -> Option<Duration> {
        self.timer
            .map(|timer| timer.due.saturating_duration_since(now))
    }

    fn advance(&mut self) -> bool {
        if self.at_end() {
            return false;
        }
        self.cursor += 1;
        true
    }

    fn rearm(&mut self, now: Instant) {
        self.timer = if self.at_end() {
            None
        } else {
            Some(Timer {
                due: now + self.delay,
            })
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Board;
    use crate::step::StepKind;

    fn steps(n: usize) -> Vec<Step> {
        (0..n)
            .map(|_| Step::new(StepKind::Try, Board::empty(), 0))
            .collect()
    }

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn manual_navigation_is_bounded() {
        let mut p = Playback::default();
        p.load(steps(3));
        assert!(!p.back());
        assert!(p.next());
        assert!(p.next());
        assert!(!p.next());
        assert!(p.at_end());
        assert!(p.back());
        assert_eq!(p.position(), 1);
    }

    #[test]
    fn tick_waits_for_the_delay() {
        let t0 = Instant::now();
        let mut p = Playback::new(ms(100));
        p.load(steps(5));
        p.play(t0);
        assert_eq!(p.position(), 1);
        assert!(!p.tick(t0 + ms(99)));
        assert!(p.tick(t0 + ms(100)));
        assert_eq!(p.position(), 2);
        assert_eq!(p.until_due(t0 + ms(150)), Some(ms(50)));
    }

    #[test]
    fn play_stops_at_the_last_step() {
        let t0 = Instant::now();
        let mut p = Playback::new(ms(50));
        p.load(steps(3));
        p.play(t0);
        assert!(p.tick(t0 + ms(50)));
        assert!(p.at_end());
        assert!(!p.is_playing());
        assert!(!p.tick(t0 + ms(500)));
    }

    #[test]
    fn cancelled_advance_never_fires() {
        let t0 = Instant::now();
        let mut p = Playback::new(ms(50));
        p.load(steps(10));
        p.play(t0);
        p.pause();
        assert!(!p.tick(t0 + ms(1000)));
        assert_eq!(p.position(), 1);

        p.play(t0);
        p.back();
        assert!(!p.is_playing());
        assert!(!p.tick(t0 + ms(1000)));

        p.play(t0);
        p.load(steps(4));
        assert_eq!(p.position(), 0);
        assert!(!p.tick(t0 + ms(1000)));
    }

    #[test]
    fn delay_is_clamped() {
        let mut p = Playback::default();
        p.set_delay(ms(1));
        assert_eq!(p.delay(), ms(MIN_DELAY_MS));
        p.set_delay(ms(10_000));
        assert_eq!(p.delay(), ms(MAX_DELAY_MS));
    }

    #[test]
    fn empty_playback_has_nothing_to_play() {
        let mut p = Playback::default();
        p.play(Instant::now());
        assert!(!p.is_playing());
        assert!(p.current().is_none());
    }
}
