//! Platform abstraction layer
//!
//! Handles the browser/native difference in frame scheduling. The browser
//! backs [`FrameScheduler`] with `requestAnimationFrame`; the native driver
//! and the tests use [`QueuedScheduler`].
//!
//! At most one frame request is pending at any time. Every request carries
//! the run generation it was made for, so a callback from a run that has
//! since been restarted or reset is recognised and dropped.

use std::collections::VecDeque;

use crate::config::DifficultyId;
use crate::error::ConfigError;
use crate::sim::{GameEvent, GamePhase, GameSession, PlayArea};

/// Something that can call us back on the next display frame
pub trait FrameScheduler {
    type Handle: Copy + PartialEq + std::fmt::Debug;

    /// Ask for one callback tagged with `generation`. `None` if the platform
    /// refused the request.
    fn request_frame(&mut self, generation: u64) -> Option<Self::Handle>;

    fn cancel_frame(&mut self, handle: Self::Handle);
}

/// Owns the single pending frame request
#[derive(Debug)]
pub struct FrameLoop<S: FrameScheduler> {
    scheduler: S,
    generation: u64,
    pending: Option<S::Handle>,
}

impl<S: FrameScheduler> FrameLoop<S> {
    pub fn new(scheduler: S) -> Self {
        Self {
            scheduler,
            generation: 0,
            pending: None,
        }
    }

    /// Cancel whatever is pending, then schedule the first frame of
    /// `generation`
    pub fn restart(&mut self, generation: u64) {
        self.stop();
        self.generation = generation;
        self.pending = self.scheduler.request_frame(generation);
        if self.pending.is_none() {
            log::warn!("Frame request refused for run {}", generation);
        }
    }

    /// Cancel the pending request, if any. Safe to call repeatedly.
    pub fn stop(&mut self) {
        if let Some(handle) = self.pending.take() {
            self.scheduler.cancel_frame(handle);
        }
    }

    /// Called from the frame callback. Returns false for stale callbacks,
    /// which must do nothing.
    pub fn accept(&mut self, generation: u64) -> bool {
        if generation != self.generation || self.pending.is_none() {
            log::debug!(
                "Dropping frame for run {} (current {})",
                generation,
                self.generation
            );
            return false;
        }
        self.pending = None;
        true
    }

    /// Request the next frame of the current generation
    pub fn schedule_next(&mut self) {
        if self.pending.is_none() {
            self.pending = self.scheduler.request_frame(self.generation);
        }
    }

    pub fn is_scheduled(&self) -> bool {
        self.pending.is_some()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }
}

/// In-memory scheduler: requests queue up until the driver pops them
#[derive(Debug, Default)]
pub struct QueuedScheduler {
    queue: VecDeque<(u32, u64)>,
    next_handle: u32,
}

impl QueuedScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Next due callback as `(handle, generation)`
    pub fn pop(&mut self) -> Option<(u32, u64)> {
        self.queue.pop_front()
    }

    pub fn pending(&self) -> usize {
        self.queue.len()
    }
}

impl FrameScheduler for QueuedScheduler {
    type Handle = u32;

    fn request_frame(&mut self, generation: u64) -> Option<u32> {
        self.next_handle += 1;
        self.queue.push_back((self.next_handle, generation));
        Some(self.next_handle)
    }

    fn cancel_frame(&mut self, handle: u32) {
        self.queue.retain(|&(h, _)| h != handle);
    }
}

/// Session plus the frame loop that drives it
#[derive(Debug)]
pub struct GameRunner<S: FrameScheduler> {
    session: GameSession,
    frames: FrameLoop<S>,
}

impl<S: FrameScheduler> GameRunner<S> {
    pub fn new(session: GameSession, scheduler: S) -> Self {
        Self {
            session,
            frames: FrameLoop::new(scheduler),
        }
    }

    /// Start (or restart) a run and schedule its first frame
    pub fn start(
        &mut self,
        difficulty: DifficultyId,
        area: PlayArea,
        seed: u64,
    ) -> Result<u64, ConfigError> {
        let generation = self.session.start(difficulty, area, seed)?;
        self.frames.restart(generation);
        Ok(generation)
    }

    /// Back to the selection screen; the pending frame is cancelled
    pub fn reset(&mut self) {
        self.frames.stop();
        self.session.reset();
    }

    /// Frame callback. `None` if the callback was stale.
    ///
    /// The loop keeps itself scheduled while the run is running and stops
    /// once it ends.
    pub fn frame(&mut self, generation: u64, now_ms: f64) -> Option<Vec<GameEvent>> {
        if generation != self.session.generation() || !self.frames.accept(generation) {
            return None;
        }
        let events = self.session.step(now_ms);
        if self.session.phase() == GamePhase::Running {
            self.frames.schedule_next();
        }
        Some(events)
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut GameSession {
        &mut self.session
    }

    pub fn frames(&self) -> &FrameLoop<S> {
        &self.frames
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        self.frames.scheduler_mut()
    }
}
