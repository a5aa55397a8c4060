use crate::game::{GameEvent, GameSession};
use crate::score::HighScoreStore;

/// Runs the simulation once every `frames_per_step` scheduler callbacks.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct FrameThrottle {
    frames_per_step: u32,
    frame: u64,
}

impl FrameThrottle {
    /// A zero cadence is treated as one step per frame.
    #[must_use]
    pub fn new(frames_per_step: u32) -> Self {
        Self {
            frames_per_step: frames_per_step.max(1),
            frame: 0,
        }
    }

    /// Counts one frame and returns true when a step is due (frames 0, K, 2K, ...).
    pub fn advance(&mut self) -> bool {
        let due = self.frame % u64::from(self.frames_per_step) == 0;
        self.frame += 1;
        due
    }

    #[must_use]
    pub fn frames_per_step(self) -> u32 {
        self.frames_per_step
    }
}

/// What one scheduler callback did.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum FrameOutcome {
    /// Frame counted, no step due.
    Idle,
    Stepped(Option<GameEvent>),
    /// The scheduler has been cancelled; nothing ran.
    Cancelled,
}

/// Frame-driven tick source with deterministic cancellation.
#[derive(Debug, Clone)]
pub struct FrameScheduler {
    throttle: FrameThrottle,
    cancelled: bool,
}

impl FrameScheduler {
    #[must_use]
    pub fn new(frames_per_step: u32) -> Self {
        Self {
            throttle: FrameThrottle::new(frames_per_step),
            cancelled: false,
        }
    }

    /// Handles one display frame, stepping `session` when the throttle allows.
    pub fn on_frame<S: HighScoreStore>(&mut self, session: &mut GameSession<S>) -> FrameOutcome {
        if self.cancelled {
            return FrameOutcome::Cancelled;
        }

        if self.throttle.advance() {
            FrameOutcome::Stepped(session.tick())
        } else {
            FrameOutcome::Idle
        }
    }

    /// Stops all further steps. Takes effect before the next callback.
    pub fn cancel(&mut self) {
        self.cancelled = true;
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }
}

#[cfg(test)]
mod tests {
    use crate::config::GameConfig;
    use crate::game::{GameSession, SessionState};
    use crate::score::MemoryStore;

    use super::{FrameOutcome, FrameScheduler, FrameThrottle};

    #[test]
    fn throttle_fires_every_kth_frame() {
        let mut throttle = FrameThrottle::new(8);
        let due: Vec<bool> = (0..9).map(|_| throttle.advance()).collect();
        assert_eq!(
            due,
            vec![true, false, false, false, false, false, false, false, true]
        );

        let steps = (9..24).filter(|_| throttle.advance()).count();
        assert_eq!(steps, 1);
    }

    #[test]
    fn zero_cadence_steps_every_frame() {
        let mut throttle = FrameThrottle::new(0);

        assert_eq!(throttle.frames_per_step(), 1);
        assert!((0..5).all(|_| throttle.advance()));
    }

    #[test]
    fn cancelled_scheduler_never_steps() {
        let mut session = GameSession::with_seed(GameConfig::default(), MemoryStore::default(), 2)
            .expect("default config is valid");
        session.start();
        let mut scheduler = FrameScheduler::new(1);

        assert!(matches!(
            scheduler.on_frame(&mut session),
            FrameOutcome::Stepped(_)
        ));
        let ticks = session.simulation().tick_count();

        scheduler.cancel();
        for _ in 0..10 {
            assert_eq!(scheduler.on_frame(&mut session), FrameOutcome::Cancelled);
        }

        assert!(scheduler.is_cancelled());
        assert_eq!(session.simulation().tick_count(), ticks);
        assert_eq!(session.state(), SessionState::Running);
    }
}
