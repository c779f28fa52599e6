//! Swipe-to-delete gesture recognition
//!
//! A horizontal swipe across an entry deletes it. The recognizer is a small
//! state machine fed with pointer start/move/end events and knows nothing
//! about how rows are drawn, so it can be driven from synthetic coordinate
//! sequences.
//!
//! Raw X coordinates are projected with `-floor(x / 2)` before any
//! comparison; both thresholds below are in projected units.

/// Movement beyond which a touch counts as a swipe rather than a tap
pub const SWIPE_THRESHOLD: i64 = 15;

/// Displacement a swipe must exceed at release to delete the entry
pub const MIN_SWIPE_DISTANCE: i64 = 70;

/// Map a raw pointer X coordinate into swipe space
pub fn project(x: f64) -> i64 {
    -((x / 2.0).floor() as i64)
}

/// Pointer lifecycle input
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TouchEvent {
    /// First contact at raw X
    Start(f64),
    /// Pointer moved to raw X
    Move(f64),
    /// Pointer lifted
    End,
}

/// What the caller should do after an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwipeOutcome {
    None,
    Delete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SwipeState {
    #[default]
    Idle,
    /// Touching, not yet past the swipe threshold
    Tracking { start: i64, current: i64 },
    /// Past the swipe threshold; stays here until release
    Swiping { start: i64, current: i64 },
}

/// Recognizes a swipe on a single row
#[derive(Debug, Clone, Copy, Default)]
pub struct SwipeRecognizer {
    state: SwipeState,
}

impl SwipeRecognizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> SwipeState {
        self.state
    }

    /// Projected start position (0 when idle)
    pub fn start(&self) -> i64 {
        match self.state {
            SwipeState::Idle => 0,
            SwipeState::Tracking { start, .. } | SwipeState::Swiping { start, .. } => start,
        }
    }

    /// Projected current position (0 when idle)
    pub fn current(&self) -> i64 {
        match self.state {
            SwipeState::Idle => 0,
            SwipeState::Tracking { current, .. } | SwipeState::Swiping { current, .. } => current,
        }
    }

    pub fn is_swiping(&self) -> bool {
        matches!(self.state, SwipeState::Swiping { .. })
    }

    /// Signed displacement `start - current`
    pub fn displacement(&self) -> i64 {
        self.start() - self.current()
    }

    /// How far the row should be drawn shifted; zero unless swiping
    pub fn drag_offset(&self) -> i64 {
        if self.is_swiping() {
            self.displacement()
        } else {
            0
        }
    }

    /// Whether releasing now would delete the entry
    pub fn in_danger_zone(&self) -> bool {
        self.is_swiping() && self.displacement().abs() > MIN_SWIPE_DISTANCE
    }

    /// Feed one pointer event
    pub fn handle(&mut self, event: TouchEvent) -> SwipeOutcome {
        match event {
            TouchEvent::Start(x) => {
                let position = project(x);
                self.state = SwipeState::Tracking {
                    start: position,
                    current: position,
                };
                SwipeOutcome::None
            }
            TouchEvent::Move(x) => {
                let current = project(x);
                self.state = match self.state {
                    SwipeState::Idle => SwipeState::Idle,
                    SwipeState::Tracking { start, .. } if (start - current).abs() > SWIPE_THRESHOLD => {
                        SwipeState::Swiping { start, current }
                    }
                    SwipeState::Tracking { start, .. } => SwipeState::Tracking { start, current },
                    SwipeState::Swiping { start, .. } => SwipeState::Swiping { start, current },
                };
                SwipeOutcome::None
            }
            TouchEvent::End => {
                let outcome = if self.in_danger_zone() {
                    SwipeOutcome::Delete
                } else {
                    SwipeOutcome::None
                };
                self.state = SwipeState::Idle;
                outcome
            }
        }
    }
}
