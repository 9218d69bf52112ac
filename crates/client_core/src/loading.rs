//! Fixed-timing progress sequence shown while a negotiation request runs.
//!
//! The sequence is cosmetic: it advances on its own schedule and knows nothing
//! about the request it decorates.

use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadingStep {
    pub label: &'static str,
    pub text: &'static str,
    pub duration: Duration,
}

pub const LOADING_STEPS: [LoadingStep; 5] = [
    LoadingStep {
        label: "Setting up agents",
        text: "Setting up intelligent agents...",
        duration: Duration::from_millis(800),
    },
    LoadingStep {
        label: "Initializing parameters",
        text: "Configuring negotiation parameters...",
        duration: Duration::from_millis(600),
    },
    LoadingStep {
        label: "Starting negotiation rounds",
        text: "Initiating multi-round negotiations...",
        duration: Duration::from_millis(1200),
    },
    LoadingStep {
        label: "Analyzing strategies",
        text: "Analyzing strategic patterns...",
        duration: Duration::from_millis(900),
    },
    LoadingStep {
        label: "Finalizing results",
        text: "Generating comprehensive report...",
        duration: Duration::from_millis(700),
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepStatus {
    Pending,
    Active,
    Completed,
}

#[derive(Debug, Clone)]
pub struct LoadingSequencer {
    step: usize,
    step_started_at: Instant,
    finished: bool,
}

impl LoadingSequencer {
    pub fn start(now: Instant) -> Self {
        Self {
            step: 0,
            step_started_at: now,
            finished: false,
        }
    }

    /// Advances through every step whose display time has elapsed by `now`.
    /// Returns true if the active step changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        let mut changed = false;
        while !self.finished {
            let due = self.step_started_at + LOADING_STEPS[self.step].duration;
            if now < due {
                break;
            }
            if self.step + 1 < LOADING_STEPS.len() {
                self.step += 1;
                self.step_started_at = due;
                changed = true;
            } else {
                self.finished = true;
            }
        }
        changed
    }

    pub fn current_step(&self) -> usize {
        self.step
    }

    pub fn current(&self) -> &'static LoadingStep {
        &LOADING_STEPS[self.step]
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Fraction in `0.0..=1.0`; the active step counts as reached.
    pub fn progress(&self) -> f32 {
        (self.step + 1) as f32 / LOADING_STEPS.len() as f32
    }

    pub fn step_status(&self, index: usize) -> StepStatus {
        if index < self.step {
            StepStatus::Completed
        } else if index == self.step {
            StepStatus::Active
        } else {
            StepStatus::Pending
        }
    }
}
