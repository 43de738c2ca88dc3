//! Verification session state machine
//!
//! ```text
//! Idle ──begin_submit──► Submitting ──finish_submit──┬─► Success (terminal)
//!  ▲                                                  ├─► Idle   (attempts + 1)
//!  └──────────────────────────────────────────────────┘
//!                                                     └─► Locked (terminal)
//! ```

use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::challenge::Challenge;
use super::input::resolve_redirect;
use crate::error::{GateError, LandingError};
use crate::settings::GateConfig;

/// Current phase of the verification session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GatePhase {
    /// Challenge shown, waiting for an answer
    Idle,
    /// Answer is being checked
    Submitting,
    /// Passed; navigation has been requested
    Success,
    /// Attempt budget exhausted until the page is reloaded
    Locked,
}

/// Inline message shown under the form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateMessage {
    Incorrect,
    TooManyAttempts,
}

impl GateMessage {
    pub fn text(&self) -> &'static str {
        match self {
            GateMessage::Incorrect => "Incorrect answer. Please try again.",
            GateMessage::TooManyAttempts => "Too many failed attempts. Please refresh the page.",
        }
    }
}

/// Outcome of a checked submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// Correct; navigate to `target`
    Passed { target: String },
    /// Wrong; a fresh challenge is up
    Retry { attempts: u32 },
    /// Wrong, and that was the last allowed attempt
    Locked,
}

/// A submission between `begin_submit` and `finish_submit`.
///
/// Holds the challenge as displayed when the user hit submit.
#[derive(Debug)]
pub struct PendingVerification {
    challenge: Challenge,
    answer: String,
}

impl PendingVerification {
    pub fn challenge(&self) -> Challenge {
        self.challenge
    }

    pub fn answer(&self) -> &str {
        &self.answer
    }
}

/// One verification session
#[derive(Debug, Clone)]
pub struct Gate {
    rng: Pcg32,
    challenge: Challenge,
    answer: String,
    attempts: u32,
    phase: GatePhase,
    message: Option<GateMessage>,
    redirect: String,
    max_attempts: u32,
    operand_min: u32,
    operand_max: u32,
}

impl Gate {
    /// Start a session. `redirect_param` is the raw `redirect` query value.
    pub fn new(
        config: &GateConfig,
        redirect_param: Option<&str>,
        seed: u64,
    ) -> Result<Self, LandingError> {
        config.validate()?;

        let mut rng = Pcg32::seed_from_u64(seed);
        let challenge = Challenge::generate(&mut rng, config.operand_min, config.operand_max);
        let redirect = resolve_redirect(redirect_param, &config.default_redirect);

        log::info!("Verification gate ready (redirect: {})", redirect);

        Ok(Self {
            rng,
            challenge,
            answer: String::new(),
            attempts: 0,
            phase: GatePhase::Idle,
            message: None,
            redirect,
            max_attempts: config.max_attempts,
            operand_min: config.operand_min,
            operand_max: config.operand_max,
        })
    }

    /// Replace the challenge with a new operand pair
    pub fn generate_challenge(&mut self) -> Result<(), GateError> {
        if self.phase == GatePhase::Locked {
            return Err(GateError::Locked);
        }
        self.draw_challenge();
        self.message = None;
        Ok(())
    }

    /// Draw a pair different from the one on screen (when more than one exists)
    fn draw_challenge(&mut self) {
        let previous = self.challenge;
        loop {
            self.challenge = Challenge::generate(&mut self.rng, self.operand_min, self.operand_max);
            if self.challenge != previous || self.operand_min == self.operand_max {
                break;
            }
        }
        self.answer.clear();
    }

    /// Update the answer buffer. Ignored once the input is disabled.
    pub fn set_answer(&mut self, answer: &str) {
        if self.input_enabled() {
            self.answer.clear();
            self.answer.push_str(answer);
        }
    }

    pub fn can_submit(&self) -> bool {
        self.phase == GatePhase::Idle && !self.answer.trim().is_empty()
    }

    /// Whether the answer field accepts input
    pub fn input_enabled(&self) -> bool {
        self.phase != GatePhase::Locked
    }

    /// Take the current answer and enter `Submitting`
    pub fn begin_submit(&mut self) -> Result<PendingVerification, GateError> {
        match self.phase {
            GatePhase::Locked => return Err(GateError::Locked),
            GatePhase::Submitting => return Err(GateError::Busy),
            GatePhase::Success => return Err(GateError::AlreadyVerified),
            GatePhase::Idle => {}
        }
        if self.answer.trim().is_empty() {
            return Err(GateError::EmptyAnswer);
        }

        self.phase = GatePhase::Submitting;
        self.message = None;
        Ok(PendingVerification {
            challenge: self.challenge,
            answer: std::mem::take(&mut self.answer),
        })
    }

    /// Check a pending submission and settle the session
    pub fn finish_submit(&mut self, pending: PendingVerification) -> Verdict {
        self.answer.clear();

        if pending.challenge.accepts(&pending.answer) {
            self.phase = GatePhase::Success;
            log::info!("Verification passed");
            return Verdict::Passed {
                target: self.redirect.clone(),
            };
        }

        self.attempts += 1;
        self.message = Some(GateMessage::Incorrect);
        self.draw_challenge();

        if self.attempts >= self.max_attempts {
            self.phase = GatePhase::Locked;
            self.message = Some(GateMessage::TooManyAttempts);
            log::warn!("Verification locked after {} failed attempts", self.attempts);
            Verdict::Locked
        } else {
            self.phase = GatePhase::Idle;
            log::info!("Verification failed ({}/{})", self.attempts, self.max_attempts);
            Verdict::Retry {
                attempts: self.attempts,
            }
        }
    }

    /// Check the current answer immediately
    pub fn submit_now(&mut self) -> Result<Verdict, GateError> {
        let pending = self.begin_submit()?;
        Ok(self.finish_submit(pending))
    }

    /// Hide the inline error. The lockout notice stays.
    pub fn dismiss_message(&mut self) {
        if self.phase != GatePhase::Locked {
            self.message = None;
        }
    }

    pub fn challenge(&self) -> Challenge {
        self.challenge
    }

    pub fn answer(&self) -> &str {
        &self.answer
    }

    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    pub fn phase(&self) -> GatePhase {
        self.phase
    }

    pub fn message(&self) -> Option<GateMessage> {
        self.message
    }

    pub fn redirect(&self) -> &str {
        &self.redirect
    }

    /// Force a specific challenge
    #[cfg(test)]
    pub(crate) fn set_challenge(&mut self, challenge: Challenge) {
        self.challenge = challenge;
    }
}
