//! What the verification form should currently show

use super::state::{Gate, GatePhase};

/// Snapshot of everything the form renders
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GateView {
    /// e.g. `"3 + 4 = ?"`
    pub challenge: String,
    pub message: Option<&'static str>,
    /// e.g. `"Attempts: 1/3"`
    pub attempts: String,
    pub input_enabled: bool,
    pub submit_enabled: bool,
    pub submit_label: &'static str,
    pub answer: String,
}

impl From<&Gate> for GateView {
    fn from(gate: &Gate) -> Self {
        let submit_label = match gate.phase() {
            GatePhase::Submitting => "Verifying...",
            _ => "Verify & Continue",
        };

        Self {
            challenge: gate.challenge().to_string(),
            message: gate.message().map(|m| m.text()),
            attempts: format!("Attempts: {}/{}", gate.attempts(), gate.max_attempts()),
            input_enabled: gate.input_enabled(),
            submit_enabled: gate.can_submit(),
            submit_label,
            answer: gate.answer().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gate::Challenge;
    use crate::settings::GateConfig;

    #[test]
    fn test_initial_view() {
        let mut gate = Gate::new(&GateConfig::default(), None, 8).unwrap();
        gate.set_challenge(Challenge::new(3, 4));
        let view = GateView::from(&gate);

        assert_eq!(view.challenge, "3 + 4 = ?");
        assert_eq!(view.message, None);
        assert_eq!(view.attempts, "Attempts: 0/3");
        assert!(view.input_enabled);
        assert!(!view.submit_enabled);
        assert_eq!(view.submit_label, "Verify & Continue");
    }

    #[test]
    fn test_submitting_view() {
        let mut gate = Gate::new(&GateConfig::default(), None, 8).unwrap();
        gate.set_answer("9");
        assert!(GateView::from(&gate).submit_enabled);

        let _pending = gate.begin_submit().unwrap();
        let view = GateView::from(&gate);
        assert_eq!(view.submit_label, "Verifying...");
        assert!(!view.submit_enabled);
        assert_eq!(view.answer, "");
    }

    #[test]
    fn test_wrong_then_locked_view() {
        let mut gate = Gate::new(&GateConfig::default(), None, 8).unwrap();
        gate.set_challenge(Challenge::new(6, 2));
        gate.set_answer("5");
        gate.submit_now().unwrap();

        let view = GateView::from(&gate);
        assert_eq!(view.message, Some("Incorrect answer. Please try again."));
        assert_eq!(view.attempts, "Attempts: 1/3");
        assert_eq!(view.answer, "");

        for _ in 0..2 {
            let wrong = (gate.challenge().answer() + 1).to_string();
            gate.set_answer(&wrong);
            gate.submit_now().unwrap();
        }
        let view = GateView::from(&gate);
        assert_eq!(
            view.message,
            Some("Too many failed attempts. Please refresh the page.")
        );
        assert_eq!(view.attempts, "Attempts: 3/3");
        assert!(!view.input_enabled);
        assert!(!view.submit_enabled);
    }
}
