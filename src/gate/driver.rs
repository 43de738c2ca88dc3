//! Async submission flow
//!
//! The only suspension point is the artificial "verifying" delay. If the gate
//! is torn down while waiting, the result is dropped without touching state.

use std::cell::RefCell;
use std::future::Future;

use super::state::{Gate, PendingVerification, Verdict};
use crate::lifecycle::CancelToken;

/// Page navigation primitive
pub trait Navigator {
    fn navigate(&mut self, target: &str);
}

/// Wait out `delay`, then settle `pending` and navigate on success.
///
/// Returns `None` when `token` was cancelled during the delay.
pub async fn verify<D, N>(
    gate: &RefCell<Gate>,
    pending: PendingVerification,
    token: &CancelToken,
    delay: D,
    navigator: &mut N,
) -> Option<Verdict>
where
    D: Future<Output = ()>,
    N: Navigator + ?Sized,
{
    delay.await;

    if token.is_cancelled() {
        log::debug!("Verification gate torn down; dropping pending result");
        return None;
    }

    let verdict = gate.borrow_mut().finish_submit(pending);
    if let Verdict::Passed { target } = &verdict {
        navigator.navigate(target);
    }
    Some(verdict)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gate::{Challenge, GatePhase};
    use crate::settings::GateConfig;
    use std::pin::pin;
    use std::task::{Context, Poll, Waker};

    #[derive(Default)]
    struct RecordingNavigator {
        visits: Vec<String>,
    }

    impl Navigator for RecordingNavigator {
        fn navigate(&mut self, target: &str) {
            self.visits.push(target.to_string());
        }
    }

    /// Pending on first poll, ready on the second
    struct YieldOnce(bool);

    impl Future for YieldOnce {
        type Output = ();

        fn poll(mut self: std::pin::Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<()> {
            if self.0 {
                Poll::Ready(())
            } else {
                self.0 = true;
                Poll::Pending
            }
        }
    }

    fn block_on<F: Future>(fut: F) -> F::Output {
        let mut fut = pin!(fut);
        let mut cx = Context::from_waker(Waker::noop());
        loop {
            if let Poll::Ready(out) = fut.as_mut().poll(&mut cx) {
                return out;
            }
        }
    }

    fn gate_with(challenge: Challenge, redirect: Option<&str>) -> RefCell<Gate> {
        let mut gate = Gate::new(&GateConfig::default(), redirect, 77).unwrap();
        gate.set_challenge(challenge);
        RefCell::new(gate)
    }

    #[test]
    fn test_correct_answer_navigates_once() {
        let gate = gate_with(Challenge::new(3, 4), None);
        gate.borrow_mut().set_answer("7");
        let pending = gate.borrow_mut().begin_submit().unwrap();
        let mut nav = RecordingNavigator::default();

        let verdict = block_on(verify(&gate, pending, &CancelToken::new(), YieldOnce(false), &mut nav));

        assert!(matches!(verdict, Some(Verdict::Passed { .. })));
        assert_eq!(nav.visits, vec!["/dashboard".to_string()]);
        assert_eq!(gate.borrow().attempts(), 0);
    }

    #[test]
    fn test_correct_answer_uses_redirect_param() {
        let gate = gate_with(Challenge::new(3, 4), Some("/labs/run-17"));
        gate.borrow_mut().set_answer("7");
        let pending = gate.borrow_mut().begin_submit().unwrap();
        let mut nav = RecordingNavigator::default();

        block_on(verify(&gate, pending, &CancelToken::new(), std::future::ready(()), &mut nav));

        assert_eq!(nav.visits, vec!["/labs/run-17".to_string()]);
    }

    #[test]
    fn test_wrong_answer_does_not_navigate() {
        let gate = gate_with(Challenge::new(6, 2), None);
        gate.borrow_mut().set_answer("5");
        let pending = gate.borrow_mut().begin_submit().unwrap();
        let mut nav = RecordingNavigator::default();

        let verdict = block_on(verify(&gate, pending, &CancelToken::new(), YieldOnce(false), &mut nav));

        assert_eq!(verdict, Some(Verdict::Retry { attempts: 1 }));
        assert!(nav.visits.is_empty());
        assert_eq!(gate.borrow().phase(), GatePhase::Idle);
    }

    #[test]
    fn test_teardown_during_delay_drops_result() {
        let gate = gate_with(Challenge::new(3, 4), None);
        gate.borrow_mut().set_answer("7");
        let pending = gate.borrow_mut().begin_submit().unwrap();
        let token = CancelToken::new();
        let mut nav = RecordingNavigator::default();

        {
            let mut fut = pin!(verify(&gate, pending, &token, YieldOnce(false), &mut nav));
            let mut cx = Context::from_waker(Waker::noop());
            assert!(fut.as_mut().poll(&mut cx).is_pending());

            // Navigated away mid-verification
            token.cancel();
            assert_eq!(fut.as_mut().poll(&mut cx), Poll::Ready(None));
        }

        assert!(nav.visits.is_empty());
        assert_eq!(gate.borrow().phase(), GatePhase::Submitting);
        assert_eq!(gate.borrow().attempts(), 0);
    }
}
