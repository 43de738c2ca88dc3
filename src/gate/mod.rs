//! Human-verification gate
//!
//! A small arithmetic puzzle in front of the dashboard. Not a security
//! boundary. Three wrong answers lock the form until the page is reloaded.

pub mod challenge;
pub mod driver;
pub mod input;
pub mod state;
pub mod view;

pub use challenge::Challenge;
pub use driver::{Navigator, verify};
pub use input::{resolve_redirect, sanitize_answer};
pub use state::{Gate, GateMessage, GatePhase, PendingVerification, Verdict};
pub use view::GateView;
