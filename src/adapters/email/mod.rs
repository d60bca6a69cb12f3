//! Email adapters.
//!
//! - `ResendEmailSender` - Resend HTTP API
//! - `MockEmailSender` - Records messages for tests

mod mock;
mod resend;

pub use mock::MockEmailSender;
pub use resend::{ResendConfig, ResendEmailSender};
