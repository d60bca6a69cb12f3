//! Reminder handlers.

mod dispatch;
mod manage;

pub use dispatch::{DispatchDueRemindersHandler, DISPATCH_BATCH};
pub use manage::{CreateReminderCommand, ManageRemindersHandler};
