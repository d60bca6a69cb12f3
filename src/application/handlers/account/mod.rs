//! Account handlers: deletion and usernames.

mod delete_account;
mod username;

pub use delete_account::{AccountStores, DeleteAccountCommand, DeleteAccountHandler};
pub use username::{ClaimUsernameCommand, ClaimUsernameHandler, GetUsernameHandler};
