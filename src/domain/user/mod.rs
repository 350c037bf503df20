//! User domain: the account record and its subscription state.

mod subscription;
mod account;

pub use subscription::SubscriptionStatus;
pub use account::User;
