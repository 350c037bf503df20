//! Authentication handlers.

mod complete_login;

pub use complete_login::{
    CompleteLoginCommand, CompleteLoginError, CompleteLoginHandler, CompleteLoginResult,
};
