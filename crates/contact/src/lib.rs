mod email;
mod error;
mod form;
mod handler;
mod mailer;
mod submission;

#[cfg(feature = "client")]
mod client;

#[cfg(feature = "client")]
pub use client::*;
pub use email::compose;
pub use error::*;
pub use form::*;
pub use handler::*;
pub use mailer::*;
pub use submission::*;
