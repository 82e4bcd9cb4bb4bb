//! Data models for the club administration API.
//!
//! Plain records mirroring server rows. The server owns every entity; the
//! client only holds disposable copies.

mod activity;
mod attendance;
mod comment;
mod event;
mod news;
mod token;
mod tournament;
mod user;

pub use activity::*;
pub use attendance::*;
pub use comment::*;
pub use event::*;
pub use news::*;
pub use token::*;
pub use tournament::*;
pub use user::*;
