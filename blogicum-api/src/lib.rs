#[macro_use]
extern crate serde_derive;

pub mod comments;
pub mod posts;
pub mod users;
