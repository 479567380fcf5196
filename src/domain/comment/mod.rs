//! Comment domain module.

mod aggregate;

pub use aggregate::{Comment, CommentStatus, MAX_BODY_LENGTH};
