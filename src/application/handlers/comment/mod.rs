//! Comment handlers.

mod add_comment;
mod edit_comment;
mod list_comments;

pub use add_comment::{AddCommentCommand, AddCommentHandler, AddCommentResult};
pub use edit_comment::{
    CommentResult, DeactivateCommentCommand, DeactivateCommentHandler, EditCommentCommand,
    EditCommentHandler,
};
pub use list_comments::{ListActiveCommentsHandler, ListActiveCommentsQuery};
