//! EditCommentHandler and DeactivateCommentHandler.
//!
//! Both gate on the comment's author through the shared mutation policy.

use std::sync::Arc;
use tracing::info;

use crate::application::authorization::enforce;
use crate::domain::comment::Comment;
use crate::domain::foundation::{check_mutation, CommentId, DomainError, Principal};
use crate::ports::{Clock, CommentRepository};

#[derive(Debug, Clone)]
pub struct EditCommentCommand {
    pub principal: Principal,
    pub comment_id: CommentId,
    pub body: String,
}

#[derive(Debug, Clone)]
pub struct DeactivateCommentCommand {
    pub principal: Principal,
    pub comment_id: CommentId,
}

/// The comment after the mutation.
#[derive(Debug, Clone)]
pub struct CommentResult {
    pub comment: Comment,
}

async fn load(
    comments: &dyn CommentRepository,
    id: CommentId,
) -> Result<Comment, DomainError> {
    comments
        .find_by_id(id)
        .await?
        .ok_or_else(|| DomainError::not_found("Comment", id))
}

pub struct EditCommentHandler {
    comments: Arc<dyn CommentRepository>,
    clock: Arc<dyn Clock>,
}

impl EditCommentHandler {
    pub fn new(comments: Arc<dyn CommentRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { comments, clock }
    }

    /// # Errors
    ///
    /// - `NotFound` if the comment does not exist
    /// - `Forbidden` if the caller is neither the author nor an admin
    /// - `InvalidStateTransition` if the comment is inactive
    pub async fn handle(&self, cmd: EditCommentCommand) -> Result<CommentResult, DomainError> {
        let mut comment = load(self.comments.as_ref(), cmd.comment_id).await?;

        enforce("edit_comment", check_mutation(&comment, &cmd.principal))?;
        comment.edit(&cmd.body, self.clock.now())?;

        self.comments.update(&comment).await?;

        info!(comment_id = %comment.id(), user_id = %cmd.principal.id, "Comment edited");

        Ok(CommentResult { comment })
    }
}

pub struct DeactivateCommentHandler {
    comments: Arc<dyn CommentRepository>,
    clock: Arc<dyn Clock>,
}

impl DeactivateCommentHandler {
    pub fn new(comments: Arc<dyn CommentRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { comments, clock }
    }

    /// # Errors
    ///
    /// - `NotFound` if the comment does not exist
    /// - `Forbidden` if the caller is neither the author nor an admin
    /// - `InvalidStateTransition` if the comment is already inactive
    pub async fn handle(&self, cmd: DeactivateCommentCommand) -> Result<CommentResult, DomainError> {
        let mut comment = load(self.comments.as_ref(), cmd.comment_id).await?;

        enforce("deactivate_comment", check_mutation(&comment, &cmd.principal))?;
        comment.deactivate(self.clock.now())?;

        self.comments.update(&comment).await?;

        info!(comment_id = %comment.id(), user_id = %cmd.principal.id, "Comment deactivated");

        Ok(CommentResult { comment })
    }
}
