//! AddCommentHandler - Posts a comment on an existing recipe.

use std::sync::Arc;
use tracing::info;

use crate::domain::comment::Comment;
use crate::domain::foundation::{DomainError, Principal, RecipeId};
use crate::ports::{Clock, CommentRepository, RecipeRepository};

#[derive(Debug, Clone)]
pub struct AddCommentCommand {
    pub principal: Principal,
    pub recipe_id: RecipeId,
    pub body: String,
}

#[derive(Debug, Clone)]
pub struct AddCommentResult {
    pub comment: Comment,
}

pub struct AddCommentHandler {
    recipes: Arc<dyn RecipeRepository>,
    comments: Arc<dyn CommentRepository>,
    clock: Arc<dyn Clock>,
}

impl AddCommentHandler {
    pub fn new(
        recipes: Arc<dyn RecipeRepository>,
        comments: Arc<dyn CommentRepository>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            recipes,
            comments,
            clock,
        }
    }

    /// # Errors
    ///
    /// - `NotFound` if the recipe does not exist
    /// - `ValidationFailed` if the body is blank or too long
    pub async fn handle(&self, cmd: AddCommentCommand) -> Result<AddCommentResult, DomainError> {
        if !self.recipes.exists(cmd.recipe_id).await? {
            return Err(DomainError::not_found("Recipe", cmd.recipe_id));
        }

        let id = self.comments.next_id().await?;
        let comment = Comment::post(
            id,
            cmd.recipe_id,
            cmd.principal.id,
            &cmd.body,
            self.clock.now(),
        )?;

        self.comments.save(&comment).await?;

        info!(
            comment_id = %comment.id(),
            recipe_id = %comment.recipe_id(),
            author_id = %comment.author_id(),
            "Comment added"
        );

        Ok(AddCommentResult { comment })
    }
}
