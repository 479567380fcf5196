//! ListActiveCommentsHandler - Active comments for a recipe, oldest first.

use std::sync::Arc;

use crate::domain::comment::Comment;
use crate::domain::foundation::{DomainError, RecipeId};
use crate::ports::CommentRepository;

#[derive(Debug, Clone, Copy)]
pub struct ListActiveCommentsQuery {
    pub recipe_id: RecipeId,
}

pub struct ListActiveCommentsHandler {
    comments: Arc<dyn CommentRepository>,
}

impl ListActiveCommentsHandler {
    pub fn new(comments: Arc<dyn CommentRepository>) -> Self {
        Self { comments }
    }

    pub async fn handle(&self, query: ListActiveCommentsQuery) -> Result<Vec<Comment>, DomainError> {
        self.comments.find_active_by_recipe(query.recipe_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::comment::{AddCommentCommand, DeactivateCommentCommand};
    use crate::application::handlers::test_support::{user, Fixture};
    use chrono::Duration;

    #[tokio::test]
    async fn hides_deactivated_comments() {
        let fx = Fixture::new();
        let recipe = fx.seed_recipe(7, None).await;
        let mut posted = Vec::new();
        for body in ["one", "two", "three"] {
            fx.clock.advance(Duration::seconds(1));
            let result = fx
                .add_comment_handler()
                .handle(AddCommentCommand {
                    principal: user(3),
                    recipe_id: recipe.id(),
                    body: body.to_string(),
                })
                .await
                .unwrap();
            posted.push(result.comment);
        }
        fx.deactivate_comment_handler()
            .handle(DeactivateCommentCommand {
                principal: user(3),
                comment_id: posted[1].id(),
            })
            .await
            .unwrap();

        let listed = ListActiveCommentsHandler::new(fx.comments.clone())
            .handle(ListActiveCommentsQuery {
                recipe_id: recipe.id(),
            })
            .await
            .unwrap();
        let bodies: Vec<&str> = listed.iter().map(|c| c.body()).collect();

        assert_eq!(bodies, vec!["one", "three"]);
    }
}
