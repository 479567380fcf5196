use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::RwLock;

use super::{poisoned, IdSequence};
use crate::domain::comment::Comment;
use crate::domain::foundation::{CommentId, DomainError, ErrorCode, RecipeId};
use crate::ports::CommentRepository;

#[derive(Debug, Default)]
pub struct InMemoryCommentRepository {
    comments: RwLock<BTreeMap<CommentId, Comment>>,
    ids: IdSequence,
}

impl InMemoryCommentRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CommentRepository for InMemoryCommentRepository {
    async fn next_id(&self) -> Result<CommentId, DomainError> {
        Ok(CommentId::new(self.ids.next())?)
    }

    async fn save(&self, comment: &Comment) -> Result<(), DomainError> {
        let mut comments = self.comments.write().map_err(poisoned)?;
        if comments.contains_key(&comment.id()) {
            return Err(DomainError::new(
                ErrorCode::ValidationFailed,
                format!("Comment already exists: {}", comment.id()),
            ));
        }
        self.ids.observe(comment.id().value());
        comments.insert(comment.id(), comment.clone());
        Ok(())
    }

    async fn update(&self, comment: &Comment) -> Result<(), DomainError> {
        let mut comments = self.comments.write().map_err(poisoned)?;
        match comments.get_mut(&comment.id()) {
            Some(slot) => {
                *slot = comment.clone();
                Ok(())
            }
            None => Err(DomainError::not_found("Comment", comment.id())),
        }
    }

    async fn find_by_id(&self, id: CommentId) -> Result<Option<Comment>, DomainError> {
        Ok(self.comments.read().map_err(poisoned)?.get(&id).cloned())
    }

    async fn find_active_by_recipe(&self, recipe_id: RecipeId) -> Result<Vec<Comment>, DomainError> {
        let comments = self.comments.read().map_err(poisoned)?;
        let mut found: Vec<Comment> = comments
            .values()
            .filter(|c| c.recipe_id() == recipe_id && c.is_active())
            .cloned()
            .collect();
        found.sort_by_key(|c| (*c.created_at(), c.id()));
        Ok(found)
    }
}
