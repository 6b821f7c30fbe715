//! Comment repository for database operations.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use crate::entities::comments;
use bluebird_core::comment::{
    Comment, CommentError, CommentRepository as CommentRepoTrait, NewComment,
};

/// Comment repository implementation.
#[derive(Debug, Clone)]
pub struct CommentRepository {
    db: DatabaseConnection,
}

impl CommentRepository {
    /// Create a new comment repository.
    #[must_use]
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

impl CommentRepoTrait for CommentRepository {
    async fn create(&self, input: NewComment) -> Result<Comment, CommentError> {
        let now = Utc::now();
        let active_model = comments::ActiveModel {
            id: Set(Uuid::new_v4()),
            driver_id: Set(input.driver_id),
            author: Set(input.author),
            text: Set(input.text),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
        };

        let model = active_model
            .insert(&self.db)
            .await
            .map_err(|e| CommentError::repository(e.to_string()))?;

        Ok(to_domain(model))
    }

    async fn list_by_driver(&self, driver_id: Uuid) -> Result<Vec<Comment>, CommentError> {
        let models = comments::Entity::find()
            .filter(comments::Column::DriverId.eq(driver_id))
            .order_by_desc(comments::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| CommentError::repository(e.to_string()))?;

        Ok(models.into_iter().map(to_domain).collect())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, CommentError> {
        let result = comments::Entity::delete_many()
            .filter(comments::Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(|e| CommentError::repository(e.to_string()))?;

        Ok(result.rows_affected > 0)
    }
}

/// Convert database model to domain model.
fn to_domain(model: comments::Model) -> Comment {
    Comment {
        id: model.id,
        driver_id: model.driver_id,
        author: model.author,
        text: model.text,
        created_at: model.created_at.with_timezone(&Utc),
        updated_at: model.updated_at.with_timezone(&Utc),
    }
}
