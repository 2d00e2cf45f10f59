//! SeaORM implementation of ReviewRepository

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};

use super::new_id;
use crate::domain::{DomainError, InsertResult, NewReview, ReviewRepository};
use crate::infrastructure::db::now_timestamp;
use crate::models::Review;
use crate::models::review::{ActiveModel, Column, Entity as ReviewEntity};

pub struct SeaOrmReviewRepository {
    db: DatabaseConnection,
}

impl SeaOrmReviewRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ReviewRepository for SeaOrmReviewRepository {
    async fn create(&self, review: NewReview) -> Result<InsertResult, DomainError> {
        let id = new_id();
        let new_review = ActiveModel {
            id: Set(id.clone()),
            book_id: Set(review.book_id),
            email: Set(review.email),
            name: Set(review.name),
            rating: Set(review.rating),
            comment: Set(review.comment),
            created_at: Set(now_timestamp()),
        };

        new_review.insert(&self.db).await?;
        Ok(InsertResult::new(id))
    }

    async fn find_by_book_id(&self, book_id: &str) -> Result<Vec<Review>, DomainError> {
        Ok(ReviewEntity::find()
            .filter(Column::BookId.eq(book_id))
            .order_by_desc(Column::CreatedAt)
            .all(&self.db)
            .await?)
    }
}
