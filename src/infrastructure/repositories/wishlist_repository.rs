//! SeaORM implementation of WishlistRepository

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};

use super::new_id;
use crate::domain::{DomainError, InsertResult, NewWishlistEntry, WishlistRepository};
use crate::infrastructure::db::now_timestamp;
use crate::models::WishlistEntry;
use crate::models::wishlist::{ActiveModel, Column, Entity as WishlistEntity};

pub struct SeaOrmWishlistRepository {
    db: DatabaseConnection,
}

impl SeaOrmWishlistRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl WishlistRepository for SeaOrmWishlistRepository {
    async fn create(
        &self,
        entry: NewWishlistEntry,
        email: &str,
    ) -> Result<InsertResult, DomainError> {
        let id = new_id();
        let new_entry = ActiveModel {
            id: Set(id.clone()),
            email: Set(email.to_string()),
            book_id: Set(entry.book_id),
            bookname: Set(entry.bookname),
            bookimage: Set(entry.bookimage),
            author: Set(entry.author),
            price: Set(entry.price),
            created_at: Set(now_timestamp()),
        };

        new_entry.insert(&self.db).await?;
        Ok(InsertResult::new(id))
    }

    async fn find_by_email(&self, email: &str) -> Result<Vec<WishlistEntry>, DomainError> {
        Ok(WishlistEntity::find()
            .filter(Column::Email.eq(email))
            .order_by_desc(Column::CreatedAt)
            .all(&self.db)
            .await?)
    }
}
