//! SeaORM implementation of UserRepository

use async_trait::async_trait;
use sea_orm::sea_query::Expr;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};

use super::{conflict_or_db, new_id};
use crate::domain::{DomainError, InsertResult, NewUser, Role, UpdateResult, UserRepository};
use crate::infrastructure::db::now_timestamp;
use crate::models::User;
use crate::models::user::{ActiveModel, Column, Entity as UserEntity};

/// SeaORM-based implementation of UserRepository
pub struct SeaOrmUserRepository {
    db: DatabaseConnection,
}

impl SeaOrmUserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepository for SeaOrmUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        Ok(UserEntity::find()
            .filter(Column::Email.eq(email))
            .one(&self.db)
            .await?)
    }

    async fn find_all(&self) -> Result<Vec<User>, DomainError> {
        Ok(UserEntity::find().all(&self.db).await?)
    }

    async fn create(&self, user: NewUser) -> Result<InsertResult, DomainError> {
        let id = new_id();
        let new_user = ActiveModel {
            id: Set(id.clone()),
            email: Set(user.email),
            name: Set(user.name),
            photo_url: Set(user.photo_url),
            role: Set(Role::User.as_str().to_string()),
            created_at: Set(now_timestamp()),
        };

        new_user
            .insert(&self.db)
            .await
            .map_err(|e| conflict_or_db(e, "user already exist"))?;

        Ok(InsertResult::new(id))
    }

    async fn update_role(&self, id: &str, role: Role) -> Result<UpdateResult, DomainError> {
        let result = UserEntity::update_many()
            .col_expr(Column::Role, Expr::value(role.as_str()))
            .filter(Column::Id.eq(id))
            .exec(&self.db)
            .await?;

        Ok(UpdateResult::from_rows(result.rows_affected))
    }
}
