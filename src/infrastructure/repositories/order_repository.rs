//! SeaORM implementation of OrderRepository

use async_trait::async_trait;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};

use super::new_id;
use crate::domain::{
    DeleteResult, DomainError, InsertResult, NewOrder, OrderRepository, UpdateResult,
};
use crate::infrastructure::db::now_timestamp;
use crate::models::Order;
use crate::models::order::{ActiveModel, Column, Entity as OrderEntity};

pub const STATUS_PENDING: &str = "pending";
pub const PAYMENT_UNPAID: &str = "unpaid";
pub const PAYMENT_PAID: &str = "paid";

/// SeaORM-based implementation of OrderRepository
pub struct SeaOrmOrderRepository {
    db: DatabaseConnection,
}

impl SeaOrmOrderRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl OrderRepository for SeaOrmOrderRepository {
    async fn create(&self, order: NewOrder, buyer: &str) -> Result<InsertResult, DomainError> {
        let id = new_id();
        let new_order = ActiveModel {
            id: Set(id.clone()),
            book_id: Set(order.book_id),
            bookname: Set(order.bookname),
            email: Set(buyer.to_string()),
            name: Set(order.name),
            phone: Set(order.phone),
            address: Set(order.address),
            cost: Set(order.cost),
            status: Set(STATUS_PENDING.to_string()),
            payment: Set(PAYMENT_UNPAID.to_string()),
            created_at: Set(now_timestamp()),
        };

        new_order.insert(&self.db).await?;
        Ok(InsertResult::new(id))
    }

    async fn find_by_email(&self, email: &str) -> Result<Vec<Order>, DomainError> {
        Ok(OrderEntity::find()
            .filter(Column::Email.eq(email))
            .order_by_desc(Column::CreatedAt)
            .all(&self.db)
            .await?)
    }

    async fn find_all(&self) -> Result<Vec<Order>, DomainError> {
        Ok(OrderEntity::find()
            .order_by_desc(Column::CreatedAt)
            .all(&self.db)
            .await?)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Order>, DomainError> {
        Ok(OrderEntity::find_by_id(id.to_owned())
            .one(&self.db)
            .await?)
    }

    async fn update_status(&self, id: &str, status: &str) -> Result<UpdateResult, DomainError> {
        let result = OrderEntity::update_many()
            .col_expr(Column::Status, Expr::value(status))
            .filter(Column::Id.eq(id))
            .exec(&self.db)
            .await?;

        Ok(UpdateResult::from_rows(result.rows_affected))
    }

    async fn delete_one_by_book_id(&self, book_id: &str) -> Result<DeleteResult, DomainError> {
        let Some(order) = OrderEntity::find()
            .filter(Column::BookId.eq(book_id))
            .one(&self.db)
            .await?
        else {
            return Ok(DeleteResult::from_rows(0));
        };

        let result = OrderEntity::delete_by_id(order.id).exec(&self.db).await?;
        Ok(DeleteResult::from_rows(result.rows_affected))
    }
}
