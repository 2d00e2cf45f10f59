//! SeaORM implementation of PaymentRepository

use async_trait::async_trait;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};

use super::order_repository::PAYMENT_PAID;
use super::{conflict_or_db, new_id};
use crate::domain::{DomainError, NewPayment, PaymentRepository, UpdateResult};
use crate::infrastructure::db::now_timestamp;
use crate::models::Payment;
use crate::models::order::{Column as OrderColumn, Entity as OrderEntity};
use crate::models::payment::{ActiveModel, Column, Entity as PaymentEntity};

/// SeaORM-based implementation of PaymentRepository
pub struct SeaOrmPaymentRepository {
    db: DatabaseConnection,
}

impl SeaOrmPaymentRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl PaymentRepository for SeaOrmPaymentRepository {
    async fn find_by_transaction_id(
        &self,
        transaction_id: &str,
    ) -> Result<Option<Payment>, DomainError> {
        Ok(PaymentEntity::find()
            .filter(Column::TransactionId.eq(transaction_id))
            .one(&self.db)
            .await?)
    }

    async fn find_by_email(&self, email: &str) -> Result<Vec<Payment>, DomainError> {
        Ok(PaymentEntity::find()
            .filter(Column::Email.eq(email))
            .order_by_desc(Column::Date)
            .all(&self.db)
            .await?)
    }

    async fn record_payment(
        &self,
        payment: NewPayment,
        order_id: &str,
    ) -> Result<UpdateResult, DomainError> {
        // Dropping the transaction without commit rolls both writes back.
        let txn = self.db.begin().await?;

        let new_payment = ActiveModel {
            id: Set(new_id()),
            transaction_id: Set(payment.transaction_id),
            email: Set(payment.email),
            bookname: Set(payment.bookname),
            amount: Set(payment.amount),
            date: Set(now_timestamp()),
        };
        new_payment
            .insert(&txn)
            .await
            .map_err(|e| conflict_or_db(e, "payment already recorded"))?;

        let result = OrderEntity::update_many()
            .col_expr(OrderColumn::Payment, Expr::value(PAYMENT_PAID))
            .filter(OrderColumn::Id.eq(order_id))
            .exec(&txn)
            .await?;

        txn.commit().await?;
        Ok(UpdateResult::from_rows(result.rows_affected))
    }
}
