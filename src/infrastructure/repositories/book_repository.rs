//! SeaORM implementation of BookRepository

use async_trait::async_trait;
use sea_orm::sea_query::{Expr, LikeExpr};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};

use super::new_id;
use crate::domain::{
    BookEdit, BookFilter, BookRepository, DeleteResult, DomainError, InsertResult, NewBook,
    UpdateResult,
};
use crate::infrastructure::db::now_timestamp;
use crate::models::Book;
use crate::models::book::{ActiveModel, Column, Entity as BookEntity, fold_bookname};

/// Status given to listings created without one
const DEFAULT_STATUS: &str = "published";

/// Escape LIKE wildcards so user input only ever matches literally.
pub(crate) fn escape_like(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// SeaORM-based implementation of BookRepository
pub struct SeaOrmBookRepository {
    db: DatabaseConnection,
}

impl SeaOrmBookRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl BookRepository for SeaOrmBookRepository {
    async fn find_all(&self, filter: BookFilter) -> Result<Vec<Book>, DomainError> {
        let mut query = BookEntity::find();

        if let Some(text) = &filter.search_text
            && !text.is_empty()
        {
            let pattern = format!("%{}%", escape_like(&fold_bookname(text)));
            query = query.filter(
                Expr::col(Column::BooknameFolded).like(LikeExpr::new(pattern).escape('\\')),
            );
        }

        Ok(query.all(&self.db).await?)
    }

    async fn find_by_owner(&self, email: &str) -> Result<Vec<Book>, DomainError> {
        Ok(BookEntity::find()
            .filter(Column::Email.eq(email))
            .all(&self.db)
            .await?)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Book>, DomainError> {
        Ok(BookEntity::find_by_id(id.to_owned()).one(&self.db).await?)
    }

    async fn find_latest(&self, limit: u64) -> Result<Vec<Book>, DomainError> {
        Ok(BookEntity::find()
            .order_by_desc(Column::Date)
            .limit(limit)
            .all(&self.db)
            .await?)
    }

    async fn create(&self, book: NewBook, owner: &str) -> Result<InsertResult, DomainError> {
        let id = new_id();
        let new_book = ActiveModel {
            id: Set(id.clone()),
            bookname_folded: Set(fold_bookname(&book.bookname)),
            bookname: Set(book.bookname),
            bookimage: Set(book.bookimage),
            author: Set(book.author),
            price: Set(book.price),
            status: Set(book.status.unwrap_or_else(|| DEFAULT_STATUS.to_string())),
            email: Set(owner.to_string()),
            date: Set(now_timestamp()),
        };

        new_book.insert(&self.db).await?;
        Ok(InsertResult::new(id))
    }

    async fn update_details(&self, id: &str, edit: BookEdit) -> Result<UpdateResult, DomainError> {
        let result = BookEntity::update_many()
            .col_expr(Column::BooknameFolded, Expr::value(fold_bookname(&edit.bookname)))
            .col_expr(Column::Bookname, Expr::value(edit.bookname))
            .col_expr(Column::Bookimage, Expr::value(edit.bookimage))
            .col_expr(Column::Author, Expr::value(edit.author))
            .col_expr(Column::Status, Expr::value(edit.status))
            .col_expr(Column::Price, Expr::value(edit.price))
            .filter(Column::Id.eq(id))
            .exec(&self.db)
            .await?;

        Ok(UpdateResult::from_rows(result.rows_affected))
    }

    async fn update_status(&self, id: &str, status: &str) -> Result<UpdateResult, DomainError> {
        let result = BookEntity::update_many()
            .col_expr(Column::Status, Expr::value(status))
            .filter(Column::Id.eq(id))
            .exec(&self.db)
            .await?;

        Ok(UpdateResult::from_rows(result.rows_affected))
    }

    async fn delete(&self, id: &str) -> Result<DeleteResult, DomainError> {
        let result = BookEntity::delete_by_id(id.to_owned())
            .exec(&self.db)
            .await?;

        Ok(DeleteResult::from_rows(result.rows_affected))
    }
}
