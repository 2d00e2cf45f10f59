use chrono::{SecondsFormat, Utc};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ColumnTrait, ConnectionTrait, Database, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    Statement,
};

use crate::models::book;

/// Current UTC time with fixed precision, so that text order is time order.
pub fn now_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true)
}

pub async fn init_db(database_url: &str) -> Result<DatabaseConnection, DbErr> {
    let db = Database::connect(database_url).await?;

    // Run migrations manually (simple SQL)
    run_migrations(&db).await?;

    tracing::debug!("Database schema ready");
    Ok(db)
}

async fn execute(db: &DatabaseConnection, sql: &str) -> Result<(), DbErr> {
    db.execute(Statement::from_string(
        db.get_database_backend(),
        sql.to_owned(),
    ))
    .await?;
    Ok(())
}

async fn run_migrations(db: &DatabaseConnection) -> Result<(), DbErr> {
    execute(
        db,
        r#"
        CREATE TABLE IF NOT EXISTS users (
            id TEXT PRIMARY KEY NOT NULL,
            email TEXT NOT NULL,
            name TEXT,
            photo_url TEXT,
            role TEXT NOT NULL DEFAULT 'user',
            created_at TEXT NOT NULL
        )
        "#,
    )
    .await?;
    execute(
        db,
        "CREATE UNIQUE INDEX IF NOT EXISTS idx_users_email ON users(email)",
    )
    .await?;

    execute(
        db,
        r#"
        CREATE TABLE IF NOT EXISTS books (
            id TEXT PRIMARY KEY NOT NULL,
            bookname TEXT NOT NULL,
            bookname_folded TEXT NOT NULL DEFAULT '',
            bookimage TEXT,
            author TEXT,
            price REAL NOT NULL DEFAULT 0,
            status TEXT NOT NULL,
            email TEXT NOT NULL,
            date TEXT NOT NULL
        )
        "#,
    )
    .await?;
    execute(
        db,
        "CREATE INDEX IF NOT EXISTS idx_books_email ON books(email)",
    )
    .await?;
    execute(db, "CREATE INDEX IF NOT EXISTS idx_books_date ON books(date)").await?;
    // Migration: databases created before the search key existed
    let _ = execute(
        db,
        "ALTER TABLE books ADD COLUMN bookname_folded TEXT NOT NULL DEFAULT ''",
    )
    .await;
    backfill_folded_booknames(db).await?;

    execute(
        db,
        r#"
        CREATE TABLE IF NOT EXISTS orders (
            id TEXT PRIMARY KEY NOT NULL,
            book_id TEXT NOT NULL,
            bookname TEXT NOT NULL,
            email TEXT NOT NULL,
            name TEXT,
            phone TEXT,
            address TEXT,
            cost REAL NOT NULL,
            status TEXT NOT NULL DEFAULT 'pending',
            payment TEXT NOT NULL DEFAULT 'unpaid',
            created_at TEXT NOT NULL
        )
        "#,
    )
    .await?;
    execute(
        db,
        "CREATE INDEX IF NOT EXISTS idx_orders_email ON orders(email)",
    )
    .await?;
    execute(
        db,
        "CREATE INDEX IF NOT EXISTS idx_orders_book_id ON orders(book_id)",
    )
    .await?;

    // The unique index on transaction_id is what makes payment recording atomic:
    // two reconciliations of one session cannot both insert.
    execute(
        db,
        r#"
        CREATE TABLE IF NOT EXISTS payments (
            id TEXT PRIMARY KEY NOT NULL,
            transaction_id TEXT NOT NULL,
            email TEXT,
            bookname TEXT NOT NULL,
            amount REAL NOT NULL,
            date TEXT NOT NULL
        )
        "#,
    )
    .await?;
    execute(
        db,
        "CREATE UNIQUE INDEX IF NOT EXISTS idx_payments_transaction_id ON payments(transaction_id)",
    )
    .await?;
    execute(
        db,
        "CREATE INDEX IF NOT EXISTS idx_payments_email ON payments(email)",
    )
    .await?;

    execute(
        db,
        r#"
        CREATE TABLE IF NOT EXISTS wishlist (
            id TEXT PRIMARY KEY NOT NULL,
            email TEXT NOT NULL,
            book_id TEXT,
            bookname TEXT,
            bookimage TEXT,
            author TEXT,
            price REAL,
            created_at TEXT NOT NULL
        )
        "#,
    )
    .await?;
    execute(
        db,
        "CREATE INDEX IF NOT EXISTS idx_wishlist_email ON wishlist(email)",
    )
    .await?;

    execute(
        db,
        r#"
        CREATE TABLE IF NOT EXISTS reviews (
            id TEXT PRIMARY KEY NOT NULL,
            book_id TEXT NOT NULL,
            email TEXT,
            name TEXT,
            rating INTEGER,
            comment TEXT,
            created_at TEXT NOT NULL
        )
        "#,
    )
    .await?;
    execute(
        db,
        "CREATE INDEX IF NOT EXISTS idx_reviews_book_id ON reviews(book_id)",
    )
    .await?;

    Ok(())
}

/// Fill the search key of rows written before it was maintained.
async fn backfill_folded_booknames(db: &DatabaseConnection) -> Result<(), DbErr> {
    let stale = book::Entity::find()
        .filter(book::Column::BooknameFolded.eq(""))
        .filter(book::Column::Bookname.ne(""))
        .all(db)
        .await?;

    for row in stale {
        book::Entity::update_many()
            .col_expr(
                book::Column::BooknameFolded,
                Expr::value(book::fold_bookname(&row.bookname)),
            )
            .filter(book::Column::Id.eq(row.id))
            .exec(db)
            .await?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timestamps_have_fixed_width() {
        let a = now_timestamp();
        let b = now_timestamp();
        assert_eq!(a.len(), b.len());
        assert!(a.ends_with('Z'));
        assert!(a <= b);
    }

    #[tokio::test]
    async fn backfills_search_keys_of_old_rows() {
        let db = init_db("sqlite::memory:").await.expect("Failed to init DB");
        execute(
            &db,
            "INSERT INTO books (id, bookname, price, status, email, date) \
             VALUES ('old-1', 'Émile', 5.0, 'published', 'lib@example.com', '2020-01-01T00:00:00.000000Z')",
        )
        .await
        .unwrap();

        run_migrations(&db).await.unwrap();

        let row = book::Entity::find_by_id("old-1".to_string())
            .one(&db)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(row.bookname_folded, "émile");
    }

    #[tokio::test]
    async fn migrations_are_idempotent() {
        let db = init_db("sqlite::memory:").await.expect("Failed to init DB");
        run_migrations(&db).await.expect("Second migration run failed");
    }
}
