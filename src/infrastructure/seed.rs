//! Demo data for local development (`SEED_DEMO=1`)

use sea_orm::sea_query::OnConflict;
use sea_orm::*;

use crate::domain::Role;
use crate::infrastructure::db::now_timestamp;
use crate::infrastructure::repositories::new_id;
use crate::models::{book, user};

pub const DEMO_ADMIN: &str = "admin@bookcourier.dev";
pub const DEMO_LIBRARIAN: &str = "librarian@bookcourier.dev";
pub const DEMO_USER: &str = "reader@bookcourier.dev";

pub async fn seed_demo_data(db: &DatabaseConnection) -> Result<(), DbErr> {
    // 1. Accounts, one per role. Existing emails are left alone.
    let accounts = [
        (DEMO_ADMIN, "Demo Admin", Role::Admin),
        (DEMO_LIBRARIAN, "Demo Librarian", Role::Librarian),
        (DEMO_USER, "Demo Reader", Role::User),
    ];

    for (email, name, role) in accounts {
        let account = user::ActiveModel {
            id: Set(new_id()),
            email: Set(email.to_owned()),
            name: Set(Some(name.to_owned())),
            photo_url: Set(None),
            role: Set(role.as_str().to_owned()),
            created_at: Set(now_timestamp()),
        };

        user::Entity::insert(account)
            .on_conflict(OnConflict::column(user::Column::Email).do_nothing().to_owned())
            .exec_without_returning(db)
            .await?;
    }

    // 2. A small catalog for the demo librarian, only on first run
    let listed = book::Entity::find()
        .filter(book::Column::Email.eq(DEMO_LIBRARIAN))
        .count(db)
        .await?;
    if listed > 0 {
        return Ok(());
    }

    let catalog = [
        ("Dune", "Frank Herbert", 18.0),
        ("Foundation", "Isaac Asimov", 12.5),
        ("The Hobbit", "J.R.R. Tolkien", 10.0),
        ("The Left Hand of Darkness", "Ursula K. Le Guin", 14.0),
        ("Neuromancer", "William Gibson", 11.0),
    ];

    for (bookname, author, price) in catalog {
        let listing = book::ActiveModel {
            id: Set(new_id()),
            bookname: Set(bookname.to_owned()),
            bookname_folded: Set(book::fold_bookname(bookname)),
            bookimage: Set(None),
            author: Set(Some(author.to_owned())),
            price: Set(price),
            status: Set("published".to_owned()),
            email: Set(DEMO_LIBRARIAN.to_owned()),
            date: Set(now_timestamp()),
        };
        listing.insert(db).await?;
    }

    Ok(())
}
