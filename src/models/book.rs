use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "books")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub bookname: String,
    /// Search key, see `fold_bookname`
    #[serde(skip)]
    pub bookname_folded: String,
    pub bookimage: Option<String>,
    pub author: Option<String>,
    pub price: f64,
    pub status: String, // free-form, e.g. 'published', 'unpublished'
    /// Owning librarian
    pub email: String,
    /// Creation timestamp, drives the "latest books" ordering
    pub date: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Unicode lowercase of a book name. Folding happens here rather than in SQL
/// because SQLite's `lower()` and `LIKE` only fold ASCII.
pub fn fold_bookname(bookname: &str) -> String {
    bookname.to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::fold_bookname;

    #[test]
    fn folds_beyond_ascii() {
        assert_eq!(fold_bookname("Émile ou de l'Éducation"), "émile ou de l'éducation");
        assert_eq!(fold_bookname("ВОЙНА и мир"), "война и мир");
        assert_eq!(fold_bookname("Dune"), "dune");
    }
}
