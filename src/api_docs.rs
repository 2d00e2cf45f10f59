use crate::api;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        api::health::health_check,
        api::users::get_user_role,
        api::books::list_books,
        api::books::get_book,
        api::books::latest_books,
        api::reviews::book_reviews,
    ),
    tags(
        (name = "book-courier", description = "Book Courier API")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn documents_public_reads() {
        let doc = ApiDoc::openapi();
        for path in ["/health", "/allbooks", "/latest-book", "/reviews/{id}"] {
            assert!(doc.paths.paths.contains_key(path), "missing {}", path);
        }
    }
}
