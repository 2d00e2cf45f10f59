pub mod book;
pub mod order;
pub mod payment;
pub mod review;
pub mod user;
pub mod wishlist;

pub type Book = book::Model;
pub type Order = order::Model;
pub type Payment = payment::Model;
pub type Review = review::Model;
pub type User = user::Model;
pub type WishlistEntry = wishlist::Model;
