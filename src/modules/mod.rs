pub mod auth;
pub mod authors;
pub mod books;
pub mod genres;
pub mod users;
