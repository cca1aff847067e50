pub mod application;
pub mod favorite;
pub mod pet;
pub mod user;
