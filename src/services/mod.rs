//! Application service layer.
//!
//! The service owns the live phonebook state and is the only surface that
//! mutates it. It sits between the console front end and the storage port.

mod phone_book_service;

pub use phone_book_service::PhoneBookService;
