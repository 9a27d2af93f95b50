pub mod api;
pub mod models;

pub use models::{Account, Credentials, Message, NewAccount, NewMessage};
