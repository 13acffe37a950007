pub mod auth;
pub mod generate;
pub mod history;
pub mod modify;
