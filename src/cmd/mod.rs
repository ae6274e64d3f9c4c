pub mod board;
pub mod edit;
pub mod profile;
pub mod show;
pub mod transfer;
