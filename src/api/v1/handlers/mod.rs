pub mod app_info;
pub mod health;
pub mod users;
