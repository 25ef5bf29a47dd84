pub mod app_info;
pub mod users;
