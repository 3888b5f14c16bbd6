pub mod child;
pub mod service;
pub mod session;
pub mod slot;
pub mod subscription;
pub mod weekly_schedule;
