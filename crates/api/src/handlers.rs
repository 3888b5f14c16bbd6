pub mod attendance;
pub mod billing;
pub mod children;
pub mod services;
pub mod slots;
pub mod subscriptions;
