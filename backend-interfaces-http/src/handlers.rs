pub mod ops_handlers;
pub mod schedule_handlers;
pub mod subscription_handlers;
