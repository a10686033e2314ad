pub mod rotation_queries;
pub mod schedule_queries;
pub mod subscription_queries;
