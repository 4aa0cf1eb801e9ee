pub mod course_analytics_service;
pub mod error;
pub mod notification_service;
