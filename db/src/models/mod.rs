pub mod approval_request;
pub mod assignment;
pub mod course;
pub mod course_selection;
pub mod notification;
pub mod score;
pub mod submission;
pub mod user;
pub mod user_preference;
