pub mod m202610010001_create_users;
pub mod m202610010002_create_courses;
pub mod m202610010003_create_course_selections;
pub mod m202610010004_create_assignments;
pub mod m202610010005_create_submissions;
pub mod m202610010006_create_approval_requests;
pub mod m202610010007_create_notifications;
pub mod m202610010008_create_scores;
pub mod m202610010009_create_user_preferences;
