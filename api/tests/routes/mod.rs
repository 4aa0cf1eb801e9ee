mod analytics_test;
mod approvals_test;
mod assignments_test;
mod auth_test;
mod courses_test;
mod notifications_test;
mod submissions_test;
mod todos_test;
