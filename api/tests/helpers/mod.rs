
pub use app::{body_json, create_user, make_test_app, published_course, send, token_for};
