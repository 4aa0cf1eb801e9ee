pub mod auth;
pub mod bootstrap;
pub mod response;
pub mod routes;
