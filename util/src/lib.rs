pub mod config;
pub mod paging;
pub mod state;
