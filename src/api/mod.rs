//! HTTP API handlers for profile-board

pub mod board;
pub mod buildinfo;
pub mod health;
pub mod posts;
pub mod profiles;
pub mod settings;
pub mod sse;

pub use board::get_board;
pub use buildinfo::get_build_info;
pub use health::{health_check, heartbeat};
pub use posts::{create_post, delete_post, list_posts_by_author};
pub use profiles::{create_profile, delete_profile, get_profile, list_profiles, update_profile};
pub use settings::{get_board_title, set_board_title};
pub use sse::event_stream;
