//! Login feature slice.
//!
//! - `state.rs`: form fields, focus, and submit status
//! - `update.rs`: key handling and result transitions
//! - `render.rs`: login card

mod render;
mod state;
mod update;

pub use render::render_login;
pub use state::{LoginField, LoginState, LoginStatus};
pub use update::{REQUIRED_MESSAGE, handle_key, handle_login_failed, handle_paste, submit};
