//! Low-level Proxmox API endpoint calls.
//!
//! Each function performs one HTTP exchange and maps its outcome onto
//! [`crate::error::ClientError`].

mod auth;
mod request;
mod version;

pub use auth::request_ticket;
pub use request::send_request;
pub use version::get_version;
