//! Mount pipeline
//!
//! Connects the document to the controllers and the host:
//!
//! ```text
//! server markup → document → mount (classify, attach) → host events → controllers → host effects
//! ```

pub mod mount;

pub use mount::{mount, mount_with_transport, MountHandle};
