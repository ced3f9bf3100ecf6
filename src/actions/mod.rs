//! File actions module.
//!
//! This module provides functionality for:
//! - Permanent deletion (default)
//! - Safe deletion via trash crate (opt-in)
//! - Confirmation before each removal
//!
//! ```no_run
//! use deduplicate::actions::{delete_path, Confirm, DeleteMethod};
//! use std::io;
//! use std::path::Path;
//!
//! let mut confirm = Confirm::new(io::stdin().lock(), io::stdout(), false);
//! if confirm.ask() {
//!     let _ = delete_path(Path::new("/path/to/duplicate.txt"), DeleteMethod::Trash);
//! }
//! ```

pub mod confirm;
pub mod delete;

// Re-export commonly used types
pub use confirm::Confirm;
pub use delete::{
    delete_batch, delete_path, delete_to_trash, permanent_delete, removal_paths,
    BatchDeleteResult, DeleteError, DeleteMethod, DeleteResult,
};
