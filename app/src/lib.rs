//! Virtual car collection manager: a single-user terminal app over a local
//! SQLite store. The [`backend`] module owns persistence and business
//! logic; the [`shell`] module is the interactive menu on top of it.

pub mod backend;
pub mod shell;
