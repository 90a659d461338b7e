//! Code generator for C-INTERCAL.
//!
//! A [`Session`] accumulates the statements of one program.  Callers
//! build expressions with [`base::expr::Expr`], emit statements
//! through the session, use [`Session::if_else`] and
//! [`Session::while_loop`] for structured control flow, and finally
//! take the program text (with [`Session::text`]) to hand to the
//! toolchain in [`toolchain`].
#![deny(unreachable_pub)]
#![deny(unsafe_code)]
#![warn(clippy::must_use_candidate)]
#![warn(clippy::manual_string_new)]
#![warn(clippy::semicolon_if_nothing_returned)]
#![warn(clippy::return_self_not_must_use)]
#![warn(clippy::wildcard_imports)]
#![warn(clippy::clone_on_ref_ptr)]
#![warn(clippy::match_same_arms)]
#![warn(clippy::missing_errors_doc)]
#![warn(clippy::items_after_statements)]
#![warn(clippy::explicit_iter_loop)]
#![warn(clippy::unreadable_literal)]
#![warn(clippy::pedantic)]
#![allow(clippy::doc_markdown)] // fix soon
#![allow(clippy::needless_pass_by_value)] // fix soon

pub mod allocator;
pub mod binio;
pub mod control;
pub mod listing;
pub mod session;
pub mod stdlib;
pub mod toolchain;

pub use binio::BinaryIo;
pub use listing::Listing;
pub use session::Session;
pub use toolchain::{Build, Ick, ToolchainFailure};
