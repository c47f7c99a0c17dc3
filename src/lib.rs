#![doc = include_str!("../README.md")]

pub use crate::config::Config;
pub use crate::error::{Error, ErrorKind};
pub use crate::filter::{should_alert, AlertCheck};
pub use crate::handler::{AlertHandler, InvocationSummary};
pub use crate::loader::{decode_log_file, LocalStore, ObjectStore, RecordLoader};
pub use crate::notify::{AlertMessage, Notifier};
pub use crate::types::*;

pub mod aws;
pub mod config;
pub mod error;
pub mod filter;
pub mod handler;
pub mod loader;
pub mod notify;
pub mod types;
