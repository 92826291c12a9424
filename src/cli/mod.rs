//! CLI module for chatstream.
//!
//! - Argument parsing
//! - Version display
//! - Incremental transcript printing for the interactive session
//!
//! # Usage
//!
//! ```ignore
//! use chatstream::cli::{parse_args, CliCommand};
//!
//! let args = parse_args(std::env::args());
//! if args.command == CliCommand::Version {
//!     chatstream::cli::handle_version_command();
//! }
//! ```

pub mod args;
pub mod printer;
pub mod version;

pub use args::{parse_args, CliArgs, CliCommand};
pub use printer::TranscriptPrinter;
pub use version::{handle_version_command, VERSION};
