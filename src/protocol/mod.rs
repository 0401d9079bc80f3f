//! Line-oriented ASCII command protocol.
//!
//! ```text
//! serial bytes ──▶ LineBuffer ──▶ parser strategies ──▶ Reconfigurator
//!                  (bounded)      (pair, keywords)           │
//!                                                            ▼
//!                  host ◀── ACK + detail / NACK + PARSE_ERROR
//! ```
//!
//! Single-threaded and synchronous per line: a command is fully applied and
//! answered before the next byte is looked at. Parse failures report and
//! mutate nothing.

mod error;
mod handler;
mod line_buffer;
mod parser;

pub use error::ParseError;
pub use handler::{announce_ready, CommandHandler, READY_BANNER};
pub use line_buffer::{LineBuffer, LINE_CAP};
pub use parser::{parse_command, Command};
