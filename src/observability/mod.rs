//! Span export to a local OTLP JSON file.
//!
//! ```text
//! tracing macros → tracing-opentelemetry → SDK provider → JsonFileExporter → haulboard-otlp.json
//! ```
//!
//! The plugin and its worker each install a subscriber; both append to the
//! same file under the data directory. The file rotates at 10 MB and keeps
//! three backups.
//!
//! Level resolution: `trace_level` from the plugin configuration, else
//! `info`. The value accepts any `EnvFilter` directive, e.g.
//! `haulboard::worker=debug,info`.

mod exporter;
mod file_writer;
mod init;

pub use init::{init_tracing, TRACE_FILE};
