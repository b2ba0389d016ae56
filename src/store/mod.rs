//! Persistence for waterlog.
//! The basic idea is:
//!  - The intake log is append-only; one JSON-lines file per calendar day
//!    under the `records` directory, named by the event's day floor.
//!  - Settings are a singleton JSON document, replaced wholesale on save.
//!  - Both sit behind traits so commands and the daemon receive explicitly
//!    constructed handles instead of reaching for a global.

pub mod entities;
pub mod intake;
pub mod settings;
