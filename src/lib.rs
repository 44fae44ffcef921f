//! Tola permalinks - permalink resolution and path-collision handling for
//! generated site files.
//!
//! Every HTML document in a [`FileSet`] is moved to a stable
//! `<dir>/index.html` key derived from its metadata (`:date/:title`) or its
//! source path. Asset files next to a document can travel with it, and
//! references to them are rewritten.
//!
//! ```ignore
//! let config = PermalinkConfig::from_path(Path::new("permalinks.toml"))?;
//! let report = Permalinks::new(&config)?.run(&mut files)?;
//! print_conflicts(&report.conflicts);
//! ```

pub mod address;
pub mod config;
pub mod logger;
pub mod page;
pub mod pipeline;
pub mod utils;

pub use address::{PermalinkError, UniqueOptions, UrlConflict, format_conflicts, print_conflicts};
pub use config::{ConfigError, LinksetConfig, PermalinkConfig, Relative, SlugConfig};
pub use page::{Document, FieldValue, Fields, FileSet, PermalinkOverride};
pub use pipeline::{Permalinks, Relocation, Report};
pub use utils::date::DateTimeUtc;
