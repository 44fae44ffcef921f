//! Configuration section definitions.
//!
//! | Module     | TOML                 | Purpose                                |
//! |------------|----------------------|----------------------------------------|
//! | `slug`     | `[slug]`             | Slug options for pattern values        |
//! | `linkset`  | `[[linksets]]`       | Metadata-selected option bundles       |
//! | `relative` | `relative = ...`     | Family policy                          |
//! | `hooks`    | (builder only)       | Caller-supplied transforms             |

mod hooks;
mod linkset;
mod relative;
mod slug;

pub use hooks::{DateFn, Hooks, SlugFn, UniqueFn};
pub use linkset::{LinksetConfig, LinksetFields};
pub use relative::Relative;
pub use slug::SlugConfig;
