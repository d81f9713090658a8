//! Tool definitions - one file per tool.
//!
//! Each tool wraps exactly one Feedly endpoint and defines its parameters
//! struct, `execute()`, `create_route()` (STDIO) and `http_handler()` (HTTP).

pub mod autocomplete;
pub mod collect;
pub mod common;
pub mod entity_lookup;
pub mod search;

pub use autocomplete::AutocompleteTool;
pub use collect::CollectTool;
pub use entity_lookup::EntityLookupTool;
pub use search::SearchTool;
