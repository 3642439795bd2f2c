//! Helpers shared by the entities and the library.
//!
//! - `ids`: sequential `PREFIX_0001` identifiers
//! - `criteria`: field=value record matching
//! - `dates`: report date formatting

pub mod criteria;
pub mod dates;
pub mod ids;

pub use criteria::{search_items, Criteria, Record, SearchField, UnknownField};
pub use dates::format_date;
pub use ids::{generate_id, IdError};
