//! metabolab-tables — Query logic behind the site's data tables.
//!
//!   - `query`     — group filter, case-insensitive search, toggled column sort
//!   - `reactions` — reaction-product rows derived from the reaction catalog
//!   - `compounds` — compound library rows

pub mod query;
pub mod reactions;
pub mod compounds;

pub use query::{Cell, SortDirection, TableQuery, TableRow};
pub use reactions::{Reaction, ReactionCatalog, ReactionField, ReactionGroup, ReactionRow};
pub use compounds::{Compound, CompoundField, CompoundLibrary};
