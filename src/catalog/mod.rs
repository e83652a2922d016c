mod config;
mod date;
mod load;
mod record;

pub use config::{CatalogConfig, ColumnMap, ColumnSpec, IconSets, IconSpec};
pub use date::CalendarDate;
pub use load::{load_catalog, load_config, parse_catalog, split_values};
pub use record::{Catalog, ProjectRecord};
