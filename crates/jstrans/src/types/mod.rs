mod catalog;
mod value;

pub use catalog::{
    Catalog, CatalogEntry, CatalogFile, CatalogMessage, MessageKey, NormalizedCatalog, RawCatalog,
    Translation,
};
pub use value::Value;
