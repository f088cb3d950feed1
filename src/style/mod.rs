//! Theme and layout catalogs.

pub(crate) mod policy;
pub(crate) mod theme;

pub(crate) use policy::CatalogPolicy;
