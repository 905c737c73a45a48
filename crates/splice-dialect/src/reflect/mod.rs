//! Metadata extractors.
//!
//! Each extractor issues its catalog queries in sequence on the connection
//! it is given and shapes the rows into descriptors. Nothing is cached here;
//! see [`crate::inspector`] for per-pass caching.
//!
//! - [`tables`]: schema, table, and view names, view text, existence checks
//! - [`columns`]: column descriptors
//! - [`keys`]: primary, outgoing foreign, and incoming foreign keys
//! - [`indexes`]: index descriptors

pub mod columns;
pub mod indexes;
pub mod keys;
pub mod tables;

use crate::core::identifier::normalize_name;

/// The schema a reflection call targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scope<'a> {
    /// Schema named by the caller, in the caller's case.
    pub schema: Option<&'a str>,
    /// Default schema of the connection, in catalog case.
    pub default_schema: &'a str,
}

impl<'a> Scope<'a> {
    pub fn new(schema: Option<&'a str>, default_schema: &'a str) -> Self {
        Self {
            schema,
            default_schema,
        }
    }

    /// The schema to query. Schema names are always upper-cased for the
    /// catalog, whatever case the caller used.
    pub fn catalog_schema(&self) -> String {
        self.schema.unwrap_or(self.default_schema).to_uppercase()
    }

    /// Schema name as reported back to the caller.
    pub fn caller_schema(&self) -> Option<String> {
        self.schema.map(normalize_name)
    }

    /// Report a schema found in a catalog row, hiding the default schema
    /// when the caller did not name one.
    pub fn report_schema(&self, catalog_schema: Option<&str>) -> Option<String> {
        let schema = normalize_name(catalog_schema?);
        if self.schema.is_none() && schema == normalize_name(self.default_schema) {
            None
        } else {
            Some(schema)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_schema_defaults() {
        assert_eq!(Scope::new(None, "SPLICE").catalog_schema(), "SPLICE");
        assert_eq!(Scope::new(Some("app"), "SPLICE").catalog_schema(), "APP");
        assert_eq!(Scope::new(Some("App"), "SPLICE").catalog_schema(), "APP");
    }

    #[test]
    fn test_report_schema_elides_default_only_when_implicit() {
        let implicit = Scope::new(None, "SPLICE");
        assert_eq!(implicit.report_schema(Some("SPLICE")), None);
        assert_eq!(implicit.report_schema(Some("APP")).as_deref(), Some("app"));
        assert_eq!(implicit.report_schema(None), None);

        let explicit = Scope::new(Some("splice"), "SPLICE");
        assert_eq!(explicit.report_schema(Some("SPLICE")).as_deref(), Some("splice"));
        assert_eq!(explicit.caller_schema().as_deref(), Some("splice"));
    }
}
