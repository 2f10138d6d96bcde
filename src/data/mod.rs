// Data module for trade records, sources and sinks
// Author: Gabriel Demetrios Lafis

mod csv;
mod loader;
mod schema;

pub use self::csv::*;
pub use loader::*;
pub use schema::*;

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use thiserror::Error;

use crate::processing::FilteredView;
use crate::storage::ExportError;

/// Represents a source of trade records
pub trait DataSource {
    /// Read every record from the source, in source order
    fn read(&self) -> Result<Vec<Record>, LoadError>;

    /// Get the source name
    fn name(&self) -> &str;
}

/// Represents a destination for trade records
pub trait DataSink {
    /// Write the records and return how many were written
    fn write(&self, records: &[&Record]) -> Result<usize, ExportError>;

    /// Get the sink name
    fn name(&self) -> &str;
}

/// The sampled trade dataset.
///
/// Records are held behind an `Arc` and never handed out mutably, so a
/// dataset can be cloned into every consumer without copying rows.
#[derive(Debug, Clone)]
pub struct Dataset {
    records: Arc<[Record]>,
    pub metadata: Metadata,
}

impl Dataset {
    /// Create a dataset from records in their final order
    pub fn from_records(records: Vec<Record>) -> Self {
        Dataset {
            records: records.into(),
            metadata: Metadata::new(),
        }
    }

    /// Attach metadata, consuming the dataset
    pub fn with_metadata(mut self, metadata: Metadata) -> Self {
        self.metadata = metadata;
        self
    }

    /// Get the number of records in the dataset
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check if the dataset is empty
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Get a reference to a record by index
    pub fn get(&self, index: usize) -> Option<&Record> {
        self.records.get(index)
    }

    /// All records, in sample order
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }

    /// A view over every record of the dataset
    pub fn view(&self) -> FilteredView<'_> {
        FilteredView::new(self.records.iter().collect())
    }
}

impl<'a> IntoIterator for &'a Dataset {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

/// Represents metadata for a dataset
#[derive(Debug, Clone, Default)]
pub struct Metadata {
    pub properties: HashMap<String, String>,
}

impl Metadata {
    /// Create new empty metadata
    pub fn new() -> Self {
        Metadata {
            properties: HashMap::new(),
        }
    }

    /// Add a property to the metadata
    pub fn add(&mut self, key: &str, value: String) {
        self.properties.insert(key.to_string(), value);
    }

    /// Get a property from the metadata
    pub fn get(&self, key: &str) -> Option<&String> {
        self.properties.get(key)
    }
}

/// Errors raised while loading the dataset
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("source not found: {}", .0.display())]
    SourceNotFound(PathBuf),
    #[error("insufficient data: source has {available} records, sample needs {requested}")]
    InsufficientData { available: usize, requested: usize },
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("parse error: {0}")]
    Parse(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    /// Build a record with the given categorical and numeric values
    pub fn record(country: &str, product: &str, category: &str, quantity: i64) -> Record {
        Record {
            transaction_id: None,
            country: country.to_string(),
            product: product.to_string(),
            direction: Direction::Import,
            quantity,
            value: quantity as f64 * 10.0,
            date: None,
            category: category.to_string(),
            port: "Port A".to_string(),
            customs_code: None,
            weight: quantity as f64 / 2.0,
            shipping_method: ShippingMethod::Air,
            supplier: "Supplier".to_string(),
            customer: "Customer".to_string(),
            invoice_number: None,
            payment_terms: PaymentTerms::Prepaid,
        }
    }
}
