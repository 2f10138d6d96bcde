// Processing module for filtering and summarizing trade records
// Author: Gabriel Demetrios Lafis

mod aggregate;
mod filter;
mod stats;

pub use aggregate::*;
pub use filter::*;
pub use stats::*;

use crate::data::Record;

/// An ordered subsequence of a dataset.
///
/// Views borrow their records, so they are cheap to build on every
/// selection change and can never modify the dataset behind them.
#[derive(Debug, Clone, PartialEq)]
pub struct FilteredView<'a> {
    records: Vec<&'a Record>,
}

impl<'a> FilteredView<'a> {
    /// Create a view over the given records, in the given order
    pub fn new(records: Vec<&'a Record>) -> Self {
        FilteredView { records }
    }

    /// Get the number of records in the view
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check if the view is empty
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Get a record by position in the view
    pub fn get(&self, index: usize) -> Option<&'a Record> {
        self.records.get(index).copied()
    }

    /// The records of the view, in order
    pub fn records(&self) -> &[&'a Record] {
        &self.records
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a Record> + '_ {
        self.records.iter().copied()
    }

    /// Copy the viewed records out of the dataset
    pub fn to_records(&self) -> Vec<Record> {
        self.records.iter().map(|r| (*r).clone()).collect()
    }
}

impl<'v, 'a> IntoIterator for &'v FilteredView<'a> {
    type Item = &'a Record;
    type IntoIter = std::iter::Copied<std::slice::Iter<'v, &'a Record>>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter().copied()
    }
}
