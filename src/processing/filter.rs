// Filter operations over trade records
// Author: Gabriel Demetrios Lafis

use std::collections::BTreeSet;
use std::fmt;

use log::debug;

use super::FilteredView;
use crate::data::{Direction, Record};

/// Selection value meaning "no constraint" in single-choice filters
pub const ALL: &str = "All";

/// A single equality or membership test on a record
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    CountryIn(BTreeSet<String>),
    ProductEquals(String),
    CategoryEquals(String),
    DirectionEquals(Direction),
}

impl Predicate {
    /// Check whether a record satisfies the predicate
    pub fn matches(&self, record: &Record) -> bool {
        match self {
            Predicate::CountryIn(countries) => countries.contains(&record.country),
            Predicate::ProductEquals(product) => &record.product == product,
            Predicate::CategoryEquals(category) => &record.category == category,
            Predicate::DirectionEquals(direction) => record.direction == *direction,
        }
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Predicate::CountryIn(countries) => {
                let names: Vec<&str> = countries.iter().map(String::as_str).collect();
                write!(f, "Country in [{}]", names.join(", "))
            }
            Predicate::ProductEquals(product) => write!(f, "Product = {}", product),
            Predicate::CategoryEquals(category) => write!(f, "Category = {}", category),
            Predicate::DirectionEquals(direction) => write!(f, "Import_Export = {}", direction),
        }
    }
}

/// User filter selections.
///
/// Every field is optional; an unset field places no constraint and the
/// set fields are combined with AND.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterSpec {
    pub countries: BTreeSet<String>,
    pub product: Option<String>,
    pub category: Option<String>,
    pub direction: Option<Direction>,
}

impl FilterSpec {
    /// Create a filter that matches everything
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict to the given countries
    pub fn countries<I, S>(mut self, countries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.countries.extend(countries.into_iter().map(Into::into));
        self
    }

    /// Restrict to a single country; `"All"` leaves the filter unchanged
    pub fn country(self, country: &str) -> Self {
        if country == ALL {
            self
        } else {
            self.countries([country])
        }
    }

    /// Restrict to one product; `"All"` clears the constraint
    pub fn product(mut self, product: &str) -> Self {
        self.product = selection(product);
        self
    }

    /// Restrict to one category; `"All"` clears the constraint
    pub fn category(mut self, category: &str) -> Self {
        self.category = selection(category);
        self
    }

    /// Restrict to a trade direction; `None` clears the constraint
    pub fn direction(mut self, direction: Option<Direction>) -> Self {
        self.direction = direction;
        self
    }

    /// Check whether the filter places no constraint at all
    pub fn is_empty(&self) -> bool {
        self.countries.is_empty()
            && self.product.is_none()
            && self.category.is_none()
            && self.direction.is_none()
    }

    /// The active predicates of this filter
    pub fn predicates(&self) -> Vec<Predicate> {
        let mut predicates = Vec::new();

        if !self.countries.is_empty() {
            predicates.push(Predicate::CountryIn(self.countries.clone()));
        }
        if let Some(product) = &self.product {
            predicates.push(Predicate::ProductEquals(product.clone()));
        }
        if let Some(category) = &self.category {
            predicates.push(Predicate::CategoryEquals(category.clone()));
        }
        if let Some(direction) = self.direction {
            predicates.push(Predicate::DirectionEquals(direction));
        }

        predicates
    }

    /// Check whether a record passes every active predicate
    pub fn matches(&self, record: &Record) -> bool {
        (self.countries.is_empty() || self.countries.contains(&record.country))
            && self.product.as_ref().map_or(true, |p| &record.product == p)
            && self.category.as_ref().map_or(true, |c| &record.category == c)
            && self.direction.map_or(true, |d| record.direction == d)
    }

    /// Keep the records that pass the filter, in input order
    pub fn apply<'a, I>(&self, records: I) -> FilteredView<'a>
    where
        I: IntoIterator<Item = &'a Record>,
    {
        let kept: Vec<&'a Record> = records.into_iter().filter(|r| self.matches(r)).collect();

        debug!("Filter kept {} records ({} active predicates)", kept.len(), self.predicates().len());
        FilteredView::new(kept)
    }
}

/// Apply a filter to a dataset or to a previously filtered view
pub fn apply<'a, I>(records: I, spec: &FilterSpec) -> FilteredView<'a>
where
    I: IntoIterator<Item = &'a Record>,
{
    spec.apply(records)
}

fn selection(value: &str) -> Option<String> {
    if value == ALL {
        None
    } else {
        Some(value.to_string())
    }
}
