// Frequency and grouped aggregates over trade records
// Author: Gabriel Demetrios Lafis

use std::collections::{BTreeSet, HashMap};
use std::fmt;

use super::FilteredView;
use crate::data::{CategoricalField, Field, NumericField};

/// Count each distinct value of a field, in order of first appearance
pub fn value_counts<'a>(view: &FilteredView<'a>, field: CategoricalField) -> Vec<(&'a str, usize)> {
    let mut index: HashMap<&'a str, usize> = HashMap::new();
    let mut counts: Vec<(&'a str, usize)> = Vec::new();

    for record in view {
        let value = record.text(field);
        match index.get(value) {
            Some(&i) => counts[i].1 += 1,
            None => {
                index.insert(value, counts.len());
                counts.push((value, 1));
            }
        }
    }

    counts
}

/// The `n` most frequent values, most frequent first.
///
/// Values with equal counts keep their order of first appearance.
pub fn top_n(view: &FilteredView, field: CategoricalField, n: usize) -> Vec<(String, usize)> {
    let mut counts = value_counts(view, field);
    // sort_by is stable, which gives the first-appearance tie-break
    counts.sort_by(|a, b| b.1.cmp(&a.1));

    counts
        .into_iter()
        .take(n)
        .map(|(value, count)| (value.to_string(), count))
        .collect()
}

/// Most frequent value of a field, `None` for an empty view
pub fn mode(view: &FilteredView, field: CategoricalField) -> Option<String> {
    top_n(view, field, 1).into_iter().next().map(|(value, _)| value)
}

/// Number of distinct values of a field
pub fn n_unique(view: &FilteredView, field: CategoricalField) -> usize {
    value_counts(view, field).len()
}

/// Distinct values of a field, in order of first appearance
pub fn unique(view: &FilteredView, field: CategoricalField) -> Vec<String> {
    value_counts(view, field)
        .into_iter()
        .map(|(value, _)| value.to_string())
        .collect()
}

/// Smallest and largest value of a field
#[derive(Debug, Clone, PartialEq)]
pub enum Extreme {
    Text { min: String, max: String },
    Numeric { min: f64, max: f64 },
}

impl fmt::Display for Extreme {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Extreme::Text { min, max } => write!(f, "{} .. {}", min, max),
            Extreme::Numeric { min, max } => write!(f, "{} .. {}", min, max),
        }
    }
}

/// Minimum and maximum of each field; `None` where the view is empty.
///
/// Categorical fields compare as strings, numeric fields as numbers.
pub fn extremes(view: &FilteredView, fields: &[Field]) -> Vec<(Field, Option<Extreme>)> {
    fields
        .iter()
        .map(|&field| (field, extreme(view, field)))
        .collect()
}

fn extreme(view: &FilteredView, field: Field) -> Option<Extreme> {
    match field {
        Field::Categorical(f) => {
            let min = view.iter().map(|r| r.text(f)).min()?;
            let max = view.iter().map(|r| r.text(f)).max()?;
            Some(Extreme::Text {
                min: min.to_string(),
                max: max.to_string(),
            })
        }
        Field::Numeric(f) => {
            let min = view.iter().map(|r| r.number(f)).min_by(|a, b| a.total_cmp(b))?;
            let max = view.iter().map(|r| r.number(f)).max_by(|a, b| a.total_cmp(b))?;
            Some(Extreme::Numeric { min, max })
        }
    }
}

/// Headline metrics shown above the analysis charts
#[derive(Debug, Clone, PartialEq)]
pub struct HeadlineMetrics {
    pub total_records: usize,
    pub unique_products: usize,
    pub unique_countries: usize,
    pub top_shipping_method: Option<String>,
    pub top_product: Option<String>,
}

/// Compute the headline metrics of a view
pub fn headline(view: &FilteredView) -> HeadlineMetrics {
    HeadlineMetrics {
        total_records: view.len(),
        unique_products: n_unique(view, CategoricalField::Product),
        unique_countries: n_unique(view, CategoricalField::Country),
        top_shipping_method: mode(view, CategoricalField::ShippingMethod),
        top_product: mode(view, CategoricalField::Product),
    }
}

/// Aggregation applied to a numeric field within each group
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Aggregation {
    Count,
    Sum,
    Mean,
    Min,
    Max,
}

#[derive(Debug, Clone, Copy)]
struct Accumulator {
    count: usize,
    sum: f64,
    min: f64,
    max: f64,
}

impl Accumulator {
    fn new() -> Self {
        Accumulator {
            count: 0,
            sum: 0.0,
            min: f64::INFINITY,
            max: f64::NEG_INFINITY,
        }
    }

    fn update(&mut self, value: f64) {
        self.count += 1;
        self.sum += value;
        self.min = self.min.min(value);
        self.max = self.max.max(value);
    }

    fn finalize(&self, aggregation: Aggregation) -> f64 {
        match aggregation {
            Aggregation::Count => self.count as f64,
            Aggregation::Sum => self.sum,
            Aggregation::Mean => self.sum / self.count as f64,
            Aggregation::Min => self.min,
            Aggregation::Max => self.max,
        }
    }
}

/// Aggregate a numeric field per distinct key, keys in first-appearance order
pub fn group_aggregate(
    view: &FilteredView,
    key: CategoricalField,
    value: NumericField,
    aggregation: Aggregation,
) -> Vec<(String, f64)> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut groups: Vec<(&str, Accumulator)> = Vec::new();

    for record in view {
        let k = record.text(key);
        let i = *index.entry(k).or_insert_with(|| {
            groups.push((k, Accumulator::new()));
            groups.len() - 1
        });
        groups[i].1.update(record.number(value));
    }

    groups
        .into_iter()
        .map(|(k, acc)| (k.to_string(), acc.finalize(aggregation)))
        .collect()
}

/// Order grouped results by value, largest first; equal values keep their order
pub fn rank_desc(mut groups: Vec<(String, f64)>) -> Vec<(String, f64)> {
    groups.sort_by(|a, b| b.1.total_cmp(&a.1));
    groups
}

/// Record counts for every pair of values of two fields
#[derive(Debug, Clone, PartialEq)]
pub struct CrossTab {
    pub rows: Vec<String>,
    pub columns: Vec<String>,
    pub counts: Vec<Vec<usize>>,
}

impl CrossTab {
    /// Count for a row and column value, zero when either is absent
    pub fn get(&self, row: &str, column: &str) -> usize {
        let r = self.rows.iter().position(|v| v == row);
        let c = self.columns.iter().position(|v| v == column);
        match (r, c) {
            (Some(r), Some(c)) => self.counts[r][c],
            _ => 0,
        }
    }

    /// Total count of one row
    pub fn row_total(&self, row: &str) -> usize {
        self.rows
            .iter()
            .position(|v| v == row)
            .map_or(0, |r| self.counts[r].iter().sum())
    }
}

/// Count records by two fields, row and column keys sorted as strings
pub fn crosstab(view: &FilteredView, rows: CategoricalField, columns: CategoricalField) -> CrossTab {
    let row_keys: Vec<String> = view
        .iter()
        .map(|r| r.text(rows))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect();
    let column_keys: Vec<String> = view
        .iter()
        .map(|r| r.text(columns))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect();

    let mut counts = vec![vec![0usize; column_keys.len()]; row_keys.len()];
    for record in view {
        // Keys were collected from this same view, so both lookups succeed.
        if let (Ok(r), Ok(c)) = (
            row_keys.binary_search_by(|k| k.as_str().cmp(record.text(rows))),
            column_keys.binary_search_by(|k| k.as_str().cmp(record.text(columns))),
        ) {
            counts[r][c] += 1;
        }
    }

    CrossTab {
        rows: row_keys,
        columns: column_keys,
        counts,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::fixtures::record;
    use crate::data::{Dataset, PaymentTerms, Record, ShippingMethod};

    fn shipped(method: ShippingMethod, count: usize) -> Vec<Record> {
        (0..count)
            .map(|_| {
                let mut r = record("A", "p", "c", 1);
                r.shipping_method = method;
                r
            })
            .collect()
    }

    fn countries(names: &[&str]) -> Dataset {
        Dataset::from_records(
            names
                .iter()
                .enumerate()
                .map(|(i, c)| record(c, "p", "c", i as i64))
                .collect(),
        )
    }

    #[test]
    fn test_mode_of_shipping_method() {
        let mut records = shipped(ShippingMethod::Land, 900);
        records.extend(shipped(ShippingMethod::Air, 1200));
        records.extend(shipped(ShippingMethod::Sea, 901));
        let dataset = Dataset::from_records(records);

        assert_eq!(dataset.len(), 3001);
        assert_eq!(
            mode(&dataset.view(), CategoricalField::ShippingMethod).as_deref(),
            Some("Air")
        );
    }

    #[test]
    fn test_mode_tie_goes_to_first_seen() {
        let dataset = countries(&["B", "A", "A", "B", "C"]);

        assert_eq!(mode(&dataset.view(), CategoricalField::Country).as_deref(), Some("B"));
    }

    #[test]
    fn test_mode_of_empty_view() {
        let dataset = countries(&[]);

        assert_eq!(mode(&dataset.view(), CategoricalField::Country), None);
    }

    #[test]
    fn test_top_n_orders_by_count_then_first_seen() {
        let dataset = countries(&["C", "A", "B", "A", "B", "D", "A"]);
        let top = top_n(&dataset.view(), CategoricalField::Country, 3);

        assert_eq!(
            top,
            vec![
                ("A".to_string(), 3),
                ("B".to_string(), 2),
                ("C".to_string(), 1)
            ]
        );
        assert!(top.iter().map(|(_, c)| c).sum::<usize>() <= dataset.len());
    }

    #[test]
    fn test_top_n_with_fewer_values_than_n() {
        let dataset = countries(&["A", "A"]);

        assert_eq!(top_n(&dataset.view(), CategoricalField::Country, 5).len(), 1);
    }

    #[test]
    fn test_unique_and_n_unique() {
        let dataset = countries(&["Peru", "Chad", "Peru", "Fiji"]);
        let view = dataset.view();

        assert_eq!(unique(&view, CategoricalField::Country), vec!["Peru", "Chad", "Fiji"]);
        assert_eq!(n_unique(&view, CategoricalField::Country), 3);
    }

    #[test]
    fn test_extremes_by_field_kind() {
        let dataset = countries(&["Peru", "Chad", "Zambia", "Fiji"]);
        let result = extremes(
            &dataset.view(),
            &[CategoricalField::Country.into(), NumericField::Quantity.into()],
        );

        assert_eq!(
            result[0].1,
            Some(Extreme::Text {
                min: "Chad".to_string(),
                max: "Zambia".to_string()
            })
        );
        assert_eq!(result[1].1, Some(Extreme::Numeric { min: 0.0, max: 3.0 }));
    }

    #[test]
    fn test_extremes_use_string_order_for_enums() {
        let mut a = record("A", "p", "c", 1);
        a.payment_terms = PaymentTerms::Prepaid;
        let mut b = record("A", "p", "c", 1);
        b.payment_terms = PaymentTerms::CashOnDelivery;
        let dataset = Dataset::from_records(vec![a, b]);

        let result = extremes(&dataset.view(), &[CategoricalField::PaymentTerms.into()]);

        assert_eq!(
            result[0].1,
            Some(Extreme::Text {
                min: "Cash on Delivery".to_string(),
                max: "Prepaid".to_string()
            })
        );
    }

    #[test]
    fn test_extremes_of_empty_view() {
        let dataset = countries(&[]);
        let result = extremes(&dataset.view(), &[NumericField::Value.into()]);

        assert_eq!(result, vec![(Field::Numeric(NumericField::Value), None)]);
    }

    #[test]
    fn test_headline_metrics() {
        let dataset = countries(&["A", "B", "A"]);
        let metrics = headline(&dataset.view());

        assert_eq!(metrics.total_records, 3);
        assert_eq!(metrics.unique_countries, 2);
        assert_eq!(metrics.unique_products, 1);
        assert_eq!(metrics.top_product.as_deref(), Some("p"));
        assert_eq!(metrics.top_shipping_method.as_deref(), Some("Air"));
    }

    #[test]
    fn test_group_aggregate_and_rank() {
        let dataset = Dataset::from_records(vec![
            record("A", "p", "Toys", 1),
            record("A", "p", "Furniture", 5),
            record("A", "p", "Toys", 3),
        ]);
        let view = dataset.view();

        let sums = group_aggregate(&view, CategoricalField::Category, NumericField::Quantity, Aggregation::Sum);
        assert_eq!(sums, vec![("Toys".to_string(), 4.0), ("Furniture".to_string(), 5.0)]);

        let means = group_aggregate(&view, CategoricalField::Category, NumericField::Quantity, Aggregation::Mean);
        assert_eq!(means[0], ("Toys".to_string(), 2.0));

        let maxes = group_aggregate(&view, CategoricalField::Category, NumericField::Quantity, Aggregation::Max);
        assert_eq!(maxes[0], ("Toys".to_string(), 3.0));

        let ranked = rank_desc(sums);
        assert_eq!(ranked[0].0, "Furniture");
    }

    #[test]
    fn test_crosstab_counts() {
        let mut a = record("A", "p", "Toys", 1);
        a.payment_terms = PaymentTerms::Net30;
        let b = record("A", "p", "Toys", 1);
        let c = record("A", "p", "Clothing", 1);
        let dataset = Dataset::from_records(vec![a, b, c]);

        let table = crosstab(&dataset.view(), CategoricalField::Category, CategoricalField::PaymentTerms);

        assert_eq!(table.rows, vec!["Clothing", "Toys"]);
        assert_eq!(table.columns, vec!["Net 30", "Prepaid"]);
        assert_eq!(table.get("Toys", "Net 30"), 1);
        assert_eq!(table.get("Clothing", "Prepaid"), 1);
        assert_eq!(table.get("Clothing", "Net 30"), 0);
        assert_eq!(table.row_total("Toys"), 2);
        assert_eq!(table.get("Machinery", "Net 30"), 0);
    }
}
