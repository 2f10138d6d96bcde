// Record schema and field identifiers
// Author: Gabriel Demetrios Lafis

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Column names written as the header row of an export, in record order
pub const HEADERS: [&str; 16] = [
    "Transaction_ID",
    "Country",
    "Product",
    "Import_Export",
    "Quantity",
    "Value",
    "Date",
    "Category",
    "Port",
    "Customs_Code",
    "Weight",
    "Shipping_Method",
    "Supplier",
    "Customer",
    "Invoice_Number",
    "Payment_Terms",
];

/// Trade direction of a transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Import,
    Export,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Import => "Import",
            Direction::Export => "Export",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for Direction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "import" => Ok(Direction::Import),
            "export" => Ok(Direction::Export),
            _ => Err(format!("Unknown direction: {}", s)),
        }
    }
}

/// Shipping method of a transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShippingMethod {
    Air,
    Land,
    Sea,
}

impl ShippingMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            ShippingMethod::Air => "Air",
            ShippingMethod::Land => "Land",
            ShippingMethod::Sea => "Sea",
        }
    }
}

/// Payment terms agreed for a transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaymentTerms {
    #[serde(rename = "Cash on Delivery")]
    CashOnDelivery,
    #[serde(rename = "Net 30")]
    Net30,
    #[serde(rename = "Net 60")]
    Net60,
    Prepaid,
}

impl PaymentTerms {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentTerms::CashOnDelivery => "Cash on Delivery",
            PaymentTerms::Net30 => "Net 30",
            PaymentTerms::Net60 => "Net 60",
            PaymentTerms::Prepaid => "Prepaid",
        }
    }
}

/// One trade transaction.
///
/// Field order follows the source dataset so that an export re-reads
/// into identical records. The optional identifiers are carried through
/// untouched and stay `None` when the source does not have them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    #[serde(rename = "Transaction_ID", default)]
    pub transaction_id: Option<String>,
    #[serde(rename = "Country")]
    pub country: String,
    #[serde(rename = "Product")]
    pub product: String,
    #[serde(rename = "Import_Export")]
    pub direction: Direction,
    #[serde(rename = "Quantity")]
    pub quantity: i64,
    #[serde(rename = "Value")]
    pub value: f64,
    #[serde(rename = "Date", default)]
    pub date: Option<String>,
    #[serde(rename = "Category")]
    pub category: String,
    #[serde(rename = "Port")]
    pub port: String,
    #[serde(rename = "Customs_Code", default)]
    pub customs_code: Option<String>,
    #[serde(rename = "Weight")]
    pub weight: f64,
    #[serde(rename = "Shipping_Method")]
    pub shipping_method: ShippingMethod,
    #[serde(rename = "Supplier")]
    pub supplier: String,
    #[serde(rename = "Customer")]
    pub customer: String,
    #[serde(rename = "Invoice_Number", default)]
    pub invoice_number: Option<String>,
    #[serde(rename = "Payment_Terms")]
    pub payment_terms: PaymentTerms,
}

impl Record {
    /// Get a numeric field as `f64`
    pub fn number(&self, field: NumericField) -> f64 {
        match field {
            NumericField::Quantity => self.quantity as f64,
            NumericField::Value => self.value,
            NumericField::Weight => self.weight,
        }
    }

    /// Get a categorical field as text
    pub fn text(&self, field: CategoricalField) -> &str {
        match field {
            CategoricalField::Country => &self.country,
            CategoricalField::Product => &self.product,
            CategoricalField::ImportExport => self.direction.as_str(),
            CategoricalField::Category => &self.category,
            CategoricalField::Port => &self.port,
            CategoricalField::ShippingMethod => self.shipping_method.as_str(),
            CategoricalField::Supplier => &self.supplier,
            CategoricalField::Customer => &self.customer,
            CategoricalField::PaymentTerms => self.payment_terms.as_str(),
        }
    }
}

/// Numeric record fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NumericField {
    Quantity,
    Value,
    Weight,
}

impl NumericField {
    pub const ALL: [NumericField; 3] = [
        NumericField::Quantity,
        NumericField::Value,
        NumericField::Weight,
    ];

    /// Column name in the CSV source
    pub fn name(&self) -> &'static str {
        match self {
            NumericField::Quantity => "Quantity",
            NumericField::Value => "Value",
            NumericField::Weight => "Weight",
        }
    }
}

/// Categorical record fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CategoricalField {
    Country,
    Product,
    ImportExport,
    Category,
    Port,
    ShippingMethod,
    Supplier,
    Customer,
    PaymentTerms,
}

impl CategoricalField {
    pub const ALL: [CategoricalField; 9] = [
        CategoricalField::Country,
        CategoricalField::Product,
        CategoricalField::ImportExport,
        CategoricalField::Category,
        CategoricalField::Port,
        CategoricalField::ShippingMethod,
        CategoricalField::Supplier,
        CategoricalField::Customer,
        CategoricalField::PaymentTerms,
    ];

    /// Column name in the CSV source
    pub fn name(&self) -> &'static str {
        match self {
            CategoricalField::Country => "Country",
            CategoricalField::Product => "Product",
            CategoricalField::ImportExport => "Import_Export",
            CategoricalField::Category => "Category",
            CategoricalField::Port => "Port",
            CategoricalField::ShippingMethod => "Shipping_Method",
            CategoricalField::Supplier => "Supplier",
            CategoricalField::Customer => "Customer",
            CategoricalField::PaymentTerms => "Payment_Terms",
        }
    }
}

/// Any field that can be summarized
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
    Numeric(NumericField),
    Categorical(CategoricalField),
}

impl Field {
    pub fn name(&self) -> &'static str {
        match self {
            Field::Numeric(f) => f.name(),
            Field::Categorical(f) => f.name(),
        }
    }
}

impl From<NumericField> for Field {
    fn from(field: NumericField) -> Self {
        Field::Numeric(field)
    }
}

impl From<CategoricalField> for Field {
    fn from(field: CategoricalField) -> Self {
        Field::Categorical(field)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.pad(self.name())
    }
}

impl FromStr for NumericField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NumericField::ALL
            .iter()
            .copied()
            .find(|f| f.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("Unknown numeric field: {}", s))
    }
}

impl FromStr for CategoricalField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CategoricalField::ALL
            .iter()
            .copied()
            .find(|f| f.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("Unknown categorical field: {}", s))
    }
}

impl FromStr for Field {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<NumericField>()
            .map(Field::Numeric)
            .or_else(|_| s.parse::<CategoricalField>().map(Field::Categorical))
            .map_err(|_| format!("Unknown field: {}", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_names_parse_case_insensitively() {
        assert_eq!("quantity".parse::<Field>(), Ok(Field::Numeric(NumericField::Quantity)));
        assert_eq!(
            "SHIPPING_METHOD".parse::<Field>(),
            Ok(Field::Categorical(CategoricalField::ShippingMethod))
        );
        assert!("Colour".parse::<Field>().is_err());
    }

    #[test]
    fn test_every_field_is_an_export_header() {
        for field in NumericField::ALL {
            assert!(HEADERS.contains(&field.name()));
        }
        for field in CategoricalField::ALL {
            assert!(HEADERS.contains(&field.name()));
        }
    }

    #[test]
    fn test_direction_from_str() {
        assert_eq!("export".parse::<Direction>(), Ok(Direction::Export));
        assert!("sideways".parse::<Direction>().is_err());
    }
}
