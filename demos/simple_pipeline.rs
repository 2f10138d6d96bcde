// Simple pipeline example
// Author: Gabriel Demetrios Lafis

use trade_insights::{
    data::{Dataset, Direction, NumericField, PaymentTerms, Record, ShippingMethod},
    processing::{describe, headline, summary_header, FilterSpec},
    storage::export,
};

fn trade(country: &str, product: &str, direction: Direction, quantity: i64, value: f64) -> Record {
    Record {
        transaction_id: None,
        country: country.to_string(),
        product: product.to_string(),
        direction,
        quantity,
        value,
        date: None,
        category: "Machinery".to_string(),
        port: "Port Lisa".to_string(),
        customs_code: None,
        weight: quantity as f64 * 0.8,
        shipping_method: ShippingMethod::Air,
        supplier: "Ross Group".to_string(),
        customer: "Seth Hall".to_string(),
        invoice_number: None,
        payment_terms: PaymentTerms::Net30,
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Create a dataset
    let dataset = Dataset::from_records(vec![
        trade("Congo", "travel", Direction::Export, 1979, 9506.57),
        trade("Palau", "whose", Direction::Import, 5763, 7100.93),
        trade("Congo", "fish", Direction::Import, 3420, 512.10),
        trade("Somalia", "travel", Direction::Export, 880, 6688.90),
    ]);

    // Print headline metrics
    let metrics = headline(&dataset.view());
    println!("Total records: {}", metrics.total_records);
    println!("Top product: {}", metrics.top_product.unwrap_or_default());

    // Filter for Congo
    let view = FilterSpec::new().countries(["Congo"]).apply(&dataset);
    println!("\nCongo trades: {}", view.len());

    // Summarize the filtered data
    println!("{}", summary_header());
    for stats in describe(&view, &NumericField::ALL) {
        println!("{}", stats);
    }

    // Save the result
    let receipt = export(&view, "congo_trades.csv")?;
    println!("\n{}", receipt);

    Ok(())
}
