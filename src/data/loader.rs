// Dataset loading and seeded sampling
// Author: Gabriel Demetrios Lafis

use std::path::Path;

use log::info;
use rand::rngs::StdRng;
use rand::SeedableRng;

use super::{CsvSource, DataSource, Dataset, LoadError, Metadata, Record};

/// Load a CSV source and draw a reproducible sample from it.
///
/// Exactly `sample_size` records are drawn without replacement. The
/// returned dataset keeps the order in which the seeded generator picked
/// them, so the same file and seed always give the same dataset.
pub fn load<P: AsRef<Path>>(path: P, sample_size: usize, seed: u64) -> Result<Dataset, LoadError> {
    let source = CsvSource::new(path.as_ref());
    let records = source.read()?;
    let available = records.len();

    let sampled = sample(records, sample_size, seed)?;
    info!(
        "Sampled {} of {} records from {} (seed {})",
        sampled.len(),
        available,
        source.name(),
        seed
    );

    let mut metadata = Metadata::new();
    metadata.add("source", source.name().to_string());
    metadata.add("seed", seed.to_string());
    metadata.add("sample_size", sample_size.to_string());

    Ok(Dataset::from_records(sampled).with_metadata(metadata))
}

/// Read every record of a CSV source in file order, without sampling
pub fn read<P: AsRef<Path>>(path: P) -> Result<Dataset, LoadError> {
    let source = CsvSource::new(path.as_ref());
    let records = source.read()?;
    info!("Read {} records from {}", records.len(), source.name());

    let mut metadata = Metadata::new();
    metadata.add("source", source.name().to_string());

    Ok(Dataset::from_records(records).with_metadata(metadata))
}

/// Draw `sample_size` records without replacement using `seed`
pub fn sample(records: Vec<Record>, sample_size: usize, seed: u64) -> Result<Vec<Record>, LoadError> {
    if sample_size == 0 {
        return Err(LoadError::InvalidArgument(
            "Sample size must be positive".to_string(),
        ));
    }

    if records.len() < sample_size {
        return Err(LoadError::InsufficientData {
            available: records.len(),
            requested: sample_size,
        });
    }

    let mut rng = StdRng::seed_from_u64(seed);
    let picks = rand::seq::index::sample(&mut rng, records.len(), sample_size);

    let mut slots: Vec<Option<Record>> = records.into_iter().map(Some).collect();
    Ok(picks
        .into_iter()
        .filter_map(|i| slots[i].take())
        .collect())
}
