// CSV data source and sink implementation
// Author: Gabriel Demetrios Lafis

use std::fs::File;
use std::io::{self, BufReader, BufWriter};
use std::path::{Path, PathBuf};

use log::debug;

use super::{DataSink, DataSource, LoadError, Record, HEADERS};
use crate::storage::ExportError;

/// CSV data source
pub struct CsvSource {
    path: PathBuf,
    name: String,
    delimiter: u8,
}

impl CsvSource {
    /// Create a new comma-separated data source
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self::with_delimiter(path, b',')
    }

    /// Create a new CSV data source with a custom delimiter
    pub fn with_delimiter<P: AsRef<Path>>(path: P, delimiter: u8) -> Self {
        CsvSource {
            path: path.as_ref().to_path_buf(),
            name: path.as_ref().to_string_lossy().to_string(),
            delimiter,
        }
    }
}

impl DataSource for CsvSource {
    fn read(&self) -> Result<Vec<Record>, LoadError> {
        let file = File::open(&self.path).map_err(|err| match err.kind() {
            io::ErrorKind::NotFound => LoadError::SourceNotFound(self.path.clone()),
            _ => LoadError::Io(err),
        })?;

        let mut csv_reader = csv::ReaderBuilder::new()
            .delimiter(self.delimiter)
            .has_headers(true)
            .from_reader(BufReader::new(file));

        let mut records = Vec::new();
        for result in csv_reader.deserialize::<Record>() {
            let record = result.map_err(|e| LoadError::Parse(e.to_string()))?;
            records.push(record);
        }

        debug!("Read {} records from {}", records.len(), self.name);
        Ok(records)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// CSV data sink
pub struct CsvSink {
    path: PathBuf,
    name: String,
    delimiter: u8,
}

impl CsvSink {
    /// Create a new comma-separated data sink
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        CsvSink {
            path: path.as_ref().to_path_buf(),
            name: path.as_ref().to_string_lossy().to_string(),
            delimiter: b',',
        }
    }
}

impl DataSink for CsvSink {
    fn write(&self, records: &[&Record]) -> Result<usize, ExportError> {
        let file = File::create(&self.path).map_err(|e| ExportError::from_io(&self.path, e))?;

        // The header is written by hand so an empty view still gets one.
        let mut csv_writer = csv::WriterBuilder::new()
            .delimiter(self.delimiter)
            .has_headers(false)
            .from_writer(BufWriter::new(file));

        csv_writer
            .write_record(HEADERS)
            .map_err(|e| ExportError::from_csv(&self.path, e))?;

        for record in records {
            csv_writer
                .serialize(record)
                .map_err(|e| ExportError::from_csv(&self.path, e))?;
        }

        csv_writer
            .flush()
            .map_err(|e| ExportError::from_io(&self.path, e))?;

        Ok(records.len())
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SAMPLE: &str = "\
Transaction_ID,Country,Product,Import_Export,Quantity,Value,Date,Category,Port,Customs_Code,Weight,Shipping_Method,Supplier,Customer,Invoice_Number,Payment_Terms
t-1,Congo,travel,Export,1979,9506.57,07-12-2023,Machinery,Port Lisa,620537,4248.65,Air,\"Garcia, Bell and Cruz\",Seth Hall,34025810,Net 60
t-2,Palau,whose,Import,5763,7100.93,04-04-2023,Clothing,Davidfurt,927600,4340.89,Sea,Ross Group,Brittany Dunn,87547082,Cash on Delivery
";

    #[test]
    fn test_read_typed_records() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();

        let records = CsvSource::new(file.path()).read().unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].country, "Congo");
        assert_eq!(records[0].supplier, "Garcia, Bell and Cruz");
        assert_eq!(records[0].direction, super::super::Direction::Export);
        assert_eq!(records[1].payment_terms, super::super::PaymentTerms::CashOnDelivery);
        assert_eq!(records[1].quantity, 5763);
        assert_eq!(records[1].transaction_id.as_deref(), Some("t-2"));
    }

    #[test]
    fn test_optional_columns_may_be_missing() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(
            b"Country,Product,Import_Export,Quantity,Value,Category,Port,Weight,Shipping_Method,Supplier,Customer,Payment_Terms,Extra\n\
              Chad,fish,Import,3,1.5,Toys,North,2.25,Land,S,C,Prepaid,ignored\n",
        )
        .unwrap();

        let records = CsvSource::new(file.path()).read().unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].transaction_id, None);
        assert_eq!(records[0].date, None);
        assert_eq!(records[0].weight, 2.25);
    }

    #[test]
    fn test_missing_file_is_source_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let result = CsvSource::new(dir.path().join("absent.csv")).read();

        assert!(matches!(result, Err(LoadError::SourceNotFound(_))));
    }

    #[test]
    fn test_bad_enum_value_is_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(
            b"Country,Product,Import_Export,Quantity,Value,Category,Port,Weight,Shipping_Method,Supplier,Customer,Payment_Terms\n\
              Chad,fish,Sideways,3,1.5,Toys,North,2.25,Land,S,C,Prepaid\n",
        )
        .unwrap();

        let result = CsvSource::new(file.path()).read();

        assert!(matches!(result, Err(LoadError::Parse(_))));
    }

    #[test]
    fn test_sink_writes_header_for_empty_input() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.csv");

        let written = CsvSink::new(&path).write(&[]).unwrap();

        assert_eq!(written, 0);
        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents.trim_end(), HEADERS.join(","));
    }
}
