use crate::domain::model::{OutputFormat, SampleDomainRecord};
use crate::utils::error::{FlipError, Result};

pub fn to_csv_bytes(records: &[SampleDomainRecord]) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;

    writer
        .into_inner()
        .map_err(|e| FlipError::IoError(std::io::Error::other(e.to_string())))
}

pub fn to_json_bytes(records: &[SampleDomainRecord]) -> Result<Vec<u8>> {
    let json_data = serde_json::to_string_pretty(records)?;
    Ok(json_data.into_bytes())
}

pub fn encode(records: &[SampleDomainRecord], format: OutputFormat) -> Result<Vec<u8>> {
    match format {
        OutputFormat::Csv => to_csv_bytes(records),
        OutputFormat::Json => to_json_bytes(records),
    }
}

pub fn from_csv_bytes(data: &[u8]) -> Result<Vec<SampleDomainRecord>> {
    let mut reader = csv::Reader::from_reader(data);
    let mut records = Vec::new();
    for row in reader.deserialize() {
        records.push(row?);
    }
    Ok(records)
}

pub fn from_json_bytes(data: &[u8]) -> Result<Vec<SampleDomainRecord>> {
    Ok(serde_json::from_slice(data)?)
}

pub fn decode(data: &[u8], format: OutputFormat) -> Result<Vec<SampleDomainRecord>> {
    match format {
        OutputFormat::Csv => from_csv_bytes(data),
        OutputFormat::Json => from_json_bytes(data),
    }
}
