use crate::types::{JobRecord, Result};
use chrono::NaiveDate;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::info;

const HEADER: [&str; 6] = ["title", "company", "location", "link", "scraped_date", "source"];

/// Substitutes `{date}` in `pattern` with the ISO date.
pub fn dated_filename(pattern: &str, date: NaiveDate) -> String {
    pattern.replace("{date}", &date.format("%Y-%m-%d").to_string())
}

/// Writes one CSV row per record, after a header row.
pub fn write_csv(path: impl AsRef<Path>, records: &[JobRecord]) -> Result<()> {
    let path = path.as_ref();
    let mut out = BufWriter::new(File::create(path)?);

    write_row(&mut out, &HEADER)?;
    for record in records {
        let date = record.scraped_date.format("%Y-%m-%d").to_string();
        write_row(
            &mut out,
            &[
                record.title.as_str(),
                record.company.as_str(),
                record.location.as_str(),
                record.link.as_str(),
                date.as_str(),
                record.source.as_str(),
            ],
        )?;
    }
    out.flush()?;

    info!("Saved {} jobs to {}", records.len(), path.display());
    Ok(())
}

fn write_row<W: Write>(out: &mut W, fields: &[&str]) -> std::io::Result<()> {
    for (index, field) in fields.iter().enumerate() {
        if index > 0 {
            out.write_all(b",")?;
        }
        if needs_quotes(field) {
            write!(out, "\"{}\"", field.replace('"', "\"\""))?;
        } else {
            out.write_all(field.as_bytes())?;
        }
    }
    out.write_all(b"\n")
}

fn needs_quotes(field: &str) -> bool {
    field.contains([',', '"', '\n', '\r'])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn substitutes_date_placeholder() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 9).unwrap();
        assert_eq!(dated_filename("jobs_data_{date}.csv", date), "jobs_data_2025-03-09.csv");
        assert_eq!(dated_filename("jobs.csv", date), "jobs.csv");
    }

    #[test]
    fn quotes_only_when_needed() {
        let mut buf = Vec::new();
        write_row(&mut buf, &["plain", "Acme, Inc.", "say \"hi\"", "two\nlines"]).unwrap();
        assert_eq!(
            String::from_utf8(buf).unwrap(),
            "plain,\"Acme, Inc.\",\"say \"\"hi\"\"\",\"two\nlines\"\n"
        );
    }

    #[test]
    fn writes_header_and_rows() {
        let path = std::env::temp_dir().join(format!("job-report-export-{}.csv", std::process::id()));
        let records = vec![JobRecord {
            title: "ML Engineer".to_string(),
            company: "Acme, Inc.".to_string(),
            location: "Remote".to_string(),
            link: "https://jobs.example/1".to_string(),
            scraped_date: NaiveDate::from_ymd_opt(2025, 3, 9).unwrap(),
            source: "RemoteOK".to_string(),
        }];

        write_csv(&path, &records).unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(
            written,
            "title,company,location,link,scraped_date,source\n\
             ML Engineer,\"Acme, Inc.\",Remote,https://jobs.example/1,2025-03-09,RemoteOK\n"
        );
    }
}
