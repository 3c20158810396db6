//! CSV front end — quote-aware line splitting and header-driven row parsing.
//!
//! Structural failures of the whole file (no content, header with no rows)
//! abort the one import with a [`ParseError`]. Per-row failures (short
//! field count) are skipped and counted so a mostly-good export still
//! imports — unless strict column checking is enabled in config.

use crate::advisor::Benchmarks;
use crate::error::{CsvErrorKind, ParseError};
use crate::model::Source;
use crate::normalize::{Batch, RawRow, normalize_rows};

/// Split one CSV line on commas, honoring double quotes.
///
/// A quote toggles in-quotes mode, inside which commas are field content.
/// Quotes themselves are stripped from the emitted fields, and every field
/// is whitespace-trimmed.
pub fn parse_delimited_row(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    for ch in line.chars() {
        match ch {
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => {
                fields.push(current.trim().to_string());
                current.clear();
            }
            _ => current.push(ch),
        }
    }
    fields.push(current.trim().to_string());

    fields
}

/// The rows of a structurally valid CSV document.
#[derive(Debug, Clone)]
pub struct ParsedCsv {
    pub rows: Vec<RawRow>,
    /// Data lines dropped for carrying fewer fields than the header.
    pub skipped_rows: usize,
}

/// Parse CSV text into raw rows keyed by the header line.
///
/// Blank lines are ignored throughout. `strict` turns a short row from a
/// skip into a [`CsvErrorKind::ColumnMismatch`] abort.
pub fn parse_csv(text: &str, strict: bool) -> Result<ParsedCsv, ParseError> {
    let mut lines = text.lines().filter(|line| !line.trim().is_empty());

    let header = match lines.next() {
        Some(line) => parse_delimited_row(line),
        None => return Err(ParseError::Csv(CsvErrorKind::Empty)),
    };

    let mut rows = Vec::new();
    let mut skipped_rows = 0;

    for line in lines {
        let values = parse_delimited_row(line);
        if values.len() < header.len() {
            if strict {
                return Err(ParseError::Csv(CsvErrorKind::ColumnMismatch));
            }
            skipped_rows += 1;
            continue;
        }
        rows.push(RawRow::from_header(&header, &values));
    }

    if rows.is_empty() && skipped_rows == 0 {
        return Err(ParseError::Csv(CsvErrorKind::HeaderOnly));
    }

    Ok(ParsedCsv { rows, skipped_rows })
}

/// Parse and normalize a whole CSV export in one step.
pub fn import_csv(text: &str, benchmarks: &Benchmarks, strict: bool) -> Result<Batch, ParseError> {
    let parsed = parse_csv(text, strict)?;
    let mut batch = normalize_rows(&parsed.rows, Source::Csv, benchmarks);
    batch.skipped_rows += parsed.skipped_rows;
    Ok(batch)
}

#[cfg(test)]
mod tests {
    use super::*;

    // --- parse_delimited_row ---

    #[test]
    fn simple_split() {
        assert_eq!(parse_delimited_row("a,b,c"), vec!["a", "b", "c"]);
    }

    #[test]
    fn quoted_comma_stays_in_field() {
        assert_eq!(
            parse_delimited_row(r#"Summer Sale,"1,234.56",250"#),
            vec!["Summer Sale", "1,234.56", "250"]
        );
    }

    #[test]
    fn quotes_are_stripped_and_fields_trimmed() {
        assert_eq!(
            parse_delimited_row(r#" "Campaign Name" ,  spend "#),
            vec!["Campaign Name", "spend"]
        );
    }

    #[test]
    fn empty_fields_survive() {
        assert_eq!(parse_delimited_row("a,,c"), vec!["a", "", "c"]);
        assert_eq!(parse_delimited_row(""), vec![""]);
    }

    #[test]
    fn unterminated_quote_consumes_rest_of_line() {
        assert_eq!(
            parse_delimited_row(r#"a,"b,c"#),
            vec!["a", "b,c"]
        );
    }

    // --- parse_csv ---

    #[test]
    fn empty_file_is_a_parse_error() {
        for text in ["", "\n\n", "   \n  "] {
            match parse_csv(text, false) {
                Err(ParseError::Csv(CsvErrorKind::Empty)) => {}
                other => panic!("expected empty error, got {other:?}"),
            }
        }
    }

    #[test]
    fn header_only_is_a_parse_error() {
        match parse_csv("Campaign Name,Impressions\n", false) {
            Err(ParseError::Csv(CsvErrorKind::HeaderOnly)) => {}
            other => panic!("expected header_only error, got {other:?}"),
        }
    }

    #[test]
    fn short_rows_are_skipped_and_counted() {
        let text = "Campaign Name,Impressions,Clicks\nSummer Sale,1000,50\nBroken Row,5\n";
        let parsed = parse_csv(text, false).unwrap();
        assert_eq!(parsed.rows.len(), 1);
        assert_eq!(parsed.skipped_rows, 1);
    }

    #[test]
    fn strict_mode_aborts_on_short_row() {
        let text = "Campaign Name,Impressions,Clicks\nBroken Row,5\n";
        match parse_csv(text, true) {
            Err(ParseError::Csv(CsvErrorKind::ColumnMismatch)) => {}
            other => panic!("expected column_mismatch error, got {other:?}"),
        }
    }

    #[test]
    fn extra_columns_beyond_header_are_ignored() {
        let text = "Campaign Name,Impressions\nSummer Sale,1000,stray\n";
        let parsed = parse_csv(text, false).unwrap();
        assert_eq!(parsed.rows.len(), 1);
        assert_eq!(parsed.rows[0].get("Campaign Name"), Some("Summer Sale"));
    }

    // --- import_csv ---

    #[test]
    fn documented_summer_sale_scenario() {
        let csv = "Campaign Name,Amount Spent,Impressions,Link clicks\nSummer Sale,100,10000,250\n";
        let batch = import_csv(csv, &Benchmarks::default(), false).unwrap();

        assert_eq!(batch.campaigns.len(), 1);
        let c = &batch.campaigns[0];
        assert_eq!(c.name, "Summer Sale");
        assert_eq!(c.metrics.spend, 100.0);
        assert_eq!(c.metrics.impressions, 10_000.0);
        assert_eq!(c.metrics.clicks, 250.0);
        assert_eq!(c.metrics.ctr, 2.5);
        assert_eq!(c.metrics.cpc, 0.4);
    }

    #[test]
    fn rows_without_campaign_columns_count_as_skipped() {
        let csv = "Ad ID,Impressions\nad1,1000\n";
        let batch = import_csv(csv, &Benchmarks::default(), false).unwrap();
        assert!(batch.campaigns.is_empty());
        assert_eq!(batch.skipped_rows, 1);
    }

    #[test]
    fn ad_columns_produce_creatives_under_their_campaign() {
        let csv = "\
Campaign ID,Campaign Name,Ad ID,Ad name,CTR,Frequency\n\
c1,Summer Sale,ad1,Carousel v1,2.8,1.2\n\
c1,Summer Sale,ad2,Carousel v2,0.6,4.5\n";
        let batch = import_csv(csv, &Benchmarks::default(), false).unwrap();

        assert_eq!(batch.campaigns.len(), 1);
        assert_eq!(batch.creatives.len(), 2);
        assert!(batch.creatives.iter().all(|c| c.campaign_id == "c1"));
        // The weak creative scored worse than the healthy one.
        assert!(
            batch.creatives[1].performance.fatigue_score
                > batch.creatives[0].performance.fatigue_score
        );
    }
}
