//! Property-based tests for record conversion
//!
//! Tests that conversion filters unusable records, preserves input order,
//! and always produces single-line, well-formed control lines.

use proptest::prelude::*;
use vault2fact_core::convert::{convert_record, Converter};
use vault2fact_core::factotum::{unquote, ComposeOptions};
use vault2fact_core::models::{CredentialRecord, RecordField, SkipReason};
use vault2fact_core::output::ControlWriter;

/// Strategy for field text, sometimes empty
fn arb_field() -> impl Strategy<Value = String> {
    prop_oneof![
        1 => Just(String::new()),
        4 => "[ -~]{1,24}",
    ]
}

/// Strategy for URIs that always contain a host
fn arb_host_uri() -> impl Strategy<Value = String> {
    ("[a-z]{1,10}", "[a-z]{2,4}").prop_map(|(name, tld)| format!("https://{name}.{tld}/login"))
}

/// Strategy for arbitrary records
fn arb_record() -> impl Strategy<Value = CredentialRecord> {
    (
        prop_oneof![arb_host_uri(), arb_field()],
        arb_field(),
        arb_field(),
    )
        .prop_map(|(uri, user, pass)| CredentialRecord::new(uri, user, pass))
}

/// Splits a line on spaces outside quoted tokens
fn tokenize(line: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_quote = false;
    for c in line.chars() {
        match c {
            '\'' => {
                in_quote = !in_quote;
                current.push(c);
            }
            ' ' if !in_quote => tokens.push(std::mem::take(&mut current)),
            _ => current.push(c),
        }
    }
    tokens.push(current);
    tokens
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Records with an empty field are never converted.
    #[test]
    fn prop_empty_fields_are_skipped(record in arb_record()) {
        let result = convert_record(&record, ComposeOptions::default());
        if let Some(field) = record.first_empty_field() {
            prop_assert_eq!(result.err(), Some(SkipReason::EmptyField(field)));
        }
    }

    /// Converted lines carry the username and password back out unchanged.
    #[test]
    fn prop_line_fields_decode(
        uri in arb_host_uri(),
        user in "[ -~]{1,24}",
        pass in "[ -~]{1,24}",
        always_quote in any::<bool>(),
    ) {
        let record = CredentialRecord::new(uri, user.clone(), pass.clone());
        let options = ComposeOptions::default().with_always_quote_password(always_quote);
        let line = convert_record(&record, options).unwrap().to_string();

        prop_assert!(!line.contains('\n'));
        let tokens = tokenize(&line);
        prop_assert_eq!(tokens.len(), 5);
        prop_assert_eq!(tokens[0].as_str(), "key");
        prop_assert_eq!(tokens[1].as_str(), "proto=pass");

        let user_token = tokens[3].strip_prefix("user=").unwrap();
        prop_assert_eq!(unquote(user_token), Some(user));
        let pass_token = tokens[4].strip_prefix("!password=").unwrap();
        prop_assert_eq!(unquote(pass_token), Some(pass));
    }

    /// Every record is either converted or reported, in input order.
    #[test]
    fn prop_convert_all_accounts_for_every_record(
        records in prop::collection::vec(arb_record(), 0..30)
    ) {
        let records: Vec<CredentialRecord> = records
            .into_iter()
            .enumerate()
            .map(|(i, r)| r.with_row(i + 1))
            .collect();

        let (lines, summary) = Converter::default().convert_all(&records);

        prop_assert_eq!(lines.len(), summary.converted);
        prop_assert_eq!(summary.total_processed(), records.len());
        let rows: Vec<usize> = summary.skipped.iter().map(|s| s.row).collect();
        let mut sorted = rows.clone();
        sorted.sort_unstable();
        prop_assert_eq!(rows, sorted);
    }

    /// Streaming and in-memory conversion produce the same output.
    #[test]
    fn prop_convert_to_matches_convert_all(
        records in prop::collection::vec(arb_record(), 0..20)
    ) {
        let converter = Converter::default();
        let (lines, planned) = converter.convert_all(&records);

        let mut writer = ControlWriter::new(Vec::new());
        let summary = converter.convert_to(&records, &mut writer, None).unwrap();
        let written = String::from_utf8(writer.finish().unwrap()).unwrap();

        let expected: String = lines.iter().map(|l| format!("{l}\n")).collect();
        prop_assert_eq!(written, expected);
        prop_assert_eq!(summary.converted, planned.converted);
    }

    /// Line breaks inside a field never reach the output.
    #[test]
    fn prop_line_breaks_are_skipped(
        uri in arb_host_uri(),
        user in "[a-z]{1,8}",
        head in "[a-z]{0,8}",
        tail in "[a-z]{0,8}",
        brk in prop::sample::select(vec!["\n", "\r", "\r\n"]),
    ) {
        let record = CredentialRecord::new(uri, user, format!("{head}{brk}{tail}"));
        prop_assert_eq!(
            convert_record(&record, ComposeOptions::default()).err(),
            Some(SkipReason::LineBreak(RecordField::Password))
        );
    }
}
