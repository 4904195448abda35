//! Integration tests for the conversion pipeline
//!
//! These tests read CSV exports from disk, convert them, and check the
//! bytes that reach the output file.

use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;
use vault2fact_core::config::ImportSettings;
use vault2fact_core::convert::Converter;
use vault2fact_core::error::{ConvertError, ImportError};
use vault2fact_core::factotum::ComposeOptions;
use vault2fact_core::import::{BitwardenCsvImporter, ImportSource};
use vault2fact_core::models::{RecordField, SkipReason};
use vault2fact_core::output::{OutputTarget, CTL_FILE};
use vault2fact_core::progress::ProgressReporter;

const HEADER: &str = concat!(
    "folder,favorite,type,name,notes,fields,reprompt,",
    "login_uri,login_username,login_password,login_totp"
);

fn write_export(dir: &TempDir, rows: &[&str]) -> PathBuf {
    let mut content = String::from(HEADER);
    for row in rows {
        content.push('\n');
        content.push_str(row);
    }
    content.push('\n');

    let path = dir.path().join("bitwarden_export.csv");
    fs::write(&path, content).expect("write export");
    path
}

fn convert_to_file(input: &PathBuf, output: &PathBuf, options: ComposeOptions) -> String {
    let batch = BitwardenCsvImporter::new()
        .import_from_path(input)
        .expect("Import should succeed");

    let mut writer = OutputTarget::File(output.clone())
        .open()
        .expect("Output should open");
    Converter::new(options)
        .convert_to(&batch.records, &mut writer, None)
        .expect("Conversion should succeed");
    writer.finish().expect("Flush should succeed");

    fs::read_to_string(output).expect("read output")
}

// ============================================================================
// End-to-end scenarios
// ============================================================================

#[test]
fn test_realistic_export_to_file() {
    let temp = TempDir::new().unwrap();
    let input = write_export(
        &temp,
        &[
            ",0,1,Example,,,0,https://example.com/login,alice,p@ss!word,",
            ",0,1,Junk,,,0,not a url,carol,secret,",
            ",0,1,Quote,,,0,https://quotes.example.net,dave,it's,",
            ",0,2,Secure note,some text,,0,,,,",
            ",0,1,FTP,,,0,ftp://Sub.Example.ORG:21/path,bob,hunter2,",
        ],
    );
    let output = temp.path().join("factotum.ctl");

    let content = convert_to_file(&input, &output, ComposeOptions::default());

    assert_eq!(
        content,
        "key proto=pass service=example.com user=alice !password='p@ss!word'\n\
         key proto=pass service=quotes.example.net user=dave !password='it''s'\n\
         key proto=pass service=Sub.Example.ORG user=bob !password=hunter2\n"
    );
}

#[test]
fn test_always_quote_password_option() {
    let temp = TempDir::new().unwrap();
    let input = write_export(&temp, &[",0,1,FTP,,,0,ftp://files.example.org,bob,hunter2,"]);
    let output = temp.path().join("factotum.ctl");

    let options = ComposeOptions::default().with_always_quote_password(true);
    let content = convert_to_file(&input, &output, options);

    assert_eq!(
        content,
        "key proto=pass service=files.example.org user=bob !password='hunter2'\n"
    );
}

#[test]
fn test_quoted_csv_fields_with_commas() {
    let temp = TempDir::new().unwrap();
    let input = write_export(
        &temp,
        &[r#"Work,0,1,"Mail, primary",,,0,https://mail.example.com,"Doe, Jane","a,b ""c"" d","#],
    );
    let output = temp.path().join("factotum.ctl");

    let content = convert_to_file(&input, &output, ComposeOptions::default());

    assert_eq!(
        content,
        "key proto=pass service=mail.example.com user='Doe, Jane' !password='a,b \"c\" d'\n"
    );
}

#[test]
fn test_multiline_password_is_skipped_not_split() {
    let temp = TempDir::new().unwrap();
    let input = write_export(
        &temp,
        &[
            concat!(
                ",0,1,Bad,,,0,https://a.example.com,eve,",
                "\"line1\nkey proto=pass service=evil user=x !password=y\","
            ),
            ",0,1,Good,,,0,https://b.example.com,frank,ok,",
        ],
    );

    let batch = BitwardenCsvImporter::new().import_from_path(&input).unwrap();
    let (lines, summary) = Converter::default().convert_all(&batch.records);

    assert_eq!(lines.len(), 1);
    assert_eq!(
        lines[0].key_directive(),
        "key proto=pass service=b.example.com user=frank"
    );
    assert_eq!(summary.skipped.len(), 1);
    assert_eq!(summary.skipped[0].row, 1);
    assert_eq!(
        summary.skipped[0].reason,
        SkipReason::LineBreak(RecordField::Password)
    );
}

#[test]
fn test_skip_report_is_ordered_and_redacted() {
    let temp = TempDir::new().unwrap();
    let input = write_export(
        &temp,
        &[
            ",0,1,NoUser,,,0,https://a.example.com/login?token=abc,,pw,",
            ",0,1,Fine,,,0,https://b.example.com,user,pw,",
            ",0,1,App,,,0,androidapp://,user,pw,",
        ],
    );

    let batch = BitwardenCsvImporter::new().import_from_path(&input).unwrap();
    let (_, summary) = Converter::default().convert_all(&batch.records);

    assert_eq!(summary.converted, 1);
    assert_eq!(summary.summary(), "Converted: 1, Skipped: 2");

    let first = &summary.skipped[0];
    assert_eq!(first.row, 1);
    assert_eq!(first.reason, SkipReason::EmptyField(RecordField::Username));
    assert_eq!(first.identifier, "https://a.example.com/login");

    assert_eq!(summary.skipped[1].row, 3);
    assert_eq!(summary.skipped[1].reason, SkipReason::NoHost);
}

// ============================================================================
// Sinks
// ============================================================================

#[test]
fn test_factotum_mount_receives_lines() {
    let temp = TempDir::new().unwrap();
    let input = write_export(&temp, &[",0,1,Example,,,0,https://example.com,alice,pw,"]);

    let mount = temp.path().join("factotum");
    fs::create_dir(&mount).unwrap();
    fs::write(mount.join(CTL_FILE), "").unwrap();

    let batch = BitwardenCsvImporter::new().import_from_path(&input).unwrap();
    let target = OutputTarget::Factotum {
        mount: mount.clone(),
    };
    let mut writer = target.open().unwrap();
    let summary = Converter::default()
        .convert_to(&batch.records, &mut writer, None)
        .unwrap();
    writer.finish().unwrap();

    assert_eq!(summary.converted, 1);
    assert_eq!(
        fs::read_to_string(mount.join(CTL_FILE)).unwrap(),
        "key proto=pass service=example.com user=alice !password=pw\n"
    );
}

#[test]
fn test_missing_mount_is_output_error() {
    let temp = TempDir::new().unwrap();
    let target = OutputTarget::Factotum {
        mount: temp.path().join("not-mounted"),
    };
    assert!(target.open().is_err());
}

/// Reporter whose run is already cancelled
struct AlreadyCancelled;

impl ProgressReporter for AlreadyCancelled {
    fn report(&self, _current: usize, _total: usize, _message: &str) {}

    fn is_cancelled(&self) -> bool {
        true
    }
}

#[test]
fn test_cancel_before_start_writes_nothing() {
    let temp = TempDir::new().unwrap();
    let input = write_export(
        &temp,
        &[
            ",0,1,A,,,0,https://a.example.com,alice,pw,",
            ",0,1,B,,,0,https://b.example.com,bob,pw,",
        ],
    );
    let output = temp.path().join("factotum.ctl");

    let batch = BitwardenCsvImporter::new().import_from_path(&input).unwrap();
    let mut writer = OutputTarget::File(output.clone()).open().unwrap();
    let result =
        Converter::default().convert_to(&batch.records, &mut writer, Some(&AlreadyCancelled));
    writer.finish().unwrap();

    assert!(matches!(result, Err(ConvertError::Cancelled)));
    assert_eq!(fs::read_to_string(&output).unwrap(), "");
}

// ============================================================================
// Input failures
// ============================================================================

#[test]
fn test_missing_file() {
    let temp = TempDir::new().unwrap();
    let result = BitwardenCsvImporter::new().import_from_path(&temp.path().join("nope.csv"));
    assert!(matches!(result, Err(ImportError::FileNotFound(_))));
}

#[test]
fn test_export_without_login_columns() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("other.csv");
    fs::write(&path, "url,username,password\nhttps://example.com,alice,pw\n").unwrap();

    let err = BitwardenCsvImporter::new().import_from_path(&path).unwrap_err();
    match err {
        ImportError::MissingColumns { missing } => assert_eq!(
            missing,
            vec!["login_uri", "login_username", "login_password"]
        ),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_custom_column_names() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("custom.csv");
    fs::write(&path, "url,username,password\nhttps://example.com,alice,pw\n").unwrap();

    let columns = ImportSettings {
        uri_column: "url".to_string(),
        username_column: "username".to_string(),
        password_column: "password".to_string(),
    };
    let batch = BitwardenCsvImporter::with_columns(columns)
        .import_from_path(&path)
        .unwrap();

    assert_eq!(batch.len(), 1);
    assert_eq!(batch.records[0].username, "alice");
    assert!(batch.source.is_some());
}
