use fatura_export::export_reconciled;
use fatura_ingest::parse_statement;
use std::path::PathBuf;

fn fixture(name: &str) -> String {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .unwrap()
        .join("fixtures")
        .join(name);
    std::fs::read_to_string(path).unwrap()
}

/// Real-layout regression: both dialects export with a matching TOTAL row.
#[test]
fn test_export_both_dialects() {
    let dir = tempfile::tempdir().unwrap();

    for (name, rows, total) in [
        ("fatura_generic.txt", 10, "\"3.823,02\""),
        ("fatura_bb.txt", 7, "\"1.710,75\""),
    ] {
        let result = parse_statement(&fixture(name));
        let out = dir.path().join(name).with_extension("csv");
        export_reconciled(&result, "Maria", &out).unwrap();

        let mut rdr = csv::Reader::from_path(&out).unwrap();
        let records: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(records.len(), rows + 1, "{name}");

        let last = records.last().unwrap();
        assert_eq!(&last[2], "TOTAL");
        assert_eq!(&last[1], "");

        let raw = std::fs::read_to_string(&out).unwrap();
        assert!(raw.trim_end().ends_with(total), "{name}: {raw}");
        assert!(records[..rows].iter().all(|r| &r[1] == "Maria"));
    }
}
