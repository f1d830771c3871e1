//! End-to-end runs over small size lists

use layout_bench::report::CSV_HEADER;
use layout_bench::{
    run_benchmark, BenchConfig, BoxedVec, OutputFormat, Record, RecordStore, Runner, StaticVec,
    Strategy, TableWriter,
};

fn small_config() -> BenchConfig {
    BenchConfig::quick().with_trials(5).with_scratch_words(4096)
}

#[test]
fn test_builders_report_size_before_timing() {
    let contiguous = <StaticVec<Record> as RecordStore>::build(1000).unwrap();
    let indirect = <BoxedVec<Record> as RecordStore>::build(1000).unwrap();

    assert_eq!(contiguous.len(), 1000);
    assert_eq!(contiguous.record_count(), 1000);
    assert_eq!(indirect.len(), 1000);
    assert_eq!(indirect.record_count(), 1000);
}

#[test]
fn test_three_sizes_produce_six_rows() {
    let config = small_config().with_sizes(vec![1, 10, 100]);
    let mut runner = Runner::from_config(config).unwrap();
    let mut writer = TableWriter::new(Vec::new());
    let rows = runner.run(&mut writer).unwrap();

    assert_eq!(rows.len(), 6);
    for (i, row) in rows.iter().enumerate() {
        assert_eq!(row.size, [1, 10, 100][i / 2]);
        let expected = if i % 2 == 0 {
            Strategy::Contiguous
        } else {
            Strategy::Indirect
        };
        assert_eq!(row.strategy, expected);
        for stats in row.metrics() {
            assert!(stats.mean >= 0.0);
            assert!(stats.ci95 >= 0.0);
        }
    }

    let text = String::from_utf8(writer.into_inner()).unwrap();
    assert_eq!(text.lines().count(), 8);
}

#[test]
fn test_csv_single_size() {
    let config = small_config()
        .with_sizes(vec![1])
        .with_format(OutputFormat::Csv);
    let mut out = Vec::new();
    let rows = run_benchmark(config, &mut out).unwrap();
    assert_eq!(rows.len(), 2);

    let text = String::from_utf8(out).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 3);

    let header: Vec<&str> = lines[0].split(',').collect();
    assert_eq!(header, CSV_HEADER.to_vec());

    for (line, label) in lines[1..].iter().zip(["static_vec", "vec<box>"]) {
        let fields: Vec<&str> = line.split(',').collect();
        assert_eq!(fields.len(), 8);
        assert_eq!(fields[0], "1");
        assert_eq!(fields[1], label);
        for value in &fields[2..] {
            let parsed: f64 = value.parse().unwrap();
            assert!(parsed >= 0.0);
            assert_eq!(value.split('.').nth(1).map(str::len), Some(6));
        }
    }
}

#[test]
fn test_invalid_config_fails_before_output() {
    let config = small_config().with_trials(0);
    let mut out = Vec::new();
    let err = run_benchmark(config, &mut out).unwrap_err();
    assert_eq!(err.category(), "config");
    assert!(out.is_empty());
}
