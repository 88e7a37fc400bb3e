//! Corpus and scan-scoped statistics: counts, ranking, truncation.

use std::collections::HashSet;

use triage_core::errors::StoreError;
use triage_core::records::{DetectionMethod, NewFile, NewStaticDetection, Severity};
use triage_core::traits::{IScanStats, IScanStorage};
use triage_storage::queries::links;
use triage_storage::StorageEngine;

fn setup() -> StorageEngine {
    StorageEngine::open_in_memory().unwrap()
}

fn sample_file(name: &str) -> NewFile {
    NewFile {
        name: name.to_string(),
        file_type: "pe".to_string(),
        size_bytes: 512,
    }
}

fn static_detection(file_id: i64, scan_id: i64, algorithm: &str) -> NewStaticDetection {
    NewStaticDetection {
        file_id,
        scan_id,
        byte_offset: Some(0),
        algorithm: algorithm.to_string(),
        matched_pattern: "00".to_string(),
        method: DetectionMethod::Parameter,
        severity: Severity::Low,
    }
}

#[test]
fn empty_store_has_zero_stats() {
    let engine = setup();
    let stats = engine.corpus_stats().unwrap();
    assert_eq!(stats.total_files, 0);
    assert_eq!(stats.files_with_findings, 0);
    assert!(stats.top_algorithms.is_empty());
}

#[test]
fn corpus_counts_detected_and_total_separately() {
    let engine = setup();
    let scan = engine.open_scan().unwrap();
    let hit = engine.register_file(scan.id, &sample_file("hit.exe")).unwrap();
    engine.register_file(scan.id, &sample_file("clean.exe")).unwrap();
    engine
        .submit_static(&static_detection(hit.id, scan.id, "RC4"))
        .unwrap();

    let stats = engine.corpus_stats().unwrap();
    assert_eq!(stats.total_files, 2);
    assert_eq!(stats.files_with_findings, 1);
}

#[test]
fn algorithms_rank_by_occurrence_descending() {
    let engine = setup();
    let scan = engine.open_scan().unwrap();
    let file = engine.register_file(scan.id, &sample_file("a.exe")).unwrap();

    for _ in 0..3 {
        engine
            .submit_static(&static_detection(file.id, scan.id, "RC4"))
            .unwrap();
    }
    for _ in 0..5 {
        engine
            .submit_static(&static_detection(file.id, scan.id, "AES"))
            .unwrap();
    }
    engine
        .submit_static(&static_detection(file.id, scan.id, "XOR"))
        .unwrap();

    let stats = engine.corpus_stats().unwrap();
    let ranked: Vec<(&str, i64)> = stats
        .top_algorithms
        .iter()
        .map(|a| (a.algorithm.as_str(), a.count))
        .collect();
    assert_eq!(ranked, vec![("AES", 5), ("RC4", 3), ("XOR", 1)]);
}

#[test]
fn ranking_truncates_to_ten_algorithms() {
    let engine = setup();
    let scan = engine.open_scan().unwrap();
    let file = engine.register_file(scan.id, &sample_file("a.exe")).unwrap();

    // Twelve algorithms with strictly decreasing counts: algo-00 gets
    // 12 hits, algo-11 gets 1.
    for (i, hits) in (0..12).map(|i| (i, 12 - i)) {
        let name = format!("algo-{i:02}");
        for _ in 0..hits {
            engine
                .submit_static(&static_detection(file.id, scan.id, &name))
                .unwrap();
        }
    }

    let stats = engine.corpus_stats().unwrap();
    assert_eq!(stats.top_algorithms.len(), 10);
    assert_eq!(stats.top_algorithms[0].algorithm, "algo-00");
    assert_eq!(stats.top_algorithms[0].count, 12);
    assert_eq!(stats.top_algorithms[9].algorithm, "algo-09");
    assert_eq!(stats.top_algorithms[9].count, 3);

    // The two rarest never make the cut.
    assert!(stats
        .top_algorithms
        .iter()
        .all(|a| a.algorithm != "algo-10" && a.algorithm != "algo-11"));
}

#[test]
fn tied_counts_keep_arbitrary_order_but_correct_membership() {
    let engine = setup();
    let scan = engine.open_scan().unwrap();
    let file = engine.register_file(scan.id, &sample_file("a.exe")).unwrap();

    for name in ["RC4", "AES", "DES"] {
        engine
            .submit_static(&static_detection(file.id, scan.id, name))
            .unwrap();
        engine
            .submit_static(&static_detection(file.id, scan.id, name))
            .unwrap();
    }

    let stats = engine.corpus_stats().unwrap();
    assert!(stats.top_algorithms.iter().all(|a| a.count == 2));
    let names: HashSet<&str> = stats
        .top_algorithms
        .iter()
        .map(|a| a.algorithm.as_str())
        .collect();
    assert_eq!(names, HashSet::from(["RC4", "AES", "DES"]));
}

#[test]
fn scan_stats_are_isolated_per_scan() {
    let engine = setup();
    let s1 = engine.open_scan().unwrap();
    let s2 = engine.open_scan().unwrap();

    // File 1 participates in both scans; its only static hit is in scan 1.
    let file = engine.register_file(s1.id, &sample_file("shared.exe")).unwrap();
    engine
        .db()
        .with_writer(|conn| links::insert_link(conn, file.id, s2.id))
        .unwrap();
    engine
        .submit_static(&static_detection(file.id, s1.id, "RC4"))
        .unwrap();

    let scoped = engine.scan_stats(s2.id).unwrap();
    assert!(scoped.top_algorithms.is_empty());

    let global = engine.corpus_stats().unwrap();
    assert_eq!(global.top_algorithms.len(), 1);
    assert_eq!(global.top_algorithms[0].algorithm, "RC4");
}

#[test]
fn scan_stats_count_shared_files_per_scan() {
    let engine = setup();
    let s1 = engine.open_scan().unwrap();
    let s2 = engine.open_scan().unwrap();

    let shared = engine.register_file(s1.id, &sample_file("shared.exe")).unwrap();
    engine
        .db()
        .with_writer(|conn| links::insert_link(conn, shared.id, s2.id))
        .unwrap();
    engine.register_file(s2.id, &sample_file("only2.exe")).unwrap();

    // The flag is global, so a detection in scan 1 counts the shared
    // file as a finding in every scan it belongs to.
    engine
        .submit_static(&static_detection(shared.id, s1.id, "RC4"))
        .unwrap();

    let first = engine.scan_stats(s1.id).unwrap();
    assert_eq!(first.total_files, 1);
    assert_eq!(first.files_with_findings, 1);

    let second = engine.scan_stats(s2.id).unwrap();
    assert_eq!(second.total_files, 2);
    assert_eq!(second.files_with_findings, 1);
}

#[test]
fn scan_stats_missing_scan_is_not_found() {
    let engine = setup();
    let err = engine.scan_stats(12).unwrap_err();
    assert!(matches!(err, StoreError::ScanNotFound { id: 12 }));
}
