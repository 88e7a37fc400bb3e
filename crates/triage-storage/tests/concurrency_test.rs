//! Write serialization and pooled reads under concurrent load.

use std::sync::Arc;

use triage_core::records::{DetectionMethod, NewFile, NewStaticDetection, Severity};
use triage_core::traits::{IScanStats, IScanStorage};
use triage_storage::StorageEngine;

fn sample_file(name: &str) -> NewFile {
    NewFile {
        name: name.to_string(),
        file_type: "pe".to_string(),
        size_bytes: 64,
    }
}

#[test]
fn concurrent_submissions_are_independent_appends() {
    let dir = tempfile::tempdir().unwrap();
    let engine = Arc::new(StorageEngine::open(&dir.path().join("conc.db")).unwrap());

    let scan = engine.open_scan().unwrap();
    let file = engine.register_file(scan.id, &sample_file("a.exe")).unwrap();

    let mut handles = vec![];
    for t in 0..4 {
        let engine = Arc::clone(&engine);
        let (file_id, scan_id) = (file.id, scan.id);
        handles.push(std::thread::spawn(move || {
            for i in 0..10 {
                engine
                    .submit_static(&NewStaticDetection {
                        file_id,
                        scan_id,
                        byte_offset: Some(i),
                        algorithm: format!("algo-{t}"),
                        matched_pattern: "AA".to_string(),
                        method: DetectionMethod::Text,
                        severity: Severity::Low,
                    })
                    .expect("submission should not fail");
            }
        }));
    }
    for handle in handles {
        handle.join().expect("submitter should not panic");
    }

    // 4 threads x 10 appends each, nothing lost.
    let detail = engine.file_detail(file.id).unwrap();
    assert_eq!(detail.links[0].static_detections.len(), 40);

    let stats = engine.corpus_stats().unwrap();
    assert_eq!(stats.top_algorithms.len(), 4);
    assert!(stats.top_algorithms.iter().all(|a| a.count == 10));
}

#[test]
fn reads_proceed_while_writers_append() {
    let dir = tempfile::tempdir().unwrap();
    let engine = Arc::new(StorageEngine::open(&dir.path().join("rw.db")).unwrap());

    let scan = engine.open_scan().unwrap();
    for i in 0..10 {
        engine
            .register_file(scan.id, &sample_file(&format!("seed-{i}.exe")))
            .unwrap();
    }

    let mut readers = vec![];
    for _ in 0..4 {
        let engine = Arc::clone(&engine);
        let scan_id = scan.id;
        readers.push(std::thread::spawn(move || {
            for _ in 0..20 {
                let views = engine.scan_files(scan_id).unwrap();
                assert!(views.len() >= 10);
                let stats = engine.scan_stats(scan_id).unwrap();
                assert!(stats.total_files >= 10);
            }
        }));
    }

    let writer_engine = Arc::clone(&engine);
    let scan_id = scan.id;
    let writer = std::thread::spawn(move || {
        for i in 10..30 {
            writer_engine
                .register_file(scan_id, &sample_file(&format!("new-{i}.exe")))
                .unwrap();
        }
    });

    writer.join().expect("writer should not panic");
    for reader in readers {
        reader.join().expect("reader should not panic");
    }

    let stats = engine.scan_stats(scan.id).unwrap();
    assert_eq!(stats.total_files, 30);
}
