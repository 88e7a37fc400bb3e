//! Cascade deletion: removing a file or scan takes its memberships and
//! every dependent result row with it, and nothing else.

use triage_core::errors::StoreError;
use triage_core::records::{
    DetectionMethod, NewDynamicDetection, NewFile, NewStaticDetection, Severity,
};
use triage_core::traits::IScanStorage;
use triage_storage::queries::links;
use triage_storage::StorageEngine;

fn setup() -> StorageEngine {
    StorageEngine::open_in_memory().unwrap()
}

fn sample_file(name: &str) -> NewFile {
    NewFile {
        name: name.to_string(),
        file_type: "pe".to_string(),
        size_bytes: 100,
    }
}

fn count_rows(engine: &StorageEngine, table: &str) -> i64 {
    engine
        .db()
        .with_writer(|conn| {
            conn.query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| {
                row.get(0)
            })
            .map_err(|e| StoreError::Sqlite {
                message: e.to_string(),
            })
        })
        .unwrap()
}

fn populate_link(engine: &StorageEngine, file_id: i64, scan_id: i64) {
    engine
        .submit_static(&NewStaticDetection {
            file_id,
            scan_id,
            byte_offset: None,
            algorithm: "RC4".to_string(),
            matched_pattern: "AB".to_string(),
            method: DetectionMethod::Text,
            severity: Severity::High,
        })
        .unwrap();
    engine
        .submit_dynamic(&NewDynamicDetection {
            file_id,
            scan_id,
            parameter: None,
            algorithm: Some("RC4".to_string()),
            api: None,
            key_length: None,
        })
        .unwrap();
    engine.submit_analysis(file_id, scan_id, "verdict").unwrap();
}

#[test]
fn delete_file_cascades_to_all_result_tables() {
    let engine = setup();
    let scan = engine.open_scan().unwrap();
    let file = engine.register_file(scan.id, &sample_file("a.exe")).unwrap();
    populate_link(&engine, file.id, scan.id);

    assert_eq!(count_rows(&engine, "file_scans"), 1);
    assert_eq!(count_rows(&engine, "static_detections"), 1);
    assert_eq!(count_rows(&engine, "dynamic_detections"), 1);
    assert_eq!(count_rows(&engine, "llm_records"), 1);

    engine.delete_file(file.id).unwrap();

    assert_eq!(count_rows(&engine, "files"), 0);
    assert_eq!(count_rows(&engine, "file_scans"), 0);
    assert_eq!(count_rows(&engine, "static_detections"), 0);
    assert_eq!(count_rows(&engine, "dynamic_detections"), 0);
    assert_eq!(count_rows(&engine, "llm_records"), 0);

    // The scan itself survives.
    assert!(engine.get_scan(scan.id).unwrap().is_some());
}

#[test]
fn delete_scan_cascades_to_all_result_tables() {
    let engine = setup();
    let scan = engine.open_scan().unwrap();
    let file = engine.register_file(scan.id, &sample_file("a.exe")).unwrap();
    populate_link(&engine, file.id, scan.id);

    engine.delete_scan(scan.id).unwrap();

    assert_eq!(count_rows(&engine, "scans"), 0);
    assert_eq!(count_rows(&engine, "file_scans"), 0);
    assert_eq!(count_rows(&engine, "static_detections"), 0);
    assert_eq!(count_rows(&engine, "dynamic_detections"), 0);
    assert_eq!(count_rows(&engine, "llm_records"), 0);

    // The file row survives the scan deletion.
    assert!(engine.get_file(file.id).unwrap().is_some());
}

#[test]
fn delete_scan_keeps_results_of_other_scans() {
    let engine = setup();
    let s1 = engine.open_scan().unwrap();
    let s2 = engine.open_scan().unwrap();
    let file = engine.register_file(s1.id, &sample_file("shared.exe")).unwrap();
    engine
        .db()
        .with_writer(|conn| links::insert_link(conn, file.id, s2.id))
        .unwrap();

    populate_link(&engine, file.id, s1.id);
    populate_link(&engine, file.id, s2.id);

    engine.delete_scan(s1.id).unwrap();

    // Only scan 2's rows remain.
    assert_eq!(count_rows(&engine, "file_scans"), 1);
    assert_eq!(count_rows(&engine, "static_detections"), 1);
    assert_eq!(count_rows(&engine, "dynamic_detections"), 1);
    assert_eq!(count_rows(&engine, "llm_records"), 1);

    let detail = engine.file_detail(file.id).unwrap();
    assert_eq!(detail.links.len(), 1);
    assert_eq!(detail.links[0].scan_id, s2.id);
}

#[test]
fn duplicate_membership_is_a_constraint_violation() {
    let engine = setup();
    let scan = engine.open_scan().unwrap();
    let file = engine.register_file(scan.id, &sample_file("a.exe")).unwrap();

    let err = engine
        .db()
        .with_writer(|conn| links::insert_link(conn, file.id, scan.id))
        .unwrap_err();
    assert!(matches!(err, StoreError::Constraint { .. }));
    assert_eq!(
        err.kind(),
        triage_core::errors::ErrorKind::Constraint
    );
}

#[test]
fn result_rows_cannot_outlive_their_membership() {
    let engine = setup();
    let scan = engine.open_scan().unwrap();
    let file = engine.register_file(scan.id, &sample_file("a.exe")).unwrap();
    populate_link(&engine, file.id, scan.id);

    // Deleting the membership row directly sweeps the results too.
    engine
        .db()
        .with_writer(|conn| {
            conn.execute(
                "DELETE FROM file_scans WHERE file_id = ?1 AND scan_id = ?2",
                rusqlite::params![file.id, scan.id],
            )
            .map_err(|e| StoreError::Sqlite {
                message: e.to_string(),
            })?;
            Ok(())
        })
        .unwrap();

    assert_eq!(count_rows(&engine, "static_detections"), 0);
    assert_eq!(count_rows(&engine, "dynamic_detections"), 0);
    assert_eq!(count_rows(&engine, "llm_records"), 0);
}
