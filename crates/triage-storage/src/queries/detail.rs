//! Assembled detail views: a file with its per-scan results nested in.

use rusqlite::Connection;

use triage_core::errors::StoreResult;
use triage_core::records::{FileDetail, FileRecord, LinkDetail};

use super::{dynamic_detections, files, links, llm_records, static_detections};

/// Full detail view for a file: every scan it participates in, with the
/// static and dynamic detections and the analysis-bearing LLM rows of
/// each link. None if the file does not exist.
pub fn file_detail(conn: &Connection, file_id: i64) -> StoreResult<Option<FileDetail>> {
    match files::get_file(conn, file_id)? {
        Some(file) => Ok(Some(detail_for_file(conn, file)?)),
        None => Ok(None),
    }
}

/// Detail views for every file registered in a scan, ordered by file id.
/// Each view spans ALL the file's scans, not just the requested one.
pub fn scan_file_details(conn: &Connection, scan_id: i64) -> StoreResult<Vec<FileDetail>> {
    let members = files::files_in_scan(conn, scan_id)?;
    let mut details = Vec::with_capacity(members.len());
    for file in members {
        details.push(detail_for_file(conn, file)?);
    }
    Ok(details)
}

fn detail_for_file(conn: &Connection, file: FileRecord) -> StoreResult<FileDetail> {
    let scan_ids = links::scan_ids_for_file(conn, file.id)?;
    let mut link_details = Vec::with_capacity(scan_ids.len());
    for scan_id in scan_ids {
        link_details.push(LinkDetail {
            scan_id,
            static_detections: static_detections::list_for_link(conn, file.id, scan_id)?,
            dynamic_detections: dynamic_detections::list_for_link(conn, file.id, scan_id)?,
            llm_records: llm_records::list_with_analysis(conn, file.id, scan_id)?,
        });
    }
    Ok(FileDetail {
        file,
        links: link_details,
    })
}
