//! Integration tests for the mapping session.

use std::cell::Cell;
use std::fs;
use std::path::Path;

use chrono::{TimeZone, Utc};
use fieldmap_ingest::RawInput;
use fieldmap_map::{ClickOutcome, Rect, SelectionState};
use fieldmap_model::{
    ExportDocument, Mapping, MergeRequest, MergeResponse, Record, Side,
};
use fieldmap_session::{
    EventOutcome, FieldView, MergeService, PreviewUploader, RequestKind, SchemaProvider,
    ServiceError, SessionError, SessionEvent, SessionState, export_json,
};
use serde_json::json;
use tempfile::TempDir;

fn record(value: serde_json::Value) -> Record {
    value.as_object().cloned().expect("object record")
}

fn loaded_session() -> SessionState {
    let mut session = SessionState::new();
    session
        .load_side(
            Side::Existing,
            RawInput::Json(json!([{"id": 1, "name": "Ada"}, {"id": 2, "name": "Bob"}])),
        )
        .expect("load existing");
    session
        .load_side(
            Side::New,
            RawInput::Json(json!([{"uid": "u1", "full_name": "Ada Lovelace"}])),
        )
        .expect("load new");
    session
}

fn multi_table_session() -> SessionState {
    let mut session = loaded_session();
    session
        .load_side(
            Side::New,
            RawInput::Json(json!({
                "people": [{"uid": "u1", "full_name": "Ada"}],
                "orders": [{"order_id": 1, "total": 3}],
                "empty": []
            })),
        )
        .expect("load multi-table");
    session
}

struct FakeProvider(std::result::Result<Vec<String>, ServiceError>);

impl SchemaProvider for FakeProvider {
    fn fetch_schema(&self) -> std::result::Result<Vec<String>, ServiceError> {
        self.0.clone()
    }
}

struct FakeUploader(std::result::Result<Vec<Record>, ServiceError>);

impl PreviewUploader for FakeUploader {
    fn upload_preview(&self, _path: &Path) -> std::result::Result<Vec<Record>, ServiceError> {
        self.0.clone()
    }
}

struct FakeMerge {
    calls: Cell<usize>,
    reply: std::result::Result<MergeResponse, ServiceError>,
}

impl MergeService for FakeMerge {
    fn process_merge(
        &self,
        _request: &MergeRequest,
    ) -> std::result::Result<MergeResponse, ServiceError> {
        self.calls.set(self.calls.get() + 1);
        self.reply.clone()
    }
}

// === Selection scenarios ===

#[test]
fn scenario_map_then_unmap() {
    let mut session = loaded_session();
    session.click(Side::Existing, "name");
    session.click(Side::New, "full_name");
    assert_eq!(
        session.mappings().as_slice(),
        [Mapping::new("name", "full_name")]
    );

    session.click(Side::Existing, "name");
    assert!(session.mappings().is_empty());
    assert!(session.selection().is_idle());
}

#[test]
fn scenario_same_side_discard() {
    let mut session = loaded_session();
    session.click(Side::Existing, "id");
    let outcome = session.click(Side::Existing, "name");
    assert!(matches!(outcome, ClickOutcome::Discarded(_)));
    assert!(session.selection().is_idle());
    assert!(session.mappings().is_empty());
}

#[test]
fn scenario_merge_request_projection() {
    let mut session = loaded_session();
    session.click(Side::Existing, "id");
    session.click(Side::New, "uid");
    session.click(Side::Existing, "name");
    session.click(Side::New, "full_name");

    let records = vec![record(json!({"uid": "u9", "full_name": "Zoe"}))];
    let request = session.build_merge_request(records.clone());
    assert_eq!(request.matching_fields, vec!["id", "name"]);
    assert_eq!(
        request.field_mappings.mappings,
        vec![Mapping::new("id", "uid"), Mapping::new("name", "full_name")]
    );
    assert_eq!(request.new_data, records);
}

#[test]
fn armed_field_resolves_active_table() {
    let mut session = multi_table_session();
    let outcome = session.click(Side::New, "uid");
    let ClickOutcome::Armed(field) = outcome else {
        panic!("expected armed outcome, got {outcome:?}");
    };
    assert_eq!(field.table, "people");
    assert_eq!(session.selection(), &SelectionState::Armed(field));
}

#[test]
fn field_views_flag_mapped_and_selected() {
    let mut session = loaded_session();
    session.click(Side::Existing, "id");
    session.click(Side::New, "uid");
    session.click(Side::Existing, "name");

    assert_eq!(
        session.field_views(Side::Existing),
        vec![
            FieldView {
                name: "id".to_string(),
                mapped: true,
                selected: false
            },
            FieldView {
                name: "name".to_string(),
                mapped: false,
                selected: true
            },
        ]
    );
    assert!(session.field_views(Side::New)[0].mapped);
}

#[test]
fn remove_mapping_by_index() {
    let mut session = loaded_session();
    session.click(Side::Existing, "id");
    session.click(Side::New, "uid");
    session.click(Side::Existing, "name");

    assert_eq!(session.remove_mapping(7), None);
    assert_eq!(session.remove_mapping(0), Some(Mapping::new("id", "uid")));
    assert!(session.mappings().is_empty());

    // The armed field survives a list removal and still completes a pair.
    assert!(session.field_views(Side::Existing)[1].selected);
    session.click(Side::New, "full_name");
    assert_eq!(
        session.mappings().as_slice(),
        [Mapping::new("name", "full_name")]
    );
    assert!(session.selection().is_idle());
}

#[test]
fn connectors_follow_mapping_order_and_skip_hidden_fields() {
    let mut session = loaded_session();
    session.click(Side::Existing, "id");
    session.click(Side::New, "uid");
    session.click(Side::Existing, "name");
    session.click(Side::New, "full_name");

    let connectors = session.connectors(|side, name| match (side, name) {
        (Side::Existing, "name") => Some(Rect {
            left: 0.0,
            top: 10.0,
            width: 100.0,
            height: 20.0,
        }),
        (Side::New, "full_name") => Some(Rect {
            left: 300.0,
            top: 50.0,
            width: 80.0,
            height: 10.0,
        }),
        _ => None,
    });
    assert_eq!(connectors.len(), 1);
    assert_eq!(connectors[0].mapping_index, 1);
    assert_eq!(connectors[0].svg_path(), "M 100 20 C 200 20, 200 55, 300 55");
}

// === Loads and table switches ===

#[test]
fn table_switch_clears_state() {
    let mut session = multi_table_session();
    session.click(Side::Existing, "id");
    session.click(Side::New, "uid");
    session.click(Side::Existing, "name");
    assert_eq!(session.mappings().len(), 1);

    session.select_table(Side::New, "orders").expect("switch table");
    assert!(session.mappings().is_empty());
    assert!(session.selection().is_idle());
    assert_eq!(session.fields(Side::New), ["order_id", "total"]);
}

#[test]
fn empty_table_has_no_fields() {
    let mut session = multi_table_session();
    session.select_table(Side::New, "empty").expect("switch table");
    assert!(session.fields(Side::New).is_empty());
    assert!(session.field_views(Side::New).is_empty());
}

#[test]
fn unknown_table_is_rejected_without_side_effects() {
    let mut session = multi_table_session();
    session.click(Side::Existing, "id");
    session.click(Side::New, "uid");

    let err = session.select_table(Side::New, "missing").unwrap_err();
    assert_eq!(
        err,
        SessionError::UnknownTable {
            side: Side::New,
            table: "missing".to_string()
        }
    );
    assert_eq!(session.mappings().len(), 1);
    assert_eq!(session.last_error(), Some(&err));
}

#[test]
fn select_table_requires_loaded_side() {
    let mut session = SessionState::new();
    let err = session.select_table(Side::Existing, "default").unwrap_err();
    assert_eq!(err, SessionError::SideNotLoaded(Side::Existing));
}

#[test]
fn new_load_clears_mappings() {
    let mut session = loaded_session();
    session.click(Side::Existing, "id");
    session.click(Side::New, "uid");

    session
        .load_side(Side::Existing, RawInput::Json(json!([{"code": "x"}])))
        .expect("reload");
    assert!(session.mappings().is_empty());
    assert_eq!(session.fields(Side::Existing), ["code"]);
}

#[test]
fn decode_error_leaves_session_unchanged() {
    let mut session = loaded_session();
    session.click(Side::Existing, "id");
    session.click(Side::New, "uid");

    let err = session
        .load_side(Side::New, RawInput::Bytes(b"{not json".to_vec()))
        .unwrap_err();
    assert!(matches!(err, SessionError::Decode(_)));
    assert_eq!(session.mappings().len(), 1);
    assert_eq!(session.fields(Side::New), ["uid", "full_name"]);
    assert!(session.last_error().is_some());

    // The next action clears the banner.
    session.click(Side::Existing, "name");
    assert!(session.last_error().is_none());
}

// === Artifacts ===

#[test]
fn export_document_snapshot() {
    let mut session = loaded_session();
    session.click(Side::Existing, "name");
    session.click(Side::New, "full_name");

    let at = Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap();
    let json = export_json(&session.build_export_document_at(at)).expect("serialize");
    insta::assert_snapshot!(json, @r#"
    {
      "mappings": [
        {
          "existing": "name",
          "new": "full_name"
        }
      ],
      "metadata": {
        "exportDate": "2024-05-01T10:00:00.000Z",
        "existingDataFields": [
          "id",
          "name"
        ],
        "newDataFields": [
          "uid",
          "full_name"
        ]
      }
    }
    "#);
}

#[test]
fn export_without_data_has_empty_field_lists() {
    let session = SessionState::new();
    let document = session.build_export_document();
    assert!(document.mappings.is_empty());
    assert!(document.metadata.existing_data_fields.is_empty());
    assert!(document.metadata.new_data_fields.is_empty());
}

#[test]
fn write_export_round_trips_through_file() {
    let mut session = loaded_session();
    session.click(Side::New, "uid");
    session.click(Side::Existing, "id");

    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("field-mappings.json");
    let written = session.write_export(&path).expect("write export");

    let on_disk: ExportDocument =
        serde_json::from_str(&fs::read_to_string(&path).expect("read")).expect("parse");
    assert_eq!(on_disk, written);
    assert_eq!(on_disk.mappings, vec![Mapping::new("id", "uid")]);
}

#[test]
fn write_export_reports_io_failure() {
    let mut session = loaded_session();
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("missing-dir").join("out.json");
    let err = session.write_export(&path).unwrap_err();
    assert!(matches!(err, SessionError::Export(_)));
    assert_eq!(session.last_error(), Some(&err));
}

#[test]
fn write_export_clears_previous_error() {
    let mut session = loaded_session();
    session.select_table(Side::New, "missing").unwrap_err();
    assert!(session.last_error().is_some());

    let dir = TempDir::new().expect("temp dir");
    session
        .write_export(&dir.path().join("field-mappings.json"))
        .expect("write export");
    assert!(session.last_error().is_none());
}

// === Backend requests ===

#[test]
fn schema_fetch_populates_existing_side() {
    let mut session = SessionState::new();
    let provider = FakeProvider(Ok(vec!["id".to_string(), "amount".to_string()]));
    session.fetch_existing_schema(&provider).expect("fetch");
    assert_eq!(session.fields(Side::Existing), ["id", "amount"]);
    assert!(!session.is_busy(RequestKind::SchemaFetch));
}

#[test]
fn schema_fetch_failure_leaves_empty_usable_schema() {
    let mut session = SessionState::new();
    let provider = FakeProvider(Err(ServiceError::Network("refused".to_string())));
    let err = session.fetch_existing_schema(&provider).unwrap_err();
    assert!(matches!(err, SessionError::SchemaFetch(_)));
    let existing = session.side(Side::Existing).expect("empty schema installed");
    assert!(existing.fields().is_empty());
    assert_eq!(session.last_error(), Some(&err));

    session
        .load_side(Side::New, RawInput::Json(json!([{"uid": 1}])))
        .expect("session still usable");
}

#[test]
fn stale_schema_response_is_discarded() {
    let mut session = SessionState::new();
    let old = session.begin_schema_fetch();
    let fresh = session.begin_schema_fetch();

    let applied = session
        .complete_schema_fetch(old, Ok(vec!["stale".to_string()]))
        .expect("stale is not an error");
    assert!(!applied);
    assert!(session.side(Side::Existing).is_none());

    assert!(
        session
            .complete_schema_fetch(fresh, Ok(vec!["fresh".to_string()]))
            .expect("apply")
    );
    assert_eq!(session.fields(Side::Existing), ["fresh"]);
}

#[test]
fn file_load_supersedes_pending_upload() {
    let mut session = loaded_session();
    let ticket = session.begin_upload();
    session
        .load_side(Side::New, RawInput::Json(json!([{"local": true}])))
        .expect("local load");

    let outcome = session
        .apply(SessionEvent::PreviewUploaded {
            ticket,
            result: Ok(vec![record(json!({"remote": true}))]),
        })
        .expect("apply");
    assert_eq!(outcome, EventOutcome::ResponseDiscarded);
    assert_eq!(session.fields(Side::New), ["local"]);
}

#[test]
fn upload_failure_preserves_mappings() {
    let mut session = loaded_session();
    session.click(Side::Existing, "id");
    session.click(Side::New, "uid");

    let uploader = FakeUploader(Err(ServiceError::Status {
        status: 500,
        message: "boom".to_string(),
    }));
    let err = session
        .upload_new(&uploader, Path::new("new.csv"))
        .unwrap_err();
    assert!(matches!(err, SessionError::Upload(_)));
    assert!(!session.is_busy(RequestKind::UploadPreview));
    assert_eq!(session.mappings().len(), 1);
}

#[test]
fn upload_success_replaces_new_side() {
    let mut session = loaded_session();
    let uploader = FakeUploader(Ok(vec![record(json!({"code": "A", "label": "x"}))]));
    session
        .upload_new(&uploader, Path::new("new.xlsx"))
        .expect("upload");
    assert_eq!(session.fields(Side::New), ["code", "label"]);
}

#[test]
fn second_merge_is_rejected_while_outstanding() {
    let mut session = loaded_session();
    session.click(Side::Existing, "id");
    session.click(Side::New, "uid");

    let (ticket, request) = session.begin_merge().expect("first merge");
    assert_eq!(request.matching_fields, vec!["id"]);
    assert_eq!(request.new_data.len(), 1);

    let err = session.begin_merge().unwrap_err();
    assert_eq!(err, SessionError::Busy(RequestKind::Merge));
    assert!(session.is_busy(RequestKind::Merge));

    let message = session
        .complete_merge(ticket, Ok(MergeResponse {
            message: "Merged 1 record".to_string(),
        }))
        .expect("complete");
    assert_eq!(message.as_deref(), Some("Merged 1 record"));
    assert_eq!(session.merge_status(), Some("Merged 1 record"));
    assert!(!session.is_busy(RequestKind::Merge));
}

#[test]
fn merge_failure_clears_busy_and_keeps_mappings() {
    let mut session = loaded_session();
    session.click(Side::Existing, "name");
    session.click(Side::New, "full_name");

    let service = FakeMerge {
        calls: Cell::new(0),
        reply: Err(ServiceError::Network("timeout".to_string())),
    };
    let err = session.process_merge(&service).unwrap_err();
    assert!(err.is_retryable());
    assert!(!session.is_busy(RequestKind::Merge));
    assert_eq!(session.mappings().len(), 1);

    let service = FakeMerge {
        calls: Cell::new(0),
        reply: Ok(MergeResponse {
            message: "ok".to_string(),
        }),
    };
    assert_eq!(session.process_merge(&service).expect("retry"), "ok");
    assert_eq!(service.calls.get(), 1);
}

#[test]
fn merge_requires_new_data() {
    let mut session = SessionState::new();
    assert_eq!(
        session.begin_merge().unwrap_err(),
        SessionError::SideNotLoaded(Side::New)
    );
}

// === Reducer ===

#[test]
fn reducer_drives_full_session() {
    let mut session = SessionState::new();
    let events = vec![
        SessionEvent::Load {
            side: Side::Existing,
            raw: RawInput::Json(json!([{"id": 1, "name": "Ada"}])),
        },
        SessionEvent::Load {
            side: Side::New,
            raw: RawInput::Json(json!([{"uid": 1, "full_name": "Ada"}])),
        },
        SessionEvent::Click {
            side: Side::Existing,
            field: "name".to_string(),
        },
        SessionEvent::Click {
            side: Side::New,
            field: "full_name".to_string(),
        },
    ];
    for event in events {
        session.apply(event).expect("event applies");
    }
    assert_eq!(
        session.mappings().as_slice(),
        [Mapping::new("name", "full_name")]
    );

    let outcome = session
        .apply(SessionEvent::RemoveMapping { index: 0 })
        .expect("remove");
    assert_eq!(
        outcome,
        EventOutcome::MappingRemoved(Some(Mapping::new("name", "full_name")))
    );

    let ticket = session.begin_schema_fetch();
    let outcome = session
        .apply(SessionEvent::SchemaFetched {
            ticket,
            result: Ok(vec!["id".to_string(), "name".to_string(), "region".to_string()]),
        })
        .expect("schema fetched");
    assert_eq!(outcome, EventOutcome::ResponseApplied);
    assert_eq!(session.fields(Side::Existing), ["id", "name", "region"]);

    let outcome = session
        .apply(SessionEvent::SelectTable {
            side: Side::New,
            table: "default".to_string(),
        })
        .expect("table selected");
    assert_eq!(outcome, EventOutcome::TableSelected(Side::New));

    for (side, field) in [(Side::Existing, "id"), (Side::New, "uid")] {
        session
            .apply(SessionEvent::Click {
                side,
                field: field.to_string(),
            })
            .expect("click");
    }
    let (ticket, request) = session.begin_merge().expect("begin merge");
    assert_eq!(request.matching_fields, vec!["id"]);

    let merged = SessionEvent::MergeProcessed {
        ticket,
        result: Ok(MergeResponse {
            message: "Merged 1 record".to_string(),
        }),
    };
    let outcome = session.apply(merged.clone()).expect("merge processed");
    assert_eq!(outcome, EventOutcome::Merged("Merged 1 record".to_string()));
    assert_eq!(session.merge_status(), Some("Merged 1 record"));

    // The same ticket again is no longer current.
    assert_eq!(
        session.apply(merged).expect("duplicate response"),
        EventOutcome::ResponseDiscarded
    );
}
