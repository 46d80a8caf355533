//! Property tests over random click and table-switch sequences.

use chrono::{TimeZone, Utc};
use fieldmap_ingest::RawInput;
use fieldmap_model::Side;
use fieldmap_session::SessionState;
use proptest::prelude::*;
use serde_json::json;

const EXISTING: [&str; 3] = ["id", "name", "email"];
const NEW: [&str; 3] = ["uid", "full_name", "mail"];

#[derive(Debug, Clone)]
enum Action {
    Click(Side, usize),
    SwitchTable(Side),
}

fn action() -> impl Strategy<Value = Action> {
    prop_oneof![
        4 => (any::<bool>(), 0..3usize).prop_map(|(existing, idx)| {
            let side = if existing { Side::Existing } else { Side::New };
            Action::Click(side, idx)
        }),
        1 => any::<bool>().prop_map(|existing| {
            Action::SwitchTable(if existing { Side::Existing } else { Side::New })
        }),
    ]
}

fn session() -> SessionState {
    let mut session = SessionState::new();
    session
        .load_side(
            Side::Existing,
            RawInput::Json(json!({
                "main": [{"id": 1, "name": "a", "email": "e"}],
                "alt": [{"id": 1, "name": "a", "email": "e"}]
            })),
        )
        .unwrap();
    session
        .load_side(
            Side::New,
            RawInput::Json(json!({
                "main": [{"uid": 1, "full_name": "a", "mail": "m"}],
                "alt": [{"uid": 1, "full_name": "a", "mail": "m"}]
            })),
        )
        .unwrap();
    session
}

fn run(session: &mut SessionState, actions: &[Action], toggle: &mut bool) {
    for action in actions {
        match action {
            Action::Click(side, idx) => {
                let name = match side {
                    Side::Existing => EXISTING[*idx],
                    Side::New => NEW[*idx],
                };
                session.click(*side, name);
            }
            Action::SwitchTable(side) => {
                *toggle = !*toggle;
                let table = if *toggle { "alt" } else { "main" };
                session.select_table(*side, table).unwrap();
            }
        }
    }
}

proptest! {
    #[test]
    fn table_switch_always_clears(actions in prop::collection::vec(action(), 0..40), side in any::<bool>()) {
        let mut s = session();
        let mut toggle = false;
        run(&mut s, &actions, &mut toggle);
        let side = if side { Side::Existing } else { Side::New };
        s.select_table(side, "alt").unwrap();
        prop_assert!(s.mappings().is_empty());
        prop_assert!(s.selection().is_idle());
    }

    #[test]
    fn export_is_deterministic(actions in prop::collection::vec(action(), 0..40)) {
        let mut s = session();
        let mut toggle = false;
        run(&mut s, &actions, &mut toggle);

        let first = s.build_export_document();
        let second = s.build_export_document();
        prop_assert_eq!(&first.mappings, &second.mappings);
        prop_assert_eq!(&first.metadata.existing_data_fields, &second.metadata.existing_data_fields);
        prop_assert_eq!(&first.metadata.new_data_fields, &second.metadata.new_data_fields);

        let at = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        prop_assert_eq!(s.build_export_document_at(at), s.build_export_document_at(at));
    }

    #[test]
    fn matching_fields_are_mapped_existing_fields(actions in prop::collection::vec(action(), 0..40)) {
        let mut s = session();
        let mut toggle = false;
        run(&mut s, &actions, &mut toggle);

        let request = s.build_merge_request(Vec::new());
        for field in &request.matching_fields {
            prop_assert!(s.mappings().is_referenced(field, Side::Existing));
        }
        for mapping in s.mappings().iter() {
            prop_assert!(request.matching_fields.contains(&mapping.existing));
        }
    }
}
