//! Integration tests for nameplate
//!
//! These tests drive the public API end to end: the catalog store, the
//! cascade editor in both gather modes, and the JSON request layer used by
//! the `exec` command.

use nameplate::ErrorKind;
use nameplate::catalog::{CatalogError, CatalogSnapshot, CatalogStore, DeviceMap, Level};
use nameplate::cli::run_script;
use nameplate::config::EditorConfig;
use nameplate::editor::{CascadeEditor, Command};
use nameplate::output::{BufferedWriter, MessageLevel};
use nameplate::select::{CandidateSource, GatherMode, InputAction, MultiSelect};
use nameplate::session::Session;
use serde_json::Value;
use std::fs;

fn check(value: &str) -> InputAction {
    InputAction::Toggle {
        value: value.to_string(),
        checked: true,
    }
}

#[test]
fn test_welding_scenario() {
    let mut store = CatalogStore::new();
    store.add_type("焊接机").unwrap();
    assert_eq!(store.selected_type(), Some("焊接机"));

    store.add_device(Some("焊接机"), "33号焊接机").unwrap();
    store.select_device("33号焊接机").unwrap();
    store
        .add_station(Some("焊接机"), Some("33号焊接机"), "伺服电机")
        .unwrap();

    let stations = store.delete_device("焊接机", "33号焊接机").unwrap();
    assert_eq!(stations, vec!["伺服电机"]);
    assert!(store.list_devices("焊接机").is_empty());
    assert_eq!(store.selected_device(), None);
    assert_eq!(store.selected_type(), Some("焊接机"));
}

#[test]
fn test_duplicate_rejection_leaves_store_unchanged() {
    let mut store = CatalogStore::from_snapshot(CatalogSnapshot::with_types(["吸塑机"])).unwrap();
    let before = store.snapshot();

    let err = store.add_type(" 吸塑机 ").unwrap_err();
    assert_eq!(
        err,
        CatalogError::Duplicate {
            level: Level::Type,
            name: "吸塑机".to_string()
        }
    );
    assert_eq!(store.snapshot(), before);
}

#[test]
fn test_snapshot_injection_rejects_dangling_pointer() {
    let mut snapshot = CatalogSnapshot::with_types(["注塑机"]);
    snapshot.selected_type = Some("注塑机".to_string());
    snapshot.selected_device = Some("30号注塑机".to_string());
    let err = CatalogStore::from_snapshot(snapshot).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidSnapshot);
}

#[test]
fn test_filter_does_not_touch_selection() {
    let mut control = MultiSelect::new("pick", ["A1", "A2", "B1"]);
    control.toggle("A1", true).unwrap();
    control.set_search("B").unwrap();
    control.set_search("").unwrap();
    assert_eq!(control.get_selected(), vec!["A1"]);
}

#[test]
fn test_select_all_is_scoped_to_search() {
    let mut control = MultiSelect::new("pick", ["A1", "A2", "B1"]);
    control.set_search("A").unwrap();
    control.select_all_visible(true).unwrap();
    assert_eq!(control.get_selected(), vec!["A1", "A2"]);
    assert!(control.all_visible_checked());
}

#[test]
fn test_editor_multi_select_flow() {
    let mut editor = CascadeEditor::from_config(&EditorConfig::default()).unwrap();

    editor.select_type("吸塑机").unwrap();
    editor.open(Level::Device).unwrap();
    editor
        .input(Level::Device, InputAction::SetSearch { term: "吸塑".into() })
        .unwrap();
    editor
        .input(Level::Device, InputAction::SelectAllVisible { checked: true })
        .unwrap();
    let report = editor.commit(Level::Device).unwrap();
    assert_eq!(report.added, vec!["25号吸塑机", "26号吸塑机"]);

    editor.select_device("26号吸塑机").unwrap();
    editor.open(Level::Station).unwrap();
    assert!(!editor.control(Level::Device).unwrap().is_open());

    editor.input(Level::Station, check("成型工位")).unwrap();
    editor.input(Level::Station, check("伺服电机")).unwrap();
    editor.commit(Level::Station).unwrap();
    assert_eq!(
        editor.store().list_stations("吸塑机", "26号吸塑机"),
        vec!["成型工位", "伺服电机"]
    );

    // Switching type clears the device and disables the station column
    editor.select_type("注塑机").unwrap();
    assert_eq!(editor.store().selected_device(), None);
    assert!(editor.control(Level::Station).unwrap().is_disabled());
}

#[test]
fn test_editor_added_option_is_not_checked() {
    let mut editor = CascadeEditor::from_config(&EditorConfig::default()).unwrap();
    editor
        .input(Level::Type, InputAction::SetDraft { text: "包装机".into() })
        .unwrap();
    editor.input(Level::Type, InputAction::CommitDraft).unwrap();

    let view = editor.control(Level::Type).unwrap().view();
    assert!(view.options.iter().any(|o| o.value == "包装机" && !o.checked));
    assert_eq!(view.draft, "");
    assert_eq!(
        editor.commit(Level::Type).unwrap_err().kind(),
        ErrorKind::Empty
    );
}

#[test]
fn test_editor_text_entry_flow() {
    let config = EditorConfig {
        gather_mode: GatherMode::TextEntry,
        ..EditorConfig::default()
    };
    let mut editor = CascadeEditor::from_config(&config).unwrap();
    assert_eq!(editor.control(Level::Type).unwrap().mode(), GatherMode::TextEntry);

    editor.select_type("冲压机").unwrap();
    editor
        .input(Level::Device, InputAction::SetDraft { text: "32号冲压机".into() })
        .unwrap();
    editor.commit(Level::Device).unwrap();

    let err = editor
        .input(Level::Device, InputAction::SetSearch { term: "x".into() })
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Unsupported);
    assert_eq!(editor.store().list_devices("冲压机"), vec!["32号冲压机"]);
}

#[test]
fn test_command_layer_cascade() {
    let mut snapshot = CatalogSnapshot::with_types(["焊接机"]);
    let mut devices = DeviceMap::new();
    devices.insert("33号焊接机".to_string(), vec!["伺服电机".to_string()]);
    snapshot.types.insert("焊接机".to_string(), devices);
    snapshot.selected_type = Some("焊接机".to_string());
    snapshot.selected_device = Some("33号焊接机".to_string());

    let mut editor =
        CascadeEditor::from_snapshot(&EditorConfig::default(), snapshot).unwrap();
    let response = editor.apply(Command::DeleteType {
        name: "焊接机".to_string(),
    });
    assert!(response.ok);
    assert_eq!(response.data.unwrap()["devices"], 1);

    let view = editor.view();
    assert_eq!(view.selected_type, None);
    assert_eq!(view.selected_device, None);
    assert!(view.columns[0].items.is_empty());
}

#[test]
fn test_session_script_end_to_end() {
    let script = [
        r#"{"target":"catalog","request":{"op":"add","level":"type","name":"焊接机"}}"#,
        r#"{"target":"catalog","request":{"op":"add","level":"type","name":"包装机"}}"#,
        r#"{"target":"catalog","request":{"op":"add","level":"device","name":"40号包装机"}}"#,
        r#"{"target":"catalog","request":{"op":"select_device","name":"40号包装机"}}"#,
        r#"{"target":"catalog","request":{"op":"add_many","level":"station","names":["上料工位","上料工位"," "]}}"#,
        r#"{"target":"catalog","request":{"op":"snapshot"}}"#,
        r#"{"target":"tags","request":{"op":"delete","id":999}}"#,
        r##"{"target":"nav","request":{"op":"navigate","route":"#settings-graph"}}"##,
    ]
    .join("\n");

    let mut session = Session::new(&EditorConfig::default()).unwrap();
    let out = BufferedWriter::new();
    let summary = run_script(&mut session, script.as_bytes(), &out, false).unwrap();
    assert_eq!(summary.requests, 8);
    assert_eq!(summary.failures, 2);

    let responses: Vec<Value> = out
        .messages_at(MessageLevel::Normal)
        .iter()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();

    assert_eq!(responses[0]["kind"], "Duplicate");
    assert_eq!(responses[2]["data"]["added"], "40号包装机");

    let batch = &responses[4]["data"];
    assert_eq!(batch["added"], serde_json::json!(["上料工位"]));
    assert_eq!(batch["rejected"][0]["kind"], "Empty");

    let snapshot = &responses[5]["data"];
    assert_eq!(snapshot["selected_type"], "包装机");
    assert_eq!(snapshot["types"]["包装机"]["40号包装机"][0], "上料工位");

    assert_eq!(responses[6]["kind"], "NotFound");
    assert_eq!(responses[7]["data"]["submenu_open"], true);
    assert_eq!(out.messages_at(MessageLevel::Error).len(), 2);
}

#[test]
fn test_config_file_drives_session() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(
        &path,
        "gather_mode = \"text_entry\"\nnew_type_policy = \"manual\"\n[seed]\ntypes = [\"装配线\"]\n",
    )
    .unwrap();

    let config = EditorConfig::load_from(&path).unwrap();
    let mut session = Session::new(&config).unwrap();
    assert_eq!(session.editor().store().list_types(), vec!["装配线"]);

    let response = session.handle_line(
        r#"{"target":"catalog","request":{"op":"add","level":"type","name":"焊接机"}}"#,
    );
    assert!(response.ok);
    assert_eq!(session.editor().store().selected_type(), None);
}
