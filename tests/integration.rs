//! Integration tests for dossier.

#![allow(clippy::unwrap_used, clippy::uninlined_format_args)]

use std::sync::Arc;

use arrow::{
    array::{Int64Array, RecordBatch, StringArray},
    datatypes::{DataType, Field, Schema},
};
use dossier::{
    Action, Archive, ArchiveConfig, CsvOptions, Error, FileLoader, RecordStore, SessionState,
    Table, TableCache, TableKey, Value, ViewKind, DEFAULT_IDENTITY_KEYWORDS,
};

fn labels(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| (*s).to_string()).collect()
}

fn two_people() -> Arc<Table> {
    Arc::new(
        Table::new(
            labels(&["姓名", "性别"]),
            vec![
                vec![Value::from("Li Hua"), Value::from("F")],
                vec![Value::from("Wang Wei"), Value::from("M")],
            ],
        )
        .unwrap(),
    )
}

#[test]
fn test_names_sorted_and_filtered() {
    let archive = Archive::open(two_people(), &ArchiveConfig::default()).unwrap();
    assert_eq!(archive.names(), ["Li Hua", "Wang Wei"]);
    assert_eq!(archive.search(Some("Wang")), vec!["Wang Wei"]);
    assert_eq!(archive.search(Some("")), vec!["Li Hua", "Wang Wei"]);
}

#[test]
fn test_row_without_name_stays_in_table() {
    let table = Arc::new(
        Table::new(
            labels(&["姓名", "性别"]),
            vec![
                vec![Value::from("Li Hua"), Value::from("F")],
                vec![Value::Empty, Value::from("M")],
            ],
        )
        .unwrap(),
    );
    let store = RecordStore::from_table(Arc::clone(&table), DEFAULT_IDENTITY_KEYWORDS).unwrap();
    assert_eq!(store.names(), ["Li Hua"]);
    assert_eq!(store.table().row_count(), 2);
    assert_eq!(table.rows()[1].get("性别"), Some(&Value::from("M")));
}

#[test]
fn test_missing_column_renders_placeholder() {
    let archive = Archive::open(two_people(), &ArchiveConfig::default()).unwrap();
    let record = archive.lookup("Li Hua").unwrap();
    let basic = archive.project(record, ViewKind::Basic);
    let entry = basic.entries().find(|e| e.label == "籍贯").unwrap();
    assert_eq!((entry.label.as_str(), entry.value.as_str()), ("籍贯", "not filled"));
    assert!(!entry.filled);
}

#[test]
fn test_duplicate_identity_keeps_first_row() {
    let build = || {
        let table = Table::new(
            labels(&["姓名", "现任职务"]),
            vec![
                vec![Value::from("Li Hua"), Value::from("处长")],
                vec![Value::from("Li Hua"), Value::from("科员")],
            ],
        )
        .unwrap();
        RecordStore::from_table(Arc::new(table), DEFAULT_IDENTITY_KEYWORDS).unwrap()
    };

    let first = build();
    let second = build();
    for store in [&first, &second] {
        assert_eq!(store.names(), ["Li Hua"]);
        assert_eq!(
            store.lookup("Li Hua").unwrap().get("现任职务"),
            Some(&Value::from("处长"))
        );
        assert_eq!(store.duplicates(), ["Li Hua"]);
    }
}

#[test]
fn test_no_identity_column_fails_before_indexing() {
    let table = Table::new(
        labels(&["性别", "民族"]),
        vec![vec![Value::from("F"), Value::from("汉族")]],
    )
    .unwrap();
    let err = RecordStore::from_table(Arc::new(table), DEFAULT_IDENTITY_KEYWORDS).unwrap_err();
    match err {
        Error::NameColumnNotFound { keywords, columns } => {
            assert_eq!(keywords.len(), 3);
            assert_eq!(columns, ["性别", "民族"]);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_identity_column_found_by_substring() {
    let table = Table::new(
        labels(&["序号", "人员姓名", "性别"]),
        vec![vec![Value::Int(1), Value::from("Li Hua"), Value::from("F")]],
    )
    .unwrap();
    let archive = Archive::open(Arc::new(table), &ArchiveConfig::default()).unwrap();
    assert_eq!(archive.identity_column(), "人员姓名");
    let full = archive.dossier("Li Hua").unwrap().full;
    assert_eq!(full.value("序号"), Some("1"));
}

#[test]
fn test_arrow_batches_with_nulls() {
    let schema = Arc::new(Schema::new(vec![
        Field::new("姓名", DataType::Utf8, true),
        Field::new("年度考核结果", DataType::Int64, true),
    ]));
    let batch = RecordBatch::try_new(
        Arc::clone(&schema),
        vec![
            Arc::new(StringArray::from(vec![Some("Li Hua"), None, Some("Wang Wei")])),
            Arc::new(Int64Array::from(vec![None, Some(2022), Some(2023)])),
        ],
    )
    .unwrap();

    let table = Table::from_batches(&schema, &[batch]).unwrap();
    assert_eq!(table.row_count(), 3);

    let archive = Archive::open(Arc::new(table), &ArchiveConfig::default()).unwrap();
    assert_eq!(archive.names(), ["Li Hua", "Wang Wei"]);
    let li = archive.dossier("Li Hua").unwrap();
    assert_eq!(li.work.value("年度考核结果"), Some("not filled"));
    assert_eq!(li.full.len(), 1);
    let wang = archive.dossier("Wang Wei").unwrap();
    assert_eq!(wang.work.value("年度考核结果"), Some("2023"));
}

#[test]
fn test_csv_keeps_text_verbatim() {
    let csv = "姓名,出生年月,学历\nLi Hua,1975.10,\"大学, 本科\"\n";
    let table = Table::from_csv_str(csv, &CsvOptions::default()).unwrap();
    let archive = Archive::open(Arc::new(table), &ArchiveConfig::default()).unwrap();
    let basic = archive.dossier("Li Hua").unwrap().basic;
    assert_eq!(basic.value("出生年月"), Some("1975.10"));
}

#[test]
fn test_session_survives_reload_that_drops_selection() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("档案.csv");
    std::fs::write(&path, "姓名,性别\nLi Hua,F\nWang Wei,M\n").unwrap();

    let cache = TableCache::new(FileLoader::default());
    let key = TableKey::new(&path);
    let config = ArchiveConfig::default();

    let archive = Archive::open(cache.get(&key).unwrap(), &config).unwrap();
    let screen = archive.step(SessionState::default(), Action::Select("Wang Wei".into()));
    assert!(screen.dossier.is_some());
    let state = screen.state;

    std::fs::write(&path, "姓名,性别\nLi Hua,F\n").unwrap();
    let reloaded = Archive::open(cache.reload(&key).unwrap(), &config).unwrap();
    let screen = reloaded.step(state, Action::Refresh);

    assert!(screen.state.selected.is_none());
    assert!(screen.dossier.is_none());
    let notice = screen.notice.unwrap();
    assert!(!notice.is_fatal());
    assert_eq!(screen.names, vec!["Li Hua"]);
}

#[test]
fn test_sheet_directory_source() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("档案清单.csv"), "名字\nLi Hua\n").unwrap();

    let cache = TableCache::new(FileLoader::default());
    let key = TableKey::new(dir.path()).with_sheet("档案清单");
    let archive = Archive::open(cache.get(&key).unwrap(), &ArchiveConfig::default()).unwrap();
    assert_eq!(archive.identity_column(), "名字");

    let missing = TableKey::new(dir.path()).with_sheet("其他");
    assert!(matches!(cache.get(&missing), Err(Error::SheetNotFound { .. })));
}

#[test]
fn test_config_from_toml_changes_behavior() {
    let config = ArchiveConfig::from_toml_str(
        r#"
        identity_keywords = ["Name"]
        placeholder = "未填写"
        "#,
    )
    .unwrap();
    let table = Table::new(
        labels(&["Full Name", "性别"]),
        vec![vec![Value::from("Li Hua"), Value::Empty]],
    )
    .unwrap();
    let archive = Archive::open(Arc::new(table), &config).unwrap();
    assert_eq!(archive.identity_column(), "Full Name");
    assert_eq!(archive.dossier("Li Hua").unwrap().basic.value("性别"), Some("未填写"));
}
