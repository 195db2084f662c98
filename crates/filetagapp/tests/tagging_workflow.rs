//! End-to-end library workflows against a real record file.

use filetagapp::api::FiletagApi;
use filetagapp::attributes::{AttrValue, Condition, Matcher, Metadata, Query};
use filetagapp::config::FiletagConfig;
use filetagapp::error::FiletagError;
use filetagapp::init::initialize;
use filetagapp::model::{Collection, File};
use filetagapp::store::fs_backend::FsBackend;
use filetagapp::store::{MetadataStore, RecordStore};
use filetagapp::walk::WalkOptions;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

struct Fixture {
    _root: TempDir,
    data: PathBuf,
    store_file: PathBuf,
}

impl Fixture {
    fn new() -> Self {
        let root = TempDir::new().unwrap();
        let data = fs::canonicalize(root.path()).unwrap().join("data");
        fs::create_dir_all(&data).unwrap();
        fs::write(data.join("a.csv"), "1,2,3").unwrap();
        fs::write(data.join("b.txt"), "hello").unwrap();
        let store_file = root.path().join("store").join("records.json");
        Self {
            _root: root,
            data,
            store_file,
        }
    }

    fn api(&self) -> FiletagApi<RecordStore<FsBackend>> {
        FiletagApi::new(RecordStore::with_backend(FsBackend::new(&self.store_file)))
    }
}

#[test]
fn directory_group_tag_then_find_and_filter() {
    let fx = Fixture::new();
    let mut api = fx.api();

    let mut cl = Collection::from_dir(&fx.data, &WalkOptions::default()).unwrap();
    cl.set("group", "train").unwrap();
    api.add(&cl).unwrap();

    let train = api.find(&Query::all().eq("group", "train")).unwrap();
    assert_eq!(train.len(), 2);

    let csvs = train.filter(|f| f.name().ends_with(".csv"));
    assert_eq!(csvs.paths(), vec![fx.data.join("a.csv").as_path()]);
    // filter leaves its source alone
    assert_eq!(train.len(), 2);

    let mut a = api
        .find_one(&Query::all().eq("group", "train"))
        .unwrap()
        .unwrap();
    a.set("count", 10).unwrap();
    api.add(&a).unwrap();

    let counted = api
        .find(&Query::all().with(Condition::new("count", Matcher::Lt(AttrValue::from(30)))))
        .unwrap();
    assert_eq!(counted.len(), 1);
    assert_eq!(counted[0].get("group"), Some(&AttrValue::from("train")));
    assert_eq!(counted[0].get("count"), Some(&AttrValue::Integer(10)));
}

#[test]
fn merge_keeps_fields_across_separate_sessions() {
    let fx = Fixture::new();
    let a_path = fx.data.join("a.csv");

    let mut file = File::open(&a_path).unwrap();
    file.set("group", "train").unwrap();
    file.set("owner", "ana").unwrap();
    fx.api().add(&file).unwrap();

    // new session, partial update
    let mut file = File::open(&a_path).unwrap();
    file.set("group", "test").unwrap();
    fx.api().add(&file).unwrap();

    let stored = fx.api().find_one(&Query::all()).unwrap().unwrap();
    assert_eq!(stored.get("group"), Some(&AttrValue::from("test")));
    assert_eq!(stored.get("owner"), Some(&AttrValue::from("ana")));
}

#[test]
fn unpersisted_changes_are_invisible_to_queries() {
    let fx = Fixture::new();
    let api = fx.api();

    let mut file = File::open(fx.data.join("a.csv")).unwrap();
    file.set("group", "train").unwrap();

    assert!(api.find(&Query::all().eq("group", "train")).unwrap().is_empty());
    assert!(!fx.store_file.exists());
}

#[test]
fn conflicting_collections_last_add_wins() {
    let fx = Fixture::new();
    let mut api = fx.api();

    let mut first = Collection::from_dir(&fx.data, &WalkOptions::default()).unwrap();
    let mut second = Collection::from_dir(&fx.data, &WalkOptions::default()).unwrap();
    first.set("group", "train").unwrap();
    second.set("group", "test").unwrap();

    api.add(&first).unwrap();
    api.add(&second).unwrap();

    assert!(api.find(&Query::all().eq("group", "train")).unwrap().is_empty());
    assert_eq!(api.find(&Query::all().eq("group", "test")).unwrap().len(), 2);
}

#[test]
fn vanished_files_stay_queryable_until_doctor_fix() {
    let fx = Fixture::new();
    let mut api = fx.api();
    api.tag_paths("group", "train", &[&fx.data]).unwrap();
    fs::remove_file(fx.data.join("b.txt")).unwrap();

    assert_eq!(api.find(&Query::all().eq("group", "train")).unwrap().len(), 2);

    let report = api.doctor(true).unwrap().report.unwrap();
    assert_eq!(report.missing_files, vec![fx.data.join("b.txt")]);
    assert_eq!(api.find(&Query::all().eq("group", "train")).unwrap().len(), 1);
}

#[test]
fn read_only_context_rejects_add_but_answers_queries() {
    let fx = Fixture::new();
    fx.api().tag_paths("group", "train", &[&fx.data]).unwrap();
    let before = fs::read_to_string(&fx.store_file).unwrap();

    let config = FiletagConfig {
        read_only: true,
        ..Default::default()
    };
    let mut ctx = initialize(config, Some(fx.store_file.clone())).unwrap();

    assert!(ctx.api.tag_paths("group", "test", &[&fx.data]).is_err());
    assert_eq!(ctx.api.find(&Query::all()).unwrap().len(), 2);
    assert_eq!(fs::read_to_string(&fx.store_file).unwrap(), before);
    assert!(ctx.api.store().is_read_only());
}

#[test]
fn listing_under_a_prefix_does_not_match_sibling_directories() {
    let fx = Fixture::new();
    let sibling = fx.data.with_file_name("data2");
    fs::create_dir_all(&sibling).unwrap();
    fs::write(sibling.join("c.csv"), "c").unwrap();

    let mut api = fx.api();
    api.add_paths(&[&fx.data, &sibling]).unwrap();

    let listed = api.list(&fx.data).unwrap().listed;
    assert_eq!(listed.len(), 2);
    assert!(listed.iter().all(|f| f.path().starts_with(&fx.data)));
    assert_eq!(api.list(Path::new(&sibling)).unwrap().listed.len(), 1);
}

#[test]
fn non_finite_float_never_reaches_the_record_file() {
    let fx = Fixture::new();
    let mut api = fx.api();

    let mut b = File::open(fx.data.join("b.txt")).unwrap();
    b.set("group", "train").unwrap();
    api.add(&b).unwrap();

    let mut a = File::open(fx.data.join("a.csv")).unwrap();
    assert!(matches!(
        a.set("ratio", f64::INFINITY),
        Err(FiletagError::InvalidValue { .. })
    ));
    api.add(&a).unwrap();

    let mut store = RecordStore::with_backend(FsBackend::new(&fx.store_file));
    let result = store.upsert(
        a.path(),
        &Metadata::from([("ratio", f64::NAN)]),
    );
    assert!(matches!(result, Err(FiletagError::InvalidValue { .. })));

    let on_disk = fs::read_to_string(&fx.store_file).unwrap();
    assert!(!on_disk.contains("null"));
    let train = api.find(&Query::all().eq("group", "train")).unwrap();
    assert_eq!(train.paths(), vec![fx.data.join("b.txt").as_path()]);
    assert_eq!(api.find(&Query::all()).unwrap().len(), 2);
}
