//! # Query Engine
//!
//! Turns a [`Query`] into entity objects. Matching happens against stored
//! records only: the filesystem is not consulted, so a record whose file has
//! vanished is still returned (use `doctor` to find those).
//!
//! Results follow store order, which is record creation order. `find_one`
//! therefore always returns the oldest matching record.

use crate::attributes::Query;
use crate::error::Result;
use crate::model::{Collection, File};
use crate::store::{MetadataStore, Record};
use log::debug;

fn to_file(record: Record) -> File {
    File::from_record(record.path, record.metadata)
}

/// All files whose stored metadata satisfies every condition of `query`.
///
/// An empty query returns every tracked file. No match is an empty
/// collection, not an error.
pub fn find<S: MetadataStore + ?Sized>(store: &S, query: &Query) -> Result<Collection> {
    let records = store.scan(&|r| query.matches(&r.path, &r.metadata))?;
    debug!("find [{}]: {} match(es)", query, records.len());
    Ok(Collection::from_files(records.into_iter().map(to_file)))
}

/// The first file, in store order, matching `query`.
pub fn find_one<S: MetadataStore + ?Sized>(store: &S, query: &Query) -> Result<Option<File>> {
    // scan has no early exit; the record list is loaded whole anyway
    let first = store
        .scan(&|r| query.matches(&r.path, &r.metadata))?
        .into_iter()
        .next();
    Ok(first.map(to_file))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::FiletagApi;
    use crate::attributes::{AttrValue, Condition, Matcher, Metadata};
    use crate::store::mem_backend::InMemoryStore;
    use std::path::{Path, PathBuf};

    fn meta(group: &str, count: i64) -> Metadata {
        Metadata::from([
            ("group", AttrValue::from(group)),
            ("count", AttrValue::from(count)),
        ])
    }

    fn seeded() -> InMemoryStore {
        let mut store = InMemoryStore::new();
        let rows: [(&str, Metadata); 4] = [
            ("/data/a.csv", meta("train", 10)),
            ("/data/b.txt", meta("train", 50)),
            ("/data/c.csv", meta("test", 20)),
            ("/other/d.csv", Metadata::from([("owner", "ana")])),
        ];
        for (path, meta) in rows {
            store.upsert(Path::new(path), &meta).unwrap();
        }
        store
    }

    #[test]
    fn test_find_equality() {
        let store = seeded();
        let found = find(&store, &Query::all().eq("group", "train")).unwrap();
        assert_eq!(
            found.paths(),
            vec![Path::new("/data/a.csv"), Path::new("/data/b.txt")]
        );
        assert_eq!(found.root(), None);
        assert_eq!(found[0].get("count"), Some(&AttrValue::from(10)));
    }

    #[test]
    fn test_find_is_complete_and_sound() {
        let store = seeded();
        let query = Query::all().with(Condition::new("count", Matcher::Gte(AttrValue::from(20))));
        let found = find(&store, &query).unwrap();

        let all = store.scan(&|_| true).unwrap();
        for record in all {
            let expected = query.matches(&record.path, &record.metadata);
            assert_eq!(found.contains_path(&record.path), expected);
        }
    }

    #[test]
    fn test_missing_field_never_matches() {
        let store = seeded();
        let found = find(&store, &Query::all().eq("owner", "bob")).unwrap();
        assert!(found.is_empty());
        let found = find(
            &store,
            &Query::all().with(Condition::new("owner", Matcher::Ne(AttrValue::from("bob")))),
        )
        .unwrap();
        assert_eq!(found.paths(), vec![Path::new("/other/d.csv")]);
    }

    #[test]
    fn test_empty_query_returns_everything_in_store_order() {
        let store = seeded();
        let found = find(&store, &Query::all()).unwrap();
        assert_eq!(found.len(), 4);
        assert_eq!(found[3].path(), Path::new("/other/d.csv"));
    }

    #[test]
    fn test_find_under_directory() {
        let store = seeded();
        let found = find(&store, &Query::under(Path::new("/data"))).unwrap();
        assert_eq!(found.len(), 3);
        let found = find(&store, &Query::under(Path::new("/dat"))).unwrap();
        assert!(found.is_empty());
    }

    #[test]
    fn test_find_one_is_deterministic() {
        let store = seeded();
        let query = Query::all().eq("group", "train");
        let first = find_one(&store, &query).unwrap().unwrap();
        assert_eq!(first.path(), Path::new("/data/a.csv"));
        for _ in 0..3 {
            assert_eq!(find_one(&store, &query).unwrap().unwrap(), first);
        }
        assert_eq!(find(&store, &query).unwrap()[0], first);
    }

    #[test]
    fn test_find_one_no_match_is_none() {
        let store = seeded();
        assert!(find_one(&store, &Query::all().eq("group", "nope"))
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_tag_add_then_query_two_files() {
        let mut api = FiletagApi::new(InMemoryStore::new());
        let mut a = File::from_record(PathBuf::from("/data/a.csv"), Metadata::new());
        let mut b = File::from_record(PathBuf::from("/data/b.txt"), Metadata::new());
        a.set("group", "train").unwrap();
        b.set("group", "train").unwrap();
        api.add(&a).unwrap();
        api.add(&b).unwrap();

        let train = find(api.store(), &Query::all().eq("group", "train")).unwrap();
        assert_eq!(
            train.paths(),
            vec![Path::new("/data/a.csv"), Path::new("/data/b.txt")]
        );

        let test = find(api.store(), &Query::all().eq("group", "test")).unwrap();
        assert!(test.is_empty());

        let first = find_one(api.store(), &Query::all().eq("group", "train"))
            .unwrap()
            .unwrap();
        assert_eq!(first.path(), Path::new("/data/a.csv"));
    }

    #[test]
    fn test_parsed_query() {
        let store = seeded();
        let query = Query::parse(&["group=train", "count<30"]).unwrap();
        let found = find(&store, &query).unwrap();
        assert_eq!(found.paths(), vec![PathBuf::from("/data/a.csv").as_path()]);
    }
}
