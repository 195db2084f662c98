use crate::attributes::AttrValue;
use crate::commands::{add, CmdResult};
use crate::error::Result;
use crate::model::Collection;
use crate::store::MetadataStore;

/// Set `field` on every member of `target` and store the result.
///
/// The field is set at group level, so a member that already carries its own
/// value for `field` in memory keeps it.
pub fn run<S: MetadataStore + ?Sized>(
    store: &mut S,
    target: &mut Collection,
    field: &str,
    value: AttrValue,
) -> Result<CmdResult> {
    target.set(field, value)?;
    add::run(store, target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FiletagError;
    use crate::model::File;
    use crate::store::mem_backend::InMemoryStore;
    use std::path::{Path, PathBuf};

    fn targets() -> Collection {
        Collection::from_files([
            File::from_record(PathBuf::from("/data/a.csv"), Default::default()),
            File::from_record(PathBuf::from("/data/b.csv"), Default::default()),
        ])
    }

    #[test]
    fn tag_sets_field_on_every_member() {
        let mut store = InMemoryStore::new();
        let mut cl = targets();

        let result = run(&mut store, &mut cl, "count", AttrValue::from(3)).unwrap();

        assert_eq!(result.affected.len(), 2);
        for path in ["/data/a.csv", "/data/b.csv"] {
            let meta = store.get(Path::new(path)).unwrap().unwrap();
            assert_eq!(meta.get("count"), Some(&AttrValue::Integer(3)));
        }
    }

    #[test]
    fn retag_overwrites_stored_value() {
        let mut store = InMemoryStore::new();
        run(&mut store, &mut targets(), "group", "train".into()).unwrap();
        run(&mut store, &mut targets(), "group", "test".into()).unwrap();

        let meta = store.get(Path::new("/data/a.csv")).unwrap().unwrap();
        assert_eq!(meta.get("group"), Some(&AttrValue::from("test")));
    }

    #[test]
    fn tag_rejects_reserved_field() {
        let mut store = InMemoryStore::new();
        let result = run(&mut store, &mut targets(), "path", "x".into());
        assert!(matches!(result, Err(FiletagError::InvalidField(_))));
        assert!(store.is_empty().unwrap());
    }
}
