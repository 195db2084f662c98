//! # API Facade
//!
//! The API layer is a **thin facade** over the command layer and the query
//! engine. It is the single entry point for filetag operations, whatever the
//! UI.
//!
//! ## Role and Responsibilities
//!
//! The API facade:
//! - **Owns the store handle**: there is no process-wide default store
//! - **Normalizes inputs**: raw paths become [`Collection`]s, raw condition
//!   strings become a [`Query`]
//! - **Dispatches** to the matching command function
//!
//! Business logic lives in `commands/*.rs`; presentation lives in the CLI.
//!
//! ## Two Kinds of Methods
//!
//! The programmatic surface works on entity objects:
//! [`add`](FiletagApi::add), [`find`](FiletagApi::find),
//! [`find_one`](FiletagApi::find_one).
//!
//! The `*_paths` and `*_matching` methods take raw user input and return
//! a [`CmdResult`] for rendering.
//!
//! ## Generic Over MetadataStore
//!
//! `FiletagApi<S: MetadataStore>` is generic over the storage:
//! - Production: `FiletagApi<FileStore>`
//! - Testing: `FiletagApi<InMemoryStore>`

use crate::attributes::{AttrValue, Query};
use crate::commands::{self, helpers, CmdResult};
use crate::config::FiletagConfig;
use crate::error::Result;
use crate::model::{Collection, File, Taggable};
use crate::query;
use crate::store::MetadataStore;
use crate::walk::WalkOptions;
use std::path::Path;

/// The main API facade for filetag operations.
pub struct FiletagApi<S: MetadataStore> {
    store: S,
    walk: WalkOptions,
}

impl<S: MetadataStore> FiletagApi<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            walk: WalkOptions::default(),
        }
    }

    pub fn with_walk_options(mut self, walk: WalkOptions) -> Self {
        self.walk = walk;
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn walk_options(&self) -> &WalkOptions {
        &self.walk
    }

    /// Persist a file or collection, merging into existing records.
    pub fn add<T: Taggable + ?Sized>(&mut self, item: &T) -> Result<CmdResult> {
        commands::add::run(&mut self.store, item)
    }

    /// All tracked files matching `query`, in store order.
    pub fn find(&self, query: &Query) -> Result<Collection> {
        query::find(&self.store, query)
    }

    /// The first tracked file matching `query`, in store order.
    pub fn find_one(&self, query: &Query) -> Result<Option<File>> {
        query::find_one(&self.store, query)
    }

    /// Set a group field on `target` and persist it.
    pub fn tag(&mut self, target: &mut Collection, field: &str, value: AttrValue) -> Result<CmdResult> {
        commands::tag::run(&mut self.store, target, field, value)
    }

    pub fn untag(&mut self, target: &Collection, fields: &[String]) -> Result<CmdResult> {
        commands::untag::run(&mut self.store, target, fields)
    }

    pub fn delete(&mut self, target: &Collection) -> Result<CmdResult> {
        commands::delete::run(&mut self.store, target)
    }

    /// Track the files at `paths`, walking directories.
    pub fn add_paths<P: AsRef<Path>>(&mut self, paths: &[P]) -> Result<CmdResult> {
        let targets = helpers::collect_targets(paths, &self.walk)?;
        self.add(&targets)
    }

    /// Set `field` to the loosely parsed `value` on the files at `paths`.
    pub fn tag_paths<P: AsRef<Path>>(
        &mut self,
        field: &str,
        value: &str,
        paths: &[P],
    ) -> Result<CmdResult> {
        let mut targets = helpers::collect_targets(paths, &self.walk)?;
        self.tag(&mut targets, field, AttrValue::parse_loose(value))
    }

    /// Remove `fields` from tracked files at or under `paths`.
    pub fn untag_paths<P: AsRef<Path>>(&mut self, fields: &[String], paths: &[P]) -> Result<CmdResult> {
        let targets = helpers::tracked_targets(&self.store, paths)?;
        self.untag(&targets, fields)
    }

    /// Stop tracking files at or under `paths`. Vanished files can be deleted.
    pub fn delete_paths<P: AsRef<Path>>(&mut self, paths: &[P]) -> Result<CmdResult> {
        let targets = helpers::tracked_targets(&self.store, paths)?;
        self.delete(&targets)
    }

    /// Parse each condition string and run the query.
    pub fn find_matching<I: AsRef<str>>(&self, conditions: &[I]) -> Result<CmdResult> {
        let query = Query::parse(conditions)?;
        commands::find::run(&self.store, &query)
    }

    pub fn list(&self, path: &Path) -> Result<CmdResult> {
        commands::list::run(&self.store, path)
    }

    pub fn status(&self, config: &FiletagConfig) -> Result<CmdResult> {
        commands::status::run(&self.store, config)
    }

    pub fn doctor(&mut self, fix: bool) -> Result<CmdResult> {
        commands::doctor::run(&mut self.store, fix)
    }
}
