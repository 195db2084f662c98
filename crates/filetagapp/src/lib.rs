//! # Filetag Architecture
//!
//! Filetag attaches arbitrary key/value metadata to files and directories and
//! finds them again by predicate, so that a set of files can be selected by what
//! they are ("all training images of class A") rather than by where they live.
//!
//! ## Layers
//!
//! 1. **Entity model** ([`model`]): [`File`](model::File) and
//!    [`Collection`](model::Collection) are in-memory values. Setting a field
//!    touches nothing on disk.
//! 2. **API** ([`api`]): [`FiletagApi`](api::FiletagApi) owns a store handle and
//!    is the entry point for every operation.
//! 3. **Commands** ([`commands`]): the business logic behind the API. Each
//!    returns a structured [`CmdResult`](commands::CmdResult).
//! 4. **Query engine** ([`query`]): evaluates a [`Query`](attributes::Query)
//!    against stored records and rebuilds entity objects.
//! 5. **Storage** ([`store`]): the [`MetadataStore`](store::MetadataStore) trait
//!    with merge-upsert semantics, over a pluggable backend.
//!
//! ## Data Flow
//!
//! ```text
//! walk / open ──► File, Collection ──set()──► add ──resolve──► upsert (merge)
//!                                                                   │
//!       filter ◄── Collection ◄── find / find_one ◄── scan ◄────────┘
//! ```
//!
//! ## Example
//!
//! ```
//! use filetagapp::api::FiletagApi;
//! use filetagapp::attributes::Query;
//! use filetagapp::store::mem_backend::InMemoryStore;
//! # let dir = tempfile::TempDir::new().unwrap();
//! # std::fs::write(dir.path().join("a.csv"), "1,2").unwrap();
//! # std::fs::write(dir.path().join("b.txt"), "hello").unwrap();
//!
//! let mut api = FiletagApi::new(InMemoryStore::new());
//! api.tag_paths("group", "train", &[dir.path()]).unwrap();
//!
//! let train = api.find(&Query::all().eq("group", "train")).unwrap();
//! let csvs = train.filter(|f| f.extension() == Some("csv"));
//! assert_eq!(csvs.len(), 1);
//! ```

pub mod api;
pub mod attributes;
pub mod commands;
pub mod config;
pub mod error;
pub mod init;
pub mod model;
pub mod query;
pub mod store;
pub mod walk;
