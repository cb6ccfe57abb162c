use std::collections::HashSet;

use crate::model::{IndexedApp, IndexedFile};

/// The catalog produced by one indexing pass. It is never mutated after
/// [`CatalogBuilder::finish`]; share it behind an `Arc`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    apps: Vec<IndexedApp>,
    files: Vec<IndexedFile>,
}

impl Catalog {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn apps(&self) -> &[IndexedApp] {
        &self.apps
    }

    pub fn files(&self) -> &[IndexedFile] {
        &self.files
    }

    pub fn is_empty(&self) -> bool {
        self.apps.is_empty() && self.files.is_empty()
    }
}

#[derive(Debug, Default)]
pub struct CatalogBuilder {
    apps: Vec<IndexedApp>,
    app_keys: HashSet<String>,
    files: Vec<IndexedFile>,
}

impl CatalogBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `app` unless an app with the same case-insensitive name is
    /// already present. Returns whether it was inserted.
    pub fn insert_app(&mut self, app: IndexedApp) -> bool {
        let key = app.name.to_lowercase();
        if !self.app_keys.insert(key) {
            return false;
        }
        self.apps.push(app);
        true
    }

    pub fn insert_file(&mut self, file: IndexedFile) {
        self.files.push(file);
    }

    pub fn finish(self) -> Catalog {
        Catalog {
            apps: self.apps,
            files: self.files,
        }
    }
}
