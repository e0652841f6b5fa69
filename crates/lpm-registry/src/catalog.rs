use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntry {
    pub name: String,
    pub version: String,
    /// URL or local path of the package artifact.
    #[serde(alias = "sourceLocation")]
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dependencies: Vec<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum IndexDocument {
    Wrapped { packages: Vec<CatalogEntry> },
    Bare(Vec<CatalogEntry>),
}

#[derive(Serialize)]
struct IndexDocumentRef<'a> {
    packages: Vec<&'a CatalogEntry>,
}

/// The set of available packages, keyed by name in index order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    entries: IndexMap<String, CatalogEntry>,
}

impl Catalog {
    /// Builds a catalog; a name listed twice keeps the later entry.
    #[must_use]
    pub fn from_entries(entries: impl IntoIterator<Item = CatalogEntry>) -> Self {
        let mut map = IndexMap::new();
        for entry in entries {
            map.insert(entry.name.clone(), entry);
        }
        Self { entries: map }
    }

    pub fn parse(document: &str) -> Result<Self, serde_json::Error> {
        let entries = match serde_json::from_str::<IndexDocument>(document)? {
            IndexDocument::Wrapped { packages } | IndexDocument::Bare(packages) => packages,
        };
        Ok(Self::from_entries(entries))
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&IndexDocumentRef {
            packages: self.entries.values().collect(),
        })
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&CatalogEntry> {
        self.entries.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &CatalogEntry> {
        self.entries.values()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
