use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};

/// Mutually exclusive classification assigned during the first pass.
///
/// Variant order doubles as detection priority: a class that matches more
/// than one rule across its methods keeps the highest-priority match.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Category {
    Other,
    Mingleton,
    Hingleton,
    Singleton,
}

/// Rendering kind of a record. Unlike [`Category`], this folds in the
/// independent Fingleton flag: a class with no exclusive category but an
/// exposed shared field renders as a Fingleton.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeKind {
    Singleton,
    Hingleton,
    Mingleton,
    Fingleton,
    Other,
}

/// Per-record visibility state, computed in passes 3-4 and final thereafter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Visibility {
    #[default]
    Undrawn,
    /// Met the in-degree threshold on its own.
    DrawnDirect,
    /// Pulled in by a single hop from a directly drawn target.
    DrawnPropagated,
}

/// A single class from the input set, keyed by its qualified name with the
/// package prefix already stripped.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ClassRecord {
    pub name: String,
    pub category: Category,
    /// Independent of `category`; may coexist with any of the exclusive three.
    pub fingleton: bool,
    /// Return type recorded whenever the Hingleton rule matched, kept even if
    /// a higher-priority category won. Edge matching reads it too.
    pub hingled_target: Option<String>,
    /// Static private non-final reference-typed fields: name -> class name.
    pub shared_fields: IndexMap<String, String>,
    pub uses: IndexSet<String>,
    pub used_by: IndexSet<String>,
    pub visibility: Visibility,
}

impl ClassRecord {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            category: Category::Other,
            fingleton: false,
            hingled_target: None,
            shared_fields: IndexMap::new(),
            uses: IndexSet::new(),
            used_by: IndexSet::new(),
            visibility: Visibility::Undrawn,
        }
    }

    /// Raise the category, never lowering an already higher-priority one.
    pub fn promote(&mut self, category: Category) {
        if category > self.category {
            self.category = category;
        }
    }

    /// Special classes are those with any classification at all.
    pub fn is_special(&self) -> bool {
        self.category != Category::Other || self.fingleton
    }

    pub fn is_drawn(&self) -> bool {
        self.visibility != Visibility::Undrawn
    }

    /// Rendering kind, resolving the Fingleton flag against the exclusive
    /// category by priority.
    pub fn kind(&self) -> NodeKind {
        match self.category {
            Category::Singleton => NodeKind::Singleton,
            Category::Hingleton => NodeKind::Hingleton,
            Category::Mingleton => NodeKind::Mingleton,
            Category::Other if self.fingleton => NodeKind::Fingleton,
            Category::Other => NodeKind::Other,
        }
    }
}

/// Owner of every [`ClassRecord`], keyed by class name.
///
/// Iteration follows insertion order, which makes classification, edge and
/// output ordering reproducible across runs with identical input.
#[derive(Clone, Debug, Default)]
pub struct Registry {
    records: IndexMap<String, ClassRecord>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch a record, creating it on first reference to the name.
    pub fn ensure(&mut self, name: &str) -> &mut ClassRecord {
        self.records
            .entry(name.to_string())
            .or_insert_with(|| ClassRecord::new(name))
    }

    pub fn get(&self, name: &str) -> Option<&ClassRecord> {
        self.records.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut ClassRecord> {
        self.records.get_mut(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.records.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ClassRecord> {
        self.records.values()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut ClassRecord> {
        self.records.values_mut()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.records.keys().map(String::as_str)
    }

    /// Insert a directed uses edge, updating both mirrored sets.
    ///
    /// Self-edges are rejected and both endpoints must already exist;
    /// repeated insertion of the same pair collapses into one edge.
    /// Returns whether the edge was newly added.
    pub fn add_use(&mut self, user: &str, target: &str) -> bool {
        if user == target || !self.records.contains_key(user) || !self.records.contains_key(target)
        {
            return false;
        }
        let added = self
            .records
            .get_mut(user)
            .map(|r| r.uses.insert(target.to_string()))
            .unwrap_or(false);
        if let Some(rec) = self.records.get_mut(target) {
            rec.used_by.insert(user.to_string());
        }
        added
    }
}
