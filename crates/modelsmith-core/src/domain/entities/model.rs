//! The parsed object model.
//!
//! A [`ModelInventory`] is what a parser produces from one artifact payload:
//! every class it found, in document order, keyed by `(package, name)`.

use std::collections::HashSet;
use std::fmt;

use serde::Serialize;

/// Type markers the modelling tool uses for built-in types.
const PRIMITIVE_TYPES: &[&str] = &[
    "boolean", "byte", "char", "date", "double", "float", "int", "integer", "long", "short",
    "string",
];

/// One class definition found in the artifact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModelClass {
    name: String,
    package: String,
    fields: Vec<FieldRef>,
}

impl ModelClass {
    pub fn new(name: impl Into<String>, package: impl Into<String>, fields: Vec<FieldRef>) -> Self {
        Self {
            name: name.into(),
            package: package.into(),
            fields,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn package(&self) -> &str {
        &self.package
    }

    pub fn fields(&self) -> &[FieldRef] {
        &self.fields
    }

    /// The `(package, name)` identity of this class.
    pub fn identity(&self) -> (&str, &str) {
        (&self.package, &self.name)
    }

    /// Package segments, e.g. `felles.kodeverk` -> `["felles", "kodeverk"]`.
    pub fn package_segments(&self) -> impl Iterator<Item = &str> {
        self.package.split(['.', '/']).filter(|s| !s.is_empty())
    }
}

impl fmt::Display for ModelClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.package, self.name)
    }
}

/// A reference from a class to another type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldRef {
    pub name: String,
    pub type_name: String,
}

impl FieldRef {
    pub fn new(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
        }
    }

    /// `true` if the type is a built-in marker rather than a class name.
    pub fn is_primitive(&self) -> bool {
        let lower = self.type_name.to_ascii_lowercase();
        PRIMITIVE_TYPES.contains(&lower.as_str())
    }
}

/// Ordered, de-duplicated set of classes from one parse.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModelInventory {
    classes: Vec<ModelClass>,
    identities: HashSet<(String, String)>,
}

impl ModelInventory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from classes in document order. Later duplicates of an
    /// identity already seen are dropped.
    pub fn from_classes(classes: impl IntoIterator<Item = ModelClass>) -> Self {
        let mut inventory = Self::new();
        for class in classes {
            inventory.insert(class);
        }
        inventory
    }

    /// Insert a class; returns `false` if its identity was already present.
    pub fn insert(&mut self, class: ModelClass) -> bool {
        let identity = (class.package().to_string(), class.name().to_string());
        if !self.identities.insert(identity) {
            return false;
        }
        self.classes.push(class);
        true
    }

    pub fn contains(&self, package: &str, name: &str) -> bool {
        self.identities
            .contains(&(package.to_string(), name.to_string()))
    }

    pub fn classes(&self) -> &[ModelClass] {
        &self.classes
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    /// Distinct package names in first-seen order.
    pub fn packages(&self) -> Vec<String> {
        distinct_packages(&self.classes)
    }

    /// Classes whose package is exactly `package`.
    pub fn classes_in<'a>(&'a self, package: &'a str) -> impl Iterator<Item = &'a ModelClass> {
        self.classes.iter().filter(move |c| c.package() == package)
    }
}

impl IntoIterator for ModelInventory {
    type Item = ModelClass;
    type IntoIter = std::vec::IntoIter<ModelClass>;

    fn into_iter(self) -> Self::IntoIter {
        self.classes.into_iter()
    }
}

/// Distinct package names of `classes`, duplicates removed, first-seen order.
pub fn distinct_packages(classes: &[ModelClass]) -> Vec<String> {
    let mut seen = HashSet::new();
    classes
        .iter()
        .filter(|c| seen.insert(c.package()))
        .map(|c| c.package().to_string())
        .collect()
}

/// A generated-model directory discovered in a scaffolded project.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct Model {
    pub name: String,
}

impl Model {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn class(package: &str, name: &str) -> ModelClass {
        ModelClass::new(name, package, vec![])
    }

    #[test]
    fn distinct_packages_keeps_first_seen_order() {
        let classes = vec![class("a.b", "X"), class("a.c", "Y"), class("a.b", "Z")];
        assert_eq!(distinct_packages(&classes), vec!["a.b", "a.c"]);
    }

    #[test]
    fn distinct_packages_of_nothing_is_empty() {
        assert!(distinct_packages(&[]).is_empty());
    }

    #[test]
    fn inventory_collapses_duplicate_identity() {
        let inventory = ModelInventory::from_classes([
            ModelClass::new("Fagkode", "felles.kodeverk", vec![FieldRef::new("kode", "String")]),
            ModelClass::new("Fagkode", "felles.kodeverk", vec![]),
            ModelClass::new("Fagkode", "utdanning.kodeverk", vec![]),
        ]);

        assert_eq!(inventory.len(), 2);
        // first occurrence wins
        assert_eq!(inventory.classes()[0].fields().len(), 1);
        assert!(inventory.contains("utdanning.kodeverk", "Fagkode"));
        assert!(!inventory.contains("utdanning.kodeverk", "Kjonn"));
    }

    #[test]
    fn insert_reports_duplicates_and_keeps_order() {
        let mut inventory = ModelInventory::new();
        assert!(inventory.insert(class("b", "Y")));
        assert!(inventory.insert(class("a", "X")));
        assert!(!inventory.insert(class("b", "Y")));
        let names: Vec<_> = inventory.classes().iter().map(ModelClass::name).collect();
        assert_eq!(names, vec!["Y", "X"]);
    }

    #[test]
    fn classes_in_filters_exact_package() {
        let inventory = ModelInventory::from_classes([
            class("felles.kodeverk", "Kjonn"),
            class("felles.kodeverk.iso", "Landkode"),
        ]);
        let names: Vec<_> = inventory
            .classes_in("felles.kodeverk")
            .map(ModelClass::name)
            .collect();
        assert_eq!(names, vec!["Kjonn"]);
    }

    #[test]
    fn package_segments_accept_both_separators() {
        let c = class("felles/kodeverk.iso", "Landkode");
        assert_eq!(
            c.package_segments().collect::<Vec<_>>(),
            vec!["felles", "kodeverk", "iso"]
        );
    }

    #[test]
    fn primitive_marker_detection() {
        assert!(FieldRef::new("kode", "String").is_primitive());
        assert!(FieldRef::new("fodselsdato", "date").is_primitive());
        assert!(!FieldRef::new("kjonn", "Kjonn").is_primitive());
    }
}
