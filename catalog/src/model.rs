//! Core catalog model types.
//!
//! These types represent an InterMine object model as typed Rust data. A
//! [`Catalog`] owns its [`ClassDescriptor`]s in catalog order and hands out
//! borrows; nothing in the graph is mutated after construction.

use std::collections::{HashMap, HashSet};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::CatalogError;

/// How a collection relates its owner to the referenced class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RelationKind {
    /// One owner, many referenced rows holding a foreign key back to the owner.
    #[serde(rename = "ONE_N")]
    OneN,
    /// Many-to-many through an indirection table.
    #[serde(rename = "M_N")]
    MN,
}

/// The closed set of field variants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FieldKind {
    /// A scalar column.
    Attribute {
        /// Raw value type name as written in the model (e.g. `java.lang.String`).
        #[serde(rename = "type")]
        value_type: String,
    },
    /// A single-valued (many-to-one) link.
    Reference {
        /// Simple name of the referenced class.
        referenced: String,
        /// Name of the reverse field on the referenced class, if any.
        #[serde(default)]
        reverse: Option<String>,
    },
    /// A multi-valued link.
    Collection {
        /// Simple name of the referenced class.
        referenced: String,
        /// One-to-many or many-to-many.
        relation: RelationKind,
        /// Name of the reverse field on the referenced class, if any.
        #[serde(default)]
        reverse: Option<String>,
    },
}

/// A field of a class: attribute, reference or collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    /// Field name (e.g. `"taxonId"`).
    pub name: String,
    /// External (FAIR) vocabulary term annotating the field.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fair_term: Option<String>,
    /// The field variant.
    #[serde(flatten)]
    pub kind: FieldKind,
}

impl FieldDescriptor {
    /// Creates an attribute field.
    pub fn attribute(name: impl Into<String>, value_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fair_term: None,
            kind: FieldKind::Attribute {
                value_type: value_type.into(),
            },
        }
    }

    /// Creates a reference field without a reverse.
    pub fn reference(name: impl Into<String>, referenced: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fair_term: None,
            kind: FieldKind::Reference {
                referenced: referenced.into(),
                reverse: None,
            },
        }
    }

    /// Creates a collection field with the given relation and reverse field.
    pub fn collection(
        name: impl Into<String>,
        referenced: impl Into<String>,
        relation: RelationKind,
        reverse: Option<&str>,
    ) -> Self {
        Self {
            name: name.into(),
            fair_term: None,
            kind: FieldKind::Collection {
                referenced: referenced.into(),
                relation,
                reverse: reverse.map(str::to_owned),
            },
        }
    }

    /// Sets the FAIR term annotation.
    #[must_use]
    pub fn with_fair_term(mut self, term: impl Into<String>) -> Self {
        self.fair_term = Some(term.into());
        self
    }

    /// Sets the reverse field name on a reference or collection.
    #[must_use]
    pub fn with_reverse(mut self, reverse: impl Into<String>) -> Self {
        match &mut self.kind {
            FieldKind::Reference { reverse: r, .. } | FieldKind::Collection { reverse: r, .. } => {
                *r = Some(reverse.into());
            }
            FieldKind::Attribute { .. } => {}
        }
        self
    }

    /// Returns the referenced class name for references and collections.
    #[must_use]
    pub fn referenced_class(&self) -> Option<&str> {
        match &self.kind {
            FieldKind::Attribute { .. } => None,
            FieldKind::Reference { referenced, .. } | FieldKind::Collection { referenced, .. } => {
                Some(referenced)
            }
        }
    }

    /// Returns the reverse field name, if declared.
    #[must_use]
    pub fn reverse(&self) -> Option<&str> {
        match &self.kind {
            FieldKind::Attribute { .. } => None,
            FieldKind::Reference { reverse, .. } | FieldKind::Collection { reverse, .. } => {
                reverse.as_deref()
            }
        }
    }

    /// Returns the relation kind for collections.
    #[must_use]
    pub fn relation(&self) -> Option<RelationKind> {
        match &self.kind {
            FieldKind::Collection { relation, .. } => Some(*relation),
            _ => None,
        }
    }
}

/// A class of the object model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassDescriptor {
    /// Simple class name (e.g. `"Protein"`).
    pub name: String,
    /// Simple names of the direct superclasses.
    #[serde(default)]
    pub extends: Vec<String>,
    /// External (FAIR) vocabulary term for the class.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fair_term: Option<String>,
    /// Fields declared on this class (inherited fields are not repeated).
    #[serde(default)]
    pub fields: Vec<FieldDescriptor>,
}

impl ClassDescriptor {
    /// Creates a class with no superclass, term or fields.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            extends: Vec::new(),
            fair_term: None,
            fields: Vec::new(),
        }
    }

    /// Adds a direct superclass.
    #[must_use]
    pub fn extending(mut self, parent: impl Into<String>) -> Self {
        self.extends.push(parent.into());
        self
    }

    /// Sets the FAIR term annotation.
    #[must_use]
    pub fn with_fair_term(mut self, term: impl Into<String>) -> Self {
        self.fair_term = Some(term.into());
        self
    }

    /// Appends a declared field.
    #[must_use]
    pub fn with_field(mut self, field: FieldDescriptor) -> Self {
        self.fields.push(field);
        self
    }
}

/// Identity of a field: declaring class plus field name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FieldKey {
    /// Simple name of the declaring class.
    pub class: String,
    /// Field name.
    pub field: String,
}

/// A field as seen from some class, remembering which class declared it.
#[derive(Debug, Clone, Copy)]
pub struct FieldRef<'a> {
    /// The declaring class.
    pub declaring_class: &'a ClassDescriptor,
    /// The field.
    pub field: &'a FieldDescriptor,
}

impl FieldRef<'_> {
    /// Returns the identity of this field.
    #[must_use]
    pub fn key(&self) -> FieldKey {
        FieldKey {
            class: self.declaring_class.name.clone(),
            field: self.field.name.clone(),
        }
    }
}

/// On-disk shape of a catalog document.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct CatalogFile {
    name: String,
    #[serde(default)]
    classes: Vec<ClassDescriptor>,
}

/// The complete, validated class graph of one object model.
#[derive(Debug)]
pub struct Catalog {
    name: String,
    classes: Vec<ClassDescriptor>,
    index: HashMap<String, usize>,
    subclasses: Vec<Vec<usize>>,
}

impl Catalog {
    /// Builds a catalog from class descriptors in catalog order.
    ///
    /// # Errors
    ///
    /// Returns an error on duplicate class names, dangling superclass or
    /// referenced-class names, a many-to-many collection without a reverse
    /// field, or a reverse field the referenced class does not define.
    pub fn new(
        name: impl Into<String>,
        classes: Vec<ClassDescriptor>,
    ) -> Result<Self, CatalogError> {
        let mut index = HashMap::with_capacity(classes.len());
        for (i, class) in classes.iter().enumerate() {
            if index.insert(class.name.clone(), i).is_some() {
                return Err(CatalogError::DuplicateClass(class.name.clone()));
            }
        }

        let mut subclasses = vec![Vec::new(); classes.len()];
        for (i, class) in classes.iter().enumerate() {
            for parent in &class.extends {
                let p = *index.get(parent).ok_or_else(|| CatalogError::UnknownParent {
                    class: class.name.clone(),
                    parent: parent.clone(),
                })?;
                subclasses[p].push(i);
            }
        }

        let catalog = Self {
            name: name.into(),
            classes,
            index,
            subclasses,
        };
        catalog.validate_links()?;
        Ok(catalog)
    }

    /// Parses a catalog from its JSON form.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or the class graph is invalid.
    pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = serde_json::from_str(json)?;
        Self::new(file.name, file.classes)
    }

    /// Reads and parses a JSON catalog file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or does not parse.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let json = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    fn validate_links(&self) -> Result<(), CatalogError> {
        for class in &self.classes {
            for field in &class.fields {
                let Some(referenced) = field.referenced_class() else {
                    continue;
                };
                let target = self.class(referenced).ok_or_else(|| {
                    CatalogError::UnknownReferencedClass {
                        class: class.name.clone(),
                        field: field.name.clone(),
                        referenced: referenced.to_owned(),
                    }
                })?;
                match field.reverse() {
                    Some(reverse) => {
                        if !self.all_fields(target).iter().any(|f| f.field.name == reverse) {
                            return Err(CatalogError::UnknownReverse {
                                class: class.name.clone(),
                                field: field.name.clone(),
                                referenced: referenced.to_owned(),
                                reverse: reverse.to_owned(),
                            });
                        }
                    }
                    None if field.relation() == Some(RelationKind::MN) => {
                        return Err(CatalogError::MissingReverse {
                            class: class.name.clone(),
                            field: field.name.clone(),
                        });
                    }
                    None => {}
                }
            }
        }
        Ok(())
    }

    /// The model name (e.g. `"genomic"`).
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of classes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.classes.len()
    }

    /// Returns true if the catalog has no classes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    /// All classes in catalog order.
    pub fn classes(&self) -> impl Iterator<Item = &ClassDescriptor> {
        self.classes.iter()
    }

    /// Looks up a class by simple name. Returns `None` if not found.
    #[must_use]
    pub fn class(&self, name: &str) -> Option<&ClassDescriptor> {
        self.index.get(name).map(|&i| &self.classes[i])
    }

    /// Direct subclasses of `class`, in catalog order.
    #[must_use]
    pub fn direct_subclasses(&self, class: &ClassDescriptor) -> Vec<&ClassDescriptor> {
        self.index
            .get(&class.name)
            .map(|&i| self.subclasses[i].iter().map(|&s| &self.classes[s]).collect())
            .unwrap_or_default()
    }

    /// Own fields followed by inherited ones; a name is reported once, own
    /// declarations shadowing inherited ones.
    #[must_use]
    pub fn all_fields<'a>(&'a self, class: &'a ClassDescriptor) -> Vec<FieldRef<'a>> {
        let mut out = Vec::new();
        let mut seen_fields = HashSet::new();
        let mut seen_classes = HashSet::new();
        self.collect_fields(class, &mut out, &mut seen_fields, &mut seen_classes);
        out
    }

    fn collect_fields<'a>(
        &'a self,
        class: &'a ClassDescriptor,
        out: &mut Vec<FieldRef<'a>>,
        seen_fields: &mut HashSet<&'a str>,
        seen_classes: &mut HashSet<&'a str>,
    ) {
        if !seen_classes.insert(class.name.as_str()) {
            return;
        }
        for field in &class.fields {
            if seen_fields.insert(field.name.as_str()) {
                out.push(FieldRef {
                    declaring_class: class,
                    field,
                });
            }
        }
        for parent in &class.extends {
            if let Some(parent) = self.class(parent) {
                self.collect_fields(parent, out, seen_fields, seen_classes);
            }
        }
    }

    /// Resolves the reverse side of a reference or collection.
    #[must_use]
    pub fn reverse_of(&self, field: FieldRef<'_>) -> Option<FieldRef<'_>> {
        let target = self.class(field.field.referenced_class()?)?;
        let reverse = field.field.reverse()?;
        self.all_fields(target)
            .into_iter()
            .find(|f| f.field.name == reverse)
    }

    /// The concrete targets a link to `class` fans out to: `class` itself when
    /// it has no subclasses, otherwise its direct subclasses. Either way only
    /// classes accepted by `is_exportable` are returned.
    pub fn concrete_exportable_descendants<'a, F>(
        &'a self,
        class: &'a ClassDescriptor,
        is_exportable: F,
    ) -> Vec<&'a ClassDescriptor>
    where
        F: Fn(&ClassDescriptor) -> bool,
    {
        let subclasses = self.direct_subclasses(class);
        let candidates = if subclasses.is_empty() {
            vec![class]
        } else {
            subclasses
        };
        let mut seen = HashSet::new();
        candidates
            .into_iter()
            .filter(|&c| is_exportable(c) && seen.insert(c.name.as_str()))
            .collect()
    }
}
