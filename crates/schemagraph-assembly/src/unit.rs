//! The assembled schema unit.

use std::collections::{BTreeMap, BTreeSet};

use schemagraph_dsl::digest::Fnv1a64;
use schemagraph_dsl::{ClassDeclaration, ClassKind, Declaration, PropertyDeclaration, Tag};
use serde_json::{json, Value};

use crate::config::AssemblyConfig;
use crate::tree::SchemaTree;

/// A validated, deduplicated schema ready for atomic submission.
///
/// Every property's owning class and every class parent resolves to a class
/// in the same unit. Classes and properties are kept in first-seen input
/// order; [`SchemaUnit::tree`] holds the same declarations in submission order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaUnit {
    classes: Vec<ClassDeclaration>,
    properties: Vec<PropertyDeclaration>,
    tree: SchemaTree,
}

impl SchemaUnit {
    pub(crate) fn new(
        classes: Vec<ClassDeclaration>,
        properties: Vec<PropertyDeclaration>,
        tree: SchemaTree,
    ) -> Self {
        Self {
            classes,
            properties,
            tree,
        }
    }

    pub fn classes(&self) -> &[ClassDeclaration] {
        &self.classes
    }

    pub fn properties(&self) -> &[PropertyDeclaration] {
        &self.properties
    }

    pub fn tree(&self) -> &SchemaTree {
        &self.tree
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty() && self.properties.is_empty()
    }

    pub fn class(&self, identifier: &str) -> Option<&ClassDeclaration> {
        self.classes.iter().find(|c| c.identifier() == identifier)
    }

    pub fn property(&self, identifier: &str) -> Option<&PropertyDeclaration> {
        self.properties.iter().find(|p| p.identifier() == identifier)
    }

    /// Properties attached to `class`, in first-seen order.
    pub fn properties_of<'a>(
        &'a self,
        class: &'a str,
    ) -> impl Iterator<Item = &'a PropertyDeclaration> + 'a {
        self.properties
            .iter()
            .filter(move |p| p.owning_class() == class)
    }

    /// Properties grouped by authority-domain tag. Untagged properties do not
    /// appear.
    pub fn facets(&self) -> BTreeMap<&Tag, Vec<&PropertyDeclaration>> {
        let mut out: BTreeMap<&Tag, Vec<&PropertyDeclaration>> = BTreeMap::new();
        for p in &self.properties {
            for tag in p.tags() {
                out.entry(tag).or_default().push(p);
            }
        }
        out
    }

    /// Same resolved classes and properties, regardless of order or tree shape.
    pub fn is_semantically_equal(&self, other: &SchemaUnit) -> bool {
        let classes = |u: &SchemaUnit| -> BTreeSet<ClassDeclaration> {
            u.classes.iter().cloned().collect()
        };
        let properties = |u: &SchemaUnit| -> BTreeSet<PropertyDeclaration> {
            u.properties.iter().cloned().collect()
        };
        classes(self) == classes(other) && properties(self) == properties(other)
    }

    /// Digest of the tree, including its shape and leaf order.
    pub fn digest(&self) -> String {
        let mut hasher = Fnv1a64::new();
        hash_tree(&mut hasher, &self.tree);
        hasher.digest()
    }

    /// Digest of the declaration set alone. Equal for semantically equal units.
    pub fn content_digest(&self) -> String {
        let mut decls: Vec<Declaration> = self
            .classes
            .iter()
            .cloned()
            .map(Declaration::from)
            .chain(self.properties.iter().cloned().map(Declaration::from))
            .collect();
        decls.sort();

        let mut hasher = Fnv1a64::new();
        hasher.count(decls.len());
        for d in &decls {
            hash_declaration(&mut hasher, d);
        }
        hasher.digest()
    }

    /// Render the tree as a schema-mutation document.
    ///
    /// Conjunctions render as `{"@type": "And", "and": [...]}`; leaves as
    /// `AddClass`, `AddDocument` or `AddProperty` with namespaced identifiers.
    pub fn to_document(&self, config: &AssemblyConfig) -> Value {
        render_tree(&self.tree, config)
    }
}

fn render_tree(tree: &SchemaTree, config: &AssemblyConfig) -> Value {
    match tree {
        SchemaTree::And(children) => json!({
            "@type": "And",
            "and": children.iter().map(|c| render_tree(c, config)).collect::<Vec<_>>(),
        }),
        SchemaTree::Declare(Declaration::Class(c)) => {
            let ty = match c.kind() {
                ClassKind::Class => "AddClass",
                ClassKind::Document => "AddDocument",
            };
            json!({
                "@type": ty,
                "id": config.qualify(c.identifier()),
                "graph": config.graph,
                "label": c.label(),
                "description": c.description(),
                "parents": c.parents().iter().map(|p| config.qualify(p)).collect::<Vec<_>>(),
            })
        }
        SchemaTree::Declare(Declaration::Property(p)) => {
            let ty = p.value_type();
            let range = if ty.is_literal() {
                ty.as_str().to_string()
            } else {
                config.qualify(ty.as_str())
            };
            json!({
                "@type": "AddProperty",
                "id": config.qualify(p.identifier()),
                "graph": config.graph,
                "domain": config.qualify(p.owning_class()),
                "range": range,
                "label": p.label(),
                "description": p.description(),
                "tags": p.tags().iter().map(Tag::as_str).collect::<Vec<_>>(),
            })
        }
    }
}

fn hash_tree(hasher: &mut Fnv1a64, tree: &SchemaTree) {
    match tree {
        SchemaTree::Declare(d) => hash_declaration(hasher, d),
        SchemaTree::And(children) => {
            hasher.field("and");
            hasher.count(children.len());
            for child in children {
                hash_tree(hasher, child);
            }
        }
    }
}

fn hash_declaration(hasher: &mut Fnv1a64, declaration: &Declaration) {
    match declaration {
        Declaration::Class(c) => {
            hasher.field("class");
            hasher.field(c.identifier());
            hasher.field(match c.kind() {
                ClassKind::Class => "class",
                ClassKind::Document => "document",
            });
            hasher.field(c.label());
            hasher.field(c.description());
            hasher.count(c.parents().len());
            for parent in c.parents() {
                hasher.field(parent);
            }
        }
        Declaration::Property(p) => {
            hasher.field("property");
            hasher.field(p.identifier());
            hasher.field(p.value_type().as_str());
            hasher.count(p.tags().len());
            for tag in p.tags() {
                hasher.field(tag.as_str());
            }
            hasher.field(p.label());
            hasher.field(p.description());
            hasher.field(p.owning_class());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use schemagraph_dsl::{make_class, make_document, make_property};

    fn sample() -> SchemaUnit {
        let base = make_document("EphemeralEntity", "Ephemeral Entity", "Has a lifespan").unwrap();
        let country = make_class("Country", "Country", "A nation state")
            .unwrap()
            .with_parent("EphemeralEntity");
        let iso = make_property("iso_code", "string", ["Institutions"], "ISO Code", "", "Country")
            .unwrap();
        let tree = SchemaTree::conjoin_all(vec![
            SchemaTree::leaf(base.clone()),
            SchemaTree::leaf(country.clone()),
            SchemaTree::leaf(iso.clone()),
        ]);
        SchemaUnit::new(vec![base, country], vec![iso], tree)
    }

    #[test]
    fn renders_conjunction_document() {
        let doc = sample().to_document(&AssemblyConfig::default());
        assert_eq!(doc["@type"], "And");
        let and = doc["and"].as_array().unwrap();
        assert_eq!(and.len(), 3);
        assert_eq!(and[0]["@type"], "AddDocument");
        assert_eq!(and[1]["@type"], "AddClass");
        assert_eq!(and[1]["parents"][0], "scm:EphemeralEntity");
        assert_eq!(and[2]["@type"], "AddProperty");
        assert_eq!(and[2]["domain"], "scm:Country");
        assert_eq!(and[2]["range"], "xsd:string");
        assert_eq!(and[2]["graph"], "schema");
    }

    #[test]
    fn lookups_and_facets() {
        let unit = sample();
        assert!(unit.class("Country").is_some());
        assert!(unit.property("iso_code").is_some());
        assert_eq!(unit.properties_of("Country").count(), 1);
        assert_eq!(unit.properties_of("EphemeralEntity").count(), 0);
        let facets = unit.facets();
        assert_eq!(facets.len(), 1);
        assert_eq!(facets[&Tag::from("Institutions")].len(), 1);
    }

    #[test]
    fn digests_are_stable() {
        assert_eq!(sample().digest(), sample().digest());
        assert_eq!(sample().content_digest(), sample().content_digest());
        assert_ne!(sample().digest(), sample().content_digest());
    }

    fn single_property(tags: &[&str], label: &str) -> SchemaUnit {
        let class = make_class("Conflict", "Conflict", "").unwrap();
        let p = make_property("x", "EpistemicState", tags.iter().copied(), label, "", "Conflict")
            .unwrap();
        let tree = SchemaTree::conjoin_all(vec![
            SchemaTree::leaf(class.clone()),
            SchemaTree::leaf(p.clone()),
        ]);
        SchemaUnit::new(vec![class], vec![p], tree)
    }

    #[test]
    fn digest_separates_tag_list_from_label() {
        let split = single_property(&["a", "b"], "c");
        let joined = single_property(&["a"], "b\u{1f}c");
        assert_ne!(split.digest(), joined.digest());
        assert_ne!(split.content_digest(), joined.content_digest());
    }

    #[test]
    fn digest_separates_parent_list_from_next_leaf() {
        let base = make_class("Base", "Base", "").unwrap();
        let with_parent = make_class("Leaf", "Leaf", "").unwrap().with_parent("Base");
        let orphan = make_class("Leaf", "Leaf", "").unwrap();

        let a = SchemaUnit::new(
            vec![base.clone(), with_parent.clone()],
            vec![],
            SchemaTree::conjoin_all(vec![
                SchemaTree::leaf(with_parent),
                SchemaTree::leaf(base.clone()),
            ]),
        );
        let b = SchemaUnit::new(
            vec![base.clone(), orphan.clone()],
            vec![],
            SchemaTree::conjoin_all(vec![SchemaTree::leaf(orphan), SchemaTree::leaf(base)]),
        );
        assert_ne!(a.digest(), b.digest());
    }

    #[test]
    fn digest_follows_tree_shape() {
        let leaves = || ["A", "B", "C"].map(|id| SchemaTree::leaf(make_class(id, id, "").unwrap()));
        let classes: Vec<_> = ["A", "B", "C"]
            .iter()
            .map(|id| make_class(*id, *id, "").unwrap())
            .collect();

        let [a, b, c] = leaves();
        let flat = SchemaUnit::new(classes.clone(), vec![], SchemaTree::conjoin_all(vec![a, b, c]));
        let [a, b, c] = leaves();
        let nested = SchemaUnit::new(
            classes,
            vec![],
            SchemaTree::And(vec![SchemaTree::conjoin_all(vec![a, b]), c]),
        );
        assert_ne!(flat.digest(), nested.digest());
        assert_eq!(flat.content_digest(), nested.content_digest());
    }
}
