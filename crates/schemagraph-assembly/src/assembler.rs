//! Declaration folding and validation.
//!
//! An assembly pass:
//!
//! 1. walks the input once, keeping first-seen order,
//! 2. merges identical declarations that share an identifier and rejects
//!    differing ones,
//! 3. resolves owning classes and class parents against the whole batch
//!    (forward and self references are fine), and checks that the parent
//!    graph is acyclic,
//! 4. folds the survivors left to right into a [`SchemaTree`].
//!
//! The [`Assembler`] holds configuration only; each call is independent.

use std::collections::{HashMap, HashSet};

use schemagraph_dsl::{ClassDeclaration, Declaration, PropertyDeclaration};
use serde::Serialize;

use crate::config::AssemblyConfig;
use crate::error::AssemblyError;
use crate::tree::SchemaTree;
use crate::unit::SchemaUnit;

/// Counters from one assembly pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct AssemblyReport {
    pub input_declarations: usize,
    pub duplicates_merged: usize,
    pub classes: usize,
    pub properties: usize,
}

#[derive(Debug, Clone, Default)]
pub struct Assembler {
    config: AssemblyConfig,
}

/// Assemble with the default configuration.
pub fn assemble<I>(declarations: I) -> Result<SchemaUnit, AssemblyError>
where
    I: IntoIterator,
    I::Item: Into<Declaration>,
{
    Assembler::default().assemble(declarations)
}

impl Assembler {
    pub fn new(config: AssemblyConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AssemblyConfig {
        &self.config
    }

    pub fn assemble<I>(&self, declarations: I) -> Result<SchemaUnit, AssemblyError>
    where
        I: IntoIterator,
        I::Item: Into<Declaration>,
    {
        self.assemble_with_report(declarations).map(|(unit, _)| unit)
    }

    pub fn assemble_with_report<I>(
        &self,
        declarations: I,
    ) -> Result<(SchemaUnit, AssemblyReport), AssemblyError>
    where
        I: IntoIterator,
        I::Item: Into<Declaration>,
    {
        let mut batch = Batch::default();
        for declaration in declarations {
            batch.push(declaration.into())?;
        }
        batch.resolve()?;

        let tree = SchemaTree::conjoin_all(batch.ordered.iter().cloned().map(SchemaTree::Declare));
        Ok(self.finish(batch, tree))
    }

    /// Assemble several declaration groups as one batch.
    ///
    /// Deduplication and resolution run over the union of all groups, so a
    /// property may be owned by a class declared in another group. Each group
    /// becomes its own conjunction (a group whose declarations were all merged
    /// into earlier ones is skipped) and the group trees are conjoined in
    /// order under one root.
    pub fn assemble_groups<G, I>(&self, groups: G) -> Result<SchemaUnit, AssemblyError>
    where
        G: IntoIterator<Item = I>,
        I: IntoIterator,
        I::Item: Into<Declaration>,
    {
        let mut batch = Batch::default();
        let mut group_leaves: Vec<Vec<Declaration>> = Vec::new();
        for group in groups {
            let mut leaves = Vec::new();
            for declaration in group {
                let declaration = declaration.into();
                if batch.push(declaration.clone())? {
                    leaves.push(declaration);
                }
            }
            if !leaves.is_empty() {
                group_leaves.push(leaves);
            }
        }
        batch.resolve()?;

        let tree = SchemaTree::And(
            group_leaves
                .into_iter()
                .map(|leaves| {
                    SchemaTree::conjoin_all(leaves.into_iter().map(SchemaTree::Declare))
                })
                .collect(),
        );
        Ok(self.finish(batch, tree).0)
    }

    fn finish(&self, batch: Batch, tree: SchemaTree) -> (SchemaUnit, AssemblyReport) {
        let Batch {
            ordered,
            input,
            duplicates,
            ..
        } = batch;

        let mut classes: Vec<ClassDeclaration> = Vec::new();
        let mut properties: Vec<PropertyDeclaration> = Vec::new();
        for declaration in ordered {
            match declaration {
                Declaration::Class(c) => classes.push(c),
                Declaration::Property(p) => properties.push(p),
            }
        }

        if self.config.warn_unknown_tags {
            for p in &properties {
                for tag in p.tags().iter().filter(|t| !t.is_known()) {
                    tracing::warn!(
                        property = p.identifier(),
                        tag = %tag,
                        "tag outside the known authority domains"
                    );
                }
            }
        }

        let report = AssemblyReport {
            input_declarations: input,
            duplicates_merged: duplicates,
            classes: classes.len(),
            properties: properties.len(),
        };
        tracing::debug!(
            input = report.input_declarations,
            duplicates = report.duplicates_merged,
            classes = report.classes,
            properties = report.properties,
            "assembled schema unit"
        );

        (SchemaUnit::new(classes, properties, tree), report)
    }
}

/// Deduplicated declarations in first-seen order.
#[derive(Debug, Default)]
struct Batch {
    ordered: Vec<Declaration>,
    index: HashMap<String, usize>,
    input: usize,
    duplicates: usize,
}

impl Batch {
    /// Returns `true` if the declaration is new, `false` if it merged into an
    /// identical earlier one.
    fn push(&mut self, declaration: Declaration) -> Result<bool, AssemblyError> {
        self.input += 1;
        match self.index.get(declaration.identifier()) {
            Some(&i) if self.ordered[i] == declaration => {
                tracing::debug!(
                    identifier = declaration.identifier(),
                    "merged duplicate declaration"
                );
                self.duplicates += 1;
                Ok(false)
            }
            Some(_) => Err(AssemblyError::ConflictingDeclaration {
                identifier: declaration.identifier().to_string(),
            }),
            None => {
                self.index
                    .insert(declaration.identifier().to_string(), self.ordered.len());
                self.ordered.push(declaration);
                Ok(true)
            }
        }
    }

    fn resolve(&self) -> Result<(), AssemblyError> {
        let classes: HashMap<&str, &ClassDeclaration> = self
            .ordered
            .iter()
            .filter_map(Declaration::as_class)
            .map(|c| (c.identifier(), c))
            .collect();

        for declaration in &self.ordered {
            match declaration {
                Declaration::Property(p) => {
                    if !classes.contains_key(p.owning_class()) {
                        return Err(AssemblyError::UnknownClass {
                            identifier: p.identifier().to_string(),
                            owning_class: p.owning_class().to_string(),
                        });
                    }
                }
                Declaration::Class(c) => {
                    let missing = c.parents().iter().find(|p| !classes.contains_key(p.as_str()));
                    if let Some(parent) = missing {
                        return Err(AssemblyError::UnknownParent {
                            identifier: c.identifier().to_string(),
                            parent: parent.clone(),
                        });
                    }
                }
            }
        }

        check_acyclic(&self.ordered, &classes)
    }
}

/// Depth-first search over parent edges, in first-seen class order.
fn check_acyclic(
    ordered: &[Declaration],
    classes: &HashMap<&str, &ClassDeclaration>,
) -> Result<(), AssemblyError> {
    fn visit<'a>(
        class: &'a ClassDeclaration,
        classes: &HashMap<&str, &'a ClassDeclaration>,
        on_path: &mut HashSet<&'a str>,
        done: &mut HashSet<&'a str>,
    ) -> Result<(), AssemblyError> {
        let id = class.identifier();
        if done.contains(id) {
            return Ok(());
        }
        if !on_path.insert(id) {
            return Err(AssemblyError::InheritanceCycle {
                identifier: id.to_string(),
            });
        }
        for parent in class.parents() {
            if let Some(&parent) = classes.get(parent.as_str()) {
                visit(parent, classes, on_path, done)?;
            }
        }
        on_path.remove(id);
        done.insert(id);
        Ok(())
    }

    let mut on_path = HashSet::new();
    let mut done = HashSet::new();
    for class in ordered.iter().filter_map(Declaration::as_class) {
        visit(class, classes, &mut on_path, &mut done)?;
    }
    Ok(())
}
