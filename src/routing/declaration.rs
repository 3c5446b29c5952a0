//! Resource declarations.
//!
//! A declaration is the compact, caller-facing description of one resource:
//! which controller serves it, which authorizer and validators guard it, and
//! which relationships it exposes. Relationship names accept one name or a
//! list and are normalized to an ordered list as soon as they are read.

use serde::{Deserialize, Serialize};

use crate::routing::route::Action;

/// Relationship cardinality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum RelationshipKind {
    HasOne,
    HasMany,
}

impl RelationshipKind {
    /// Actions registered for a relationship of this kind, in order.
    pub fn actions(&self) -> &'static [Action] {
        match self {
            RelationshipKind::HasOne => &[
                Action::ReadRelated,
                Action::ReadRelationship,
                Action::ReplaceRelationship,
            ],
            RelationshipKind::HasMany => &[
                Action::ReadRelated,
                Action::ReadRelationship,
                Action::ReplaceRelationship,
                Action::AddRelationship,
                Action::RemoveRelationship,
            ],
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RelationshipKind::HasOne => "has-one",
            RelationshipKind::HasMany => "has-many",
        }
    }
}

/// One relationship name or several.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum RelationshipNames {
    One(String),
    Many(Vec<String>),
}

impl RelationshipNames {
    /// Names in declaration order.
    pub fn to_vec(&self) -> Vec<String> {
        match self {
            RelationshipNames::One(name) => vec![name.clone()],
            RelationshipNames::Many(names) => names.clone(),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            RelationshipNames::One(_) => false,
            RelationshipNames::Many(names) => names.is_empty(),
        }
    }
}

impl Default for RelationshipNames {
    fn default() -> Self {
        RelationshipNames::Many(Vec::new())
    }
}

impl From<&str> for RelationshipNames {
    fn from(name: &str) -> Self {
        RelationshipNames::One(name.to_string())
    }
}

impl From<String> for RelationshipNames {
    fn from(name: String) -> Self {
        RelationshipNames::One(name)
    }
}

impl From<Vec<String>> for RelationshipNames {
    fn from(names: Vec<String>) -> Self {
        RelationshipNames::Many(names)
    }
}

impl From<Vec<&str>> for RelationshipNames {
    fn from(names: Vec<&str>) -> Self {
        RelationshipNames::Many(names.into_iter().map(String::from).collect())
    }
}

impl<const N: usize> From<[&str; N]> for RelationshipNames {
    fn from(names: [&str; N]) -> Self {
        RelationshipNames::Many(names.iter().map(|n| n.to_string()).collect())
    }
}

/// A declared relationship after normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relationship {
    pub name: String,
    pub kind: RelationshipKind,
}

/// Options for a single resource.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub struct ResourceDeclaration {
    /// Controller identifier. Derived from the resource type when absent.
    pub controller: Option<String>,

    /// Authorizer identifier wired in as `json-api.authorize:<id>`.
    pub authorizer: Option<String>,

    /// Validators identifier wired in as `json-api.validate:<id>`.
    pub validators: Option<String>,

    pub has_one: RelationshipNames,

    pub has_many: RelationshipNames,

    /// Extra middleware appended after authorization and validation.
    pub middleware: Vec<String>,
}

impl ResourceDeclaration {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn controller(mut self, controller: impl Into<String>) -> Self {
        self.controller = Some(controller.into());
        self
    }

    pub fn authorizer(mut self, authorizer: impl Into<String>) -> Self {
        self.authorizer = Some(authorizer.into());
        self
    }

    pub fn validators(mut self, validators: impl Into<String>) -> Self {
        self.validators = Some(validators.into());
        self
    }

    pub fn has_one(mut self, names: impl Into<RelationshipNames>) -> Self {
        self.has_one = names.into();
        self
    }

    pub fn has_many(mut self, names: impl Into<RelationshipNames>) -> Self {
        self.has_many = names.into();
        self
    }

    pub fn middleware(mut self, name: impl Into<String>) -> Self {
        self.middleware.push(name.into());
        self
    }

    /// All relationships, has-one first, each kind in declaration order.
    pub fn relationships(&self) -> Vec<Relationship> {
        let has_one = self.has_one.to_vec().into_iter().map(|name| Relationship {
            name,
            kind: RelationshipKind::HasOne,
        });
        let has_many = self.has_many.to_vec().into_iter().map(|name| Relationship {
            name,
            kind: RelationshipKind::HasMany,
        });
        has_one.chain(has_many).collect()
    }
}
