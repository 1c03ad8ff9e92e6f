//! Declarative suppressions loaded from TOML or JSON.
//!
//! Plugins that would otherwise hard-code [`crate::suppress_message`] calls can
//! describe them in configuration instead:
//!
//! ```toml
//! [[suppress]]
//! checker = "variables"
//! method = "visit_name"
//! message = "W0612"
//! when = "underscore-prefixed"
//! ```
//!
//! `checker` names a checker type; the first registered checker whose type or
//! an ancestor carries that name is targeted. `when` names a predicate from a
//! [`PredicateSet`] and defaults to [`ALWAYS`].

use crate::checker::{CheckerType, VisitMethod};
use crate::conditional::suppress_message;
use crate::error::AugmentError;
use crate::host::{CheckerRegistry, DiagnosticSink, VisitTarget};
use camino::{Utf8Path, Utf8PathBuf};
use lintel_common::MessageId;
use log::debug;
use serde::Deserialize;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;
use thiserror::Error;

/// Name of the predicate that matches every node.
pub const ALWAYS: &str = "always";

/// Errors raised while loading or applying suppression configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("could not read {path}: {source}")]
    Io {
        /// File that failed to load.
        path: Utf8PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// TOML input did not match the configuration schema.
    #[error("invalid TOML suppression config: {0}")]
    Toml(#[from] toml::de::Error),

    /// JSON input did not match the configuration schema.
    #[error("invalid JSON suppression config: {0}")]
    Json(#[from] serde_json::Error),

    /// A rule referenced a predicate missing from the [`PredicateSet`].
    #[error("unknown predicate `{name}`")]
    UnknownPredicate {
        /// The predicate name in the rule.
        name: String,
    },

    /// No registered checker has a type or ancestor with this name.
    #[error("no registered checker has type `{checker}`")]
    UnknownChecker {
        /// The checker type name in the rule.
        checker: String,
    },

    /// The matching checker does not implement the named method.
    #[error("checker `{checker}` has no visit method `{method}`")]
    UnknownMethod {
        /// The checker type name in the rule.
        checker: String,
        /// The method name in the rule.
        method: String,
    },

    /// Installing the suppression failed.
    #[error(transparent)]
    Augment(#[from] AugmentError),
}

/// One conditional suppression.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct SuppressionRule {
    /// Checker type name, matched against each checker's type lineage.
    pub checker: String,
    /// Visit method name, such as `visit_name`.
    pub method: String,
    /// Message kind to drop.
    pub message: MessageId,
    /// Predicate deciding which nodes the suppression applies to.
    #[serde(default = "SuppressionRule::default_predicate")]
    pub when: String,
}

impl SuppressionRule {
    fn default_predicate() -> String {
        ALWAYS.to_owned()
    }
}

/// A set of suppression rules.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct SuppressionConfig {
    /// Rules in the order they are installed.
    pub suppress: Vec<SuppressionRule>,
}

impl SuppressionConfig {
    /// Parses TOML input.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Toml`] when the input does not match the schema.
    ///
    /// # Examples
    ///
    /// ```
    /// use lintel::SuppressionConfig;
    ///
    /// let config = SuppressionConfig::from_toml_str(
    ///     "[[suppress]]\nchecker = \"names\"\nmethod = \"visit_name\"\nmessage = \"W0612\"\n",
    /// )
    /// .unwrap();
    /// assert_eq!(config.suppress[0].when, "always");
    /// ```
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(source)?)
    }

    /// Parses JSON input.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Json`] when the input does not match the schema.
    pub fn from_json_str(source: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(source)?)
    }

    /// Reads a configuration file; `.json` files are parsed as JSON,
    /// everything else as TOML.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] when the file cannot be read, or the parse
    /// error for its format.
    pub fn load(path: &Utf8Path) -> Result<Self, ConfigError> {
        let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_owned(),
            source,
        })?;

        if path.extension() == Some("json") {
            Self::from_json_str(&source)
        } else {
            Self::from_toml_str(&source)
        }
    }

    /// Installs every rule on `linter` through [`suppress_message`].
    ///
    /// Returns the number of rules installed. Rules are validated and
    /// installed in order; on failure the rules before the failing one stay
    /// installed.
    ///
    /// # Errors
    ///
    /// Fails on the first rule naming an unknown predicate, checker type, or
    /// visit method.
    pub fn apply<N, L>(&self, linter: &mut L, predicates: &PredicateSet<N>) -> Result<usize, ConfigError>
    where
        N: 'static,
        L: CheckerRegistry<N> + VisitTarget<N> + DiagnosticSink,
    {
        for rule in &self.suppress {
            let predicate = predicates
                .get(&rule.when)
                .ok_or_else(|| ConfigError::UnknownPredicate {
                    name: rule.when.clone(),
                })?;
            let method = resolve_method(&*linter, rule)?;

            suppress_message(linter, method, rule.message.clone(), move |node: &N| {
                predicate(node)
            })?;
            debug!(
                target: "lintel::config",
                "suppressing {} from {method} when `{}`",
                rule.message,
                rule.when,
            );
        }
        Ok(self.suppress.len())
    }
}

fn resolve_method<N, L>(linter: &L, rule: &SuppressionRule) -> Result<VisitMethod, ConfigError>
where
    L: CheckerRegistry<N>,
{
    let (checker_type, checker) = linter
        .checkers()
        .find_map(|(_, checker)| {
            named_ancestor(checker.checker_type(), &rule.checker).map(|ty| (ty, checker))
        })
        .ok_or_else(|| ConfigError::UnknownChecker {
            checker: rule.checker.clone(),
        })?;

    let method = checker
        .visit_methods()
        .iter()
        .copied()
        .find(|name| *name == rule.method)
        .ok_or_else(|| ConfigError::UnknownMethod {
            checker: rule.checker.clone(),
            method: rule.method.clone(),
        })?;

    Ok(VisitMethod::new(checker_type, method))
}

fn named_ancestor(checker_type: &'static CheckerType, name: &str) -> Option<&'static CheckerType> {
    checker_type.lineage().find(|ty| ty.name() == name)
}

/// Predicate over visited nodes.
pub type Predicate<N> = Rc<dyn Fn(&N) -> bool>;

/// Named node predicates available to configuration rules.
pub struct PredicateSet<N> {
    predicates: HashMap<String, Predicate<N>>,
}

impl<N: 'static> PredicateSet<N> {
    /// A set holding only [`ALWAYS`].
    #[must_use]
    pub fn new() -> Self {
        let mut predicates: HashMap<String, Predicate<N>> = HashMap::new();
        predicates.insert(ALWAYS.to_owned(), Rc::new(|_: &N| true));
        Self { predicates }
    }

    /// Adds or replaces the predicate `name`.
    #[must_use]
    pub fn with<F>(mut self, name: impl Into<String>, predicate: F) -> Self
    where
        F: Fn(&N) -> bool + 'static,
    {
        self.predicates.insert(name.into(), Rc::new(predicate));
        self
    }

    /// Returns the predicate registered as `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<Predicate<N>> {
        self.predicates.get(name).cloned()
    }
}

impl<N: 'static> Default for PredicateSet<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N> fmt::Debug for PredicateSet<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<_> = self.predicates.keys().collect();
        names.sort_unstable();
        f.debug_struct("PredicateSet").field("names", &names).finish()
    }
}
