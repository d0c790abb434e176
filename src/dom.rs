//! Selector-driven DOM queries
//!
//! `DomQuery` is the only view the extractors have of a page. `ScraperDom`
//! implements it on top of the scraper crate and adds the jQuery-style
//! `:eq(n)` positional pseudo-class that plain CSS lacks.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, RwLock};

use ego_tree::NodeId;
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use tracing::warn;

use crate::error::DomError;

/// Tree query capability consumed by the extractors
pub trait DomQuery {
    /// Reference to one element of the parsed tree
    type Handle: Copy;

    /// Parse markup into a queryable tree
    fn parse(html: &str) -> Self
    where
        Self: Sized;

    /// Top-level element, or `None` for a tree with no elements
    fn root(&self) -> Option<Self::Handle>;

    /// Descendants of `scope` matching `selector`, in document order.
    /// Never includes `scope` itself. Unusable selectors match nothing.
    fn find(&self, scope: Self::Handle, selector: &str) -> Vec<Self::Handle>;

    /// First match of `selector` under `scope`
    fn find_first(&self, scope: Self::Handle, selector: &str) -> Option<Self::Handle> {
        self.find(scope, selector).into_iter().next()
    }

    /// Concatenated text of the element's subtree
    fn text(&self, handle: Self::Handle) -> String;

    /// Inner markup of the element
    fn html(&self, handle: Self::Handle) -> String;

    /// Attribute value, if present
    fn attr(&self, handle: Self::Handle, name: &str) -> Option<String>;

    /// Remove every child of the element in place
    fn empty(&mut self, handle: Self::Handle);
}

static EQ_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r":eq\(([^)]*)\)").expect("static :eq pattern"));

/// Upper bound on distinct queries kept compiled
const MAX_CACHED_QUERIES: usize = 256;

static QUERY_CACHE: Lazy<RwLock<HashMap<String, Arc<CompiledQuery>>>> =
    Lazy::new(|| RwLock::new(HashMap::new()));

/// A selector split at its `:eq(n)` markers.
///
/// Every step is anchored with `:scope`, so all of its compounds must match
/// inside the element the step searches from.
#[derive(Debug)]
struct CompiledQuery {
    steps: Vec<QueryStep>,
}

#[derive(Debug)]
struct QueryStep {
    selector: Selector,
    index: Option<usize>,
}

impl CompiledQuery {
    fn parse(query: &str) -> Result<Self, DomError> {
        let mut steps = Vec::new();
        let mut rest_start = 0;

        for caps in EQ_PATTERN.captures_iter(query) {
            let (start, end) = caps
                .get(0)
                .map(|m| (m.start(), m.end()))
                .unwrap_or_default();
            let index = caps[1]
                .trim()
                .parse::<usize>()
                .map_err(|_| DomError::InvalidIndex(query.to_string()))?;

            // `:eq(n)` closes its compound: `li:eq(0).x` has no meaning here
            let rest = &query[end..];
            if !rest.is_empty() && !rest.starts_with(|c: char| c.is_whitespace() || c == '>') {
                return Err(DomError::InvalidSelector {
                    selector: query.to_string(),
                    reason: ":eq() must end a compound selector".to_string(),
                });
            }

            // A bare `:eq(n)` applies to any element, as in `div :eq(1)`
            let compound = &query[rest_start..start];
            let css = if compound.trim().is_empty()
                || compound.ends_with(|c: char| c.is_whitespace() || c == '>')
            {
                format!("{}*", compound)
            } else {
                compound.to_string()
            };

            steps.push(QueryStep {
                selector: compile_css(query, &css)?,
                index: Some(index),
            });
            rest_start = end;
        }

        let tail = query[rest_start..].trim();
        if !tail.is_empty() || steps.is_empty() {
            steps.push(QueryStep {
                selector: compile_css(query, tail)?,
                index: None,
            });
        }

        Ok(Self { steps })
    }
}

fn compile_css(query: &str, css: &str) -> Result<Selector, DomError> {
    let anchored = format!(":scope {}", css.trim());
    Selector::parse(&anchored).map_err(|e| DomError::InvalidSelector {
        selector: query.to_string(),
        reason: e.to_string(),
    })
}

fn compiled(query: &str) -> Result<Arc<CompiledQuery>, DomError> {
    if let Ok(cache) = QUERY_CACHE.read() {
        if let Some(cached) = cache.get(query) {
            return Ok(Arc::clone(cached));
        }
    }

    let compiled = Arc::new(CompiledQuery::parse(query)?);
    if let Ok(mut cache) = QUERY_CACHE.write() {
        remember(&mut cache, query, &compiled);
    }
    Ok(compiled)
}

/// Keep a compiled query unless the cache is full
fn remember(
    cache: &mut HashMap<String, Arc<CompiledQuery>>,
    query: &str,
    compiled: &Arc<CompiledQuery>,
) {
    if cache.len() >= MAX_CACHED_QUERIES && !cache.contains_key(query) {
        return;
    }
    cache
        .entry(query.to_string())
        .or_insert_with(|| Arc::clone(compiled));
}

/// `DomQuery` backed by a scraper document
pub struct ScraperDom {
    document: Html,
}

impl ScraperDom {
    /// Like `find`, but reports selectors that fail to compile
    pub fn try_find(&self, scope: NodeId, selector: &str) -> Result<Vec<NodeId>, DomError> {
        let query = compiled(selector)?;
        let mut current = vec![scope];

        for step in &query.steps {
            let mut seen = HashSet::new();
            let mut matched = Vec::new();
            for scope_id in &current {
                let Some(scope_el) = self.element(*scope_id) else {
                    continue;
                };
                for el in scope_el.select(&step.selector) {
                    if el.id() != *scope_id && seen.insert(el.id()) {
                        matched.push(el.id());
                    }
                }
            }
            if let Some(n) = step.index {
                matched = matched.into_iter().nth(n).into_iter().collect();
            }
            current = matched;
        }

        Ok(current)
    }

    /// Element for a handle, if it is still attached to the document
    fn element(&self, id: NodeId) -> Option<ElementRef<'_>> {
        let node = self.document.tree.get(id)?;
        let root_id = self.document.tree.root().id();
        let attached = id == root_id || node.ancestors().any(|a| a.id() == root_id);
        if !attached {
            return None;
        }
        ElementRef::wrap(node)
    }
}

impl DomQuery for ScraperDom {
    type Handle = NodeId;

    fn parse(html: &str) -> Self {
        Self {
            document: Html::parse_document(html),
        }
    }

    fn root(&self) -> Option<NodeId> {
        Some(self.document.root_element().id())
    }

    fn find(&self, scope: NodeId, selector: &str) -> Vec<NodeId> {
        match self.try_find(scope, selector) {
            Ok(found) => found,
            Err(e) => {
                warn!(error = %e, "selector query skipped");
                vec![]
            }
        }
    }

    fn text(&self, handle: NodeId) -> String {
        self.element(handle)
            .map(|el| el.text().collect::<String>())
            .unwrap_or_default()
    }

    fn html(&self, handle: NodeId) -> String {
        self.element(handle)
            .map(|el| el.inner_html())
            .unwrap_or_default()
    }

    fn attr(&self, handle: NodeId, name: &str) -> Option<String> {
        self.element(handle)
            .and_then(|el| el.value().attr(name).map(String::from))
    }

    fn empty(&mut self, handle: NodeId) {
        let children: Vec<NodeId> = match self.document.tree.get(handle) {
            Some(node) => node.children().map(|c| c.id()).collect(),
            None => return,
        };

        for child in children {
            if let Some(mut node) = self.document.tree.get_mut(child) {
                node.detach();
            }
        }
    }
}
