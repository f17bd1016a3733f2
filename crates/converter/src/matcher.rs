//! Template rule matching.
//!
//! Rules are compiled once per run. Each present clause of a rule must pass
//! for the rule to match; absent or empty clauses always pass. A tag clause
//! whose entries are all blank is present and never passes.

use crate::config::MatchMode;
use regex::{Regex, RegexBuilder};
use std::collections::HashSet;
use tracing::{trace, warn};
use ucd2harness_naming::{split_tag, TagSet};
use ucd2harness_schema::{MatchRule, Registry};

/// A `tags_any` / `tags_all` token.
#[derive(Debug, Clone, PartialEq, Eq)]
enum TagToken {
    /// `key:value`, compared against the normalized tag pairs.
    Pair(String),
    /// Bare word, compared against every key and every value.
    Word(String),
}

impl TagToken {
    fn parse(raw: &str) -> Option<Self> {
        let lowered = raw.trim().to_lowercase();
        if lowered.is_empty() {
            return None;
        }
        if lowered.contains(':') {
            let (key, value) = split_tag(&lowered)?;
            Some(TagToken::Pair(format!("{}:{}", key, value)))
        } else {
            Some(TagToken::Word(lowered))
        }
    }

    fn matches(&self, index: &TagIndex) -> bool {
        match self {
            TagToken::Pair(pair) => index.pairs.contains(pair),
            TagToken::Word(word) => index.keys.contains(word) || index.values.contains(word),
        }
    }
}

/// Lowercased lookup sets over a tag mapping.
#[derive(Debug, Default)]
pub struct TagIndex {
    pairs: HashSet<String>,
    keys: HashSet<String>,
    values: HashSet<String>,
}

impl TagIndex {
    pub fn new(tags: &TagSet) -> Self {
        let mut index = TagIndex::default();
        for (key, value) in tags.map() {
            let key = key.to_lowercase();
            let value = value.to_lowercase();
            index.pairs.insert(format!("{}:{}", key, value));
            index.keys.insert(key);
            index.values.insert(value);
        }
        index
    }
}

/// What a rule is matched against: one component of one application.
#[derive(Debug)]
pub struct MatchContext {
    /// Application name, component name and raw tag strings, space separated.
    pub haystack: String,
    pub index: TagIndex,
}

impl MatchContext {
    /// `tags` should be the application tags merged with the component tags.
    pub fn new(app_name: &str, component_name: &str, tags: &TagSet) -> Self {
        let mut parts: Vec<&str> = vec![app_name, component_name];
        parts.extend(tags.flat().iter().map(String::as_str));
        Self {
            haystack: parts.join(" "),
            index: TagIndex::new(tags),
        }
    }
}

#[derive(Debug)]
enum Clause {
    TagsAny(Vec<TagToken>),
    TagsAll(Vec<TagToken>),
    AnyRegex(Vec<Regex>),
    /// `None` when one of the patterns failed to compile; such a clause
    /// can never pass.
    AllRegex(Option<Vec<Regex>>),
}

impl Clause {
    fn passes(&self, ctx: &MatchContext) -> bool {
        match self {
            Clause::TagsAny(tokens) => tokens.iter().any(|t| t.matches(&ctx.index)),
            Clause::TagsAll(tokens) => {
                !tokens.is_empty() && tokens.iter().all(|t| t.matches(&ctx.index))
            }
            Clause::AnyRegex(patterns) => patterns.iter().any(|p| p.is_match(&ctx.haystack)),
            Clause::AllRegex(Some(patterns)) => {
                patterns.iter().all(|p| p.is_match(&ctx.haystack))
            }
            Clause::AllRegex(None) => false,
        }
    }
}

/// A registry rule with its clauses compiled.
#[derive(Debug)]
pub struct CompiledRule {
    pub rule: MatchRule,
    clauses: Vec<Clause>,
}

impl CompiledRule {
    /// Compile a rule. Rules without a `templateRef` are rejected.
    pub fn compile(rule: &MatchRule) -> Option<Self> {
        let label = rule.display_name().unwrap_or("<unnamed>").to_string();
        if rule.template_ref.as_deref().map_or(true, |r| r.trim().is_empty()) {
            warn!("Registry rule '{}' has no templateRef, ignoring it", label);
            return None;
        }

        let m = &rule.match_clauses;
        let mut clauses = Vec::new();

        if !m.tags_any.is_empty() {
            clauses.push(Clause::TagsAny(parse_tokens(&m.tags_any)));
        }
        if !m.tags_all.is_empty() {
            clauses.push(Clause::TagsAll(parse_tokens(&m.tags_all)));
        }
        if !m.any_regex.is_empty() {
            let compiled = m
                .any_regex
                .iter()
                .filter_map(|p| compile_pattern(&label, p))
                .collect();
            clauses.push(Clause::AnyRegex(compiled));
        }
        if !m.all_regex.is_empty() {
            let compiled: Vec<Option<Regex>> = m
                .all_regex
                .iter()
                .map(|p| compile_pattern(&label, p))
                .collect();
            clauses.push(Clause::AllRegex(compiled.into_iter().collect()));
        }

        Some(Self {
            rule: rule.clone(),
            clauses,
        })
    }

    pub fn matches(&self, ctx: &MatchContext) -> bool {
        self.clauses.iter().all(|c| c.passes(ctx))
    }
}

fn parse_tokens(raw: &[String]) -> Vec<TagToken> {
    raw.iter().filter_map(|t| TagToken::parse(t)).collect()
}

fn compile_pattern(rule: &str, pattern: &str) -> Option<Regex> {
    match RegexBuilder::new(pattern).case_insensitive(true).build() {
        Ok(re) => Some(re),
        Err(e) => {
            warn!(
                "Registry rule '{}': ignoring invalid pattern {:?}: {}",
                rule, pattern, e
            );
            None
        }
    }
}

/// Compiled registry.
#[derive(Debug)]
pub struct TemplateMatcher {
    rules: Vec<CompiledRule>,
    mode: MatchMode,
}

impl TemplateMatcher {
    pub fn new(registry: &Registry, mode: MatchMode) -> Self {
        let rules = registry
            .templates
            .iter()
            .filter_map(CompiledRule::compile)
            .collect();
        Self { rules, mode }
    }

    /// Matching rules in registry order; at most one in first-match mode.
    pub fn match_rules(&self, ctx: &MatchContext) -> Vec<&MatchRule> {
        let mut matched = Vec::new();
        for compiled in &self.rules {
            if compiled.matches(ctx) {
                trace!(
                    "Template rule '{}' matched",
                    compiled.rule.display_name().unwrap_or_default()
                );
                matched.push(&compiled.rule);
                if self.mode == MatchMode::FirstMatch {
                    break;
                }
            }
        }
        matched
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
