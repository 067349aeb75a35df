//! Declarative schemas
//!
//! A [`Schema`] is a tree of string fields, objects and tagged unions.
//! Every string field owns an ordered rule list; evaluation stops at the
//! first failing rule of a field, and objects visit their fields in
//! declaration order. Schemas are immutable once built and can be shared
//! between threads.

use super::path;
use super::rules::{Rule, EMPTY_ERROR, OPTION_ERROR, TYPE_ERROR, UNKNOWN_PATH};
use crate::error::ValidationFailure;
use crate::types::JsonObject;
use regex::Regex;
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

// ============================================================================
// Walk State
// ============================================================================

/// Failures collected during one validation pass
struct Walk {
    abort_early: bool,
    failures: Vec<ValidationFailure>,
}

/// Marker returned when a subtree failed (details live in `Walk::failures`)
struct Halt;

/// Outcome of validating one node: the normalized value, `None` if absent
type Step = std::result::Result<Option<Value>, Halt>;

impl Walk {
    fn first_failure() -> Self {
        Self {
            abort_early: true,
            failures: Vec::new(),
        }
    }

    fn collect_all() -> Self {
        Self {
            abort_early: false,
            failures: Vec::new(),
        }
    }

    fn fail(&mut self, path: &str, message: &str) -> Halt {
        self.failures.push(ValidationFailure::new(path, message));
        Halt
    }

    fn into_first(self) -> ValidationFailure {
        self.failures
            .into_iter()
            .next()
            .unwrap_or_else(|| ValidationFailure::new("", TYPE_ERROR))
    }
}

// ============================================================================
// Schema
// ============================================================================

/// A node of a validation schema
#[derive(Debug, Clone)]
pub enum Schema {
    /// Text field with rules
    String(StringSchema),
    /// Object with named fields
    Object(ObjectSchema),
    /// Object whose shape is picked by a discriminator field
    Union(UnionSchema),
}

impl Schema {
    /// Validate a whole candidate record
    ///
    /// Returns the normalized record, or the first failure in declaration order.
    pub fn validate(&self, candidate: &Value) -> Result<Value, ValidationFailure> {
        if candidate.is_null() {
            return Err(ValidationFailure::new("", EMPTY_ERROR));
        }

        let mut state = Walk::first_failure();
        match self.walk("", Some(candidate), &mut state) {
            Ok(value) => Ok(value.unwrap_or_else(|| candidate.clone())),
            Err(Halt) => {
                let failure = state.into_first();
                debug!(
                    path = %failure.path,
                    message_key = %failure.message_key,
                    "Candidate failed validation"
                );
                Err(failure)
            }
        }
    }

    /// Validate a whole candidate record, collecting one failure per failing field
    pub fn validate_all(&self, candidate: &Value) -> Result<Value, Vec<ValidationFailure>> {
        if candidate.is_null() {
            return Err(vec![ValidationFailure::new("", EMPTY_ERROR)]);
        }

        let mut state = Walk::collect_all();
        match self.walk("", Some(candidate), &mut state) {
            Ok(value) => Ok(value.unwrap_or_else(|| candidate.clone())),
            Err(Halt) => {
                debug!(
                    failures = state.failures.len(),
                    "Candidate failed validation"
                );
                Err(state.failures)
            }
        }
    }

    /// Validate only the field at `field_path` and the ancestors needed to reach it
    ///
    /// A missing parent object fails at the parent's path. Violations in
    /// unrelated fields are ignored. On success the candidate is returned with
    /// the addressed field normalized.
    pub fn validate_at(
        &self,
        field_path: &str,
        candidate: &Value,
    ) -> Result<Value, ValidationFailure> {
        let segments = path::segments(field_path)?;
        let mut output = candidate.clone();

        if let Err(failure) = self.validate_path("", &segments, &mut output) {
            debug!(
                field_path,
                path = %failure.path,
                message_key = %failure.message_key,
                "Field failed validation"
            );
            return Err(failure);
        }

        Ok(output)
    }

    /// Check a candidate without keeping the normalized value
    pub fn is_valid(&self, candidate: &Value) -> bool {
        self.validate(candidate).is_ok()
    }

    /// Look up the schema node declared at a dotted path
    ///
    /// Union members are searched in registration order.
    pub fn describe(&self, field_path: &str) -> Option<&Schema> {
        if field_path.is_empty() {
            return Some(self);
        }
        let (head, tail) = match field_path.split_once('.') {
            Some((head, tail)) => (head, Some(tail)),
            None => (field_path, None),
        };

        let candidates: Vec<&Schema> = match self {
            Schema::String(_) => return None,
            Schema::Object(object) => object.get(head).into_iter().collect(),
            Schema::Union(union) if head == union.discriminator => vec![union.tag_schema()],
            Schema::Union(union) => union
                .variants
                .iter()
                .filter_map(|(_, variant)| variant.get(head))
                .collect(),
        };

        candidates
            .into_iter()
            .find_map(|child| match tail {
                Some(rest) => child.describe(rest),
                None => Some(child),
            })
    }

    fn walk(&self, path: &str, value: Option<&Value>, state: &mut Walk) -> Step {
        match self {
            Schema::String(schema) => schema.walk(path, value, state),
            Schema::Object(schema) => schema.walk(path, value, state),
            Schema::Union(schema) => schema.walk(path, value, state),
        }
    }

    fn validate_value(
        &self,
        path: &str,
        value: Option<&Value>,
    ) -> Result<Option<Value>, ValidationFailure> {
        let mut state = Walk::first_failure();
        self.walk(path, value, &mut state)
            .map_err(|Halt| state.into_first())
    }

    fn validate_path(
        &self,
        here: &str,
        rest: &[&str],
        node: &mut Value,
    ) -> Result<(), ValidationFailure> {
        let Some((head, tail)) = rest.split_first() else {
            return Ok(());
        };

        let (object, map) = match self {
            Schema::String(_) => {
                return Err(ValidationFailure::new(path::join(here, head), UNKNOWN_PATH));
            }
            Schema::Object(object) => (object, object_at(here, node, object.missing_message())?),
            Schema::Union(union) => {
                let map = object_at(here, node, union.missing_message())?;
                let variant = union.select(here, map)?;
                if *head == union.discriminator && tail.is_empty() {
                    return Ok(());
                }
                (variant, map)
            }
        };

        let child_path = path::join(here, head);
        let child = object
            .get(head)
            .ok_or_else(|| ValidationFailure::new(&child_path, UNKNOWN_PATH))?;

        if tail.is_empty() {
            if let Some(normalized) = child.validate_value(&child_path, map.get(*head))? {
                map.insert((*head).to_string(), normalized);
            }
            return Ok(());
        }

        let slot = map.entry((*head).to_string()).or_insert(Value::Null);
        child.validate_path(&child_path, tail, slot)
    }
}

/// Resolve a node that must be an object on the way to a deeper path
fn object_at<'a>(
    here: &str,
    node: &'a mut Value,
    missing_message: &str,
) -> Result<&'a mut JsonObject, ValidationFailure> {
    match node {
        Value::Object(map) => Ok(map),
        Value::Null => Err(ValidationFailure::new(here, missing_message)),
        _ => Err(ValidationFailure::new(here, TYPE_ERROR)),
    }
}

impl From<StringSchema> for Schema {
    fn from(schema: StringSchema) -> Self {
        Schema::String(schema)
    }
}

impl From<ObjectSchema> for Schema {
    fn from(schema: ObjectSchema) -> Self {
        Schema::Object(schema)
    }
}

impl From<UnionSchema> for Schema {
    fn from(schema: UnionSchema) -> Self {
        Schema::Union(schema)
    }
}

// ============================================================================
// String Schema
// ============================================================================

/// Text field: normalization followed by an ordered rule list
#[derive(Debug, Clone, Default)]
pub struct StringSchema {
    trim: bool,
    default: Option<String>,
    rules: Vec<Rule>,
}

impl StringSchema {
    /// Create an optional text field with no rules
    pub fn new() -> Self {
        Self::default()
    }

    /// Trim surrounding whitespace before checking rules
    #[must_use]
    pub fn trim(mut self) -> Self {
        self.trim = true;
        self
    }

    /// Value used when the field is absent
    #[must_use]
    pub fn default_value(mut self, value: impl Into<String>) -> Self {
        self.default = Some(value.into());
        self
    }

    /// Field must be present and non-empty
    #[must_use]
    pub fn required(self, message: impl Into<String>) -> Self {
        self.rule(Rule::Required {
            message: message.into(),
        })
    }

    /// Field must have at least `min` characters
    #[must_use]
    pub fn min_length(self, min: usize, message: impl Into<String>) -> Self {
        self.rule(Rule::MinLength {
            min,
            message: message.into(),
        })
    }

    /// Field must match the pattern
    #[must_use]
    pub fn matches(self, pattern: Regex, message: impl Into<String>) -> Self {
        self.rule(Rule::Matches {
            pattern,
            message: message.into(),
        })
    }

    /// Field must look like an email address
    #[must_use]
    pub fn email(self, message: impl Into<String>) -> Self {
        self.rule(Rule::Email {
            message: message.into(),
        })
    }

    /// Field must be an absolute http(s) URL
    #[must_use]
    pub fn url(self, message: impl Into<String>) -> Self {
        self.rule(Rule::Url {
            message: message.into(),
        })
    }

    /// Field must be one of the allowed values
    #[must_use]
    pub fn one_of<I, S>(self, allowed: I, message: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.rule(Rule::OneOf {
            allowed: allowed.into_iter().map(Into::into).collect(),
            message: message.into(),
        })
    }

    /// Field must satisfy a named custom predicate
    #[must_use]
    pub fn test<F>(self, name: impl Into<String>, message: impl Into<String>, predicate: F) -> Self
    where
        F: Fn(&str) -> bool + Send + Sync + 'static,
    {
        self.rule(Rule::Test {
            name: name.into(),
            message: message.into(),
            predicate: Arc::new(predicate),
        })
    }

    /// Append a rule
    #[must_use]
    pub fn rule(mut self, rule: Rule) -> Self {
        self.rules.push(rule);
        self
    }

    /// Rules in declaration order
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Whether the field has a `required` rule
    pub fn is_required(&self) -> bool {
        self.rules.iter().any(|r| matches!(r, Rule::Required { .. }))
    }

    fn normalize(&self, value: Option<&Value>) -> Result<Option<String>, &'static str> {
        let text = match value {
            None | Some(Value::Null) => return Ok(self.default.clone()),
            Some(Value::String(s)) => s.clone(),
            Some(Value::Number(n)) => n.to_string(),
            Some(Value::Bool(b)) => b.to_string(),
            Some(_) => return Err(TYPE_ERROR),
        };

        if self.trim {
            Ok(Some(text.trim().to_string()))
        } else {
            Ok(Some(text))
        }
    }

    fn walk(&self, path: &str, value: Option<&Value>, state: &mut Walk) -> Step {
        let normalized = match self.normalize(value) {
            Ok(normalized) => normalized,
            Err(message) => return Err(state.fail(path, message)),
        };

        if let Some(rule) = self.rules.iter().find(|r| !r.check(normalized.as_deref())) {
            debug!(path, rule = rule.name(), "Rule failed");
            return Err(state.fail(path, rule.message()));
        }

        Ok(match normalized {
            Some(text) => Some(Value::String(text)),
            None => value.cloned(),
        })
    }
}

// ============================================================================
// Object Schema
// ============================================================================

/// Object with fields visited in declaration order
///
/// Keys the schema does not declare are carried through untouched.
#[derive(Debug, Clone, Default)]
pub struct ObjectSchema {
    fields: Vec<(String, Schema)>,
    required: Option<String>,
}

impl ObjectSchema {
    /// Create an optional object with no fields
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a field
    #[must_use]
    pub fn field(mut self, name: impl Into<String>, schema: impl Into<Schema>) -> Self {
        self.fields.push((name.into(), schema.into()));
        self
    }

    /// Object must be present
    #[must_use]
    pub fn required(mut self, message: impl Into<String>) -> Self {
        self.required = Some(message.into());
        self
    }

    /// Schema of a declared field
    pub fn get(&self, name: &str) -> Option<&Schema> {
        self.fields
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, schema)| schema)
    }

    /// Field names in declaration order
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(name, _)| name.as_str())
    }

    fn missing_message(&self) -> &str {
        self.required.as_deref().unwrap_or(EMPTY_ERROR)
    }

    fn walk(&self, path: &str, value: Option<&Value>, state: &mut Walk) -> Step {
        match value {
            None | Some(Value::Null) => match &self.required {
                Some(message) => Err(state.fail(path, message)),
                None => Ok(value.cloned()),
            },
            Some(Value::Object(map)) => self.walk_fields(path, map, state),
            Some(_) => Err(state.fail(path, TYPE_ERROR)),
        }
    }

    fn walk_fields(&self, path: &str, map: &JsonObject, state: &mut Walk) -> Step {
        let mut output = map.clone();
        let mut failed = false;

        for (name, schema) in &self.fields {
            match schema.walk(&path::join(path, name), map.get(name), state) {
                Ok(Some(value)) => {
                    output.insert(name.clone(), value);
                }
                Ok(None) => {}
                Err(Halt) if state.abort_early => return Err(Halt),
                Err(Halt) => failed = true,
            }
        }

        if failed {
            Err(Halt)
        } else {
            Ok(Some(Value::Object(output)))
        }
    }
}

// ============================================================================
// Union Schema
// ============================================================================

/// Tagged union: the discriminator field picks the variant's object schema
///
/// Adding a variant never touches the rules of existing ones.
#[derive(Debug, Clone)]
pub struct UnionSchema {
    discriminator: String,
    variants: Vec<(String, ObjectSchema)>,
    required: Option<String>,
    invalid_message: String,
    tag: Box<Schema>,
}

impl UnionSchema {
    /// Create a union keyed by the given discriminator field
    pub fn new(discriminator: impl Into<String>) -> Self {
        let mut union = Self {
            discriminator: discriminator.into(),
            variants: Vec::new(),
            required: None,
            invalid_message: OPTION_ERROR.to_string(),
            tag: Box::new(Schema::String(StringSchema::new())),
        };
        union.rebuild_tag();
        union
    }

    /// Register a variant
    #[must_use]
    pub fn variant(mut self, tag: impl Into<String>, schema: ObjectSchema) -> Self {
        self.variants.push((tag.into(), schema));
        self.rebuild_tag();
        self
    }

    /// Union value must be present
    #[must_use]
    pub fn required(mut self, message: impl Into<String>) -> Self {
        self.required = Some(message.into());
        self
    }

    /// Message reported when the discriminator names no known variant
    #[must_use]
    pub fn invalid_message(mut self, message: impl Into<String>) -> Self {
        self.invalid_message = message.into();
        self.rebuild_tag();
        self
    }

    /// Name of the discriminator field
    pub fn discriminator(&self) -> &str {
        &self.discriminator
    }

    /// Schema of the discriminator field: one of the registered tags
    pub fn tag_schema(&self) -> &Schema {
        &self.tag
    }

    /// Registered variant tags, in registration order
    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.variants.iter().map(|(tag, _)| tag.as_str())
    }

    /// Schema of a registered variant
    pub fn get(&self, tag: &str) -> Option<&ObjectSchema> {
        self.variants
            .iter()
            .find(|(t, _)| t == tag)
            .map(|(_, schema)| schema)
    }

    fn missing_message(&self) -> &str {
        self.required.as_deref().unwrap_or(EMPTY_ERROR)
    }

    fn rebuild_tag(&mut self) {
        let tags: Vec<String> = self.tags().map(str::to_string).collect();
        self.tag = Box::new(
            StringSchema::new()
                .required(self.invalid_message.clone())
                .one_of(tags, self.invalid_message.clone())
                .into(),
        );
    }

    fn select(&self, here: &str, map: &JsonObject) -> Result<&ObjectSchema, ValidationFailure> {
        map.get(&self.discriminator)
            .and_then(Value::as_str)
            .and_then(|tag| self.get(tag))
            .ok_or_else(|| {
                ValidationFailure::new(path::join(here, &self.discriminator), &self.invalid_message)
            })
    }

    fn walk(&self, path: &str, value: Option<&Value>, state: &mut Walk) -> Step {
        let map = match value {
            None | Some(Value::Null) => {
                return match &self.required {
                    Some(message) => Err(state.fail(path, message)),
                    None => Ok(value.cloned()),
                };
            }
            Some(Value::Object(map)) => map,
            Some(_) => return Err(state.fail(path, TYPE_ERROR)),
        };

        match self.select(path, map) {
            Ok(variant) => variant.walk_fields(path, map, state),
            Err(failure) => {
                state.failures.push(failure);
                Err(Halt)
            }
        }
    }
}
