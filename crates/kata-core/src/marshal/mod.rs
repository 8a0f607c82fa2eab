//! Conversion between descriptor JSON and the domain values solutions consume.
//!
//! A type tag (`paramTypes[i]`, `returnType`) selects a registered [`Converter`].
//! No tag means pass-through: both directions are the identity on JSON values.

pub mod list_node;
pub mod typed;

use crate::errors::{HarnessError, MarshalError};
use list_node::ListNode;
use serde_json::Value;
use std::collections::BTreeMap;

pub use typed::{FromDomain, IntoDomain};

/// A marshalled value: plain JSON, or a structure built by a converter.
#[derive(Debug, Clone, PartialEq)]
pub enum DomainValue {
    Json(Value),
    List(Option<Box<ListNode<Value>>>),
}

impl DomainValue {
    pub fn describe(&self) -> &'static str {
        match self {
            DomainValue::Json(v) => describe_json(v),
            DomainValue::List(_) => list_node::TAG,
        }
    }

    /// Drops the value without recursing through a chain.
    pub fn release(self) {
        if let DomainValue::List(head) = self {
            ListNode::drop_chain(head);
        }
    }
}

/// Releases every value, see [`DomainValue::release`].
pub fn release_all(values: impl IntoIterator<Item = DomainValue>) {
    values.into_iter().for_each(DomainValue::release);
}

pub(crate) fn describe_json(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

pub type ToDomainFn = fn(&Value) -> Result<DomainValue, MarshalError>;
pub type ToJsonFn = fn(DomainValue) -> Result<Value, MarshalError>;

/// Bidirectional converter registered under a type tag.
#[derive(Clone, Copy)]
pub struct Converter {
    pub tag: &'static str,
    pub to_domain: ToDomainFn,
    pub to_json: ToJsonFn,
}

impl std::fmt::Debug for Converter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Converter").field("tag", &self.tag).finish()
    }
}

/// A resolved marshalling strategy for one parameter or return slot.
#[derive(Debug, Clone, Copy)]
pub enum Codec {
    PassThrough,
    Tagged(Converter),
}

impl Codec {
    pub fn to_domain(&self, value: &Value) -> Result<DomainValue, MarshalError> {
        match self {
            Codec::PassThrough => Ok(DomainValue::Json(value.clone())),
            Codec::Tagged(conv) => (conv.to_domain)(value),
        }
    }

    pub fn to_json(&self, value: DomainValue) -> Result<Value, MarshalError> {
        match (self, value) {
            (Codec::PassThrough, DomainValue::Json(v)) => Ok(v),
            (Codec::PassThrough, other) => {
                let found = other.describe();
                other.release();
                Err(MarshalError::UntaggedDomainValue(found))
            }
            (Codec::Tagged(conv), v) => (conv.to_json)(v),
        }
    }
}

/// Registry of converters keyed by type tag.
#[derive(Debug, Clone)]
pub struct Marshaller {
    converters: BTreeMap<String, Converter>,
}

impl Default for Marshaller {
    fn default() -> Self {
        let mut m = Self::empty();
        m.register(list_node::converter());
        m
    }
}

impl Marshaller {
    pub fn empty() -> Self {
        Self {
            converters: BTreeMap::new(),
        }
    }

    pub fn register(&mut self, converter: Converter) {
        self.converters.insert(converter.tag.to_string(), converter);
    }

    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.converters.keys().map(String::as_str)
    }

    /// Resolves a tag to its codec. Absent and empty tags are pass-through.
    pub fn resolve(&self, tag: Option<&str>) -> Result<Codec, HarnessError> {
        match tag.filter(|t| !t.is_empty()) {
            None => Ok(Codec::PassThrough),
            Some(t) => self
                .converters
                .get(t)
                .copied()
                .map(Codec::Tagged)
                .ok_or_else(|| HarnessError::unknown_type_tag(t)),
        }
    }

    pub fn to_domain(&self, value: &Value, tag: Option<&str>) -> anyhow::Result<DomainValue> {
        Ok(self.resolve(tag)?.to_domain(value)?)
    }

    pub fn to_json(&self, value: DomainValue, tag: Option<&str>) -> anyhow::Result<Value> {
        Ok(self.resolve(tag)?.to_json(value)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn absent_tag_is_identity() {
        let m = Marshaller::default();
        for v in [json!(null), json!(3), json!("s"), json!([1, [2]]), json!({"k": [1]})] {
            let d = m.to_domain(&v, None).unwrap();
            assert_eq!(d, DomainValue::Json(v.clone()));
            assert_eq!(m.to_json(d, None).unwrap(), v);
        }
    }

    #[test]
    fn empty_tag_is_pass_through() {
        let m = Marshaller::default();
        assert!(matches!(m.resolve(Some("")), Ok(Codec::PassThrough)));
    }

    #[test]
    fn unknown_tag_fails_at_lookup() {
        let m = Marshaller::default();
        let err = m.resolve(Some("TreeNode")).unwrap_err();
        assert!(matches!(err, HarnessError::UnknownTypeTag { ref tag } if tag == "TreeNode"));

        let err = m.to_domain(&json!([1]), Some("TreeNode")).unwrap_err();
        assert!(err.downcast_ref::<HarnessError>().is_some());
    }

    #[test]
    fn list_node_tag_round_trips() {
        let m = Marshaller::default();
        let seq = json!([7, 0, 8]);
        let domain = m.to_domain(&seq, Some("ListNode")).unwrap();
        assert!(matches!(domain, DomainValue::List(Some(_))));
        assert_eq!(m.to_json(domain, Some("ListNode")).unwrap(), seq);
    }

    #[test]
    fn untagged_domain_result_is_rejected() {
        let err = Codec::PassThrough
            .to_json(DomainValue::List(ListNode::from_values(vec![json!(1)])))
            .unwrap_err();
        assert_eq!(err, MarshalError::UntaggedDomainValue("ListNode"));
    }

    #[test]
    fn default_registers_list_node_only() {
        let m = Marshaller::default();
        assert_eq!(m.tags().collect::<Vec<_>>(), vec!["ListNode"]);
        assert_eq!(Marshaller::empty().tags().count(), 0);
    }
}
