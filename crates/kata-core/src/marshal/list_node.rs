//! Singly linked list used by the `ListNode` type tag.

use super::{describe_json, Converter, DomainValue};
use crate::errors::MarshalError;
use serde_json::Value;

pub const TAG: &str = "ListNode";

/// One node of a singly linked chain. An absent chain is `None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListNode<T = i32> {
    pub val: T,
    pub next: Option<Box<ListNode<T>>>,
}

impl<T> ListNode<T> {
    #[inline]
    pub fn new(val: T) -> Self {
        ListNode { val, next: None }
    }

    /// Builds a chain whose traversal order equals `values` order.
    pub fn from_values<I>(values: I) -> Option<Box<Self>>
    where
        I: IntoIterator<Item = T>,
    {
        let values: Vec<T> = values.into_iter().collect();
        values
            .into_iter()
            .rev()
            .fold(None, |next, val| Some(Box::new(ListNode { val, next })))
    }

    /// Consumes a chain, returning values in traversal order.
    pub fn into_values(mut head: Option<Box<Self>>) -> Vec<T> {
        let mut out = Vec::new();
        while let Some(node) = head {
            let ListNode { val, next } = *node;
            out.push(val);
            head = next;
        }
        out
    }

    /// Frees a chain node by node. The derived drop recurses once per node,
    /// which overflows the stack on long chains.
    pub fn drop_chain(mut head: Option<Box<Self>>) {
        while let Some(mut node) = head {
            head = node.next.take();
        }
    }

    pub fn try_map<U, E, F>(head: Option<Box<Self>>, f: F) -> Result<Option<Box<ListNode<U>>>, E>
    where
        F: FnMut(T) -> Result<U, E>,
    {
        let mapped = Self::into_values(head)
            .into_iter()
            .map(f)
            .collect::<Result<Vec<U>, E>>()?;
        Ok(ListNode::from_values(mapped))
    }

    pub fn iter(&self) -> Iter<'_, T> {
        Iter { next: Some(self) }
    }
}

pub struct Iter<'a, T> {
    next: Option<&'a ListNode<T>>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        self.next.map(|node| {
            self.next = node.next.as_deref();
            &node.val
        })
    }
}

pub fn converter() -> Converter {
    Converter {
        tag: TAG,
        to_domain: array_to_list,
        to_json: list_to_array,
    }
}

fn array_to_list(value: &Value) -> Result<DomainValue, MarshalError> {
    let items = value.as_array().ok_or_else(|| MarshalError::Shape {
        tag: TAG,
        expected: "an array of scalars",
        found: describe_json(value).to_string(),
    })?;
    if let Some(bad) = items.iter().find(|v| v.is_array() || v.is_object()) {
        return Err(MarshalError::Shape {
            tag: TAG,
            expected: "scalar elements",
            found: describe_json(bad).to_string(),
        });
    }
    Ok(DomainValue::List(ListNode::from_values(items.iter().cloned())))
}

fn list_to_array(value: DomainValue) -> Result<Value, MarshalError> {
    match value {
        DomainValue::List(head) => Ok(Value::Array(ListNode::into_values(head))),
        DomainValue::Json(other) => Err(MarshalError::Shape {
            tag: TAG,
            expected: "a linked chain",
            found: format!("json {}", describe_json(&other)),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    fn round_trip(value: &Value) -> Value {
        let conv = converter();
        let domain = (conv.to_domain)(value).expect("to_domain");
        (conv.to_json)(domain).expect("to_json")
    }

    #[test]
    fn empty_sequence_maps_to_absent_chain() {
        let domain = array_to_list(&json!([])).unwrap();
        assert_eq!(domain, DomainValue::List(None));
        assert_eq!(round_trip(&json!([])), json!([]));
    }

    #[test]
    fn builds_chain_in_traversal_order() {
        let DomainValue::List(Some(head)) = array_to_list(&json!([2, 4, 3])).unwrap() else {
            panic!("expected a non-empty chain");
        };
        let vals: Vec<&Value> = head.iter().collect();
        assert_eq!(vals, vec![&json!(2), &json!(4), &json!(3)]);
        assert!(head.next.as_ref().unwrap().next.as_ref().unwrap().next.is_none());
    }

    #[test]
    fn rejects_non_array_and_nested_values() {
        assert!(matches!(
            array_to_list(&json!({"a": 1})),
            Err(MarshalError::Shape { found, .. }) if found == "object"
        ));
        assert!(matches!(
            array_to_list(&json!([1, [2]])),
            Err(MarshalError::Shape { found, .. }) if found == "array"
        ));
    }

    #[test]
    fn to_json_rejects_plain_json() {
        assert!(list_to_array(DomainValue::Json(json!([1, 2]))).is_err());
    }

    #[test]
    fn try_map_preserves_order() {
        let head = ListNode::from_values(vec![1, 2, 3]);
        let mapped: Option<Box<ListNode<String>>> =
            ListNode::try_map(head, |v| Ok::<_, ()>(v.to_string())).unwrap();
        assert_eq!(ListNode::into_values(mapped), vec!["1", "2", "3"]);
    }

    #[test]
    fn drop_chain_handles_long_chains() {
        let head = ListNode::from_values(0..1_000_000);
        ListNode::drop_chain(head);
        ListNode::<i32>::drop_chain(None);
    }

    fn scalar() -> impl Strategy<Value = Value> {
        prop_oneof![
            Just(Value::Null),
            any::<bool>().prop_map(Value::Bool),
            any::<i64>().prop_map(|n| json!(n)),
            "[a-z]{0,8}".prop_map(Value::String),
        ]
    }

    proptest! {
        #[test]
        fn round_trip_is_lossless(items in prop::collection::vec(scalar(), 0..32)) {
            let seq = Value::Array(items);
            prop_assert_eq!(round_trip(&seq), seq);
        }
    }
}
