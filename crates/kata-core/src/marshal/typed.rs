//! Bridges between [`DomainValue`] and the Rust types solutions are written in.

use super::list_node::{ListNode, TAG};
use super::{describe_json, DomainValue};
use crate::errors::MarshalError;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

pub trait FromDomain: Sized {
    fn from_domain(value: DomainValue) -> Result<Self, MarshalError>;

    /// Drops a converted argument that will not reach the solution.
    fn discard(self) {
        drop(self);
    }
}

pub trait IntoDomain {
    fn into_domain(self) -> Result<DomainValue, MarshalError>;
}

fn decode<T: DeserializeOwned>(target: &'static str, value: Value) -> Result<T, MarshalError> {
    let found = describe_json(&value);
    serde_json::from_value(value).map_err(|e| MarshalError::Decode {
        target,
        found: found.to_string(),
        detail: e.to_string(),
    })
}

fn encode<T: Serialize>(value: T) -> Result<Value, MarshalError> {
    serde_json::to_value(value).map_err(|e| MarshalError::Encode(e.to_string()))
}

fn expect_json(target: &'static str, value: DomainValue) -> Result<Value, MarshalError> {
    match value {
        DomainValue::Json(v) => Ok(v),
        DomainValue::List(head) => {
            ListNode::drop_chain(head);
            Err(MarshalError::Decode {
                target,
                found: TAG.to_string(),
                detail: "parameter is not declared as a linked list".into(),
            })
        }
    }
}

macro_rules! json_domain {
    ($($ty:ty),* $(,)?) => {
        $(
            impl FromDomain for $ty {
                fn from_domain(value: DomainValue) -> Result<Self, MarshalError> {
                    decode(stringify!($ty), expect_json(stringify!($ty), value)?)
                }
            }

            impl IntoDomain for $ty {
                fn into_domain(self) -> Result<DomainValue, MarshalError> {
                    encode(self).map(DomainValue::Json)
                }
            }
        )*
    };
}

json_domain!(i32, i64, u32, u64, usize, f64, bool, char, String, Value);

impl<T: DeserializeOwned> FromDomain for Vec<T> {
    fn from_domain(value: DomainValue) -> Result<Self, MarshalError> {
        decode("array", expect_json("array", value)?)
    }
}

impl<T: Serialize> IntoDomain for Vec<T> {
    fn into_domain(self) -> Result<DomainValue, MarshalError> {
        encode(self).map(DomainValue::Json)
    }
}

impl<T: DeserializeOwned> FromDomain for Option<Box<ListNode<T>>> {
    fn from_domain(value: DomainValue) -> Result<Self, MarshalError> {
        match value {
            DomainValue::List(head) => ListNode::try_map(head, |v| decode(TAG, v)),
            DomainValue::Json(other) => Err(MarshalError::Shape {
                tag: TAG,
                expected: "a linked chain (declare the parameter type as ListNode)",
                found: format!("json {}", describe_json(&other)),
            }),
        }
    }

    fn discard(self) {
        ListNode::drop_chain(self);
    }
}

impl<T: Serialize> IntoDomain for Option<Box<ListNode<T>>> {
    fn into_domain(self) -> Result<DomainValue, MarshalError> {
        ListNode::try_map(self, |v| encode(v)).map(DomainValue::List)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decodes_scalars_and_vectors() {
        assert_eq!(i32::from_domain(DomainValue::Json(json!(9))).unwrap(), 9);
        assert_eq!(
            Vec::<i32>::from_domain(DomainValue::Json(json!([2, 7, 11]))).unwrap(),
            vec![2, 7, 11]
        );
        assert_eq!(
            String::from_domain(DomainValue::Json(json!("abc"))).unwrap(),
            "abc"
        );
    }

    #[test]
    fn decode_failure_reports_target_and_found() {
        let err = i32::from_domain(DomainValue::Json(json!("nine"))).unwrap_err();
        match err {
            MarshalError::Decode { target, found, .. } => {
                assert_eq!(target, "i32");
                assert_eq!(found, "string");
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn list_parameter_requires_tagged_input() {
        let err = Option::<Box<ListNode>>::from_domain(DomainValue::Json(json!([1, 2]))).unwrap_err();
        assert!(matches!(err, MarshalError::Shape { .. }));

        let err = Vec::<i32>::from_domain(DomainValue::List(None)).unwrap_err();
        assert!(matches!(err, MarshalError::Decode { .. }));
    }

    #[test]
    fn typed_list_round_trips_through_domain() {
        let head: Option<Box<ListNode>> = ListNode::from_values(vec![7, 0, 8]);
        let domain = head.into_domain().unwrap();
        let back = Option::<Box<ListNode>>::from_domain(domain).unwrap();
        assert_eq!(ListNode::into_values(back), vec![7, 0, 8]);
    }

    #[test]
    fn floats_encode_as_numbers() {
        let DomainValue::Json(v) = 2.5f64.into_domain().unwrap() else {
            panic!("expected json");
        };
        assert_eq!(v, json!(2.5));
    }
}
