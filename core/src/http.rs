//! Plain-data types handed to a `Transport`.
//!
//! # Design
//! These types describe an outbound call as data: method, header map and an
//! optional body. The builder assembles them and the transport executes them;
//! nothing here touches the network.

use std::collections::BTreeMap;
use std::fmt;

use bytes::Bytes;
use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;

use crate::kind::{Kind, TypeOf};

/// Header name used to decide how the body is encoded.
pub const CONTENT_TYPE: &str = "Content-Type";

/// Header name written by the authorization mutators.
pub const AUTHORIZATION: &str = "Authorization";

/// Media type prefix that triggers JSON encoding of the body.
pub const APPLICATION_JSON: &str = "application/json";

/// Request headers. Keys are case-sensitive as supplied; inserting an
/// existing key replaces its value.
pub type Headers = BTreeMap<String, String>;

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A request payload.
///
/// Stored as supplied and only encoded when parameters are assembled: with a
/// JSON content type the payload is serialized to JSON text, otherwise it is
/// passed to the transport as-is.
#[derive(Debug, Clone, PartialEq)]
pub enum Body {
    Json(Value),
    Text(String),
    Binary(Bytes),
    Form(Vec<(String, String)>),
}

impl Body {
    /// Serialize the payload as JSON text.
    ///
    /// `Text` becomes a JSON string literal, `Binary` an array of byte values
    /// and `Form` an object of its pairs.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

impl Serialize for Body {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Body::Json(value) => value.serialize(serializer),
            Body::Text(text) => serializer.serialize_str(text),
            Body::Binary(bytes) => {
                let mut seq = serializer.serialize_seq(Some(bytes.len()))?;
                for byte in bytes.iter() {
                    seq.serialize_element(byte)?;
                }
                seq.end()
            }
            Body::Form(pairs) => {
                let mut map = serializer.serialize_map(Some(pairs.len()))?;
                for (key, value) in pairs {
                    map.serialize_entry(key, value)?;
                }
                map.end()
            }
        }
    }
}

impl TypeOf for Body {
    fn type_of(&self) -> Kind {
        match self {
            Body::Json(value) => value.type_of(),
            Body::Text(_) => Kind::String,
            Body::Binary(_) | Body::Form(_) => Kind::Object,
        }
    }
}

impl From<Value> for Body {
    fn from(value: Value) -> Self {
        Body::Json(value)
    }
}

impl From<String> for Body {
    fn from(text: String) -> Self {
        Body::Text(text)
    }
}

impl From<&str> for Body {
    fn from(text: &str) -> Self {
        Body::Text(text.to_string())
    }
}

impl From<Bytes> for Body {
    fn from(bytes: Bytes) -> Self {
        Body::Binary(bytes)
    }
}

impl From<Vec<u8>> for Body {
    fn from(bytes: Vec<u8>) -> Self {
        Body::Binary(Bytes::from(bytes))
    }
}

impl From<Vec<(String, String)>> for Body {
    fn from(pairs: Vec<(String, String)>) -> Self {
        Body::Form(pairs)
    }
}

/// Everything a transport needs besides the URL.
///
/// `body` is `None` unless a body was set and a `Content-Type` header is
/// present.
#[derive(Debug, Clone, PartialEq)]
pub struct Parameters {
    pub method: HttpMethod,
    pub headers: Headers,
    pub body: Option<Body>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn method_names_are_uppercase() {
        assert_eq!(HttpMethod::Delete.to_string(), "DELETE");
        assert_eq!(serde_json::to_string(&HttpMethod::Post).unwrap(), r#""POST""#);
    }

    #[test]
    fn json_body_serializes_compactly() {
        assert_eq!(Body::from(json!({"a": 1})).to_json().unwrap(), r#"{"a":1}"#);
    }

    #[test]
    fn text_body_becomes_json_string() {
        assert_eq!(Body::from("hi").to_json().unwrap(), r#""hi""#);
    }

    #[test]
    fn form_body_serializes_as_object() {
        let body = Body::from(vec![("q".to_string(), "rust".to_string())]);
        assert_eq!(body.to_json().unwrap(), r#"{"q":"rust"}"#);
    }

    #[test]
    fn binary_body_serializes_as_byte_array() {
        assert_eq!(Body::from(vec![1u8, 255]).to_json().unwrap(), "[1,255]");
    }

    #[test]
    fn body_kinds() {
        assert_eq!(Body::Json(Value::Null).type_of(), Kind::Null);
        assert_eq!(Body::from(json!([])).type_of(), Kind::Array);
        assert_eq!(Body::from("").type_of(), Kind::String);
        assert_eq!(Body::from(Bytes::new()).type_of(), Kind::Object);
    }
}
