//! Conversions between [`Osd`] and `serde_json::Value`.

use serde_json::{Map, Number, Value};

use crate::{Osd, OsdArray, OsdMap};

impl From<&Osd> for Value {
    fn from(v: &Osd) -> Self {
        match v {
            Osd::Undefined => Value::Null,
            Osd::Boolean(b) => Value::Bool(*b),
            Osd::Integer(i) => Value::Number(Number::from(*i)),
            Osd::Real(r) => Number::from_f64(*r).map_or(Value::Null, Value::Number),
            Osd::String(_) | Osd::Uuid(_) | Osd::Date(_) | Osd::Uri(_) | Osd::LlsdXml(_) => {
                Value::String(v.as_string())
            }
            Osd::Binary(bytes) => {
                Value::Array(bytes.iter().map(|b| Value::Number(Number::from(*b))).collect())
            }
            Osd::Array(array) => Value::Array(array.borrow().iter().map(Value::from).collect()),
            Osd::Map(map) => Value::Object(
                map.borrow()
                    .iter()
                    .map(|(k, v)| (k.clone(), Value::from(v)))
                    .collect::<Map<String, Value>>(),
            ),
        }
    }
}

impl From<Value> for Osd {
    fn from(v: Value) -> Self {
        match v {
            Value::Null => Osd::Undefined,
            Value::Bool(b) => Osd::Boolean(b),
            Value::Number(n) => match n.as_i64() {
                Some(i) => Osd::Integer(i),
                None => Osd::Real(n.as_f64().unwrap_or_default()),
            },
            Value::String(s) => Osd::String(s),
            Value::Array(items) => Osd::Array(items.into_iter().map(Osd::from).collect::<OsdArray>()),
            Value::Object(obj) => Osd::Map(
                obj.into_iter()
                    .map(|(k, v)| (k, Osd::from(v)))
                    .collect::<OsdMap>(),
            ),
        }
    }
}
