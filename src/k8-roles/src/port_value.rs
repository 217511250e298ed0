use std::fmt;

use serde::de::Error as DeError;
use serde::de::Visitor;
use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;
use serde::Serializer;

/// A port declaration: a single port (`8080`) or an inclusive range
/// (`"8080-8085"`).
///
/// Manifests may write single ports as bare integers; the value is kept in
/// string form either way and parsed when workloads are built.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PortValue(String);

impl PortValue {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether this was declared as a `lo-hi` range rather than a single
    /// port.
    pub fn is_range(&self) -> bool {
        self.0.contains('-')
    }
}

impl From<&str> for PortValue {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

impl From<u16> for PortValue {
    fn from(value: u16) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Display for PortValue {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Serialize for PortValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for PortValue {
    fn deserialize<D>(deserializer: D) -> Result<PortValue, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct PortValueVisitor;

        impl<'de> Visitor<'de> for PortValueVisitor {
            type Value = PortValue;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("port number or range string")
            }

            fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
            where
                E: DeError,
            {
                Ok(PortValue(value.to_string()))
            }

            fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
            where
                E: DeError,
            {
                if value < 0 {
                    return Err(E::custom(format!("negative port: {}", value)));
                }
                Ok(PortValue(value.to_string()))
            }

            fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
            where
                E: DeError,
            {
                Ok(PortValue(value.to_owned()))
            }
        }

        deserializer.deserialize_any(PortValueVisitor)
    }
}
