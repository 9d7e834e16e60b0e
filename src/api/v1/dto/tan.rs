/*
 * Responsibility
 * - VerificationRequest DTO for POST /tan/verify
 * - Decoding rules:
 *   - the "Tan" key matches case-insensitively (tan / TAN / Tan), last one wins
 *   - unknown keys are ignored, a missing key leaves tan empty
 *   - null leaves tan untouched, a null body is an empty request
 *   - only the first JSON value is read, trailing bytes are ignored
 */
use std::fmt;

use serde::de::{self, Deserialize, Deserializer, IgnoredAny, MapAccess, Visitor};

const TAN_KEY: &str = "tan";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VerificationRequest {
    pub tan: String,
}

impl VerificationRequest {
    pub fn decode(body: &[u8]) -> Result<Self, serde_json::Error> {
        let mut values =
            serde_json::Deserializer::from_slice(body).into_iter::<Option<VerificationRequest>>();

        match values.next() {
            Some(value) => Ok(value?.unwrap_or_default()),
            None => Err(de::Error::custom("unexpected end of request body")),
        }
    }
}

impl<'de> Deserialize<'de> for VerificationRequest {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct RequestVisitor;

        impl<'de> Visitor<'de> for RequestVisitor {
            type Value = VerificationRequest;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a JSON object with a \"Tan\" string field")
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut req = VerificationRequest::default();

                while let Some(key) = map.next_key::<String>()? {
                    if key.eq_ignore_ascii_case(TAN_KEY) {
                        if let Some(tan) = map.next_value::<Option<String>>()? {
                            req.tan = tan;
                        }
                    } else {
                        map.next_value::<IgnoredAny>()?;
                    }
                }

                Ok(req)
            }
        }

        deserializer.deserialize_map(RequestVisitor)
    }
}
