//! Field helpers for `#[serde(with = "...")]`.
//!
//! [`Tsid`] itself serializes transparently as its `i64`. Use
//! [`as_base32`] to store the 13-character string form instead.

use serde::{Deserializer, Serializer};

pub mod as_base32 {
    use super::{Deserializer, Serializer};
    use crate::Tsid;

    /// Serialize a TSID as a Crockford base32 encoded string.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying serializer fails.
    pub fn serialize<S>(id: &Tsid, s: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        s.serialize_str(id.encode().as_str())
    }

    /// Deserialize a TSID from a Crockford base32 encoded string.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The underlying deserializer fails
    /// - The string is not a valid TSID (wrong length, characters outside
    ///   the alphabet, or a leading character that overflows 64 bits)
    pub fn deserialize<'de, D>(d: D) -> Result<Tsid, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct Base32Visitor;

        impl serde::de::Visitor<'_> for Base32Visitor {
            type Value = Tsid;

            fn expecting(&self, formatter: &mut core::fmt::Formatter) -> core::fmt::Result {
                formatter.write_str("a 13-character Crockford base32 string")
            }

            #[inline]
            fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                Tsid::from_string(v).map_err(serde::de::Error::custom)
            }
        }

        d.deserialize_str(Base32Visitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{DecodeError, Tsid};
    use alloc::string::ToString;
    use serde::{Deserialize, Serialize};
    use serde_json::json;

    #[derive(PartialEq, Eq, Debug, Serialize, Deserialize)]
    struct NativeRow {
        event_id: Tsid,
    }

    #[derive(PartialEq, Eq, Debug, Serialize, Deserialize)]
    struct Base32Row {
        #[serde(with = "as_base32")]
        event_id: Tsid,
    }

    #[test]
    fn tsid_serializes_as_number() {
        let row = NativeRow {
            event_id: Tsid::from_number(121_706_220_661_772_722),
        };
        let json = serde_json::to_string(&row).expect("serialize");
        assert_eq!(json, r#"{"event_id":121706220661772722}"#);
        let back: NativeRow = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, row);
    }

    #[test]
    fn base32_field_roundtrip() {
        let row = Base32Row {
            event_id: Tsid::from_number(121_706_220_661_772_722),
        };
        let json = serde_json::to_string(&row).expect("serialize");
        assert_eq!(json, r#"{"event_id":"03C3356RR04DJ"}"#);
        let back: Base32Row = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, row);

        let lower: Base32Row =
            serde_json::from_value(json!({"event_id": "03c3356rr04dj"})).expect("deserialize");
        assert_eq!(lower, row);
    }

    #[test]
    fn base32_field_rejects_overflow() {
        let err = serde_json::from_value::<Base32Row>(json!({"event_id": "GZZZZZZZZZZZZ"}))
            .expect_err("should fail");
        assert_eq!(
            err.to_string(),
            DecodeError::Overflow { byte: b'G' }.to_string()
        );
    }

    #[test]
    fn base32_field_rejects_numbers() {
        assert!(serde_json::from_value::<Base32Row>(json!({"event_id": 42})).is_err());
    }
}
