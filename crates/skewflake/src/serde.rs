use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::SkewflakeId;

/// Serializes as the native integer.
impl Serialize for SkewflakeId {
    fn serialize<S>(&self, s: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.to_raw().serialize(s)
    }
}

/// Deserializes from the native integer, rejecting values with the reserved
/// bit set.
impl<'de> Deserialize<'de> for SkewflakeId {
    fn deserialize<D>(d: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let id = Self::from_raw(u64::deserialize(d)?);
        if !id.is_valid() {
            return Err(serde::de::Error::custom(format_args!(
                "id {id} sets the reserved bit"
            )));
        }
        Ok(id)
    }
}
