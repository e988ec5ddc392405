use std::fmt;

use crate::error::ModelError;

/// Public identifier of a title as it appears in the export (the IMDb
/// `tt…` const). Carried through untouched; never parsed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ExternalId(String);

impl ExternalId {
    pub fn new(id: impl Into<String>) -> Result<Self, ModelError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(ModelError::EmptyExternalId);
        }
        Ok(ExternalId(id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for ExternalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for ExternalId {
    type Error = ModelError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        ExternalId::new(value)
    }
}

impl TryFrom<&str> for ExternalId {
    type Error = ModelError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        ExternalId::new(value)
    }
}

impl AsRef<str> for ExternalId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_blank_ids() {
        assert_eq!(ExternalId::new(""), Err(ModelError::EmptyExternalId));
        assert_eq!(ExternalId::new("   "), Err(ModelError::EmptyExternalId));
    }

    #[test]
    fn keeps_id_verbatim() {
        let id = ExternalId::new("tt0111161").unwrap();
        assert_eq!(id.as_str(), "tt0111161");
        assert_eq!(id.to_string(), "tt0111161");
    }
}
