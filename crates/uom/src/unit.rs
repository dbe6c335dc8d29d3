use serde::{Deserialize, Serialize};

use unitforge_core::{DomainError, DomainResult, Entity, UomId, ValueObject};

/// Short display code of a unit, normalized for case-insensitive matching.
///
/// Codes are unique within a tenant's visible set under case-insensitive
/// comparison, so normalization happens once at construction (trim +
/// uppercase) and every later comparison is plain equality. External string
/// references go through [`crate::ConversionGraph::resolve_code`] rather than
/// scattering case-insensitive comparisons through the resolver.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UnitCode(String);

impl UnitCode {
    pub fn new(code: impl AsRef<str>) -> DomainResult<Self> {
        let normalized = code.as_ref().trim().to_uppercase();
        if normalized.is_empty() {
            return Err(DomainError::validation("unit code cannot be blank"));
        }
        Ok(Self(normalized))
    }

    /// The normalized form (trimmed, uppercased).
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl ValueObject for UnitCode {}

impl core::fmt::Display for UnitCode {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for UnitCode {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<UnitCode> for String {
    fn from(code: UnitCode) -> Self {
        code.0
    }
}

/// Physical family of a unit.
///
/// UI grouping only; the engine never enforces dimensional correctness
/// (mass↔volume converts fine if an explicit factor exists).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum UnitFamily {
    Mass,
    Volume,
    Length,
    Area,
    Time,
    Count,
    #[default]
    Other,
}

/// Reference entity: a unit of measure.
///
/// Authored by administrators; immutable from the engine's perspective.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitOfMeasure {
    pub id: UomId,
    pub code: UnitCode,
    pub name: String,
    #[serde(default)]
    pub family: UnitFamily,
}

impl UnitOfMeasure {
    pub fn new(
        id: UomId,
        code: UnitCode,
        name: impl Into<String>,
        family: UnitFamily,
    ) -> DomainResult<Self> {
        if id.is_nil() {
            return Err(DomainError::invalid_id("unit id cannot be nil"));
        }
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DomainError::validation("unit name cannot be empty"));
        }
        Ok(Self {
            id,
            code,
            name,
            family,
        })
    }
}

impl Entity for UnitOfMeasure {
    type Id = UomId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_code_normalizes_case_and_whitespace() {
        let code = UnitCode::new("  kg ").unwrap();
        assert_eq!(code.as_str(), "KG");
        assert_eq!(code, UnitCode::new("Kg").unwrap());
    }

    #[test]
    fn blank_unit_code_is_rejected() {
        let err = UnitCode::new("   ").unwrap_err();
        match err {
            DomainError::Validation(_) => {}
            _ => panic!("Expected Validation error for blank code"),
        }
    }

    #[test]
    fn unit_of_measure_rejects_empty_name() {
        let err = UnitOfMeasure::new(
            UomId::new(),
            UnitCode::new("KG").unwrap(),
            "  ",
            UnitFamily::Mass,
        )
        .unwrap_err();
        match err {
            DomainError::Validation(_) => {}
            _ => panic!("Expected Validation error for empty name"),
        }
    }

    #[test]
    fn unit_of_measure_rejects_nil_id() {
        let err = UnitOfMeasure::new(
            UomId::nil(),
            UnitCode::new("KG").unwrap(),
            "Kilogram",
            UnitFamily::Mass,
        )
        .unwrap_err();
        match err {
            DomainError::InvalidId(_) => {}
            _ => panic!("Expected InvalidId error for nil id"),
        }
    }

    #[test]
    fn unit_code_deserializes_through_normalization() {
        let code: UnitCode = serde_json::from_str("\" box \"").unwrap();
        assert_eq!(code.as_str(), "BOX");
    }
}
