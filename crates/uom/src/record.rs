use serde::{Deserialize, Serialize};

use unitforge_core::{TenantId, UomId};

/// Visibility scope of a conversion record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConversionScope {
    /// Seeded default, visible to every tenant.
    Global,
    /// Overrides the global record for the same ordered pair, for one tenant.
    Tenant(TenantId),
}

impl ConversionScope {
    pub fn is_tenant(&self) -> bool {
        matches!(self, ConversionScope::Tenant(_))
    }

    /// Whether a record with this scope is visible in `tenant`'s context.
    pub fn applies_to(&self, tenant: TenantId) -> bool {
        match self {
            ConversionScope::Global => true,
            ConversionScope::Tenant(t) => *t == tenant,
        }
    }
}

/// Directed factor definition: `1 from_unit = factor to_unit`.
///
/// Authored by tenant admins (tenant-scoped) or seeded as defaults (global);
/// read-only input to the engine. Rows with an absent unit reference decode
/// to the nil id and are dropped during graph construction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConversionRecord {
    #[serde(default = "UomId::nil")]
    pub from_unit: UomId,
    #[serde(default = "UomId::nil")]
    pub to_unit: UomId,
    pub factor: f64,
    pub scope: ConversionScope,
}

impl ConversionRecord {
    pub fn global(from_unit: UomId, to_unit: UomId, factor: f64) -> Self {
        Self {
            from_unit,
            to_unit,
            factor,
            scope: ConversionScope::Global,
        }
    }

    pub fn tenant_scoped(tenant: TenantId, from_unit: UomId, to_unit: UomId, factor: f64) -> Self {
        Self {
            from_unit,
            to_unit,
            factor,
            scope: ConversionScope::Tenant(tenant),
        }
    }

    /// Why this record must be excluded from the graph, if it must be.
    ///
    /// Self-conversions are handled implicitly by the resolver and never
    /// stored as edges. The reciprocal must be finite too: every record also
    /// contributes a synthetic `1/f` reverse edge, and a subnormal factor
    /// would overflow it to infinity.
    pub fn malformed_reason(&self) -> Option<&'static str> {
        if self.from_unit.is_nil() || self.to_unit.is_nil() {
            Some("missing unit id")
        } else if !self.factor.is_finite() {
            Some("non-finite factor")
        } else if self.factor <= 0.0 {
            Some("factor must be positive")
        } else if !(1.0 / self.factor).is_finite() {
            Some("non-finite reverse factor")
        } else if self.from_unit == self.to_unit {
            Some("self-conversion")
        } else {
            None
        }
    }

    pub fn is_well_formed(&self) -> bool {
        self.malformed_reason().is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn well_formed_record_has_no_reason() {
        let record = ConversionRecord::global(UomId::new(), UomId::new(), 12.0);
        assert!(record.is_well_formed());
        assert_eq!(record.malformed_reason(), None);
    }

    #[test]
    fn zero_and_negative_factors_are_malformed() {
        let zero = ConversionRecord::global(UomId::new(), UomId::new(), 0.0);
        let negative = ConversionRecord::global(UomId::new(), UomId::new(), -2.0);
        assert_eq!(zero.malformed_reason(), Some("factor must be positive"));
        assert_eq!(negative.malformed_reason(), Some("factor must be positive"));
    }

    #[test]
    fn non_finite_factors_are_malformed() {
        let nan = ConversionRecord::global(UomId::new(), UomId::new(), f64::NAN);
        let inf = ConversionRecord::global(UomId::new(), UomId::new(), f64::INFINITY);
        assert_eq!(nan.malformed_reason(), Some("non-finite factor"));
        assert_eq!(inf.malformed_reason(), Some("non-finite factor"));
    }

    #[test]
    fn subnormal_factor_with_infinite_reciprocal_is_malformed() {
        let record = ConversionRecord::global(UomId::new(), UomId::new(), 1e-320);
        assert_eq!(record.malformed_reason(), Some("non-finite reverse factor"));
    }

    #[test]
    fn nil_endpoint_is_malformed() {
        let record = ConversionRecord::global(UomId::nil(), UomId::new(), 2.0);
        assert_eq!(record.malformed_reason(), Some("missing unit id"));
    }

    #[test]
    fn self_conversion_is_malformed() {
        let unit = UomId::new();
        let record = ConversionRecord::global(unit, unit, 1.0);
        assert_eq!(record.malformed_reason(), Some("self-conversion"));
    }

    #[test]
    fn global_scope_applies_to_every_tenant() {
        let tenant = TenantId::new();
        assert!(ConversionScope::Global.applies_to(tenant));
        assert!(ConversionScope::Tenant(tenant).applies_to(tenant));
        assert!(!ConversionScope::Tenant(TenantId::new()).applies_to(tenant));
    }

    #[test]
    fn record_with_missing_reference_decodes_to_nil() {
        let record: ConversionRecord =
            serde_json::from_str(r#"{"factor":2.0,"scope":"global"}"#).unwrap();
        assert!(record.from_unit.is_nil());
        assert!(record.to_unit.is_nil());
        assert!(!record.is_well_formed());
    }
}
