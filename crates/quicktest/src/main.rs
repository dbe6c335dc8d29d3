//! Ad-hoc conversion quick test.
//!
//! Command-line stand-in for the settings screen's quick-test flow: load a
//! JSON snapshot of units and conversion records, build the graph visible to
//! an optional tenant, convert a quantity between two unit codes, and print
//! either the result or the "no conversion available" message.
//!
//! ```text
//! unitforge-quicktest <snapshot.json> <FROM> <TO> <QTY> [TENANT_UUID]
//! ```

use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{Context, Result, bail};
use serde::Deserialize;

use unitforge_core::TenantId;
use unitforge_uom::{ConversionGraph, ConversionRecord, UnitOfMeasure};

/// Snapshot of the remote store's UoM data, as loaded by the caller.
#[derive(Debug, Deserialize)]
struct Snapshot {
    units: Vec<UnitOfMeasure>,
    #[serde(default)]
    records: Vec<ConversionRecord>,
}

#[derive(Debug)]
struct Args {
    snapshot: PathBuf,
    from: String,
    to: String,
    qty: f64,
    tenant: Option<TenantId>,
}

impl Args {
    fn parse(mut args: impl Iterator<Item = String>) -> Result<Self> {
        const USAGE: &str = "usage: unitforge-quicktest <snapshot.json> <FROM> <TO> <QTY> [TENANT_UUID]";

        let mut next = |name: &str| {
            args.next()
                .with_context(|| format!("missing argument <{name}>\n{USAGE}"))
        };

        let snapshot = PathBuf::from(next("snapshot.json")?);
        let from = next("FROM")?;
        let to = next("TO")?;
        let qty = next("QTY")?;
        let qty: f64 = qty
            .parse()
            .with_context(|| format!("quantity is not a number: {qty}"))?;
        let tenant = match args.next() {
            Some(raw) => Some(TenantId::from_str(&raw).context("invalid tenant id")?),
            None => None,
        };
        if args.next().is_some() {
            bail!("too many arguments\n{USAGE}");
        }

        Ok(Self {
            snapshot,
            from,
            to,
            qty,
            tenant,
        })
    }
}

fn main() -> Result<()> {
    unitforge_observability::init();

    let args = Args::parse(std::env::args().skip(1))?;

    let raw = std::fs::read_to_string(&args.snapshot)
        .with_context(|| format!("cannot read snapshot {}", args.snapshot.display()))?;
    let snapshot: Snapshot =
        serde_json::from_str(&raw).context("snapshot is not valid unit/record JSON")?;

    // Tenant visibility: global records plus the tenant's own overrides. With
    // no tenant given, only the seeded defaults apply.
    let records: Vec<ConversionRecord> = snapshot
        .records
        .iter()
        .copied()
        .filter(|r| match args.tenant {
            Some(tenant) => r.scope.applies_to(tenant),
            None => !r.scope.is_tenant(),
        })
        .collect();

    let graph = ConversionGraph::build(&snapshot.units, &records);
    tracing::debug!(
        units = graph.unit_count(),
        dropped = graph.dropped_records(),
        "conversion graph built"
    );

    let from = graph
        .resolve_code(&args.from)
        .with_context(|| format!("unknown unit code: {}", args.from))?;
    let to = graph
        .resolve_code(&args.to)
        .with_context(|| format!("unknown unit code: {}", args.to))?;

    match graph.convert(args.qty, from, to) {
        Ok(result) => {
            println!("{} {} = {} {}", args.qty, args.from, result, args.to);
        }
        Err(err) => {
            tracing::debug!(%err, "conversion failed");
            println!(
                "no conversion available between {} and {}; add a conversion factor",
                args.from, args.to
            );
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Args> {
        Args::parse(args.iter().map(|s| s.to_string()))
    }

    #[test]
    fn parses_positional_arguments() {
        let args = parse(&["snapshot.json", "box", "each", "2.5"]).unwrap();
        assert_eq!(args.snapshot, PathBuf::from("snapshot.json"));
        assert_eq!(args.from, "box");
        assert_eq!(args.to, "each");
        assert_eq!(args.qty, 2.5);
        assert!(args.tenant.is_none());
    }

    #[test]
    fn parses_optional_tenant() {
        let tenant = TenantId::new();
        let args = parse(&["s.json", "a", "b", "1", &tenant.to_string()]).unwrap();
        assert_eq!(args.tenant, Some(tenant));
    }

    #[test]
    fn rejects_non_numeric_quantity() {
        assert!(parse(&["s.json", "a", "b", "lots"]).is_err());
    }

    #[test]
    fn rejects_missing_and_extra_arguments() {
        assert!(parse(&["s.json", "a"]).is_err());
        let tenant = TenantId::new().to_string();
        assert!(parse(&["s.json", "a", "b", "1", &tenant, "extra"]).is_err());
    }
}
