use crate::correlation::{EmpiricalModel, Polynomial, ViscosityCorrelation};
use crate::error::{FluidError, FluidResult};
use crate::resolver::FluidPropertyResolver;
use crate::table::PropertyTable;

const WATER_CSV: &str = include_str!("../data/water.csv");

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FluidCatalogEntry {
    pub canonical_id: &'static str,
    pub display_name: &'static str,
    pub aliases: &'static [&'static str],
}

impl FluidCatalogEntry {
    pub fn matches_query(&self, query: &str) -> bool {
        let query = query.trim().to_ascii_lowercase();
        if query.is_empty() {
            return true;
        }

        self.canonical_id.to_ascii_lowercase().contains(&query)
            || self.display_name.to_ascii_lowercase().contains(&query)
            || self
                .aliases
                .iter()
                .any(|alias| alias.to_ascii_lowercase().contains(&query))
    }

    /// Exact id or alias match, case-insensitive.
    pub fn is_id(&self, id: &str) -> bool {
        let id = id.trim();
        self.canonical_id.eq_ignore_ascii_case(id)
            || self.aliases.iter().any(|a| a.eq_ignore_ascii_case(id))
    }
}

const FLUID_CATALOG: [FluidCatalogEntry; 2] = [
    FluidCatalogEntry {
        canonical_id: "water",
        display_name: "Water",
        aliases: &["h2o"],
    },
    FluidCatalogEntry {
        canonical_id: "eg50",
        display_name: "Ethylene glycol 50%",
        aliases: &["glycol50", "meg50"],
    },
];

pub fn fluid_catalog() -> &'static [FluidCatalogEntry] {
    &FLUID_CATALOG
}

pub fn filter_fluid_catalog(query: &str) -> Vec<FluidCatalogEntry> {
    FLUID_CATALOG
        .iter()
        .copied()
        .filter(|entry| entry.matches_query(query))
        .collect()
}

fn water_correlations() -> EmpiricalModel {
    EmpiricalModel {
        density: Polynomial::new([999.84, 0.067, -0.0089, 0.000035]),
        viscosity: ViscosityCorrelation::Vogel {
            a: 0.02427,
            b: 578.919,
            c: 135.604,
        },
        heat_capacity: Some(Polynomial::new([4.18, 0.0001])),
    }
}

fn eg50_correlations() -> EmpiricalModel {
    EmpiricalModel {
        density: Polynomial::new([1085.1, -0.523, -0.0018]),
        viscosity: ViscosityCorrelation::Vogel {
            a: 0.0355,
            b: 700.9,
            c: 130.0,
        },
        heat_capacity: Some(Polynomial::new([3.3, 0.005])),
    }
}

/// Build the resolver for a catalog fluid by id or alias.
pub fn catalog_fluid(id: &str) -> FluidResult<FluidPropertyResolver> {
    let entry = FLUID_CATALOG
        .iter()
        .find(|e| e.is_id(id))
        .ok_or_else(|| FluidError::UnknownFluid { id: id.to_string() })?;

    match entry.canonical_id {
        "water" => {
            let table = PropertyTable::from_csv_str(WATER_CSV)?;
            Ok(FluidPropertyResolver::from_table(entry.display_name, table)
                .with_fallback(water_correlations()))
        }
        "eg50" => FluidPropertyResolver::from_empirical(
            entry.display_name,
            (-30.0, 120.0),
            eg50_correlations(),
        ),
        other => Err(FluidError::UnknownFluid {
            id: other.to_string(),
        }),
    }
}
