//! Temperature-indexed property tables.
//!
//! Text format is a small CSV dialect:
//! - lines starting with `#` and blank lines are ignored
//! - the first remaining line is a header naming the columns
//! - every data row has exactly as many fields as the header
//!
//! Required columns: `T_C`, `rho` [kg/m³], `mu` [mPa·s].
//! Optional columns: `cp` [J/(kg·K)], `k` [W/(m·K)], `Pr` [-].
//! Unknown columns are rejected so that typos do not silently drop data.

use crate::error::{FluidError, FluidResult};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PropertyColumn {
    Temperature,
    Density,
    Viscosity,
    HeatCapacity,
    Conductivity,
    Prandtl,
}

impl PropertyColumn {
    pub fn header(self) -> &'static str {
        match self {
            PropertyColumn::Temperature => "T_C",
            PropertyColumn::Density => "rho",
            PropertyColumn::Viscosity => "mu",
            PropertyColumn::HeatCapacity => "cp",
            PropertyColumn::Conductivity => "k",
            PropertyColumn::Prandtl => "Pr",
        }
    }

    pub fn from_header(name: &str) -> Option<Self> {
        let name = name.trim();
        [
            PropertyColumn::Temperature,
            PropertyColumn::Density,
            PropertyColumn::Viscosity,
            PropertyColumn::HeatCapacity,
            PropertyColumn::Conductivity,
            PropertyColumn::Prandtl,
        ]
        .into_iter()
        .find(|c| c.header().eq_ignore_ascii_case(name))
    }
}

/// Property table in the units of the file (viscosity in mPa·s).
#[derive(Clone, Debug, PartialEq)]
pub struct PropertyTable {
    temperature_c: Vec<f64>,
    density: Vec<f64>,
    viscosity_mpa_s: Vec<f64>,
    heat_capacity: Option<Vec<f64>>,
    conductivity: Option<Vec<f64>>,
    prandtl: Option<Vec<f64>>,
}

impl PropertyTable {
    /// Build a table from mandatory columns. Validates shape and ordering.
    pub fn new(
        temperature_c: Vec<f64>,
        density: Vec<f64>,
        viscosity_mpa_s: Vec<f64>,
    ) -> FluidResult<Self> {
        let table = Self {
            temperature_c,
            density,
            viscosity_mpa_s,
            heat_capacity: None,
            conductivity: None,
            prandtl: None,
        };
        table.validate()?;
        Ok(table)
    }

    pub fn with_column(mut self, column: PropertyColumn, values: Vec<f64>) -> FluidResult<Self> {
        match column {
            PropertyColumn::Temperature => self.temperature_c = values,
            PropertyColumn::Density => self.density = values,
            PropertyColumn::Viscosity => self.viscosity_mpa_s = values,
            PropertyColumn::HeatCapacity => self.heat_capacity = Some(values),
            PropertyColumn::Conductivity => self.conductivity = Some(values),
            PropertyColumn::Prandtl => self.prandtl = Some(values),
        }
        self.validate()?;
        Ok(self)
    }

    /// Parse the CSV dialect described in the module docs.
    pub fn from_csv_str(text: &str) -> FluidResult<Self> {
        let mut rows = text
            .lines()
            .enumerate()
            .map(|(i, l)| (i + 1, l.trim()))
            .filter(|(_, l)| !l.is_empty() && !l.starts_with('#'));

        let (header_line, header) = rows.next().ok_or_else(|| FluidError::Parse {
            line: 0,
            reason: "missing header row".into(),
        })?;

        let mut columns = Vec::new();
        for name in header.split(',') {
            let col = PropertyColumn::from_header(name).ok_or_else(|| FluidError::Parse {
                line: header_line,
                reason: format!("unknown column '{}'", name.trim()),
            })?;
            if columns.contains(&col) {
                return Err(FluidError::Parse {
                    line: header_line,
                    reason: format!("duplicate column '{}'", col.header()),
                });
            }
            columns.push(col);
        }

        let mut data: Vec<Vec<f64>> = vec![Vec::new(); columns.len()];
        for (line, row) in rows {
            let fields: Vec<&str> = row.split(',').collect();
            if fields.len() != columns.len() {
                return Err(FluidError::Parse {
                    line,
                    reason: format!(
                        "expected {} columns, found {}",
                        columns.len(),
                        fields.len()
                    ),
                });
            }
            for (j, field) in fields.iter().enumerate() {
                let value: f64 = field.trim().parse().map_err(|_| FluidError::Parse {
                    line,
                    reason: format!("invalid number '{}'", field.trim()),
                })?;
                data[j].push(value);
            }
        }

        let take = |col: PropertyColumn, data: &mut Vec<Vec<f64>>| -> Option<Vec<f64>> {
            columns
                .iter()
                .position(|c| *c == col)
                .map(|j| std::mem::take(&mut data[j]))
        };
        let missing = |col: PropertyColumn| FluidError::InvalidTable {
            reason: format!("missing required column '{}'", col.header()),
        };

        let mut required = |col: PropertyColumn| take(col, &mut data).ok_or_else(|| missing(col));
        let temperature_c = required(PropertyColumn::Temperature)?;
        let density = required(PropertyColumn::Density)?;
        let viscosity_mpa_s = required(PropertyColumn::Viscosity)?;

        let table = Self {
            temperature_c,
            density,
            viscosity_mpa_s,
            heat_capacity: take(PropertyColumn::HeatCapacity, &mut data),
            conductivity: take(PropertyColumn::Conductivity, &mut data),
            prandtl: take(PropertyColumn::Prandtl, &mut data),
        };
        table.validate()?;
        Ok(table)
    }

    fn validate(&self) -> FluidResult<()> {
        let n = self.temperature_c.len();
        if n < 2 {
            return Err(FluidError::InvalidTable {
                reason: format!("need at least 2 rows, found {n}"),
            });
        }
        if self.temperature_c.windows(2).any(|w| w[0] >= w[1]) {
            return Err(FluidError::InvalidTable {
                reason: "temperatures must be strictly increasing".into(),
            });
        }
        for col in [
            PropertyColumn::Density,
            PropertyColumn::Viscosity,
            PropertyColumn::HeatCapacity,
            PropertyColumn::Conductivity,
            PropertyColumn::Prandtl,
        ] {
            let Some(values) = self.column(col) else {
                continue;
            };
            if values.len() != n {
                return Err(FluidError::InvalidTable {
                    reason: format!(
                        "column '{}' has {} rows, expected {n}",
                        col.header(),
                        values.len()
                    ),
                });
            }
            if values.iter().any(|v| !v.is_finite() || *v <= 0.0) {
                return Err(FluidError::InvalidTable {
                    reason: format!("column '{}' must be finite and positive", col.header()),
                });
            }
        }
        Ok(())
    }

    pub fn temperatures(&self) -> &[f64] {
        &self.temperature_c
    }

    pub fn column(&self, col: PropertyColumn) -> Option<&[f64]> {
        match col {
            PropertyColumn::Temperature => Some(&self.temperature_c),
            PropertyColumn::Density => Some(&self.density),
            PropertyColumn::Viscosity => Some(&self.viscosity_mpa_s),
            PropertyColumn::HeatCapacity => self.heat_capacity.as_deref(),
            PropertyColumn::Conductivity => self.conductivity.as_deref(),
            PropertyColumn::Prandtl => self.prandtl.as_deref(),
        }
    }

    /// Temperature span covered by the table.
    pub fn range(&self) -> (f64, f64) {
        let n = self.temperature_c.len();
        (self.temperature_c[0], self.temperature_c[n - 1])
    }

    pub fn len(&self) -> usize {
        self.temperature_c.len()
    }

    pub fn is_empty(&self) -> bool {
        self.temperature_c.is_empty()
    }
}
