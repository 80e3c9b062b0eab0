//! Nominal pipe sizes and wall materials.

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NominalDiameter {
    pub dn: &'static str,
    /// Inner diameter [mm]
    pub inner_mm: f64,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Material {
    pub id: &'static str,
    pub name: &'static str,
    /// Absolute roughness [mm]
    pub eps_mm: f64,
}

pub const DN_LIST: &[NominalDiameter] = &[
    NominalDiameter { dn: "DN15", inner_mm: 15.8 },
    NominalDiameter { dn: "DN20", inner_mm: 21.3 },
    NominalDiameter { dn: "DN25", inner_mm: 26.9 },
    NominalDiameter { dn: "DN32", inner_mm: 35.4 },
    NominalDiameter { dn: "DN40", inner_mm: 41.9 },
    NominalDiameter { dn: "DN50", inner_mm: 53.1 },
    NominalDiameter { dn: "DN65", inner_mm: 68.9 },
    NominalDiameter { dn: "DN80", inner_mm: 82.5 },
    NominalDiameter { dn: "DN100", inner_mm: 106.1 },
    NominalDiameter { dn: "DN125", inner_mm: 131.7 },
    NominalDiameter { dn: "DN150", inner_mm: 159.3 },
    NominalDiameter { dn: "DN200", inner_mm: 206.5 },
];

pub const MATERIALS: &[Material] = &[
    Material {
        id: "steel_new",
        name: "Seamless steel (new)",
        eps_mm: 0.046,
    },
    Material {
        id: "steel_old",
        name: "Welded steel (old)",
        eps_mm: 0.26,
    },
    Material {
        id: "cast_iron",
        name: "Cast iron",
        eps_mm: 0.26,
    },
    Material {
        id: "pvc_pe",
        name: "PVC / PE",
        eps_mm: 0.003,
    },
    Material {
        id: "copper",
        name: "Copper / brass",
        eps_mm: 0.0015,
    },
];

/// Inner diameter [mm] for a DN designation such as `DN50` (case-insensitive).
pub fn nominal_diameter(dn: &str) -> Option<f64> {
    let dn = dn.trim();
    DN_LIST
        .iter()
        .find(|d| d.dn.eq_ignore_ascii_case(dn))
        .map(|d| d.inner_mm)
}

pub fn material(id: &str) -> Option<&'static Material> {
    MATERIALS.iter().find(|m| m.id == id)
}
