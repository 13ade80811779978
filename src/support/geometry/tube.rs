use std::{fmt, str::FromStr};

use uom::si::{f64::Length, length::inch};

use super::GeometryError;

/// Tube inner diameter never drops below this fraction of the outer diameter.
pub const MIN_INNER_DIAMETER_RATIO: f64 = 0.8;

/// Nominal tube outer diameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TubeSize {
    Quarter,
    FiveSixteenths,
    ThreeEighths,
    Half,
    FiveEighths,
    ThreeQuarters,
    SevenEighths,
    One,
}

impl TubeSize {
    pub const ALL: [TubeSize; 8] = [
        TubeSize::Quarter,
        TubeSize::FiveSixteenths,
        TubeSize::ThreeEighths,
        TubeSize::Half,
        TubeSize::FiveEighths,
        TubeSize::ThreeQuarters,
        TubeSize::SevenEighths,
        TubeSize::One,
    ];

    /// Nominal designation, for example `3/8"`.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            TubeSize::Quarter => "1/4\"",
            TubeSize::FiveSixteenths => "5/16\"",
            TubeSize::ThreeEighths => "3/8\"",
            TubeSize::Half => "1/2\"",
            TubeSize::FiveEighths => "5/8\"",
            TubeSize::ThreeQuarters => "3/4\"",
            TubeSize::SevenEighths => "7/8\"",
            TubeSize::One => "1\"",
        }
    }

    #[must_use]
    pub fn outer_diameter(self) -> Length {
        let inches = match self {
            TubeSize::Quarter => 0.25,
            TubeSize::FiveSixteenths => 0.3125,
            TubeSize::ThreeEighths => 0.375,
            TubeSize::Half => 0.5,
            TubeSize::FiveEighths => 0.625,
            TubeSize::ThreeQuarters => 0.75,
            TubeSize::SevenEighths => 0.875,
            TubeSize::One => 1.0,
        };
        Length::new::<inch>(inches)
    }

    /// Inner diameter for a wall thickness, clamped to at least
    /// [`MIN_INNER_DIAMETER_RATIO`] of the outer diameter.
    #[must_use]
    pub fn inner_diameter(self, wall_thickness: Length) -> Length {
        let outer = self.outer_diameter();
        let inner = outer - wall_thickness * 2.0;
        let floor = outer * MIN_INNER_DIAMETER_RATIO;
        if inner > floor { inner } else { floor }
    }
}

impl fmt::Display for TubeSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TubeSize {
    type Err = GeometryError;

    /// Accepts the nominal designation with or without the inch mark.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let query = s.trim().trim_end_matches(['"', '\'']).trim();
        TubeSize::ALL
            .into_iter()
            .find(|size| size.name().trim_end_matches('"') == query)
            .ok_or_else(|| GeometryError::UnknownTubeSize { name: s.to_owned() })
    }
}

/// Tube wall materials.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TubeMaterial {
    Copper,
    CopperNickel9010,
    CopperNickel7030,
    CarbonSteel,
    Stainless304,
    Stainless316,
    Titanium,
}

struct MaterialEntry {
    material: TubeMaterial,
    display_name: &'static str,
    aliases: &'static [&'static str],
    /// W/m·K
    conductivity: f64,
    /// kg/m³
    density: f64,
    /// Relative cost per kilogram.
    cost_per_kg: f64,
    /// Absolute roughness, m.
    roughness: f64,
}

static MATERIALS: [MaterialEntry; 7] = [
    MaterialEntry {
        material: TubeMaterial::Copper,
        display_name: "Copper",
        aliases: &["cu"],
        conductivity: 385.0,
        density: 8933.0,
        cost_per_kg: 9.0,
        roughness: 1.5e-6,
    },
    MaterialEntry {
        material: TubeMaterial::CopperNickel9010,
        display_name: "Cu-Ni 90/10",
        aliases: &["cuni 90/10", "cupronickel 90/10"],
        conductivity: 50.0,
        density: 8900.0,
        cost_per_kg: 12.0,
        roughness: 1.5e-6,
    },
    MaterialEntry {
        material: TubeMaterial::CopperNickel7030,
        display_name: "Cu-Ni 70/30",
        aliases: &["cuni 70/30", "cupronickel 70/30"],
        conductivity: 29.0,
        density: 8950.0,
        cost_per_kg: 15.0,
        roughness: 1.5e-6,
    },
    MaterialEntry {
        material: TubeMaterial::CarbonSteel,
        display_name: "Carbon Steel",
        aliases: &["steel", "cs"],
        conductivity: 45.0,
        density: 7850.0,
        cost_per_kg: 1.5,
        roughness: 4.5e-5,
    },
    MaterialEntry {
        material: TubeMaterial::Stainless304,
        display_name: "Stainless Steel 304",
        aliases: &["ss304", "stainless 304"],
        conductivity: 16.2,
        density: 8000.0,
        cost_per_kg: 5.0,
        roughness: 1.5e-5,
    },
    MaterialEntry {
        material: TubeMaterial::Stainless316,
        display_name: "Stainless Steel 316",
        aliases: &["ss316", "stainless 316"],
        conductivity: 16.3,
        density: 8000.0,
        cost_per_kg: 6.5,
        roughness: 1.5e-5,
    },
    MaterialEntry {
        material: TubeMaterial::Titanium,
        display_name: "Titanium",
        aliases: &["ti"],
        conductivity: 21.9,
        density: 4500.0,
        cost_per_kg: 30.0,
        roughness: 1.5e-6,
    },
];

impl TubeMaterial {
    fn entry(self) -> &'static MaterialEntry {
        &MATERIALS[self as usize]
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        self.entry().display_name
    }

    /// Wall conductivity, W/m·K.
    #[must_use]
    pub fn conductivity(self) -> f64 {
        self.entry().conductivity
    }

    /// Density, kg/m³.
    #[must_use]
    pub fn density(self) -> f64 {
        self.entry().density
    }

    /// Relative cost per kilogram.
    #[must_use]
    pub fn cost_per_kg(self) -> f64 {
        self.entry().cost_per_kg
    }

    /// Absolute surface roughness, m.
    #[must_use]
    pub fn roughness(self) -> f64 {
        self.entry().roughness
    }
}

impl fmt::Display for TubeMaterial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TubeMaterial {
    type Err = GeometryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let query = s.trim();
        MATERIALS
            .iter()
            .find(|entry| {
                entry.display_name.eq_ignore_ascii_case(query)
                    || entry
                        .aliases
                        .iter()
                        .any(|alias| alias.eq_ignore_ascii_case(query))
            })
            .map(|entry| entry.material)
            .ok_or_else(|| GeometryError::UnknownTubeMaterial { name: s.to_owned() })
    }
}
