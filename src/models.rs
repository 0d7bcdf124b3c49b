use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Population year columns carried by the statistics source.
///
/// The set is closed: every value of this enum has a matching
/// `"<year> Population"` column, and nothing else can be requested.
/// No ordering is derived: variant order is column order (newest first), not
/// chronology.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Year {
    #[serde(rename = "2022")]
    Y2022,
    #[serde(rename = "2020")]
    Y2020,
    #[serde(rename = "2015")]
    Y2015,
    #[serde(rename = "2010")]
    Y2010,
    #[serde(rename = "2000")]
    Y2000,
    #[serde(rename = "1990")]
    Y1990,
    #[serde(rename = "1980")]
    Y1980,
    #[serde(rename = "1970")]
    Y1970,
}

impl Year {
    /// All labels in dataset column order (newest first).
    pub const ALL: [Year; 8] = [
        Year::Y2022,
        Year::Y2020,
        Year::Y2015,
        Year::Y2010,
        Year::Y2000,
        Year::Y1990,
        Year::Y1980,
        Year::Y1970,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Year::Y2022 => "2022",
            Year::Y2020 => "2020",
            Year::Y2015 => "2015",
            Year::Y2010 => "2010",
            Year::Y2000 => "2000",
            Year::Y1990 => "1990",
            Year::Y1980 => "1980",
            Year::Y1970 => "1970",
        }
    }

    /// Header of the matching CSV column, e.g. `"2020 Population"`.
    pub fn column(self) -> String {
        format!("{} Population", self.label())
    }

    fn slot(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Year {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Year {
    type Err = Error;

    /// Accepts both `"2020"` and the column form `"2020 Population"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let bare = s.strip_suffix(" Population").unwrap_or(s);
        Year::ALL
            .into_iter()
            .find(|y| y.label() == bare)
            .ok_or_else(|| Error::InvalidYear(s.to_string()))
    }
}

/// Raw CSV row as published in the world population dataset.
#[derive(Debug, Clone, Deserialize)]
pub struct StatRow {
    #[serde(rename = "Rank")]
    pub rank: u32,
    #[serde(rename = "CCA3")]
    pub cca3: String,
    #[serde(rename = "Country/Territory")]
    pub name: String,
    #[serde(rename = "Capital")]
    pub capital: String,
    #[serde(rename = "Continent")]
    pub continent: String,
    #[serde(rename = "2022 Population")]
    pub pop_2022: f64,
    #[serde(rename = "2020 Population")]
    pub pop_2020: f64,
    #[serde(rename = "2015 Population")]
    pub pop_2015: f64,
    #[serde(rename = "2010 Population")]
    pub pop_2010: f64,
    #[serde(rename = "2000 Population")]
    pub pop_2000: f64,
    #[serde(rename = "1990 Population")]
    pub pop_1990: f64,
    #[serde(rename = "1980 Population")]
    pub pop_1980: f64,
    #[serde(rename = "1970 Population")]
    pub pop_1970: f64,
    #[serde(rename = "Area (km²)")]
    pub area_km2: f64,
    #[serde(rename = "Density (per km²)")]
    pub density_per_km2: f64,
    #[serde(rename = "Growth Rate")]
    pub growth_rate: f64,
    #[serde(rename = "World Population Percentage")]
    pub world_population_pct: f64,
}

/// One country's statistics row. `name` is the join key.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StatRecord {
    pub name: String,
    pub rank: u32,
    pub cca3: String,
    pub capital: String,
    pub continent: String,
    /// Indexed in `Year::ALL` order.
    populations: [f64; 8],
    pub area_km2: f64,
    pub density_per_km2: f64,
    pub growth_rate: f64,
    pub world_population_pct: f64,
}

impl StatRecord {
    /// Builds a record from a name and one value per year, everything else zeroed.
    pub fn new(name: impl Into<String>, populations: [f64; 8]) -> Self {
        Self {
            name: name.into(),
            rank: 0,
            cca3: String::new(),
            capital: String::new(),
            continent: String::new(),
            populations,
            area_km2: 0.0,
            density_per_km2: 0.0,
            growth_rate: 0.0,
            world_population_pct: 0.0,
        }
    }

    pub fn population(&self, year: Year) -> f64 {
        self.populations[year.slot()]
    }
}

impl From<StatRow> for StatRecord {
    fn from(r: StatRow) -> Self {
        Self {
            name: r.name,
            rank: r.rank,
            cca3: r.cca3,
            capital: r.capital,
            continent: r.continent,
            populations: [
                r.pop_2022, r.pop_2020, r.pop_2015, r.pop_2010, r.pop_2000, r.pop_1990,
                r.pop_1980, r.pop_1970,
            ],
            area_km2: r.area_km2,
            density_per_km2: r.density_per_km2,
            growth_rate: r.growth_rate,
            world_population_pct: r.world_population_pct,
        }
    }
}

/// A closed ring of `[x, y]` positions (longitude, latitude for the world dataset).
pub type Ring = Vec<[f64; 2]>;

/// Exterior ring first, then holes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Polygon {
    pub rings: Vec<Ring>,
}

/// Polygonal boundary; a single `Polygon` is stored as a one-part multipolygon.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Geometry {
    pub polygons: Vec<Polygon>,
}

impl Geometry {
    pub fn coords(&self) -> impl Iterator<Item = &[f64; 2]> {
        self.polygons
            .iter()
            .flat_map(|p| p.rings.iter())
            .flat_map(|r| r.iter())
    }

    pub fn is_empty(&self) -> bool {
        self.coords().next().is_none()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GeometryRecord {
    pub name: String,
    pub geometry: Geometry,
}

/// A resolved country: its statistics plus, when available, its boundary.
///
/// Borrows from the loaded datasets; building one is two map lookups.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CountryProfile<'a> {
    stats: &'a StatRecord,
    geometry: Option<&'a GeometryRecord>,
}

impl<'a> CountryProfile<'a> {
    pub fn new(stats: &'a StatRecord, geometry: Option<&'a GeometryRecord>) -> Self {
        Self { stats, geometry }
    }

    pub fn name(&self) -> &'a str {
        &self.stats.name
    }

    pub fn stats(&self) -> &'a StatRecord {
        self.stats
    }

    /// `None` when the boundary source has no feature of this exact name.
    pub fn geometry(&self) -> Option<&'a GeometryRecord> {
        self.geometry
    }

    pub fn has_geometry(&self) -> bool {
        self.geometry.is_some()
    }
}

/// Axis-aligned extent of a geometry.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct BoundingBox {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl BoundingBox {
    /// South-west and north-east corners as `[lat, lon]`, the order map widgets
    /// expect when fitting a view.
    pub fn fit_corners(&self) -> [[f64; 2]; 2] {
        [[self.min_y, self.min_x], [self.max_y, self.max_x]]
    }

    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.min_x && x <= self.max_x && y >= self.min_y && y <= self.max_y
    }
}

/// One bar of the population chart.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct SeriesPoint {
    pub year: Year,
    pub population: f64,
}

/// Ordered (year, population) pairs in the caller's requested order.
pub type PopulationSeries = Vec<SeriesPoint>;
