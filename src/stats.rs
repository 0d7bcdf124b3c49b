use crate::models::{PopulationSeries, StatRecord};
use serde::{Deserialize, Serialize};

/// Scalar figures for a country's statistics panel.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct StatsPanel {
    pub area_km2: f64,
    pub density_per_km2: f64,
    /// Percent per year.
    pub growth_rate: f64,
    /// Percent of world population.
    pub world_population_pct: f64,
}

impl From<&StatRecord> for StatsPanel {
    fn from(r: &StatRecord) -> Self {
        Self {
            area_km2: r.area_km2,
            density_per_km2: r.density_per_km2,
            growth_rate: r.growth_rate,
            world_population_pct: r.world_population_pct,
        }
    }
}

impl StatsPanel {
    /// `(label, value, unit)` rows in display order.
    pub fn rows(&self) -> [(&'static str, f64, &'static str); 4] {
        [
            ("Area (km²)", self.area_km2, "km²"),
            ("Density (per km²)", self.density_per_km2, "people/km²"),
            ("Growth Rate", self.growth_rate, "%"),
            ("World Population Percentage", self.world_population_pct, "%"),
        ]
    }
}

/// Summary statistics over the selected years of a series.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Summary {
    pub count: usize,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub mean: Option<f64>,
    pub median: Option<f64>,
}

/// Summarize a population series. Non-finite values are ignored.
pub fn summarize(series: &PopulationSeries) -> Summary {
    let mut vals: Vec<f64> = series
        .iter()
        .map(|p| p.population)
        .filter(|v| v.is_finite())
        .collect();
    vals.sort_by(|a, b| a.total_cmp(b));
    let count = vals.len();
    let min = vals.first().cloned();
    let max = vals.last().cloned();
    let mean = if count > 0 {
        Some(vals.iter().copied().sum::<f64>() / count as f64)
    } else {
        None
    };
    let median = if count == 0 {
        None
    } else if count % 2 == 1 {
        Some(vals[count / 2])
    } else {
        Some((vals[count / 2 - 1] + vals[count / 2]) / 2.0)
    };
    Summary {
        count,
        min,
        max,
        mean,
        median,
    }
}
