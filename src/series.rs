use crate::models::{CountryProfile, PopulationSeries, SeriesPoint, Year};

/// Years shown when the caller has not picked any: the three most recent.
pub const DEFAULT_YEARS: [Year; 3] = [Year::Y2022, Year::Y2020, Year::Y2015];

/// Population for each requested year, in the order requested.
///
/// The order is not normalized: `[Y2020, Y1990]` yields 2020 then 1990.
/// Repeats are kept. An empty request yields an empty series.
pub fn extract(profile: &CountryProfile<'_>, years: &[Year]) -> PopulationSeries {
    let stats = profile.stats();
    years
        .iter()
        .map(|&year| SeriesPoint {
            year,
            population: stats.population(year),
        })
        .collect()
}
