//! Dataset loading: parse the statistics CSV and the boundary GeoJSON, once.
//!
//! `DatasetCache` owns the fetcher and the source locations and remembers the
//! first successful load for its whole lifetime. Both sources must parse; a
//! failure in either one leaves the cache empty and returns
//! `Error::DataUnavailable`.
//!
//! ```no_run
//! use wpop_rs::{DatasetCache, SourceConfig};
//!
//! let cache = DatasetCache::new(SourceConfig::default());
//! let data = cache.load()?;
//! println!("{} countries, {} boundaries", data.stats.len(), data.geometries.len());
//! # Ok::<(), wpop_rs::Error>(())
//! ```

use crate::config::SourceConfig;
use crate::error::{Error, Result, SourceKind};
use crate::fetch::{Fetch, HttpFetcher};
use crate::models::{Geometry, GeometryRecord, Polygon, Ring, StatRecord, StatRow};
use anyhow::{Context, anyhow, bail};
use geojson::{GeoJson, Position, Value};
use std::cell::OnceCell;

/// Feature property holding the country name in the boundary source.
pub const NAME_PROPERTY: &str = "name";

/// Both datasets, parsed and immutable.
#[derive(Debug, Clone, PartialEq)]
pub struct Datasets {
    pub stats: Vec<StatRecord>,
    pub geometries: Vec<GeometryRecord>,
}

/// Memoizing loader. Construct once, hand out `&DatasetCache`.
#[derive(Debug)]
pub struct DatasetCache<F: Fetch = HttpFetcher> {
    fetcher: F,
    sources: SourceConfig,
    data: OnceCell<Datasets>,
}

impl DatasetCache<HttpFetcher> {
    pub fn new(sources: SourceConfig) -> Self {
        Self::with_fetcher(sources, HttpFetcher::default())
    }
}

impl<F: Fetch> DatasetCache<F> {
    pub fn with_fetcher(sources: SourceConfig, fetcher: F) -> Self {
        Self {
            fetcher,
            sources,
            data: OnceCell::new(),
        }
    }

    pub fn sources(&self) -> &SourceConfig {
        &self.sources
    }

    /// Already-loaded data, without fetching.
    pub fn get(&self) -> Option<&Datasets> {
        self.data.get()
    }

    /// Fetch and parse both sources on first call; return the stored result after.
    pub fn load(&self) -> Result<&Datasets> {
        if let Some(data) = self.data.get() {
            return Ok(data);
        }

        let stats = self
            .read(SourceKind::Statistics, &self.sources.stats, parse_stats)?;
        let geometries = self
            .read(SourceKind::Geometry, &self.sources.geometry, parse_geometries)?;
        log::info!(
            "loaded {} statistics rows and {} boundaries",
            stats.len(),
            geometries.len()
        );

        Ok(self.data.get_or_init(|| Datasets { stats, geometries }))
    }

    fn read<T>(
        &self,
        kind: SourceKind,
        location: &str,
        parse: fn(&str) -> anyhow::Result<T>,
    ) -> Result<T> {
        self.fetcher
            .fetch(location)
            .and_then(|body| parse(&body))
            .map_err(|e| Error::DataUnavailable {
                kind,
                location: location.to_string(),
                reason: format!("{:#}", e),
            })
    }
}

/// Parse the statistics CSV. Every expected column must be present and numeric.
pub fn parse_stats(text: &str) -> anyhow::Result<Vec<StatRecord>> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::Headers)
        .from_reader(text.as_bytes());
    let mut out = Vec::new();
    for (i, row) in rdr.deserialize::<StatRow>().enumerate() {
        // +2: header line, then 1-based rows
        let row = row.with_context(|| format!("parse statistics row {}", i + 2))?;
        out.push(StatRecord::from(row));
    }
    Ok(out)
}

/// Parse the boundary GeoJSON into named polygonal records.
///
/// Features without a string `name`, without geometry, with a non-polygonal
/// geometry, or with no coordinates at all are skipped. A document that is
/// not a FeatureCollection, or a polygon position with fewer than two
/// ordinates, fails the whole parse.
pub fn parse_geometries(text: &str) -> anyhow::Result<Vec<GeometryRecord>> {
    let geojson: GeoJson = text.parse().context("parse GeoJSON")?;
    let collection = match geojson {
        GeoJson::FeatureCollection(fc) => fc,
        _ => bail!("GeoJSON must be a FeatureCollection"),
    };

    let mut out = Vec::with_capacity(collection.features.len());
    for (i, feature) in collection.features.into_iter().enumerate() {
        let name = match feature.property(NAME_PROPERTY) {
            Some(serde_json::Value::String(s)) => s.clone(),
            _ => {
                log::debug!("feature {} has no {:?} property, skipped", i, NAME_PROPERTY);
                continue;
            }
        };
        let Some(geom) = feature.geometry else {
            log::debug!("feature {:?} has no geometry, skipped", name);
            continue;
        };
        let geometry = match geom.value {
            Value::Polygon(rings) => Geometry {
                polygons: vec![to_polygon(&rings).with_context(|| format!("feature {:?}", name))?],
            },
            Value::MultiPolygon(parts) => Geometry {
                polygons: parts
                    .iter()
                    .map(|rings| to_polygon(rings))
                    .collect::<anyhow::Result<_>>()
                    .with_context(|| format!("feature {:?}", name))?,
            },
            _ => {
                log::debug!("feature {:?} is not polygonal, skipped", name);
                continue;
            }
        };
        if geometry.is_empty() {
            log::debug!("feature {:?} has no coordinates, skipped", name);
            continue;
        }
        out.push(GeometryRecord { name, geometry });
    }
    Ok(out)
}

fn to_polygon(rings: &[Vec<Position>]) -> anyhow::Result<Polygon> {
    let rings = rings
        .iter()
        .map(|ring| {
            ring.iter()
                .map(|p| match p.as_slice() {
                    [x, y, ..] => Ok([*x, *y]),
                    _ => Err(anyhow!("position with {} ordinates", p.len())),
                })
                .collect::<anyhow::Result<Ring>>()
        })
        .collect::<anyhow::Result<Vec<Ring>>>()?;
    Ok(Polygon { rings })
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "Rank,CCA3,Country/Territory,Capital,Continent,2022 Population,2020 Population,2015 Population,2010 Population,2000 Population,1990 Population,1980 Population,1970 Population,Area (km²),Density (per km²),Growth Rate,World Population Percentage";

    #[test]
    fn stats_rows_map_to_records() {
        let csv = format!(
            "{}\n36,AFG,Afghanistan,Kabul,Asia,41128771,38972230,33753499,28189672,19542982,10694796,12486631,10752971,652230,63.0587,1.0257,0.52\n",
            HEADER
        );
        let rows = parse_stats(&csv).unwrap();
        assert_eq!(rows.len(), 1);
        let afg = &rows[0];
        assert_eq!(afg.name, "Afghanistan");
        assert_eq!(afg.cca3, "AFG");
        assert_eq!(afg.population(crate::models::Year::Y1990), 10694796.0);
        assert_eq!(afg.area_km2, 652230.0);
        assert_eq!(afg.world_population_pct, 0.52);
    }

    #[test]
    fn stats_missing_column_is_an_error() {
        let csv = "Rank,Country/Territory\n1,Nowhere\n";
        assert!(parse_stats(csv).is_err());
    }

    #[test]
    fn stats_non_numeric_value_names_the_row() {
        let csv = format!(
            "{}\n1,AAA,A,a,X,n/a,1,1,1,1,1,1,1,1,1,1,1\n",
            HEADER
        );
        let err = parse_stats(&csv).unwrap_err();
        assert!(format!("{:#}", err).contains("row 2"));
    }

    #[test]
    fn geometries_accept_polygon_and_multipolygon() {
        let gj = r#"{"type":"FeatureCollection","features":[
          {"type":"Feature","properties":{"name":"Square"},
           "geometry":{"type":"Polygon","coordinates":[[[0,0],[1,0],[1,1],[0,1],[0,0]]]}},
          {"type":"Feature","properties":{"name":"Islands"},
           "geometry":{"type":"MultiPolygon","coordinates":[
             [[[0,0],[1,0],[1,1],[0,0]]],
             [[[5,5],[6,5],[6,6],[5,5]]]]}}
        ]}"#;
        let recs = parse_geometries(gj).unwrap();
        assert_eq!(recs.len(), 2);
        assert_eq!(recs[0].name, "Square");
        assert_eq!(recs[0].geometry.polygons.len(), 1);
        assert_eq!(recs[1].geometry.polygons.len(), 2);
        assert_eq!(recs[1].geometry.polygons[1].rings[0][1], [6.0, 5.0]);
    }

    #[test]
    fn geometries_skip_unnamed_and_non_polygonal_features() {
        let gj = r#"{"type":"FeatureCollection","features":[
          {"type":"Feature","properties":{"id":7},
           "geometry":{"type":"Polygon","coordinates":[[[0,0],[1,0],[1,1],[0,0]]]}},
          {"type":"Feature","properties":{"name":"Capital"},
           "geometry":{"type":"Point","coordinates":[3,4]}},
          {"type":"Feature","properties":{"name":"Nothing"},"geometry":null}
        ]}"#;
        assert!(parse_geometries(gj).unwrap().is_empty());
    }

    #[test]
    fn geometries_skip_features_without_coordinates() {
        let gj = r#"{"type":"FeatureCollection","features":[
          {"type":"Feature","properties":{"name":"Hollow"},
           "geometry":{"type":"Polygon","coordinates":[]}},
          {"type":"Feature","properties":{"name":"Scattered"},
           "geometry":{"type":"MultiPolygon","coordinates":[[],[[]]]}},
          {"type":"Feature","properties":{"name":"Solid"},
           "geometry":{"type":"Polygon","coordinates":[[[0,0],[2,0],[2,2],[0,0]]]}}
        ]}"#;
        let recs = parse_geometries(gj).unwrap();
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].name, "Solid");
        assert!(!recs[0].geometry.is_empty());
    }

    #[test]
    fn geometries_reject_short_positions() {
        let gj = r#"{"type":"FeatureCollection","features":[
          {"type":"Feature","properties":{"name":"Line"},
           "geometry":{"type":"Polygon","coordinates":[[[0,0],[1],[1,1],[0,0]]]}}
        ]}"#;
        assert!(parse_geometries(gj).is_err());
    }

    #[test]
    fn geometries_reject_non_collections() {
        let gj = r#"{"type":"Point","coordinates":[1,2]}"#;
        assert!(parse_geometries(gj).is_err());
        assert!(parse_geometries("not json").is_err());
    }
}
