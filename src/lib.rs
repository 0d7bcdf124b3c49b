//! wpop_rs
//!
//! Resolve one country against a world population table and a world boundary
//! GeoJSON, and derive what a dashboard needs to show it: a population series
//! for chosen years, a bounding box to fit a map, and the statistics panel
//! figures. Pairs with the `wpop` CLI.
//!
//! ### Pipeline
//! - `DatasetCache` fetches and parses both sources once
//! - `CountryIndex` maps names to records in each source
//! - `Resolver` pairs statistics with an optional boundary
//! - `bounds` and `series::extract` derive the map extent and chart data
//!
//! ### Example
//! ```no_run
//! use wpop_rs::{CountryIndex, DatasetCache, Resolution, Resolver, SourceConfig, Year};
//!
//! let cache = DatasetCache::new(SourceConfig::default().with_env());
//! let data = cache.load()?;
//! let index = CountryIndex::build(&data.stats, &data.geometries);
//! if let Resolution::Found(profile) = Resolver::new(&index).resolve("Germany") {
//!     let series = wpop_rs::series::extract(&profile, &[Year::Y2020, Year::Y1990]);
//!     let extent = profile.geometry().map(|g| wpop_rs::bounds(&g.geometry));
//!     println!("{:?} {:?}", series, extent);
//! }
//! # Ok::<(), wpop_rs::Error>(())
//! ```

pub mod bounds;
pub mod config;
pub mod error;
pub mod fetch;
pub mod index;
pub mod loader;
pub mod models;
pub mod resolve;
pub mod series;
pub mod stats;
pub mod storage;

pub use bounds::bounds;
pub use config::SourceConfig;
pub use error::{Error, Result};
pub use index::CountryIndex;
pub use loader::{DatasetCache, Datasets};
pub use models::{BoundingBox, CountryProfile, GeometryRecord, PopulationSeries, StatRecord, Year};
pub use resolve::{Resolution, Resolver};
