use crate::models::{GeometryRecord, StatRecord};
use std::collections::HashMap;

/// Name-keyed lookup over both datasets.
///
/// Keys are the names exactly as they appear in each source; no trimming or
/// case folding. When a name repeats within one source the last record wins.
#[derive(Debug, Clone, Default)]
pub struct CountryIndex<'a> {
    stats: HashMap<&'a str, &'a StatRecord>,
    geometries: HashMap<&'a str, &'a GeometryRecord>,
    /// Statistics names in source order, first occurrence only.
    names: Vec<&'a str>,
}

impl<'a> CountryIndex<'a> {
    pub fn build(stats: &'a [StatRecord], geometries: &'a [GeometryRecord]) -> Self {
        let mut by_name = HashMap::with_capacity(stats.len());
        let mut names = Vec::with_capacity(stats.len());
        for rec in stats {
            if by_name.insert(rec.name.as_str(), rec).is_some() {
                log::warn!("duplicate statistics row for {:?}; keeping the last one", rec.name);
            } else {
                names.push(rec.name.as_str());
            }
        }

        let mut geo = HashMap::with_capacity(geometries.len());
        for rec in geometries {
            if geo.insert(rec.name.as_str(), rec).is_some() {
                log::warn!("duplicate boundary for {:?}; keeping the last one", rec.name);
            }
        }

        Self {
            stats: by_name,
            geometries: geo,
            names,
        }
    }

    pub fn stats(&self, name: &str) -> Option<&'a StatRecord> {
        self.stats.get(name).copied()
    }

    pub fn geometry(&self, name: &str) -> Option<&'a GeometryRecord> {
        self.geometries.get(name).copied()
    }

    /// Country names a caller may offer for selection.
    pub fn names(&self) -> &[&'a str] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.stats.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stats.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Geometry, Polygon};

    fn stat(name: &str, v: f64) -> StatRecord {
        StatRecord::new(name, [v; 8])
    }

    fn geo(name: &str) -> GeometryRecord {
        GeometryRecord {
            name: name.into(),
            geometry: Geometry {
                polygons: vec![Polygon {
                    rings: vec![vec![[0.0, 0.0], [1.0, 1.0], [0.0, 0.0]]],
                }],
            },
        }
    }

    #[test]
    fn duplicate_names_keep_last_seen() {
        let stats = vec![stat("Chad", 1.0), stat("Mali", 2.0), stat("Chad", 3.0)];
        let idx = CountryIndex::build(&stats, &[]);
        assert_eq!(idx.len(), 2);
        assert_eq!(idx.stats("Chad").unwrap().population(crate::Year::Y2022), 3.0);
        assert_eq!(idx.names(), &["Chad", "Mali"]);
    }

    #[test]
    fn lookup_is_exact() {
        let stats = vec![stat("Czechia", 1.0)];
        let geoms = vec![geo("Czechia")];
        let idx = CountryIndex::build(&stats, &geoms);
        assert!(idx.stats("Czechia").is_some());
        assert!(idx.stats("czechia").is_none());
        assert!(idx.stats(" Czechia").is_none());
        assert!(idx.geometry("Czech Republic").is_none());
        assert!(idx.geometry("Czechia").is_some());
    }
}
