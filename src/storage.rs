use crate::models::PopulationSeries;
use anyhow::Result;
use csv::WriterBuilder;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Save a series as CSV with a `year,population` header, rows in series order.
pub fn save_series_csv<P: AsRef<Path>>(series: &PopulationSeries, path: P) -> Result<()> {
    let mut wtr = WriterBuilder::new().from_path(path)?;
    wtr.write_record(["year", "population"])?;
    for p in series {
        wtr.serialize((p.year.label(), p.population))?;
    }
    wtr.flush()?;
    Ok(())
}

/// Save a series as a pretty JSON array of `{year, population}` objects.
pub fn save_series_json<P: AsRef<Path>>(series: &PopulationSeries, path: P) -> Result<()> {
    let mut f = File::create(path)?;
    let s = serde_json::to_string_pretty(series)?;
    f.write_all(s.as_bytes())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{SeriesPoint, Year};
    use tempfile::tempdir;

    #[test]
    fn write_csv_and_json() {
        let dir = tempdir().unwrap();
        let csvp = dir.path().join("x.csv");
        let jsonp = dir.path().join("x.json");
        let series = vec![
            SeriesPoint { year: Year::Y2010, population: 5.0 },
            SeriesPoint { year: Year::Y1980, population: 2.5 },
        ];
        save_series_csv(&series, &csvp).unwrap();
        save_series_json(&series, &jsonp).unwrap();
        let csv_txt = std::fs::read_to_string(&csvp).unwrap();
        assert_eq!(csv_txt, "year,population\n2010,5.0\n1980,2.5\n");
        let v: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&jsonp).unwrap()).unwrap();
        assert_eq!(v[0]["year"], "2010");
        assert_eq!(v[1]["population"], 2.5);
    }
}
