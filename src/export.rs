//! JSON export of recorded history, one named entry per tracked body.

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::config::ScenarioConfig;
use crate::core::{HistoryRecorder, Sample};
use crate::error::Result;

/// A tracked body's series labelled with its scenario name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedSeries {
    pub name: String,
    /// Index of the body in world order.
    pub body: usize,
    pub samples: Vec<Sample>,
}

/// Series of `history` in registration order, named after `scenario`'s bodies.
pub fn named_series(scenario: &ScenarioConfig, history: &HistoryRecorder) -> Vec<NamedSeries> {
    history
        .series()
        .iter()
        .map(|s| NamedSeries {
            name: scenario.label_for(s.body),
            body: s.body.index(),
            samples: s.samples.clone(),
        })
        .collect()
}

pub fn write_json(path: impl AsRef<Path>, series: &[NamedSeries]) -> Result<()> {
    let file = File::create(path.as_ref())?;
    serde_json::to_writer_pretty(BufWriter::new(file), series)?;
    Ok(())
}

pub fn read_json(path: impl AsRef<Path>) -> Result<Vec<NamedSeries>> {
    let file = File::open(path.as_ref())?;
    Ok(serde_json::from_reader(BufReader::new(file))?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_follow_scenario_labels() -> Result<()> {
        let cfg = ScenarioConfig::reference();
        let mut sim = cfg.build()?;
        sim.run(4)?;
        let named = named_series(&cfg, sim.history());
        let names: Vec<&str> = named.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["block1", "block3"]);
        assert_eq!(named[1].body, 2);
        assert!(named.iter().all(|s| s.samples.len() == 4));
        Ok(())
    }

    #[test]
    fn json_file_reads_back() -> Result<()> {
        let cfg = ScenarioConfig::reference();
        let mut sim = cfg.build()?;
        sim.run(3)?;
        let named = named_series(&cfg, sim.history());

        let file = tempfile::NamedTempFile::new()?;
        write_json(file.path(), &named)?;
        assert_eq!(read_json(file.path())?, named);
        Ok(())
    }
}
