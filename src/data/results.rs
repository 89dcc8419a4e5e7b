use crate::config::SimulationConfig;
use crate::engines::generation::SimulationReport;
use crate::engines::metrics::GenerationStats;
use crate::error::{EvolabError, Result};
use chrono::{DateTime, Local};
use serde::Serialize;
use std::fs::{self, File};
use std::io::{BufWriter, ErrorKind};
use std::path::{Path, PathBuf};

pub const CONFIG_FILE: &str = "simulation_config.json";
pub const METRICS_FILE: &str = "results.csv";
pub const INFO_FILE: &str = "additional_info.json";

/// Run summary written next to the metrics
#[derive(Debug, Clone, Serialize)]
pub struct AdditionalInfo {
    pub elapsed_time: f64,
    pub population_size: usize,
    pub dimensions: usize,
    pub epochs: usize,
    pub final_best_cost: Option<f64>,
    pub best_unit_parameters: Vec<f64>,
    pub finished_at: DateTime<Local>,
}

impl AdditionalInfo {
    pub fn from_report(report: &SimulationReport) -> Self {
        Self {
            elapsed_time: report.elapsed_secs,
            population_size: report.config.general.population_size,
            dimensions: report.config.cost_function.dimensions,
            epochs: report.config.general.epochs_no,
            final_best_cost: report.best_cost,
            best_unit_parameters: report.best_solution.clone(),
            finished_at: Local::now(),
        }
    }
}

#[derive(Serialize)]
struct MetricsRow {
    epoch: usize,
    best_cost: f64,
    avg_cost: f64,
    deviation: f64,
}

/// Writes one run's artifacts into its own timestamped directory
pub struct ResultsSaver {
    simulation_dir: PathBuf,
}

impl ResultsSaver {
    /// Create `<base_dir>/<YYYYMMDD_HHMMSS_micros>/`, creating `base_dir`
    /// as needed
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref();
        fs::create_dir_all(base_dir)?;

        let timestamp = Local::now().format("%Y%m%d_%H%M%S_%6f").to_string();
        let mut simulation_dir = base_dir.join(&timestamp);
        let mut attempt = 0;
        loop {
            match fs::create_dir(&simulation_dir) {
                Ok(()) => break,
                Err(e) if e.kind() == ErrorKind::AlreadyExists && attempt < 100 => {
                    attempt += 1;
                    simulation_dir = base_dir.join(format!("{}_{}", timestamp, attempt));
                }
                Err(e) => {
                    return Err(EvolabError::Results(format!(
                        "Failed to create {}: {}",
                        simulation_dir.display(),
                        e
                    )))
                }
            }
        }

        log::debug!("Saving results to {}", simulation_dir.display());
        Ok(Self { simulation_dir })
    }

    pub fn simulation_dir(&self) -> &Path {
        &self.simulation_dir
    }

    pub fn save_simulation_config(&self, config: &SimulationConfig) -> Result<PathBuf> {
        self.write_json(CONFIG_FILE, config)
    }

    /// One CSV row per history entry, epochs numbered from 1
    pub fn save_metrics(&self, history: &[GenerationStats]) -> Result<PathBuf> {
        let path = self.simulation_dir.join(METRICS_FILE);
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_path(&path)?;

        writer.write_record(["epoch", "best_cost", "avg_cost", "deviation"])?;
        for (i, stats) in history.iter().enumerate() {
            writer.serialize(MetricsRow {
                epoch: i + 1,
                best_cost: stats.best_cost,
                avg_cost: stats.avg_cost,
                deviation: stats.std_dev,
            })?;
        }
        writer.flush()?;
        Ok(path)
    }

    pub fn save_additional_info(&self, info: &AdditionalInfo) -> Result<PathBuf> {
        self.write_json(INFO_FILE, info)
    }

    /// Config, metrics and summary in one go
    pub fn save_results(&self, report: &SimulationReport) -> Result<()> {
        self.save_simulation_config(&report.config)?;
        self.save_metrics(&report.history)?;
        self.save_additional_info(&AdditionalInfo::from_report(report))?;
        log::info!("Results saved to {}", self.simulation_dir.display());
        Ok(())
    }

    fn write_json<T: Serialize>(&self, file_name: &str, value: &T) -> Result<PathBuf> {
        let path = self.simulation_dir.join(file_name);
        let writer = BufWriter::new(File::create(&path)?);
        serde_json::to_writer_pretty(writer, value)?;
        Ok(path)
    }
}
