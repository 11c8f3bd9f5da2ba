//! Game configuration: simulation constants, home economics, starting
//! inventory and process settings.

use std::{collections::BTreeMap, fs, path::Path, time::Duration};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::error::{GameError, GameResult};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    #[serde(default)]
    pub simulation: SimulationConfig,
    #[serde(default)]
    pub homes: HomeConfig,
    #[serde(default = "default_starting_resources")]
    pub starting_resources: BTreeMap<String, f64>,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub server: ServerConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationConfig {
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,
    /// Gather progress added per tick before tool bonuses, in percent.
    #[serde(default = "default_progress_rate")]
    pub gather_rate_per_tick: f64,
    /// Worker progress added per paid worker per tick, in percent.
    #[serde(default = "default_progress_rate")]
    pub worker_rate_per_tick: f64,
    #[serde(default = "default_salary_interval_ticks")]
    pub salary_interval_ticks: u64,
    #[serde(default = "default_auto_sell_buffer_fraction")]
    pub auto_sell_buffer_fraction: f64,
    #[serde(default = "default_worker_cost_growth")]
    pub worker_cost_growth: f64,
    /// How often the runtime publishes a snapshot frame. 0 disables frames.
    #[serde(default = "default_frame_interval_ticks")]
    pub frame_interval_ticks: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BuildingCost {
    pub wood: f64,
    pub stone: f64,
    pub gold: f64,
}

impl BuildingCost {
    /// `floor(base × growth^exponent)` for each material.
    pub fn scaled(&self, growth: f64, exponent: u32) -> Self {
        let factor = growth.powi(exponent as i32);
        Self {
            wood: (self.wood * factor).floor(),
            stone: (self.stone * factor).floor(),
            gold: (self.gold * factor).floor(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HomeConfig {
    #[serde(default = "default_build_cost")]
    pub build_cost: BuildingCost,
    #[serde(default = "default_build_cost_growth")]
    pub build_cost_growth: f64,
    #[serde(default = "default_upgrade_cost")]
    pub upgrade_cost: BuildingCost,
    #[serde(default = "default_upgrade_cost_growth")]
    pub upgrade_cost_growth: f64,
    #[serde(default = "default_starting_population")]
    pub starting_population: u32,
    #[serde(default = "default_population_per_level")]
    pub population_per_level: u32,
    #[serde(default = "default_starting_happiness")]
    pub starting_happiness: f64,
    #[serde(default = "default_happiness_per_level")]
    pub happiness_per_level: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_tick_interval_ms() -> u64 {
    20
}

fn default_progress_rate() -> f64 {
    2.0
}

fn default_salary_interval_ticks() -> u64 {
    50
}

fn default_auto_sell_buffer_fraction() -> f64 {
    0.1
}

fn default_worker_cost_growth() -> f64 {
    1.15
}

fn default_frame_interval_ticks() -> u64 {
    10
}

fn default_build_cost() -> BuildingCost {
    BuildingCost {
        wood: 50.0,
        stone: 30.0,
        gold: 100.0,
    }
}

fn default_build_cost_growth() -> f64 {
    1.3
}

fn default_upgrade_cost() -> BuildingCost {
    BuildingCost {
        wood: 30.0,
        stone: 20.0,
        gold: 50.0,
    }
}

fn default_upgrade_cost_growth() -> f64 {
    1.2
}

fn default_starting_population() -> u32 {
    2
}

fn default_population_per_level() -> u32 {
    2
}

fn default_starting_happiness() -> f64 {
    50.0
}

fn default_happiness_per_level() -> f64 {
    10.0
}

fn default_starting_resources() -> BTreeMap<String, f64> {
    BTreeMap::from([(crate::GOLD.to_string(), 50.0)])
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            simulation: SimulationConfig::default(),
            homes: HomeConfig::default(),
            starting_resources: default_starting_resources(),
            logging: LoggingConfig::default(),
            server: ServerConfig::default(),
        }
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: default_tick_interval_ms(),
            gather_rate_per_tick: default_progress_rate(),
            worker_rate_per_tick: default_progress_rate(),
            salary_interval_ticks: default_salary_interval_ticks(),
            auto_sell_buffer_fraction: default_auto_sell_buffer_fraction(),
            worker_cost_growth: default_worker_cost_growth(),
            frame_interval_ticks: default_frame_interval_ticks(),
        }
    }
}

impl SimulationConfig {
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }
}

impl Default for HomeConfig {
    fn default() -> Self {
        Self {
            build_cost: default_build_cost(),
            build_cost_growth: default_build_cost_growth(),
            upgrade_cost: default_upgrade_cost(),
            upgrade_cost_growth: default_upgrade_cost_growth(),
            starting_population: default_starting_population(),
            population_per_level: default_population_per_level(),
            starting_happiness: default_starting_happiness(),
            happiness_per_level: default_happiness_per_level(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl GameConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let data = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: GameConfig = serde_yaml::from_str(&data)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        config
            .validate()
            .with_context(|| format!("Invalid config {}", path.display()))?;
        Ok(config)
    }

    pub fn to_yaml(&self, path: impl AsRef<Path>) -> Result<()> {
        let yaml = serde_yaml::to_string(self)?;
        fs::write(path, yaml)?;
        Ok(())
    }

    pub fn validate(&self) -> GameResult<()> {
        let sim = &self.simulation;
        if sim.tick_interval_ms == 0 {
            return Err(GameError::InvalidConfig(
                "tick_interval_ms must be positive".into(),
            ));
        }
        if sim.gather_rate_per_tick <= 0.0 || sim.worker_rate_per_tick <= 0.0 {
            return Err(GameError::InvalidConfig(
                "progress rates must be positive".into(),
            ));
        }
        if sim.salary_interval_ticks == 0 {
            return Err(GameError::InvalidConfig(
                "salary_interval_ticks must be positive".into(),
            ));
        }
        if !(0.0..1.0).contains(&sim.auto_sell_buffer_fraction) {
            return Err(GameError::InvalidConfig(
                "auto_sell_buffer_fraction must be within [0, 1)".into(),
            ));
        }
        let growth = [
            ("worker_cost_growth", sim.worker_cost_growth),
            ("build_cost_growth", self.homes.build_cost_growth),
            ("upgrade_cost_growth", self.homes.upgrade_cost_growth),
        ];
        for (name, value) in growth {
            if value < 1.0 {
                return Err(GameError::InvalidConfig(format!(
                    "{name} must be at least 1.0, got {value}"
                )));
            }
        }
        for (key, amount) in &self.starting_resources {
            if *amount < 0.0 {
                return Err(GameError::InvalidConfig(format!(
                    "starting amount of '{key}' is negative"
                )));
            }
        }
        Ok(())
    }
}
