//! Random cable asset generation.
//!
//! Produces demo cable records with a fixed sensor layout per section.
//! Given a seed, output is fully deterministic.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::domain::{
    AssetStatus, Cable, Location, MetricType, Phase, Section, Sensor, Substation,
};
use crate::ports::CoreError;

const LETTERS: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

const NOMINAL_VOLTAGES: &[&str] = &["11kV", "33kV", "66kV", "132kV", "275kV"];

/// Pressure sensors in the order they are fitted to every section.
const PRESSURE_LAYOUT: [(Phase, Location); 6] = [
    (Phase::Red, Location::Source),
    (Phase::Red, Location::Target),
    (Phase::Yellow, Location::Source),
    (Phase::Yellow, Location::Target),
    (Phase::Blue, Location::Source),
    (Phase::Blue, Location::Target),
];

/// Unplaced sensors fitted after the pressure sensors.
const AUXILIARY_LAYOUT: [MetricType; 3] = [
    MetricType::RtuTemperature,
    MetricType::RtuVoltage,
    MetricType::GaugeVoltage,
];

/// Sensors per section.
pub const SENSORS_PER_SECTION: usize = PRESSURE_LAYOUT.len() + AUXILIARY_LAYOUT.len();

/// Parameters for a generation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// Number of cables to generate.
    pub circuits: u32,
    /// Sections per cable.
    pub sections_per_circuit: u32,
    /// Construction type stamped on every cable.
    pub circuit_type: String,
    /// Substation IDs are drawn from `0..max_substation_id`.
    pub max_substation_id: u32,
    /// Feeder numbers are drawn from `0..max_feeder_number`.
    pub max_feeder_number: u32,
    /// ID given to the very first sensor.
    pub first_sensor_id: u32,
    /// RNG seed; `None` seeds from OS entropy.
    pub seed: Option<u64>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            circuits: 65,
            sections_per_circuit: 8,
            circuit_type: "OIL-FILLED".to_string(),
            max_substation_id: 65,
            max_feeder_number: 5,
            first_sensor_id: 1,
            seed: None,
        }
    }
}

impl GeneratorConfig {
    /// Reject configurations that cannot produce a sensible asset set.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.circuits == 0 {
            return Err(CoreError::Validation(
                "circuit count must be at least 1".to_string(),
            ));
        }
        if self.sections_per_circuit == 0 {
            return Err(CoreError::Validation(
                "sections per circuit must be at least 1".to_string(),
            ));
        }
        if self.max_substation_id == 0 || self.max_feeder_number == 0 {
            return Err(CoreError::Validation(
                "substation and feeder bounds must be at least 1".to_string(),
            ));
        }
        self.check_sensor_range(self.first_sensor_id)
    }

    /// Sensors produced by one `generate` call.
    fn sensors_per_run(&self) -> u64 {
        u64::from(self.circuits) * u64::from(self.sections_per_circuit) * SENSORS_PER_SECTION as u64
    }

    fn check_sensor_range(&self, first: u32) -> Result<(), CoreError> {
        let sensors = self.sensors_per_run();
        if u64::from(first) + sensors > u64::from(u32::MAX) {
            return Err(CoreError::Validation(format!(
                "{sensors} sensors starting at {first} overflow the sensor ID range"
            )));
        }
        Ok(())
    }
}

/// Generator for random cable records.
pub struct CableGenerator {
    config: GeneratorConfig,
    rng: StdRng,
    next_sensor_id: u32,
}

impl CableGenerator {
    /// Create a generator, validating the configuration.
    pub fn new(config: GeneratorConfig) -> Result<Self, CoreError> {
        config.validate()?;
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let next_sensor_id = config.first_sensor_id;
        Ok(Self {
            config,
            rng,
            next_sensor_id,
        })
    }

    pub const fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Generate the configured number of cables.
    ///
    /// Circuit IDs run from 1; sensor IDs continue from wherever the
    /// previous call stopped. Fails without generating anything when the
    /// remaining sensor ID range is too small for another run.
    pub fn generate(&mut self) -> Result<Vec<Cable>, CoreError> {
        self.config.check_sensor_range(self.next_sensor_id)?;
        Ok((1..=self.config.circuits)
            .map(|circuit_id| self.cable(circuit_id))
            .collect())
    }

    fn cable(&mut self, circuit_id: u32) -> Cable {
        let status = if self.rng.gen_bool(0.5) {
            AssetStatus::Active
        } else {
            AssetStatus::Inactive
        };
        let source_substation = self.substation();
        let target_substation = self.substation();
        let circuit_voltage = NOMINAL_VOLTAGES
            .choose(&mut self.rng)
            .copied()
            .unwrap_or("132kV")
            .to_string();

        let sections = (1..=self.config.sections_per_circuit)
            .map(|n| self.section(n))
            .collect();

        Cable {
            circuit_id,
            circuit_name: self.letters(8),
            circuit_voltage,
            status,
            source_substation,
            target_substation,
            circuit_type: self.config.circuit_type.clone(),
            feeder_number: self.rng.gen_range(0..self.config.max_feeder_number),
            no_of_sections: self.config.sections_per_circuit,
            sections,
        }
    }

    fn substation(&mut self) -> Substation {
        Substation {
            adwh_id: self.rng.gen_range(0..self.config.max_substation_id),
            name: self.letters(3),
        }
    }

    fn section(&mut self, section_number: u32) -> Section {
        let mut sensors = Vec::with_capacity(SENSORS_PER_SECTION);
        for (phase, location) in PRESSURE_LAYOUT {
            let id = self.take_sensor_id();
            sensors.push(Sensor::pressure(id, phase, location));
        }
        for metric in AUXILIARY_LAYOUT {
            let id = self.take_sensor_id();
            sensors.push(Sensor::unplaced(id, metric));
        }
        Section {
            section_number,
            sensors,
        }
    }

    fn take_sensor_id(&mut self) -> u32 {
        let id = self.next_sensor_id;
        self.next_sensor_id += 1;
        id
    }

    fn letters(&mut self, len: usize) -> String {
        (0..len)
            .map(|_| char::from(LETTERS[self.rng.gen_range(0..LETTERS.len())]))
            .collect()
    }
}
