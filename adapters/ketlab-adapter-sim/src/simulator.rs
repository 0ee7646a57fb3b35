//! Simulator backend implementation.

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Instant;

use async_trait::async_trait;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rustc_hash::{FxHashMap, FxHashSet};
use tracing::{debug, instrument};
use uuid::Uuid;

use ketlab_hal::{
    Backend, BackendAvailability, BackendConfig, BackendFactory, Capabilities, Counts,
    ExecutionResult, HalError, HalResult, JobId, JobRecord, JobStatus, ValidationResult,
};
use ketlab_ir::{Circuit, ClbitId, Instruction, QubitId};

use crate::state::QuantumState;

/// Qubit limit used when the config does not set `max_qubits`.
pub const DEFAULT_MAX_QUBITS: u32 = 20;

/// Local statevector simulator.
///
/// Jobs run to completion inside [`Backend::submit`]; `status` therefore
/// reports `Completed` as soon as the id is returned.
pub struct SimulatorBackend {
    config: BackendConfig,
    capabilities: Capabilities,
    jobs: Arc<Mutex<FxHashMap<String, JobRecord>>>,
    seed: Option<u64>,
}

impl SimulatorBackend {
    pub fn new() -> Self {
        Self::with_max_qubits(DEFAULT_MAX_QUBITS)
    }

    /// Create a simulator limited to `max_qubits`.
    pub fn with_max_qubits(max_qubits: u32) -> Self {
        Self {
            config: BackendConfig::new("simulator"),
            capabilities: Capabilities::simulator(max_qubits),
            jobs: Arc::new(Mutex::new(FxHashMap::default())),
            seed: None,
        }
    }

    /// Fix the sampling seed so measurement counts are reproducible.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }

    #[instrument(skip(self, circuit), fields(qubits = circuit.num_qubits()))]
    fn run_simulation(&self, circuit: &Circuit, shots: u32) -> HalResult<ExecutionResult> {
        let start = Instant::now();

        let mut state = QuantumState::new(circuit.num_qubits());
        let mut saved = None;
        let mut measured: Vec<(QubitId, ClbitId)> = Vec::new();

        for inst in circuit.dag().operations() {
            if inst.is_save_statevector() {
                saved = Some(state.to_statevector()?);
            } else if inst.is_measure() {
                measured.extend(inst.qubits.iter().copied().zip(inst.clbits.iter().copied()));
            } else {
                state.apply(inst);
            }
        }

        let counts = if measured.is_empty() {
            Counts::new()
        } else {
            let mut rng = self.rng();
            state
                .sample(shots, &mut rng)
                .into_iter()
                .map(|outcome| (outcome_to_bitstring(outcome, &measured, circuit.num_clbits()), 1))
                .collect()
        };

        let elapsed = start.elapsed();
        debug!(?elapsed, saved = saved.is_some(), "simulation finished");

        let mut result = ExecutionResult::new(counts, shots)
            .with_execution_time(u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX));
        if let Some(sv) = saved {
            result = result.with_statevector(sv);
        }
        Ok(result)
    }

    fn lock_jobs(&self) -> std::sync::MutexGuard<'_, FxHashMap<String, JobRecord>> {
        self.jobs.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for SimulatorBackend {
    fn default() -> Self {
        Self::new()
    }
}

/// Render a sampled basis index as a classical register value.
///
/// Clbit 0 is the rightmost character; unmeasured clbits read `0`.
fn outcome_to_bitstring(outcome: usize, measured: &[(QubitId, ClbitId)], num_clbits: usize) -> String {
    let mut bits = vec!['0'; num_clbits];
    for (qubit, clbit) in measured {
        let value = (outcome >> qubit.index()) & 1;
        bits[num_clbits - 1 - clbit.0 as usize] = if value == 1 { '1' } else { '0' };
    }
    bits.into_iter().collect()
}

/// Gates acting on a qubit after it was measured.
fn mid_circuit_measurements(circuit: &Circuit) -> Vec<String> {
    let mut measured: FxHashSet<QubitId> = FxHashSet::default();
    let mut problems = Vec::new();
    for inst in circuit.dag().operations() {
        if inst.is_measure() {
            measured.extend(inst.qubits.iter().copied());
        } else if inst.is_gate() {
            if let Some(q) = inst.qubits.iter().find(|q| measured.contains(q)) {
                problems.push(format!("gate '{}' acts on {q} after it was measured", inst.name()));
            }
        }
    }
    problems
}

#[async_trait]
impl Backend for SimulatorBackend {
    fn name(&self) -> &str {
        &self.config.name
    }

    fn capabilities(&self) -> &Capabilities {
        &self.capabilities
    }

    async fn availability(&self) -> HalResult<BackendAvailability> {
        Ok(BackendAvailability::always_available())
    }

    async fn validate(&self, circuit: &Circuit) -> HalResult<ValidationResult> {
        let caps = &self.capabilities;
        let mut reasons = Vec::new();

        if circuit.num_qubits() > caps.num_qubits as usize {
            reasons.push(format!(
                "circuit has {} qubits but the simulator supports {}",
                circuit.num_qubits(),
                caps.num_qubits
            ));
        }

        let unsupported: FxHashSet<&str> = circuit
            .dag()
            .operations()
            .filter_map(Instruction::as_gate)
            .map(|gate| gate.name())
            .filter(|name| !caps.gate_set.contains(name))
            .collect();
        let mut unsupported: Vec<_> = unsupported.into_iter().collect();
        unsupported.sort_unstable();
        reasons.extend(unsupported.into_iter().map(|g| format!("unsupported gate '{g}'")));

        reasons.extend(mid_circuit_measurements(circuit));

        if reasons.is_empty() {
            Ok(ValidationResult::Valid)
        } else {
            Ok(ValidationResult::Invalid { reasons })
        }
    }

    #[instrument(skip(self, circuit), fields(circuit = circuit.name()))]
    async fn submit(&self, circuit: &Circuit, shots: u32) -> HalResult<JobId> {
        if circuit.num_qubits() > self.capabilities.num_qubits as usize {
            return Err(HalError::CircuitTooLarge(format!(
                "circuit has {} qubits but the simulator supports {}",
                circuit.num_qubits(),
                self.capabilities.num_qubits
            )));
        }
        if shots > self.capabilities.max_shots {
            return Err(HalError::InvalidShots(format!(
                "{shots} exceeds the maximum of {}",
                self.capabilities.max_shots
            )));
        }
        if circuit.has_measurements() && shots == 0 {
            return Err(HalError::InvalidShots(
                "a circuit with measurements needs at least one shot".into(),
            ));
        }
        if let ValidationResult::Invalid { reasons } = self.validate(circuit).await? {
            return Err(HalError::InvalidCircuit(reasons.join("; ")));
        }

        let job_id = JobId::new(Uuid::new_v4().to_string());
        let record = JobRecord::settled(job_id.clone(), shots, self.run_simulation(circuit, shots));
        debug!(%job_id, shots, status = %record.status(), "job settled");

        self.lock_jobs().insert(job_id.0.clone(), record);
        Ok(job_id)
    }

    async fn status(&self, job_id: &JobId) -> HalResult<JobStatus> {
        self.lock_jobs()
            .get(&job_id.0)
            .map(|record| record.status().clone())
            .ok_or_else(|| HalError::JobNotFound(job_id.0.clone()))
    }

    async fn result(&self, job_id: &JobId) -> HalResult<ExecutionResult> {
        self.lock_jobs()
            .get(&job_id.0)
            .ok_or_else(|| HalError::JobNotFound(job_id.0.clone()))?
            .result()
    }

    async fn cancel(&self, job_id: &JobId) -> HalResult<()> {
        let mut jobs = self.lock_jobs();
        jobs.get_mut(&job_id.0)
            .ok_or_else(|| HalError::JobNotFound(job_id.0.clone()))?
            .cancel();
        Ok(())
    }
}

impl BackendFactory for SimulatorBackend {
    fn from_config(config: BackendConfig) -> HalResult<Self> {
        let max_qubits = match config.get_u64("max_qubits") {
            None => DEFAULT_MAX_QUBITS,
            Some(n) => u32::try_from(n)
                .ok()
                .filter(|&n| (1..=30).contains(&n))
                .ok_or_else(|| {
                    HalError::Configuration(format!("max_qubits must be between 1 and 30, got {n}"))
                })?,
        };
        let seed = config.get_u64("seed");

        Ok(Self {
            capabilities: Capabilities::simulator(max_qubits),
            config,
            jobs: Arc::new(Mutex::new(FxHashMap::default())),
            seed,
        })
    }
}
