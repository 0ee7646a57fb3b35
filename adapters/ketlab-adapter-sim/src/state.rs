//! Dense statevector evolution.

use std::f64::consts::{FRAC_1_SQRT_2, FRAC_PI_4};

use num_complex::Complex64;
use rand::Rng;

use ketlab_hal::{HalResult, Statevector};
use ketlab_ir::{Instruction, InstructionKind, StandardGate};

type Matrix2 = [[Complex64; 2]; 2];

const ZERO: Complex64 = Complex64::new(0.0, 0.0);
const ONE: Complex64 = Complex64::new(1.0, 0.0);
const I: Complex64 = Complex64::new(0.0, 1.0);

/// Amplitudes of an `n`-qubit register, starting in `|0…0⟩`.
///
/// Basis index bit `k` holds qubit `k`.
#[derive(Debug, Clone)]
pub struct QuantumState {
    amplitudes: Vec<Complex64>,
    num_qubits: usize,
}

impl QuantumState {
    pub fn new(num_qubits: usize) -> Self {
        let mut amplitudes = vec![ZERO; 1 << num_qubits];
        amplitudes[0] = ONE;
        Self {
            amplitudes,
            num_qubits,
        }
    }

    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    pub fn amplitudes(&self) -> &[Complex64] {
        &self.amplitudes
    }

    /// Snapshot the current amplitudes.
    pub fn to_statevector(&self) -> HalResult<Statevector> {
        Statevector::new(self.amplitudes.clone())
    }

    /// Apply one instruction. Only gates change the state.
    pub fn apply(&mut self, instruction: &Instruction) {
        let InstructionKind::Gate(gate) = &instruction.kind else {
            return;
        };
        let qubits: Vec<usize> = instruction.qubits.iter().map(|q| q.index()).collect();
        self.apply_gate(&gate.kind, &qubits);
    }

    fn apply_gate(&mut self, gate: &StandardGate, qubits: &[usize]) {
        if let StandardGate::Swap = gate {
            self.swap(qubits[0], qubits[1]);
            return;
        }

        let Some(matrix) = target_matrix(gate) else {
            return;
        };
        let controls = gate.num_controls() as usize;
        let control_mask = qubits[..controls]
            .iter()
            .fold(0usize, |mask, &q| mask | (1 << q));
        self.apply_matrix(control_mask, qubits[controls], &matrix);
    }

    /// Apply `m` to `target` on every basis pair whose control bits are all set.
    fn apply_matrix(&mut self, control_mask: usize, target: usize, m: &Matrix2) {
        let target_mask = 1 << target;
        for i in 0..self.amplitudes.len() {
            if i & target_mask != 0 || i & control_mask != control_mask {
                continue;
            }
            let j = i | target_mask;
            let a = self.amplitudes[i];
            let b = self.amplitudes[j];
            self.amplitudes[i] = m[0][0] * a + m[0][1] * b;
            self.amplitudes[j] = m[1][0] * a + m[1][1] * b;
        }
    }

    fn swap(&mut self, q1: usize, q2: usize) {
        let (m1, m2) = (1 << q1, 1 << q2);
        for i in 0..self.amplitudes.len() {
            if i & m1 != 0 && i & m2 == 0 {
                self.amplitudes.swap(i, (i & !m1) | m2);
            }
        }
    }

    /// Measurement probability per basis index.
    pub fn probabilities(&self) -> Vec<f64> {
        self.amplitudes.iter().map(Complex64::norm_sqr).collect()
    }

    /// Draw `shots` basis indices from the Born distribution.
    pub fn sample<R: Rng + ?Sized>(&self, shots: u32, rng: &mut R) -> Vec<usize> {
        let mut cumulative = Vec::with_capacity(self.amplitudes.len());
        let mut total = 0.0;
        for p in self.probabilities() {
            total += p;
            cumulative.push(total);
        }

        let last = self.amplitudes.len() - 1;
        (0..shots)
            .map(|_| {
                let r: f64 = rng.r#gen::<f64>() * total;
                cumulative.partition_point(|&c| c <= r).min(last)
            })
            .collect()
    }
}

/// The single-qubit matrix a gate applies to its target qubit.
///
/// Controlled gates return the matrix applied when every control is set.
fn target_matrix(gate: &StandardGate) -> Option<Matrix2> {
    let diag = |phase: f64| [[ONE, ZERO], [ZERO, Complex64::from_polar(1.0, phase)]];
    let h = Complex64::new(FRAC_1_SQRT_2, 0.0);

    let m = match *gate {
        StandardGate::I => [[ONE, ZERO], [ZERO, ONE]],
        StandardGate::X | StandardGate::CX | StandardGate::CCX => [[ZERO, ONE], [ONE, ZERO]],
        StandardGate::Y | StandardGate::CY => [[ZERO, -I], [I, ZERO]],
        StandardGate::Z | StandardGate::CZ => [[ONE, ZERO], [ZERO, -ONE]],
        StandardGate::H | StandardGate::CH => [[h, h], [h, -h]],
        StandardGate::S => [[ONE, ZERO], [ZERO, I]],
        StandardGate::Sdg => [[ONE, ZERO], [ZERO, -I]],
        StandardGate::T => diag(FRAC_PI_4),
        StandardGate::Tdg => diag(-FRAC_PI_4),
        StandardGate::SX => {
            let p = Complex64::new(0.5, 0.5);
            let q = Complex64::new(0.5, -0.5);
            [[p, q], [q, p]]
        }
        StandardGate::Rx(theta) => {
            let c = Complex64::new((theta / 2.0).cos(), 0.0);
            let s = Complex64::new(0.0, -(theta / 2.0).sin());
            [[c, s], [s, c]]
        }
        StandardGate::Ry(theta) => {
            let c = Complex64::new((theta / 2.0).cos(), 0.0);
            let s = Complex64::new((theta / 2.0).sin(), 0.0);
            [[c, -s], [s, c]]
        }
        StandardGate::Rz(theta) => [
            [Complex64::from_polar(1.0, -theta / 2.0), ZERO],
            [ZERO, Complex64::from_polar(1.0, theta / 2.0)],
        ],
        StandardGate::P(theta) | StandardGate::CP(theta) => diag(theta),
        StandardGate::Swap => return None,
    };
    Some(m)
}
