//! Circuit builder.

use crate::dag::CircuitDag;
use crate::error::IrResult;
use crate::gate::{Gate, StandardGate};
use crate::instruction::Instruction;
use crate::qubit::{ClbitId, Qubit, QubitId};

/// A named circuit over a growing set of qubits and classical bits.
///
/// Gate methods return `&mut Self` so calls chain with `?`:
///
/// ```rust
/// use ketlab_ir::{Circuit, QubitId};
///
/// let mut circuit = Circuit::with_size("pair", 2, 0);
/// circuit.h(QubitId(0))?.cx(QubitId(0), QubitId(1))?;
/// assert_eq!(circuit.depth(), 2);
/// # Ok::<(), ketlab_ir::IrError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Circuit {
    name: String,
    qubits: Vec<Qubit>,
    num_clbits: u32,
    dag: CircuitDag,
}

macro_rules! fixed_gates {
    ($($(#[$doc:meta])* $method:ident => $gate:ident ( $($q:ident),+ );)*) => {
        $(
            $(#[$doc])*
            pub fn $method(&mut self, $($q: QubitId),+) -> IrResult<&mut Self> {
                self.push(Instruction::gate(StandardGate::$gate, [$($q),+]))
            }
        )*
    };
}

macro_rules! angle_gates {
    ($($(#[$doc:meta])* $method:ident => $gate:ident ( $($q:ident),+ );)*) => {
        $(
            $(#[$doc])*
            pub fn $method(&mut self, theta: f64, $($q: QubitId),+) -> IrResult<&mut Self> {
                self.push(Instruction::gate(StandardGate::$gate(theta), [$($q),+]))
            }
        )*
    };
}

impl Circuit {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            qubits: Vec::new(),
            num_clbits: 0,
            dag: CircuitDag::new(),
        }
    }

    /// A circuit with qubits `q_0..q_{n-1}` and `num_clbits` classical bits.
    pub fn with_size(name: impl Into<String>, num_qubits: u32, num_clbits: u32) -> Self {
        let mut circuit = Self::new(name);
        for _ in 0..num_qubits {
            circuit.add_qubit();
        }
        for _ in 0..num_clbits {
            circuit.add_clbit();
        }
        circuit
    }

    fn next_qubit(&self) -> QubitId {
        QubitId(self.qubits.len() as u32)
    }

    pub fn add_qubit(&mut self) -> QubitId {
        let id = self.next_qubit();
        self.qubits.push(Qubit::new(id));
        self.dag.add_qubit(id);
        id
    }

    /// Add `size` qubits labelled `{name}_0`, `{name}_1`, ...
    pub fn add_register(&mut self, name: &str, size: u32) -> Vec<QubitId> {
        (0..size)
            .map(|offset| {
                let id = self.next_qubit();
                self.qubits.push(Qubit::in_register(id, name, offset));
                self.dag.add_qubit(id);
                id
            })
            .collect()
    }

    pub fn add_clbit(&mut self) -> ClbitId {
        let id = ClbitId(self.num_clbits);
        self.num_clbits += 1;
        self.dag.add_clbit(id);
        id
    }

    fn push(&mut self, instruction: Instruction) -> IrResult<&mut Self> {
        self.dag.apply(instruction)?;
        Ok(self)
    }

    fn all_qubits(&self) -> Vec<QubitId> {
        self.qubits.iter().map(|q| q.id).collect()
    }

    fixed_gates! {
        /// Identity.
        id => I(qubit);
        /// Hadamard.
        h => H(qubit);
        x => X(qubit);
        y => Y(qubit);
        z => Z(qubit);
        s => S(qubit);
        sdg => Sdg(qubit);
        t => T(qubit);
        tdg => Tdg(qubit);
        /// Square root of X.
        sx => SX(qubit);
        /// Controlled-NOT.
        cx => CX(control, target);
        cy => CY(control, target);
        cz => CZ(control, target);
        ch => CH(control, target);
        swap => Swap(q1, q2);
        /// Toffoli.
        ccx => CCX(c1, c2, target);
    }

    angle_gates! {
        rx => Rx(qubit);
        ry => Ry(qubit);
        rz => Rz(qubit);
        /// Phase gate `diag(1, e^{iθ})`.
        p => P(qubit);
        /// Controlled phase.
        cp => CP(control, target);
    }

    /// Apply any gate, e.g. one carrying a custom label.
    pub fn gate(
        &mut self,
        gate: impl Into<Gate>,
        qubits: impl IntoIterator<Item = QubitId>,
    ) -> IrResult<&mut Self> {
        self.push(Instruction::gate(gate, qubits))
    }

    pub fn measure(&mut self, qubit: QubitId, clbit: ClbitId) -> IrResult<&mut Self> {
        self.push(Instruction::measure(qubit, clbit))
    }

    /// Measure qubit `k` into clbit `k` for every qubit, adding clbits as needed.
    pub fn measure_all(&mut self) -> IrResult<&mut Self> {
        while (self.num_clbits as usize) < self.qubits.len() {
            self.add_clbit();
        }
        let qubits = self.all_qubits();
        let clbits = (0..qubits.len() as u32).map(ClbitId);
        self.push(Instruction::measure_many(qubits, clbits)?)
    }

    pub fn barrier_all(&mut self) -> IrResult<&mut Self> {
        self.push(Instruction::barrier(self.all_qubits()))
    }

    /// Ask the simulator to keep the statevector reached at this point.
    pub fn save_statevector(&mut self) -> IrResult<&mut Self> {
        self.push(Instruction::save_statevector(self.all_qubits()))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn num_qubits(&self) -> usize {
        self.qubits.len()
    }

    pub fn num_clbits(&self) -> usize {
        self.num_clbits as usize
    }

    pub fn depth(&self) -> usize {
        self.dag.depth()
    }

    pub fn dag(&self) -> &CircuitDag {
        &self.dag
    }

    /// Qubits in index order, with their display labels.
    pub fn qubits(&self) -> &[Qubit] {
        &self.qubits
    }

    pub fn has_measurements(&self) -> bool {
        self.dag.operations().any(Instruction::is_measure)
    }

    /// `H` on both qubits of a two-qubit register, then `CX(0, 1)`.
    ///
    /// The CX acts on `|++⟩`, which it leaves unchanged, so the final state is
    /// the uniform superposition with every amplitude equal to 1/2.
    pub fn hadamard_cx() -> IrResult<Self> {
        let (q0, q1) = (QubitId(0), QubitId(1));
        let mut circuit = Self::with_size("hadamard_cx", 2, 0);
        circuit.h(q0)?.h(q1)?.cx(q0, q1)?;
        Ok(circuit)
    }

    /// Measured Bell pair.
    pub fn bell() -> IrResult<Self> {
        let (q0, q1) = (QubitId(0), QubitId(1));
        let mut circuit = Self::with_size("bell", 2, 2);
        circuit.h(q0)?.cx(q0, q1)?.measure_all()?;
        Ok(circuit)
    }

    /// Measured `n`-qubit GHZ state.
    pub fn ghz(n: u32) -> IrResult<Self> {
        let mut circuit = Self::with_size("ghz", n, n);
        if n == 0 {
            return Ok(circuit);
        }
        circuit.h(QubitId(0))?;
        for i in 1..n {
            circuit.cx(QubitId(i - 1), QubitId(i))?;
        }
        circuit.measure_all()?;
        Ok(circuit)
    }
}
