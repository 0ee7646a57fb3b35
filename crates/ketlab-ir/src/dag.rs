//! Dependency graph of circuit operations.

use petgraph::Direction;
use petgraph::graph::{DiGraph, NodeIndex as PetNodeIndex};
use petgraph::visit::EdgeRef;
use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};

use crate::error::{IrError, IrResult};
use crate::instruction::Instruction;
use crate::qubit::{ClbitId, QubitId};

pub type NodeIndex = PetNodeIndex<u32>;

/// A qubit or classical wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WireId {
    Qubit(QubitId),
    Clbit(ClbitId),
}

/// Operations linked by the wires they share.
///
/// Every node is an [`Instruction`]. An edge `a -> b` labelled with a wire
/// means `b` is the next operation on that wire after `a`. Nodes are only
/// ever appended and edges always point from an older node to a newer one,
/// so node index order is a topological order.
#[derive(Debug, Clone, Default)]
pub struct CircuitDag {
    graph: DiGraph<Instruction, WireId, u32>,
    qubits: FxHashSet<QubitId>,
    clbits: FxHashSet<ClbitId>,
    /// Most recent operation on each wire that has one.
    frontier: FxHashMap<WireId, NodeIndex>,
}

impl CircuitDag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a qubit wire. Registering it twice is a no-op.
    pub fn add_qubit(&mut self, qubit: QubitId) {
        self.qubits.insert(qubit);
    }

    /// Register a classical wire. Registering it twice is a no-op.
    pub fn add_clbit(&mut self, clbit: ClbitId) {
        self.clbits.insert(clbit);
    }

    fn check_operands(&self, inst: &Instruction) -> IrResult<()> {
        let operation = || inst.name().to_string();

        if let Some(gate) = inst.as_gate() {
            let expected = gate.num_qubits() as usize;
            if inst.qubits.len() != expected {
                return Err(IrError::WrongArity {
                    operation: operation(),
                    expected,
                    got: inst.qubits.len(),
                });
            }
        }

        let mut seen = FxHashSet::default();
        for &qubit in &inst.qubits {
            if !self.qubits.contains(&qubit) {
                return Err(IrError::UnknownQubit {
                    operation: operation(),
                    qubit,
                });
            }
            if !seen.insert(qubit) {
                return Err(IrError::RepeatedQubit {
                    operation: operation(),
                    qubit,
                });
            }
        }

        if let Some(&clbit) = inst.clbits.iter().find(|c| !self.clbits.contains(c)) {
            return Err(IrError::UnknownClbit {
                operation: operation(),
                clbit,
            });
        }
        Ok(())
    }

    /// Append an instruction after everything already on its wires.
    ///
    /// Nothing is added when an operand is unknown, repeated, or the gate's
    /// arity does not match.
    pub fn apply(&mut self, instruction: Instruction) -> IrResult<NodeIndex> {
        self.check_operands(&instruction)?;

        let wires: Vec<WireId> = instruction
            .qubits
            .iter()
            .map(|&q| WireId::Qubit(q))
            .chain(instruction.clbits.iter().map(|&c| WireId::Clbit(c)))
            .collect();

        let node = self.graph.add_node(instruction);
        for wire in wires {
            if let Some(prev) = self.frontier.insert(wire, node) {
                self.graph.add_edge(prev, node, wire);
            }
        }
        Ok(node)
    }

    /// Operations in the order they were applied.
    pub fn operations(&self) -> impl Iterator<Item = &Instruction> {
        self.graph.node_weights()
    }

    pub fn get(&self, node: NodeIndex) -> Option<&Instruction> {
        self.graph.node_weight(node)
    }

    /// 1-based layer of every node: one past the deepest operation it waits on.
    fn levels(&self) -> Vec<usize> {
        let mut levels = vec![0usize; self.graph.node_count()];
        for node in self.graph.node_indices() {
            let deepest = self
                .graph
                .edges_directed(node, Direction::Incoming)
                .map(|e| levels[e.source().index()])
                .max()
                .unwrap_or(0);
            levels[node.index()] = deepest + 1;
        }
        levels
    }

    /// Operations grouped into layers that could run simultaneously
    /// (as-soon-as-possible scheduling). Application order is kept inside a layer.
    pub fn layers(&self) -> Vec<Vec<&Instruction>> {
        let levels = self.levels();
        let mut layers: Vec<Vec<&Instruction>> = vec![Vec::new(); max_level(&levels)];
        for (node, inst) in self.graph.node_indices().zip(self.graph.node_weights()) {
            layers[levels[node.index()] - 1].push(inst);
        }
        layers
    }

    /// Number of layers.
    pub fn depth(&self) -> usize {
        max_level(&self.levels())
    }

    pub fn num_ops(&self) -> usize {
        self.graph.node_count()
    }

    pub fn num_qubits(&self) -> usize {
        self.qubits.len()
    }

    pub fn num_clbits(&self) -> usize {
        self.clbits.len()
    }

    /// Registered qubits, ascending.
    pub fn qubits(&self) -> Vec<QubitId> {
        let mut qubits: Vec<_> = self.qubits.iter().copied().collect();
        qubits.sort_unstable();
        qubits
    }

    pub fn graph(&self) -> &DiGraph<Instruction, WireId, u32> {
        &self.graph
    }

    /// Check the graph invariants: every edge points forward, every edge is
    /// labelled with a wire both ends touch, and no node has two predecessors
    /// on the same wire.
    pub fn verify_integrity(&self) -> IrResult<()> {
        for edge in self.graph.edge_references() {
            let (from, to) = (edge.source(), edge.target());
            if from >= to {
                return Err(IrError::MalformedGraph(format!(
                    "edge {} -> {} points backwards",
                    from.index(),
                    to.index()
                )));
            }
            let wire = *edge.weight();
            if !touches(&self.graph[from], wire) || !touches(&self.graph[to], wire) {
                return Err(IrError::MalformedGraph(format!(
                    "edge {} -> {} carries {wire:?}, which one end does not use",
                    from.index(),
                    to.index()
                )));
            }
        }

        for node in self.graph.node_indices() {
            let mut incoming = FxHashSet::default();
            for edge in self.graph.edges_directed(node, Direction::Incoming) {
                if !incoming.insert(*edge.weight()) {
                    return Err(IrError::MalformedGraph(format!(
                        "node {} has two predecessors on {:?}",
                        node.index(),
                        edge.weight()
                    )));
                }
            }
        }
        Ok(())
    }
}

fn max_level(levels: &[usize]) -> usize {
    levels.iter().copied().max().unwrap_or(0)
}

fn touches(inst: &Instruction, wire: WireId) -> bool {
    match wire {
        WireId::Qubit(q) => inst.qubits.contains(&q),
        WireId::Clbit(c) => inst.clbits.contains(&c),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gate::StandardGate;

    fn dag(num_qubits: u32, num_clbits: u32) -> CircuitDag {
        let mut dag = CircuitDag::new();
        (0..num_qubits).for_each(|q| dag.add_qubit(QubitId(q)));
        (0..num_clbits).for_each(|c| dag.add_clbit(ClbitId(c)));
        dag
    }

    fn gate(g: StandardGate, qubits: &[u32]) -> Instruction {
        Instruction::gate(g, qubits.iter().map(|&q| QubitId(q)))
    }

    #[test]
    fn test_empty_dag() {
        let dag = CircuitDag::new();
        assert_eq!(dag.num_ops(), 0);
        assert_eq!(dag.depth(), 0);
        assert!(dag.layers().is_empty());
    }

    #[test]
    fn test_hadamards_share_a_layer() {
        let mut dag = dag(2, 0);
        dag.apply(gate(StandardGate::H, &[0])).unwrap();
        dag.apply(gate(StandardGate::H, &[1])).unwrap();
        let cx = dag.apply(gate(StandardGate::CX, &[0, 1])).unwrap();

        let layers = dag.layers();
        assert_eq!(layers.len(), 2);
        assert_eq!(layers[0].len(), 2);
        assert_eq!(layers[1][0].name(), "cx");
        assert_eq!(dag.graph().edges_directed(cx, Direction::Incoming).count(), 2);
    }

    #[test]
    fn test_operations_keep_application_order() {
        let mut dag = dag(3, 0);
        dag.apply(gate(StandardGate::X, &[2])).unwrap();
        dag.apply(gate(StandardGate::H, &[0])).unwrap();
        dag.apply(gate(StandardGate::Z, &[1])).unwrap();

        let names: Vec<_> = dag.operations().map(Instruction::name).collect();
        assert_eq!(names, ["x", "h", "z"]);
    }

    #[test]
    fn test_rejected_operands_leave_no_trace() {
        let mut dag = dag(2, 1);

        let err = dag.apply(gate(StandardGate::CX, &[0])).unwrap_err();
        assert!(matches!(err, IrError::WrongArity { expected: 2, got: 1, .. }));

        let err = dag.apply(gate(StandardGate::CX, &[0, 9])).unwrap_err();
        assert_eq!(err.to_string(), "cx: qubit q_9 is not part of the circuit");

        let err = dag.apply(gate(StandardGate::Swap, &[1, 1])).unwrap_err();
        assert!(matches!(err, IrError::RepeatedQubit { qubit: QubitId(1), .. }));

        let err = dag.apply(Instruction::measure(QubitId(0), ClbitId(4))).unwrap_err();
        assert!(matches!(err, IrError::UnknownClbit { clbit: ClbitId(4), .. }));

        assert_eq!(dag.num_ops(), 0);
    }

    #[test]
    fn test_measurement_links_classical_wire() {
        let mut dag = dag(2, 1);
        dag.apply(gate(StandardGate::H, &[0])).unwrap();
        dag.apply(Instruction::measure(QubitId(0), ClbitId(0))).unwrap();
        dag.apply(Instruction::measure(QubitId(1), ClbitId(0))).unwrap();

        assert_eq!(dag.depth(), 3);
        dag.verify_integrity().unwrap();
    }

    #[test]
    fn test_lookup_by_node() {
        let mut dag = dag(1, 0);
        let node = dag.apply(gate(StandardGate::T, &[0])).unwrap();
        assert_eq!(dag.get(node).map(Instruction::name), Some("t"));
        assert_eq!(dag.qubits(), vec![QubitId(0)]);
    }
}
