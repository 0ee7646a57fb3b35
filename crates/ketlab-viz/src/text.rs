//! Box-drawing text diagrams.
//!
//! Every qubit owns three character rows: the box top, the wire, and the box
//! bottom. The bottom row of one wire and the top row of the next are merged
//! into one shared row, so an `n`-qubit circuit prints `2n + 1` lines:
//!
//! ```text
//!      ┌───┐
//! q_0: ┤ H ├──■──
//!      ├───┤┌─┴─┐
//! q_1: ┤ H ├┤ X ├
//!      └───┘└───┘
//! ```
//!
//! Instructions are packed left to right into columns. An instruction goes
//! into the first column after every earlier instruction touching any wire
//! between its lowest and highest qubit, so vertical connectors never cross
//! another gate.

use std::fmt;

use rustc_hash::FxHashMap;

use ketlab_ir::{Circuit, Instruction, InstructionKind, QubitId};

const WIRE: char = '─';
const VERTICAL: char = '│';

/// What a single wire shows inside one column.
#[derive(Debug, Clone, PartialEq)]
enum Glyph {
    Box(String),
    Control,
    Swap,
    /// A vertical connector passing over an uninvolved wire.
    Cross,
    Barrier,
}

#[derive(Debug, Clone)]
struct Cell {
    glyph: Glyph,
    up: bool,
    down: bool,
}

impl Cell {
    fn new(glyph: Glyph) -> Self {
        Self {
            glyph,
            up: false,
            down: false,
        }
    }

    fn natural_width(&self) -> usize {
        match &self.glyph {
            Glyph::Box(label) => label.chars().count() + 4,
            _ => 3,
        }
    }

    /// Top, wire and bottom rows of this cell at `width` characters.
    fn render(&self, width: usize) -> [Vec<char>; 3] {
        let mut top = vec![' '; width];
        let mut mid = vec![WIRE; width];
        let mut bot = vec![' '; width];
        let c = width / 2;

        match &self.glyph {
            Glyph::Box(label) => {
                let label: Vec<char> = label.chars().collect();
                let bw = label.len() + 4;
                let left = c - bw / 2;
                let right = left + bw - 1;

                top[left] = '┌';
                bot[left] = '└';
                top[right] = '┐';
                bot[right] = '┘';
                for i in left + 1..right {
                    top[i] = WIRE;
                    bot[i] = WIRE;
                }
                mid[left] = '┤';
                mid[left + 1] = ' ';
                mid[left + 2..left + 2 + label.len()].copy_from_slice(&label);
                mid[right - 1] = ' ';
                mid[right] = '├';

                if self.up {
                    top[c] = '┴';
                }
                if self.down {
                    bot[c] = '┬';
                }
                return [top, mid, bot];
            }
            Glyph::Control => mid[c] = '■',
            Glyph::Swap => mid[c] = 'X',
            Glyph::Cross => mid[c] = '┼',
            Glyph::Barrier => {
                top[c] = '░';
                mid[c] = '░';
                bot[c] = '░';
                return [top, mid, bot];
            }
        }

        if self.up {
            top[c] = VERTICAL;
        }
        if self.down {
            bot[c] = VERTICAL;
        }
        [top, mid, bot]
    }
}

/// Join the bottom row of one wire with the top row of the wire below.
fn merge(upper: char, lower: char) -> char {
    match (upper, lower) {
        (a, b) if a == b => a,
        (' ', b) => b,
        (a, ' ') => a,
        ('└', '┌') => '├',
        ('┘', '┐') => '┤',
        ('┬', '┴') => '┼',
        ('┬', VERTICAL | WIRE) => '┬',
        (VERTICAL | WIRE, '┴') => '┴',
        ('└' | '┘', WIRE) => '┴',
        (WIRE, '┌' | '┐') => '┬',
        (_, b) => b,
    }
}

/// A rendered circuit diagram.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextDiagram {
    lines: Vec<String>,
}

impl TextDiagram {
    /// Lay out and render `circuit`.
    pub fn new(circuit: &Circuit) -> Self {
        let rows: FxHashMap<QubitId, usize> = circuit
            .qubits()
            .iter()
            .enumerate()
            .map(|(row, q)| (q.id, row))
            .collect();
        let num_rows = rows.len();
        if num_rows == 0 {
            return Self { lines: Vec::new() };
        }

        let columns = pack_columns(circuit, &rows, num_rows);

        let labels: Vec<String> = circuit.qubits().iter().map(|q| format!("{q}: ")).collect();
        let label_width = labels.iter().map(|l| l.chars().count()).max().unwrap_or(0);

        let mut top: Vec<Vec<char>> = vec![vec![' '; label_width]; num_rows];
        let mut mid: Vec<Vec<char>> = labels
            .iter()
            .map(|l| format!("{l:>label_width$}").chars().collect())
            .collect();
        let mut bot = top.clone();

        for column in &columns {
            let width = column
                .iter()
                .flatten()
                .map(Cell::natural_width)
                .max()
                .unwrap_or(3);
            for (row, cell) in column.iter().enumerate() {
                let [t, m, b] = match cell {
                    Some(cell) => cell.render(width),
                    None => [vec![' '; width], vec![WIRE; width], vec![' '; width]],
                };
                top[row].extend(t);
                mid[row].extend(m);
                bot[row].extend(b);
            }
        }

        let mut lines = Vec::with_capacity(2 * num_rows + 1);
        lines.push(top[0].iter().collect());
        for row in 0..num_rows {
            lines.push(mid[row].iter().collect());
            if row + 1 < num_rows {
                lines.push(
                    bot[row]
                        .iter()
                        .zip(&top[row + 1])
                        .map(|(&u, &l)| merge(u, l))
                        .collect(),
                );
            }
        }
        lines.push(bot[num_rows - 1].iter().collect());

        Self { lines }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }
}

impl fmt::Display for TextDiagram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.lines.join("\n"))
    }
}

/// Render `circuit` as a text diagram.
pub fn draw(circuit: &Circuit) -> String {
    TextDiagram::new(circuit).to_string()
}

type Column = Vec<Option<Cell>>;

fn pack_columns(circuit: &Circuit, rows: &FxHashMap<QubitId, usize>, num_rows: usize) -> Vec<Column> {
    let mut columns: Vec<Column> = Vec::new();
    let mut next_free = vec![0usize; num_rows];

    for inst in circuit.dag().operations() {
        let cells = cells_for(inst, rows);
        let (Some(lo), Some(hi)) = (
            cells.iter().map(|(r, _)| *r).min(),
            cells.iter().map(|(r, _)| *r).max(),
        ) else {
            continue;
        };

        let col = next_free[lo..=hi].iter().copied().max().unwrap_or(0);
        if col == columns.len() {
            columns.push(vec![None; num_rows]);
        }
        for free in &mut next_free[lo..=hi] {
            *free = col + 1;
        }
        for (row, cell) in cells {
            columns[col][row] = Some(cell);
        }
    }
    columns
}

/// Cells an instruction occupies, keyed by row, including connectors.
fn cells_for(inst: &Instruction, rows: &FxHashMap<QubitId, usize>) -> Vec<(usize, Cell)> {
    let operand_rows: Vec<usize> = inst.qubits.iter().filter_map(|q| rows.get(q).copied()).collect();

    let glyphs: Vec<Glyph> = match &inst.kind {
        InstructionKind::SaveStatevector => return Vec::new(),
        InstructionKind::Barrier => {
            return operand_rows
                .into_iter()
                .map(|r| (r, Cell::new(Glyph::Barrier)))
                .collect();
        }
        InstructionKind::Measure => {
            return operand_rows
                .into_iter()
                .map(|r| (r, Cell::new(Glyph::Box("M".into()))))
                .collect();
        }
        InstructionKind::Gate(gate) => {
            let controls = gate.kind.num_controls() as usize;
            match gate.display_label() {
                Some(label) => (0..operand_rows.len())
                    .map(|i| {
                        if i < controls {
                            Glyph::Control
                        } else {
                            Glyph::Box(label.clone())
                        }
                    })
                    .collect(),
                None if gate.name() == "swap" => vec![Glyph::Swap; operand_rows.len()],
                None => vec![Glyph::Control; operand_rows.len()],
            }
        }
    };

    let mut cells: Vec<(usize, Cell)> = operand_rows
        .iter()
        .copied()
        .zip(glyphs)
        .map(|(r, g)| (r, Cell::new(g)))
        .collect();

    if cells.len() > 1 {
        let lo = operand_rows.iter().copied().min().unwrap_or(0);
        let hi = operand_rows.iter().copied().max().unwrap_or(0);
        for r in lo + 1..hi {
            if !operand_rows.contains(&r) {
                cells.push((r, Cell::new(Glyph::Cross)));
            }
        }
        for (r, cell) in &mut cells {
            cell.up = *r > lo;
            cell.down = *r < hi;
        }
    }
    cells
}

#[cfg(test)]
mod tests {
    use super::*;
    use ketlab_ir::ClbitId;
    use std::f64::consts::FRAC_PI_2;

    fn q(i: u32) -> QubitId {
        QubitId(i)
    }

    #[test]
    fn test_hadamard_cx_diagram() {
        let circuit = Circuit::hadamard_cx().unwrap();
        let expected = [
            "     ┌───┐     ",
            "q_0: ┤ H ├──■──",
            "     ├───┤┌─┴─┐",
            "q_1: ┤ H ├┤ X ├",
            "     └───┘└───┘",
        ]
        .join("\n");
        assert_eq!(draw(&circuit), expected);
    }

    #[test]
    fn test_save_statevector_is_not_drawn() {
        let mut circuit = Circuit::hadamard_cx().unwrap();
        let before = draw(&circuit);
        circuit.save_statevector().unwrap();
        assert_eq!(draw(&circuit), before);
    }

    #[test]
    fn test_control_below_target() {
        let mut circuit = Circuit::with_size("rev", 2, 0);
        circuit.cx(q(1), q(0)).unwrap();
        let expected = [
            "     ┌───┐",
            "q_0: ┤ X ├",
            "     └─┬─┘",
            "q_1: ──■──",
            "          ",
        ]
        .join("\n");
        assert_eq!(draw(&circuit), expected);
    }

    #[test]
    fn test_connector_crosses_idle_wire() {
        let mut circuit = Circuit::with_size("span", 3, 0);
        circuit.cx(q(0), q(2)).unwrap();
        let diagram = TextDiagram::new(&circuit);
        assert_eq!(diagram.lines()[1], "q_0: ──■──");
        assert_eq!(diagram.lines()[2], "       │  ");
        assert_eq!(diagram.lines()[3], "q_1: ──┼──");
        assert_eq!(diagram.lines()[4], "     ┌─┴─┐");
        assert_eq!(diagram.lines()[5], "q_2: ┤ X ├");
    }

    #[test]
    fn test_crossed_wire_cannot_share_column() {
        let mut circuit = Circuit::with_size("span", 3, 0);
        circuit.cx(q(0), q(2)).unwrap();
        circuit.h(q(1)).unwrap();
        let diagram = TextDiagram::new(&circuit);
        assert_eq!(diagram.lines()[3], "q_1: ──┼──┤ H ├");
    }

    #[test]
    fn test_disjoint_gates_share_column() {
        let mut circuit = Circuit::with_size("pack", 3, 0);
        circuit.h(q(0)).unwrap();
        circuit.cz(q(1), q(2)).unwrap();
        let diagram = TextDiagram::new(&circuit);
        assert_eq!(diagram.lines()[1], "q_0: ┤ H ├");
        assert_eq!(diagram.lines()[3], "q_1: ──■──");
        assert_eq!(diagram.lines()[4], "       │  ");
        assert_eq!(diagram.lines()[5], "q_2: ──■──");
    }

    #[test]
    fn test_wide_label_centers_controls() {
        let mut circuit = Circuit::with_size("rot", 2, 0);
        circuit.cp(FRAC_PI_2, q(0), q(1)).unwrap();
        let diagram = TextDiagram::new(&circuit);
        assert_eq!(diagram.lines()[1], "q_0: ─────■────");
        assert_eq!(diagram.lines()[2], "     ┌────┴───┐");
        assert_eq!(diagram.lines()[3], "q_1: ┤ P(π/2) ├");
    }

    #[test]
    fn test_swap_and_barrier_and_measure() {
        let mut circuit = Circuit::with_size("misc", 2, 2);
        circuit.swap(q(0), q(1)).unwrap();
        circuit.barrier_all().unwrap();
        circuit.measure(q(0), ClbitId(0)).unwrap();
        let diagram = TextDiagram::new(&circuit);
        let pad = "     ";
        assert_eq!(diagram.lines()[0], format!("{pad}   {}┌───┐", " ░ "));
        assert_eq!(diagram.lines()[1], "q_0: ─X──░─┤ M ├");
        assert_eq!(diagram.lines()[2], format!("{pad} │ {}└───┘", " ░ "));
        assert_eq!(diagram.lines()[3], "q_1: ─X──░──────");
    }

    #[test]
    fn test_register_labels_are_right_aligned() {
        let mut circuit = Circuit::new("regs");
        let anc = circuit.add_register("anc", 1);
        circuit.add_register("q", 1);
        circuit.x(anc[0]).unwrap();
        let diagram = TextDiagram::new(&circuit);
        assert_eq!(diagram.lines()[1], "anc_0: ┤ X ├");
        assert_eq!(diagram.lines()[3], "  q_0: ─────");
    }

    #[test]
    fn test_empty_circuit() {
        assert_eq!(draw(&Circuit::new("empty")), "");
        let lines = TextDiagram::new(&Circuit::with_size("idle", 1, 0)).lines().to_vec();
        assert_eq!(lines, vec!["     ", "q_0: ", "     "]);
    }
}
