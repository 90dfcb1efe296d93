//! Preset generators: pure functions from parameters to configuration.
//!
//! Each preset emits the symbols, topology, and output width for a
//! named puzzle family. The engine itself only ever consumes the
//! topology string; nothing here is privileged.

use crate::error::ConfigError;

/// Configuration bundle produced by a preset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresetConfig {
    /// Alphabet string for `symbols`.
    pub symbols: String,
    /// Topology description for `topology`.
    pub topology: String,
    /// Output wrap width in cells.
    pub columns: usize,
}

fn digit_symbols(side: usize) -> String {
    let mut out = String::from(".");
    for v in 1..=side {
        out.push(' ');
        out.push_str(&v.to_string());
    }
    out
}

fn grid_topology(side: usize, cell_names: impl Fn(usize, usize) -> Vec<String>) -> String {
    let mut rows = Vec::with_capacity(side);
    for r in 0..side {
        let mut specs = Vec::with_capacity(side);
        for c in 0..side {
            let mut names = cell_names(r, c);
            names.sort_unstable();
            specs.push(names.join(","));
        }
        rows.push(specs.join(" "));
    }
    rows.join("\n")
}

/// Standard N²×N² Sudoku: rows `rK`, columns `cK`, boxes `sK`.
pub fn sudoku(order: usize) -> Result<PresetConfig, ConfigError> {
    if order < 2 {
        return Err(ConfigError::BadValue {
            attribute: "sudoku",
            value: order.to_string(),
        });
    }
    let side = order * order;
    let topology = grid_topology(side, |r, c| {
        vec![
            format!("c{c}"),
            format!("r{r}"),
            format!("s{}", (r / order) * order + c / order),
        ]
    });
    Ok(PresetConfig {
        symbols: digit_symbols(side),
        topology,
        columns: side,
    })
}

/// Sudoku-X: the standard grid plus both main diagonals `d0`, `d1`.
pub fn sudokux(order: usize) -> Result<PresetConfig, ConfigError> {
    if order < 2 {
        return Err(ConfigError::BadValue {
            attribute: "sudokux",
            value: order.to_string(),
        });
    }
    let side = order * order;
    let topology = grid_topology(side, |r, c| {
        let mut names = vec![
            format!("c{c}"),
            format!("r{r}"),
            format!("s{}", (r / order) * order + c / order),
        ];
        if r == c {
            names.push("d0".to_string());
        }
        if r + c == side - 1 {
            names.push("d1".to_string());
        }
        names
    });
    Ok(PresetConfig {
        symbols: digit_symbols(side),
        topology,
        columns: side,
    })
}

/// Brick layout: rows, columns, and `horizontal`×`vertical` rectangles
/// tiling a `size`×`size` grid. Both dimensions must divide the size.
pub fn brick(horizontal: usize, vertical: usize, size: usize) -> Result<PresetConfig, ConfigError> {
    if horizontal == 0 || vertical == 0 || size == 0 || size % horizontal != 0 || size % vertical != 0
    {
        return Err(ConfigError::BrickDimensions {
            horizontal,
            vertical,
            size,
        });
    }
    let per_row = size / horizontal;
    let topology = grid_topology(size, |r, c| {
        vec![
            format!("c{c}"),
            format!("r{r}"),
            format!("s{}", (r / vertical) * per_row + c / horizontal),
        ]
    });
    Ok(PresetConfig {
        symbols: digit_symbols(size),
        topology,
        columns: size,
    })
}

/// Latin square: rows and columns only; the alphabet becomes `.`,
/// `A`, `B`, … so at most 26 symbols.
pub fn latin(size: usize) -> Result<PresetConfig, ConfigError> {
    if size == 0 || size > 26 {
        return Err(ConfigError::BadValue {
            attribute: "latin",
            value: size.to_string(),
        });
    }
    let mut symbols = String::from(".");
    for v in 0..size {
        symbols.push(' ');
        symbols.push((b'A' + v as u8) as char);
    }
    let topology = grid_topology(size, |r, c| vec![format!("c{c}"), format!("r{r}")]);
    Ok(PresetConfig {
        symbols,
        topology,
        columns: size,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::topology::Topology;

    #[test]
    fn sudoku_preset_shape() {
        let p = sudoku(3).unwrap();
        assert_eq!(p.columns, 9);
        assert_eq!(p.symbols, ". 1 2 3 4 5 6 7 8 9");
        let t = Topology::parse(&p.topology).unwrap();
        assert_eq!(t.cell_count(), 81);
        assert_eq!(t.set_count(), 27);
        assert_eq!(t.largest_set(), 9);
        // Centre cell sits in row 4, column 4, box 4.
        assert_eq!(t.cell_set_names(40), vec!["c4", "r4", "s4"]);
    }

    #[test]
    fn sudoku_order_four_needs_delimiter() {
        let p = sudoku(4).unwrap();
        assert_eq!(p.columns, 16);
        assert!(p.symbols.ends_with("15 16"));
    }

    #[test]
    fn sudokux_adds_diagonals() {
        let p = sudokux(3).unwrap();
        let t = Topology::parse(&p.topology).unwrap();
        assert_eq!(t.set_count(), 29);
        assert_eq!(t.cell_set_names(0), vec!["c0", "d0", "r0", "s0"]);
        assert_eq!(t.cell_set_names(8), vec!["c8", "d1", "r0", "s8"]);
        // Centre cell lies on both diagonals.
        assert_eq!(t.cell_set_names(40), vec!["c4", "d0", "d1", "r4", "s4"]);
    }

    #[test]
    fn brick_preset_shape() {
        let p = brick(3, 2, 6).unwrap();
        let t = Topology::parse(&p.topology).unwrap();
        assert_eq!(t.cell_count(), 36);
        assert_eq!(t.set_count(), 18);
        // Cell (2,3) is in the second brick row, second brick column.
        assert_eq!(t.cell_set_names(15), vec!["c3", "r2", "s3"]);
    }

    #[test]
    fn brick_rejects_non_dividing_dimensions() {
        assert!(matches!(
            brick(4, 2, 6),
            Err(ConfigError::BrickDimensions { .. })
        ));
        assert!(matches!(
            brick(0, 2, 6),
            Err(ConfigError::BrickDimensions { .. })
        ));
    }

    #[test]
    fn latin_preset_shape() {
        let p = latin(4).unwrap();
        assert_eq!(p.symbols, ". A B C D");
        let t = Topology::parse(&p.topology).unwrap();
        assert_eq!(t.cell_count(), 16);
        assert_eq!(t.set_count(), 8);
        assert!(t.intersections().iter().all(|i| i.cells.len() == 1));
    }

    #[test]
    fn latin_bounds() {
        assert!(latin(26).is_ok());
        assert!(latin(27).is_err());
        assert!(latin(0).is_err());
    }
}
