//! Step-trace views of the applied-constraint stack.
//!
//! Only records still on the stack are reported; anything retracted
//! by the unwinder is gone from the trace.

use super::types::{Record, Rule, Step, StepKind};

/// Convert the live stack into public steps.
pub(crate) fn steps(stack: &[Record]) -> Vec<Step> {
    stack
        .iter()
        .map(|record| {
            let kind = match record {
                Record::Forced { cell, value } | Record::Necessary { cell, value } => {
                    StepKind::Assign {
                        cell: *cell,
                        value: *value,
                    }
                }
                Record::Choice {
                    cells,
                    position,
                    value,
                } => StepKind::Assign {
                    cell: cells[*position],
                    value: *value,
                },
                Record::BoxClaim { cells, value } => StepKind::Eliminate {
                    eliminations: cells.iter().map(|&c| (c, *value)).collect(),
                },
                Record::Tuple { eliminations } => StepKind::Eliminate {
                    eliminations: eliminations.clone(),
                },
            };
            Step {
                rule: record.rule(),
                kind,
            }
        })
        .collect()
}

/// Pretty form: one record per line, the rule letter followed by
/// `[cell value]` for placements or `[[cells…] value]` groups for
/// eliminations.
pub(crate) fn steps_string(stack: &[Record]) -> String {
    let mut out = String::new();
    for step in steps(stack) {
        out.push(step.rule.letter());
        match &step.kind {
            StepKind::Assign { cell, value } => {
                out.push_str(&format!(" [{cell} {value}]"));
            }
            StepKind::Eliminate { eliminations } => {
                // Group cells sharing an eliminated value, in value order.
                let mut values: Vec<usize> = eliminations.iter().map(|&(_, v)| v).collect();
                values.sort_unstable();
                values.dedup();
                for v in values {
                    let cells: Vec<String> = eliminations
                        .iter()
                        .filter(|&&(_, ev)| ev == v)
                        .map(|&(c, _)| c.to_string())
                        .collect();
                    out.push_str(&format!(" [[{}] {v}]", cells.join(" ")));
                }
            }
        }
        out.push('\n');
    }
    out
}

/// Distinct rule letters on the stack, in canonical F N B T ? order,
/// terminated by a period.
pub(crate) fn constraints_used(stack: &[Record]) -> String {
    let mut out = String::new();
    for rule in Rule::all() {
        if stack.iter().any(|r| r.rule() == rule) {
            out.push(rule.letter());
        }
    }
    out.push('.');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_stack() -> Vec<Record> {
        vec![
            Record::Forced { cell: 4, value: 2 },
            Record::BoxClaim {
                cells: vec![6, 7],
                value: 3,
            },
            Record::Necessary { cell: 1, value: 5 },
            Record::Tuple {
                eliminations: vec![(2, 1), (3, 1), (2, 4)],
            },
        ]
    }

    #[test]
    fn constraints_used_canonical_order() {
        assert_eq!(constraints_used(&sample_stack()), "FNBT.");
        assert_eq!(constraints_used(&[]), ".");
        assert_eq!(
            constraints_used(&[Record::Forced { cell: 0, value: 1 }]),
            "F."
        );
    }

    #[test]
    fn steps_mirror_stack_order() {
        let s = steps(&sample_stack());
        assert_eq!(s.len(), 4);
        assert_eq!(s[0].rule, Rule::Forced);
        assert_eq!(
            s[0].kind,
            StepKind::Assign { cell: 4, value: 2 }
        );
        assert_eq!(s[2].rule, Rule::Necessary);
    }

    #[test]
    fn pretty_format() {
        let text = steps_string(&sample_stack());
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "F [4 2]");
        assert_eq!(lines[1], "B [[6 7] 3]");
        assert_eq!(lines[2], "N [1 5]");
        assert_eq!(lines[3], "T [[2 3] 1] [[2] 4]");
    }
}
