//! Ordinal categorical coercion onto a numeric scale
//!
//! Maps ranked labels ("Low"/"Baixa" -> 1) onto numbers so ordinal columns
//! can join numeric analyses. Coercion never fails: labels outside the known
//! vocabulary become nulls, and a column whose vocabulary is entirely
//! unrecognized degrades to arbitrary stable codes carrying a flag, so any
//! correlation computed from it is marked as using an arbitrary scale.

use crate::schema::OrdinalField;

/// A column coerced to numbers.
#[derive(Debug, Clone, PartialEq)]
pub struct CoercedColumn {
    pub values: Vec<Option<f64>>,
    /// True when the rank table recognized nothing and first-occurrence
    /// codes were assigned instead. A fallback column carries no semantic
    /// order.
    pub fallback: bool,
}

/// Coerce ordinal labels through the field's canonical rank table.
///
/// Rank order is preserved: if label A ranks below label B then
/// `coerced(A) < coerced(B)`, except in fallback mode. A value outside the
/// vocabulary maps to null for that row. When every non-null value fails to
/// map, falls back to [`fallback_codes`].
pub fn coerce_ordinal(values: &[Option<&str>], field: OrdinalField) -> CoercedColumn {
    let mapped: Vec<Option<f64>> = values
        .iter()
        .map(|v| v.and_then(|label| field.rank_of(label)))
        .collect();

    let has_input = values.iter().any(|v| v.is_some());
    let all_unmapped = mapped.iter().all(|v| v.is_none());

    if has_input && all_unmapped {
        return fallback_codes(values);
    }

    CoercedColumn {
        values: mapped,
        fallback: false,
    }
}

/// Assign stable integer codes by first-occurrence order across the column.
///
/// Used when no rank table applies. Codes start at 0; nulls stay null. The
/// resulting scale is arbitrary, so the column is flagged.
pub fn fallback_codes(values: &[Option<&str>]) -> CoercedColumn {
    let mut order: Vec<&str> = Vec::new();
    let coded = values
        .iter()
        .map(|v| {
            v.map(|label| {
                match order.iter().position(|known| *known == label) {
                    Some(code) => code as f64,
                    None => {
                        order.push(label);
                        (order.len() - 1) as f64
                    }
                }
            })
        })
        .collect();

    CoercedColumn {
        values: coded,
        fallback: true,
    }
}
