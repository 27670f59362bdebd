//! Correlator tables for Mermin and Svetlichny inequalities.
//!
//! Each table lists the measured basis strings and their signs, index-aligned.
//! The orderings and signs are reference data: experiment results are compared
//! term by term against runs that used exactly these lists, so they are kept
//! as literal data rather than regenerated.

/// Basis strings and signs for one inequality instance.
pub(crate) struct CorrelatorTable {
    pub bases: &'static [&'static str],
    pub signs: &'static [i8],
}

// ---------------------------------------------------------------------------
// Mermin (iGHZ state)
// ---------------------------------------------------------------------------

pub(crate) static MERMIN_3: CorrelatorTable = CorrelatorTable {
    bases: &["xxy", "xyx", "yxx", "yyy"],
    signs: &[1, 1, 1, -1],
};

pub(crate) static MERMIN_4: CorrelatorTable = CorrelatorTable {
    bases: &[
        "xxxy", "xxyx", "xyxx", "yxxx", "xyyy", "yxyy", "yyxy", "yyyx",
    ],
    signs: &[1, 1, 1, 1, -1, -1, -1, -1],
};

pub(crate) static MERMIN_5: CorrelatorTable = CorrelatorTable {
    bases: &[
        "xxxxy", "xxxyx", "xxyxx", "xyxxx", "yxxxx", //
        "xxyyy", "xyyxy", "xyyyx", "xyxyy", "yyyxx", "yyxyx", "yyxxy", "yxyyx", "yxyxy",
        "yxxyy", //
        "yyyyy",
    ],
    signs: &[1, 1, 1, 1, 1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, 1],
};

pub(crate) static MERMIN_6: CorrelatorTable = CorrelatorTable {
    bases: &[
        "xxxxxy", "xxxxyx", "xxxyxx", "xxyxxx", "xyxxxx", "yxxxxx", //
        "xxxyyy", "xxyxyy", "xxyyxy", "xxyyyx", "xyxxyy", "xyxyxy", "xyxyyx", "xyyxxy",
        "xyyxyx", "xyyyxx", "yxxxyy", "yxxyxy", "yxxyyx", "yxyxxy", "yxyxyx", "yxyyxx",
        "yyxxxy", "yyxxyx", "yyxyxx", "yyyxxx", //
        "yyyyyx", "yyyyxy", "yyyxyy", "yyxyyy", "yxyyyy", "xyyyyy",
    ],
    signs: &[
        1, 1, 1, 1, 1, 1, //
        -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, //
        1, 1, 1, 1, 1, 1,
    ],
};

pub(crate) static MERMIN_7: CorrelatorTable = CorrelatorTable {
    bases: &[
        "xxxxxxy", "xxxxxyx", "xxxxyxx", "xxxyxxx", "xxyxxxx", "xyxxxxx", "yxxxxxx",
        // three y's
        "xxxxyyy", "xxxyxyy", "xxxyyxy", "xxxyyyx", "xxyxxyy", "xxyxyxy", "xxyxyyx",
        "xxyyxxy", "xxyyxyx", "xxyyyxx", "xyxxxyy", "xyxxyxy", "xyxxyyx", "xyxyxxy",
        "xyxyxyx", "xyxyyxx", "xyyxxxy", "xyyxxyx", "xyyxyxx", "xyyyxxx", "yxxxxyy",
        "yxxxyxy", "yxxxyyx", "yxxyxxy", "yxxyxyx", "yxxyyxx", "yxyxxxy", "yxyxxyx",
        "yxyxyxx", "yxyyxxx", "yyxxxxy", "yyxxxyx", "yyxxyxx", "yyxyxxx", "yyyxxxx",
        // five y's
        "xxyyyyy", "xyxyyyy", "xyyxyyy", "xyyyxyy", "xyyyyxy", "xyyyyyx", "yxxyyyy",
        "yxyxyyy", "yxyyxyy", "yxyyyxy", "yxyyyyx", "yyxxyyy", "yyxyxyy", "yyxyyxy",
        "yyxyyyx", "yyyxxyy", "yyyxyxy", "yyyxyyx", "yyyyxxy", "yyyyxyx", "yyyyyxx",
        //
        "yyyyyyy",
    ],
    signs: &[
        1, 1, 1, 1, 1, 1, 1, //
        -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1,
        -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, //
        1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, //
        -1,
    ],
};

// ---------------------------------------------------------------------------
// Svetlichny (GHZ+ state)
// ---------------------------------------------------------------------------

pub(crate) static SVETLICHNY_3: CorrelatorTable = CorrelatorTable {
    bases: &["xxc", "xxd", "xyc", "yxc", "yyd", "yyc", "yxd", "xyd"],
    signs: &[1, 1, 1, 1, -1, -1, -1, -1],
};

pub(crate) static SVETLICHNY_4: CorrelatorTable = CorrelatorTable {
    bases: &[
        "yyyy", "xyyy", "yxyy", "yyxy", "yyyx", "xxyy", "xyxy", "xyyx", "yxxy", "yxyx", "yyxx",
        "xxxy", "xxyx", "xyxx", "yxxx", "xxxx",
    ],
    signs: &[1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, 1, 1, 1, 1, 1],
};

#[cfg(test)]
mod tests {
    use super::*;

    fn all() -> [(&'static str, &'static CorrelatorTable, usize); 7] {
        [
            ("mermin3", &MERMIN_3, 3),
            ("mermin4", &MERMIN_4, 4),
            ("mermin5", &MERMIN_5, 5),
            ("mermin6", &MERMIN_6, 6),
            ("mermin7", &MERMIN_7, 7),
            ("svetlichny3", &SVETLICHNY_3, 3),
            ("svetlichny4", &SVETLICHNY_4, 4),
        ]
    }

    #[test]
    fn test_tables_are_index_aligned() {
        for (name, table, _) in all() {
            assert_eq!(table.bases.len(), table.signs.len(), "{name}");
        }
    }

    #[test]
    fn test_mermin_table_sizes() {
        assert_eq!(MERMIN_3.bases.len(), 4);
        assert_eq!(MERMIN_4.bases.len(), 8);
        assert_eq!(MERMIN_5.bases.len(), 16);
        assert_eq!(MERMIN_6.bases.len(), 32);
        assert_eq!(MERMIN_7.bases.len(), 64);
    }

    #[test]
    fn test_svetlichny_table_sizes() {
        assert_eq!(SVETLICHNY_3.bases.len(), 8);
        assert_eq!(SVETLICHNY_4.bases.len(), 16);
    }

    #[test]
    fn test_basis_widths_match_qubits() {
        for (name, table, qubits) in all() {
            for b in table.bases {
                assert_eq!(b.len(), qubits, "{name}: {b}");
            }
        }
    }

    #[test]
    fn test_no_duplicate_bases() {
        for (name, table, _) in all() {
            let mut seen = std::collections::HashSet::new();
            for b in table.bases {
                assert!(seen.insert(*b), "{name}: duplicate {b}");
            }
        }
    }

    #[test]
    fn test_signs_are_unit() {
        for (name, table, _) in all() {
            assert!(table.signs.iter().all(|&s| s == 1 || s == -1), "{name}");
        }
    }

    #[test]
    fn test_mermin_bases_have_odd_y_count() {
        for table in [&MERMIN_3, &MERMIN_4, &MERMIN_5, &MERMIN_6, &MERMIN_7] {
            for b in table.bases {
                let ys = b.chars().filter(|&c| c == 'y').count();
                assert_eq!(ys % 2, 1, "{b}");
            }
        }
    }

    #[test]
    fn test_mermin_sign_follows_y_count() {
        // For the iGHZ state the sign alternates every two extra y's.
        for table in [&MERMIN_3, &MERMIN_4, &MERMIN_5, &MERMIN_6, &MERMIN_7] {
            for (b, &s) in table.bases.iter().zip(table.signs) {
                let ys = b.chars().filter(|&c| c == 'y').count();
                let expected = if (ys / 2) % 2 == 0 { 1 } else { -1 };
                assert_eq!(s, expected, "{b}");
            }
        }
    }
}
