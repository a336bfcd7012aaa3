use super::*;

fn stats(pairs: &[(&str, u64)]) -> Stats {
    Stats {
        total_registros: pairs.iter().map(|(_, n)| n).sum(),
        registros_hoy: 0,
        por_tipo_vehiculo: pairs.iter().map(|(k, v)| ((*k).to_owned(), *v)).collect(),
    }
}

#[test]
fn chart_rows_carry_labels_and_colors() {
    let rows = chart_rows(&stats(&[("car", 12), ("motorcycle", 3)]));
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].label, "Automóvil");
    assert_eq!(rows[0].color, "#3B82F6");
    assert_eq!(rows[1].label, "Motocicleta");
    assert_eq!(rows[1].count, 3);
}

#[test]
fn chart_rows_keep_unknown_codes_with_fallback_color() {
    let rows = chart_rows(&stats(&[("van", 2)]));
    assert_eq!(rows[0].label, "van");
    assert_eq!(rows[0].color, crate::util::vehicle::FALLBACK_COLOR);
}

#[test]
fn daily_average_rounds_to_nearest() {
    assert_eq!(daily_average(0), 0);
    assert_eq!(daily_average(14), 0);
    assert_eq!(daily_average(15), 1);
    assert_eq!(daily_average(300), 10);
    assert_eq!(daily_average(314), 10);
}

#[test]
fn most_common_picks_largest_count() {
    let rows = chart_rows(&stats(&[("bus", 1), ("car", 9), ("truck", 4)]));
    assert_eq!(most_common(&rows), Some("Automóvil"));
}

#[test]
fn most_common_prefers_later_row_on_tie() {
    let rows = chart_rows(&stats(&[("bus", 5), ("car", 5)]));
    assert_eq!(most_common(&rows), Some("Automóvil"));
}

#[test]
fn most_common_of_nothing_is_none() {
    assert_eq!(most_common(&[]), None);
}
