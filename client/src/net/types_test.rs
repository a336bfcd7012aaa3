use super::*;

#[test]
fn record_parses_sparse_backend_row() {
    let record: Record = serde_json::from_value(serde_json::json!({
        "id": 12,
        "placa": "ABC123",
        "hora_entrada": "2024-01-15T10:30:00",
        "estado": "activo",
        "valor_actual": 6000,
        "horas_transcurridas": 2
    }))
    .expect("record");
    assert_eq!(record.id, 12);
    assert_eq!(record.plate(), Some("ABC123"));
    assert_eq!(record.valor_actual, Some(6000.0));
    assert_eq!(record.horas_transcurridas, Some(2.0));
    assert_eq!(record.direccion, None);
}

#[test]
fn plate_prefers_confirmed_value() {
    let record = Record {
        placa: Some("ABC12".to_owned()),
        placa_final: Some("ABC123".to_owned()),
        ..Record::default()
    };
    assert_eq!(record.plate(), Some("ABC123"));
}

#[test]
fn blank_plate_counts_as_missing() {
    let record = Record {
        placa_final: Some("  ".to_owned()),
        ..Record::default()
    };
    assert_eq!(record.plate(), None);
}

#[test]
fn seen_at_prefers_detection_timestamp() {
    let record = Record {
        timestamp: Some("2024-01-15T11:00:00".to_owned()),
        hora_entrada: Some("2024-01-15T10:00:00".to_owned()),
        ..Record::default()
    };
    assert_eq!(record.seen_at(), Some("2024-01-15T11:00:00"));
}

#[test]
fn draft_defaults_type_and_direction() {
    let draft = RecordDraft::from_record(&Record::default());
    assert_eq!(draft.tipo_vehiculo, "car");
    assert_eq!(draft.direccion, "entrada");
}

#[test]
fn stats_defaults_missing_fields() {
    let stats: Stats = serde_json::from_value(serde_json::json!({ "total_registros": 40 })).expect("stats");
    assert_eq!(stats.total_registros, 40);
    assert_eq!(stats.registros_hoy, 0);
    assert!(stats.por_tipo_vehiculo.is_empty());
}

// =============================================================
// ListEnvelope
// =============================================================

#[test]
fn bare_array_parses() {
    let list: ListEnvelope<Record> = serde_json::from_value(serde_json::json!([{ "id": 1 }, { "id": 2 }])).expect("list");
    assert_eq!(list.into_items().len(), 2);
}

#[test]
fn camera_envelope_parses() {
    let list: ListEnvelope<Camera> =
        serde_json::from_value(serde_json::json!({ "camaras": [{ "id": 1, "nombre": "A" }] })).expect("list");
    let items = list.into_items();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].name, "A");
}

#[test]
fn record_envelope_parses() {
    let list: ListEnvelope<Record> =
        serde_json::from_value(serde_json::json!({ "registros": [{ "id": 5 }], "total": 1 })).expect("list");
    assert_eq!(list.into_items()[0].id, 5);
}

#[test]
fn unknown_shape_is_an_error() {
    let result = serde_json::from_value::<ListEnvelope<Record>>(serde_json::json!({ "detail": "oops" }));
    assert!(result.is_err());
}

#[test]
fn camera_row_with_null_fields_still_parses() {
    let body = r#"[
        {"id": 1, "nombre": "Entrada", "url": "http://cam/1", "tipo": "ip", "estado": "activo"},
        {"id": 2, "nombre": null, "url": null, "tipo": null, "estado": null}
    ]"#;
    let items = serde_json::from_str::<ListEnvelope<Camera>>(body).expect("list").into_items();
    assert_eq!(items.len(), 2);
    assert_eq!(items[1].id, 2);
    assert!(items[1].name.is_empty());
    assert!(items[1].source_url.is_empty());
}

#[test]
fn bad_row_fails_the_whole_list() {
    let body = r#"[{"id": 1}, {"id": "not-a-number"}]"#;
    let err = serde_json::from_str::<ListEnvelope<Camera>>(body).expect_err("bad row");
    assert!(err.to_string().contains("invalid type"), "{err}");
}

#[test]
fn bad_row_inside_envelope_fails_too() {
    let result = serde_json::from_value::<ListEnvelope<Record>>(serde_json::json!({ "registros": [{ "placa": "ABC" }] }));
    assert!(result.is_err());
}

// =============================================================
// RecordQuery
// =============================================================

#[test]
fn empty_query_has_no_question_mark() {
    assert_eq!(RecordQuery::default().to_query_string(), "");
}

#[test]
fn active_query_filters_by_status() {
    assert_eq!(RecordQuery::active().to_query_string(), "?estado=activo");
}

#[test]
fn blank_status_is_omitted() {
    let query = RecordQuery {
        estado: Some(String::new()),
        limit: Some(100),
    };
    assert_eq!(query.to_query_string(), "?limit=100");
}
