use super::*;

// =============================================================
// AppError
// =============================================================

#[test]
fn not_found_names_the_path() {
    let error = AppError::NotFound("/camaras/99".to_owned());
    assert_eq!(error.to_string(), "no page at /camaras/99");
}

#[test]
fn app_error_converts_into_a_boundary_error() {
    let error: leptos::error::Error = AppError::NotFound("/nope".to_owned()).into();
    assert_eq!(error.to_string(), "no page at /nope");
}
