//! Vehicle-type and direction labels, icons, and chart colors.

#[cfg(test)]
#[path = "vehicle_test.rs"]
mod vehicle_test;

/// Backend vehicle-type codes in display order.
pub const VEHICLE_TYPES: [&str; 4] = ["car", "motorcycle", "bus", "truck"];

/// Color used for types without an assigned palette entry.
pub const FALLBACK_COLOR: &str = "#6B7280";

pub fn type_label(code: &str) -> &str {
    match code {
        "car" => "Automóvil",
        "motorcycle" => "Motocicleta",
        "bus" => "Autobús",
        "truck" => "Camión",
        other => other,
    }
}

pub fn type_color(code: &str) -> &'static str {
    match code {
        "car" => "#3B82F6",
        "motorcycle" => "#10B981",
        "bus" => "#F59E0B",
        "truck" => "#EF4444",
        _ => FALLBACK_COLOR,
    }
}

pub fn type_icon(code: &str) -> &'static str {
    match code {
        "motorcycle" => "🏍️",
        "bus" => "🚌",
        "truck" => "🚚",
        _ => "🚗",
    }
}

pub fn direction_label(code: &str) -> &str {
    match code {
        "entrada" => "Entrada",
        "salida" => "Salida",
        other => other,
    }
}

/// CSS modifier for a record status badge.
pub fn status_class(estado: &str) -> &'static str {
    match estado {
        "activo" => "badge--active",
        "cerrado" => "badge--closed",
        "cancelado" => "badge--cancelled",
        _ => "badge--unknown",
    }
}
