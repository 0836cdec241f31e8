//! Display formatting for navigation readouts. Everything here is pure
//! string work performed at the rendering boundary.

const SECS_PER_MINUTE: f64 = 60.0;
const SECS_PER_HOUR: f64 = 3_600.0;
const SECS_PER_DAY: f64 = 86_400.0;

/// Render a duration the way the navigation card shows it: minutes are
/// rounded up, larger units are floored with a rounded-up remainder, and
/// zero remainders are omitted.
pub fn format_duration(duration_secs: f64) -> String {
    let secs = duration_secs.max(0.0);

    if secs < SECS_PER_HOUR {
        let minutes = (secs / SECS_PER_MINUTE).ceil() as u64;
        format!("{minutes} {}", pluralize(minutes, "min"))
    } else if secs < SECS_PER_DAY {
        let hours = (secs / SECS_PER_HOUR).floor() as u64;
        let minutes = ((secs % SECS_PER_HOUR) / SECS_PER_MINUTE).ceil() as u64;
        if minutes > 0 {
            format!(
                "{hours} {} {minutes} {}",
                pluralize(hours, "hr"),
                pluralize(minutes, "min")
            )
        } else {
            format!("{hours} {}", pluralize(hours, "hr"))
        }
    } else {
        let days = (secs / SECS_PER_DAY).floor() as u64;
        let hours = ((secs % SECS_PER_DAY) / SECS_PER_HOUR).floor() as u64;
        if hours > 0 {
            format!(
                "{days} {} {hours} {}",
                pluralize(days, "day"),
                pluralize(hours, "hr")
            )
        } else {
            format!("{days} {}", pluralize(days, "day"))
        }
    }
}

/// Render a distance in meters as kilometers with one decimal.
pub fn format_distance_km(distance_m: f64) -> String {
    format!("{:.1} km", distance_m / 1_000.0)
}

/// Drop embedded markup tags from a provider instruction so it can be
/// shown as plain text. The stored instruction keeps its tags.
pub fn strip_instruction_markup(instruction: &str) -> String {
    let mut out = String::with_capacity(instruction.len());
    let mut in_tag = false;
    for ch in instruction.chars() {
        match ch {
            '<' => in_tag = true,
            '>' if in_tag => in_tag = false,
            _ if in_tag => {}
            _ => out.push(ch),
        }
    }
    out
}

fn pluralize(count: u64, unit: &str) -> String {
    if count > 1 {
        format!("{unit}s")
    } else {
        unit.to_string()
    }
}
