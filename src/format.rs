//! Display helpers for progress and summary lines.

use std::time::Duration;

use crate::steps::ResolvedTarget;

/// Format an elapsed time for step completion lines.
///
/// Three tiers: at least one minute renders as `1h 2m 3s` (hours omitted
/// when zero, minutes always shown once hours or minutes are non-zero);
/// under a minute with a millisecond remainder renders as `4.567s`;
/// otherwise whole seconds render as `4s`.
pub fn format_duration(duration: Duration) -> String {
    let total = duration.as_secs();
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let seconds = total % 60;
    let millis = duration.subsec_millis();

    let mut out = String::new();
    if hours > 0 {
        out.push_str(&format!("{hours}h "));
    }
    if minutes > 0 || hours > 0 {
        out.push_str(&format!("{minutes}m "));
    }
    if hours == 0 && minutes == 0 && millis > 0 {
        out.push_str(&format!("{seconds}.{millis:03}s"));
    } else {
        out.push_str(&format!("{seconds}s"));
    }
    out
}

/// Derive the conventional short name from an artifact identifier.
///
/// `maven-<name>-plugin` and `<name>-maven-plugin` both shorten to `<name>`;
/// anything else has no short name.
pub fn short_goal_name(artifact: &str) -> Option<&str> {
    if artifact.starts_with("maven-")
        && artifact.ends_with("-plugin")
        && artifact.len() > "maven-".len() + "-plugin".len()
    {
        Some(&artifact["maven-".len()..artifact.len() - "-plugin".len()])
    } else if artifact.ends_with("-maven-plugin") && artifact.len() > "-maven-plugin".len() {
        artifact.strip_suffix("-maven-plugin")
    } else {
        None
    }
}

/// Human-readable coordinate for a resolved target.
///
/// Conventionally named artifacts render as `<short>:<goal>`, everything
/// else as the full `group:artifact:version:goal`. The execution id is
/// appended when present, and a marker notes a non-empty override overlay.
pub fn format_coordinate(target: &ResolvedTarget, overlay: bool) -> String {
    let mut coord = match short_goal_name(&target.artifact) {
        Some(short) => format!("{}:{}", short, target.goal),
        None => format!(
            "{}:{}:{}:{}",
            target.group, target.artifact, target.version, target.goal
        ),
    };

    if let Some(id) = &target.execution_id {
        coord.push('@');
        coord.push_str(id);
    }

    if overlay {
        coord.push_str(" (overlay configuration used)");
    }

    coord
}
