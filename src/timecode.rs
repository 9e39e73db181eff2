/// Format seconds as a sidebar clock: `m:ss`, or `h:mm:ss` from one hour on.
///
/// Truncates to whole seconds so a label never runs ahead of the audio it points at.
/// Negative and non-finite inputs render as `0:00`.
pub fn format_clock(seconds: f64) -> String {
    let total = if seconds.is_finite() && seconds > 0.0 {
        seconds.floor() as u64
    } else {
        0
    };

    let s = total % 60;
    let m = (total / 60) % 60;
    let h = total / 3600;

    if h > 0 {
        format!("{h}:{m:02}:{s:02}")
    } else {
        format!("{m}:{s:02}")
    }
}
