/// The supported output formats for encoded transcripts.
///
/// Each variant maps to a concrete `SegmentEncoder` implementation.
/// With the `cli` feature, `ValueEnum` allows this enum to be used directly as a CLI flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum OutputType {
    /// Output segments as a JSON array.
    Json,

    /// Output segments in WebVTT subtitle format.
    Vtt,

    /// Output one `[m:ss] text` line per segment, as shown in the transcript sidebar.
    Text,
}
