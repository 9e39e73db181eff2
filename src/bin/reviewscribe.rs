use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use serde::Deserialize;

use std::fs;
use std::io::{self, BufWriter, Read, Write};
use std::path::PathBuf;
use std::time::Duration;

use reviewscribe::host::comment_for_selection;
use reviewscribe::json_array_encoder::JsonArrayEncoder;
use reviewscribe::opts::{DEFAULT_BASE_URL, DEFAULT_MAX_POLLS};
use reviewscribe::segment_encoder::SegmentEncoder;
use reviewscribe::text_encoder::TextEncoder;
use reviewscribe::timecode::format_clock;
use reviewscribe::vtt_encoder::VttEncoder;
use reviewscribe::{
    ClientConfig, HttpVendor, MediaSource, Opts, OutputType, Transcriber, Transcript,
    TranscriptResult, Word,
};

const API_KEY_ENV_VAR: &str = "REVIEWSCRIBE_API_KEY";

fn main() -> Result<()> {
    reviewscribe::init_logging();
    let params = Params::parse();

    match params.command {
        Command::Transcribe(args) => run_transcribe(args),
        Command::Segment(args) => run_segment(args),
        Command::Seek(args) => run_seek(args),
    }
}

#[derive(Parser, Debug)]
#[command(name = "reviewscribe")]
#[command(about = "Time-coded transcripts for video review")]
struct Params {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Transcribe a media file or URL through the vendor and print the transcript.
    Transcribe(TranscribeArgs),

    /// Group vendor words (JSON) into segments, offline.
    Segment(SegmentArgs),

    /// Estimate where to seek for text selected in a saved transcript.
    Seek(SeekArgs),
}

#[derive(Args, Debug)]
struct TranscribeArgs {
    /// Local media path, or an http(s) URL the vendor can fetch.
    source: String,

    /// Download an http(s) source locally and re-upload it instead of passing the URL on.
    #[arg(long = "fetch", default_value_t = false)]
    fetch: bool,

    #[arg(
        short = 'o',
        long = "output-type",
        value_enum,
        default_value_t = OutputType::Text
    )]
    output_type: OutputType,

    /// Language hint (e.g. `en`).
    #[arg(short = 'l', long = "language")]
    language: Option<String>,

    /// Seconds between status polls.
    #[arg(long = "poll-interval", default_value_t = 3)]
    poll_interval_secs: u64,

    /// Give up after this many status polls.
    #[arg(long = "max-polls", default_value_t = DEFAULT_MAX_POLLS)]
    max_polls: u32,

    /// Poll until the vendor reports a terminal status, however long it takes.
    #[arg(long = "no-poll-limit", default_value_t = false, conflicts_with = "max_polls")]
    no_poll_limit: bool,

    /// Vendor API key. Falls back to the REVIEWSCRIBE_API_KEY environment variable.
    #[arg(long = "api-key")]
    api_key: Option<String>,

    #[arg(long = "base-url", default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// Also save the transcript as JSON, for use with `seek`.
    #[arg(long = "save")]
    save: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct SegmentArgs {
    /// Vendor words as JSON: an array of words or a `{ "text", "words" }` result. Defaults to stdin.
    input: Option<PathBuf>,

    #[arg(
        short = 'o',
        long = "output-type",
        value_enum,
        default_value_t = OutputType::Text
    )]
    output_type: OutputType,
}

#[derive(Args, Debug)]
struct SeekArgs {
    /// Transcript JSON written by `transcribe --save`.
    transcript: PathBuf,

    /// Zero-based index of the segment the selection was made in.
    #[arg(short = 's', long = "segment")]
    segment: usize,

    /// The selected text.
    #[arg(long = "selection")]
    selection: String,

    /// Use per-word vendor timestamps instead of uniform interpolation.
    #[arg(long = "word-timed", default_value_t = false)]
    word_timed: bool,

    /// Print the comment text for the selection instead of the raw seek time.
    #[arg(long = "comment", default_value_t = false)]
    comment: bool,
}

fn run_transcribe(args: TranscribeArgs) -> Result<()> {
    let api_key = match args.api_key.clone() {
        Some(key) => key,
        None => std::env::var(API_KEY_ENV_VAR).with_context(|| {
            format!("no API key: pass --api-key or set {API_KEY_ENV_VAR}")
        })?,
    };

    let config = ClientConfig {
        base_url: args.base_url.clone(),
        api_key,
        ..ClientConfig::default()
    };
    let vendor = HttpVendor::new(&config).context("failed to build vendor client")?;

    let opts = Opts {
        output_type: args.output_type,
        language: args.language.clone(),
        poll_interval: Duration::from_secs(args.poll_interval_secs),
        max_polls: (!args.no_poll_limit).then_some(args.max_polls),
    };

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("{spinner:.green} {msg} [{elapsed}]")
            .context("invalid progress template")?,
    );
    spinner.set_message("submitting media");
    spinner.enable_steady_tick(Duration::from_millis(120));

    let tick = spinner.clone();
    let mut transcriber = Transcriber::new(vendor).with_progress(move |attempt, status| {
        tick.set_message(format!("{status:?} (poll {attempt})").to_lowercase());
    });

    let source = media_source(&args.source, args.fetch);
    let stdout = io::stdout();
    let res = transcriber.transcribe(&source, stdout.lock(), &opts);
    spinner.finish_and_clear();

    let transcript = res.with_context(|| format!("failed to transcribe '{}'", args.source))?;

    if let Some(path) = &args.save {
        let json = serde_json::to_vec_pretty(&transcript)?;
        fs::write(path, json)
            .with_context(|| format!("failed to save transcript: {}", path.display()))?;
    }

    Ok(())
}

fn media_source(source: &str, fetch: bool) -> MediaSource {
    let is_url = source.starts_with("http://") || source.starts_with("https://");
    match (is_url, fetch) {
        (true, true) => MediaSource::Remote(source.to_owned()),
        (true, false) => MediaSource::Url(source.to_owned()),
        (false, _) => MediaSource::File(PathBuf::from(source)),
    }
}

/// Either a bare word list or a full vendor result.
#[derive(Deserialize)]
#[serde(untagged)]
enum WordsInput {
    Words(Vec<Word>),
    Result(TranscriptResult),
}

impl From<WordsInput> for TranscriptResult {
    fn from(input: WordsInput) -> Self {
        match input {
            WordsInput::Words(words) => TranscriptResult {
                text: words
                    .iter()
                    .map(|w| w.text.as_str())
                    .collect::<Vec<_>>()
                    .join(" "),
                words: Some(words),
            },
            WordsInput::Result(result) => result,
        }
    }
}

fn run_segment(args: SegmentArgs) -> Result<()> {
    let raw = match &args.input {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("failed to read words: {}", path.display()))?,
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read words from stdin")?;
            buf
        }
    };

    let input: WordsInput = serde_json::from_str(&raw).context("input is not vendor words JSON")?;
    let transcript = Transcript::from_result(&input.into());

    let stdout = io::stdout();
    let writer = BufWriter::new(stdout.lock());
    let mut encoder: Box<dyn SegmentEncoder> = match args.output_type {
        OutputType::Json => Box::new(JsonArrayEncoder::new(writer)),
        OutputType::Vtt => Box::new(VttEncoder::new(writer)),
        OutputType::Text => Box::new(TextEncoder::new(writer)),
    };

    transcript.write_to(&mut *encoder)?;
    encoder.close()?;
    Ok(())
}

fn run_seek(args: SeekArgs) -> Result<()> {
    let raw = fs::read(&args.transcript)
        .with_context(|| format!("failed to read transcript: {}", args.transcript.display()))?;
    let transcript: Transcript =
        serde_json::from_slice(&raw).context("file is not a saved transcript")?;

    let out = seek_output(&transcript, &args)?;

    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{out}")?;
    Ok(())
}

fn seek_output(transcript: &Transcript, args: &SeekArgs) -> Result<String> {
    let Some(segment) = transcript.segments.get(args.segment) else {
        bail!(
            "segment {} out of range (transcript has {})",
            args.segment,
            transcript.segments.len()
        );
    };

    if args.comment {
        return Ok(comment_for_selection(segment, &args.selection, args.word_timed));
    }

    let at = transcript
        .seek_for_selection(args.segment, &args.selection, args.word_timed)
        .unwrap_or(segment.start_seconds);
    Ok(format!("{at:.3}\t{}", format_clock(at)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn saved_transcript() -> Transcript {
        Transcript::from_result(&TranscriptResult {
            text: "one two three four five".to_owned(),
            words: Some(vec![
                Word::new("one", 10_000, 12_000),
                Word::new("two", 12_000, 14_000),
                Word::new("three", 14_000, 16_000),
                Word::new("four", 16_000, 18_000),
                Word::new("five", 18_000, 20_000),
            ]),
        })
    }

    fn seek_args(selection: &str, comment: bool) -> SeekArgs {
        SeekArgs {
            transcript: PathBuf::from("unused.json"),
            segment: 0,
            selection: selection.to_owned(),
            word_timed: false,
            comment,
        }
    }

    #[test]
    fn media_source_classifies_inputs() {
        assert_eq!(
            media_source("https://cdn.example/clip.mp4", false),
            MediaSource::Url("https://cdn.example/clip.mp4".to_owned())
        );
        assert_eq!(
            media_source("http://intranet/clip.mp4", true),
            MediaSource::Remote("http://intranet/clip.mp4".to_owned())
        );
        assert_eq!(
            media_source("clips/review.mov", true),
            MediaSource::File(PathBuf::from("clips/review.mov"))
        );
    }

    #[test]
    fn words_input_accepts_bare_arrays_and_results() -> anyhow::Result<()> {
        let bare: WordsInput =
            serde_json::from_str(r#"[{"text":"Hi","start":0,"end":300}]"#)?;
        let result = TranscriptResult::from(bare);
        assert_eq!(result.text, "Hi");
        assert_eq!(result.words.map(|w| w.len()), Some(1));

        let full: WordsInput = serde_json::from_str(r#"{"text":"untimed"}"#)?;
        let result = TranscriptResult::from(full);
        assert_eq!(result.text, "untimed");
        assert!(result.words.is_none());
        Ok(())
    }

    #[test]
    fn seek_output_prints_time_or_comment() -> anyhow::Result<()> {
        let transcript = saved_transcript();
        assert_eq!(seek_output(&transcript, &seek_args("five", false))?, "12.000\t0:12");
        assert_eq!(
            seek_output(&transcript, &seek_args("five", true))?,
            "[0:12] five"
        );
        Ok(())
    }

    #[test]
    fn seek_output_rejects_unknown_segment() {
        let mut args = seek_args("five", false);
        args.segment = 3;
        let err = seek_output(&saved_transcript(), &args).unwrap_err();
        assert!(err.to_string().contains("out of range"));
    }

    #[test]
    fn params_parse_transcribe_defaults() {
        let params = Params::try_parse_from(["reviewscribe", "transcribe", "clip.mp4"])
            .expect("parse transcribe params");
        let Command::Transcribe(args) = params.command else {
            panic!("expected transcribe command");
        };
        assert_eq!(args.output_type, OutputType::Text);
        assert_eq!(args.max_polls, DEFAULT_MAX_POLLS);
        assert!(!args.no_poll_limit);
        assert_eq!(args.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn params_require_a_subcommand() {
        assert!(Params::try_parse_from(["reviewscribe"]).is_err());
    }
}
