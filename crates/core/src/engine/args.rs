//! Argument construction for the engine.
//!
//! Inputs are referenced by position further down the command line
//! (`0` audio, `1` image, `2` subtitle), so their order is fixed.
//! Paths are passed as raw OS strings and never re-encoded.

use std::ffi::OsString;

use super::types::EngineJob;

/// Builds the engine arguments for one job.
///
/// `extra_args` go right before the overwrite flag and the output path.
pub fn build_args(job: &EngineJob, extra_args: &[String]) -> Vec<OsString> {
    let mut args: Vec<OsString> = Vec::with_capacity(25 + extra_args.len());

    for input in [&job.audio, &job.image, &job.subtitle] {
        args.push("-i".into());
        args.push(input.as_os_str().to_os_string());
    }

    // Lossless audio, cover copied as is, lyrics as MP4 text subtitles
    args.extend(
        ["-c:a", "alac", "-c:v", "copy", "-c:s", "mov_text"]
            .into_iter()
            .map(OsString::from),
    );

    args.extend(
        ["-map", "0:a", "-map", "1:v", "-map", "2:s"]
            .into_iter()
            .map(OsString::from),
    );

    args.push("-metadata:s:s:0".into());
    args.push(format!("language={}", job.language).into());
    args.push("-disposition:v".into());
    args.push("attached_pic".into());

    args.extend(extra_args.iter().map(OsString::from));

    args.push("-y".into());
    args.push(job.output.as_os_str().to_os_string());
    args
}
