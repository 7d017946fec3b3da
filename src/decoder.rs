//! Invoking the external record decoder.
//!
//! Input files are not read directly: a decoder program turns each file into
//! the line-format dump text this crate searches. Plain files are passed to
//! the decoder as its single argument; gzipped files (by `.gz` extension)
//! are decompressed in-process and streamed to the decoder's stdin. The
//! decoder's output is decoded as latin-1, the encoding of the upstream
//! dumps.
//!
//! # Examples
//!
//! ```no_run
//! use marcgrep::decoder;
//! use std::path::Path;
//!
//! let text = decoder::decode_file(Path::new("dump.dat"), decoder::DEFAULT_DECODER)?;
//! # Ok::<(), marcgrep::SearchError>(())
//! ```

use crate::error::{Result, SearchError};
use flate2::read::GzDecoder;
use std::fs::File;
use std::io::{self, Read, Write};
use std::path::Path;
use std::process::{Command, Output, Stdio};
use std::thread;

/// Decoder program used when none is configured.
pub const DEFAULT_DECODER: &str = "semarc";

/// Run the decoder over one input file and return its decoded text output.
///
/// # Errors
///
/// Returns [`SearchError::Decoder`] if the decoder cannot be spawned or
/// exits with a non-zero status, and [`SearchError::IoError`] for failures
/// reading the input file or the decoder pipe.
pub fn decode_file(path: &Path, decoder: &str) -> Result<String> {
    let stdout = if path.extension().is_some_and(|ext| ext == "gz") {
        let file = File::open(path)?;
        let mut decompressed = Vec::new();
        GzDecoder::new(file).read_to_end(&mut decompressed)?;
        decode_from_stdin(decoder, decompressed)?
    } else {
        decode_from_path(decoder, path)?
    };
    Ok(encoding_rs::mem::decode_latin1(&stdout).into_owned())
}

/// Run `decoder <path>` and capture its stdout.
fn decode_from_path(decoder: &str, path: &Path) -> Result<Vec<u8>> {
    let output = Command::new(decoder)
        .arg(path)
        .output()
        .map_err(|e| spawn_error(decoder, &e))?;
    check_status(decoder, output)
}

/// Run the decoder with `input` piped to its stdin and capture its stdout.
fn decode_from_stdin(decoder: &str, input: Vec<u8>) -> Result<Vec<u8>> {
    let mut child = Command::new(decoder)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|e| spawn_error(decoder, &e))?;

    // Feed stdin from a helper thread while draining stdout, so neither pipe
    // can fill up and stall the other.
    let mut stdin = child
        .stdin
        .take()
        .ok_or_else(|| SearchError::Decoder(format!("'{decoder}': no stdin handle")))?;
    let feeder = thread::spawn(move || stdin.write_all(&input));

    let output = child.wait_with_output()?;
    match feeder.join() {
        Ok(Ok(())) => {}
        // The decoder may legitimately exit before consuming all its input.
        Ok(Err(e)) if e.kind() == io::ErrorKind::BrokenPipe => {}
        Ok(Err(e)) => return Err(SearchError::IoError(e)),
        Err(_) => {
            return Err(SearchError::Decoder(format!(
                "'{decoder}': input feeder thread panicked"
            )))
        }
    }
    check_status(decoder, output)
}

fn spawn_error(decoder: &str, e: &io::Error) -> SearchError {
    SearchError::Decoder(format!("failed to run '{decoder}': {e}"))
}

fn check_status(decoder: &str, output: Output) -> Result<Vec<u8>> {
    if output.status.success() {
        Ok(output.stdout)
    } else {
        let stderr = String::from_utf8_lossy(&output.stderr);
        Err(SearchError::Decoder(format!(
            "'{}' exited with {}: {}",
            decoder,
            output.status,
            stderr.trim()
        )))
    }
}
