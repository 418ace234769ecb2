//! Child output decoding and draining.

use encoding_rs::SHIFT_JIS;
use fastlaunch_core::error::Result;
use fastlaunch_core::process::OutputLines;
use futures::StreamExt;

/// Decodes one raw output line.
///
/// Tries UTF-8, then CP932 (Windows Japanese), and finally falls back to an
/// escaped rendering of the bytes. Never fails. Trailing whitespace is
/// stripped on the two decoded paths only.
///
/// The fallback is always wrapped in single quotes with every non-printable
/// byte as `\xNN`, so a line containing `'` renders as `b'it\'s'`.
pub fn decode(raw: &[u8]) -> String {
    if let Ok(text) = std::str::from_utf8(raw) {
        return text.trim_end().to_string();
    }
    if let Some(text) = decode_cp932(raw) {
        return text.trim_end().to_string();
    }
    format!("b'{}'", raw.escape_ascii())
}

/// Single bytes CP932 accepts but WHATWG Shift_JIS rejects.
fn cp932_single_byte(byte: u8) -> Option<char> {
    match byte {
        0xA0 => Some('\u{F8F0}'),
        0xFD => Some('\u{F8F1}'),
        0xFE => Some('\u{F8F2}'),
        0xFF => Some('\u{F8F3}'),
        _ => None,
    }
}

fn is_lead_byte(byte: u8) -> bool {
    matches!(byte, 0x81..=0x9F | 0xE0..=0xFC)
}

/// Strict CP932 decoding. Runs between the CP932-only single bytes are
/// handed to `encoding_rs`; a byte in trail position is never split off.
fn decode_cp932(raw: &[u8]) -> Option<String> {
    let mut text = String::with_capacity(raw.len());
    let mut run_start = 0;
    let mut i = 0;
    while i < raw.len() {
        let byte = raw[i];
        if is_lead_byte(byte) {
            i += 2;
            continue;
        }
        if let Some(ch) = cp932_single_byte(byte) {
            text.push_str(&SHIFT_JIS.decode_without_bom_handling_and_without_replacement(
                &raw[run_start..i],
            )?);
            text.push(ch);
            run_start = i + 1;
        }
        i += 1;
    }
    let tail = &raw[run_start.min(raw.len())..];
    text.push_str(&SHIFT_JIS.decode_without_bom_handling_and_without_replacement(tail)?);
    Some(text)
}

/// Logs every line of `lines` at debug level until the child closes its output.
pub async fn drain_output(mut lines: OutputLines) -> Result<()> {
    while let Some(line) = lines.next().await {
        let line = line?;
        tracing::debug!("{}", decode(&line));
    }
    Ok(())
}
