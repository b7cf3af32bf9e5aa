// Incremental UTF-8 decoding for streamed response bodies

const REPLACEMENT: char = char::REPLACEMENT_CHARACTER;
const BOM: &str = "\u{feff}";

/// Decodes a byte stream into text one chunk at a time.
///
/// Chunk boundaries carry no meaning, so a multi-byte character may be split
/// between two chunks. The decoder keeps the incomplete tail of each chunk
/// and prepends it to the next one. Invalid sequences become U+FFFD instead
/// of failing the stream.
#[derive(Debug, Default)]
pub struct Utf8StreamDecoder {
    pending: Vec<u8>,
    bom_checked: bool,
}

impl Utf8StreamDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode the next chunk, returning every complete character seen so far.
    pub fn decode(&mut self, chunk: &[u8]) -> String {
        let mut bytes = std::mem::take(&mut self.pending);
        bytes.extend_from_slice(chunk);

        let mut out = String::with_capacity(bytes.len());
        let mut rest = bytes.as_slice();

        loop {
            match std::str::from_utf8(rest) {
                Ok(valid) => {
                    out.push_str(valid);
                    break;
                }
                Err(err) => {
                    let (valid, after) = rest.split_at(err.valid_up_to());
                    // `valid_up_to` marks a prefix that is already UTF-8
                    out.push_str(std::str::from_utf8(valid).unwrap_or_default());

                    match err.error_len() {
                        Some(len) => {
                            out.push(REPLACEMENT);
                            rest = &after[len..];
                        }
                        None => {
                            // Truncated sequence at the end: wait for more bytes
                            self.pending.extend_from_slice(after);
                            break;
                        }
                    }
                }
            }
        }

        self.strip_bom(out)
    }

    /// Flush whatever is still buffered at end of stream and reset.
    pub fn finish(&mut self) -> String {
        let out = if self.pending.is_empty() {
            String::new()
        } else {
            self.pending.clear();
            REPLACEMENT.to_string()
        };
        self.bom_checked = false;
        out
    }

    /// Number of bytes held back waiting for the rest of a character.
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    fn strip_bom(&mut self, text: String) -> String {
        if self.bom_checked || text.is_empty() {
            return text;
        }
        self.bom_checked = true;
        match text.strip_prefix(BOM) {
            Some(rest) => rest.to_string(),
            None => text,
        }
    }
}
