//! Newline-delimited message framing over a fragmented byte stream.

/// Error while reassembling messages.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum FrameError {
    /// A message grew past the allowed length
    #[error("message exceeds {limit} bytes")]
    TooLong { limit: usize },
}

/// Reassembles `\n`-terminated messages from arbitrarily sized reads.
///
/// Bytes are appended as they arrive; complete messages are handed out in
/// order with the delimiter stripped. Once every buffered message has been
/// consumed the buffer is emptied.
///
/// The length limit applies to every message, however it was split across
/// reads.
#[derive(Debug)]
pub struct Framer {
    buf: Vec<u8>,
    /// Start of the first unconsumed byte in `buf`.
    used: usize,
    /// Bytes received since the last newline.
    partial: usize,
    max_len: usize,
}

impl Framer {
    /// Create a framer refusing messages longer than `max_len` bytes.
    pub fn new(max_len: usize) -> Self {
        Self {
            buf: Vec::new(),
            used: 0,
            partial: 0,
            max_len,
        }
    }

    /// Append received bytes.
    ///
    /// Fails if any message, complete or not, is longer than the limit.
    pub fn push(&mut self, data: &[u8]) -> Result<(), FrameError> {
        let mut partial = self.partial;
        for segment in data.split(|&b| b == b'\n') {
            if partial + segment.len() > self.max_len {
                return Err(FrameError::TooLong {
                    limit: self.max_len,
                });
            }
            partial = 0;
        }
        self.partial = match data.iter().rposition(|&b| b == b'\n') {
            Some(eol) => data.len() - eol - 1,
            None => self.partial + data.len(),
        };

        if self.used > 0 {
            self.buf.drain(..self.used);
            self.used = 0;
        }
        self.buf.extend_from_slice(data);
        Ok(())
    }

    /// Take the next complete message, without its trailing newline.
    pub fn next_frame(&mut self) -> Option<Vec<u8>> {
        let pending = &self.buf[self.used..];
        let eol = pending.iter().position(|&b| b == b'\n')?;
        let frame = pending[..eol].to_vec();
        self.used += eol + 1;
        if self.used == self.buf.len() {
            self.buf.clear();
            self.used = 0;
        }
        Some(frame)
    }

    /// Number of buffered bytes not yet handed out.
    pub fn pending(&self) -> usize {
        self.buf.len() - self.used
    }

    pub fn is_empty(&self) -> bool {
        self.pending() == 0
    }
}
