//! Resumable zlib inflate session: header validation, block dispatch and
//! trailer verification, driven one `step` call at a time.
//!
//! # State machine
//!
//! ```text
//!   Method ─► Flag ─► Start ─► Blocks ─┬─► Check4 ─► Check3 ─► Check2 ─► Check1 ─► Done
//!                       ▲              ├────────────────►┘ (decoder read ahead)
//!   (raw mode starts here)             └─► Done (raw mode)
//!
//!   any framing error ─► Error (sticky)
//! ```
//!
//! Each `step` runs the machine until a mode's precondition cannot be met
//! with the bytes at hand, or a terminal mode is reached. All resumption
//! state lives in the mode itself, so a session can be paused indefinitely
//! between calls.

use crate::inflate::blocks::{
    BlockDecoder, BlockStatus, DecoderFactory, MinizFactory, ReadAhead,
};
use crate::inflate::checksum::TrailerCheck;
use crate::inflate::cursor::ByteCursor;
use crate::inflate::types::{
    DataError, InflateError, InflateMode, Status, StepResult, DEF_WBITS, FLG_RESERVED,
    HEADER_CHECK_MODULUS, MAX_WBITS, MIN_WBITS, Z_DEFLATED,
};

// ─────────────────────────────────────────────────────────────────────────────
// Session internals
// ─────────────────────────────────────────────────────────────────────────────

/// Mode plus the data that only exists in that mode.
enum State<D> {
    Method,
    Flag { method: u8 },
    Start,
    Blocks(D),
    Check(TrailerCheck),
    Done,
    Error(DataError),
}

struct Session<D> {
    state: State<D>,
    /// No zlib header or trailer: raw DEFLATE.
    header_skip: bool,
    window_bits: u8,
}

impl<D: BlockDecoder> Session<D> {
    fn new(window_bits: u8, header_skip: bool) -> Self {
        Session {
            state: if header_skip { State::Start } else { State::Method },
            header_skip,
            window_bits,
        }
    }

    fn mode(&self) -> InflateMode {
        match &self.state {
            State::Method => InflateMode::Method,
            State::Flag { .. } => InflateMode::Flag,
            State::Start => InflateMode::Start,
            State::Blocks(_) => InflateMode::Blocks,
            State::Check(check) => match check.remaining() {
                4 => InflateMode::Check4,
                3 => InflateMode::Check3,
                2 => InflateMode::Check2,
                _ => InflateMode::Check1,
            },
            State::Done => InflateMode::Done,
            State::Error(_) => InflateMode::Error,
        }
    }

    fn fail(&mut self, kind: DataError) -> Result<Status, InflateError> {
        self.state = State::Error(kind);
        Err(InflateError::Data(kind))
    }

    /// Run the state machine over `input`, writing decoded bytes to
    /// `output[*written..]`.
    fn run<F>(
        &mut self,
        input: &mut ByteCursor<'_>,
        output: &mut [u8],
        written: &mut usize,
        factory: &mut F,
    ) -> Result<Status, InflateError>
    where
        F: DecoderFactory<Decoder = D>,
    {
        let mut r = Status::NeedMoreInput;
        loop {
            match &mut self.state {
                State::Method => {
                    let Some(method) = input.next_byte() else { return Ok(r) };
                    r = Status::Ok;
                    if method & 0x0F != Z_DEFLATED {
                        return self.fail(DataError::UnsupportedMethod);
                    }
                    if method >> 4 > self.window_bits {
                        return self.fail(DataError::InvalidWindowSize);
                    }
                    self.state = State::Flag { method };
                }

                State::Flag { method } => {
                    let method = *method;
                    let Some(flag) = input.next_byte() else { return Ok(r) };
                    r = Status::Ok;
                    if flag & FLG_RESERVED != 0 {
                        return self.fail(DataError::ReservedBitSet);
                    }
                    if ((u32::from(method) << 8) + u32::from(flag)) % HEADER_CHECK_MODULUS != 0 {
                        return self.fail(DataError::HeaderChecksumMismatch);
                    }
                    self.state = State::Start;
                }

                State::Start => {
                    let decoder = factory.create(1usize << self.window_bits)?;
                    self.state = State::Blocks(decoder);
                }

                State::Blocks(decoder) => {
                    let p = decoder.decode(input.remaining(), &mut output[*written..]);
                    input.advance(p.consumed);
                    *written += p.written;
                    match p.status {
                        BlockStatus::StreamEnd => {}
                        BlockStatus::Progress => return Ok(Status::Ok),
                        BlockStatus::NeedsInput => return Ok(r),
                        BlockStatus::Failed(msg) => {
                            return Err(InflateError::Data(DataError::BlockData(msg)))
                        }
                    }

                    let trailer = decoder.finish();
                    r = Status::Ok;
                    // Overwriting the state drops the decoder.
                    self.state = match (self.header_skip, trailer.read_ahead) {
                        (true, ReadAhead::Exact) => State::Done,
                        (true, ReadAhead::TrailerByte(_)) => {
                            return self.fail(DataError::InternalFraming)
                        }
                        (false, ReadAhead::TrailerByte(first)) => {
                            State::Check(TrailerCheck::seeded(trailer.checksum, first))
                        }
                        (false, ReadAhead::Exact) => {
                            State::Check(TrailerCheck::new(trailer.checksum))
                        }
                    };
                }

                State::Check(check) => {
                    let Some(b) = input.next_byte() else { return Ok(r) };
                    r = Status::Ok;
                    check.push(b);
                    if check.is_complete() {
                        if !check.matches() {
                            return self.fail(DataError::DataIntegrityMismatch);
                        }
                        self.state = State::Done;
                    }
                }

                State::Done => return Ok(Status::StreamEnd),

                State::Error(kind) => return Err(InflateError::Data(*kind)),
            }
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Inflater handle
// ─────────────────────────────────────────────────────────────────────────────

/// Caller-owned inflate handle.
///
/// Holds the session (absent once [`end`](Self::end) has run), the decoder
/// factory, cumulative counters and the last error message.
///
/// ```
/// use zinflate::inflate::{Inflater, Status};
///
/// let zlib_abc = [0x78, 0x9C, 0x4B, 0x4C, 0x4A, 0x06, 0x00, 0x02, 0x4D, 0x01, 0x27];
/// let mut inf = Inflater::new();
/// let mut out = [0u8; 16];
/// let res = inf.step(&zlib_abc, &mut out);
/// assert_eq!(res.status, Ok(Status::StreamEnd));
/// assert_eq!(&out[..res.bytes_written], b"abc");
/// ```
pub struct Inflater<F: DecoderFactory = MinizFactory> {
    factory: F,
    session: Option<Box<Session<F::Decoder>>>,
    /// Window argument as given at construction; negative = raw.
    window_param: i32,
    total_in: u64,
    total_out: u64,
    msg: Option<&'static str>,
}

/// Split a signed window argument into `(window_bits, header_skip)`.
fn parse_window_param(window: i32) -> Result<(u8, bool), InflateError> {
    let header_skip = window < 0;
    let bits = window.unsigned_abs();
    if bits < u32::from(MIN_WBITS) || bits > u32::from(MAX_WBITS) {
        return Err(InflateError::InvalidArgument);
    }
    Ok((bits as u8, header_skip))
}

impl Inflater<MinizFactory> {
    /// zlib session with a 32 KiB window.
    pub fn new() -> Self {
        Inflater::from_parts(DEF_WBITS, false, MinizFactory::new())
    }

    /// Session from a signed window argument: `8..=15` for zlib streams,
    /// `-15..=-8` for raw DEFLATE streams (no header, no trailer).
    ///
    /// # Errors
    ///
    /// [`InflateError::InvalidArgument`] when `|window|` is outside `8..=15`.
    pub fn with_window(window: i32) -> Result<Self, InflateError> {
        Inflater::build(window, MinizFactory::new())
    }

    /// Session with explicit window bits and header handling.
    pub fn with_options(window_bits: u8, header_skip: bool) -> Result<Self, InflateError> {
        let w = i32::from(window_bits);
        Inflater::build(if header_skip { -w } else { w }, MinizFactory::new())
    }
}

impl Default for Inflater<MinizFactory> {
    fn default() -> Self {
        Inflater::new()
    }
}

impl<F: DecoderFactory> Inflater<F> {
    /// Session whose block decoders come from `factory`.
    pub fn with_factory(window: i32, factory: F) -> Result<Self, InflateError> {
        Inflater::build(window, factory)
    }

    fn build(window: i32, factory: F) -> Result<Self, InflateError> {
        let (bits, header_skip) = parse_window_param(window)?;
        Ok(Inflater::from_parts(bits, header_skip, factory))
    }

    fn from_parts(window_bits: u8, header_skip: bool, factory: F) -> Self {
        let w = i32::from(window_bits);
        Inflater {
            factory,
            session: Some(Box::new(Session::new(window_bits, header_skip))),
            window_param: if header_skip { -w } else { w },
            total_in: 0,
            total_out: 0,
            msg: None,
        }
    }

    /// Decode as much of `input` into `output` as the current mode allows.
    ///
    /// Returns [`Status::NeedMoreInput`] when nothing could be done,
    /// [`Status::Ok`] after partial progress and [`Status::StreamEnd`] once
    /// the stream is complete (and on every later call). Framing errors put
    /// the session into a sticky error mode; later calls return the same
    /// error without touching `input`.
    pub fn step(&mut self, input: &[u8], output: &mut [u8]) -> StepResult {
        let Some(session) = self.session.as_deref_mut() else {
            return StepResult::new(0, 0, Err(InflateError::InvalidArgument));
        };

        let mut cursor = ByteCursor::new(input);
        let mut written = 0usize;
        let status = session.run(&mut cursor, output, &mut written, &mut self.factory);

        let consumed = cursor.consumed();
        self.total_in += consumed as u64;
        self.total_out += written as u64;
        if let Err(InflateError::Data(kind)) = status {
            self.msg = Some(kind.message());
        }
        StepResult::new(consumed, written, status)
    }

    /// Tear the session down, dropping any live block decoder.
    ///
    /// # Errors
    ///
    /// [`InflateError::InvalidArgument`] if the session was already ended.
    pub fn end(&mut self) -> Result<(), InflateError> {
        match self.session.take() {
            Some(_) => Ok(()),
            None => Err(InflateError::InvalidArgument),
        }
    }

    /// End the session and start a fresh one with the original window
    /// argument. All partial progress, counters and the message are discarded.
    ///
    /// # Errors
    ///
    /// [`InflateError::InvalidArgument`] if the session was already ended.
    pub fn reset(&mut self) -> Result<(), InflateError> {
        self.end()?;
        let (bits, header_skip) = parse_window_param(self.window_param)?;
        self.session = Some(Box::new(Session::new(bits, header_skip)));
        self.total_in = 0;
        self.total_out = 0;
        self.msg = None;
        Ok(())
    }

    /// Resynchronisation stub: discards all of `input` and reports
    /// [`DataError::Desync`]. No sync point is searched for and the mode is
    /// left unchanged.
    pub fn sync(&mut self, input: &[u8]) -> StepResult {
        if self.session.is_none() {
            return StepResult::new(0, 0, Err(InflateError::InvalidArgument));
        }
        if input.is_empty() {
            return StepResult::new(0, 0, Ok(Status::NeedMoreInput));
        }
        let mut cursor = ByteCursor::new(input);
        let skipped = cursor.drain();
        self.total_in += skipped as u64;
        self.msg = Some(DataError::Desync.message());
        StepResult::new(skipped, 0, Err(InflateError::Data(DataError::Desync)))
    }

    /// Current mode, or `None` once ended.
    pub fn mode(&self) -> Option<InflateMode> {
        self.session.as_ref().map(|s| s.mode())
    }

    /// Log2 window size, or `None` once ended.
    pub fn window_bits(&self) -> Option<u8> {
        self.session.as_ref().map(|s| s.window_bits)
    }

    /// `true` for raw DEFLATE sessions (no header, no trailer).
    pub fn is_raw(&self) -> bool {
        self.window_param < 0
    }

    #[inline]
    pub fn is_ended(&self) -> bool {
        self.session.is_none()
    }

    /// Input bytes consumed since construction or the last reset.
    #[inline]
    pub fn total_in(&self) -> u64 {
        self.total_in
    }

    /// Output bytes produced since construction or the last reset.
    #[inline]
    pub fn total_out(&self) -> u64 {
        self.total_out
    }

    /// Message of the most recent data error.
    #[inline]
    pub fn last_message(&self) -> Option<&'static str> {
        self.msg
    }

    pub fn factory(&self) -> &F {
        &self.factory
    }
}

impl<F: DecoderFactory> std::fmt::Debug for Inflater<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Inflater")
            .field("mode", &self.mode())
            .field("window_param", &self.window_param)
            .field("total_in", &self.total_in)
            .field("total_out", &self.total_out)
            .field("msg", &self.msg)
            .finish()
    }
}
