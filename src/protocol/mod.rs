//! Wire messages.
//!
//! Everything on the wire is one JSON object per line. Clients open with a
//! [`CallRequest`]; the server answers with [`ServerFrame`]s.

pub mod framing;
pub mod request;
pub mod response;

pub use framing::{read_frame, write_frame, Frames, MAX_FRAME_BYTES};
pub use request::{CallRequest, GuessRequest, StatisticsRequest};
pub use response::{
    GuessResponse, LetterResultMessage, ServerFrame, StatisticsResponse, WireStatus,
};
