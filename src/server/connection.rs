//! Per-connection call handling.

use std::io::{BufReader, BufWriter};
use std::net::TcpStream;
use std::time::Duration;

use crate::error::Result;
use crate::protocol::{
    read_frame, write_frame, CallRequest, Frames, GuessRequest, ServerFrame,
};
use crate::service::GameService;

/// Serve the single call carried by `stream`, then close it.
///
/// Errors are connection-level failures only. Everything a client can get
/// wrong is answered with an `error` frame.
pub fn handle_connection(
    stream: TcpStream,
    service: &GameService,
    idle_timeout: Option<Duration>,
) -> Result<()> {
    stream.set_read_timeout(idle_timeout)?;
    let mut reader = BufReader::new(stream.try_clone()?);
    let mut writer = BufWriter::new(stream);

    let call = match read_frame::<_, CallRequest>(&mut reader) {
        Ok(Some(call)) => call,
        Ok(None) => return Ok(()),
        Err(e) if e.is_fatal_to_session() => return Err(e),
        Err(e) => {
            tracing::warn!("Rejected call: {}", e);
            return write_frame(&mut writer, &ServerFrame::error(e.to_string()));
        }
    };

    match call {
        CallRequest::Statistics(_) => {
            write_frame(&mut writer, &ServerFrame::Statistics(service.statistics()))
        }
        CallRequest::Play => {
            let session = match service.start_session() {
                Ok(session) => session,
                Err(e) => {
                    tracing::warn!("Cannot start session: {}", e);
                    return write_frame(&mut writer, &ServerFrame::error(e.to_string()));
                }
            };

            if let Err(e) = write_frame(&mut writer, &ServerFrame::Ready) {
                service.abandon(session);
                return Err(e);
            }

            let guesses = Frames::<_, GuessRequest>::new(&mut reader);
            let finished =
                service.run_session(session, guesses, |frame| write_frame(&mut writer, &frame));
            tracing::debug!(
                "Connection finished with {} session",
                finished.outcome().name()
            );
            Ok(())
        }
    }
}
