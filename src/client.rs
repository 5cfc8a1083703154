//! Network client for a running game server.

use std::io::{BufReader, BufWriter};
use std::net::{Shutdown, TcpStream};
use std::time::Duration;

use crate::error::{Result, WordleError};
use crate::protocol::{
    read_frame, write_frame, CallRequest, GuessRequest, GuessResponse, ServerFrame,
    StatisticsRequest, StatisticsResponse,
};

/// How long `Game::close` waits for the server to hang up.
const CLOSE_TIMEOUT: Duration = Duration::from_secs(5);

/// Connects to a server at a fixed address, one connection per call.
#[derive(Debug, Clone)]
pub struct Client {
    address: String,
}

impl Client {
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
        }
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    /// Fetch today's statistics.
    pub fn statistics(&self) -> Result<StatisticsResponse> {
        let mut conn = Connection::open(&self.address)?;
        conn.send(&CallRequest::Statistics(StatisticsRequest::default()))?;
        match conn.recv()? {
            ServerFrame::Statistics(stats) => Ok(stats),
            other => Err(unexpected("statistics", &other)),
        }
    }

    /// Start a game. The returned handle carries the session.
    pub fn start_game(&self) -> Result<Game> {
        let mut conn = Connection::open(&self.address)?;
        conn.send(&CallRequest::Play)?;
        match conn.recv()? {
            ServerFrame::Ready => Ok(Game { conn }),
            other => Err(unexpected("ready", &other)),
        }
    }
}

/// An open game. Dropping it abandons the session.
pub struct Game {
    conn: Connection,
}

impl Game {
    /// Submit a guess and wait for its result.
    pub fn guess(&mut self, word: &str) -> Result<GuessResponse> {
        self.conn.send(&GuessRequest::new(word))?;
        match self.conn.recv()? {
            ServerFrame::Guess(response) => Ok(response),
            other => Err(unexpected("guess", &other)),
        }
    }

    /// Hang up and wait for the server to close its side.
    ///
    /// Once this returns the server has finished with the session, so a
    /// statistics query issued afterwards already counts it.
    pub fn close(mut self) -> Result<()> {
        let stream = self.conn.reader.get_ref();
        stream.set_read_timeout(Some(CLOSE_TIMEOUT))?;
        if let Err(e) = stream.shutdown(Shutdown::Write) {
            // Already closed by the server after a finished game.
            tracing::debug!("Shutdown after server hang-up: {}", e);
        }
        while read_frame::<_, ServerFrame>(&mut self.conn.reader)?.is_some() {}
        Ok(())
    }
}

struct Connection {
    reader: BufReader<TcpStream>,
    writer: BufWriter<TcpStream>,
}

impl Connection {
    fn open(address: &str) -> Result<Self> {
        let stream = TcpStream::connect(address)?;
        Ok(Self {
            reader: BufReader::new(stream.try_clone()?),
            writer: BufWriter::new(stream),
        })
    }

    fn send<T: serde::Serialize>(&mut self, message: &T) -> Result<()> {
        write_frame(&mut self.writer, message)
    }

    fn recv(&mut self) -> Result<ServerFrame> {
        read_frame(&mut self.reader)?
            .ok_or_else(|| WordleError::protocol("server closed the connection"))
    }
}

fn unexpected(expected: &str, frame: &ServerFrame) -> WordleError {
    match frame {
        ServerFrame::Error { message } => WordleError::protocol(message.clone()),
        other => WordleError::protocol(format!("expected {} frame, got {:?}", expected, other)),
    }
}
