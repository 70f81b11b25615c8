//! Plugin connection to the runner
//!
//! During execution the runner opens a port for this plugin. We connect,
//! read varint-framed messages until `KillProcessRequest` or end of
//! stream, and hand every suite result to a callback.

use crate::proto::{FrameReader, MessageType, ProtoSuiteResult};
use crate::ReportError;
use std::io::{ErrorKind, Read};
use std::net::{Ipv4Addr, TcpStream};

const READ_CHUNK: usize = 8192;

/// Why the message loop stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    Killed,
    EndOfStream,
}

/// Connect to the runner on `127.0.0.1:port` and process its messages
pub fn listen<F>(port: u16, max_bytes: u64, on_result: F) -> Result<StopReason, ReportError>
where
    F: FnMut(&ProtoSuiteResult) -> Result<(), ReportError>,
{
    let stream = TcpStream::connect((Ipv4Addr::LOCALHOST, port))
        .map_err(|e| ReportError::Listener(format!("failed to connect to port {port}: {e}")))?;
    tracing::debug!("Connected to runner on port {}", port);
    handle_stream(stream, max_bytes, on_result)
}

/// Message loop over any byte stream
pub fn handle_stream<R, F>(mut stream: R, max_bytes: u64, mut on_result: F) -> Result<StopReason, ReportError>
where
    R: Read,
    F: FnMut(&ProtoSuiteResult) -> Result<(), ReportError>,
{
    let mut frames = FrameReader::new(max_bytes);
    let mut chunk = [0u8; READ_CHUNK];

    loop {
        while let Some(message) = frames.next_message()? {
            match message.message_type() {
                MessageType::SuiteExecutionResult => {
                    let result = message
                        .suite_execution_result
                        .and_then(|r| r.suite_result)
                        .unwrap_or_default();
                    on_result(&result)?;
                }
                MessageType::KillProcessRequest => {
                    tracing::debug!("Received kill request");
                    return Ok(StopReason::Killed);
                }
                other => tracing::debug!("Ignoring message {:?}", other),
            }
        }

        let n = match stream.read(&mut chunk) {
            Ok(n) => n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(ReportError::Listener(format!("read failed: {e}"))),
        };
        if n == 0 {
            if frames.pending() > 0 {
                tracing::warn!("Connection closed with {} unread bytes", frames.pending());
            }
            return Ok(StopReason::EndOfStream);
        }
        frames.extend(&chunk[..n]);
    }
}
