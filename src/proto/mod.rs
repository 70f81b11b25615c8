//! Wire format of the Gauge runner: message definitions, snapshot decoding
//! and varint framing.

mod messages;

pub use messages::*;

use crate::ReportError;
use prost::Message as _;

/// Largest varint header: 10 bytes encode any u64
const MAX_VARINT_LEN: usize = 10;

/// Decode a persisted suite result.
///
/// Accepts a bare encoding as well as a length-delimited one (varint prefix
/// equal to the remaining length).
pub fn decode_snapshot(bytes: &[u8]) -> Result<ProtoSuiteResult, ReportError> {
    if let Some(body) = length_delimited_body(bytes) {
        if let Ok(result) = ProtoSuiteResult::decode(body) {
            return Ok(result);
        }
    }
    Ok(ProtoSuiteResult::decode(bytes)?)
}

fn length_delimited_body(bytes: &[u8]) -> Option<&[u8]> {
    let mut rest = bytes;
    let len = prost::encoding::decode_varint(&mut rest).ok()?;
    (!rest.is_empty() && len == rest.len() as u64).then_some(rest)
}

/// Accumulates bytes read from a stream and splits them into
/// varint-prefixed [`Message`] frames.
#[derive(Debug)]
pub struct FrameReader {
    buffer: Vec<u8>,
    limit: u64,
}

impl FrameReader {
    /// `limit` caps the size of a single frame body in bytes
    pub fn new(limit: u64) -> Self {
        Self {
            buffer: Vec::with_capacity(8192),
            limit,
        }
    }

    pub fn extend(&mut self, bytes: &[u8]) {
        self.buffer.extend_from_slice(bytes);
    }

    /// Bytes received but not yet consumed as frames
    pub fn pending(&self) -> usize {
        self.buffer.len()
    }

    /// Next complete message, or `None` until more bytes arrive.
    /// Frames that fail to decode are dropped with a warning.
    pub fn next_message(&mut self) -> Result<Option<Message>, ReportError> {
        loop {
            let mut rest = self.buffer.as_slice();
            let len = match prost::encoding::decode_varint(&mut rest) {
                Ok(len) => len,
                Err(_) if self.buffer.len() < MAX_VARINT_LEN => return Ok(None),
                Err(e) => return Err(ReportError::Listener(format!("corrupt frame header: {e}"))),
            };
            if len > self.limit {
                return Err(ReportError::FrameTooLarge {
                    size: len,
                    limit: self.limit,
                });
            }
            let header = self.buffer.len() - rest.len();
            let end = header + len as usize;
            if self.buffer.len() < end {
                return Ok(None);
            }

            let decoded = Message::decode(&self.buffer[header..end]);
            self.buffer.drain(..end);
            match decoded {
                Ok(message) => return Ok(Some(message)),
                Err(e) => tracing::warn!("Failed to read proto message: {}", e),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use prost::Message as _;

    fn suite(project: &str) -> ProtoSuiteResult {
        ProtoSuiteResult {
            project_name: project.to_string(),
            environment: "default".to_string(),
            execution_time: 113_000,
            success_rate: 100.0,
            ..Default::default()
        }
    }

    fn framed(message: &Message) -> Vec<u8> {
        message.encode_length_delimited_to_vec()
    }

    fn result_message(project: &str) -> Message {
        Message {
            message_type: MessageType::SuiteExecutionResult as i32,
            suite_execution_result: Some(SuiteExecutionResult {
                suite_result: Some(suite(project)),
            }),
            ..Default::default()
        }
    }

    // --- decode_snapshot ---

    #[test]
    fn decode_snapshot_bare() {
        let bytes = suite("bare").encode_to_vec();
        let decoded = decode_snapshot(&bytes).unwrap();
        assert_eq!(decoded.project_name, "bare");
        assert_eq!(decoded.execution_time, 113_000);
    }

    #[test]
    fn decode_snapshot_length_delimited() {
        let bytes = suite("delimited").encode_length_delimited_to_vec();
        let decoded = decode_snapshot(&bytes).unwrap();
        assert_eq!(decoded.project_name, "delimited");
        assert_eq!(decoded.environment, "default");
    }

    #[test]
    fn decode_snapshot_rejects_garbage() {
        let err = decode_snapshot(&[0xff, 0xff, 0xff]).unwrap_err();
        assert!(matches!(err, ReportError::Decode(_)));
    }

    #[test]
    fn decode_snapshot_empty_is_default() {
        let decoded = decode_snapshot(&[]).unwrap();
        assert!(decoded.spec_results.is_empty());
        assert_eq!(decoded.project_name, "");
    }

    // --- FrameReader ---

    #[test]
    fn frame_reader_waits_for_complete_frame() {
        let bytes = framed(&result_message("split"));
        let (head, tail) = bytes.split_at(bytes.len() / 2);

        let mut reader = FrameReader::new(1024 * 1024);
        reader.extend(head);
        assert!(reader.next_message().unwrap().is_none());

        reader.extend(tail);
        let message = reader.next_message().unwrap().unwrap();
        assert_eq!(message.message_type(), MessageType::SuiteExecutionResult);
        assert_eq!(reader.pending(), 0);
    }

    #[test]
    fn frame_reader_yields_frames_in_order() {
        let kill = Message {
            message_type: MessageType::KillProcessRequest as i32,
            kill_process_request: Some(KillProcessRequest {}),
            ..Default::default()
        };
        let mut bytes = framed(&result_message("first"));
        bytes.extend(framed(&kill));

        let mut reader = FrameReader::new(1024 * 1024);
        reader.extend(&bytes);
        let first = reader.next_message().unwrap().unwrap();
        let second = reader.next_message().unwrap().unwrap();
        assert_eq!(first.message_type(), MessageType::SuiteExecutionResult);
        assert_eq!(second.message_type(), MessageType::KillProcessRequest);
        assert!(reader.next_message().unwrap().is_none());
    }

    #[test]
    fn frame_reader_rejects_oversized_frame() {
        let bytes = framed(&result_message("big"));
        let mut reader = FrameReader::new(4);
        reader.extend(&bytes);
        let err = reader.next_message().unwrap_err();
        assert!(matches!(err, ReportError::FrameTooLarge { limit: 4, .. }));
    }

    #[test]
    fn frame_reader_skips_undecodable_frame() {
        // length 2, then an invalid wire type, then a valid frame
        let mut bytes = vec![2, 0x0f, 0x00];
        bytes.extend(framed(&result_message("after")));

        let mut reader = FrameReader::new(1024 * 1024);
        reader.extend(&bytes);
        let message = reader.next_message().unwrap().unwrap();
        let project = message
            .suite_execution_result
            .and_then(|r| r.suite_result)
            .map(|s| s.project_name);
        assert_eq!(project.as_deref(), Some("after"));
    }
}
