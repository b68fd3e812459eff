//! In-memory session double used by the unit tests.
//!
//! Plays the role of the server end of a [`WireSession`]: serves reads
//! from an in-memory byte vector, applies writes to it, and records
//! every request so tests can assert on counts, offsets and payloads.
//! Individual responses can be overridden through a canned-reply queue
//! to exercise protocol-violation paths.

use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU32, Ordering};

use skiff_protocol::{FileAttributes, HandleToken, Request, Response, StatusCode};

use crate::session::{SessionError, WireSession};

/// A reply that preempts the default behavior for one request.
pub enum Canned {
    /// Let the default behavior answer this request (queue placeholder).
    Default,
    Attrs(FileAttributes),
    Data(Vec<u8>),
    Status(StatusCode, &'static str),
    /// Fail at the transport level instead of answering.
    Transport(&'static str),
}

pub struct FakeRemote {
    next_id: AtomicU32,
    state: Mutex<FakeState>,
}

struct FakeState {
    content: Vec<u8>,
    report_size: bool,
    /// Cap on a single data response, to force chunked assembly and
    /// short reads.
    max_data_len: Option<usize>,
    write_code: StatusCode,
    close_code: StatusCode,
    /// Answer the next request with the wrong correlation id.
    misidentify_next: bool,
    canned: VecDeque<Canned>,
    requests: Vec<Request>,
    writes: Vec<(u64, Vec<u8>)>,
}

impl FakeRemote {
    pub fn new(content: impl Into<Vec<u8>>) -> Self {
        Self {
            next_id: AtomicU32::new(1),
            state: Mutex::new(FakeState {
                content: content.into(),
                report_size: true,
                max_data_len: None,
                write_code: StatusCode::Ok,
                close_code: StatusCode::Ok,
                misidentify_next: false,
                canned: VecDeque::new(),
                requests: Vec::new(),
                writes: Vec::new(),
            }),
        }
    }

    /// Stat responses omit the size field, forcing EOF-driven reads.
    pub fn hide_size(self) -> Self {
        self.state.lock().unwrap().report_size = false;
        self
    }

    /// Caps every data response at `len` bytes.
    pub fn max_data_len(self, len: usize) -> Self {
        self.state.lock().unwrap().max_data_len = Some(len);
        self
    }

    /// Every write is answered with `code` instead of ok.
    pub fn write_status(self, code: StatusCode) -> Self {
        self.state.lock().unwrap().write_code = code;
        self
    }

    /// The close request is answered with `code` instead of ok.
    pub fn close_status(self, code: StatusCode) -> Self {
        self.state.lock().unwrap().close_code = code;
        self
    }

    /// Queues a reply that overrides the default for one request.
    pub fn push_canned(&self, canned: Canned) {
        self.state.lock().unwrap().canned.push_back(canned);
    }

    /// The next response will carry a bogus correlation id.
    pub fn misidentify_next(&self) {
        self.state.lock().unwrap().misidentify_next = true;
    }

    pub fn token(&self) -> HandleToken {
        HandleToken::new(vec![0x01, 0x02, 0x03, 0x04])
    }

    pub fn request_count(&self) -> usize {
        self.state.lock().unwrap().requests.len()
    }

    pub fn requests(&self) -> Vec<Request> {
        self.state.lock().unwrap().requests.clone()
    }

    /// `(offset, data)` of every write applied, in arrival order.
    pub fn writes(&self) -> Vec<(u64, Vec<u8>)> {
        self.state.lock().unwrap().writes.clone()
    }

    pub fn content(&self) -> Vec<u8> {
        self.state.lock().unwrap().content.clone()
    }

    fn reply(state: &mut FakeState, req: &Request) -> Result<Response, SessionError> {
        let id = req.id();

        if let Some(canned) = state.canned.pop_front() {
            return match canned {
                Canned::Default => Self::default_reply(state, req),
                Canned::Attrs(attrs) => Ok(Response::Attrs { id, attrs }),
                Canned::Data(data) => Ok(Response::Data { id, data }),
                Canned::Status(code, message) => Ok(Response::Status {
                    id,
                    code,
                    message: message.into(),
                }),
                Canned::Transport(message) => Err(SessionError::Transport(message.into())),
            };
        }

        Self::default_reply(state, req)
    }

    fn default_reply(state: &mut FakeState, req: &Request) -> Result<Response, SessionError> {
        let id = req.id();
        let resp = match req {
            Request::Stat { .. } => {
                let attrs = if state.report_size {
                    FileAttributes::with_size(state.content.len() as u64)
                } else {
                    FileAttributes::default()
                };
                Response::Attrs { id, attrs }
            }
            Request::Read { offset, len, .. } => {
                let offset = *offset as usize;
                if offset >= state.content.len() {
                    Response::Status {
                        id,
                        code: StatusCode::Eof,
                        message: "end of file".into(),
                    }
                } else {
                    let mut take = (*len as usize).min(state.content.len() - offset);
                    if let Some(cap) = state.max_data_len {
                        take = take.min(cap);
                    }
                    Response::Data {
                        id,
                        data: state.content[offset..offset + take].to_vec(),
                    }
                }
            }
            Request::Write { offset, data, .. } => {
                if state.write_code.is_ok() {
                    let end = *offset as usize + data.len();
                    if state.content.len() < end {
                        state.content.resize(end, 0);
                    }
                    state.content[*offset as usize..end].copy_from_slice(data);
                    state.writes.push((*offset, data.clone()));
                    Response::Status {
                        id,
                        code: StatusCode::Ok,
                        message: String::new(),
                    }
                } else {
                    Response::Status {
                        id,
                        code: state.write_code,
                        message: "write rejected".into(),
                    }
                }
            }
            Request::Close { .. } => Response::Status {
                id,
                code: state.close_code,
                message: if state.close_code.is_ok() {
                    String::new()
                } else {
                    "close rejected".into()
                },
            },
        };
        Ok(resp)
    }
}

impl WireSession for FakeRemote {
    fn next_request_id(&self) -> u32 {
        self.next_id.fetch_add(1, Ordering::Relaxed)
    }

    async fn request(&self, req: Request) -> Result<Response, SessionError> {
        let mut state = self.state.lock().unwrap();
        state.requests.push(req.clone());
        let mut resp = Self::reply(&mut state, &req)?;
        if state.misidentify_next {
            state.misidentify_next = false;
            resp = match resp {
                Response::Attrs { id, attrs } => Response::Attrs { id: id + 1, attrs },
                Response::Data { id, data } => Response::Data { id: id + 1, data },
                Response::Status { id, code, message } => Response::Status {
                    id: id + 1,
                    code,
                    message,
                },
            };
        }
        Ok(resp)
    }

    fn is_connected(&self) -> bool {
        true
    }
}
