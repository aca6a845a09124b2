//! Per-stream connection state.
/*
Copyright (c) 2022 VMware, Inc.
SPDX-License-Identifier: MIT
Permission is hereby granted, free of charge, to any person obtaining a copy
of this software and associated documentation files (the "Software"), to deal
in the Software without restriction, including without limitation the rights
to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
copies of the Software, and to permit persons to whom the Software is
furnished to do so, subject to the following conditions:
The above copyright notice and this permission notice shall be included in all
copies or substantial portions of the Software.
THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
SOFTWARE.
*/

use proto::p4runtime::StreamMessageResponse;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use tokio::sync::mpsc;
use tracing::{event, Level};

/// A role is a logical partition of control-plane authority.  `None` is the
/// default (root) role, distinct from `Some(0)`.
pub type RoleId = Option<u64>;

/// Election IDs compare as unsigned 128-bit integers; larger values win.
pub type ElectionId = u128;

static NEXT_CONNECTION_ID: AtomicU64 = AtomicU64::new(1);

/// One controller's `StreamChannel` connection, as the manager sees it: the
/// send side of the stream plus the arbitration state the controller has
/// declared.
///
/// A connection starts uninitialized.  The first accepted arbitration update
/// initializes it and registers it with the manager; from then on its role
/// and election ID are only mutated by that stream's own arbitration
/// updates, always under the manager lock.
pub struct SdnConnection {
    id: u64,
    sender: mpsc::UnboundedSender<StreamMessageResponse>,
    state: Mutex<ConnectionState>,
}

#[derive(Default)]
struct ConnectionState {
    initialized: bool,
    role_id: RoleId,
    election_id: Option<ElectionId>,
}

impl SdnConnection {
    /// Creates a connection wrapping `sender`, the queue drained by the
    /// stream's writer task.  Each connection gets a unique id; the manager
    /// uses it for registry membership instead of pointer identity.
    pub fn new(sender: mpsc::UnboundedSender<StreamMessageResponse>) -> SdnConnection {
        SdnConnection {
            id: NEXT_CONNECTION_ID.fetch_add(1, Ordering::Relaxed),
            sender,
            state: Mutex::new(ConnectionState::default()),
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn role_id(&self) -> RoleId {
        self.state.lock().unwrap().role_id
    }

    pub fn set_role_id(&self, role_id: RoleId) {
        self.state.lock().unwrap().role_id = role_id;
    }

    pub fn election_id(&self) -> Option<ElectionId> {
        self.state.lock().unwrap().election_id
    }

    pub fn set_election_id(&self, election_id: Option<ElectionId>) {
        self.state.lock().unwrap().election_id = election_id;
    }

    pub fn is_initialized(&self) -> bool {
        self.state.lock().unwrap().initialized
    }

    pub fn initialize(&self) {
        self.state.lock().unwrap().initialized = true;
    }

    /// Queues `response` for delivery on this stream.  A failure means the
    /// stream's writer is gone; it is logged and otherwise ignored, since the
    /// read side of the stream will terminate and trigger a disconnect.
    pub fn send(&self, response: StreamMessageResponse) {
        if self.sender.send(response).is_err() {
            event!(
                Level::ERROR,
                "could not send stream message response to connection {}",
                self.id
            );
        }
    }
}
