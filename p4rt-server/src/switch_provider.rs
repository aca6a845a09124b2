//! The capability set a data-plane backend exposes to the control plane.
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

use crate::manager::SdnControllerManager;
use crate::status::Status;
use proto::p4runtime::{
    ForwardingPipelineConfig, ReadRequest, ReadResponse, StreamMessageRequest, WriteRequest,
};
use std::sync::Arc;

/// Per-update outcomes of a write: one entry per update in request order.
pub type WriteResults = Vec<Result<(), Status>>;

/// Sink for the chunked responses of a streamed read.  The control plane
/// hands the provider an implementation backed by the RPC's response stream.
pub trait ReadResponseWriter {
    fn write(&mut self, response: ReadResponse);
}

/// The backend that owns the data plane.  The service dispatcher authorises
/// and validates each RPC, then delegates to these capabilities; the provider
/// is responsible for its own thread-safety and every call may block.
///
/// Providers must not call back into the manager while holding locks that are
/// also taken during a manager-initiated call into the provider.
pub trait SwitchProvider: Send + Sync {
    /// Applies the updates of a Write request.  `Ok` carries one status per
    /// update; `Err` means the request failed as a whole.
    fn write_forwarding_entries(&self, request: &WriteRequest) -> Result<WriteResults, Status>;

    /// Streams the entities matching a Read request into `writer` and
    /// returns the final status.
    fn read_forwarding_entries(
        &self,
        request: &ReadRequest,
        writer: &mut dyn ReadResponseWriter,
    ) -> Result<(), Status>;

    /// Handles a non-arbitration stream message (packet-out, digest ack,
    /// other) from the primary connection of `node_id`.
    fn handle_stream_message_request(
        &self,
        node_id: u64,
        request: &StreamMessageRequest,
    ) -> Result<(), Status>;

    fn verify_forwarding_pipeline_config(
        &self,
        node_id: u64,
        config: &ForwardingPipelineConfig,
    ) -> Result<(), Status>;

    fn save_forwarding_pipeline_config(
        &self,
        node_id: u64,
        config: &ForwardingPipelineConfig,
    ) -> Result<(), Status>;

    fn commit_forwarding_pipeline_config(&self, node_id: u64) -> Result<(), Status>;

    fn reconcile_and_commit_forwarding_pipeline_config(
        &self,
        node_id: u64,
        config: &ForwardingPipelineConfig,
    ) -> Result<(), Status>;

    fn get_forwarding_pipeline_config(
        &self,
        node_id: u64,
    ) -> Result<ForwardingPipelineConfig, Status>;

    /// Called once at service construction so the provider can deliver
    /// packet-ins and other upward stream messages through
    /// [`SdnControllerManager::send_stream_message_to_primary`].
    fn attach_controller_manager(&self, manager: Arc<SdnControllerManager>);
}
