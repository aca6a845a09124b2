//! A stand-in data plane: returns canned results and records every
//! capability call.  The development server binary runs against it, and the
//! test suite uses it to observe what the dispatcher delegates.
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

use crate::connection::RoleId;
use crate::manager::SdnControllerManager;
use crate::status::Status;
use crate::switch_provider::{ReadResponseWriter, SwitchProvider, WriteResults};
use proto::p4runtime::{
    stream_message_response, ForwardingPipelineConfig, PacketIn, ReadRequest, ReadResponse,
    StreamMessageRequest, StreamMessageResponse, WriteRequest,
};
use std::sync::{Arc, Mutex};

/// Switch provider that programs nothing.  Results default to success and can
/// be overridden per capability; every call is recorded by name.
pub struct StubSwitchProvider {
    inner: Mutex<StubState>,
}

struct StubState {
    manager: Option<Arc<SdnControllerManager>>,
    calls: Vec<String>,
    write_results: WriteResults,
    stream_result: Result<(), Status>,
    verify_result: Result<(), Status>,
    save_result: Result<(), Status>,
    commit_result: Result<(), Status>,
    reconcile_result: Result<(), Status>,
    read_chunks: Vec<ReadResponse>,
    config: ForwardingPipelineConfig,
}

impl StubSwitchProvider {
    pub fn new() -> StubSwitchProvider {
        StubSwitchProvider {
            inner: Mutex::new(StubState {
                manager: None,
                calls: Vec::new(),
                write_results: Vec::new(),
                stream_result: Ok(()),
                verify_result: Ok(()),
                save_result: Ok(()),
                commit_result: Ok(()),
                reconcile_result: Ok(()),
                read_chunks: Vec::new(),
                config: ForwardingPipelineConfig::default(),
            }),
        }
    }

    /// Names of the capabilities invoked so far, in order.
    pub fn calls(&self) -> Vec<String> {
        self.inner.lock().unwrap().calls.clone()
    }

    /// Per-update statuses returned by the next writes.  Updates beyond the
    /// configured prefix succeed.
    pub fn set_write_results(&self, results: WriteResults) {
        self.inner.lock().unwrap().write_results = results;
    }

    pub fn set_stream_result(&self, result: Result<(), Status>) {
        self.inner.lock().unwrap().stream_result = result;
    }

    pub fn set_verify_result(&self, result: Result<(), Status>) {
        self.inner.lock().unwrap().verify_result = result;
    }

    pub fn set_commit_result(&self, result: Result<(), Status>) {
        self.inner.lock().unwrap().commit_result = result;
    }

    pub fn set_read_chunks(&self, chunks: Vec<ReadResponse>) {
        self.inner.lock().unwrap().read_chunks = chunks;
    }

    pub fn set_config(&self, config: ForwardingPipelineConfig) {
        self.inner.lock().unwrap().config = config;
    }

    /// Punts a packet up to the current primary of `role_id` through the
    /// attached manager.  Returns false when no manager is attached or no
    /// current primary exists.
    pub fn emit_packet_in(&self, role_id: RoleId, payload: Vec<u8>) -> bool {
        let manager = self.inner.lock().unwrap().manager.clone();
        let Some(manager) = manager else {
            return false;
        };
        let response = StreamMessageResponse {
            update: Some(stream_message_response::Update::Packet(PacketIn {
                payload,
                metadata: Vec::new(),
            })),
        };
        manager.send_stream_message_to_primary(role_id, response)
    }

    fn record(&self, call: &str) {
        self.inner.lock().unwrap().calls.push(call.to_string());
    }
}

impl Default for StubSwitchProvider {
    fn default() -> Self {
        StubSwitchProvider::new()
    }
}

impl SwitchProvider for StubSwitchProvider {
    fn write_forwarding_entries(&self, request: &WriteRequest) -> Result<WriteResults, Status> {
        let mut state = self.inner.lock().unwrap();
        state.calls.push("write".to_string());
        let mut results = state.write_results.clone();
        while results.len() < request.updates.len() {
            results.push(Ok(()));
        }
        Ok(results)
    }

    fn read_forwarding_entries(
        &self,
        _request: &ReadRequest,
        writer: &mut dyn ReadResponseWriter,
    ) -> Result<(), Status> {
        let chunks = {
            let mut state = self.inner.lock().unwrap();
            state.calls.push("read".to_string());
            state.read_chunks.clone()
        };
        for chunk in chunks {
            writer.write(chunk);
        }
        Ok(())
    }

    fn handle_stream_message_request(
        &self,
        _node_id: u64,
        _request: &StreamMessageRequest,
    ) -> Result<(), Status> {
        let mut state = self.inner.lock().unwrap();
        state.calls.push("stream_message".to_string());
        state.stream_result.clone()
    }

    fn verify_forwarding_pipeline_config(
        &self,
        _node_id: u64,
        _config: &ForwardingPipelineConfig,
    ) -> Result<(), Status> {
        self.record("verify");
        self.inner.lock().unwrap().verify_result.clone()
    }

    fn save_forwarding_pipeline_config(
        &self,
        _node_id: u64,
        _config: &ForwardingPipelineConfig,
    ) -> Result<(), Status> {
        self.record("save");
        self.inner.lock().unwrap().save_result.clone()
    }

    fn commit_forwarding_pipeline_config(&self, _node_id: u64) -> Result<(), Status> {
        self.record("commit");
        self.inner.lock().unwrap().commit_result.clone()
    }

    fn reconcile_and_commit_forwarding_pipeline_config(
        &self,
        _node_id: u64,
        _config: &ForwardingPipelineConfig,
    ) -> Result<(), Status> {
        self.record("reconcile_and_commit");
        self.inner.lock().unwrap().reconcile_result.clone()
    }

    fn get_forwarding_pipeline_config(
        &self,
        _node_id: u64,
    ) -> Result<ForwardingPipelineConfig, Status> {
        self.record("get_config");
        Ok(self.inner.lock().unwrap().config.clone())
    }

    fn attach_controller_manager(&self, manager: Arc<SdnControllerManager>) {
        self.inner.lock().unwrap().manager = Some(manager);
    }
}
