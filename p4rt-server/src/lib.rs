/*!
Server-side control plane for a P4Runtime service.

This crate accepts gRPC connections from SDN controllers, runs the P4Runtime
master-arbitration protocol to elect a unique primary controller per role,
gates data-plane mutating RPCs on primary status, and multiplexes
bidirectional packet I/O between controllers and a pluggable switch provider
that owns the actual data plane.

The pieces:

  * [`SdnConnection`] — per-stream state for one controller connection.
  * [`SdnControllerManager`] — the registry of active connections and the
    arbitration state machine; also delivers provider-originated stream
    messages to the current primary of a role.
  * [`P4RuntimeService`](service::P4RuntimeService) — the gRPC dispatcher for
    the five P4Runtime RPCs plus `StreamChannel`.
  * [`SwitchProvider`] — the capability set a data-plane backend implements;
    injected when the service is constructed.
*/
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

mod connection;
mod manager;
mod status;
mod switch_provider;

pub mod service;
pub mod stub;

pub use connection::{ElectionId, RoleId, SdnConnection};
pub use manager::SdnControllerManager;
pub use status::Status;
pub use switch_provider::{ReadResponseWriter, SwitchProvider, WriteResults};
