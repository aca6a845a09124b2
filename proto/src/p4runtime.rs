//! Control-plane subset of the `p4.v1` P4Runtime schema.
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

/// 128-bit election ID, split into two 64-bit halves on the wire.
#[derive(Clone, Copy, PartialEq, Eq, ::prost::Message)]
pub struct Uint128 {
    #[prost(uint64, tag = "1")]
    pub high: u64,
    #[prost(uint64, tag = "2")]
    pub low: u64,
}

impl Uint128 {
    pub fn as_u128(&self) -> u128 {
        (u128::from(self.high) << 64) | u128::from(self.low)
    }

    pub fn from_u128(value: u128) -> Uint128 {
        Uint128 {
            high: (value >> 64) as u64,
            low: value as u64,
        }
    }
}

/// A logical partition of control-plane authority over the data plane.  An
/// absent `Role` message denotes the default (root) role, which is distinct
/// from a present role with id 0.
#[derive(Clone, Copy, PartialEq, Eq, ::prost::Message)]
pub struct Role {
    #[prost(uint64, tag = "1")]
    pub id: u64,
}

/// Primary-election handshake carried on the stream channel, and echoed back
/// to controllers (with `status` filled in) as the arbitration response.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct MasterArbitrationUpdate {
    #[prost(uint64, tag = "1")]
    pub device_id: u64,
    #[prost(message, optional, tag = "2")]
    pub role: ::core::option::Option<Role>,
    /// Absent when the controller declares itself a backup.
    #[prost(message, optional, tag = "3")]
    pub election_id: ::core::option::Option<Uint128>,
    /// Populated only in responses.
    #[prost(message, optional, tag = "4")]
    pub status: ::core::option::Option<crate::status::Status>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct PacketMetadata {
    #[prost(uint32, tag = "1")]
    pub metadata_id: u32,
    #[prost(bytes = "vec", tag = "2")]
    pub value: ::prost::alloc::vec::Vec<u8>,
}

/// Packet sent by a controller for injection into the data plane.  The
/// payload is opaque to the control plane.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct PacketOut {
    #[prost(bytes = "vec", tag = "1")]
    pub payload: ::prost::alloc::vec::Vec<u8>,
    #[prost(message, repeated, tag = "2")]
    pub metadata: ::prost::alloc::vec::Vec<PacketMetadata>,
}

/// Packet punted by the data plane toward the primary controller.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct PacketIn {
    #[prost(bytes = "vec", tag = "1")]
    pub payload: ::prost::alloc::vec::Vec<u8>,
    #[prost(message, repeated, tag = "2")]
    pub metadata: ::prost::alloc::vec::Vec<PacketMetadata>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct DigestList {
    #[prost(uint32, tag = "1")]
    pub digest_id: u32,
    #[prost(uint64, tag = "2")]
    pub list_id: u64,
    #[prost(bytes = "vec", repeated, tag = "3")]
    pub data: ::prost::alloc::vec::Vec<::prost::alloc::vec::Vec<u8>>,
}

#[derive(Clone, Copy, PartialEq, Eq, ::prost::Message)]
pub struct DigestListAck {
    #[prost(uint32, tag = "1")]
    pub digest_id: u32,
    #[prost(uint64, tag = "2")]
    pub list_id: u64,
}

/// In-band error reported on a stream without terminating it.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct StreamError {
    #[prost(int32, tag = "1")]
    pub canonical_code: i32,
    #[prost(string, tag = "2")]
    pub message: ::prost::alloc::string::String,
    #[prost(message, optional, tag = "3")]
    pub packet_out: ::core::option::Option<PacketOutError>,
}

/// Echo of the offending packet-out inside a `StreamError`.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct PacketOutError {
    #[prost(message, optional, tag = "1")]
    pub packet_out: ::core::option::Option<PacketOut>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct StreamMessageRequest {
    #[prost(oneof = "stream_message_request::Update", tags = "1, 2, 3, 4")]
    pub update: ::core::option::Option<stream_message_request::Update>,
}

pub mod stream_message_request {
    #[derive(Clone, PartialEq, ::prost::Oneof)]
    pub enum Update {
        #[prost(message, tag = "1")]
        Arbitration(super::MasterArbitrationUpdate),
        #[prost(message, tag = "2")]
        Packet(super::PacketOut),
        #[prost(message, tag = "3")]
        DigestAck(super::DigestListAck),
        #[prost(bytes, tag = "4")]
        Other(::prost::alloc::vec::Vec<u8>),
    }
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct StreamMessageResponse {
    #[prost(oneof = "stream_message_response::Update", tags = "1, 2, 3, 4")]
    pub update: ::core::option::Option<stream_message_response::Update>,
}

pub mod stream_message_response {
    #[derive(Clone, PartialEq, ::prost::Oneof)]
    pub enum Update {
        #[prost(message, tag = "1")]
        Arbitration(super::MasterArbitrationUpdate),
        #[prost(message, tag = "2")]
        Packet(super::PacketIn),
        #[prost(message, tag = "3")]
        Digest(super::DigestList),
        #[prost(message, tag = "4")]
        Error(super::StreamError),
    }
}

/// A forwarding entity (table entry, multicast group, …).  The control plane
/// forwards entities to the switch provider without interpreting them.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Entity {
    #[prost(bytes = "vec", tag = "1")]
    pub entity: ::prost::alloc::vec::Vec<u8>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Update {
    /// One of the `UpdateType` values.
    #[prost(int32, tag = "1")]
    pub r#type: i32,
    #[prost(message, optional, tag = "2")]
    pub entity: ::core::option::Option<Entity>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(i32)]
pub enum UpdateType {
    Unspecified = 0,
    Insert = 1,
    Modify = 2,
    Delete = 3,
}

impl UpdateType {
    pub fn from_i32(value: i32) -> Option<UpdateType> {
        match value {
            0 => Some(UpdateType::Unspecified),
            1 => Some(UpdateType::Insert),
            2 => Some(UpdateType::Modify),
            3 => Some(UpdateType::Delete),
            _ => None,
        }
    }
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct WriteRequest {
    #[prost(uint64, tag = "1")]
    pub device_id: u64,
    #[prost(message, optional, tag = "2")]
    pub role: ::core::option::Option<Role>,
    #[prost(message, optional, tag = "3")]
    pub election_id: ::core::option::Option<Uint128>,
    #[prost(message, repeated, tag = "4")]
    pub updates: ::prost::alloc::vec::Vec<Update>,
}

#[derive(Clone, Copy, PartialEq, Eq, ::prost::Message)]
pub struct WriteResponse {}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ReadRequest {
    #[prost(uint64, tag = "1")]
    pub device_id: u64,
    #[prost(message, repeated, tag = "2")]
    pub entities: ::prost::alloc::vec::Vec<Entity>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ReadResponse {
    #[prost(message, repeated, tag = "1")]
    pub entities: ::prost::alloc::vec::Vec<Entity>,
}

/// Pipeline configuration as the control plane sees it: an opaque P4Info
/// blob, an opaque target config, and a controller-chosen cookie.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ForwardingPipelineConfig {
    #[prost(bytes = "vec", tag = "1")]
    pub p4info: ::prost::alloc::vec::Vec<u8>,
    #[prost(bytes = "vec", tag = "2")]
    pub p4_device_config: ::prost::alloc::vec::Vec<u8>,
    #[prost(message, optional, tag = "3")]
    pub cookie: ::core::option::Option<forwarding_pipeline_config::Cookie>,
}

pub mod forwarding_pipeline_config {
    #[derive(Clone, Copy, PartialEq, Eq, ::prost::Message)]
    pub struct Cookie {
        #[prost(uint64, tag = "1")]
        pub cookie: u64,
    }
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct SetForwardingPipelineConfigRequest {
    #[prost(uint64, tag = "1")]
    pub device_id: u64,
    #[prost(message, optional, tag = "2")]
    pub role: ::core::option::Option<Role>,
    #[prost(message, optional, tag = "3")]
    pub election_id: ::core::option::Option<Uint128>,
    /// One of the `SetForwardingPipelineConfigAction` values.
    #[prost(int32, tag = "4")]
    pub action: i32,
    #[prost(message, optional, tag = "5")]
    pub config: ::core::option::Option<ForwardingPipelineConfig>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(i32)]
pub enum SetForwardingPipelineConfigAction {
    Unspecified = 0,
    Verify = 1,
    VerifyAndSave = 2,
    VerifyAndCommit = 3,
    Commit = 4,
    ReconcileAndCommit = 5,
}

impl SetForwardingPipelineConfigAction {
    pub fn from_i32(value: i32) -> Option<SetForwardingPipelineConfigAction> {
        use SetForwardingPipelineConfigAction::*;
        match value {
            0 => Some(Unspecified),
            1 => Some(Verify),
            2 => Some(VerifyAndSave),
            3 => Some(VerifyAndCommit),
            4 => Some(Commit),
            5 => Some(ReconcileAndCommit),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, ::prost::Message)]
pub struct SetForwardingPipelineConfigResponse {}

#[derive(Clone, Copy, PartialEq, Eq, ::prost::Message)]
pub struct GetForwardingPipelineConfigRequest {
    #[prost(uint64, tag = "1")]
    pub device_id: u64,
    /// One of the `GetForwardingPipelineConfigResponseType` values.
    #[prost(int32, tag = "2")]
    pub response_type: i32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(i32)]
pub enum GetForwardingPipelineConfigResponseType {
    All = 0,
    CookieOnly = 1,
    P4infoAndCookie = 2,
    DeviceConfigAndCookie = 3,
}

impl GetForwardingPipelineConfigResponseType {
    pub fn from_i32(value: i32) -> Option<GetForwardingPipelineConfigResponseType> {
        use GetForwardingPipelineConfigResponseType::*;
        match value {
            0 => Some(All),
            1 => Some(CookieOnly),
            2 => Some(P4infoAndCookie),
            3 => Some(DeviceConfigAndCookie),
            _ => None,
        }
    }
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct GetForwardingPipelineConfigResponse {
    #[prost(message, optional, tag = "1")]
    pub config: ::core::option::Option<ForwardingPipelineConfig>,
}

#[derive(Clone, Copy, PartialEq, Eq, ::prost::Message)]
pub struct CapabilitiesRequest {}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct CapabilitiesResponse {
    #[prost(string, tag = "1")]
    pub p4runtime_api_version: ::prost::alloc::string::String,
}

/// Per-update status inside a failed Write's error details.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Error {
    #[prost(int32, tag = "1")]
    pub canonical_code: i32,
    #[prost(string, tag = "2")]
    pub message: ::prost::alloc::string::String,
}
