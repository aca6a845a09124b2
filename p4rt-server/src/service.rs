//! The gRPC dispatcher: implements the five P4Runtime RPCs and the
//! bidirectional `StreamChannel`, gating requests through the controller
//! manager and delegating approved work to the switch provider.
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

use crate::connection::{ElectionId, RoleId, SdnConnection};
use crate::manager::{pretty_election_id, SdnControllerManager};
use crate::status::Status;
use crate::switch_provider::{ReadResponseWriter, SwitchProvider, WriteResults};
use futures_util::{FutureExt, SinkExt, TryFutureExt, TryStreamExt};
use grpcio::{
    DuplexSink, RequestStream, RpcContext, RpcStatus, RpcStatusCode, ServerStreamingSink,
    UnarySink, WriteFlags,
};
use prost::Message;
use proto::p4runtime::{
    stream_message_request, stream_message_response, CapabilitiesRequest, CapabilitiesResponse,
    ForwardingPipelineConfig, GetForwardingPipelineConfigRequest,
    GetForwardingPipelineConfigResponse, GetForwardingPipelineConfigResponseType, PacketOut,
    PacketOutError, ReadRequest, ReadResponse, Role, SetForwardingPipelineConfigAction,
    SetForwardingPipelineConfigRequest, SetForwardingPipelineConfigResponse, StreamError,
    StreamMessageRequest, StreamMessageResponse, Uint128, WriteRequest, WriteResponse,
};
use proto::p4runtime_grpc::P4Runtime;
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};
use tracing::{event, Level};

/// P4Runtime API version reported by the Capabilities RPC.
pub const P4RUNTIME_API_VERSION: &str = "1.3.0";

/// The P4Runtime service.  Owns the controller manager and the injected
/// switch provider; cloned by the gRPC layer into each method handler.
#[derive(Clone)]
pub struct P4RuntimeService {
    manager: Arc<SdnControllerManager>,
    provider: Arc<dyn SwitchProvider>,
}

impl P4RuntimeService {
    /// Builds the service around `provider` and attaches a fresh controller
    /// manager to it, so the provider can deliver packet-ins upward.
    pub fn new(provider: Arc<dyn SwitchProvider>) -> P4RuntimeService {
        let manager = Arc::new(SdnControllerManager::new());
        provider.attach_controller_manager(Arc::clone(&manager));
        P4RuntimeService { manager, provider }
    }

    pub fn controller_manager(&self) -> &Arc<SdnControllerManager> {
        &self.manager
    }
}

fn unary_fail<T: Send + 'static>(ctx: &RpcContext, sink: UnarySink<T>, status: RpcStatus) {
    let f = sink
        .fail(status)
        .map_err(|e| event!(Level::ERROR, "failed to send error: {:?}", e))
        .map(|_| ());
    ctx.spawn(f);
}

fn unary_success<T: Send + 'static>(ctx: &RpcContext, sink: UnarySink<T>, reply: T) {
    let f = sink
        .success(reply)
        .map_err(|e: grpcio::Error| event!(Level::ERROR, "failed to send response: {:?}", e))
        .map(|_| ());
    ctx.spawn(f);
}

/// Splits a request's role and election ID into the manager's optional
/// representation.  An absent role is the default role; an absent election
/// ID marks the caller as a backup.
fn credentials(
    role: &Option<Role>,
    election_id: &Option<Uint128>,
) -> (RoleId, Option<ElectionId>) {
    (
        role.as_ref().map(|role| role.id),
        election_id.as_ref().map(Uint128::as_u128),
    )
}

/// Builds the in-band `StreamMessageResponse` error for `status`, echoing the
/// offending packet when there is one.
fn error_response(status: &Status, packet: Option<PacketOut>) -> StreamMessageResponse {
    StreamMessageResponse {
        update: Some(stream_message_response::Update::Error(StreamError {
            canonical_code: status.code.into(),
            message: status.message.clone(),
            packet_out: packet.map(|packet_out| PacketOutError {
                packet_out: Some(packet_out),
            }),
        })),
    }
}

fn write_request(
    manager: &SdnControllerManager,
    provider: &dyn SwitchProvider,
    request: &WriteRequest,
) -> Result<WriteResponse, RpcStatus> {
    let (role_id, election_id) = credentials(&request.role, &request.election_id);
    manager.allow_request(role_id, election_id)?;

    if request.device_id == 0 {
        return Err(Status::invalid_argument("device_id can not be 0 or null.").into());
    }
    if request.updates.is_empty() {
        return Ok(WriteResponse::default());
    }

    let results = provider.write_forwarding_entries(request)?;
    if results.iter().all(|result| result.is_ok()) {
        Ok(WriteResponse::default())
    } else {
        Err(aggregate_write_error(&results))
    }
}

/// Folds per-update failures into one RPC-level error whose details carry a
/// status for every update, in request order.
fn aggregate_write_error(results: &WriteResults) -> RpcStatus {
    let details = proto::status::Status {
        code: RpcStatusCode::UNKNOWN.into(),
        message: "one or more write updates failed".to_string(),
        details: results
            .iter()
            .map(|result| match result {
                Ok(()) => proto::p4runtime::Error {
                    canonical_code: RpcStatusCode::OK.into(),
                    message: String::new(),
                },
                Err(status) => proto::p4runtime::Error {
                    canonical_code: status.code.into(),
                    message: status.message.clone(),
                },
            })
            .collect(),
    };
    RpcStatus::with_details(
        RpcStatusCode::UNKNOWN,
        "one or more write updates failed".to_string(),
        details.encode_to_vec(),
    )
}

fn read_request(
    provider: &dyn SwitchProvider,
    request: &ReadRequest,
    writer: &mut dyn ReadResponseWriter,
) -> Result<(), Status> {
    if request.entities.is_empty() {
        return Ok(());
    }
    if request.device_id == 0 {
        return Err(Status::invalid_argument("Device ID cannot be 0."));
    }
    provider.read_forwarding_entries(request, writer)
}

fn set_pipeline_request(
    manager: &SdnControllerManager,
    provider: &dyn SwitchProvider,
    request: &SetForwardingPipelineConfigRequest,
) -> Result<SetForwardingPipelineConfigResponse, RpcStatus> {
    event!(
        Level::INFO,
        "received SetForwardingPipelineConfig request from election ID {}",
        pretty_election_id(request.election_id.as_ref().map(Uint128::as_u128))
    );

    let (role_id, election_id) = credentials(&request.role, &request.election_id);
    manager.allow_request(role_id, election_id)?;

    let node_id = request.device_id;
    if node_id == 0 {
        return Err(Status::invalid_argument("Invalid device ID.").into());
    }

    let config = request.config.clone().unwrap_or_default();
    use SetForwardingPipelineConfigAction::*;
    let result = match SetForwardingPipelineConfigAction::from_i32(request.action) {
        Some(Unspecified) => return Err(Status::unknown("Action is Unspecified").into()),
        Some(Verify) => provider.verify_forwarding_pipeline_config(node_id, &config),
        Some(VerifyAndSave) => provider
            .verify_forwarding_pipeline_config(node_id, &config)
            .and_then(|()| provider.save_forwarding_pipeline_config(node_id, &config)),
        Some(VerifyAndCommit) => provider
            .verify_forwarding_pipeline_config(node_id, &config)
            .and_then(|()| provider.commit_forwarding_pipeline_config(node_id)),
        Some(Commit) => provider.commit_forwarding_pipeline_config(node_id),
        Some(ReconcileAndCommit) => {
            provider.reconcile_and_commit_forwarding_pipeline_config(node_id, &config)
        }
        None => return Err(Status::unimplemented("Invalid action passed in").into()),
    };
    result?;
    Ok(SetForwardingPipelineConfigResponse::default())
}

fn get_pipeline_request(
    provider: &dyn SwitchProvider,
    request: &GetForwardingPipelineConfigRequest,
) -> Result<GetForwardingPipelineConfigResponse, RpcStatus> {
    let config = provider.get_forwarding_pipeline_config(request.device_id)?;

    use GetForwardingPipelineConfigResponseType::*;
    let projected = match GetForwardingPipelineConfigResponseType::from_i32(request.response_type)
    {
        Some(All) => config,
        Some(CookieOnly) => ForwardingPipelineConfig {
            cookie: config.cookie,
            ..Default::default()
        },
        Some(P4infoAndCookie) => ForwardingPipelineConfig {
            p4info: config.p4info,
            cookie: config.cookie,
            ..Default::default()
        },
        Some(DeviceConfigAndCookie) => ForwardingPipelineConfig {
            p4_device_config: config.p4_device_config,
            cookie: config.cookie,
            ..Default::default()
        },
        None => {
            return Err(Status::invalid_argument(format!(
                "Invalid response type passed for node {}.",
                request.device_id
            ))
            .into())
        }
    };
    Ok(GetForwardingPipelineConfigResponse {
        config: Some(projected),
    })
}

/// Handles one inbound stream message.  `node_id` is the device this stream
/// arbitrated for; the first arbitration message pins it.  An error return
/// terminates the stream with that status.
fn handle_stream_request(
    manager: &SdnControllerManager,
    provider: &dyn SwitchProvider,
    connection: &Arc<SdnConnection>,
    node_id: &mut Option<u64>,
    request: StreamMessageRequest,
) -> Result<(), Status> {
    use stream_message_request::Update;
    match request.update {
        Some(Update::Arbitration(update)) => {
            event!(Level::INFO, "received arbitration request: {:?}", update);
            if update.device_id == 0 {
                return Err(Status::invalid_argument("Invalid node (aka device) ID."));
            }
            match *node_id {
                None => *node_id = Some(update.device_id),
                Some(id) if id != update.device_id => {
                    return Err(Status::invalid_argument(format!(
                        "Node (aka device) ID for this stream has changed. Was {}, now is {}.",
                        id, update.device_id
                    )));
                }
                Some(_) => {}
            }
            if let Err(status) = manager.handle_arbitration_update(&update, connection) {
                event!(Level::WARN, "failed arbitration request: {}", status.message);
                manager.disconnect(connection);
                return Err(status);
            }
            Ok(())
        }
        Some(update @ (Update::Packet(_) | Update::DigestAck(_) | Update::Other(_))) => {
            let packet = match &update {
                Update::Packet(packet) => Some(packet.clone()),
                _ => None,
            };
            if manager.allow_stream_request(connection).is_err() {
                connection.send(error_response(
                    &Status::permission_denied(
                        "Cannot process request. Only the primary connection can send \
                         PacketOuts.",
                    ),
                    packet,
                ));
                return Ok(());
            }
            let request = StreamMessageRequest {
                update: Some(update),
            };
            if let Err(status) =
                provider.handle_stream_message_request(node_id.unwrap_or_default(), &request)
            {
                let status = Status::new(
                    status.code,
                    format!("Failed to send packet out. {}", status.message),
                );
                manager
                    .send_stream_message_to_primary(connection.role_id(), error_response(&status, packet));
            }
            Ok(())
        }
        // Not a message variant we know; report in-band and keep the stream.
        None => {
            connection.send(error_response(
                &Status::unimplemented("Unsupported stream message."),
                None,
            ));
            Ok(())
        }
    }
}

enum ReadEvent {
    Response(ReadResponse),
    Done(Result<(), Status>),
}

struct ChannelReadResponseWriter {
    sender: mpsc::UnboundedSender<ReadEvent>,
}

impl ReadResponseWriter for ChannelReadResponseWriter {
    fn write(&mut self, response: ReadResponse) {
        let _ = self.sender.send(ReadEvent::Response(response));
    }
}

impl P4Runtime for P4RuntimeService {
    fn write(&mut self, ctx: RpcContext, req: WriteRequest, sink: UnarySink<WriteResponse>) {
        event!(Level::DEBUG, "write {:?}", req);
        match write_request(&self.manager, self.provider.as_ref(), &req) {
            Ok(reply) => unary_success(&ctx, sink, reply),
            Err(status) => unary_fail(&ctx, sink, status),
        }
    }

    fn read(&mut self, ctx: RpcContext, req: ReadRequest, mut sink: ServerStreamingSink<ReadResponse>) {
        event!(Level::DEBUG, "read {:?}", req);
        let (tx, mut rx) = mpsc::unbounded_channel();

        // The forwarder is spawned before the provider runs so chunks flow
        // out as the provider produces them.
        let forward = async move {
            while let Some(item) = rx.recv().await {
                match item {
                    ReadEvent::Response(response) => {
                        sink.send((response, WriteFlags::default())).await?
                    }
                    ReadEvent::Done(Ok(())) => return sink.close().await,
                    ReadEvent::Done(Err(status)) => return sink.fail(status.into()).await,
                }
            }
            sink.close().await
        };
        ctx.spawn(
            forward
                .map_err(|e: grpcio::Error| {
                    event!(Level::ERROR, "failed to stream read response: {:?}", e)
                })
                .map(|_| ()),
        );

        let mut writer = ChannelReadResponseWriter { sender: tx.clone() };
        let result = read_request(self.provider.as_ref(), &req, &mut writer);
        let _ = tx.send(ReadEvent::Done(result));
    }

    fn set_forwarding_pipeline_config(
        &mut self,
        ctx: RpcContext,
        req: SetForwardingPipelineConfigRequest,
        sink: UnarySink<SetForwardingPipelineConfigResponse>,
    ) {
        match set_pipeline_request(&self.manager, self.provider.as_ref(), &req) {
            Ok(reply) => unary_success(&ctx, sink, reply),
            Err(status) => unary_fail(&ctx, sink, status),
        }
    }

    fn get_forwarding_pipeline_config(
        &mut self,
        ctx: RpcContext,
        req: GetForwardingPipelineConfigRequest,
        sink: UnarySink<GetForwardingPipelineConfigResponse>,
    ) {
        match get_pipeline_request(self.provider.as_ref(), &req) {
            Ok(reply) => unary_success(&ctx, sink, reply),
            Err(status) => unary_fail(&ctx, sink, status),
        }
    }

    fn stream_channel(
        &mut self,
        ctx: RpcContext,
        mut stream: RequestStream<StreamMessageRequest>,
        mut sink: DuplexSink<StreamMessageResponse>,
    ) {
        let manager = Arc::clone(&self.manager);
        let provider = Arc::clone(&self.provider);

        let (tx, mut rx) = mpsc::unbounded_channel();
        let (done_tx, done_rx) = oneshot::channel::<Option<Status>>();
        let connection = Arc::new(SdnConnection::new(tx));

        // Writer half: drains responses queued by the manager (this stream's
        // arbitration replies and any broadcasts or packet-ins addressed to
        // it), then terminates the stream with whatever the read loop
        // decided.
        let writer = async move {
            while let Some(response) = rx.recv().await {
                sink.send((response, WriteFlags::default())).await?;
            }
            match done_rx.await {
                Ok(Some(status)) => sink.fail(status.into()).await,
                _ => sink.close().await,
            }
        };
        ctx.spawn(
            writer
                .map_err(|e: grpcio::Error| {
                    event!(Level::ERROR, "stream channel writer failed: {:?}", e)
                })
                .map(|_| ()),
        );

        // Reader half: demultiplexes inbound messages until the peer closes
        // or a fatal status ends the stream.  Disconnect runs
        // unconditionally, including on abnormal termination.
        let reader = async move {
            let mut node_id: Option<u64> = None;
            let failure = loop {
                match stream.try_next().await {
                    Ok(Some(request)) => {
                        match handle_stream_request(
                            &manager,
                            provider.as_ref(),
                            &connection,
                            &mut node_id,
                            request,
                        ) {
                            Ok(()) => {}
                            Err(status) => break Some(status),
                        }
                    }
                    Ok(None) => break None,
                    Err(e) => {
                        event!(Level::WARN, "stream channel read failed: {:?}", e);
                        break None;
                    }
                }
            };
            manager.disconnect(&connection);
            drop(connection);
            let _ = done_tx.send(failure);
        };
        ctx.spawn(reader);
    }

    fn capabilities(
        &mut self,
        ctx: RpcContext,
        _req: CapabilitiesRequest,
        sink: UnarySink<CapabilitiesResponse>,
    ) {
        unary_success(
            &ctx,
            sink,
            CapabilitiesResponse {
                p4runtime_api_version: P4RUNTIME_API_VERSION.to_string(),
            },
        );
    }
}
