//! grpcio scaffolding for the `p4.v1.P4Runtime` service: the method table,
//! the client, and the server-side `P4Runtime` trait.
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

const METHOD_P4_RUNTIME_WRITE: ::grpcio::Method<super::p4runtime::WriteRequest, super::p4runtime::WriteResponse> = ::grpcio::Method {
    ty: ::grpcio::MethodType::Unary,
    name: "/p4.v1.P4Runtime/Write",
    req_mar: ::grpcio::Marshaller { ser: ::grpcio::pr_ser, de: ::grpcio::pr_de },
    resp_mar: ::grpcio::Marshaller { ser: ::grpcio::pr_ser, de: ::grpcio::pr_de },
};

const METHOD_P4_RUNTIME_READ: ::grpcio::Method<super::p4runtime::ReadRequest, super::p4runtime::ReadResponse> = ::grpcio::Method {
    ty: ::grpcio::MethodType::ServerStreaming,
    name: "/p4.v1.P4Runtime/Read",
    req_mar: ::grpcio::Marshaller { ser: ::grpcio::pr_ser, de: ::grpcio::pr_de },
    resp_mar: ::grpcio::Marshaller { ser: ::grpcio::pr_ser, de: ::grpcio::pr_de },
};

const METHOD_P4_RUNTIME_SET_FORWARDING_PIPELINE_CONFIG: ::grpcio::Method<super::p4runtime::SetForwardingPipelineConfigRequest, super::p4runtime::SetForwardingPipelineConfigResponse> = ::grpcio::Method {
    ty: ::grpcio::MethodType::Unary,
    name: "/p4.v1.P4Runtime/SetForwardingPipelineConfig",
    req_mar: ::grpcio::Marshaller { ser: ::grpcio::pr_ser, de: ::grpcio::pr_de },
    resp_mar: ::grpcio::Marshaller { ser: ::grpcio::pr_ser, de: ::grpcio::pr_de },
};

const METHOD_P4_RUNTIME_GET_FORWARDING_PIPELINE_CONFIG: ::grpcio::Method<super::p4runtime::GetForwardingPipelineConfigRequest, super::p4runtime::GetForwardingPipelineConfigResponse> = ::grpcio::Method {
    ty: ::grpcio::MethodType::Unary,
    name: "/p4.v1.P4Runtime/GetForwardingPipelineConfig",
    req_mar: ::grpcio::Marshaller { ser: ::grpcio::pr_ser, de: ::grpcio::pr_de },
    resp_mar: ::grpcio::Marshaller { ser: ::grpcio::pr_ser, de: ::grpcio::pr_de },
};

const METHOD_P4_RUNTIME_STREAM_CHANNEL: ::grpcio::Method<super::p4runtime::StreamMessageRequest, super::p4runtime::StreamMessageResponse> = ::grpcio::Method {
    ty: ::grpcio::MethodType::Duplex,
    name: "/p4.v1.P4Runtime/StreamChannel",
    req_mar: ::grpcio::Marshaller { ser: ::grpcio::pr_ser, de: ::grpcio::pr_de },
    resp_mar: ::grpcio::Marshaller { ser: ::grpcio::pr_ser, de: ::grpcio::pr_de },
};

const METHOD_P4_RUNTIME_CAPABILITIES: ::grpcio::Method<super::p4runtime::CapabilitiesRequest, super::p4runtime::CapabilitiesResponse> = ::grpcio::Method {
    ty: ::grpcio::MethodType::Unary,
    name: "/p4.v1.P4Runtime/Capabilities",
    req_mar: ::grpcio::Marshaller { ser: ::grpcio::pr_ser, de: ::grpcio::pr_de },
    resp_mar: ::grpcio::Marshaller { ser: ::grpcio::pr_ser, de: ::grpcio::pr_de },
};

#[derive(Clone)]
pub struct P4RuntimeClient {
    client: ::grpcio::Client,
}

impl P4RuntimeClient {
    pub fn new(channel: ::grpcio::Channel) -> Self {
        P4RuntimeClient {
            client: ::grpcio::Client::new(channel),
        }
    }

    pub fn write_opt(&self, req: &super::p4runtime::WriteRequest, opt: ::grpcio::CallOption) -> ::grpcio::Result<super::p4runtime::WriteResponse> {
        self.client.unary_call(&METHOD_P4_RUNTIME_WRITE, req, opt)
    }

    pub fn write(&self, req: &super::p4runtime::WriteRequest) -> ::grpcio::Result<super::p4runtime::WriteResponse> {
        self.write_opt(req, ::grpcio::CallOption::default())
    }

    pub fn read_opt(&self, req: &super::p4runtime::ReadRequest, opt: ::grpcio::CallOption) -> ::grpcio::Result<::grpcio::ClientSStreamReceiver<super::p4runtime::ReadResponse>> {
        self.client.server_streaming(&METHOD_P4_RUNTIME_READ, req, opt)
    }

    pub fn read(&self, req: &super::p4runtime::ReadRequest) -> ::grpcio::Result<::grpcio::ClientSStreamReceiver<super::p4runtime::ReadResponse>> {
        self.read_opt(req, ::grpcio::CallOption::default())
    }

    pub fn set_forwarding_pipeline_config_opt(&self, req: &super::p4runtime::SetForwardingPipelineConfigRequest, opt: ::grpcio::CallOption) -> ::grpcio::Result<super::p4runtime::SetForwardingPipelineConfigResponse> {
        self.client.unary_call(&METHOD_P4_RUNTIME_SET_FORWARDING_PIPELINE_CONFIG, req, opt)
    }

    pub fn set_forwarding_pipeline_config(&self, req: &super::p4runtime::SetForwardingPipelineConfigRequest) -> ::grpcio::Result<super::p4runtime::SetForwardingPipelineConfigResponse> {
        self.set_forwarding_pipeline_config_opt(req, ::grpcio::CallOption::default())
    }

    pub fn get_forwarding_pipeline_config_opt(&self, req: &super::p4runtime::GetForwardingPipelineConfigRequest, opt: ::grpcio::CallOption) -> ::grpcio::Result<super::p4runtime::GetForwardingPipelineConfigResponse> {
        self.client.unary_call(&METHOD_P4_RUNTIME_GET_FORWARDING_PIPELINE_CONFIG, req, opt)
    }

    pub fn get_forwarding_pipeline_config(&self, req: &super::p4runtime::GetForwardingPipelineConfigRequest) -> ::grpcio::Result<super::p4runtime::GetForwardingPipelineConfigResponse> {
        self.get_forwarding_pipeline_config_opt(req, ::grpcio::CallOption::default())
    }

    pub fn stream_channel_opt(&self, opt: ::grpcio::CallOption) -> ::grpcio::Result<(::grpcio::ClientDuplexSender<super::p4runtime::StreamMessageRequest>, ::grpcio::ClientDuplexReceiver<super::p4runtime::StreamMessageResponse>)> {
        self.client.duplex_streaming(&METHOD_P4_RUNTIME_STREAM_CHANNEL, opt)
    }

    pub fn stream_channel(&self) -> ::grpcio::Result<(::grpcio::ClientDuplexSender<super::p4runtime::StreamMessageRequest>, ::grpcio::ClientDuplexReceiver<super::p4runtime::StreamMessageResponse>)> {
        self.stream_channel_opt(::grpcio::CallOption::default())
    }

    pub fn capabilities_opt(&self, req: &super::p4runtime::CapabilitiesRequest, opt: ::grpcio::CallOption) -> ::grpcio::Result<super::p4runtime::CapabilitiesResponse> {
        self.client.unary_call(&METHOD_P4_RUNTIME_CAPABILITIES, req, opt)
    }

    pub fn capabilities(&self, req: &super::p4runtime::CapabilitiesRequest) -> ::grpcio::Result<super::p4runtime::CapabilitiesResponse> {
        self.capabilities_opt(req, ::grpcio::CallOption::default())
    }

    pub fn spawn<F>(&self, f: F) where F: ::futures::Future<Output = ()> + Send + 'static {
        self.client.spawn(f)
    }
}

pub trait P4Runtime {
    fn write(&mut self, ctx: ::grpcio::RpcContext, req: super::p4runtime::WriteRequest, sink: ::grpcio::UnarySink<super::p4runtime::WriteResponse>);
    fn read(&mut self, ctx: ::grpcio::RpcContext, req: super::p4runtime::ReadRequest, sink: ::grpcio::ServerStreamingSink<super::p4runtime::ReadResponse>);
    fn set_forwarding_pipeline_config(&mut self, ctx: ::grpcio::RpcContext, req: super::p4runtime::SetForwardingPipelineConfigRequest, sink: ::grpcio::UnarySink<super::p4runtime::SetForwardingPipelineConfigResponse>);
    fn get_forwarding_pipeline_config(&mut self, ctx: ::grpcio::RpcContext, req: super::p4runtime::GetForwardingPipelineConfigRequest, sink: ::grpcio::UnarySink<super::p4runtime::GetForwardingPipelineConfigResponse>);
    fn stream_channel(&mut self, ctx: ::grpcio::RpcContext, stream: ::grpcio::RequestStream<super::p4runtime::StreamMessageRequest>, sink: ::grpcio::DuplexSink<super::p4runtime::StreamMessageResponse>);
    fn capabilities(&mut self, ctx: ::grpcio::RpcContext, req: super::p4runtime::CapabilitiesRequest, sink: ::grpcio::UnarySink<super::p4runtime::CapabilitiesResponse>);
}

pub fn create_p4_runtime<S: P4Runtime + Send + Clone + 'static>(s: S) -> ::grpcio::Service {
    let mut builder = ::grpcio::ServiceBuilder::new();
    let mut instance = s.clone();
    builder = builder.add_unary_handler(&METHOD_P4_RUNTIME_WRITE, move |ctx, req, resp| {
        instance.write(ctx, req, resp)
    });
    let mut instance = s.clone();
    builder = builder.add_server_streaming_handler(&METHOD_P4_RUNTIME_READ, move |ctx, req, resp| {
        instance.read(ctx, req, resp)
    });
    let mut instance = s.clone();
    builder = builder.add_unary_handler(&METHOD_P4_RUNTIME_SET_FORWARDING_PIPELINE_CONFIG, move |ctx, req, resp| {
        instance.set_forwarding_pipeline_config(ctx, req, resp)
    });
    let mut instance = s.clone();
    builder = builder.add_unary_handler(&METHOD_P4_RUNTIME_GET_FORWARDING_PIPELINE_CONFIG, move |ctx, req, resp| {
        instance.get_forwarding_pipeline_config(ctx, req, resp)
    });
    let mut instance = s.clone();
    builder = builder.add_duplex_streaming_handler(&METHOD_P4_RUNTIME_STREAM_CHANNEL, move |ctx, req, resp| {
        instance.stream_channel(ctx, req, resp)
    });
    let mut instance = s;
    builder = builder.add_unary_handler(&METHOD_P4_RUNTIME_CAPABILITIES, move |ctx, req, resp| {
        instance.capabilities(ctx, req, resp)
    });
    builder.build()
}
