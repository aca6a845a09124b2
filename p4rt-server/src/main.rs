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

//! `p4rt-server` serves the P4Runtime control plane over a stub data plane.
//! Controllers can connect, arbitrate for primary, and exercise the full RPC
//! surface; forwarding writes are accepted and recorded but program nothing.

use anyhow::Result;
use clap::{App, Arg};
use grpcio::{Environment, ServerBuilder, ServerCredentials};
use p4rt_server::service::P4RuntimeService;
use p4rt_server::stub::StubSwitchProvider;
use proto::p4runtime_grpc::create_p4_runtime;
use std::sync::Arc;
use tracing::{event, Level};

fn main() -> Result<()> {
    const P4_PORT: &str = "p4-port";
    const P4_ADDR: &str = "p4-addr";

    let matches = App::new("p4rt-server")
        .version(env!("CARGO_PKG_VERSION"))
        .about("P4Runtime control-plane server backed by a stub data plane")
        .arg(Arg::with_name(P4_PORT)
             .long(P4_PORT)
             .help("P4Runtime connection listening port")
             .takes_value(true)
             .default_value("50051"))
        .arg(Arg::with_name(P4_ADDR)
             .long(P4_ADDR)
             .help("P4Runtime connection bind address")
             .takes_value(true)
             .default_value("127.0.0.1"))
        .get_matches();

    let p4_port = matches.value_of(P4_PORT).unwrap().parse::<u16>()?;
    let p4_addr = matches.value_of(P4_ADDR).unwrap();

    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    let env = Arc::new(Environment::new(2));
    let provider = Arc::new(StubSwitchProvider::new());
    let service = create_p4_runtime(P4RuntimeService::new(provider));
    let mut server = ServerBuilder::new(env).register_service(service).build()?;
    let bound_port = server.add_listening_port(format!("{}:{}", p4_addr, p4_port), ServerCredentials::insecure())?;
    server.start();
    event!(Level::INFO, "Listening on {}:{}", p4_addr, bound_port);

    loop {
        std::thread::park();
    }
}
