/*!
Wire schema and gRPC scaffolding for the P4Runtime control plane.

The `p4runtime` module holds the control-plane subset of the
[P4 Runtime](https://p4.org/p4-spec/p4runtime/main/P4Runtime-Spec.html)
`p4.v1` schema: session arbitration, the bidirectional stream messages,
forwarding writes and reads, and pipeline-configuration management.  Fields
whose content the control plane never interprets (table entities, packet
payloads, P4Info, device configs) are carried as opaque bytes.

The message definitions are maintained by hand in prost's generated style and
stay wire-compatible with the upstream schema for the fields they carry.
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

pub mod p4runtime;
pub mod p4runtime_grpc;
pub mod status;
