//! Status values returned by the control plane and the switch provider.
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

use grpcio::{RpcStatus, RpcStatusCode};
use std::fmt;

/// A gRPC status code paired with a human-readable message.  Control-plane
/// operations and switch-provider capabilities return `Result<T, Status>`;
/// the service dispatcher converts these into transport-level
/// [`grpcio::RpcStatus`] values or in-band stream errors as appropriate.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Status {
    pub code: RpcStatusCode,
    pub message: String,
}

impl Status {
    pub fn new(code: RpcStatusCode, message: impl Into<String>) -> Status {
        Status {
            code,
            message: message.into(),
        }
    }

    pub fn invalid_argument(message: impl Into<String>) -> Status {
        Status::new(RpcStatusCode::INVALID_ARGUMENT, message)
    }

    pub fn permission_denied(message: impl Into<String>) -> Status {
        Status::new(RpcStatusCode::PERMISSION_DENIED, message)
    }

    pub fn failed_precondition(message: impl Into<String>) -> Status {
        Status::new(RpcStatusCode::FAILED_PRECONDITION, message)
    }

    pub fn not_found(message: impl Into<String>) -> Status {
        Status::new(RpcStatusCode::NOT_FOUND, message)
    }

    pub fn already_exists(message: impl Into<String>) -> Status {
        Status::new(RpcStatusCode::ALREADY_EXISTS, message)
    }

    pub fn unimplemented(message: impl Into<String>) -> Status {
        Status::new(RpcStatusCode::UNIMPLEMENTED, message)
    }

    pub fn unknown(message: impl Into<String>) -> Status {
        Status::new(RpcStatusCode::UNKNOWN, message)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}: {}", self.code, self.message)
    }
}

impl std::error::Error for Status {}

impl From<Status> for RpcStatus {
    fn from(status: Status) -> RpcStatus {
        RpcStatus::with_message(status.code, status.message)
    }
}
