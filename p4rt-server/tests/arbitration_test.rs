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

//! Tests for the controller arbitration state machine, driving the manager
//! directly through channel-backed connections.

use anyhow::{anyhow, Result};
use grpcio::RpcStatusCode;
use p4rt_server::{SdnConnection, SdnControllerManager};
use proto::p4runtime::{
    stream_message_response, MasterArbitrationUpdate, PacketIn, Role, StreamMessageResponse,
    Uint128,
};
use std::sync::Arc;
use tokio::sync::mpsc;

struct Controller {
    connection: Arc<SdnConnection>,
    rx: mpsc::UnboundedReceiver<StreamMessageResponse>,
}

fn controller() -> Controller {
    let (tx, rx) = mpsc::unbounded_channel();
    Controller {
        connection: Arc::new(SdnConnection::new(tx)),
        rx,
    }
}

fn arbitration(
    device_id: u64,
    role: Option<u64>,
    election_id: Option<u128>,
) -> MasterArbitrationUpdate {
    MasterArbitrationUpdate {
        device_id,
        role: role.map(|id| Role { id }),
        election_id: election_id.map(Uint128::from_u128),
        status: None,
    }
}

fn code(code: RpcStatusCode) -> i32 {
    code.into()
}

impl Controller {
    /// Pops the next queued response and returns the arbitration payload as
    /// (election id, status code).
    fn next_arbitration(&mut self) -> Result<(Option<u128>, i32)> {
        let response = self
            .rx
            .try_recv()
            .map_err(|_| anyhow!("expected a queued stream response"))?;
        match response.update {
            Some(stream_message_response::Update::Arbitration(update)) => Ok((
                update.election_id.map(|id| id.as_u128()),
                update.status.map(|status| status.code).unwrap_or_default(),
            )),
            other => Err(anyhow!("expected an arbitration response, got {:?}", other)),
        }
    }

    fn next_packet_in(&mut self) -> Result<PacketIn> {
        let response = self
            .rx
            .try_recv()
            .map_err(|_| anyhow!("expected a queued stream response"))?;
        match response.update {
            Some(stream_message_response::Update::Packet(packet)) => Ok(packet),
            other => Err(anyhow!("expected a packet-in, got {:?}", other)),
        }
    }

    fn no_pending(&mut self) -> bool {
        self.rx.try_recv().is_err()
    }
}

#[test]
fn lone_primary() -> Result<()> {
    let manager = SdnControllerManager::new();
    let mut a = controller();

    manager
        .handle_arbitration_update(&arbitration(1, None, Some(10)), &a.connection)
        .map_err(|status| anyhow!("{}", status))?;
    assert_eq!(a.next_arbitration()?, (Some(10), code(RpcStatusCode::OK)));
    assert!(a.connection.is_initialized());

    // The new primary is authorised for mutating requests; everyone else is
    // not.
    assert!(manager.allow_request(None, Some(10)).is_ok());
    assert!(manager.allow_request(None, Some(9)).is_err());
    assert!(manager.allow_request(None, None).is_err());
    Ok(())
}

#[test]
fn idempotent_resend() -> Result<()> {
    let manager = SdnControllerManager::new();
    let mut a = controller();

    manager
        .handle_arbitration_update(&arbitration(1, None, Some(10)), &a.connection)
        .map_err(|status| anyhow!("{}", status))?;
    assert_eq!(a.next_arbitration()?, (Some(10), code(RpcStatusCode::OK)));

    // Re-sending the identical arbitration yields a response but changes
    // nothing.
    manager
        .handle_arbitration_update(&arbitration(1, None, Some(10)), &a.connection)
        .map_err(|status| anyhow!("{}", status))?;
    assert_eq!(a.next_arbitration()?, (Some(10), code(RpcStatusCode::OK)));
    assert!(a.no_pending());
    assert!(manager.allow_request(None, Some(10)).is_ok());
    Ok(())
}

#[test]
fn backup_then_promotion() -> Result<()> {
    let manager = SdnControllerManager::new();
    let mut a = controller();
    let mut b = controller();

    manager
        .handle_arbitration_update(&arbitration(1, None, Some(10)), &a.connection)
        .map_err(|status| anyhow!("{}", status))?;
    assert_eq!(a.next_arbitration()?, (Some(10), code(RpcStatusCode::OK)));

    // B joins as a lower-id backup.  The primary has not changed, but every
    // holder of the role is re-notified.
    manager
        .handle_arbitration_update(&arbitration(1, None, Some(5)), &b.connection)
        .map_err(|status| anyhow!("{}", status))?;
    assert_eq!(
        b.next_arbitration()?,
        (Some(10), code(RpcStatusCode::ALREADY_EXISTS))
    );
    assert_eq!(a.next_arbitration()?, (Some(10), code(RpcStatusCode::OK)));

    // A drops.  The high-water mark survives, so B learns that no current
    // primary exists rather than being promoted.
    manager.disconnect(&a.connection);
    assert_eq!(
        b.next_arbitration()?,
        (Some(10), code(RpcStatusCode::NOT_FOUND))
    );
    assert!(manager.allow_request(None, Some(5)).is_err());

    // B claims the now-unowned high-water mark and becomes primary.
    manager
        .handle_arbitration_update(&arbitration(1, None, Some(10)), &b.connection)
        .map_err(|status| anyhow!("{}", status))?;
    assert_eq!(b.next_arbitration()?, (Some(10), code(RpcStatusCode::OK)));
    assert!(manager.allow_request(None, Some(10)).is_ok());
    Ok(())
}

#[test]
fn election_id_conflict_is_rejected() -> Result<()> {
    let manager = SdnControllerManager::new();
    let mut a = controller();
    let mut b = controller();

    manager
        .handle_arbitration_update(&arbitration(1, Some(1), Some(7)), &a.connection)
        .map_err(|status| anyhow!("{}", status))?;
    assert_eq!(a.next_arbitration()?, (Some(7), code(RpcStatusCode::OK)));

    // Same (role, election id) pair on a different connection.
    let status = manager
        .handle_arbitration_update(&arbitration(1, Some(1), Some(7)), &b.connection)
        .expect_err("duplicate election id must be rejected");
    assert_eq!(status.code, RpcStatusCode::INVALID_ARGUMENT);
    assert!(!b.connection.is_initialized());
    assert!(b.no_pending());

    // The same election id under a different role is fine.
    manager
        .handle_arbitration_update(&arbitration(1, Some(2), Some(7)), &b.connection)
        .map_err(|status| anyhow!("{}", status))?;
    assert_eq!(b.next_arbitration()?, (Some(7), code(RpcStatusCode::OK)));
    Ok(())
}

#[test]
fn device_id_is_fixed_by_first_arbitration() -> Result<()> {
    let manager = SdnControllerManager::new();
    let mut a = controller();
    let b = controller();

    let status = manager
        .handle_arbitration_update(&arbitration(0, None, Some(1)), &a.connection)
        .expect_err("zero device id must be rejected");
    assert_eq!(status.code, RpcStatusCode::FAILED_PRECONDITION);

    manager
        .handle_arbitration_update(&arbitration(1, None, Some(10)), &a.connection)
        .map_err(|status| anyhow!("{}", status))?;
    assert_eq!(a.next_arbitration()?, (Some(10), code(RpcStatusCode::OK)));
    assert_eq!(manager.device_id(), Some(1));

    let status = manager
        .handle_arbitration_update(&arbitration(2, None, Some(11)), &b.connection)
        .expect_err("mismatched device id must be rejected");
    assert_eq!(status.code, RpcStatusCode::FAILED_PRECONDITION);
    Ok(())
}

#[test]
fn demotion_to_backup_keeps_high_water_mark() -> Result<()> {
    let manager = SdnControllerManager::new();
    let mut a = controller();

    manager
        .handle_arbitration_update(&arbitration(1, None, Some(10)), &a.connection)
        .map_err(|status| anyhow!("{}", status))?;
    assert_eq!(a.next_arbitration()?, (Some(10), code(RpcStatusCode::OK)));

    // The primary demotes itself by dropping its election id.  The mark is
    // not lowered, so the role simply has no current primary.
    manager
        .handle_arbitration_update(&arbitration(1, None, None), &a.connection)
        .map_err(|status| anyhow!("{}", status))?;
    assert_eq!(
        a.next_arbitration()?,
        (Some(10), code(RpcStatusCode::NOT_FOUND))
    );

    // The stored mark still gates requests: only election id 10 passes, and
    // nobody holds it.
    assert!(manager.allow_request(None, Some(10)).is_ok());
    assert!(manager.allow_stream_request(&a.connection).is_err());
    Ok(())
}

#[test]
fn lower_reconnect_does_not_become_primary() -> Result<()> {
    let manager = SdnControllerManager::new();
    let mut a = controller();
    let mut b = controller();

    manager
        .handle_arbitration_update(&arbitration(1, None, Some(10)), &a.connection)
        .map_err(|status| anyhow!("{}", status))?;
    assert_eq!(a.next_arbitration()?, (Some(10), code(RpcStatusCode::OK)));
    manager.disconnect(&a.connection);

    manager
        .handle_arbitration_update(&arbitration(1, None, Some(4)), &b.connection)
        .map_err(|status| anyhow!("{}", status))?;
    assert_eq!(
        b.next_arbitration()?,
        (Some(10), code(RpcStatusCode::NOT_FOUND))
    );
    assert!(manager.allow_request(None, Some(4)).is_err());
    Ok(())
}

#[test]
fn higher_reconnect_takes_over() -> Result<()> {
    let manager = SdnControllerManager::new();
    let mut a = controller();
    let mut b = controller();
    let mut c = controller();

    manager
        .handle_arbitration_update(&arbitration(1, None, Some(10)), &a.connection)
        .map_err(|status| anyhow!("{}", status))?;
    assert_eq!(a.next_arbitration()?, (Some(10), code(RpcStatusCode::OK)));
    manager
        .handle_arbitration_update(&arbitration(1, None, Some(2)), &b.connection)
        .map_err(|status| anyhow!("{}", status))?;
    assert_eq!(
        b.next_arbitration()?,
        (Some(10), code(RpcStatusCode::ALREADY_EXISTS))
    );
    a.next_arbitration()?;

    manager.disconnect(&a.connection);
    assert_eq!(
        b.next_arbitration()?,
        (Some(10), code(RpcStatusCode::NOT_FOUND))
    );

    // A strictly higher id raises the mark and the whole role hears about
    // the new primary.
    manager
        .handle_arbitration_update(&arbitration(1, None, Some(12)), &c.connection)
        .map_err(|status| anyhow!("{}", status))?;
    assert_eq!(c.next_arbitration()?, (Some(12), code(RpcStatusCode::OK)));
    assert_eq!(
        b.next_arbitration()?,
        (Some(12), code(RpcStatusCode::ALREADY_EXISTS))
    );
    assert!(manager.allow_request(None, Some(12)).is_ok());
    assert!(manager.allow_request(None, Some(10)).is_err());
    Ok(())
}

#[test]
fn roles_are_isolated() -> Result<()> {
    let manager = SdnControllerManager::new();
    let mut a = controller();
    let mut b = controller();

    manager
        .handle_arbitration_update(&arbitration(1, Some(1), Some(7)), &a.connection)
        .map_err(|status| anyhow!("{}", status))?;
    assert_eq!(a.next_arbitration()?, (Some(7), code(RpcStatusCode::OK)));
    manager
        .handle_arbitration_update(&arbitration(1, Some(2), Some(3)), &b.connection)
        .map_err(|status| anyhow!("{}", status))?;
    assert_eq!(b.next_arbitration()?, (Some(3), code(RpcStatusCode::OK)));

    assert!(manager.allow_request(Some(2), Some(3)).is_ok());
    assert!(manager.allow_request(Some(1), Some(3)).is_err());

    // The default role is distinct from both, and from role id 0.
    assert!(manager.allow_request(None, Some(7)).is_err());
    assert!(manager.allow_request(Some(0), Some(7)).is_err());

    // Dropping role 1's primary does not disturb role 2.
    manager.disconnect(&a.connection);
    assert!(b.no_pending());
    assert!(manager.allow_request(Some(2), Some(3)).is_ok());
    Ok(())
}

#[test]
fn packet_in_goes_to_the_current_primary_only() -> Result<()> {
    let manager = SdnControllerManager::new();
    let mut a = controller();
    let mut b = controller();

    manager
        .handle_arbitration_update(&arbitration(1, Some(7), Some(9)), &a.connection)
        .map_err(|status| anyhow!("{}", status))?;
    a.next_arbitration()?;
    manager
        .handle_arbitration_update(&arbitration(1, Some(7), Some(2)), &b.connection)
        .map_err(|status| anyhow!("{}", status))?;
    b.next_arbitration()?;
    a.next_arbitration()?;

    let packet = StreamMessageResponse {
        update: Some(stream_message_response::Update::Packet(PacketIn {
            payload: b"frame".to_vec(),
            metadata: Vec::new(),
        })),
    };

    assert!(manager.send_stream_message_to_primary(Some(7), packet.clone()));
    assert_eq!(a.next_packet_in()?.payload, b"frame".to_vec());
    assert!(b.no_pending());

    // No primary was ever elected for this role.
    assert!(!manager.send_stream_message_to_primary(Some(8), packet.clone()));

    // The mark survives the primary's departure, but with nobody holding it
    // there is no destination.
    manager.disconnect(&a.connection);
    b.next_arbitration()?;
    assert!(!manager.send_stream_message_to_primary(Some(7), packet));
    assert!(b.no_pending());
    Ok(())
}

#[test]
fn uninitialized_connection_disconnect_is_a_noop() {
    let manager = SdnControllerManager::new();
    let mut a = controller();

    manager.disconnect(&a.connection);
    assert!(!a.connection.is_initialized());
    assert!(a.no_pending());
}

#[test]
fn backup_with_no_election_id_is_never_authorised() -> Result<()> {
    let manager = SdnControllerManager::new();
    let mut a = controller();
    let mut b = controller();

    manager
        .handle_arbitration_update(&arbitration(1, None, None), &b.connection)
        .map_err(|status| anyhow!("{}", status))?;
    assert_eq!(b.next_arbitration()?, (None, code(RpcStatusCode::NOT_FOUND)));
    assert!(manager.allow_stream_request(&b.connection).is_err());

    manager
        .handle_arbitration_update(&arbitration(1, None, Some(10)), &a.connection)
        .map_err(|status| anyhow!("{}", status))?;
    a.next_arbitration()?;
    b.next_arbitration()?;

    assert!(manager.allow_stream_request(&a.connection).is_ok());
    assert!(manager.allow_stream_request(&b.connection).is_err());
    Ok(())
}
