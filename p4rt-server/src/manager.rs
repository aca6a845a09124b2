//! Controller arbitration: the registry of active connections, the per-role
//! primary election state machine, and stream-message fan-out.
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
use crate::status::Status;
use grpcio::RpcStatusCode;
use proto::p4runtime::{
    stream_message_response, MasterArbitrationUpdate, Role, StreamMessageResponse, Uint128,
};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tracing::{event, Level};

pub(crate) fn pretty_role(role_id: RoleId) -> String {
    match role_id {
        Some(id) => format!("'{}'", id),
        None => "<default>".to_string(),
    }
}

pub(crate) fn pretty_election_id(election_id: Option<ElectionId>) -> String {
    match election_id {
        Some(id) => format!("{}", id),
        None => "<backup>".to_string(),
    }
}

/// Tracks every active `StreamChannel` connection and elects a unique primary
/// controller per role.
///
/// All state lives behind a single exclusive lock, and every public entry
/// point holds that lock for its whole duration.  Arbitration responses are
/// queued to each connection's outbound channel while the lock is held, so
/// every connection of a role observes primary changes in the same order
/// relative to the registry updates that caused them.
pub struct SdnControllerManager {
    inner: Mutex<ManagerState>,
}

#[derive(Default)]
struct ManagerState {
    /// Fixed by the first accepted arbitration message.
    device_id: Option<u64>,
    connections: Vec<Arc<SdnConnection>>,
    /// Highest election ID ever accepted for each role.  Entries are created
    /// the first time a role arbitrates and are never removed or lowered; a
    /// role may hold `None` when only backups have ever connected for it.
    election_id_past_by_role: HashMap<RoleId, Option<ElectionId>>,
}

impl ManagerState {
    fn high_water_mark(&self, role_id: RoleId) -> Option<ElectionId> {
        self.election_id_past_by_role
            .get(&role_id)
            .copied()
            .flatten()
    }

    /// A current primary exists iff some active connection for the role holds
    /// exactly the role's high-water mark.
    fn primary_connection_exists(&self, role_id: RoleId) -> bool {
        let Some(hwm) = self.high_water_mark(role_id) else {
            return false;
        };
        self.connections
            .iter()
            .any(|c| c.role_id() == role_id && c.election_id() == Some(hwm))
    }

    /// Recomputes the primary state for `role_id` after a connection for that
    /// role changed.  Returns true if every connection with the role should
    /// be informed, false if only the arbitrating connection needs a
    /// response.  The high-water mark never decreases.
    fn update_primary_connection_state(&mut self, role_id: RoleId) -> bool {
        let max_election_id = self
            .connections
            .iter()
            .filter(|c| c.role_id() == role_id)
            .filter_map(|c| c.election_id())
            .max();

        let past = self.election_id_past_by_role.entry(role_id).or_insert(None);
        match (max_election_id, *past) {
            (Some(max), past_value) if past_value.map_or(true, |p| max > p) => {
                event!(
                    Level::INFO,
                    "new primary connection for role {} with election ID {}",
                    pretty_role(role_id),
                    max
                );
                *past = Some(max);
                true
            }
            (Some(max), Some(p)) if max == p => {
                event!(
                    Level::INFO,
                    "old primary connection for role {} is becoming the current primary again with election ID {}",
                    pretty_role(role_id),
                    max
                );
                true
            }
            (None, None) => false,
            // The remaining active maximum is below the mark, or gone
            // entirely.
            _ => {
                event!(
                    Level::INFO,
                    "no longer have a primary connection for role {}",
                    pretty_role(role_id)
                );
                true
            }
        }
    }

    fn inform_connections_about_primary_change(&self, role_id: RoleId) {
        for connection in &self.connections {
            if connection.role_id() == role_id {
                self.send_arbitration_response(connection);
            }
        }
    }

    /// Builds and queues the arbitration response for `connection`: the
    /// device ID, the connection's role, the role's high-water mark (not the
    /// connection's own election ID), and a status telling the controller
    /// whether it is the primary, a backup behind a live primary, or a backup
    /// with no primary at all.
    fn send_arbitration_response(&self, connection: &SdnConnection) {
        let role_id = connection.role_id();
        let hwm = self.high_water_mark(role_id);

        let status = if self.primary_connection_exists(role_id) {
            if connection.election_id() == hwm {
                proto::status::Status {
                    code: RpcStatusCode::OK.into(),
                    message: "you are the primary connection.".to_string(),
                    details: Vec::new(),
                }
            } else {
                proto::status::Status {
                    code: RpcStatusCode::ALREADY_EXISTS.into(),
                    message: "you are a backup connection, and a primary connection exists."
                        .to_string(),
                    details: Vec::new(),
                }
            }
        } else {
            proto::status::Status {
                code: RpcStatusCode::NOT_FOUND.into(),
                message: "you are a backup connection, and NO primary connection exists."
                    .to_string(),
                details: Vec::new(),
            }
        };

        let arbitration = MasterArbitrationUpdate {
            device_id: self.device_id.unwrap_or_default(),
            role: role_id.map(|id| Role { id }),
            election_id: hwm.map(Uint128::from_u128),
            status: Some(status),
        };
        connection.send(StreamMessageResponse {
            update: Some(stream_message_response::Update::Arbitration(arbitration)),
        });
    }

    /// A non-absent election ID must be unique among active connections with
    /// the same role.  Backups (no election ID) are unrestricted.
    fn validate_connection(
        &self,
        connection: &SdnConnection,
        role_id: RoleId,
        election_id: Option<ElectionId>,
    ) -> Result<(), Status> {
        let Some(election_id) = election_id else {
            return Ok(());
        };
        for other in &self.connections {
            if other.id() != connection.id()
                && other.role_id() == role_id
                && other.election_id() == Some(election_id)
            {
                return Err(Status::invalid_argument(
                    "Election ID is already used by another connection with the same role.",
                ));
            }
        }
        Ok(())
    }
}

impl SdnControllerManager {
    pub fn new() -> SdnControllerManager {
        SdnControllerManager {
            inner: Mutex::new(ManagerState::default()),
        }
    }

    /// Applies an arbitration message received on `connection`.
    ///
    /// An error return means the arbitration was rejected; the caller is
    /// expected to disconnect the stream and surface the status on it.
    pub fn handle_arbitration_update(
        &self,
        update: &MasterArbitrationUpdate,
        connection: &Arc<SdnConnection>,
    ) -> Result<(), Status> {
        let mut state = self.inner.lock().unwrap();

        if update.device_id == 0 {
            return Err(Status::failed_precondition(
                "Arbitration request must have a device ID.",
            ));
        }
        match state.device_id {
            None => {
                event!(Level::INFO, "arbitrating for device {}", update.device_id);
                state.device_id = Some(update.device_id);
            }
            Some(device_id) if device_id != update.device_id => {
                return Err(Status::failed_precondition(format!(
                    "Arbitration request has the wrong device ID '{}'. \
                     Cannot establish connection to this device '{}'.",
                    update.device_id, device_id
                )));
            }
            Some(_) => {}
        }

        let role_id = update.role.as_ref().map(|role| role.id);
        let election_id = update.election_id.as_ref().map(Uint128::as_u128);

        // Nothing changed: respond to the caller and leave the registry
        // alone.
        if connection.is_initialized()
            && connection.role_id() == role_id
            && connection.election_id() == election_id
        {
            state.send_arbitration_response(connection);
            return Ok(());
        }

        state.validate_connection(connection, role_id, election_id)?;

        if connection.is_initialized() {
            event!(
                Level::INFO,
                "update SDN connection ({}, {}): role {}, election ID {}",
                pretty_role(connection.role_id()),
                pretty_election_id(connection.election_id()),
                pretty_role(role_id),
                pretty_election_id(election_id)
            );
        } else {
            event!(
                Level::INFO,
                "new SDN connection: role {}, election ID {}",
                pretty_role(role_id),
                pretty_election_id(election_id)
            );
        }
        connection.set_role_id(role_id);
        connection.set_election_id(election_id);
        if !connection.is_initialized() {
            connection.initialize();
            state.connections.push(Arc::clone(connection));
        }

        if state.update_primary_connection_state(role_id) {
            state.inform_connections_about_primary_change(role_id);
        } else {
            state.send_arbitration_response(connection);
        }
        Ok(())
    }

    /// Removes `connection` from the registry.  If it was the current
    /// primary of its role, the remaining connections with that role are
    /// informed; the high-water mark is retained either way.
    pub fn disconnect(&self, connection: &SdnConnection) {
        let mut state = self.inner.lock().unwrap();

        if !connection.is_initialized() {
            return;
        }

        let role_id = connection.role_id();
        if let Some(index) = state.connections.iter().position(|c| c.id() == connection.id()) {
            event!(
                Level::INFO,
                "dropping SDN connection for role {} with election ID {}",
                pretty_role(role_id),
                pretty_election_id(connection.election_id())
            );
            state.connections.remove(index);
        }

        let was_primary = connection.election_id().is_some()
            && connection.election_id() == state.high_water_mark(role_id);
        if was_primary {
            state.inform_connections_about_primary_change(role_id);
        }
    }

    /// Authorises a data-plane mutating request: the caller must present the
    /// election ID that is the current high-water mark for its role.
    pub fn allow_request(
        &self,
        role_id: RoleId,
        election_id: Option<ElectionId>,
    ) -> Result<(), Status> {
        let state = self.inner.lock().unwrap();

        let Some(election_id) = election_id else {
            return Err(Status::permission_denied(
                "Request does not have an election ID.",
            ));
        };
        match state.election_id_past_by_role.get(&role_id) {
            None => Err(Status::permission_denied(
                "Only the primary connection can issue requests, but no primary \
                 connection has been established.",
            )),
            Some(past) if *past != Some(election_id) => Err(Status::permission_denied(
                "Only the primary connection can issue requests.",
            )),
            Some(_) => Ok(()),
        }
    }

    /// Authorisation for non-arbitration messages arriving on a stream:
    /// packet-outs, digest acks, and the rest are only accepted from the
    /// current primary of the connection's role.
    pub fn allow_stream_request(&self, connection: &SdnConnection) -> Result<(), Status> {
        let state = self.inner.lock().unwrap();

        let Some(election_id) = connection.election_id() else {
            return Err(Status::permission_denied(
                "Request does not have an election ID.",
            ));
        };
        if state.high_water_mark(connection.role_id()) == Some(election_id) {
            Ok(())
        } else {
            Err(Status::permission_denied(
                "Only the primary connection can issue requests.",
            ))
        }
    }

    /// Delivers a provider-originated stream message (packet-in, digest,
    /// error) to the current primary of `role_id`.  Returns false when no
    /// current primary exists; the message is not buffered.
    pub fn send_stream_message_to_primary(
        &self,
        role_id: RoleId,
        response: StreamMessageResponse,
    ) -> bool {
        let state = self.inner.lock().unwrap();

        let Some(hwm) = state.high_water_mark(role_id) else {
            return false;
        };
        let primary = state
            .connections
            .iter()
            .find(|c| c.role_id() == role_id && c.election_id() == Some(hwm));
        match primary {
            Some(connection) => {
                connection.send(response);
                true
            }
            None => {
                event!(
                    Level::ERROR,
                    "found an election ID '{}' for the primary connection of role {}, \
                     but could not find the connection itself",
                    hwm,
                    pretty_role(role_id)
                );
                false
            }
        }
    }

    /// The device this server represents, once fixed by arbitration.
    pub fn device_id(&self) -> Option<u64> {
        self.inner.lock().unwrap().device_id
    }
}

impl Default for SdnControllerManager {
    fn default() -> Self {
        SdnControllerManager::new()
    }
}
