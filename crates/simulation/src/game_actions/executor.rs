//! Action executor system. Drains the [`ActionQueue`] each frame and applies
//! every queued [`GameAction`] to the session, recording results in the
//! [`ActionResultLog`].

use bevy::prelude::*;

use crate::dispatch::DispatchResolver;
use crate::events::DispatchAccepted;
use crate::game_params::GameParams;
use crate::session::Session;
use crate::sim_rng::SimRng;

use super::result_log::ActionResultLog;
use super::{ActionQueue, ActionResult, GameAction};

/// Drains all pending actions from the queue and executes them in order.
#[allow(clippy::too_many_arguments)]
pub fn execute_queued_actions(
    mut queue: ResMut<ActionQueue>,
    mut log: ResMut<ActionResultLog>,
    mut session: ResMut<Session>,
    mut resolver: ResMut<DispatchResolver>,
    mut rng: ResMut<SimRng>,
    params: Res<GameParams>,
    time: Res<Time>,
    mut accepted: EventWriter<DispatchAccepted>,
) {
    if queue.is_empty() {
        return;
    }
    for action in queue.drain() {
        let result = match &action {
            GameAction::StartSession => {
                session.start(&params, &mut rng.0);
                info!(
                    "Session {} started with {} bins",
                    session.generation,
                    session.bins.len()
                );
                ActionResult::Success
            }
            GameAction::DispatchBin { bin_id, target } => {
                let target = Vec2::new(target.0, target.1);
                match resolver.dispatch(&mut session, &params, bin_id, target, time.elapsed()) {
                    Ok(event_id) => {
                        debug!("Dispatch {} accepted for {}", event_id, bin_id);
                        accepted.send(DispatchAccepted {
                            event_id,
                            bin_id: bin_id.clone(),
                            target,
                        });
                        ActionResult::Success
                    }
                    Err(e) => {
                        debug!("Dispatch to {} rejected: {}", bin_id, e);
                        ActionResult::Rejected(e)
                    }
                }
            }
        };
        log.push(action, result);
    }
}
