#![cfg(feature = "std")]

//! Async driver that waits out the delays a session asks for.

use crate::common::GameError;
use crate::session::{Event, GameSession, Report};

/// Follow `report`'s wakeup chain until the session waits for a human or
/// the game ends. Returns every event produced, including `report`'s own.
pub async fn drive(session: &mut GameSession, report: Report) -> Result<Vec<Event>, GameError> {
    let mut events = Vec::new();
    drive_with(session, report, |_, event| events.push(event.clone())).await?;
    Ok(events)
}

/// Like [`drive`], handing each event to `on_event` as soon as it happens.
pub async fn drive_with<F>(
    session: &mut GameSession,
    report: Report,
    mut on_event: F,
) -> Result<(), GameError>
where
    F: FnMut(&GameSession, &Event),
{
    let mut report = report;
    loop {
        for event in &report.events {
            on_event(session, event);
        }
        let Some(wakeup) = report.wakeup else {
            return Ok(());
        };
        log::debug!("sleeping {:?} before {:?}", wakeup.after, wakeup.wake);
        if !wakeup.after.is_zero() {
            tokio::time::sleep(wakeup.after).await;
        }
        report = session.wake(wakeup.wake)?;
    }
}
