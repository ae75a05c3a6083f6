use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};

/// Orders ingestion runs within an upload session. Only the most recently
/// started run of a session is current; older runs must discard their result.
#[derive(Debug, Default)]
pub struct RunTracker {
    next_run: AtomicU64,
    sessions: Mutex<HashMap<String, SessionRuns>>,
}

#[derive(Debug, Clone, Copy)]
struct SessionRuns {
    latest: u64,
    in_flight: usize,
}

/// A run in flight. Dropping the ticket releases it, including when the
/// request future holding it is cancelled.
#[derive(Debug)]
#[must_use = "the run is released as soon as the ticket is dropped"]
pub struct RunTicket<'a> {
    tracker: &'a RunTracker,
    session: Option<String>,
    run: u64,
}

impl RunTicket<'_> {
    pub fn session(&self) -> Option<&str> {
        self.session.as_deref()
    }

    pub fn run(&self) -> u64 {
        self.run
    }

    pub fn is_current(&self) -> bool {
        self.tracker.is_current(self)
    }
}

impl Drop for RunTicket<'_> {
    fn drop(&mut self) {
        self.tracker.release(self);
    }
}

impl RunTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&self, session: Option<&str>) -> RunTicket<'_> {
        let run = self.next_run.fetch_add(1, Ordering::SeqCst) + 1;

        if let Some(session) = session {
            let mut sessions = self.sessions.lock().unwrap_or_else(|e| e.into_inner());
            let entry = sessions.entry(session.to_string()).or_insert(SessionRuns {
                latest: run,
                in_flight: 0,
            });
            entry.latest = run;
            entry.in_flight += 1;
        }

        RunTicket {
            tracker: self,
            session: session.map(str::to_string),
            run,
        }
    }

    /// Runs without a session are never superseded.
    pub fn is_current(&self, ticket: &RunTicket<'_>) -> bool {
        let Some(session) = ticket.session.as_deref() else {
            return true;
        };

        let sessions = self.sessions.lock().unwrap_or_else(|e| e.into_inner());
        sessions
            .get(session)
            .is_none_or(|runs| runs.latest == ticket.run)
    }

    /// Sessions with at least one run in flight.
    pub fn active_sessions(&self) -> usize {
        self.sessions.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    /// The session is forgotten once none of its runs are in flight, so a
    /// slow superseded run still sees the newer one.
    fn release(&self, ticket: &RunTicket<'_>) {
        let Some(session) = ticket.session.as_deref() else {
            return;
        };

        let mut sessions = self.sessions.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(runs) = sessions.get_mut(session) {
            runs.in_flight = runs.in_flight.saturating_sub(1);
            if runs.in_flight == 0 {
                sessions.remove(session);
            }
        }
    }
}
