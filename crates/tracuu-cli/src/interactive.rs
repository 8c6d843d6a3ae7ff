//! Interactive mode: stdin lines feed a debouncing worker; a result is
//! printed only if no newer line arrived while it was being computed.

use crate::output;
use std::io::{self, BufRead, Write};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};
use tracuu_core::{QueryDebouncer, RequestGate, RequestTicket, WardStore};

pub fn run(store: Arc<WardStore>, window: Duration, json: bool) -> anyhow::Result<()> {
    let gate = Arc::new(RequestGate::new());
    let (tx, rx) = mpsc::channel::<(RequestTicket, String)>();

    let worker = {
        let gate = Arc::clone(&gate);
        thread::spawn(move || {
            debounce_worker(&store, &gate, rx, window, json, &mut io::stdout().lock())
        })
    };

    for line in io::stdin().lock().lines() {
        let line = line?;
        let ticket = gate.begin();
        if tx.send((ticket, line)).is_err() {
            break;
        }
    }
    drop(tx);

    match worker.join() {
        Ok(result) => result?,
        Err(_) => anyhow::bail!("search worker panicked"),
    }
    Ok(())
}

/// Consume queries until the sender hangs up.
///
/// Each query restarts the quiet window. When the window elapses the pending
/// query is searched; when input closes it is searched immediately. Results
/// whose ticket was superseded meanwhile are not printed.
pub fn debounce_worker<W: Write>(
    store: &WardStore,
    gate: &RequestGate,
    rx: Receiver<(RequestTicket, String)>,
    window: Duration,
    json: bool,
    out: &mut W,
) -> io::Result<()> {
    let mut debouncer = QueryDebouncer::new(window);
    let mut pending_ticket: Option<RequestTicket> = None;

    loop {
        let received = match debouncer.deadline() {
            Some(deadline) => rx.recv_timeout(deadline.saturating_duration_since(Instant::now())),
            None => rx.recv().map_err(|_| RecvTimeoutError::Disconnected),
        };
        let ready = match received {
            Ok((ticket, query)) => {
                pending_ticket = Some(ticket);
                debouncer.push(query, Instant::now());
                None
            }
            Err(RecvTimeoutError::Timeout) => debouncer.poll(Instant::now()),
            Err(RecvTimeoutError::Disconnected) => {
                if let (Some(query), Some(ticket)) = (debouncer.flush(), pending_ticket) {
                    print_if_current(store, gate, ticket, &query, json, out)?;
                }
                return Ok(());
            }
        };
        if let (Some(query), Some(ticket)) = (ready, pending_ticket) {
            print_if_current(store, gate, ticket, &query, json, out)?;
        }
    }
}

fn print_if_current<W: Write>(
    store: &WardStore,
    gate: &RequestGate,
    ticket: RequestTicket,
    query: &str,
    json: bool,
    out: &mut W,
) -> io::Result<()> {
    if let Some(results) = store.search_if_current(gate, ticket, query) {
        output::print_results(out, query, &results, json, false)?;
        out.flush()?;
    }
    Ok(())
}
