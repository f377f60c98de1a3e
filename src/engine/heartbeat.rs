//! Periodic background ticking
//!
//! A [`Heartbeat`] owns one thread that locks the shared engine and calls
//! [`Tick::tick`] once per period. Stopping (or dropping) the heartbeat joins
//! the thread, so no tick runs after [`Heartbeat::stop`] returns.

use super::Tick;
use crate::Result;
use anyhow::Context;
use crossbeam_channel::{select, tick, Sender};
use log::{debug, error};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};
use std::time::Duration;

#[derive(Debug)]
pub struct Heartbeat {
    stop_tx: Option<Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

impl Heartbeat {
    pub fn start<T>(target: Arc<Mutex<T>>, period: Duration) -> Result<Self>
    where
        T: Tick + Send + 'static,
    {
        let (stop_tx, stop_rx) = crossbeam_channel::bounded::<()>(0);
        let ticker = tick(period);

        let handle = thread::Builder::new()
            .name("koth-heartbeat".to_string())
            .spawn(move || loop {
                let stopped = select! {
                    recv(ticker) -> _ => false,
                    recv(stop_rx) -> _ => true,
                };
                if stopped {
                    break;
                }
                match target.lock() {
                    Ok(mut guard) => guard.tick(),
                    Err(_) => {
                        error!("Engine lock poisoned, heartbeat stopping");
                        break;
                    }
                }
            })
            .context("failed to spawn heartbeat thread")?;

        debug!("Heartbeat started every {:?}", period);
        Ok(Self {
            stop_tx: Some(stop_tx),
            handle: Some(handle),
        })
    }

    pub fn is_running(&self) -> bool {
        self.handle.as_ref().map_or(false, |h| !h.is_finished())
    }

    /// Stop ticking and wait for the thread to exit
    pub fn stop(&mut self) {
        // Dropping the sender disconnects the channel and wakes the select
        drop(self.stop_tx.take());
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                error!("Heartbeat thread panicked");
            }
            debug!("Heartbeat stopped");
        }
    }
}

impl Drop for Heartbeat {
    fn drop(&mut self) {
        self.stop();
    }
}
