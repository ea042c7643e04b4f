// Copyright 2025 Chris Custine
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Per-city temperature readings.
//!
//! Cities are sampled one at a time: city N+1 is not queried until city N
//! has answered or failed. A failure only costs that one city its reading.
//! [`CityFeed`] runs batches on a background task and cancels a batch as
//! soon as a newer one is requested.

use std::sync::Arc;

use log::{info, warn};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::cities::City;
use crate::controller::Generation;
use crate::identify::PointSampler;
use crate::layers::LayerId;

/// Sampled value for one city. `None` means no reading.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CityReading {
    pub city: City,
    pub value: Option<f64>,
}

/// Sample every city in order.
///
/// Returns `None` if `cancel` fires before the batch completes; the
/// request in flight at that moment is dropped.
pub async fn fetch_readings<S>(
    sampler: &S,
    cities: &[City],
    layer: LayerId,
    cancel: &CancellationToken,
) -> Option<Vec<CityReading>>
where
    S: PointSampler + ?Sized,
{
    let mut readings = Vec::with_capacity(cities.len());

    for city in cities {
        if cancel.is_cancelled() {
            return None;
        }
        // Cancellation is checked first so a dead batch never issues a request.
        let result = tokio::select! {
            biased;
            () = cancel.cancelled() => return None,
            result = sampler.sample(layer, city.point) => result,
        };

        let value = match result {
            Ok(value) => value,
            Err(e) => {
                warn!("Failed to fetch temperature for {}: {}", city.name, e);
                None
            }
        };
        readings.push(CityReading { city: *city, value });
    }

    Some(readings)
}

/// Readings for one refresh generation.
#[derive(Debug, Clone)]
pub struct CityBatch {
    pub generation: Generation,
    pub layer: LayerId,
    pub readings: Vec<CityReading>,
}

#[derive(Debug, Clone, Copy)]
struct CityRequest {
    generation: Generation,
    layer: LayerId,
}

#[derive(Debug, Clone, Copy)]
enum FeedCommand {
    Fetch(CityRequest),
    /// Stop the running batch without starting another.
    CancelPending,
}

type Notify = Arc<dyn Fn() + Send + Sync>;

/// Handle to the background city sampling task.
///
/// Must be spawned from within a tokio runtime.
pub struct CityFeed {
    command_tx: mpsc::UnboundedSender<FeedCommand>,
    batch_rx: mpsc::UnboundedReceiver<CityBatch>,
    cancel_token: CancellationToken,
}

impl std::fmt::Debug for CityFeed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CityFeed")
            .field("cancel_token", &self.cancel_token)
            .finish_non_exhaustive()
    }
}

impl CityFeed {
    /// Spawn the feed. `on_batch` runs after each completed batch is queued,
    /// typically to wake the UI.
    #[must_use]
    pub fn spawn<S>(sampler: Arc<S>, cities: Arc<[City]>, on_batch: impl Fn() + Send + Sync + 'static) -> Self
    where
        S: PointSampler + ?Sized + 'static,
    {
        let (command_tx, command_rx) = mpsc::unbounded_channel();
        let (batch_tx, batch_rx) = mpsc::unbounded_channel();
        let cancel_token = CancellationToken::new();

        let task_cancel = cancel_token.clone();
        let notify: Notify = Arc::new(on_batch);
        tokio::spawn(async move {
            feed_loop(sampler, cities, command_rx, batch_tx, task_cancel, notify).await;
        });

        Self {
            command_tx,
            batch_rx,
            cancel_token,
        }
    }

    /// Ask for readings of `layer`. Cancels whatever batch is still running.
    pub fn request(&self, generation: Generation, layer: LayerId) {
        let command = FeedCommand::Fetch(CityRequest { generation, layer });
        if self.command_tx.send(command).is_err() {
            warn!("City feed has shut down; dropping request for layer {}", layer);
        }
    }

    /// Cancel the running batch, if any, without requesting a new one.
    pub fn cancel_pending(&self) {
        if self.command_tx.send(FeedCommand::CancelPending).is_err() {
            warn!("City feed has shut down");
        }
    }

    /// Next completed batch, if one is waiting.
    pub fn try_recv(&mut self) -> Option<CityBatch> {
        self.batch_rx.try_recv().ok()
    }

    /// Wait for the next completed batch.
    pub async fn recv(&mut self) -> Option<CityBatch> {
        self.batch_rx.recv().await
    }

    /// Stop the feed and any batch in flight.
    pub fn shutdown(&self) {
        self.cancel_token.cancel();
    }
}

impl Drop for CityFeed {
    fn drop(&mut self) {
        self.shutdown();
    }
}

async fn feed_loop<S>(
    sampler: Arc<S>,
    cities: Arc<[City]>,
    mut command_rx: mpsc::UnboundedReceiver<FeedCommand>,
    batch_tx: mpsc::UnboundedSender<CityBatch>,
    cancel: CancellationToken,
    notify: Notify,
) where
    S: PointSampler + ?Sized + 'static,
{
    let mut in_flight: Option<CancellationToken> = None;

    loop {
        let command = tokio::select! {
            biased;
            () = cancel.cancelled() => break,
            command = command_rx.recv() => match command {
                Some(command) => command,
                None => break,
            },
        };

        if let Some(previous) = in_flight.take() {
            previous.cancel();
        }
        let FeedCommand::Fetch(request) = command else {
            continue;
        };
        let batch_cancel = cancel.child_token();
        in_flight = Some(batch_cancel.clone());

        let sampler = Arc::clone(&sampler);
        let cities = Arc::clone(&cities);
        let batch_tx = batch_tx.clone();
        let notify = Arc::clone(&notify);
        tokio::spawn(async move {
            let Some(readings) = fetch_readings(&*sampler, &cities, request.layer, &batch_cancel).await else {
                info!("City batch for generation {} cancelled", request.generation.0);
                return;
            };
            let with_value = readings.iter().filter(|r| r.value.is_some()).count();
            info!(
                "City batch for layer {} complete: {}/{} readings",
                request.layer,
                with_value,
                readings.len()
            );
            let batch = CityBatch {
                generation: request.generation,
                layer: request.layer,
                readings,
            };
            if batch_tx.send(batch).is_ok() {
                notify();
            }
        });
    }

    if let Some(previous) = in_flight {
        previous.cancel();
    }
}
