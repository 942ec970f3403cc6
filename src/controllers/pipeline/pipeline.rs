use crate::config::PipelineConfig;
use crate::controllers::pipeline::coalescing_queue::{CoalescingQueue, Poll};
use crate::controllers::pipeline::events::{FrameInfo, RenderEvent, RenderFailure};
use crate::controllers::pipeline::ports::frame_sink::FrameSink;
use crate::controllers::pipeline::ports::surface::{RenderSurface, SurfaceError};
use crate::core::actions::render_pass::render_pass::{RenderError, render_request};
use crate::core::data::render_request::RenderRequest;
use log::{debug, error, info, warn};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError};
use std::thread::{self, JoinHandle};
use std::time::Instant;
use thiserror::Error;

const WORKER_THREAD_NAME: &str = "render-worker";

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("could not start the render worker: {0}")]
    Spawn(#[source] std::io::Error),
    #[error("the render pipeline has been released")]
    Released,
}

/// Failure of a single render cycle. The pipeline keeps running.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
enum CycleError {
    #[error(transparent)]
    Surface(#[from] SurfaceError),
    #[error(transparent)]
    Render(#[from] RenderError),
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PipelineState {
    Idle,
    /// A request is waiting for its coalescing window to close.
    Requested,
    Rendering,
}

type Job = (u64, RenderRequest);

struct Queue {
    jobs: CoalescingQueue<Job>,
    rendering: bool,
}

struct SharedState {
    generation: AtomicU64,
    last_completed_generation: AtomicU64,
    queue: Mutex<Queue>,
    wake: Condvar,
    shutdown: AtomicBool,
    sink: Arc<dyn FrameSink>,
}

impl SharedState {
    fn lock(&self) -> MutexGuard<'_, Queue> {
        self.queue.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Renders requests on a single background thread, newest first.
///
/// Submissions land in a depth-1 [`CoalescingQueue`], so a burst of parameter
/// changes costs one render. At most one render runs at a time and it always
/// finishes; anything submitted meanwhile waits for the next cycle. The surface
/// moves into the worker on [`RenderPipeline::acquire`] and is never touched
/// from the submitting thread again.
pub struct RenderPipeline {
    shared: Arc<SharedState>,
    worker: Option<JoinHandle<()>>,
}

impl RenderPipeline {
    pub fn acquire<S>(
        surface: S,
        sink: Arc<dyn FrameSink>,
        config: PipelineConfig,
    ) -> Result<Self, PipelineError>
    where
        S: RenderSurface + 'static,
    {
        let shared = Arc::new(SharedState {
            generation: AtomicU64::new(0),
            last_completed_generation: AtomicU64::new(0),
            queue: Mutex::new(Queue {
                jobs: CoalescingQueue::new(config),
                rendering: false,
            }),
            wake: Condvar::new(),
            shutdown: AtomicBool::new(false),
            sink,
        });

        let worker_shared = Arc::clone(&shared);
        let worker = thread::Builder::new()
            .name(WORKER_THREAD_NAME.to_string())
            .spawn(move || {
                let mut surface = surface;
                Self::worker_loop(&worker_shared, &mut surface);
            })
            .map_err(PipelineError::Spawn)?;

        debug!(
            "render pipeline acquired (debounce {:?}, max wait {:?})",
            config.debounce(),
            config.max_wait()
        );

        Ok(Self {
            shared,
            worker: Some(worker),
        })
    }

    /// Queues a request and returns its generation without waiting for it.
    pub fn submit(&self, request: RenderRequest) -> Result<u64, PipelineError> {
        let generation = {
            let mut queue = self.shared.lock();
            if self.shared.shutdown.load(Ordering::Acquire) {
                return Err(PipelineError::Released);
            }

            let generation = self.shared.generation.fetch_add(1, Ordering::SeqCst) + 1;
            if let Some((superseded, _)) = queue.jobs.push((generation, request), Instant::now()) {
                debug!("request {} superseded by {}", superseded, generation);
            }

            generation
        };

        self.shared.wake.notify_one();

        Ok(generation)
    }

    /// Dispatches the pending request as soon as the worker is free.
    pub fn flush(&self) {
        self.shared.lock().jobs.flush();
        self.shared.wake.notify_one();
    }

    #[must_use]
    pub fn state(&self) -> PipelineState {
        let queue = self.shared.lock();

        if queue.rendering {
            PipelineState::Rendering
        } else if queue.jobs.is_empty() {
            PipelineState::Idle
        } else {
            PipelineState::Requested
        }
    }

    #[must_use]
    pub fn last_completed_generation(&self) -> u64 {
        self.shared
            .last_completed_generation
            .load(Ordering::Acquire)
    }

    /// Cancels pending work, lets an in-flight render finish and joins the
    /// worker. Safe to call more than once.
    pub fn release(&mut self) {
        {
            let mut queue = self.shared.lock();
            self.shared.shutdown.store(true, Ordering::Release);
            if let Some((generation, _)) = queue.jobs.clear() {
                debug!("request {} cancelled on release", generation);
            }
        }
        self.shared.wake.notify_all();

        if let Some(handle) = self.worker.take() {
            if handle.join().is_err() {
                error!("render worker panicked");
            }
            debug!("render pipeline released");
        }
    }

    fn worker_loop<S: RenderSurface>(shared: &SharedState, surface: &mut S) {
        loop {
            let (job_generation, request) = {
                let mut queue = shared.lock();
                loop {
                    if shared.shutdown.load(Ordering::Acquire) {
                        return;
                    }

                    match queue.jobs.poll(Instant::now()) {
                        Poll::Ready(job) => {
                            queue.rendering = true;
                            break job;
                        }
                        Poll::Waiting(deadline) => {
                            let timeout = deadline.saturating_duration_since(Instant::now());
                            queue = shared
                                .wake
                                .wait_timeout(queue, timeout)
                                .unwrap_or_else(PoisonError::into_inner)
                                .0;
                        }
                        Poll::Empty => {
                            queue = shared
                                .wake
                                .wait(queue)
                                .unwrap_or_else(PoisonError::into_inner);
                        }
                    }
                }
            };

            debug!(
                "dispatching request {} at {}",
                job_generation,
                request.dimensions()
            );

            let start = Instant::now();
            let result = Self::render_cycle(surface, job_generation, &request);
            let render_duration = start.elapsed();

            let event = match result {
                Ok(()) => {
                    info!(
                        "frame {} presented in {:?}",
                        job_generation, render_duration
                    );
                    RenderEvent::Frame(FrameInfo {
                        generation: job_generation,
                        dimensions: request.dimensions(),
                        render_duration,
                    })
                }
                Err(err) => {
                    match &err {
                        CycleError::Surface(SurfaceError::Detached) => {
                            warn!("frame {} dropped, surface is gone", job_generation)
                        }
                        CycleError::Surface(SurfaceError::Stale { presented, .. }) => warn!(
                            "frame {} dropped, frame {} is already presented",
                            job_generation, presented
                        ),
                        _ => error!("frame {} failed: {}", job_generation, err),
                    }
                    RenderEvent::Error(RenderFailure {
                        generation: job_generation,
                        message: err.to_string(),
                    })
                }
            };

            shared
                .last_completed_generation
                .fetch_max(job_generation, Ordering::AcqRel);
            shared.lock().rendering = false;
            shared.sink.submit(event);
        }
    }

    fn render_cycle<S: RenderSurface>(
        surface: &mut S,
        generation: u64,
        request: &RenderRequest,
    ) -> Result<(), CycleError> {
        let buffer = surface.begin_frame(request.dimensions())?;
        render_request(request, buffer)?;
        surface.end_frame(generation)?;

        Ok(())
    }
}

impl Drop for RenderPipeline {
    fn drop(&mut self) {
        self.release();
    }
}
