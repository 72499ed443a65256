// THEORY:
// Within one frame the pipeline stages are strictly sequential, so the only
// natural parallelism is across frames: successive frames are independent and
// can flow through separate pipeline instances. The `ParallelPipeline` does
// exactly that with a small worker pool. A dispatcher task hands incoming
// frames to workers round-robin; each worker owns its own `LaserPipeline` and
// answers through a oneshot channel, so callers still see a simple
// frame-in, result-out interface while a fast capture source keeps every
// core busy.

use crate::pipeline::{DetectionResult, LaserPipeline, PipelineConfig};
use futures::future::join_all;
use image::RgbImage;
use tokio::sync::{mpsc, oneshot};

const MAX_WORKERS: usize = 8;

struct FrameTask {
    frame: RgbImage,
    result_sender: oneshot::Sender<DetectionResult>,
}

pub struct ParallelPipeline {
    task_sender: mpsc::UnboundedSender<FrameTask>,
    workers: Vec<tokio::task::JoinHandle<()>>,
}

impl ParallelPipeline {
    /// Builds a pool with one worker per available core, capped.
    pub fn new(config: PipelineConfig) -> Self {
        let worker_count = num_cpus::get().clamp(1, MAX_WORKERS);
        Self::with_workers(config, worker_count)
    }

    pub fn with_workers(config: PipelineConfig, worker_count: usize) -> Self {
        let worker_count = worker_count.max(1);
        let (task_sender, mut task_receiver) = mpsc::unbounded_channel::<FrameTask>();

        let (worker_senders, worker_receivers): (Vec<_>, Vec<_>) = (0..worker_count)
            .map(|_| mpsc::unbounded_channel::<FrameTask>())
            .unzip();

        // Dispatcher: round-robin frames over the workers.
        tokio::spawn(async move {
            let mut worker_idx = 0;
            while let Some(task) = task_receiver.recv().await {
                let _ = worker_senders[worker_idx].send(task);
                worker_idx = (worker_idx + 1) % worker_count;
            }
        });

        let mut workers = Vec::with_capacity(worker_count);
        for mut worker_receiver in worker_receivers {
            let worker_config = config.clone();
            workers.push(tokio::spawn(async move {
                let pipeline = LaserPipeline::new(worker_config);
                while let Some(task) = worker_receiver.recv().await {
                    let result = pipeline.process_frame(&task.frame);
                    let _ = task.result_sender.send(result);
                }
            }));
        }

        Self {
            task_sender,
            workers,
        }
    }

    /// Submits one frame to the pool and waits for its result.
    pub async fn process_frame(&self, frame: RgbImage) -> Result<DetectionResult, &'static str> {
        let (result_sender, result_receiver) = oneshot::channel();
        self.task_sender
            .send(FrameTask {
                frame,
                result_sender,
            })
            .map_err(|_| "failed to send frame to worker pool")?;

        result_receiver
            .await
            .map_err(|_| "failed to receive result from worker")
    }

    /// Processes a batch of frames concurrently; results come back in
    /// submission order.
    pub async fn process_batch(
        &self,
        frames: Vec<RgbImage>,
    ) -> Vec<Result<DetectionResult, &'static str>> {
        join_all(frames.into_iter().map(|frame| self.process_frame(frame))).await
    }

    /// Drains the pool: no new frames are accepted and every worker is
    /// awaited to completion.
    pub async fn shutdown(self) {
        drop(self.task_sender);
        for worker in self.workers {
            let _ = worker.await;
        }
    }
}
