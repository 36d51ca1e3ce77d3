use crate::backend::file_backend::FileCache;
use crate::differ::{DiffOptions, DiffResult, LineSequence, compare_with};
use crate::messages::{Stage, WorkerMessage, WorkerResponse};
use std::path::Path;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;
use tracing::{debug, error, warn};
use uuid::Uuid;

/// Runs comparisons off the caller's thread, reporting coarse progress.
///
/// The engine itself stays synchronous; a task cannot be cancelled once
/// started, callers abandon it by dropping the response receiver.
pub struct Worker {
    receiver: Receiver<WorkerMessage>,
    response_sender: Sender<WorkerResponse>,
    cache: FileCache,
    options: DiffOptions,
}

impl Worker {
    pub fn new(
        receiver: Receiver<WorkerMessage>,
        response_sender: Sender<WorkerResponse>,
        options: DiffOptions,
        cache: FileCache,
    ) -> Self {
        Self {
            receiver,
            response_sender,
            cache,
            options,
        }
    }

    pub fn run(&mut self) {
        while let Ok(message) = self.receiver.recv() {
            match message {
                WorkerMessage::Compare { id, first, second } => {
                    // inputs arrive in memory, so there are no read stages
                    let result = self.align(id, &first, &second);
                    self.finish(id, Ok(result));
                }
                WorkerMessage::CompareFiles {
                    id,
                    first,
                    second,
                    keep_ends,
                } => {
                    let result = self.compare_files(id, &first, &second, keep_ends);
                    self.finish(id, result);
                }
                WorkerMessage::Stop => {
                    debug!("Worker stopping");
                    break;
                }
            }
        }
    }

    fn compare_files(
        &mut self,
        id: Uuid,
        first: &Path,
        second: &Path,
        keep_ends: bool,
    ) -> Result<DiffResult, String> {
        let first = self.cache.get_or_read(first, keep_ends).map_err(|e| {
            error!("Failed to read first input: {}", e);
            e.to_string()
        })?;
        self.progress(id, Stage::FirstRead);

        let second = self.cache.get_or_read(second, keep_ends).map_err(|e| {
            error!("Failed to read second input: {}", e);
            e.to_string()
        })?;
        self.progress(id, Stage::SecondRead);

        Ok(self.align(id, &first, &second))
    }

    fn align(&self, id: Uuid, first: &LineSequence, second: &LineSequence) -> DiffResult {
        let result = compare_with(first, second, &self.options);
        self.progress(id, Stage::Aligned);
        result
    }

    fn finish(&self, id: Uuid, result: Result<DiffResult, String>) {
        if result.is_ok() {
            self.progress(id, Stage::Done);
        }
        self.send(WorkerResponse::Finished { id, result });
    }

    fn progress(&self, id: Uuid, stage: Stage) {
        self.send(WorkerResponse::Progress {
            id,
            stage,
            percent: stage.percent(),
        });
    }

    fn send(&self, response: WorkerResponse) {
        if let Err(e) = self.response_sender.send(response) {
            warn!("Dropping worker response, nobody is listening: {:?}", e.0.id());
        }
    }
}

pub fn spawn_worker(
    options: DiffOptions,
    cache_capacity: usize,
) -> (Sender<WorkerMessage>, Receiver<WorkerResponse>) {
    let (sender, receiver) = mpsc::channel();
    let (response_sender, response_receiver) = mpsc::channel();
    thread::spawn(move || {
        let mut worker = Worker::new(
            receiver,
            response_sender,
            options,
            FileCache::new(cache_capacity),
        );
        worker.run();
    });
    (sender, response_receiver)
}

/// Compare on a fresh thread and hand the result to `on_done`
pub fn compare_in_background<F>(
    first: LineSequence,
    second: LineSequence,
    options: DiffOptions,
    on_done: F,
) -> thread::JoinHandle<()>
where
    F: FnOnce(DiffResult) + Send + 'static,
{
    thread::spawn(move || on_done(compare_with(&first, &second, &options)))
}
