use crate::constant::{PROGRESS_ALIGNED, PROGRESS_DONE, PROGRESS_FIRST_READ, PROGRESS_SECOND_READ};
use crate::differ::{DiffResult, LineSequence};
use std::path::PathBuf;
use uuid::Uuid;

/// Requests accepted by the background comparison worker
pub enum WorkerMessage {
    Compare {
        id: Uuid,
        first: LineSequence,
        second: LineSequence,
    },
    CompareFiles {
        id: Uuid,
        first: PathBuf,
        second: PathBuf,
        keep_ends: bool,
    },
    Stop,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    FirstRead,
    SecondRead,
    Aligned,
    Done,
}

impl Stage {
    pub fn percent(self) -> u8 {
        match self {
            Stage::FirstRead => PROGRESS_FIRST_READ,
            Stage::SecondRead => PROGRESS_SECOND_READ,
            Stage::Aligned => PROGRESS_ALIGNED,
            Stage::Done => PROGRESS_DONE,
        }
    }
}

/// Response messages from background comparisons
#[derive(Debug)]
pub enum WorkerResponse {
    Progress {
        id: Uuid,
        stage: Stage,
        percent: u8,
    },
    Finished {
        id: Uuid,
        result: Result<DiffResult, String>,
    },
}

impl WorkerResponse {
    pub fn id(&self) -> Uuid {
        match self {
            WorkerResponse::Progress { id, .. } | WorkerResponse::Finished { id, .. } => *id,
        }
    }
}
