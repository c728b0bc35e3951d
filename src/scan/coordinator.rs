// Thu Feb 5 2026 - Alex

use crate::command::CommandRegistry;
use crate::scan::record::AccountRecord;
use crate::scan::request::ScanRequest;
use crate::scan::worker::{scan_file, FileScan};
use ahash::AHashSet;
use log::debug;
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;

#[derive(Debug)]
pub enum ScanOutcome {
    // Order among the records is unspecified.
    Complete(Vec<AccountRecord>),
    Superseded,
}

// Fans one request out across a bounded pool of workers pulling from a
// shared file queue. Only the merge into the global set is serialized;
// workers otherwise race freely.
pub struct ScanCoordinator {
    workers: usize,
    registry: Arc<CommandRegistry>,
}

impl ScanCoordinator {
    pub fn new(workers: usize, registry: Arc<CommandRegistry>) -> Self {
        Self {
            workers: workers.max(1),
            registry,
        }
    }

    pub fn worker_count(&self) -> usize {
        self.workers
    }

    pub fn scan(&self, request: Arc<ScanRequest>, files: Vec<PathBuf>) -> ScanOutcome {
        let file_count = files.len();
        let queue = Arc::new(Mutex::new(VecDeque::from(files)));
        let merged: Arc<Mutex<AHashSet<AccountRecord>>> = Arc::new(Mutex::new(AHashSet::new()));
        let quota_reached = Arc::new(AtomicBool::new(false));

        let mut handles = Vec::with_capacity(self.workers);
        for worker_id in 0..self.workers {
            let request = request.clone();
            let registry = self.registry.clone();
            let queue = queue.clone();
            let merged = merged.clone();
            let quota_reached = quota_reached.clone();

            handles.push(thread::spawn(move || {
                worker_loop(worker_id, &request, &registry, &queue, &merged, &quota_reached);
            }));
        }

        for handle in handles {
            let _ = handle.join();
        }

        // A superseded request must never return data, even a complete set:
        // the result would be attributed to the newer command.
        if !self.registry.is_current(request.requester(), request.token()) {
            return ScanOutcome::Superseded;
        }

        let records: Vec<AccountRecord> = merged.lock().iter().cloned().collect();
        debug!(
            "scan finished: {} unique records from {} files (quota {})",
            records.len(),
            file_count,
            request.quota()
        );
        ScanOutcome::Complete(records)
    }
}

fn worker_loop(
    worker_id: usize,
    request: &ScanRequest,
    registry: &CommandRegistry,
    queue: &Mutex<VecDeque<PathBuf>>,
    merged: &Mutex<AHashSet<AccountRecord>>,
    quota_reached: &AtomicBool,
) {
    loop {
        if quota_reached.load(Ordering::Relaxed) {
            break;
        }
        if !registry.is_current(request.requester(), request.token()) {
            debug!("worker {} aborting: command superseded", worker_id);
            break;
        }

        let file = queue.lock().pop_front();
        let Some(file) = file else { break };

        match scan_file(&file, request, registry) {
            FileScan::Superseded => break,
            FileScan::Records(local) => {
                if local.is_empty() {
                    continue;
                }
                // Partial output from a stale worker must not leak into the
                // shared set.
                if !registry.is_current(request.requester(), request.token()) {
                    break;
                }
                let mut global = merged.lock();
                for record in local {
                    if global.len() >= request.quota() {
                        break;
                    }
                    global.insert(record);
                }
                if global.len() >= request.quota() {
                    quota_reached.store(true, Ordering::Relaxed);
                }
            }
        }
    }
}
