// Thu Feb 5 2026 - Alex

use crate::ledger::UserId;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub raw_corpus_dir: PathBuf,
    pub delivered_dir: PathBuf,
    pub data_file: PathBuf,
    pub operator: UserId,
    pub worker_threads: usize,
    pub result_delay_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            raw_corpus_dir: PathBuf::from("logs"),
            delivered_dir: PathBuf::from("generated_results"),
            data_file: PathBuf::from("ledger_data.json"),
            operator: 0,
            worker_threads: default_worker_threads(),
            result_delay_ms: 2_000,
        }
    }
}

fn default_worker_threads() -> usize {
    num_cpus::get().clamp(1, 4)
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_raw_corpus_dir(mut self, dir: PathBuf) -> Self {
        self.raw_corpus_dir = dir;
        self
    }

    pub fn with_delivered_dir(mut self, dir: PathBuf) -> Self {
        self.delivered_dir = dir;
        self
    }

    pub fn with_data_file(mut self, path: PathBuf) -> Self {
        self.data_file = path;
        self
    }

    pub fn with_operator(mut self, operator: UserId) -> Self {
        self.operator = operator;
        self
    }

    pub fn with_worker_threads(mut self, threads: usize) -> Self {
        self.worker_threads = threads;
        self
    }

    pub fn with_result_delay_ms(mut self, delay: u64) -> Self {
        self.result_delay_ms = delay;
        self
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.worker_threads == 0 {
            return Err("worker_threads must be greater than 0".to_string());
        }
        if self.raw_corpus_dir == self.delivered_dir {
            return Err("raw corpus and delivered directories must differ".to_string());
        }
        Ok(())
    }
}
