use crate::StoreError;
use std::thread;
use std::time::Duration;

pub trait ResourceBackend<T> {
    fn fetch_all(&self) -> Result<Vec<T>, StoreError>;
}

/// Bounded retry with a delay that grows linearly with the attempt number.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    pub retries: u32,
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            retries: 3,
            base_delay: Duration::from_millis(1000),
        }
    }
}

impl RetryPolicy {
    /// No waiting between attempts. Meant for tests.
    pub fn immediate(retries: u32) -> Self {
        Self {
            retries,
            base_delay: Duration::ZERO,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    Init,
    Loading,
    Loaded,
    Failed,
}

/// Holds the last successfully loaded data set together with the load state
/// and the error that ended the last failed attempt. After an exhausted
/// retry budget the data set is empty, not stale.
#[derive(Debug)]
pub struct Loader<T> {
    policy: RetryPolicy,
    state: LoadState,
    error: Option<String>,
    data: Vec<T>,
}

impl<T> Loader<T> {
    pub fn new(policy: RetryPolicy) -> Self {
        Self {
            policy,
            state: LoadState::Init,
            error: None,
            data: Vec::new(),
        }
    }

    pub fn state(&self) -> LoadState {
        self.state
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn data(&self) -> &[T] {
        &self.data
    }

    pub(crate) fn push(&mut self, item: T) {
        self.data.push(item);
    }

    pub fn load(&mut self, backend: &dyn ResourceBackend<T>) {
        self.state = LoadState::Loading;
        self.error = None;
        let mut attempt = 0u32;
        loop {
            match backend.fetch_all() {
                Ok(data) => {
                    log::info!("loaded {} records", data.len());
                    self.data = data;
                    self.state = LoadState::Loaded;
                    return;
                }
                Err(err) => {
                    attempt += 1;
                    if attempt > self.policy.retries {
                        log::warn!("load failed after {attempt} attempts: {err}");
                        self.data.clear();
                        self.error = Some(err.to_string());
                        self.state = LoadState::Failed;
                        return;
                    }
                    log::warn!("load attempt {attempt} failed, retrying: {err}");
                    thread::sleep(self.policy.base_delay * attempt);
                }
            }
        }
    }
}
