/// Configuration for a priority queue instance
#[derive(Debug, Clone)]
pub struct QueueConfig {
    /// Maximum number of resident elements, fixed for the lifetime of the queue
    pub capacity: usize,
    /// Name used to tag log messages emitted by the queue
    pub label: String,
}

impl Default for QueueConfig {
    fn default() -> Self {
        Self {
            capacity: 64,
            label: "priq".to_string(),
        }
    }
}

impl QueueConfig {
    /// Creates a configuration with the given capacity and the default label
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            ..Default::default()
        }
    }

    /// Set the maximum number of resident elements
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Set the label used in log messages
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }
}
