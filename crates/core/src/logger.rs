use std::sync::{Mutex, MutexGuard};

/// 進捗1行を受け取れるものは何でもログ先になれる。CLIの標準出力も
/// GUIのログペインも同じ契約で実装する。
pub trait LogSink {
    fn log(&self, line: &str);
}

#[derive(Debug, Default)]
pub struct ConsoleSink;

impl LogSink for ConsoleSink {
    fn log(&self, line: &str) {
        println!("{line}");
    }
}

#[derive(Debug, Default)]
pub struct MemorySink {
    lines: Mutex<Vec<String>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> Vec<String> {
        self.locked().clone()
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.locked().iter().any(|line| line.contains(needle))
    }

    fn locked(&self) -> MutexGuard<'_, Vec<String>> {
        self.lines
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl LogSink for MemorySink {
    fn log(&self, line: &str) {
        self.locked().push(line.to_string());
    }
}
