use std::collections::HashMap;
use tokio::task::JoinHandle;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskKey {
    LoadRoom,
    LoadFurniture,
    Measure,
    Animation,
    Save,
}

/// One live task per key; spawning under a taken key aborts the old one.
#[derive(Default)]
pub struct TaskManager {
    tasks: HashMap<TaskKey, JoinHandle<()>>,
}

impl TaskManager {
    pub fn new() -> Self {
        Self {
            tasks: HashMap::new(),
        }
    }

    pub fn spawn(&mut self, key: TaskKey, task: JoinHandle<()>) {
        if let Some(handle) = self.tasks.insert(key, task) {
            handle.abort();
        }
    }

    pub fn abort(&mut self, key: TaskKey) {
        if let Some(handle) = self.tasks.remove(&key) {
            handle.abort();
        }
    }

    pub fn is_running(&self, key: TaskKey) -> bool {
        self.tasks.get(&key).is_some_and(|h| !h.is_finished())
    }

    pub fn abort_all(&mut self) {
        for handle in self.tasks.values() {
            handle.abort();
        }
        self.tasks.clear();
    }
}

impl Drop for TaskManager {
    fn drop(&mut self) {
        self.abort_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn respawn_aborts_previous_task() {
        let mut tasks = TaskManager::new();
        let (tx, rx) = flume::bounded::<()>(1);
        tasks.spawn(
            TaskKey::Save,
            tokio::spawn(async move {
                let _tx = tx;
                tokio::time::sleep(Duration::from_secs(60)).await;
            }),
        );
        tasks.spawn(
            TaskKey::Save,
            tokio::spawn(tokio::time::sleep(Duration::from_secs(60))),
        );

        // The sender only disconnects once the first task has been dropped.
        assert!(rx.recv_async().await.is_err());
        assert!(tasks.is_running(TaskKey::Save));
    }
}
