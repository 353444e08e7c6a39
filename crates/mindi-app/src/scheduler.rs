use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskId(u64);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scheduled<A> {
    pub id: TaskId,
    pub due_ms: u64,
    pub generation: u64,
    pub action: A,
}

/// Single-threaded timer queue on a virtual millisecond clock.
///
/// Time only moves when the owner advances it, and due tasks come out one
/// at a time in (due, insertion) order, so every callback runs to completion
/// before the next one starts.
#[derive(Debug, Clone)]
pub struct Scheduler<A> {
    now_ms: u64,
    next_id: u64,
    queue: BTreeMap<(u64, TaskId), Scheduled<A>>,
}

impl<A> Default for Scheduler<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A> Scheduler<A> {
    pub fn new() -> Self {
        Self {
            now_ms: 0,
            next_id: 0,
            queue: BTreeMap::new(),
        }
    }

    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    pub fn is_idle(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn schedule(&mut self, delay_ms: u64, generation: u64, action: A) -> TaskId {
        let id = TaskId(self.next_id);
        self.next_id += 1;
        let due_ms = self.now_ms.saturating_add(delay_ms);
        self.queue.insert(
            (due_ms, id),
            Scheduled {
                id,
                due_ms,
                generation,
                action,
            },
        );
        id
    }

    pub fn cancel(&mut self, id: TaskId) -> bool {
        let key = self.queue.keys().find(|(_, task)| *task == id).copied();
        match key {
            Some(key) => self.queue.remove(&key).is_some(),
            None => false,
        }
    }

    /// Drops every pending task and reports how many were dropped.
    pub fn cancel_all(&mut self) -> usize {
        let dropped = self.queue.len();
        self.queue.clear();
        dropped
    }

    pub fn next_due_ms(&self) -> Option<u64> {
        self.queue.keys().next().map(|(due, _)| *due)
    }

    /// Pops the earliest task due at or before `until_ms`, moving the clock
    /// to its due time.
    pub fn pop_due(&mut self, until_ms: u64) -> Option<Scheduled<A>> {
        let (due, _) = *self.queue.keys().next()?;
        if due > until_ms {
            return None;
        }
        let (_, task) = self.queue.pop_first()?;
        self.now_ms = self.now_ms.max(task.due_ms);
        Some(task)
    }

    /// Pops the earliest task whatever its due time.
    pub fn pop_next(&mut self) -> Option<Scheduled<A>> {
        let due = self.next_due_ms()?;
        self.pop_due(due)
    }

    /// Moves the clock forward without running anything.
    pub fn advance_clock_to(&mut self, at_ms: u64) {
        self.now_ms = self.now_ms.max(at_ms);
    }
}
