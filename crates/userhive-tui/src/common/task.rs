/// Identifier of a spawned async task.
///
/// Ids come from a single `TaskSeq` and increase monotonically, so ordering
/// two ids orders the requests that produced them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TaskId(pub u64);

#[derive(Debug, Default)]
pub struct TaskSeq {
    next: u64,
}

impl TaskSeq {
    pub fn next_id(&mut self) -> TaskId {
        self.next += 1;
        TaskId(self.next)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskKind {
    Login,
    FetchPage,
    UpdateUser,
    DeleteUser,
}

#[derive(Debug, Clone)]
pub struct TaskStarted {
    pub id: TaskId,
}

#[derive(Debug)]
pub struct TaskCompleted<E> {
    pub id: TaskId,
    pub result: E,
}

/// Task lifecycle state (stored in AppState, mutated only by reducer).
#[derive(Debug, Default, Clone)]
pub struct TaskState {
    pub active: Option<TaskId>,
    /// Id of the most recent result that was applied to view state.
    pub last_applied: Option<TaskId>,
}

impl TaskState {
    pub fn is_running(&self) -> bool {
        self.active.is_some()
    }

    pub fn on_started(&mut self, started: &TaskStarted) {
        self.active = Some(started.id);
    }

    pub fn finish_if_active(&mut self, id: TaskId) -> bool {
        let ok = self.active == Some(id);
        if ok {
            self.active = None;
        }
        ok
    }

    /// Returns true if `id` is newer than the last applied result.
    pub fn is_newer(&self, id: TaskId) -> bool {
        self.last_applied.is_none_or(|last| id > last)
    }

    pub fn mark_applied(&mut self, id: TaskId) {
        self.last_applied = Some(id);
    }
}

#[derive(Debug, Default, Clone)]
pub struct Tasks {
    pub login: TaskState,
    pub fetch_page: TaskState,
    pub update_user: TaskState,
    pub delete_user: TaskState,
}

impl Tasks {
    pub fn state_mut(&mut self, kind: TaskKind) -> &mut TaskState {
        match kind {
            TaskKind::Login => &mut self.login,
            TaskKind::FetchPage => &mut self.fetch_page,
            TaskKind::UpdateUser => &mut self.update_user,
            TaskKind::DeleteUser => &mut self.delete_user,
        }
    }

    pub fn is_any_running(&self) -> bool {
        self.login.is_running()
            || self.fetch_page.is_running()
            || self.update_user.is_running()
            || self.delete_user.is_running()
    }
}
