//! Undo/Redo history for board operations
//!
//! A linear command log with a cursor. Everything before the cursor can be
//! undone, everything from the cursor onward can be redone. Adding a command
//! while redo-able entries exist drops them: history is a line, not a tree.

use std::collections::HashMap;
use std::fmt;

use rand::Rng;

/// Length of generated command identities (e.g. "k3x9a")
pub const ID_LEN: usize = 5;

const ID_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// A reversible unit of work.
///
/// `execute` re-applies the action (redo), `undo` reverses it. The history
/// never runs `execute` when a command is added: the caller has already
/// performed the action by the time it records it.
pub trait Command<Ctx = ()> {
    fn execute(&mut self, ctx: &mut Ctx);
    fn undo(&mut self, ctx: &mut Ctx);
}

/// A command built from a pair of closures.
pub struct FnCommand<E, U> {
    execute: E,
    undo: U,
}

impl<E, U> FnCommand<E, U> {
    pub fn new(execute: E, undo: U) -> Self {
        Self { execute, undo }
    }
}

impl<Ctx, E, U> Command<Ctx> for FnCommand<E, U>
where
    E: FnMut(&mut Ctx),
    U: FnMut(&mut Ctx),
{
    fn execute(&mut self, ctx: &mut Ctx) {
        (self.execute)(ctx)
    }

    fn undo(&mut self, ctx: &mut Ctx) {
        (self.undo)(ctx)
    }
}

/// Identity of a recorded command. Compared by token, never by content.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CommandId(String);

impl CommandId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Random base-36 token. Not guaranteed unique on its own; use
    /// [`History::next_id`] to get one that is free in a given history.
    pub fn random<R: Rng>(rng: &mut R) -> Self {
        let token: String = (0..ID_LEN)
            .map(|_| ID_ALPHABET[rng.gen_range(0..ID_ALPHABET.len())] as char)
            .collect();
        Self(token)
    }
}

impl From<&str> for CommandId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for CommandId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl fmt::Display for CommandId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Enabled state of the undo and redo buttons, derived from the history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Affordances {
    pub undo: bool,
    pub redo: bool,
}

pub struct History<Ctx = ()> {
    registry: HashMap<CommandId, Box<dyn Command<Ctx>>>,
    log: Vec<CommandId>,
    cursor: usize,
}

impl<Ctx> Default for History<Ctx> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Ctx> fmt::Debug for History<Ctx> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("History")
            .field("log", &self.log)
            .field("cursor", &self.cursor)
            .field("registered", &self.registry.len())
            .finish()
    }
}

impl<Ctx> History<Ctx> {
    pub fn new() -> Self {
        Self {
            registry: HashMap::new(),
            log: Vec::new(),
            cursor: 0,
        }
    }

    /// Generate an identity not yet present in the registry
    pub fn next_id(&self) -> CommandId {
        let mut rng = rand::thread_rng();
        loop {
            let id = CommandId::random(&mut rng);
            if !self.registry.contains_key(&id) {
                return id;
            }
        }
    }

    /// Record an already-applied command.
    ///
    /// Registers `command` under `id` (replacing any previous registration),
    /// truncates the log to the cursor and appends `id`. Redo is never
    /// available right after this call.
    pub fn add_command<C>(&mut self, id: impl Into<CommandId>, command: C)
    where
        C: Command<Ctx> + 'static,
    {
        self.add_boxed(id.into(), Box::new(command));
    }

    pub fn add_boxed(&mut self, id: CommandId, command: Box<dyn Command<Ctx>>) {
        if self.registry.insert(id.clone(), command).is_some() {
            log::warn!("command {} re-registered, previous entry replaced", id);
        }

        let dropped = self.log.len() - self.cursor;
        if dropped > 0 {
            log::debug!("discarding {} redo-able command(s)", dropped);
        }
        self.log.truncate(self.cursor);
        self.log.push(id);
        self.cursor += 1;

        log::debug!("history add: cursor={} len={}", self.cursor, self.log.len());
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor < self.log.len()
    }

    /// Undo the most recently executed command. Returns false when there is
    /// nothing to undo; state is untouched in that case.
    pub fn undo(&mut self, ctx: &mut Ctx) -> bool {
        if !self.can_undo() {
            return false;
        }

        self.cursor -= 1;
        let cursor = self.cursor;
        match self.current_command() {
            Some(command) => command.undo(ctx),
            None => log::error!("no registered command at cursor {}", cursor),
        }

        log::debug!("history undo: cursor={} len={}", self.cursor, self.log.len());
        true
    }

    /// Re-execute the next command. Returns false when there is nothing to
    /// redo; state is untouched in that case.
    pub fn redo(&mut self, ctx: &mut Ctx) -> bool {
        if !self.can_redo() {
            return false;
        }

        let cursor = self.cursor;
        match self.current_command() {
            Some(command) => command.execute(ctx),
            None => log::error!("no registered command at cursor {}", cursor),
        }
        self.cursor += 1;

        log::debug!("history redo: cursor={} len={}", self.cursor, self.log.len());
        true
    }

    fn current_command(&mut self) -> Option<&mut Box<dyn Command<Ctx>>> {
        let id = self.log.get(self.cursor)?;
        self.registry.get_mut(id)
    }

    pub fn affordances(&self) -> Affordances {
        Affordances {
            undo: self.can_undo(),
            redo: self.can_redo(),
        }
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.log.len()
    }

    pub fn is_empty(&self) -> bool {
        self.log.is_empty()
    }

    pub fn log(&self) -> &[CommandId] {
        &self.log
    }

    /// Number of registered commands, including ones no longer reachable
    /// from the log
    pub fn registered(&self) -> usize {
        self.registry.len()
    }

    pub fn contains(&self, id: &CommandId) -> bool {
        self.registry.contains_key(id)
    }

    /// Whether `id` can still be reached by undo or redo
    pub fn is_reachable(&self, id: &CommandId) -> bool {
        self.log.contains(id)
    }

    /// Drop every command, reachable or not
    pub fn clear(&mut self) {
        self.registry.clear();
        self.log.clear();
        self.cursor = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Records "name:execute" / "name:undo" into the context
    struct Recorder(&'static str);

    impl Command<Vec<String>> for Recorder {
        fn execute(&mut self, ctx: &mut Vec<String>) {
            ctx.push(format!("{}:execute", self.0));
        }

        fn undo(&mut self, ctx: &mut Vec<String>) {
            ctx.push(format!("{}:undo", self.0));
        }
    }

    fn ids(history: &History<Vec<String>>) -> Vec<&str> {
        history.log().iter().map(|id| id.as_str()).collect()
    }

    #[test]
    fn test_empty_history() {
        let mut history: History<Vec<String>> = History::new();
        let mut calls = Vec::new();

        assert!(!history.can_undo());
        assert!(!history.can_redo());
        assert!(!history.undo(&mut calls));
        assert!(!history.redo(&mut calls));
        assert_eq!(history.cursor(), 0);
        assert!(history.is_empty());
        assert!(calls.is_empty());
    }

    #[test]
    fn test_single_command_undo_redo() {
        let mut history: History<Vec<String>> = History::new();
        let mut calls = Vec::new();

        history.add_command("a", Recorder("a"));
        assert_eq!(history.cursor(), 1);
        assert_eq!(ids(&history), vec!["a"]);
        // Adding never executes
        assert!(calls.is_empty());

        assert!(history.undo(&mut calls));
        assert_eq!(history.cursor(), 0);
        assert_eq!(calls, vec!["a:undo"]);
        assert!(!history.can_undo());

        assert!(history.redo(&mut calls));
        assert_eq!(history.cursor(), 1);
        assert_eq!(calls, vec!["a:undo", "a:execute"]);
        assert!(!history.can_redo());
    }

    #[test]
    fn test_add_after_undo_truncates() {
        let mut history: History<Vec<String>> = History::new();
        let mut calls = Vec::new();

        history.add_command("a", Recorder("a"));
        history.add_command("b", Recorder("b"));
        assert!(history.undo(&mut calls));
        assert_eq!(history.cursor(), 1);

        history.add_command("c", Recorder("c"));
        assert_eq!(ids(&history), vec!["a", "c"]);
        assert_eq!(history.cursor(), 2);
        assert!(!history.can_redo());

        // b is orphaned: still registered, no longer reachable
        let b = CommandId::from("b");
        assert!(history.contains(&b));
        assert!(!history.is_reachable(&b));
        assert_eq!(history.registered(), 3);

        // Undoing twice walks c then a, never b
        calls.clear();
        assert!(history.undo(&mut calls));
        assert!(history.undo(&mut calls));
        assert!(!history.undo(&mut calls));
        assert_eq!(calls, vec!["c:undo", "a:undo"]);
    }

    #[test]
    fn test_undo_order_is_reverse_of_adds() {
        let mut history: History<Vec<String>> = History::new();
        let mut calls = Vec::new();

        history.add_command("a", Recorder("a"));
        history.add_command("b", Recorder("b"));
        history.add_command("c", Recorder("c"));

        while history.undo(&mut calls) {}
        while history.redo(&mut calls) {}

        assert_eq!(
            calls,
            vec!["c:undo", "b:undo", "a:undo", "a:execute", "b:execute", "c:execute"]
        );
        assert_eq!(history.cursor(), 3);
    }

    #[test]
    fn test_redo_at_end_is_noop() {
        let mut history: History<Vec<String>> = History::new();
        let mut calls = Vec::new();

        history.add_command("a", Recorder("a"));
        assert!(!history.redo(&mut calls));
        assert_eq!(history.cursor(), 1);
        assert_eq!(history.len(), 1);
        assert!(calls.is_empty());
    }

    #[test]
    fn test_affordances() {
        let mut history: History<Vec<String>> = History::new();
        let mut calls = Vec::new();
        assert_eq!(history.affordances(), Affordances { undo: false, redo: false });

        history.add_command("a", Recorder("a"));
        history.add_command("b", Recorder("b"));
        assert_eq!(history.affordances(), Affordances { undo: true, redo: false });

        history.undo(&mut calls);
        assert_eq!(history.affordances(), Affordances { undo: true, redo: true });

        history.undo(&mut calls);
        assert_eq!(history.affordances(), Affordances { undo: false, redo: true });

        // Truncating add leaves redo disabled
        history.add_command("c", Recorder("c"));
        assert_eq!(history.affordances(), Affordances { undo: true, redo: false });
    }

    #[test]
    fn test_reregistered_id_replaces_command() {
        let mut history: History<Vec<String>> = History::new();
        let mut calls = Vec::new();

        history.add_command("a", Recorder("first"));
        history.add_command("a", Recorder("second"));
        assert_eq!(history.registered(), 1);
        assert_eq!(history.len(), 2);

        history.undo(&mut calls);
        history.undo(&mut calls);
        assert_eq!(calls, vec!["second:undo", "second:undo"]);
    }

    #[test]
    fn test_closure_commands_with_captured_state() {
        let state = Rc::new(RefCell::new(vec![1, 2]));
        let mut history: History = History::new();

        state.borrow_mut().push(3);
        let (exec_state, undo_state) = (state.clone(), state.clone());
        history.add_command(
            history.next_id(),
            FnCommand::new(
                move |_: &mut ()| exec_state.borrow_mut().push(3),
                move |_: &mut ()| {
                    undo_state.borrow_mut().pop();
                },
            ),
        );

        assert!(history.undo(&mut ()));
        assert_eq!(*state.borrow(), vec![1, 2]);
        assert!(history.redo(&mut ()));
        assert_eq!(*state.borrow(), vec![1, 2, 3]);
    }

    #[test]
    fn test_next_id_shape_and_uniqueness() {
        let mut history: History<Vec<String>> = History::new();
        for _ in 0..200 {
            let id = history.next_id();
            assert_eq!(id.as_str().len(), ID_LEN);
            assert!(id.as_str().bytes().all(|b| b.is_ascii_digit() || b.is_ascii_lowercase()));
            assert!(!history.contains(&id));
            history.add_command(id, Recorder("x"));
        }
        assert_eq!(history.registered(), 200);
    }

    #[test]
    fn test_clear() {
        let mut history: History<Vec<String>> = History::new();
        let mut calls = Vec::new();
        history.add_command("a", Recorder("a"));
        history.add_command("b", Recorder("b"));
        history.undo(&mut calls);

        history.clear();
        assert_eq!(history.cursor(), 0);
        assert!(history.is_empty());
        assert_eq!(history.registered(), 0);
        assert!(!history.can_undo());
        assert!(!history.can_redo());
    }
}
