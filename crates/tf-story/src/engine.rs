//! Play session.

use tf_core::{Notification, Operation, PlayerState, Reducer};

use crate::catalog::SceneCatalog;
use crate::error::{StoryError, StoryResult};
use crate::resolver::{RenderableScene, resolve};

/// A play session over a scene catalog.
///
/// Holds the one current [`PlayerState`]. Every change goes through the
/// reducer and replaces the state wholesale, so [`Engine::state`] always
/// returns a consistent value.
#[derive(Debug, Clone)]
pub struct Engine {
    /// Scene content, fixed for the session.
    catalog: SceneCatalog,
    /// Operation semantics.
    reducer: Reducer,
    /// Current player state.
    state: PlayerState,
    /// Notifications not yet shown.
    pending: Vec<Notification>,
}

impl Engine {
    /// Start a new game at the catalog's start scene.
    pub fn new(catalog: SceneCatalog) -> Self {
        let state = PlayerState {
            current_scene: catalog.start().to_string(),
            ..PlayerState::initial()
        };
        Self {
            catalog,
            reducer: Reducer::default(),
            state,
            pending: Vec::new(),
        }
    }

    /// Use a reducer with custom rules.
    pub fn with_reducer(mut self, reducer: Reducer) -> Self {
        self.reducer = reducer;
        self
    }

    /// Resume from an existing state.
    pub fn with_state(mut self, state: PlayerState) -> Self {
        self.state = state;
        self
    }

    /// The scene catalog.
    pub fn catalog(&self) -> &SceneCatalog {
        &self.catalog
    }

    /// The reducer.
    pub fn reducer(&self) -> &Reducer {
        &self.reducer
    }

    /// The current player state.
    pub fn state(&self) -> &PlayerState {
        &self.state
    }

    /// Replace the current state, e.g. after loading a save.
    pub fn replace_state(&mut self, state: PlayerState) {
        tracing::debug!(scene = %state.current_scene, "state replaced");
        self.state = state;
    }

    /// Resolve the current scene.
    pub fn render(&self) -> RenderableScene {
        resolve(&self.catalog, &self.state.current_scene, &self.state)
    }

    /// Take the choice at `index` (0-based) in the current scene.
    ///
    /// Locked choices are refused without touching the state.
    pub fn choose(&mut self, index: usize) -> StoryResult<()> {
        let scene = self.render();
        let available = scene.choices.len();
        let choice = scene
            .choices
            .into_iter()
            .nth(index)
            .ok_or(StoryError::InvalidChoice { index, available })?;

        if let Some(reason) = choice.unmet {
            return Err(StoryError::ChoiceNotEligible {
                text: choice.text,
                reason: reason.to_string(),
            });
        }

        tracing::info!(scene = %scene.id, choice = %choice.text, "choice taken");
        self.run(choice.trigger.operations());
        Ok(())
    }

    /// Apply a single operation outside of any choice.
    pub fn dispatch(&mut self, op: &Operation) {
        self.run(std::slice::from_ref(op));
    }

    /// Start over at the catalog's start scene, carrying New Game+ progress.
    pub fn restart(&mut self) {
        self.run(&[Operation::RestartGame]);
    }

    /// Drain notifications produced since the last call.
    pub fn take_notifications(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.pending)
    }

    fn run(&mut self, ops: &[Operation]) {
        let mut ops = ops.to_vec();
        // A restart with no later scene change lands on this catalog's start.
        if let Some(last_restart) = ops.iter().rposition(|op| *op == Operation::RestartGame)
            && !ops[last_restart..].iter().any(|op| op.target_scene().is_some())
        {
            ops.push(Operation::ChangeScene {
                scene: self.catalog.start().to_string(),
            });
        }

        let (next, notifications) = self.reducer.apply_all(&self.state, &ops);
        self.state = next;
        self.pending.extend(notifications);
    }
}
