//! Tree state store.
//!
//! Owns the flat node list, cursor, committed selection and expansion of one
//! tree, applies navigator decisions, runs the expand/load flow and
//! republishes to the external registry after every change.

use std::collections::{BTreeSet, HashSet};
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::domain::entities::{TreeNode, TreeState};
use crate::domain::ports::{ChildHint, ChildLoader, LoadError, TreeDataConfig, TreeRecord};
use crate::domain::services::{
    self, expand_decision, find_node, flatten_records, get_children, splice_children,
    CollapseOutcome, ExpandDecision,
};
use crate::domain::value_objects::{ancestor_ids, ROOT_ID};
use crate::error::{TreeError, TreeResult};

use super::expand::{ExpandOutcome, ExpandPhase, ExpandStep, ExpandTracker, LoadTicket};
use super::registry::{OwnerId, TreeRegistry, TreeSnapshot};

/// Interaction switches of a tree
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewOptions {
    /// A single click commits the selection (and collapses expanded nodes)
    #[serde(default)]
    pub single_click_select: bool,
    /// A single click expands before moving the cursor
    #[serde(default)]
    pub single_click_expand: bool,
    /// Commits append to the multi-selection instead of replacing it
    #[serde(default)]
    pub multi_select: bool,
}

/// Keyboard-level action on a tree
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TreeAction {
    /// Move cursor down
    Down,
    /// Move cursor up
    Up,
    /// Expand node (loading children if needed)
    Expand,
    /// Collapse node or step to parent
    Collapse,
    /// Commit the cursor node as selection
    Commit,
}

/// Passed to the selection handler on every commit
#[derive(Debug)]
pub struct SelectionEvent<'a, T> {
    pub node: &'a TreeNode<T>,
    /// The node is now part of the committed selection
    pub is_selected: bool,
    /// The node was already committed before this commit
    pub was_selected: bool,
    /// The node is under the cursor
    pub is_half_selected: bool,
    pub is_expanded: bool,
}

type SelectHandler<T> = Box<dyn FnMut(&SelectionEvent<'_, T>) + Send>;

struct CacheBinding<T> {
    key: String,
    owner: OwnerId,
    registry: Arc<TreeRegistry<T>>,
}

/// Builder for [`TreeStore`]
pub struct TreeStoreBuilder<T: Send + Sync> {
    nodes: Option<Vec<TreeNode<T>>>,
    loader: Option<Arc<dyn ChildLoader<T>>>,
    options: ViewOptions,
    default_selected_id: Option<String>,
    default_multi_selected_ids: Vec<String>,
    on_select: Option<SelectHandler<T>>,
    cache: Option<(String, Arc<TreeRegistry<T>>)>,
}

impl<T: Send + Sync> Default for TreeStoreBuilder<T> {
    fn default() -> Self {
        Self {
            nodes: None,
            loader: None,
            options: ViewOptions::default(),
            default_selected_id: None,
            default_multi_selected_ids: Vec::new(),
            on_select: None,
            cache: None,
        }
    }
}

impl<T> TreeStoreBuilder<T>
where
    T: Clone + Send + Sync + 'static,
{
    /// Use a pre-built flat list as is (root first, sorted)
    pub fn tree_data(mut self, nodes: Vec<TreeNode<T>>) -> Self {
        self.nodes = Some(nodes);
        self
    }

    /// Build the flat list from records
    pub fn data_config(mut self, config: TreeDataConfig<T>, hint: ChildHint<T>) -> Self
    where
        T: TreeRecord,
    {
        self.nodes = Some(flatten_records(config, &hint));
        self
    }

    pub fn loader(mut self, loader: impl ChildLoader<T> + 'static) -> Self {
        self.loader = Some(Arc::new(loader));
        self
    }

    pub fn shared_loader(mut self, loader: Arc<dyn ChildLoader<T>>) -> Self {
        self.loader = Some(loader);
        self
    }

    pub fn options(mut self, options: ViewOptions) -> Self {
        self.options = options;
        self
    }

    /// Select this id and expand its ancestor chain on construction.
    ///
    /// Neither the selection handler nor the multi-selection is touched, the
    /// same as [`TreeStore::set_default_selected`].
    pub fn default_selected(mut self, id: impl Into<String>) -> Self {
        self.default_selected_id = Some(id.into());
        self
    }

    pub fn default_multi_selected<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.default_multi_selected_ids = ids.into_iter().map(Into::into).collect();
        self
    }

    pub fn on_select(mut self, handler: impl FnMut(&SelectionEvent<'_, T>) + Send + 'static) -> Self {
        self.on_select = Some(Box::new(handler));
        self
    }

    /// Publish this tree's state in `registry` under `key`
    pub fn cache(mut self, key: impl Into<String>, registry: Arc<TreeRegistry<T>>) -> Self {
        self.cache = Some((key.into(), registry));
        self
    }

    pub fn build(self) -> TreeResult<TreeStore<T>> {
        let nodes = self.nodes.ok_or(TreeError::MissingTreeSource)?;

        let mut store = TreeStore {
            nodes,
            state: TreeState::default(),
            multi_select: self.options.multi_select,
            multi_selected: Vec::new(),
            options: self.options,
            focused: false,
            loader: self.loader,
            tracker: ExpandTracker::new(),
            on_select: None,
            cache: None,
        };

        if let Some(id) = &self.default_selected_id {
            store.apply_default_selection(id);
        }
        store.multi_selected = store
            .nodes
            .iter()
            .filter(|n| self.default_multi_selected_ids.contains(&n.id))
            .map(|n| n.id.clone())
            .collect();
        store.on_select = self.on_select;

        if let Some((key, registry)) = self.cache {
            let owner = registry.owner();
            registry.register(&key, owner, store.snapshot())?;
            store.cache = Some(CacheBinding {
                key,
                owner,
                registry,
            });
        }

        Ok(store)
    }
}

/// Canonical state of one tree
pub struct TreeStore<T: Send + Sync> {
    nodes: Vec<TreeNode<T>>,
    state: TreeState,
    multi_select: bool,
    multi_selected: Vec<String>,
    options: ViewOptions,
    focused: bool,
    loader: Option<Arc<dyn ChildLoader<T>>>,
    tracker: ExpandTracker,
    on_select: Option<SelectHandler<T>>,
    cache: Option<CacheBinding<T>>,
}

impl<T: Send + Sync> fmt::Debug for TreeStore<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TreeStore")
            .field("nodes", &self.nodes.len())
            .field("state", &self.state)
            .field("multi_select", &self.multi_select)
            .field("multi_selected", &self.multi_selected)
            .field("focused", &self.focused)
            .field("cache_key", &self.cache.as_ref().map(|c| c.key.as_str()))
            .finish()
    }
}

impl<T> TreeStore<T>
where
    T: Clone + Send + Sync + 'static,
{
    pub fn builder() -> TreeStoreBuilder<T> {
        TreeStoreBuilder::default()
    }

    // ------------------------------------------------------------------
    // Reads
    // ------------------------------------------------------------------

    pub fn nodes(&self) -> &[TreeNode<T>] {
        &self.nodes
    }

    pub fn state(&self) -> &TreeState {
        &self.state
    }

    pub fn node(&self, id: &str) -> Option<&TreeNode<T>> {
        find_node(id, &self.nodes)
    }

    /// A listed node other than the synthetic root
    fn targetable(&self, id: &str) -> Option<&TreeNode<T>> {
        if id == ROOT_ID {
            return None;
        }
        self.node(id)
    }

    pub fn root(&self) -> Option<&TreeNode<T>> {
        self.nodes.first()
    }

    pub fn children_of(&self, id: &str) -> Vec<&TreeNode<T>> {
        match self.node(id) {
            Some(node) => get_children(node, &self.nodes),
            None => Vec::new(),
        }
    }

    pub fn selected_node(&self) -> Option<&TreeNode<T>> {
        self.node(self.state.selected.as_deref()?)
    }

    pub fn half_selected_node(&self) -> Option<&TreeNode<T>> {
        self.node(self.state.half_selected.as_deref()?)
    }

    pub fn expanded_ids(&self) -> &BTreeSet<String> {
        &self.state.expanded
    }

    pub fn is_expanded(&self, id: &str) -> bool {
        self.state.is_expanded(id)
    }

    pub fn multi_selected_nodes(&self) -> Vec<&TreeNode<T>> {
        self.multi_selected
            .iter()
            .filter_map(|id| self.node(id))
            .collect()
    }

    pub fn is_multi_selected(&self, id: &str) -> bool {
        self.multi_selected.iter().any(|m| m == id)
    }

    pub fn is_multi_select(&self) -> bool {
        self.multi_select
    }

    pub fn options(&self) -> ViewOptions {
        self.options
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn load_phase(&self, id: &str) -> ExpandPhase {
        self.tracker.phase(id)
    }

    pub fn cache_key(&self) -> Option<&str> {
        self.cache.as_ref().map(|c| c.key.as_str())
    }

    pub fn snapshot(&self) -> TreeSnapshot<T> {
        TreeSnapshot {
            nodes: self.nodes.clone(),
            state: self.state.clone(),
            multi_select: self.multi_select,
            multi_selected: self.multi_selected.clone(),
        }
    }

    // ------------------------------------------------------------------
    // Cursor and navigation
    // ------------------------------------------------------------------

    /// Put the cursor on `id`, or clear it with `None`. Unknown ids and the
    /// root are ignored.
    pub fn set_cursor(&mut self, id: Option<&str>) -> bool {
        match id {
            Some(id) if self.targetable(id).is_none() => return false,
            Some(id) => self.state.half_selected = Some(id.to_string()),
            None => self.state.half_selected = None,
        }
        self.publish();
        true
    }

    pub fn move_down(&mut self) -> bool {
        let next = services::move_down(&self.nodes, &self.state).map(|n| n.id.clone());
        self.move_cursor(next)
    }

    pub fn move_up(&mut self) -> bool {
        let prev = services::move_up(&self.nodes, &self.state).map(|n| n.id.clone());
        self.move_cursor(prev)
    }

    fn move_cursor(&mut self, target: Option<String>) -> bool {
        let Some(id) = target else {
            return false;
        };
        trace!(cursor = %id, "cursor moved");
        self.state.half_selected = Some(id);
        self.publish();
        true
    }

    /// Collapse the cursor node or step to its parent
    pub fn collapse(&mut self) -> CollapseOutcome {
        let outcome = services::collapse(&self.nodes, &self.state);
        match &outcome {
            CollapseOutcome::Unchanged => return outcome,
            CollapseOutcome::Collapsed(ids) => {
                for id in ids {
                    self.state.expanded.remove(id);
                }
            }
            CollapseOutcome::MovedToParent(parent) => {
                self.state.half_selected = Some(parent.clone());
            }
        }
        self.publish();
        outcome
    }

    // ------------------------------------------------------------------
    // Expansion
    // ------------------------------------------------------------------

    /// Expand `target` (or the cursor node), loading its children first.
    pub async fn expand(&mut self, target: Option<&str>) -> TreeResult<ExpandOutcome> {
        let ticket = match self.begin_expand(target) {
            ExpandStep::Done(outcome) => return Ok(outcome),
            ExpandStep::Load(ticket) => ticket,
        };
        let loader = self.loader.clone();
        let result = match loader {
            Some(loader) => loader.load_children(&ticket.node, &ticket.previous).await,
            None => Ok(ticket.previous.clone()),
        };
        self.finish_expand(ticket, result)
    }

    /// Start an expand. Returns a ticket when children must be loaded first.
    ///
    /// Hosts driving their own event loop hand the ticket to a loader and
    /// pass the result to [`TreeStore::finish_expand`].
    pub fn begin_expand(&mut self, target: Option<&str>) -> ExpandStep<T> {
        let target = match target.or(self.state.half_selected.as_deref()) {
            Some(id) => id.to_string(),
            None => return ExpandStep::Done(ExpandOutcome::Unchanged),
        };
        let Some(node) = self.targetable(&target) else {
            return ExpandStep::Done(ExpandOutcome::Unchanged);
        };

        let was_expanded = self.state.is_expanded(&target);
        if was_expanded || self.loader.is_none() {
            return ExpandStep::Done(self.apply_expand(&target, was_expanded));
        }

        let node = node.clone();
        let previous: Vec<TreeNode<T>> = get_children(&node, &self.nodes)
            .into_iter()
            .cloned()
            .collect();
        let Some(generation) = self.tracker.begin(&target) else {
            debug!(node = %target, "expand coalesced with in-flight load");
            return ExpandStep::Done(ExpandOutcome::Coalesced);
        };
        debug!(node = %target, previous = previous.len(), "loading children");
        ExpandStep::Load(LoadTicket {
            node,
            previous,
            was_expanded,
            generation,
        })
    }

    /// Complete an expand with the loader's result.
    ///
    /// A failed load leaves the list and expansion untouched and is returned
    /// as [`TreeError::LoadFailed`].
    pub fn finish_expand(
        &mut self,
        ticket: LoadTicket<T>,
        result: Result<Vec<TreeNode<T>>, LoadError>,
    ) -> TreeResult<ExpandOutcome> {
        let id = ticket.node.id.clone();
        if !self.tracker.finish(&id, ticket.generation, result.is_ok()) {
            debug!(node = %id, "discarding superseded load");
            return Ok(ExpandOutcome::Discarded);
        }

        let children = match result {
            Ok(children) => children,
            Err(err) => {
                warn!(node = %id, error = %err, "child load failed");
                return Err(TreeError::load_failed(&id, err));
            }
        };

        if self.node(&id).is_some() {
            debug!(node = %id, children = children.len(), "children loaded");
            splice_children(&id, children, &mut self.nodes)?;
        }
        self.forget_removed_phases();
        Ok(self.apply_expand(&id, ticket.was_expanded))
    }

    fn apply_expand(&mut self, id: &str, was_expanded: bool) -> ExpandOutcome {
        let outcome = match expand_decision(&self.nodes, id, was_expanded) {
            ExpandDecision::Expand => {
                self.state.expanded.insert(id.to_string());
                ExpandOutcome::Expanded(id.to_string())
            }
            ExpandDecision::MoveCursor(child) => {
                self.state.half_selected = Some(child.clone());
                ExpandOutcome::MovedToChild(child)
            }
            ExpandDecision::Stay => ExpandOutcome::Unchanged,
            ExpandDecision::Vanished => {
                debug!(node = %id, "expanded node vanished, clearing selection");
                self.state.selected = None;
                self.state.half_selected = None;
                ExpandOutcome::Vanished
            }
        };
        self.publish();
        outcome
    }

    /// Drop every in-flight load; their results will be discarded
    pub fn abandon_loads(&mut self) {
        self.tracker.abandon_all();
    }

    /// Replace the children of `parent_id` directly
    pub fn replace_children(&mut self, parent_id: &str, children: Vec<TreeNode<T>>) -> TreeResult<()> {
        splice_children(parent_id, children, &mut self.nodes)?;
        self.forget_removed_phases();
        self.publish();
        Ok(())
    }

    fn forget_removed_phases(&mut self) {
        let listed: HashSet<&str> = self.nodes.iter().map(|n| n.id.as_str()).collect();
        self.tracker.retain_settled(|id| listed.contains(id));
    }

    // ------------------------------------------------------------------
    // Selection
    // ------------------------------------------------------------------

    /// Commit `id` as the selection and notify the handler.
    ///
    /// Replaces the multi-selection unless multi-select mode is on, in which
    /// case the node is appended. Unknown ids and the root are ignored.
    pub fn select(&mut self, id: &str) -> bool {
        if id == ROOT_ID {
            return false;
        }
        let Some(node) = self.nodes.iter().find(|n| n.id == id) else {
            return false;
        };
        let was_selected =
            self.state.is_selected(id) || self.multi_selected.iter().any(|m| m == id);

        self.state.selected = Some(id.to_string());
        if self.multi_select {
            if !self.multi_selected.iter().any(|m| m == id) {
                self.multi_selected.push(id.to_string());
            }
        } else {
            self.multi_selected = vec![id.to_string()];
        }

        let event = SelectionEvent {
            node,
            is_selected: self.state.is_selected(id) || self.multi_selected.iter().any(|m| m == id),
            was_selected,
            is_half_selected: self.state.is_half_selected(id),
            is_expanded: self.state.is_expanded(id),
        };
        debug!(node = %id, multi = self.multi_select, "selection committed");
        if let Some(handler) = self.on_select.as_mut() {
            handler(&event);
        }
        self.publish();
        true
    }

    /// Commit the cursor node
    pub fn commit_cursor(&mut self) -> bool {
        match self.state.half_selected.clone() {
            Some(id) => self.select(&id),
            None => false,
        }
    }

    pub fn set_multi_select(&mut self, enabled: bool) {
        self.multi_select = enabled;
        self.publish();
    }

    /// Select `id` and expand exactly its ancestor chain.
    ///
    /// Applied the same way as [`TreeStoreBuilder::default_selected`]: the
    /// selection handler does not fire and the multi-selection is kept.
    pub fn set_default_selected(&mut self, id: &str) {
        self.apply_default_selection(id);
        self.publish();
    }

    fn apply_default_selection(&mut self, id: &str) {
        self.state.expanded = ancestor_ids(id).into_iter().collect();
        self.state.selected = self.targetable(id).map(|n| n.id.clone());
    }

    // ------------------------------------------------------------------
    // Host interaction
    // ------------------------------------------------------------------

    pub fn focus(&mut self) {
        self.focused = true;
    }

    pub fn blur(&mut self) {
        self.focused = false;
    }

    /// Apply a keyboard action. Ignored (returns false) while unfocused.
    pub async fn handle_action(&mut self, action: TreeAction) -> TreeResult<bool> {
        if !self.focused {
            return Ok(false);
        }
        match action {
            TreeAction::Down => {
                self.move_down();
            }
            TreeAction::Up => {
                self.move_up();
            }
            TreeAction::Expand => {
                self.expand(None).await?;
            }
            TreeAction::Collapse => {
                self.collapse();
            }
            TreeAction::Commit => {
                self.commit_cursor();
            }
        }
        Ok(true)
    }

    /// Pointer click on `id`. Unknown ids and the root are ignored.
    pub async fn click(&mut self, id: &str) -> TreeResult<()> {
        if self.targetable(id).is_none() {
            return Ok(());
        }
        if self.options.single_click_select {
            self.activate(id).await
        } else {
            self.half_select(id).await
        }
    }

    /// Pointer double click on `id`
    pub async fn double_click(&mut self, id: &str) -> TreeResult<()> {
        if self.options.single_click_select || self.targetable(id).is_none() {
            return Ok(());
        }
        self.activate(id).await
    }

    async fn half_select(&mut self, id: &str) -> TreeResult<()> {
        if self.options.single_click_expand {
            self.expand(Some(id)).await?;
        }
        self.set_cursor(Some(id));
        Ok(())
    }

    async fn activate(&mut self, id: &str) -> TreeResult<()> {
        if self.state.is_expanded(id) && self.options.single_click_select {
            self.set_cursor(Some(id));
            self.collapse();
            return Ok(());
        }
        self.expand(Some(id)).await?;
        self.set_cursor(Some(id));
        self.select(id);
        Ok(())
    }

    fn publish(&self) {
        let Some(cache) = &self.cache else {
            return;
        };
        if let Err(err) = cache
            .registry
            .register(&cache.key, cache.owner, self.snapshot())
        {
            warn!(key = %cache.key, error = %err, "failed to publish tree state");
        }
    }
}

impl<T: Send + Sync> Drop for TreeStore<T> {
    fn drop(&mut self) {
        if let Some(cache) = &self.cache {
            cache.registry.unregister(&cache.key, cache.owner);
        }
    }
}
