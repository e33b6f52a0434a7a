//! The cart reducer: all mutation logic as a pure function.
//!
//! `reduce` is `(State, Action, Environment) -> Effects`. It mutates the
//! state in place, keeps the aggregates consistent with the rows inside the
//! same call, and returns [`Effect::Persist`] exactly when durable state
//! changed. It performs no I/O itself; the runtime executes the effects
//! after the change is committed.

use crate::actions::CartAction;
use crate::effects::Effect;
use crate::environment::{CartEnvironment, Clock, SnapshotStore};
use crate::orders::Order;
use crate::state::{CartState, LineItem, Product, ProductId};
use smallvec::{SmallVec, smallvec};
use std::marker::PhantomData;

/// Core abstraction for business logic: a pure reduction from an action to
/// state changes plus effect values.
pub trait Reducer {
    /// The state type this reducer operates on.
    type State;

    /// The action type this reducer processes.
    type Action;

    /// The environment type with injected dependencies.
    type Environment;

    /// Reduce an action into state changes and effects.
    ///
    /// Must be deterministic given `state`, `action`, and `environment`, and
    /// must leave the state's invariants intact on every path, including
    /// rejected input.
    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        environment: &Self::Environment,
    ) -> SmallVec<[Effect; 2]>;
}

/// Reducer for [`CartState`].
///
/// Generic over the environment's providers the way the store is, so one
/// reducer value serves any adapter/clock pairing.
#[derive(Clone, Debug)]
pub struct CartReducer<S, C> {
    _marker: PhantomData<(S, C)>,
}

impl<S, C> CartReducer<S, C> {
    /// Creates the reducer.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }

    fn add_item(state: &mut CartState, product: Product, quantity: u32) -> bool {
        if quantity == 0 {
            // rejected, not clamped: a zero add is always a caller bug
            return false;
        }
        match state
            .items
            .iter_mut()
            .find(|line| line.product_id == product.id)
        {
            Some(line) => line.quantity = line.quantity.saturating_add(quantity),
            None => state.items.push(LineItem::new(product, quantity)),
        }
        state.recalculate();
        true
    }

    fn update_quantity(state: &mut CartState, id: &ProductId, quantity: i64) -> bool {
        if quantity <= 0 {
            // the only sanctioned path to zero: the row goes away entirely
            return Self::remove_item(state, id);
        }
        let Some(line) = state.items.iter_mut().find(|line| line.product_id == *id) else {
            return false;
        };
        line.quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
        state.recalculate();
        true
    }

    fn remove_item(state: &mut CartState, id: &ProductId) -> bool {
        let before = state.items.len();
        state.items.retain(|line| line.product_id != *id);
        if state.items.len() == before {
            return false;
        }
        state.recalculate();
        true
    }

    fn remove_selected(state: &mut CartState) -> bool {
        if state.selected.is_empty() {
            return false;
        }
        let selected = std::mem::take(&mut state.selected);
        let before = state.items.len();
        state
            .items
            .retain(|line| !selected.contains(&line.product_id));
        if state.items.len() == before {
            // selection named nothing in the cart; it is still cleared
            return false;
        }
        state.recalculate();
        true
    }

    fn set_selected(state: &mut CartState, ids: Vec<ProductId>) -> bool {
        state.selected = ids.into_iter().collect();
        false
    }

    fn clear_cart(state: &mut CartState) -> bool {
        state.selected.clear();
        if state.items.is_empty() {
            return false;
        }
        state.items.clear();
        state.recalculate();
        true
    }

    fn add_order(state: &mut CartState, order: Order) -> bool {
        state.orders.insert(0, order);
        true
    }
}

impl<S, C> Default for CartReducer<S, C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S, C> Reducer for CartReducer<S, C>
where
    S: SnapshotStore + Clone,
    C: Clock + Clone,
{
    type State = CartState;
    type Action = CartAction;
    type Environment = CartEnvironment<S, C>;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        _environment: &Self::Environment,
    ) -> SmallVec<[Effect; 2]> {
        let durable_change = match action {
            CartAction::AddItem { product, quantity } => Self::add_item(state, product, quantity),
            CartAction::UpdateQuantity { id, quantity } => {
                Self::update_quantity(state, &id, quantity)
            }
            CartAction::RemoveItem { id } => Self::remove_item(state, &id),
            CartAction::RemoveSelected => Self::remove_selected(state),
            CartAction::SetSelected { ids } => Self::set_selected(state, ids),
            CartAction::ClearCart => Self::clear_cart(state),
            CartAction::AddOrder { order } => Self::add_order(state, order),
        };

        if durable_change {
            smallvec![Effect::Persist]
        } else {
            SmallVec::new()
        }
    }
}
