use std::future::Future;
use std::ops::Deref;
use std::rc::Rc;

use common::{FetchError, PanelState, RequestSequence, RequestTicket, Resolution};
use yew::prelude::*;

use crate::widgets::toast::ToastContext;

/// Reducer actions of a panel's fetch state
pub enum PanelAction<T> {
    /// A request stamped with the ticket was sent
    Begin(RequestTicket),
    /// The request stamped with the ticket finished
    Resolve(RequestTicket, Result<T, FetchError>),
}

/// [`PanelState`] driven through `use_reducer`, so responses landing after
/// later renders still apply to the current state.
#[derive(Debug, Clone, PartialEq)]
pub struct PanelStore<T>(PanelState<T>);

impl<T> Default for PanelStore<T> {
    fn default() -> Self {
        Self(PanelState::default())
    }
}

impl<T> Deref for PanelStore<T> {
    type Target = PanelState<T>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<T: Clone> Reducible for PanelStore<T> {
    type Action = PanelAction<T>;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut state = self.0.clone();
        match action {
            PanelAction::Begin(ticket) => {
                log::trace!("Request #{} started", ticket.id());
                state.begin(ticket);
            }
            PanelAction::Resolve(ticket, result) => {
                if state.resolve(ticket, result) == Resolution::Stale {
                    log::debug!("Dropped stale response for request #{}", ticket.id());
                    return self;
                }
            }
        }
        Rc::new(Self(state))
    }
}

/// Fetch state of a panel plus a trigger that runs `fetch_fn` for a query.
///
/// Every trigger stamps its request with a fresh ticket; only the response to
/// the latest ticket reaches the state. Responses arriving after unmount are
/// dropped. Failures are logged by the API client and raised as a toast.
#[hook]
pub fn use_sequenced_fetch<T, Q, F, Fut>(fetch_fn: F) -> (UseReducerHandle<PanelStore<T>>, Callback<Q>)
where
    T: Clone + 'static,
    Q: 'static,
    F: Fn(Q) -> Fut + 'static,
    Fut: Future<Output = Result<T, FetchError>> + 'static,
{
    let store = use_reducer(PanelStore::<T>::default);
    let sequence = use_mut_ref(RequestSequence::default);
    let toast_ctx = use_context::<ToastContext>();
    let fetch_fn = use_state(|| Rc::new(fetch_fn));

    {
        let sequence = sequence.clone();
        use_effect_with((), move |_| {
            move || {
                log::trace!("Panel unmounted, closing request sequence");
                sequence.borrow_mut().close();
            }
        });
    }

    let trigger = {
        let store = store.clone();
        let sequence = sequence.clone();
        let fetch_fn = fetch_fn.clone();

        use_callback((), move |query: Q, _| {
            let ticket = sequence.borrow_mut().issue();
            store.dispatch(PanelAction::Begin(ticket));

            let fut = (*fetch_fn)(query);
            let store = store.clone();
            let sequence = sequence.clone();
            let toast_ctx = toast_ctx.clone();

            wasm_bindgen_futures::spawn_local(async move {
                let result = fut.await;

                if !sequence.borrow().is_current(ticket) {
                    log::debug!("Request #{} superseded or panel unmounted, dropping response", ticket.id());
                    return;
                }

                if let (Err(err), Some(toast_ctx)) = (&result, &toast_ctx) {
                    toast_ctx.show_error(err.to_string());
                }
                store.dispatch(PanelAction::Resolve(ticket, result));
            });
        })
    };

    (store, trigger)
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::{PanelStatus, RequestSequence};

    #[test]
    fn test_reducer_applies_latest_response_only() {
        let mut seq = RequestSequence::default();
        let first = seq.issue();
        let second = seq.issue();

        let store = Rc::new(PanelStore::<u32>::default());
        let store = store.reduce(PanelAction::Begin(first));
        let store = store.reduce(PanelAction::Begin(second));
        assert!(store.is_loading());

        let store = store.reduce(PanelAction::Resolve(second, Ok(2)));
        let before_stale = Rc::clone(&store);
        let store = store.reduce(PanelAction::Resolve(first, Ok(1)));

        assert!(Rc::ptr_eq(&store, &before_stale));
        assert_eq!(store.data, Some(2));
        assert_eq!(store.status, PanelStatus::Loaded);
    }

    #[test]
    fn test_reducer_failure_keeps_data() {
        let mut seq = RequestSequence::default();
        let ok = seq.issue();
        let failing = seq.issue();

        let store = Rc::new(PanelStore::<u32>::default())
            .reduce(PanelAction::Begin(ok))
            .reduce(PanelAction::Resolve(ok, Ok(7)))
            .reduce(PanelAction::Begin(failing))
            .reduce(PanelAction::Resolve(
                failing,
                Err(FetchError::Decode("expected array".to_string())),
            ));

        assert_eq!(store.data, Some(7));
        assert_eq!(
            store.error(),
            Some(&FetchError::Decode("expected array".to_string()))
        );
    }
}
