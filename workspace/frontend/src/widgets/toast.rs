use std::cell::RefCell;
use std::rc::Rc;

use yew::prelude::*;

use crate::settings;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ToastType {
    Warning,
    Error,
}

impl ToastType {
    fn alert_class(&self) -> &'static str {
        match self {
            ToastType::Warning => "alert-warning",
            ToastType::Error => "alert-error",
        }
    }

    fn icon(&self) -> &'static str {
        match self {
            ToastType::Warning => "fas fa-exclamation-triangle",
            ToastType::Error => "fas fa-exclamation-circle",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Toast {
    pub id: usize,
    pub message: String,
    pub toast_type: ToastType,
}

pub enum ToastAction {
    Add(Toast),
    Remove(usize),
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ToastList {
    toasts: Vec<Toast>,
}

impl ToastList {
    pub fn toasts(&self) -> &[Toast] {
        &self.toasts
    }
}

impl Reducible for ToastList {
    type Action = ToastAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut list = (*self).clone();
        match action {
            ToastAction::Add(toast) => list.toasts.push(toast),
            ToastAction::Remove(id) => list.toasts.retain(|t| t.id != id),
        }
        Rc::new(list)
    }
}

/// Handle for raising toasts from anywhere below [`ToastProvider`].
///
/// Holds only a dispatcher and an id counter, so a copy captured in a
/// long-lived callback keeps working after the list changes.
#[derive(Clone)]
pub struct ToastContext {
    dispatcher: UseReducerDispatcher<ToastList>,
    next_id: Rc<RefCell<usize>>,
    duration_ms: u32,
}

impl PartialEq for ToastContext {
    fn eq(&self, other: &Self) -> bool {
        self.dispatcher == other.dispatcher
            && Rc::ptr_eq(&self.next_id, &other.next_id)
            && self.duration_ms == other.duration_ms
    }
}

impl ToastContext {
    pub fn show_warning(&self, message: String) {
        self.show(message, ToastType::Warning);
    }

    pub fn show_error(&self, message: String) {
        self.show(message, ToastType::Error);
    }

    fn show(&self, message: String, toast_type: ToastType) {
        log::debug!("Showing {:?} toast: {}", toast_type, message);
        let id = {
            let mut next_id = self.next_id.borrow_mut();
            *next_id += 1;
            *next_id
        };
        self.dispatcher.dispatch(ToastAction::Add(Toast {
            id,
            message,
            toast_type,
        }));

        // Auto-dismiss
        let dispatcher = self.dispatcher.clone();
        gloo_timers::callback::Timeout::new(self.duration_ms, move || {
            dispatcher.dispatch(ToastAction::Remove(id));
        })
        .forget();
    }
}

#[derive(Properties, PartialEq)]
pub struct ToastProviderProps {
    pub children: Children,
}

#[function_component(ToastProvider)]
pub fn toast_provider(props: &ToastProviderProps) -> Html {
    let toasts = use_reducer(ToastList::default);
    let next_id = use_mut_ref(|| 0usize);
    let context = ToastContext {
        dispatcher: toasts.dispatcher(),
        next_id,
        duration_ms: settings::get_settings().toast_duration_ms,
    };

    html! {
        <ContextProvider<ToastContext> context={context}>
            {props.children.clone()}
            <div class="toast toast-top toast-end z-50">
                {for toasts.toasts().iter().map(|toast| {
                    let id = toast.id;
                    let on_close = {
                        let dispatcher = toasts.dispatcher();
                        Callback::from(move |_| dispatcher.dispatch(ToastAction::Remove(id)))
                    };

                    html! {
                        <div key={id} class={classes!("alert", toast.toast_type.alert_class(), "shadow-lg")}>
                            <i class={toast.toast_type.icon()}></i>
                            <span>{&toast.message}</span>
                            <button class="btn btn-sm btn-ghost btn-circle" onclick={on_close}>
                                <i class="fas fa-times"></i>
                            </button>
                        </div>
                    }
                })}
            </div>
        </ContextProvider<ToastContext>>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn toast(id: usize, message: &str) -> Toast {
        Toast {
            id,
            message: message.to_string(),
            toast_type: ToastType::Error,
        }
    }

    #[test]
    fn test_add_and_remove_toasts() {
        let list = Rc::new(ToastList::default())
            .reduce(ToastAction::Add(toast(1, "first")))
            .reduce(ToastAction::Add(toast(2, "second")));
        assert_eq!(list.toasts().len(), 2);

        let list = list.reduce(ToastAction::Remove(1));
        assert_eq!(list.toasts(), &[toast(2, "second")]);
    }

    #[test]
    fn test_removing_unknown_toast_is_harmless() {
        let list = Rc::new(ToastList::default())
            .reduce(ToastAction::Add(toast(1, "only")))
            .reduce(ToastAction::Remove(9));
        assert_eq!(list.toasts().len(), 1);
    }
}
