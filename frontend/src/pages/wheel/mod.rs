mod wheel_canvas;
mod wheel_utils;

use std::cell::RefCell;
use std::rc::Rc;

use gloo::events::EventListener;
use gloo_render::{request_animation_frame, AnimationFrame};
use shared::participation::{admit, validate_phone, DenyReason, GateDecision, ParticipationGate};
use shared::quota::{NoQuota, QuotaPolicy, QuotaStore};
use shared::{Attempt, SpinController, SpinResult, Tick, Wheel, WheelConfig, WheelVariant};
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{window, KeyboardEvent};
use yew::prelude::*;

use crate::components::{LeadModal, ResultPopup};
use crate::config::wheel_config;
use crate::gate_client::HttpParticipationGate;
use crate::storage::LocalStorage;
use crate::styles;

use wheel_canvas::WheelCanvas;
use wheel_utils::{is_spin_key, now_ms, Registrations};

type Controller = SpinController<Box<dyn QuotaPolicy>>;
type FrameSlot = Rc<RefCell<Option<AnimationFrame>>>;

fn build_controller(config: &WheelConfig) -> Controller {
    let wheel = Wheel::from_config(config, &mut rand::thread_rng());
    let quota: Box<dyn QuotaPolicy> = if config.is_lead_gated() {
        Box::new(NoQuota)
    } else {
        Box::new(QuotaStore::new(config.daily_limits.clone(), LocalStorage))
    };
    log::info!(
        "Wheel ready with {} segments ({:?})",
        wheel.len(),
        config.variant
    );
    SpinController::from_config(wheel, quota, config)
}

/// Drives the controller once per animation frame until the spin resolves.
fn schedule_frame(controller: Rc<RefCell<Controller>>, slot: FrameSlot, on_tick: Callback<Tick>) {
    let next_slot = slot.clone();
    let handle = request_animation_frame(move |now| {
        let tick = controller.borrow_mut().advance(now);
        let keep_going = matches!(tick, Tick::Frame { .. });
        on_tick.emit(tick);
        if keep_going {
            schedule_frame(controller, next_slot, on_tick);
        }
    });
    *slot.borrow_mut() = Some(handle);
}

#[derive(Properties, PartialEq)]
pub struct PrizeWheelProps {
    pub variant: WheelVariant,
}

#[function_component(PrizeWheel)]
pub fn prize_wheel(props: &PrizeWheelProps) -> Html {
    let variant = props.variant;
    let controller = use_mut_ref(|| build_controller(&wheel_config(variant)));
    let segments = {
        let controller = controller.clone();
        use_state(move || Rc::new(controller.borrow().wheel().segments().to_vec()))
    };
    let frame: FrameSlot = use_mut_ref(|| None);
    let registrations = use_mut_ref(Registrations::default);

    let angle = use_state(|| 0.0_f64);
    let is_spinning = use_state(|| false);
    let status = use_state(|| controller.borrow().status().to_string());
    let popup = use_state(|| None::<String>);
    let show_lead_form = use_state(|| false);
    let lead_pending = use_state(|| false);
    let lead_error = use_state(|| None::<String>);
    let lead_notice = use_state(|| None::<String>);

    let on_tick = {
        let controller = controller.clone();
        let angle = angle.clone();
        let is_spinning = is_spinning.clone();
        let status = status.clone();
        let popup = popup.clone();
        Callback::from(move |tick: Tick| match tick {
            Tick::Frame { angle: a, .. } => angle.set(a),
            Tick::Resolved(SpinResult { message, .. }) => {
                let c = controller.borrow();
                angle.set(c.current_angle());
                status.set(c.status().to_string());
                is_spinning.set(false);
                popup.set(Some(message));
            }
            Tick::Idle => is_spinning.set(false),
        })
    };

    let start_spin = {
        let controller = controller.clone();
        let frame = frame.clone();
        let is_spinning = is_spinning.clone();
        let status = status.clone();
        let popup = popup.clone();
        Callback::from(move |_: ()| {
            let started = controller
                .borrow_mut()
                .start(now_ms(), &mut rand::thread_rng());
            if started.is_none() {
                log::warn!("Spin request ignored");
                return;
            }
            status.set(controller.borrow().status().to_string());
            popup.set(None);
            is_spinning.set(true);
            schedule_frame(controller.clone(), frame.clone(), on_tick.clone());
        })
    };

    let on_attempt = {
        let controller = controller.clone();
        let start_spin = start_spin.clone();
        let show_lead_form = show_lead_form.clone();
        let lead_error = lead_error.clone();
        let lead_notice = lead_notice.clone();
        Callback::from(move |_: ()| {
            let attempt = controller.borrow_mut().begin_attempt();
            match attempt {
                Attempt::Busy => log::debug!("Wheel is already spinning"),
                Attempt::Ready | Attempt::RetryCredit => start_spin.emit(()),
                Attempt::NeedsRegistration => {
                    lead_error.set(None);
                    lead_notice.set(None);
                    show_lead_form.set(true);
                }
            }
        })
    };

    let on_lead_submit = {
        let registrations = registrations.clone();
        let start_spin = start_spin.clone();
        let show_lead_form = show_lead_form.clone();
        let lead_pending = lead_pending.clone();
        let lead_error = lead_error.clone();
        Callback::from(move |(name, phone): (String, String)| {
            let id = registrations.borrow_mut().begin();
            lead_pending.set(true);
            lead_error.set(None);

            let registrations = registrations.clone();
            let start_spin = start_spin.clone();
            let show_lead_form = show_lead_form.clone();
            let lead_pending = lead_pending.clone();
            let lead_error = lead_error.clone();
            spawn_local(async move {
                let decision = admit(&HttpParticipationGate::default(), &name, &phone).await;
                if !registrations.borrow_mut().finish(id) {
                    if let GateDecision::Allowed(lead) = &decision {
                        log::warn!(
                            "Lead {} was registered after its dialog closed; no spin started",
                            lead.phone()
                        );
                    } else {
                        log::debug!("Discarding result of a cancelled registration");
                    }
                    return;
                }
                lead_pending.set(false);
                match decision {
                    GateDecision::Allowed(_) => {
                        show_lead_form.set(false);
                        start_spin.emit(());
                    }
                    GateDecision::Denied(reason) => {
                        log::info!("Registration denied: {:?}", reason);
                        lead_error.set(Some(reason.to_string()));
                    }
                }
            });
        })
    };

    let on_lead_close = {
        let registrations = registrations.clone();
        let show_lead_form = show_lead_form.clone();
        Callback::from(move |_: ()| {
            if !registrations.borrow_mut().try_cancel() {
                log::debug!("Registration in flight; dialog stays open");
                return;
            }
            log::debug!("{}", DenyReason::Cancelled);
            show_lead_form.set(false);
        })
    };

    let on_phone_blur = {
        let lead_notice = lead_notice.clone();
        Callback::from(move |phone: String| {
            if validate_phone(&phone).is_err() {
                return;
            }
            let lead_notice = lead_notice.clone();
            spawn_local(async move {
                match HttpParticipationGate::default().has_participated(&phone).await {
                    Ok(true) => lead_notice.set(Some(DenyReason::AlreadyParticipated.to_string())),
                    Ok(false) => lead_notice.set(None),
                    Err(e) => log::warn!("Could not check participation: {}", e),
                }
            });
        })
    };

    let on_popup_close = {
        let popup = popup.clone();
        Callback::from(move |_: ()| popup.set(None))
    };

    // Escape dismisses whatever overlay is open
    {
        let on_popup_close = on_popup_close.clone();
        let on_lead_close = on_lead_close.clone();
        use_effect_with((), move |_| {
            let listener = window().map(|w| {
                EventListener::new(&w, "keydown", move |event| {
                    let is_escape = event
                        .dyn_ref::<KeyboardEvent>()
                        .map(|e| e.key() == "Escape")
                        .unwrap_or(false);
                    if is_escape {
                        on_popup_close.emit(());
                        on_lead_close.emit(());
                    }
                })
            });
            move || drop(listener)
        });
    }

    // Cancel any in-flight frame on unmount
    {
        let frame = frame.clone();
        use_effect_with((), move |_| {
            move || {
                frame.borrow_mut().take();
            }
        });
    }

    let on_canvas_click = {
        let on_attempt = on_attempt.clone();
        Callback::from(move |_: MouseEvent| on_attempt.emit(()))
    };

    let on_canvas_key = {
        let on_attempt = on_attempt.clone();
        Callback::from(move |e: KeyboardEvent| {
            if is_spin_key(&e.key()) {
                e.prevent_default();
                on_attempt.emit(());
            }
        })
    };

    html! {
        <div class={styles::CONTAINER}>
            <h1 class={styles::TEXT_H1}>{"Roleta de Prêmios"}</h1>
            <div class={styles::CARD}>
                <WheelCanvas
                    segments={(*segments).clone()}
                    angle={*angle}
                    is_spinning={*is_spinning}
                    onclick={on_canvas_click}
                    onkeydown={on_canvas_key}
                />
                <p class={styles::STATUS} aria-live="polite">{(*status).clone()}</p>
            </div>

            if let Some(message) = (*popup).clone() {
                <ResultPopup message={message} on_close={on_popup_close} />
            }

            if *show_lead_form {
                <LeadModal
                    on_submit={on_lead_submit}
                    on_close={on_lead_close}
                    on_phone_blur={on_phone_blur}
                    pending={*lead_pending}
                    error={(*lead_error).clone().map(AttrValue::from)}
                    notice={(*lead_notice).clone().map(AttrValue::from)}
                />
            }
        </div>
    }
}
