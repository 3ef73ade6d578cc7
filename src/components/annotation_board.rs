//! One floorplan's annotation surface.
//!
//! Bridge between the Leptos view and the imperative [`overlay`] engine:
//! DOM events go in, [`Action`]s come out, and the signals here mirror
//! only what the page needs to render — the committed box list, the
//! in-progress drag, the draw/erase mode, the feedback string, and the
//! preview image source.

use gloo_timers::callback::Timeout;
use leptos::ev;
use leptos::html;
use leptos::prelude::*;
use leptos::task::spawn_local;
use web_sys::MouseEvent;

use overlay::boxes::BoxKey;
use overlay::engine::{Action, EngineCore};
use overlay::geom::{Point, Rect};
use overlay::input::Mode;
use overlay::layout;

use crate::net::api;
use crate::state::session::PlanConfig;

/// How long a rejected drag keeps its red border before disappearing.
const REJECT_FLASH_MS: u32 = 400;

/// Interactive annotation surface for one floorplan record.
///
/// Pointer-move listeners are attached to the window only while a drag is
/// open and detached on every exit path (pointer-up and mode toggle), so
/// no global listener outlives its gesture.
#[component]
pub fn AnnotationBoard(config: PlanConfig) -> impl IntoView {
    let PlanConfig { id, name, image, endpoint, boxes: initial } = config;

    let engine = StoredValue::new(EngineCore::new(endpoint));
    let boxes = RwSignal::new(Vec::<BoxKey>::new());
    let drag = RwSignal::new(None::<Rect>);
    let rejected = RwSignal::new(None::<Rect>);
    let mode = RwSignal::new(Mode::Draw);
    let feedback = RwSignal::new(String::new());
    let image_src = RwSignal::new(image);
    let offset = RwSignal::new(Point::default());

    let canvas_ref = NodeRef::<html::Div>::new();
    let image_ref = NodeRef::<html::Img>::new();
    let move_handle = StoredValue::new_local(None::<WindowListenerHandle>);

    let measure = move || {
        let Some(canvas) = canvas_ref.get() else { return };
        let Some(img) = image_ref.get() else { return };
        let geometry = layout::measure(&canvas, &img);
        offset.set(geometry.offset());
        engine.update_value(|core| core.set_geometry(geometry));
    };

    let detach_move = move || {
        if let Some(handle) = move_handle.try_update_value(Option::take).flatten() {
            handle.remove();
        }
    };

    let refresh = move || {
        let request = engine.try_update_value(|core| core.begin_refresh()).unwrap();
        feedback.set(request.feedback.clone());
        spawn_local(async move {
            let Some(src) = api::fetch_preview(&request.url).await else {
                return;
            };
            if engine.with_value(|core| core.accept_refresh(request.generation)) {
                image_src.set(src);
            }
        });
    };

    // One-time setup once both elements exist: measure, seed the
    // pre-existing boxes, and issue the initial preview request.
    let seeded = StoredValue::new(false);
    Effect::new(move || {
        if canvas_ref.get().is_none() || image_ref.get().is_none() {
            return;
        }
        if seeded.get_value() {
            return;
        }
        seeded.set_value(true);
        measure();
        engine.update_value(|core| core.load_existing(&initial));
        boxes.set(engine.with_value(|core| core.boxes().keys().copied().collect()));
        refresh();
    });

    let on_mouse_down = move |event: MouseEvent| {
        // The canvas may have moved since the last event; measure first.
        measure();
        let action = engine
            .try_update_value(|core| core.pointer_down(layout::event_point(&event)))
            .unwrap();
        let Action::DragStarted(rect) = action else {
            return;
        };
        drag.set(Some(rect));
        let handle = window_event_listener(ev::mousemove, move |event| {
            let action = engine
                .try_update_value(|core| core.pointer_move(layout::event_point(&event)))
                .unwrap();
            if let Action::DragMoved(rect) = action {
                drag.set(Some(rect));
            }
        });
        move_handle.set_value(Some(handle));
    };

    // Drags can end anywhere on the page, so the gesture resolves from a
    // window listener that lives as long as the record does.
    let _ = window_event_listener(ev::mouseup, move |_| {
        detach_move();
        match engine.try_update_value(EngineCore::pointer_up).unwrap() {
            Action::BoxAdded(key) => {
                drag.set(None);
                boxes.update(|list| list.push(key));
            }
            Action::DuplicateDiscarded => drag.set(None),
            Action::DegenerateRejected => {
                rejected.set(drag.get());
                drag.set(None);
                Timeout::new(REJECT_FLASH_MS, move || rejected.set(None)).forget();
            }
            _ => {}
        }
    });

    // Cached rectangles go stale whenever the page scrolls.
    let _ = window_event_listener(ev::scroll, move |_| measure());

    let on_toggle = move |_| {
        for action in engine.try_update_value(EngineCore::toggle_mode).unwrap() {
            match action {
                Action::ModeChanged(next) => mode.set(next),
                Action::DragCancelled => {
                    detach_move();
                    drag.set(None);
                }
                _ => {}
            }
        }
    };

    let toggle_label = move || match mode.get() {
        Mode::Draw => "Erase",
        Mode::Erase => "Draw",
    };
    let field_name = format!("bm_box_{id}");

    view! {
        <section class="board">
            <h2 class="board__title">{name}</h2>
            <div
                class="board__canvas"
                class=("board__canvas--erase", move || mode.get() == Mode::Erase)
                node_ref=canvas_ref
                on:mousedown=on_mouse_down
            >
                <img
                    class="board__image"
                    node_ref=image_ref
                    src=move || image_src.get()
                    alt="Floorplan overlay"
                    draggable="false"
                    on:load=move |_| measure()
                />
                <For each=move || boxes.get() key=|key| *key children=move |key| {
                    let on_click = move |event: MouseEvent| {
                        event.stop_propagation();
                        let action = engine.try_update_value(|core| core.erase(key)).unwrap();
                        if let Action::BoxRemoved(removed) = action {
                            boxes.update(|list| list.retain(|k| *k != removed));
                        }
                    };
                    let style = move || key_style(key, offset.get());
                    view! { <span class="board__box" style=style on:click=on_click></span> }
                }/>
                {move || {
                    drag.get()
                        .map(|rect| {
                            view! {
                                <span class="board__box board__box--active" style=rect_style(rect)></span>
                            }
                        })
                }}
                {move || {
                    rejected
                        .get()
                        .map(|rect| {
                            view! {
                                <span class="board__box board__box--rejected" style=rect_style(rect)></span>
                            }
                        })
                }}
            </div>
            <div class="board__controls">
                <button type="button" on:click=move |_| refresh()>
                    "Refresh preview"
                </button>
                <button type="button" on:click=on_toggle>
                    {toggle_label}
                </button>
            </div>
            <input type="hidden" name=field_name prop:value=move || feedback.get()/>
        </section>
    }
}

/// Inline position for a committed box: image-local extent plus the
/// current image offset within the canvas.
fn key_style(key: BoxKey, offset: Point) -> String {
    format!(
        "left:{}px;top:{}px;width:{}px;height:{}px;",
        f64::from(key.left) + offset.x,
        f64::from(key.top) + offset.y,
        key.right - key.left,
        key.bottom - key.top,
    )
}

/// Inline position for an in-progress (canvas-local) rectangle.
fn rect_style(rect: Rect) -> String {
    format!(
        "left:{}px;top:{}px;width:{}px;height:{}px;",
        rect.x, rect.y, rect.width, rect.height,
    )
}
