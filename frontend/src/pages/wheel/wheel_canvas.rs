use std::f64::consts::TAU;
use std::rc::Rc;

use gloo::events::EventListener;
use shared::Segment;
use wasm_bindgen::JsCast;
use web_sys::{window, CanvasRenderingContext2d, HtmlCanvasElement};
use yew::prelude::*;

use super::wheel_utils::{device_pixel_ratio, fit_label};
use crate::styles;

const RING_COLOR: &str = "#00727A";
const SEPARATOR_COLOR: &str = "#ffffff";
const TEXT_COLOR: &str = "#ffffff";
const POINTER_COLOR: &str = "#f59e0b";

#[derive(Properties, PartialEq)]
pub struct WheelCanvasProps {
    pub segments: Rc<Vec<Segment>>,
    /// Wheel rotation in radians.
    pub angle: f64,
    pub is_spinning: bool,
    pub onclick: Callback<MouseEvent>,
    pub onkeydown: Callback<KeyboardEvent>,
}

fn context_2d(canvas: &HtmlCanvasElement) -> Option<CanvasRenderingContext2d> {
    canvas
        .get_context("2d")
        .ok()
        .flatten()
        .and_then(|ctx| ctx.dyn_into::<CanvasRenderingContext2d>().ok())
}

/// Matches the backing store to the displayed size times the pixel ratio.
fn fit_to_display(canvas: &HtmlCanvasElement) -> f64 {
    let dpr = device_pixel_ratio();
    let size = canvas.client_width().min(canvas.client_height()).max(1) as f64;
    let pixels = (size * dpr).round() as u32;
    if canvas.width() != pixels || canvas.height() != pixels {
        canvas.set_width(pixels);
        canvas.set_height(pixels);
    }
    dpr
}

fn draw_label(ctx: &CanvasRenderingContext2d, text: &str, radius: f64, scale: f64) {
    let font_size = (radius * 0.06).floor().max(14.0);
    ctx.set_font(&format!("{}px Poppins, Arial, sans-serif", font_size));
    ctx.set_text_align("right");
    ctx.set_text_baseline("middle");
    ctx.set_fill_style_str(TEXT_COLOR);
    ctx.set_shadow_color("rgba(0,0,0,0.25)");
    ctx.set_shadow_blur(8.0 * scale);

    let max_width = radius * 0.85;
    let x = max_width - 10.0 * scale;
    let measure = |s: &str| ctx.measure_text(s).map(|m| m.width()).unwrap_or(0.0);
    match fit_label(text, max_width, measure) {
        (line, None) => {
            let _ = ctx.fill_text(&line, x, 0.0);
        }
        (first, Some(second)) => {
            let line_height = font_size * 1.05;
            let _ = ctx.fill_text(&first, x, -line_height * 0.5);
            let _ = ctx.fill_text(&second, x, line_height * 0.5);
        }
    }
}

fn draw_wheel(canvas: &HtmlCanvasElement, segments: &[Segment], angle: f64, scale: f64) {
    let Some(ctx) = context_2d(canvas) else {
        log::error!("Canvas 2d context unavailable");
        return;
    };

    let width = canvas.width() as f64;
    let height = canvas.height() as f64;
    // Leave room for the ring and pointer
    let radius = (width.min(height) / 2.0 - 18.0 * scale).max(1.0);

    ctx.clear_rect(0.0, 0.0, width, height);
    ctx.save();
    let _ = ctx.translate(width / 2.0, height / 2.0);
    let _ = ctx.rotate(angle);

    let seg = TAU / segments.len().max(1) as f64;
    for (i, segment) in segments.iter().enumerate() {
        let start = i as f64 * seg;
        let end = start + seg;

        ctx.begin_path();
        ctx.move_to(0.0, 0.0);
        let _ = ctx.arc(0.0, 0.0, radius, start, end);
        ctx.close_path();
        ctx.set_fill_style_str(&segment.color);
        ctx.fill();

        ctx.set_stroke_style_str(SEPARATOR_COLOR);
        ctx.set_line_width(2.0 * scale);
        ctx.begin_path();
        ctx.move_to(0.0, 0.0);
        ctx.line_to(radius * start.cos(), radius * start.sin());
        ctx.stroke();

        ctx.save();
        let _ = ctx.rotate(start + seg / 2.0);
        draw_label(&ctx, &segment.label, radius, scale);
        ctx.restore();
    }

    // Outer ring
    ctx.begin_path();
    let _ = ctx.arc(0.0, 0.0, radius, 0.0, TAU);
    ctx.set_line_width(6.0 * scale);
    ctx.set_stroke_style_str(RING_COLOR);
    ctx.stroke();

    // Hub
    ctx.begin_path();
    let _ = ctx.arc(0.0, 0.0, radius * 0.12, 0.0, TAU);
    ctx.set_fill_style_str("#ffffff");
    ctx.fill();
    ctx.set_line_width(4.0 * scale);
    ctx.set_stroke_style_str(RING_COLOR);
    ctx.stroke();

    ctx.restore();

    // Fixed pointer at the top, drawn outside the rotation
    let cx = width / 2.0;
    let top = height / 2.0 - radius;
    let half = 14.0 * scale;
    ctx.begin_path();
    ctx.move_to(cx - half, top - 16.0 * scale);
    ctx.line_to(cx + half, top - 16.0 * scale);
    ctx.line_to(cx, top + 14.0 * scale);
    ctx.close_path();
    ctx.set_fill_style_str(POINTER_COLOR);
    ctx.fill();
    ctx.set_line_width(1.5 * scale);
    ctx.set_stroke_style_str(RING_COLOR);
    ctx.stroke();
}

#[function_component(WheelCanvas)]
pub fn wheel_canvas(props: &WheelCanvasProps) -> Html {
    let canvas_ref = use_node_ref();
    // Read by the resize listener, which outlives any single render
    let latest = use_mut_ref(|| (props.segments.clone(), props.angle));
    *latest.borrow_mut() = (props.segments.clone(), props.angle);

    {
        let canvas_ref = canvas_ref.clone();
        let latest = latest.clone();
        use_effect_with((), move |_| {
            let listener = window().map(|w| {
                EventListener::new(&w, "resize", move |_| {
                    if let Some(canvas) = canvas_ref.cast::<HtmlCanvasElement>() {
                        let (segments, angle) = latest.borrow().clone();
                        let scale = fit_to_display(&canvas);
                        draw_wheel(&canvas, &segments, angle, scale);
                    }
                })
            });
            move || drop(listener)
        });
    }

    {
        let canvas_ref = canvas_ref.clone();
        use_effect_with(
            (props.segments.clone(), props.angle),
            move |(segments, angle)| {
                if let Some(canvas) = canvas_ref.cast::<HtmlCanvasElement>() {
                    let scale = fit_to_display(&canvas);
                    draw_wheel(&canvas, segments, *angle, scale);
                }
                || ()
            },
        );
    }

    html! {
        <div class={styles::WHEEL_FRAME}>
            <canvas
                ref={canvas_ref}
                width="450"
                height="450"
                tabindex="0"
                role="button"
                aria-label="Girar a roleta"
                aria-busy={props.is_spinning.to_string()}
                class={styles::WHEEL_CANVAS}
                onclick={props.onclick.clone()}
                onkeydown={props.onkeydown.clone()}
            />
        </div>
    }
}
