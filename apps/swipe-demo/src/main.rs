use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use anyhow::bail;
use swipecards_core::{Clock, Runtime, RuntimeScheduler, WebTimeClock, FRAME_NANOS_60HZ};
use swipecards_foundation::{PointerEvent, PointerEventKind};
use swipecards_ui::prelude::*;

/// Remembers that a frame was asked for until the loop services it.
#[derive(Default)]
struct FrameRequest(AtomicBool);

impl RuntimeScheduler for FrameRequest {
    fn schedule_frame(&self) {
        self.0.store(true, Ordering::Release);
    }
}

struct Profile {
    name: &'static str,
    age: u8,
}

struct ConsoleRenderer;

impl CardRenderer<Profile> for ConsoleRenderer {
    type Output = String;

    fn render_card(&mut self, card: &Profile) -> String {
        format!("{}, {}", card.name, card.age)
    }

    fn render_no_more_cards(&mut self) -> Option<String> {
        Some("No more cards".to_string())
    }
}

struct Host {
    runtime: Runtime,
    request: Arc<FrameRequest>,
    clock: WebTimeClock,
    started: <WebTimeClock as Clock>::Instant,
}

impl Host {
    fn new() -> Self {
        let request = Arc::new(FrameRequest::default());
        let clock = WebTimeClock;
        Self {
            runtime: Runtime::new(request.clone()),
            request,
            started: clock.now(),
            clock,
        }
    }

    fn uptime_ms(&self) -> i64 {
        self.clock.elapsed_millis(self.started) as i64
    }

    /// Run frames in real time until nothing is animating.
    fn run_until_idle(&self) -> usize {
        let handle = self.runtime.handle();
        let mut frames = 0;
        while self.request.0.swap(false, Ordering::AcqRel) || self.runtime.needs_frame() {
            std::thread::sleep(Duration::from_nanos(FRAME_NANOS_60HZ));
            handle.drain_frame_callbacks(self.clock.elapsed_nanos(self.started));
            frames += 1;
        }
        frames
    }

    fn pointer_drag(&self, widget: &SwipeCards<Profile>, from: Point, to: Point) {
        const STEPS: usize = 8;
        let send = |kind, position| {
            widget.on_pointer_event(&PointerEvent::at(kind, position, self.uptime_ms()));
        };
        send(PointerEventKind::Down, from);
        for step in 1..=STEPS {
            std::thread::sleep(Duration::from_millis(12));
            let fraction = step as f32 / STEPS as f32;
            send(PointerEventKind::Move, from + (to - from) * fraction);
        }
        send(PointerEventKind::Up, to);
    }
}

fn parse_options() -> anyhow::Result<SwipeCardsOptions> {
    let mut options = SwipeCardsOptions::default();
    for arg in std::env::args().skip(1) {
        options = match arg.as_str() {
            "--loop" => options.with_loop(true),
            "--no-rotation" => options.with_rotation(false),
            "--no-overlays" => options.with_show_yup(false).with_show_nope(false),
            other => match other.strip_prefix("--friction=") {
                Some(value) => options.with_friction_value(value.parse()?),
                None => bail!("unknown argument {other:?}"),
            },
        };
    }
    Ok(options)
}

fn describe(widget: &SwipeCards<Profile>) {
    let scene = widget.render(&mut ConsoleRenderer);
    match (&scene.content, scene.transform()) {
        (CardContent::Card { view, .. }, Some(transform)) => log::info!(
            "showing {view} (scale {:.2}, tilt {:.1} deg)",
            transform.scale,
            transform.rotation_degrees
        ),
        (CardContent::NoMoreCards(view), _) => {
            log::info!("{}", view.as_deref().unwrap_or("(empty)"))
        }
        _ => {}
    }
}

fn main() -> anyhow::Result<()> {
    #[cfg(feature = "logging")]
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    let options = parse_options()?;
    let host = Host::new();
    let widget = SwipeCards::builder(host.runtime.handle())
        .cards(vec![
            Profile { name: "Ada", age: 36 },
            Profile { name: "Grace", age: 45 },
            Profile { name: "Linus", age: 28 },
        ])
        .options(options)
        .on_swipe_right(|card: &Profile| log::info!("liked {}", card.name))
        .on_swipe_left(|card: &Profile| log::info!("passed on {}", card.name))
        .on_card_removed(|index| log::info!("card {index} removed"))
        .build();

    let frames = host.run_until_idle();
    log::info!("entrance finished after {frames} frame(s)");
    describe(&widget);

    let start = Point::new(200.0, 400.0);
    let script = [
        ("fling right", Point::new(380.0, 410.0)),
        ("nudge", Point::new(240.0, 390.0)),
        ("fling left", Point::new(40.0, 420.0)),
        ("fling right", Point::new(360.0, 380.0)),
    ];
    for (label, end) in script {
        log::info!("{label}");
        host.pointer_drag(&widget, start, end);
        let frames = host.run_until_idle();
        log::info!("settled after {frames} frame(s)");
        describe(&widget);
    }

    Ok(())
}
