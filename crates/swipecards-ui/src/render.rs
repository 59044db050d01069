//! Render contract between the widget and its host.
//!
//! The widget never draws. [`SwipeCards::render`](crate::SwipeCards::render)
//! asks a [`CardRenderer`] for the host's views and pairs them with the
//! transforms the active card and overlays should be drawn with.

use swipecards_animation::{Animatable, Extrapolate, Interpolation};
use swipecards_foundation::gesture_constants::{MAX_TILT_DEGREES, OVERLAY_RANGE, TILT_RANGE};
use swipecards_ui_graphics::Point;

const ROTATION: Interpolation<3> = Interpolation::new(
    [-TILT_RANGE, 0.0, TILT_RANGE],
    [-MAX_TILT_DEGREES, 0.0, MAX_TILT_DEGREES],
);
const CARD_OPACITY: Interpolation<3> =
    Interpolation::new([-TILT_RANGE, 0.0, TILT_RANGE], [0.5, 1.0, 0.5]);
const YUP_OPACITY: Interpolation<2> =
    Interpolation::new([0.0, OVERLAY_RANGE], [0.0, 1.0]).clamped();
const NOPE_OPACITY: Interpolation<2> =
    Interpolation::new([-OVERLAY_RANGE, 0.0], [1.0, 0.0]).clamped();

/// Host views for the widget's content.
pub trait CardRenderer<C> {
    type Output;

    fn render_card(&mut self, card: &C) -> Self::Output;

    /// Shown when there is no current card. `None` uses the host's default.
    fn render_no_more_cards(&mut self) -> Option<Self::Output> {
        None
    }

    /// Custom "yup" overlay driven by the live position.
    fn render_yup(&mut self, _position: &PositionSignal) -> Option<Self::Output> {
        None
    }

    /// Custom "nope" overlay driven by the live position.
    fn render_nope(&mut self, _position: &PositionSignal) -> Option<Self::Output> {
        None
    }
}

/// How the active card is drawn this frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CardTransform {
    pub translation: Point,
    pub rotation_degrees: f32,
    pub scale: f32,
    pub opacity: f32,
}

impl CardTransform {
    pub const IDENTITY: CardTransform = CardTransform {
        translation: Point::ZERO,
        rotation_degrees: 0.0,
        scale: 1.0,
        opacity: 1.0,
    };

    pub fn from_channels(position: Point, scale: f32, rotation: bool) -> Self {
        Self {
            translation: position,
            rotation_degrees: if rotation {
                ROTATION.sample(position.x)
            } else {
                0.0
            },
            scale,
            opacity: CARD_OPACITY.sample(position.x).clamp(0.0, 1.0),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum CardContent<R> {
    Card { view: R, transform: CardTransform },
    /// No current card. Holds the host's fallback view, if it rendered one.
    NoMoreCards(Option<R>),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Overlay<R> {
    Custom(R),
    /// Host default overlay at the given opacity.
    Default { opacity: f32 },
    Hidden,
}

impl<R> Overlay<R> {
    pub fn is_hidden(&self) -> bool {
        matches!(self, Overlay::Hidden)
    }

    pub fn opacity(&self) -> Option<f32> {
        match self {
            Overlay::Default { opacity } => Some(*opacity),
            _ => None,
        }
    }
}

/// Everything the host draws for one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct SwipeCardsScene<R> {
    pub content: CardContent<R>,
    pub nope: Overlay<R>,
    pub yup: Overlay<R>,
}

impl<R> SwipeCardsScene<R> {
    pub fn card(&self) -> Option<&R> {
        match &self.content {
            CardContent::Card { view, .. } => Some(view),
            CardContent::NoMoreCards(_) => None,
        }
    }

    pub fn transform(&self) -> Option<CardTransform> {
        match &self.content {
            CardContent::Card { transform, .. } => Some(*transform),
            CardContent::NoMoreCards(_) => None,
        }
    }
}

pub(crate) fn default_yup_opacity(x: f32) -> f32 {
    YUP_OPACITY.sample(x)
}

pub(crate) fn default_nope_opacity(x: f32) -> f32 {
    NOPE_OPACITY.sample(x)
}

/// Read-only handle to the card's live position.
#[derive(Clone, Debug)]
pub struct PositionSignal {
    position: Animatable<Point>,
}

impl PositionSignal {
    pub(crate) fn new(position: Animatable<Point>) -> Self {
        Self { position }
    }

    pub fn value(&self) -> Point {
        self.position.value()
    }

    pub fn x(&self) -> f32 {
        self.position.value().x
    }

    pub fn y(&self) -> f32 {
        self.position.value().y
    }

    pub fn is_animating(&self) -> bool {
        self.position.is_running()
    }

    /// Map the horizontal position through `input` → `output`.
    pub fn interpolate_x<const N: usize>(
        &self,
        input: [f32; N],
        output: [f32; N],
        extrapolate: Extrapolate,
    ) -> f32 {
        Interpolation::new(input, output)
            .with_extrapolate(extrapolate)
            .sample(self.x())
    }
}
