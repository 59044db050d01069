use swipecards_foundation::gesture_constants::DEFAULT_ENTRANCE_FRICTION;

/// Host-facing configuration of the card stack.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SwipeCardsOptions {
    /// Start over at the first card after the last one is swiped.
    pub looping: bool,
    /// Show the default "yup" overlay when no custom one is rendered.
    pub show_yup: bool,
    /// Show the default "nope" overlay when no custom one is rendered.
    pub show_nope: bool,
    /// Tilt the card proportionally to its horizontal displacement.
    pub rotation: bool,
    /// Friction of the entrance scale spring. Read through
    /// [`entrance_friction`](Self::entrance_friction), which keeps it at or
    /// above zero.
    pub friction_value: f32,
}

impl Default for SwipeCardsOptions {
    fn default() -> Self {
        Self {
            looping: false,
            show_yup: true,
            show_nope: true,
            rotation: true,
            friction_value: DEFAULT_ENTRANCE_FRICTION,
        }
    }
}

impl SwipeCardsOptions {
    pub fn with_loop(mut self, looping: bool) -> Self {
        self.looping = looping;
        self
    }

    pub fn with_show_yup(mut self, show: bool) -> Self {
        self.show_yup = show;
        self
    }

    pub fn with_show_nope(mut self, show: bool) -> Self {
        self.show_nope = show;
        self
    }

    pub fn with_rotation(mut self, rotation: bool) -> Self {
        self.rotation = rotation;
        self
    }

    /// Negative frictions become 0. Non-finite ones fall back to the default.
    pub fn with_friction_value(mut self, friction: f32) -> Self {
        self.friction_value = sanitize_friction(friction);
        self
    }

    /// Friction handed to the entrance spring.
    pub fn entrance_friction(&self) -> f32 {
        sanitize_friction(self.friction_value)
    }
}

// Damping reaches zero just below friction 0; the spring would never settle.
fn sanitize_friction(friction: f32) -> f32 {
    if friction.is_finite() {
        friction.max(0.0)
    } else {
        DEFAULT_ENTRANCE_FRICTION
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let options = SwipeCardsOptions::default();
        assert!(!options.looping);
        assert!(options.show_yup && options.show_nope && options.rotation);
        assert_eq!(options.friction_value, 10.0);
    }

    #[test]
    fn builders_override_single_fields() {
        let options = SwipeCardsOptions::default()
            .with_loop(true)
            .with_rotation(false)
            .with_friction_value(7.0);
        assert!(options.looping);
        assert!(!options.rotation);
        assert_eq!(options.friction_value, 7.0);
        assert!(options.show_yup);
    }

    #[test]
    fn friction_is_kept_non_negative_and_finite() {
        assert_eq!(
            SwipeCardsOptions::default()
                .with_friction_value(-5.0)
                .friction_value,
            0.0
        );
        assert_eq!(
            SwipeCardsOptions::default()
                .with_friction_value(f32::NAN)
                .friction_value,
            DEFAULT_ENTRANCE_FRICTION
        );

        let options = SwipeCardsOptions {
            friction_value: -40.0,
            ..SwipeCardsOptions::default()
        };
        assert_eq!(options.entrance_friction(), 0.0);
    }
}
