//! Piecewise-linear range mapping.

/// What happens to inputs outside the first/last input stop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Extrapolate {
    /// Keep following the slope of the outermost segment.
    #[default]
    Extend,
    /// Pin to the outermost output value.
    Clamp,
}

/// Maps an input value through `N` ascending stops onto `N` outputs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interpolation<const N: usize> {
    input: [f32; N],
    output: [f32; N],
    extrapolate: Extrapolate,
}

impl<const N: usize> Interpolation<N> {
    /// `input` must be ascending and hold at least two stops.
    pub const fn new(input: [f32; N], output: [f32; N]) -> Self {
        Self {
            input,
            output,
            extrapolate: Extrapolate::Extend,
        }
    }

    pub const fn with_extrapolate(self, extrapolate: Extrapolate) -> Self {
        Self {
            input: self.input,
            output: self.output,
            extrapolate,
        }
    }

    pub const fn clamped(self) -> Self {
        self.with_extrapolate(Extrapolate::Clamp)
    }

    pub fn sample(&self, value: f32) -> f32 {
        debug_assert!(N >= 2, "interpolation needs two stops");
        debug_assert!(
            self.input.windows(2).all(|pair| pair[0] <= pair[1]),
            "interpolation input must be ascending"
        );
        if N < 2 {
            return self.output.first().copied().unwrap_or(value);
        }

        let value = match self.extrapolate {
            Extrapolate::Extend => value,
            Extrapolate::Clamp => value.clamp(self.input[0], self.input[N - 1]),
        };

        let mut segment = N - 1;
        for i in 1..N {
            if value <= self.input[i] {
                segment = i;
                break;
            }
        }

        let (in_start, in_end) = (self.input[segment - 1], self.input[segment]);
        let (out_start, out_end) = (self.output[segment - 1], self.output[segment]);
        if (in_end - in_start).abs() < f32::EPSILON {
            return out_start;
        }
        let fraction = (value - in_start) / (in_end - in_start);
        out_start + (out_end - out_start) * fraction
    }
}
