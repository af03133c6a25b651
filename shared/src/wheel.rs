use rand::seq::SliceRandom;
use rand::Rng;

use crate::angle_math::segment_angle;
use crate::config::WheelConfig;

/// One wheel slice.
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    pub label: String,
    pub color: String,
}

/// Ordered segments; the order never changes after construction.
#[derive(Debug, Clone, PartialEq)]
pub struct Wheel {
    segments: Vec<Segment>,
}

impl Wheel {
    /// Builds a wheel in the given label order, cycling through `palette` for colors.
    pub fn new<S: AsRef<str>>(labels: &[S], palette: &[S]) -> Self {
        let segments = labels
            .iter()
            .enumerate()
            .map(|(i, label)| Segment {
                label: label.as_ref().to_string(),
                color: if palette.is_empty() {
                    "#000000".to_string()
                } else {
                    palette[i % palette.len()].as_ref().to_string()
                },
            })
            .collect();
        Self { segments }
    }

    /// Shuffles the labels once, then assigns colors by position.
    pub fn shuffled<S: AsRef<str>, R: Rng + ?Sized>(labels: &[S], palette: &[S], rng: &mut R) -> Self {
        let mut order: Vec<&str> = labels.iter().map(|l| l.as_ref()).collect();
        order.shuffle(rng);
        let palette: Vec<&str> = palette.iter().map(|p| p.as_ref()).collect();
        Self::new(&order, &palette)
    }

    pub fn from_config<R: Rng + ?Sized>(config: &WheelConfig, rng: &mut R) -> Self {
        if config.shuffle {
            Self::shuffled(&config.items, &config.palette, rng)
        } else {
            Self::new(&config.items, &config.palette)
        }
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn label(&self, index: usize) -> Option<&str> {
        self.segments.get(index).map(|s| s.label.as_str())
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().map(|s| s.label.as_str())
    }

    pub fn segment_angle(&self) -> f64 {
        segment_angle(self.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn colors_cycle_through_palette() {
        let wheel = Wheel::new(&["a", "b", "c"], &["red", "blue"]);
        let colors: Vec<_> = wheel.segments().iter().map(|s| s.color.as_str()).collect();
        assert_eq!(colors, vec!["red", "blue", "red"]);
    }

    #[test]
    fn shuffle_keeps_every_label_once() {
        let config = WheelConfig::default();
        let mut rng = StdRng::seed_from_u64(7);
        let wheel = Wheel::from_config(&config, &mut rng);
        let mut labels: Vec<_> = wheel.labels().map(str::to_string).collect();
        let mut expected = config.items.clone();
        labels.sort();
        expected.sort();
        assert_eq!(labels, expected);
        assert_eq!(wheel.segments()[0].color, config.palette[0]);
    }
}
