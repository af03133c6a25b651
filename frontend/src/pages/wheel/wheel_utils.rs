use web_sys::window;

/// High-resolution timestamp in milliseconds, falling back to the wall clock.
pub fn now_ms() -> f64 {
    window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or_else(|| chrono::Utc::now().timestamp_millis() as f64)
}

/// Keys that spin the wheel when it has focus.
pub fn is_spin_key(key: &str) -> bool {
    matches!(key, "Enter" | " " | "Spacebar")
}

pub fn device_pixel_ratio() -> f64 {
    window()
        .map(|w| w.device_pixel_ratio())
        .filter(|dpr| *dpr > 0.0)
        .unwrap_or(1.0)
}

/// Splits a label into at most two lines no wider than `max_width`.
///
/// Words are packed greedily into the first line; everything that does not
/// fit spills into the second one.
pub fn fit_label<F>(text: &str, max_width: f64, measure: F) -> (String, Option<String>)
where
    F: Fn(&str) -> f64,
{
    if measure(text) <= max_width {
        return (text.to_string(), None);
    }

    let mut first = String::new();
    let mut second = String::new();
    for word in text.split(' ') {
        let candidate = if first.is_empty() {
            word.to_string()
        } else {
            format!("{} {}", first, word)
        };
        if measure(&candidate) <= max_width {
            first = candidate;
        } else {
            if !second.is_empty() {
                second.push(' ');
            }
            second.push_str(word);
        }
    }

    let second = if second.is_empty() { None } else { Some(second) };
    (first, second)
}

/// Tracks the lead registration in flight.
///
/// Each submit gets a fresh id; an answer carrying an older id belongs to a
/// dialog that was dismissed and must not start a spin.
#[derive(Debug, Default)]
pub struct Registrations {
    current: u64,
    pending: bool,
}

impl Registrations {
    pub fn begin(&mut self) -> u64 {
        self.current += 1;
        self.pending = true;
        self.current
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Invalidates the current id. Refused while a request is pending.
    pub fn try_cancel(&mut self) -> bool {
        if self.pending {
            return false;
        }
        self.current += 1;
        true
    }

    /// Settles `id`, returning whether it is still the live registration.
    pub fn finish(&mut self, id: u64) -> bool {
        if id != self.current {
            return false;
        }
        self.pending = false;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // One unit per character
    fn width(s: &str) -> f64 {
        s.chars().count() as f64
    }

    #[test]
    fn short_label_stays_on_one_line() {
        assert_eq!(fit_label("Garrafa", 10.0, width), ("Garrafa".to_string(), None));
    }

    #[test]
    fn long_label_wraps_into_two_lines() {
        let (first, second) = fit_label("Sorte! Tente mais uma vez", 12.0, width);
        assert_eq!(first, "Sorte! Tente");
        assert_eq!(second.as_deref(), Some("mais uma vez"));
    }

    #[test]
    fn spin_keys() {
        assert!(is_spin_key("Enter"));
        assert!(is_spin_key(" "));
        assert!(!is_spin_key("Escape"));
    }

    #[test]
    fn close_is_refused_while_registration_is_pending() {
        let mut registrations = Registrations::default();
        let id = registrations.begin();
        assert!(registrations.is_pending());
        assert!(!registrations.try_cancel());
        assert!(registrations.finish(id));
        assert!(!registrations.is_pending());
        assert!(registrations.try_cancel());
    }

    #[test]
    fn answer_for_dismissed_dialog_is_stale() {
        let mut registrations = Registrations::default();
        let first = registrations.begin();
        assert!(registrations.finish(first));
        assert!(registrations.try_cancel());

        let second = registrations.begin();
        assert!(!registrations.finish(first));
        assert!(registrations.is_pending());
        assert!(registrations.finish(second));
    }
}
