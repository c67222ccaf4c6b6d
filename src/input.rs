//! Input adapter
//!
//! Two mutually exclusive control schemes feed the same horizontal-intent
//! value: discrete arrow keys on desktop, continuous device tilt on mobile.
//! The class is decided once at startup from the user agent; the heuristic
//! lives behind `DeviceClass::detect` so tests inject strings and the
//! strategy stays swappable.

use std::collections::HashSet;

use crate::consts::TILT_CLAMP_DEG;

/// Coarse device class, evaluated once at load
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceClass {
    Desktop,
    Mobile,
}

impl DeviceClass {
    /// Case-insensitive `Mobi|Android` user-agent match
    pub fn detect(user_agent: &str) -> Self {
        let ua = user_agent.to_ascii_lowercase();
        if ua.contains("mobi") || ua.contains("android") {
            DeviceClass::Mobile
        } else {
            DeviceClass::Desktop
        }
    }
}

/// Set of currently-pressed key identifiers
///
/// Updated on press/release events, read (not consumed) every frame.
#[derive(Debug, Clone, Default)]
pub struct KeySet {
    pressed: HashSet<String>,
}

impl KeySet {
    pub fn press(&mut self, key: &str) {
        self.pressed.insert(key.to_string());
    }

    pub fn release(&mut self, key: &str) {
        self.pressed.remove(key);
    }

    pub fn clear(&mut self) {
        self.pressed.clear();
    }

    pub fn is_pressed(&self, key: &str) -> bool {
        self.pressed.contains(key)
    }

    /// Discrete steer: left wins when both arrows are held
    pub fn steer(&self) -> f32 {
        if self.is_pressed("ArrowLeft") {
            -1.0
        } else if self.is_pressed("ArrowRight") {
            1.0
        } else {
            0.0
        }
    }
}

/// Normalize a device-orientation gamma angle (degrees) to [-1, 1]
#[inline]
pub fn tilt_steer(gamma_deg: f32) -> f32 {
    gamma_deg.clamp(-TILT_CLAMP_DEG, TILT_CLAMP_DEG) / TILT_CLAMP_DEG
}

/// Latest tilt reading, already normalized
#[derive(Debug, Clone, Copy, Default)]
pub struct TiltState {
    steer: f32,
}

impl TiltState {
    /// Record a new gamma reading from the orientation event
    pub fn set_gamma(&mut self, gamma_deg: f32) {
        self.steer = tilt_steer(gamma_deg);
    }

    pub fn steer(&self) -> f32 {
        self.steer
    }
}

/// The active input strategy for this session
#[derive(Debug, Clone)]
pub enum ControlScheme {
    Keys(KeySet),
    Tilt(TiltState),
}

impl ControlScheme {
    /// Pick the scheme for the detected device class
    pub fn for_device(device: DeviceClass) -> Self {
        match device {
            DeviceClass::Desktop => ControlScheme::Keys(KeySet::default()),
            DeviceClass::Mobile => ControlScheme::Tilt(TiltState::default()),
        }
    }

    /// Current horizontal intent in [-1, 1]
    pub fn steer(&self) -> f32 {
        match self {
            ControlScheme::Keys(keys) => keys.steer(),
            ControlScheme::Tilt(tilt) => tilt.steer(),
        }
    }

    /// Drop any held state (used on game-over reset)
    pub fn clear(&mut self) {
        match self {
            ControlScheme::Keys(keys) => keys.clear(),
            ControlScheme::Tilt(tilt) => *tilt = TiltState::default(),
        }
    }

    pub fn keys_mut(&mut self) -> Option<&mut KeySet> {
        match self {
            ControlScheme::Keys(keys) => Some(keys),
            ControlScheme::Tilt(_) => None,
        }
    }

    pub fn tilt_mut(&mut self) -> Option<&mut TiltState> {
        match self {
            ControlScheme::Tilt(tilt) => Some(tilt),
            ControlScheme::Keys(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_detect_device_class() {
        let iphone = "Mozilla/5.0 (iPhone; CPU iPhone OS 17_0 like Mac OS X) Mobile/15E148";
        let pixel = "Mozilla/5.0 (Linux; Android 14; Pixel 8) Chrome/120.0";
        let desktop = "Mozilla/5.0 (X11; Linux x86_64) Chrome/120.0 Safari/537.36";

        assert_eq!(DeviceClass::detect(iphone), DeviceClass::Mobile);
        assert_eq!(DeviceClass::detect(pixel), DeviceClass::Mobile);
        assert_eq!(DeviceClass::detect(desktop), DeviceClass::Desktop);
        assert_eq!(DeviceClass::detect(""), DeviceClass::Desktop);
    }

    #[test]
    fn test_key_steer() {
        let mut keys = KeySet::default();
        assert_eq!(keys.steer(), 0.0);

        keys.press("ArrowRight");
        assert_eq!(keys.steer(), 1.0);

        // Left wins while both are held
        keys.press("ArrowLeft");
        assert_eq!(keys.steer(), -1.0);

        keys.release("ArrowLeft");
        assert_eq!(keys.steer(), 1.0);

        keys.release("ArrowRight");
        assert_eq!(keys.steer(), 0.0);
    }

    #[test]
    fn test_unrelated_keys_ignored() {
        let mut keys = KeySet::default();
        keys.press(" ");
        keys.press("a");
        assert_eq!(keys.steer(), 0.0);
    }

    #[test]
    fn test_tilt_normalization() {
        assert_eq!(tilt_steer(0.0), 0.0);
        assert_eq!(tilt_steer(45.0), 1.0);
        assert_eq!(tilt_steer(-45.0), -1.0);
        assert_eq!(tilt_steer(22.5), 0.5);
        // Saturates beyond the clamp angle
        assert_eq!(tilt_steer(90.0), 1.0);
        assert_eq!(tilt_steer(-300.0), -1.0);
    }

    #[test]
    fn test_scheme_clear() {
        let mut scheme = ControlScheme::for_device(DeviceClass::Desktop);
        scheme.keys_mut().unwrap().press("ArrowLeft");
        assert_eq!(scheme.steer(), -1.0);

        scheme.clear();
        assert_eq!(scheme.steer(), 0.0);

        let mut tilt = ControlScheme::for_device(DeviceClass::Mobile);
        tilt.tilt_mut().unwrap().set_gamma(30.0);
        assert!(tilt.steer() > 0.0);

        tilt.clear();
        assert_eq!(tilt.steer(), 0.0);
    }

    proptest! {
        #[test]
        fn tilt_steer_stays_normalized(gamma in -1000.0f32..1000.0) {
            let steer = tilt_steer(gamma);
            prop_assert!((-1.0..=1.0).contains(&steer));
        }

        #[test]
        fn wrapped_x_stays_in_bounds(x in -5000.0f32..5000.0) {
            let wrapped = crate::wrap_x(x, 15.0, 800.0);
            prop_assert!(wrapped >= -15.0 && wrapped <= 815.0);
        }
    }
}
