//! Device capability detection
//!
//! iOS devices refuse to decode very large images, so they get a reduced
//! size variant of each card.

/// What the current device can handle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Capabilities {
    /// Device has a hard image size limit
    pub cannot_load_large_images: bool,
}

const SIZE_LIMITED_DEVICES: &[&str] = &["iPad", "iPhone", "iPod"];

impl Capabilities {
    /// Detect capabilities from a user agent string
    pub fn from_user_agent(user_agent: &str) -> Self {
        Self {
            cannot_load_large_images: SIZE_LIMITED_DEVICES
                .iter()
                .any(|device| user_agent.contains(device)),
        }
    }
}

/// Injected capability check, so tests can fake any device
pub trait CapabilityDetector {
    fn detect(&self, user_agent: &str) -> Capabilities;
}

/// Default detector based on `Capabilities::from_user_agent`
#[derive(Debug, Clone, Copy, Default)]
pub struct UserAgentDetector;

impl CapabilityDetector for UserAgentDetector {
    fn detect(&self, user_agent: &str) -> Capabilities {
        Capabilities::from_user_agent(user_agent)
    }
}

impl<F> CapabilityDetector for F
where
    F: Fn(&str) -> Capabilities,
{
    fn detect(&self, user_agent: &str) -> Capabilities {
        self(user_agent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const IPHONE_UA: &str = "Mozilla/5.0 (iPhone; CPU iPhone OS 9_0 like Mac OS X) \
        AppleWebKit/601.1.46 (KHTML, like Gecko) Version/9.0 Mobile/13A344 Safari/601.1";
    const DESKTOP_UA: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 \
        (KHTML, like Gecko) Chrome/44.0.2403.155 Safari/537.36";
    const ANDROID_UA: &str = "Mozilla/5.0 (Linux; Android 5.1; Nexus 5) AppleWebKit/537.36 \
        (KHTML, like Gecko) Chrome/44.0 Mobile Safari/537.36";

    #[test]
    fn test_ios_devices_are_limited() {
        assert!(Capabilities::from_user_agent(IPHONE_UA).cannot_load_large_images);
        assert!(Capabilities::from_user_agent("Mozilla/5.0 (iPad; CPU OS 8_4)").cannot_load_large_images);
        assert!(Capabilities::from_user_agent("Mozilla/5.0 (iPod touch)").cannot_load_large_images);
    }

    #[test]
    fn test_other_devices_are_not_limited() {
        assert!(!Capabilities::from_user_agent(DESKTOP_UA).cannot_load_large_images);
        assert!(!Capabilities::from_user_agent(ANDROID_UA).cannot_load_large_images);
        assert!(!Capabilities::from_user_agent("").cannot_load_large_images);
    }

    #[test]
    fn test_closure_detector() {
        let always_limited = |_: &str| Capabilities {
            cannot_load_large_images: true,
        };
        assert!(always_limited.detect(DESKTOP_UA).cannot_load_large_images);
        assert_eq!(
            UserAgentDetector.detect(IPHONE_UA),
            Capabilities::from_user_agent(IPHONE_UA)
        );
    }
}
