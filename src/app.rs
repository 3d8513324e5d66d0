//! Process identity stamped on every response.

use std::sync::Arc;

use arc_swap::ArcSwap;

/// The application name and version.
///
/// Both are read on every [`Response::header`](crate::Response) and
/// [`Response::body`](crate::Response) call and written a handful of times at start-up,
/// so they live behind atomic pointers rather than a lock.
#[derive(Debug)]
pub struct AppInfo {
    name: ArcSwap<String>,
    version: ArcSwap<String>,
}

impl Default for AppInfo {
    fn default() -> Self {
        Self::new("", "")
    }
}

impl AppInfo {
    /// Create app attributes with initial values.
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: ArcSwap::from_pointee(name.into()),
            version: ArcSwap::from_pointee(version.into()),
        }
    }

    /// Current application name.
    #[must_use]
    pub fn name(&self) -> Arc<String> {
        self.name.load_full()
    }

    /// Current application version.
    #[must_use]
    pub fn version(&self) -> Arc<String> {
        self.version.load_full()
    }

    /// Replace the application name.
    pub fn set_name(&self, name: impl Into<String>) {
        self.name.store(Arc::new(name.into()));
    }

    /// Replace the application version.
    pub fn set_version(&self, version: impl Into<String>) {
        self.version.store(Arc::new(version.into()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stores_are_visible_to_readers() {
        let app = Arc::new(AppInfo::default());
        assert_eq!(app.name().as_str(), "");

        let writer = Arc::clone(&app);
        std::thread::spawn(move || {
            writer.set_name("myapp");
            writer.set_version("0.3.0");
        })
        .join()
        .unwrap();

        assert_eq!(app.name().as_str(), "myapp");
        assert_eq!(app.version().as_str(), "0.3.0");
    }
}
