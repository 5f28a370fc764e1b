use crate::services::settings::SettingsSource;

/// Decides whether this launch goes to the one-time tutorial instead of recording.
pub struct FirstRunGate<'a, S: ?Sized> {
    settings: &'a S,
}

impl<'a, S: SettingsSource + ?Sized> FirstRunGate<'a, S> {
    pub fn new(settings: &'a S) -> Self {
        Self { settings }
    }

    /// True when the first launch flag is absent or empty.
    pub fn should_show_tutorial(&self) -> bool {
        self.settings
            .first_launch_flag()
            .map_or(true, |flag| flag.is_empty())
    }
}
