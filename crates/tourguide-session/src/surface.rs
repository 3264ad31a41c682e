use tourguide_core::models::{ChatEntry, Position};
use tourguide_geo::NavigationFix;

/// Indicator lights shown next to the transcript
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusIndicator {
    Online,
    Offline,
    GpsActive,
    GpsInactive,
    Listening,
    Idle,
}

impl StatusIndicator {
    pub fn label(&self) -> &'static str {
        match self {
            StatusIndicator::Online => "Online",
            StatusIndicator::Offline => "Offline",
            StatusIndicator::GpsActive => "GPS Active",
            StatusIndicator::GpsInactive => "GPS Inactive",
            StatusIndicator::Listening => "Listening",
            StatusIndicator::Idle => "Idle",
        }
    }
}

/// Output port the session renders into
pub trait Surface {
    /// A new transcript line
    fn show_entry(&mut self, entry: &ChatEntry);

    fn show_status(&mut self, status: StatusIndicator);

    fn show_location(&mut self, position: &Position);

    /// Current navigation readout, `None` once navigation stops
    fn show_navigation(&mut self, fix: Option<&NavigationFix>);
}
