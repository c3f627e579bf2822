//! The three views captured at every panorama.

use serde::{Deserialize, Serialize};

use crate::core::math::wrap_heading;

/// A camera direction relative to the direction of travel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CaptureView {
    /// Along the direction of travel
    Forward,
    /// 90° clockwise of travel
    Right,
    /// Opposite to travel
    Back,
}

impl CaptureView {
    /// All views in file-index order.
    pub const ALL: [CaptureView; 3] = [CaptureView::Forward, CaptureView::Right, CaptureView::Back];

    /// Clockwise offset from the travel bearing (degrees).
    #[inline]
    pub fn offset_deg(self) -> f64 {
        match self {
            CaptureView::Forward => 0.0,
            CaptureView::Right => 90.0,
            CaptureView::Back => 180.0,
        }
    }

    /// Index used in file names (0, 1, 2).
    #[inline]
    pub fn index(self) -> usize {
        match self {
            CaptureView::Forward => 0,
            CaptureView::Right => 1,
            CaptureView::Back => 2,
        }
    }

    /// Compass heading of this view for a travel bearing in [0, 360).
    #[inline]
    pub fn heading(self, bearing_deg: f64) -> f64 {
        wrap_heading(bearing_deg + self.offset_deg())
    }
}

/// Forward, right and back headings for a travel bearing in [0, 360).
///
/// Each heading is folded into [0, 360) by a single conditional
/// subtraction; the bounded input makes one wrap sufficient.
///
/// # Example
/// ```
/// use marga::capture::derive_headings;
///
/// assert_eq!(derive_headings(350.0), [350.0, 80.0, 170.0]);
/// ```
pub fn derive_headings(bearing_deg: f64) -> [f64; 3] {
    CaptureView::ALL.map(|view| view.heading(bearing_deg))
}
