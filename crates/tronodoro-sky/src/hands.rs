//! Analog clock hand geometry.

use std::f32::consts::{FRAC_PI_2, PI};

use tronodoro_config::ClockFace;
use tronodoro_core::{ClockReading, HandAngles, HandTips, Hands, Point};

/// Angles of the hour, minute and second hands. 12 o'clock is `-π/2` and
/// angles grow clockwise in screen coordinates (y pointing down).
pub fn compute_hand_angles(reading: &ClockReading) -> HandAngles {
    let hours = (reading.hours % 12) as f32;
    let minutes = reading.minutes as f32;
    let seconds = reading.seconds as f32;

    HandAngles {
        hour: (hours + minutes / 60.0) * (PI / 6.0) - FRAC_PI_2,
        minute: (minutes + seconds / 60.0) * (PI / 30.0) - FRAC_PI_2,
        second: seconds * (PI / 30.0) - FRAC_PI_2,
    }
}

/// Tip offsets of each hand relative to the face center.
pub fn compute_hand_tips(angles: &HandAngles, face: &ClockFace) -> HandTips {
    let tip = |angle: f32, length: f32| {
        let reach = face.radius * length;
        Point::new(angle.cos() * reach, angle.sin() * reach)
    };

    HandTips {
        hour: tip(angles.hour, face.lengths.hour),
        minute: tip(angles.minute, face.lengths.minute),
        second: tip(angles.second, face.lengths.second),
    }
}

/// Angles and tips together.
pub fn compute_hands(reading: &ClockReading, face: &ClockFace) -> Hands {
    let angles = compute_hand_angles(reading);
    Hands {
        angles,
        tips: compute_hand_tips(&angles, face),
    }
}
