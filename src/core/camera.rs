/// Orbiting eye: the mesh spins about the vertical axis in front of a camera
/// that only moves along the view axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraState {
    /// Distance of the eye from the origin along the view axis
    pub distance: f32,
    /// Spin of the mesh about the vertical axis, kept in [0, 360)
    pub rotation_degrees: f32,
    pub is_rotating: bool,
}

impl CameraState {
    pub fn new(distance: f32) -> Self {
        Self {
            distance,
            rotation_degrees: 0.0,
            is_rotating: true,
        }
    }

    /// Positive `amount` moves the eye towards the origin.
    pub fn dolly(&mut self, amount: f32) {
        self.distance -= amount;
    }

    /// Advances the spin by `degrees` unless paused.
    pub fn advance_rotation(&mut self, degrees: f32) {
        if self.is_rotating {
            self.rotation_degrees = (self.rotation_degrees + degrees).rem_euclid(360.0);
        }
    }

    pub fn rotation_radians(&self) -> f32 {
        self.rotation_degrees.to_radians()
    }
}

impl Default for CameraState {
    fn default() -> Self {
        Self::new(5.0)
    }
}
