// One stereo frame, the unit the engine mixes in
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct StereoFrame {
    pub left: f32,
    pub right: f32,
}

impl StereoFrame {
    pub fn mono(x: f32) -> Self {
        Self { left: x, right: x }
    }

    pub fn scaled(self, gain: f32) -> Self {
        Self {
            left: self.left * gain,
            right: self.right * gain,
        }
    }

    // write into an interleaved device frame of any channel count
    pub fn write_to(self, out: &mut [f32]) {
        match out {
            [] => {}
            [only] => *only = (self.left + self.right) * 0.5,
            [l, r, rest @ ..] => {
                *l = self.left;
                *r = self.right;
                rest.fill(0.0);
            }
        }
    }
}

impl std::ops::AddAssign for StereoFrame {
    fn add_assign(&mut self, rhs: Self) {
        self.left += rhs.left;
        self.right += rhs.right;
    }
}
